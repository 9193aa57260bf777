//! Network actor - runs session and API operations in the Tokio runtime
//!
//! Commands are handled one at a time, in arrival order. That makes this task
//! the single writer of the session: a second sign-in waits for the first.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;
use crate::session::SessionManager;

/// Network actor that owns the session manager and the API client
pub struct NetworkActor {
    sessions: SessionManager,
    api: Arc<dyn ApiClient>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
}

impl NetworkActor {
    pub fn new(
        sessions: SessionManager,
        api: Arc<dyn ApiClient>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            sessions,
            api,
            response_tx,
        }
    }

    /// Run the network actor message loop
    pub async fn run(self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        while let Some(cmd) = cmd_rx.recv().await {
            let Some(response) = self.handle(cmd).await else {
                tracing::info!("Network actor shutting down");
                break;
            };

            if self.response_tx.send(response).is_err() {
                // App layer is gone
                break;
            }
        }
    }

    /// Execute one command; `None` means shut down
    async fn handle(&self, cmd: NetworkCommand) -> Option<NetworkResponse> {
        let response = match cmd {
            NetworkCommand::RestoreSession => {
                NetworkResponse::SessionRestored(self.sessions.restore().await)
            }

            NetworkCommand::SignIn(credentials) => {
                match self.sessions.sign_in(&credentials).await {
                    Ok(session) => NetworkResponse::SignedIn(session),
                    Err(e) => {
                        tracing::warn!(error = %e, "Sign in failed");
                        NetworkResponse::SignInFailed {
                            message: e.to_string(),
                        }
                    }
                }
            }

            NetworkCommand::SignUp(data) => {
                tracing::debug!(email = %data.email, "Creating account");
                match self.api.create_user(&data).await {
                    Ok(user) => {
                        tracing::info!(user_id = %user.id, "Account created");
                        NetworkResponse::SignedUp(user)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Sign up failed");
                        NetworkResponse::SignUpFailed {
                            message: e.to_string(),
                        }
                    }
                }
            }

            NetworkCommand::SignOut => {
                self.sessions.sign_out().await;
                NetworkResponse::SignedOut
            }

            NetworkCommand::UpdateProfile(update) => {
                match self.sessions.update_profile(&update).await {
                    Ok(user) => NetworkResponse::ProfileUpdated(user),
                    Err(e) => {
                        tracing::warn!(error = %e, "Profile update failed");
                        NetworkResponse::ProfileUpdateFailed {
                            message: e.to_string(),
                        }
                    }
                }
            }

            NetworkCommand::Shutdown => return None,
        };

        Some(response)
    }
}
