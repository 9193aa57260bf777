//! Network messages - communication between App and Network layers

use crate::models::{ProfileUpdate, Session, SignInCredentials, SignUpData, User};
use crate::session::AuthState;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Load the session persisted by a previous run
    RestoreSession,
    /// Exchange credentials for a session
    SignIn(SignInCredentials),
    /// Create a new account
    SignUp(SignUpData),
    /// Drop the current session
    SignOut,
    /// Update the signed-in user's profile
    UpdateProfile(ProfileUpdate),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Startup restore finished (with or without a session)
    SessionRestored(AuthState),
    SignedIn(Session),
    SignInFailed {
        message: String,
    },
    SignedUp(User),
    SignUpFailed {
        message: String,
    },
    SignedOut,
    ProfileUpdated(User),
    ProfileUpdateFailed {
        message: String,
    },
}

impl NetworkResponse {
    /// Check if this response reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            NetworkResponse::SignInFailed { .. }
                | NetworkResponse::SignUpFailed { .. }
                | NetworkResponse::ProfileUpdateFailed { .. }
        )
    }
}
