//! Session manager - owns the authenticated session and keeps the persisted
//! store and the request credential in step with it
//!
//! Every mutating operation finishes its storage and credential writes before
//! publishing the new [`AuthState`], so a subscriber never sees a session whose
//! side effects are still pending.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::constants::{TOKEN_KEY, USER_KEY};
use crate::error::{SessionError, StoreError};
use crate::models::{ProfileUpdate, Session, SignInCredentials, User};
use crate::network::client::ApiClient;
use crate::network::credential::CredentialHolder;
use crate::storage::KeyValueStore;

/// Observable authentication state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// True until the first restore attempt has completed
    pub loading: bool,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        AuthState {
            session: None,
            loading: true,
        }
    }
}

/// Process-wide authentication session.
///
/// Built explicitly from its collaborators and handed to whoever needs it;
/// there is no global instance.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    api: Arc<dyn ApiClient>,
    credential: CredentialHolder,
    state: watch::Sender<AuthState>,
    restored: AtomicBool,
    // Held for the whole of each mutating operation
    op_lock: Mutex<()>,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn ApiClient>,
        credential: CredentialHolder,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        SessionManager {
            store,
            api,
            credential,
            state,
            restored: AtomicBool::new(false),
            op_lock: Mutex::new(()),
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    pub fn credential(&self) -> &CredentialHolder {
        &self.credential
    }

    /// Restore the session saved by a previous run.
    ///
    /// Never fails: a missing key, a malformed user record or a store error all
    /// mean "no session". Only the first call does any work; the loading flag
    /// is cleared exactly once.
    pub async fn restore(&self) -> AuthState {
        let _guard = self.op_lock.lock().await;

        if self.restored.swap(true, Ordering::SeqCst) {
            tracing::debug!("Session already restored, skipping");
            return self.state();
        }

        let session = self.load_persisted().await;

        match &session {
            Some(session) => {
                tracing::info!(user_id = %session.user.id, "Restored persisted session");
                self.credential.set(session.token.clone());
            }
            None => tracing::info!("No persisted session"),
        }

        self.state.send_replace(AuthState {
            session,
            loading: false,
        });
        self.state()
    }

    async fn load_persisted(&self) -> Option<Session> {
        let values = match self.store.get_many(&[TOKEN_KEY, USER_KEY]).await {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read persisted session");
                return None;
            }
        };

        let mut values = values.into_iter();
        let token = values.next().flatten().filter(|t| !t.is_empty())?;
        let user_json = values.next().flatten().filter(|u| !u.is_empty())?;

        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => Some(Session::new(token, user)),
            Err(e) => {
                tracing::warn!(error = %e, "Persisted user record is malformed");
                None
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// API failures are returned as-is and leave the current session alone.
    pub async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, SessionError> {
        if !credentials.is_complete() {
            return Err(SessionError::InvalidCredentials);
        }

        let _guard = self.op_lock.lock().await;
        tracing::debug!(email = %credentials.email, "Signing in");

        let session = self.api.create_session(credentials).await?;

        let user_json = serde_json::to_string(&session.user).map_err(StoreError::from)?;
        self.store
            .set_many(&[(TOKEN_KEY, session.token.as_str()), (USER_KEY, user_json.as_str())])
            .await?;

        self.credential.set(session.token.clone());
        self.state.send_modify(|state| state.session = Some(session.clone()));

        tracing::info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    /// Forget the session, locally and on disk.
    ///
    /// Always ends signed out; a store failure is only logged.
    pub async fn sign_out(&self) {
        let _guard = self.op_lock.lock().await;

        if let Err(e) = self.store.remove_many(&[TOKEN_KEY, USER_KEY]).await {
            tracing::warn!(error = %e, "Could not remove persisted session");
        }

        self.credential.clear();
        self.state.send_modify(|state| state.session = None);
        tracing::info!("Signed out");
    }

    /// Replace the signed-in user's record, keeping the token
    pub async fn update_user(&self, user: User) -> Result<Session, SessionError> {
        let _guard = self.op_lock.lock().await;
        self.apply_user(user).await
    }

    /// Send a profile update to the API and adopt the record it returns
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, SessionError> {
        let _guard = self.op_lock.lock().await;

        if self.current_session().is_none() {
            return Err(SessionError::NotSignedIn);
        }

        tracing::info!(
            password_change = update.password_change.is_some(),
            "Updating profile"
        );
        let user = self.api.update_profile(update).await?;
        let session = self.apply_user(user).await?;
        Ok(session.user)
    }

    async fn apply_user(&self, user: User) -> Result<Session, SessionError> {
        let mut session = self.current_session().ok_or(SessionError::NotSignedIn)?;
        session.user = user;

        let user_json = serde_json::to_string(&session.user).map_err(StoreError::from)?;
        self.store.set_many(&[(USER_KEY, user_json.as_str())]).await?;

        self.state.send_modify(|state| state.session = Some(session.clone()));
        tracing::debug!(user_id = %session.user.id, "User record updated");
        Ok(session)
    }
}
