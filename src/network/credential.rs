//! Current bearer credential shared between the session manager and the API client

use std::sync::{Arc, RwLock};

/// Holds the token sent as `Authorization: Bearer <token>`.
///
/// Cloning shares the same cell. The session manager is the only writer;
/// the API client reads it when building each request.
#[derive(Clone, Default)]
pub struct CredentialHolder {
    token: Arc<RwLock<Option<String>>>,
}

impl CredentialHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_set(&self) -> bool {
        self.token.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Value of the authorization header, if a token is held
    pub fn authorization(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }
}

impl std::fmt::Debug for CredentialHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHolder")
            .field("is_set", &self.is_set())
            .finish()
    }
}
