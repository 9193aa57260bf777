//! Error types shared by the storage, network and session layers

use thiserror::Error;

/// Failure of the persisted key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure talking to the GoBarber API.
///
/// These are handed back to callers untouched; the UI decides how to present
/// them.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out ({0}s)")]
    Timeout(u64),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    ///
    /// The API reports failures as `{"status": "error", "message": "..."}`;
    /// anything else is kept verbatim.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        ApiError::Status { status, message }
    }

    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of a session operation
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("E-mail and password must not be empty")]
    InvalidCredentials,

    #[error("No user is signed in")]
    NotSignedIn,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Could not persist session: {0}")]
    Storage(#[from] StoreError),
}
