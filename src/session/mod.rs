//! Session layer - the authenticated user's session and its lifecycle
//!
//! The [`SessionManager`] is the only writer of the session, the persisted
//! session keys and the request credential.

pub mod manager;

pub use manager::{AuthState, SessionManager};
