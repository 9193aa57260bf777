//! Network layer - API requests and the session operations built on them
//!
//! The Network actor receives session commands and sends back responses.

pub mod actor;
pub mod client;
pub mod credential;

pub use actor::NetworkActor;
pub use client::{ApiClient, HttpApiClient};
pub use credential::CredentialHolder;
