//! # GoBarber TUI
//!
//! A terminal client for the GoBarber appointment API.
//!
//! ## Features
//! - Sign in, sign up and profile editing
//! - Session persisted across runs and restored on startup
//! - Bearer credential managed by the session layer
//! - Form validation with per-field errors
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime), sole owner of the session

pub mod constants;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod session;
pub mod validation;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, SessionError, StoreError};
pub use models::{PasswordChange, ProfileUpdate, Session, SignInCredentials, SignUpData, User};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use session::{AuthState, SessionManager};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiClient, CredentialHolder, HttpApiClient, NetworkActor};
