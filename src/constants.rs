//! Application constants
//!
//! Centralized location for storage keys and configuration defaults.

/// Persisted store key holding the raw session token
pub const TOKEN_KEY: &str = "@GoBarber:token";

/// Persisted store key holding the JSON-serialized user record
pub const USER_KEY: &str = "@GoBarber:user";

/// Default base URL of the GoBarber API
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the configured API URL
pub const API_URL_ENV: &str = "GOBARBER_API_URL";

/// Name of the directory (under $HOME) holding config, storage and logs
pub const DATA_DIR_NAME: &str = ".gobarber";

/// Application name
pub const APP_NAME: &str = "GoBarber";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
