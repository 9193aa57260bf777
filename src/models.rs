use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated user profile as returned by the API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// An authenticated session: the bearer token plus the user it belongs to.
///
/// This is also the body of a successful `POST /sessions` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Session {
            token: token.into(),
            user,
        }
    }
}

/// Credentials submitted to `POST /sessions`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInCredentials {
    pub email: String,
    pub password: String,
}

impl SignInCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        SignInCredentials {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields must be non-empty before they are sent anywhere
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for SignInCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// New account submitted to `POST /users`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpData {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignUpData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpData")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Password fields sent along with a profile update
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

/// Body of `PUT /profile`.
///
/// The password fields are flattened into the top-level object and left out
/// entirely when no password change was requested.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub password_change: Option<PasswordChange>,
}
