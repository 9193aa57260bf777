//! Form validation for the sign-in, sign-up and profile screens
//!
//! Every rule is checked before reporting, so the user sees all field errors
//! at once. Only the first failing rule of each field is kept.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{PasswordChange, ProfileUpdate, SignInCredentials, SignUpData, User};

const MIN_PASSWORD_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Field name -> message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    fn require_email(&mut self, field: &'static str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, "E-mail is required");
        } else if !email_regex().is_match(value) {
            self.add(field, "Enter a valid e-mail");
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<SignInCredentials, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_email("email", &self.email);
        errors.require("password", &self.password, "Password is required");

        errors.into_result(SignInCredentials::new(self.email.trim(), self.password.as_str()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<SignUpData, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require_email("email", &self.email);
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", format!("At least {} characters", MIN_PASSWORD_LEN));
        }

        errors.into_result(SignUpData {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

impl ProfileForm {
    /// Pre-fill from the signed-in user; password fields start empty
    pub fn from_user(user: &User) -> Self {
        ProfileForm {
            name: user.name.clone(),
            email: user.email.clone(),
            ..Self::default()
        }
    }

    /// Validate and build the request body.
    ///
    /// The new password is only required (and only sent) when the current
    /// password was filled in.
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require_email("email", &self.email);

        let changing_password = !self.old_password.is_empty();
        if changing_password {
            errors.require("password", &self.password, "Field is required");
            errors.require(
                "password_confirmation",
                &self.password_confirmation,
                "Field is required",
            );
        }
        if self.password_confirmation != self.password {
            errors.add("password_confirmation", "Confirmation does not match");
        }

        let password_change = changing_password.then(|| PasswordChange {
            old_password: self.old_password.clone(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
        });

        errors.into_result(ProfileUpdate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password_change,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_reports_every_field() {
        let errors = SignInForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("E-mail is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_sign_in_rejects_malformed_email() {
        let form = SignInForm {
            email: "ana.example.com".into(),
            password: "123456".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Enter a valid e-mail"));
        assert_eq!(errors.get("password"), None);
    }

    #[test]
    fn test_sign_in_trims_email() {
        let form = SignInForm {
            email: "  ana@example.com ".into(),
            password: "123456".into(),
        };
        let creds = form.validate().unwrap();
        assert_eq!(creds.email, "ana@example.com");
        assert_eq!(creds.password, "123456");
    }

    #[test]
    fn test_sign_up_password_length() {
        let form = SignUpForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "12345".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password"), Some("At least 6 characters"));

        let form = SignUpForm {
            password: "123456".into(),
            ..form
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_profile_without_password_change() {
        let user = User {
            id: "u-1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            avatar_url: None,
        };
        let update = ProfileForm::from_user(&user).validate().unwrap();
        assert_eq!(update.name, "Ana");
        assert_eq!(update.password_change, None);
    }

    #[test]
    fn test_profile_password_fields_required_with_old_password() {
        let form = ProfileForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            old_password: "123456".into(),
            ..ProfileForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password"), Some("Field is required"));
        assert_eq!(errors.get("password_confirmation"), Some("Field is required"));
    }

    #[test]
    fn test_profile_confirmation_must_match() {
        let form = ProfileForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            old_password: "123456".into(),
            password: "abcdef".into(),
            password_confirmation: "abcdeg".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("password_confirmation"), Some("Confirmation does not match"));
    }

    #[test]
    fn test_profile_confirmation_checked_even_without_old_password() {
        let form = ProfileForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password_confirmation: "abc".into(),
            ..ProfileForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password_confirmation"), Some("Confirmation does not match"));
    }

    #[test]
    fn test_profile_new_password_needs_confirmation() {
        let form = ProfileForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "abcdef".into(),
            ..ProfileForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("password_confirmation"), Some("Confirmation does not match"));
    }

    #[test]
    fn test_profile_with_password_change() {
        let form = ProfileForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            old_password: "123456".into(),
            password: "abcdef".into(),
            password_confirmation: "abcdef".into(),
        };
        let change = form.validate().unwrap().password_change.unwrap();
        assert_eq!(change.old_password, "123456");
        assert_eq!(change.password, "abcdef");
    }
}
