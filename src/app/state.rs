//! App state - pure data structure with no I/O logic

use crate::messages::ui_events::Screen;
use crate::messages::{Alert, FieldView, RenderState};
use crate::session::AuthState;
use crate::validation::{ProfileForm, SignInForm, SignUpForm, ValidationErrors};

/// (field name, label, secret) for each screen's inputs, in focus order
const SIGN_IN_FIELDS: &[(&str, &str, bool)] = &[
    ("email", "E-mail", false),
    ("password", "Password", true),
];

const SIGN_UP_FIELDS: &[(&str, &str, bool)] = &[
    ("name", "Name", false),
    ("email", "E-mail", false),
    ("password", "Password", true),
];

const PROFILE_FIELDS: &[(&str, &str, bool)] = &[
    ("name", "Name", false),
    ("email", "E-mail", false),
    ("old_password", "Current password", true),
    ("password", "New password", true),
    ("password_confirmation", "Confirm password", true),
];

/// Main application state - pure data, no I/O
#[derive(Debug, Default)]
pub struct AppState {
    pub screen: Screen,

    // Session as last reported by the network layer
    pub auth: AuthState,

    // Forms
    pub sign_in: SignInForm,
    pub sign_up: SignUpForm,
    pub profile: ProfileForm,
    pub focused_field: usize,
    pub field_errors: ValidationErrors,
    pub is_submitting: bool,

    // Popups
    pub alert: Option<Alert>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field layout of the current screen
    pub(crate) fn field_specs(&self) -> &'static [(&'static str, &'static str, bool)] {
        match self.screen {
            Screen::SignIn => SIGN_IN_FIELDS,
            Screen::SignUp => SIGN_UP_FIELDS,
            Screen::Profile => PROFILE_FIELDS,
            Screen::Loading | Screen::Dashboard => &[],
        }
    }

    /// Value of a form field on the current screen
    pub fn field_value(&self, index: usize) -> Option<&str> {
        let value = match (self.screen, index) {
            (Screen::SignIn, 0) => &self.sign_in.email,
            (Screen::SignIn, 1) => &self.sign_in.password,
            (Screen::SignUp, 0) => &self.sign_up.name,
            (Screen::SignUp, 1) => &self.sign_up.email,
            (Screen::SignUp, 2) => &self.sign_up.password,
            (Screen::Profile, 0) => &self.profile.name,
            (Screen::Profile, 1) => &self.profile.email,
            (Screen::Profile, 2) => &self.profile.old_password,
            (Screen::Profile, 3) => &self.profile.password,
            (Screen::Profile, 4) => &self.profile.password_confirmation,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Mutable reference to the focused form field
    pub fn focused_field_mut(&mut self) -> Option<&mut String> {
        match (self.screen, self.focused_field) {
            (Screen::SignIn, 0) => Some(&mut self.sign_in.email),
            (Screen::SignIn, 1) => Some(&mut self.sign_in.password),
            (Screen::SignUp, 0) => Some(&mut self.sign_up.name),
            (Screen::SignUp, 1) => Some(&mut self.sign_up.email),
            (Screen::SignUp, 2) => Some(&mut self.sign_up.password),
            (Screen::Profile, 0) => Some(&mut self.profile.name),
            (Screen::Profile, 1) => Some(&mut self.profile.email),
            (Screen::Profile, 2) => Some(&mut self.profile.old_password),
            (Screen::Profile, 3) => Some(&mut self.profile.password),
            (Screen::Profile, 4) => Some(&mut self.profile.password_confirmation),
            _ => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let fields = self
            .field_specs()
            .iter()
            .enumerate()
            .map(|(i, (name, label, secret))| FieldView {
                label: *label,
                value: self.field_value(i).unwrap_or_default().to_string(),
                secret: *secret,
                error: self.field_errors.get(name).map(str::to_string),
            })
            .collect();

        RenderState {
            screen: self.screen,
            fields,
            focused_field: self.focused_field,
            is_submitting: self.is_submitting,
            user: self.auth.user().cloned(),
            alert: self.alert.clone(),
        }
    }
}
