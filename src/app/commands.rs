//! Command handlers - business logic for processing UI events and network responses

use crate::app::AppState;
use crate::messages::ui_events::Screen;
use crate::messages::{Alert, NetworkCommand, NetworkResponse};
use crate::validation::{ProfileForm, SignInForm, SignUpForm, ValidationErrors};

impl AppState {
    // ========================
    // Navigation
    // ========================

    fn go_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.focused_field = 0;
        self.field_errors = ValidationErrors::new();
    }

    pub fn open_sign_up(&mut self) {
        if self.screen == Screen::SignIn && !self.is_submitting {
            self.sign_up = SignUpForm::default();
            self.go_to(Screen::SignUp);
        }
    }

    pub fn open_profile(&mut self) {
        if self.screen != Screen::Dashboard {
            return;
        }
        if let Some(user) = self.auth.user() {
            self.profile = ProfileForm::from_user(user);
            self.go_to(Screen::Profile);
        }
    }

    pub fn go_back(&mut self) {
        if self.is_submitting {
            return;
        }
        match self.screen {
            Screen::SignUp => self.go_to(Screen::SignIn),
            Screen::Profile => self.go_to(Screen::Dashboard),
            _ => {}
        }
    }

    /// Screen to show for the current session
    fn home_screen(&self) -> Screen {
        if self.auth.is_signed_in() {
            Screen::Dashboard
        } else {
            Screen::SignIn
        }
    }

    // ========================
    // Form editing
    // ========================

    pub fn next_field(&mut self) {
        let count = self.field_specs().len();
        if count > 0 {
            self.focused_field = (self.focused_field + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.field_specs().len();
        if count > 0 {
            self.focused_field = self.focused_field.checked_sub(1).unwrap_or(count - 1);
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.is_submitting {
            return;
        }
        if let Some(field) = self.focused_field_mut() {
            field.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if self.is_submitting {
            return;
        }
        if let Some(field) = self.focused_field_mut() {
            field.pop();
        }
    }

    /// Validate the current form and build the command that submits it
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if self.is_submitting {
            return None;
        }

        let result = match self.screen {
            Screen::SignIn => self.sign_in.validate().map(NetworkCommand::SignIn),
            Screen::SignUp => self.sign_up.validate().map(NetworkCommand::SignUp),
            Screen::Profile => self.profile.validate().map(NetworkCommand::UpdateProfile),
            Screen::Loading | Screen::Dashboard => return None,
        };

        match result {
            Ok(cmd) => {
                self.field_errors = ValidationErrors::new();
                self.is_submitting = true;
                Some(cmd)
            }
            Err(errors) => {
                tracing::debug!(screen = ?self.screen, errors = errors.len(), "Form validation failed");
                self.field_errors = errors;
                None
            }
        }
    }

    // ========================
    // Session
    // ========================

    pub fn sign_out(&mut self) -> Option<NetworkCommand> {
        if self.screen == Screen::Dashboard && !self.is_submitting {
            self.is_submitting = true;
            Some(NetworkCommand::SignOut)
        } else {
            None
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        self.is_submitting = false;

        match response {
            NetworkResponse::SessionRestored(auth) => {
                self.auth = auth;
                let home = self.home_screen();
                self.go_to(home);
            }

            NetworkResponse::SignedIn(session) => {
                self.auth.session = Some(session);
                self.sign_in = SignInForm::default();
                self.go_to(Screen::Dashboard);
            }

            NetworkResponse::SignInFailed { message } => {
                self.alert = Some(Alert::new(
                    "Authentication error",
                    format!("Could not sign in, check your credentials.\n\n{}", message),
                ));
            }

            NetworkResponse::SignedUp(user) => {
                self.sign_in = SignInForm {
                    email: user.email,
                    password: String::new(),
                };
                self.sign_up = SignUpForm::default();
                self.go_to(Screen::SignIn);
                self.alert = Some(Alert::new(
                    "Account created",
                    "You can now sign in to GoBarber.",
                ));
            }

            NetworkResponse::SignUpFailed { message } => {
                self.alert = Some(Alert::new(
                    "Sign up error",
                    format!("Could not create your account, try again.\n\n{}", message),
                ));
            }

            NetworkResponse::SignedOut => {
                self.auth.session = None;
                self.profile = ProfileForm::default();
                self.go_to(Screen::SignIn);
            }

            NetworkResponse::ProfileUpdated(user) => {
                if let Some(session) = self.auth.session.as_mut() {
                    session.user = user;
                }
                self.profile = ProfileForm::default();
                self.go_to(Screen::Dashboard);
                self.alert = Some(Alert::new("Profile updated", "Your profile was saved."));
            }

            NetworkResponse::ProfileUpdateFailed { message } => {
                self.alert = Some(Alert::new(
                    "Profile update error",
                    format!("An error occurred while updating your profile, try again.\n\n{}", message),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, User};
    use crate::session::AuthState;

    fn ana() -> User {
        User {
            id: "u-1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            avatar_url: None,
        }
    }

    fn signed_out() -> AppState {
        let mut state = AppState::new();
        state.handle_response(NetworkResponse::SessionRestored(AuthState {
            session: None,
            loading: false,
        }));
        state
    }

    fn signed_in() -> AppState {
        let mut state = AppState::new();
        state.handle_response(NetworkResponse::SessionRestored(AuthState {
            session: Some(Session::new("tok", ana())),
            loading: false,
        }));
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.enter_char(c);
        }
    }

    #[test]
    fn test_starts_loading_until_restored() {
        let state = AppState::new();
        assert_eq!(state.screen, Screen::Loading);
        assert!(state.auth.loading);

        assert_eq!(signed_out().screen, Screen::SignIn);
        assert_eq!(signed_in().screen, Screen::Dashboard);
    }

    #[test]
    fn test_invalid_sign_in_marks_fields() {
        let mut state = signed_out();
        type_text(&mut state, "not-an-email");

        assert!(state.submit().is_none());
        assert!(!state.is_submitting);

        let render = state.to_render_state();
        assert_eq!(render.fields[0].error.as_deref(), Some("Enter a valid e-mail"));
        assert_eq!(render.fields[1].error.as_deref(), Some("Password is required"));
    }

    #[test]
    fn test_sign_in_flow() {
        let mut state = signed_out();
        type_text(&mut state, "ana@example.com");
        state.next_field();
        type_text(&mut state, "123456");

        match state.submit() {
            Some(NetworkCommand::SignIn(creds)) => {
                assert_eq!(creds.email, "ana@example.com");
                assert_eq!(creds.password, "123456");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(state.is_submitting);
        // Double submit is ignored while in flight
        assert!(state.submit().is_none());

        state.handle_response(NetworkResponse::SignedIn(Session::new("tok", ana())));
        assert_eq!(state.screen, Screen::Dashboard);
        assert_eq!(state.to_render_state().user, Some(ana()));
        assert_eq!(state.sign_in, SignInForm::default());
    }

    #[test]
    fn test_failed_sign_in_shows_alert() {
        let mut state = signed_out();
        state.is_submitting = true;
        state.handle_response(NetworkResponse::SignInFailed {
            message: "Server responded with 401: Incorrect email/password combination.".into(),
        });

        assert_eq!(state.screen, Screen::SignIn);
        assert!(!state.is_submitting);
        assert_eq!(state.alert.as_ref().map(|a| a.title.as_str()), Some("Authentication error"));

        state.dismiss_alert();
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_sign_up_returns_to_sign_in() {
        let mut state = signed_out();
        state.open_sign_up();
        assert_eq!(state.screen, Screen::SignUp);

        type_text(&mut state, "Bia");
        state.next_field();
        type_text(&mut state, "bia@example.com");
        state.next_field();
        type_text(&mut state, "123456");
        assert!(matches!(state.submit(), Some(NetworkCommand::SignUp(_))));

        state.handle_response(NetworkResponse::SignedUp(User {
            name: "Bia".into(),
            email: "bia@example.com".into(),
            ..ana()
        }));
        assert_eq!(state.screen, Screen::SignIn);
        assert_eq!(state.sign_in.email, "bia@example.com");
        assert!(state.alert.is_some());
    }

    #[test]
    fn test_profile_is_prefilled_and_updates_user() {
        let mut state = signed_in();
        state.open_profile();
        assert_eq!(state.screen, Screen::Profile);
        assert_eq!(state.profile.name, "Ana");
        assert_eq!(state.profile.email, "ana@example.com");

        // Append to the name, leave passwords blank
        type_text(&mut state, " Maria");
        match state.submit() {
            Some(NetworkCommand::UpdateProfile(update)) => {
                assert_eq!(update.name, "Ana Maria");
                assert!(update.password_change.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let updated = User {
            name: "Ana Maria".into(),
            ..ana()
        };
        state.handle_response(NetworkResponse::ProfileUpdated(updated.clone()));
        assert_eq!(state.screen, Screen::Dashboard);
        assert_eq!(state.auth.user(), Some(&updated));
        assert_eq!(state.auth.session.as_ref().map(|s| s.token.as_str()), Some("tok"));
    }

    #[test]
    fn test_profile_requires_signed_in_user() {
        let mut state = signed_out();
        state.screen = Screen::Dashboard;
        state.open_profile();
        assert_eq!(state.screen, Screen::Dashboard);
    }

    #[test]
    fn test_sign_out_goes_to_sign_in() {
        let mut state = signed_in();
        assert!(matches!(state.sign_out(), Some(NetworkCommand::SignOut)));

        state.handle_response(NetworkResponse::SignedOut);
        assert_eq!(state.screen, Screen::SignIn);
        assert!(!state.auth.is_signed_in());
        assert_eq!(state.to_render_state().user, None);
    }

    #[test]
    fn test_field_focus_wraps() {
        let mut state = signed_out();
        state.prev_field();
        assert_eq!(state.focused_field, 1);
        state.next_field();
        assert_eq!(state.focused_field, 0);

        state.delete_char();
        assert_eq!(state.sign_in.email, "");
    }

    #[test]
    fn test_password_fields_render_masked() {
        let mut state = signed_out();
        state.next_field();
        type_text(&mut state, "abc");

        let render = state.to_render_state();
        assert!(render.fields[1].secret);
        assert_eq!(render.fields[1].display_value(), "***");
        assert!(!render.fields[0].secret);
    }
}
