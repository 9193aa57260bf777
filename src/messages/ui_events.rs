//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Screens of the application
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Screen {
    /// Waiting for the persisted session to be restored
    #[default]
    Loading,
    SignIn,
    SignUp,
    Dashboard,
    Profile,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Loading => "Loading",
            Screen::SignIn => "Sign in",
            Screen::SignUp => "Create account",
            Screen::Dashboard => "Dashboard",
            Screen::Profile => "My profile",
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Form editing
    NextField,
    PrevField,
    CharInput(char),
    Backspace,
    Submit,

    // Navigation
    OpenSignUp,
    OpenProfile,
    Back,

    // Session
    SignOut,

    // Popups
    DismissAlert,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, screen: Screen, show_alert: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('n') if screen == Screen::SignIn && !show_alert => {
                return Some(UiEvent::OpenSignUp)
            }
            _ => return None,
        }
    }

    if show_alert {
        return Some(UiEvent::DismissAlert);
    }

    match screen {
        Screen::Loading => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
            _ => None,
        },
        Screen::Dashboard => match key.code {
            KeyCode::Char('p') | KeyCode::Enter => Some(UiEvent::OpenProfile),
            KeyCode::Char('o') => Some(UiEvent::SignOut),
            KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
            _ => None,
        },
        Screen::SignIn => handle_form_keys(key, UiEvent::Quit),
        Screen::SignUp | Screen::Profile => handle_form_keys(key, UiEvent::Back),
    }
}

/// Handle keys on a form screen; `on_escape` is what Esc means there
fn handle_form_keys(key: KeyEvent, on_escape: UiEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(on_escape),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
