//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::Screen;
use crate::models::User;

/// A form input as the UI should draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    /// Render masked
    pub secret: bool,
    pub error: Option<String>,
}

impl FieldView {
    /// Text to display, with secrets masked
    pub fn display_value(&self) -> String {
        if self.secret {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// A modal message, dismissed with any key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Alert {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub screen: Screen,

    // Form
    pub fields: Vec<FieldView>,
    pub focused_field: usize,
    pub is_submitting: bool,

    // Session
    pub user: Option<User>,

    // Popups
    pub alert: Option<Alert>,
}

impl RenderState {
    pub fn show_alert(&self) -> bool {
        self.alert.is_some()
    }
}
