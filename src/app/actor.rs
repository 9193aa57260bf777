//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state and kick off the session restore
        let _ = self.render_tx.send(self.state.to_render_state());
        let _ = self.network_tx.send(NetworkCommand::RestoreSession);

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    tracing::debug!(failure = response.is_failure(), "Network response received");
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Form editing
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::Submit => {
                if let Some(cmd) = self.state.submit() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Navigation
            UiEvent::OpenSignUp => self.state.open_sign_up(),
            UiEvent::OpenProfile => self.state.open_profile(),
            UiEvent::Back => self.state.go_back(),

            // Session
            UiEvent::SignOut => {
                if let Some(cmd) = self.state.sign_out() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Popups
            UiEvent::DismissAlert => self.state.dismiss_alert(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
