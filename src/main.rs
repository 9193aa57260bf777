//! GoBarber TUI - Actor-based client for the GoBarber API
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - session lifecycle and API calls

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use gobarber::constants::{APP_NAME, APP_VERSION};
use gobarber::messages::ui_events::{key_to_ui_event, Screen};
use gobarber::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use gobarber::network::{ApiClient, CredentialHolder, HttpApiClient, NetworkActor};
use gobarber::storage::{FileStore, KeyValueStore};
use gobarber::ui::{centered_rect, field_cursor, render_field, render_user_card, FIELD_HEIGHT};
use gobarber::{AppActor, Config, SessionManager};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating {}", config.data_dir.display()))?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(&config.data_dir, "gobarber.log");
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(version = APP_VERSION, api_url = %config.api_url, "Starting");

    // Session wiring: the credential is shared, the session manager writes it
    let credential = CredentialHolder::new();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage_path()));
    let api: Arc<dyn ApiClient> = Arc::new(HttpApiClient::new(&config, credential.clone()));
    let sessions = SessionManager::new(store, api.clone(), credential);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(sessions, api, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.screen, current_state.show_alert())
                {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    match state.screen {
        Screen::Loading => draw_loading(f, main_chunks[1]),
        Screen::Dashboard => draw_dashboard(f, state, main_chunks[1]),
        Screen::SignIn | Screen::SignUp | Screen::Profile => draw_form(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if let Some(alert) = &state.alert {
        draw_alert_popup(f, &alert.title, &alert.message, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Rgb(255, 144, 0)).bold(),
        ),
        Span::raw(" "),
        Span::styled(state.screen.title(), Style::default().fg(Color::Gray)),
        Span::styled(
            if state.is_submitting { "  [...]" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_loading(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(40, 20, area);
    let text = Paragraph::new("Restoring session...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(text, popup_area);
}

fn draw_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let form_height = state.fields.len() as u16 * FIELD_HEIGHT + 2;
    let column = centered_rect(50, 100, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(form_height),
            Constraint::Min(0),
        ])
        .split(column);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", state.screen.title()));
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            state
                .fields
                .iter()
                .map(|_| Constraint::Length(FIELD_HEIGHT))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, field) in state.fields.iter().enumerate() {
        let is_focused = i == state.focused_field;
        f.render_widget(render_field(field, is_focused), rows[i]);

        if is_focused && !state.show_alert() && !state.is_submitting {
            f.set_cursor_position(field_cursor(field, rows[i]));
        }
    }
}

fn draw_dashboard(f: &mut Frame, state: &RenderState, area: Rect) {
    let card_area = centered_rect(60, 50, area);
    match &state.user {
        Some(user) => f.render_widget(render_user_card(user), card_area),
        None => f.render_widget(
            Paragraph::new("Not signed in").block(Block::default().borders(Borders::ALL)),
            card_area,
        ),
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.show_alert() {
        " Press any key to continue "
    } else if state.is_submitting {
        " Sending... "
    } else {
        match state.screen {
            Screen::Loading => " q:quit ",
            Screen::SignIn => " Tab:next field | Enter:sign in | Ctrl+N:create account | Esc:quit ",
            Screen::SignUp => " Tab:next field | Enter:create account | Esc:back ",
            Screen::Profile => " Tab:next field | Enter:save changes | Esc:back ",
            Screen::Dashboard => " p:profile | o:sign out | q:quit ",
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_alert_popup(f: &mut Frame, title: &str, message: &str, area: Rect) {
    let popup_area = centered_rect(60, 30, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message.to_string())
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(text, popup_area);
}
