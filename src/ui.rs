// src/ui.rs

pub mod album;
pub mod analytics;
pub mod chat;
pub mod footer;
pub mod header;
pub mod home;
pub mod quit_confirm;

use crate::{
    album::load_solutions,
    api::ApiClient,
    app::{App, AppState},
    chat::Delivery,
    config::get_config,
    errors::PlatformResult,
    key_handlers::handle_key,
    models::{Analytics, ApiCallLog, Solution},
};
use crossterm::{
    cursor::Show,
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

const TICK_RATE: Duration = Duration::from_millis(250);
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Everything the UI loop reacts to.
pub enum AppEvent {
    Input(CEvent),
    Tick,
    Reply(Delivery),
    AlbumLoaded(PlatformResult<Vec<Solution>>),
    AnalyticsLoaded(PlatformResult<Analytics>),
    ApiCall(ApiCallLog),
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui() -> PlatformResult<()> {
    let config = get_config();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (call_tx, call_rx) = mpsc::unbounded_channel::<ApiCallLog>();
    let client = ApiClient::new(&config).with_call_log(call_tx);

    forward_api_calls(call_rx, event_tx.clone());
    spawn_page_loads(&client, &config.album_source, &event_tx);
    spawn_input_reader(event_tx.clone());

    // Declared first so it is dropped last, after the terminal.
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.logs.add(format!("Backend A: {}", config.chatbot_a_url));
    app.logs.add(format!("Backend B: {}", config.chatbot_b_url));

    let res = run_app(&mut terminal, &mut app, &client, event_tx, event_rx).await;

    if let Err(e) = &res {
        warn!("ui loop ended with error: {}", e);
    }
    info!("ui closed with {} messages in transcript", app.chat.transcript().len());
    res
}

/// Raw mode and the alternate screen, undone on drop on every exit path.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> PlatformResult<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to leave raw mode: {}", e);
        }
        if let Err(e) = leave_screen(&mut io::stdout()) {
            warn!("failed to restore the screen: {}", e);
        }
    }
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &ApiClient,
    tx: UnboundedSender<AppEvent>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> PlatformResult<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        let Some(event) = rx.recv().await else {
            break;
        };

        match event {
            AppEvent::Input(CEvent::Key(key)) => {
                if let Some(pending) = handle_key(key, app) {
                    app.logs.add(format!("Routing message to backend {}", pending.target));
                    let client = client.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let reply = pending.dispatch(&client).await;
                        let _ = tx.send(AppEvent::Reply(reply));
                    });
                }
            }
            AppEvent::Input(_) => {}
            AppEvent::Tick => app.tick(),
            AppEvent::Reply(reply) => app.on_reply(reply),
            AppEvent::AlbumLoaded(result) => app.on_album_loaded(result),
            AppEvent::AnalyticsLoaded(result) => app.on_analytics_loaded(result),
            AppEvent::ApiCall(call) => app.on_api_call(&call),
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Lays out header, current page and footer.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    header::draw_header(f, chunks[0], app);

    let page = match app.state {
        AppState::QuitConfirm | AppState::Quit => app.last_page,
        state => state,
    };
    match page {
        AppState::Chat => chat::draw_chat(f, chunks[1], app),
        AppState::Album => album::draw_album(f, chunks[1], app),
        AppState::Analytics => analytics::draw_analytics(f, chunks[1], app),
        _ => home::draw_home(f, chunks[1], app),
    }

    if app.state == AppState::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, chunks[1]);
    }

    footer::draw_footer(f, chunks[2], app);
}

fn forward_api_calls(mut call_rx: UnboundedReceiver<ApiCallLog>, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        while let Some(call) = call_rx.recv().await {
            if tx.send(AppEvent::ApiCall(call)).is_err() {
                return;
            }
        }
    });
}

/// Album and analytics are fetched once, in the background.
fn spawn_page_loads(client: &ApiClient, album_source: &str, tx: &UnboundedSender<AppEvent>) {
    let album_client = client.clone();
    let album_source = album_source.to_string();
    let album_tx = tx.clone();
    tokio::spawn(async move {
        let result = load_solutions(&album_client, &album_source).await;
        let _ = album_tx.send(AppEvent::AlbumLoaded(result));
    });

    let analytics_client = client.clone();
    let analytics_tx = tx.clone();
    tokio::spawn(async move {
        let result = analytics_client.fetch_analytics().await;
        let _ = analytics_tx.send(AppEvent::AnalyticsLoaded(result));
    });
}

/// Reads terminal events on a blocking thread. Stops once the UI loop
/// has dropped its receiver.
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            match event::poll(POLL_TIMEOUT) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if tx.send(AppEvent::Input(event)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("terminal read failed: {}", e);
                        return;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("terminal poll failed: {}", e);
                    return;
                }
            }

            if last_tick.elapsed() >= TICK_RATE {
                if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn home_page_shows_header_tabs_and_welcome() {
        let app = App::new();
        let screen = render(&app);
        assert!(screen.contains(header::PLATFORM_TITLE));
        assert!(screen.contains("F2 Chat"));
        assert!(screen.contains(home::WELCOME_HEADING));
    }

    #[test]
    fn leaving_the_screen_restores_cursor_and_main_buffer() {
        let mut out: Vec<u8> = Vec::new();
        leave_screen(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[test]
    fn dropping_the_guard_without_a_terminal_does_not_panic() {
        drop(TerminalGuard);
    }

    #[test]
    fn quit_prompt_overlays_current_page() {
        let mut app = App::new();
        app.go_to(AppState::Chat);
        app.request_quit();
        let screen = render(&app);
        assert!(screen.contains("Confirm Quit"));
        assert!(screen.contains(" Chat "));
    }
}
