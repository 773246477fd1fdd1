use crate::{
    app::{App, AppState, PAGES},
    chat::PendingSend,
    ui::home::{self, HomeAction},
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Applies one key press to the app. Returns the send to dispatch when the
/// user submitted a chat message.
pub fn handle_key(key: KeyEvent, app: &mut App) -> Option<PendingSend> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if app.state == AppState::QuitConfirm {
        handle_quit_confirm_input(key, app);
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return None;
    }

    match key.code {
        KeyCode::Tab => {
            app.next_page();
            return None;
        }
        KeyCode::BackTab => {
            app.previous_page();
            return None;
        }
        KeyCode::F(n) if (1..=PAGES.len() as u8).contains(&n) => {
            app.go_to(PAGES[(n - 1) as usize]);
            return None;
        }
        _ => {}
    }

    match app.state {
        AppState::Home => handle_home_input(key, app),
        AppState::Chat => return handle_chat_input(key, app),
        AppState::Album => handle_album_input(key, app),
        AppState::Analytics => handle_page_input(key, app),
        AppState::QuitConfirm | AppState::Quit => {}
    }
    None
}

fn handle_home_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down => home::menu_down(app),
        KeyCode::Up => home::menu_up(app),
        KeyCode::Enter => match home::selected_action(app) {
            HomeAction::Open(page) => app.go_to(page),
            HomeAction::Quit => app.request_quit(),
        },
        _ => handle_page_input(key, app),
    }
}

pub fn handle_chat_input(key: KeyEvent, app: &mut App) -> Option<PendingSend> {
    match key.code {
        KeyCode::Esc => app.go_to(AppState::Home),
        KeyCode::Enter => {
            let pending = app.chat.begin_send();
            if pending.is_some() {
                app.on_sent();
            }
            return pending;
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => app.chat.pop_char(),
        KeyCode::Char(c) => {
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                app.chat.push_char(c);
            }
        }
        _ => {}
    }
    None
}

fn handle_album_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down => app.album_next(),
        KeyCode::Up => app.album_previous(),
        _ => handle_page_input(key, app),
    }
}

/// Keys shared by the read-only pages.
fn handle_page_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Esc => app.go_to(AppState::Home),
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.cancel_quit();
        }
        _ => {}
    }
}
