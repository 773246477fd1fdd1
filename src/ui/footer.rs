use crate::app::{App, AppState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn footer_text(state: AppState) -> &'static str {
    match state {
        AppState::Home => "Up/Down to choose, Enter to open, Tab or F1-F4 to switch pages, 'q' to quit.",
        AppState::Chat => {
            "Type a message and press Enter to send. PgUp/PgDn scroll. Esc for home, Ctrl-C to quit."
        }
        AppState::Album => "Up/Down to browse solutions. Esc for home, 'q' to quit.",
        AppState::Analytics => "Tab or F1-F4 to switch pages. Esc for home, 'q' to quit.",
        AppState::QuitConfirm => "Press 'y' to confirm quit or 'n' to cancel.",
        AppState::Quit => "",
    }
}

pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let footer = Paragraph::new(footer_text(app.state))
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
