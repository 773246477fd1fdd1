use crate::app::{App, AppState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const WELCOME_HEADING: &str = "Welcome to the Unified Web Platform";
pub const WELCOME_BODY: &str =
    "This platform integrates our department's services into a single, cohesive experience.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    Open(AppState),
    Quit,
}

pub const HOME_MENU: [(&str, HomeAction); 4] = [
    ("Chat with the assistants", HomeAction::Open(AppState::Chat)),
    ("Browse the solutions album", HomeAction::Open(AppState::Album)),
    ("View task analytics", HomeAction::Open(AppState::Analytics)),
    ("Quit", HomeAction::Quit),
];

pub fn draw_home(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Home ")
        .style(Style::default().fg(Color::LightYellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let menu_height = HOME_MENU.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(menu_height),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(inner);

    let heading = Paragraph::new(WELCOME_HEADING)
        .style(
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    let body = Paragraph::new(WELCOME_BODY)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(body, chunks[1]);

    let menu_lines: Vec<Line> = HOME_MENU
        .iter()
        .enumerate()
        .map(|(i, (label, _))| {
            let selected = i == app.home_selected;
            let style = if selected {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(
                format!("{} {}", if selected { "▶" } else { " " }, label),
                style,
            ))
        })
        .collect();

    f.render_widget(
        Paragraph::new(menu_lines).alignment(Alignment::Center),
        chunks[2],
    );
}

pub fn menu_down(app: &mut App) {
    app.home_selected = (app.home_selected + 1) % HOME_MENU.len();
}

pub fn menu_up(app: &mut App) {
    app.home_selected = (app.home_selected + HOME_MENU.len() - 1) % HOME_MENU.len();
}

pub fn selected_action(app: &App) -> HomeAction {
    HOME_MENU[app.home_selected % HOME_MENU.len()].1
}
