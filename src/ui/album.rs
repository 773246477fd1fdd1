use crate::{
    app::{App, PageData},
    models::Solution,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use textwrap::wrap;

pub const ALBUM_TITLE: &str = " Standard Solutions Album ";

fn solution_card(solution: &Solution, width: u16) -> ListItem<'static> {
    let mut lines = vec![Line::from(Span::styled(
        solution.title.clone(),
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
    ))];

    let wrap_width = (width as usize).saturating_sub(4).max(10);
    for line in wrap(&solution.description, wrap_width) {
        lines.push(Line::from(Span::styled(
            format!("  {}", line),
            Style::default().fg(Color::White),
        )));
    }

    lines.push(Line::from(Span::styled(
        format!("  image: {}", solution.image),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(""));

    ListItem::new(Text::from(lines))
}

pub fn draw_album(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(ALBUM_TITLE)
        .style(Style::default().fg(Color::LightYellow));

    let solutions = match &app.album {
        PageData::Loading => {
            f.render_widget(Paragraph::new("Loading...").block(block), area);
            return;
        }
        PageData::Failed(message) => {
            let error = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(error, area);
            return;
        }
        PageData::Ready(solutions) => solutions,
    };

    if solutions.is_empty() {
        f.render_widget(Paragraph::new("No solutions published yet.").block(block), area);
        return;
    }

    let inner_width = block.inner(area).width;
    let items: Vec<ListItem> = solutions
        .iter()
        .map(|solution| solution_card(solution, inner_width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
        .highlight_symbol("▌");

    let mut state = ListState::default();
    state.select(Some(app.album_selected.min(solutions.len() - 1)));
    f.render_stateful_widget(list, area, &mut state);
}
