use crate::{
    app::{App, PageData},
    models::Analytics,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub fn draw_analytics(f: &mut Frame<'_>, area: Rect, app: &App) {
    let analytics = match &app.analytics {
        PageData::Loading => {
            f.render_widget(Paragraph::new("Loading..."), area);
            return;
        }
        PageData::Failed(message) => {
            f.render_widget(
                Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red)),
                area,
            );
            return;
        }
        PageData::Ready(analytics) => analytics,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Min(3),
            ]
            .as_ref(),
        )
        .split(area);

    f.render_widget(
        Paragraph::new("Task Analytics").style(
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        chunks[0],
    );

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    stat_card(f, cards[0], "Total Tasks", analytics.total_tasks.to_string());
    stat_card(f, cards[1], "Avg. Messages per Task", analytics.avg_display());

    f.render_widget(daily_table(analytics), chunks[2]);
}

fn stat_card(f: &mut Frame<'_>, area: Rect, label: &str, value: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", label))
        .border_style(Style::default().fg(Color::DarkGray));
    let value = Paragraph::new(value)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(value, area);
}

fn daily_table(analytics: &Analytics) -> Table<'static> {
    let rows: Vec<Row> = analytics
        .daily_rows()
        .into_iter()
        .map(|(day, count)| {
            Row::new(vec![
                Cell::from(day.to_string()),
                Cell::from(Line::from(count.to_string()).alignment(Alignment::Right)),
            ])
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from(Line::from("Task Count").alignment(Alignment::Right)),
    ])
    .style(
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
    );

    Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Tasks per Day ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::ANALYTICS_ERROR, errors::PlatformError};
    use ratatui::{backend::TestBackend, Terminal};
    use std::collections::BTreeMap;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 16)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_analytics(f, area, app);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn shows_cards_and_daily_table() {
        let mut app = App::new();
        let mut tasks_per_day = BTreeMap::new();
        tasks_per_day.insert("2024-06-02".to_string(), 7);
        tasks_per_day.insert("2024-06-01".to_string(), 5);
        app.on_analytics_loaded(Ok(Analytics {
            total_tasks: 12,
            avg_messages_per_task: 5.5,
            tasks_per_day,
        }));

        let screen = render(&app);
        assert!(screen.contains("Total Tasks"));
        assert!(screen.contains("12"));
        assert!(screen.contains("5.5"));
        assert!(screen.contains("Task Count"));
        let first = screen.find("2024-06-01").unwrap();
        let second = screen.find("2024-06-02").unwrap();
        assert!(first < second);
    }

    #[test]
    fn shows_loading_then_error() {
        let mut app = App::new();
        assert!(render(&app).contains("Loading..."));

        app.on_analytics_loaded(Err(PlatformError::decode_error("bad body")));
        assert!(render(&app).contains(ANALYTICS_ERROR));
    }
}
