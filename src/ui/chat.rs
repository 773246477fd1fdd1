use crate::{
    app::App,
    models::{Message, Sender},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

const INPUT_PREFIX: &str = "→ ";

/// One transcript entry laid out for the list widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRow {
    pub sender: Sender,
    pub alignment: Alignment,
    pub lines: Vec<String>,
}

/// User messages hug the right edge, bot messages the left, like a chat app.
pub fn transcript_rows(messages: &[Message], width: u16) -> Vec<TranscriptRow> {
    let wrap_width = ((width as usize) * 3 / 4).max(10);
    messages
        .iter()
        .map(|message| {
            let alignment = match message.sender {
                Sender::User => Alignment::Right,
                Sender::Bot => Alignment::Left,
            };
            let lines = wrap(&message.text, wrap_width)
                .into_iter()
                .map(|line| line.into_owned())
                .collect();
            TranscriptRow {
                sender: message.sender,
                alignment,
                lines,
            }
        })
        .collect()
}

impl TranscriptRow {
    pub fn to_list_item(&self) -> ListItem<'static> {
        let text_style = match self.sender {
            Sender::User => Style::default().fg(Color::Rgb(255, 223, 128)),
            Sender::Bot => Style::default().fg(Color::Rgb(144, 238, 144)),
        };

        let mut lines: Vec<Line<'static>> = self
            .lines
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), text_style)).alignment(self.alignment))
            .collect();
        lines.push(
            Line::from(Span::styled(
                self.sender.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(self.alignment),
        );
        lines.push(Line::from(""));

        ListItem::new(Text::from(lines))
    }
}

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, app: &App) {
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(area);

    let chat_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    let transcript_block = Block::default()
        .borders(Borders::ALL)
        .title(" Chat ")
        .border_style(Style::default().fg(Color::DarkGray));
    let transcript_area = transcript_block.inner(chat_chunks[0]);
    f.render_widget(transcript_block, chat_chunks[0]);
    draw_transcript(f, transcript_area, app);

    app.status_indicator.render(f, chat_chunks[1]);
    draw_input(f, chat_chunks[2], app);

    let log_block = Block::default()
        .borders(Borders::LEFT)
        .title(" Log ")
        .border_style(Style::default().fg(Color::DarkGray));
    let log_area = log_block.inner(horizontal_chunks[1]);
    f.render_widget(log_block, horizontal_chunks[1]);
    app.logs.render(f, log_area);
}

/// Renders one list entry per message, scrolled so the newest (minus
/// `app.chat_scroll`) is visible.
pub fn draw_transcript(f: &mut Frame<'_>, area: Rect, app: &App) {
    let messages = app.chat.transcript();
    let items: Vec<ListItem> = transcript_rows(messages, area.width)
        .iter()
        .map(TranscriptRow::to_list_item)
        .collect();

    let mut state = ListState::default();
    if !messages.is_empty() {
        let newest = messages.len() - 1;
        state.select(Some(newest.saturating_sub(app.chat_scroll)));
    }

    f.render_stateful_widget(List::new(items), area, &mut state);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let input = app.chat.input();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Message ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let used = (INPUT_PREFIX.width() + input.width()) as u16;
    let scroll_offset = used.saturating_sub(inner.width.saturating_sub(1));

    let line = Line::from(vec![
        Span::styled(INPUT_PREFIX, Style::default().fg(Color::DarkGray)),
        Span::styled(input, Style::default().fg(Color::White)),
    ]);
    f.render_widget(
        Paragraph::new(line).block(block).scroll((0, scroll_offset)),
        area,
    );

    let cursor_x = inner.x + used - scroll_offset;
    f.set_cursor_position((cursor_x, inner.y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn rows_follow_transcript_order_and_sender_alignment() {
        let messages: Vec<Message> = (0..6)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("question {}", i))
                } else {
                    Message::bot(format!("answer {}", i))
                }
            })
            .collect();

        let rows = transcript_rows(&messages, 60);

        assert_eq!(rows.len(), messages.len());
        for (row, message) in rows.iter().zip(&messages) {
            assert_eq!(row.sender, message.sender);
            assert_eq!(row.lines.join(" "), message.text);
            let expected = match message.sender {
                Sender::User => Alignment::Right,
                Sender::Bot => Alignment::Left,
            };
            assert_eq!(row.alignment, expected);
        }
    }

    #[test]
    fn long_messages_wrap() {
        let text = "word ".repeat(30);
        let rows = transcript_rows(&[Message::bot(text.trim())], 40);
        assert!(rows[0].lines.len() > 1);
        assert!(rows[0].lines.iter().all(|l| l.width() <= 30));
    }

    #[test]
    fn user_text_renders_on_the_right_and_bot_text_on_the_left() {
        let mut app = App::new();
        app.chat.set_input("hi there");
        app.chat.begin_send().unwrap();
        app.on_reply(crate::chat::Delivery::answered(Message::bot("hello")));

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_transcript(f, area, &app);
            })
            .unwrap();
        let rows = screen_rows(&terminal);

        let user_row = rows.iter().position(|r| r.contains("hi there")).unwrap();
        let bot_row = rows.iter().position(|r| r.contains("hello")).unwrap();
        assert!(user_row < bot_row);
        assert!(rows[user_row].ends_with("hi there"));
        assert!(rows[bot_row].starts_with("hello"));
        assert!(rows[user_row + 1].ends_with("user"));
        assert!(rows[bot_row + 1].starts_with("bot"));
    }
}
