use crate::{logging::format_api_call, models::ApiCallLog};
use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const MAX_ENTRIES: usize = 200;

/// Diagnostic side panel on the chat screen.
#[derive(Debug, Default)]
pub struct LogView {
    pub entries: Vec<String>,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: impl Into<String>) {
        let stamped = format!("{} {}", Local::now().format("%H:%M:%S"), entry.into());
        self.push(stamped);
    }

    pub fn add_api_call(&mut self, call: &ApiCallLog) {
        self.push(format_api_call(call));
    }

    fn push(&mut self, line: String) {
        self.entries.push(line);
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }
    }

    /// Keeps the newest lines in view.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .entries
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.as_str()),
                ])
            })
            .collect();

        let total = lines.len() as u16;
        let scroll = total.saturating_sub(area.height);

        let para = Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0));
        f.render_widget(para, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_entries() {
        let mut logs = LogView::new();
        for i in 0..(MAX_ENTRIES + 5) {
            logs.add(format!("entry {}", i));
        }
        assert_eq!(logs.entries.len(), MAX_ENTRIES);
        assert!(logs.entries[0].ends_with("entry 5"));
    }
}
