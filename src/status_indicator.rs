use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// One-line status under the transcript: a spinner while replies are
/// outstanding, otherwise the last status text.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    waiting_for: usize,
    status_text: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_waiting(&mut self, pending: usize) {
        self.waiting_for = pending;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
    }

    pub fn clear_status(&mut self) {
        self.status_text.clear();
    }

    pub fn tick(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn text(&self) -> String {
        match self.waiting_for {
            0 => self.status_text.clone(),
            1 => "Waiting for a reply...".to_string(),
            n => format!("Waiting for {} replies...", n),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let waiting = self.waiting_for > 0;
        let spinner = if waiting {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            " "
        };
        let color = if waiting { Color::DarkGray } else { Color::Yellow };

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(self.text(), Style::default().fg(color)),
        ]);

        frame.render_widget(Paragraph::new(status).alignment(Alignment::Left), area);
    }
}
