//! Transient notification drawn in the top-right corner.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::surface::{Notification, Severity};
use crate::tui::component::Component;

const MAX_WIDTH: u16 = 50;

pub struct Toast<'a> {
    pub notification: &'a Notification,
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Blue,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

impl Toast<'_> {
    /// Area in the top-right corner of `frame_area`, sized to the message.
    pub fn area(&self, frame_area: Rect) -> Rect {
        let text_width = self.notification.message.width() as u16;
        let width = (text_width + 4).min(MAX_WIDTH).min(frame_area.width);
        let inner_width = width.saturating_sub(2).max(1);
        let lines = text_width.div_ceil(inner_width).max(1);
        let height = (lines + 2).min(frame_area.height);
        Rect {
            x: frame_area.right().saturating_sub(width + 1),
            y: frame_area.y + 1,
            width,
            height,
        }
    }
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let color = severity_color(self.notification.severity);
        let paragraph = Paragraph::new(self.notification.message.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(self.notification.severity.label())
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}
