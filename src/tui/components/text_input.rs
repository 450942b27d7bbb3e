//! # TextInput Component
//!
//! Single-line text field used for the search bar.
//!
//! The buffer and cursor are internal state; the parent decides what a
//! submitted value means. The cursor is a char index, and its on-screen
//! column is computed with display widths so wide glyphs line up.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    Submit(String),
    Cancel,
    Changed,
}

#[derive(Debug, Default)]
pub struct TextInput {
    buffer: String,
    /// Cursor position in chars
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.buffer = value.to_string();
        self.cursor = self.buffer.chars().count();
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn insert_str(&mut self, text: &str) {
        let at = self.byte_index();
        self.buffer.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Display column of the cursor relative to the start of the text.
    pub fn cursor_column(&self) -> u16 {
        let prefix = &self.buffer[..self.byte_index()];
        prefix.width() as u16
    }

    /// Renders `prompt` followed by the buffer, placing the terminal cursor.
    pub fn render(&self, frame: &mut Frame, area: Rect, prompt: &str) {
        let line = Line::from(vec![Span::raw(prompt), Span::raw(self.buffer.as_str())]);
        frame.render_widget(Paragraph::new(line), area);

        let x = area.x + prompt.width() as u16 + self.cursor_column();
        if x < area.right() {
            frame.set_cursor_position(Position::new(x, area.y));
        }
    }
}

impl EventHandler for TextInput {
    type Event = TextInputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TextInputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(TextInputEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines become spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flat);
                Some(TextInputEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                self.cursor -= 1;
                let at = self.byte_index();
                self.buffer.remove(at);
                Some(TextInputEvent::Changed)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
                None
            }
            TuiEvent::Submit => Some(TextInputEvent::Submit(self.buffer.trim().to_string())),
            TuiEvent::Escape => Some(TextInputEvent::Cancel),
            _ => None,
        }
    }
}
