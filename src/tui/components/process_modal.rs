//! # ProcessModal Component
//!
//! Popup for submitting a news URL to the processing pipeline. The URL and
//! mode come from `ProcessForm` in core; keystrokes are turned into
//! `Action::EditProcessUrl` by the TUI router, so this component only draws.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::process::ProcessForm;
use crate::gateway::ProcessMode;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct ProcessModal<'a> {
    pub form: &'a ProcessForm,
    pub spinner_frame: usize,
}

impl ProcessModal<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Process news URL ")
            .title_bottom(" Enter submit · Tab mode · Esc close ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        use Constraint::{Length, Min};
        let [label_area, input_area, mode_area, status_area, _rest] =
            Layout::vertical([Length(1), Length(3), Length(1), Length(1), Min(0)]).areas(inner);

        frame.render_widget(Line::from("URL"), label_area);

        let input_block = Block::bordered();
        let field = input_block.inner(input_area);
        frame.render_widget(
            Paragraph::new(self.form.url.as_str()).block(input_block),
            input_area,
        );
        if !self.form.submitting {
            let x = field.x + self.form.url.width() as u16;
            if x < field.right() {
                frame.set_cursor_position(Position::new(x, field.y));
            }
        }

        frame.render_widget(self.mode_line(), mode_area);

        if self.form.submitting {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            frame.render_widget(
                Line::from(Span::styled(
                    format!("{spinner} Processing..."),
                    Style::default().fg(Color::Yellow),
                )),
                status_area,
            );
        }
    }

    fn mode_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw("Mode: ")];
        for mode in ProcessMode::ALL {
            let style = if mode == self.form.mode {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {} ", mode.label()), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}
