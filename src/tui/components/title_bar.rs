//! # TitleBar Component
//!
//! Top status line: app name, the current section, view mode and page,
//! plus a spinner while a list load is in flight. The tail shows
//! "connecting..." during the startup probe and OFFLINE when the app
//! started without the news service.
//!
//! Stateless: every field is a prop filled in by `ui::draw_ui`.

use crate::ViewMode;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar {
    pub section_title: String,
    pub view_mode: ViewMode,
    pub page: u32,
    /// Active search term, empty for none
    pub search: String,
    pub loading: bool,
    pub connecting: bool,
    pub degraded: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    fn spans(&self) -> Vec<Span<'_>> {
        let mut spans = vec![
            Span::styled("Newsflash", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" | {}", self.section_title)),
        ];
        if !self.search.is_empty() {
            spans.push(Span::raw(format!(" | search: \"{}\"", self.search)));
        }
        spans.push(Span::raw(format!(
            " | page {} | {}",
            self.page,
            self.view_mode.label()
        )));
        if self.loading {
            spans.push(Span::styled(
                format!(" {}", SPINNER[self.spinner_frame % SPINNER.len()]),
                Style::default().fg(Color::Cyan),
            ));
        }
        if self.connecting {
            spans.push(Span::styled(
                " | connecting...",
                Style::default().fg(Color::Yellow),
            ));
        }
        if self.degraded {
            spans.push(Span::styled(
                " | OFFLINE",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        spans
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Line::from(self.spans()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn title_bar() -> TitleBar {
        TitleBar {
            section_title: "Latest News".to_string(),
            view_mode: ViewMode::Grid,
            page: 1,
            search: String::new(),
            loading: false,
            connecting: false,
            degraded: false,
            spinner_frame: 0,
        }
    }

    fn rendered(mut bar: TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area)
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_default_title() {
        let text = rendered(title_bar());
        assert!(text.starts_with("Newsflash | Latest News | page 1 | grid"));
        assert!(!text.contains("OFFLINE"));
    }

    #[test]
    fn test_offline_and_search_markers() {
        let text = rendered(TitleBar {
            search: "rust".to_string(),
            degraded: true,
            ..title_bar()
        });
        assert!(text.contains("search: \"rust\""));
        assert!(text.contains("OFFLINE"));
    }

    #[test]
    fn test_connecting_marker() {
        let text = rendered(TitleBar {
            connecting: true,
            ..title_bar()
        });
        assert!(text.contains("connecting..."));
        assert!(!rendered(title_bar()).contains("connecting"));
    }

    #[test]
    fn test_spinner_only_while_loading() {
        let idle = rendered(title_bar());
        let busy = rendered(TitleBar {
            loading: true,
            ..title_bar()
        });
        assert!(!idle.contains('⠋'));
        assert!(busy.contains('⠋'));
    }
}
