//! # DetailModal Component
//!
//! Full article view shown over the main layout. Content longer than the
//! popup scrolls through `tui_scrollview`; the paragraph's wrapped height
//! comes from `Paragraph::line_count` so the scroll view is sized exactly.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::gateway::Article;

pub struct DetailModal<'a> {
    pub article: &'a Article,
    /// Root-to-leaf category names, when the category is in the tree
    pub ancestry: Option<Vec<String>>,
}

impl DetailModal<'_> {
    fn paragraph(&self) -> Paragraph<'_> {
        let article = self.article;
        let dim = Style::default().fg(Color::DarkGray);

        let mut lines = vec![
            Line::from(Span::styled(
                article.display_title(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        let mut meta = Vec::new();
        if let Some(author) = &article.author {
            meta.push(format!("By {author}"));
        }
        if let Some(published) = &article.publish_time {
            meta.push(published.clone());
        }
        meta.push(article.source.clone());
        lines.push(Line::from(Span::styled(meta.join(" · "), dim)));

        let category = match (&self.ancestry, &article.category) {
            (Some(path), _) => Some(path.join(" › ")),
            (None, Some(name)) => Some(name.clone()),
            (None, None) => None,
        };
        if let Some(category) = category {
            lines.push(Line::from(vec![
                Span::styled("Category: ", dim),
                Span::styled(category, Style::default().fg(Color::Green)),
            ]));
        }
        lines.push(Line::default());

        lines.extend(article.content.lines().map(Line::from));
        lines.push(Line::default());

        if !article.tags.is_empty() {
            let tags = article
                .tags
                .iter()
                .map(|tag| format!("#{tag}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(Span::styled(tags, Style::default().fg(Color::Magenta))));
        }
        lines.push(Line::from(Span::styled(
            article.url.as_str(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        )));

        Paragraph::new(lines).wrap(Wrap { trim: false })
    }

    /// Wrapped content height at `width` columns.
    pub fn content_height(&self, width: u16) -> u16 {
        self.paragraph().line_count(width) as u16
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, scroll: &mut ScrollViewState) {
        let block = Block::bordered()
            .title(" Article ")
            .title_bottom(" ↑/↓ scroll · Esc close ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        // Leave one column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let height = self.content_height(content_width);

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(self.paragraph(), Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, inner, scroll);
    }
}
