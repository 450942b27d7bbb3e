//! # ArticlePane Component
//!
//! Renders the current page of articles in either layout:
//!
//! - **Grid**: bordered cards, two per row on wide terminals. Each card
//!   shows the title, category, a wrapped excerpt, source and publish time.
//! - **List**: one line per article, title first.
//!
//! Selection and scroll position live in `ArticlePaneState`, which the
//! TUI keeps across frames. The pane itself is rebuilt every draw.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ViewMode;
use crate::gateway::Article;

const CARD_HEIGHT: u16 = 7;
const EXCERPT_LINES: usize = 2;
/// Below this width the grid collapses to a single column.
const TWO_COLUMN_MIN_WIDTH: u16 = 80;

#[derive(Debug, Default)]
pub struct ArticlePaneState {
    pub selected: usize,
    /// First visible card row in grid mode
    grid_offset: usize,
    list_state: ListState,
}

impl ArticlePaneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the selection inside `0..len`.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.grid_offset = 0;
        *self.list_state.offset_mut() = 0;
    }
}

pub struct ArticlePane<'a> {
    pub articles: &'a [Article],
    pub view_mode: ViewMode,
    pub title: String,
    pub focused: bool,
    pub loading: bool,
    pub now: NaiveDateTime,
}

impl ArticlePane<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut ArticlePaneState) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.articles.is_empty() {
            let text = if self.loading {
                "Loading news..."
            } else {
                "No news yet"
            };
            let empty = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, inner);
            return;
        }

        state.clamp(self.articles.len());
        match self.view_mode {
            ViewMode::Grid => self.render_grid(frame, inner, state),
            ViewMode::List => self.render_list(frame, inner, state),
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, state: &mut ArticlePaneState) {
        let columns = if area.width >= TWO_COLUMN_MIN_WIDTH { 2 } else { 1 };
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;

        let selected_row = state.selected / columns;
        if selected_row < state.grid_offset {
            state.grid_offset = selected_row;
        } else if selected_row >= state.grid_offset + visible_rows {
            state.grid_offset = selected_row + 1 - visible_rows;
        }

        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);
        let column_constraints = vec![Constraint::Ratio(1, columns as u32); columns];

        for (row, row_area) in row_areas.iter().enumerate() {
            let cells = Layout::horizontal(column_constraints.clone()).split(*row_area);
            for (col, cell) in cells.iter().enumerate() {
                let index = (state.grid_offset + row) * columns + col;
                let Some(article) = self.articles.get(index) else {
                    return;
                };
                self.render_card(frame, *cell, article, index == state.selected);
            }
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, article: &Article, selected: bool) {
        let border_style = if selected && self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered().border_style(border_style);
        let width = block.inner(area).width as usize;

        let mut lines = vec![Line::from(Span::styled(
            truncate(article.display_title(), width),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        lines.push(Line::from(Span::styled(
            truncate(&self.meta_line(article), width),
            Style::default().fg(Color::DarkGray),
        )));
        lines.extend(
            excerpt(&article.content, width)
                .into_iter()
                .map(Line::from),
        );
        if !article.tags.is_empty() {
            let tags = article
                .tags
                .iter()
                .map(|tag| format!("#{tag}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(Span::styled(
                truncate(&tags, width),
                Style::default().fg(Color::Magenta),
            )));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, state: &mut ArticlePaneState) {
        let items: Vec<ListItem> = self
            .articles
            .iter()
            .map(|article| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        article.display_title().to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(self.meta_line(article), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let highlight = if self.focused {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let list = List::new(items).highlight_style(highlight).highlight_symbol("> ");
        state.list_state.select(Some(state.selected));
        frame.render_stateful_widget(list, area, &mut state.list_state);
    }

    fn meta_line(&self, article: &Article) -> String {
        let mut parts = Vec::new();
        if let Some(category) = &article.category {
            parts.push(category.clone());
        }
        parts.push(article.source.clone());
        if let Some(published) = &article.publish_time {
            parts.push(format_publish_time(published, self.now));
        }
        parts.join(" · ")
    }
}

/// Formats a timestamp relative to `now`: "just now", minutes, hours, or
/// the calendar date once it is a day old. Unparseable input is shown as-is.
pub fn format_publish_time(raw: &str, now: NaiveDateTime) -> String {
    let Some(published) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    let elapsed = now.signed_duration_since(published);
    if elapsed < TimeDelta::minutes(1) {
        "just now".to_string()
    } else if elapsed < TimeDelta::hours(1) {
        format!("{} min ago", elapsed.num_minutes())
    } else if elapsed < TimeDelta::days(1) {
        format!("{} h ago", elapsed.num_hours())
    } else {
        published.format("%Y-%m-%d").to_string()
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// First lines of `content` wrapped to `width`, with an ellipsis if cut.
fn excerpt(content: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let wrapped = textwrap::wrap(content.trim(), width);
    let cut = wrapped.len() > EXCERPT_LINES;
    let mut lines: Vec<String> = wrapped
        .into_iter()
        .take(EXCERPT_LINES)
        .map(|line| line.into_owned())
        .collect();
    if cut && let Some(last) = lines.last_mut() {
        *last = truncate(&format!("{last}…"), width);
    }
    lines
}

/// Cuts `text` to at most `width` display columns.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
