//! # CategoryPane Component
//!
//! Sidebar listing the category tree in pre-order, indented by depth.
//! Row 0 is always the synthetic "All" entry; tree rows follow.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};

use crate::core::category::CategoryRow;
use crate::gateway::{ALL_CATEGORIES, CategoryFilter};

#[derive(Debug, Default)]
pub struct CategoryPaneState {
    pub selected: usize,
    list_state: ListState,
}

impl CategoryPaneState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// `len` counts the "All" row.
    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Selection key for a sidebar row: "all" for row 0, the category name otherwise.
pub fn key_at(rows: &[CategoryRow<'_>], index: usize) -> Option<String> {
    match index {
        0 => Some(ALL_CATEGORIES.to_string()),
        i => rows.get(i - 1).map(|row| row.node.name.clone()),
    }
}

pub struct CategoryPane<'a> {
    pub rows: &'a [CategoryRow<'a>],
    pub active: &'a CategoryFilter,
    pub focused: bool,
}

impl CategoryPane<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut CategoryPaneState) {
        let active_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        let mut items = Vec::with_capacity(self.rows.len() + 1);
        let all_style = if *self.active == CategoryFilter::All {
            active_style
        } else {
            Style::default()
        };
        items.push(ListItem::new(Line::from(Span::styled("All news", all_style))));

        for row in self.rows {
            let node = row.node;
            let icon = if node.children.is_empty() { "·" } else { "▸" };
            let mut label = format!("{}{} {}", "  ".repeat(row.depth), icon, node.name);
            if !node.children.is_empty() {
                label.push_str(&format!(" ({})", node.children.len()));
            }
            let style = match self.active {
                CategoryFilter::Named(name) if *name == node.name => active_style,
                _ => Style::default(),
            };
            items.push(ListItem::new(Line::from(Span::styled(label, style))));
        }

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let highlight = if self.focused {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(
                Block::bordered()
                    .title(" Categories ")
                    .border_style(border_style),
            )
            .highlight_style(highlight);

        state.clamp(self.rows.len() + 1);
        state.list_state.select(Some(state.selected));
        frame.render_stateful_widget(list, area, &mut state.list_state);
    }
}
