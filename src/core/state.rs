//! # Application State
//!
//! Core business state for Newsflash. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── articles: ArticleList         // page of articles + list query
//! ├── categories: CategoryState     // category tree + selection
//! ├── surface: Surface              // toast + modals + scroll lock
//! ├── detail: Option<Article>       // article shown in the detail modal
//! ├── process_form: ProcessForm     // URL processing modal input
//! ├── hot_topics: Vec<String>       // one-key searches
//! ├── connection: Connection        // online / degraded
//! └── notification_duration         // default toast lifetime
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Each owner is mutated through its own methods, never by poking fields.

use std::time::{Duration, Instant};

use crate::core::articles::ArticleList;
use crate::core::category::CategoryState;
use crate::core::config::ResolvedConfig;
use crate::core::process::ProcessForm;
use crate::core::surface::{DEFAULT_NOTIFICATION_DURATION, Severity, Surface};
use crate::gateway::{Article, DEFAULT_PAGE_SIZE};
use crate::ViewMode;

/// Whether remote data can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    /// Startup has not finished probing yet.
    Unknown,
    Online,
    /// Service unreachable at startup; showing fallback data.
    Degraded,
}

pub struct App {
    pub articles: ArticleList,
    pub categories: CategoryState,
    pub surface: Surface,
    pub detail: Option<Article>,
    pub process_form: ProcessForm,
    pub hot_topics: Vec<String>,
    pub connection: Connection,
    pub notification_duration: Duration,
    /// Token of the latest detail fetch; older replies are dropped.
    pub(crate) detail_token: u64,
}

impl App {
    pub fn new(page_size: u32, view_mode: ViewMode) -> Self {
        Self {
            articles: ArticleList::new(page_size, view_mode),
            categories: CategoryState::new(),
            surface: Surface::new(),
            detail: None,
            process_form: ProcessForm::default(),
            hot_topics: Vec::new(),
            connection: Connection::Unknown,
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
            detail_token: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.page_size, config.view_mode);
        app.hot_topics = config.hot_topics.clone();
        app.notification_duration = config.notification_duration;
        app
    }

    /// Raises a toast with the configured default lifetime.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let duration = self.notification_duration;
        self.notify_for(message, severity, duration);
    }

    pub fn notify_for(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        self.surface
            .notify(message, severity, duration, Instant::now());
    }

    /// Heading for the article pane.
    pub fn section_title(&self) -> String {
        match self.articles.query().category.as_key() {
            crate::gateway::ALL_CATEGORIES => "Latest News".to_string(),
            name => format!("{name} News"),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.connection == Connection::Degraded
    }

    /// Startup probe still running.
    pub fn is_connecting(&self) -> bool {
        self.connection == Connection::Unknown
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, ViewMode::default())
    }
}
