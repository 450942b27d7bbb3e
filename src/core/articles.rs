//! # Article List State
//!
//! Owns the current page of articles and every dimension of the list query.
//!
//! Each setter that changes what should be on screen hands back a
//! [`LoadRequest`] stamped with a fresh token. Only the result for the most
//! recently issued token is applied; anything older is dropped on arrival.
//!
//! ```text
//!            set_* / refresh()             apply(latest, Ok)
//!   Idle ───────────────────────► Loading ───────────────────► Loaded
//!                                    │
//!                                    └───────────────────────► Errored
//!                                         apply(latest, Err)
//! ```
//!
//! `Idle` only exists before the first request. After that `Loaded` and
//! `Errored` are the resting states; the next `set_*` or `refresh()` goes
//! straight from either one back to `Loading`.
//!
//! A newer request issued while `Loading` supersedes the older one. There
//! is no network cancellation, the stale response is simply ignored.

use crate::ViewMode;
use crate::gateway::{Article, ArticleQuery, CategoryFilter, DEFAULT_PAGE_SIZE, GatewayError};

/// Full list query, including presentation-only view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub category: CategoryFilter,
    pub search: String,
    pub page: u32,
    pub page_size: u32,
    pub view_mode: ViewMode,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            view_mode: ViewMode::default(),
        }
    }
}

impl ListQuery {
    /// The part of the query the server sees.
    pub fn to_request(&self) -> ArticleQuery {
        ArticleQuery {
            category: self.category.clone(),
            page: self.page,
            page_size: self.page_size,
            search: self.search.clone(),
        }
    }
}

/// A fetch the caller should run, tagged with its issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: u64,
    pub query: ArticleQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// What `apply` did with a result.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Latest request succeeded; articles replaced.
    Applied(usize),
    /// Latest request failed; previous articles kept.
    Failed(GatewayError),
    /// A newer request was issued after this one; result dropped.
    Stale,
}

#[derive(Debug)]
pub struct ArticleList {
    articles: Vec<Article>,
    query: ListQuery,
    phase: LoadPhase,
    /// Token of the most recently issued request.
    latest_token: u64,
    last_error: Option<GatewayError>,
}

impl ArticleList {
    pub fn new(page_size: u32, view_mode: ViewMode) -> Self {
        Self {
            articles: Vec::new(),
            query: ListQuery {
                page_size: page_size.max(1),
                view_mode,
                ..ListQuery::default()
            },
            phase: LoadPhase::Idle,
            latest_token: 0,
            last_error: None,
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn last_error(&self) -> Option<&GatewayError> {
        self.last_error.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.query.view_mode
    }

    /// A full page suggests there may be another one.
    pub fn has_next_page(&self) -> bool {
        self.articles.len() as u32 >= self.query.page_size
    }

    pub fn set_category(&mut self, key: &str) -> LoadRequest {
        self.query.category = CategoryFilter::from_key(key);
        self.query.page = 1;
        self.begin_load()
    }

    pub fn set_search(&mut self, term: &str) -> LoadRequest {
        self.query.search = term.trim().to_string();
        self.query.page = 1;
        self.begin_load()
    }

    /// Jumps to page `n`, keeping filters. Page numbers start at 1.
    pub fn set_page(&mut self, n: u32) -> LoadRequest {
        self.query.page = n.max(1);
        self.begin_load()
    }

    pub fn next_page(&mut self) -> Option<LoadRequest> {
        self.has_next_page()
            .then(|| self.set_page(self.query.page + 1))
    }

    pub fn prev_page(&mut self) -> Option<LoadRequest> {
        (self.query.page > 1).then(|| self.set_page(self.query.page - 1))
    }

    /// Layout only; never triggers a fetch.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.query.view_mode = mode;
    }

    /// Re-issues the current query verbatim.
    pub fn refresh(&mut self) -> LoadRequest {
        self.begin_load()
    }

    fn begin_load(&mut self) -> LoadRequest {
        self.latest_token += 1;
        self.phase = LoadPhase::Loading;
        LoadRequest {
            token: self.latest_token,
            query: self.query.to_request(),
        }
    }

    /// Applies a fetch result if it belongs to the latest request.
    pub fn apply(
        &mut self,
        token: u64,
        result: Result<Vec<Article>, GatewayError>,
    ) -> LoadOutcome {
        if token != self.latest_token {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(articles) => {
                let count = articles.len();
                self.articles = articles;
                self.phase = LoadPhase::Loaded;
                self.last_error = None;
                LoadOutcome::Applied(count)
            }
            Err(error) => {
                self.phase = LoadPhase::Errored;
                self.last_error = Some(error.clone());
                LoadOutcome::Failed(error)
            }
        }
    }

    /// Installs local data and invalidates anything still in flight.
    pub fn install_fallback(&mut self, articles: Vec<Article>) {
        self.latest_token += 1;
        self.articles = articles;
        self.phase = LoadPhase::Loaded;
        self.last_error = None;
    }
}
