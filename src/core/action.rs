//! # Actions
//!
//! Everything that can happen in Newsflash becomes an `Action`.
//! User picks a category? That's `Action::SelectCategory(name)`.
//! The service answers? That's `Action::ArticlesLoaded { token, result }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state through each owner's own operations, and returns the `Effect`
//! the runner should perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Cross-module reactions live only here: a category selection reloads the
//! list, a processed URL closes its modal and refreshes the list, and so on.

use std::time::Duration;

use log::{debug, info, warn};

use crate::ViewMode;
use crate::core::articles::{LoadOutcome, LoadRequest};
use crate::core::fallback::{fallback_articles, fallback_categories};
use crate::core::process::{ValidationError, validate_url};
use crate::core::state::{App, Connection};
use crate::core::surface::{Modal, Severity};
use crate::gateway::{Article, CategoryNode, GatewayError, ProcessMode, ProcessResult};

pub(crate) const CONNECTED_NOTICE: Duration = Duration::from_millis(2000);
pub(crate) const OFFLINE_NOTICE: Duration = Duration::from_millis(5000);

#[derive(Debug)]
pub enum Action {
    // User intents
    SelectCategory(String),
    Search(String),
    /// Search for the hot topic at this index.
    PickHotTopic(usize),
    GoToPage(u32),
    NextPage,
    PrevPage,
    SetViewMode(ViewMode),
    ToggleViewMode,
    /// `manual` is false for the periodic background refresh.
    Refresh { manual: bool },
    ReloadCategories,
    OpenArticle(String),
    OpenProcessModal,
    EditProcessUrl(String),
    CycleProcessMode,
    SubmitProcessUrl,
    CloseModal(Modal),
    DismissModals,
    Quit,

    // Results from the gateway
    /// Verdict of the startup health probe.
    ServiceProbed { reachable: bool },
    ArticlesLoaded {
        token: u64,
        result: Result<Vec<Article>, GatewayError>,
    },
    CategoriesLoaded(Result<Vec<CategoryNode>, GatewayError>),
    ArticleLoaded {
        token: u64,
        result: Result<Article, GatewayError>,
    },
    ProcessFinished(Result<ProcessResult, GatewayError>),
}

/// Side effect requested by `update`, carried out by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    LoadArticles(LoadRequest),
    LoadCategories,
    /// Category tree and first page together, after a healthy probe.
    LoadInitial(LoadRequest),
    LoadArticle { token: u64, id: String },
    ProcessUrl { url: String, mode: ProcessMode },
}

impl From<LoadRequest> for Effect {
    fn from(request: LoadRequest) -> Self {
        Effect::LoadArticles(request)
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectCategory(key) => {
            app.categories.select(&key);
            app.articles.set_category(&key).into()
        }
        Action::Search(term) => app.articles.set_search(&term).into(),
        Action::PickHotTopic(index) => {
            let Some(topic) = app.hot_topics.get(index).cloned() else {
                return Effect::None;
            };
            app.notify(format!("Searching for \"{topic}\""), Severity::Info);
            app.articles.set_search(&topic).into()
        }
        Action::GoToPage(page) => app.articles.set_page(page).into(),
        Action::NextPage => app.articles.next_page().map_or(Effect::None, Effect::from),
        Action::PrevPage => app.articles.prev_page().map_or(Effect::None, Effect::from),
        Action::SetViewMode(mode) => {
            app.articles.set_view_mode(mode);
            Effect::None
        }
        Action::ToggleViewMode => {
            let mode = app.articles.view_mode().toggle();
            app.articles.set_view_mode(mode);
            Effect::None
        }
        Action::Refresh { manual } => {
            let request = app.articles.refresh();
            if manual {
                app.notify("News refreshed", Severity::Success);
            } else {
                debug!("Background refresh (token={})", request.token);
            }
            request.into()
        }
        Action::ReloadCategories => Effect::LoadCategories,
        Action::OpenArticle(id) => {
            app.detail_token += 1;
            Effect::LoadArticle {
                token: app.detail_token,
                id,
            }
        }
        Action::OpenProcessModal => {
            app.surface.show_modal(Modal::ProcessUrl);
            Effect::None
        }
        Action::EditProcessUrl(url) => {
            app.process_form.url = url;
            Effect::None
        }
        Action::CycleProcessMode => {
            app.process_form.mode = app.process_form.mode.next();
            Effect::None
        }
        Action::SubmitProcessUrl => submit_process_url(app),
        Action::CloseModal(modal) => {
            app.surface.hide_modal(modal);
            Effect::None
        }
        Action::DismissModals => {
            app.surface.hide_all_modals();
            Effect::None
        }
        Action::Quit => Effect::Quit,

        Action::ServiceProbed { reachable } => service_probed(app, reachable),
        Action::ArticlesLoaded { token, result } => {
            match app.articles.apply(token, result) {
                LoadOutcome::Applied(count) => {
                    info!("Showing {} articles (token={})", count, token);
                }
                LoadOutcome::Failed(e) => {
                    warn!("Failed to load news: {}", e);
                    app.notify("Failed to load news, please try again later", Severity::Error);
                }
                LoadOutcome::Stale => {
                    debug!("Dropped stale article list (token={})", token);
                }
            }
            Effect::None
        }
        Action::CategoriesLoaded(result) => {
            match result {
                Ok(tree) => {
                    info!("Loaded {} root categories", tree.len());
                    app.categories.load(tree);
                }
                Err(e) => {
                    warn!("Failed to load categories: {}", e);
                    app.notify("Failed to load categories", Severity::Error);
                }
            }
            Effect::None
        }
        Action::ArticleLoaded { token, result } => {
            if token != app.detail_token {
                debug!("Dropped stale article detail (token={})", token);
                return Effect::None;
            }
            match result {
                Ok(article) => {
                    app.detail = Some(article);
                    app.surface.show_modal(Modal::ArticleDetail);
                }
                Err(e) => {
                    warn!("Failed to load article detail: {}", e);
                    app.notify("Failed to load article details", Severity::Error);
                }
            }
            Effect::None
        }
        Action::ProcessFinished(result) => {
            app.process_form.submitting = false;
            match result {
                Ok(outcome) => {
                    info!(
                        "URL processed: success={}, saved={}",
                        outcome.success, outcome.saved
                    );
                    app.notify("News processed successfully!", Severity::Success);
                    app.surface.hide_modal(Modal::ProcessUrl);
                    app.process_form.clear();
                    app.articles.refresh().into()
                }
                Err(e) => {
                    warn!("Failed to process URL: {}", e);
                    app.notify(
                        "Failed to process news, check that the URL is correct",
                        Severity::Error,
                    );
                    Effect::None
                }
            }
        }
    }
}

fn service_probed(app: &mut App, reachable: bool) -> Effect {
    if !reachable {
        warn!("News service unreachable, running on fallback data");
        app.connection = Connection::Degraded;
        app.articles.install_fallback(fallback_articles());
        app.categories.load(fallback_categories());
        app.notify_for(
            "API connection failed, some features may be unavailable",
            Severity::Warning,
            OFFLINE_NOTICE,
        );
        return Effect::None;
    }

    info!("News service online");
    app.connection = Connection::Online;
    app.notify_for("API connected", Severity::Success, CONNECTED_NOTICE);
    Effect::LoadInitial(app.articles.refresh())
}

fn submit_process_url(app: &mut App) -> Effect {
    if app.process_form.submitting {
        debug!("Ignoring submit while a URL is already being processed");
        return Effect::None;
    }
    match validate_url(&app.process_form.url) {
        Ok(url) => {
            app.process_form.submitting = true;
            Effect::ProcessUrl {
                url,
                mode: app.process_form.mode,
            }
        }
        Err(e) => {
            let severity = match e {
                ValidationError::EmptyUrl => Severity::Warning,
                ValidationError::InvalidUrl(_) => Severity::Error,
            };
            app.notify(e.to_string(), severity);
            Effect::None
        }
    }
}
