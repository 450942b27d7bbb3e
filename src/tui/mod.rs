//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. All
//! network work happens in the `Coordinator`; this loop only draws, routes
//! keys, drains finished gateway calls and expires toasts.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (startup probe, list load or URL submit in flight):
//!   draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 250ms, only redraws on input, finished gateway
//!   calls or an expired toast. The sleep is cut short to wake exactly when
//!   the visible toast is due to hide.
//!
//! ## Key Routing
//!
//! The top open modal gets every key first. Without a modal, the search
//! field takes keys while it is active; otherwise keys are browse commands.
//! Ctrl+C quits from anywhere.

mod component;
mod components;
mod event;
mod ui;

use log::info;
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tui_scrollview::ScrollViewState;

use crate::coordinator::Coordinator;
use crate::core::action::Action;
use crate::core::state::App;
use crate::core::surface::Modal;
use crate::tui::component::EventHandler;
use crate::tui::components::category_tree::key_at;
use crate::tui::components::{ArticlePaneState, CategoryPaneState, TextInput, TextInputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Which sidebar/main pane receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Articles,
}

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    Browse,
    /// Typing into the search field. Enter submits, Esc cancels.
    Search,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub input_mode: InputMode,
    pub categories: CategoryPaneState,
    pub articles: ArticlePaneState,
    pub search: TextInput,
    pub detail_scroll: ScrollViewState,
    /// Filter, search, page and length the article selection was made against
    list_signature: (String, String, u32, usize),
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Articles,
            input_mode: InputMode::Browse,
            categories: CategoryPaneState::new(),
            articles: ArticlePaneState::new(),
            search: TextInput::new(),
            detail_scroll: ScrollViewState::default(),
            list_signature: Default::default(),
        }
    }

    /// Resets the article selection whenever a different list is shown.
    fn sync(&mut self, app: &App) {
        let query = app.articles.query();
        let signature = (
            query.category.as_key().to_string(),
            query.search.clone(),
            query.page,
            app.articles.articles().len(),
        );
        if signature != self.list_signature {
            self.articles.reset();
            self.list_signature = signature;
        }
        self.articles.clamp(app.articles.articles().len());
        self.categories.clamp(app.categories.rows().len() + 1);
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Translates one terminal event into at most one `Action`.
pub fn route_event(event: &TuiEvent, tui: &mut TuiState, app: &App) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    match app.surface.top_modal() {
        Some(Modal::ProcessUrl) => return route_process_modal(event, app),
        Some(Modal::ArticleDetail) => return route_detail_modal(event, tui),
        None => {}
    }
    match tui.input_mode {
        InputMode::Search => route_search(event, tui),
        InputMode::Browse => route_browse(event, tui, app),
    }
}

fn route_process_modal(event: &TuiEvent, app: &App) -> Option<Action> {
    let form = &app.process_form;
    match event {
        TuiEvent::InputChar(c) if !form.submitting => {
            let mut url = form.url.clone();
            url.push(*c);
            Some(Action::EditProcessUrl(url))
        }
        TuiEvent::Paste(text) if !form.submitting => {
            let mut url = form.url.clone();
            url.push_str(text.trim());
            Some(Action::EditProcessUrl(url))
        }
        TuiEvent::Backspace if !form.submitting => {
            let mut url = form.url.clone();
            url.pop()?;
            Some(Action::EditProcessUrl(url))
        }
        TuiEvent::Tab => Some(Action::CycleProcessMode),
        TuiEvent::Submit => Some(Action::SubmitProcessUrl),
        TuiEvent::Escape => Some(Action::DismissModals),
        _ => None,
    }
}

fn route_detail_modal(event: &TuiEvent, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::CursorUp | TuiEvent::InputChar('k') => tui.detail_scroll.scroll_up(),
        TuiEvent::CursorDown | TuiEvent::InputChar('j') => tui.detail_scroll.scroll_down(),
        TuiEvent::PageUp => tui.detail_scroll.scroll_page_up(),
        TuiEvent::PageDown | TuiEvent::InputChar(' ') => tui.detail_scroll.scroll_page_down(),
        TuiEvent::Escape => return Some(Action::DismissModals),
        TuiEvent::Submit | TuiEvent::InputChar('q') => {
            return Some(Action::CloseModal(Modal::ArticleDetail));
        }
        _ => {}
    }
    None
}

fn route_search(event: &TuiEvent, tui: &mut TuiState) -> Option<Action> {
    match tui.search.handle_event(event)? {
        TextInputEvent::Submit(term) => {
            tui.input_mode = InputMode::Browse;
            Some(Action::Search(term))
        }
        TextInputEvent::Cancel => {
            tui.input_mode = InputMode::Browse;
            None
        }
        TextInputEvent::Changed => None,
    }
}

fn route_browse(event: &TuiEvent, tui: &mut TuiState, app: &App) -> Option<Action> {
    match event {
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::Tab => {
            tui.focus = match tui.focus {
                Focus::Categories => Focus::Articles,
                Focus::Articles => Focus::Categories,
            };
            None
        }
        TuiEvent::CursorUp => {
            match tui.focus {
                Focus::Categories => tui.categories.select_previous(),
                Focus::Articles => tui.articles.select_previous(),
            }
            None
        }
        TuiEvent::CursorDown => {
            match tui.focus {
                Focus::Categories => tui
                    .categories
                    .select_next(app.categories.rows().len() + 1),
                Focus::Articles => tui.articles.select_next(app.articles.articles().len()),
            }
            None
        }
        TuiEvent::Submit => match tui.focus {
            Focus::Categories => {
                key_at(&app.categories.rows(), tui.categories.selected).map(Action::SelectCategory)
            }
            Focus::Articles => app
                .articles
                .articles()
                .get(tui.articles.selected)
                .map(|article| Action::OpenArticle(article.id.clone())),
        },
        TuiEvent::InputChar('/') => {
            tui.input_mode = InputMode::Search;
            tui.search.set_value(&app.articles.query().search);
            None
        }
        TuiEvent::InputChar('a') => Some(Action::SelectCategory(
            crate::gateway::ALL_CATEGORIES.to_string(),
        )),
        TuiEvent::InputChar('r') => Some(Action::Refresh { manual: true }),
        TuiEvent::InputChar('c') => Some(Action::ReloadCategories),
        TuiEvent::InputChar('v') => Some(Action::ToggleViewMode),
        TuiEvent::InputChar('n') | TuiEvent::CursorRight | TuiEvent::PageDown => {
            Some(Action::NextPage)
        }
        TuiEvent::InputChar('p') | TuiEvent::CursorLeft | TuiEvent::PageUp => {
            Some(Action::PrevPage)
        }
        TuiEvent::InputChar('u') => Some(Action::OpenProcessModal),
        TuiEvent::InputChar(c @ '1'..='9') => {
            let index = c.to_digit(10).map(|d| d as usize - 1)?;
            Some(Action::PickHotTopic(index))
        }
        TuiEvent::Escape => Some(Action::DismissModals),
        _ => None,
    }
}

/// Short when animating (~12fps), long when idle, never past the toast deadline.
fn poll_timeout(animating: bool, toast_deadline: Option<Instant>, now: Instant) -> Duration {
    let base = if animating { ANIMATION_POLL } else { IDLE_POLL };
    match toast_deadline {
        Some(deadline) => base.min(deadline.saturating_duration_since(now)),
        None => base,
    }
}

pub fn run(coordinator: &mut Coordinator) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync(coordinator.app());

        let animating = {
            let app = coordinator.app();
            app.articles.is_loading() || app.process_form.submitting || app.is_connecting()
        };
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, coordinator.app(), &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = poll_timeout(
            animating,
            coordinator.app().surface.next_deadline(),
            Instant::now(),
        );
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            let was_open = coordinator.app().surface.is_open(Modal::ArticleDetail);
            if let Some(action) = route_event(&event, &mut tui, coordinator.app()) {
                coordinator.dispatch(action);
            }
            if !was_open && coordinator.app().surface.is_open(Modal::ArticleDetail) {
                tui.detail_scroll = ScrollViewState::default();
            }
        }

        // Finished gateway calls
        let before = coordinator.app().surface.is_open(Modal::ArticleDetail);
        if coordinator.drain_ready() > 0 {
            needs_redraw = true;
        }
        if !before && coordinator.app().surface.is_open(Modal::ArticleDetail) {
            tui.detail_scroll = ScrollViewState::default();
        }

        if coordinator.tick(Instant::now()) {
            needs_redraw = true;
        }

        if coordinator.should_quit() {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fallback::{fallback_articles, fallback_categories};
    use crate::test_support::test_app;

    fn loaded_app() -> App {
        let mut app = test_app();
        app.categories.load(fallback_categories());
        app.articles.install_fallback(fallback_articles());
        app.hot_topics = vec!["Rust".to_string(), "Chips".to_string()];
        app
    }

    #[test]
    fn test_poll_timeout_wakes_for_toast_deadline() {
        let now = Instant::now();
        assert_eq!(poll_timeout(false, None, now), IDLE_POLL);
        assert_eq!(poll_timeout(true, None, now), ANIMATION_POLL);
        assert_eq!(
            poll_timeout(false, Some(now + Duration::from_millis(30)), now),
            Duration::from_millis(30)
        );
        assert_eq!(
            poll_timeout(true, Some(now + Duration::from_secs(5)), now),
            ANIMATION_POLL
        );
        // Already overdue: poll without blocking so the toast expires now
        assert_eq!(poll_timeout(false, Some(now), now + Duration::from_millis(10)), Duration::ZERO);
    }

    #[test]
    fn test_poll_timeout_follows_surface_deadline() {
        let mut app = test_app();
        let now = Instant::now();
        app.surface.notify(
            "saved",
            crate::core::surface::Severity::Info,
            Duration::from_millis(100),
            now,
        );
        assert_eq!(
            poll_timeout(false, app.surface.next_deadline(), now),
            Duration::from_millis(100)
        );
    }

    fn route(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
        route_event(&event, tui, app)
    }

    #[test]
    fn test_force_quit_wins_over_modals() {
        let mut app = loaded_app();
        app.surface.show_modal(Modal::ProcessUrl);
        let mut tui = TuiState::new();
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::ForceQuit),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_enter_on_category_row_selects_by_name() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        route(&app, &mut tui, TuiEvent::Tab);
        assert_eq!(tui.focus, Focus::Categories);
        route(&app, &mut tui, TuiEvent::CursorDown);
        route(&app, &mut tui, TuiEvent::CursorDown);
        match route(&app, &mut tui, TuiEvent::Submit) {
            Some(Action::SelectCategory(name)) => assert_eq!(name, "Artificial Intelligence"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_enter_on_article_opens_detail() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        route(&app, &mut tui, TuiEvent::CursorDown);
        match route(&app, &mut tui, TuiEvent::Submit) {
            Some(Action::OpenArticle(id)) => assert_eq!(id, "2"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_search_mode_submits_trimmed_term() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        assert!(route(&app, &mut tui, TuiEvent::InputChar('/')).is_none());
        assert_eq!(tui.input_mode, InputMode::Search);
        for c in "ai ".chars() {
            // Browse keys are plain text while searching
            assert!(route(&app, &mut tui, TuiEvent::InputChar(c)).is_none());
        }
        match route(&app, &mut tui, TuiEvent::Submit) {
            Some(Action::Search(term)) => assert_eq!(term, "ai"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(tui.input_mode, InputMode::Browse);
    }

    #[test]
    fn test_search_escape_cancels() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        route(&app, &mut tui, TuiEvent::InputChar('/'));
        assert!(route(&app, &mut tui, TuiEvent::Escape).is_none());
        assert_eq!(tui.input_mode, InputMode::Browse);
    }

    #[test]
    fn test_hot_topic_digits() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::InputChar('2')),
            Some(Action::PickHotTopic(1))
        ));
    }

    #[test]
    fn test_browse_commands() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::InputChar('r')),
            Some(Action::Refresh { manual: true })
        ));
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::InputChar('v')),
            Some(Action::ToggleViewMode)
        ));
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::CursorRight),
            Some(Action::NextPage)
        ));
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::InputChar('u')),
            Some(Action::OpenProcessModal)
        ));
        match route(&app, &mut tui, TuiEvent::InputChar('a')) {
            Some(Action::SelectCategory(key)) => assert_eq!(key, "all"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_process_modal_edits_url() {
        let mut app = loaded_app();
        app.surface.show_modal(Modal::ProcessUrl);
        app.process_form.url = "https://x".to_string();
        let mut tui = TuiState::new();

        match route(&app, &mut tui, TuiEvent::InputChar('y')) {
            Some(Action::EditProcessUrl(url)) => assert_eq!(url, "https://xy"),
            other => panic!("unexpected {:?}", other),
        }
        match route(&app, &mut tui, TuiEvent::Backspace) {
            Some(Action::EditProcessUrl(url)) => assert_eq!(url, "https://"),
            other => panic!("unexpected {:?}", other),
        }
        // 'q' is text here, not quit
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::InputChar('q')),
            Some(Action::EditProcessUrl(_))
        ));
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::Tab),
            Some(Action::CycleProcessMode)
        ));
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::Submit),
            Some(Action::SubmitProcessUrl)
        ));
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::Escape),
            Some(Action::DismissModals)
        ));
    }

    #[test]
    fn test_process_modal_locks_input_while_submitting() {
        let mut app = loaded_app();
        app.surface.show_modal(Modal::ProcessUrl);
        app.process_form.submitting = true;
        let mut tui = TuiState::new();
        assert!(route(&app, &mut tui, TuiEvent::InputChar('x')).is_none());
    }

    #[test]
    fn test_backspace_on_empty_url_is_ignored() {
        let mut app = loaded_app();
        app.surface.show_modal(Modal::ProcessUrl);
        let mut tui = TuiState::new();
        assert!(route(&app, &mut tui, TuiEvent::Backspace).is_none());
    }

    #[test]
    fn test_detail_modal_keys() {
        let mut app = loaded_app();
        app.surface.show_modal(Modal::ArticleDetail);
        let mut tui = TuiState::new();
        assert!(route(&app, &mut tui, TuiEvent::CursorDown).is_none());
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::InputChar('q')),
            Some(Action::CloseModal(Modal::ArticleDetail))
        ));
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::Escape),
            Some(Action::DismissModals)
        ));
    }

    #[test]
    fn test_new_list_resets_article_selection() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        tui.sync(&app);
        tui.articles.select_next(2);
        assert_eq!(tui.articles.selected, 1);

        app.articles.set_category("Finance");
        app.articles.install_fallback(fallback_articles());
        tui.sync(&app);
        assert_eq!(tui.articles.selected, 0);
    }
}
