use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem};

use crate::core::state::App;
use crate::core::surface::Modal;
use crate::tui::component::Component;
use crate::tui::components::{
    ArticlePane, CategoryPane, DetailModal, ProcessModal, TitleBar, Toast,
};
use crate::tui::{Focus, InputMode, TuiState};

const SIDEBAR_WIDTH: u16 = 30;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, footer_area] = layout.areas(frame.area());

    let query = app.articles.query();
    let mut title_bar = TitleBar {
        section_title: app.section_title(),
        view_mode: app.articles.view_mode(),
        page: query.page,
        search: query.search.clone(),
        loading: app.articles.is_loading() || app.is_connecting(),
        connecting: app.is_connecting(),
        degraded: app.is_degraded(),
        spinner_frame,
    };
    title_bar.render(frame, title_area);

    let [sidebar_area, articles_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(main_area);
    let topics_height = (app.hot_topics.len() as u16 + 2).min(sidebar_area.height / 2);
    let [categories_area, topics_area] =
        Layout::vertical([Min(0), Length(topics_height)]).areas(sidebar_area);

    let rows = app.categories.rows();
    CategoryPane {
        rows: &rows,
        active: app.categories.selected(),
        focused: tui.focus == Focus::Categories,
    }
    .render(frame, categories_area, &mut tui.categories);

    draw_hot_topics(frame, topics_area, &app.hot_topics);

    ArticlePane {
        articles: app.articles.articles(),
        view_mode: app.articles.view_mode(),
        title: app.section_title(),
        focused: tui.focus == Focus::Articles,
        loading: app.articles.is_loading() || app.is_connecting(),
        now: Local::now().naive_local(),
    }
    .render(frame, articles_area, &mut tui.articles);

    match tui.input_mode {
        InputMode::Search => tui.search.render(frame, footer_area, "Search: "),
        InputMode::Browse => draw_help(frame, footer_area),
    }

    // Modals stack in opening order; only the top one is drawn
    match app.surface.top_modal() {
        Some(Modal::ArticleDetail) => {
            if let Some(article) = &app.detail {
                let ancestry = article
                    .category
                    .as_deref()
                    .and_then(|name| app.categories.resolve_ancestry(name));
                let area = popup_area(frame.area(), 80, 80);
                DetailModal { article, ancestry }.render(frame, area, &mut tui.detail_scroll);
            }
        }
        Some(Modal::ProcessUrl) => {
            let area = popup_area(frame.area(), 70, 40);
            ProcessModal {
                form: &app.process_form,
                spinner_frame,
            }
            .render(frame, area);
        }
        None => {}
    }

    if let Some(notification) = app.surface.visible_notification(std::time::Instant::now()) {
        let mut toast = Toast { notification };
        let area = toast.area(frame.area());
        toast.render(frame, area);
    }
}

fn draw_hot_topics(frame: &mut Frame, area: Rect, topics: &[String]) {
    let items: Vec<ListItem> = topics
        .iter()
        .take(9)
        .enumerate()
        .map(|(i, topic)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::Yellow)),
                Span::raw(topic.as_str()),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::bordered()
            .title(" Hot topics ")
            .border_style(Style::default().add_modifier(Modifier::DIM)),
    );
    frame.render_widget(list, area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = "q quit · Tab pane · Enter open · / search · a all · r refresh · v view · n/p page · u process URL";
    frame.render_widget(
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
        area,
    );
}

/// Centered rect taking `percent_x` by `percent_y` of `area`.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}
