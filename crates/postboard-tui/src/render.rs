//! Pure render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame` and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::auth::{AUTH_HEIGHT, render_auth};
use crate::compose::{COMPOSE_HEIGHT, render_compose};
use crate::posts::render_post_list;
use crate::state::AppState;
use crate::view::{KEY_HINTS, PageView};

const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 1;

/// Horizontal padding on each side of the page.
const PAGE_MARGIN: u16 = 1;

/// Renders the whole page.
pub fn render(app: &AppState, frame: &mut Frame) {
    render_page(&PageView::build(app), frame);
}

pub fn render_page(page: &PageView, frame: &mut Frame) {
    let area = frame.area();
    let area = Rect::new(
        area.x + PAGE_MARGIN.min(area.width / 2),
        area.y,
        area.width.saturating_sub(PAGE_MARGIN * 2),
        area.height,
    );

    let [header, compose, _, posts, auth, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(COMPOSE_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(AUTH_HEIGHT),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    render_header(frame, header, page);
    render_compose(frame, compose, &page.compose, page.spinner);
    render_post_list(frame, posts, &page.posts, page.posts_first_row);
    render_auth(frame, auth, &page.auth);

    frame.render_widget(
        Paragraph::new(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))),
        footer,
    );
}

fn render_header(frame: &mut Frame, area: Rect, page: &PageView) {
    let mut spans = vec![Span::styled(
        page.title.as_str(),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];
    if page.refreshing {
        spans.push(Span::styled(
            format!(" {}", page.spinner),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
