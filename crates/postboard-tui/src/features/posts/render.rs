//! Post list rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use super::update::GRID_COLUMNS;
use super::view::{PostCardView, PostListView};
use crate::common::text::truncate_with_ellipsis;

/// Card height including borders.
pub const CARD_HEIGHT: u16 = 8;

pub fn render_post_list(frame: &mut Frame, area: Rect, view: &PostListView, first_row: usize) {
    match view {
        PostListView::Loading => {
            let loading = Paragraph::new(Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::Blue),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(loading, centered_line(area));
        }
        PostListView::Failed(error) => {
            let failed = Paragraph::new(Line::from(Span::styled(
                format!("Failed to load posts: {error}"),
                Style::default().fg(Color::Red),
            )))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(failed, area);
        }
        PostListView::Loaded(cards) => render_grid(frame, area, cards, first_row),
    }
}

fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y, area.width, area.height.min(1))
}

fn render_grid(frame: &mut Frame, area: Rect, cards: &[PostCardView], first_row: usize) {
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let total_rows = cards.len().div_ceil(GRID_COLUMNS);
    let first_row = first_row.min(total_rows.saturating_sub(1));

    let rows = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(area);
    let column_constraints = vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS];

    for (row_area, chunk) in rows
        .iter()
        .zip(cards.chunks(GRID_COLUMNS).skip(first_row))
    {
        let columns = Layout::horizontal(column_constraints.clone())
            .spacing(1)
            .split(*row_area);
        for (card_area, card) in columns.iter().zip(chunk) {
            render_card(frame, *card_area, card);
        }
    }

    let hidden_after = total_rows.saturating_sub(first_row + visible_rows);
    if first_row > 0 || hidden_after > 0 {
        let hint = format!(
            " rows {}-{} of {} (PgUp/PgDn) ",
            first_row + 1,
            (first_row + visible_rows).min(total_rows),
            total_rows
        );
        let hint_area = Rect::new(
            area.x,
            area.bottom().saturating_sub(1),
            area.width,
            1.min(area.height),
        );
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Right),
            hint_area,
        );
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &PostCardView) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let lines = vec![
        Line::from(Span::styled(
            truncate_with_ellipsis(&format!("◉ {}", card.avatar_src), width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            truncate_with_ellipsis(&card.author_name, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.created.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            truncate_with_ellipsis(&card.title, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.body.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
