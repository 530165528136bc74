//! Post creation form rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use super::view::{ComposeView, FieldView};
use crate::common::text_field::visible_window;

/// Rows needed by the form: heading, two bordered fields, button, error line.
pub const COMPOSE_HEIGHT: u16 = 1 + 3 + 3 + 1 + 1;

pub fn render_compose(frame: &mut Frame, area: Rect, view: &ComposeView, spinner: &str) {
    let [heading, title, body, button, error] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            view.heading,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        heading,
    );

    render_field(frame, title, &view.title);
    render_field(frame, body, &view.body);

    let mut button_style = if view.submit_enabled {
        Style::default().fg(Color::Black).bg(Color::Magenta)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if view.submit_focused {
        button_style = button_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    let mut spans = vec![Span::styled(format!(" {} ", view.button_label), button_style)];
    if view.submitting {
        spans.push(Span::styled(
            format!(" {spinner} submitting"),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), button);

    if let Some(message) = &view.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Red),
            )),
            error,
        );
    }
}

fn render_field(frame: &mut Frame, area: Rect, field: &FieldView) {
    let border_color = match (field.enabled, field.focused) {
        (_, true) => Color::Magenta,
        (true, false) => Color::Gray,
        (false, false) => Color::DarkGray,
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", field.label));
    let inner = block.inner(area);

    let text_style = if field.enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let (visible, cursor_col) = visible_window(&field.value, field.cursor, inner.width as usize);

    frame.render_widget(
        Paragraph::new(Span::styled(visible, text_style)).block(block),
        area,
    );

    if field.focused && inner.width > 0 && inner.height > 0 {
        let cursor_x = inner.x + (cursor_col as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y));
    }
}
