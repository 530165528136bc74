//! Auth button rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::view::{AuthAction, AuthButtonView};

/// Button line plus one feedback line.
pub const AUTH_HEIGHT: u16 = 2;

pub fn render_auth(frame: &mut Frame, area: Rect, view: &AuthButtonView) {
    let mut style = match view.action {
        AuthAction::SignIn => Style::default().fg(Color::Black).bg(Color::Cyan),
        AuthAction::SignOut => Style::default().fg(Color::White).bg(Color::DarkGray),
    };
    if view.focused {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    let mut button = vec![Span::styled(format!(" {} ", view.label), style)];
    if let Some(user) = &view.user {
        button.push(Span::styled(
            format!("  signed in as {user}"),
            Style::default().fg(Color::Gray),
        ));
    }

    let feedback = if let Some(error) = &view.error {
        Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
    } else if let Some(notice) = &view.notice {
        Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::default()
    };

    frame.render_widget(Paragraph::new(vec![Line::from(button), feedback]), area);
}
