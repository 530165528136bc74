//! Post creation form view model.

use postboard_types::Session;

use super::state::ComposeState;
use crate::common::{Query, TaskKind, Tasks, TextField};
use crate::state::{Focus, is_signed_in};

pub const HEADING: &str = "Create a new post";
pub const SUBMIT_LABEL: &str = "Submit post";
pub const SIGNED_OUT_LABEL: &str = "You must be signed in to post";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    /// Cursor position in chars.
    pub cursor: usize,
    pub focused: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeView {
    pub heading: &'static str,
    pub title: FieldView,
    pub body: FieldView,
    pub inputs_enabled: bool,
    pub submit_enabled: bool,
    pub submit_focused: bool,
    pub button_label: &'static str,
    pub submitting: bool,
    pub error: Option<String>,
}

impl ComposeView {
    pub fn build(
        compose: &ComposeState,
        session: &Query<Option<Session>>,
        tasks: &Tasks,
        focus: Focus,
    ) -> Self {
        let signed_in = is_signed_in(session);
        let field = |label, input: &TextField, focused| FieldView {
            label,
            value: input.text().to_string(),
            cursor: input.cursor(),
            focused,
            enabled: signed_in,
        };

        Self {
            heading: HEADING,
            title: field("Title", &compose.title, focus == Focus::Title),
            body: field("Body", &compose.body, focus == Focus::Body),
            inputs_enabled: signed_in,
            submit_enabled: signed_in,
            submit_focused: focus == Focus::Submit,
            button_label: if signed_in {
                SUBMIT_LABEL
            } else {
                SIGNED_OUT_LABEL
            },
            submitting: tasks.state(TaskKind::PostCreate).is_running(),
            error: compose.last_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_disables_form() {
        let mut session = Query::new();
        session.resolve(None);
        let view = ComposeView::build(
            &ComposeState::default(),
            &session,
            &Tasks::default(),
            Focus::Title,
        );

        assert_eq!(view.heading, "Create a new post");
        assert!(!view.inputs_enabled);
        assert!(!view.submit_enabled);
        assert!(!view.title.enabled);
        assert_eq!(view.button_label, "You must be signed in to post");
    }

    #[test]
    fn test_pending_session_counts_as_signed_out() {
        let view = ComposeView::build(
            &ComposeState::default(),
            &Query::new(),
            &Tasks::default(),
            Focus::Title,
        );
        assert!(!view.submit_enabled);
    }

    #[test]
    fn test_signed_in_enables_form_and_reflects_fields() {
        let mut session = Query::new();
        session.resolve(Some(Session::for_user("Ada", None)));
        let mut compose = ComposeState::default();
        compose.title.insert_str("Hello");
        compose.body.insert_str("World");

        let view = ComposeView::build(&compose, &session, &Tasks::default(), Focus::Body);
        assert!(view.inputs_enabled);
        assert!(view.submit_enabled);
        assert_eq!(view.button_label, "Submit post");
        assert_eq!(view.title.label, "Title");
        assert_eq!(view.body.label, "Body");
        assert_eq!(view.title.value, "Hello");
        assert_eq!(view.body.value, "World");
        assert!(view.body.focused);
        assert!(!view.title.focused);
    }
}
