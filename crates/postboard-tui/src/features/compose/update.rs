//! Post creation form reducer.
//!
//! Edits always land in the field state. Submission is the gated path: it
//! requires a session and no create already in flight.

use crossterm::event::KeyEvent;
use postboard_types::{Post, QueryKey};

use super::state::{ComposeState, Field};
use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;

/// Applies an editing key to `field`. Returns true if the key was consumed.
pub fn handle_field_key(compose: &mut ComposeState, field: Field, key: KeyEvent) -> bool {
    let consumed = compose.field_mut(field).handle_key(key);
    if consumed {
        compose.last_error = None;
    }
    consumed
}

pub fn handle_field_paste(compose: &mut ComposeState, field: Field, text: &str) {
    compose.field_mut(field).insert_str(text);
    compose.last_error = None;
}

/// Submits the form.
///
/// No-op when signed out or while a previous create is still running.
pub fn submit(
    compose: &mut ComposeState,
    signed_in: bool,
    tasks: &mut Tasks,
    task_seq: &mut TaskSeq,
) -> Vec<UiEffect> {
    if !signed_in {
        tracing::debug!("submit ignored: no session");
        return vec![];
    }
    if tasks.state(TaskKind::PostCreate).is_running() {
        tracing::debug!("submit ignored: create already in flight");
        return vec![];
    }

    compose.last_error = None;
    let task = task_seq.next_id();
    tasks.state_mut(TaskKind::PostCreate).begin(task);
    vec![UiEffect::CreatePost {
        task,
        input: compose.to_input(),
    }]
}

/// Applies the create outcome.
///
/// Success clears both fields and marks the post list stale. Failure keeps
/// the fields and records the error.
pub fn handle_post_created(
    compose: &mut ComposeState,
    result: Result<Post, String>,
) -> Vec<UiEffect> {
    match result {
        Ok(post) => {
            tracing::info!(id = %post.id, "post created");
            compose.clear();
            vec![UiEffect::Invalidate {
                key: QueryKey::Posts,
            }]
        }
        Err(error) => {
            tracing::warn!(%error, "create post failed");
            compose.last_error = Some(error);
            vec![]
        }
    }
}
