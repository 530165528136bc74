//! Auth toggle and session query reducer.

use postboard_core::backend::SignIn;
use postboard_types::{QueryKey, Session};

use super::state::AuthState;
use crate::common::{Query, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::state::is_signed_in;

/// Shown after handing sign-in off to the browser.
pub const BROWSER_SIGN_IN_NOTICE: &str = "Finish signing in in your browser, then press Ctrl+R";

/// Issues a session fetch, cancelling any fetch still in flight.
pub fn request_session_fetch(
    session: &mut Query<Option<Session>>,
    tasks: &mut Tasks,
    task_seq: &mut TaskSeq,
) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    let running = tasks.state_mut(TaskKind::SessionLoad);
    if running.is_running() {
        effects.push(UiEffect::CancelTask {
            kind: TaskKind::SessionLoad,
            token: running.cancel.clone(),
        });
        // A late completion of the cancelled fetch must not land.
        running.clear();
    }
    session.start_fetch();
    effects.push(UiEffect::FetchSession {
        task: task_seq.next_id(),
    });
    effects
}

pub fn handle_session_invalidated(
    session: &mut Query<Option<Session>>,
    tasks: &mut Tasks,
    task_seq: &mut TaskSeq,
) -> Vec<UiEffect> {
    session.invalidate();
    request_session_fetch(session, tasks, task_seq)
}

pub fn handle_session_loaded(
    session: &mut Query<Option<Session>>,
    auth: &mut AuthState,
    result: Result<Option<Session>, String>,
) {
    match &result {
        Ok(Some(current)) => {
            tracing::debug!(user = current.display_name(), "session present");
            auth.notice = None;
        }
        Ok(None) => tracing::debug!("no session"),
        Err(error) => tracing::warn!(%error, "session query failed"),
    }
    session.settle(result);
}

/// Activates the auth button: sign out when signed in, otherwise sign in.
///
/// Ignored while a previous sign-in or sign-out is still running.
pub fn toggle(
    auth: &mut AuthState,
    session: &Query<Option<Session>>,
    tasks: &mut Tasks,
    task_seq: &mut TaskSeq,
) -> Vec<UiEffect> {
    if tasks.auth_action_running() {
        tracing::debug!("auth toggle ignored: action already in flight");
        return vec![];
    }
    auth.clear();
    let task = task_seq.next_id();
    if is_signed_in(session) {
        tasks.state_mut(TaskKind::SignOut).begin(task);
        vec![UiEffect::SignOut { task }]
    } else {
        tasks.state_mut(TaskKind::SignIn).begin(task);
        vec![UiEffect::SignIn { task }]
    }
}

pub fn handle_sign_in(auth: &mut AuthState, result: Result<SignIn, String>) -> Vec<UiEffect> {
    match result {
        Ok(SignIn::Completed) => vec![UiEffect::Invalidate {
            key: QueryKey::Session,
        }],
        Ok(SignIn::OpenBrowser { url }) => {
            auth.notice = Some(BROWSER_SIGN_IN_NOTICE.to_string());
            vec![UiEffect::OpenBrowser { url }]
        }
        Err(error) => {
            tracing::warn!(%error, "sign in failed");
            auth.error = Some(error);
            vec![]
        }
    }
}

pub fn handle_sign_out(auth: &mut AuthState, result: Result<(), String>) -> Vec<UiEffect> {
    match result {
        Ok(()) => vec![UiEffect::Invalidate {
            key: QueryKey::Session,
        }],
        Err(error) => {
            tracing::warn!(%error, "sign out failed");
            auth.error = Some(error);
            vec![]
        }
    }
}
