//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use postboard_types::QueryKey;

use crate::common::TaskKind;
use crate::compose::Field;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Focus};
use crate::{auth, compose, posts};

/// Effects to run once at startup: the list and session queries.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = posts::request_fetch(&mut app.posts, &mut app.tasks, &mut app.task_seq);
    effects.extend(auth::request_session_fetch(
        &mut app.session,
        &mut app.tasks,
        &mut app.task_seq,
    ));
    effects
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Invalidated(key) => match key {
            QueryKey::Posts => {
                posts::handle_invalidated(&mut app.posts, &mut app.tasks, &mut app.task_seq)
            }
            QueryKey::Session => auth::handle_session_invalidated(
                &mut app.session,
                &mut app.tasks,
                &mut app.task_seq,
            ),
        },
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, id = completed.id.0, "dropping superseded result");
                vec![]
            }
        }
        UiEvent::PostsLoaded(result) => {
            posts::handle_posts_loaded(&mut app.posts, &mut app.posts_first_row, result);
            vec![]
        }
        UiEvent::SessionLoaded(result) => {
            auth::handle_session_loaded(&mut app.session, &mut app.auth, result);
            vec![]
        }
        UiEvent::PostCreated(result) => compose::handle_post_created(&mut app.compose, result),
        UiEvent::SignInFinished(result) => auth::handle_sign_in(&mut app.auth, result),
        UiEvent::SignOutFinished(result) => auth::handle_sign_out(&mut app.auth, result),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            if let Some(field) = focused_field(app.focus) {
                compose::handle_field_paste(&mut app.compose, field, &text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return quit(app),
        KeyCode::Char('c') if ctrl => return quit(app),
        KeyCode::Char('r') if ctrl => {
            return vec![
                UiEffect::Invalidate {
                    key: QueryKey::Posts,
                },
                UiEffect::Invalidate {
                    key: QueryKey::Session,
                },
            ];
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return vec![];
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return vec![];
        }
        KeyCode::PageDown => {
            posts::scroll(&app.posts, &mut app.posts_first_row, 1);
            return vec![];
        }
        KeyCode::PageUp => {
            posts::scroll(&app.posts, &mut app.posts_first_row, -1);
            return vec![];
        }
        KeyCode::Enter => return activate(app),
        KeyCode::Char(' ') if !app.focus.is_field() => return activate(app),
        _ => {}
    }

    if let Some(field) = focused_field(app.focus) {
        compose::handle_field_key(&mut app.compose, field, key);
    }
    vec![]
}

/// Enter on the focused control.
fn activate(app: &mut AppState) -> Vec<UiEffect> {
    match app.focus {
        Focus::Title => {
            app.focus = Focus::Body;
            vec![]
        }
        Focus::Body | Focus::Submit => {
            let signed_in = app.is_signed_in();
            compose::submit(&mut app.compose, signed_in, &mut app.tasks, &mut app.task_seq)
        }
        Focus::Auth => auth::toggle(
            &mut app.auth,
            &app.session,
            &mut app.tasks,
            &mut app.task_seq,
        ),
    }
}

fn focused_field(focus: Focus) -> Option<Field> {
    match focus {
        Focus::Title => Some(Field::Title),
        Focus::Body => Some(Field::Body),
        Focus::Submit | Focus::Auth => None,
    }
}

/// Cancels in-flight queries, then quits.
fn quit(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects: Vec<UiEffect> = TaskKind::ALL
        .iter()
        .filter_map(|kind| {
            let state = app.tasks.state(*kind);
            state.cancel.as_ref().map(|token| UiEffect::CancelTask {
                kind: *kind,
                token: Some(token.clone()),
            })
        })
        .collect();
    effects.push(UiEffect::Quit);
    effects
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use postboard_core::config::DisplayConfig;
    use postboard_types::{Author, Post, Session};
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};

    fn app() -> AppState {
        AppState::new(DisplayConfig::default())
    }

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(ch: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )))
    }

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: String::new(),
            body: String::new(),
            created_at: Utc::now(),
            author: Author {
                name: "Ada".to_string(),
                image: None,
            },
        }
    }

    fn start(app: &mut AppState, kind: TaskKind, id: u64) {
        update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: TaskStarted {
                    id: TaskId(id),
                    cancel: kind.is_cancelable().then(CancellationToken::new),
                },
            },
        );
    }

    fn complete(app: &mut AppState, kind: TaskKind, id: u64, result: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id: TaskId(id),
                    result: Box::new(result),
                },
            },
        )
    }

    #[test]
    fn test_init_fetches_both_queries() {
        let mut app = app();
        let effects = init(&mut app);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchPosts { .. }, UiEffect::FetchSession { .. }]
        ));
        assert!(app.posts.is_fetching());
        assert!(app.session.is_fetching());
    }

    #[test]
    fn test_enter_on_title_moves_to_body() {
        let mut app = app();
        let effects = update(&mut app, press(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.focus, Focus::Body);
    }

    #[test]
    fn test_enter_on_body_submits_when_signed_in() {
        let mut app = app();
        app.session.resolve(Some(Session::for_user("Ada", None)));
        update(&mut app, press(KeyCode::Char('T')));
        update(&mut app, press(KeyCode::Tab));
        update(&mut app, press(KeyCode::Char('B')));

        let effects = update(&mut app, press(KeyCode::Enter));
        match effects.as_slice() {
            [UiEffect::CreatePost { input, .. }] => {
                assert_eq!(input.title, "T");
                assert_eq!(input.body, "B");
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn test_typing_without_session_still_edits() {
        let mut app = app();
        app.session.resolve(None);
        update(&mut app, press(KeyCode::Char('x')));
        assert_eq!(app.compose.title.text(), "x");

        app.focus = Focus::Submit;
        assert!(update(&mut app, press(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        update(&mut app, UiEvent::Terminal(Event::Key(key)));
        assert!(app.compose.title.is_empty());
    }

    #[test]
    fn test_enter_on_auth_toggles() {
        let mut app = app();
        app.session.resolve(None);
        app.focus = Focus::Auth;
        let effects = update(&mut app, press(KeyCode::Enter));
        assert!(matches!(effects.as_slice(), [UiEffect::SignIn { .. }]));
    }

    #[test]
    fn test_ctrl_r_invalidates_both_queries() {
        let mut app = app();
        let effects = update(&mut app, ctrl('r'));
        assert!(matches!(
            effects.as_slice(),
            [
                UiEffect::Invalidate {
                    key: QueryKey::Posts
                },
                UiEffect::Invalidate {
                    key: QueryKey::Session
                }
            ]
        ));
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut app = app();
        app.focus = Focus::Body;
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("pasted\ntext".to_string())),
        );
        assert_eq!(app.compose.body.text(), "pasted text");
        assert!(app.compose.title.is_empty());
    }

    #[test]
    fn test_superseded_fetch_result_is_dropped() {
        let mut app = app();
        init(&mut app);
        start(&mut app, TaskKind::PostList, 0);

        // Invalidation supersedes task 0 with task 2.
        update(&mut app, UiEvent::Invalidated(QueryKey::Posts));
        start(&mut app, TaskKind::PostList, 2);

        complete(
            &mut app,
            TaskKind::PostList,
            0,
            UiEvent::PostsLoaded(Ok(vec![post("old")])),
        );
        assert!(app.posts.is_pending());

        complete(
            &mut app,
            TaskKind::PostList,
            2,
            UiEvent::PostsLoaded(Ok(vec![post("new")])),
        );
        assert_eq!(app.posts.data().map(|p| p[0].id.as_str()), Some("new"));
    }

    #[test]
    fn test_created_post_invalidates_list() {
        let mut app = app();
        start(&mut app, TaskKind::PostCreate, 5);
        let effects = complete(
            &mut app,
            TaskKind::PostCreate,
            5,
            UiEvent::PostCreated(Ok(post("p"))),
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Invalidate {
                key: QueryKey::Posts
            }]
        ));
        assert!(!app.tasks.is_any_running());
    }

    #[test]
    fn test_quit_cancels_running_queries() {
        let mut app = app();
        start(&mut app, TaskKind::PostList, 1);
        let effects = update(&mut app, press(KeyCode::Esc));
        assert!(matches!(
            effects.as_slice(),
            [
                UiEffect::CancelTask {
                    kind: TaskKind::PostList,
                    token: Some(_)
                },
                UiEffect::Quit
            ]
        ));
    }
}
