//! Page view model.
//!
//! `PageView::build` is a pure function of `AppState`: it composes the
//! per-slice view models the renderer draws. Tests assert on it directly
//! without a terminal.

use crate::auth::AuthButtonView;
use crate::compose::ComposeView;
use crate::posts::PostListView;
use crate::state::{AppState, Focus};

/// Spinner frames for in-flight indicators.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
pub const SPINNER_SPEED_DIVISOR: usize = 6;

pub const KEY_HINTS: &str =
    "Tab focus · Enter submit/toggle · PgUp/PgDn scroll · Ctrl+R reload · Esc quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub compose: ComposeView,
    pub posts: PostListView,
    pub posts_first_row: usize,
    /// A list refetch is running behind the shown data.
    pub refreshing: bool,
    pub auth: AuthButtonView,
    pub spinner: &'static str,
}

impl PageView {
    pub fn build(app: &AppState) -> Self {
        let spinner =
            SPINNER_FRAMES[(app.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()];
        Self {
            title: app.display.title.clone(),
            compose: ComposeView::build(&app.compose, &app.session, &app.tasks, app.focus),
            posts: PostListView::from_query(&app.posts, &app.display.date_format),
            posts_first_row: app.posts_first_row,
            refreshing: app.posts.is_fetching() && app.posts.data().is_some(),
            auth: AuthButtonView::build(&app.auth, &app.session, app.focus == Focus::Auth),
            spinner,
        }
    }
}
