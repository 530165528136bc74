//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return `UiEvent`. They perform I/O
//! through the injected backend traits and never touch `AppState`; the
//! runtime spawns them and sends their result to the inbox.

use std::sync::Arc;

use postboard_core::backend::{PostApi, SessionApi};
use postboard_types::CreatePostInput;

use crate::events::UiEvent;

/// Renders an error chain on one line for display.
fn describe(error: &anyhow::Error) -> String {
    format!("{error:#}")
}

pub async fn fetch_posts(posts: Arc<dyn PostApi>) -> UiEvent {
    let result = posts.list_posts().await.map_err(|e| describe(&e));
    if let Ok(list) = &result {
        tracing::debug!(count = list.len(), "posts fetched");
    }
    UiEvent::PostsLoaded(result)
}

pub async fn fetch_session(session: Arc<dyn SessionApi>) -> UiEvent {
    UiEvent::SessionLoaded(session.get_session().await.map_err(|e| describe(&e)))
}

pub async fn create_post(posts: Arc<dyn PostApi>, input: CreatePostInput) -> UiEvent {
    UiEvent::PostCreated(posts.create_post(input).await.map_err(|e| describe(&e)))
}

pub async fn sign_in(session: Arc<dyn SessionApi>) -> UiEvent {
    UiEvent::SignInFinished(session.sign_in().await.map_err(|e| describe(&e)))
}

pub async fn sign_out(session: Arc<dyn SessionApi>) -> UiEvent {
    UiEvent::SignOutFinished(session.sign_out().await.map_err(|e| describe(&e)))
}
