//! Process-local backend.
//!
//! Keeps posts in a vector and a single session slot. Nothing survives the
//! process; this is the adapter used for demos and tests.

use std::sync::Mutex;

use anyhow::{Result, anyhow};
use chrono::{Duration, Utc};
use futures_util::future::BoxFuture;
use postboard_types::{Author, CreatePostInput, Post, Session};

use super::{PostApi, SessionApi, SignIn};
use crate::config::IdentityConfig;

#[derive(Debug, Default)]
struct Store {
    posts: Vec<Post>,
    session: Option<Session>,
}

/// In-memory posts and session.
#[derive(Debug)]
pub struct MemoryBackend {
    identity: IdentityConfig,
    store: Mutex<Store>,
}

impl MemoryBackend {
    /// Empty store, signed out.
    pub fn new(identity: IdentityConfig) -> Self {
        Self {
            identity,
            store: Mutex::new(Store::default()),
        }
    }

    /// Store pre-filled with a few posts so the list is not empty on first run.
    pub fn with_demo_posts(identity: IdentityConfig) -> Self {
        let backend = Self::new(identity);
        let now = Utc::now();
        let demo = [
            (
                "Theo",
                Some("https://avatars.githubusercontent.com/u/6751787"),
                "Welcome",
                "This board lists posts from every user.",
                Duration::days(2),
            ),
            (
                "Julius",
                None,
                "Typed all the way",
                "Sign in to write your own post.",
                Duration::hours(5),
            ),
        ];
        if let Ok(mut store) = backend.store.lock() {
            for (name, image, title, body, age) in demo {
                store.posts.push(Post {
                    id: uuid::Uuid::new_v4().to_string(),
                    title: title.to_string(),
                    body: body.to_string(),
                    created_at: now - age,
                    author: Author {
                        name: name.to_string(),
                        image: image.map(str::to_string),
                    },
                });
            }
        }
        backend
    }

    /// Starts with a session already present.
    #[must_use]
    pub fn signed_in(self) -> Self {
        let session = self.identity_session();
        if let Ok(mut store) = self.store.lock() {
            store.session = Some(session);
        }
        self
    }

    fn identity_session(&self) -> Session {
        Session::for_user(self.identity.name.clone(), self.identity.image.clone())
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut Store) -> Result<T>) -> Result<T> {
        let mut store = self
            .store
            .lock()
            .map_err(|_poisoned| anyhow!("memory store lock poisoned"))?;
        f(&mut store)
    }
}

impl PostApi for MemoryBackend {
    fn list_posts(&self) -> BoxFuture<'_, Result<Vec<Post>>> {
        Box::pin(async move { self.with_store(|store| Ok(store.posts.clone())) })
    }

    fn create_post(&self, input: CreatePostInput) -> BoxFuture<'_, Result<Post>> {
        Box::pin(async move {
            self.with_store(|store| {
                let Some(session) = store.session.as_ref() else {
                    anyhow::bail!("UNAUTHORIZED: sign in to create a post");
                };
                let post = Post {
                    id: uuid::Uuid::new_v4().to_string(),
                    title: input.title,
                    body: input.body,
                    created_at: Utc::now(),
                    author: Author {
                        name: session.display_name().to_string(),
                        image: session.user.image.clone(),
                    },
                };
                store.posts.push(post.clone());
                tracing::debug!(id = %post.id, "memory backend created post");
                Ok(post)
            })
        })
    }
}

impl SessionApi for MemoryBackend {
    fn get_session(&self) -> BoxFuture<'_, Result<Option<Session>>> {
        Box::pin(async move { self.with_store(|store| Ok(store.session.clone())) })
    }

    fn sign_in(&self) -> BoxFuture<'_, Result<SignIn>> {
        Box::pin(async move {
            let session = self.identity_session();
            self.with_store(|store| {
                store.session = Some(session);
                Ok(SignIn::Completed)
            })
        })
    }

    fn sign_out(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.with_store(|store| {
                store.session = None;
                Ok(())
            })
        })
    }
}
