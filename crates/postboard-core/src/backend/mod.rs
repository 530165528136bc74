//! Backend adapters for posts and sessions.
//!
//! The UI never talks to a data store or auth provider directly. It goes
//! through two narrow traits:
//! - [`PostApi`]: list query and create mutation
//! - [`SessionApi`]: session query and sign-in / sign-out actions
//!
//! Futures are boxed so the traits stay object-safe and can be injected as
//! `Arc<dyn ...>` (fakes in tests, memory or HTTP at runtime).

mod http;
mod memory;

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use futures_util::future::BoxFuture;
pub use http::HttpBackend;
pub use memory::MemoryBackend;
use postboard_types::{CreatePostInput, Post, Session};

use crate::config::{BackendKind, Config};
use crate::invalidation::InvalidationBus;

/// Outcome of a sign-in request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignIn {
    /// The session now exists; re-read it.
    Completed,
    /// The auth provider needs a browser round-trip.
    OpenBrowser { url: String },
}

/// List query and create mutation.
pub trait PostApi: Send + Sync {
    /// Returns all posts in the order the backend keeps them.
    fn list_posts(&self) -> BoxFuture<'_, Result<Vec<Post>>>;

    /// Creates a post authored by the current session's user.
    fn create_post(&self, input: CreatePostInput) -> BoxFuture<'_, Result<Post>>;
}

/// Session query and auth actions.
pub trait SessionApi: Send + Sync {
    fn get_session(&self) -> BoxFuture<'_, Result<Option<Session>>>;

    fn sign_in(&self) -> BoxFuture<'_, Result<SignIn>>;

    fn sign_out(&self) -> BoxFuture<'_, Result<()>>;
}

/// External collaborators injected into the UI runtime.
#[derive(Clone)]
pub struct Services {
    pub posts: Arc<dyn PostApi>,
    pub session: Arc<dyn SessionApi>,
    pub invalidations: InvalidationBus,
}

impl Services {
    /// Wires services from explicit adapters.
    pub fn new(posts: Arc<dyn PostApi>, session: Arc<dyn SessionApi>) -> Self {
        Self {
            posts,
            session,
            invalidations: InvalidationBus::new(),
        }
    }

    /// Wires a single adapter that serves both posts and sessions.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: PostApi + SessionApi + 'static,
    {
        let posts: Arc<dyn PostApi> = Arc::clone(&backend) as Arc<dyn PostApi>;
        let session: Arc<dyn SessionApi> = backend;
        Self::new(posts, session)
    }

    /// Builds the adapter selected by `config.backend`.
    pub fn from_config(config: &Config) -> Result<Self> {
        tracing::info!(backend = %config.backend, "wiring backend");
        match config.backend {
            BackendKind::Memory => {
                let backend = if config.memory.seed_demo_posts {
                    MemoryBackend::with_demo_posts(config.identity.clone())
                } else {
                    MemoryBackend::new(config.identity.clone())
                };
                Ok(Self::from_backend(Arc::new(backend)))
            }
            BackendKind::Http => {
                let backend = HttpBackend::new(&config.http)?;
                Ok(Self::from_backend(Arc::new(backend)))
            }
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
