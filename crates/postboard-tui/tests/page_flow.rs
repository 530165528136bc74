//! Headless end-to-end flows: reducer + effect runner + real adapters.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use futures_util::future::BoxFuture;
use postboard_core::backend::{MemoryBackend, PostApi, Services, SessionApi, SignIn};
use postboard_core::config::{DisplayConfig, IdentityConfig};
use postboard_tui::EffectRunner;
use postboard_tui::events::UiEvent;
use postboard_tui::posts::PostListView;
use postboard_tui::runtime::UiEventReceiver;
use postboard_tui::state::{AppState, Focus};
use postboard_tui::view::PageView;
use postboard_tui::{render, update};
use postboard_types::{CreatePostInput, Post, QueryKey, Session};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// How long the inbox must stay quiet before a flow counts as settled.
const IDLE: Duration = Duration::from_millis(100);

struct Harness {
    app: AppState,
    runner: EffectRunner,
    inbox: UiEventReceiver,
}

impl Harness {
    fn start(services: Services) -> Self {
        let (runner, inbox) = EffectRunner::new(services);
        let mut app = AppState::new(DisplayConfig::default());
        let effects = update::init(&mut app);
        runner.execute_all(&mut app, effects);
        Self { app, runner, inbox }
    }

    fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.app, event);
        self.runner.execute_all(&mut self.app, effects);
    }

    fn key(&mut self, code: KeyCode) {
        self.dispatch(UiEvent::Terminal(Event::Key(KeyEvent::new(
            code,
            KeyModifiers::NONE,
        ))));
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.key(KeyCode::Char(ch));
        }
    }

    /// Feeds inbox events to the reducer until nothing arrives for `IDLE`.
    async fn settle(&mut self) {
        while let Ok(Some(event)) = tokio::time::timeout(IDLE, self.inbox.recv()).await {
            self.dispatch(event);
        }
    }

    fn page(&self) -> PageView {
        PageView::build(&self.app)
    }
}

fn memory() -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::with_demo_posts(IdentityConfig::default()))
}

/// Backend whose every call fails.
struct FailingBackend;

impl PostApi for FailingBackend {
    fn list_posts(&self) -> BoxFuture<'_, anyhow::Result<Vec<Post>>> {
        Box::pin(async { Err(anyhow!("database unavailable")) })
    }

    fn create_post(&self, _input: CreatePostInput) -> BoxFuture<'_, anyhow::Result<Post>> {
        Box::pin(async { Err(anyhow!("write rejected")) })
    }
}

impl SessionApi for FailingBackend {
    fn get_session(&self) -> BoxFuture<'_, anyhow::Result<Option<Session>>> {
        Box::pin(async { Ok(Some(Session::for_user("Ada", None))) })
    }

    fn sign_in(&self) -> BoxFuture<'_, anyhow::Result<SignIn>> {
        Box::pin(async { Err(anyhow!("provider down")) })
    }

    fn sign_out(&self) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin(async { Err(anyhow!("provider down")) })
    }
}

/// Memory backend that counts sign-in requests.
struct CountingSignIn {
    inner: MemoryBackend,
    sign_ins: AtomicUsize,
}

impl PostApi for CountingSignIn {
    fn list_posts(&self) -> BoxFuture<'_, anyhow::Result<Vec<Post>>> {
        self.inner.list_posts()
    }

    fn create_post(&self, input: CreatePostInput) -> BoxFuture<'_, anyhow::Result<Post>> {
        self.inner.create_post(input)
    }
}

impl SessionApi for CountingSignIn {
    fn get_session(&self) -> BoxFuture<'_, anyhow::Result<Option<Session>>> {
        self.inner.get_session()
    }

    fn sign_in(&self) -> BoxFuture<'_, anyhow::Result<SignIn>> {
        self.sign_ins.fetch_add(1, Ordering::SeqCst);
        self.inner.sign_in()
    }

    fn sign_out(&self) -> BoxFuture<'_, anyhow::Result<()>> {
        self.inner.sign_out()
    }
}

#[tokio::test]
async fn test_startup_loads_posts_and_shows_signed_out() {
    let mut h = Harness::start(Services::from_backend(memory()));
    assert_eq!(h.page().posts, PostListView::Loading);

    h.settle().await;
    let page = h.page();
    assert_eq!(page.posts.cards().len(), 2);
    assert_eq!(page.auth.label, "Sign in");
    assert!(!page.compose.submit_enabled);
    assert_eq!(page.compose.button_label, "You must be signed in to post");
}

#[tokio::test]
async fn test_sign_in_flips_button_and_enables_form_together() {
    let mut h = Harness::start(Services::from_backend(memory()));
    h.settle().await;

    h.app.focus = Focus::Auth;
    h.key(KeyCode::Enter);
    h.settle().await;

    let page = h.page();
    assert_eq!(page.auth.label, "Sign out");
    assert!(page.compose.inputs_enabled);
    assert!(page.compose.submit_enabled);
    assert_eq!(page.compose.button_label, "Submit post");

    h.key(KeyCode::Enter);
    h.settle().await;
    let page = h.page();
    assert_eq!(page.auth.label, "Sign in");
    assert!(!page.compose.submit_enabled);
}

#[tokio::test]
async fn test_create_clears_form_and_refetches_list() {
    let backend = Arc::new(MemoryBackend::new(IdentityConfig::default()).signed_in());
    let mut h = Harness::start(Services::from_backend(backend));
    h.settle().await;
    assert!(h.page().posts.cards().is_empty());

    h.type_text("Hello");
    h.key(KeyCode::Tab);
    h.type_text("World");
    h.key(KeyCode::Enter);
    h.settle().await;

    let page = h.page();
    assert_eq!(page.compose.title.value, "");
    assert_eq!(page.compose.body.value, "");
    let cards = page.posts.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Hello");
    assert_eq!(cards[0].body, "World");
    assert_eq!(cards[0].author_name, "Demo User");
    assert_eq!(
        cards[0].avatar_src,
        "https://www.w3schools.com/howto/img_avatar.png"
    );
}

#[tokio::test]
async fn test_double_enter_creates_one_post() {
    let backend = Arc::new(MemoryBackend::new(IdentityConfig::default()).signed_in());
    let mut h = Harness::start(Services::from_backend(Arc::clone(&backend)));
    h.settle().await;

    h.type_text("Hello");
    h.key(KeyCode::Tab);
    h.type_text("World");
    // Both presses land before the create task reports in.
    h.key(KeyCode::Enter);
    h.key(KeyCode::Enter);
    h.settle().await;

    assert_eq!(backend.list_posts().await.map(|p| p.len()).ok(), Some(1));
    assert_eq!(h.page().posts.cards().len(), 1);
    assert!(!h.app.tasks.is_any_running());
}

#[tokio::test]
async fn test_double_enter_on_auth_signs_in_once() {
    let backend = Arc::new(CountingSignIn {
        inner: MemoryBackend::new(IdentityConfig::default()),
        sign_ins: AtomicUsize::new(0),
    });
    let mut h = Harness::start(Services::from_backend(Arc::clone(&backend)));
    h.settle().await;

    h.app.focus = Focus::Auth;
    h.key(KeyCode::Enter);
    h.key(KeyCode::Enter);
    h.settle().await;

    assert_eq!(backend.sign_ins.load(Ordering::SeqCst), 1);
    assert_eq!(h.page().auth.label, "Sign out");
}

#[tokio::test]
async fn test_submit_without_session_sends_nothing() {
    let backend = memory();
    let mut h = Harness::start(Services::from_backend(Arc::clone(&backend)));
    h.settle().await;

    h.type_text("Hello");
    h.app.focus = Focus::Submit;
    h.key(KeyCode::Enter);
    h.settle().await;

    assert_eq!(h.app.compose.title.text(), "Hello");
    assert_eq!(backend.list_posts().await.map(|p| p.len()).ok(), Some(2));
}

#[tokio::test]
async fn test_external_invalidation_refetches_list() {
    let backend = Arc::new(MemoryBackend::new(IdentityConfig::default()).signed_in());
    let services = Services::from_backend(Arc::clone(&backend));
    let bus = services.invalidations.clone();
    let mut h = Harness::start(services);
    h.settle().await;
    assert!(h.page().posts.cards().is_empty());

    backend
        .create_post(CreatePostInput {
            title: "From elsewhere".to_string(),
            body: String::new(),
        })
        .await
        .ok();
    bus.invalidate(QueryKey::Posts);
    h.settle().await;

    assert_eq!(h.page().posts.cards().len(), 1);
}

#[tokio::test]
async fn test_failures_are_surfaced_without_retry() {
    let mut h = Harness::start(Services::from_backend(Arc::new(FailingBackend)));
    h.settle().await;

    assert_eq!(
        h.page().posts,
        PostListView::Failed("database unavailable".to_string())
    );

    h.type_text("Kept");
    h.key(KeyCode::Tab);
    h.key(KeyCode::Enter);
    h.settle().await;
    let page = h.page();
    assert_eq!(page.compose.title.value, "Kept");
    assert_eq!(page.compose.error.as_deref(), Some("write rejected"));

    h.app.focus = Focus::Auth;
    h.key(KeyCode::Enter);
    h.settle().await;
    assert_eq!(h.page().auth.error.as_deref(), Some("provider down"));
    assert!(!h.app.tasks.is_any_running());
}

fn screen(app: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("test terminal");
    terminal
        .draw(|frame| render::render(app, frame))
        .expect("draw");
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[tokio::test]
async fn test_render_shows_loading_then_cards() {
    let mut h = Harness::start(Services::from_backend(memory()));
    let before = screen(&h.app);
    assert!(before.contains("Create T3 App"));
    assert!(before.contains("Create a new post"));
    assert!(before.contains("Loading..."));
    assert!(before.contains("Sign in"));

    h.settle().await;
    let after = screen(&h.app);
    assert!(!after.contains("Loading..."));
    assert!(after.contains("Welcome"));
    assert!(after.contains("Typed all the way"));
    assert!(after.contains("You must be signed in to post"));
}
