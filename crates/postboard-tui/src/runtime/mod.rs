//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async results and invalidation signals arrive on one unbounded channel:
//! - spawned tasks send `TaskStarted` / `TaskCompleted` events to the inbox
//! - a forwarder task relays every key published on the invalidation bus as
//!   `UiEvent::Invalidated`
//! - the event loop drains the inbox each frame
//!
//! `EffectRunner` holds the effect side and needs no terminal, so the whole
//! page can be driven headless in tests.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use postboard_core::backend::Services;
use postboard_core::invalidation::InvalidationSubscriber;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Frame interval while something is in flight.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Executes reducer effects against the injected services.
pub struct EffectRunner {
    services: Services,
    inbox_tx: UiEventSender,
    /// Stops the invalidation forwarder.
    shutdown: CancellationToken,
}

impl EffectRunner {
    /// Creates the runner and its inbox. Must be called inside a tokio
    /// runtime: the invalidation forwarder is spawned here.
    pub fn new(services: Services) -> (Self, UiEventReceiver) {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        tokio::spawn(forward_invalidations(
            services.invalidations.subscribe(),
            inbox_tx.clone(),
            shutdown.clone(),
        ));
        (
            Self {
                services,
                inbox_tx,
                shutdown,
            },
            inbox_rx,
        )
    }

    /// Spawns an async task with a uniform `TaskStarted` / `TaskCompleted`
    /// lifecycle. Cancelable kinds get a token; a cancelled task reports
    /// nothing.
    fn spawn_task<Fut>(&self, kind: TaskKind, id: TaskId, fut: Fut)
    where
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = kind.is_cancelable().then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = match cancel {
                Some(cancel) => {
                    tokio::select! {
                        () = cancel.cancelled() => {
                            tracing::debug!(?kind, id = id.0, "task cancelled");
                            return;
                        }
                        event = fut => event,
                    }
                }
                None => fut.await,
            };
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Executes a single effect.
    pub fn execute(&self, app: &mut AppState, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                app.should_quit = true;
            }
            UiEffect::FetchPosts { task } => {
                let posts = Arc::clone(&self.services.posts);
                self.spawn_task(TaskKind::PostList, task, handlers::fetch_posts(posts));
            }
            UiEffect::FetchSession { task } => {
                let session = Arc::clone(&self.services.session);
                self.spawn_task(
                    TaskKind::SessionLoad,
                    task,
                    handlers::fetch_session(session),
                );
            }
            UiEffect::CreatePost { task, input } => {
                let posts = Arc::clone(&self.services.posts);
                self.spawn_task(
                    TaskKind::PostCreate,
                    task,
                    handlers::create_post(posts, input),
                );
            }
            UiEffect::SignIn { task } => {
                let session = Arc::clone(&self.services.session);
                self.spawn_task(TaskKind::SignIn, task, handlers::sign_in(session));
            }
            UiEffect::SignOut { task } => {
                let session = Arc::clone(&self.services.session);
                self.spawn_task(TaskKind::SignOut, task, handlers::sign_out(session));
            }
            UiEffect::Invalidate { key } => {
                self.services.invalidations.invalidate(key);
            }
            UiEffect::OpenBrowser { url } => {
                if let Err(error) = open::that(&url) {
                    tracing::warn!(%url, %error, "failed to open browser");
                }
            }
            UiEffect::CancelTask { kind, token } => {
                if let Some(cancel) = token {
                    tracing::debug!(?kind, "cancelling task");
                    cancel.cancel();
                }
            }
        }
    }

    pub fn execute_all(&self, app: &mut AppState, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute(app, effect);
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Relays invalidation keys into the inbox until shut down or the bus closes.
async fn forward_invalidations(
    mut subscriber: InvalidationSubscriber,
    inbox_tx: UiEventSender,
    shutdown: CancellationToken,
) {
    loop {
        let key = tokio::select! {
            () = shutdown.cancelled() => break,
            key = subscriber.recv() => key,
        };
        let Some(key) = key else { break };
        if inbox_tx.send(UiEvent::Invalidated(key)).is_err() {
            break;
        }
    }
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    runner: EffectRunner,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    pub fn new(state: AppState, services: Services) -> Result<Self> {
        // Panic hook goes in before the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (runner, inbox_rx) = EffectRunner::new(services);

        Ok(Self {
            terminal,
            state,
            runner,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until quit.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let effects = update::init(&mut self.state);
        self.runner.execute_all(&mut self.state, effects);

        let mut dirty = true;
        while !self.state.should_quit {
            for event in self.collect_events()? {
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.runner.execute_all(&mut self.state, effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }
        tracing::info!("quit");
        Ok(())
    }

    /// Collects events from the inbox and the terminal, plus a Tick when due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        // Input and async results render promptly; otherwise on the tick.
        if !events.is_empty() || self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }
        Ok(events)
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
