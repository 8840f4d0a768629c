//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame
//! - Every spawned task reports `TaskStarted` then `TaskCompleted`
//! - The reducer already marks a task running when it emits the effect, so
//!   `TaskStarted` only confirms it
//!
//! The log append is the exception: it is spawned detached and never sends
//! anything back.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ipgeo_core::services::Services;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::mutations::RouteRequest;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Sender for the runtime's event inbox.
type UiEventSender = mpsc::UnboundedSender<UiEvent>;

/// Receiver for the runtime's event inbox.
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Tick interval while something is animating (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal, state, and service clients. Terminal state is restored
/// on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    services: Services,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a runtime starting on `start`.
    ///
    /// Must be called from within a tokio runtime; effects are spawned onto
    /// it.
    pub fn new(services: Services, start: RouteRequest) -> Result<Self> {
        // Hook first so a panic during setup still restores the terminal.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            state: AppState::new(start),
            services,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let effects = update::start(&mut self.state);
        self.execute_effects(effects);
        let result = self.event_loop();

        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects inbox results, terminal input, and the tick.
    ///
    /// Ticks run fast only while a task is in flight so the spinner animates.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tui.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

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

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            // Identity effects
            UiEffect::SignIn {
                task,
                email,
                password,
            } => {
                let auth = self.services.auth.clone();
                self.spawn_task(TaskKind::SignIn, task, move || {
                    handlers::sign_in(auth, email, password)
                });
            }
            UiEffect::SignUp {
                task,
                email,
                password,
            } => {
                let auth = self.services.auth.clone();
                self.spawn_task(TaskKind::SignUp, task, move || {
                    handlers::sign_up(auth, email, password)
                });
            }
            UiEffect::CheckSession { task } => {
                let auth = self.services.auth.clone();
                self.spawn_task(TaskKind::SessionCheck, task, move || {
                    handlers::check_session(auth)
                });
            }
            UiEffect::SignOut { task } => {
                let auth = self.services.auth.clone();
                self.spawn_task(TaskKind::SignOut, task, move || handlers::sign_out(auth));
            }

            // Geolocation effects
            UiEffect::LookupSelf { task } => {
                let geo = self.services.geo.clone();
                self.spawn_task(TaskKind::SelfLookup, task, move || {
                    handlers::lookup_self(geo)
                });
            }
            UiEffect::LookupIp { task, ip } => {
                let geo = self.services.geo.clone();
                self.spawn_task(TaskKind::Search, task, move || handlers::lookup_ip(geo, ip));
            }

            // Detached; the handler logs the outcome.
            UiEffect::AppendLog { session, record } => {
                let store = self.services.store.clone();
                tokio::spawn(async move {
                    let _ = handlers::append_log(store, session, record).await;
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
