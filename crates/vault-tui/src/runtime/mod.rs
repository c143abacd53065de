//! Runtime for the vault shell.
//!
//! Owns the terminal and the services. Each frame it pulls a batch of events
//! from the [`EventSource`], feeds them to the reducer and performs the
//! returned effects. Async work reports back through the inbox channel.

mod handlers;
mod inbox;
mod source;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
pub use source::{EventSource, FRAME_DURATION, IDLE_POLL_DURATION};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use vault_core::VaultServices;
use vault_core::preview::open_preview;

use self::inbox::UiEventSender;
use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted, copy_text};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, ShellOptions};
use crate::{render, terminal, update};

pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    services: VaultServices,
    events: EventSource,
    inbox: UiEventSender,
}

impl TuiRuntime {
    /// Takes over the terminal. It is handed back on drop and on panic.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(services: VaultServices) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox, inbox_rx) = mpsc::unbounded_channel();
        let events = EventSource::new(inbox_rx, services.session.subscribe());

        Ok(Self {
            terminal,
            state: AppState::new(ShellOptions::from_services(&services)),
            services,
            events,
            inbox,
        })
    }

    /// Runs until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let startup = update::start(&mut self.state);
        self.perform(startup);
        let outcome = self.main_loop();

        let _ = terminal::disable_input_features();
        outcome
    }

    fn main_loop(&mut self) -> Result<()> {
        let mut needs_draw = true;

        while !self.state.tui.should_quit {
            let busy = self.state.tui.tasks.is_any_running();
            let batch = self.events.next_batch(busy)?;

            // Draw at most once per tick; other events are folded into that frame.
            needs_draw |= batch.iter().any(|event| matches!(event, UiEvent::Tick));
            for event in batch {
                self.dispatch(event);
            }

            if needs_draw {
                let state = &self.state;
                self.terminal.draw(|frame| render::render(state, frame))?;
                needs_draw = false;
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.perform(effects);
    }

    fn perform(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.perform_one(effect);
        }
    }

    fn perform_one(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => self.state.tui.should_quit = true,

            UiEffect::RestoreSession { task } => {
                let provider = Arc::clone(&self.services.session);
                self.spawn(TaskKind::SessionRestore, task, false, |_| {
                    handlers::restore_session(provider)
                });
            }
            UiEffect::SignIn { task, secret } => {
                let auth = self.services.auth.clone();
                self.spawn(TaskKind::Login, task, false, |_| {
                    handlers::manual_sign_in(auth, secret)
                });
            }
            UiEffect::BiometricSignIn { task } => {
                let auth = self.services.auth.clone();
                self.spawn(TaskKind::Login, task, false, |_| {
                    handlers::biometric_sign_in(auth)
                });
            }
            // SignedOut arrives through the session watcher.
            UiEffect::SignOut => self.services.session.sign_out(),

            UiEffect::Generate { task, prompt } => {
                let generator = self.services.generator.clone();
                self.spawn(TaskKind::Generate, task, true, |cancel| {
                    handlers::generate(generator, prompt, cancel)
                });
            }
            UiEffect::CancelTask { kind, token } => {
                tracing::debug!(?kind, "cancel requested");
                if let Some(token) = token {
                    token.cancel();
                }
            }

            UiEffect::OpenPreview { name, markup } => {
                let result = open_preview(&name, &markup)
                    .inspect_err(|e| tracing::warn!("Preview failed: {e:#}"))
                    .map_err(|e| format!("{e:#}"));
                self.dispatch(UiEvent::PreviewOpened { result });
            }
            UiEffect::CopyToClipboard { text } => {
                let event = match copy_text(&text) {
                    Ok(target) => {
                        tracing::debug!(?target, bytes = text.len(), "copied");
                        UiEvent::ClipboardCopied
                    }
                    Err(e) => UiEvent::ClipboardFailed {
                        error: e.to_string(),
                    },
                };
                self.dispatch(event);
            }
        }
    }

    /// Runs `job` on the tokio runtime. The reducer sees `TaskStarted` first,
    /// then `TaskCompleted` wrapping the job's own event.
    fn spawn<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, job: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let token = cancelable.then(CancellationToken::new);
        let inbox = self.inbox.clone();
        let _ = inbox.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted {
                id,
                cancel: token.clone(),
            },
        });

        tokio::spawn(async move {
            let outcome = job(token).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(outcome),
            };
            let _ = inbox.send(UiEvent::TaskCompleted { kind, completed });
        });
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
