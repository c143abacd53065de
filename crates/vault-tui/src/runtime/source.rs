//! Merges the runtime's event inputs into per-frame batches.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use vault_core::session::SessionWatcher;

use super::inbox::UiEventReceiver;
use crate::events::UiEvent;

/// Frame interval while a task runs or the user is typing (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Task results, session changes, terminal input and the render tick.
pub struct EventSource {
    inbox: UiEventReceiver,
    session: SessionWatcher,
    last_tick: Instant,
    last_input: Instant,
}

impl EventSource {
    pub fn new(inbox: UiEventReceiver, session: SessionWatcher) -> Self {
        let now = Instant::now();
        Self {
            inbox,
            session,
            last_tick: now,
            last_input: now,
        }
    }

    fn tick_interval(&self, busy: bool) -> Duration {
        if busy || self.last_input.elapsed() < IDLE_POLL_DURATION {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        }
    }

    /// Collects everything that is ready, waiting for terminal input only
    /// when nothing else is pending and the next tick is not due.
    pub fn next_batch(&mut self, busy: bool) -> io::Result<Vec<UiEvent>> {
        let interval = self.tick_interval(busy);

        let mut batch: Vec<UiEvent> = std::iter::from_fn(|| self.inbox.try_recv().ok()).collect();
        if let Some(state) = self.session.try_next() {
            batch.push(UiEvent::Session(state));
        }

        let mut wait = if batch.is_empty() {
            interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };
        while event::poll(wait)? {
            batch.push(UiEvent::Terminal(event::read()?));
            self.last_input = Instant::now();
            wait = Duration::ZERO;
        }

        if self.last_tick.elapsed() >= interval {
            self.last_tick = Instant::now();
            batch.push(UiEvent::Tick);
        }
        Ok(batch)
    }
}
