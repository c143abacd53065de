//! UI events consumed by the reducer.
//!
//! Terminal input, render ticks, session changes and the results of spawned
//! tasks all arrive as a `UiEvent`.

use std::path::PathBuf;

use crossterm::event::Event;
use vault_core::auth::AuthFailure;
use vault_core::generation::GenerationError;
use vault_core::session::SessionState;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Render cadence tick.
    Tick,
    Terminal(Event),

    /// The session provider emitted a new state.
    Session(SessionState),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Outcome of a manual or biometric login.
    LoginFinished { result: Result<(), AuthFailure> },
    /// Outcome of a generation request.
    GenerationFinished {
        result: Result<String, GenerationError>,
    },
    /// A task observed its cancellation token.
    Cancelled,

    PreviewOpened { result: Result<PathBuf, String> },
    ClipboardCopied,
    ClipboardFailed { error: String },
}
