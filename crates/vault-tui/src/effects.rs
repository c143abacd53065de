//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer never performs I/O.
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`; the
//! runtime calls `token.cancel()` on the provided token.

use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEffect {
    Quit,

    /// Check the persisted session with the identity provider.
    RestoreSession { task: TaskId },
    /// Sign in with the typed secret and the configured account.
    SignIn { task: TaskId, secret: String },
    /// Verify with the platform authenticator, then sign in with the cached secret.
    BiometricSignIn { task: TaskId },
    SignOut,

    /// Send a prompt to the generation provider.
    Generate { task: TaskId, prompt: String },

    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },

    /// Write markup as a standalone preview page and open it.
    OpenPreview { name: String, markup: String },
    CopyToClipboard { text: String },
}
