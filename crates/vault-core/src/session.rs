//! Session ownership: sign-in, sign-out, restore and change subscriptions.
//!
//! [`SessionProvider`] is the single owner of the active session. Observers
//! hold a [`SessionWatcher`], which yields the current state as soon as it is
//! created and again after every change. Dropping the watcher unsubscribes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config::paths;
use crate::providers::identity::{IdentityClient, IdentityError};
use crate::storage;

/// An authenticated identity-provider user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// What observers see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup: the persisted session has not been checked yet.
    Restoring,
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            SessionState::Restoring | SessionState::SignedOut => None,
        }
    }
}

/// JSON file holding the last signed-in session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `${VAULT_HOME}/session.json`.
    pub fn default_location() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>> {
        let Some(contents) = storage::read_optional(&self.path)? else {
            return Ok(None);
        };
        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// # Errors
    /// Returns an error if the session cannot be serialized or written.
    pub fn save(&self, session: &Session) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        storage::write_private(&self.path, &contents)
    }

    /// # Errors
    /// Returns an error if an existing file cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        storage::remove_if_exists(&self.path)
    }
}

/// Subscription to session changes.
///
/// The first [`next`](Self::next) resolves immediately with the current
/// state; later calls wait for the next change.
pub struct SessionWatcher {
    rx: watch::Receiver<SessionState>,
}

impl SessionWatcher {
    /// Waits for the next state. Returns `None` once the provider is gone.
    pub async fn next(&mut self) -> Option<SessionState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Returns the pending state without waiting, if any.
    pub fn try_next(&mut self) -> Option<SessionState> {
        if self.rx.has_changed().unwrap_or(false) {
            Some(self.rx.borrow_and_update().clone())
        } else {
            None
        }
    }
}

/// Owner of the active session.
pub struct SessionProvider {
    identity: IdentityClient,
    store: SessionStore,
    state: watch::Sender<SessionState>,
}

impl SessionProvider {
    pub fn new(identity: IdentityClient, store: SessionStore) -> Self {
        let (state, _) = watch::channel(SessionState::Restoring);
        Self {
            identity,
            store,
            state,
        }
    }

    /// Registers an observer; the current state is delivered first.
    pub fn subscribe(&self) -> SessionWatcher {
        let mut rx = self.state.subscribe();
        rx.mark_changed();
        SessionWatcher { rx }
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Checks the persisted session against the identity provider.
    ///
    /// A stored session whose refresh succeeds becomes the active session.
    /// The file is deleted only when the provider rejects its token; when the
    /// provider cannot be reached it stays on disk for the next attempt.
    /// Either way the provider reports signed-out.
    pub async fn restore(&self) -> SessionState {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Discarding unreadable session: {e:#}");
                self.forget_stored();
                None
            }
        };

        let next = match stored {
            None => SessionState::SignedOut,
            Some(session) => match self.identity.refresh(&session).await {
                Ok(fresh) => {
                    self.persist(&fresh);
                    tracing::info!(user = %fresh.user_id, "session restored");
                    SessionState::SignedIn(fresh)
                }
                Err(IdentityError::InvalidCredential(code)) => {
                    tracing::info!("Stored session rejected ({code})");
                    self.forget_stored();
                    SessionState::SignedOut
                }
                Err(e) => {
                    tracing::warn!("Could not verify stored session, keeping it: {e}");
                    SessionState::SignedOut
                }
            },
        };

        self.state.send_replace(next.clone());
        next
    }

    /// Signs in with an identity/secret pair. Failures are reported once and not retried.
    ///
    /// # Errors
    /// Returns the identity provider's classification of the failure.
    pub async fn sign_in(&self, email: &str, secret: &str) -> Result<Session, IdentityError> {
        let session = self
            .identity
            .sign_in_with_password(email, secret)
            .await
            .inspect_err(|e| tracing::warn!("Sign-in failed: {e}"))?;
        self.activate(&session);
        Ok(session)
    }

    /// Creates the account and signs it in.
    ///
    /// # Errors
    /// Returns the identity provider's classification of the failure.
    pub async fn sign_up(&self, email: &str, secret: &str) -> Result<Session, IdentityError> {
        let session = self
            .identity
            .sign_up(email, secret)
            .await
            .inspect_err(|e| tracing::warn!("Sign-up failed: {e}"))?;
        self.activate(&session);
        Ok(session)
    }

    pub fn sign_out(&self) {
        self.forget_stored();
        self.state.send_replace(SessionState::SignedOut);
        tracing::info!("signed out");
    }

    fn activate(&self, session: &Session) {
        self.persist(session);
        tracing::info!(user = %session.user_id, "signed in");
        self.state
            .send_replace(SessionState::SignedIn(session.clone()));
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save(session) {
            tracing::warn!("Failed to persist session: {e:#}");
        }
    }

    fn forget_stored(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to remove stored session: {e:#}");
        }
    }
}
