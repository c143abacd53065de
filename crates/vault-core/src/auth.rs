//! Login interaction: manual password entry and the biometric unlock.

use std::fmt;
use std::sync::Arc;

use crate::biometric::{Challenge, PlatformAuthenticator};
use crate::credential_cache::CredentialCache;
use crate::providers::identity::IdentityError;
use crate::session::{Session, SessionProvider};

/// Shortest secret accepted before any provider call.
pub const MIN_SECRET_LEN: usize = 6;

pub const INVALID_PASSWORD_MESSAGE: &str =
    "Invalid password. This vault is for authorized access only.";
pub const SECRET_TOO_SHORT_MESSAGE: &str = "Password must be at least 6 characters.";
pub const BIOMETRIC_SETUP_MESSAGE: &str = "Set up password authentication first";
pub const BIOMETRIC_FALLBACK_MESSAGE: &str = "Biometric auth not set up. Use password below.";

/// Where a login attempt currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Idle,
    Authenticating,
    Authenticated,
    Failed(String),
}

impl AuthPhase {
    /// Starts an attempt. Returns false if one is running or already succeeded.
    pub fn begin(&mut self) -> bool {
        match self {
            AuthPhase::Idle | AuthPhase::Failed(_) => {
                *self = AuthPhase::Authenticating;
                true
            }
            AuthPhase::Authenticating | AuthPhase::Authenticated => false,
        }
    }

    /// Records the outcome of the running attempt.
    pub fn finish(&mut self, outcome: Result<(), &AuthFailure>) {
        if *self != AuthPhase::Authenticating {
            return;
        }
        *self = match outcome {
            Ok(()) => AuthPhase::Authenticated,
            Err(failure) => AuthPhase::Failed(failure.user_message().to_string()),
        };
    }

    /// Rejects a submission without starting an attempt.
    pub fn reject(&mut self, failure: &AuthFailure) {
        if *self != AuthPhase::Authenticating {
            *self = AuthPhase::Failed(failure.user_message().to_string());
        }
    }

    pub fn is_busy(&self) -> bool {
        *self == AuthPhase::Authenticating
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthPhase::Failed(message) => Some(message),
            AuthPhase::Idle | AuthPhase::Authenticating | AuthPhase::Authenticated => None,
        }
    }
}

/// Why a login attempt did not produce a session.
#[derive(Debug, Clone)]
pub enum AuthFailure {
    SecretTooShort,
    /// Manual path: the identity provider refused or could not be reached.
    Rejected(IdentityError),
    /// Biometric path: nothing has been cached by a manual sign-in yet.
    NoCachedSecret,
    /// Biometric path: verification or the follow-up sign-in failed.
    BiometricFallback(String),
}

impl AuthFailure {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthFailure::SecretTooShort => SECRET_TOO_SHORT_MESSAGE,
            AuthFailure::Rejected(_) => INVALID_PASSWORD_MESSAGE,
            AuthFailure::NoCachedSecret => BIOMETRIC_SETUP_MESSAGE,
            AuthFailure::BiometricFallback(_) => BIOMETRIC_FALLBACK_MESSAGE,
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for AuthFailure {}

/// Checks the client-side secret rule.
///
/// # Errors
/// Returns [`AuthFailure::SecretTooShort`] below [`MIN_SECRET_LEN`] characters.
pub fn validate_secret(secret: &str) -> Result<(), AuthFailure> {
    if secret.chars().count() < MIN_SECRET_LEN {
        return Err(AuthFailure::SecretTooShort);
    }
    Ok(())
}

/// Combines the session provider, credential cache and platform authenticator
/// into the two login paths.
#[derive(Clone)]
pub struct AuthFlow {
    provider: Arc<SessionProvider>,
    cache: CredentialCache,
    authenticator: PlatformAuthenticator,
    account: String,
}

impl AuthFlow {
    pub fn new(
        provider: Arc<SessionProvider>,
        cache: CredentialCache,
        authenticator: PlatformAuthenticator,
        account: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            cache,
            authenticator,
            account: account.into(),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn biometric_available(&self) -> bool {
        self.authenticator.is_available()
    }

    /// Signs in with a typed secret and caches it on success.
    ///
    /// # Errors
    /// [`AuthFailure::SecretTooShort`] without contacting the provider, or
    /// [`AuthFailure::Rejected`] for any provider failure.
    pub async fn manual_sign_in(&self, secret: &str) -> Result<Session, AuthFailure> {
        validate_secret(secret)?;

        let session = self
            .provider
            .sign_in(&self.account, secret)
            .await
            .map_err(AuthFailure::Rejected)?;

        if let Err(e) = self.cache.store(secret) {
            tracing::warn!("Failed to update credential cache: {e:#}");
        }
        Ok(session)
    }

    /// Verifies with the platform, then signs in with the cached secret.
    ///
    /// The cache is read before the platform is contacted and is never
    /// rewritten on this path.
    ///
    /// # Errors
    /// [`AuthFailure::NoCachedSecret`] when nothing is cached, otherwise
    /// [`AuthFailure::BiometricFallback`] for any failure.
    pub async fn biometric_sign_in(&self) -> Result<Session, AuthFailure> {
        let secret = match self.cache.load() {
            Ok(Some(secret)) => secret,
            Ok(None) => return Err(AuthFailure::NoCachedSecret),
            Err(e) => {
                tracing::warn!("Credential cache unreadable: {e:#}");
                return Err(AuthFailure::NoCachedSecret);
            }
        };

        let proof = self
            .authenticator
            .verify(Challenge::zeroed())
            .await
            .map_err(|e| {
                tracing::info!("Biometric verification failed: {e}");
                AuthFailure::BiometricFallback(e.to_string())
            })?;
        tracing::debug!(authenticator = %proof.authenticator, "biometric verification passed");

        self.provider
            .sign_in(&self.account, &secret)
            .await
            .map_err(|e| AuthFailure::BiometricFallback(e.to_string()))
    }
}
