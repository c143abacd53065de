//! Platform verification gate in front of the credential cache.
//!
//! A successful verification only releases the locally cached secret; it
//! never authenticates against the identity provider by itself.

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use crate::config::BiometricConfig;

/// Environment variable carrying the hex-encoded challenge to the verifier.
pub const CHALLENGE_ENV: &str = "VAULT_CHALLENGE";

/// Exit status a verifier uses to report that nothing is enrolled.
const EXIT_NOT_ENROLLED: i32 = 2;

/// Challenge bytes handed to the platform verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge([u8; 32]);

impl Challenge {
    /// A fixed all-zero challenge. It carries no replay protection.
    pub const fn zeroed() -> Self {
        Self([0; 32])
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Evidence that the platform verified the user for a challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationProof {
    pub challenge: Challenge,
    pub authenticator: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BiometricError {
    /// No verifying credential is enrolled on this platform.
    NotEnrolled,
    /// The user declined, failed, or let the prompt time out.
    UserCancelled,
    /// The verifier could not be run at all.
    Platform(String),
}

impl fmt::Display for BiometricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiometricError::NotEnrolled => write!(f, "no verifying credential is enrolled"),
            BiometricError::UserCancelled => write!(f, "verification was cancelled"),
            BiometricError::Platform(msg) => write!(f, "platform verifier failed: {msg}"),
        }
    }
}

impl std::error::Error for BiometricError {}

/// Runs a local verifier program through `sh -c`.
#[derive(Debug, Clone)]
pub struct CommandAuthenticator {
    command: String,
    timeout: Duration,
}

impl CommandAuthenticator {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    /// True when the program named by the first word of the command can be found.
    fn is_available(&self) -> bool {
        let Some(program) = self.command.split_whitespace().next() else {
            return false;
        };
        if program.contains(std::path::MAIN_SEPARATOR) {
            return Path::new(program).is_file();
        }
        std::env::var_os("PATH").is_some_and(|path| {
            std::env::split_paths(&path).any(|dir| dir.join(program).is_file())
        })
    }

    async fn verify(&self, challenge: Challenge) -> Result<VerificationProof, BiometricError> {
        let child = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env(CHALLENGE_ENV, challenge.to_hex())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BiometricError::Platform(format!("failed to start verifier: {e}")))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => {
                result.map_err(|e| BiometricError::Platform(format!("verifier crashed: {e}")))?
            }
            Err(_) => {
                tracing::info!(
                    timeout_secs = self.timeout.as_secs(),
                    "biometric verifier timed out"
                );
                return Err(BiometricError::UserCancelled);
            }
        };

        match output.status.code() {
            Some(0) => Ok(VerificationProof {
                challenge,
                authenticator: self.command.clone(),
            }),
            Some(EXIT_NOT_ENROLLED) => Err(BiometricError::NotEnrolled),
            code => {
                tracing::debug!(
                    ?code,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "biometric verifier rejected"
                );
                Err(BiometricError::UserCancelled)
            }
        }
    }
}

/// The platform authenticator this process can use.
#[derive(Debug, Clone)]
pub enum PlatformAuthenticator {
    Unavailable,
    Command(CommandAuthenticator),
}

impl PlatformAuthenticator {
    pub fn from_config(config: &BiometricConfig) -> Self {
        match config.command.as_deref().map(str::trim) {
            Some(command) if !command.is_empty() => {
                Self::Command(CommandAuthenticator::new(command, config.timeout()))
            }
            _ => Self::Unavailable,
        }
    }

    /// Whether a verifying authenticator is present. Queried once per login screen.
    pub fn is_available(&self) -> bool {
        match self {
            PlatformAuthenticator::Unavailable => false,
            PlatformAuthenticator::Command(auth) => auth.is_available(),
        }
    }

    /// Runs one verification exchange.
    ///
    /// # Errors
    /// See [`BiometricError`].
    pub async fn verify(&self, challenge: Challenge) -> Result<VerificationProof, BiometricError> {
        match self {
            PlatformAuthenticator::Unavailable => Err(BiometricError::NotEnrolled),
            PlatformAuthenticator::Command(auth) => auth.verify(challenge).await,
        }
    }
}
