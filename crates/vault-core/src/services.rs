//! Wiring of the long-lived services from a loaded [`Config`].

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::auth::AuthFlow;
use crate::biometric::PlatformAuthenticator;
use crate::config::Config;
use crate::credential_cache::CredentialCache;
use crate::generation::Generator;
use crate::providers::identity::{IdentityClient, IdentityEndpoints};
use crate::session::{SessionProvider, SessionStore};

/// Everything a front end needs to drive the vault.
#[derive(Clone)]
pub struct VaultServices {
    pub config: Config,
    pub session: Arc<SessionProvider>,
    pub auth: AuthFlow,
    pub generator: Generator,
}

impl VaultServices {
    /// Builds the services using the default `${VAULT_HOME}` locations.
    ///
    /// # Errors
    /// Returns an error if the identity endpoints cannot be resolved.
    pub fn from_config(config: Config) -> Result<Self> {
        let endpoints = IdentityEndpoints::from_env(&config.identity)
            .context("Identity provider is not configured")?;
        let session = Arc::new(SessionProvider::new(
            IdentityClient::new(endpoints),
            SessionStore::default_location(),
        ));

        let cache = CredentialCache::default_location();
        cache.warn_if_present();

        let auth = AuthFlow::new(
            Arc::clone(&session),
            cache,
            PlatformAuthenticator::from_config(&config.biometric),
            config.identity.account.clone(),
        );
        let generator = Generator::new(config.generation.clone());

        Ok(Self {
            config,
            session,
            auth,
            generator,
        })
    }
}
