//! Core of the i.AM Vault: configuration, identity session, login flow,
//! component generation and the design registry.

pub mod auth;
pub mod biometric;
pub mod config;
pub mod credential_cache;
pub mod design;
pub mod generation;
pub mod logging;
pub mod preview;
pub mod providers;
pub mod registry;
pub mod services;
pub mod session;
pub mod storage;
pub mod tokens;

pub use auth::{AuthFailure, AuthFlow, AuthPhase};
pub use config::Config;
pub use services::VaultServices;
pub use session::{Session, SessionProvider, SessionState, SessionWatcher};
