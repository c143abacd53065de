//! Remote services the vault talks to.

pub mod gemini;
pub mod identity;
pub mod shared;

pub use shared::{
    ProviderError, ProviderErrorKind, ProviderResult, USER_AGENT, classify_reqwest_error,
    resolve_api_key, resolve_base_url,
};
