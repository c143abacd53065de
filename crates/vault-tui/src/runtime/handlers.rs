//! Effect handlers.
//!
//! Pure async functions that perform the I/O behind an effect and return the
//! resulting `UiEvent`. The runtime spawns them and forwards the event to the
//! inbox. They never touch UI state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vault_core::auth::AuthFlow;
use vault_core::generation::Generator;
use vault_core::session::SessionProvider;

use crate::events::UiEvent;

pub async fn restore_session(provider: Arc<SessionProvider>) -> UiEvent {
    UiEvent::Session(provider.restore().await)
}

pub async fn manual_sign_in(auth: AuthFlow, secret: String) -> UiEvent {
    let result = auth.manual_sign_in(&secret).await.map(|_| ());
    UiEvent::LoginFinished { result }
}

pub async fn biometric_sign_in(auth: AuthFlow) -> UiEvent {
    let result = auth.biometric_sign_in().await.map(|_| ());
    UiEvent::LoginFinished { result }
}

pub async fn generate(
    generator: Generator,
    prompt: String,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let Some(cancel) = cancel else {
        return UiEvent::GenerationFinished {
            result: generator.generate(&prompt).await,
        };
    };
    tokio::select! {
        () = cancel.cancelled() => {
            tracing::info!("generation cancelled");
            UiEvent::Cancelled
        }
        result = generator.generate(&prompt) => UiEvent::GenerationFinished { result },
    }
}
