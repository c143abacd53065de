use vault_core::auth::AuthPhase;

/// Form state for the lock screen.
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    /// Typed secret; rendered masked.
    pub secret: String,
    pub phase: AuthPhase,
    /// Whether the biometric button is offered at all.
    pub biometric_available: bool,
}

impl LoginState {
    pub fn new(biometric_available: bool) -> Self {
        Self {
            biometric_available,
            ..Self::default()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }
}
