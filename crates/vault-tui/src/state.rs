//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── shell: ShellState      (loading / locked / unlocked workspace)
//! │   ├── options: ShellOptions  (fixed for the process)
//! │   ├── task_seq: TaskSeq      (async task id generator)
//! │   └── tasks: Tasks           (task lifecycle state)
//! └── overlay: Option<Overlay>   (modal overlays)
//! ```
//!
//! Overlays live next to `TuiState` so overlay handlers and the reducer can
//! borrow both at once.

use vault_core::VaultServices;

use crate::common::{TaskSeq, Tasks};
use crate::features::shell::ShellState;
use crate::overlays::Overlay;

pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(options: ShellOptions) -> Self {
        Self {
            tui: TuiState::new(options),
            overlay: None,
        }
    }
}

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Identity used for every sign-in.
    pub account: String,
    /// Result of the one-time platform authenticator query.
    pub biometric_available: bool,
    /// Start each workspace with the demo records.
    pub seed_examples: bool,
}

impl ShellOptions {
    pub fn from_services(services: &VaultServices) -> Self {
        Self {
            account: services.auth.account().to_string(),
            biometric_available: services.auth.biometric_available(),
            seed_examples: services.config.registry.seed_examples,
        }
    }
}

pub struct TuiState {
    pub should_quit: bool,
    pub shell: ShellState,
    pub options: ShellOptions,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub spinner_frame: usize,
    /// One-line feedback in the status bar, cleared on the next key.
    pub notice: Option<String>,
}

impl TuiState {
    pub fn new(options: ShellOptions) -> Self {
        Self {
            should_quit: false,
            shell: ShellState::Loading,
            options,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            notice: None,
        }
    }
}
