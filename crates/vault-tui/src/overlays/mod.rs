//! Modal overlays.
//!
//! Overlays temporarily take over keyboard input. Each one owns its state,
//! key handler and render function.
//!
//! - `alert.rs`: blocking message (generation failures)
//! - `source.rs`: read-only view of a design's markup
//! - `config_export.rs`: Tailwind config and custom CSS export
//! - `render_utils.rs`: shared rendering helpers

pub mod alert;
pub mod config_export;
pub mod render_utils;
pub mod source;

pub use alert::AlertState;
pub use config_export::{ConfigExportState, ExportSection};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use source::SourceState;

use crate::effects::UiEffect;

// ============================================================================
// OverlayRequest / OverlayTransition / OverlayUpdate
// ============================================================================

/// Requests to open an overlay, returned by feature reducers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayRequest {
    Alert { title: String, message: String },
    Source { name: String, code: String },
    ConfigExport,
}

#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

// ============================================================================
// Overlay
// ============================================================================

#[derive(Debug)]
pub enum Overlay {
    Alert(AlertState),
    Source(SourceState),
    ConfigExport(ConfigExportState),
}

impl Overlay {
    pub fn open(request: OverlayRequest) -> Self {
        match request {
            OverlayRequest::Alert { title, message } => {
                Overlay::Alert(AlertState::new(title, message))
            }
            OverlayRequest::Source { name, code } => Overlay::Source(SourceState::new(name, code)),
            OverlayRequest::ConfigExport => Overlay::ConfigExport(ConfigExportState::default()),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Alert(a) => a.render(frame, area),
            Overlay::Source(s) => s.render(frame, area),
            Overlay::ConfigExport(c) => c.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Alert(a) => a.handle_key(key),
            Overlay::Source(s) => s.handle_key(key),
            Overlay::ConfigExport(c) => c.handle_key(key),
        }
    }
}

// ============================================================================
// OverlayExt - Extension trait for Option<Overlay>
// ============================================================================

pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(overlay) = self {
            overlay.render(frame, area);
        }
    }
}

/// Routes a key to the active overlay. Returns `None` when no overlay is open.
pub fn handle_overlay_key(overlay: &mut Option<Overlay>, key: KeyEvent) -> Option<OverlayUpdate> {
    overlay.as_mut().map(|o| o.handle_key(key))
}
