use vault_core::generation::GenerationPhase;

use crate::common::TaskId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LibraryFocus {
    #[default]
    Prompt,
    Search,
    Records,
}

impl LibraryFocus {
    pub fn next(self) -> Self {
        match self {
            LibraryFocus::Prompt => LibraryFocus::Search,
            LibraryFocus::Search => LibraryFocus::Records,
            LibraryFocus::Records => LibraryFocus::Prompt,
        }
    }
}

/// Transient state of the Designs view. Dropped when the view is left.
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    pub focus: LibraryFocus,
    pub prompt: String,
    /// Typed search text. Shown, never applied to the listing.
    pub search: String,
    pub phase: GenerationPhase,
    /// Generation task this view is waiting on.
    pub pending: Option<TaskId>,
    /// Last successful, unsaved generation.
    pub result: Option<String>,
    pub selected: usize,
}

impl LibraryState {
    pub fn is_generating(&self) -> bool {
        self.phase == GenerationPhase::Generating
    }

    /// Whether a completion for `id` should still be applied.
    pub fn expects(&self, id: TaskId) -> bool {
        self.pending == Some(id)
    }
}
