use vault_core::tokens::{Palette, PaletteSlot, TokenTab};

#[derive(Debug, Clone, Default)]
pub struct TokenStudioState {
    pub tab: TokenTab,
    pub palette: Palette,
    /// Index into [`PaletteSlot::ALL`].
    pub selected: usize,
    /// Input buffer while a color is being edited.
    pub editing: Option<String>,
    pub error: Option<String>,
}

impl TokenStudioState {
    pub fn selected_slot(&self) -> PaletteSlot {
        PaletteSlot::ALL[self.selected.min(PaletteSlot::ALL.len() - 1)]
    }
}
