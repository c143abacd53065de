use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vault_core::tokens::PaletteSlot;

use super::TokenStudioState;
use crate::overlays::OverlayRequest;

const INVALID_COLOR_MESSAGE: &str = "Use a #rrggbb color.";

pub fn handle_tokens_key(studio: &mut TokenStudioState, key: KeyEvent) -> Option<OverlayRequest> {
    if let Some(buffer) = studio.editing.as_mut() {
        match key.code {
            KeyCode::Enter => {
                let input = buffer.clone();
                if studio.palette.set(studio.selected_slot(), &input) {
                    studio.editing = None;
                    studio.error = None;
                } else {
                    studio.error = Some(INVALID_COLOR_MESSAGE.to_string());
                }
            }
            KeyCode::Esc => {
                studio.editing = None;
                studio.error = None;
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.push(c);
            }
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            studio.tab = studio.tab.next();
            None
        }
        KeyCode::Char('x') => Some(OverlayRequest::ConfigExport),
        _ if studio.tab.is_locked() => None,
        KeyCode::Up | KeyCode::Char('k') => {
            studio.selected = studio.selected.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if studio.selected + 1 < PaletteSlot::ALL.len() {
                studio.selected += 1;
            }
            None
        }
        KeyCode::Enter => {
            studio.editing = Some(studio.palette.get(studio.selected_slot()).to_string());
            studio.error = None;
            None
        }
        _ => None,
    }
}
