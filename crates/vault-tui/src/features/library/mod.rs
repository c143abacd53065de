//! Component vault: the design registry listing plus the generator panel.

mod render;
mod state;
mod update;

pub use render::render_library;
pub use state::{LibraryFocus, LibraryState};
pub use update::{handle_generation_finished, handle_library_key, save_result, submit_generation};
