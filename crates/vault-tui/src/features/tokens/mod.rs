//! Token studio: palette editing and config export.

mod render;
mod state;
mod update;

pub use render::render_tokens;
pub use state::TokenStudioState;
pub use update::handle_tokens_key;
