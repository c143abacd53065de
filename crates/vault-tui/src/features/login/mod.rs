//! Login screen shown while the session is signed out.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::LoginState;
pub use update::{handle_login_finished, handle_login_key, submit_biometric, submit_manual};
