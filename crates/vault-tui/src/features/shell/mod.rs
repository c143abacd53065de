//! Signed-in shell: sidebar navigation and the active view.

mod dashboard;
mod render;
mod state;
mod update;

pub use render::{render_loading, render_workspace};
pub use state::{Focus, ShellState, View, Workspace};
pub use update::{cancel_generation, handle_workspace_key, navigate};
