use vault_core::registry::Registry;
use vault_core::session::Session;

use crate::features::library::LibraryState;
use crate::features::login::LoginState;
use crate::features::tokens::TokenStudioState;

/// What the shell shows, driven by the session state.
#[derive(Debug)]
pub enum ShellState {
    /// Waiting for the stored session to be checked.
    Loading,
    Locked(LoginState),
    Unlocked(Box<Workspace>),
}

impl ShellState {
    pub fn workspace_mut(&mut self) -> Option<&mut Workspace> {
        match self {
            ShellState::Unlocked(ws) => Some(ws),
            ShellState::Loading | ShellState::Locked(_) => None,
        }
    }

    pub fn login_mut(&mut self) -> Option<&mut LoginState> {
        match self {
            ShellState::Locked(login) => Some(login),
            ShellState::Loading | ShellState::Unlocked(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Projects,
    Designs,
    Tokens,
    Deployments,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Projects,
        View::Designs,
        View::Tokens,
        View::Deployments,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Projects => "Projects",
            View::Designs => "Designs",
            View::Tokens => "Tokens",
            View::Deployments => "Deployments",
        }
    }

    fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Projects => 1,
            View::Designs => 2,
            View::Tokens => 3,
            View::Deployments => 4,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Keyboard focus inside the workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Nav,
    Content,
}

/// Everything that lives only while signed in.
#[derive(Debug)]
pub struct Workspace {
    pub session: Session,
    pub view: View,
    pub focus: Focus,
    pub registry: Registry,
    pub library: LibraryState,
    pub tokens: TokenStudioState,
}

impl Workspace {
    pub fn new(session: Session, registry: Registry) -> Self {
        Self {
            session,
            view: View::default(),
            focus: Focus::default(),
            registry,
            library: LibraryState::default(),
            tokens: TokenStudioState::default(),
        }
    }
}
