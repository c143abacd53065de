//! Workspace key routing and navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Focus, View, Workspace};
use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::features::{library, tokens};
use crate::overlays::OverlayRequest;

pub fn handle_workspace_key(
    ws: &mut Workspace,
    tasks: &mut Tasks,
    seq: &mut TaskSeq,
    key: KeyEvent,
) -> (Vec<UiEffect>, Option<OverlayRequest>) {
    if key.code == KeyCode::Char('o') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return (vec![UiEffect::SignOut], None);
    }

    match ws.focus {
        Focus::Nav => (handle_nav_key(ws, tasks, key), None),
        Focus::Content => {
            let editing_color = ws.view == View::Tokens && ws.tokens.editing.is_some();
            if key.code == KeyCode::Esc && !editing_color {
                ws.focus = Focus::Nav;
                return (vec![], None);
            }
            match ws.view {
                View::Designs => {
                    library::handle_library_key(&mut ws.library, &mut ws.registry, seq, key)
                }
                View::Tokens => (vec![], tokens::handle_tokens_key(&mut ws.tokens, key)),
                View::Dashboard | View::Projects | View::Deployments => (vec![], None),
            }
        }
    }
}

fn handle_nav_key(ws: &mut Workspace, tasks: &mut Tasks, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            let view = ws.view.prev();
            navigate(ws, tasks, view)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let view = ws.view.next();
            navigate(ws, tasks, view)
        }
        KeyCode::Char(c) if ('1'..='5').contains(&c) => {
            let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
            navigate(ws, tasks, View::ALL[index])
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            ws.focus = Focus::Content;
            vec![]
        }
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => vec![],
    }
}

/// Switches the active view. Leaving Designs drops its transient state and
/// cancels a running generation.
pub fn navigate(ws: &mut Workspace, tasks: &mut Tasks, view: View) -> Vec<UiEffect> {
    if ws.view == view {
        return vec![];
    }
    let mut effects = Vec::new();
    if ws.view == View::Designs {
        if ws.library.pending.is_some() {
            effects.push(cancel_generation(tasks));
        }
        ws.library = library::LibraryState::default();
    }
    ws.view = view;
    effects
}

/// Forgets the running generation task and returns the effect cancelling it.
pub fn cancel_generation(tasks: &mut Tasks) -> UiEffect {
    let state = tasks.state_mut(TaskKind::Generate);
    let token = state.cancel.clone();
    state.clear();
    UiEffect::CancelTask {
        kind: TaskKind::Generate,
        token,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tokio_util::sync::CancellationToken;
    use vault_core::registry::Registry;
    use vault_core::session::Session;

    use super::*;
    use crate::common::TaskStarted;

    fn workspace() -> Workspace {
        let session = Session {
            user_id: "uid".into(),
            email: "owner@vault.local".into(),
            id_token: "id".into(),
            refresh_token: "refresh".into(),
            expires_at: None,
        };
        Workspace::new(session, Registry::seeded(Utc::now()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_jump_between_views() {
        let mut ws = workspace();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();

        handle_workspace_key(&mut ws, &mut tasks, &mut seq, key(KeyCode::Char('3')));
        assert_eq!(ws.view, View::Designs);
        handle_workspace_key(&mut ws, &mut tasks, &mut seq, key(KeyCode::Up));
        assert_eq!(ws.view, View::Projects);
    }

    #[test]
    fn leaving_designs_cancels_generation() {
        let mut ws = workspace();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        ws.view = View::Designs;
        ws.library.prompt = "a login button".into();
        let effects = library::submit_generation(&mut ws.library, &mut seq);
        let Some(UiEffect::Generate { task, .. }) = effects.first() else {
            panic!("expected generate effect");
        };
        let token = CancellationToken::new();
        tasks.generate.on_started(&TaskStarted {
            id: *task,
            cancel: Some(token.clone()),
        });

        let effects = navigate(&mut ws, &mut tasks, View::Tokens);

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask { kind: TaskKind::Generate, token: Some(_) }]
        ));
        assert!(!tasks.generate.is_running());
        assert!(ws.library.pending.is_none());
        assert!(ws.library.prompt.is_empty());
    }

    #[test]
    fn escape_returns_focus_to_nav() {
        let mut ws = workspace();
        let mut tasks = Tasks::default();
        let mut seq = TaskSeq::default();
        handle_workspace_key(&mut ws, &mut tasks, &mut seq, key(KeyCode::Enter));
        assert_eq!(ws.focus, Focus::Content);
        handle_workspace_key(&mut ws, &mut tasks, &mut seq, key(KeyCode::Esc));
        assert_eq!(ws.focus, Focus::Nav);
    }

    #[test]
    fn sign_out_shortcut() {
        let mut ws = workspace();
        let (effects, _) = handle_workspace_key(
            &mut ws,
            &mut Tasks::default(),
            &mut TaskSeq::default(),
            KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::SignOut]));
    }
}
