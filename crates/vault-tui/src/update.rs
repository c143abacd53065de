//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use vault_core::registry::Registry;
use vault_core::session::SessionState;

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::library::{self, LibraryFocus};
use crate::features::login::{self, LoginState};
use crate::features::shell::{self, Focus, ShellState, View, Workspace};
use crate::overlays::{self, Overlay, OverlayRequest};
use crate::state::AppState;

const COPIED_NOTICE: &str = "Copied to clipboard";

/// Effects to run once before the first event: check the stored session.
pub fn start(app: &mut AppState) -> Vec<UiEffect> {
    vec![UiEffect::RestoreSession {
        task: app.tui.task_seq.next_id(),
    }]
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Session(state) => handle_session_change(app, state),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            if kind == TaskKind::Generate {
                let expected = match &app.tui.shell {
                    ShellState::Unlocked(ws) => ws.library.expects(started.id),
                    ShellState::Loading | ShellState::Locked(_) => false,
                };
                if !expected {
                    // The view that asked for it is gone.
                    return vec![shell::cancel_generation(&mut app.tui.tasks)];
                }
            }
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::LoginFinished { result } => {
            if let Some(login) = app.tui.shell.login_mut() {
                login::handle_login_finished(login, &result);
            }
            vec![]
        }
        UiEvent::GenerationFinished { result } => {
            let request = app
                .tui
                .shell
                .workspace_mut()
                .filter(|ws| ws.library.pending.is_some())
                .and_then(|ws| library::handle_generation_finished(&mut ws.library, result));
            if let Some(request) = request {
                open_overlay_request(app, request);
            }
            vec![]
        }
        UiEvent::Cancelled => vec![],
        UiEvent::PreviewOpened { result } => {
            app.tui.notice = Some(match result {
                Ok(path) => format!("Preview written to {}", path.display()),
                Err(error) => format!("Preview failed: {error}"),
            });
            vec![]
        }
        UiEvent::ClipboardCopied => {
            app.tui.notice = Some(COPIED_NOTICE.to_string());
            vec![]
        }
        UiEvent::ClipboardFailed { error } => {
            app.tui.notice = Some(error);
            vec![]
        }
    }
}

// ============================================================================
// Session
// ============================================================================

fn handle_session_change(app: &mut AppState, state: SessionState) -> Vec<UiEffect> {
    match state {
        SessionState::Restoring => vec![],
        SessionState::SignedIn(session) => {
            if let ShellState::Unlocked(ws) = &mut app.tui.shell {
                ws.session = session;
                return vec![];
            }
            let registry = if app.tui.options.seed_examples {
                Registry::seeded(Utc::now())
            } else {
                Registry::new()
            };
            app.tui.shell = ShellState::Unlocked(Box::new(Workspace::new(session, registry)));
            app.overlay = None;
            vec![]
        }
        SessionState::SignedOut => {
            if matches!(app.tui.shell, ShellState::Locked(_)) {
                return vec![];
            }
            let mut effects = Vec::new();
            if app.tui.tasks.state(TaskKind::Generate).is_running() {
                effects.push(shell::cancel_generation(&mut app.tui.tasks));
            }
            // Dropping the workspace discards the registry.
            app.tui.shell = ShellState::Locked(LoginState::new(app.tui.options.biometric_available));
            app.overlay = None;
            effects
        }
    }
}

// ============================================================================
// Overlays
// ============================================================================

fn apply_overlay_update(app: &mut AppState, update: overlays::OverlayUpdate) -> Vec<UiEffect> {
    match update.transition {
        overlays::OverlayTransition::Stay => {}
        overlays::OverlayTransition::Close => app.overlay = None,
    }
    update.effects
}

fn open_overlay_request(app: &mut AppState, request: OverlayRequest) {
    app.overlay = Some(Overlay::open(request));
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q' | 'c')) {
        return vec![UiEffect::Quit];
    }
    app.tui.notice = None;

    if let Some(update) = overlays::handle_overlay_key(&mut app.overlay, key) {
        return apply_overlay_update(app, update);
    }

    let tui = &mut app.tui;
    let (effects, request) = match &mut tui.shell {
        ShellState::Loading => (vec![], None),
        ShellState::Locked(login) => (
            login::handle_login_key(login, &mut tui.task_seq, key),
            None,
        ),
        ShellState::Unlocked(ws) => {
            shell::handle_workspace_key(ws, &mut tui.tasks, &mut tui.task_seq, key)
        }
    };
    if let Some(request) = request {
        open_overlay_request(app, request);
    }
    effects
}

/// Pasted text goes to whichever text field has focus. Line breaks are dropped.
fn handle_paste(app: &mut AppState, text: &str) {
    if app.overlay.is_some() {
        return;
    }
    let text: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
    match &mut app.tui.shell {
        ShellState::Locked(login) if !login.is_busy() => login.secret.push_str(&text),
        ShellState::Unlocked(ws) if ws.view == View::Designs && ws.focus == Focus::Content => {
            match ws.library.focus {
                LibraryFocus::Prompt => ws.library.prompt.push_str(&text),
                LibraryFocus::Search => ws.library.search.push_str(&text),
                LibraryFocus::Records => {}
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use vault_core::auth::{AuthPhase, INVALID_PASSWORD_MESSAGE};
    use vault_core::generation::{GENERATION_ALERT, GenerationError, GenerationPhase};
    use vault_core::providers::identity::IdentityError;
    use vault_core::session::Session;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};
    use crate::state::ShellOptions;

    fn app() -> AppState {
        AppState::new(ShellOptions {
            account: "owner@vault.local".to_string(),
            biometric_available: false,
            seed_examples: true,
        })
    }

    fn session() -> Session {
        Session {
            user_id: "uid-1".into(),
            email: "owner@vault.local".into(),
            id_token: "id".into(),
            refresh_token: "refresh".into(),
            expires_at: None,
        }
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn press_ctrl(app: &mut AppState, c: char) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::CONTROL,
            ))),
        )
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn workspace(app: &AppState) -> &Workspace {
        match &app.tui.shell {
            ShellState::Unlocked(ws) => ws,
            other => panic!("expected workspace, got {other:?}"),
        }
    }

    fn signed_in_app() -> AppState {
        let mut app = app();
        update(&mut app, UiEvent::Session(SessionState::SignedIn(session())));
        app
    }

    /// Opens the Designs view with the prompt field focused.
    fn open_designs(app: &mut AppState) {
        press(app, KeyCode::Char('3'));
        press(app, KeyCode::Enter);
    }

    fn start_generation(app: &mut AppState, prompt: &str) -> TaskId {
        type_text(app, prompt);
        let effects = press(app, KeyCode::Enter);
        let [UiEffect::Generate { task, .. }] = effects.as_slice() else {
            panic!("expected a single generate effect, got {effects:?}");
        };
        let task = *task;
        update(
            app,
            UiEvent::TaskStarted {
                kind: TaskKind::Generate,
                started: TaskStarted {
                    id: task,
                    cancel: Some(tokio_util::sync::CancellationToken::new()),
                },
            },
        );
        task
    }

    fn complete(app: &mut AppState, kind: TaskKind, id: TaskId, result: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(result),
                },
            },
        )
    }

    #[test]
    fn startup_restores_then_locks_when_signed_out() {
        let mut app = app();
        let effects = start(&mut app);
        assert!(matches!(effects.as_slice(), [UiEffect::RestoreSession { .. }]));
        assert!(matches!(app.tui.shell, ShellState::Loading));

        update(&mut app, UiEvent::Session(SessionState::Restoring));
        assert!(matches!(app.tui.shell, ShellState::Loading));

        update(&mut app, UiEvent::Session(SessionState::SignedOut));
        let ShellState::Locked(login) = &app.tui.shell else {
            panic!("expected login screen");
        };
        assert!(!login.biometric_available);
    }

    #[test]
    fn signed_in_shows_seeded_workspace() {
        let app = signed_in_app();
        let ws = workspace(&app);
        assert_eq!(ws.view, View::Dashboard);
        assert_eq!(ws.registry.len(), 4);
    }

    #[test]
    fn manual_login_failure_shows_generic_message() {
        let mut app = app();
        update(&mut app, UiEvent::Session(SessionState::SignedOut));
        type_text(&mut app, "wrong-password");
        let effects = press(&mut app, KeyCode::Enter);
        let [UiEffect::SignIn { task, secret }] = effects.as_slice() else {
            panic!("expected sign-in effect");
        };
        assert_eq!(secret, "wrong-password");
        let task = *task;
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Login,
                started: TaskStarted {
                    id: task,
                    cancel: None,
                },
            },
        );

        complete(
            &mut app,
            TaskKind::Login,
            task,
            UiEvent::LoginFinished {
                result: Err(vault_core::auth::AuthFailure::Rejected(
                    IdentityError::InvalidCredential("INVALID_PASSWORD".into()),
                )),
            },
        );

        let ShellState::Locked(login) = &app.tui.shell else {
            panic!("expected login screen");
        };
        assert_eq!(
            login.phase,
            AuthPhase::Failed(INVALID_PASSWORD_MESSAGE.to_string())
        );
    }

    #[test]
    fn generation_save_prepends_record_with_stripped_markup() {
        let mut app = signed_in_app();
        open_designs(&mut app);
        let task = start_generation(&mut app, "a login button");
        assert_eq!(workspace(&app).library.phase, GenerationPhase::Generating);

        // Re-submitting while generating is refused.
        assert!(press(&mut app, KeyCode::Enter).is_empty());

        complete(
            &mut app,
            TaskKind::Generate,
            task,
            UiEvent::GenerationFinished {
                result: Ok("<button>OK</button>".to_string()),
            },
        );
        assert_eq!(workspace(&app).library.phase, GenerationPhase::Idle);

        press_ctrl(&mut app, 's');

        let ws = workspace(&app);
        assert_eq!(ws.registry.len(), 5);
        let saved = ws.registry.get(0).cloned();
        assert_eq!(
            saved.as_ref().map(|r| r.name.as_str()),
            Some("a login button")
        );
        assert_eq!(
            saved.and_then(|r| r.code).as_deref(),
            Some("<button>OK</button>")
        );
        assert!(ws.library.prompt.is_empty());
        assert!(ws.library.result.is_none());
    }

    #[test]
    fn generation_failure_opens_alert_and_returns_to_idle() {
        let mut app = signed_in_app();
        open_designs(&mut app);
        let task = start_generation(&mut app, "hero");

        complete(
            &mut app,
            TaskKind::Generate,
            task,
            UiEvent::GenerationFinished {
                result: Err(GenerationError::Provider("500".into())),
            },
        );

        assert!(matches!(
            &app.overlay,
            Some(Overlay::Alert(alert)) if alert.message == GENERATION_ALERT
        ));
        assert_eq!(workspace(&app).library.phase, GenerationPhase::Idle);
        assert!(workspace(&app).library.result.is_none());

        press(&mut app, KeyCode::Enter);
        assert!(app.overlay.is_none());
    }

    #[test]
    fn empty_prompt_submits_nothing() {
        let mut app = signed_in_app();
        open_designs(&mut app);
        type_text(&mut app, "   ");
        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert_eq!(workspace(&app).library.phase, GenerationPhase::Idle);
    }

    #[test]
    fn late_result_after_navigation_is_discarded() {
        let mut app = signed_in_app();
        open_designs(&mut app);
        let task = start_generation(&mut app, "hero");

        press(&mut app, KeyCode::Esc);
        let effects = press(&mut app, KeyCode::Char('4'));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask {
                kind: TaskKind::Generate,
                token: Some(_)
            }]
        ));

        complete(
            &mut app,
            TaskKind::Generate,
            task,
            UiEvent::GenerationFinished {
                result: Ok("<div/>".into()),
            },
        );
        assert!(workspace(&app).library.result.is_none());
        assert!(app.overlay.is_none());
    }

    #[test]
    fn start_for_abandoned_generation_is_cancelled() {
        let mut app = signed_in_app();
        let effects = update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Generate,
                started: TaskStarted {
                    id: TaskId(42),
                    cancel: Some(tokio_util::sync::CancellationToken::new()),
                },
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask {
                kind: TaskKind::Generate,
                ..
            }]
        ));
        assert!(!app.tui.tasks.generate.is_running());
    }

    #[test]
    fn sign_out_discards_workspace_and_cancels_generation() {
        let mut app = signed_in_app();
        open_designs(&mut app);
        let task = start_generation(&mut app, "hero");
        complete(
            &mut app,
            TaskKind::Generate,
            task,
            UiEvent::GenerationFinished {
                result: Ok("<div/>".into()),
            },
        );
        press_ctrl(&mut app, 's');
        assert_eq!(workspace(&app).registry.len(), 5);

        start_generation(&mut app, "another");
        let effects = press_ctrl(&mut app, 'o');
        assert!(matches!(effects.as_slice(), [UiEffect::SignOut]));

        let effects = update(&mut app, UiEvent::Session(SessionState::SignedOut));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask {
                kind: TaskKind::Generate,
                ..
            }]
        ));
        assert!(matches!(app.tui.shell, ShellState::Locked(_)));

        update(&mut app, UiEvent::Session(SessionState::SignedIn(session())));
        assert_eq!(workspace(&app).registry.len(), 4);
    }

    #[test]
    fn quit_shortcut() {
        let mut app = app();
        assert!(matches!(
            press_ctrl(&mut app, 'q').as_slice(),
            [UiEffect::Quit]
        ));
    }

    #[test]
    fn paste_fills_prompt_without_newlines() {
        let mut app = signed_in_app();
        open_designs(&mut app);
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("pricing\ntable".into())),
        );
        assert_eq!(workspace(&app).library.prompt, "pricingtable");
    }
}
