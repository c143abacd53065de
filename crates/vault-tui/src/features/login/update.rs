//! Login form reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vault_core::auth::{AuthFailure, validate_secret};

use super::LoginState;
use crate::common::TaskSeq;
use crate::effects::UiEffect;

pub fn handle_login_key(login: &mut LoginState, seq: &mut TaskSeq, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => submit_manual(login, seq),
        KeyCode::Char('b') if ctrl => submit_biometric(login, seq),
        _ if login.is_busy() => vec![],
        KeyCode::Backspace => {
            login.secret.pop();
            vec![]
        }
        KeyCode::Esc => {
            login.secret.clear();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            login.secret.push(c);
            vec![]
        }
        _ => vec![],
    }
}

/// Submits the typed secret. Short secrets fail here without a provider call.
pub fn submit_manual(login: &mut LoginState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if login.is_busy() {
        return vec![];
    }
    if let Err(failure) = validate_secret(&login.secret) {
        login.phase.reject(&failure);
        return vec![];
    }
    if !login.phase.begin() {
        return vec![];
    }
    vec![UiEffect::SignIn {
        task: seq.next_id(),
        secret: login.secret.clone(),
    }]
}

pub fn submit_biometric(login: &mut LoginState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if !login.biometric_available || !login.phase.begin() {
        return vec![];
    }
    vec![UiEffect::BiometricSignIn {
        task: seq.next_id(),
    }]
}

pub fn handle_login_finished(login: &mut LoginState, result: &Result<(), AuthFailure>) {
    login.phase.finish(result.as_ref().map(|()| ()));
    if let Err(failure) = result {
        tracing::debug!("login attempt failed: {failure:?}");
    }
}
