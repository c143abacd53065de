//! Designs view reducer.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vault_core::design::{DesignRecord, NAME_PREFIX_CHARS};
use vault_core::generation::{GenerationError, GenerationPhase, is_submittable};
use vault_core::registry::Registry;

use super::{LibraryFocus, LibraryState};
use crate::common::TaskSeq;
use crate::effects::UiEffect;
use crate::overlays::OverlayRequest;

const GENERATION_ALERT_TITLE: &str = "Generation Failed";

pub fn handle_library_key(
    library: &mut LibraryState,
    registry: &mut Registry,
    seq: &mut TaskSeq,
    key: KeyEvent,
) -> (Vec<UiEffect>, Option<OverlayRequest>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab => {
            library.focus = library.focus.next();
            return (vec![], None);
        }
        KeyCode::Char('s') if ctrl => {
            save_result(library, registry);
            return (vec![], None);
        }
        KeyCode::Char('p') if ctrl => {
            let effects = library
                .result
                .as_ref()
                .map(|markup| UiEffect::OpenPreview {
                    name: preview_name(&library.prompt),
                    markup: markup.clone(),
                })
                .into_iter()
                .collect();
            return (effects, None);
        }
        _ => {}
    }

    match library.focus {
        LibraryFocus::Prompt => (handle_prompt_key(library, seq, key), None),
        LibraryFocus::Search => {
            match key.code {
                KeyCode::Backspace => {
                    library.search.pop();
                }
                KeyCode::Char(c) if !ctrl => library.search.push(c),
                _ => {}
            }
            (vec![], None)
        }
        LibraryFocus::Records => handle_records_key(library, registry, key),
    }
}

fn handle_prompt_key(library: &mut LibraryState, seq: &mut TaskSeq, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => submit_generation(library, seq),
        KeyCode::Backspace => {
            library.prompt.pop();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            library.prompt.push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_records_key(
    library: &mut LibraryState,
    registry: &Registry,
    key: KeyEvent,
) -> (Vec<UiEffect>, Option<OverlayRequest>) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            library.selected = library.selected.saturating_sub(1);
            (vec![], None)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if library.selected + 1 < registry.len() {
                library.selected += 1;
            }
            (vec![], None)
        }
        KeyCode::Enter | KeyCode::Char('p') => {
            let effects = selected_source(library, registry)
                .map(|(name, code)| UiEffect::OpenPreview { name, markup: code })
                .into_iter()
                .collect();
            (effects, None)
        }
        KeyCode::Char('v') => (
            vec![],
            selected_source(library, registry)
                .map(|(name, code)| OverlayRequest::Source { name, code }),
        ),
        KeyCode::Char('c') => {
            let effects = selected_source(library, registry)
                .map(|(_, text)| UiEffect::CopyToClipboard { text })
                .into_iter()
                .collect();
            (effects, None)
        }
        _ => (vec![], None),
    }
}

fn selected_source(library: &LibraryState, registry: &Registry) -> Option<(String, String)> {
    let record = registry.get(library.selected)?;
    let code = record.code.clone()?;
    Some((record.name.clone(), code))
}

fn preview_name(prompt: &str) -> String {
    let name: String = prompt.chars().take(NAME_PREFIX_CHARS).collect();
    if name.trim().is_empty() {
        "preview".to_string()
    } else {
        name
    }
}

/// Starts a generation. Blank prompts and submissions during a running
/// generation produce no effect and leave the state unchanged.
pub fn submit_generation(library: &mut LibraryState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if library.is_generating() || !is_submittable(&library.prompt) {
        return vec![];
    }
    let task = seq.next_id();
    library.phase = GenerationPhase::Generating;
    library.pending = Some(task);
    library.result = None;
    vec![UiEffect::Generate {
        task,
        prompt: library.prompt.clone(),
    }]
}

/// Applies a finished generation. Failures open the blocking alert.
pub fn handle_generation_finished(
    library: &mut LibraryState,
    result: Result<String, GenerationError>,
) -> Option<OverlayRequest> {
    library.pending = None;
    library.phase = GenerationPhase::Idle;
    match result {
        Ok(markup) => {
            library.result = Some(markup);
            None
        }
        Err(e) => Some(OverlayRequest::Alert {
            title: GENERATION_ALERT_TITLE.to_string(),
            message: e.user_message().to_string(),
        }),
    }
}

/// Commits the current result as a new record at the top of the registry.
pub fn save_result(library: &mut LibraryState, registry: &mut Registry) -> bool {
    let Some(markup) = library.result.take() else {
        return false;
    };
    registry.add(DesignRecord::from_generation(
        &library.prompt,
        markup,
        Utc::now(),
    ));
    library.prompt.clear();
    library.selected = 0;
    true
}

#[cfg(test)]
mod tests {
    use vault_core::generation::GENERATION_ALERT;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn library_with_prompt(prompt: &str) -> LibraryState {
        LibraryState {
            prompt: prompt.to_string(),
            ..LibraryState::default()
        }
    }

    #[test]
    fn blank_prompt_issues_nothing() {
        let mut library = library_with_prompt("   ");
        let mut seq = TaskSeq::default();
        let effects = submit_generation(&mut library, &mut seq);
        assert!(effects.is_empty());
        assert_eq!(library.phase, GenerationPhase::Idle);
        assert!(library.pending.is_none());
    }

    #[test]
    fn resubmit_while_generating_is_refused() {
        let mut library = library_with_prompt("a login button");
        let mut seq = TaskSeq::default();
        assert_eq!(submit_generation(&mut library, &mut seq).len(), 1);
        assert!(submit_generation(&mut library, &mut seq).is_empty());
        assert!(library.is_generating());
    }

    #[test]
    fn success_returns_to_idle_with_result() {
        let mut library = library_with_prompt("a login button");
        let mut seq = TaskSeq::default();
        submit_generation(&mut library, &mut seq);

        let alert = handle_generation_finished(&mut library, Ok("<button>OK</button>".into()));
        assert!(alert.is_none());
        assert_eq!(library.phase, GenerationPhase::Idle);
        assert_eq!(library.result.as_deref(), Some("<button>OK</button>"));
    }

    #[test]
    fn failure_returns_to_idle_with_alert() {
        let mut library = library_with_prompt("a login button");
        let mut seq = TaskSeq::default();
        submit_generation(&mut library, &mut seq);

        let alert = handle_generation_finished(
            &mut library,
            Err(GenerationError::Configuration("missing key".into())),
        );
        assert_eq!(
            alert,
            Some(OverlayRequest::Alert {
                title: GENERATION_ALERT_TITLE.to_string(),
                message: GENERATION_ALERT.to_string(),
            })
        );
        assert_eq!(library.phase, GenerationPhase::Idle);
        assert!(library.result.is_none());
    }

    #[test]
    fn save_prepends_and_clears_transient_state() {
        let mut registry = Registry::seeded(Utc::now());
        let before: Vec<_> = registry.list().cloned().collect();
        let mut library = LibraryState {
            prompt: "a login button".into(),
            result: Some("<button>OK</button>".into()),
            selected: 2,
            ..LibraryState::default()
        };
        let mut seq = TaskSeq::default();

        handle_library_key(&mut library, &mut registry, &mut seq, ctrl('s'));

        assert_eq!(registry.len(), before.len() + 1);
        let saved = registry.get(0).cloned();
        assert_eq!(saved.as_ref().map(|r| r.name.as_str()), Some("a login button"));
        assert_eq!(
            saved.and_then(|r| r.code),
            Some("<button>OK</button>".to_string())
        );
        let rest: Vec<_> = registry.list().skip(1).cloned().collect();
        assert_eq!(rest, before);
        assert!(library.prompt.is_empty());
        assert!(library.result.is_none());
        assert_eq!(library.selected, 0);
    }

    #[test]
    fn save_without_result_does_nothing() {
        let mut registry = Registry::new();
        let mut library = library_with_prompt("x");
        assert!(!save_result(&mut library, &mut registry));
        assert!(registry.is_empty());
        assert_eq!(library.prompt, "x");
    }

    #[test]
    fn search_text_does_not_filter_records() {
        let mut registry = Registry::seeded(Utc::now());
        let mut library = LibraryState {
            focus: LibraryFocus::Search,
            ..LibraryState::default()
        };
        let mut seq = TaskSeq::default();
        for c in "zzz".chars() {
            handle_library_key(&mut library, &mut registry, &mut seq, key(KeyCode::Char(c)));
        }
        assert_eq!(library.search, "zzz");
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn records_without_source_offer_nothing() {
        let mut registry = Registry::seeded(Utc::now());
        let mut library = LibraryState {
            focus: LibraryFocus::Records,
            ..LibraryState::default()
        };
        let mut seq = TaskSeq::default();
        let (effects, request) =
            handle_library_key(&mut library, &mut registry, &mut seq, key(KeyCode::Char('v')));
        assert!(effects.is_empty());
        assert!(request.is_none());
    }
}
