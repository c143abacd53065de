//! Source viewer for a stored design.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use crate::common::text::sanitize_for_display;
use crate::effects::UiEffect;

#[derive(Debug, Clone)]
pub struct SourceState {
    pub name: String,
    pub code: String,
    pub scroll: usize,
}

impl SourceState {
    pub fn new(name: String, code: String) -> Self {
        Self {
            name,
            code,
            scroll: 0,
        }
    }

    fn line_count(&self) -> usize {
        self.code.lines().count()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => OverlayUpdate::close(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.scroll + 1 < self.line_count() {
                    self.scroll += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char('c') => OverlayUpdate::stay().with_ui_effects(vec![
                UiEffect::CopyToClipboard {
                    text: self.code.clone(),
                },
            ]),
            KeyCode::Char('p') => OverlayUpdate::stay().with_ui_effects(vec![
                UiEffect::OpenPreview {
                    name: self.name.clone(),
                    markup: self.code.clone(),
                },
            ]),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [
            InputHint::new("c", "copy"),
            InputHint::new("p", "preview"),
            InputHint::new("↑↓", "scroll"),
            InputHint::new("Esc", "close"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: &self.name,
                border_color: Color::Cyan,
                width: area.width.saturating_sub(8),
                height: area.height.saturating_sub(4),
                hints: &hints,
            },
        );

        let lines: Vec<Line<'static>> = self
            .code
            .lines()
            .skip(self.scroll)
            .take(layout.body.height as usize)
            .map(|line| {
                Line::from(Span::styled(
                    sanitize_for_display(line),
                    Style::default().fg(Color::Gray),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), layout.body);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::overlays::OverlayTransition;

    #[test]
    fn copy_emits_clipboard_effect_with_full_source() {
        let mut state = SourceState::new("hero".into(), "<div>\n</div>".into());
        let update = state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert!(matches!(
            update.effects.as_slice(),
            [UiEffect::CopyToClipboard { text }] if text == "<div>\n</div>"
        ));
    }

    #[test]
    fn scroll_stops_at_last_line() {
        let mut state = SourceState::new("x".into(), "a\nb".into());
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        state.handle_key(down);
        state.handle_key(down);
        assert_eq!(state.scroll, 1);
    }
}
