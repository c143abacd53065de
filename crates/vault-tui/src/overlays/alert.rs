//! Blocking alert. Any confirming key dismisses it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};

#[derive(Debug, Clone)]
pub struct AlertState {
    pub title: String,
    pub message: String,
}

impl AlertState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("Enter", "ok")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: &self.title,
                border_color: Color::Red,
                width: 48,
                height: 7,
                hints: &hints,
            },
        );
        let body = Rect::new(
            layout.body.x + 1,
            layout.body.y + 1,
            layout.body.width.saturating_sub(2),
            layout.body.height.saturating_sub(1),
        );
        let text = Paragraph::new(Line::from(Span::styled(
            self.message.clone(),
            Style::default().fg(Color::White),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(text, body);
    }
}
