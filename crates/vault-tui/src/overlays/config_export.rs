//! Export view for the Tailwind config and custom CSS.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use vault_core::tokens;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay, render_separator};
use crate::effects::UiEffect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportSection {
    #[default]
    TailwindConfig,
    CustomCss,
}

impl ExportSection {
    fn label(self) -> &'static str {
        match self {
            ExportSection::TailwindConfig => "tailwind.config",
            ExportSection::CustomCss => "custom.css",
        }
    }

    fn toggle(self) -> Self {
        match self {
            ExportSection::TailwindConfig => ExportSection::CustomCss,
            ExportSection::CustomCss => ExportSection::TailwindConfig,
        }
    }

    pub fn contents(self) -> String {
        match self {
            ExportSection::TailwindConfig => tokens::tailwind_config_pretty(),
            ExportSection::CustomCss => tokens::CUSTOM_CSS.trim_matches('\n').to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigExportState {
    pub section: ExportSection,
    pub scroll: usize,
}

impl ConfigExportState {
    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                self.section = self.section.toggle();
                self.scroll = 0;
                OverlayUpdate::stay()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll += 1;
                OverlayUpdate::stay()
            }
            KeyCode::Char('c') => OverlayUpdate::stay().with_ui_effects(vec![
                UiEffect::CopyToClipboard {
                    text: self.section.contents(),
                },
            ]),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [
            InputHint::new("Tab", "switch"),
            InputHint::new("c", "copy"),
            InputHint::new("Esc", "close"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Export Config",
                border_color: Color::White,
                width: 72,
                height: area.height.saturating_sub(4),
                hints: &hints,
            },
        );

        let tabs: Vec<Span<'static>> = [ExportSection::TailwindConfig, ExportSection::CustomCss]
            .into_iter()
            .flat_map(|section| {
                let style = if section == self.section {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                [
                    Span::styled(format!(" {} ", section.label()), style),
                    Span::raw(" "),
                ]
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(tabs)),
            Rect::new(layout.body.x, layout.body.y, layout.body.width, 1),
        );
        render_separator(frame, layout.body, 1);

        let content = self.section.contents();
        let visible = layout.body.height.saturating_sub(2) as usize;
        let scroll = self
            .scroll
            .min(content.lines().count().saturating_sub(visible));
        let lines: Vec<Line<'static>> = content
            .lines()
            .skip(scroll)
            .take(visible)
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Gray))))
            .collect();
        frame.render_widget(
            Paragraph::new(lines),
            Rect::new(
                layout.body.x,
                layout.body.y + 2,
                layout.body.width,
                layout.body.height.saturating_sub(2),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn copy_targets_the_selected_section() {
        let mut state = ConfigExportState::default();
        let copy = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);

        let update = state.handle_key(copy);
        assert!(matches!(
            update.effects.as_slice(),
            [UiEffect::CopyToClipboard { text }] if text.contains("\"bg-primary\"")
        ));

        state.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        let update = state.handle_key(copy);
        assert!(matches!(
            update.effects.as_slice(),
            [UiEffect::CopyToClipboard { text }] if text.contains(".btn-titanium")
        ));
    }
}
