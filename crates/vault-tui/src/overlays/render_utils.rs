//! Shared drawing helpers for panels, hint rows and input lines.
//!
//! The shell is stark black and white: bright text, grey secondary text and
//! square borders. Colors outside this set only mark state (busy, error).

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::common::truncate_start_with_ellipsis;

pub const TEXT: Color = Color::White;
pub const MUTED: Color = Color::DarkGray;

/// Inverted label used for primary actions ("titanium" buttons).
pub fn button_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// A `width`×`height` box centered in `area`, shrunk to leave a margin.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Clears `rect`, draws a titled frame and returns the area inside it.
pub fn draw_panel(frame: &mut Frame, rect: Rect, title: &str, color: Color) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
    inner
}

pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

pub struct OverlayLayout {
    pub popup: Rect,
    pub body: Rect,
}

/// Draws a centered modal panel with its hint row on the bottom line.
pub fn render_overlay(frame: &mut Frame, area: Rect, config: &OverlayConfig<'_>) -> OverlayLayout {
    let popup = centered(area, config.width, config.height);
    let mut body = draw_panel(frame, popup, config.title, config.border_color);

    if let Some(last_row) = body.height.checked_sub(1)
        && !config.hints.is_empty()
    {
        let row = Rect { y: body.y + last_row, height: 1, ..body };
        frame.render_widget(
            Paragraph::new(hint_line(config.hints, config.border_color))
                .alignment(Alignment::Center),
            row,
        );
        body.height = last_row;
    }

    OverlayLayout { popup, body }
}

/// One key binding shown in a hint row.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// `key action · key action`, keys in `key_color`.
pub fn hint_line(hints: &[InputHint], key_color: Color) -> Line<'static> {
    let spans = hints
        .iter()
        .enumerate()
        .flat_map(|(i, hint)| {
            let sep = if i == 0 { "" } else { " · " };
            [
                Span::styled(sep, muted()),
                Span::styled(hint.key.to_string(), Style::default().fg(key_color)),
                Span::styled(format!(" {}", hint.action), muted()),
            ]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// A single-line text field: prompt, text, then a block cursor when focused.
pub struct InputLine<'a> {
    pub value: &'a str,
    pub placeholder: Option<&'a str>,
    pub prompt: &'a str,
    pub text_color: Color,
    pub focused: bool,
}

pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>) {
    let room = (area.width as usize).saturating_sub(input.prompt.chars().count() + 1);
    let cursor = Span::styled(
        if input.focused { "█" } else { " " },
        Style::default().fg(input.text_color),
    );

    let mut spans = vec![Span::styled(input.prompt.to_string(), muted())];
    match input.placeholder {
        Some(hint) if input.value.is_empty() => {
            spans.push(cursor);
            spans.push(Span::styled(truncate_start_with_ellipsis(hint, room), muted()));
        }
        _ => {
            spans.push(Span::styled(
                truncate_start_with_ellipsis(input.value, room),
                Style::default().fg(input.text_color),
            ));
            spans.push(cursor);
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Horizontal rule `offset` rows below the top of `area`.
pub fn render_separator(frame: &mut Frame, area: Rect, offset: u16) {
    if offset >= area.height {
        return;
    }
    let rule = Rect {
        y: area.y + offset,
        height: 1,
        ..area
    };
    frame.render_widget(
        Block::default()
            .borders(Borders::TOP)
            .border_style(muted()),
        rule,
    );
}
