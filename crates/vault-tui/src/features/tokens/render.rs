//! Token studio view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use vault_core::tokens::{self, HexColor, PaletteSlot, TokenTab};

use super::TokenStudioState;
use crate::overlays::render_utils::{InputHint, hint_line};

fn swatch(color: HexColor) -> Span<'static> {
    Span::styled("      ", Style::default().bg(Color::Rgb(color.r, color.g, color.b)))
}

pub fn render_tokens(frame: &mut Frame, area: Rect, studio: &TokenStudioState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let tabs: Vec<Span<'static>> = TokenTab::ALL
        .into_iter()
        .flat_map(|tab| {
            let style = if tab == studio.tab {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [Span::styled(format!(" {} ", tab.label()), style), Span::raw(" ")]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(tabs)), chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    if studio.tab.is_locked() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Locked",
                Style::default().fg(Color::DarkGray),
            )))
            .block(Block::default().borders(Borders::ALL).title(" Editor ")),
            columns[0],
        );
    } else {
        render_palette_editor(frame, columns[0], studio);
    }
    render_theme_reference(frame, columns[1], studio);

    let hints = [
        InputHint::new("Tab", "tab"),
        InputHint::new("Enter", "edit"),
        InputHint::new("x", "view config"),
    ];
    frame.render_widget(Paragraph::new(hint_line(&hints, Color::White)), chunks[3]);
}

fn render_palette_editor(frame: &mut Frame, area: Rect, studio: &TokenStudioState) {
    let mut lines = Vec::new();
    for (i, slot) in PaletteSlot::ALL.into_iter().enumerate() {
        let selected = i == studio.selected;
        let value = match (&studio.editing, selected) {
            (Some(buffer), true) => format!("{buffer}█"),
            _ => studio.palette.get(slot).to_string(),
        };
        let marker = if selected { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{:<9}", slot.label()),
                Style::default().fg(Color::Gray),
            ),
            swatch(studio.palette.get(slot)),
            Span::raw(" "),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
    }
    if let Some(error) = &studio.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    // Preview card painted with the edited palette.
    let card_bg = Style::default().bg(Color::Rgb(
        studio.palette.surface.r,
        studio.palette.surface.g,
        studio.palette.surface.b,
    ));
    let accent = studio.palette.accent;
    let primary = studio.palette.primary;
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Preview card            ", card_bg)));
    lines.push(Line::from(vec![
        Span::styled("  ", card_bg),
        Span::styled(
            " ACTION ",
            Style::default()
                .fg(Color::Rgb(primary.r, primary.g, primary.b))
                .bg(Color::Rgb(accent.r, accent.g, accent.b))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("                ", card_bg),
    ]));

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Palette ")),
        area,
    );
}

fn render_theme_reference(frame: &mut Frame, area: Rect, studio: &TokenStudioState) {
    let lines: Vec<Line<'static>> = match studio.tab {
        TokenTab::Colors => tokens::THEME_COLORS
            .iter()
            .map(|(name, value)| {
                let mut spans = vec![Span::styled(
                    format!("{name:<17}"),
                    Style::default().fg(Color::Gray),
                )];
                if let Some(color) = HexColor::parse(value) {
                    spans.push(swatch(color));
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(
                    (*value).to_string(),
                    Style::default().fg(Color::DarkGray),
                ));
                Line::from(spans)
            })
            .collect(),
        TokenTab::Type => vec![
            Line::from(format!("sans  {}", tokens::SANS_FONTS.join(", "))),
            Line::from(format!("mono  {}", tokens::MONO_FONTS.join(", "))),
        ],
        TokenTab::Space => vec![Line::from(Span::styled(
            "Tailwind default spacing scale",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Theme ")),
        area,
    );
}
