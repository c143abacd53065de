//! Designs view.

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use vault_core::design::{self, DesignRecord, DesignStatus};
use vault_core::registry::Registry;

use super::{LibraryFocus, LibraryState};
use crate::common::text::sanitize_for_display;
use crate::common::truncate_with_ellipsis;
use crate::overlays::render_utils::{InputHint, InputLine, hint_line, render_input_line};

const RESULT_PREVIEW_LINES: u16 = 6;

pub fn render_library(
    frame: &mut Frame,
    area: Rect,
    library: &LibraryState,
    registry: &Registry,
    spinner: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                        // search
            Constraint::Length(RESULT_PREVIEW_LINES + 5), // generator
            Constraint::Min(3),                           // records
        ])
        .split(area);

    render_input_line(
        frame,
        chunks[0],
        &InputLine {
            value: &library.search,
            placeholder: Some("Search designs..."),
            prompt: "⌕ ",
            text_color: Color::White,
            focused: library.focus == LibraryFocus::Search,
        },
    );

    render_generator(frame, chunks[1], library, spinner);
    render_records(frame, chunks[2], library, registry);
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_generator(frame: &mut Frame, area: Rect, library: &LibraryState, spinner: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(library.focus == LibraryFocus::Prompt))
        .title(" Generate Component ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    render_input_line(
        frame,
        Rect::new(inner.x, inner.y, inner.width, 1),
        &InputLine {
            value: &library.prompt,
            placeholder: Some("Describe a component..."),
            prompt: "> ",
            text_color: Color::White,
            focused: library.focus == LibraryFocus::Prompt,
        },
    );

    let status = if library.is_generating() {
        Line::from(Span::styled(
            format!("{spinner} Generating..."),
            Style::default().fg(Color::Yellow),
        ))
    } else if library.result.is_some() {
        hint_line(
            &[
                InputHint::new("Ctrl+S", "save to vault"),
                InputHint::new("Ctrl+P", "preview"),
            ],
            Color::White,
        )
    } else {
        Line::from(Span::styled(
            "Enter to generate",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(
        Paragraph::new(status),
        Rect::new(inner.x, inner.y + 1, inner.width, 1),
    );

    if let Some(markup) = &library.result {
        let width = inner.width as usize;
        let lines: Vec<Line<'static>> = markup
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(RESULT_PREVIEW_LINES as usize)
            .map(|line| {
                Line::from(Span::styled(
                    truncate_with_ellipsis(&sanitize_for_display(line), width),
                    Style::default().fg(Color::Gray),
                ))
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines),
            Rect::new(
                inner.x,
                inner.y + 3,
                inner.width,
                inner.height.saturating_sub(3),
            ),
        );
    }
}

fn status_style(status: DesignStatus) -> Style {
    match status {
        DesignStatus::Live => Style::default().fg(Color::Green),
        DesignStatus::Draft => Style::default().fg(Color::DarkGray),
        DesignStatus::Testing => Style::default().fg(Color::Yellow),
    }
}

fn record_line(record: &DesignRecord, selected: bool, width: usize) -> Line<'static> {
    let now = Utc::now();
    let project = design::project(&record.project_id).map_or("—", |p| p.name);
    let marker = if selected { "▸ " } else { "  " };
    let name_style = if selected {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let name_width = width.saturating_sub(48).max(12);
    let source = if record.has_code() { "</>" } else { "   " };

    Line::from(vec![
        Span::raw(marker),
        Span::styled(
            format!(
                "{:<name_width$}",
                truncate_with_ellipsis(&record.name, name_width)
            ),
            name_style,
        ),
        Span::styled(
            format!(" {:<10}", truncate_with_ellipsis(&record.category, 10)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" {:<13}", truncate_with_ellipsis(project, 13)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!(" {:<8}", record.status.label()), status_style(record.status)),
        Span::styled(
            format!(" {:>9}", design::relative_time(record.updated_at, now)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!(" {source}"), Style::default().fg(Color::Cyan)),
    ])
}

fn render_records(frame: &mut Frame, area: Rect, library: &LibraryState, registry: &Registry) {
    let focused = library.focus == LibraryFocus::Records;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused))
        .title(format!(" Registry ({}) ", registry.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height.saturating_sub(1) as usize;
    let offset = library.selected.saturating_sub(visible.saturating_sub(1));
    let width = inner.width as usize;

    let mut lines: Vec<Line<'static>> = registry
        .list()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, record)| record_line(record, focused && i == library.selected, width))
        .collect();
    if registry.is_empty() {
        lines.push(Line::from(Span::styled(
            "No designs yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines),
        Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1)),
    );

    if focused && inner.height > 0 {
        let hints = [
            InputHint::new("Enter", "preview"),
            InputHint::new("v", "source"),
            InputHint::new("c", "copy"),
        ];
        frame.render_widget(
            Paragraph::new(hint_line(&hints, Color::White)),
            Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
        );
    }
}
