//! Shell chrome: loading screen, sidebar and the active view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::dashboard::render_dashboard;
use super::{Focus, View, Workspace};
use crate::common::truncate_with_ellipsis;
use crate::features::{library, tokens};

const SIDEBAR_WIDTH: u16 = 24;

pub fn render_loading(frame: &mut Frame, area: Rect, spinner: &str) {
    let y = area.y + area.height / 2;
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{spinner} Loading vault..."),
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 1),
    );
}

pub fn render_workspace(frame: &mut Frame, area: Rect, ws: &Workspace, spinner: &str) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);

    render_sidebar(frame, columns[0], ws);

    let focused = ws.focus == Focus::Content;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .title(format!(" {} ", ws.view.label()));
    let content = block.inner(columns[1]);
    frame.render_widget(block, columns[1]);

    match ws.view {
        View::Dashboard => render_dashboard(frame, content, &ws.registry),
        View::Designs => library::render_library(frame, content, &ws.library, &ws.registry, spinner),
        View::Tokens => tokens::render_tokens(frame, content, &ws.tokens),
        View::Projects | View::Deployments => render_offline(frame, content),
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, ws: &Workspace) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            " i.AM VAULT",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, view) in View::ALL.into_iter().enumerate() {
        let active = view == ws.view;
        let style = match (active, ws.focus) {
            (true, Focus::Nav) => Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            (true, Focus::Content) => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            (false, _) => Style::default().fg(Color::Gray),
        };
        let label = format!(" {} {:<width$}", i + 1, view.label(), width = inner.width as usize);
        lines.push(Line::from(Span::styled(label, style)));
    }
    frame.render_widget(Paragraph::new(lines), inner);

    if inner.height >= 3 {
        let footer = vec![
            Line::from(Span::styled(
                format!(
                    " {}",
                    truncate_with_ellipsis(&ws.session.email, inner.width.saturating_sub(1) as usize)
                ),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                " Ctrl+O sign out",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(footer),
            Rect::new(inner.x, inner.y + inner.height - 2, inner.width, 2),
        );
    }
}

fn render_offline(frame: &mut Frame, area: Rect) {
    let y = area.y + area.height / 2;
    let lines = vec![
        Line::from(Span::styled(
            "Module Offline",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "This module is not available yet.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y.saturating_sub(1), area.width, 2),
    );
}
