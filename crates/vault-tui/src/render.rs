//! Pure view functions.
//!
//! Everything here takes `&AppState`, draws to a ratatui `Frame`, and never
//! mutates state or returns effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;
use crate::features::login::render_login;
use crate::features::shell::{ShellState, render_loading, render_workspace};
use crate::overlays::OverlayExt;
use crate::state::{AppState, TuiState};

const STATUS_HEIGHT: u16 = 1;

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 6;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)])
        .split(area);

    let spinner = spinner_frame(state);
    match &state.shell {
        ShellState::Loading => render_loading(frame, chunks[0], spinner),
        ShellState::Locked(login) => {
            render_login(frame, chunks[0], login, &state.options.account, spinner);
        }
        ShellState::Unlocked(ws) => render_workspace(frame, chunks[0], ws, spinner),
    }

    render_status_line(state, frame, chunks[1]);
    app.overlay.render(frame, area);
}

fn spinner_frame(state: &TuiState) -> &'static str {
    SPINNER_FRAMES[(state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

fn render_status_line(state: &TuiState, frame: &mut Frame, area: Rect) {
    let width = area.width as usize;
    let line = if let Some(notice) = &state.notice {
        Line::from(Span::styled(
            truncate_with_ellipsis(&format!(" {notice}"), width),
            Style::default().fg(Color::Cyan),
        ))
    } else {
        let hint = match &state.shell {
            ShellState::Loading | ShellState::Locked(_) => " Ctrl+Q quit",
            ShellState::Unlocked(_) => {
                " ↑↓ navigate • Enter focus • Esc back • Ctrl+O sign out • Ctrl+Q quit"
            }
        };
        Line::from(Span::styled(
            truncate_with_ellipsis(hint, width),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
