//! Lock screen view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::LoginState;
use crate::common::mask;
use crate::overlays::render_utils::{
    InputHint, InputLine, button_style, centered, draw_panel, hint_line, muted,
    render_input_line,
};

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 13;

pub fn render_login(
    frame: &mut Frame,
    area: Rect,
    login: &LoginState,
    account: &str,
    spinner: &str,
) {
    let card = centered(area, CARD_WIDTH, CARD_HEIGHT);
    let panel = draw_panel(frame, card, "i.AM VAULT", Color::White);
    let inner = Rect::new(
        panel.x + 1,
        panel.y,
        panel.width.saturating_sub(2),
        panel.height,
    );
    let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);

    let header = vec![
        Line::from(Span::styled("Authorized access only", muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Account  ", muted()),
            Span::styled(account.to_string(), Style::default().fg(Color::White)),
        ]),
    ];
    frame.render_widget(Paragraph::new(header), Rect::new(inner.x, inner.y, inner.width, 3));

    let masked = mask(&login.secret);
    render_input_line(
        frame,
        row(4),
        &InputLine {
            value: &masked,
            placeholder: Some("Password"),
            prompt: "> ",
            text_color: Color::White,
            focused: !login.is_busy(),
        },
    );

    let status = if login.is_busy() {
        Line::from(Span::styled(
            format!("{spinner} Authenticating..."),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = login.phase.error() {
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(status), row(6));

    let unlock = Span::styled("[ UNLOCK VAULT ]", button_style());
    frame.render_widget(
        Paragraph::new(Line::from(unlock)).alignment(Alignment::Center),
        row(8),
    );

    let mut hints = vec![InputHint::new("Enter", "unlock")];
    if login.biometric_available {
        hints.push(InputHint::new("Ctrl+B", "biometric"));
    }
    hints.push(InputHint::new("Ctrl+Q", "quit"));
    frame.render_widget(
        Paragraph::new(hint_line(&hints, Color::White)).alignment(Alignment::Center),
        row(inner.height.saturating_sub(1)),
    );
}
