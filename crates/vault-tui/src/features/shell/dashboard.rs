//! Overview counters and recent activity.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use vault_core::design::{self, PROJECTS};
use vault_core::registry::Registry;

use crate::common::truncate_with_ellipsis;

const RECENT_ACTIVITY_LIMIT: usize = 5;

fn counter(frame: &mut Frame, area: Rect, label: &str, value: &str) {
    let lines = vec![
        Line::from(Span::styled(
            label.to_uppercase(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Newest records as one line each, or a placeholder when there are none.
fn activity_lines(registry: &Registry, now: DateTime<Utc>, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = registry
        .list()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|record| {
            let when = design::relative_time(record.updated_at, now);
            let name = truncate_with_ellipsis(&record.name, width.saturating_sub(when.len() + 10));
            Line::from(vec![
                Span::styled("● ", Style::default().fg(Color::DarkGray)),
                Span::styled(name, Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {}  ", record.status.label()),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(when, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No activity yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

pub fn render_dashboard(frame: &mut Frame, area: Rect, registry: &Registry) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);

    counter(frame, cells[0], "Total assets", &registry.len().to_string());
    counter(frame, cells[1], "Projects", &PROJECTS.len().to_string());
    counter(frame, cells[2], "Deployments", "—");

    let width = rows[1].width.saturating_sub(2) as usize;
    let lines = activity_lines(registry, Utc::now(), width);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recent Activity "),
        ),
        rows[1],
    );
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use vault_core::design::DesignRecord;

    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn activity_is_newest_first_and_capped() {
        let now = Utc::now();
        let mut registry = Registry::seeded(now);
        registry.add(DesignRecord::from_generation("pricing table", String::new(), now));
        registry.add(DesignRecord::from_generation("navbar", String::new(), now));

        let lines = activity_lines(&registry, now, 60);

        assert_eq!(lines.len(), RECENT_ACTIVITY_LIMIT);
        assert!(line_text(&lines[0]).contains("navbar"));
        assert!(line_text(&lines[0]).contains("Just now"));
        assert!(line_text(&lines[2]).contains("Auth / Login V2"));
    }

    #[test]
    fn empty_registry_shows_placeholder() {
        let lines = activity_lines(&Registry::new(), Utc::now(), 60);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "No activity yet.");
    }

    #[test]
    fn counters_show_registry_size() {
        let registry = Registry::seeded(Utc::now());
        let mut terminal = Terminal::new(TestBackend::new(72, 14)).unwrap();

        terminal
            .draw(|frame| render_dashboard(frame, frame.area(), &registry))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("TOTAL ASSETS"));
        assert!(screen.contains("Recent Activity"));
        assert!(screen.contains("Hero Section"));
    }
}
