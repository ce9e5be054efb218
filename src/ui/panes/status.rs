//! Bottom status line: front-end outcome on the left, key hints on the right

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// (key, action) pairs shown on the right
const KEY_HINTS: [(&str, &str); 4] = [
    (" ⇥ ", "focus"),
    (" ↑/↓ ", "scroll"),
    (" ⇞/⇟ ", "page"),
    (" q ", "quit"),
];

fn outcome_spans(message: &str, has_error: bool) -> Vec<Span<'static>> {
    let (badge, accent) = if has_error {
        (" ERROR ", DEFAULT_THEME.error)
    } else {
        (" OK ", DEFAULT_THEME.success)
    };
    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);

    vec![
        Span::styled(
            badge,
            Style::default()
                .bg(accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", message), bar.fg(accent_or_fg(has_error))),
    ]
}

fn accent_or_fg(has_error: bool) -> Color {
    if has_error {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.fg
    }
}

fn hint_spans() -> Vec<Span<'static>> {
    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let key = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);

    let mut spans = Vec::with_capacity(KEY_HINTS.len() * 3);
    for (i, (k, action)) in KEY_HINTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│", bar.fg(DEFAULT_THEME.comment)));
        }
        spans.push(Span::styled(*k, key));
        spans.push(Span::styled(format!(" {} ", action), bar.fg(DEFAULT_THEME.fg)));
    }
    spans
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, has_error: bool) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);

    frame.render_widget(
        Paragraph::new(Line::from(outcome_spans(message, has_error)))
            .style(bar)
            .alignment(Alignment::Left),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(hint_spans()))
            .style(bar)
            .alignment(Alignment::Right),
        halves[1],
    );
}
