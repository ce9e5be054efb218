//! AST pane rendering
//!
//! Shows the dump produced by [`crate::dump::tree_lines`], with the branch
//! drawing dimmed and node kinds colored. When the front-end failed, the
//! pane shows the diagnostic instead.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Split a dump line into branch drawing, node kind and detail.
fn split_tree_line(line: &str) -> (&str, &str, &str) {
    let body_start = line
        .char_indices()
        .find(|(_, c)| c.is_ascii_alphanumeric())
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    let (prefix, body) = line.split_at(body_start);

    match body.split_once(' ') {
        Some((kind, detail)) => (prefix, kind, detail),
        None => (prefix, body, ""),
    }
}

fn styled_tree_line(line: &str) -> Line<'static> {
    let (prefix, kind, detail) = split_tree_line(line);

    let detail_style = match kind {
        "Number" => Style::default().fg(DEFAULT_THEME.number),
        "Binary" | "Unary" => Style::default().fg(DEFAULT_THEME.operator),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    };

    let mut spans = vec![
        Span::styled(prefix.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            kind.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.node_kind)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if !detail.is_empty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(detail.to_string(), detail_style));
    }

    Line::from(spans)
}

/// Render the AST pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree_lines: &[String],
    error: Option<&str>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    if let Some(message) = error {
        let paragraph = Paragraph::new(message.to_string())
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.error))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = tree_lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = tree_lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(styled_tree_line(line)))
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
