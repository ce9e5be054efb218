//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the program
//! being inspected with syntax highlighting and an error indicator.
//!
//! # Features
//!
//! - Syntax highlighting driven by the real lexer, one line at a time
//! - Error line highlighting when tokenizing or parsing failed
//! - Line numbering
//!
//! A line the lexer rejects is shown unstyled; tokens never span lines, so
//! per-line lexing gives the same kinds as lexing the whole file.

use crate::parser::lexer::{tokenize, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight one source line using the tokenizer
fn highlight_source_line(line: &str) -> Line<'static> {
    let tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(_) => return Line::from(line.to_string()),
    };

    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut cursor = 0;

    for token in tokens.iter().filter(|t| !t.is(TokenKind::Eof)) {
        let start = token.location.offset;
        if start > cursor {
            spans.push(Span::raw(chars[cursor..start].iter().collect::<String>()));
        }
        spans.push(Span::styled(
            token.text.clone(),
            DEFAULT_THEME.token_style(token.kind),
        ));
        cursor = start + token.text.chars().count();
    }

    if cursor < chars.len() {
        spans.push(Span::raw(chars[cursor..].iter().collect::<String>()));
    }

    Line::from(spans)
}

/// Render the source code pane
///
/// `error_line` is the 1-based line of the diagnostic, if any.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    source_code: &str,
    error_line: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Clamp scroll offset to valid range
    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);
            let line_num_str = format!("{:4} ", line_num);

            let mut content_line = highlight_source_line(line);

            let num_style = if is_error {
                // ERROR LINE: White text on red for visibility
                for span in &mut content_line.spans {
                    span.style = Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD);
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
