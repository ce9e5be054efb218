use crate::parser::lexer::TokenKind;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub number: Color,
    pub operator: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub node_kind: Color, // Cyan for AST node kinds
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    operator: Color::Rgb(245, 194, 231),       // Pink for operators
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    node_kind: Color::Rgb(148, 226, 213),      // Cyan/teal for node kinds
};

impl Theme {
    /// Style for a token of `kind` in the source and token panes.
    pub fn token_style(&self, kind: TokenKind) -> Style {
        match kind {
            k if k.is_keyword() => Style::default()
                .fg(self.keyword)
                .add_modifier(Modifier::BOLD),
            TokenKind::Number => Style::default().fg(self.number),
            TokenKind::Ident => Style::default().fg(self.fg),
            TokenKind::LParen | TokenKind::RParen | TokenKind::LBrace | TokenKind::RBrace => {
                Style::default().fg(self.primary) // Brackets
            }
            TokenKind::Semicolon | TokenKind::Eof => Style::default().fg(self.fg),
            _ => Style::default().fg(self.operator),
        }
    }

    pub fn border_style(&self, is_focused: bool) -> Style {
        if is_focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_normal)
        }
    }
}
