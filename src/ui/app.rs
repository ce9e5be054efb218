//! Main TUI application state and logic

use crate::dump;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parse::Parser;
use crate::parser::FrontendError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Lines moved by PageUp/PageDown
const PAGE_SIZE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
    Tokens,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tree -> tokens)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Tokens => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// Shown in the source pane title
    pub file_name: String,

    /// The source code being inspected
    pub source_code: String,

    /// Token stream; empty when tokenizing failed
    pub tokens: Vec<Token>,

    /// Dump of the parsed program; empty when either stage failed
    pub tree_lines: Vec<String>,

    /// First diagnostic from the front-end, if any
    pub error: Option<FrontendError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tree_scroll: usize,
    pub tokens_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Tokenize and parse `source_code`, keeping whatever each stage produced
    pub fn new(file_name: String, source_code: String, max_depth: usize) -> Self {
        let mut tokens = Vec::new();
        let mut tree_lines = Vec::new();

        let outcome = match tokenize(&source_code) {
            Ok(lexed) => {
                tokens = lexed;
                Parser::with_max_depth(&tokens, max_depth)
                    .parse_program()
                    .map_err(FrontendError::from)
            }
            Err(err) => Err(FrontendError::from(err)),
        };

        let (error, status_message) = match outcome {
            Ok(program) => {
                tree_lines = dump::tree_lines(&program);
                let nodes: usize = dump::node_counts(&program).values().sum();
                let message = format!(
                    "Parsed {} statement(s), {} node(s), {} token(s)",
                    program.len(),
                    nodes,
                    tokens.len()
                );
                (None, message)
            }
            Err(err) => {
                let message = err.to_string();
                (Some(err), message)
            }
        };

        // Start with the error line in view
        let source_scroll = error
            .as_ref()
            .map(|e| e.location().line.saturating_sub(3))
            .unwrap_or(0);

        App {
            file_name,
            source_code,
            tokens,
            tree_lines,
            error,
            focused_pane: FocusedPane::Source,
            source_scroll,
            tree_scroll: 0,
            tokens_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(pane_area);

        // Right column: Tree (top) | Tokens (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let error_line = self.error.as_ref().map(|e| e.location().line);
        let error_message = self.error.as_ref().map(|e| e.to_string());

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.file_name,
            &self.source_code,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            &self.tree_lines,
            error_message.as_deref(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[1],
            &self.tokens,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.error.is_some(),
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE_SIZE);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE_SIZE);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            KeyCode::End => {
                // Clamped to the last page on the next render
                *self.focused_scroll() = usize::MAX;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DEFAULT_MAX_DEPTH;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_app_with_valid_source() {
        let app = App::new("t".into(), "var x = 1;\nprint x;".into(), DEFAULT_MAX_DEPTH);

        assert!(app.error.is_none());
        assert_eq!(app.tokens.len(), 9);
        assert_eq!(app.tree_lines[0], "Program");
        assert!(app.status_message.starts_with("Parsed 2 statement(s)"));
    }

    #[test]
    fn test_app_with_parse_error_keeps_tokens() {
        let app = App::new("t".into(), "print 1".into(), DEFAULT_MAX_DEPTH);

        assert!(matches!(app.error, Some(FrontendError::Parse(_))));
        assert_eq!(app.tokens.len(), 3);
        assert!(app.tree_lines.is_empty());
        assert!(app.status_message.contains("expected ';' after value"));
    }

    #[test]
    fn test_app_with_lex_error() {
        let source = "\n\n\n\n\nprint #;";
        let app = App::new("t".into(), source.into(), DEFAULT_MAX_DEPTH);

        assert!(matches!(app.error, Some(FrontendError::Lex(_))));
        assert!(app.tokens.is_empty());
        assert_eq!(app.source_scroll, 3);
    }

    #[test]
    fn test_focus_and_scroll_keys() {
        let mut app = App::new("t".into(), "print 1;".into(), DEFAULT_MAX_DEPTH);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tree_scroll, PAGE_SIZE - 1);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.tree_scroll, 0);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Source);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
