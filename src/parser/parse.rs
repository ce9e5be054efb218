//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing declarations and statements (var, if, while, print, blocks)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! There is no error recovery: the first failing rule aborts the whole parse
//! and no partial tree is returned.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use thiserror::Error;

/// Default bound on nested expressions and statements.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Parse error at line {}, column {}: {message}",
    .location.line,
    .location.column
)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

/// Parse a token stream produced by [`tokenize`](crate::parser::lexer::tokenize).
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Recursive descent parser for tinylang
///
/// Borrows the token stream read-only and walks it with a cursor index.
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) position: usize,
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(tokens: &'a [Token], max_depth: usize) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        self.check_terminated()?;

        let mut program = Program::new();

        while !self.is_at_end() {
            let decl = self.parse_declaration()?;
            program.statements.push(decl);
        }

        Ok(program)
    }

    /// The stream must end in exactly the sentinel the lexer appends,
    /// and hold no other end of file token.
    fn check_terminated(&self) -> Result<(), ParseError> {
        let body = self.tokens.len().saturating_sub(1);
        if let Some(stray) = self.tokens[..body].iter().find(|t| t.is(TokenKind::Eof)) {
            return Err(ParseError::new(
                "unexpected end of file before end of token stream",
                stray.location,
            ));
        }

        match self.tokens.last() {
            Some(token) if token.is(TokenKind::Eof) => Ok(()),
            Some(token) => Err(ParseError::new(
                "token stream must end with end of file",
                token.location,
            )),
            None => Err(ParseError::new(
                "token stream must end with end of file",
                SourceLocation::new(0, 1, 1),
            )),
        }
    }

    // ===== Helper methods =====

    /// Run `f` one nesting level deeper, failing once `max_depth` is exceeded.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.descend()?;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Take one level of the nesting budget; the caller restores `depth`.
    pub(crate) fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                format!("nesting too deep (limit {})", self.max_depth),
                self.current_location(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn restore_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it is any of `kinds`, returning its kind.
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<TokenKind> {
        let kind = self.peek().kind;
        if kind != TokenKind::Eof && kinds.contains(&kind) {
            self.advance();
            Some(kind)
        } else {
            None
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().is(kind)
    }

    pub(crate) fn advance(&mut self) -> &'a Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is(TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.position]
    }

    pub(crate) fn previous(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Advance past a token of `kind` or fail with `message` at the current token.
    pub(crate) fn consume(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(
                format!("{}, found {}", message, self.peek()),
                self.current_location(),
            ))
        }
    }
}
