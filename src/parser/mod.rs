//! tinylang source code front-end
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split across `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Declarations: `var name = expr;`
//! - Statements: `print`, `if`/`else`, `while`, blocks, expression statements
//! - Expressions: assignment, `||`, `&&`, equality, comparison, arithmetic, unary minus
//! - Integer literals only; identifiers are ASCII letters and digits
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies. Both stages are pure functions of
//! their input and stop at the first error.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

use thiserror::Error;

pub use ast::{BinaryOp, Expr, Program, SourceLocation, Stmt, UnaryOp};
pub use lexer::{tokenize, LexError, Lexer, Token, TokenKind};
pub use parse::{parse, ParseError, Parser, DEFAULT_MAX_DEPTH};

/// Failure from either front-end stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FrontendError {
    pub fn location(&self) -> SourceLocation {
        match self {
            FrontendError::Lex(err) => err.location,
            FrontendError::Parse(err) => err.location,
        }
    }
}

/// Tokenize and parse `source` with the default nesting limit.
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    parse_source_with_depth(source, DEFAULT_MAX_DEPTH)
}

/// Tokenize and parse `source`, bounding nesting at `max_depth`.
pub fn parse_source_with_depth(source: &str, max_depth: usize) -> Result<Program, FrontendError> {
    let tokens = tokenize(source)?;
    let program = Parser::with_max_depth(&tokens, max_depth).parse_program()?;
    Ok(program)
}
