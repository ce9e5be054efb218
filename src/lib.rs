//! # Introduction
//!
//! tinylang is the front-end of a small imperative language: a tokenizer and a
//! recursive-descent parser that turn source text into an immutable syntax
//! tree with positional diagnostics. A terminal UI built with
//! [ratatui](https://docs.rs/ratatui) lets you browse the result.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Dump / TUI
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds the AST.
//! 2. [`dump`] — renders a parsed program as a box-drawing tree.
//! 3. [`generator`] — produces random valid programs for fuzzing the front-end.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Language
//!
//! ```text
//! var total = 0;
//! var i = 1;
//! while (i <= 10) {
//!     if (i / 2 * 2 == i) total = total + i; else print i;
//!     i = i + 1;
//! }
//! print total;
//! ```
//!
//! ```
//! use tinylang::parser::{parse, tokenize, Stmt};
//!
//! let tokens = tokenize("var x = 1 + 2;").unwrap();
//! let program = parse(&tokens).unwrap();
//! assert!(matches!(program.statements[0], Stmt::VarDecl { .. }));
//! ```

pub mod dump;
pub mod generator;
pub mod parser;
pub mod ui;
