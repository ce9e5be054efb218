//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with lexer-driven highlighting and error line indicator
//! - [`tree`]: Syntax tree dump, or the diagnostic when the front-end failed
//! - [`tokens`]: Token stream with positions and kind tags
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a stateless `render_*` function; scroll offsets
//! are owned by [`App`](crate::ui::App) and clamped during rendering.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;
