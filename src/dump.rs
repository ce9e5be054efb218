//! Box-drawing tree dump of a parsed [`Program`].
//!
//! ```text
//! Program
//! ├── VarDecl x
//! │   └── Number 1
//! └── Print
//!     └── Binary +
//!         ├── Variable x
//!         └── Number 2
//! ```
//!
//! The dump walks the tree read-only and matches exhaustively over [`Stmt`]
//! and [`Expr`].

use crate::parser::ast::{Expr, Program, Stmt};
use rustc_hash::FxHashMap;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Borrowed view of a node, so statements and expressions share one walker.
enum Node<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl<'a> Node<'a> {
    fn kind(&self) -> &'static str {
        match self {
            Node::Stmt(stmt) => match stmt {
                Stmt::VarDecl { .. } => "VarDecl",
                Stmt::Print(_) => "Print",
                Stmt::If { .. } => "If",
                Stmt::While { .. } => "While",
                Stmt::Block(_) => "Block",
                Stmt::Expression(_) => "ExprStmt",
            },
            Node::Expr(expr) => match expr {
                Expr::Number(_) => "Number",
                Expr::Variable(_) => "Variable",
                Expr::Assign { .. } => "Assign",
                Expr::Binary { .. } => "Binary",
                Expr::Unary { .. } => "Unary",
            },
        }
    }

    fn label(&self) -> String {
        match self {
            Node::Stmt(stmt) => match stmt {
                Stmt::VarDecl { name, .. } => format!("VarDecl {}", name),
                Stmt::Print(_) => "Print".to_string(),
                Stmt::If { .. } => "If".to_string(),
                Stmt::While { .. } => "While".to_string(),
                Stmt::Block(_) => "Block".to_string(),
                Stmt::Expression(_) => "ExprStmt".to_string(),
            },
            Node::Expr(expr) => match expr {
                Expr::Number(value) => format!("Number {}", value),
                Expr::Variable(name) => format!("Variable {}", name),
                Expr::Assign { name, .. } => format!("Assign {}", name),
                Expr::Binary { op, .. } => format!("Binary {}", op),
                Expr::Unary { op, .. } => format!("Unary {}", op),
            },
        }
    }

    fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Stmt(stmt) => match stmt {
                Stmt::VarDecl { initializer, .. } => {
                    initializer.iter().map(Node::Expr).collect()
                }
                Stmt::Print(value) | Stmt::Expression(value) => vec![Node::Expr(value)],
                Stmt::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    let mut children = vec![Node::Expr(condition), Node::Stmt(then_branch)];
                    if let Some(else_branch) = else_branch {
                        children.push(Node::Stmt(else_branch));
                    }
                    children
                }
                Stmt::While { condition, body } => {
                    vec![Node::Expr(condition), Node::Stmt(body)]
                }
                Stmt::Block(statements) => statements.iter().map(Node::Stmt).collect(),
            },
            Node::Expr(expr) => match expr {
                Expr::Number(_) | Expr::Variable(_) => Vec::new(),
                Expr::Assign { value, .. } => vec![Node::Expr(value)],
                Expr::Binary { left, right, .. } => {
                    vec![Node::Expr(left), Node::Expr(right)]
                }
                Expr::Unary { operand, .. } => vec![Node::Expr(operand)],
            },
        }
    }
}

/// One output line per node, root first.
pub fn tree_lines(program: &Program) -> Vec<String> {
    let mut lines = vec!["Program".to_string()];
    let roots: Vec<Node> = program.iter().map(Node::Stmt).collect();
    push_children(&roots, "", &mut lines);
    lines
}

/// The whole tree as a newline-terminated string.
pub fn render(program: &Program) -> String {
    let mut out = tree_lines(program).join("\n");
    out.push('\n');
    out
}

/// Number of nodes of each kind, keyed by the kind names used in the dump.
pub fn node_counts(program: &Program) -> FxHashMap<&'static str, usize> {
    let mut counts = FxHashMap::default();
    let mut pending: Vec<Node> = program.iter().map(Node::Stmt).collect();

    while let Some(node) = pending.pop() {
        *counts.entry(node.kind()).or_insert(0) += 1;
        pending.extend(node.children());
    }

    counts
}

fn push_children(children: &[Node], indent: &str, lines: &mut Vec<String>) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let marker = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", indent, marker, child.label()));

        let child_indent = format!("{}{}", indent, if is_last { SPACE } else { PIPE });
        push_children(&child.children(), &child_indent, lines);
    }
}
