//! Random program generator used to produce fuzz input for the front-end.
//!
//! Output is always a valid program: three leading declarations followed by
//! `statement_count` top-level statements, so parsing it yields exactly
//! `statement_count + 3` statements.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Pool of variable names
const VAR_NAMES: &[&str] = &[
    "x", "y", "z", "alpha", "beta", "count", "total", "index", "sum",
];
const MATH_OPS: &[&str] = &["+", "-", "*", "/"];
const COMPARE_OPS: &[&str] = &["==", "!=", "<", ">", "<=", ">="];
const LOGIC_OPS: &[&str] = &["&&", "||"];

/// Declarations emitted before the requested statements.
pub const LEADING_DECLARATIONS: usize = 3;

/// Nesting level past which `if`/`while` are no longer drawn.
const MAX_NESTING: usize = 2;

const INDENT: &str = "    ";

/// Default number of top-level statements.
pub const DEFAULT_STATEMENT_COUNT: usize = 10;

pub struct ProgramGenerator<R: Rng> {
    rng: R,
    /// Names declared so far, in declaration order
    declared: Vec<&'static str>,
}

impl ProgramGenerator<StdRng> {
    /// Deterministic generator for reproducible fuzz runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ProgramGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            declared: Vec::new(),
        }
    }

    /// Generate a program with `statement_count` top-level statements after
    /// the leading declarations.
    pub fn generate(&mut self, statement_count: usize) -> String {
        self.declared.clear();
        let mut out = String::new();

        for _ in 0..LEADING_DECLARATIONS {
            self.var_declaration(&mut out, 0);
        }

        self.block(&mut out, statement_count, 0);
        out
    }

    fn block(&mut self, out: &mut String, count: usize, level: usize) {
        let indent = INDENT.repeat(level);

        for _ in 0..count {
            // 0: var, 1: assignment, 2: print, 3: if/else, 4: while
            let mut kind = self.rng.gen_range(0..5);
            if level > MAX_NESTING && kind > 2 {
                kind = self.rng.gen_range(0..3);
            }

            match kind {
                0 => self.var_declaration(out, level),
                1 if !self.declared.is_empty() => {
                    let target = self.random_var();
                    let value = self.expression();
                    out.push_str(&format!("{}{} = {};\n", indent, target, value));
                }
                1 => self.var_declaration(out, level),
                2 => {
                    let value = self.expression();
                    out.push_str(&format!("{}print {};\n", indent, value));
                }
                3 => {
                    let condition = self.condition();
                    out.push_str(&format!("{}if ({}) {{\n", indent, condition));
                    let then_count = self.rng.gen_range(1..=3);
                    self.block(out, then_count, level + 1);

                    if self.rng.gen_bool(0.5) {
                        out.push_str(&format!("{}}} else {{\n", indent));
                        let else_count = self.rng.gen_range(1..=2);
                        self.block(out, else_count, level + 1);
                    }
                    out.push_str(&format!("{}}}\n", indent));
                }
                _ => {
                    let condition = self.condition();
                    out.push_str(&format!("{}while ({}) {{\n", indent, condition));
                    let body_count = self.rng.gen_range(1..=3);
                    self.block(out, body_count, level + 1);
                    out.push_str(&format!("{}}}\n", indent));
                }
            }
        }
    }

    /// Redeclaring an existing name is allowed; the parser does not resolve names.
    fn var_declaration(&mut self, out: &mut String, level: usize) {
        let name = VAR_NAMES[self.rng.gen_range(0..VAR_NAMES.len())];
        if !self.declared.contains(&name) {
            self.declared.push(name);
        }

        let value = self.expression();
        out.push_str(&format!("{}var {} = {};\n", INDENT.repeat(level), name, value));
    }

    fn expression(&mut self) -> String {
        if self.declared.is_empty() || self.rng.gen_bool(0.4) {
            return self.number();
        }

        if self.rng.gen_bool(0.5) {
            return self.random_var().to_string();
        }

        let left = self.var_or_number();
        let right = self.var_or_number();
        let op = self.pick(MATH_OPS);
        format!("{} {} {}", left, op, right)
    }

    fn condition(&mut self) -> String {
        let condition = self.comparison();

        if self.rng.gen_bool(0.3) {
            let op = self.pick(LOGIC_OPS);
            let extra = self.comparison();
            return format!("({}) {} ({})", condition, op, extra);
        }

        condition
    }

    fn comparison(&mut self) -> String {
        let left = self.var_or_number();
        let right = self.var_or_number();
        let op = self.pick(COMPARE_OPS);
        format!("{} {} {}", left, op, right)
    }

    fn var_or_number(&mut self) -> String {
        if !self.declared.is_empty() && self.rng.gen_bool(0.5) {
            self.random_var().to_string()
        } else {
            self.number()
        }
    }

    fn number(&mut self) -> String {
        self.rng.gen_range(1..=99).to_string()
    }

    fn random_var(&mut self) -> &'static str {
        match self.declared.len() {
            0 => "1",
            len => self.declared[self.rng.gen_range(0..len)],
        }
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options[self.rng.gen_range(0..options.len())]
    }
}
