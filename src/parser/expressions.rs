//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing
//! for binary operators and recursive descent for other expression forms.
//!
//! # Precedence
//!
//! Lowest to highest:
//!
//! | Level          | Operators           | Associativity |
//! |----------------|---------------------|---------------|
//! | assignment     | `=`                 | right         |
//! | logical or     | `\|\|`              | left          |
//! | logical and    | `&&`                | left          |
//! | equality       | `==` `!=`           | left          |
//! | comparison     | `<` `<=` `>` `>=`   | left          |
//! | additive       | `+` `-`             | left          |
//! | multiplicative | `*` `/`             | left          |
//! | unary          | `-`                 | right         |
//! | primary        | number, identifier, `( expr )` | -  |
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

const EQUALITY_OPS: &[TokenKind] = &[TokenKind::EqEq, TokenKind::NotEq];
const COMPARISON_OPS: &[TokenKind] = &[
    TokenKind::Lt,
    TokenKind::LtEq,
    TokenKind::Gt,
    TokenKind::GtEq,
];
const ADDITIVE_OPS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE_OPS: &[TokenKind] = &[TokenKind::Star, TokenKind::Slash];

impl Parser<'_> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(|p| p.parse_assignment())
    }

    /// Parse assignment (right-associative, bare variables only on the left)
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_logical_or()?;

        if self.match_token(TokenKind::Eq) {
            let equals = self.previous().location;
            let value = self.nested(|p| p.parse_assignment())?;

            return match expr {
                Expr::Variable(name) => Ok(Expr::assign(name, value)),
                _ => Err(ParseError::new("invalid assignment target", equals)),
            };
        }

        Ok(expr)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&[TokenKind::OrOr], Self::parse_logical_and)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&[TokenKind::AndAnd], Self::parse_equality)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(EQUALITY_OPS, Self::parse_comparison)
    }

    /// Parse comparison (< <= > >=)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(COMPARISON_OPS, Self::parse_additive)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(ADDITIVE_OPS, Self::parse_multiplicative)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(MULTIPLICATIVE_OPS, Self::parse_unary)
    }

    /// One binary precedence level: an operand from the next level, then a
    /// loop folding same-level operators to the left.
    ///
    /// Every fold deepens the tree by one, so each one is charged against the
    /// nesting budget until the level is left.
    fn parse_left_assoc(
        &mut self,
        ops: &[TokenKind],
        next: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let outer = self.depth();
        let result = self.fold_left(ops, next);
        self.restore_depth(outer);
        result
    }

    fn fold_left(
        &mut self,
        ops: &[TokenKind],
        next: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;

        while let Some(kind) = self.match_any(ops) {
            let op = BinaryOp::from_token(kind).ok_or_else(|| {
                ParseError::new(
                    format!("{} is not a binary operator", kind),
                    self.previous().location,
                )
            })?;
            self.descend()?;
            let right = next(self)?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse unary: -operand
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = UnaryOp::from_token(self.peek().kind) {
            self.advance();
            let operand = self.nested(|p| p.parse_unary())?;
            return Ok(Expr::unary(op, operand));
        }

        self.parse_primary()
    }

    /// Parse primary expression: number, identifier, parenthesized expression
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if self.match_token(TokenKind::Number) {
            let token = self.previous();
            let value = token.text.parse::<f64>().map_err(|_| {
                ParseError::new(
                    format!("invalid number literal '{}'", token.text),
                    token.location,
                )
            })?;
            return Ok(Expr::Number(value));
        }

        if self.match_token(TokenKind::Ident) {
            return Ok(Expr::Variable(self.previous().text.clone()));
        }

        if self.match_token(TokenKind::LParen) {
            let expr = self.parse_expression()?;
            self.consume(TokenKind::RParen, "expected ')' after expression")?;
            return Ok(expr);
        }

        Err(ParseError::new(
            format!("expected expression, found {}", self.peek()),
            self.current_location(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseError, Parser};

    fn parse_expr(source: &str) -> Result<Expr, ParseError> {
        let program = parse(&tokenize(source).unwrap())?;
        match program.statements.into_iter().next() {
            Some(Stmt::Expression(expr)) => Ok(expr),
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    fn num(value: f64) -> Expr {
        Expr::number(value)
    }

    fn var(name: &str) -> Expr {
        Expr::variable(name)
    }

    #[test]
    fn test_left_associativity() {
        let expr = parse_expr("1 - 2 - 3;").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                Expr::binary(num(1.0), BinaryOp::Sub, num(2.0)),
                BinaryOp::Sub,
                num(3.0)
            )
        );
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expr = parse_expr("1 + 2 * 3;").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                num(1.0),
                BinaryOp::Add,
                Expr::binary(num(2.0), BinaryOp::Mul, num(3.0))
            )
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = parse_expr("(1 + 2) * 3;").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                Expr::binary(num(1.0), BinaryOp::Add, num(2.0)),
                BinaryOp::Mul,
                num(3.0)
            )
        );
    }

    #[test]
    fn test_full_precedence_ladder() {
        // a || b && c == d < e + f * -g
        let expr = parse_expr("a || b && c == d < e + f * -g;").unwrap();
        let product = Expr::binary(
            var("f"),
            BinaryOp::Mul,
            Expr::unary(UnaryOp::Neg, var("g")),
        );
        let sum = Expr::binary(var("e"), BinaryOp::Add, product);
        let less = Expr::binary(var("d"), BinaryOp::Lt, sum);
        let equal = Expr::binary(var("c"), BinaryOp::Eq, less);
        let and = Expr::binary(var("b"), BinaryOp::And, equal);
        assert_eq!(expr, Expr::binary(var("a"), BinaryOp::Or, and));
    }

    #[test]
    fn test_all_comparison_operators() {
        let cases = [
            ("a < b;", BinaryOp::Lt),
            ("a <= b;", BinaryOp::LtEq),
            ("a > b;", BinaryOp::Gt),
            ("a >= b;", BinaryOp::GtEq),
            ("a == b;", BinaryOp::Eq),
            ("a != b;", BinaryOp::NotEq),
            ("a / b;", BinaryOp::Div),
        ];
        for (source, op) in cases {
            assert_eq!(
                parse_expr(source).unwrap(),
                Expr::binary(var("a"), op, var("b")),
                "source: {}",
                source
            );
        }
    }

    #[test]
    fn test_nested_unary() {
        let expr = parse_expr("--x;").unwrap();
        assert_eq!(
            expr,
            Expr::unary(UnaryOp::Neg, Expr::unary(UnaryOp::Neg, var("x")))
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let expr = parse_expr("x = y = 3;").unwrap();
        assert_eq!(expr, Expr::assign("x", Expr::assign("y", num(3.0))));
    }

    #[test]
    fn test_assignment_value_is_full_expression() {
        let expr = parse_expr("x = a || b;").unwrap();
        assert_eq!(
            expr,
            Expr::assign("x", Expr::binary(var("a"), BinaryOp::Or, var("b")))
        );
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse_expr("1 = 2;").unwrap_err();
        assert_eq!(err.message, "invalid assignment target");
        assert_eq!(err.location.column, 3);

        let err = parse_expr("(a + b) = 2;").unwrap_err();
        assert_eq!(err.message, "invalid assignment target");
        assert_eq!(err.location.column, 9);
    }

    #[test]
    fn test_parenthesized_variable_is_assignable() {
        // Grouping is dropped from the tree, so `(a)` is a bare variable.
        let expr = parse_expr("(a) = 1;").unwrap();
        assert_eq!(expr, Expr::assign("a", num(1.0)));
    }

    #[test]
    fn test_bang_is_not_a_unary_operator() {
        let err = parse_expr("!x;").unwrap_err();
        assert_eq!(err.message, "expected expression, found '!'");
        assert_eq!(err.location.column, 1);
    }

    #[test]
    fn test_missing_closing_paren() {
        let err = parse_expr("(1 + 2;").unwrap_err();
        assert_eq!(err.message, "expected ')' after expression, found ';'");
        assert_eq!(err.location.column, 7);
    }

    #[test]
    fn test_large_number_literal() {
        let expr = parse_expr("12345678901234567890;").unwrap();
        assert_eq!(expr, num(12345678901234567890.0));
    }

    #[test]
    fn test_operator_chain_counts_against_nesting_limit() {
        let tokens = tokenize("print 1 + 2 + 3;").unwrap();
        assert!(Parser::with_max_depth(&tokens, 3).parse_program().is_ok());

        let err = Parser::with_max_depth(&tokens, 2).parse_program().unwrap_err();
        assert_eq!(err.message, "nesting too deep (limit 2)");
        assert_eq!(err.location.column, 11);
    }

    #[test]
    fn test_chain_budget_is_released_after_each_level() {
        // Sibling chains do not add up.
        let tokens = tokenize("print (1 + 2 + 3 + 4) * (5 + 6 + 7 + 8);").unwrap();
        assert!(Parser::with_max_depth(&tokens, 6).parse_program().is_ok());
    }
}
