//! Statement parsing implementation
//!
//! This module handles parsing of declarations and statements:
//!
//! ```text
//! declaration := "var" ID ("=" expression)? ";" | statement
//! statement   := ifStmt | whileStmt | printStmt | block | exprStmt
//! ```
//!
//! `else` binds to the nearest unmatched `if`, which falls out of parsing the
//! then-branch before looking for `else`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a declaration (variable declaration or any other statement)
    pub(crate) fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(TokenKind::Var) {
            return self.parse_var_declaration();
        }

        self.parse_statement()
    }

    /// Parse a statement
    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(TokenKind::If) {
            return self.parse_if_statement();
        }

        if self.match_token(TokenKind::While) {
            return self.parse_while_statement();
        }

        if self.match_token(TokenKind::Print) {
            return self.parse_print_statement();
        }

        if self.match_token(TokenKind::LBrace) {
            return self.parse_block();
        }

        self.parse_expression_statement()
    }

    /// Parse a statement that sits inside another one (branch or loop body)
    fn parse_nested_statement(&mut self) -> Result<Box<Stmt>, ParseError> {
        self.nested(|p| p.parse_statement()).map(Box::new)
    }

    /// Parse variable declaration: var name [= expr];
    fn parse_var_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self
            .consume(TokenKind::Ident, "expected variable name")?
            .text
            .clone();

        let initializer = if self.match_token(TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "expected ';' after variable declaration",
        )?;

        Ok(Stmt::VarDecl { name, initializer })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LParen, "expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RParen, "expected ')' after if condition")?;

        let then_branch = self.parse_nested_statement()?;

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(self.parse_nested_statement()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LParen, "expected '(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RParen, "expected ')' after while condition")?;

        let body = self.parse_nested_statement()?;

        Ok(Stmt::While { condition, body })
    }

    /// Parse print statement
    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        let value = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "expected ';' after value")?;
        Ok(Stmt::Print(value))
    }

    /// Parse block body; the opening brace is already consumed
    fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.nested(|p| p.parse_declaration())?);
        }

        self.consume(TokenKind::RBrace, "expected '}' after block")?;
        Ok(Stmt::Block(statements))
    }

    /// Parse expression statement
    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "expected ';' after expression")?;
        Ok(Stmt::Expression(expr))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseError};

    fn parse_str(source: &str) -> Result<Program, ParseError> {
        parse(&tokenize(source).unwrap())
    }

    fn var(name: &str) -> Expr {
        Expr::variable(name)
    }

    #[test]
    fn test_parse_if_else() {
        let program = parse_str("if (x) print 1; else print 2;").unwrap();

        assert_eq!(
            program.statements,
            vec![Stmt::If {
                condition: var("x"),
                then_branch: Box::new(Stmt::Print(Expr::number(1.0))),
                else_branch: Some(Box::new(Stmt::Print(Expr::number(2.0)))),
            }]
        );
    }

    #[test]
    fn test_dangling_else_binds_innermost() {
        let program = parse_str("if (a) if (b) print 1; else print 2;").unwrap();
        assert_eq!(program.len(), 1);

        match &program.statements[0] {
            Stmt::If {
                then_branch,
                else_branch: None,
                ..
            } => match then_branch.as_ref() {
                Stmt::If {
                    condition,
                    else_branch: Some(inner_else),
                    ..
                } => {
                    assert_eq!(condition, &var("b"));
                    assert_eq!(inner_else.as_ref(), &Stmt::Print(Expr::number(2.0)));
                }
                other => panic!("Expected inner if with else, got {:?}", other),
            },
            other => panic!("Expected outer if without else, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_while_with_block() {
        let program = parse_str("while (i < 10) { i = i + 1; }").unwrap();

        match &program.statements[0] {
            Stmt::While { condition, body } => {
                assert_eq!(
                    condition,
                    &Expr::binary(var("i"), BinaryOp::Lt, Expr::number(10.0))
                );
                match body.as_ref() {
                    Stmt::Block(statements) => {
                        assert_eq!(statements.len(), 1);
                        assert!(matches!(
                            statements[0],
                            Stmt::Expression(Expr::Assign { .. })
                        ));
                    }
                    other => panic!("Expected block body, got {:?}", other),
                }
            }
            other => panic!("Expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_block_may_contain_declarations() {
        let program = parse_str("{ var a = 1; { print a; } }").unwrap();

        assert_eq!(
            program.statements,
            vec![Stmt::Block(vec![
                Stmt::VarDecl {
                    name: "a".to_string(),
                    initializer: Some(Expr::number(1.0)),
                },
                Stmt::Block(vec![Stmt::Print(var("a"))]),
            ])]
        );
    }

    #[test]
    fn test_empty_block() {
        let program = parse_str("{}").unwrap();
        assert_eq!(program.statements, vec![Stmt::Block(vec![])]);
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse_str("{ print 1;").unwrap_err();
        assert_eq!(err.message, "expected '}' after block, found end of file");
        assert_eq!(err.location.column, 11);
    }

    #[test]
    fn test_var_declaration_cannot_be_a_branch() {
        // Branches are statements, not declarations.
        let err = parse_str("if (a) var b = 1;").unwrap_err();
        assert_eq!(err.location.column, 8);
    }

    #[test]
    fn test_missing_condition_paren() {
        let err = parse_str("while x) print 1;").unwrap_err();
        assert_eq!(err.message, "expected '(' after 'while', found identifier 'x'");

        let err = parse_str("if (x print 1;").unwrap_err();
        assert_eq!(err.message, "expected ')' after if condition, found 'print'");
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_str("print 1").unwrap_err();
        assert_eq!(err.message, "expected ';' after value, found end of file");

        let err = parse_str("x = 1 y = 2;").unwrap_err();
        assert_eq!(err.message, "expected ';' after expression, found identifier 'y'");
    }
}
