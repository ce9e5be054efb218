// Integration tests for the tinylang front-end

use tinylang::dump;
use tinylang::parser::{
    parse, parse_source, tokenize, BinaryOp, Expr, FrontendError, Parser, SourceLocation, Stmt,
    TokenKind, UnaryOp,
};

fn num(value: f64) -> Expr {
    Expr::number(value)
}

fn var(name: &str) -> Expr {
    Expr::variable(name)
}

#[test]
fn test_full_program() {
    let source = r#"
        var total = 0;
        var i = 1;
        while (i <= 10) {
            if (i / 2 * 2 == i) total = total + i; else print i;
            i = i + 1;
        }
        print total;
    "#;

    let tokens = tokenize(source).expect("Tokenizing failed");
    let program = parse(&tokens).expect("Parsing failed");

    assert_eq!(program.len(), 4);
    assert!(matches!(program.statements[0], Stmt::VarDecl { .. }));
    assert!(matches!(program.statements[1], Stmt::VarDecl { .. }));
    assert!(matches!(program.statements[2], Stmt::While { .. }));
    assert_eq!(program.statements[3], Stmt::Print(var("total")));

    match &program.statements[2] {
        Stmt::While { condition, body } => {
            assert_eq!(condition, &Expr::binary(var("i"), BinaryOp::LtEq, num(10.0)));
            match body.as_ref() {
                Stmt::Block(statements) => {
                    assert_eq!(statements.len(), 2);
                    assert!(matches!(
                        statements[0],
                        Stmt::If {
                            else_branch: Some(_),
                            ..
                        }
                    ));
                }
                other => panic!("Expected block, got {:?}", other),
            }
        }
        other => panic!("Expected while, got {:?}", other),
    }
}

#[test]
fn test_longest_match_single_token() {
    let tokens = tokenize("<=").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::LtEq, TokenKind::Eof]);
    assert_eq!(tokens[0].text, "<=");
}

#[test]
fn test_left_associativity() {
    let program = parse_source("1 - 2 - 3;").unwrap();
    assert_eq!(
        program.statements,
        vec![Stmt::Expression(Expr::binary(
            Expr::binary(num(1.0), BinaryOp::Sub, num(2.0)),
            BinaryOp::Sub,
            num(3.0),
        ))]
    );
}

#[test]
fn test_precedence() {
    let program = parse_source("1 + 2 * 3;").unwrap();
    assert_eq!(
        program.statements,
        vec![Stmt::Expression(Expr::binary(
            num(1.0),
            BinaryOp::Add,
            Expr::binary(num(2.0), BinaryOp::Mul, num(3.0)),
        ))]
    );
}

#[test]
fn test_unary_binds_tighter_than_multiplication() {
    let program = parse_source("print -a * b;").unwrap();
    assert_eq!(
        program.statements,
        vec![Stmt::Print(Expr::binary(
            Expr::unary(UnaryOp::Neg, var("a")),
            BinaryOp::Mul,
            var("b"),
        ))]
    );
}

#[test]
fn test_assignment_chain_and_lvalue() {
    let program = parse_source("x = y = 3;").unwrap();
    assert_eq!(
        program.statements,
        vec![Stmt::Expression(Expr::assign("x", Expr::assign("y", num(3.0))))]
    );

    match parse_source("1 = 2;") {
        Err(FrontendError::Parse(err)) => {
            assert_eq!(err.message, "invalid assignment target");
            assert_eq!(err.location, SourceLocation::new(2, 1, 3));
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_dangling_else() {
    let program = parse_source("if (a) if (b) print 1; else print 2;").unwrap();
    let expected = Stmt::If {
        condition: var("a"),
        then_branch: Box::new(Stmt::If {
            condition: var("b"),
            then_branch: Box::new(Stmt::Print(num(1.0))),
            else_branch: Some(Box::new(Stmt::Print(num(2.0)))),
        }),
        else_branch: None,
    };
    assert_eq!(program.statements, vec![expected]);
}

#[test]
fn test_lex_error_position() {
    match parse_source("var x = 1 @ 2;") {
        Err(FrontendError::Lex(err)) => {
            assert_eq!(err.character, '@');
            assert_eq!(err.location.line, 1);
            assert_eq!(err.location.column, 11);
        }
        other => panic!("Expected lex error, got {:?}", other),
    }
}

#[test]
fn test_lex_error_on_later_line() {
    let err = tokenize("var a = 1;\nvar b = 2;\n  $").unwrap_err();
    assert_eq!(err.location, SourceLocation::new(24, 3, 3));
    assert!(err.to_string().contains("line 3, column 3"));
}

#[test]
fn test_unterminated_block() {
    match parse_source("{ print 1;") {
        Err(FrontendError::Parse(err)) => {
            assert!(err.message.starts_with("expected '}'"), "{}", err.message);
            assert_eq!(err.location.line, 1);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_parse_error_display() {
    let err = parse_source("print (1;").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at line 1, column 9: expected ')' after expression, found ';'"
    );
    assert_eq!(err.location().column, 9);
}

#[test]
fn test_statement_after_error_is_not_parsed() {
    // First fault stops parsing; no partial program is returned.
    let tokens = tokenize("print 1; print ; print 3;").unwrap();
    let err = parse(&tokens).unwrap_err();
    assert_eq!(err.location.column, 16);
}

#[test]
fn test_deep_parentheses_hit_nesting_limit() {
    let depth = 10_000;
    let source = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));

    let err = parse_source(&source).unwrap_err();
    assert!(err.to_string().contains("nesting too deep"));
}

#[test]
fn test_deep_statements_hit_nesting_limit() {
    let depth = 5_000;
    let source = format!("{}print 1;{}", "{".repeat(depth), "}".repeat(depth));

    let err = parse_source(&source).unwrap_err();
    assert!(err.to_string().contains("nesting too deep"));
}

#[test]
fn test_long_unary_chain_hits_nesting_limit() {
    let source = format!("print {}1;", "-".repeat(5_000));
    assert!(parse_source(&source).is_err());
}

#[test]
fn test_long_operator_chain_hits_nesting_limit() {
    let source = format!("print 1{};", "+1".repeat(100_000));

    let err = parse_source(&source).unwrap_err();
    assert!(err.to_string().contains("nesting too deep"));
}

#[test]
fn test_long_logical_chain_hits_nesting_limit() {
    let source = format!("while (a{}) print 1;", " && a".repeat(50_000));
    assert!(parse_source(&source).is_err());
}

#[test]
fn test_chain_within_limit_dumps_and_drops() {
    let source = format!("print 1{};", " - 1".repeat(100));
    let program = parse_source(&source).unwrap();

    let lines = dump::tree_lines(&program);
    assert_eq!(lines.len(), 2 + 201);
    drop(program);
}

#[test]
fn test_custom_nesting_limit() {
    let tokens = tokenize("while (a) while (b) { print c; }").unwrap();

    assert!(Parser::with_max_depth(&tokens, 8).parse_program().is_ok());
    assert!(Parser::with_max_depth(&tokens, 2).parse_program().is_err());
}

#[test]
fn test_tokens_are_reusable_across_parses() {
    let tokens = tokenize("var a = 1; print a;").unwrap();
    let first = parse(&tokens).unwrap();
    let second = parse(&tokens).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_dump_of_parsed_program() {
    let program = parse_source("var x = 1 - 2 - 3;").unwrap();
    let expected = "\
Program
└── VarDecl x
    └── Binary -
        ├── Binary -
        │   ├── Number 1
        │   └── Number 2
        └── Number 3
";
    assert_eq!(dump::render(&program), expected);
}
