// tests/parser_tests.rs

use conditional::ast::{BinOp, Expr, UnaryOp};
use conditional::lexer::Lexer;
use conditional::parser::{MAX_DEPTH, Parser};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn parse(input: &str) -> Expr {
    let mut parser = Parser::new(Lexer::new(input));
    let expr = parser.parse();
    assert!(
        parser.errors().is_empty(),
        "unexpected errors for {:?}: {:?}",
        input,
        parser.errors()
    );
    expr.expect("no expression parsed")
}

fn parse_errors(input: &str) -> Vec<String> {
    let mut parser = Parser::new(Lexer::new(input));
    parser.parse();
    parser.errors().to_vec()
}

fn ident(name: &str) -> Expr {
    Expr::Identifier(name.to_string())
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_literals() {
    assert_eq!(parse("5"), Expr::Integer(5));
    assert_eq!(parse(r#""llamas""#), Expr::String("llamas".into()));
    assert_eq!(parse("'llamas'"), Expr::String("llamas".into()));
    assert_eq!(parse("/^llamas?/"), Expr::Regexp("^llamas?".into()));
    assert_eq!(parse("true"), Expr::Boolean(true));
    assert_eq!(parse("false"), Expr::Boolean(false));
    assert_eq!(parse("foobar"), ident("foobar"));
}

#[test]
fn test_integer_overflow_is_a_parse_error() {
    assert_eq!(
        parse_errors("99999999999999999999"),
        vec![r#"could not parse "99999999999999999999" as integer"#.to_string()]
    );
}

// ============================================================================
// Prefix and Infix
// ============================================================================

#[test]
fn test_prefix_expressions() {
    let test_cases = vec![
        ("!5", UnaryOp::Not, Expr::Integer(5)),
        ("!foobar", UnaryOp::Not, ident("foobar")),
        ("!true", UnaryOp::Not, Expr::Boolean(true)),
        ("-15", UnaryOp::Negate, Expr::Integer(15)),
    ];

    for (input, op, right) in test_cases {
        assert_eq!(parse(input), Expr::prefix(op, right), "Failed for input: {}", input);
    }
}

#[test]
fn test_infix_expressions() {
    let test_cases = vec![
        ("5 == 5", Expr::Integer(5), BinOp::Equal, Expr::Integer(5)),
        ("5 != 5", Expr::Integer(5), BinOp::NotEqual, Expr::Integer(5)),
        (
            r#""a" == "a""#,
            Expr::String("a".into()),
            BinOp::Equal,
            Expr::String("a".into()),
        ),
        ("foo.bar", ident("foo"), BinOp::Dot, ident("bar")),
        ("foobar != barfoo", ident("foobar"), BinOp::NotEqual, ident("barfoo")),
        ("true != false", Expr::Boolean(true), BinOp::NotEqual, Expr::Boolean(false)),
        ("a =~ /b/", ident("a"), BinOp::Match, Expr::Regexp("b".into())),
        ("a !~ /b/", ident("a"), BinOp::NotMatch, Expr::Regexp("b".into())),
        ("a && b", ident("a"), BinOp::And, ident("b")),
        ("a || b", ident("a"), BinOp::Or, ident("b")),
    ];

    for (input, left, op, right) in test_cases {
        assert_eq!(parse(input), Expr::infix(op, left, right), "Failed for input: {}", input);
    }
}

#[test]
fn test_operator_precedence() {
    let test_cases = vec![
        ("!a", "(!a)"),
        ("true", "true"),
        ("!(true == true)", "(!(true == true))"),
        ("foo.bar.baz == true", "(((foo.bar).baz) == true)"),
        (
            "foo.bar == true && bar.baz == false",
            "(((foo.bar) == true) && ((bar.baz) == false))",
        ),
        ("a || b && c", "(a || (b && c))"),
        ("a && b || c", "((a && b) || c)"),
        ("a || b || c", "((a || b) || c)"),
        ("env(env(LLAMAS)) == true", "(env(env(LLAMAS)) == true)"),
        ("a =~ /a/ && b =~ /b/", "((a =~ /a/) && (b =~ /b/))"),
        ("!a.b", "(!(a.b))"),
        ("!a == b", "((!a) == b)"),
        ("-a.b", "(-(a.b))"),
        ("[1, 2] @> 1 || false", "(([1, 2] @> 1) || false)"),
        ("(a || b) && c", "((a || b) && c)"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(parse(input).to_string(), expected, "Failed for input: {}", input);
    }
}

// ============================================================================
// Calls and Arrays
// ============================================================================

#[test]
fn test_call_expression() {
    assert_eq!(
        parse("add(1, 2, 3)"),
        Expr::Call {
            function: "add".into(),
            args: vec![Expr::Integer(1), Expr::Integer(2), Expr::Integer(3)],
        }
    );
}

#[test]
fn test_call_arguments() {
    let test_cases = vec![
        ("env()", vec![]),
        ("env(1)", vec!["1"]),
        (
            "foo(env(LLAMAS) == 'test' || true)",
            vec![r#"((env(LLAMAS) == "test") || true)"#],
        ),
    ];

    for (input, expected) in test_cases {
        match parse(input) {
            Expr::Call { args, .. } => {
                let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                assert_eq!(rendered, expected, "Failed for input: {}", input);
            }
            other => panic!("expected call for {}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_array_literals() {
    assert_eq!(parse("[]"), Expr::Array(vec![]));
    assert_eq!(
        parse(r#"["llamas", "alpacas"]"#),
        Expr::Array(vec![
            Expr::String("llamas".into()),
            Expr::String("alpacas".into())
        ])
    );
}

#[test]
fn test_contains_operator() {
    match parse(r#"["llamas", "alpacas"] @> "llamas""#) {
        Expr::Infix { op, .. } => assert_eq!(op, BinOp::Contains),
        other => panic!("expected infix, got {:?}", other),
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_closing_delimiters() {
    assert_eq!(
        parse_errors("(a == b"),
        vec!["expected next token to be ), got EOF instead".to_string()]
    );
    assert_eq!(
        parse_errors("[1, 2"),
        vec!["expected next token to be ], got EOF instead".to_string()]
    );
    assert_eq!(
        parse_errors("env('a'"),
        vec!["expected next token to be ), got EOF instead".to_string()]
    );
}

#[test]
fn test_trailing_comma_is_rejected() {
    assert_eq!(
        parse_errors("[1, 2,]"),
        vec!["no prefix parse function for ] found".to_string()]
    );
}

#[test]
fn test_illegal_characters_are_reported() {
    assert_eq!(
        parse_errors("a = b"),
        vec!["expected end of input, got =".to_string()]
    );
    assert_eq!(parse_errors("$"), vec!["illegal character '$'".to_string()]);
}

#[test]
fn test_missing_operand() {
    assert_eq!(parse_errors("a =="), vec!["unexpected end of input".to_string()]);
    assert_eq!(parse_errors(""), vec!["unexpected end of input".to_string()]);
}

#[test]
fn test_reports_independent_errors_in_one_pass() {
    let errors = parse_errors("(a == ) && [1, ");
    assert_eq!(
        errors,
        vec![
            "no prefix parse function for ) found".to_string(),
            "unexpected end of input".to_string(),
            "expected next token to be ], got EOF instead".to_string(),
        ]
    );
}

#[test]
fn test_partial_tree_is_returned() {
    let mut parser = Parser::new(Lexer::new("a && (b"));
    let expr = parser.parse();
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(expr.map(|e| e.to_string()), Some("(a && b)".to_string()));
}

fn depth_error() -> Vec<String> {
    vec![format!("expression nesting exceeds maximum depth of {}", MAX_DEPTH)]
}

#[test]
fn test_deep_nesting_is_a_parse_error() {
    let test_cases = vec![
        "(".repeat(100_000),
        "!".repeat(100_000),
        "-".repeat(100_000),
        "[".repeat(100_000),
        "f(".repeat(100_000),
        format!("{}true{}", "(".repeat(20_000), ")".repeat(20_000)),
        format!("{}true", "!".repeat(200_000)),
        format!("a{}", " && a".repeat(100_000)),
    ];

    for input in test_cases {
        let mut parser = Parser::new(Lexer::new(&input));
        let expr = parser.parse();
        assert_eq!(parser.errors().to_vec(), depth_error(), "Failed for input of {} bytes", input.len());
        assert_eq!(expr, None);
    }
}

#[test]
fn test_nesting_up_to_the_limit_is_accepted() {
    let input = format!("{}true", "!".repeat(MAX_DEPTH - 1));
    let expr = parse(&input);
    assert!(matches!(expr, Expr::Prefix { op: UnaryOp::Not, .. }));

    let input = format!("{}true", "!".repeat(MAX_DEPTH));
    assert_eq!(parse_errors(&input), depth_error());
}

#[test]
fn test_errors_before_deep_nesting_are_kept() {
    let input = format!("[$, {}", "(".repeat(1_000));
    let mut expected = vec!["illegal character '$'".to_string()];
    expected.extend(depth_error());
    assert_eq!(parse_errors(&input), expected);
}

// ============================================================================
// Rendering round-trip
// ============================================================================

fn name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}".prop_filter("keywords are not identifiers", |s| {
        s != "true" && s != "false"
    })
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0..i64::MAX).prop_map(Expr::Integer),
        "[a-zA-Z0-9 ._-]{0,8}".prop_map(Expr::String),
        "[a-z^$.+*]{0,6}".prop_map(Expr::Regexp),
        any::<bool>().prop_map(Expr::Boolean),
        name().prop_map(Expr::Identifier),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        let binop = prop_oneof![
            Just(BinOp::Equal),
            Just(BinOp::NotEqual),
            Just(BinOp::Match),
            Just(BinOp::NotMatch),
            Just(BinOp::Contains),
            Just(BinOp::And),
            Just(BinOp::Or),
            Just(BinOp::Dot),
        ];
        let unop = prop_oneof![Just(UnaryOp::Not), Just(UnaryOp::Negate)];

        prop_oneof![
            (binop, inner.clone(), inner.clone())
                .prop_map(|(op, left, right)| Expr::infix(op, left, right)),
            (unop, inner.clone()).prop_map(|(op, right)| Expr::prefix(op, right)),
            (name(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(function, args)| Expr::Call { function, args }),
            prop::collection::vec(inner, 0..3).prop_map(Expr::Array),
        ]
    })
}

proptest! {
    #[test]
    fn rendering_reparses_to_the_same_tree(expr in expr_strategy()) {
        let rendered = expr.to_string();
        let mut parser = Parser::new(Lexer::new(&rendered));
        let reparsed = parser.parse();
        prop_assert!(parser.errors().is_empty(), "{:?}: {:?}", rendered, parser.errors());
        prop_assert_eq!(reparsed, Some(expr));
    }
}
