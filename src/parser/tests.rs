use super::*;
use crate::ast::{Expr, InfixOp, PrefixOp, Stmt};
use crate::lexer::Lexer;

fn parse(input: &str) -> Program {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty(), "unexpected parser errors: {:?}", parser.errors());
    program
}

#[test]
fn let_statement_renders_stably() {
    let program = parse("mana myVar = anotherVar|");
    assert_eq!(program.to_string(), "mana myVar = anotherVar|");
}

#[test]
fn return_statement_parses() {
    let program = parse("labh 5|");
    assert_eq!(program.0.len(), 1);
    assert!(matches!(&program.0[0], Stmt::Return { value: Expr::Integer(5) }));
}

#[test]
fn compound_assignment_parses() {
    let program = parse("x += 1|");
    match &program.0[0] {
        Stmt::CompoundAssignment { name, op, value } => {
            assert_eq!(name, "x");
            assert_eq!(*op, crate::ast::CompoundOp::PlusAssign);
            assert_eq!(*value, Expr::Integer(1));
        }
        other => panic!("expected compound assignment, got {other:?}"),
    }
}

#[test]
fn operator_precedence_matches_arithmetic_conventions() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a + b * c", "(a + (b * c))"),
        ("a + b % c", "(a + (b % c))"),
        ("a * b / c", "((a * b) / c)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        ("a < b == c > d", "((a < b) == (c > d))"),
        ("a <= b", "(a <= b)"),
        ("a >= b", "(a >= b)"),
    ];

    for (input, expected) in cases {
        let program = parse(input);
        match &program.0[0] {
            Stmt::Expression { expr } => assert_eq!(expr.to_string(), expected, "input: {input}"),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }
}

#[test]
fn prefix_expressions_parse() {
    let program = parse("!panch|");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::Prefix { op, right } } => {
            assert_eq!(*op, PrefixOp::Bang);
            assert_eq!(**right, Expr::Identifier("panch".to_string()));
        }
        other => panic!("expected prefix expression, got {other:?}"),
    }
}

#[test]
fn infix_expressions_parse() {
    let program = parse("5 + 5|");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::Infix { op, left, right } } => {
            assert_eq!(*op, InfixOp::Plus);
            assert_eq!(**left, Expr::Integer(5));
            assert_eq!(**right, Expr::Integer(5));
        }
        other => panic!("expected infix expression, got {other:?}"),
    }
}

#[test]
fn if_expression_without_alternative_parses() {
    let program = parse("agar (x < y) { x }");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::If { alternative, .. } } => {
            assert!(alternative.is_none());
        }
        other => panic!("expected if expression, got {other:?}"),
    }
}

#[test]
fn if_expression_with_alternative_renders_with_varna() {
    let program = parse("agar (x < y) { x } varna { y }");
    assert_eq!(program.to_string(), "agar (x < y) x varna y");
}

#[test]
fn while_expression_parses() {
    let program = parse("jabtak (x < 10) { x += 1| }");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::While { .. } } => {}
        other => panic!("expected while expression, got {other:?}"),
    }
}

#[test]
fn function_literal_parses_parameters_and_body() {
    let program = parse("karya(x, y) { x + y| }");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::Function { parameters, .. } } => {
            assert_eq!(parameters, &vec!["x".to_string(), "y".to_string()]);
        }
        other => panic!("expected function literal, got {other:?}"),
    }
}

#[test]
fn call_expression_parses_arguments() {
    let program = parse("add(1, 2 * 3, 4 + 5)|");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::Call { arguments, .. } } => {
            assert_eq!(arguments.len(), 3);
        }
        other => panic!("expected call expression, got {other:?}"),
    }
}

#[test]
fn array_literal_parses() {
    let program = parse("[1, 2 * 2, 3 + 3]|");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::Array(elements) } => assert_eq!(elements.len(), 3),
        other => panic!("expected array literal, got {other:?}"),
    }
}

#[test]
fn index_expression_parses() {
    let program = parse("myArray[1 + 1]|");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::Index { .. } } => {}
        other => panic!("expected index expression, got {other:?}"),
    }
}

#[test]
fn slice_expression_parses_distinctly_from_index() {
    let program = parse("myArray[1:3]|");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::SliceArray { slice, .. } } => {
            assert!(matches!(**slice, Expr::Slice { .. }));
        }
        other => panic!("expected slice expression, got {other:?}"),
    }
}

#[test]
fn hash_literal_with_string_keys_parses() {
    let program = parse(r#"{"one": 1, "two": 2}|"#);
    match &program.0[0] {
        Stmt::Expression { expr: Expr::Hash(pairs) } => assert_eq!(pairs.len(), 2),
        other => panic!("expected hash literal, got {other:?}"),
    }
}

#[test]
fn empty_hash_literal_parses() {
    let program = parse("{}|");
    match &program.0[0] {
        Stmt::Expression { expr: Expr::Hash(pairs) } => assert!(pairs.is_empty()),
        other => panic!("expected empty hash literal, got {other:?}"),
    }
}

#[test]
fn devanagari_keywords_parse_identically_to_latin() {
    let latin = parse("mana x = 5|");
    let devanagari = parse("माना x = 5|");
    assert_eq!(latin.to_string(), devanagari.to_string());
}

#[test]
fn missing_statement_terminator_is_recorded_as_a_parse_error() {
    let mut parser = Parser::new(Lexer::new("mana x = 5 mana y = 10|"));
    parser.parse_program();
    assert!(!parser.errors().is_empty());
}

#[test]
fn unknown_prefix_token_is_recorded_as_a_parse_error() {
    let mut parser = Parser::new(Lexer::new(")|"));
    parser.parse_program();
    assert!(parser
        .errors()
        .iter()
        .any(|err| matches!(err, ParseError::NoPrefixParseFn(_))));
}
