//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Declarations and assignments
//! - Operator precedence and associativity
//! - Function definitions and labeled calls
//! - Control flow statements
//! - Panic-mode recovery and error codes

use crate::{
    ast::ast::{Node, NodeKind, NodeType},
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenError},
    Location,
};

use super::parser::{parse, ParseError, Parser};

fn parse_source(source: &str) -> (Parser, Node) {
    parse(Lexer::new(source.to_string()))
}

fn syntax_errors(parser: &Parser) -> Vec<ParseError> {
    parser
        .get_errors()
        .iter()
        .filter_map(|error| match error.get_internal_error() {
            ErrorImpl::Syntax(code) => Some(*code),
            _ => None,
        })
        .collect()
}

fn single_statement(source: &str) -> Node {
    let (parser, program) = parse_source(source);
    assert!(parser.get_errors().is_empty(), "{:?}", parser.get_errors());
    assert_eq!(program.statements().len(), 1);

    program.statements()[0].clone()
}

fn operator_of(node: &Node) -> &str {
    &node.get_token().unwrap().lexeme
}

#[test]
fn test_parse_empty_program() {
    let (parser, program) = parse_source("\n\n;\n");

    assert!(parser.get_errors().is_empty());
    assert_eq!(program.get_node_type(), NodeType::Program);
    assert!(program.statements().is_empty());
}

#[test]
fn test_parse_declaration() {
    let node = single_statement("var count: Int");

    let NodeKind::Declaration {
        keyword,
        identifier,
        type_annotation,
    } = &node.kind
    else {
        panic!("expected declaration, got {:?}", node.kind);
    };
    assert_eq!(keyword.lexeme, "var");
    assert_eq!(identifier.lexeme, "count");
    assert_eq!(type_annotation.get_token().unwrap().lexeme, "Int");
}

#[test]
fn test_parse_declaration_with_value() {
    let node = single_statement("let pi: Float = 3.14");

    let NodeKind::Assignment { target, value, .. } = &node.kind else {
        panic!("expected assignment, got {:?}", node.kind);
    };
    assert_eq!(target.get_node_type(), NodeType::Declaration);
    assert_eq!(value.get_node_type(), NodeType::Literal);
    assert_eq!(operator_of(value), "3.14");
}

#[test]
fn test_parse_assignment() {
    let node = single_statement("x = y");

    let NodeKind::Assignment { target, value, .. } = &node.kind else {
        panic!("expected assignment, got {:?}", node.kind);
    };
    assert_eq!(target.get_node_type(), NodeType::Identifier);
    assert_eq!(value.get_node_type(), NodeType::Identifier);
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let node = single_statement("1 + 2 * 3");

    let NodeKind::BinaryExpression { left, right, .. } = &node.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator_of(&node), "+");
    assert_eq!(left.get_node_type(), NodeType::Literal);
    assert_eq!(right.get_node_type(), NodeType::BinaryExpression);
    assert_eq!(operator_of(right), "*");
}

#[test]
fn test_binary_operators_are_left_associative() {
    let node = single_statement("10 - 4 - 3");

    let NodeKind::BinaryExpression { left, right, .. } = &node.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(left.get_node_type(), NodeType::BinaryExpression);
    assert_eq!(operator_of(left), "-");
    assert_eq!(operator_of(right), "3");
}

#[test]
fn test_logical_and_binds_tighter_than_or() {
    let node = single_statement("a || b && c");

    let NodeKind::BinaryExpression { right, .. } = &node.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator_of(&node), "||");
    assert_eq!(operator_of(right), "&&");
}

#[test]
fn test_relational_binds_tighter_than_logical() {
    let node = single_statement("a < b && c >= d");

    let NodeKind::BinaryExpression { left, right, .. } = &node.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator_of(&node), "&&");
    assert_eq!(operator_of(left), "<");
    assert_eq!(operator_of(right), ">=");
}

#[test]
fn test_prefix_binds_tighter_than_multiplication() {
    let node = single_statement("-a * b");

    let NodeKind::BinaryExpression { left, .. } = &node.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator_of(&node), "*");
    assert_eq!(left.get_node_type(), NodeType::UnaryExpression);
}

#[test]
fn test_postfix_factorial() {
    let node = single_statement("n! * 2");

    let NodeKind::BinaryExpression { left, .. } = &node.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(left.get_node_type(), NodeType::PostfixExpression);
    assert_eq!(operator_of(left), "!");
}

#[test]
fn test_prefix_not() {
    let node = single_statement("!done");

    assert_eq!(node.get_node_type(), NodeType::UnaryExpression);
    assert_eq!(operator_of(&node), "!");
}

#[test]
fn test_grouping_overrides_precedence() {
    let node = single_statement("(1 + 2) * 3");

    let NodeKind::BinaryExpression { left, .. } = &node.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(operator_of(&node), "*");
    assert_eq!(operator_of(left), "+");
}

#[test]
fn test_parse_function_definition() {
    let node = single_statement("func add(a: Int, b: Int) -> Int {\n    return a + b\n}");

    let NodeKind::FunctionDefinition {
        name,
        signature,
        body,
        ..
    } = &node.kind
    else {
        panic!("expected function definition");
    };
    assert_eq!(name.lexeme, "add");

    let NodeKind::FunctionSignature {
        parameters,
        return_type,
    } = &signature.kind
    else {
        panic!("expected signature");
    };
    let NodeKind::ParameterList { parameters } = &parameters.kind else {
        panic!("expected parameter list");
    };
    assert_eq!(parameters.len(), 2);
    assert_eq!(operator_of(&parameters[1]), "b");
    assert_eq!(operator_of(return_type), "Int");

    assert_eq!(body.statements().len(), 1);
    assert_eq!(body.statements()[0].get_node_type(), NodeType::ReturnStatement);
}

#[test]
fn test_parse_labeled_call() {
    let node = single_statement("add(a: 1, b: 2 * 3)");

    let NodeKind::FunctionCall { callee, arguments } = &node.kind else {
        panic!("expected call");
    };
    assert_eq!(callee.lexeme, "add");

    let NodeKind::ArgumentList { arguments } = &arguments.kind else {
        panic!("expected argument list");
    };
    assert_eq!(arguments.len(), 2);
    assert_eq!(operator_of(&arguments[0]), "a");
}

#[test]
fn test_parse_call_without_arguments() {
    let node = single_statement("tick()");

    let NodeKind::FunctionCall { arguments, .. } = &node.kind else {
        panic!("expected call");
    };
    assert_eq!(arguments.get_node_type(), NodeType::ArgumentList);
}

#[test]
fn test_parse_if_else_chain_across_lines() {
    let node = single_statement("if a {\n  x = 1\n}\nelse if b {\n  x = 2\n}\nelse {\n  x = 3\n}");

    let NodeKind::ConditionalStatement { else_branch, .. } = &node.kind else {
        panic!("expected conditional");
    };
    let nested = else_branch.as_ref().unwrap();
    assert_eq!(nested.get_node_type(), NodeType::ConditionalStatement);

    let NodeKind::ConditionalStatement { else_branch, .. } = &nested.kind else {
        panic!("expected conditional");
    };
    assert_eq!(else_branch.as_ref().unwrap().get_node_type(), NodeType::CodeBlock);
}

#[test]
fn test_if_without_else_followed_by_statement() {
    let (parser, program) = parse_source("if a {\n}\nx = 1\n");

    assert!(parser.get_errors().is_empty());
    assert_eq!(program.statements().len(), 2);
    assert_eq!(program.statements()[1].get_node_type(), NodeType::Assignment);
}

#[test]
fn test_parse_repeat_until() {
    let node = single_statement("repeat {\n  i = i + 1\n} until i >= 10");

    let NodeKind::RepeatUntilStatement { body, condition, .. } = &node.kind else {
        panic!("expected repeat");
    };
    assert_eq!(body.statements().len(), 1);
    assert_eq!(operator_of(condition), ">=");
}

#[test]
fn test_parse_for_in() {
    let node = single_statement("for c in \"abc\" {\n}");

    let NodeKind::ForInStatement { variable, iterable, .. } = &node.kind else {
        panic!("expected for");
    };
    assert_eq!(variable.lexeme, "c");
    assert_eq!(iterable.get_node_type(), NodeType::Literal);
}

#[test]
fn test_parse_bare_return_and_block() {
    let (parser, program) = parse_source("{\n  return\n}");

    assert!(parser.get_errors().is_empty());
    let block = &program.statements()[0];
    assert_eq!(block.get_node_type(), NodeType::CodeBlock);

    let NodeKind::ReturnStatement { value, .. } = &block.statements()[0].kind else {
        panic!("expected return");
    };
    assert!(value.is_none());
}

#[test]
fn test_semicolon_separates_statements() {
    let (parser, program) = parse_source("var a: Int = 1; a = 2");

    assert!(parser.get_errors().is_empty());
    assert_eq!(program.statements().len(), 2);
}

#[test]
fn test_recovery_continues_after_error() {
    let (parser, program) = parse_source("var : Int\nvar y: Int = 1\n");

    assert_eq!(syntax_errors(&parser), vec![ParseError::MissingIdentifier]);
    assert_eq!(program.statements().len(), 2);
    assert!(program.statements()[0].is_error());
    assert_eq!(program.statements()[1].get_node_type(), NodeType::Assignment);
}

#[test]
fn test_error_is_anchored_at_last_consumed_token() {
    let (parser, _) = parse_source("var x Int");

    let error = &parser.get_errors()[0];
    assert_eq!(error.get_location(), Location::new(1, 5));
    assert_eq!(error.get_lexeme(), "x");
    assert_eq!(parser.get_parse_error(), Some(ParseError::MissingTypeAnnotation));
}

#[test]
fn test_recovery_inside_block_stops_at_closing_brace() {
    let (parser, program) = parse_source("{ var : Int }\nvar y: Int\n");

    assert_eq!(syntax_errors(&parser), vec![ParseError::MissingIdentifier]);
    assert_eq!(program.statements().len(), 2);
    assert!(program.statements()[0].statements()[0].is_error());
    assert_eq!(program.statements()[1].get_node_type(), NodeType::Declaration);
}

#[test]
fn test_recovery_skips_nested_blocks() {
    let (parser, program) = parse_source("if { x = 1 }\ny = 2\n");

    assert_eq!(syntax_errors(&parser), vec![ParseError::MissingCondition]);
    assert_eq!(program.statements().len(), 2);
    assert_eq!(program.statements()[1].get_node_type(), NodeType::Assignment);
}

#[test]
fn test_lexical_error_is_reported_once() {
    let (parser, program) = parse_source("var x: Int = 3 $ 4\nx = 1");

    assert_eq!(parser.get_errors().len(), 1);
    assert_eq!(
        parser.get_errors()[0].get_internal_error(),
        &ErrorImpl::Lexical(TokenError::Unrecognizable)
    );
    assert_eq!(program.statements().len(), 2);
}

#[test]
fn test_number_before_brace_keeps_blocks_balanced() {
    let (parser, program) = parse_source("var x: Int = 1\nif x > 3{\n}");
    assert!(parser.get_errors().is_empty(), "{:?}", parser.get_errors());
    assert_eq!(program.statements()[1].get_node_type(), NodeType::ConditionalStatement);

    let (parser, _) = parse_source("if x > 3.3.{\n}");
    assert_eq!(parser.get_errors().len(), 1);
    assert_eq!(
        parser.get_errors()[0].get_internal_error(),
        &ErrorImpl::Lexical(TokenError::MalformedNumeric)
    );
}

#[test]
fn test_unclosed_block_reports_only_lexical_error() {
    let (parser, program) = parse_source("if true {\n  x = 1\n");

    assert_eq!(parser.get_errors().len(), 1);
    assert_eq!(
        parser.get_errors()[0].get_internal_error(),
        &ErrorImpl::Lexical(TokenError::UnclosedBrace)
    );
    assert_eq!(program.statements()[0].get_node_type(), NodeType::ConditionalStatement);
}

#[test]
fn test_every_parse_error_is_reachable() {
    let cases = [
        ("var : Int", ParseError::MissingIdentifier),
        ("var x Int", ParseError::MissingTypeAnnotation),
        ("var x: = 3", ParseError::MissingTypeName),
        ("var x: Int var y: Int", ParseError::MissingDelimiter),
        ("var x: Int =", ParseError::MissingRightValue),
        ("f(1)", ParseError::MissingArgumentLabel),
        ("f(x: )", ParseError::MissingArgument),
        ("func f(1) -> Int {}", ParseError::MissingParameterLabel),
        ("f(x 1)", ParseError::MissingColonAfterLabel),
        ("func (x: Int) -> Int {}", ParseError::MissingFunctionName),
        ("1(x: 2)", ParseError::MissingFunctionName),
        ("func f -> Int {}", ParseError::MissingOpeningBracket),
        ("f(x: 1 2)", ParseError::MissingClosingBracket),
        ("func f() Int {}", ParseError::MissingRightArrow),
        ("func f() -> {}", ParseError::MissingReturnType),
        ("if true return", ParseError::MissingOpeningCurlyBracket),
        ("repeat {\n}", ParseError::MissingUntilCondition),
        ("repeat {\n} until", ParseError::MissingUntilCondition),
        ("for i of items {}", ParseError::MissingInStatement),
        ("if {}", ParseError::MissingCondition),
        ("x = 1 +", ParseError::MissingOperand),
        ("else {}", ParseError::Unresolvable),
    ];

    for (source, expected) in cases {
        let (parser, _) = parse_source(source);
        assert_eq!(syntax_errors(&parser), vec![expected], "source: {:?}", source);
    }
}
