//! Unit tests for the AST module.
//!
//! This module contains tests for node helpers, the type and value
//! definitions, and the tree dump.

use crate::{analyzer::analyzer::analyze, lexer::lexer::Lexer, parser::parser::parse};

use super::{
    ast::{Node, NodeKind, NodeType},
    types::{Type, Value},
};

fn parse_source(source: &str) -> Node {
    let (parser, program) = parse(Lexer::new(source.to_string()));
    assert!(parser.get_errors().is_empty(), "{:?}", parser.get_errors());

    program
}

#[test]
fn test_type_names() {
    assert_eq!(Type::from_name("Int"), Some(Type::Int));
    assert_eq!(Type::from_name("Void"), Some(Type::Void));
    assert_eq!(Type::from_name("int"), None);
    assert_eq!(Type::Float.to_string(), "Float");
}

#[test]
fn test_type_widening() {
    assert_eq!(Type::Int.widen(&Type::Int), Type::Int);
    assert_eq!(Type::Int.widen(&Type::Float), Type::Float);
    assert_eq!(Type::Float.widen(&Type::Int), Type::Float);
    assert!(Type::Int.is_numeric());
    assert!(!Type::Bool.is_numeric());
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Int(7).to_string(), "7");
    assert_eq!(Value::Float(2.0).to_string(), "2.0");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::String("a\"b".to_string()).to_string(), "\"a\\\"b\"");
    assert_eq!(Value::Int(3).as_float(), Some(3.0));
    assert_eq!(Value::String(String::new()).get_type(), Type::String);
}

#[test]
fn test_node_helpers() {
    let error = Node::error();
    assert!(error.is_error());
    assert!(!error.is_foldable());
    assert_eq!(error.get_node_type(), NodeType::Error);
    assert!(error.get_token().is_none());
    assert!(error.statements().is_empty());

    let block = Node::new(NodeKind::CodeBlock {
        statements: vec![Node::error(), Node::error()],
    });
    assert_eq!(block.statements().len(), 2);
}

#[test]
fn test_tree_dump() {
    let program = parse_source("var x: Int = 1 + 2");

    let expected = "\
Program
└── Assignment (=)
    ├── Declaration (var)
    │   ├── Identifier (x)
    │   └── TypeAnnotation (Int)
    └── BinaryExpression (+)
        ├── Literal (1)
        └── Literal (2)
";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn test_tree_dump_with_annotations() {
    let mut program = parse_source("var x: Int = 1 + 2");
    let (_, success) = analyze(&mut program);
    assert!(success);

    let expected = "\
Program
└── Assignment (=) : Int = 3
    ├── Declaration (var) : Int
    │   ├── Identifier (x)
    │   └── TypeAnnotation (Int) : Int
    └── BinaryExpression (+) : Int = 3
        ├── Literal (1) : Int = 1
        └── Literal (2) : Int = 2
";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn test_tree_dump_of_function() {
    let program = parse_source("func id(v: Int) -> Int {\n  return v\n}\nid(v: 1)");
    let dump = program.to_string();

    assert!(dump.contains("├── FunctionDefinition (func)"));
    assert!(dump.contains("│   ├── Identifier (id)"));
    assert!(dump.contains("│   │   │   └── Parameter (v)"));
    assert!(dump.contains("│   │   │       ├── ParameterLabel (v)"));
    assert!(dump.contains("└── FunctionCall (id)"));
    assert!(dump.contains("            ├── ArgumentLabel (v)"));
}
