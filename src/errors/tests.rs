//! Unit tests for error handling.
//!
//! This module contains tests for error names, tips and the rendered
//! diagnostic shapes of each pass.

use crate::{
    analyzer::analyzer::AnalyzerError,
    errors::errors::{Error, ErrorImpl, ErrorTip, SourceError},
    lexer::tokens::TokenError,
    parser::parser::ParseError,
    Location,
};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::Lexical(TokenError::Unrecognizable),
        Location::new(3, 7),
        "@".to_string(),
    );

    assert_eq!(error.get_error_name(), "Unrecognizable");
    assert_eq!(error.get_location(), Location::new(3, 7));
    assert_eq!(error.get_lexeme(), "@");
}

#[test]
fn test_from_conversions() {
    assert_eq!(
        ErrorImpl::from(ParseError::MissingDelimiter),
        ErrorImpl::Syntax(ParseError::MissingDelimiter)
    );
    assert_eq!(
        ErrorImpl::from(AnalyzerError::UnknownType),
        ErrorImpl::Semantic(AnalyzerError::UnknownType)
    );
}

#[test]
fn test_lexical_error_display() {
    let error = Error::new(
        ErrorImpl::Lexical(TokenError::MalformedNumeric),
        Location::new(1, 14),
        "12.3.4".to_string(),
    );

    assert_eq!(
        error.to_string(),
        "[ERROR] malformed numeric literal at '12.3.4' at location 1:14"
    );
}

#[test]
fn test_syntax_error_display() {
    let error = Error::new(
        ErrorImpl::Syntax(ParseError::MissingIdentifier),
        Location::new(2, 1),
        "var".to_string(),
    );

    assert_eq!(
        error.to_string(),
        "Parsing Error at 2:1\n[ERROR] missing identifier after 'var'"
    );
}

#[test]
fn test_semantic_error_display() {
    let error = Error::new(
        ErrorImpl::Semantic(AnalyzerError::UndeclaredVariable),
        Location::new(4, 1),
        "count".to_string(),
    );

    assert_eq!(
        error.to_string(),
        "[ERROR] undeclared variable at 'count' at location 4:1"
    );
}

#[test]
fn test_source_error_display() {
    let error = Error::new(
        ErrorImpl::Source(SourceError::InvalidExtension),
        Location::start(),
        "main.txt".to_string(),
    );

    assert_eq!(error.get_error_name(), "InvalidExtension");
    assert_eq!(
        error.to_string(),
        "[ERROR] not an Opus source file (must be .opus) 'main.txt'"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::Semantic(AnalyzerError::DivisionByZero),
        Location::start(),
        "/".to_string(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::Semantic(AnalyzerError::RedeclaredVariable),
        Location::start(),
        "x".to_string(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(message) => assert!(message.contains("`x`")),
        ErrorTip::None => panic!("Expected suggestion"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Use var instead".to_string());
    assert_eq!(format!("{}", tip), "Use var instead");

    let no_tip = ErrorTip::None;
    assert_eq!(format!("{}", no_tip), "");
}

#[test]
fn test_undefined_operator_tip_names_the_run() {
    let error = Error::new(
        ErrorImpl::Lexical(TokenError::UndefinedOperator),
        Location::start(),
        "=+".to_string(),
    );

    assert_eq!(error.get_tip().to_string(), "`=+` is not an operator; separate operators with spaces");
}
