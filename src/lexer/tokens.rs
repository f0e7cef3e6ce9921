use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use thiserror::Error;

use crate::Location;

/// Upper bound on the number of characters a single lexeme may hold.
pub const LEXEME_LENGTH: usize = 256;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("let", TokenKind::Let);
        map.insert("func", TokenKind::Func);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("until", TokenKind::Until);
        map.insert("for", TokenKind::For);
        map.insert("in", TokenKind::In);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,
    Numeric,
    String,
    Identifier,
    Delimiter,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // ! (prefix)
    Factorial,  // ! (postfix)
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Colon,
    Comma,
    Arrow,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Var,
    Let,
    Func,
    Return,
    If,
    Else,
    Repeat,
    Until,
    For,
    In,
    True,
    False,
}

impl TokenKind {
    /// Tokens after which a `!` is read as a postfix factorial.
    pub fn allows_postfix(&self) -> bool {
        matches!(self, TokenKind::Numeric | TokenKind::Identifier)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}

/// Reasons a lexeme could not be turned into a regular token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("unrecognizable character")]
    Unrecognizable,
    #[error("malformed numeric literal")]
    MalformedNumeric,
    #[error("undefined operator")]
    UndefinedOperator,
    #[error("lexeme exceeds the buffer length")]
    Overflow,
    #[error("orphan underscore")]
    OrphanUnderscore,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unclosed parenthesis")]
    UnclosedParenthesis,
    #[error("unclosed curly brace")]
    UnclosedBrace,
    #[error("unclosed square bracket")]
    UnclosedBracket,
    #[error("closing bracket without a matching opener")]
    UnmatchedClosure,
}

impl TokenError {
    pub fn get_error_name(&self) -> &'static str {
        match self {
            TokenError::Unrecognizable => "Unrecognizable",
            TokenError::MalformedNumeric => "MalformedNumeric",
            TokenError::UndefinedOperator => "UndefinedOperator",
            TokenError::Overflow => "Overflow",
            TokenError::OrphanUnderscore => "OrphanUnderscore",
            TokenError::UnterminatedString => "UnterminatedString",
            TokenError::UnclosedParenthesis => "UnclosedParenthesis",
            TokenError::UnclosedBrace => "UnclosedBrace",
            TokenError::UnclosedBracket => "UnclosedBracket",
            TokenError::UnmatchedClosure => "UnmatchedClosure",
        }
    }
}

/// A single lexeme. `error` is only ever set on `TokenKind::Error` tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub error: Option<TokenError>,
    pub location: Location,
    pub lexeme: String,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.error {
            Some(error) => write!(
                f,
                "{:<14} {:<20} {:<8} {:?}",
                self.kind,
                error.get_error_name(),
                self.location.to_string(),
                self.lexeme
            ),
            None => write!(
                f,
                "{:<14} {:<20} {:<8} {:?}",
                self.kind,
                "",
                self.location.to_string(),
                self.lexeme
            ),
        }
    }
}

impl Token {
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}
