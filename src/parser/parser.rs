//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parse entry point.
//! The parser pulls tokens from the lexer one at a time and uses a Pratt
//! parser with NUD/LED handlers for expressions and specialized functions
//! for statements.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence
//!
//! Syntax errors never escape the parser: they are recorded, the parser
//! skips to the next delimiter, and an error node stands in for the statement.

use std::{collections::HashMap, mem};

use thiserror::Error;

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_statement_list,
};

/// Syntax error codes, one per required construct.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing identifier")]
    MissingIdentifier,
    #[error("missing ':' before the type annotation")]
    MissingTypeAnnotation,
    #[error("missing type name")]
    MissingTypeName,
    #[error("missing delimiter")]
    MissingDelimiter,
    #[error("missing value to assign")]
    MissingRightValue,
    #[error("missing argument label")]
    MissingArgumentLabel,
    #[error("missing argument value")]
    MissingArgument,
    #[error("missing parameter label")]
    MissingParameterLabel,
    #[error("missing ':' after the label")]
    MissingColonAfterLabel,
    #[error("missing function name")]
    MissingFunctionName,
    #[error("missing '('")]
    MissingOpeningBracket,
    #[error("missing ')'")]
    MissingClosingBracket,
    #[error("missing '->'")]
    MissingRightArrow,
    #[error("missing return type")]
    MissingReturnType,
    #[error("missing '{{'")]
    MissingOpeningCurlyBracket,
    #[error("missing 'until' condition")]
    MissingUntilCondition,
    #[error("missing 'in'")]
    MissingInStatement,
    #[error("missing condition")]
    MissingCondition,
    #[error("missing operand")]
    MissingOperand,
    #[error("unresolvable token")]
    Unresolvable,
}

impl ParseError {
    pub fn get_error_name(&self) -> &'static str {
        match self {
            ParseError::MissingIdentifier => "MissingIdentifier",
            ParseError::MissingTypeAnnotation => "MissingTypeAnnotation",
            ParseError::MissingTypeName => "MissingTypeName",
            ParseError::MissingDelimiter => "MissingDelimiter",
            ParseError::MissingRightValue => "MissingRightValue",
            ParseError::MissingArgumentLabel => "MissingArgumentLabel",
            ParseError::MissingArgument => "MissingArgument",
            ParseError::MissingParameterLabel => "MissingParameterLabel",
            ParseError::MissingColonAfterLabel => "MissingColonAfterLabel",
            ParseError::MissingFunctionName => "MissingFunctionName",
            ParseError::MissingOpeningBracket => "MissingOpeningBracket",
            ParseError::MissingClosingBracket => "MissingClosingBracket",
            ParseError::MissingRightArrow => "MissingRightArrow",
            ParseError::MissingReturnType => "MissingReturnType",
            ParseError::MissingOpeningCurlyBracket => "MissingOpeningCurlyBracket",
            ParseError::MissingUntilCondition => "MissingUntilCondition",
            ParseError::MissingInStatement => "MissingInStatement",
            ParseError::MissingCondition => "MissingCondition",
            ParseError::MissingOperand => "MissingOperand",
            ParseError::Unresolvable => "Unresolvable",
        }
    }
}

/// The main parser structure that maintains parsing state.
///
/// This struct owns the lexer it pulls from and the single token of
/// lookahead. It remembers the last consumed token, which anchors the
/// location of syntax errors.
pub struct Parser {
    /// The lexer tokens are pulled from
    lexer: Lexer,
    /// The token currently being looked at
    current: Token,
    /// The last consumed token, used as the anchor for diagnostics
    diagnostic: Option<Token>,
    /// Number of tokens consumed so far
    pos: usize,
    /// The most recent syntax error code
    parse_error: Option<ParseError>,
    /// Lexical and syntax diagnostics in the order they were found
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix/postfix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser and pulls the first token.
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            diagnostic: None,
            pos: 0,
            parse_error: None,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        parser.record_lexical_error();

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the binding power of the current token, `Default` if it has none.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current.kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Pulls the next token from the lexer and returns the one just consumed.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let previous = mem::replace(&mut self.current, next);
        self.record_lexical_error();

        self.pos += 1;
        self.diagnostic = Some(previous.clone());
        previous
    }

    /// Lexical errors are reported once, when their token is pulled.
    fn record_lexical_error(&mut self) {
        if let Some(error) = self.current.error {
            self.errors.push(Error::new(
                ErrorImpl::Lexical(error),
                self.current.location,
                self.current.lexeme.clone(),
            ));
        }
    }

    /// Consumes the current token if it has the expected kind, otherwise fails with `error`.
    pub fn expect(&mut self, expected_kind: TokenKind, error: ParseError) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            return Err(self.fail(error));
        }

        Ok(self.advance())
    }

    /// Records `error` as the current parse error and builds its diagnostic,
    /// anchored at the last consumed token.
    pub fn fail(&mut self, error: ParseError) -> Error {
        self.parse_error = Some(error);

        let anchor = self.diagnostic.as_ref().unwrap_or(&self.current);
        Error::new(ErrorImpl::Syntax(error), anchor.location, anchor.lexeme.clone())
    }

    /// Keeps a syntax diagnostic unless the parser is stopped on a lexical
    /// error token, which has already been reported.
    pub fn report(&mut self, error: Error) {
        if !self.current.is_error() {
            self.errors.push(error);
        }
    }

    /// Panic-mode recovery: discards tokens up to the next delimiter or EOF.
    ///
    /// Stops in front of a `}` that closes the enclosing block, and ignores
    /// delimiters inside blocks opened within the discarded region.
    pub fn synchronize(&mut self) {
        let mut depth = 0usize;

        loop {
            match self.current.kind {
                TokenKind::EOF => return,
                TokenKind::Delimiter | TokenKind::CloseCurly if depth == 0 => return,
                TokenKind::CloseCurly => depth -= 1,
                TokenKind::OpenCurly => depth += 1,
                _ => {}
            }

            self.advance();
        }
    }

    /// Skips delimiter tokens, returning whether any were skipped.
    pub fn skip_delimiters(&mut self) -> bool {
        let mut skipped = false;
        while self.current.kind == TokenKind::Delimiter {
            self.advance();
            skipped = true;
        }

        skipped
    }

    /// A statement ends at a delimiter, EOF, or the `}` closing its block.
    /// Statements that already looked past their delimiter (an `if` probing
    /// for `else`) are terminated by the delimiter they consumed.
    pub fn expect_terminator(&mut self) -> Result<(), Error> {
        match self.current.kind {
            TokenKind::Delimiter => {
                self.advance();
                Ok(())
            }
            TokenKind::EOF | TokenKind::CloseCurly => Ok(()),
            _ if self
                .diagnostic
                .as_ref()
                .is_some_and(|token| token.kind == TokenKind::Delimiter) =>
            {
                Ok(())
            }
            _ => Err(self.fail(ParseError::MissingDelimiter)),
        }
    }

    /// Whether the current token can begin an expression.
    pub fn is_expression_start(&self) -> bool {
        self.nud_lookup.contains_key(&self.current.kind)
    }

    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    pub fn get_pos(&self) -> usize {
        self.pos
    }

    pub fn get_parse_error(&self) -> Option<ParseError> {
        self.parse_error
    }

    pub fn get_errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix/postfix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix/primary) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses one translation unit into a `Program` node.
///
/// This is the main entry point for parsing. It creates a parser over the
/// lexer, initializes all lookup tables, and parses statements until EOF.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, holding every lexical and syntax diagnostic
/// - The `Program` node; statements that failed to parse are `Error` nodes
pub fn parse(lexer: Lexer) -> (Parser, Node) {
    let mut parser = Parser::new(lexer);
    create_token_lookups(&mut parser);

    let statements = parse_statement_list(&mut parser, false);

    (parser, Node::new(NodeKind::Program { statements }))
}
