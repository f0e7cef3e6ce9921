use std::fmt::Display;

use thiserror::Error;

use crate::{analyzer::analyzer::AnalyzerError, lexer::tokens::TokenError, parser::parser::ParseError, Location};

/// A diagnostic produced by any pass of the front end.
///
/// `lexeme` is the text of the token the diagnostic is attributed to: the
/// offending token for lexical and semantic errors, and the last successfully
/// consumed token for syntax errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    location: Location,
    lexeme: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: Location, lexeme: String) -> Self {
        Error {
            internal_error: error_impl,
            location,
            lexeme,
        }
    }

    pub fn get_location(&self) -> Location {
        self.location
    }

    pub fn get_lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Lexical(error) => error.get_error_name(),
            ErrorImpl::Syntax(error) => error.get_error_name(),
            ErrorImpl::Semantic(error) => error.get_error_name(),
            ErrorImpl::Source(SourceError::InvalidExtension) => "InvalidExtension",
            ErrorImpl::Source(SourceError::Unreadable) => "Unreadable",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::Lexical(TokenError::OrphanUnderscore) => ErrorTip::Suggestion(String::from(
                "a lone underscore must be followed by a letter or another underscore",
            )),
            ErrorImpl::Lexical(TokenError::UndefinedOperator) => ErrorTip::Suggestion(format!(
                "`{}` is not an operator; separate operators with spaces",
                self.lexeme
            )),
            ErrorImpl::Lexical(_) => ErrorTip::None,
            ErrorImpl::Syntax(ParseError::MissingDelimiter) => ErrorTip::Suggestion(String::from(
                "statements must be separated by a newline or `;`",
            )),
            ErrorImpl::Syntax(ParseError::MissingArgumentLabel) => ErrorTip::Suggestion(String::from(
                "every argument needs a label, e.g. `f(value: 1)`",
            )),
            ErrorImpl::Syntax(_) => ErrorTip::None,
            ErrorImpl::Semantic(AnalyzerError::UndeclaredVariable) => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", self.lexeme))
            }
            ErrorImpl::Semantic(AnalyzerError::RedeclaredVariable) => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared in this scope", self.lexeme))
            }
            ErrorImpl::Semantic(AnalyzerError::ImmutableModification) => ErrorTip::Suggestion(format!(
                "`{}` is a constant; declare it with `var` to reassign it",
                self.lexeme
            )),
            ErrorImpl::Semantic(_) => ErrorTip::None,
            ErrorImpl::Source(SourceError::InvalidExtension) => ErrorTip::Suggestion(format!(
                "Opus sources must end in `{}`",
                crate::OPUS_FILE_EXTENSION
            )),
            ErrorImpl::Source(SourceError::Unreadable) => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.internal_error {
            ErrorImpl::Syntax(_) => write!(
                f,
                "Parsing Error at {}\n[ERROR] {} after '{}'",
                self.location, self.internal_error, self.lexeme
            ),
            ErrorImpl::Source(_) => write!(f, "[ERROR] {} '{}'", self.internal_error, self.lexeme),
            _ => write!(
                f,
                "[ERROR] {} at '{}' at location {}",
                self.internal_error, self.lexeme, self.location
            ),
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error(transparent)]
    Lexical(#[from] TokenError),
    #[error(transparent)]
    Syntax(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] AnalyzerError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    #[error("not an Opus source file (must be .opus)")]
    InvalidExtension,
    #[error("could not open the Opus source file")]
    Unreadable,
}
