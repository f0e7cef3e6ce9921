//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance (optionally carrying a TokenError)
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for single-character punctuation
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The token's lexeme
/// * `$location` - Location of the first character of the lexeme
/// * `$error` - (optional) The TokenError; the kind is forced to `TokenKind::Error`
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Numeric, "42".to_string(), location);
/// let error = MK_TOKEN!(TokenError::OrphanUnderscore, "_".to_string(), location, error);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $location:expr) => {
        Token {
            kind: $kind,
            error: None,
            location: $location,
            lexeme: $lexeme,
        }
    };
    ($error:expr, $lexeme:expr, $location:expr, error) => {
        Token {
            kind: TokenKind::Error,
            error: Some($error),
            location: $location,
            lexeme: $lexeme,
        }
    };
}

/// Creates a default lexer handler for simple single-token patterns.
///
/// Generates a handler function that creates a token with the given kind
/// at the lexer's current location and advances past it.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal lexeme (used for length calculation)
///
/// # Example
///
/// ```ignore
/// LexPattern {
///     regex: Regex::new("^,").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ","),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| -> Option<Token> {
            let location = lexer.location();
            lexer.advance_n($value.len());
            Some(MK_TOKEN!($kind, String::from($value), location))
        }
    };
}
