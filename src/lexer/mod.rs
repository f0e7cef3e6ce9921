//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that turns Opus source text
//! into tokens on demand. It handles:
//!
//! - Recognition of keywords, identifiers, literals, and operators
//! - Context-sensitive delimiters (newlines inside `(...)` / `[...]` are skipped)
//! - Postfix `!` (factorial) versus prefix `!` (logical not)
//! - Line/column tracking for diagnostics
//! - Error tokens for malformed input; the lexer never aborts

pub mod lexer;
pub mod tokens;
