//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms the token stream into
//! an Abstract Syntax Tree. It uses a Pratt parser for expressions with
//! proper operator precedence and handles:
//!
//! - Statement parsing (declarations, functions, control flow, blocks)
//! - Expression parsing (binary, prefix and postfix ops, calls, literals)
//! - Panic-mode error recovery at statement delimiters
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
