//! Semantic analyzer module.
//!
//! This module checks a parsed program for semantic correctness:
//!
//! - Resolving identifiers through a scoped symbol table
//! - Inferring the type of every expression
//! - Folding expressions whose values are known at analysis time
//! - Validating declarations, assignments, conditions and calls
//!
//! The analyzer annotates the AST in place and collects every semantic
//! error it finds instead of stopping at the first one.

pub mod analyzer;
pub mod symbol_table;
