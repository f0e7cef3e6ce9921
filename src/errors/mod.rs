//! Error types and error handling for the front end.
//!
//! This module defines the diagnostic type shared by every pass. It includes:
//!
//! - Error structures with source location and the attributed lexeme
//! - One error taxonomy per pass (lexical, syntactic, semantic) plus source opening
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
