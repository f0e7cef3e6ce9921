/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node type, its closed set of kinds, and analyzer annotations
/// - display: Box-drawing tree dump
/// - types: Built-in types and folded constant values
pub mod ast;
pub mod display;
pub mod types;

#[cfg(test)]
mod tests;
