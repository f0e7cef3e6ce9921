use crate::lexer::tokens::Token;

use super::types::{Type, Value};

/// Node Types
///
/// Discriminant of every node kind, used for dispatch in tests and by the tree dump.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NodeType {
    Program,
    Declaration,
    Identifier,
    Literal,
    BooleanLiteral,
    TypeAnnotation,
    Assignment,
    BinaryExpression,
    UnaryExpression,
    PostfixExpression,
    FunctionCall,
    ArgumentList,
    Argument,
    FunctionDefinition,
    FunctionSignature,
    ParameterList,
    Parameter,
    CodeBlock,
    ReturnStatement,
    ConditionalStatement,
    RepeatUntilStatement,
    ForInStatement,
    Error,
}

/// The shape of a node. Children are owned, so the tree is released in one drop.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Top-level statement list.
    Program { statements: Vec<Node> },
    /// `var name: Type` (mutable) or `let name: Type` (constant).
    Declaration {
        keyword: Token,
        identifier: Token,
        type_annotation: Box<Node>,
    },
    Identifier { token: Token },
    /// Numeric or string literal.
    Literal { token: Token },
    BooleanLiteral { token: Token },
    TypeAnnotation { token: Token },
    /// `target = value`; the target is an `Identifier` or a fresh `Declaration`.
    Assignment {
        operator: Token,
        target: Box<Node>,
        value: Box<Node>,
    },
    BinaryExpression {
        operator: Token,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryExpression { operator: Token, operand: Box<Node> },
    PostfixExpression { operator: Token, operand: Box<Node> },
    FunctionCall { callee: Token, arguments: Box<Node> },
    ArgumentList { arguments: Vec<Node> },
    /// `label: value`
    Argument { label: Token, value: Box<Node> },
    FunctionDefinition {
        keyword: Token,
        name: Token,
        signature: Box<Node>,
        body: Box<Node>,
    },
    FunctionSignature {
        parameters: Box<Node>,
        return_type: Box<Node>,
    },
    ParameterList { parameters: Vec<Node> },
    /// `label: Type`
    Parameter {
        label: Token,
        type_annotation: Box<Node>,
    },
    CodeBlock { statements: Vec<Node> },
    ReturnStatement { keyword: Token, value: Option<Box<Node>> },
    /// `else_branch` is either a `CodeBlock` or a chained `ConditionalStatement`.
    ConditionalStatement {
        keyword: Token,
        condition: Box<Node>,
        then_block: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    RepeatUntilStatement {
        keyword: Token,
        body: Box<Node>,
        condition: Box<Node>,
    },
    ForInStatement {
        keyword: Token,
        variable: Token,
        iterable: Box<Node>,
        body: Box<Node>,
    },
    /// Placeholder for a statement that failed to parse.
    Error,
}

/// An AST node plus the annotations written by the analyzer.
///
/// `inferred_type` and `value` are `None` until semantic analysis runs; a node
/// is foldable exactly when `value` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub inferred_type: Option<Type>,
    pub value: Option<Value>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            inferred_type: None,
            value: None,
        }
    }

    pub fn error() -> Self {
        Node::new(NodeKind::Error)
    }

    pub fn boxed(kind: NodeKind) -> Box<Self> {
        Box::new(Node::new(kind))
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NodeKind::Error)
    }

    pub fn is_foldable(&self) -> bool {
        self.value.is_some()
    }

    pub fn get_node_type(&self) -> NodeType {
        match &self.kind {
            NodeKind::Program { .. } => NodeType::Program,
            NodeKind::Declaration { .. } => NodeType::Declaration,
            NodeKind::Identifier { .. } => NodeType::Identifier,
            NodeKind::Literal { .. } => NodeType::Literal,
            NodeKind::BooleanLiteral { .. } => NodeType::BooleanLiteral,
            NodeKind::TypeAnnotation { .. } => NodeType::TypeAnnotation,
            NodeKind::Assignment { .. } => NodeType::Assignment,
            NodeKind::BinaryExpression { .. } => NodeType::BinaryExpression,
            NodeKind::UnaryExpression { .. } => NodeType::UnaryExpression,
            NodeKind::PostfixExpression { .. } => NodeType::PostfixExpression,
            NodeKind::FunctionCall { .. } => NodeType::FunctionCall,
            NodeKind::ArgumentList { .. } => NodeType::ArgumentList,
            NodeKind::Argument { .. } => NodeType::Argument,
            NodeKind::FunctionDefinition { .. } => NodeType::FunctionDefinition,
            NodeKind::FunctionSignature { .. } => NodeType::FunctionSignature,
            NodeKind::ParameterList { .. } => NodeType::ParameterList,
            NodeKind::Parameter { .. } => NodeType::Parameter,
            NodeKind::CodeBlock { .. } => NodeType::CodeBlock,
            NodeKind::ReturnStatement { .. } => NodeType::ReturnStatement,
            NodeKind::ConditionalStatement { .. } => NodeType::ConditionalStatement,
            NodeKind::RepeatUntilStatement { .. } => NodeType::RepeatUntilStatement,
            NodeKind::ForInStatement { .. } => NodeType::ForInStatement,
            NodeKind::Error => NodeType::Error,
        }
    }

    /// The token a node is labelled with in dumps and diagnostics, if any.
    pub fn get_token(&self) -> Option<&Token> {
        match &self.kind {
            NodeKind::Declaration { keyword, .. }
            | NodeKind::FunctionDefinition { keyword, .. }
            | NodeKind::ReturnStatement { keyword, .. }
            | NodeKind::ConditionalStatement { keyword, .. }
            | NodeKind::RepeatUntilStatement { keyword, .. }
            | NodeKind::ForInStatement { keyword, .. } => Some(keyword),
            NodeKind::Identifier { token }
            | NodeKind::Literal { token }
            | NodeKind::BooleanLiteral { token }
            | NodeKind::TypeAnnotation { token } => Some(token),
            NodeKind::Assignment { operator, .. }
            | NodeKind::BinaryExpression { operator, .. }
            | NodeKind::UnaryExpression { operator, .. }
            | NodeKind::PostfixExpression { operator, .. } => Some(operator),
            NodeKind::FunctionCall { callee, .. } => Some(callee),
            NodeKind::Argument { label, .. } | NodeKind::Parameter { label, .. } => Some(label),
            NodeKind::Program { .. }
            | NodeKind::ArgumentList { .. }
            | NodeKind::FunctionSignature { .. }
            | NodeKind::ParameterList { .. }
            | NodeKind::CodeBlock { .. }
            | NodeKind::Error => None,
        }
    }

    /// Statements of a `Program` or `CodeBlock`; empty for every other node.
    pub fn statements(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Program { statements } | NodeKind::CodeBlock { statements } => statements,
            _ => &[],
        }
    }

    pub fn statements_mut(&mut self) -> &mut [Node] {
        match &mut self.kind {
            NodeKind::Program { statements } | NodeKind::CodeBlock { statements } => statements,
            _ => &mut [],
        }
    }
}
