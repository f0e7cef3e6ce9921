use std::fmt::{Display, Write};

use super::ast::{Node, NodeKind};

enum Child<'a> {
    Node(&'a Node),
    Leaf(String),
}

fn leaf(kind: &str, lexeme: &str) -> Child<'static> {
    Child::Leaf(format!("{} ({})", kind, lexeme))
}

fn children(node: &Node) -> Vec<Child<'_>> {
    match &node.kind {
        NodeKind::Program { statements }
        | NodeKind::CodeBlock { statements }
        | NodeKind::ArgumentList { arguments: statements }
        | NodeKind::ParameterList { parameters: statements } => statements.iter().map(Child::Node).collect(),
        NodeKind::Declaration {
            identifier,
            type_annotation,
            ..
        } => vec![leaf("Identifier", &identifier.lexeme), Child::Node(type_annotation)],
        NodeKind::Assignment { target, value, .. } => vec![Child::Node(target), Child::Node(value)],
        NodeKind::BinaryExpression { left, right, .. } => vec![Child::Node(left), Child::Node(right)],
        NodeKind::UnaryExpression { operand, .. } | NodeKind::PostfixExpression { operand, .. } => {
            vec![Child::Node(operand)]
        }
        NodeKind::FunctionCall { arguments, .. } => vec![Child::Node(arguments)],
        NodeKind::Argument { label, value } => vec![leaf("ArgumentLabel", &label.lexeme), Child::Node(value)],
        NodeKind::FunctionDefinition {
            name, signature, body, ..
        } => vec![leaf("Identifier", &name.lexeme), Child::Node(signature), Child::Node(body)],
        NodeKind::FunctionSignature {
            parameters,
            return_type,
        } => vec![Child::Node(parameters), Child::Node(return_type)],
        NodeKind::Parameter {
            label,
            type_annotation,
        } => vec![leaf("ParameterLabel", &label.lexeme), Child::Node(type_annotation)],
        NodeKind::ReturnStatement { value, .. } => value.iter().map(|value| Child::Node(value)).collect(),
        NodeKind::ConditionalStatement {
            condition,
            then_block,
            else_branch,
            ..
        } => {
            let mut children = vec![Child::Node(condition), Child::Node(then_block)];
            if let Some(else_branch) = else_branch {
                children.push(Child::Node(else_branch));
            }
            children
        }
        NodeKind::RepeatUntilStatement { body, condition, .. } => vec![Child::Node(body), Child::Node(condition)],
        NodeKind::ForInStatement {
            variable,
            iterable,
            body,
            ..
        } => vec![leaf("Identifier", &variable.lexeme), Child::Node(iterable), Child::Node(body)],
        NodeKind::Identifier { .. }
        | NodeKind::Literal { .. }
        | NodeKind::BooleanLiteral { .. }
        | NodeKind::TypeAnnotation { .. }
        | NodeKind::Error => vec![],
    }
}

fn label(node: &Node) -> String {
    let mut label = format!("{:?}", node.get_node_type());

    if let Some(token) = node.get_token() {
        let _ = write!(label, " ({})", token.lexeme);
    }
    if let Some(ty) = node.inferred_type {
        let _ = write!(label, " : {}", ty);
    }
    if let Some(value) = &node.value {
        let _ = write!(label, " = {}", value);
    }

    label
}

fn write_children(f: &mut std::fmt::Formatter<'_>, node: &Node, prefix: &str) -> std::fmt::Result {
    let children = children(node);
    let count = children.len();

    for (index, child) in children.into_iter().enumerate() {
        let last = index + 1 == count;
        let branch = if last { "└── " } else { "├── " };
        let continuation = if last { "    " } else { "│   " };

        match child {
            Child::Leaf(text) => writeln!(f, "{}{}{}", prefix, branch, text)?,
            Child::Node(child) => {
                writeln!(f, "{}{}{}", prefix, branch, label(child))?;
                write_children(f, child, &format!("{}{}", prefix, continuation))?;
            }
        }
    }

    Ok(())
}

/// Box-drawing dump of the tree, including analyzer annotations once present.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", label(self))?;
        write_children(f, self, "")
    }
}
