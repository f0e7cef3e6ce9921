use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::{ParseError, Parser},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Node, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.fail(ParseError::MissingOperand));
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than bp, keep extending lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        let operator_bp = parser.current_binding_power();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

/// Parses an expression where a value is required after `=`.
pub fn parse_right_value(parser: &mut Parser) -> Result<Node, Error> {
    if !parser.is_expression_start() {
        return Err(parser.fail(ParseError::MissingRightValue));
    }

    parse_expr(parser, BindingPower::Default)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    match parser.current_token_kind() {
        TokenKind::Numeric | TokenKind::String => Ok(Node::new(NodeKind::Literal {
            token: parser.advance(),
        })),
        TokenKind::True | TokenKind::False => Ok(Node::new(NodeKind::BooleanLiteral {
            token: parser.advance(),
        })),
        TokenKind::Identifier => {
            let target = Node::new(NodeKind::Identifier {
                token: parser.advance(),
            });

            if parser.current_token_kind() != TokenKind::Assignment {
                return Ok(target);
            }

            let operator = parser.advance();
            let value = parse_right_value(parser)?;

            Ok(Node::new(NodeKind::Assignment {
                operator,
                target: Box::new(target),
                value: Box::new(value),
            }))
        }
        _ => Err(parser.fail(ParseError::MissingOperand)),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();

    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, ParseError::MissingClosingBracket)?;

    Ok(expr)
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Node, Error> {
    let operator = parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Node::new(NodeKind::UnaryExpression {
        operator,
        operand: Box::new(operand),
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, bp: BindingPower) -> Result<Node, Error> {
    let operator = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Node::new(NodeKind::BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_postfix_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    let operator = parser.advance();

    Ok(Node::new(NodeKind::PostfixExpression {
        operator,
        operand: Box::new(left),
    }))
}

/// `name(label: value, ...)`; only a bare identifier can be called.
pub fn parse_call_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    let NodeKind::Identifier { token: callee } = left.kind else {
        return Err(parser.fail(ParseError::MissingFunctionName));
    };

    parser.advance();
    let arguments = parse_argument_list(parser)?;
    parser.expect(TokenKind::CloseParen, ParseError::MissingClosingBracket)?;

    Ok(Node::new(NodeKind::FunctionCall {
        callee,
        arguments: Box::new(arguments),
    }))
}

fn parse_argument_list(parser: &mut Parser) -> Result<Node, Error> {
    let mut arguments = vec![];

    if parser.current_token_kind() == TokenKind::CloseParen {
        return Ok(Node::new(NodeKind::ArgumentList { arguments }));
    }

    loop {
        let label = parser.expect(TokenKind::Identifier, ParseError::MissingArgumentLabel)?;
        parser.expect(TokenKind::Colon, ParseError::MissingColonAfterLabel)?;

        if !parser.is_expression_start() {
            return Err(parser.fail(ParseError::MissingArgument));
        }
        let value = parse_expr(parser, BindingPower::Default)?;

        arguments.push(Node::new(NodeKind::Argument {
            label,
            value: Box::new(value),
        }));

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    Ok(Node::new(NodeKind::ArgumentList { arguments }))
}
