use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_expr, parse_right_value},
    lookups::BindingPower,
    parser::{ParseError, Parser},
};

/// Parses statements until EOF, or until the `}` closing the current block.
pub fn parse_statement_list(parser: &mut Parser, in_block: bool) -> Vec<Node> {
    let mut statements = vec![];

    loop {
        parser.skip_delimiters();

        match parser.current_token_kind() {
            TokenKind::EOF => break,
            TokenKind::CloseCurly if in_block => break,
            _ => {}
        }

        let start = parser.get_pos();
        statements.push(parse_stmt(parser));

        // Recovery may stop on a token it cannot consume; step over it
        if parser.get_pos() == start && parser.has_tokens() {
            parser.advance();
        }
    }

    statements
}

/// Parses one statement and its terminator, recovering into an `Error` node.
pub fn parse_stmt(parser: &mut Parser) -> Node {
    let token_kind = parser.current_token_kind();
    let result = match parser.get_stmt_lookup().get(&token_kind).copied() {
        Some(handler) => handler(parser),
        None => parse_expression_stmt(parser),
    };

    let result = result.and_then(|node| parser.expect_terminator().map(|_| node));

    match result {
        Ok(node) => node,
        Err(error) => {
            parser.report(error);
            parser.synchronize();
            Node::error()
        }
    }
}

fn parse_expression_stmt(parser: &mut Parser) -> Result<Node, Error> {
    if !parser.is_expression_start() {
        return Err(parser.fail(ParseError::Unresolvable));
    }

    parse_expr(parser, BindingPower::Default)
}

/// `var name: Type` or `let name: Type`, optionally followed by `= value`.
pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let keyword = parser.advance();
    let identifier = parser.expect(TokenKind::Identifier, ParseError::MissingIdentifier)?;
    parser.expect(TokenKind::Colon, ParseError::MissingTypeAnnotation)?;
    let type_name = parser.expect(TokenKind::Identifier, ParseError::MissingTypeName)?;

    let declaration = Node::new(NodeKind::Declaration {
        keyword,
        identifier,
        type_annotation: Node::boxed(NodeKind::TypeAnnotation { token: type_name }),
    });

    if parser.current_token_kind() != TokenKind::Assignment {
        return Ok(declaration);
    }

    let operator = parser.advance();
    let value = parse_right_value(parser)?;

    Ok(Node::new(NodeKind::Assignment {
        operator,
        target: Box::new(declaration),
        value: Box::new(value),
    }))
}

/// `func name(label: Type, ...) -> Type { ... }`
pub fn parse_function_definition_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let keyword = parser.advance();
    let name = parser.expect(TokenKind::Identifier, ParseError::MissingFunctionName)?;

    parser.expect(TokenKind::OpenParen, ParseError::MissingOpeningBracket)?;
    let parameters = parse_parameter_list(parser)?;
    parser.expect(TokenKind::CloseParen, ParseError::MissingClosingBracket)?;

    parser.expect(TokenKind::Arrow, ParseError::MissingRightArrow)?;
    let return_type = parser.expect(TokenKind::Identifier, ParseError::MissingReturnType)?;

    let body = parse_code_block(parser)?;

    Ok(Node::new(NodeKind::FunctionDefinition {
        keyword,
        name,
        signature: Node::boxed(NodeKind::FunctionSignature {
            parameters: Box::new(parameters),
            return_type: Node::boxed(NodeKind::TypeAnnotation { token: return_type }),
        }),
        body: Box::new(body),
    }))
}

fn parse_parameter_list(parser: &mut Parser) -> Result<Node, Error> {
    let mut parameters = vec![];

    if parser.current_token_kind() == TokenKind::CloseParen {
        return Ok(Node::new(NodeKind::ParameterList { parameters }));
    }

    loop {
        let label = parser.expect(TokenKind::Identifier, ParseError::MissingParameterLabel)?;
        parser.expect(TokenKind::Colon, ParseError::MissingColonAfterLabel)?;
        let type_name = parser.expect(TokenKind::Identifier, ParseError::MissingTypeName)?;

        parameters.push(Node::new(NodeKind::Parameter {
            label,
            type_annotation: Node::boxed(NodeKind::TypeAnnotation { token: type_name }),
        }));

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    Ok(Node::new(NodeKind::ParameterList { parameters }))
}

/// `{ statements }`. A block cut short by EOF ends quietly, the lexer has
/// already reported the unclosed brace.
pub fn parse_code_block(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::OpenCurly, ParseError::MissingOpeningCurlyBracket)?;

    let statements = parse_statement_list(parser, true);

    if parser.current_token_kind() == TokenKind::CloseCurly {
        parser.advance();
    }

    Ok(Node::new(NodeKind::CodeBlock { statements }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let keyword = parser.advance();

    let value = if parser.is_expression_start() {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    } else {
        None
    };

    Ok(Node::new(NodeKind::ReturnStatement { keyword, value }))
}

/// `if cond { } else if cond { } else { }`; delimiters may separate a block from `else`.
pub fn parse_conditional_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let keyword = parser.advance();

    if !parser.is_expression_start() {
        return Err(parser.fail(ParseError::MissingCondition));
    }
    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_block = parse_code_block(parser)?;

    parser.skip_delimiters();

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parser.skip_delimiters();

        if parser.current_token_kind() == TokenKind::If {
            Some(Box::new(parse_conditional_stmt(parser)?))
        } else {
            Some(Box::new(parse_code_block(parser)?))
        }
    } else {
        None
    };

    Ok(Node::new(NodeKind::ConditionalStatement {
        keyword,
        condition: Box::new(condition),
        then_block: Box::new(then_block),
        else_branch,
    }))
}

/// `repeat { } until cond`
pub fn parse_repeat_until_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let keyword = parser.advance();
    let body = parse_code_block(parser)?;

    parser.skip_delimiters();
    parser.expect(TokenKind::Until, ParseError::MissingUntilCondition)?;

    if !parser.is_expression_start() {
        return Err(parser.fail(ParseError::MissingUntilCondition));
    }
    let condition = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::new(NodeKind::RepeatUntilStatement {
        keyword,
        body: Box::new(body),
        condition: Box::new(condition),
    }))
}

/// `for name in iterable { }`
pub fn parse_for_in_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let keyword = parser.advance();
    let variable = parser.expect(TokenKind::Identifier, ParseError::MissingIdentifier)?;
    parser.expect(TokenKind::In, ParseError::MissingInStatement)?;

    let iterable = parse_expr(parser, BindingPower::Default)?;
    let body = parse_code_block(parser)?;

    Ok(Node::new(NodeKind::ForInStatement {
        keyword,
        variable,
        iterable: Box::new(iterable),
        body: Box::new(body),
    }))
}
