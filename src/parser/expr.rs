use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// `Identifier | Literal`
pub fn parse_value(parser: &mut Parser) -> Result<Node, Error> {
    if parser.current_token_kind() == TokenKind::Identifier {
        parse_identifier(parser)
    } else if parser.current_token().is_literal() {
        parse_literal(parser)
    } else {
        let token = parser.current_token();
        Err(Error::new(
            ErrorImpl::UnexpectedKind {
                expected: String::from("valor"),
            },
            token.position,
            token.value.clone(),
        ))
    }
}

pub fn parse_identifier(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.expect_kind(TokenKind::Identifier, "IDENTIFICADOR")?;
    Ok(Node::leaf(NodeKind::Identifier, token.value, token.position))
}

/// Integer, float, text or boolean literal.
pub fn parse_literal(parser: &mut Parser) -> Result<Node, Error> {
    let kind = match parser.current_token_kind() {
        TokenKind::Integer => NodeKind::IntLiteral,
        TokenKind::Float => NodeKind::FloatLiteral,
        TokenKind::Text => NodeKind::TextLiteral,
        TokenKind::Boolean => NodeKind::BooleanLiteral,
        _ => {
            let token = parser.current_token();
            return Err(Error::new(
                ErrorImpl::UnexpectedKind {
                    expected: String::from("literal"),
                },
                token.position,
                token.value.clone(),
            ));
        }
    };

    let token = parser.advance();
    Ok(Node::leaf(kind, token.value, token.position))
}

/// `( Expression ) | IntLit | FloatLit | Identifier`
pub fn parse_math_expr(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();

    let inner = match parser.current_token_kind() {
        TokenKind::Integer | TokenKind::Float => parse_literal(parser)?,
        _ if parser.is("(") => {
            parser.advance();
            let expression = parse_expression(parser)?;
            parser.expect(")");
            expression
        }
        _ => parse_identifier(parser)?,
    };

    Ok(Node::branch(NodeKind::MathExpression, vec![inner], start))
}

/// `MathExpr Operator MathExpr`
pub fn parse_expression(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();

    let left = parse_math_expr(parser)?;
    let operator = parse_operator(parser);
    let right = parse_math_expr(parser)?;

    Ok(Node::branch(NodeKind::Expression, vec![left, operator, right], start))
}

fn parse_operator(parser: &mut Parser) -> Node {
    let token = parser.current_token().clone();

    if token.kind != TokenKind::Operator {
        parser.report(ErrorImpl::InvalidOperator {
            found: token.value.clone(),
        });
    } else {
        parser.advance();
    }

    Node::leaf(NodeKind::BinaryOperator, token.value, token.position)
}

/// `[llamese] Identifier ( CallParams )`
pub fn parse_invocation(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    if parser.is("llamese") {
        parser.advance();
    }

    let callee = parse_identifier(parser)?;

    parser.expect("(");
    let arguments = parse_call_params(parser)?;
    parser.expect(")");

    Ok(Node::branch(NodeKind::Invocation, vec![callee, arguments], start))
}

/// `(Value ('/' Value)*)?`
fn parse_call_params(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let mut arguments = Vec::new();

    if !parser.is(")") {
        arguments.push(parse_value(parser)?);

        while parser.is("/") {
            parser.advance();
            arguments.push(parse_value(parser)?);
        }
    }

    Ok(Node::branch(NodeKind::CallParams, arguments, start))
}

/// `Comparison ((casorio | divorcio) Comparison)?`
pub fn parse_condition(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let mut children = vec![parse_comparison(parser)?];

    if parser.current_token().is_one_of_many(&["casorio", "divorcio"]) {
        let token = parser.advance();
        children.push(Node::leaf(
            NodeKind::LogicalConnector,
            token.value,
            token.position,
        ));
        children.push(parse_comparison(parser)?);
    }

    Ok(Node::branch(NodeKind::Condition, children, start))
}

/// `Value Comparator Value`
fn parse_comparison(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();

    let left = parse_value(parser)?;
    let token = parser.expect_kind(TokenKind::Comparator, "COMPARADOR")?;
    let comparator = Node::leaf(NodeKind::Comparator, token.value, token.position);
    let right = parse_value(parser)?;

    Ok(Node::branch(
        NodeKind::Comparison,
        vec![left, comparator, right],
        start,
    ))
}
