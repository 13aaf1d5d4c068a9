use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{
        parse_condition, parse_identifier, parse_invocation, parse_literal, parse_math_expr,
        parse_value,
    },
    parser::Parser,
};

/// Parses one statement and wraps it in a `Statement` node.
///
/// Returns `None` when the current token cannot start a statement; the token
/// is reported and skipped.
pub fn parse_stmt(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let start = parser.get_position();

    let handler = if parser.current_token_kind() == TokenKind::Keyword {
        parser
            .get_stmt_lookup()
            .get(parser.current_token().value.as_str())
            .copied()
    } else {
        None
    };

    let inner = if let Some(handler) = handler {
        handler(parser)?
    } else if parser.current_token_kind() == TokenKind::Identifier {
        // Both assignments and bare invocations start with an identifier
        if parser.peek(1).is("metale") {
            parse_assignment(parser)?
        } else {
            parse_invocation(parser)?
        }
    } else {
        parser.report(ErrorImpl::ExpectedText {
            expected: String::from("instrucción"),
        });
        return Ok(None);
    };

    Ok(Some(Node::branch(NodeKind::Statement, vec![inner], start)))
}

/// `{ Statement+ }`
pub fn parse_block(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("{");

    let mut statements = Vec::new();
    while parser.has_tokens() && !parser.is("}") {
        if let Some(statement) = parse_stmt(parser)? {
            statements.push(statement);
        }
    }

    if statements.is_empty() {
        parser.record(ErrorImpl::ExpectedText {
            expected: String::from("instrucción"),
        });
    }

    parser.expect("}");

    Ok(Node::branch(NodeKind::Block, statements, start))
}

/// `Identifier metale (Literal | MathExpr | Invocation | Identifier)`
pub fn parse_assignment(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let mut children = vec![parse_identifier(parser)?];

    parser.expect("metale");

    if parser.current_token().is_literal() {
        children.push(parse_literal(parser)?);
    } else if parser.is("(") {
        children.push(parse_math_expr(parser)?);
    } else if parser.is("llamese") {
        children.push(parse_invocation(parser)?);
    } else if parser.current_token_kind() == TokenKind::Identifier {
        if parser.peek(1).is("(") {
            children.push(parse_invocation(parser)?);
        } else {
            children.push(parse_identifier(parser)?);
        }
    } else {
        parser.report(ErrorImpl::InvalidAssignment);
    }

    Ok(Node::branch(NodeKind::Assignment, children, start))
}

/// `mae Identifier ( FuncParams ) Block`
pub fn parse_function_def(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("mae");

    let identifier = parse_identifier(parser)?;
    let name = identifier.get_content()?.to_string();

    parser.expect("(");
    let params = parse_function_params(parser)?;
    parser.expect(")");

    let body = parse_block(parser)?;

    let children = vec![identifier, params, body];
    Ok(Node::branch(NodeKind::FunctionDef, children, start).with_content(name))
}

/// `Identifier ('/' Identifier)*`, possibly empty.
pub fn parse_function_params(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let mut params = Vec::new();

    if !parser.is(")") {
        params.push(parse_identifier(parser)?);

        while parser.is("/") {
            parser.advance();
            params.push(parse_identifier(parser)?);
        }
    }

    Ok(Node::branch(NodeKind::FunctionParams, params, start))
}

/// `upee ( Condition ) Block`
pub fn parse_loop(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("upee");

    parser.expect("(");
    let condition = parse_condition(parser)?;
    parser.expect(")");

    let body = parse_block(parser)?;

    Ok(Node::branch(NodeKind::Loop, vec![condition, body], start))
}

/// `IfBranch (ElseBranch)?`
pub fn parse_conditional(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let mut branches = vec![parse_if_branch(parser)?];

    if parser.is("sino ni modo") {
        branches.push(parse_else_branch(parser)?);
    }

    Ok(Node::branch(NodeKind::Conditional, branches, start))
}

fn parse_if_branch(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("diay siii");

    parser.expect("(");
    let condition = parse_condition(parser)?;
    parser.expect(")");

    let body = parse_block(parser)?;

    Ok(Node::branch(NodeKind::IfBranch, vec![condition, body], start))
}

fn parse_else_branch(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("sino ni modo");

    let body = parse_block(parser)?;

    Ok(Node::branch(NodeKind::ElseBranch, vec![body], start))
}

/// `sarpe (Value | MathExpr)?`
pub fn parse_return(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("sarpe");

    let mut children = Vec::new();
    if parser.current_token().is_literal()
        || parser.current_token_kind() == TokenKind::Identifier
    {
        children.push(parse_value(parser)?);
    } else if parser.is("(") {
        children.push(parse_math_expr(parser)?);
    }

    Ok(Node::branch(NodeKind::Return, children, start))
}

/// `safis Value`
pub fn parse_raise_error(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("safis");

    let value = parse_value(parser)?;

    Ok(Node::branch(NodeKind::RaiseError, vec![value], start))
}

/// `(jefe | jefa) mae Block`
pub fn parse_main_entry(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.advance();
    parser.expect("mae");

    let body = parse_block(parser)?;

    Ok(Node::branch(NodeKind::MainEntry, vec![body], start))
}

/// `como está la vara ( Identifier ) { CaseArm+ ElseBranch? }`
pub fn parse_switch_case(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("como está la vara");

    parser.expect("(");
    let mut children = vec![parse_identifier(parser)?];
    parser.expect(")");

    parser.expect("{");

    while parser.is("movida") {
        children.push(parse_case_arm(parser)?);
    }

    if children.len() == 1 {
        parser.record(ErrorImpl::ExpectedText {
            expected: String::from("movida"),
        });
    }

    if parser.is("sino ni modo") {
        children.push(parse_else_branch(parser)?);
    }

    parser.expect("}");

    Ok(Node::branch(NodeKind::SwitchCase, children, start))
}

/// `movida Value Block`
fn parse_case_arm(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("movida");

    let value = parse_value(parser)?;
    let body = parse_block(parser)?;

    Ok(Node::branch(NodeKind::CaseArm, vec![value, body], start))
}

/// `dele vuelta ( Assignment / Condition / Assignment ) Block`
pub fn parse_for_loop(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("dele vuelta");

    parser.expect("(");
    let init = parse_assignment(parser)?;
    parser.expect("/");
    let condition = parse_condition(parser)?;
    parser.expect("/");
    let increment = parse_assignment(parser)?;
    parser.expect(")");

    let body = parse_block(parser)?;

    Ok(Node::branch(
        NodeKind::ForLoop,
        vec![init, condition, increment, body],
        start,
    ))
}

/// `juéguesela Block tortón Block`
pub fn parse_try_catch(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    parser.expect("juéguesela");

    let protected = parse_block(parser)?;

    parser.expect("tortón");
    let handler = parse_block(parser)?;

    Ok(Node::branch(NodeKind::TryCatch, vec![protected, handler], start))
}
