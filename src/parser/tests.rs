//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Program structure and the main entry
//! - Assignments, invocations and the identifier lookahead
//! - Function definitions
//! - Control flow statements
//! - Error recovery and structural faults

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{ErrorImpl, Failure, Stage},
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Node, Failure> {
    let tokens = tokenize(source).unwrap();
    parse(tokens)
}

fn kinds(node: &Node) -> Vec<NodeKind> {
    node.children.iter().map(|child| child.kind).collect()
}

/// The first construct inside the main entry's block.
fn first_main_statement(ast: &Node) -> &Node {
    let main = ast.children.last().unwrap();
    main.child(0).unwrap().child(0).unwrap().child(0).unwrap()
}

#[test]
fn test_parse_minimal_program() {
    let ast = parse_source("jefe mae { sueltele(~hola~) }").unwrap();

    assert_eq!(ast.kind, NodeKind::Program);
    assert_eq!(kinds(&ast), vec![NodeKind::MainEntry]);

    let block = ast.children[0].child(0).unwrap();
    assert_eq!(block.kind, NodeKind::Block);
    assert_eq!(kinds(block), vec![NodeKind::Statement]);
}

#[test]
fn test_parse_keeps_every_top_level_item() {
    let source = "x metale 1\ny metale 2\nmae f(a) { sarpe a }\njefa mae { llamese f(x) }";
    let ast = parse_source(source).unwrap();

    assert_eq!(
        kinds(&ast),
        vec![
            NodeKind::Assignment,
            NodeKind::Assignment,
            NodeKind::FunctionDef,
            NodeKind::MainEntry
        ]
    );
}

#[test]
fn test_parse_identifier_lookahead() {
    let source = "jefe mae {\n  x metale 5\n  sueltele(x)\n}";
    let ast = parse_source(source).unwrap();

    let block = ast.children[0].child(0).unwrap();
    assert_eq!(block.children[0].child(0).unwrap().kind, NodeKind::Assignment);
    assert_eq!(block.children[1].child(0).unwrap().kind, NodeKind::Invocation);
}

#[test]
fn test_parse_assignment_right_hand_sides() {
    let source = "a metale 1\nb metale ~texto~\nc metale a\nd metale ( a echele 2 )\ne metale llamese trome(b)\nf metale trome(b)\njefe mae { sueltele(a) }";
    let ast = parse_source(source).unwrap();

    let right: Vec<NodeKind> = ast.children[..6]
        .iter()
        .map(|assignment| assignment.child(1).unwrap().kind)
        .collect();
    assert_eq!(
        right,
        vec![
            NodeKind::IntLiteral,
            NodeKind::TextLiteral,
            NodeKind::Identifier,
            NodeKind::MathExpression,
            NodeKind::Invocation,
            NodeKind::Invocation
        ]
    );
}

#[test]
fn test_parse_function_definition() {
    let ast = parse_source("mae suma(a/b) { sarpe ( a echele b ) }\njefe mae { suma(1/2) }").unwrap();

    let function = &ast.children[0];
    assert_eq!(function.kind, NodeKind::FunctionDef);
    assert_eq!(function.content.as_deref(), Some("suma"));
    assert_eq!(
        kinds(function),
        vec![NodeKind::Identifier, NodeKind::FunctionParams, NodeKind::Block]
    );

    let params = function.child(1).unwrap();
    let names: Vec<&str> = params
        .children
        .iter()
        .map(|param| param.content.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_parse_function_without_parameters() {
    let ast = parse_source("mae saludar() { sueltele(~hola~) }\njefe mae { saludar() }").unwrap();

    assert!(ast.children[0].child(1).unwrap().children.is_empty());
    let invocation = first_main_statement(&ast);
    assert!(invocation.child(1).unwrap().children.is_empty());
}

#[test]
fn test_parse_return_with_expression() {
    let ast = parse_source("mae suma(a/b) { sarpe ( a echele b ) }\njefe mae { suma(1/2) }").unwrap();

    let block = ast.children[0].child(2).unwrap();
    let ret = block.child(0).unwrap().child(0).unwrap();
    assert_eq!(ret.kind, NodeKind::Return);

    let math = ret.child(0).unwrap();
    assert_eq!(math.kind, NodeKind::MathExpression);
    let expression = math.child(0).unwrap();
    assert_eq!(
        kinds(expression),
        vec![
            NodeKind::MathExpression,
            NodeKind::BinaryOperator,
            NodeKind::MathExpression
        ]
    );
    assert_eq!(expression.child(1).unwrap().content.as_deref(), Some("echele"));
}

#[test]
fn test_parse_empty_return() {
    let ast = parse_source("mae nada(a) { sarpe }\njefe mae { nada(1) }").unwrap();

    let block = ast.children[0].child(2).unwrap();
    let ret = block.child(0).unwrap().child(0).unwrap();
    assert_eq!(ret.kind, NodeKind::Return);
    assert!(ret.children.is_empty());
}

#[test]
fn test_parse_conditional_with_else() {
    let source = "jefe mae {\n  diay siii ( x cañazo 1 ) { sueltele(x) } sino ni modo { sueltele(~no~) }\n}";
    let ast = parse_source(source).unwrap();

    let conditional = first_main_statement(&ast);
    assert_eq!(conditional.kind, NodeKind::Conditional);
    assert_eq!(
        kinds(conditional),
        vec![NodeKind::IfBranch, NodeKind::ElseBranch]
    );
}

#[test]
fn test_parse_compound_condition() {
    let source = "jefe mae { upee ( x cañazo 1 casorio y poquitico 5 ) { x metale 0 } }";
    let ast = parse_source(source).unwrap();

    let condition = first_main_statement(&ast).child(0).unwrap();
    assert_eq!(condition.kind, NodeKind::Condition);
    assert_eq!(
        kinds(condition),
        vec![
            NodeKind::Comparison,
            NodeKind::LogicalConnector,
            NodeKind::Comparison
        ]
    );
    assert_eq!(condition.child(1).unwrap().content.as_deref(), Some("casorio"));
}

#[test]
fn test_parse_switch_case() {
    let source = "jefe mae {\n  como está la vara ( x ) {\n    movida 1 { sueltele(~uno~) }\n    movida 2 { sueltele(~dos~) }\n    sino ni modo { sueltele(~otro~) }\n  }\n}";
    let ast = parse_source(source).unwrap();

    let switch = first_main_statement(&ast);
    assert_eq!(
        kinds(switch),
        vec![
            NodeKind::Identifier,
            NodeKind::CaseArm,
            NodeKind::CaseArm,
            NodeKind::ElseBranch
        ]
    );
}

#[test]
fn test_parse_for_loop() {
    let source = "jefe mae { dele vuelta ( i metale 0 / i poquitico 10 / i metale ( i echele 1 ) ) { sueltele(i) } }";
    let ast = parse_source(source).unwrap();

    let for_loop = first_main_statement(&ast);
    assert_eq!(
        kinds(for_loop),
        vec![
            NodeKind::Assignment,
            NodeKind::Condition,
            NodeKind::Assignment,
            NodeKind::Block
        ]
    );
}

#[test]
fn test_parse_try_catch() {
    let source = "jefe mae { juéguesela { safis ~mal~ } tortón { sueltele(~atrapado~) } }";
    let ast = parse_source(source).unwrap();

    let try_catch = first_main_statement(&ast);
    assert_eq!(kinds(try_catch), vec![NodeKind::Block, NodeKind::Block]);
}

#[test]
fn test_value_leaves_match_value_tokens() {
    let source = "x metale 3\nmae suma(a/b) { sarpe ( a echele b ) }\njefe mae {\n  diay siii ( x cañazo 1 ) { sueltele(~hola~) }\n  y metale suma(x / 4.5)\n}";
    let tokens = tokenize(source).unwrap();
    let values = tokens
        .iter()
        .filter(|token| token.is_literal() || token.kind == crate::lexer::tokens::TokenKind::Identifier)
        .count();

    let ast = parse(tokens).unwrap();

    assert_eq!(ast.count_values(), values);
}

#[test]
fn test_parse_without_eof_marker() {
    let mut tokens = tokenize("jefe mae { sueltele(1) }").unwrap();
    tokens.pop();

    let ast = parse(tokens).unwrap();
    assert_eq!(ast.children.last().unwrap().kind, NodeKind::MainEntry);
}

#[test]
fn test_missing_main_entry_is_fatal() {
    let failure = parse_source("x metale 1\nmae f(a) { sarpe a }").unwrap_err();

    assert_eq!(failure.stage, Stage::Parsing);
    assert!(failure.is_fatal());
    assert_eq!(failure.errors.len(), 1);
    assert_eq!(failure.errors[0].get_kind(), &ErrorImpl::MissingMainEntry);
}

#[test]
fn test_missing_comparator_is_fatal() {
    let failure = parse_source("jefe mae { upee ( x 1 ) { sueltele(x) } }").unwrap_err();

    assert!(failure.is_fatal());
    assert_eq!(failure.errors.len(), 1);
    assert_eq!(failure.errors[0].get_text(), "1");
}

#[test]
fn test_syntax_errors_are_collected() {
    let failure = parse_source("jefe mae {\n  x metale 1 )\n  y metale 2 )\n}").unwrap_err();

    assert!(!failure.is_fatal());
    assert_eq!(failure.errors.len(), 2);
    assert_eq!(failure.errors[0].get_text(), ")");
    assert_eq!(failure.errors[0].get_position().line, 2);
    assert_eq!(failure.errors[1].get_position().line, 3);
}

#[test]
fn test_invalid_assignment_is_recoverable() {
    let failure = parse_source("jefe mae { x metale sarpe }").unwrap_err();

    assert!(!failure.is_fatal());
    assert_eq!(failure.errors.len(), 1);
    assert_eq!(failure.errors[0].get_kind(), &ErrorImpl::InvalidAssignment);
    assert_eq!(failure.errors[0].get_text(), "sarpe");
}

#[test]
fn test_missing_punctuation_is_recoverable() {
    let failure = parse_source("jefe mae { sueltele(x }").unwrap_err();

    assert!(!failure.is_fatal());
    assert_eq!(
        failure.errors[0].get_kind(),
        &ErrorImpl::ExpectedText {
            expected: String::from(")")
        }
    );
}

#[test]
fn test_node_positions_come_from_first_token() {
    let ast = parse_source("x metale 1\n\njefe mae { sueltele(x) }").unwrap();

    assert_eq!(ast.children[0].position.line, 1);
    let main = ast.children.last().unwrap();
    assert_eq!((main.position.line, main.position.column), (3, 1));
}
