//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level entry
//! point. Statements are dispatched through a lookup table keyed by the text
//! of their introducing keyword; everything else is plain recursive descent.
//!
//! Two kinds of problems are distinguished:
//! - Recoverable syntax errors are recorded and exactly one token is skipped
//!   so parsing can continue and report further errors in the same pass
//! - Structural faults abort the pass immediately with no partial tree

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl, Failure, Stage},
    lexer::tokens::{Token, TokenKind},
    Position, MK_TOKEN,
};

use super::{
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
    stmt::{parse_assignment, parse_function_def, parse_main_entry},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, without the end marker
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// End marker returned once the stream is exhausted
    eof: Token,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Recoverable syntax errors found so far
    errors: Vec<Error>,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// A trailing `EOF` token is taken as the end marker; a stream without one
    /// gets a synthesized marker just past its last token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(token) if token.kind == TokenKind::EOF => tokens.pop(),
            _ => None,
        };
        let eof = eof.unwrap_or_else(|| {
            let position = tokens
                .last()
                .map(|token| {
                    Position::new(
                        token.position.line,
                        token.position.column + token.value.chars().count(),
                    )
                })
                .unwrap_or(Position::new(1, 1));
            MK_TOKEN!(TokenKind::EOF, String::from("EOF"), position)
        });

        Parser {
            tokens,
            pos: 0,
            eof,
            stmt_lookup: HashMap::new(),
            errors: vec![],
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token `offset` places ahead without advancing.
    pub fn peek(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&self.eof)
    }

    /// Whether the current token's text is `text`.
    pub fn is(&self, text: &str) -> bool {
        self.current_token().is(text)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    pub fn get_position(&self) -> Position {
        self.current_token().position
    }

    /// Expects the current token to read `expected`.
    ///
    /// On a mismatch a recoverable error is recorded and the offending token
    /// is skipped.
    pub fn expect(&mut self, expected: &str) {
        if self.is(expected) {
            self.advance();
        } else {
            self.report(ErrorImpl::ExpectedText {
                expected: String::from(expected),
            });
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// A mismatch here leaves nothing sensible to build, so it is returned as
    /// a structural fault.
    pub fn expect_kind(&mut self, expected_kind: TokenKind, label: &str) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            let token = self.current_token();
            return Err(Error::new(
                ErrorImpl::UnexpectedKind {
                    expected: String::from(label),
                },
                token.position,
                token.value.clone(),
            ));
        }

        Ok(self.advance())
    }

    /// Records a recoverable error at the current token without moving.
    pub fn record(&mut self, error_impl: ErrorImpl) {
        let token = self.current_token();
        let error = Error::new(error_impl, token.position, token.value.clone());
        warn!("{}", error);
        self.errors.push(error);
    }

    /// Records a recoverable error at the current token and skips it.
    pub fn report(&mut self, error_impl: ErrorImpl) {
        self.record(error_impl);
        self.advance();
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for the keyword `keyword`.
    pub fn stmt(&mut self, keyword: &'static str, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(keyword, stmt_fn);
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// The root is always a `Program` whose last child is the `MainEntry`.
///
/// # Returns
///
/// The tree, or a [`Failure`] holding either every recoverable syntax error
/// found or the single structural fault that stopped the parse.
pub fn parse(tokens: Vec<Token>) -> Result<Node, Failure> {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let program = parse_program(&mut parser).map_err(|error| {
        warn!("parsing aborted: {}", error);
        Failure::fault(Stage::Parsing, error)
    })?;

    if !parser.errors.is_empty() {
        debug!("parser found {} syntax errors", parser.errors.len());
        return Err(Failure::batch(Stage::Parsing, parser.errors));
    }

    debug!("parsed {} top-level nodes", program.children.len());
    Ok(program)
}

fn parse_program(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.get_position();
    let mut body = vec![];

    loop {
        if parser.current_token_kind() == TokenKind::Identifier {
            body.push(parse_assignment(parser)?);
        } else if parser.is("mae") {
            body.push(parse_function_def(parser)?);
        } else {
            break;
        }
    }

    if !parser.current_token().is_one_of_many(&["jefe", "jefa"]) {
        let token = parser.current_token();
        return Err(Error::new(
            ErrorImpl::MissingMainEntry,
            token.position,
            token.value.clone(),
        ));
    }

    body.push(parse_main_entry(parser)?);

    if parser.has_tokens() {
        parser.record(ErrorImpl::ExpectedText {
            expected: String::from("EOF"),
        });
    }

    Ok(Node::branch(NodeKind::Program, body, start))
}
