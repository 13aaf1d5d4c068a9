use std::collections::HashMap;

use crate::{ast::ast::Node, errors::errors::Error};

use super::{expr::parse_invocation, parser::Parser, stmt::*};

pub type StmtHandler = fn(&mut Parser) -> Result<Node, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Control flow
    parser.stmt("como está la vara", parse_switch_case);
    parser.stmt("dele vuelta", parse_for_loop);
    parser.stmt("juéguesela", parse_try_catch);
    parser.stmt("upee", parse_loop);
    parser.stmt("diay siii", parse_conditional);

    // Calls and exits
    parser.stmt("llamese", parse_invocation);
    parser.stmt("sarpe", parse_return);
    parser.stmt("safis", parse_raise_error);
}

/// Statement handlers keyed by their introducing keyword.
pub type StmtLookup = HashMap<&'static str, StmtHandler>;
