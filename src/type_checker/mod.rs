//! Type checking and semantic analysis module.
//!
//! This module performs semantic analysis on the AST, decorating it in
//! place while:
//!
//! - Resolving identifier and function references through a scope table
//! - Inferring a type for every node from the `NUMBER`, `TEXT`, `BOOLEAN`,
//!   `ANY` and `NONE` lattice
//! - Checking comparisons and switch cases for compatible operand types
//! - Computing structured `range` bounds for for-loops
//!
//! Undeclared identifiers, non-callable invocations and type mismatches are
//! collected and reported together; invoking an undeclared function stops
//! the analysis at once.

pub mod scope;
pub mod type_checker;
