//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into an Abstract Syntax Tree. It handles:
//!
//! - Program structure (top-level assignments, functions, the main entry)
//! - Statement parsing through a keyword lookup table
//! - Arithmetic expressions, comparisons and compound conditions
//! - Error recovery and reporting
//!
//! Statements that begin with an identifier are disambiguated with one token
//! of lookahead: `metale` after the identifier means an assignment, anything
//! else an invocation.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
