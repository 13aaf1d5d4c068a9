//! Code generation module for the compiler.
//!
//! This module contains the generator that transforms the decorated AST
//! into Python 3 source. It handles:
//!
//! - Emission of statements with four spaces of indentation per block
//! - Rendering of expressions, comparisons and compound conditions
//! - Lowering of switches into `if`/`elif`/`else` ladders and of for-loops
//!   into `range` iteration
//! - The prelude of built-in function shims

pub mod compiler;
pub mod expr;
pub mod stdlib;
pub mod stmt;
