//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (scanner) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Line-by-line tokenization using anchored regex patterns
//! - Recognition of keywords (including multi-word ones), comparators,
//!   operators, literals and identifiers
//! - Line/column tracking for error reporting
//! - Comments (`Bomba: ...`) and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
