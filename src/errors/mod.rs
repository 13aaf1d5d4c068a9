//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position and offending text
//! - Severity classification (recoverable vs. fatal) carried as data
//! - The `Failure` value every stage returns instead of its result
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
