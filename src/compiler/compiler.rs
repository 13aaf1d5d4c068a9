//! Main compiler module.
//!
//! This module contains the core Compiler structure, which accumulates the
//! generated Python lines and tracks the indentation of the block being
//! emitted, and the entry points that drive a whole compilation.

use tracing::debug;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, Failure, Stage},
};

use super::{stdlib::PRELUDE, stmt::gen_statement};

/// Spaces per nesting level in the generated code.
pub const INDENT_WIDTH: usize = 4;

/// The state of one code generation pass.
///
/// A compiler is consumed by [`Compiler::finish`], so each compilation
/// starts from a fresh indentation depth.
#[derive(Debug, Default)]
pub struct Compiler {
    /// Lines emitted so far, already indented
    lines: Vec<String>,
    /// Current nesting depth
    indentation: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler::default()
    }

    /// Emits one line at the current indentation.
    pub fn emit(&mut self, line: impl AsRef<str>) {
        let padding = " ".repeat(self.indentation * INDENT_WIDTH);
        self.lines.push(format!("{}{}", padding, line.as_ref()));
    }

    pub fn blank_line(&mut self) {
        self.lines.push(String::new());
    }

    pub fn indent(&mut self) {
        self.indentation += 1;
    }

    pub fn dedent(&mut self) {
        self.indentation = self.indentation.saturating_sub(1);
    }

    pub fn get_indentation(&self) -> usize {
        self.indentation
    }

    /// Returns the generated text, one line per emitted line.
    pub fn finish(self) -> String {
        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }
}

/// Lowers a decorated tree into Python source, without the prelude.
pub fn compile(ast: &Node) -> Result<String, Error> {
    let mut compiler = Compiler::new();
    gen_statement(&mut compiler, ast)?;

    debug!("generated {} lines", compiler.lines.len());
    Ok(compiler.finish())
}

/// Lowers a decorated tree into a complete Python program: the prelude of
/// built-in shims followed by the translated program.
pub fn generate(ast: &Node) -> Result<String, Failure> {
    let program = compile(ast).map_err(|error| Failure::fault(Stage::Generation, error))?;
    Ok(format!("{}\n{}", PRELUDE, program))
}
