#![allow(clippy::module_inception)]

use std::{fmt::Display, path::Path};

use crate::{
    ast::ast::Node,
    compiler::compiler::generate,
    errors::errors::{Error, ErrorTip, Failure},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::analyze,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A 1-based line/column pair in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    pub fn null() -> Self {
        Position::new(0, 0)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Scans, parses and analyzes `source`, returning the decorated tree.
pub fn check_source(source: &str) -> Result<Node, Failure> {
    let tokens = tokenize(source)?;
    let mut ast = parse(tokens)?;
    analyze(&mut ast)?;
    Ok(ast)
}

/// Runs the whole pipeline on `source` and returns the generated program,
/// prelude included.
pub fn compile_source(source: &str) -> Result<String, Failure> {
    let ast = check_source(source)?;
    generate(&ast)
}

/// Renders a batch of errors the way they are shown to the user.
pub fn report_diagnostics(errors: &[Error]) -> String {
    let mut report = String::from("==== ERRORES ENCONTRADOS ====\n");
    for error in errors {
        report.push_str(&error.to_string());
        report.push('\n');
    }
    report.push_str(&format!("Total de errores: {}", errors.len()));
    report
}

/// Returns the 1-based line number, the text of that line and the 0-based
/// character offset of `position` within it.
pub fn get_line_at_position(source: &str, position: &Position) -> Option<(usize, String, usize)> {
    if position.line == 0 {
        return None;
    }

    let line = source.lines().nth(position.line - 1)?;
    let length = line.chars().count();
    let offset = position.column.saturating_sub(1).min(length);

    Some((position.line, line.to_string(), offset))
}


/// Prints a fatal fault with the offending source line underneath it.
pub fn display_error(error: &Error, source: &str, file: &Path) {
    /*
        Error: UndeclaredFunction (Declare `mae suma(...)` before invoking it)
        -> programa.ciruelas
           |
        20 | llamese suma(1 / 2)
           | --------^
    */

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file.as_os_str().to_string_lossy());
    println!("   {}", error);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position())
    else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}
