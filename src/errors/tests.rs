//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, Failure, Severity, Stage};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(ErrorImpl::UnknownCharacter, Position::new(3, 7), "@");

    assert_eq!(error.get_error_name(), "UnknownCharacter");
    assert_eq!(error.get_text(), "@");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::ExpectedText {
            expected: "metale".to_string(),
        },
        Position::new(42, 5),
        "x",
    );

    assert_eq!(error.get_position().line, 42);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_error_display_format() {
    let error = Error::new(
        ErrorImpl::UndeclaredIdentifier {
            identifier: "foo".to_string(),
        },
        Position::new(2, 9),
        "foo",
    );

    assert_eq!(
        error.to_string(),
        "ERROR: Identificador no declarado 'foo' en línea 2, columna 9 - Texto: 'foo'"
    );
}

#[test]
fn test_expected_text_message() {
    let error = Error::new(
        ErrorImpl::ExpectedText {
            expected: "{".to_string(),
        },
        Position::new(1, 1),
        "upee",
    );

    assert_eq!(
        error.to_string(),
        "ERROR: se esperaba '{' en línea 1, columna 1 - Texto: 'upee'"
    );
}

#[test]
fn test_severity_classification() {
    assert_eq!(ErrorImpl::UnknownCharacter.severity(), Severity::Lexical);
    assert_eq!(ErrorImpl::InvalidAssignment.severity(), Severity::Syntax);
    assert_eq!(ErrorImpl::NotCallable.severity(), Severity::Semantic);
    assert_eq!(ErrorImpl::MissingMainEntry.severity(), Severity::Structural);
    assert_eq!(
        ErrorImpl::MissingLowering {
            node: "Operator".to_string()
        }
        .severity(),
        Severity::Internal
    );
}

#[test]
fn test_only_structural_and_internal_are_fatal() {
    assert!(!Severity::Lexical.is_fatal());
    assert!(!Severity::Syntax.is_fatal());
    assert!(!Severity::Semantic.is_fatal());
    assert!(Severity::Structural.is_fatal());
    assert!(Severity::Internal.is_fatal());
}

#[test]
fn test_undeclared_function_is_fatal() {
    let error = Error::new(
        ErrorImpl::UndeclaredFunction {
            function: "fantasma".to_string(),
        },
        Position::new(4, 2),
        "fantasma",
    );

    assert!(error.is_fatal());
    assert_eq!(error.get_error_name(), "UndeclaredFunction");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(ErrorImpl::UnknownCharacter, Position::new(1, 1), "@");

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(ErrorImpl::MissingMainEntry, Position::new(1, 1), "x");

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_failure_batch_is_not_fatal() {
    let failure = Failure::batch(
        Stage::Analysis,
        vec![
            Error::new(ErrorImpl::NotCallable, Position::new(1, 1), "x"),
            Error::new(ErrorImpl::NotCallable, Position::new(2, 1), "y"),
        ],
    );

    assert!(!failure.is_fatal());
    assert_eq!(failure.to_string(), "semantic analysis failed with 2 error(s)");
}

#[test]
fn test_failure_fault_holds_single_error() {
    let failure = Failure::fault(
        Stage::Parsing,
        Error::new(ErrorImpl::MissingMainEntry, Position::new(9, 1), "EOF"),
    );

    assert!(failure.is_fatal());
    assert_eq!(failure.errors.len(), 1);
}
