use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A single problem found while compiling, with the offending source text.
///
/// Recoverable problems are collected by each stage and reported as a batch;
/// fatal ones (see [`Severity::is_fatal`]) end the stage on the spot.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    text: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, text: impl Into<String>) -> Self {
        Error {
            internal_error: error_impl,
            position,
            text: text.into(),
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_text(&self) -> &str {
        &self.text
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn severity(&self) -> Severity {
        self.internal_error.severity()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity().is_fatal()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnknownCharacter => "UnknownCharacter",
            ErrorImpl::ExpectedText { .. } => "ExpectedText",
            ErrorImpl::InvalidAssignment => "InvalidAssignment",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::UnexpectedKind { .. } => "UnexpectedKind",
            ErrorImpl::MissingMainEntry => "MissingMainEntry",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::NotCallable => "NotCallable",
            ErrorImpl::IncompatibleComparison { .. } => "IncompatibleComparison",
            ErrorImpl::CaseTypeMismatch { .. } => "CaseTypeMismatch",
            ErrorImpl::UndeclaredFunction { .. } => "UndeclaredFunction",
            ErrorImpl::MalformedNode { .. } => "MalformedNode",
            ErrorImpl::MissingLowering { .. } => "MissingLowering",
            ErrorImpl::MissingAnnotation { .. } => "MissingAnnotation",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::ExpectedText { expected } => {
                ErrorTip::Suggestion(format!("Add `{}` before `{}`", expected, self.text))
            }
            ErrorImpl::UnexpectedKind { expected } => {
                ErrorTip::Suggestion(format!("A {} was expected here", expected))
            }
            ErrorImpl::MissingMainEntry => ErrorTip::Suggestion(String::from(
                "Every program ends with `jefe mae { ... }` or `jefa mae { ... }`",
            )),
            ErrorImpl::UndeclaredFunction { function } => ErrorTip::Suggestion(format!(
                "Declare `mae {}(...)` before invoking it",
                function
            )),
            ErrorImpl::MalformedNode { .. }
            | ErrorImpl::MissingLowering { .. }
            | ErrorImpl::MissingAnnotation { .. } => ErrorTip::Suggestion(String::from(
                "This is a compiler defect, not a problem with the program",
            )),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ERROR: {} en línea {}, columna {} - Texto: '{}'",
            self.internal_error, self.position.line, self.position.column, self.text
        )
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Lexical,
    Syntax,
    Semantic,
    /// A missing construct that leaves nothing sensible to continue with.
    Structural,
    /// A compiler defect.
    Internal,
}

impl Severity {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Severity::Structural | Severity::Internal)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Caracter desconocido")]
    UnknownCharacter,
    #[error("se esperaba '{expected}'")]
    ExpectedText { expected: String },
    #[error("estructura de asignación inválida")]
    InvalidAssignment,
    #[error("operador inválido '{found}'")]
    InvalidOperator { found: String },
    #[error("se esperaba un componente de tipo {expected}")]
    UnexpectedKind { expected: String },
    #[error("se esperaba función principal")]
    MissingMainEntry,
    #[error("Identificador no declarado '{identifier}'")]
    UndeclaredIdentifier { identifier: String },
    #[error("Esa vara es una variable...")]
    NotCallable,
    #[error("Tipo incompatible en comparación: '{left}' ({left_type}) vs '{right}' ({right_type})")]
    IncompatibleComparison {
        left: String,
        left_type: String,
        right: String,
        right_type: String,
    },
    #[error("Tipo de case {case_type} != control {control_type}")]
    CaseTypeMismatch {
        case_type: String,
        control_type: String,
    },
    #[error("Función {function} no declarada")]
    UndeclaredFunction { function: String },
    #[error("nodo {node} mal formado")]
    MalformedNode { node: String },
    #[error("no existe una traducción para nodo de tipo {node}")]
    MissingLowering { node: String },
    #[error("nodo {node} sin anotación '{annotation}'")]
    MissingAnnotation { node: String, annotation: String },
}

impl ErrorImpl {
    pub fn severity(&self) -> Severity {
        match self {
            ErrorImpl::UnknownCharacter => Severity::Lexical,
            ErrorImpl::ExpectedText { .. }
            | ErrorImpl::InvalidAssignment
            | ErrorImpl::InvalidOperator { .. } => Severity::Syntax,
            ErrorImpl::UndeclaredIdentifier { .. }
            | ErrorImpl::NotCallable
            | ErrorImpl::IncompatibleComparison { .. }
            | ErrorImpl::CaseTypeMismatch { .. } => Severity::Semantic,
            ErrorImpl::UnexpectedKind { .. }
            | ErrorImpl::MissingMainEntry
            | ErrorImpl::UndeclaredFunction { .. } => Severity::Structural,
            ErrorImpl::MalformedNode { .. }
            | ErrorImpl::MissingLowering { .. }
            | ErrorImpl::MissingAnnotation { .. } => Severity::Internal,
        }
    }
}

/// The pipeline stage that produced a [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scanning,
    Parsing,
    Analysis,
    Generation,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Scanning => write!(f, "scanning"),
            Stage::Parsing => write!(f, "parsing"),
            Stage::Analysis => write!(f, "semantic analysis"),
            Stage::Generation => write!(f, "code generation"),
        }
    }
}

/// The failed outcome of a stage: either the batch of recoverable errors it
/// collected, or the single fatal fault that stopped it.
#[derive(Error, Debug, Clone)]
#[error("{stage} failed with {} error(s)", errors.len())]
pub struct Failure {
    pub stage: Stage,
    pub errors: Vec<Error>,
}

impl Failure {
    pub fn batch(stage: Stage, errors: Vec<Error>) -> Self {
        Failure { stage, errors }
    }

    pub fn fault(stage: Stage, error: Error) -> Self {
        Failure {
            stage,
            errors: vec![error],
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.errors.iter().any(Error::is_fatal)
    }
}
