//! Type lattice used by the semantic analyzer.
//!
//! The language has no type annotations; every type is inferred:
//!
//! - `Number` for integer and float literals and all arithmetic
//! - `Text` for `~...~` literals
//! - `Boolean` for `True`/`False` and conditions
//! - `Any` for values whose type is not locally inferable (parameters)
//! - `None` for constructs that produce no value

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Number,
    Text,
    Boolean,
    Any,
    None,
}

impl DataType {
    pub fn is_any(&self) -> bool {
        *self == DataType::Any
    }

    pub fn is_none(&self) -> bool {
        *self == DataType::None
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::Number => "NUMBER",
            DataType::Text => "TEXT",
            DataType::Boolean => "BOOLEAN",
            DataType::Any => "ANY",
            DataType::None => "NONE",
        };
        write!(f, "{}", name)
    }
}
