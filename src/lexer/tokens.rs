use lazy_static::lazy_static;
use std::fmt::Display;

use crate::Position;

lazy_static! {
    /// Keywords that introduce a statement or a construct. Multi-word
    /// keywords are single tokens.
    pub static ref RESERVED_KEYWORDS: Vec<&'static str> = vec![
        "mae",
        "sarpe",
        "jefe",
        "jefa",
        "safis",
        "como está la vara",
        "movida",
        "juéguesela",
        "tortón",
        "llamese",
        "dele vuelta",
        "diay siii",
        "sino ni modo",
        "upee",
        "metale",
        "casorio",
        "divorcio",
    ];

    pub static ref OPERATORS: Vec<&'static str> = vec![
        "echele",
        "quitele",
        "chuncherequee",
        "desmadeje",
    ];

    /// Longer comparators are listed first so that alternation prefers them.
    pub static ref COMPARATORS: Vec<&'static str> = vec![
        "menos o igualitico",
        "más o igualitico",
        "misma vara",
        "otra vara",
        "cañazo",
        "poquitico",
    ];
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Keyword,
    Comparator,
    Operator,
    Boolean,
    Text,
    Identifier,
    Integer,
    Float,
    Punctuation,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:30} <{}> Línea: {} Columna: {}",
            self.kind.to_string(),
            self.value,
            self.position.line,
            self.position.column
        )
    }
}

impl Token {
    pub fn is(&self, text: &str) -> bool {
        self.value == text
    }

    pub fn is_one_of_many(&self, texts: &[&str]) -> bool {
        texts.iter().any(|text| self.value == *text)
    }

    /// Literal tokens: anything that can stand alone as a value.
    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Integer | TokenKind::Float | TokenKind::Boolean | TokenKind::Text
        )
    }
}
