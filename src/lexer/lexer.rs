use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl, Failure, Stage},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, COMPARATORS, OPERATORS, RESERVED_KEYWORDS};

/// Columns a tab stop advances.
const TAB_WIDTH: usize = 4;

pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

/// Builds `^(?:a|b|c)\b` out of a word table.
fn word_alternation(words: &[&str]) -> String {
    let alternatives = words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<String>>()
        .join("|");
    format!("^(?:{})\\b", alternatives)
}

lazy_static! {
    /// Tried in order against the start of the unscanned remainder of a line.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^Bomba:.*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(&word_alternation(&RESERVED_KEYWORDS)).unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Keyword) },
        RegexPattern { regex: Regex::new(&word_alternation(&OPERATORS)).unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Operator) },
        RegexPattern { regex: Regex::new(&word_alternation(&COMPARATORS)).unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comparator) },
        RegexPattern { regex: Regex::new("^~[^~]*~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Text) },
        RegexPattern { regex: Regex::new("^(?:True|False)\\b").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Boolean) },
        RegexPattern { regex: Regex::new("^[a-záéíóúüñ_][a-záéíóúüñA-ZÁÉÍÓÚÑ0-9_]*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Identifier) },
        RegexPattern { regex: Regex::new("^-?[0-9]+\\.[0-9]+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Float) },
        RegexPattern { regex: Regex::new("^-?[0-9]+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Integer) },
        RegexPattern { regex: Regex::new("^[/{}()]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Punctuation) },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: whitespace_handler },
    ];
}

/// Scanner state for one source text, processed line by line.
pub struct Lexer {
    tokens: Vec<Token>,
    errors: Vec<Error>,
    remainder: String,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new() -> Lexer {
        Lexer {
            tokens: vec![],
            errors: vec![],
            remainder: String::new(),
            line: 0,
            column: 1,
        }
    }

    fn start_line(&mut self, line: &str) {
        self.remainder = line.to_string();
        self.line += 1;
        self.column = 1;
    }

    /// Consumes `matched`, which must be a prefix of the remainder.
    pub fn advance_n(&mut self, matched: &str) {
        self.remainder.drain(..matched.len());
        self.column += matched.chars().count();
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn at_end_of_line(&self) -> bool {
        self.remainder.is_empty()
    }

    fn skip_unknown_character(&mut self) {
        if let Some(ch) = self.remainder.chars().next() {
            self.errors.push(Error::new(
                ErrorImpl::UnknownCharacter,
                self.position(),
                ch.to_string(),
            ));
            self.remainder.drain(..ch.len_utf8());
            self.column += 1;
        }
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) {
    lexer.advance_n(matched);
}

fn whitespace_handler(lexer: &mut Lexer, matched: &str) {
    let width: usize = matched
        .chars()
        .map(|ch| if ch == '\t' { TAB_WIDTH } else { 1 })
        .sum();
    lexer.remainder.drain(..matched.len());
    lexer.column += width;
}

/// Scans the whole source into tokens, ending with an `EOF` token.
///
/// Unknown characters are collected and skipped one at a time; if any were
/// found the scan fails with all of them once the input is exhausted.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Failure> {
    let mut lex = Lexer::new();

    for line in source.lines() {
        lex.start_line(line);

        while !lex.at_end_of_line() {
            let matched = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(&lex.remainder)
                    .map(|found| (pattern.handler, found.as_str().to_string()))
            });

            match matched {
                Some((handler, text)) if !text.is_empty() => handler(&mut lex, &text),
                _ => lex.skip_unknown_character(),
            }
        }
    }

    if !lex.errors.is_empty() {
        debug!("scanner found {} unknown characters", lex.errors.len());
        return Err(Failure::batch(Stage::Scanning, lex.errors));
    }

    let eof_position = Position::new(lex.line.max(1), lex.column);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), eof_position));
    debug!("scanned {} tokens", lex.tokens.len());
    Ok(lex.tokens)
}
