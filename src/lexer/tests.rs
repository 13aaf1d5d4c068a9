//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, including multi-word keywords
//! - Identifiers with accented characters
//! - Numeric, text and boolean literals
//! - Comparators and operators
//! - Comments and column tracking
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("mae sarpe jefe jefa safis upee metale movida tortón").unwrap();

    for token in &tokens[..9] {
        assert_eq!(token.kind, TokenKind::Keyword);
    }
    assert_eq!(tokens[9].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_multi_word_keywords() {
    let tokens = tokenize("diay siii sino ni modo dele vuelta como está la vara").unwrap();

    assert_eq!(tokens[0].value, "diay siii");
    assert_eq!(tokens[1].value, "sino ni modo");
    assert_eq!(tokens[2].value, "dele vuelta");
    assert_eq!(tokens[3].value, "como está la vara");
    assert!(tokens[..4].iter().all(|t| t.kind == TokenKind::Keyword));
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let tokens = tokenize("maestro upeee").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "maestro");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "upeee");
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _underscore año camiónGrande").unwrap();

    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_underscore");
    assert_eq!(tokens[3].value, "año");
    assert_eq!(tokens[4].value, "camiónGrande");
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 -7 -0.5").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[2].value, "-7");
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value, "-0.5");
}

#[test]
fn test_tokenize_text_keeps_tildes() {
    let tokens = tokenize("~hola mundo~ ~~").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Text);
    assert_eq!(tokens[0].value, "~hola mundo~");
    assert_eq!(tokens[1].kind, TokenKind::Text);
    assert_eq!(tokens[1].value, "~~");
}

#[test]
fn test_tokenize_booleans() {
    let tokens = tokenize("True False").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Boolean);
    assert_eq!(tokens[1].kind, TokenKind::Boolean);
}

#[test]
fn test_tokenize_comparators() {
    let source = "cañazo poquitico misma vara otra vara menos o igualitico más o igualitico";
    let tokens = tokenize(source).unwrap();

    let values: Vec<&str> = tokens[..6].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(
        values,
        vec![
            "cañazo",
            "poquitico",
            "misma vara",
            "otra vara",
            "menos o igualitico",
            "más o igualitico"
        ]
    );
    assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Comparator));
}

#[test]
fn test_tokenize_operators_and_connectors() {
    let tokens = tokenize("echele quitele chuncherequee desmadeje casorio divorcio").unwrap();

    assert!(tokens[..4].iter().all(|t| t.kind == TokenKind::Operator));
    assert_eq!(tokens[4].kind, TokenKind::Keyword);
    assert_eq!(tokens[5].kind, TokenKind::Keyword);
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = tokenize("( ) { } /").unwrap();

    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Punctuation));
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("x metale 5\nBomba: esto no cuenta\ny metale 10").unwrap();

    assert_eq!(tokens.len(), 7);
    assert_eq!(tokens[3].value, "y");
    assert_eq!(tokens[3].position.line, 3);
}

#[test]
fn test_positions_are_one_based() {
    let tokens = tokenize("x metale 5\n  y metale 6").unwrap();

    assert_eq!((tokens[0].position.line, tokens[0].position.column), (1, 1));
    assert_eq!((tokens[1].position.line, tokens[1].position.column), (1, 3));
    assert_eq!((tokens[2].position.line, tokens[2].position.column), (1, 10));
    assert_eq!((tokens[3].position.line, tokens[3].position.column), (2, 3));
}

#[test]
fn test_tab_counts_as_four_columns() {
    let tokens = tokenize("\tx").unwrap();

    assert_eq!(tokens[0].position.column, 5);
}

#[test]
fn test_unknown_characters_are_all_collected() {
    let failure = tokenize("x metale 5 @\ny # 3").unwrap_err();

    assert_eq!(failure.errors.len(), 2);
    assert_eq!(failure.errors[0].get_text(), "@");
    assert_eq!(failure.errors[0].get_position().line, 1);
    assert_eq!(failure.errors[0].get_position().column, 12);
    assert_eq!(failure.errors[1].get_text(), "#");
    assert_eq!(failure.errors[1].get_position().line, 2);
    assert!(!failure.is_fatal());
}

#[test]
fn test_tokenize_simple_program() {
    let tokens = tokenize("jefe mae { x metale 42 }").unwrap();

    assert_eq!(tokens.len(), 8); // jefe, mae, {, x, metale, 42, }, EOF
    assert_eq!(tokens[0].kind, TokenKind::Keyword);
    assert_eq!(tokens[2].kind, TokenKind::Punctuation);
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[5].kind, TokenKind::Integer);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}
