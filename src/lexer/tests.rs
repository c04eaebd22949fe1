//! Unit tests for the lexer module.

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.mu".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("module fn nat if else while for return STANDARDLIB_FINISH_CODE"),
        vec![
            TokenKind::Module,
            TokenKind::Fn,
            TokenKind::Nat,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Return,
            TokenKind::StdlibFinish,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_modifiers_and_datatypes() {
    let tokens = kinds("pub priv prot own mut const nullable nonnull int long double float bool string char void");

    assert!(tokens[..8].iter().all(|kind| kind.is_modifier()));
    assert!(tokens[8..16].iter().all(|kind| kind.is_datatype()));
    assert_eq!(tokens[16], TokenKind::EOF);
}

#[test]
fn test_tokenize_qualified_identifier() {
    let tokens = tokenize("std.io.println x".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "std.io.println");
    assert_eq!(tokens[1].value, "x");
}

#[test]
fn test_tokenize_numeric_literals() {
    let tokens = tokenize("42 7L 3.14 2.5f".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[1].kind, TokenKind::LongLiteral);
    assert_eq!(tokens[1].value, "7");
    assert_eq!(tokens[2].kind, TokenKind::DoubleLiteral);
    assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[3].value, "2.5");
}

#[test]
fn test_tokenize_invalid_number_suffix() {
    assert!(tokenize("12x".to_string(), None).is_err());
}

#[test]
fn test_tokenize_string_and_char_escapes() {
    let tokens = tokenize(r#""hello\nworld" '\t' 'a'"#.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[1].value, "\t");
    assert_eq!(tokens[2].value, "a");
}

#[test]
fn test_tokenize_bool_and_null() {
    assert_eq!(
        kinds("true false null"),
        vec![TokenKind::BoolLiteral, TokenKind::BoolLiteral, TokenKind::NullLiteral, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_function_header() {
    assert_eq!(
        kinds("pub fn add :: int (int a, int b) {"),
        vec![
            TokenKind::Pub,
            TokenKind::Fn,
            TokenKind::Identifier,
            TokenKind::DoubleColon,
            TokenKind::Int,
            TokenKind::OpenParen,
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_compound_operators() {
    assert_eq!(
        kinds("++ -- += -= <<= >>= << >> -> == != <= >="),
        vec![
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::ShiftLeftEquals,
            TokenKind::ShiftRightEquals,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::Arrow,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_indefinite_mutable() {
    assert_eq!(
        kinds("mut? a = 5;"),
        vec![
            TokenKind::Mut,
            TokenKind::Question,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::IntegerLiteral,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("int x // trailing comment\n;"),
        vec![TokenKind::Int, TokenKind::Identifier, TokenKind::Semicolon, TokenKind::EOF]
    );
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("int  x;".to_string(), None).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[2].span.start.0, 6);
}

#[test]
fn test_tokenize_unrecognized_token() {
    assert!(tokenize("int x = @;".to_string(), None).is_err());
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}
