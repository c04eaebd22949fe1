use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    // Order matters: longer operators must come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"^\s+", skip_handler),
        RegexPattern::new(r"^//[^\n]*", skip_handler),
        RegexPattern::new(r"^[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z_][a-zA-Z0-9_]*)*", symbol_handler),
        RegexPattern::new(r"^[0-9]+(\.[0-9]+)?[a-zA-Z]?", number_handler),
        RegexPattern::new(r#"^"(\\.|[^"\\])*""#, string_handler),
        RegexPattern::new(r"^'(\\.|[^'\\])'", char_handler),
        RegexPattern::new(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        RegexPattern::new(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        RegexPattern::new(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        RegexPattern::new(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        RegexPattern::new(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        RegexPattern::new(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        RegexPattern::new(r"^~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")),
        RegexPattern::new(r"^::", MK_DEFAULT_HANDLER!(TokenKind::DoubleColon, "::")),
        RegexPattern::new(r"^\?", MK_DEFAULT_HANDLER!(TokenKind::Question, "?")),
        RegexPattern::new(r"^->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
        RegexPattern::new(r"^<<=", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeftEquals, "<<=")),
        RegexPattern::new(r"^>>=", MK_DEFAULT_HANDLER!(TokenKind::ShiftRightEquals, ">>=")),
        RegexPattern::new(r"^<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<")),
        RegexPattern::new(r"^>>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>")),
        RegexPattern::new(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        RegexPattern::new(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        RegexPattern::new(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        RegexPattern::new(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        RegexPattern::new(r"^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        RegexPattern::new(r"^\|\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        RegexPattern::new(r"^\+\+", MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++")),
        RegexPattern::new(r"^--", MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--")),
        RegexPattern::new(r"^\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        RegexPattern::new(r"^-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        RegexPattern::new(r"^\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        RegexPattern::new(r"^/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        RegexPattern::new(r"^%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=")),
        RegexPattern::new(r"^&=", MK_DEFAULT_HANDLER!(TokenKind::AndEquals, "&=")),
        RegexPattern::new(r"^\|=", MK_DEFAULT_HANDLER!(TokenKind::OrEquals, "|=")),
        RegexPattern::new(r"^\^=", MK_DEFAULT_HANDLER!(TokenKind::XorEquals, "^=")),
        RegexPattern::new(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        RegexPattern::new(r"^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        RegexPattern::new(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        RegexPattern::new(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        RegexPattern::new(r"^&", MK_DEFAULT_HANDLER!(TokenKind::BitAnd, "&")),
        RegexPattern::new(r"^\|", MK_DEFAULT_HANDLER!(TokenKind::BitOr, "|")),
        RegexPattern::new(r"^\^", MK_DEFAULT_HANDLER!(TokenKind::BitXor, "^")),
        RegexPattern::new(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        RegexPattern::new(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        RegexPattern::new(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        RegexPattern::new(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        RegexPattern::new(r"^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = Rc::new(file.unwrap_or_else(|| String::from("shell")));

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// The span covering the next `len` bytes of input.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
    Ok(())
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    let has_fraction = matched.contains('.');

    let (kind, value) = match matched.chars().last() {
        Some('f') | Some('F') if has_fraction => (TokenKind::FloatLiteral, &matched[..matched.len() - 1]),
        Some('l') | Some('L') if !has_fraction => (TokenKind::LongLiteral, &matched[..matched.len() - 1]),
        Some(c) if c.is_ascii_digit() && has_fraction => (TokenKind::DoubleLiteral, &matched[..]),
        Some(c) if c.is_ascii_digit() => (TokenKind::IntegerLiteral, &matched[..]),
        _ => {
            return Err(Error::new(
                ErrorImpl::NumberParseError { token: matched.clone() },
                lexer.position(),
            ))
        }
    };

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(kind, String::from(value), span));
    lexer.advance_n(matched.len());
    Ok(())
}

fn unescape(literal: &str) -> String {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.peek() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            // Keep unknown escapes verbatim
            Some(other) => {
                result.push('\\');
                result.push(*other);
            }
            None => {
                result.push('\\');
                continue;
            }
        }
        chars.next();
    }

    result
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    let value = unescape(&matched[1..matched.len() - 1]);

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::StringLiteral, value, span));
    lexer.advance_n(matched.len());
    Ok(())
}

fn char_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    let value = unescape(&matched[1..matched.len() - 1]);

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::CharLiteral, value, span));
    lexer.advance_n(matched.len());
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = lexer.matched(regex);
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let span = lexer.span_of(value.len());
    let len = value.len();
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(len);
    Ok(())
}

/// Tokenizes Mu source text. The returned stream always ends with an EOF token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => {
                let token = lex.remainder().chars().next().unwrap_or_default().to_string();
                return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, lex.position()));
            }
        }
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
