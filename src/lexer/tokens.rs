use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("module", TokenKind::Module);
        map.insert("fn", TokenKind::Fn);
        map.insert("nat", TokenKind::Nat);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("STANDARDLIB_FINISH_CODE", TokenKind::StdlibFinish);

        map.insert("pub", TokenKind::Pub);
        map.insert("priv", TokenKind::Priv);
        map.insert("prot", TokenKind::Prot);
        map.insert("own", TokenKind::Own);
        map.insert("mut", TokenKind::Mut);
        map.insert("const", TokenKind::Const);
        map.insert("nullable", TokenKind::Nullable);
        map.insert("nonnull", TokenKind::Nonnull);

        map.insert("int", TokenKind::Int);
        map.insert("long", TokenKind::Long);
        map.insert("double", TokenKind::Double);
        map.insert("float", TokenKind::Float);
        map.insert("bool", TokenKind::Bool);
        map.insert("string", TokenKind::Str);
        map.insert("char", TokenKind::Char);
        map.insert("void", TokenKind::Void);

        map.insert("true", TokenKind::BoolLiteral);
        map.insert("false", TokenKind::BoolLiteral);
        map.insert("null", TokenKind::NullLiteral);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,

    // Literals
    IntegerLiteral,
    LongLiteral,
    DoubleLiteral,
    FloatLiteral,
    BoolLiteral,
    StringLiteral,
    CharLiteral,
    NullLiteral,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Semicolon,
    Comma,
    Tilde,       // ~
    DoubleColon, // ::
    Question,    // ?
    Arrow,       // ->

    Assignment, // =
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    AndEquals,
    OrEquals,
    XorEquals,
    ShiftLeftEquals,
    ShiftRightEquals,
    PlusPlus,
    MinusMinus,

    Equals,    // ==
    NotEquals, // !=
    Not,       // !
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,  // ||
    And, // &&
    BitOr,
    BitAnd,
    BitXor,
    ShiftLeft,
    ShiftRight,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Module,
    Fn,
    Nat,
    If,
    Else,
    While,
    For,
    Return,
    StdlibFinish,

    // Modifiers
    Pub,
    Priv,
    Prot,
    Own,
    Mut,
    Const,
    Nullable,
    Nonnull,

    // Datatypes
    Int,
    Long,
    Double,
    Float,
    Bool,
    Str,
    Char,
    Void,
}

impl TokenKind {
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Pub
                | TokenKind::Priv
                | TokenKind::Prot
                | TokenKind::Own
                | TokenKind::Mut
                | TokenKind::Const
                | TokenKind::Nullable
                | TokenKind::Nonnull
        )
    }

    pub fn is_datatype(&self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Long
                | TokenKind::Double
                | TokenKind::Float
                | TokenKind::Bool
                | TokenKind::Str
                | TokenKind::Char
                | TokenKind::Void
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::LongLiteral
                | TokenKind::DoubleLiteral
                | TokenKind::FloatLiteral
                | TokenKind::BoolLiteral
                | TokenKind::StringLiteral
                | TokenKind::CharLiteral
                | TokenKind::NullLiteral
        )
    }

    /// `=` and every compound assignment operator.
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
                | TokenKind::PercentEquals
                | TokenKind::AndEquals
                | TokenKind::OrEquals
                | TokenKind::XorEquals
                | TokenKind::ShiftLeftEquals
                | TokenKind::ShiftRightEquals
        )
    }

    /// The binary operator a compound assignment applies, if any.
    pub fn compound_operator(&self) -> Option<TokenKind> {
        match self {
            TokenKind::PlusEquals => Some(TokenKind::Plus),
            TokenKind::MinusEquals => Some(TokenKind::Dash),
            TokenKind::StarEquals => Some(TokenKind::Star),
            TokenKind::SlashEquals => Some(TokenKind::Slash),
            TokenKind::PercentEquals => Some(TokenKind::Percent),
            TokenKind::AndEquals => Some(TokenKind::BitAnd),
            TokenKind::OrEquals => Some(TokenKind::BitOr),
            TokenKind::XorEquals => Some(TokenKind::BitXor),
            TokenKind::ShiftLeftEquals => Some(TokenKind::ShiftLeft),
            TokenKind::ShiftRightEquals => Some(TokenKind::ShiftRight),
            _ => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    /// Creates a token that has no place in the source, for desugaring.
    pub fn synthetic(kind: TokenKind, value: &str) -> Self {
        Token {
            kind,
            value: value.to_string(),
            span: Span::synthetic(),
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

// Positions are diagnostic metadata; two tokens are the same token when kind and lexeme agree.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
