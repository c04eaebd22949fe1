//! Datatypes and modifiers.
//!
//! This module defines the closed type system of the language:
//!
//! - Primitive kinds plus a nullable flag (`Datatype`)
//! - The assignment-compatibility rule (`Datatype::valid_varset`)
//! - Operator result typing for binary, prefix and cast expressions
//! - Declaration modifiers and their duplicate/conflict rules

use std::fmt::Display;

use crate::lexer::tokens::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int,
    Long,
    Double,
    Float,
    Bool,
    String,
    Char,
    Void,
    /// Bottom type of the `null` literal.
    Null,
}

impl PrimitiveKind {
    pub fn from_token_kind(kind: TokenKind) -> Option<PrimitiveKind> {
        match kind {
            TokenKind::Int => Some(PrimitiveKind::Int),
            TokenKind::Long => Some(PrimitiveKind::Long),
            TokenKind::Double => Some(PrimitiveKind::Double),
            TokenKind::Float => Some(PrimitiveKind::Float),
            TokenKind::Bool => Some(PrimitiveKind::Bool),
            TokenKind::Str => Some(PrimitiveKind::String),
            TokenKind::Char => Some(PrimitiveKind::Char),
            TokenKind::Void => Some(PrimitiveKind::Void),
            _ => None,
        }
    }

    /// The datatype keyword that spells this kind, if it has one.
    pub fn token_kind(&self) -> Option<TokenKind> {
        match self {
            PrimitiveKind::Int => Some(TokenKind::Int),
            PrimitiveKind::Long => Some(TokenKind::Long),
            PrimitiveKind::Double => Some(TokenKind::Double),
            PrimitiveKind::Float => Some(TokenKind::Float),
            PrimitiveKind::Bool => Some(TokenKind::Bool),
            PrimitiveKind::String => Some(TokenKind::Str),
            PrimitiveKind::Char => Some(TokenKind::Char),
            PrimitiveKind::Void => Some(TokenKind::Void),
            PrimitiveKind::Null => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::String => "string",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Void => "void",
            PrimitiveKind::Null => "null",
        }
    }

    /// Widening order of the numeric kinds. `char` widens like a small integer.
    fn numeric_rank(&self) -> Option<u8> {
        match self {
            PrimitiveKind::Char => Some(0),
            PrimitiveKind::Int => Some(1),
            PrimitiveKind::Long => Some(2),
            PrimitiveKind::Float => Some(3),
            PrimitiveKind::Double => Some(4),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, PrimitiveKind::Char | PrimitiveKind::Int | PrimitiveKind::Long)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Datatype {
    pub kind: PrimitiveKind,
    pub nullable: bool,
}

impl Datatype {
    pub const INT: Datatype = Datatype::new(PrimitiveKind::Int);
    pub const BOOL: Datatype = Datatype::new(PrimitiveKind::Bool);
    pub const STRING: Datatype = Datatype::new(PrimitiveKind::String);
    pub const VOID: Datatype = Datatype::new(PrimitiveKind::Void);
    pub const NULL: Datatype = Datatype {
        kind: PrimitiveKind::Null,
        nullable: true,
    };

    pub const fn new(kind: PrimitiveKind) -> Self {
        Datatype { kind, nullable: false }
    }

    pub fn with_nullable(self, nullable: bool) -> Self {
        Datatype { nullable, ..self }
    }

    /// Resolves a datatype keyword token.
    pub fn of_token(token: &Token, nullable: bool) -> Option<Datatype> {
        PrimitiveKind::from_token_kind(token.kind).map(|kind| Datatype { kind, nullable })
    }

    /// The type a literal token denotes.
    pub fn of_literal(kind: TokenKind) -> Option<Datatype> {
        match kind {
            TokenKind::IntegerLiteral => Some(Datatype::new(PrimitiveKind::Int)),
            TokenKind::LongLiteral => Some(Datatype::new(PrimitiveKind::Long)),
            TokenKind::DoubleLiteral => Some(Datatype::new(PrimitiveKind::Double)),
            TokenKind::FloatLiteral => Some(Datatype::new(PrimitiveKind::Float)),
            TokenKind::BoolLiteral => Some(Datatype::new(PrimitiveKind::Bool)),
            TokenKind::StringLiteral => Some(Datatype::new(PrimitiveKind::String)),
            TokenKind::CharLiteral => Some(Datatype::new(PrimitiveKind::Char)),
            TokenKind::NullLiteral => Some(Datatype::NULL),
            _ => None,
        }
    }

    /// Whether a value of type `source` may be stored into a `target` variable.
    ///
    /// Equal kinds are compatible, a non-nullable value fits a nullable slot,
    /// `null` fits any nullable slot, and numeric kinds widen along
    /// `char < int < long < float < double`.
    pub fn valid_varset(source: Datatype, target: Datatype) -> bool {
        if source.kind == PrimitiveKind::Void || target.kind == PrimitiveKind::Void {
            return false;
        }
        if source.kind == PrimitiveKind::Null {
            return target.nullable;
        }
        if source.nullable && !target.nullable {
            return false;
        }
        if source.kind == target.kind {
            return true;
        }
        match (source.kind.numeric_rank(), target.kind.numeric_rank()) {
            (Some(from), Some(to)) => from <= to && target.kind != PrimitiveKind::Char,
            _ => false,
        }
    }

    fn wider(left: PrimitiveKind, right: PrimitiveKind) -> PrimitiveKind {
        let promote = |kind: PrimitiveKind| {
            if kind == PrimitiveKind::Char {
                PrimitiveKind::Int
            } else {
                kind
            }
        };
        let (left, right) = (promote(left), promote(right));
        if left.numeric_rank() >= right.numeric_rank() {
            left
        } else {
            right
        }
    }

    /// Result type of `left operator right`, or `None` when the operator does
    /// not apply to these operands.
    pub fn binary_result(operator: TokenKind, left: Datatype, right: Datatype) -> Option<Datatype> {
        let (l, r) = (left.kind, right.kind);
        let numeric = l.is_numeric() && r.is_numeric();

        let kind = match operator {
            TokenKind::Plus if l == PrimitiveKind::String || r == PrimitiveKind::String => {
                if l == PrimitiveKind::Void || r == PrimitiveKind::Void {
                    return None;
                }
                PrimitiveKind::String
            }
            TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash | TokenKind::Percent
                if numeric =>
            {
                Datatype::wider(l, r)
            }
            TokenKind::BitAnd | TokenKind::BitOr | TokenKind::BitXor
                if l == PrimitiveKind::Bool && r == PrimitiveKind::Bool =>
            {
                PrimitiveKind::Bool
            }
            TokenKind::BitAnd | TokenKind::BitOr | TokenKind::BitXor
                if l.is_integral() && r.is_integral() =>
            {
                Datatype::wider(l, r)
            }
            TokenKind::ShiftLeft | TokenKind::ShiftRight if l.is_integral() && r.is_integral() => {
                Datatype::wider(l, PrimitiveKind::Int)
            }
            TokenKind::Less | TokenKind::LessEquals | TokenKind::Greater | TokenKind::GreaterEquals
                if numeric =>
            {
                PrimitiveKind::Bool
            }
            TokenKind::Equals | TokenKind::NotEquals => {
                let comparable = (l == r && l != PrimitiveKind::Void)
                    || numeric
                    || (l == PrimitiveKind::Null && right.nullable)
                    || (r == PrimitiveKind::Null && left.nullable);
                if !comparable {
                    return None;
                }
                PrimitiveKind::Bool
            }
            TokenKind::And | TokenKind::Or if l == PrimitiveKind::Bool && r == PrimitiveKind::Bool => {
                PrimitiveKind::Bool
            }
            _ => return None,
        };

        Some(Datatype::new(kind))
    }

    pub fn prefix_result(operator: TokenKind, operand: Datatype) -> Option<Datatype> {
        match operator {
            TokenKind::Dash if operand.kind.is_numeric() => {
                Some(Datatype::new(Datatype::wider(operand.kind, PrimitiveKind::Char)))
            }
            TokenKind::Not if operand.kind == PrimitiveKind::Bool => Some(Datatype::BOOL),
            _ => None,
        }
    }

    /// Explicit casts convert between numeric kinds or keep the kind unchanged.
    pub fn can_cast(source: Datatype, target: Datatype) -> bool {
        source.kind == target.kind || (source.kind.is_numeric() && target.kind.is_numeric())
    }
}

impl Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nullable && self.kind != PrimitiveKind::Null {
            write!(f, "nullable {}", self.kind.name())
        } else {
            write!(f, "{}", self.kind.name())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierAxis {
    Visibility,
    Mutability,
    Nullability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Own,
    Mutable,
    Constant,
    Nullable,
    Nonnull,
}

impl Modifier {
    pub fn of(kind: TokenKind) -> Option<Modifier> {
        match kind {
            TokenKind::Pub => Some(Modifier::Public),
            TokenKind::Priv => Some(Modifier::Private),
            TokenKind::Prot => Some(Modifier::Protected),
            TokenKind::Own => Some(Modifier::Own),
            TokenKind::Mut => Some(Modifier::Mutable),
            TokenKind::Const => Some(Modifier::Constant),
            TokenKind::Nullable => Some(Modifier::Nullable),
            TokenKind::Nonnull => Some(Modifier::Nonnull),
            _ => None,
        }
    }

    pub fn axis(&self) -> ModifierAxis {
        match self {
            Modifier::Public | Modifier::Private | Modifier::Protected => ModifierAxis::Visibility,
            Modifier::Own | Modifier::Mutable | Modifier::Constant => ModifierAxis::Mutability,
            Modifier::Nullable | Modifier::Nonnull => ModifierAxis::Nullability,
        }
    }

    /// `own` restricts who may write a variable, so it counts as visibility
    /// wherever visibility is rejected.
    pub fn is_visibility(&self) -> bool {
        self.axis() == ModifierAxis::Visibility || *self == Modifier::Own
    }

    pub fn is_mutability(&self) -> bool {
        self.axis() == ModifierAxis::Mutability
    }

    /// Parses a run of modifier tokens, skipping anything that is not one.
    pub fn all_of(tokens: &[Token]) -> Vec<Modifier> {
        tokens.iter().filter_map(|token| Modifier::of(token.kind)).collect()
    }

    /// The first token repeating a modifier that already appeared.
    pub fn first_duplicate(tokens: &[Token]) -> Option<&Token> {
        tokens
            .iter()
            .enumerate()
            .find(|(i, token)| tokens[..*i].iter().any(|earlier| earlier.kind == token.kind))
            .map(|(_, token)| token)
    }

    /// The first token whose modifier shares an axis with a different, earlier one.
    pub fn first_conflicting(tokens: &[Token]) -> Option<&Token> {
        tokens.iter().enumerate().find_map(|(i, token)| {
            let modifier = Modifier::of(token.kind)?;
            tokens[..i]
                .iter()
                .filter_map(|earlier| Modifier::of(earlier.kind))
                .any(|earlier| earlier != modifier && earlier.axis() == modifier.axis())
                .then_some(token)
        })
    }

    /// A variable is constant unless it is `mut` or `own`, or when it is explicitly `const`.
    pub fn is_constant(modifiers: &[Modifier]) -> bool {
        modifiers.contains(&Modifier::Constant)
            || !(modifiers.contains(&Modifier::Mutable) || modifiers.contains(&Modifier::Own))
    }
}
