use std::collections::HashMap;

use crate::{
    ast::{ast::Stmt, expressions::TypedExpr},
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Primary,
}

/// Receives the statement's tokens without its leading modifiers, and the modifiers.
pub type StmtHandler = fn(&mut Parser, &[Token], &[Token]) -> Option<Stmt>;
pub type NUDHandler = fn(&mut Parser) -> Result<TypedExpr, Error>;
pub type LEDHandler = fn(&mut Parser, TypedExpr, BindingPower) -> Result<TypedExpr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Bitwise
    parser.led(TokenKind::BitOr, BindingPower::BitwiseOr, parse_binary_expr);
    parser.led(TokenKind::BitXor, BindingPower::BitwiseXor, parse_binary_expr);
    parser.led(TokenKind::BitAnd, BindingPower::BitwiseAnd, parse_binary_expr);

    // Relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::ShiftLeft, BindingPower::Shift, parse_binary_expr);
    parser.led(TokenKind::ShiftRight, BindingPower::Shift, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Literals and symbols
    parser.nud(TokenKind::IntegerLiteral, parse_literal_expr);
    parser.nud(TokenKind::LongLiteral, parse_literal_expr);
    parser.nud(TokenKind::DoubleLiteral, parse_literal_expr);
    parser.nud(TokenKind::FloatLiteral, parse_literal_expr);
    parser.nud(TokenKind::BoolLiteral, parse_literal_expr);
    parser.nud(TokenKind::StringLiteral, parse_literal_expr);
    parser.nud(TokenKind::CharLiteral, parse_literal_expr);
    parser.nud(TokenKind::NullLiteral, parse_literal_expr);
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Module, parse_module_stmt);
    parser.stmt(TokenKind::Fn, parse_fn_decl_stmt);
    parser.stmt(TokenKind::Nat, parse_native_fn_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::StdlibFinish, parse_stdlib_finish_stmt);
    parser.stmt(TokenKind::Identifier, parse_identifier_stmt);
    parser.stmt(TokenKind::Question, parse_var_decl_stmt);
    for datatype in [
        TokenKind::Int,
        TokenKind::Long,
        TokenKind::Double,
        TokenKind::Float,
        TokenKind::Bool,
        TokenKind::Str,
        TokenKind::Char,
        TokenKind::Void,
    ] {
        parser.stmt(datatype, parse_var_decl_stmt);
    }
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
