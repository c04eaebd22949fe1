use crate::{lexer::tokens::Token, Span};

use super::types::Datatype;

/// An expression paired with the type inferred for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    pub datatype: Datatype,
    pub expr: Expr,
}

impl TypedExpr {
    pub fn new(datatype: Datatype, expr: Expr) -> Self {
        TypedExpr { datatype, expr }
    }

    pub fn get_span(&self) -> &Span {
        self.expr.get_span()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Variable(VariableExpr),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Cast(CastExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.value.span,
            Expr::Variable(expr) => &expr.identifier.span,
            Expr::Binary(expr) => expr.left.get_span(),
            Expr::Prefix(expr) => &expr.operator.span,
            Expr::Cast(expr) => &expr.target.span,
            Expr::Assignment(expr) => &expr.assignee.span,
            Expr::Call(expr) => &expr.callee.span,
        }
    }
}

// LITERALS

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Token,
}

/// A read of a local or global variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub identifier: Token,
}

// COMPLEX

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<TypedExpr>,
    pub operator: Token,
    pub right: Box<TypedExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right: Box<TypedExpr>,
}

/// `(TYPE) value`
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub target: Token,
    pub value: Box<TypedExpr>,
}

/// An assignment used as a value, e.g. `(i += 3) + 5`. Its type is the
/// assignee's type.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: Token,
    pub operator: Token,
    pub value: Box<TypedExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Token,
    pub arguments: Vec<TypedExpr>,
}
