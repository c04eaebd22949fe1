use crate::lexer::tokens::Token;

use super::{ast::Stmt, expressions::TypedExpr};

/// `module NAME { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleStmt {
    pub identifier: Token,
    pub body: Vec<Stmt>,
}

/// One declared parameter: `MODS TYPE NAME`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNode {
    pub modifiers: Vec<Token>,
    pub datatype: Token,
    pub identifier: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinitionStmt {
    pub modifiers: Vec<Token>,
    pub identifier: Token,
    /// Datatype keyword of the return type; synthesized `void` when omitted.
    pub return_type: Token,
    pub parameters: Vec<ParameterNode>,
    pub body: Vec<Stmt>,
}

/// `MODS nat fn NAME :: TYPE (PARAMS) -> "namespace";`
#[derive(Debug, Clone, PartialEq)]
pub struct NativeFunctionDefinitionStmt {
    pub modifiers: Vec<Token>,
    pub identifier: Token,
    pub return_type: Token,
    pub parameters: Vec<ParameterNode>,
    /// String literal naming the host namespace.
    pub binding: Token,
}

impl NativeFunctionDefinitionStmt {
    /// The name the host binding is looked up under.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.binding.value, self.identifier.value)
    }
}

/// `MODS TYPE NAME;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDefinitionStmt {
    pub modifiers: Vec<Token>,
    pub identifier: Token,
    pub datatype: Token,
}

/// `MODS TYPE NAME = value;`. For `?` declarations `datatype` holds the
/// inferred type's keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDefAndSetValueStmt {
    pub modifiers: Vec<Token>,
    pub identifier: Token,
    pub datatype: Token,
    pub value: TypedExpr,
}

/// `NAME OP value;` including the desugared forms of `++` and `--`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarSetValueStmt {
    pub identifier: Token,
    pub operator: Token,
    pub value: TypedExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallStmt {
    pub identifier: Token,
    pub arguments: Vec<TypedExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(Vec<Stmt>),
    ElseIf(Box<IfStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub keyword: Token,
    pub condition: TypedExpr,
    pub body: Vec<Stmt>,
    pub else_branch: Option<ElseBranch>,
}

impl IfStmt {
    /// The innermost `if` of an `else if` chain that still has no else branch.
    pub fn last_open_mut(&mut self) -> Option<&mut IfStmt> {
        match self.else_branch {
            None => Some(self),
            Some(ElseBranch::ElseIf(ref mut next)) => next.last_open_mut(),
            Some(ElseBranch::Block(_)) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub keyword: Token,
    pub condition: TypedExpr,
    pub body: Vec<Stmt>,
}

/// Canonical for loop. The control variable lives in its own scope around
/// the loop; both surface forms produce this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub keyword: Token,
    pub variable: VarDefAndSetValueStmt,
    pub condition: TypedExpr,
    /// Either a `VarSetValue` or a `FunctionCall`.
    pub instruction: Box<Stmt>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<TypedExpr>,
}
