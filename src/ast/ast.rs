use crate::{lexer::tokens::Token, Span};

use super::statements::{
    ForStmt, FunctionCallStmt, FunctionDefinitionStmt, IfStmt, ModuleStmt,
    NativeFunctionDefinitionStmt, ReturnStmt, VarDefAndSetValueStmt, VarDefinitionStmt,
    VarSetValueStmt, WhileStmt,
};

/// Statement Types
///
/// Every statement form the front end produces. Each variant's struct fixes
/// the children it carries, so consumers never inspect arity.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    CreateModule(ModuleStmt),
    FunctionDefinition(FunctionDefinitionStmt),
    NativeFunctionDefinition(NativeFunctionDefinitionStmt),
    VarDefinition(VarDefinitionStmt),
    VarDefAndSetValue(VarDefAndSetValueStmt),
    VarSetValue(VarSetValueStmt),
    FunctionCall(FunctionCallStmt),
    If(IfStmt),
    While(WhileStmt),
    ForFakeScope(ForStmt),
    Return(ReturnStmt),
    /// `STANDARDLIB_FINISH_CODE;`
    StdlibFinish(Token),
}

impl Stmt {
    /// Returns the span of the token that names or introduces the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::CreateModule(stmt) => &stmt.identifier.span,
            Stmt::FunctionDefinition(stmt) => &stmt.identifier.span,
            Stmt::NativeFunctionDefinition(stmt) => &stmt.identifier.span,
            Stmt::VarDefinition(stmt) => &stmt.identifier.span,
            Stmt::VarDefAndSetValue(stmt) => &stmt.identifier.span,
            Stmt::VarSetValue(stmt) => &stmt.identifier.span,
            Stmt::FunctionCall(stmt) => &stmt.identifier.span,
            Stmt::If(stmt) => &stmt.keyword.span,
            Stmt::While(stmt) => &stmt.keyword.span,
            Stmt::ForFakeScope(stmt) => &stmt.keyword.span,
            Stmt::Return(stmt) => &stmt.keyword.span,
            Stmt::StdlibFinish(token) => &token.span,
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Stmt::CreateModule(_) => "CREATE_MODULE",
            Stmt::FunctionDefinition(_) => "FUNCTION_DEFINITION",
            Stmt::NativeFunctionDefinition(_) => "NATIVE_FUNCTION_DEFINITION",
            Stmt::VarDefinition(_) => "VAR_DEFINITION",
            Stmt::VarDefAndSetValue(_) => "VAR_DEF_AND_SET_VALUE",
            Stmt::VarSetValue(_) => "VAR_SET_VALUE",
            Stmt::FunctionCall(_) => "FUNCTION_CALL",
            Stmt::If(_) => "IF",
            Stmt::While(_) => "WHILE",
            Stmt::ForFakeScope(_) => "FOR_FAKE_SCOPE",
            Stmt::Return(_) => "RETURN",
            Stmt::StdlibFinish(_) => "STANDARDLIB_FINISH",
        }
    }
}
