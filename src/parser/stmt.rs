//! Statement handlers.
//!
//! Every handler receives one statement's tokens, starting at its keyword
//! (or first token) and ending with its `;` or `{`, plus the modifiers that
//! preceded it. During the skim pass handlers only check placement and
//! register declarations, then return `None`; during the evaluate pass they
//! check everything else and build the statement.

use tracing::trace;

use crate::{
    ast::{
        ast::Stmt,
        expressions::{Expr, LiteralExpr, TypedExpr},
        statements::{
            ForStmt, FunctionCallStmt, FunctionDefinitionStmt, IfStmt, ModuleStmt, NativeFunctionDefinitionStmt,
            ParameterNode, ReturnStmt, VarDefAndSetValueStmt, VarDefinitionStmt, VarSetValueStmt, WhileStmt,
        },
        types::{Datatype, Modifier, PrimitiveKind},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
    symbols::{
        function::{FunctionBody, FunctionDefinition, FunctionParameter},
        symbols::ModuleId,
        variable::Variable,
    },
};

use super::{
    expr::{parse_expression, try_parse_expression},
    parser::Parser,
    scope::ScopeKind,
    types::{parse_datatype, parse_parameters, type_token},
};

/// Splits the leading modifier tokens off a statement.
pub fn split_modifiers(tokens: &[Token]) -> (&[Token], &[Token]) {
    let split = tokens.iter().take_while(|token| token.kind.is_modifier()).count();
    tokens.split_at(split)
}

/// Dispatches one statement to its handler.
pub fn parse_statement(parser: &mut Parser, tokens: &[Token]) -> Option<Stmt> {
    let (modifiers, rest) = split_modifiers(tokens);
    let first = rest.first()?;

    if first.kind == TokenKind::Semicolon && rest.len() == 1 {
        if !modifiers.is_empty() {
            parser.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from("a declaration after the modifiers"),
                    found: first.value.clone(),
                },
                first,
            );
        }
        return None;
    }

    let handler = match parser.get_stmt_lookup().get(&first.kind) {
        Some(handler) => *handler,
        None => {
            parser.error(
                ErrorImpl::UnexpectedToken {
                    token: first.value.clone(),
                },
                first,
            );
            return None;
        }
    };

    trace!(kind = %first.kind, skimming = parser.is_skimming(), "statement");
    handler(parser, rest, modifiers)
}

/// Tokens between the statement's first token and its terminator.
fn inner(tokens: &[Token]) -> &[Token] {
    if tokens.len() < 2 {
        return &[];
    }
    &tokens[1..tokens.len() - 1]
}

fn undotted_identifier<'t>(parser: &mut Parser, tokens: &'t [Token], index: usize, what: &str) -> Option<&'t Token> {
    let identifier = parser.expect_at(tokens, index, &[TokenKind::Identifier], what)?;
    if identifier.value.contains('.') {
        parser.error(
            ErrorImpl::ExpectedToken {
                expected: what.to_string(),
                found: identifier.value.clone(),
            },
            identifier,
        );
        return None;
    }
    Some(identifier)
}

fn expect_end(parser: &mut Parser, tokens: &[Token], len: usize) -> Option<()> {
    match tokens.get(len - 1) {
        Some(_) if tokens.len() == len => Some(()),
        Some(_) => {
            let extra = &tokens[len - 1];
            parser.error(
                ErrorImpl::UnexpectedToken {
                    token: extra.value.clone(),
                },
                extra,
            );
            None
        }
        None => None,
    }
}

fn global_placement(parser: &Parser) -> bool {
    match parser.scopes().current_kind() {
        ScopeKind::Module => true,
        ScopeKind::Parent => parser.is_stdlib(),
        _ => false,
    }
}

fn parse_condition(parser: &mut Parser, tokens: &[Token]) -> Option<TypedExpr> {
    let keyword = &tokens[0];
    let condition = parse_expression(parser, inner(tokens), keyword)?;
    if condition.datatype != Datatype::BOOL {
        parser.error(
            ErrorImpl::ConditionNotBoolean {
                statement: keyword.value.clone(),
                received: condition.datatype.to_string(),
            },
            keyword,
        );
        return None;
    }
    Some(condition)
}

// MODULES

pub fn parse_module_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    parser.reject_modifiers(modifiers)?;
    let identifier = undotted_identifier(parser, tokens, 1, "a module name")?;
    parser.expect_at(tokens, 2, &[TokenKind::OpenCurly], "`{`")?;
    expect_end(parser, tokens, 3)?;

    if !matches!(parser.scopes().current_kind(), ScopeKind::Parent | ScopeKind::Module) {
        parser.error(
            ErrorImpl::IllegalPlacement {
                message: String::from("modules can only be declared at the top level or inside another module"),
            },
            &tokens[0],
        );
        return None;
    }

    let parent = parser.scopes().current_module();
    let module = match parser.symbols().find_submodule_by_name(parent, &identifier.value) {
        Some(module) => module,
        None => match parser.symbols_mut().add_submodule(parent, &identifier.value) {
            Ok(module) => module,
            Err(error) => {
                parser.report(error.into_diagnostic(identifier.span.start.clone()));
                return None;
            }
        },
    };
    parser.scopes_mut().push_in(ScopeKind::Module, module);

    if parser.is_skimming() {
        return None;
    }
    Some(Stmt::CreateModule(ModuleStmt {
        identifier: identifier.clone(),
        body: vec![],
    }))
}

// FUNCTIONS

struct Signature {
    identifier: Token,
    return_type: Token,
    parameters: Vec<ParameterNode>,
}

/// Parses `fn NAME`, `fn NAME ~ (PARAMS)` or `fn NAME :: TYPE (PARAMS)`.
fn parse_signature(parser: &mut Parser, header: &[Token], allow_bare: bool) -> Option<Signature> {
    parser.expect_at(header, 0, &[TokenKind::Fn], "`fn`")?;
    let identifier = undotted_identifier(parser, header, 1, "a function name")?.clone();

    let void = Token::synthetic(TokenKind::Void, "void");
    let (return_type, open) = match header.get(2).map(|token| token.kind) {
        None if allow_bare => {
            return Some(Signature {
                identifier,
                return_type: void,
                parameters: vec![],
            })
        }
        Some(TokenKind::Tilde) => (void, 3),
        Some(TokenKind::DoubleColon) => {
            let datatype = parser.expect_at(header, 3, &DATATYPES, "a return type")?;
            (datatype.clone(), 4)
        }
        _ => {
            parser.expect_at(header, 2, &[TokenKind::Tilde, TokenKind::DoubleColon], "`~` or `::`")?;
            return None;
        }
    };

    parser.expect_at(header, open, &[TokenKind::OpenParen], "`(`")?;
    let close = header.len() - 1;
    if close == open || header[close].kind != TokenKind::CloseParen {
        let last = &header[close];
        parser.error(
            ErrorImpl::ExpectedToken {
                expected: String::from("`)`"),
                found: last.value.clone(),
            },
            last,
        );
        return None;
    }

    let parameters = parse_parameters(parser, &header[open + 1..close])?;
    Some(Signature {
        identifier,
        return_type,
        parameters,
    })
}

const DATATYPES: [TokenKind; 8] = [
    TokenKind::Int,
    TokenKind::Long,
    TokenKind::Double,
    TokenKind::Float,
    TokenKind::Bool,
    TokenKind::Str,
    TokenKind::Char,
    TokenKind::Void,
];

fn check_function_placement(parser: &mut Parser, keyword: &Token, modifiers: &[Token]) -> Option<()> {
    if !global_placement(parser) {
        parser.error(
            ErrorImpl::IllegalPlacement {
                message: String::from("functions can only be declared inside of a module"),
            },
            keyword,
        );
        return None;
    }
    parser.reject_invalid_modifiers(modifiers, "function", |modifier| modifier.is_mutability())
}

fn function_definition(
    parser: &mut Parser,
    signature: &Signature,
    modifiers: &[Token],
    body: FunctionBody,
) -> Option<FunctionDefinition> {
    let nullable = Modifier::all_of(modifiers).contains(&Modifier::Nullable);
    let return_type = parse_datatype(parser, &signature.return_type, modifiers)?;
    let return_type = if return_type.kind == PrimitiveKind::Void {
        Datatype::VOID
    } else {
        return_type.with_nullable(nullable)
    };

    let parameters = signature
        .parameters
        .iter()
        .filter_map(|param| {
            let modifiers = Modifier::all_of(&param.modifiers);
            let nullable = modifiers.contains(&Modifier::Nullable);
            Some(FunctionParameter {
                name: param.identifier.value.clone(),
                datatype: Datatype::of_token(&param.datatype, nullable)?,
                modifiers,
            })
        })
        .collect();

    Some(FunctionDefinition {
        name: signature.identifier.value.clone(),
        return_type,
        parameters,
        modifiers: Modifier::all_of(modifiers),
        body,
    })
}

/// Registers a function found by the skim pass. The first definition of a
/// signature wins; conflicts are reported by the global definition pass.
fn register_function(parser: &mut Parser, definition: FunctionDefinition) {
    let module = parser.scopes().current_module();
    if let Err(error) = parser.symbols_mut().add_function(module, definition) {
        trace!(%error, "skipping conflicting function");
    }
}

pub fn parse_fn_decl_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    check_function_placement(parser, &tokens[0], modifiers)?;
    let signature = parse_signature(parser, &tokens[..tokens.len() - 1], true)?;
    let definition = function_definition(parser, &signature, modifiers, FunctionBody::Interpreted(vec![]))?;
    let return_type = definition.return_type;

    if parser.is_skimming() {
        register_function(parser, definition);
        parser.scopes_mut().push_function(return_type);
        return None;
    }
    parser.scopes_mut().push_function(return_type);

    for parameter in &definition.parameters {
        let local = Variable::new(&parameter.name, parameter.datatype, parameter.modifiers.clone(), true);
        if let Err(error) = parser.scopes_mut().add_local(local) {
            let position = signature
                .parameters
                .iter()
                .rev()
                .find(|param| param.identifier.value == parameter.name)
                .map(|param| param.identifier.span.start.clone())
                .unwrap_or_else(|| signature.identifier.span.start.clone());
            parser.report(error.into_diagnostic(position));
            return None;
        }
    }

    Some(Stmt::FunctionDefinition(FunctionDefinitionStmt {
        modifiers: modifiers.to_vec(),
        identifier: signature.identifier,
        return_type: signature.return_type,
        parameters: signature.parameters,
        body: vec![],
    }))
}

/// `nat fn NAME :: TYPE (PARAMS) -> "namespace";`
pub fn parse_native_fn_decl_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    check_function_placement(parser, &tokens[0], modifiers)?;

    let len = tokens.len();
    if len < 6 {
        let last = &tokens[len - 1];
        parser.error(
            ErrorImpl::UnexpectedTokenDetailed {
                token: last.value.clone(),
                message: String::from("expected `nat fn NAME :: TYPE (PARAMS) -> \"namespace\";`"),
            },
            last,
        );
        return None;
    }
    parser.expect_at(tokens, len - 3, &[TokenKind::Arrow], "`->`")?;
    let binding = parser.expect_at(tokens, len - 2, &[TokenKind::StringLiteral], "a binding namespace")?;

    let signature = parse_signature(parser, &tokens[1..len - 3], false)?;
    let stmt = NativeFunctionDefinitionStmt {
        modifiers: modifiers.to_vec(),
        identifier: signature.identifier.clone(),
        return_type: signature.return_type.clone(),
        parameters: signature.parameters.clone(),
        binding: binding.clone(),
    };
    let body = FunctionBody::Native {
        qualified_name: stmt.qualified_name(),
        descriptor: None,
    };
    let definition = function_definition(parser, &signature, modifiers, body)?;

    if parser.is_skimming() {
        register_function(parser, definition);
        return None;
    }
    Some(Stmt::NativeFunctionDefinition(stmt))
}

// VARIABLES

/// `MODS TYPE NAME;`, `MODS TYPE NAME = value;` or `MODS ? NAME = value;`
pub fn parse_var_decl_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    let type_keyword = &tokens[0];
    let inferred = type_keyword.kind == TokenKind::Question;
    if type_keyword.kind == TokenKind::Void {
        parser.error(
            ErrorImpl::ExpectedToken {
                expected: String::from("a variable datatype"),
                found: type_keyword.value.clone(),
            },
            type_keyword,
        );
        return None;
    }

    let identifier = undotted_identifier(parser, tokens, 1, "a variable name")?;
    let operator = parser.expect_at(tokens, 2, &[TokenKind::Semicolon, TokenKind::Assignment], "`=` or `;`")?;
    let value_tokens = if operator.kind == TokenKind::Assignment {
        Some(&tokens[3..tokens.len() - 1])
    } else {
        None
    };

    if inferred && value_tokens.is_none() {
        parser.error(
            ErrorImpl::ExpectedToken {
                expected: String::from("an initial value to infer the type from"),
                found: operator.value.clone(),
            },
            operator,
        );
        return None;
    }

    let global = global_placement(parser);
    if !global && !parser.scopes().in_function() {
        parser.error(
            ErrorImpl::IllegalPlacement {
                message: String::from("variables can only be declared inside of a module or a function"),
            },
            identifier,
        );
        return None;
    }

    let mods = Modifier::all_of(modifiers);
    if global {
        if value_tokens.is_none() && Modifier::is_constant(&mods) {
            parser.error(
                ErrorImpl::UninitializedConstant {
                    variable: identifier.value.clone(),
                },
                identifier,
            );
            return None;
        }
    } else {
        parser.reject_invalid_modifiers(modifiers, "variable", |modifier| modifier.is_visibility())?;
    }

    if parser.is_skimming() {
        if global {
            skim_global(parser, type_keyword, identifier, modifiers, value_tokens);
        }
        return None;
    }

    let nullable = mods.contains(&Modifier::Nullable);
    let value = match value_tokens {
        Some(value_tokens) => Some(parse_expression(parser, value_tokens, operator)?),
        None => None,
    };

    let datatype = match &value {
        Some(value) if inferred => {
            if value.datatype.kind == PrimitiveKind::Null {
                parser.error(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: type_keyword.value.clone(),
                        message: String::from("cannot infer a type from `null`"),
                    },
                    type_keyword,
                );
                return None;
            }
            value.datatype.with_nullable(nullable || value.datatype.nullable)
        }
        _ => parse_datatype(parser, type_keyword, modifiers)?,
    };

    if let Some(value) = &value {
        if !Datatype::valid_varset(value.datatype, datatype) {
            parser.error(
                ErrorImpl::TypeMatchError {
                    expected: datatype.to_string(),
                    received: value.datatype.to_string(),
                },
                identifier,
            );
            return None;
        }
    }

    let variable = Variable::new(&identifier.value, datatype, mods, global || value.is_some());
    let registered = if global {
        let module = parser.scopes().current_module();
        match parser.symbols().module(module).find_variable(&identifier.value) {
            Some(_) => Ok(()),
            None => parser.symbols_mut().add_variable(module, variable),
        }
    } else {
        parser.scopes_mut().add_local(variable)
    };
    if let Err(error) = registered {
        parser.report(error.into_diagnostic(identifier.span.start.clone()));
        return None;
    }

    let datatype_token = if inferred {
        type_token(datatype)?
    } else {
        type_keyword.clone()
    };
    Some(match value {
        Some(value) => Stmt::VarDefAndSetValue(VarDefAndSetValueStmt {
            modifiers: modifiers.to_vec(),
            identifier: identifier.clone(),
            datatype: datatype_token,
            value,
        }),
        None => Stmt::VarDefinition(VarDefinitionStmt {
            modifiers: modifiers.to_vec(),
            identifier: identifier.clone(),
            datatype: datatype_token,
        }),
    })
}

/// A `?` global whose value could not be typed when the skim pass reached
/// it, because it uses something declared further down.
#[derive(Debug, Clone)]
pub struct DeferredGlobal {
    pub module: ModuleId,
    pub type_keyword: Token,
    pub identifier: Token,
    pub modifiers: Vec<Token>,
    pub value: Vec<Token>,
}

/// Registers a global during the skim pass so that code above its
/// declaration can use it. An inferred type that cannot be worked out yet is
/// deferred until the whole program has been skimmed.
fn skim_global(
    parser: &mut Parser,
    type_keyword: &Token,
    identifier: &Token,
    modifiers: &[Token],
    value_tokens: Option<&[Token]>,
) {
    let module = parser.scopes().current_module();
    let datatype = match (type_keyword.kind, value_tokens) {
        (TokenKind::Question, Some(value_tokens)) => {
            let global = DeferredGlobal {
                module,
                type_keyword: type_keyword.clone(),
                identifier: identifier.clone(),
                modifiers: modifiers.to_vec(),
                value: value_tokens.to_vec(),
            };
            match infer_global(parser, &global) {
                Some(datatype) => datatype,
                None => {
                    trace!(global = %identifier.value, "deferring inferred global");
                    parser.defer_global(global);
                    return;
                }
            }
        }
        _ => match Datatype::of_token(type_keyword, Modifier::all_of(modifiers).contains(&Modifier::Nullable)) {
            Some(datatype) => datatype,
            None => return,
        },
    };

    add_skimmed_global(parser, module, identifier, modifiers, datatype);
}

/// Types and registers a deferred global from inside its own module.
/// Returns false while its value still cannot be typed.
pub fn retry_deferred_global(parser: &mut Parser, global: &DeferredGlobal) -> bool {
    parser.scopes_mut().push_in(ScopeKind::Module, global.module);
    let datatype = infer_global(parser, global);
    parser.scopes_mut().pop();

    match datatype {
        Some(datatype) => {
            add_skimmed_global(parser, global.module, &global.identifier, &global.modifiers, datatype);
            true
        }
        None => false,
    }
}

fn infer_global(parser: &mut Parser, global: &DeferredGlobal) -> Option<Datatype> {
    let nullable = Modifier::all_of(&global.modifiers).contains(&Modifier::Nullable);
    match try_parse_expression(parser, &global.value, &global.type_keyword) {
        Ok(value) if value.datatype.kind != PrimitiveKind::Null => {
            Some(value.datatype.with_nullable(nullable || value.datatype.nullable))
        }
        _ => None,
    }
}

fn add_skimmed_global(parser: &mut Parser, module: ModuleId, identifier: &Token, modifiers: &[Token], datatype: Datatype) {
    let variable = Variable::new(&identifier.value, datatype, Modifier::all_of(modifiers), true);
    if let Err(error) = parser.symbols_mut().add_variable(module, variable) {
        trace!(%error, "skipping conflicting global");
    }
}

/// `NAME OP value;`, `NAME++;`, `NAME--;` or `NAME(ARGS);`
pub fn parse_identifier_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    parser.reject_modifiers(modifiers)?;
    let identifier = &tokens[0];
    parser.require_function(identifier, "assignments and calls")?;

    let next = &tokens[1];
    match next.kind {
        TokenKind::OpenParen => {
            if parser.is_skimming() {
                return None;
            }
            let call = parse_expression(parser, &tokens[..tokens.len() - 1], identifier)?;
            match call.expr {
                Expr::Call(call) => Some(Stmt::FunctionCall(FunctionCallStmt {
                    identifier: call.callee,
                    arguments: call.arguments,
                })),
                _ => {
                    parser.error(
                        ErrorImpl::UnexpectedTokenDetailed {
                            token: identifier.value.clone(),
                            message: String::from("expected a function call"),
                        },
                        identifier,
                    );
                    None
                }
            }
        }
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            expect_end(parser, tokens, 3)?;
            let operator = if next.kind == TokenKind::PlusPlus {
                Token::synthetic(TokenKind::PlusEquals, "+=")
            } else {
                Token::synthetic(TokenKind::MinusEquals, "-=")
            };
            let one = TypedExpr::new(
                Datatype::INT,
                Expr::Literal(LiteralExpr {
                    value: Token::synthetic(TokenKind::IntegerLiteral, "1"),
                }),
            );
            set_value(parser, identifier, operator, one)
        }
        kind if kind.is_assignment() => {
            if parser.is_skimming() {
                return None;
            }
            let value = parse_expression(parser, &tokens[2..tokens.len() - 1], next)?;
            set_value(parser, identifier, next.clone(), value)
        }
        _ => {
            parser.error(
                ErrorImpl::UnexpectedToken {
                    token: next.value.clone(),
                },
                next,
            );
            None
        }
    }
}

fn set_value(parser: &mut Parser, identifier: &Token, operator: Token, value: TypedExpr) -> Option<Stmt> {
    if parser.is_skimming() {
        return None;
    }
    if let Err(error) = parser.assign(identifier, &operator, &value) {
        parser.report(error);
        return None;
    }
    Some(Stmt::VarSetValue(VarSetValueStmt {
        identifier: identifier.clone(),
        operator,
        value,
    }))
}

// CONTROL FLOW

pub fn parse_if_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    parser.reject_modifiers(modifiers)?;
    parser.require_function(&tokens[0], "if statements")?;
    parser.scopes_mut().push(ScopeKind::If);
    if parser.is_skimming() {
        return None;
    }

    let condition = parse_condition(parser, tokens)?;
    Some(Stmt::If(IfStmt {
        keyword: tokens[0].clone(),
        condition,
        body: vec![],
        else_branch: None,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    parser.reject_modifiers(modifiers)?;
    parser.require_function(&tokens[0], "while loops")?;
    parser.scopes_mut().push(ScopeKind::While);
    if parser.is_skimming() {
        return None;
    }

    let condition = parse_condition(parser, tokens)?;
    Some(Stmt::While(WhileStmt {
        keyword: tokens[0].clone(),
        condition,
        body: vec![],
    }))
}

/// Splits a for header on the commas outside of parentheses.
fn split_header(header: &[Token]) -> Vec<&[Token]> {
    let mut parts = vec![];
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in header.iter().enumerate() {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                parts.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&header[start..]);
    parts
}

fn terminated(tokens: &[Token]) -> Vec<Token> {
    let mut tokens = tokens.to_vec();
    tokens.push(Token::synthetic(TokenKind::Semicolon, ";"));
    tokens
}

/// `for INIT, CONDITION, STEP {` or `for INIT, NAME -> LIMIT {`
///
/// The second form is rewritten to `for INIT, NAME < (LIMIT), NAME++ {`.
pub fn parse_for_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    parser.reject_modifiers(modifiers)?;
    let keyword = &tokens[0];
    parser.require_function(keyword, "for loops")?;
    parser.scopes_mut().push(ScopeKind::Fake);

    let parts = split_header(inner(tokens));
    match parts.as_slice() {
        [init, condition, step] => parse_for_parts(parser, keyword, init, condition, step),
        [init, transition] => {
            let variable = match transition {
                [variable, arrow, limit @ ..]
                    if variable.kind == TokenKind::Identifier && arrow.kind == TokenKind::Arrow && !limit.is_empty() =>
                {
                    variable
                }
                _ => {
                    let at = transition.first().unwrap_or(keyword);
                    parser.error(
                        ErrorImpl::UnexpectedTokenDetailed {
                            token: at.value.clone(),
                            message: String::from("expected `NAME -> LIMIT` in for loop"),
                        },
                        at,
                    );
                    return None;
                }
            };

            let mut condition = vec![
                variable.clone(),
                Token::synthetic(TokenKind::Less, "<"),
                Token::synthetic(TokenKind::OpenParen, "("),
            ];
            condition.extend_from_slice(&transition[2..]);
            condition.push(Token::synthetic(TokenKind::CloseParen, ")"));
            let step = [variable.clone(), Token::synthetic(TokenKind::PlusPlus, "++")];

            parse_for_parts(parser, keyword, init, &condition, &step)
        }
        _ => {
            parser.error(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: keyword.value.clone(),
                    message: String::from("expected `for INIT, CONDITION, STEP` or `for INIT, NAME -> LIMIT`"),
                },
                keyword,
            );
            None
        }
    }
}

fn parse_for_parts(
    parser: &mut Parser,
    keyword: &Token,
    init: &[Token],
    condition: &[Token],
    step: &[Token],
) -> Option<Stmt> {
    let (_, declaration) = split_modifiers(init);
    match declaration.first() {
        Some(first) if first.kind.is_datatype() || first.kind == TokenKind::Question => {}
        found => {
            let at = found.unwrap_or(keyword);
            parser.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from("a variable declaration"),
                    found: at.value.clone(),
                },
                at,
            );
            return None;
        }
    }
    match step.first() {
        Some(first) if first.kind == TokenKind::Identifier => {}
        found => {
            let at = found.unwrap_or(keyword);
            parser.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from("an assignment or a call"),
                    found: at.value.clone(),
                },
                at,
            );
            return None;
        }
    }

    let variable = parse_statement(parser, &terminated(init));
    if parser.is_skimming() {
        if condition.is_empty() {
            parser.error(
                ErrorImpl::ExpectedToken {
                    expected: String::from("a loop condition"),
                    found: String::from(","),
                },
                keyword,
            );
            return None;
        }
        parser.scopes_mut().push(ScopeKind::For);
        return None;
    }

    let variable = match variable? {
        Stmt::VarDefAndSetValue(variable) => variable,
        other => {
            parser.error(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: other.get_name().to_string(),
                    message: String::from("the loop variable must be given a value"),
                },
                keyword,
            );
            return None;
        }
    };

    let condition = parse_expression(parser, condition, keyword)?;
    if condition.datatype != Datatype::BOOL {
        parser.error(
            ErrorImpl::ConditionNotBoolean {
                statement: keyword.value.clone(),
                received: condition.datatype.to_string(),
            },
            keyword,
        );
        return None;
    }

    let instruction = match parse_statement(parser, &terminated(step))? {
        stmt @ (Stmt::VarSetValue(_) | Stmt::FunctionCall(_)) => stmt,
        other => {
            parser.error(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: other.get_name().to_string(),
                    message: String::from("the loop step must be an assignment or a call"),
                },
                keyword,
            );
            return None;
        }
    };

    parser.scopes_mut().push(ScopeKind::For);
    Some(Stmt::ForFakeScope(ForStmt {
        keyword: keyword.clone(),
        variable,
        condition,
        instruction: Box::new(instruction),
        body: vec![],
    }))
}

pub fn parse_return_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    parser.reject_modifiers(modifiers)?;
    let keyword = &tokens[0];
    parser.require_function(keyword, "return statements")?;
    if parser.is_skimming() {
        return None;
    }

    let value_tokens = inner(tokens);
    let value = match (parser.scopes().return_type(), value_tokens.is_empty()) {
        (Some(expected), false) if expected.kind == PrimitiveKind::Void => {
            parser.error(
                ErrorImpl::InvalidReturn {
                    message: String::from("cannot return a value from a void function"),
                },
                keyword,
            );
            return None;
        }
        (Some(expected), true) if expected.kind != PrimitiveKind::Void => {
            parser.error(
                ErrorImpl::InvalidReturn {
                    message: format!("expected a return value of type {}", expected),
                },
                keyword,
            );
            return None;
        }
        (_, true) => None,
        (expected, false) => {
            let value = parse_expression(parser, value_tokens, keyword)?;
            if let Some(expected) = expected {
                if !Datatype::valid_varset(value.datatype, expected) {
                    parser.error(
                        ErrorImpl::TypeMatchError {
                            expected: expected.to_string(),
                            received: value.datatype.to_string(),
                        },
                        keyword,
                    );
                    return None;
                }
            }
            Some(value)
        }
    };

    Some(Stmt::Return(ReturnStmt {
        keyword: keyword.clone(),
        value,
    }))
}

/// `STANDARDLIB_FINISH_CODE;` ends standard-library mode.
pub fn parse_stdlib_finish_stmt(parser: &mut Parser, tokens: &[Token], modifiers: &[Token]) -> Option<Stmt> {
    parser.reject_modifiers(modifiers)?;
    expect_end(parser, tokens, 2)?;
    parser.finish_stdlib();

    if parser.is_skimming() {
        return None;
    }
    Some(Stmt::StdlibFinish(tokens[0].clone()))
}
