//! Unit tests for the parser module.
//!
//! This module contains tests for evaluating the language constructs:
//! - Placement of modules, functions and variables
//! - Desugaring of increments and for loops
//! - Type checks on declarations, conditions and returns
//! - If/else chains
//! - Name resolution, access control and overloads

use crate::{
    ast::{
        ast::Stmt,
        statements::{ElseBranch, ForStmt},
        types::{Datatype, PrimitiveKind},
    },
    config::AnalyzerConfig,
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::parser::parse;

fn parse_with(source: &str, config: &AnalyzerConfig) -> (Option<Vec<Stmt>>, Vec<Error>) {
    let tokens = tokenize(source.to_string(), Some("test.mu".to_string())).unwrap();
    parse(tokens, config)
}

fn parse_ok(source: &str) -> Vec<Stmt> {
    let (ast, errors) = parse_with(source, &AnalyzerConfig::default());
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    ast.unwrap()
}

fn first_error(source: &str) -> ErrorImpl {
    let (_, errors) = parse_with(source, &AnalyzerConfig::default());
    assert!(!errors.is_empty(), "expected an error for {:?}", source);
    errors[0].get_error().clone()
}

/// Body of the first function in the first module.
fn function_body(ast: &[Stmt]) -> Vec<Stmt> {
    match &ast[0] {
        Stmt::CreateModule(module) => match &module.body[0] {
            Stmt::FunctionDefinition(function) => function.body.clone(),
            other => panic!("expected a function, got {:?}", other),
        },
        other => panic!("expected a module, got {:?}", other),
    }
}

fn in_function(body: &str) -> String {
    format!("module m {{ fn f {{ {} }} }}", body)
}

#[test]
fn test_parse_module_with_function_and_global() {
    let ast = parse_ok("module m { int a = 5; fn f :: int (int x) { return x + a; } }");

    assert_eq!(ast.len(), 1);
    match &ast[0] {
        Stmt::CreateModule(module) => {
            assert_eq!(module.identifier.value, "m");
            assert_eq!(module.body.len(), 2);
            assert!(matches!(module.body[0], Stmt::VarDefAndSetValue(_)));
            assert!(matches!(module.body[1], Stmt::FunctionDefinition(_)));
        }
        other => panic!("expected a module, got {:?}", other),
    }
}

#[test]
fn test_forward_references() {
    parse_ok("module m { fn f { g(); int y = later; } fn g { } int later = 1; }");
}

#[test]
fn test_forward_references_to_inferred_globals() {
    parse_ok("module m { fn g { int y = x; } pub ? x = f(); fn f :: int () { return 1; } }");
    parse_ok("module m { fn g { long y = first; } ? first = second; ? second = (long) f(); fn f :: int () { return 1; } }");
    assert!(matches!(
        first_error("module m { fn g { int y = x; } ? x = missing(); }"),
        ErrorImpl::VariableNotDeclared { .. }
    ));
}

#[test]
fn test_nested_modules_and_qualified_names() {
    parse_ok("module outer { module inner { int v = 1; fn get :: int () { return v; } } fn f { int x = inner.get() + inner.v; } }");
}

#[test]
fn test_global_outside_module() {
    let (ast, errors) = parse_with("int x = 5;", &AnalyzerConfig::default());

    assert!(ast.is_none());
    assert!(matches!(errors[0].get_error(), ErrorImpl::IllegalPlacement { .. }));
}

#[test]
fn test_module_inside_function() {
    assert!(matches!(
        first_error("module m { fn f { module n { } } }"),
        ErrorImpl::IllegalPlacement { .. }
    ));
}

#[test]
fn test_statement_outside_function() {
    assert!(matches!(
        first_error("module m { int x = 1; x = 2; }"),
        ErrorImpl::IllegalPlacement { .. }
    ));
}

#[test]
fn test_stdlib_mode() {
    let config = AnalyzerConfig::stdlib();

    let (_, errors) = parse_with("fn print ~ (string s) { } int version = 1;", &config);
    assert!(errors.is_empty(), "{:?}", errors);

    let (_, errors) = parse_with("STANDARDLIB_FINISH_CODE; fn print { }", &config);
    assert!(matches!(errors[0].get_error(), ErrorImpl::IllegalPlacement { .. }));
}

#[test]
fn test_increment_desugars_to_compound_assignment() {
    let body = function_body(&parse_ok(&in_function("mut int x = 0; x++; x += 1; x--; x -= 1;")));

    assert_eq!(body[1], body[2]);
    assert_eq!(body[3], body[4]);
    match &body[1] {
        Stmt::VarSetValue(stmt) => assert_eq!(stmt.operator.kind, TokenKind::PlusEquals),
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_for_loop_forms_are_equivalent() {
    let body = function_body(&parse_ok(&in_function(
        "for mut int i = 0, i < 10, i++ { } for mut ? i = 0, i -> 10 { }",
    )));

    assert_eq!(body.len(), 2);
    assert_eq!(body[0], body[1]);
    match &body[0] {
        Stmt::ForFakeScope(ForStmt { variable, instruction, .. }) => {
            assert_eq!(variable.identifier.value, "i");
            assert!(matches!(**instruction, Stmt::VarSetValue(_)));
        }
        other => panic!("expected a for loop, got {:?}", other),
    }
}

#[test]
fn test_for_loop_variable_is_scoped() {
    assert!(matches!(
        first_error(&in_function("for mut int i = 0, i < 3, i++ { } int j = i;")),
        ErrorImpl::VariableNotDeclared { .. }
    ));
}

#[test]
fn test_for_loop_invalid_header() {
    assert!(matches!(
        first_error(&in_function("for int i = 0 { }")),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
    assert!(matches!(
        first_error(&in_function("for i, i < 3, i++ { }")),
        ErrorImpl::ExpectedToken { .. }
    ));
    match first_error(&in_function("for mut i = 0, i -> 10 { }")) {
        ErrorImpl::ExpectedToken { expected, found } => {
            assert_eq!(expected, "a variable declaration");
            assert_eq!(found, "i");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_declaration_type_mismatch() {
    assert!(matches!(
        first_error(&in_function("int x = \"text\";")),
        ErrorImpl::TypeMatchError { .. }
    ));
}

#[test]
fn test_numeric_widening() {
    parse_ok(&in_function("long l = 1; double d = l; float f = 'c';"));
    assert!(matches!(
        first_error(&in_function("int i = 1.5;")),
        ErrorImpl::TypeMatchError { .. }
    ));
}

#[test]
fn test_condition_not_boolean() {
    match first_error(&in_function("if 1 { }")) {
        ErrorImpl::ConditionNotBoolean { statement, received } => {
            assert_eq!(statement, "if");
            assert_eq!(received, "int");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(matches!(
        first_error(&in_function("while \"yes\" { }")),
        ErrorImpl::ConditionNotBoolean { .. }
    ));
}

#[test]
fn test_operator_type_error() {
    assert!(matches!(
        first_error(&in_function("bool b = true + 1;")),
        ErrorImpl::OperatorTypeError { .. }
    ));
    assert!(matches!(
        first_error(&in_function("bool b = !5;")),
        ErrorImpl::OperatorTypeError { .. }
    ));
}

#[test]
fn test_return_checks() {
    assert!(matches!(
        first_error("module m { fn f { return 1; } }"),
        ErrorImpl::InvalidReturn { .. }
    ));
    assert!(matches!(
        first_error("module m { fn f :: int () { return; } }"),
        ErrorImpl::InvalidReturn { .. }
    ));
    assert!(matches!(
        first_error("module m { fn f :: int () { return \"one\"; } }"),
        ErrorImpl::TypeMatchError { .. }
    ));
    parse_ok("module m { fn f { return; } fn g :: long () { return 1; } }");
}

#[test]
fn test_if_else_chain() {
    let body = function_body(&parse_ok(
        "module m { fn f :: int (int x) { if x == 1 { return 1; } else if x == 2 { return 2; } else { return 3; } return 0; } }",
    ));

    assert_eq!(body.len(), 2);
    let first = match &body[0] {
        Stmt::If(stmt) => stmt,
        other => panic!("expected an if, got {:?}", other),
    };
    assert_eq!(first.body.len(), 1);
    let second = match &first.else_branch {
        Some(ElseBranch::ElseIf(stmt)) => stmt,
        other => panic!("expected an else if, got {:?}", other),
    };
    assert!(matches!(&second.else_branch, Some(ElseBranch::Block(body)) if body.len() == 1));
}

#[test]
fn test_else_without_if() {
    assert!(matches!(
        first_error(&in_function("int x = 1; else { }")),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_local_constants() {
    parse_ok(&in_function("int x; x = 1; mut int y = 1; y = 2; y *= 3;"));
    assert!(matches!(
        first_error(&in_function("int x = 1; x = 2;")),
        ErrorImpl::ConstantReassignment { .. }
    ));
}

#[test]
fn test_uninitialized_local_read() {
    assert!(matches!(
        first_error(&in_function("mut int x; int y = x;")),
        ErrorImpl::VariableNotInitialized { .. }
    ));
    assert!(matches!(
        first_error(&in_function("mut int x; x += 1;")),
        ErrorImpl::VariableNotInitialized { .. }
    ));
}

#[test]
fn test_local_name_conflict() {
    match first_error(&in_function("int x = 1; if true { int x = 2; }")) {
        ErrorImpl::NameConflict { kind, name, .. } => {
            assert_eq!(kind, "local variable");
            assert_eq!(name, "x");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(matches!(
        first_error("module m { fn f ~ (int a, int a) { } }"),
        ErrorImpl::NameConflict { .. }
    ));
}

#[test]
fn test_undeclared_names() {
    assert!(matches!(
        first_error(&in_function("int x = y;")),
        ErrorImpl::VariableNotDeclared { .. }
    ));
    assert!(matches!(
        first_error(&in_function("missing();")),
        ErrorImpl::FunctionNotFound { .. }
    ));
    assert!(matches!(
        first_error(&in_function("nowhere.g();")),
        ErrorImpl::ModuleNotFound { .. }
    ));
}

#[test]
fn test_overload_resolution() {
    let body = function_body(&parse_ok(
        "module m { fn main { long a = pick(1); string b = pick(\"s\"); } fn pick :: long (int x) { return x; } fn pick :: string (string x) { return x; } }",
    ));

    match &body[0] {
        Stmt::VarDefAndSetValue(stmt) => assert_eq!(stmt.value.datatype, Datatype::new(PrimitiveKind::Long)),
        other => panic!("expected a declaration, got {:?}", other),
    }
    assert!(matches!(
        first_error("module m { fn main { pick(true); } fn pick ~ (int x) { } }"),
        ErrorImpl::NoImplementation { .. }
    ));
}

#[test]
fn test_nullable_parameters() {
    parse_ok("module m { fn main { nullable int v = 1; take(v); } fn take ~ (nullable int x) { } }");
    assert!(matches!(
        first_error("module m { fn main { take(1); } fn take ~ (nullable int x) { } }"),
        ErrorImpl::NoImplementation { .. }
    ));
    assert!(matches!(
        first_error("module m { fn main { take(null); } fn take ~ (int x) { } }"),
        ErrorImpl::NoImplementation { .. }
    ));
    assert!(matches!(
        first_error(
            "module m { fn main { two(1, \"s\"); } fn two ~ (nullable int a, string b) { } fn two ~ (int a, nullable string b) { } }"
        ),
        ErrorImpl::NoImplementation { .. }
    ));
}

#[test]
fn test_private_function_access() {
    parse_ok("module a { priv fn secret { } fn open { secret(); } }");
    assert!(matches!(
        first_error("module a { priv fn secret { } } module b { fn main { a.secret(); } }"),
        ErrorImpl::AccessViolation { .. }
    ));
}

#[test]
fn test_owned_variable_write() {
    parse_ok("module a { own int counter = 0; fn bump { counter += 1; } } module b { fn main { int c = a.counter; } }");
    match first_error("module a { own int counter = 0; } module b { fn main { a.counter = 1; } }") {
        ErrorImpl::AccessViolation { kind, name, from } => {
            assert_eq!(kind, "owned variable");
            assert_eq!(name, "a.counter");
            assert_eq!(from, "b");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_invalid_modifiers() {
    assert!(matches!(
        first_error(&in_function("pub int x = 1;")),
        ErrorImpl::InvalidModifier { .. }
    ));
    assert!(matches!(
        first_error("module m { mut fn f { } }"),
        ErrorImpl::InvalidModifier { .. }
    ));
    assert!(matches!(
        first_error("module m { fn f ~ (pub int a) { } }"),
        ErrorImpl::InvalidModifier { .. }
    ));
    assert!(matches!(
        first_error(&in_function("mut if true { }")),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_uninitialized_global_constant() {
    assert!(matches!(
        first_error("module m { int x; }"),
        ErrorImpl::UninitializedConstant { .. }
    ));
    parse_ok("module m { mut int x; own int y; }");
}

#[test]
fn test_inferred_declarations() {
    let ast = parse_ok("module m { ? greeting = \"hi\"; fn f { ? n = 1 + 2L; } }");

    match &ast[0] {
        Stmt::CreateModule(module) => match &module.body[0] {
            Stmt::VarDefAndSetValue(stmt) => assert_eq!(stmt.datatype.kind, TokenKind::Str),
            other => panic!("expected a declaration, got {:?}", other),
        },
        other => panic!("expected a module, got {:?}", other),
    }
    assert!(matches!(
        first_error(&in_function("? n = null;")),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
    assert!(matches!(
        first_error(&in_function("? n;")),
        ErrorImpl::ExpectedToken { .. }
    ));
}

#[test]
fn test_casts_and_assignment_expressions() {
    parse_ok(&in_function("double d = (double) 1; int i = (int) 2.5; mut int j = 0; int k = (j += 3) + 5;"));
    assert!(matches!(
        first_error(&in_function("bool b = (bool) 1;")),
        ErrorImpl::TypeMatchError { .. }
    ));
}

#[test]
fn test_literal_range() {
    assert!(matches!(
        first_error(&in_function("int big = 99999999999;")),
        ErrorImpl::NumberParseError { .. }
    ));
    parse_ok(&in_function("long big = 99999999999L;"));
}

#[test]
fn test_unbalanced_blocks() {
    assert!(matches!(
        first_error("module m { fn f { }"),
        ErrorImpl::ExpectedToken { expected, .. } if expected == "`}`"
    ));
    assert!(matches!(
        first_error("module m { } }"),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
    assert!(matches!(
        first_error("module m { fn f { int x = 1 } }"),
        ErrorImpl::ExpectedToken { expected, .. } if expected == "`;`"
    ));
}

#[test]
fn test_native_declaration() {
    let ast = parse_ok("module io { nat fn print ~ (string text) -> \"host.io\"; fn main { print(\"hi\"); } }");

    match &ast[0] {
        Stmt::CreateModule(module) => match &module.body[0] {
            Stmt::NativeFunctionDefinition(stmt) => assert_eq!(stmt.qualified_name(), "host.io.print"),
            other => panic!("expected a native function, got {:?}", other),
        },
        other => panic!("expected a module, got {:?}", other),
    }
}

#[test]
fn test_error_budget() {
    let config = AnalyzerConfig {
        max_errors: Some(1),
        ..Default::default()
    };
    let (_, errors) = parse_with("int a = 1; int b = 2; int c = 3;", &config);

    assert_eq!(errors.len(), 1);
}
