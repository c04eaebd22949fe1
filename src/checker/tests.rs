//! Unit tests for the global definition pass.

use crate::{
    ast::{ast::Stmt, types::Datatype},
    config::AnalyzerConfig,
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    symbols::{function::FunctionBody, symbols::SymbolTable},
};

use super::{
    bindings::{NativeBindings, NativeRegistry, NoNativeBindings},
    checker::check_ast,
};

fn ast_of(source: &str, config: &AnalyzerConfig) -> Vec<Stmt> {
    let tokens = tokenize(source.to_string(), Some("test.mu".to_string())).unwrap();
    let (ast, errors) = parse(tokens, config);
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    ast.unwrap()
}

fn check(source: &str, natives: &dyn NativeBindings) -> Result<SymbolTable, Vec<Error>> {
    let config = AnalyzerConfig::default();
    check_ast(&ast_of(source, &config), &config, natives)
}

fn check_errors(source: &str) -> Vec<Error> {
    match check(source, &NoNativeBindings) {
        Ok(_) => panic!("expected errors for {:?}", source),
        Err(errors) => errors,
    }
}

#[test]
fn test_registers_module_contents() {
    let symbols = check("module m { pub mut int a = 5; pub fn f ~ (int x) { } }", &NoNativeBindings).unwrap();

    let m = symbols.find_submodule_by_name(symbols.root(), "m").unwrap();
    let module = symbols.module(m);
    assert_eq!(module.variables().len(), 1);
    assert_eq!(module.variables()[0].name, "a");
    assert_eq!(module.variables()[0].datatype, Datatype::INT);
    assert!(module.variables()[0].initialized);

    let concept = module.find_function_concept_by_name("f").unwrap();
    assert_eq!(concept.definitions().len(), 1);
    assert_eq!(concept.definitions()[0].parameter_types(), vec![Datatype::INT]);
}

#[test]
fn test_duplicate_global_is_reported_once() {
    let source = "module m { int a = 1; int a = 2; }";
    let errors = check_errors(source);

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].get_error(), ErrorImpl::NameConflict { .. }));
    assert_eq!(errors[0].get_position().0 as usize, source.rfind("a = 2").unwrap());
}

#[test]
fn test_duplicate_module() {
    let errors = check_errors("module a { } module a { int x = 1; }");

    assert_eq!(errors.len(), 1);
    match errors[0].get_error() {
        ErrorImpl::NameConflict { kind, name, .. } => {
            assert_eq!(kind, "module");
            assert_eq!(name, "a");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_signature_conflict_across_return_types() {
    let errors = check_errors("module m { fn f ~ (int a) { } fn f :: int (int b) { return b; } }");

    assert!(matches!(errors[0].get_error(), ErrorImpl::SignatureConflict { .. }));
}

#[test]
fn test_overloads_are_registered() {
    let symbols = check("module m { fn f ~ (int a) { } fn f ~ (string a) { } }", &NoNativeBindings).unwrap();

    let m = symbols.find_submodule_by_name(symbols.root(), "m").unwrap();
    assert_eq!(symbols.module(m).overloads("f").len(), 2);
}

#[test]
fn test_duplicate_modifiers() {
    assert!(matches!(
        check_errors("module m { pub pub int x = 1; }")[0].get_error(),
        ErrorImpl::DuplicateModifier { .. }
    ));
    assert!(matches!(
        check_errors("module m { fn f { mut mut int x = 1; } }")[0].get_error(),
        ErrorImpl::DuplicateModifier { .. }
    ));
}

#[test]
fn test_conflicting_modifiers() {
    assert!(matches!(
        check_errors("module m { pub priv int x = 1; }")[0].get_error(),
        ErrorImpl::ConflictingModifier { .. }
    ));
    assert!(matches!(
        check_errors("module m { mut const int x = 1; }")[0].get_error(),
        ErrorImpl::ConflictingModifier { .. }
    ));
    assert!(matches!(
        check_errors("module m { fn f ~ (nullable nonnull int a) { } }")[0].get_error(),
        ErrorImpl::ConflictingModifier { .. }
    ));
}

#[test]
fn test_check_is_idempotent() {
    let config = AnalyzerConfig::default();
    let ast = ast_of(
        "module outer { mut int count = 0; module inner { fn get :: int () { return 1; } } fn f ~ (int a) { } }",
        &config,
    );

    let first = check_ast(&ast, &config, &NoNativeBindings).unwrap();
    let second = check_ast(&ast, &config, &NoNativeBindings).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_native_binding_resolved() {
    let mut natives = NativeRegistry::new();
    natives.register("host.io.print", vec![Datatype::STRING], Datatype::VOID);

    let symbols = check("module io { nat fn print ~ (string text) -> \"host.io\"; }", &natives).unwrap();

    let io = symbols.find_submodule_by_name(symbols.root(), "io").unwrap();
    let definition = &symbols.module(io).overloads("print")[0];
    match &definition.body {
        FunctionBody::Native { qualified_name, descriptor } => {
            assert_eq!(qualified_name, "host.io.print");
            assert!(descriptor.is_some());
        }
        other => panic!("expected a native body, got {:?}", other),
    }
}

#[test]
fn test_native_binding_missing() {
    let errors = check_errors("module io { nat fn print ~ (string text) -> \"host.io\"; }");

    assert!(matches!(errors[0].get_error(), ErrorImpl::NativeBindingNotFound { .. }));
}

#[test]
fn test_native_binding_return_type_mismatch() {
    let mut natives = NativeRegistry::new();
    natives.register("host.math.abs", vec![Datatype::INT], Datatype::INT);

    let errors = check("module math { nat fn abs :: long (int x) -> \"host.math\"; }", &natives).unwrap_err();
    assert!(matches!(errors[0].get_error(), ErrorImpl::TypeMatchError { .. }));
}

#[test]
fn test_native_binding_ambiguous() {
    let mut natives = NativeRegistry::new();
    natives
        .register("host.time", vec![], Datatype::INT)
        .register("host.time", vec![], Datatype::INT);

    let errors = check("module m { nat fn time :: int () -> \"host\"; }", &natives).unwrap_err();
    assert!(matches!(errors[0].get_error(), ErrorImpl::AmbiguousCall { .. }));
}

#[test]
fn test_stdlib_functions_live_in_root() {
    let config = AnalyzerConfig::stdlib();
    let ast = ast_of("fn helper ~ (int x) { } STANDARDLIB_FINISH_CODE; module m { fn f { helper(1); } }", &config);

    let symbols = check_ast(&ast, &config, &NoNativeBindings).unwrap();
    assert_eq!(symbols.module(symbols.root()).overloads("helper").len(), 1);
}
