use crate::ast::types::{Datatype, Modifier, PrimitiveKind};

use super::{
    function::{FunctionBody, FunctionDefinition, FunctionParameter},
    symbols::{split_qualified, Symbol, SymbolError, SymbolTable},
    variable::Variable,
};

fn function(name: &str, return_type: Datatype, params: &[Datatype]) -> FunctionDefinition {
    FunctionDefinition {
        name: name.to_string(),
        return_type,
        parameters: params
            .iter()
            .enumerate()
            .map(|(i, datatype)| FunctionParameter {
                name: format!("p{}", i),
                datatype: *datatype,
                modifiers: vec![],
            })
            .collect(),
        modifiers: vec![Modifier::Public],
        body: FunctionBody::Interpreted(vec![]),
    }
}

#[test]
fn test_duplicate_submodule_is_rejected() {
    let mut table = SymbolTable::new();
    let root = table.root();
    table.add_submodule(root, "m").unwrap();

    let result = table.add_submodule(root, "m");

    assert!(matches!(result, Err(SymbolError::NameConflict { kind: "module", .. })));
    assert_eq!(table.module(root).submodules().len(), 1);
}

#[test]
fn test_same_name_in_different_parents() {
    let mut table = SymbolTable::new();
    let root = table.root();
    let a = table.add_submodule(root, "a").unwrap();
    let b = table.add_submodule(root, "b").unwrap();

    assert!(table.add_submodule(a, "util").is_ok());
    assert!(table.add_submodule(b, "util").is_ok());
}

#[test]
fn test_duplicate_variable_is_rejected() {
    let mut table = SymbolTable::new();
    let m = table.add_submodule(table.root(), "m").unwrap();
    let var = Variable::new("a", Datatype::INT, vec![Modifier::Mutable], true);

    table.add_variable(m, var.clone()).unwrap();
    let result = table.add_variable(m, var);

    assert!(matches!(result, Err(SymbolError::NameConflict { kind: "variable", .. })));
    assert_eq!(table.module(m).variables().len(), 1);
}

#[test]
fn test_submodule_variables_do_not_conflict() {
    let mut table = SymbolTable::new();
    let m = table.add_submodule(table.root(), "m").unwrap();
    let inner = table.add_submodule(m, "inner").unwrap();
    let var = Variable::new("a", Datatype::INT, vec![], true);

    assert!(table.add_variable(m, var.clone()).is_ok());
    assert!(table.add_variable(inner, var).is_ok());
}

#[test]
fn test_overloads_group_into_one_concept() {
    let mut table = SymbolTable::new();
    let m = table.add_submodule(table.root(), "m").unwrap();

    table.add_function(m, function("f", Datatype::VOID, &[Datatype::INT])).unwrap();
    table.add_function(m, function("f", Datatype::VOID, &[Datatype::STRING])).unwrap();

    let concept = table.find_function_concept_by_name(m, "f").unwrap();
    assert_eq!(concept.definitions().len(), 2);
    assert_eq!(table.module(m).concepts().len(), 1);
}

#[test]
fn test_duplicate_signature_is_rejected() {
    let mut table = SymbolTable::new();
    let m = table.add_submodule(table.root(), "m").unwrap();
    table.add_function(m, function("f", Datatype::VOID, &[Datatype::INT])).unwrap();

    let same = table.add_function(m, function("f", Datatype::VOID, &[Datatype::INT]));
    let other_return = table.add_function(m, function("f", Datatype::INT, &[Datatype::INT]));

    assert!(matches!(same, Err(SymbolError::SignatureConflict { .. })));
    assert!(matches!(other_return, Err(SymbolError::SignatureConflict { .. })));
    assert_eq!(table.module(m).overloads("f").len(), 1);
}

#[test]
fn test_find_prefers_variables() {
    let mut table = SymbolTable::new();
    let m = table.add_submodule(table.root(), "m").unwrap();
    table.add_function(m, function("f", Datatype::VOID, &[])).unwrap();
    table
        .add_variable(m, Variable::new("x", Datatype::INT, vec![], true))
        .unwrap();

    assert!(matches!(table.find(m, "x"), Some(Symbol::Variable(_))));
    assert!(matches!(table.find(m, "f"), Some(Symbol::Function(_))));
    assert!(table.find(m, "y").is_none());
}

#[test]
fn test_split_qualified() {
    assert_eq!(split_qualified("a.b.c"), (vec!["a", "b"], "c"));
    assert_eq!(split_qualified("c"), (vec![], "c"));
}

#[test]
fn test_resolve_qualified_module_walks_ancestors() {
    let mut table = SymbolTable::new();
    let root = table.root();
    let stdlib = table.add_submodule(root, "std").unwrap();
    let io = table.add_submodule(stdlib, "io").unwrap();
    let app = table.add_submodule(root, "app").unwrap();
    let inner = table.add_submodule(app, "inner").unwrap();

    assert_eq!(table.resolve_qualified_module(inner, &["std", "io"]), Some(io));
    assert_eq!(table.resolve_qualified_module(io, &["io"]), Some(io));
    assert_eq!(table.resolve_qualified_module(inner, &["missing"]), None);
    assert_eq!(table.path_of(io), "std.io");
    assert_eq!(table.path_of(root), "<root>");
}

#[test]
fn test_resolve_variable_unqualified_searches_ancestors() {
    let mut table = SymbolTable::new();
    let m = table.add_submodule(table.root(), "m").unwrap();
    let inner = table.add_submodule(m, "inner").unwrap();
    table
        .add_variable(m, Variable::new("a", Datatype::new(PrimitiveKind::Long), vec![], true))
        .unwrap();

    let (owner, var) = table.resolve_variable(inner, "a").unwrap();
    assert_eq!(owner, m);
    assert_eq!(var.datatype.kind, PrimitiveKind::Long);
    assert!(table.resolve_variable(inner, "m.a").is_some());
}

#[test]
fn test_structural_equality_ignores_arena_ids() {
    let build = |nested_first: bool| {
        let mut table = SymbolTable::new();
        let root = table.root();
        let a = table.add_submodule(root, "a").unwrap();
        if nested_first {
            table.add_submodule(a, "x").unwrap();
            table.add_submodule(root, "b").unwrap();
        } else {
            table.add_submodule(root, "b").unwrap();
            table.add_submodule(a, "x").unwrap();
        }
        table.add_function(a, function("g", Datatype::VOID, &[])).unwrap();
        table
    };

    assert_eq!(build(true), build(false));

    let mut different = build(true);
    let a = different.find_submodule_by_name(different.root(), "a").unwrap();
    different.add_function(a, function("h", Datatype::VOID, &[])).unwrap();
    assert_ne!(build(true), different);
}

#[test]
fn test_variable_helpers() {
    let owned = Variable::new("a", Datatype::INT, vec![Modifier::Own, Modifier::Public], false);
    assert!(!owned.is_constant());
    assert!(owned.is_owned());
    assert_eq!(owned.visibility(), Some(Modifier::Public));

    let implicit = Variable::new("b", Datatype::INT, vec![], true);
    assert!(implicit.is_constant());
    assert_eq!(implicit.visibility(), None);
}

#[test]
fn test_exact_acceptance() {
    let def = function("f", Datatype::VOID, &[Datatype::STRING.with_nullable(true)]);

    assert!(def.accepts_exactly(&[Datatype::STRING.with_nullable(true)]));
    assert!(!def.accepts_exactly(&[Datatype::STRING]));
    assert!(!def.accepts_exactly(&[Datatype::NULL]));
    assert!(!def.accepts_exactly(&[]));
}
