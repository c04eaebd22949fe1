//! Module tree with its variables and function overloads.
//!
//! Modules live in an arena and refer to each other by `ModuleId`; a child
//! keeps its parent's id for qualified-name walks, ownership stays with the
//! table.

use id_arena::{Arena, Id};
use thiserror::Error;
use tracing::debug;

use crate::{
    ast::types::Datatype,
    errors::errors::{Error as Diagnostic, ErrorImpl},
    Position,
};

use super::{
    function::{FunctionConcept, FunctionDefinition},
    variable::Variable,
};

pub type ModuleId = Id<Module>;

/// Name of the pseudo-module that owns every top-level module.
pub const ROOT_MODULE: &str = "<root>";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolError {
    #[error("{kind} {name:?} already exists {location}")]
    NameConflict {
        kind: &'static str,
        name: String,
        location: String,
    },
    #[error("function already exists in module {module:?}: {signature}")]
    SignatureConflict { signature: String, module: String },
}

impl SymbolError {
    pub fn into_diagnostic(self, position: Position) -> Diagnostic {
        match self {
            SymbolError::NameConflict { kind, name, location } => Diagnostic::new(
                ErrorImpl::NameConflict {
                    kind: kind.to_string(),
                    name,
                    location,
                },
                position,
            ),
            SymbolError::SignatureConflict { signature, .. } => {
                Diagnostic::new(ErrorImpl::SignatureConflict { signature }, position)
            }
        }
    }
}

#[derive(Debug)]
pub struct Module {
    pub name: String,
    pub parent: Option<ModuleId>,
    submodules: Vec<ModuleId>,
    variables: Vec<Variable>,
    concepts: Vec<FunctionConcept>,
}

impl Module {
    pub fn submodules(&self) -> &[ModuleId] {
        &self.submodules
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn concepts(&self) -> &[FunctionConcept] {
        &self.concepts
    }

    pub fn find_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|var| var.name == name)
    }

    pub fn find_function_concept_by_name(&self, name: &str) -> Option<&FunctionConcept> {
        self.concepts.iter().find(|concept| concept.name == name)
    }

    /// Every definition named `name`, across all return types.
    pub fn overloads(&self, name: &str) -> Vec<&FunctionDefinition> {
        self.concepts
            .iter()
            .filter(|concept| concept.name == name)
            .flat_map(|concept| concept.definitions())
            .collect()
    }
}

/// A variable or a function concept found by name.
#[derive(Debug, Clone, Copy)]
pub enum Symbol<'a> {
    Variable(&'a Variable),
    Function(&'a FunctionConcept),
}

pub struct SymbolTable {
    arena: Arena<Module>,
    root: ModuleId,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("modules", &self.arena.len())
            .field("root", &self.module(self.root))
            .finish()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(Module {
            name: ROOT_MODULE.to_string(),
            parent: None,
            submodules: vec![],
            variables: vec![],
            concepts: vec![],
        });
        SymbolTable { arena, root }
    }

    pub fn root(&self) -> ModuleId {
        self.root
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.arena[id]
    }

    pub fn add_submodule(&mut self, parent: ModuleId, name: &str) -> Result<ModuleId, SymbolError> {
        if self.find_submodule_by_name(parent, name).is_some() {
            return Err(SymbolError::NameConflict {
                kind: "module",
                name: name.to_string(),
                location: format!("in module {:?}", self.path_of(parent)),
            });
        }

        let id = self.arena.alloc(Module {
            name: name.to_string(),
            parent: Some(parent),
            submodules: vec![],
            variables: vec![],
            concepts: vec![],
        });
        self.arena[parent].submodules.push(id);
        debug!(module = name, parent = %self.path_of(parent), "registered module");
        Ok(id)
    }

    pub fn add_variable(&mut self, module: ModuleId, variable: Variable) -> Result<(), SymbolError> {
        if self.arena[module].find_variable(&variable.name).is_some() {
            return Err(SymbolError::NameConflict {
                kind: "variable",
                name: variable.name,
                location: format!("in module {:?}", self.path_of(module)),
            });
        }

        debug!(variable = %variable.name, module = %self.path_of(module), "registered global variable");
        self.arena[module].variables.push(variable);
        Ok(())
    }

    /// Adds an overload to the concept matching its name and return type.
    ///
    /// A definition whose parameter types equal those of any same-named
    /// definition in this module is rejected, whatever its return type.
    pub fn add_function(&mut self, module: ModuleId, definition: FunctionDefinition) -> Result<(), SymbolError> {
        let path = self.path_of(module);
        let parameters = definition.parameter_types();
        let target = &mut self.arena[module];

        if target
            .overloads(&definition.name)
            .iter()
            .any(|existing| existing.parameter_types() == parameters)
        {
            return Err(SymbolError::SignatureConflict {
                signature: definition.to_string(),
                module: path,
            });
        }

        debug!(function = %definition, module = %path, "registered function");
        let position = target
            .concepts
            .iter()
            .position(|c| c.name == definition.name && c.return_type == definition.return_type);
        match position {
            Some(index) => target.concepts[index].add_definition(definition, &path),
            None => {
                let mut concept = FunctionConcept::new(&definition.name, definition.return_type);
                concept.add_definition(definition, &path)?;
                target.concepts.push(concept);
                Ok(())
            }
        }
    }

    pub fn find_submodule_by_name(&self, module: ModuleId, name: &str) -> Option<ModuleId> {
        self.arena[module]
            .submodules
            .iter()
            .copied()
            .find(|id| self.arena[*id].name == name)
    }

    /// Variable first, then function concept, directly inside `module`.
    pub fn find(&self, module: ModuleId, name: &str) -> Option<Symbol<'_>> {
        let module = &self.arena[module];
        module
            .find_variable(name)
            .map(Symbol::Variable)
            .or_else(|| module.find_function_concept_by_name(name).map(Symbol::Function))
    }

    pub fn find_function_concept_by_name(&self, module: ModuleId, name: &str) -> Option<&FunctionConcept> {
        self.arena[module].find_function_concept_by_name(name)
    }

    /// `module` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, module: ModuleId) -> impl Iterator<Item = ModuleId> + '_ {
        std::iter::successors(Some(module), move |id| self.arena[*id].parent)
    }

    pub fn is_ancestor_or_self(&self, ancestor: ModuleId, module: ModuleId) -> bool {
        self.ancestors(module).any(|id| id == ancestor)
    }

    /// Walks `path` downwards from `from` through submodules.
    pub fn resolve_module_path(&self, from: ModuleId, path: &[&str]) -> Option<ModuleId> {
        path.iter()
            .try_fold(from, |module, segment| self.find_submodule_by_name(module, segment))
    }

    /// Resolves the module part of a qualified name. The first segment is
    /// searched in `from` and then in each ancestor; the rest walk downwards.
    pub fn resolve_qualified_module(&self, from: ModuleId, path: &[&str]) -> Option<ModuleId> {
        if path.is_empty() {
            return Some(from);
        }
        self.ancestors(from)
            .find_map(|scope| self.resolve_module_path(scope, path))
    }

    /// Dotted path of a module from the root, e.g. `std.io`.
    pub fn path_of(&self, module: ModuleId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(module)
            .filter(|id| *id != self.root)
            .map(|id| self.arena[id].name.as_str())
            .collect();
        if names.is_empty() {
            return ROOT_MODULE.to_string();
        }
        names.reverse();
        names.join(".")
    }

    /// The global variable reachable under `identifier` from `from`.
    pub fn resolve_variable(&self, from: ModuleId, identifier: &str) -> Option<(ModuleId, &Variable)> {
        let (path, name) = split_qualified(identifier);
        if path.is_empty() {
            return self
                .ancestors(from)
                .find_map(|id| self.arena[id].find_variable(name).map(|var| (id, var)));
        }
        let module = self.resolve_qualified_module(from, &path)?;
        self.arena[module].find_variable(name).map(|var| (module, var))
    }

    pub fn function_count(&self) -> usize {
        self.arena
            .iter()
            .flat_map(|(_, module)| module.concepts.iter())
            .map(|concept| concept.definitions().len())
            .sum()
    }

    fn module_eq(&self, id: ModuleId, other: &SymbolTable, other_id: ModuleId) -> bool {
        let (a, b) = (&self.arena[id], &other.arena[other_id]);
        a.name == b.name
            && a.variables == b.variables
            && a.concepts == b.concepts
            && a.submodules.len() == b.submodules.len()
            && a.submodules
                .iter()
                .zip(&b.submodules)
                .all(|(x, y)| self.module_eq(*x, other, *y))
    }
}

// Arena ids differ between tables, so equality walks both trees from the root.
impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.module_eq(self.root, other, other.root)
    }
}

/// Splits `a.b.c` into the module path `[a, b]` and the name `c`.
pub fn split_qualified(identifier: &str) -> (Vec<&str>, &str) {
    match identifier.rsplit_once('.') {
        Some((path, name)) => (path.split('.').collect(), name),
        None => (vec![], identifier),
    }
}

/// Parameter types of a call, for diagnostics.
pub fn describe_arguments(arguments: &[Datatype]) -> String {
    if arguments.is_empty() {
        String::from("no arguments")
    } else {
        format!("arguments ({})", super::function::describe_types(arguments))
    }
}
