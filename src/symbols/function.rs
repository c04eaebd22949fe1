use std::fmt::Display;

use crate::{
    ast::{
        ast::Stmt,
        types::{Datatype, Modifier},
    },
    checker::bindings::NativeDescriptor,
};

use super::symbols::SymbolError;

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    pub name: String,
    pub datatype: Datatype,
    pub modifiers: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Interpreted(Vec<Stmt>),
    /// `descriptor` is filled in once the host binding has been resolved.
    Native {
        qualified_name: String,
        descriptor: Option<NativeDescriptor>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub return_type: Datatype,
    pub parameters: Vec<FunctionParameter>,
    pub modifiers: Vec<Modifier>,
    pub body: FunctionBody,
}

impl FunctionDefinition {
    pub fn parameter_types(&self) -> Vec<Datatype> {
        self.parameters.iter().map(|param| param.datatype).collect()
    }

    /// The explicit visibility modifier, if any.
    pub fn visibility(&self) -> Option<Modifier> {
        self.modifiers
            .iter()
            .copied()
            .find(|modifier| matches!(modifier, Modifier::Public | Modifier::Private | Modifier::Protected))
    }

    /// Whether a call with these argument types matches exactly.
    pub fn accepts_exactly(&self, arguments: &[Datatype]) -> bool {
        self.parameters.len() == arguments.len()
            && self
                .parameters
                .iter()
                .zip(arguments)
                .all(|(param, argument)| param.datatype == *argument)
    }
}

impl Display for FunctionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}) -> {}",
            self.name,
            describe_types(&self.parameter_types()),
            self.return_type
        )
    }
}

/// Comma separated list of type names, used in diagnostics.
pub fn describe_types(types: &[Datatype]) -> String {
    types
        .iter()
        .map(Datatype::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// All overloads sharing a name and return type within one module.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionConcept {
    pub name: String,
    pub return_type: Datatype,
    definitions: Vec<FunctionDefinition>,
}

impl FunctionConcept {
    pub fn new(name: &str, return_type: Datatype) -> Self {
        FunctionConcept {
            name: name.to_string(),
            return_type,
            definitions: vec![],
        }
    }

    pub fn definitions(&self) -> &[FunctionDefinition] {
        &self.definitions
    }

    pub fn definition_by_parameters(&self, parameters: &[Datatype]) -> Option<&FunctionDefinition> {
        self.definitions
            .iter()
            .find(|def| def.parameter_types() == parameters)
    }

    /// Adds an overload, rejecting a parameter list that is already defined.
    pub fn add_definition(&mut self, definition: FunctionDefinition, module: &str) -> Result<(), SymbolError> {
        if self.definition_by_parameters(&definition.parameter_types()).is_some() {
            return Err(SymbolError::SignatureConflict {
                signature: definition.to_string(),
                module: module.to_string(),
            });
        }
        self.definitions.push(definition);
        Ok(())
    }
}
