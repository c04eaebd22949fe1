//! Host interface for native function bindings.
//!
//! The analyzer never calls native functions. It only asks the host whether a
//! callable with a given qualified name and parameter list exists.

use std::collections::HashMap;

use crate::ast::types::Datatype;

/// What the host knows about one native callable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeDescriptor {
    pub qualified_name: String,
    pub parameters: Vec<Datatype>,
    pub return_type: Datatype,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NativeLookup {
    Found(NativeDescriptor),
    NotFound,
    Ambiguous,
}

pub trait NativeBindings {
    /// Looks up a callable by qualified name and exact parameter types.
    fn lookup(&self, qualified_name: &str, parameters: &[Datatype]) -> NativeLookup;
}

/// Bindings for hosts that expose no native functions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNativeBindings;

impl NativeBindings for NoNativeBindings {
    fn lookup(&self, _qualified_name: &str, _parameters: &[Datatype]) -> NativeLookup {
        NativeLookup::NotFound
    }
}

/// In-memory table of native callables keyed by qualified name.
#[derive(Debug, Default, Clone)]
pub struct NativeRegistry {
    entries: HashMap<String, Vec<NativeDescriptor>>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        qualified_name: &str,
        parameters: Vec<Datatype>,
        return_type: Datatype,
    ) -> &mut Self {
        self.entries
            .entry(qualified_name.to_string())
            .or_default()
            .push(NativeDescriptor {
                qualified_name: qualified_name.to_string(),
                parameters,
                return_type,
            });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NativeBindings for NativeRegistry {
    fn lookup(&self, qualified_name: &str, parameters: &[Datatype]) -> NativeLookup {
        let mut matches = self
            .entries
            .get(qualified_name)
            .into_iter()
            .flatten()
            .filter(|descriptor| descriptor.parameters == parameters);

        match (matches.next(), matches.next()) {
            (Some(descriptor), None) => NativeLookup::Found(descriptor.clone()),
            (Some(_), Some(_)) => NativeLookup::Ambiguous,
            (None, _) => NativeLookup::NotFound,
        }
    }
}
