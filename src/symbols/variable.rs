use crate::ast::types::{Datatype, Modifier};

/// A global or local variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub datatype: Datatype,
    pub modifiers: Vec<Modifier>,
    /// False until a value is definitely assigned.
    pub initialized: bool,
}

impl Variable {
    pub fn new(name: &str, datatype: Datatype, modifiers: Vec<Modifier>, initialized: bool) -> Self {
        Variable {
            name: name.to_string(),
            datatype,
            modifiers,
            initialized,
        }
    }

    pub fn is_constant(&self) -> bool {
        Modifier::is_constant(&self.modifiers)
    }

    pub fn is_owned(&self) -> bool {
        self.modifiers.contains(&Modifier::Own)
    }

    /// The explicit visibility modifier, if any.
    pub fn visibility(&self) -> Option<Modifier> {
        self.modifiers
            .iter()
            .copied()
            .find(|modifier| matches!(modifier, Modifier::Public | Modifier::Private | Modifier::Protected))
    }
}
