use crate::{
    ast::types::Datatype,
    symbols::{
        symbols::{ModuleId, SymbolError},
        variable::Variable,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The whole program; owns the top-level modules.
    Parent,
    Module,
    Function,
    If,
    While,
    For,
    /// Hosts a for loop's control variable around the loop body.
    Fake,
}

#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    /// The module statements in this scope belong to.
    pub module: ModuleId,
    locals: Vec<Variable>,
    return_type: Option<Datatype>,
}

/// Nesting of block constructs while statements are evaluated.
///
/// The bottom entry is the `Parent` scope and is never popped.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn new(root: ModuleId) -> Self {
        ScopeStack {
            scopes: vec![Scope {
                kind: ScopeKind::Parent,
                module: root,
                locals: vec![],
                return_type: None,
            }],
        }
    }

    /// Enters a scope that stays in the current module.
    pub fn push(&mut self, kind: ScopeKind) {
        let module = self.current_module();
        self.push_in(kind, module);
    }

    pub fn push_in(&mut self, kind: ScopeKind, module: ModuleId) {
        self.scopes.push(Scope {
            kind,
            module,
            locals: vec![],
            return_type: None,
        });
    }

    pub fn push_function(&mut self, return_type: Datatype) {
        self.push(ScopeKind::Function);
        if let Some(scope) = self.scopes.last_mut() {
            scope.return_type = Some(return_type);
        }
    }

    pub fn pop(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Leaves the innermost block, along with the `Fake` scope wrapping it.
    pub fn pop_block(&mut self) -> bool {
        if self.pop().is_none() {
            return false;
        }
        if self.current_kind() == ScopeKind::Fake {
            self.pop();
        }
        true
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn current_kind(&self) -> ScopeKind {
        self.current().kind
    }

    pub fn current_module(&self) -> ModuleId {
        self.current().module
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.len() <= 1
    }

    pub fn truncate(&mut self, len: usize) {
        self.scopes.truncate(len.max(1));
    }

    pub fn in_function(&self) -> bool {
        self.scopes.iter().any(|scope| scope.kind == ScopeKind::Function)
    }

    /// Return type of the innermost enclosing function.
    pub fn return_type(&self) -> Option<Datatype> {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.kind == ScopeKind::Function)
            .and_then(|scope| scope.return_type)
    }

    /// Indices of the scopes a local lookup may see: from the innermost one
    /// down to the enclosing function.
    fn local_chain(&self) -> impl Iterator<Item = usize> + '_ {
        let floor = self
            .scopes
            .iter()
            .rposition(|scope| scope.kind == ScopeKind::Function)
            .unwrap_or(self.scopes.len());
        (floor..self.scopes.len()).rev()
    }

    pub fn find_local(&self, name: &str) -> Option<(usize, usize)> {
        self.local_chain().find_map(|index| {
            self.scopes[index]
                .locals
                .iter()
                .position(|var| var.name == name)
                .map(|slot| (index, slot))
        })
    }

    pub fn local(&self, (index, slot): (usize, usize)) -> &Variable {
        &self.scopes[index].locals[slot]
    }

    pub fn local_mut(&mut self, (index, slot): (usize, usize)) -> &mut Variable {
        &mut self.scopes[index].locals[slot]
    }

    /// Declares a local in the innermost scope. Any local of the same name
    /// visible in the current function is a conflict.
    pub fn add_local(&mut self, variable: Variable) -> Result<(), SymbolError> {
        if self.find_local(&variable.name).is_some() {
            return Err(SymbolError::NameConflict {
                kind: "local variable",
                name: variable.name,
                location: String::from("in this function"),
            });
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.locals.push(variable);
        }
        Ok(())
    }
}
