//! Global definition pass.
//!
//! Walks the finished AST and registers every module, function and global
//! variable into a fresh symbol table. This is where duplicate names,
//! signature conflicts and duplicate or conflicting modifiers are reported,
//! and where native functions are bound to the host.

use tracing::{debug, instrument};

use crate::{
    ast::{
        ast::Stmt,
        statements::{ElseBranch, FunctionDefinitionStmt, NativeFunctionDefinitionStmt, ParameterNode},
        types::{Datatype, Modifier, PrimitiveKind},
    },
    config::AnalyzerConfig,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::Token,
    symbols::{
        function::{describe_types, FunctionBody, FunctionDefinition, FunctionParameter},
        symbols::{describe_arguments, ModuleId, SymbolTable},
        variable::Variable,
    },
};

use super::bindings::{NativeBindings, NativeLookup};

/// Kinds of modifier a declaration may never carry.
type ModifierFilter = fn(Modifier) -> bool;

fn no_modifier(_: Modifier) -> bool {
    false
}

pub struct Checker<'a> {
    symbols: SymbolTable,
    diagnostics: Diagnostics,
    natives: &'a dyn NativeBindings,
}

impl<'a> Checker<'a> {
    pub fn new(config: &AnalyzerConfig, natives: &'a dyn NativeBindings) -> Self {
        Checker {
            symbols: SymbolTable::new(),
            diagnostics: Diagnostics::new(config.max_errors),
            natives,
        }
    }

    fn error(&mut self, error: ErrorImpl, token: &Token) {
        self.diagnostics.report(Error::new(error, token.span.start.clone()));
    }

    /// Reports the first modifier that is invalid for `target`, repeated, or
    /// in conflict with an earlier one on the same axis.
    fn check_modifiers(&mut self, target: &str, modifiers: &[Token], invalid: ModifierFilter) -> Option<()> {
        if let Some(token) = modifiers
            .iter()
            .find(|token| Modifier::of(token.kind).is_some_and(invalid))
        {
            self.error(
                ErrorImpl::InvalidModifier {
                    target: target.to_string(),
                    modifier: token.value.clone(),
                },
                token,
            );
            return None;
        }
        if let Some(token) = Modifier::first_duplicate(modifiers) {
            self.error(
                ErrorImpl::DuplicateModifier {
                    target: target.to_string(),
                    modifier: token.value.clone(),
                },
                token,
            );
            return None;
        }
        if let Some(token) = Modifier::first_conflicting(modifiers) {
            self.error(
                ErrorImpl::ConflictingModifier {
                    target: target.to_string(),
                    modifier: token.value.clone(),
                },
                token,
            );
            return None;
        }
        Some(())
    }

    fn check_parameters(&mut self, parameters: &[ParameterNode]) -> Option<Vec<FunctionParameter>> {
        let mut checked = vec![];
        for param in parameters {
            self.check_modifiers("parameter", &param.modifiers, |modifier| modifier.is_visibility())?;
            let modifiers = Modifier::all_of(&param.modifiers);
            let nullable = modifiers.contains(&Modifier::Nullable);
            let datatype = self.datatype(&param.datatype, nullable)?;
            checked.push(FunctionParameter {
                name: param.identifier.value.clone(),
                datatype,
                modifiers,
            });
        }
        Some(checked)
    }

    fn datatype(&mut self, token: &Token, nullable: bool) -> Option<Datatype> {
        match Datatype::of_token(token, nullable) {
            Some(datatype) if datatype.kind == PrimitiveKind::Void => Some(Datatype::VOID),
            Some(datatype) => Some(datatype),
            None => {
                self.error(
                    ErrorImpl::Internal {
                        message: format!("{:?} is not a datatype", token.value),
                    },
                    token,
                );
                None
            }
        }
    }

    fn register_function(&mut self, module: ModuleId, identifier: &Token, definition: FunctionDefinition) {
        if let Err(error) = self.symbols.add_function(module, definition) {
            self.diagnostics
                .report(error.into_diagnostic(identifier.span.start.clone()));
        }
    }

    fn check_block(&mut self, module: ModuleId, statements: &[Stmt]) {
        for stmt in statements {
            if self.diagnostics.has_internal() || self.diagnostics.is_exhausted() {
                return;
            }

            match stmt {
                Stmt::CreateModule(stmt) => match self.symbols.add_submodule(module, &stmt.identifier.value) {
                    Ok(submodule) => self.check_block(submodule, &stmt.body),
                    Err(error) => self
                        .diagnostics
                        .report(error.into_diagnostic(stmt.identifier.span.start.clone())),
                },
                Stmt::FunctionDefinition(stmt) => {
                    self.check_function(module, stmt);
                }
                Stmt::NativeFunctionDefinition(stmt) => {
                    self.check_native_function(module, stmt);
                }
                Stmt::VarDefinition(stmt) => {
                    self.check_global(module, &stmt.modifiers, &stmt.identifier, &stmt.datatype, None);
                }
                Stmt::VarDefAndSetValue(stmt) => {
                    let value = stmt.value.datatype;
                    self.check_global(module, &stmt.modifiers, &stmt.identifier, &stmt.datatype, Some(value));
                }
                Stmt::StdlibFinish(_) => {}
                other => self.diagnostics.report(Error::new(
                    ErrorImpl::Internal {
                        message: format!("unexpected {} statement outside of a function", other.get_name()),
                    },
                    other.get_span().start.clone(),
                )),
            }
        }
    }

    fn check_function(&mut self, module: ModuleId, stmt: &FunctionDefinitionStmt) -> Option<()> {
        self.check_modifiers("function", &stmt.modifiers, |modifier| modifier.is_mutability())?;
        let parameters = self.check_parameters(&stmt.parameters)?;
        let modifiers = Modifier::all_of(&stmt.modifiers);
        let return_type = self.datatype(&stmt.return_type, modifiers.contains(&Modifier::Nullable))?;

        self.register_function(
            module,
            &stmt.identifier,
            FunctionDefinition {
                name: stmt.identifier.value.clone(),
                return_type,
                parameters,
                modifiers,
                body: FunctionBody::Interpreted(stmt.body.clone()),
            },
        );
        self.check_locals(&stmt.body);
        Some(())
    }

    /// Modifier checks for every local declared in a function body.
    fn check_locals(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            match stmt {
                Stmt::VarDefinition(stmt) => {
                    self.check_modifiers("variable", &stmt.modifiers, |modifier| modifier.is_visibility());
                }
                Stmt::VarDefAndSetValue(stmt) => {
                    self.check_modifiers("variable", &stmt.modifiers, |modifier| modifier.is_visibility());
                }
                Stmt::If(stmt) => {
                    self.check_locals(&stmt.body);
                    let mut branch = stmt.else_branch.as_ref();
                    while let Some(next) = branch {
                        match next {
                            ElseBranch::Block(body) => {
                                self.check_locals(body);
                                branch = None;
                            }
                            ElseBranch::ElseIf(stmt) => {
                                self.check_locals(&stmt.body);
                                branch = stmt.else_branch.as_ref();
                            }
                        }
                    }
                }
                Stmt::While(stmt) => self.check_locals(&stmt.body),
                Stmt::ForFakeScope(stmt) => {
                    self.check_modifiers("variable", &stmt.variable.modifiers, |modifier| modifier.is_visibility());
                    self.check_locals(&stmt.body);
                }
                _ => {}
            }
        }
    }

    fn check_native_function(&mut self, module: ModuleId, stmt: &NativeFunctionDefinitionStmt) -> Option<()> {
        self.check_modifiers("function", &stmt.modifiers, |modifier| modifier.is_mutability())?;
        let parameters = self.check_parameters(&stmt.parameters)?;
        let modifiers = Modifier::all_of(&stmt.modifiers);
        let return_type = self.datatype(&stmt.return_type, modifiers.contains(&Modifier::Nullable))?;

        let qualified_name = stmt.qualified_name();
        let types: Vec<Datatype> = parameters.iter().map(|param| param.datatype).collect();
        let descriptor = match self.natives.lookup(&qualified_name, &types) {
            NativeLookup::Found(descriptor) => descriptor,
            NativeLookup::NotFound => {
                self.error(
                    ErrorImpl::NativeBindingNotFound {
                        name: qualified_name,
                        parameters: describe_types(&types),
                    },
                    &stmt.binding,
                );
                return None;
            }
            NativeLookup::Ambiguous => {
                self.error(
                    ErrorImpl::AmbiguousCall {
                        function: qualified_name,
                        arguments: describe_arguments(&types),
                    },
                    &stmt.binding,
                );
                return None;
            }
        };
        if descriptor.return_type != return_type {
            self.error(
                ErrorImpl::TypeMatchError {
                    expected: return_type.to_string(),
                    received: descriptor.return_type.to_string(),
                },
                &stmt.return_type,
            );
            return None;
        }

        debug!(binding = %qualified_name, "bound native function");
        self.register_function(
            module,
            &stmt.identifier,
            FunctionDefinition {
                name: stmt.identifier.value.clone(),
                return_type,
                parameters,
                modifiers,
                body: FunctionBody::Native {
                    qualified_name,
                    descriptor: Some(descriptor),
                },
            },
        );
        Some(())
    }

    fn check_global(
        &mut self,
        module: ModuleId,
        modifiers: &[Token],
        identifier: &Token,
        datatype: &Token,
        value: Option<Datatype>,
    ) -> Option<()> {
        self.check_modifiers("variable", modifiers, no_modifier)?;
        let mods = Modifier::all_of(modifiers);
        if value.is_none() && Modifier::is_constant(&mods) {
            self.error(
                ErrorImpl::UninitializedConstant {
                    variable: identifier.value.clone(),
                },
                identifier,
            );
            return None;
        }

        let nullable = mods.contains(&Modifier::Nullable) || value.is_some_and(|value| value.nullable);
        let datatype = self.datatype(datatype, nullable)?;
        let variable = Variable::new(&identifier.value, datatype, mods, true);
        if let Err(error) = self.symbols.add_variable(module, variable) {
            self.diagnostics
                .report(error.into_diagnostic(identifier.span.start.clone()));
            return None;
        }
        Some(())
    }
}

/// Runs the global definition pass over an AST.
///
/// Returns the symbol table when the pass reported nothing. Running it twice
/// over the same AST yields equal tables.
#[instrument(skip_all, fields(statements = ast.len()))]
pub fn check_ast(
    ast: &[Stmt],
    config: &AnalyzerConfig,
    natives: &dyn NativeBindings,
) -> Result<SymbolTable, Vec<Error>> {
    let mut checker = Checker::new(config, natives);
    let root = checker.symbols.root();
    checker.check_block(root, ast);

    if checker.diagnostics.has_errors() {
        debug!(errors = checker.diagnostics.len(), "global definition pass failed");
        return Err(checker.diagnostics.into_errors());
    }
    debug!(functions = checker.symbols.function_count(), "global definition pass finished");
    Ok(checker.symbols)
}
