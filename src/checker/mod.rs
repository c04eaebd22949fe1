//! Global definition pass and host bindings.
//!
//! After the parser has produced a fully typed AST, the checker walks it
//! once more and builds the authoritative symbol table:
//!
//! - modules, functions and global variables are registered from scratch
//! - duplicate names and function signatures are rejected
//! - modifiers are validated for duplicates and conflicts
//! - native functions are resolved through [`bindings::NativeBindings`]

pub mod bindings;
pub mod checker;

#[cfg(test)]
mod tests;
