//! Statement and expression evaluation.
//!
//! The parser cuts a token stream into statements and evaluates each one
//! against a stack of scopes and the symbol table. It uses a Pratt parser
//! for expressions, typing every node as it goes, and handles:
//!
//! - placement checks (what may be declared where)
//! - early registration of modules, functions and globals
//! - local variables, assignments and calls with overload resolution
//! - desugaring of `x++`, `x--` and both for loop forms
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod scope;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
