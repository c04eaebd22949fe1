//! Symbol model shared by every pass.
//!
//! - `symbols`: arena-backed module tree and qualified-name resolution
//! - `function`: overload groups and their definitions
//! - `variable`: global and local variables

pub mod function;
pub mod symbols;
pub mod variable;

#[cfg(test)]
mod tests;
