//! Error types and diagnostic collection.
//!
//! - `Error` pairs an `ErrorImpl` with a source position and hints
//! - `ErrorKind` splits errors into syntax, semantic and internal
//! - `Diagnostics` accumulates errors so one run reports as many as possible

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
