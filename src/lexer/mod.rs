//! Reference lexer for Mu source text.
//!
//! The analysis core only consumes tokens; this lexer exists so hosts and
//! tests can produce them from source. It handles:
//!
//! - Keywords, modifiers and datatype names
//! - Dotted (qualified) identifiers as a single token
//! - Typed numeric literals (`5`, `5L`, `5.0`, `5.0f`), strings and chars
//! - Line comments and whitespace

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
