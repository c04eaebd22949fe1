#![allow(clippy::module_inception)]

//! Front end for the Mu language: turns a token stream into a validated,
//! fully typed AST plus a populated symbol model.
//!
//! The pipeline is:
//!
//! 1. skim pass - placement checks and early symbol registration
//! 2. evaluate pass - full resolution and typed AST construction
//! 3. global definition pass - authoritative re-registration of every
//!    module, function and global variable found in the AST
//!
//! Tokenization is performed by the host; [`lexer::tokenize`] is a
//! reference lexer for hosts that have none of their own.

use std::rc::Rc;

use tracing::{debug, instrument};

use crate::{
    ast::ast::Stmt,
    checker::{bindings::NativeBindings, checker::check_ast},
    config::AnalyzerConfig,
    errors::errors::Error,
    lexer::tokens::Token,
    parser::parser::parse,
    symbols::symbols::SymbolTable,
};

pub mod ast;
pub mod checker;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbols;

extern crate regex;

/// Byte offset into a source file, plus the file's name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Zero-width span used for tokens synthesized during desugaring.
    pub fn synthetic() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// The result of a successful analysis.
#[derive(Debug)]
pub struct Analysis {
    pub ast: Vec<Stmt>,
    pub symbols: SymbolTable,
}

/// Runs the complete analysis over a token stream.
///
/// Returns every collected diagnostic when any pass reports an error. When the
/// skim pass fails the later passes are skipped, since their diagnostics would
/// only repeat it.
#[instrument(skip_all, fields(tokens = tokens.len()))]
pub fn analyze(
    tokens: Vec<Token>,
    config: &AnalyzerConfig,
    natives: &dyn NativeBindings,
) -> Result<Analysis, Vec<Error>> {
    let (ast, mut errors) = parse(tokens, config);

    if errors.iter().any(|error| error.is_internal()) {
        return Err(errors);
    }

    let ast = match ast {
        Some(ast) => ast,
        None => return Err(errors),
    };

    match check_ast(&ast, config, natives) {
        Ok(symbols) if errors.is_empty() => {
            debug!("analysis finished without diagnostics");
            Ok(Analysis { ast, symbols })
        }
        Ok(_) => Err(errors),
        Err(check_errors) => {
            errors.extend(check_errors);
            if let Some(limit) = config.max_errors {
                errors.truncate(limit);
            }
            Err(errors)
        }
    }
}
