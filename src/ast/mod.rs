/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Stmt` sum type
/// - expressions: Typed expression nodes
/// - statements: One struct per statement form
/// - types: Datatypes, operator typing and modifiers
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
