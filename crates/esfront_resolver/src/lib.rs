//! esfront_resolver: Lexical scope resolution for the ECMAScript front-end.
//!
//! The resolver walks a parsed `Program`, builds a scope tree, registers every
//! binding in the scope that owns it and stamps identifiers and scope-creating
//! nodes with the id of the scope they belong to. It never changes the shape
//! of the tree and reports no diagnostics.

mod resolver;
mod scope;

pub use resolver::Resolver;
pub use scope::{Binding, BindingKind, Scope, ScopeKind, GLOBAL_SCOPE};

use esfront_ast::node::Program;

/// Resolve every identifier in `program` and stamp its scope ids.
pub fn resolve(program: &mut Program) {
    Resolver::new().resolve_program(program);
}
