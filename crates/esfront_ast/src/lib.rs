//! esfront_ast: Syntax tree definitions for the ECMAScript front-end.
//!
//! This crate defines the token kinds shared by the scanner and parser, the
//! flag types that travel with tokens and parser contexts, the owned node
//! types and a read-only visitor over them.

pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::Visit;
