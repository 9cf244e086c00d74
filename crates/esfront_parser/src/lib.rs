//! esfront_parser: ECMAScript parser.
//!
//! Recursive descent over the scanner's token stream, producing an owned
//! `Program`. The first syntax error aborts the parse; lexical errors the
//! scanner recorded before that point are kept in the same list.

mod cover;
mod expression;
mod parser;
mod precedence;
mod utilities;

pub use parser::Parser;

use esfront_ast::node::Program;
use esfront_diagnostics::ErrorList;

/// Parse a whole script.
///
/// Returns either a complete tree or a non-empty error list, never both.
pub fn parse(source: &str) -> Result<Program, ErrorList> {
    Parser::new(source).parse_program()
}
