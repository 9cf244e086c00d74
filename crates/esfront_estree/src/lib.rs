//! esfront_estree: ESTree JSON projection of the syntax tree.
//!
//! Converts a parsed (and optionally resolved) `Program` into the
//! ESTree-shaped `serde_json::Value` that JavaScript tooling consumes.
//! Positions are 0-based byte offsets in `start`/`end`.

mod options;
mod serializer;

pub use options::ParseOptions;
pub use serializer::Serializer;

use esfront_ast::node::Program;
use esfront_diagnostics::ErrorList;
use esfront_scanner::tokenize;
use serde_json::{json, Value};

/// Serialize a program to ESTree JSON.
pub fn to_estree(program: &Program) -> Value {
    Serializer::serialize_program(program)
}

/// Parse `source`, resolve scopes when requested and serialize the result.
pub fn parse_to_json(source: &str, options: &ParseOptions) -> Result<Value, ErrorList> {
    let mut program = esfront_parser::parse(source)?;
    if options.resolve {
        esfront_resolver::resolve(&mut program);
    }
    tracing::debug!(statements = program.body.len(), resolve = options.resolve, "serializing");
    Ok(to_estree(&program))
}

/// The token stream as a JSON array, alongside any lexical errors.
pub fn tokens_to_json(source: &str) -> (Value, ErrorList) {
    let (tokens, errors) = tokenize(source);
    let tokens = tokens
        .iter()
        .map(|token| {
            let (start, end) = token.span.offsets();
            json!({
                "kind": token.kind.to_string(),
                "value": token.value,
                "start": start,
                "end": end,
                "newlineBefore": token.has_preceding_line_break(),
            })
        })
        .collect();
    (Value::Array(tokens), errors)
}
