//! Error rendering with miette.

use esfront_diagnostics::{ErrorList, SyntaxError};
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

/// One collected error, attached to its source for graphical rendering.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SourceError {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
    #[help]
    location: String,
}

impl SourceError {
    pub fn new(name: &str, source: &str, error: &SyntaxError) -> Self {
        Self {
            message: error.message.clone(),
            source_code: NamedSource::new(name, source.to_string()),
            span: label_span(source, error.offset),
            location: format!(
                "{} error at line {}, column {}",
                error.category, error.line, error.column
            ),
        }
    }
}

/// A one-character label at `offset`, or an empty one at end of input.
fn label_span(source: &str, offset: usize) -> SourceSpan {
    let offset = offset.min(source.len());
    let len = source
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    SourceSpan::from((offset, len))
}

pub fn print_errors(name: &str, source: &str, errors: &ErrorList) {
    for error in errors {
        eprintln!("{:?}", Report::new(SourceError::new(name, source, error)));
    }
    if errors.len() > 1 {
        eprintln!("{} errors", errors.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_span() {
        assert_eq!(label_span("abc", 1), SourceSpan::from((1, 1)));
        assert_eq!(label_span("abc", 3), SourceSpan::from((3, 0)));
        assert_eq!(label_span("abc", 10), SourceSpan::from((3, 0)));
        assert_eq!(label_span("aé", 1), SourceSpan::from((1, 2)));
    }

    #[test]
    fn test_source_error_from_syntax_error() {
        let errors = esfront_estree::parse_to_json("let x = ;", &Default::default()).expect_err("invalid");
        let first = errors.first().expect("one error");
        let error = SourceError::new("input.js", "let x = ;", first);
        assert_eq!(error.to_string(), first.message);
        assert_eq!(error.span, SourceSpan::from((8, 1)));
        assert_eq!(error.location, format!("{} error at line 1, column 9", first.category));
    }
}
