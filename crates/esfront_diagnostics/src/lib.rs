//! esfront_diagnostics: Diagnostic messages and the error collector.
//!
//! The tokenizer and the parser both report into one `ErrorList` that is
//! threaded through a single parse call. Each record stores the 0-based byte
//! offset as the authoritative position; line and column are derived from the
//! source prefix when the error is added.

use esfront_core::text::{line_and_column, offset_of, Idx};
use std::fmt;

/// Which phase produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Raised by the tokenizer. Scanning continues afterwards.
    Lexical,
    /// Raised by the parser. The parse stops at the first one.
    Syntax,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Lexical => write!(f, "lexical"),
            DiagnosticCategory::Syntax => write!(f, "syntax"),
        }
    }
}

/// A diagnostic message template with its category.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A single error with its position in the source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (line {line}, column {column})")]
pub struct SyntaxError {
    pub message: String,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
    /// 0-based byte offset into the source.
    pub offset: usize,
    pub category: DiagnosticCategory,
}

impl SyntaxError {
    /// Build an error at a 1-based `Idx`, deriving line and column from `source`.
    pub fn at(source: &str, idx: Idx, category: DiagnosticCategory, message: String) -> Self {
        let offset = offset_of(idx);
        let position = line_and_column(source, offset);
        Self {
            message,
            line: position.line,
            column: position.column,
            offset,
            category,
        }
    }

    pub fn is_lexical(&self) -> bool {
        self.category == DiagnosticCategory::Lexical
    }
}

/// The append-only error collector for one parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.errors))]
pub struct ErrorList {
    errors: Vec<SyntaxError>,
}

fn summarize(errors: &[SyntaxError]) -> String {
    match errors {
        [] => "no errors".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more errors)", first, rest.len()),
    }
}

impl ErrorList {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a diagnostic at `idx`, formatting the template with `args`.
    pub fn add(&mut self, source: &str, idx: Idx, message: &DiagnosticMessage, args: &[&str]) {
        let text = format_message(message.message, args);
        self.errors.push(SyntaxError::at(source, idx, message.category, text));
    }

    pub fn push(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }

    pub fn has_syntax_error(&self) -> bool {
        self.errors.iter().any(|e| e.category == DiagnosticCategory::Syntax)
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn first(&self) -> Option<&SyntaxError> {
        self.errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<SyntaxError> {
        self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Drop every error recorded after the first `len`. Used to roll back
    /// diagnostics produced while scanning speculatively.
    pub fn truncate(&mut self, len: usize) {
        self.errors.truncate(len);
    }

    /// `Ok(())` when empty, otherwise the list itself as an error.
    pub fn into_result(self) -> Result<(), ErrorList> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a SyntaxError;
    type IntoIter = std::slice::Iter<'a, SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ErrorList {
    type Item = SyntaxError;
    type IntoIter = std::vec::IntoIter<SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        (Lexical, $msg:expr) => {
            DiagnosticMessage { category: DiagnosticCategory::Lexical, message: $msg }
        };
        (Syntax, $msg:expr) => {
            DiagnosticMessage { category: DiagnosticCategory::Syntax, message: $msg }
        };
    }

    // ========================================================================
    // Tokenizer errors
    // ========================================================================
    pub const INVALID_OR_UNEXPECTED_TOKEN: DiagnosticMessage = diag!(Lexical, "Invalid or unexpected token");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(Lexical, "Unterminated string literal");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(Lexical, "Unterminated template literal");
    pub const UNTERMINATED_REGULAR_EXPRESSION: DiagnosticMessage = diag!(Lexical, "Invalid regular expression: missing /");
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = diag!(Lexical, "Unterminated comment");
    pub const INVALID_REGULAR_EXPRESSION_FLAGS: DiagnosticMessage = diag!(Lexical, "Invalid regular expression flags");
    pub const INVALID_HEXADECIMAL_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(Lexical, "Invalid hexadecimal escape sequence");
    pub const INVALID_UNICODE_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(Lexical, "Invalid Unicode escape sequence");
    pub const UNDEFINED_UNICODE_CODE_POINT: DiagnosticMessage = diag!(Lexical, "Undefined Unicode code-point");
    pub const NUMERIC_SEPARATORS_NOT_ALLOWED_HERE: DiagnosticMessage = diag!(Lexical, "Numeric separators are not allowed here");

    // ========================================================================
    // Unexpected tokens
    // ========================================================================
    pub const UNEXPECTED_TOKEN_0: DiagnosticMessage = diag!(Syntax, "Unexpected token {0}");
    pub const UNEXPECTED_END_OF_INPUT: DiagnosticMessage = diag!(Syntax, "Unexpected end of input");
    pub const UNEXPECTED_IDENTIFIER: DiagnosticMessage = diag!(Syntax, "Unexpected identifier");
    pub const UNEXPECTED_RESERVED_WORD: DiagnosticMessage = diag!(Syntax, "Unexpected reserved word");
    pub const UNEXPECTED_NUMBER: DiagnosticMessage = diag!(Syntax, "Unexpected number");
    pub const UNEXPECTED_STRING: DiagnosticMessage = diag!(Syntax, "Unexpected string");
    pub const UNEXPECTED_TEMPLATE_STRING: DiagnosticMessage = diag!(Syntax, "Unexpected template string");
    pub const KEYWORD_MUST_NOT_CONTAIN_ESCAPED_CHARACTERS: DiagnosticMessage = diag!(Syntax, "Keyword must not contain escaped characters");
    pub const ILLEGAL_NEWLINE_AFTER_THROW: DiagnosticMessage = diag!(Syntax, "Illegal newline after throw");
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(Syntax, "Maximum nesting depth exceeded");

    // ========================================================================
    // Assignment targets and patterns
    // ========================================================================
    pub const INVALID_DESTRUCTURING_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(Syntax, "Invalid destructuring assignment target");
    pub const INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT: DiagnosticMessage = diag!(Syntax, "Invalid left-hand side in assignment");
    pub const INVALID_LEFT_HAND_SIDE_IN_PREFIX_OPERATION: DiagnosticMessage = diag!(Syntax, "Invalid left-hand side expression in prefix operation");
    pub const INVALID_LEFT_HAND_SIDE_IN_POSTFIX_OPERATION: DiagnosticMessage = diag!(Syntax, "Invalid left-hand side expression in postfix operation");
    pub const INVALID_LEFT_HAND_SIDE_IN_0_LOOP: DiagnosticMessage = diag!(Syntax, "Invalid left-hand side in {0} loop");
    pub const FOR_0_LOOP_SINGLE_BINDING: DiagnosticMessage = diag!(Syntax, "Invalid left-hand side in {0} loop: Must have a single binding.");
    pub const FOR_0_LOOP_INITIALIZER: DiagnosticMessage = diag!(Syntax, "{0} loop variable declaration may not have an initializer.");
    pub const INVALID_SHORTHAND_PROPERTY_INITIALIZER: DiagnosticMessage = diag!(Syntax, "Invalid shorthand property initializer");
    pub const REST_ELEMENT_MUST_BE_LAST: DiagnosticMessage = diag!(Syntax, "Rest element must be last element");
    pub const REST_PARAMETER_MUST_BE_LAST: DiagnosticMessage = diag!(Syntax, "Rest parameter must be last formal parameter");
    pub const REST_PARAMETER_MAY_NOT_HAVE_DEFAULT: DiagnosticMessage = diag!(Syntax, "Rest parameter may not have a default initializer");
    pub const MISSING_INITIALIZER_IN_DESTRUCTURING: DiagnosticMessage = diag!(Syntax, "Missing initializer in destructuring declaration");
    pub const MISSING_INITIALIZER_IN_CONST: DiagnosticMessage = diag!(Syntax, "Missing initializer in const declaration");
    pub const LET_IS_DISALLOWED_AS_LEXICALLY_BOUND_NAME: DiagnosticMessage = diag!(Syntax, "let is disallowed as a lexically bound name");

    // ========================================================================
    // Statement legality
    // ========================================================================
    pub const ILLEGAL_RETURN_STATEMENT: DiagnosticMessage = diag!(Syntax, "Illegal return statement");
    pub const ILLEGAL_BREAK_STATEMENT: DiagnosticMessage = diag!(Syntax, "Illegal break statement");
    pub const ILLEGAL_CONTINUE_STATEMENT: DiagnosticMessage = diag!(Syntax, "Illegal continue statement: no surrounding iteration statement");
    pub const UNDEFINED_LABEL_0: DiagnosticMessage = diag!(Syntax, "Undefined label '{0}'");
    pub const LABEL_0_ALREADY_DECLARED: DiagnosticMessage = diag!(Syntax, "Label '{0}' has already been declared");
    pub const MISSING_CATCH_OR_FINALLY: DiagnosticMessage = diag!(Syntax, "Missing catch or finally after try");
    pub const MORE_THAN_ONE_DEFAULT_CLAUSE: DiagnosticMessage = diag!(Syntax, "More than one default clause in switch statement");

    // ========================================================================
    // Functions, generators, async
    // ========================================================================
    pub const YIELD_IN_FORMAL_PARAMETER: DiagnosticMessage = diag!(Syntax, "Yield expression not allowed in formal parameter");
    pub const AWAIT_IN_FORMAL_PARAMETER: DiagnosticMessage = diag!(Syntax, "Illegal await-expression in formal parameters of async function");
    pub const NEW_TARGET_NOT_ALLOWED_HERE: DiagnosticMessage = diag!(Syntax, "new.target expression is not allowed here");
    pub const SUPER_KEYWORD_UNEXPECTED_HERE: DiagnosticMessage = diag!(Syntax, "'super' keyword unexpected here");
    pub const GETTER_MUST_NOT_HAVE_PARAMETERS: DiagnosticMessage = diag!(Syntax, "Getter must not have any formal parameters.");
    pub const SETTER_MUST_HAVE_ONE_PARAMETER: DiagnosticMessage = diag!(Syntax, "Setter must have exactly one formal parameter.");
    pub const SETTER_PARAMETER_MAY_NOT_BE_REST: DiagnosticMessage = diag!(Syntax, "Setter function argument must not be a rest parameter");

    // ========================================================================
    // Expressions
    // ========================================================================
    pub const UNARY_BEFORE_EXPONENTIATION: DiagnosticMessage = diag!(Syntax, "Unary operator used immediately before exponentiation expression. Parenthesis must be used to disambiguate operator precedence");
    pub const INVALID_TAGGED_TEMPLATE_ON_OPTIONAL_CHAIN: DiagnosticMessage = diag!(Syntax, "Invalid tagged template on optional chain");
    pub const INVALID_OPTIONAL_CHAIN_FROM_NEW: DiagnosticMessage = diag!(Syntax, "Invalid optional chain from new expression");
    pub const INVALID_ESCAPE_SEQUENCE_IN_TEMPLATE: DiagnosticMessage = diag!(Syntax, "Invalid escape sequence in template");
    pub const PRIVATE_NAME_0_OUTSIDE_CLASS: DiagnosticMessage = diag!(Syntax, "Private field '#{0}' must be declared in an enclosing class");

    // ========================================================================
    // Classes
    // ========================================================================
    pub const A_CLASS_MAY_ONLY_HAVE_ONE_CONSTRUCTOR: DiagnosticMessage = diag!(Syntax, "A class may only have one constructor");
    pub const CLASS_CONSTRUCTOR_MAY_NOT_BE_0: DiagnosticMessage = diag!(Syntax, "Class constructor may not be {0}");
    pub const CLASSES_MAY_NOT_HAVE_FIELD_NAMED_CONSTRUCTOR: DiagnosticMessage = diag!(Syntax, "Classes may not have a field named 'constructor'");
    pub const CLASSES_MAY_NOT_HAVE_PRIVATE_CONSTRUCTOR: DiagnosticMessage = diag!(Syntax, "Classes may not have a private field named '#constructor'");
    pub const CLASSES_MAY_NOT_HAVE_STATIC_PROTOTYPE: DiagnosticMessage = diag!(Syntax, "Classes may not have a static property named 'prototype'");
}
