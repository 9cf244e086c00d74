//! esfront_scanner: Tokenizer for ECMAScript source text.
//!
//! The scanner produces one token per `scan` call and owns the lexical state
//! the grammar cannot express locally:
//! - regex-versus-division, via a flag recomputed after every token
//! - template continuation after a `${ }` substitution
//! - line terminators between tokens, for automatic semicolon insertion
//! - escaped identifiers, and escaped spellings of reserved words
//!
//! Lexical errors go to the `ErrorList` passed into each call.

mod char_codes;
mod scanner;
mod token;

pub use char_codes::{is_identifier_part, is_identifier_start, is_line_break};
pub use scanner::{Scanner, ScannerState};
pub use token::{numeric_value, tokenize, TokenInfo};
