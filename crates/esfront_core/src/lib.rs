//! esfront_core: Core position types for the esfront ECMAScript front-end.
//!
//! Provides the 1-based `Idx` convention, node spans, and the line map used
//! to turn byte offsets into line/column pairs for diagnostics.

pub mod text;

// Re-export commonly used types
pub use text::{Idx, LineAndColumn, LineMap, Span};
