//! Options accepted by `parse_to_json`.

use serde::{Deserialize, Serialize};

/// Host-facing parse options, read from a JSON object such as
/// `{"resolve": true}`. Unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Run the scope resolver and emit `scopeContext` fields.
    pub resolve: bool,
}

impl ParseOptions {
    /// Read options from a JSON string. Anything that is not an object
    /// falls back to the defaults.
    pub fn from_json(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ParseOptions::default(), ParseOptions { resolve: false });
        assert_eq!(ParseOptions::from_json("{}"), ParseOptions::default());
    }

    #[test]
    fn test_from_json() {
        assert!(ParseOptions::from_json(r#"{"resolve": true}"#).resolve);
        assert!(!ParseOptions::from_json(r#"{"resolve": false, "extra": 1}"#).resolve);
    }

    #[test]
    fn test_non_object_falls_back() {
        assert_eq!(ParseOptions::from_json("null"), ParseOptions::default());
        assert_eq!(ParseOptions::from_json(r#"{"resolve": "yes"}"#), ParseOptions::default());
    }
}
