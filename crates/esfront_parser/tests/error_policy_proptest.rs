//! Property-based tests for error collection.
//!
//! Lexical errors are recorded while scanning continues; the first syntax
//! error ends the parse. These properties check both halves on generated
//! programs.

use esfront_diagnostics::DiagnosticCategory;
use esfront_parser::parse;
use proptest::prelude::*;

/// A statement whose string literal carries one recoverable lexical error.
fn lexical_error_statement() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(r"'\x';".to_string()),
        Just(r"'\u12';".to_string()),
        Just(r"'\u{110000}';".to_string()),
        "[a-z]{1,6}".prop_map(|name| format!(r"{}_ = '\xg{}';", name, name)),
    ]
}

/// A statement that is both lexically and syntactically valid.
fn valid_statement() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(|name| format!("var {}_ = 1;", name)),
        "[a-z]{1,6}".prop_map(|name| format!("{}_(1, 'two', `three`);", name)),
        (0u32..1000).prop_map(|n| format!("if (x > {}) {{ y = [{}]; }}", n, n)),
        Just("for (const k in o) { continue; }".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_lexical_errors_accumulate_until_syntax_error(
        lexical in prop::collection::vec(lexical_error_statement(), 0..8),
        filler in prop::collection::vec(valid_statement(), 0..4),
    ) {
        let mut source = String::new();
        for (index, statement) in lexical.iter().enumerate() {
            source.push_str(statement);
            source.push('\n');
            if let Some(valid) = filler.get(index) {
                source.push_str(valid);
                source.push('\n');
            }
        }
        source.push_str("1 +;\n'\\x'; 2 +;");

        let errors = parse(&source).expect_err("source ends in a syntax error");
        prop_assert_eq!(errors.len(), lexical.len() + 1);
        let (last, earlier) = errors.errors().split_last().expect("at least one error");
        prop_assert_eq!(last.category, DiagnosticCategory::Syntax);
        prop_assert!(earlier.iter().all(|e| e.category == DiagnosticCategory::Lexical));
    }

    #[test]
    fn test_valid_programs_parse(statements in prop::collection::vec(valid_statement(), 0..12)) {
        let source = statements.join("\n");
        let program = parse(&source);
        prop_assert!(program.is_ok(), "{:?}", source);
        if let Ok(program) = program {
            prop_assert_eq!(program.body.len(), statements.len());
        }
    }

    #[test]
    fn test_parse_never_panics(source in "[ -~\n]{0,64}") {
        let _ = parse(&source);
    }
}
