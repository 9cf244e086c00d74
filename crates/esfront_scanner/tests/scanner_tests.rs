//! Scanner integration tests.
//!
//! Verifies tokenization of ECMAScript constructs and the lexical errors the
//! scanner records while continuing.

use esfront_ast::syntax_kind::SyntaxKind;
use esfront_ast::types::TokenFlags;
use esfront_diagnostics::{DiagnosticCategory, ErrorList};
use esfront_scanner::{numeric_value, tokenize, Scanner};

/// Helper: scan all tokens from source and return as (kind, value) pairs.
fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let (tokens, errors) = tokenize(source);
    assert!(errors.is_empty(), "unexpected errors in {:?}: {}", source, errors);
    tokens.into_iter().map(|token| (token.kind, token.value)).collect()
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: collect (offset, message) for every lexical error.
fn scan_errors(source: &str) -> Vec<(usize, String)> {
    let (_, errors) = tokenize(source);
    errors.iter().map(|e| (e.offset, e.message.clone())).collect()
}

// ============================================================================
// Trivia
// ============================================================================

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
}

#[test]
fn test_whitespace_and_comments_only() {
    assert!(scan_all("   \n\t  // line\n/* block */ \u{00A0}\u{FEFF}").is_empty());
}

#[test]
fn test_hashbang_is_skipped() {
    assert_eq!(scan_kinds("#!/usr/bin/env node\nx"), vec![SyntaxKind::Identifier]);
}

#[test]
fn test_hashbang_only_at_start() {
    let errors = scan_errors("x\n#!foo");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, 2);
}

#[test]
fn test_line_break_in_block_comment_sets_flag() {
    let (tokens, _) = tokenize("a /*\n*/ b /* */ c");
    assert!(!tokens[0].has_preceding_line_break());
    assert!(tokens[1].has_preceding_line_break());
    assert!(!tokens[2].has_preceding_line_break());
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numeric_literals() {
    let tokens = scan_all("42 3.14 0xFF 0b1010 0o77 1_000 5. 1e-7");
    let values: Vec<&str> = tokens.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(values, vec!["42", "3.14", "0xFF", "0b1010", "0o77", "1_000", "5.", "1e-7"]);
    assert!(tokens.iter().all(|(k, _)| *k == SyntaxKind::NumericLiteral));
}

#[test]
fn test_numeric_flags() {
    let (tokens, _) = tokenize("0x1 017 1e3 1_0");
    assert!(tokens[0].flags.contains(TokenFlags::HEX_SPECIFIER));
    assert!(tokens[1].flags.contains(TokenFlags::LEGACY_OCTAL));
    assert!(tokens[2].flags.contains(TokenFlags::SCIENTIFIC));
    assert!(tokens[3].flags.contains(TokenFlags::CONTAINS_SEPARATOR));
}

#[test]
fn test_bigint_literals() {
    let tokens = scan_all("10n 0b11n 0x1Fn");
    assert!(tokens.iter().all(|(k, _)| *k == SyntaxKind::BigIntLiteral));
    assert_eq!(tokens[1].1, "0b11n");
}

#[test]
fn test_invalid_bigints() {
    for source in ["1e3n", "017n", "1.0n"] {
        let (tokens, errors) = tokenize(source);
        assert_eq!(tokens[0].kind, SyntaxKind::Illegal, "{}", source);
        assert_eq!(errors.len(), 1, "{}", source);
    }
}

#[test]
fn test_radix_prefix_without_digits() {
    let errors = scan_errors("0x;");
    assert_eq!(errors, vec![(0, "Invalid or unexpected token".to_string())]);
}

#[test]
fn test_numeric_value_conversion() {
    assert_eq!(numeric_value("0x10"), 16.0);
    assert_eq!(numeric_value("010"), 8.0);
    assert_eq!(numeric_value("1_2.5_0"), 12.5);
}

#[test]
fn test_string_literals() {
    let tokens = scan_all(r#""hello" 'world' "it's" 'say "hi"'"#);
    let values: Vec<&str> = tokens.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(values, vec!["hello", "world", "it's", "say \"hi\""]);
}

#[test]
fn test_string_line_separator_allowed() {
    let tokens = scan_all("'a\u{2028}b'");
    assert_eq!(tokens[0].1, "a\u{2028}b");
}

#[test]
fn test_string_legacy_octal_escapes() {
    let tokens = scan_all(r"'\0\08\377\400'");
    assert_eq!(tokens[0].1, "\0\08\u{FF}\u{20}0");
}

#[test]
fn test_string_unicode_escape_errors() {
    assert_eq!(scan_errors(r"'\u{110000}'"), vec![(1, "Undefined Unicode code-point".to_string())]);
    assert_eq!(scan_errors(r"'\u12'"), vec![(1, "Invalid Unicode escape sequence".to_string())]);
}

#[test]
fn test_unterminated_string_at_eof() {
    let (tokens, errors) = tokenize("x = 'abc");
    assert_eq!(tokens[2].kind, SyntaxKind::StringLiteral);
    assert!(tokens[2].flags.contains(TokenFlags::UNTERMINATED));
    assert_eq!(errors.errors()[0].offset, 4);
    assert_eq!(errors.errors()[0].category, DiagnosticCategory::Lexical);
}

#[test]
fn test_template_literals() {
    assert_eq!(scan_kinds("`plain`"), vec![SyntaxKind::NoSubstitutionTemplateLiteral]);
    assert_eq!(
        scan_kinds("`a${b}c${d}e`"),
        vec![
            SyntaxKind::TemplateHead,
            SyntaxKind::Identifier,
            SyntaxKind::TemplateMiddle,
            SyntaxKind::Identifier,
            SyntaxKind::TemplateTail,
        ]
    );
}

#[test]
fn test_template_dollar_without_brace() {
    let tokens = scan_all("`$a $ {b}`");
    assert_eq!(tokens, vec![(SyntaxKind::NoSubstitutionTemplateLiteral, "$a $ {b}".to_string())]);
}

#[test]
fn test_unterminated_template() {
    // Reported where the unterminated chunk begins, at the closing brace.
    let errors = scan_errors("`abc${x}def");
    assert_eq!(errors, vec![(7, "Unterminated template literal".to_string())]);
}

#[test]
fn test_regex_literals() {
    let (tokens, errors) = tokenize("x = /[a-z]+\\/?/giu; y = a / b");
    assert!(errors.is_empty());
    assert_eq!(tokens[2].kind, SyntaxKind::RegularExpressionLiteral);
    assert_eq!(tokens[2].value, "[a-z]+\\/?");
    assert_eq!(tokens[7].kind, SyntaxKind::SlashToken);
}

#[test]
fn test_regex_after_keyword() {
    assert_eq!(
        scan_kinds("return /x/"),
        vec![SyntaxKind::ReturnKeyword, SyntaxKind::RegularExpressionLiteral]
    );
    assert_eq!(
        scan_kinds("this / 2"),
        vec![SyntaxKind::ThisKeyword, SyntaxKind::SlashToken, SyntaxKind::NumericLiteral]
    );
}

#[test]
fn test_division_after_keyword_property_name() {
    use SyntaxKind::*;
    assert_eq!(
        scan_kinds("a.return / 2"),
        vec![Identifier, DotToken, ReturnKeyword, SlashToken, NumericLiteral]
    );
    assert_eq!(
        scan_kinds("x.default / y / z"),
        vec![Identifier, DotToken, DefaultKeyword, SlashToken, Identifier, SlashToken, Identifier]
    );
    assert_eq!(scan_kinds("a?.in /= 2"), vec![Identifier, QuestionDotToken, InKeyword, SlashEqualsToken, NumericLiteral]);
    // Only the name right after the dot is affected.
    assert_eq!(
        scan_kinds("a.b; return /x/"),
        vec![Identifier, DotToken, Identifier, SemicolonToken, ReturnKeyword, RegularExpressionLiteral]
    );
}

#[test]
fn test_unterminated_regex() {
    let errors = scan_errors("x = /abc\n");
    assert_eq!(errors, vec![(4, "Invalid regular expression: missing /".to_string())]);
}

#[test]
fn test_regex_flags_u_and_v_conflict() {
    let errors = scan_errors("/a/uv");
    assert_eq!(errors, vec![(3, "Invalid regular expression flags".to_string())]);
}

// ============================================================================
// Identifiers and keywords
// ============================================================================

#[test]
fn test_identifiers() {
    let tokens = scan_all("foo _bar $baz camelCase ünïcödé a\u{200D}b");
    assert!(tokens.iter().all(|(k, _)| *k == SyntaxKind::Identifier));
    assert_eq!(tokens[4].1, "ünïcödé");
}

#[test]
fn test_reserved_words() {
    let kinds = scan_kinds("if else for while do return function class new delete typeof void");
    assert!(kinds.iter().all(|k| k.is_reserved_word()));
    assert_eq!(kinds[0], SyntaxKind::IfKeyword);
    assert_eq!(kinds[11], SyntaxKind::VoidKeyword);
}

#[test]
fn test_contextual_keywords_are_not_reserved() {
    let kinds = scan_kinds("async await get set static of let yield target");
    assert!(kinds.iter().all(|k| k.is_contextual_keyword()));
}

#[test]
fn test_escaped_keyword() {
    let (tokens, errors) = tokenize(r"\u0069f");
    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, SyntaxKind::EscapedReservedWord);
    assert_eq!(tokens[0].value, "if");
}

#[test]
fn test_private_names() {
    assert_eq!(
        scan_all("#x #\u{E9}t\u{E9}"),
        vec![
            (SyntaxKind::PrivateIdentifier, "x".to_string()),
            (SyntaxKind::PrivateIdentifier, "\u{E9}t\u{E9}".to_string()),
        ]
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_assignment_operators() {
    let kinds = scan_kinds("a = b += c -= d *= e /= f %= g **= h <<= i >>= j >>>= k &= l |= m ^= n &&= o ||= p ??= q");
    let operators: Vec<SyntaxKind> = kinds.into_iter().filter(|k| k.is_assignment_operator()).collect();
    assert_eq!(operators.len(), 16);
}

#[test]
fn test_arrow_and_spread() {
    assert_eq!(
        scan_kinds("(...a) => a"),
        vec![
            SyntaxKind::OpenParenToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_optional_chaining_and_nullish() {
    assert_eq!(
        scan_kinds("a?.b ?? c"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::Identifier,
        ]
    );
}

// ============================================================================
// Spans and recovery
// ============================================================================

#[test]
fn test_spans_are_one_based() {
    let (tokens, _) = tokenize("ab  cd");
    assert_eq!((tokens[0].span.start, tokens[0].span.end), (1, 3));
    assert_eq!((tokens[1].span.start, tokens[1].span.end), (5, 7));
    assert_eq!(tokens[1].span.offsets(), (4, 6));
}

#[test]
fn test_scanning_continues_after_lexical_errors() {
    let (tokens, errors) = tokenize("a ` b");
    assert_eq!(tokens[0].kind, SyntaxKind::Identifier);
    assert_eq!(tokens[1].kind, SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(errors.len(), 1);

    let (tokens, errors) = tokenize("x = '\\x'; y");
    assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::Identifier));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_error_line_and_column() {
    let mut scanner = Scanner::new("a\n  @");
    let mut errors = ErrorList::new();
    scanner.scan(&mut errors);
    scanner.scan(&mut errors);
    let error = errors.first().map(|e| (e.line, e.column));
    assert_eq!(error, Some((2, 3)));
}
