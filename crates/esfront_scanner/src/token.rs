//! Token snapshots and whole-input tokenization.

use crate::scanner::Scanner;
use esfront_ast::syntax_kind::SyntaxKind;
use esfront_ast::types::TokenFlags;
use esfront_core::text::Span;
use esfront_diagnostics::ErrorList;

/// Token information captured from the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    pub kind: SyntaxKind,
    pub span: Span,
    /// Cooked value: identifier name, string contents, numeric source text,
    /// template cooked text or regex pattern.
    pub value: String,
    pub flags: TokenFlags,
}

impl TokenInfo {
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }
}

/// Scan a whole source text into tokens, without parsing.
///
/// Template substitutions are tracked by brace depth so a `}` that closes one
/// resumes the template. A `/` is classified from the previous token alone.
pub fn tokenize(text: &str) -> (Vec<TokenInfo>, ErrorList) {
    let mut scanner = Scanner::new(text);
    let mut errors = ErrorList::new();
    let mut tokens = Vec::new();
    // One open-brace counter per enclosing template substitution.
    let mut substitutions: Vec<usize> = Vec::new();

    scanner.skip_hashbang();
    loop {
        let mut kind = scanner.scan(&mut errors);
        match kind {
            SyntaxKind::EndOfFileToken => break,
            SyntaxKind::TemplateHead => substitutions.push(0),
            SyntaxKind::OpenBraceToken => {
                if let Some(depth) = substitutions.last_mut() {
                    *depth += 1;
                }
            }
            SyntaxKind::CloseBraceToken => match substitutions.last_mut() {
                Some(0) => {
                    kind = scanner.rescan_template_continuation(&mut errors);
                    if kind != SyntaxKind::TemplateMiddle {
                        substitutions.pop();
                    }
                }
                Some(depth) => *depth -= 1,
                None => {}
            },
            _ => {}
        }
        tokens.push(scanner.token_info());
    }
    (tokens, errors)
}

/// The numeric value of a numeric literal's source text.
///
/// Handles separators, radix prefixes and legacy octal. Values beyond the
/// f64 range become infinity, like any IEEE conversion.
pub fn numeric_value(raw: &str) -> f64 {
    let digits: String = raw.chars().filter(|&ch| ch != '_').collect();
    let bytes = digits.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return radix_value(&digits[2..], 16),
            b'o' | b'O' => return radix_value(&digits[2..], 8),
            b'b' | b'B' => return radix_value(&digits[2..], 2),
            b'0'..=b'7' if bytes.iter().all(|b| matches!(b, b'0'..=b'7')) => {
                return radix_value(&digits[1..], 8);
            }
            _ => {}
        }
    }
    digits.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_value(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|ch| ch.to_digit(radix))
        .fold(0.0, |acc, digit| acc * f64::from(radix) + f64::from(digit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        tokenize(text).0.into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn test_tokenize_nested_template() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("`a${ {b: `c${d}`} }e`"),
            vec![
                TemplateHead,
                OpenBraceToken,
                Identifier,
                ColonToken,
                TemplateHead,
                Identifier,
                TemplateTail,
                CloseBraceToken,
                TemplateTail,
            ]
        );
    }

    #[test]
    fn test_tokenize_spans_and_values() {
        let (tokens, errors) = tokenize("let s = 'hi';");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[3].kind, SyntaxKind::StringLiteral);
        assert_eq!(tokens[3].value, "hi");
        assert_eq!(tokens[3].span, Span::new(9, 13));
    }

    #[test]
    fn test_tokenize_collects_lexical_errors() {
        let (tokens, errors) = tokenize("a @ 0b2");
        assert_eq!(tokens.iter().filter(|t| t.kind == SyntaxKind::Illegal).count(), 2);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value("42"), 42.0);
        assert_eq!(numeric_value("1_000_000"), 1_000_000.0);
        assert_eq!(numeric_value("0xFF"), 255.0);
        assert_eq!(numeric_value("0o17"), 15.0);
        assert_eq!(numeric_value("0b101"), 5.0);
        assert_eq!(numeric_value("0777"), 511.0);
        assert_eq!(numeric_value("089"), 89.0);
        assert_eq!(numeric_value(".5"), 0.5);
        assert_eq!(numeric_value("2e3"), 2000.0);
        assert_eq!(numeric_value("1e400"), f64::INFINITY);
    }
}
