//! Parser utility functions.

use esfront_ast::syntax_kind::SyntaxKind;
use esfront_diagnostics::{messages, DiagnosticMessage};

/// Check if a token kind can start an expression.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    kind.is_identifier_like()
        || matches!(
            kind,
            SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::RegularExpressionLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TemplateHead
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::TildeToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::SlashToken
                | SyntaxKind::SlashEqualsToken
                | SyntaxKind::PrivateIdentifier
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::DeleteKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
        )
}

/// Check if a token kind starts an iteration statement.
#[inline]
pub fn is_iteration_start(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::ForKeyword | SyntaxKind::WhileKeyword | SyntaxKind::DoKeyword)
}

/// Check if a token kind is a prefix unary operator that builds a
/// `UnaryExpression` (update operators are handled separately).
#[inline]
pub fn is_unary_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
    )
}

/// The message for an unexpected token of `kind`, and whether it takes the
/// token text as its argument.
pub fn unexpected_token_message(kind: SyntaxKind) -> (&'static DiagnosticMessage, bool) {
    match kind {
        SyntaxKind::EndOfFileToken => (&messages::UNEXPECTED_END_OF_INPUT, false),
        SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => (&messages::UNEXPECTED_NUMBER, false),
        SyntaxKind::StringLiteral => (&messages::UNEXPECTED_STRING, false),
        SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
            (&messages::UNEXPECTED_TEMPLATE_STRING, false)
        }
        SyntaxKind::EscapedReservedWord => (&messages::KEYWORD_MUST_NOT_CONTAIN_ESCAPED_CHARACTERS, false),
        SyntaxKind::EnumKeyword => (&messages::UNEXPECTED_RESERVED_WORD, false),
        kind if kind.is_identifier_like() => (&messages::UNEXPECTED_IDENTIFIER, false),
        _ => (&messages::UNEXPECTED_TOKEN_0, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_starts() {
        assert!(can_start_expression(SyntaxKind::Identifier));
        assert!(can_start_expression(SyntaxKind::AwaitKeyword));
        assert!(can_start_expression(SyntaxKind::SlashToken));
        assert!(!can_start_expression(SyntaxKind::CloseParenToken));
        assert!(!can_start_expression(SyntaxKind::InKeyword));
        assert!(!can_start_expression(SyntaxKind::EndOfFileToken));
    }

    #[test]
    fn test_unexpected_token_messages() {
        let (message, with_text) = unexpected_token_message(SyntaxKind::CloseParenToken);
        assert_eq!(message.message, "Unexpected token {0}");
        assert!(with_text);
        let (message, _) = unexpected_token_message(SyntaxKind::LetKeyword);
        assert_eq!(message.message, "Unexpected identifier");
        let (message, _) = unexpected_token_message(SyntaxKind::EndOfFileToken);
        assert_eq!(message.message, "Unexpected end of input");
    }
}
