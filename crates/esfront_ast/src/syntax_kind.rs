//! SyntaxKind enum - every token kind produced by the scanner.
//!
//! Node kinds are not listed here; the tree is a set of typed sum types in
//! `node.rs`, and operators inside nodes are recorded with the token kind
//! that spelled them.

/// The kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Special tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken = 1,
    /// An illegal character or malformed literal. Already reported by the scanner.
    Illegal = 2,
    /// An identifier spelling a reserved word through unicode escapes.
    EscapedReservedWord = 3,

    // Literals
    NumericLiteral = 4,
    BigIntLiteral = 5,
    StringLiteral = 6,
    RegularExpressionLiteral = 7,
    NoSubstitutionTemplateLiteral = 8,

    // Pseudo-literals (template)
    TemplateHead = 9,
    TemplateMiddle = 10,
    TemplateTail = 11,

    // ========================================================================
    // Punctuation
    // ========================================================================
    OpenBraceToken = 12,
    CloseBraceToken = 13,
    OpenParenToken = 14,
    CloseParenToken = 15,
    OpenBracketToken = 16,
    CloseBracketToken = 17,
    DotToken = 18,
    DotDotDotToken = 19,
    SemicolonToken = 20,
    CommaToken = 21,
    QuestionDotToken = 22,
    LessThanToken = 23,
    GreaterThanToken = 24,
    LessThanEqualsToken = 25,
    GreaterThanEqualsToken = 26,
    EqualsEqualsToken = 27,
    ExclamationEqualsToken = 28,
    EqualsEqualsEqualsToken = 29,
    ExclamationEqualsEqualsToken = 30,
    EqualsGreaterThanToken = 31,
    PlusToken = 32,
    MinusToken = 33,
    AsteriskToken = 34,
    AsteriskAsteriskToken = 35,
    SlashToken = 36,
    PercentToken = 37,
    PlusPlusToken = 38,
    MinusMinusToken = 39,
    LessThanLessThanToken = 40,
    GreaterThanGreaterThanToken = 41,
    GreaterThanGreaterThanGreaterThanToken = 42,
    AmpersandToken = 43,
    BarToken = 44,
    CaretToken = 45,
    ExclamationToken = 46,
    TildeToken = 47,
    AmpersandAmpersandToken = 48,
    BarBarToken = 49,
    QuestionToken = 50,
    ColonToken = 51,
    QuestionQuestionToken = 52,
    /// `#name`; the token value holds the name without the hash.
    PrivateIdentifier = 53,

    // Assignments
    EqualsToken = 54,
    PlusEqualsToken = 55,
    MinusEqualsToken = 56,
    AsteriskEqualsToken = 57,
    AsteriskAsteriskEqualsToken = 58,
    SlashEqualsToken = 59,
    PercentEqualsToken = 60,
    LessThanLessThanEqualsToken = 61,
    GreaterThanGreaterThanEqualsToken = 62,
    GreaterThanGreaterThanGreaterThanEqualsToken = 63,
    AmpersandEqualsToken = 64,
    BarEqualsToken = 65,
    CaretEqualsToken = 66,
    BarBarEqualsToken = 67,
    AmpersandAmpersandEqualsToken = 68,
    QuestionQuestionEqualsToken = 69,

    // ========================================================================
    // Identifiers and keywords
    // ========================================================================
    Identifier = 70,

    // Reserved words
    BreakKeyword = 71,
    CaseKeyword = 72,
    CatchKeyword = 73,
    ClassKeyword = 74,
    ConstKeyword = 75,
    ContinueKeyword = 76,
    DebuggerKeyword = 77,
    DefaultKeyword = 78,
    DeleteKeyword = 79,
    DoKeyword = 80,
    ElseKeyword = 81,
    EnumKeyword = 82,
    ExportKeyword = 83,
    ExtendsKeyword = 84,
    FalseKeyword = 85,
    FinallyKeyword = 86,
    ForKeyword = 87,
    FunctionKeyword = 88,
    IfKeyword = 89,
    ImportKeyword = 90,
    InKeyword = 91,
    InstanceOfKeyword = 92,
    NewKeyword = 93,
    NullKeyword = 94,
    ReturnKeyword = 95,
    SuperKeyword = 96,
    SwitchKeyword = 97,
    ThisKeyword = 98,
    ThrowKeyword = 99,
    TrueKeyword = 100,
    TryKeyword = 101,
    TypeOfKeyword = 102,
    VarKeyword = 103,
    VoidKeyword = 104,
    WhileKeyword = 105,
    WithKeyword = 106,

    // Contextual keywords (valid identifiers outside their special position)
    AsyncKeyword = 107,
    AwaitKeyword = 108,
    GetKeyword = 109,
    LetKeyword = 110,
    OfKeyword = 111,
    SetKeyword = 112,
    StaticKeyword = 113,
    TargetKeyword = 114,
    YieldKeyword = 115,
}

impl SyntaxKind {
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::AsyncKeyword;
    pub const LAST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::NumericLiteral;
    pub const LAST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::NoSubstitutionTemplateLiteral;
}

impl SyntaxKind {
    #[inline]
    fn in_range(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    /// Whether this kind is a reserved word that can never be an identifier.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        self.in_range(Self::FIRST_RESERVED_WORD, Self::LAST_RESERVED_WORD)
    }

    /// Whether this kind is a contextual keyword such as `async` or `of`.
    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self.in_range(Self::FIRST_CONTEXTUAL_KEYWORD, Self::LAST_CONTEXTUAL_KEYWORD)
    }

    /// Whether this kind is a plain identifier or a contextual keyword.
    #[inline]
    pub fn is_identifier_like(self) -> bool {
        self == SyntaxKind::Identifier || self.is_contextual_keyword()
    }

    /// Whether this kind can appear where an IdentifierName is expected
    /// (property names after `.`, object keys, method names).
    #[inline]
    pub fn is_identifier_name(self) -> bool {
        self.is_identifier_like() || self.is_reserved_word() || self == SyntaxKind::EscapedReservedWord
    }

    /// Whether this kind represents a punctuation token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    /// Whether this kind represents a literal token.
    #[inline]
    pub fn is_literal(self) -> bool {
        self.in_range(Self::FIRST_LITERAL_TOKEN, Self::LAST_LITERAL_TOKEN)
    }

    /// Whether this kind represents a template token.
    #[inline]
    pub fn is_template(self) -> bool {
        self.in_range(SyntaxKind::NoSubstitutionTemplateLiteral, SyntaxKind::TemplateTail)
    }

    /// Whether this kind represents an assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self.in_range(Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    /// Whether this is one of the short-circuiting logical operators.
    #[inline]
    pub fn is_logical_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::AmpersandAmpersandToken | SyntaxKind::BarBarToken | SyntaxKind::QuestionQuestionToken
        )
    }

    /// Whether a `/` following a token of this kind starts a regular expression.
    ///
    /// Tokens that end an operand (identifiers, literals, closing brackets,
    /// `this`, postfix operators) make `/` a division. Everything else expects
    /// an operand next, so `/` opens a regex literal.
    pub fn allows_regex_after(self) -> bool {
        match self {
            SyntaxKind::Identifier
            | SyntaxKind::EscapedReservedWord
            | SyntaxKind::PrivateIdentifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RegularExpressionLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateTail
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => false,
            kind if kind.is_contextual_keyword() => false,
            _ => true,
        }
    }

    /// Get the keyword kind for a string, if it is one.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "catch" => SyntaxKind::CatchKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "debugger" => SyntaxKind::DebuggerKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "delete" => SyntaxKind::DeleteKeyword,
            "do" => SyntaxKind::DoKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "enum" => SyntaxKind::EnumKeyword,
            "export" => SyntaxKind::ExportKeyword,
            "extends" => SyntaxKind::ExtendsKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "finally" => SyntaxKind::FinallyKeyword,
            "for" => SyntaxKind::ForKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "if" => SyntaxKind::IfKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "in" => SyntaxKind::InKeyword,
            "instanceof" => SyntaxKind::InstanceOfKeyword,
            "new" => SyntaxKind::NewKeyword,
            "null" => SyntaxKind::NullKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "super" => SyntaxKind::SuperKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "this" => SyntaxKind::ThisKeyword,
            "throw" => SyntaxKind::ThrowKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "try" => SyntaxKind::TryKeyword,
            "typeof" => SyntaxKind::TypeOfKeyword,
            "var" => SyntaxKind::VarKeyword,
            "void" => SyntaxKind::VoidKeyword,
            "while" => SyntaxKind::WhileKeyword,
            "with" => SyntaxKind::WithKeyword,
            "async" => SyntaxKind::AsyncKeyword,
            "await" => SyntaxKind::AwaitKeyword,
            "get" => SyntaxKind::GetKeyword,
            "let" => SyntaxKind::LetKeyword,
            "of" => SyntaxKind::OfKeyword,
            "set" => SyntaxKind::SetKeyword,
            "static" => SyntaxKind::StaticKeyword,
            "target" => SyntaxKind::TargetKeyword,
            "yield" => SyntaxKind::YieldKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Get the source text for a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::CaseKeyword => "case",
            SyntaxKind::CatchKeyword => "catch",
            SyntaxKind::ClassKeyword => "class",
            SyntaxKind::ConstKeyword => "const",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::DebuggerKeyword => "debugger",
            SyntaxKind::DefaultKeyword => "default",
            SyntaxKind::DeleteKeyword => "delete",
            SyntaxKind::DoKeyword => "do",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::EnumKeyword => "enum",
            SyntaxKind::ExportKeyword => "export",
            SyntaxKind::ExtendsKeyword => "extends",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::FinallyKeyword => "finally",
            SyntaxKind::ForKeyword => "for",
            SyntaxKind::FunctionKeyword => "function",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::InKeyword => "in",
            SyntaxKind::InstanceOfKeyword => "instanceof",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::SuperKeyword => "super",
            SyntaxKind::SwitchKeyword => "switch",
            SyntaxKind::ThisKeyword => "this",
            SyntaxKind::ThrowKeyword => "throw",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::TryKeyword => "try",
            SyntaxKind::TypeOfKeyword => "typeof",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::VoidKeyword => "void",
            SyntaxKind::WhileKeyword => "while",
            SyntaxKind::WithKeyword => "with",
            SyntaxKind::AsyncKeyword => "async",
            SyntaxKind::AwaitKeyword => "await",
            SyntaxKind::GetKeyword => "get",
            SyntaxKind::LetKeyword => "let",
            SyntaxKind::OfKeyword => "of",
            SyntaxKind::SetKeyword => "set",
            SyntaxKind::StaticKeyword => "static",
            SyntaxKind::TargetKeyword => "target",
            SyntaxKind::YieldKeyword => "yield",
            _ => return None,
        };
        Some(text)
    }

    /// Get the source text for a punctuation kind.
    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AsteriskAsteriskToken => "**",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::BarBarEqualsToken => "||=",
            SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            _ => return None,
        };
        Some(text)
    }

    /// The operator spelling used by external formats (`"+"`, `"typeof"`, ...).
    pub fn operator_text(self) -> &'static str {
        self.punctuation_text()
            .or_else(|| self.keyword_text())
            .unwrap_or("")
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for word in ["break", "instanceof", "with", "async", "yield", "target"] {
            let kind = SyntaxKind::from_keyword(word).unwrap();
            assert_eq!(kind.keyword_text(), Some(word));
        }
        assert_eq!(SyntaxKind::from_keyword("interface"), None);
    }

    #[test]
    fn test_keyword_classes() {
        assert!(SyntaxKind::VarKeyword.is_reserved_word());
        assert!(!SyntaxKind::LetKeyword.is_reserved_word());
        assert!(SyntaxKind::LetKeyword.is_identifier_like());
        assert!(SyntaxKind::IfKeyword.is_identifier_name());
        assert!(!SyntaxKind::IfKeyword.is_identifier_like());
    }

    #[test]
    fn test_assignment_operator_range() {
        assert!(SyntaxKind::EqualsToken.is_assignment_operator());
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::Identifier.is_assignment_operator());
    }

    #[test]
    fn test_regex_allowed_after() {
        assert!(SyntaxKind::OpenParenToken.allows_regex_after());
        assert!(SyntaxKind::ReturnKeyword.allows_regex_after());
        assert!(SyntaxKind::EqualsToken.allows_regex_after());
        assert!(!SyntaxKind::Identifier.allows_regex_after());
        assert!(!SyntaxKind::CloseParenToken.allows_regex_after());
        assert!(!SyntaxKind::NumericLiteral.allows_regex_after());
    }

    #[test]
    fn test_operator_text() {
        assert_eq!(SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken.operator_text(), ">>>=");
        assert_eq!(SyntaxKind::TypeOfKeyword.operator_text(), "typeof");
    }
}
