//! The ECMAScript scanner.
//!
//! Converts source text into tokens on demand. The scanner works on bytes and
//! only decodes UTF-8 where a non-ASCII character can change the outcome
//! (identifiers, whitespace, line terminators), so every position it reports
//! is a byte offset.

use crate::char_codes::*;
use crate::token::TokenInfo;
use esfront_ast::syntax_kind::SyntaxKind;
use esfront_ast::types::TokenFlags;
use esfront_core::text::{idx_of, Span};
use esfront_diagnostics::{messages, DiagnosticMessage, ErrorList};

/// Saved scanner state for lookahead.
///
/// Also remembers how many errors had been collected, so restoring drops
/// diagnostics produced while scanning speculatively.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_raw: String,
    token_flags: TokenFlags,
    regex_allowed: bool,
    error_count: usize,
}

/// The scanner converts ECMAScript source text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    bytes: &'a [u8],
    /// Current position in the text (end of the current token).
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// Identifier name, cooked string or template value, numeric source,
    /// or regex pattern.
    token_value: String,
    /// Template raw value, or regex flags.
    token_raw: String,
    /// Token flags for the current token.
    token_flags: TokenFlags,
    /// Whether a `/` at the current position starts a regex literal.
    regex_allowed: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_raw: String::new(),
            token_flags: TokenFlags::NONE,
            regex_allowed: true,
        }
    }

    /// Skip a hashbang line (`#!/usr/bin/env node`) at the very beginning.
    /// Call this before the first `scan()` call.
    pub fn skip_hashbang(&mut self) {
        if self.pos == 0 && self.bytes.starts_with(b"#!") {
            self.pos = 2;
            while let Some(ch) = self.peek_char() {
                if is_line_break(ch) {
                    break;
                }
                self.pos += ch.len_utf8();
            }
        }
    }

    /// The full source text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the current token's cooked value.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Template raw text or regex flags of the current token.
    #[inline]
    pub fn token_raw(&self) -> &str {
        &self.token_raw
    }

    /// Get the 0-based start offset of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the 0-based end offset of the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// The current token's span as 1-based indices.
    #[inline]
    pub fn token_span(&self) -> Span {
        Span::new(idx_of(self.token_start), idx_of(self.pos))
    }

    /// The source text of the current token.
    #[inline]
    pub fn token_text(&self) -> &'a str {
        &self.text[self.token_start..self.pos]
    }

    /// Get the current token flags.
    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    /// Whether the current token was preceded by a line break.
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Whether a `/` scanned next would start a regular expression.
    #[inline]
    pub fn regex_allowed(&self) -> bool {
        self.regex_allowed
    }

    /// Get a TokenInfo snapshot of the current token.
    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            kind: self.token,
            span: self.token_span(),
            value: self.token_value.clone(),
            flags: self.token_flags,
        }
    }

    /// Save the full scanner state for lookahead.
    pub fn save_state(&self, errors: &ErrorList) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_raw: self.token_raw.clone(),
            token_flags: self.token_flags,
            regex_allowed: self.regex_allowed,
            error_count: errors.len(),
        }
    }

    /// Restore a saved state, dropping errors recorded since it was taken.
    pub fn restore_state(&mut self, state: ScannerState, errors: &mut ErrorList) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_raw = state.token_raw;
        self.token_flags = state.token_flags;
        self.regex_allowed = state.regex_allowed;
        errors.truncate(state.error_count);
    }

    /// Look ahead: save state, call f, restore state and return result.
    pub fn look_ahead<T>(
        &mut self,
        errors: &mut ErrorList,
        f: impl FnOnce(&mut Self, &mut ErrorList) -> T,
    ) -> T {
        let state = self.save_state(errors);
        let result = f(self, errors);
        self.restore_state(state, errors);
        result
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Decode the character at the current position.
    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn error(&self, errors: &mut ErrorList, offset: usize, message: &DiagnosticMessage) {
        errors.add(self.text, idx_of(offset), message, &[]);
    }

    /// Report an illegal token starting at `offset` and produce `Illegal`.
    fn illegal(&mut self, errors: &mut ErrorList, offset: usize, message: &DiagnosticMessage) -> SyntaxKind {
        self.error(errors, offset, message);
        SyntaxKind::Illegal
    }

    /// Skip whitespace and comments, setting token_flags for line breaks.
    fn skip_trivia(&mut self, errors: &mut ErrorList) {
        while let Some(byte) = self.current_byte() {
            match byte {
                LINE_FEED | CARRIAGE_RETURN => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' => match self.byte_at(1) {
                    Some(b'/') => self.skip_line_comment(),
                    Some(b'*') => self.skip_block_comment(errors),
                    _ => return,
                },
                _ if byte < 0x80 => return,
                _ => match self.peek_char() {
                    Some(ch) if is_line_break(ch) => {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                        self.pos += ch.len_utf8();
                    }
                    Some(ch) if is_white_space_single_line(ch) => self.pos += ch.len_utf8(),
                    _ => return,
                },
            }
        }
    }

    fn skip_line_comment(&mut self) {
        self.pos += 2;
        let rest = &self.bytes[self.pos..];
        let mut offset = 0;
        while let Some(found) = memchr::memchr3(LINE_FEED, CARRIAGE_RETURN, LINE_SEPARATOR_LEAD, &rest[offset..]) {
            let at = offset + found;
            if rest[at] != LINE_SEPARATOR_LEAD {
                self.pos += at;
                return;
            }
            let tail = &self.text[self.pos + at..];
            if tail.starts_with(LINE_SEPARATOR) || tail.starts_with(PARAGRAPH_SEPARATOR) {
                self.pos += at;
                return;
            }
            offset = at + 1;
        }
        self.pos = self.bytes.len();
    }

    fn skip_block_comment(&mut self, errors: &mut ErrorList) {
        let start = self.pos;
        let body_start = start + 2;
        let body_end = match memchr::memmem::find(&self.bytes[body_start..], b"*/") {
            Some(found) => {
                self.pos = body_start + found + 2;
                body_start + found
            }
            None => {
                self.error(errors, start, &messages::UNTERMINATED_COMMENT);
                self.pos = self.bytes.len();
                self.bytes.len()
            }
        };
        let body = &self.text[body_start..body_end];
        if memchr::memchr2(LINE_FEED, CARRIAGE_RETURN, body.as_bytes()).is_some()
            || body.contains(LINE_SEPARATOR)
            || body.contains(PARAGRAPH_SEPARATOR)
        {
            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self, errors: &mut ErrorList) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();
        self.token_raw.clear();

        self.skip_trivia(errors);
        self.token_start = self.pos;

        let Some(byte) = self.current_byte() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        let kind = match byte {
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b'~' => self.single(SyntaxKind::TildeToken),
            b':' => self.single(SyntaxKind::ColonToken),

            b'.' => self.scan_dot(errors),
            b'?' => self.scan_question(),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),
            b'=' => self.scan_equals(),
            b'!' => self.scan_exclamation(),
            b'+' => self.scan_plus(),
            b'-' => self.scan_minus(),
            b'*' => self.scan_asterisk(),
            b'/' if self.regex_allowed => self.scan_regex(errors),
            b'/' => self.scan_slash(),
            b'%' => self.with_equals(SyntaxKind::PercentToken, SyntaxKind::PercentEqualsToken),
            b'&' => self.scan_ampersand(),
            b'|' => self.scan_bar(),
            b'^' => self.with_equals(SyntaxKind::CaretToken, SyntaxKind::CaretEqualsToken),

            b'\'' | b'"' => self.scan_string_literal(byte, errors),
            b'`' => {
                self.pos += 1;
                self.scan_template_chunk(errors, true)
            }

            b'0'..=b'9' => self.scan_number(errors),
            b'#' => self.scan_private_identifier(errors),
            b'\\' => self.scan_identifier(errors),
            _ if is_ascii_identifier_part(byte) => self.scan_identifier(errors),
            _ if byte < 0x80 => {
                self.pos += 1;
                self.illegal(errors, self.token_start, &messages::INVALID_OR_UNEXPECTED_TOKEN)
            }
            _ => match self.peek_char() {
                Some(ch) if is_identifier_start(ch) => self.scan_identifier(errors),
                other => {
                    self.pos += other.map_or(1, char::len_utf8);
                    self.illegal(errors, self.token_start, &messages::INVALID_OR_UNEXPECTED_TOKEN)
                }
            },
        };

        // A name after `.` or `?.` is a property name, even when it spells a
        // keyword, so a following `/` divides.
        let is_property_name = matches!(self.token, SyntaxKind::DotToken | SyntaxKind::QuestionDotToken)
            && kind.is_identifier_name();
        self.token = kind;
        self.regex_allowed = !is_property_name && kind.allows_regex_after();
        kind
    }

    // ========================================================================
    // Punctuation
    // ========================================================================

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// `x` or `x=`.
    fn with_equals(&mut self, plain: SyntaxKind, assign: SyntaxKind) -> SyntaxKind {
        if self.byte_at(1) == Some(b'=') {
            self.pos += 2;
            assign
        } else {
            self.pos += 1;
            plain
        }
    }

    fn scan_dot(&mut self, errors: &mut ErrorList) -> SyntaxKind {
        if self.byte_at(1) == Some(b'.') && self.byte_at(2) == Some(b'.') {
            self.pos += 3;
            SyntaxKind::DotDotDotToken
        } else if self.byte_at(1).is_some_and(is_digit) {
            self.scan_number(errors)
        } else {
            self.pos += 1;
            SyntaxKind::DotToken
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'?') {
            if self.byte_at(2) == Some(b'=') {
                self.pos += 3;
                SyntaxKind::QuestionQuestionEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::QuestionQuestionToken
            }
        } else if self.byte_at(1) == Some(b'.') && !self.byte_at(2).is_some_and(is_digit) {
            self.pos += 2;
            SyntaxKind::QuestionDotToken
        } else {
            self.pos += 1;
            SyntaxKind::QuestionToken
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'<') {
            if self.byte_at(2) == Some(b'=') {
                self.pos += 3;
                SyntaxKind::LessThanLessThanEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::LessThanLessThanToken
            }
        } else {
            self.with_equals(SyntaxKind::LessThanToken, SyntaxKind::LessThanEqualsToken)
        }
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        match (self.byte_at(1), self.byte_at(2), self.byte_at(3)) {
            (Some(b'>'), Some(b'>'), Some(b'=')) => {
                self.pos += 4;
                SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
            }
            (Some(b'>'), Some(b'>'), _) => {
                self.pos += 3;
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            }
            (Some(b'>'), Some(b'='), _) => {
                self.pos += 3;
                SyntaxKind::GreaterThanGreaterThanEqualsToken
            }
            (Some(b'>'), _, _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanGreaterThanToken
            }
            _ => self.with_equals(SyntaxKind::GreaterThanToken, SyntaxKind::GreaterThanEqualsToken),
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'=') {
            if self.byte_at(2) == Some(b'=') {
                self.pos += 3;
                SyntaxKind::EqualsEqualsEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::EqualsEqualsToken
            }
        } else if self.byte_at(1) == Some(b'>') {
            self.pos += 2;
            SyntaxKind::EqualsGreaterThanToken
        } else {
            self.pos += 1;
            SyntaxKind::EqualsToken
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'=') {
            if self.byte_at(2) == Some(b'=') {
                self.pos += 3;
                SyntaxKind::ExclamationEqualsEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::ExclamationEqualsToken
            }
        } else {
            self.pos += 1;
            SyntaxKind::ExclamationToken
        }
    }

    fn scan_plus(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'+') {
            self.pos += 2;
            SyntaxKind::PlusPlusToken
        } else {
            self.with_equals(SyntaxKind::PlusToken, SyntaxKind::PlusEqualsToken)
        }
    }

    fn scan_minus(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'-') {
            self.pos += 2;
            SyntaxKind::MinusMinusToken
        } else {
            self.with_equals(SyntaxKind::MinusToken, SyntaxKind::MinusEqualsToken)
        }
    }

    fn scan_asterisk(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'*') {
            if self.byte_at(2) == Some(b'=') {
                self.pos += 3;
                SyntaxKind::AsteriskAsteriskEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::AsteriskAsteriskToken
            }
        } else {
            self.with_equals(SyntaxKind::AsteriskToken, SyntaxKind::AsteriskEqualsToken)
        }
    }

    fn scan_slash(&mut self) -> SyntaxKind {
        self.with_equals(SyntaxKind::SlashToken, SyntaxKind::SlashEqualsToken)
    }

    fn scan_ampersand(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'&') {
            if self.byte_at(2) == Some(b'=') {
                self.pos += 3;
                SyntaxKind::AmpersandAmpersandEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::AmpersandAmpersandToken
            }
        } else {
            self.with_equals(SyntaxKind::AmpersandToken, SyntaxKind::AmpersandEqualsToken)
        }
    }

    fn scan_bar(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'|') {
            if self.byte_at(2) == Some(b'=') {
                self.pos += 3;
                SyntaxKind::BarBarEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::BarBarToken
            }
        } else {
            self.with_equals(SyntaxKind::BarToken, SyntaxKind::BarEqualsToken)
        }
    }

    // ========================================================================
    // Strings and escapes
    // ========================================================================

    fn scan_string_literal(&mut self, quote: u8, errors: &mut ErrorList) -> SyntaxKind {
        self.pos += 1; // skip opening quote
        let mut value = String::new();
        let mut chunk_start = self.pos;
        loop {
            let Some(byte) = self.current_byte() else {
                value.push_str(&self.text[chunk_start..self.pos]);
                self.unterminated(errors, &messages::UNTERMINATED_STRING_LITERAL);
                break;
            };
            match byte {
                _ if byte == quote => {
                    value.push_str(&self.text[chunk_start..self.pos]);
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    value.push_str(&self.text[chunk_start..self.pos]);
                    self.scan_escape_sequence(errors, false, &mut value);
                    chunk_start = self.pos;
                }
                LINE_FEED | CARRIAGE_RETURN => {
                    value.push_str(&self.text[chunk_start..self.pos]);
                    self.unterminated(errors, &messages::UNTERMINATED_STRING_LITERAL);
                    break;
                }
                _ => self.pos += 1,
            }
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    fn unterminated(&mut self, errors: &mut ErrorList, message: &DiagnosticMessage) {
        self.error(errors, self.token_start, message);
        self.token_flags |= TokenFlags::UNTERMINATED;
    }

    /// Decode one escape sequence starting at the backslash into `out`.
    ///
    /// Returns false for an escape that cannot be cooked. Strings report it;
    /// templates only flag it, since tagged templates accept it.
    fn scan_escape_sequence(&mut self, errors: &mut ErrorList, in_template: bool, out: &mut String) -> bool {
        let escape_start = self.pos;
        self.pos += 1;
        let Some(byte) = self.current_byte() else {
            return true;
        };
        self.pos += 1;
        match byte {
            b'n' => out.push('\n'),
            b't' => out.push('\t'),
            b'r' => out.push('\r'),
            b'b' => out.push('\u{8}'),
            b'f' => out.push('\u{C}'),
            b'v' => out.push('\u{B}'),
            b'0' if !self.current_byte().is_some_and(is_digit) => out.push('\0'),
            b'0'..=b'7' => {
                if in_template {
                    return false;
                }
                // Legacy octal escape: at most three digits, value below 256.
                let max_len = if byte <= b'3' { 3 } else { 2 };
                let mut value = u32::from(byte - b'0');
                let mut len = 1;
                while len < max_len {
                    match self.current_byte() {
                        Some(digit) if is_octal_digit(digit) => {
                            value = value * 8 + u32::from(digit - b'0');
                            self.pos += 1;
                            len += 1;
                        }
                        _ => break,
                    }
                }
                out.push(char::from(value as u8));
            }
            b'8' | b'9' => {
                if in_template {
                    return false;
                }
                out.push(char::from(byte));
            }
            b'x' => match (self.current_byte().and_then(hex_value), self.byte_at(1).and_then(hex_value)) {
                (Some(hi), Some(lo)) => {
                    self.pos += 2;
                    out.push(char::from((hi * 16 + lo) as u8));
                }
                _ => {
                    if !in_template {
                        self.error(errors, escape_start, &messages::INVALID_HEXADECIMAL_ESCAPE_SEQUENCE);
                    }
                    return false;
                }
            },
            b'u' => match self.scan_unicode_escape_value() {
                Ok(code) => self.push_code_point(code, out),
                Err(message) => {
                    if !in_template {
                        self.error(errors, escape_start, message);
                    }
                    return false;
                }
            },
            // Line continuations contribute nothing.
            CARRIAGE_RETURN => {
                if self.current_byte() == Some(LINE_FEED) {
                    self.pos += 1;
                }
            }
            LINE_FEED => {}
            _ if byte >= 0x80 => {
                self.pos -= 1;
                if let Some(ch) = self.peek_char() {
                    self.pos += ch.len_utf8();
                    if ch != LINE_SEPARATOR && ch != PARAGRAPH_SEPARATOR {
                        out.push(ch);
                    }
                }
            }
            _ => out.push(char::from(byte)),
        }
        true
    }

    /// Scan the body of a `\u` escape (the position is just past the `u`).
    fn scan_unicode_escape_value(&mut self) -> Result<u32, &'static DiagnosticMessage> {
        if self.current_byte() == Some(b'{') {
            self.pos += 1;
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(digit) = self.current_byte().and_then(hex_value) {
                value = value.saturating_mul(16).saturating_add(digit);
                digits += 1;
                self.pos += 1;
            }
            if digits == 0 || self.current_byte() != Some(b'}') {
                return Err(&messages::INVALID_UNICODE_ESCAPE_SEQUENCE);
            }
            self.pos += 1;
            if value > 0x10FFFF {
                return Err(&messages::UNDEFINED_UNICODE_CODE_POINT);
            }
            Ok(value)
        } else {
            let mut value = 0;
            for offset in 0..4 {
                match self.byte_at(offset).and_then(hex_value) {
                    Some(digit) => value = value * 16 + digit,
                    None => return Err(&messages::INVALID_UNICODE_ESCAPE_SEQUENCE),
                }
            }
            self.pos += 4;
            Ok(value)
        }
    }

    /// Push a decoded code point, joining a `\uD8xx\uDCxx` surrogate pair.
    /// A lone surrogate becomes U+FFFD.
    fn push_code_point(&mut self, code: u32, out: &mut String) {
        if (0xD800..0xDC00).contains(&code) && self.current_byte() == Some(b'\\') && self.byte_at(1) == Some(b'u') {
            let save = self.pos;
            self.pos += 2;
            match self.scan_unicode_escape_value() {
                Ok(low) if (0xDC00..0xE000).contains(&low) => {
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                    return;
                }
                _ => self.pos = save,
            }
        }
        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Scan template characters up to the closing backtick or the next `${`.
    /// The position is just past the opening backtick or the `}` that closed
    /// a substitution.
    fn scan_template_chunk(&mut self, errors: &mut ErrorList, is_head: bool) -> SyntaxKind {
        let (closed, open) = if is_head {
            (SyntaxKind::NoSubstitutionTemplateLiteral, SyntaxKind::TemplateHead)
        } else {
            (SyntaxKind::TemplateTail, SyntaxKind::TemplateMiddle)
        };
        let mut cooked = String::new();
        let mut raw = String::new();
        let mut valid = true;
        let mut chunk_start = self.pos;

        let kind = loop {
            let Some(byte) = self.current_byte() else {
                let chunk = &self.text[chunk_start..self.pos];
                raw.push_str(chunk);
                cooked.push_str(chunk);
                self.unterminated(errors, &messages::UNTERMINATED_TEMPLATE_LITERAL);
                break closed;
            };
            match byte {
                b'`' | b'$' | b'\\' | CARRIAGE_RETURN => {
                    if byte == b'$' && self.byte_at(1) != Some(b'{') {
                        self.pos += 1;
                        continue;
                    }
                    let chunk = &self.text[chunk_start..self.pos];
                    raw.push_str(chunk);
                    cooked.push_str(chunk);
                    match byte {
                        b'`' => {
                            self.pos += 1;
                            break closed;
                        }
                        b'$' => {
                            self.pos += 2;
                            break open;
                        }
                        b'\\' => {
                            let escape_start = self.pos;
                            valid &= self.scan_escape_sequence(errors, true, &mut cooked);
                            let escape = &self.text[escape_start..self.pos];
                            raw.push_str(&escape.replace("\r\n", "\n").replace('\r', "\n"));
                        }
                        _ => {
                            // CR and CRLF are normalized to LF in both values.
                            self.pos += 1;
                            if self.current_byte() == Some(LINE_FEED) {
                                self.pos += 1;
                            }
                            raw.push('\n');
                            cooked.push('\n');
                        }
                    }
                    chunk_start = self.pos;
                }
                _ => self.pos += 1,
            }
        };

        if !valid {
            self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
            cooked.clear();
        }
        self.token_value = cooked;
        self.token_raw = raw;
        kind
    }

    /// Resume a template after a substitution: the current token must be the
    /// `}` that closed it. Produces a `TemplateMiddle` or `TemplateTail` whose
    /// span starts at that `}`.
    pub fn rescan_template_continuation(&mut self, errors: &mut ErrorList) -> SyntaxKind {
        debug_assert_eq!(self.token, SyntaxKind::CloseBraceToken);
        self.pos = self.token_start + 1;
        self.token_value.clear();
        self.token_raw.clear();
        self.token_flags &= TokenFlags::PRECEDING_LINE_BREAK;
        self.token = self.scan_template_chunk(errors, false);
        self.regex_allowed = self.token.allows_regex_after();
        self.token
    }

    // ========================================================================
    // Regular expressions
    // ========================================================================

    /// Rescan the current `/` or `/=` token as a regex literal. Called by the
    /// parser when a primary expression is expected.
    pub fn rescan_slash_token(&mut self, errors: &mut ErrorList) -> SyntaxKind {
        if matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            self.pos = self.token_start;
            self.token_value.clear();
            self.token_raw.clear();
            self.token = self.scan_regex(errors);
            self.regex_allowed = false;
        }
        self.token
    }

    /// Scan a regex literal starting at the opening slash. The pattern goes
    /// to `token_value` and the flags to `token_raw`.
    fn scan_regex(&mut self, errors: &mut ErrorList) -> SyntaxKind {
        self.pos += 1;
        let body_start = self.pos;
        let mut in_class = false;
        let body_end = loop {
            let Some(byte) = self.current_byte() else {
                self.unterminated(errors, &messages::UNTERMINATED_REGULAR_EXPRESSION);
                break None;
            };
            match byte {
                b'\\' => {
                    self.pos += 1;
                    if let Some(ch) = self.peek_char() {
                        if !is_line_break(ch) {
                            self.pos += ch.len_utf8();
                        }
                    }
                }
                LINE_FEED | CARRIAGE_RETURN => {
                    self.unterminated(errors, &messages::UNTERMINATED_REGULAR_EXPRESSION);
                    break None;
                }
                b'[' => {
                    in_class = true;
                    self.pos += 1;
                }
                b']' => {
                    in_class = false;
                    self.pos += 1;
                }
                b'/' if !in_class => {
                    self.pos += 1;
                    break Some(self.pos - 1);
                }
                _ if byte >= 0x80 => match self.peek_char() {
                    Some(ch) if is_line_break(ch) => {
                        self.unterminated(errors, &messages::UNTERMINATED_REGULAR_EXPRESSION);
                        break None;
                    }
                    Some(ch) => self.pos += ch.len_utf8(),
                    None => self.pos += 1,
                },
                _ => self.pos += 1,
            }
        };

        let Some(body_end) = body_end else {
            self.token_value = self.text[body_start..self.pos].to_string();
            return SyntaxKind::RegularExpressionLiteral;
        };
        self.token_value = self.text[body_start..body_end].to_string();

        let flags_start = self.pos;
        while let Some(ch) = self.peek_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        let flags = &self.text[flags_start..self.pos];
        if !is_valid_regex_flags(flags) {
            self.error(errors, flags_start, &messages::INVALID_REGULAR_EXPRESSION_FLAGS);
        }
        self.token_raw = flags.to_string();
        SyntaxKind::RegularExpressionLiteral
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self, errors: &mut ErrorList) -> SyntaxKind {
        let start = self.pos;

        if self.current_byte() == Some(b'0') {
            match self.byte_at(1) {
                Some(b'x' | b'X') => {
                    self.token_flags |= TokenFlags::HEX_SPECIFIER;
                    return self.scan_radix_number(start, is_hex_digit, errors);
                }
                Some(b'o' | b'O') => {
                    self.token_flags |= TokenFlags::OCTAL_SPECIFIER;
                    return self.scan_radix_number(start, is_octal_digit, errors);
                }
                Some(b'b' | b'B') => {
                    self.token_flags |= TokenFlags::BINARY_SPECIFIER;
                    return self.scan_radix_number(start, is_binary_digit, errors);
                }
                Some(b'0'..=b'9') => return self.scan_leading_zero_number(start, errors),
                _ => {}
            }
        }

        if self.current_byte() != Some(b'.') {
            self.scan_digits(is_digit, errors);
        }
        let integer = self.scan_fraction_and_exponent(errors);
        self.finish_number(start, integer, errors)
    }

    /// `0x`, `0o` and `0b` literals. At least one digit must follow the prefix.
    fn scan_radix_number(&mut self, start: usize, is_valid: fn(u8) -> bool, errors: &mut ErrorList) -> SyntaxKind {
        self.pos += 2;
        if self.scan_digits(is_valid, errors) == 0 {
            self.skip_identifier_parts();
            return self.illegal(errors, start, &messages::INVALID_OR_UNEXPECTED_TOKEN);
        }
        self.finish_number(start, true, errors)
    }

    /// `0777` is a legacy octal literal; `089` is a decimal with a leading zero.
    fn scan_leading_zero_number(&mut self, start: usize, errors: &mut ErrorList) -> SyntaxKind {
        self.pos += 1;
        let mut octal = true;
        while let Some(byte) = self.current_byte() {
            if !is_digit(byte) {
                break;
            }
            octal &= is_octal_digit(byte);
            self.pos += 1;
        }
        if octal {
            self.token_flags |= TokenFlags::LEGACY_OCTAL;
            return self.finish_number(start, false, errors);
        }
        self.scan_fraction_and_exponent(errors);
        self.finish_number(start, false, errors)
    }

    /// Scan an optional `.digits` and exponent. Returns true when neither was
    /// present, which is when a BigInt suffix may follow.
    fn scan_fraction_and_exponent(&mut self, errors: &mut ErrorList) -> bool {
        let mut integer = true;
        if self.current_byte() == Some(b'.') {
            self.pos += 1;
            integer = false;
            if self.current_byte().is_some_and(|b| is_digit(b) || b == b'_') {
                self.scan_digits(is_digit, errors);
            }
        }
        if matches!(self.current_byte(), Some(b'e' | b'E')) {
            let save = self.pos;
            self.pos += 1;
            if matches!(self.current_byte(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.current_byte().is_some_and(is_digit) {
                self.scan_digits(is_digit, errors);
                self.token_flags |= TokenFlags::SCIENTIFIC;
                integer = false;
            } else {
                // Leave the `e` to be rejected as an identifier start.
                self.pos = save;
            }
        }
        integer
    }

    /// Scan digits with `_` separators. A separator must sit between two
    /// digits. Returns the number of digits.
    fn scan_digits(&mut self, is_valid: fn(u8) -> bool, errors: &mut ErrorList) -> usize {
        let mut count = 0;
        let mut after_separator = false;
        loop {
            match self.current_byte() {
                Some(b'_') => {
                    self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                    if count == 0 || after_separator {
                        self.error(errors, self.pos, &messages::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE);
                    }
                    after_separator = true;
                    self.pos += 1;
                }
                Some(byte) if is_valid(byte) => {
                    count += 1;
                    after_separator = false;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        if after_separator {
            self.error(errors, self.pos - 1, &messages::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE);
        }
        count
    }

    /// Take an optional BigInt suffix and reject an identifier start or digit
    /// directly after the literal (`3in`, `1x`, `0b12`).
    fn finish_number(&mut self, start: usize, bigint_allowed: bool, errors: &mut ErrorList) -> SyntaxKind {
        let mut kind = SyntaxKind::NumericLiteral;
        if bigint_allowed && self.current_byte() == Some(b'n') {
            self.pos += 1;
            kind = SyntaxKind::BigIntLiteral;
        }
        if let Some(ch) = self.peek_char() {
            if is_identifier_start(ch) || ch.is_ascii_digit() || ch == '\\' {
                self.skip_identifier_parts();
                return self.illegal(errors, start, &messages::INVALID_OR_UNEXPECTED_TOKEN);
            }
        }
        self.token_value = self.text[start..self.pos].to_string();
        kind
    }

    fn skip_identifier_parts(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !is_identifier_part(ch) && ch != '\\' {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self, errors: &mut ErrorList) -> SyntaxKind {
        let start = self.pos;
        loop {
            match self.current_byte() {
                Some(byte) if is_ascii_identifier_part(byte) => self.pos += 1,
                Some(b'\\') => return self.scan_escaped_identifier(start, errors),
                Some(byte) if byte >= 0x80 => match self.peek_char() {
                    Some(ch) if is_identifier_part(ch) => self.pos += ch.len_utf8(),
                    _ => break,
                },
                _ => break,
            }
        }
        let text = &self.text[start..self.pos];
        self.token_value.push_str(text);
        SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }

    /// Slow path for identifiers containing `\uXXXX` or `\u{X}` escapes.
    ///
    /// A reserved word spelled with escapes becomes `EscapedReservedWord`;
    /// an escaped contextual keyword is a plain identifier.
    fn scan_escaped_identifier(&mut self, start: usize, errors: &mut ErrorList) -> SyntaxKind {
        let mut name = String::from(&self.text[start..self.pos]);
        loop {
            match self.current_byte() {
                Some(b'\\') => {
                    let escape_start = self.pos;
                    if self.byte_at(1) != Some(b'u') {
                        self.pos += 1;
                        return self.illegal(errors, escape_start, &messages::INVALID_UNICODE_ESCAPE_SEQUENCE);
                    }
                    self.pos += 2;
                    let ch = match self.scan_unicode_escape_value() {
                        Ok(code) => char::from_u32(code),
                        Err(message) => return self.illegal(errors, escape_start, message),
                    };
                    let valid = ch.filter(|&ch| {
                        if name.is_empty() {
                            is_identifier_start(ch)
                        } else {
                            is_identifier_part(ch)
                        }
                    });
                    match valid {
                        Some(ch) => name.push(ch),
                        None => {
                            return self.illegal(errors, escape_start, &messages::INVALID_UNICODE_ESCAPE_SEQUENCE)
                        }
                    }
                }
                Some(byte) if is_ascii_identifier_part(byte) => {
                    name.push(char::from(byte));
                    self.pos += 1;
                }
                Some(byte) if byte >= 0x80 => match self.peek_char() {
                    Some(ch) if is_identifier_part(ch) => {
                        name.push(ch);
                        self.pos += ch.len_utf8();
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        self.token_flags |= TokenFlags::UNICODE_ESCAPE;
        let kind = match SyntaxKind::from_keyword(&name) {
            Some(keyword) if keyword.is_reserved_word() => SyntaxKind::EscapedReservedWord,
            _ => SyntaxKind::Identifier,
        };
        self.token_value = name;
        kind
    }

    /// `#name`. The value excludes the hash.
    fn scan_private_identifier(&mut self, errors: &mut ErrorList) -> SyntaxKind {
        self.pos += 1;
        match self.peek_char() {
            Some(ch) if is_identifier_start(ch) || ch == '\\' => match self.scan_identifier(errors) {
                SyntaxKind::Illegal => SyntaxKind::Illegal,
                _ => SyntaxKind::PrivateIdentifier,
            },
            _ => self.illegal(errors, self.token_start, &messages::INVALID_OR_UNEXPECTED_TOKEN),
        }
    }
}

/// Each flag at most once, and `u` and `v` are mutually exclusive.
fn is_valid_regex_flags(flags: &str) -> bool {
    let mut seen = 0u32;
    for byte in flags.bytes() {
        let bit = match byte {
            b'd' => 1,
            b'g' => 2,
            b'i' => 4,
            b'm' => 8,
            b's' => 16,
            b'u' => 32,
            b'y' => 64,
            b'v' => 128,
            _ => return false,
        };
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    seen & (32 | 128) != (32 | 128)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(text);
        let mut errors = ErrorList::new();
        let mut out = Vec::new();
        loop {
            let kind = scanner.scan(&mut errors);
            if kind == SyntaxKind::EndOfFileToken {
                break;
            }
            out.push(kind);
        }
        assert!(errors.is_empty(), "unexpected errors: {}", errors);
        out
    }

    #[test]
    fn test_scan_punctuation() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("( ) { } [ ] ; , : ... ?. ? ??"),
            vec![
                OpenParenToken,
                CloseParenToken,
                OpenBraceToken,
                CloseBraceToken,
                OpenBracketToken,
                CloseBracketToken,
                SemicolonToken,
                CommaToken,
                ColonToken,
                DotDotDotToken,
                QuestionDotToken,
                QuestionToken,
                QuestionQuestionToken,
            ]
        );
    }

    #[test]
    fn test_scan_shift_operators() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("a > b >= c >> d >>= e >>> f >>>= g"),
            vec![
                Identifier,
                GreaterThanToken,
                Identifier,
                GreaterThanEqualsToken,
                Identifier,
                GreaterThanGreaterThanToken,
                Identifier,
                GreaterThanGreaterThanEqualsToken,
                Identifier,
                GreaterThanGreaterThanGreaterThanToken,
                Identifier,
                GreaterThanGreaterThanGreaterThanEqualsToken,
                Identifier,
            ]
        );
    }

    #[test]
    fn test_question_dot_before_digit_is_conditional() {
        use SyntaxKind::*;
        assert_eq!(kinds("a?.5:1"), vec![Identifier, QuestionToken, NumericLiteral, ColonToken, NumericLiteral]);
    }

    #[test]
    fn test_regex_after_operator_division_after_operand() {
        use SyntaxKind::*;
        assert_eq!(kinds("x = /ab+c/g"), vec![Identifier, EqualsToken, RegularExpressionLiteral]);
        assert_eq!(kinds("a / b / c"), vec![Identifier, SlashToken, Identifier, SlashToken, Identifier]);
        assert_eq!(kinds("(a) / 2"), vec![OpenParenToken, Identifier, CloseParenToken, SlashToken, NumericLiteral]);
    }

    #[test]
    fn test_regex_pattern_and_flags() {
        let mut scanner = Scanner::new("/[/]\\//gi");
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_value(), "[/]\\/");
        assert_eq!(scanner.token_raw(), "gi");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_rescan_slash_token() {
        let mut scanner = Scanner::new(") /x/");
        let mut errors = ErrorList::new();
        scanner.scan(&mut errors);
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::SlashToken);
        assert_eq!(scanner.rescan_slash_token(&mut errors), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_value(), "x");
        assert_eq!(scanner.token_text(), "/x/");
    }

    #[test]
    fn test_invalid_regex_flags() {
        let mut scanner = Scanner::new("/a/gg");
        let mut errors = ErrorList::new();
        scanner.scan(&mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].message, "Invalid regular expression flags");
        assert_eq!(errors.errors()[0].offset, 3);
    }

    #[test]
    fn test_line_break_flag() {
        let mut scanner = Scanner::new("a /* x\n */ b // c\u{2028}d");
        let mut errors = ErrorList::new();
        scanner.scan(&mut errors);
        assert!(!scanner.has_preceding_line_break());
        scanner.scan(&mut errors);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.token_value(), "b");
        scanner.scan(&mut errors);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.token_value(), "d");
    }

    #[test]
    fn test_unterminated_comment() {
        let mut scanner = Scanner::new("a /* never closed");
        let mut errors = ErrorList::new();
        scanner.scan(&mut errors);
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::EndOfFileToken);
        assert_eq!(errors.first().map(|e| e.offset), Some(2));
    }

    #[test]
    fn test_string_escapes() {
        let mut scanner = Scanner::new(r#"'a\n\x41B\u{1F600}\101\
b'"#);
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "a\nAB\u{1F600}Ab");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let mut scanner = Scanner::new(r#""\uD83D\uDE00\uD800""#);
        let mut errors = ErrorList::new();
        scanner.scan(&mut errors);
        assert_eq!(scanner.token_value(), "\u{1F600}\u{FFFD}");
    }

    #[test]
    fn test_invalid_escape_is_recoverable() {
        let mut scanner = Scanner::new(r#""\xZ" x"#);
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::StringLiteral);
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Identifier);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].message, "Invalid hexadecimal escape sequence");
        assert_eq!(errors.errors()[0].offset, 1);
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = Scanner::new("'abc\nx");
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::StringLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::UNTERMINATED));
        assert_eq!(scanner.token_value(), "abc");
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Identifier);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_template_continuation() {
        let mut scanner = Scanner::new("`a${x}b\r\nc${y}d`");
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_continuation(&mut errors), SyntaxKind::TemplateMiddle);
        assert_eq!(scanner.token_value(), "b\nc");
        assert_eq!(scanner.token_raw(), "b\nc");
        assert_eq!(scanner.token_text(), "}b\r\nc${");
        scanner.scan(&mut errors);
        scanner.scan(&mut errors);
        assert_eq!(scanner.rescan_template_continuation(&mut errors), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), "d");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_template_invalid_escape_has_no_cooked_value() {
        let mut scanner = Scanner::new(r"`\unicode`");
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::NoSubstitutionTemplateLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_INVALID_ESCAPE));
        assert_eq!(scanner.token_raw(), r"\unicode");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_number_formats() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("42 3.14 .5 1e10 0xff 0b1010 0o777 0777 089 1_000 42n 0xFFn"),
            vec![
                NumericLiteral,
                NumericLiteral,
                NumericLiteral,
                NumericLiteral,
                NumericLiteral,
                NumericLiteral,
                NumericLiteral,
                NumericLiteral,
                NumericLiteral,
                NumericLiteral,
                BigIntLiteral,
                BigIntLiteral,
            ]
        );
    }

    #[test]
    fn test_number_followed_by_identifier_is_illegal() {
        let mut scanner = Scanner::new("const 1x = 5;");
        let mut errors = ErrorList::new();
        scanner.scan(&mut errors);
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Illegal);
        assert_eq!(scanner.token_text(), "1x");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].offset, 6);
        assert_eq!(errors.errors()[0].message, "Invalid or unexpected token");
    }

    #[test]
    fn test_misplaced_separators() {
        for (text, offset) in [("1__0", 2), ("1_", 1), ("0x_1", 2), ("1._5", 2)] {
            let mut scanner = Scanner::new(text);
            let mut errors = ErrorList::new();
            scanner.scan(&mut errors);
            assert_eq!(errors.first().map(|e| e.offset), Some(offset), "{}", text);
            assert_eq!(errors.errors()[0].message, "Numeric separators are not allowed here");
        }
    }

    #[test]
    fn test_bigint_not_allowed_after_fraction() {
        let mut scanner = Scanner::new("1.5n");
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Illegal);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_keywords_and_contextual_keywords() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("var let async of yield instanceof"),
            vec![VarKeyword, LetKeyword, AsyncKeyword, OfKeyword, YieldKeyword, InstanceOfKeyword]
        );
    }

    #[test]
    fn test_escaped_identifiers() {
        let mut scanner = Scanner::new(r"\u0061b v\u{61}r l\u0065t");
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "ab");
        assert!(scanner.token_flags().contains(TokenFlags::UNICODE_ESCAPE));
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::EscapedReservedWord);
        assert_eq!(scanner.token_value(), "var");
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "let");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_invalid_identifier_escape() {
        let mut scanner = Scanner::new(r"\u0031abc");
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Illegal);
        assert_eq!(errors.errors()[0].offset, 0);
        assert_eq!(errors.errors()[0].message, "Invalid Unicode escape sequence");
    }

    #[test]
    fn test_unicode_identifier_offsets() {
        let mut scanner = Scanner::new("été = ü");
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Identifier);
        assert_eq!((scanner.token_start(), scanner.token_end()), (0, 5));
        scanner.scan(&mut errors);
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Identifier);
        assert_eq!(scanner.token_span(), Span::new(9, 11));
    }

    #[test]
    fn test_private_identifier() {
        let mut scanner = Scanner::new("#count # x");
        let mut errors = ErrorList::new();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.token_value(), "count");
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Illegal);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_hashbang() {
        let mut scanner = Scanner::new("#!/usr/bin/env node\nlet x = 1;");
        let mut errors = ErrorList::new();
        scanner.skip_hashbang();
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::LetKeyword);
        assert!(scanner.has_preceding_line_break());
    }

    #[test]
    fn test_illegal_character() {
        let mut scanner = Scanner::new("a @ b");
        let mut errors = ErrorList::new();
        scanner.scan(&mut errors);
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Illegal);
        assert_eq!(scanner.scan(&mut errors), SyntaxKind::Identifier);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].offset, 2);
    }

    #[test]
    fn test_look_ahead_rolls_back_errors() {
        let mut scanner = Scanner::new("x '\\x' y");
        let mut errors = ErrorList::new();
        scanner.scan(&mut errors);
        let next = scanner.look_ahead(&mut errors, |s, errors| {
            s.scan(errors);
            s.scan(errors)
        });
        assert_eq!(next, SyntaxKind::Identifier);
        assert!(errors.is_empty());
        assert_eq!(scanner.token(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "x");
    }
}
