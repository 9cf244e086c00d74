//! Flag types shared between the scanner and the parser.

bitflags::bitflags! {
    /// Facts about the most recently scanned token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                              = 0;
        const PRECEDING_LINE_BREAK              = 1 << 0;
        const UNTERMINATED                      = 1 << 1;
        const SCIENTIFIC                        = 1 << 2;
        const LEGACY_OCTAL                      = 1 << 3;
        const HEX_SPECIFIER                     = 1 << 4;
        const BINARY_SPECIFIER                  = 1 << 5;
        const OCTAL_SPECIFIER                   = 1 << 6;
        const CONTAINS_SEPARATOR                = 1 << 7;
        /// An identifier or keyword spelled with `\u` escapes.
        const UNICODE_ESCAPE                    = 1 << 8;
        /// A template chunk whose escapes cannot be cooked.
        const CONTAINS_INVALID_ESCAPE           = 1 << 9;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::LEGACY_OCTAL.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

bitflags::bitflags! {
    /// Grammar parameters and enclosing-construct facts tracked while parsing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContextFlags: u32 {
        const NONE                  = 0;
        /// `[In]` is off: a bare `in` ends the expression (for-statement heads).
        const DISALLOW_IN           = 1 << 0;
        /// Inside a generator body: `yield` is an operator.
        const YIELD                 = 1 << 1;
        /// Inside an async body: `await` is an operator.
        const AWAIT                 = 1 << 2;
        /// Inside a non-arrow function: `new.target` is legal.
        const IN_FUNCTION           = 1 << 3;
        /// Inside a method or field initializer: `super.x` is legal.
        const SUPER_PROPERTY        = 1 << 4;
        /// Inside a derived constructor: `super(...)` is legal.
        const SUPER_CALL            = 1 << 5;
        /// Inside a class body: private names may be referenced.
        const IN_CLASS              = 1 << 6;
        /// Parsing formal parameters: `yield`/`await` expressions are errors.
        const IN_PARAMETERS         = 1 << 7;
        /// Inside a class static block.
        const IN_STATIC_BLOCK       = 1 << 8;

        /// Facts that a new non-arrow function body resets.
        const FUNCTION_BOUNDARY = Self::YIELD.bits()
            | Self::AWAIT.bits()
            | Self::IN_FUNCTION.bits()
            | Self::SUPER_PROPERTY.bits()
            | Self::SUPER_CALL.bits()
            | Self::IN_PARAMETERS.bits()
            | Self::IN_STATIC_BLOCK.bits()
            | Self::DISALLOW_IN.bits();
    }
}
