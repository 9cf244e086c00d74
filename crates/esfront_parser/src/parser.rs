//! The ECMAScript parser: state, token management, statements and declarations.
//!
//! This is a recursive descent parser over the scanner's token stream. It
//! builds an owned tree and stops at the first syntax error: every parse
//! function returns `PResult`, and an `Err(Abort)` unwinds straight to
//! `parse_program` with the diagnostic already recorded. Nothing is
//! backtracked after an error, so saved context is only restored on the
//! success path.
//!
//! Expressions live in `expression.rs`; the cover grammar that turns
//! expressions into patterns lives in `cover.rs`.

use esfront_ast::node::*;
use esfront_ast::syntax_kind::SyntaxKind;
use esfront_ast::types::ContextFlags;
use esfront_core::text::{idx_of, Span};
use esfront_diagnostics::{messages, DiagnosticMessage, ErrorList};
use esfront_scanner::Scanner;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, debug_span, trace};

use crate::utilities::{is_iteration_start, unexpected_token_message};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
///
/// One nested expression level charges about two units (the assignment
/// expression and its operand), so this allows some fifty levels of
/// bracketed nesting, which fits the default 2 MiB thread stack even in
/// unoptimized builds.
const MAX_RECURSION_DEPTH: u32 = 100;

/// Marker for an aborted parse. The diagnostic is already in the error list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Abort;

pub(crate) type PResult<T> = Result<T, Abort>;

/// A label in scope for `break` and `continue`.
#[derive(Debug)]
pub(crate) struct Label {
    pub(crate) name: String,
    /// Whether the labeled statement is a loop, so `continue label` is legal.
    pub(crate) is_loop: bool,
    /// Offset of the labeled statement's body.
    pub(crate) body_start: usize,
}

/// Statement legality facts scoped to one function body.
///
/// Saved and replaced at every function, arrow, static block and field
/// initializer boundary.
#[derive(Debug, Default)]
pub(crate) struct FunctionState {
    pub(crate) return_allowed: bool,
    pub(crate) labels: Vec<Label>,
    pub(crate) iteration_depth: u32,
    /// Enclosing loops plus enclosing `switch` statements.
    pub(crate) breakable_depth: u32,
    /// Offset and keyword of the first `yield` or `await` expression parsed
    /// since the innermost pending arrow cover opened.
    pub(crate) suspension: Option<(usize, SyntaxKind)>,
}

impl FunctionState {
    pub(crate) fn function_body() -> Self {
        Self {
            return_allowed: true,
            ..Self::default()
        }
    }
}

/// The parser produces a `Program` from ECMAScript source text.
pub struct Parser<'a> {
    pub(crate) source: &'a str,
    pub(crate) scanner: Scanner<'a>,
    pub(crate) errors: ErrorList,
    pub(crate) context: ContextFlags,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    pub(crate) recursion_depth: u32,
    /// End offset of the last consumed token; closes node spans.
    pub(crate) prev_token_end: usize,
    /// Offset of the earliest `name = value` shorthand seen in an object
    /// literal that may still become a pattern.
    pub(crate) cover_init: Option<usize>,
    /// Spans of expressions that were written inside parentheses.
    pub(crate) parenthesized: FxHashSet<Span>,
    /// Array literal start offset to the offset of a comma that follows its
    /// final spread element.
    pub(crate) spread_trailing_commas: FxHashMap<usize, usize>,
    pub(crate) function_state: FunctionState,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            scanner: Scanner::new(source),
            errors: ErrorList::new(),
            context: ContextFlags::NONE,
            recursion_depth: 0,
            prev_token_end: 0,
            cover_init: None,
            parenthesized: FxHashSet::default(),
            spread_trailing_commas: FxHashMap::default(),
            function_state: FunctionState::default(),
        }
    }

    /// Parse the whole source as a script.
    ///
    /// Any recorded error, lexical or syntax, fails the parse.
    pub fn parse_program(mut self) -> Result<Program, ErrorList> {
        let _span = debug_span!("parse_program", bytes = self.source.len()).entered();
        self.scanner.skip_hashbang();
        self.next_token();

        let result = self.parse_statement_list(SyntaxKind::EndOfFileToken);
        match result {
            Ok(body) if self.errors.is_empty() => {
                let span = match (body.first(), body.last()) {
                    (Some(first), Some(last)) => first.span().to(last.span()),
                    _ => Span::unset(),
                };
                debug!(statements = body.len(), "parsed program");
                Ok(Program { span, body })
            }
            _ => {
                debug!(errors = self.errors.len(), "parse failed");
                Err(self.errors)
            }
        }
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn token_start(&self) -> usize {
        self.scanner.token_start()
    }

    #[inline]
    pub(crate) fn has_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.scanner.scan(&mut self.errors)
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> PResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            self.unexpected()
        }
    }

    /// Run `f` on a throwaway copy of the token position; lexical errors it
    /// records are dropped.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.scanner.save_state(&self.errors);
        let prev_token_end = self.prev_token_end;
        let result = f(self);
        self.scanner.restore_state(state, &mut self.errors);
        self.prev_token_end = prev_token_end;
        result
    }

    /// The kind of the next token and whether a line break precedes it.
    pub(crate) fn peek_token(&mut self) -> (SyntaxKind, bool) {
        self.look_ahead(|p| {
            p.next_token();
            (p.token(), p.has_line_break())
        })
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    pub(crate) fn finish_span(&self, start: usize) -> Span {
        Span::new(idx_of(start), idx_of(self.prev_token_end))
    }

    /// Consume a `;`, or accept its automatic insertion before `}`, the end of
    /// input or a line break.
    pub(crate) fn parse_semicolon(&mut self) -> PResult<()> {
        if self.eat(SyntaxKind::SemicolonToken) {
            return Ok(());
        }
        if matches!(self.token(), SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken) || self.has_line_break() {
            return Ok(());
        }
        self.unexpected()
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Record a syntax error at `offset` and abort.
    pub(crate) fn error_at<T>(&mut self, offset: usize, message: &DiagnosticMessage, args: &[&str]) -> PResult<T> {
        self.errors.add(self.source, idx_of(offset), message, args);
        debug!(offset, message = message.message, "syntax error");
        Err(Abort)
    }

    /// Record a syntax error at the current token and abort.
    pub(crate) fn error<T>(&mut self, message: &DiagnosticMessage, args: &[&str]) -> PResult<T> {
        self.error_at(self.token_start(), message, args)
    }

    /// Reject the current token.
    ///
    /// An `Illegal` token already carries its lexical error, so it aborts
    /// without a second diagnostic.
    pub(crate) fn unexpected<T>(&mut self) -> PResult<T> {
        let kind = self.token();
        if kind == SyntaxKind::Illegal {
            trace!(offset = self.token_start(), "abort on illegal token");
            return Err(Abort);
        }
        let (message, with_text) = unexpected_token_message(kind);
        let text = self.scanner.token_text();
        if with_text {
            self.error(message, &[text])
        } else {
            self.error(message, &[])
        }
    }

    pub(crate) fn enter_recursion(&mut self) -> PResult<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            return self.error(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn leave_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // ========================================================================
    // Context
    // ========================================================================

    /// Run `f` with `[In]` turned on.
    pub(crate) fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let saved = self.context;
        self.context.remove(ContextFlags::DISALLOW_IN);
        let result = f(self)?;
        self.context = saved;
        Ok(result)
    }

    /// Run `f` with `[In]` turned off, as in a `for` head.
    pub(crate) fn disallow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let saved = self.context;
        self.context.insert(ContextFlags::DISALLOW_IN);
        let result = f(self)?;
        self.context = saved;
        Ok(result)
    }

    /// The context for a new non-arrow function body.
    pub(crate) fn function_context(&self, is_async: bool, is_generator: bool) -> ContextFlags {
        let mut context = (self.context - ContextFlags::FUNCTION_BOUNDARY) | ContextFlags::IN_FUNCTION;
        context.set(ContextFlags::YIELD, is_generator);
        context.set(ContextFlags::AWAIT, is_async);
        context
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Reject `yield` inside generators and `await` inside async functions
    /// where an identifier is expected.
    pub(crate) fn check_identifier(&mut self, kind: SyntaxKind, offset: usize) -> PResult<()> {
        let reserved = match kind {
            SyntaxKind::YieldKeyword => self.context.contains(ContextFlags::YIELD),
            SyntaxKind::AwaitKeyword => self.context.contains(ContextFlags::AWAIT),
            _ => false,
        };
        if reserved {
            return self.error_at(offset, &messages::UNEXPECTED_RESERVED_WORD, &[]);
        }
        Ok(())
    }

    /// Consume the current token as an identifier without checks.
    pub(crate) fn take_identifier(&mut self) -> Identifier {
        let id = Identifier::new(self.scanner.token_span(), self.scanner.token_value());
        self.next_token();
        id
    }

    /// Parse an identifier reference or binding identifier.
    pub(crate) fn parse_identifier(&mut self) -> PResult<Identifier> {
        let kind = self.token();
        if kind == SyntaxKind::EscapedReservedWord {
            return self.error(&messages::KEYWORD_MUST_NOT_CONTAIN_ESCAPED_CHARACTERS, &[]);
        }
        if !kind.is_identifier_like() {
            return self.unexpected();
        }
        self.check_identifier(kind, self.token_start())?;
        Ok(self.take_identifier())
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse statements until `terminator`, which is left unconsumed.
    pub(crate) fn parse_statement_list(&mut self, terminator: SyntaxKind) -> PResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while self.token() != terminator {
            if self.token() == SyntaxKind::EndOfFileToken {
                return self.unexpected();
            }
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    pub(crate) fn parse_statement(&mut self) -> PResult<Statement> {
        self.enter_recursion()?;
        let statement = self.parse_statement_worker()?;
        self.leave_recursion();
        Ok(statement)
    }

    fn parse_statement_worker(&mut self) -> PResult<Statement> {
        match self.token() {
            SyntaxKind::OpenBraceToken => Ok(Statement::Block(self.parse_block()?)),
            SyntaxKind::SemicolonToken => {
                let start = self.token_start();
                self.next_token();
                Ok(Statement::Empty(self.finish_span(start)))
            }
            SyntaxKind::VarKeyword => self.parse_variable_statement(VariableKind::Var),
            SyntaxKind::ConstKeyword => self.parse_variable_statement(VariableKind::Const),
            SyntaxKind::LetKeyword if self.is_let_declaration() => self.parse_variable_statement(VariableKind::Let),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(false),
            SyntaxKind::AsyncKeyword if self.is_async_function() => self.parse_function_declaration(true),
            SyntaxKind::ClassKeyword => {
                let class = self.parse_class(true)?;
                Ok(Statement::ClassDeclaration(Box::new(class)))
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::BreakKeyword => self.parse_break_statement(),
            SyntaxKind::ContinueKeyword => self.parse_continue_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::DebuggerKeyword => {
                let start = self.token_start();
                self.next_token();
                self.parse_semicolon()?;
                Ok(Statement::Debugger(self.finish_span(start)))
            }
            kind if kind.is_identifier_like() && self.peek_token().0 == SyntaxKind::ColonToken => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    pub(crate) fn parse_block(&mut self) -> PResult<Block> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let body = self.parse_statement_list(SyntaxKind::CloseBraceToken)?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Block {
            span: self.finish_span(start),
            body,
            scope_context: 0,
        })
    }

    fn parse_expression_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        let expression = self.allow_in(Self::parse_expression)?;
        self.parse_semicolon()?;
        Ok(Statement::Expression(ExpressionStatement {
            span: self.finish_span(start),
            expression,
        }))
    }

    fn parse_if_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        self.expect(SyntaxKind::OpenParenToken)?;
        let test = self.allow_in(Self::parse_expression)?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let consequent = Box::new(self.parse_substatement()?);
        let alternate = if self.eat(SyntaxKind::ElseKeyword) {
            Some(Box::new(self.parse_substatement()?))
        } else {
            None
        };
        Ok(Statement::If(IfStatement {
            span: self.finish_span(start),
            test,
            consequent,
            alternate,
        }))
    }

    /// A position that holds exactly one statement: an `if` branch, a loop,
    /// `with` or labelled body. Lexical declarations cannot appear here, so
    /// `let` is either an error or the start of an expression.
    fn parse_substatement(&mut self) -> PResult<Statement> {
        match self.token() {
            SyntaxKind::ConstKeyword | SyntaxKind::ClassKeyword => self.unexpected(),
            SyntaxKind::LetKeyword => {
                let (next, line_break) = self.peek_token();
                let declares = next == SyntaxKind::OpenBracketToken
                    || (!line_break && (next.is_identifier_like() || next == SyntaxKind::OpenBraceToken));
                if declares {
                    return self.unexpected();
                }
                if next == SyntaxKind::ColonToken {
                    return self.parse_statement();
                }
                self.enter_recursion()?;
                let statement = self.parse_expression_statement()?;
                self.leave_recursion();
                Ok(statement)
            }
            _ => self.parse_statement(),
        }
    }

    /// The body of a loop: `break` and `continue` become legal.
    fn parse_loop_body(&mut self) -> PResult<Box<Statement>> {
        self.function_state.iteration_depth += 1;
        self.function_state.breakable_depth += 1;
        let body = self.parse_substatement()?;
        self.function_state.iteration_depth -= 1;
        self.function_state.breakable_depth -= 1;
        Ok(Box::new(body))
    }

    fn parse_while_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        self.expect(SyntaxKind::OpenParenToken)?;
        let test = self.allow_in(Self::parse_expression)?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let body = self.parse_loop_body()?;
        Ok(Statement::While(WhileStatement {
            span: self.finish_span(start),
            test,
            body,
        }))
    }

    fn parse_do_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        let body = self.parse_loop_body()?;
        self.expect(SyntaxKind::WhileKeyword)?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let test = self.allow_in(Self::parse_expression)?;
        self.expect(SyntaxKind::CloseParenToken)?;
        // A semicolon is always inserted after do-while.
        self.eat(SyntaxKind::SemicolonToken);
        Ok(Statement::DoWhile(DoWhileStatement {
            span: self.finish_span(start),
            body,
            test,
        }))
    }

    fn parse_for_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        let is_await = self.token() == SyntaxKind::AwaitKeyword && self.context.contains(ContextFlags::AWAIT);
        if is_await {
            self.next_token();
        }
        self.expect(SyntaxKind::OpenParenToken)?;

        let declaration_kind = match self.token() {
            SyntaxKind::VarKeyword => Some(VariableKind::Var),
            SyntaxKind::ConstKeyword => Some(VariableKind::Const),
            SyntaxKind::LetKeyword if self.is_let_declaration() => Some(VariableKind::Let),
            _ => None,
        };

        let init = if let Some(kind) = declaration_kind {
            let declaration = self.disallow_in(|p| p.parse_variable_declaration(kind, true))?;
            if self.is_for_in_of_keyword() {
                self.check_for_in_of_declaration(&declaration)?;
                return self.parse_for_in_of_rest(start, is_await, ForHead::VariableDeclaration(declaration));
            }
            for declarator in &declaration.declarations {
                self.check_declarator_initializer(kind, declarator)?;
            }
            Some(ForInit::VariableDeclaration(declaration))
        } else if self.token() == SyntaxKind::SemicolonToken {
            None
        } else {
            let outer = self.cover_init.take();
            let expression = self.disallow_in(Self::parse_expression_or_cover)?;
            if self.is_for_in_of_keyword() {
                self.cover_init = outer;
                let loop_name = self.loop_name();
                let target = self.expression_to_for_target(expression, loop_name)?;
                return self.parse_for_in_of_rest(start, is_await, ForHead::Pattern(target));
            }
            self.check_cover_init()?;
            self.cover_init = outer;
            Some(ForInit::Expression(expression))
        };

        if is_await {
            return self.unexpected();
        }
        self.expect(SyntaxKind::SemicolonToken)?;
        let test = if self.token() == SyntaxKind::SemicolonToken {
            None
        } else {
            Some(self.allow_in(Self::parse_expression)?)
        };
        self.expect(SyntaxKind::SemicolonToken)?;
        let update = if self.token() == SyntaxKind::CloseParenToken {
            None
        } else {
            Some(self.allow_in(Self::parse_expression)?)
        };
        self.expect(SyntaxKind::CloseParenToken)?;
        let body = self.parse_loop_body()?;
        Ok(Statement::For(ForStatement {
            span: self.finish_span(start),
            init,
            test,
            update,
            body,
            scope_context: 0,
        }))
    }

    fn is_for_in_of_keyword(&self) -> bool {
        matches!(self.token(), SyntaxKind::InKeyword | SyntaxKind::OfKeyword)
    }

    fn loop_name(&self) -> &'static str {
        if self.token() == SyntaxKind::OfKeyword {
            "for-of"
        } else {
            "for-in"
        }
    }

    /// A `for-in`/`for-of` declaration binds exactly one name and has no
    /// initializer, except the legacy `for (var x = 1 in o)`.
    fn check_for_in_of_declaration(&mut self, declaration: &VariableDeclaration) -> PResult<()> {
        let loop_name = self.loop_name();
        let offset = declaration.span.offsets().0;
        let [declarator] = declaration.declarations.as_slice() else {
            return self.error_at(offset, &messages::FOR_0_LOOP_SINGLE_BINDING, &[loop_name]);
        };
        if declarator.init.is_some() {
            let legacy_var_in = loop_name == "for-in"
                && declaration.kind == VariableKind::Var
                && matches!(declarator.id, Pattern::Identifier(_));
            if !legacy_var_in {
                return self.error_at(offset, &messages::FOR_0_LOOP_INITIALIZER, &[loop_name]);
            }
        }
        Ok(())
    }

    fn parse_for_in_of_rest(&mut self, start: usize, is_await: bool, left: ForHead) -> PResult<Statement> {
        let is_of = self.token() == SyntaxKind::OfKeyword;
        if is_await && !is_of {
            return self.unexpected();
        }
        self.next_token();
        let right = if is_of {
            self.allow_in(Self::parse_assignment_expression)?
        } else {
            self.allow_in(Self::parse_expression)?
        };
        self.expect(SyntaxKind::CloseParenToken)?;
        let body = self.parse_loop_body()?;
        let span = self.finish_span(start);
        trace!(is_of, "parsed for-in/of statement");
        if is_of {
            Ok(Statement::ForOf(ForOfStatement {
                span,
                is_await,
                left,
                right,
                body,
                scope_context: 0,
            }))
        } else {
            Ok(Statement::ForIn(ForInStatement {
                span,
                left,
                right,
                body,
                scope_context: 0,
            }))
        }
    }

    fn parse_return_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        if !self.function_state.return_allowed {
            return self.error(&messages::ILLEGAL_RETURN_STATEMENT, &[]);
        }
        self.next_token();
        let argument = if self.can_end_statement() {
            None
        } else {
            Some(self.allow_in(Self::parse_expression)?)
        };
        self.parse_semicolon()?;
        Ok(Statement::Return(ReturnStatement {
            span: self.finish_span(start),
            argument,
        }))
    }

    /// Whether an optional operand is absent: the statement ends here.
    fn can_end_statement(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_line_break()
    }

    /// The label after `break` or `continue`, which must sit on the same line.
    fn parse_jump_label(&mut self) -> PResult<Option<Identifier>> {
        if self.has_line_break() || !self.token().is_identifier_like() {
            return Ok(None);
        }
        self.parse_identifier().map(Some)
    }

    fn parse_break_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        let label = self.parse_jump_label()?;
        match &label {
            Some(label) => {
                if !self.function_state.labels.iter().any(|l| l.name == label.name) {
                    let name = label.name.clone();
                    return self.error_at(label.span.offsets().0, &messages::UNDEFINED_LABEL_0, &[&name]);
                }
            }
            None if self.function_state.breakable_depth == 0 => {
                return self.error_at(start, &messages::ILLEGAL_BREAK_STATEMENT, &[]);
            }
            None => {}
        }
        self.parse_semicolon()?;
        Ok(Statement::Break(BreakStatement {
            span: self.finish_span(start),
            label,
        }))
    }

    fn parse_continue_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        let label = self.parse_jump_label()?;
        match &label {
            Some(label) => {
                let target_is_loop = self
                    .function_state
                    .labels
                    .iter()
                    .rev()
                    .find(|l| l.name == label.name)
                    .map(|l| l.is_loop);
                match target_is_loop {
                    None => {
                        let name = label.name.clone();
                        return self.error_at(label.span.offsets().0, &messages::UNDEFINED_LABEL_0, &[&name]);
                    }
                    Some(false) => return self.error_at(start, &messages::ILLEGAL_CONTINUE_STATEMENT, &[]),
                    Some(true) => {}
                }
            }
            None if self.function_state.iteration_depth == 0 => {
                return self.error_at(start, &messages::ILLEGAL_CONTINUE_STATEMENT, &[]);
            }
            None => {}
        }
        self.parse_semicolon()?;
        Ok(Statement::Continue(ContinueStatement {
            span: self.finish_span(start),
            label,
        }))
    }

    fn parse_throw_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        if self.has_line_break() {
            return self.error_at(start, &messages::ILLEGAL_NEWLINE_AFTER_THROW, &[]);
        }
        let argument = self.allow_in(Self::parse_expression)?;
        self.parse_semicolon()?;
        Ok(Statement::Throw(ThrowStatement {
            span: self.finish_span(start),
            argument,
        }))
    }

    fn parse_try_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        let block = self.parse_block()?;

        let handler = if self.token() == SyntaxKind::CatchKeyword {
            let catch_start = self.token_start();
            self.next_token();
            let param = if self.eat(SyntaxKind::OpenParenToken) {
                let param = self.parse_binding_target()?;
                self.expect(SyntaxKind::CloseParenToken)?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                span: self.finish_span(catch_start),
                param,
                body,
                scope_context: 0,
            })
        } else {
            None
        };

        let finalizer = if self.eat(SyntaxKind::FinallyKeyword) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return self.error(&messages::MISSING_CATCH_OR_FINALLY, &[]);
        }
        Ok(Statement::Try(TryStatement {
            span: self.finish_span(start),
            block,
            handler,
            finalizer,
        }))
    }

    fn parse_switch_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        self.expect(SyntaxKind::OpenParenToken)?;
        let discriminant = self.allow_in(Self::parse_expression)?;
        self.expect(SyntaxKind::CloseParenToken)?;
        self.expect(SyntaxKind::OpenBraceToken)?;

        self.function_state.breakable_depth += 1;
        let mut cases = Vec::new();
        let mut seen_default = false;
        while self.token() != SyntaxKind::CloseBraceToken {
            let case_start = self.token_start();
            let test = match self.token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    Some(self.allow_in(Self::parse_expression)?)
                }
                SyntaxKind::DefaultKeyword => {
                    if seen_default {
                        return self.error(&messages::MORE_THAN_ONE_DEFAULT_CLAUSE, &[]);
                    }
                    seen_default = true;
                    self.next_token();
                    None
                }
                _ => return self.unexpected(),
            };
            self.expect(SyntaxKind::ColonToken)?;
            let mut consequent = Vec::new();
            while !matches!(
                self.token(),
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::CloseBraceToken
            ) {
                if self.token() == SyntaxKind::EndOfFileToken {
                    return self.unexpected();
                }
                consequent.push(self.parse_statement()?);
            }
            cases.push(SwitchCase {
                span: self.finish_span(case_start),
                test,
                consequent,
            });
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        self.function_state.breakable_depth -= 1;

        Ok(Statement::Switch(SwitchStatement {
            span: self.finish_span(start),
            discriminant,
            cases,
            scope_context: 0,
        }))
    }

    fn parse_with_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        self.next_token();
        self.expect(SyntaxKind::OpenParenToken)?;
        let object = self.allow_in(Self::parse_expression)?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let body = Box::new(self.parse_substatement()?);
        Ok(Statement::With(WithStatement {
            span: self.finish_span(start),
            object,
            body,
        }))
    }

    fn parse_labeled_statement(&mut self) -> PResult<Statement> {
        let start = self.token_start();
        let label = self.parse_identifier()?;
        self.expect(SyntaxKind::ColonToken)?;
        if self.function_state.labels.iter().any(|l| l.name == label.name) {
            let name = label.name.clone();
            return self.error_at(start, &messages::LABEL_0_ALREADY_DECLARED, &[&name]);
        }

        let body_start = self.token_start();
        let is_loop = is_iteration_start(self.token());
        // `a: b: while (...)` makes `a` a loop label too.
        for enclosing in self.function_state.labels.iter_mut().rev() {
            if enclosing.body_start != start {
                break;
            }
            enclosing.is_loop = is_loop;
        }
        self.function_state.labels.push(Label {
            name: label.name.clone(),
            is_loop,
            body_start,
        });
        let body = Box::new(self.parse_substatement()?);
        self.function_state.labels.pop();

        Ok(Statement::Labeled(LabeledStatement {
            span: self.finish_span(start),
            label,
            body,
        }))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// `let` starts a declaration when followed by a binding.
    fn is_let_declaration(&mut self) -> bool {
        let (next, _) = self.peek_token();
        next.is_identifier_like() || matches!(next, SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken)
    }

    /// `async function` with no line break in between.
    pub(crate) fn is_async_function(&mut self) -> bool {
        let (next, line_break) = self.peek_token();
        next == SyntaxKind::FunctionKeyword && !line_break
    }

    fn parse_variable_statement(&mut self, kind: VariableKind) -> PResult<Statement> {
        let start = self.token_start();
        let mut declaration = self.allow_in(|p| p.parse_variable_declaration(kind, false))?;
        self.parse_semicolon()?;
        declaration.span = self.finish_span(start);
        Ok(Statement::VariableDeclaration(declaration))
    }

    /// Parse `var`/`let`/`const` and its declarators. Inside a `for` head the
    /// initializer checks wait until the loop form is known.
    fn parse_variable_declaration(&mut self, kind: VariableKind, in_for_head: bool) -> PResult<VariableDeclaration> {
        let start = self.token_start();
        self.next_token();
        let mut declarations = Vec::new();
        loop {
            let declarator = self.parse_variable_declarator(kind)?;
            if !in_for_head {
                self.check_declarator_initializer(kind, &declarator)?;
            }
            declarations.push(declarator);
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        Ok(VariableDeclaration {
            span: self.finish_span(start),
            kind,
            declarations,
        })
    }

    fn parse_variable_declarator(&mut self, kind: VariableKind) -> PResult<VariableDeclarator> {
        let start = self.token_start();
        let id = self.parse_binding_target()?;
        if kind.is_lexical() {
            let mut names = Vec::new();
            id.bound_names(&mut names);
            if let Some(let_name) = names.iter().find(|name| name.name == "let") {
                let offset = let_name.span.offsets().0;
                return self.error_at(offset, &messages::LET_IS_DISALLOWED_AS_LEXICALLY_BOUND_NAME, &[]);
            }
        }
        let init = if self.eat(SyntaxKind::EqualsToken) {
            Some(self.parse_assignment_expression()?)
        } else {
            None
        };
        Ok(VariableDeclarator {
            span: self.finish_span(start),
            id,
            init,
        })
    }

    fn check_declarator_initializer(&mut self, kind: VariableKind, declarator: &VariableDeclarator) -> PResult<()> {
        if declarator.init.is_some() {
            return Ok(());
        }
        let offset = declarator.span.offsets().0;
        if !matches!(declarator.id, Pattern::Identifier(_)) {
            return self.error_at(offset, &messages::MISSING_INITIALIZER_IN_DESTRUCTURING, &[]);
        }
        if kind == VariableKind::Const {
            return self.error_at(offset, &messages::MISSING_INITIALIZER_IN_CONST, &[]);
        }
        Ok(())
    }

    fn parse_function_declaration(&mut self, is_async: bool) -> PResult<Statement> {
        let start = self.token_start();
        if is_async {
            self.next_token();
        }
        let function = self.parse_function(start, is_async, true)?;
        Ok(Statement::FunctionDeclaration(Box::new(function)))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// Parse `function [*] [name] (params) { body }` from the `function`
    /// keyword; `start` covers a leading `async`.
    pub(crate) fn parse_function(&mut self, start: usize, is_async: bool, is_declaration: bool) -> PResult<Function> {
        self.expect(SyntaxKind::FunctionKeyword)?;
        let is_generator = self.eat(SyntaxKind::AsteriskToken);

        let name = if is_declaration {
            Some(self.parse_identifier()?)
        } else if self.token() != SyntaxKind::OpenParenToken {
            // An expression's own name follows the function's yield/await rules.
            let saved = self.context;
            self.context.set(ContextFlags::YIELD, is_generator);
            self.context.set(ContextFlags::AWAIT, is_async);
            let name = self.parse_identifier()?;
            self.context = saved;
            Some(name)
        } else {
            None
        };

        let context = self.function_context(is_async, is_generator);
        let (params, body) = self.parse_parameters_and_body(context, PropertyKind::Init)?;
        Ok(Function {
            span: self.finish_span(start),
            name,
            params,
            body,
            is_generator,
            is_async,
            scope_context: 0,
        })
    }

    /// Parse a method's `(params) { body }`. The function span starts at `(`.
    pub(crate) fn parse_method_function(
        &mut self,
        is_async: bool,
        is_generator: bool,
        accessor: PropertyKind,
        super_call: bool,
    ) -> PResult<Function> {
        let start = self.token_start();
        let mut context = self.function_context(is_async, is_generator) | ContextFlags::SUPER_PROPERTY;
        context.set(ContextFlags::SUPER_CALL, super_call);
        let (params, body) = self.parse_parameters_and_body(context, accessor)?;
        Ok(Function {
            span: self.finish_span(start),
            name: None,
            params,
            body,
            is_generator,
            is_async,
            scope_context: 0,
        })
    }

    fn parse_parameters_and_body(
        &mut self,
        context: ContextFlags,
        accessor: PropertyKind,
    ) -> PResult<(ParameterList, Block)> {
        let saved_context = std::mem::replace(&mut self.context, context);
        let saved_state = std::mem::replace(&mut self.function_state, FunctionState::function_body());
        let params = self.parse_formal_parameters()?;
        self.check_accessor_parameters(accessor, &params)?;
        let body = self.parse_block()?;
        self.context = saved_context;
        self.function_state = saved_state;
        Ok((params, body))
    }

    fn check_accessor_parameters(&mut self, accessor: PropertyKind, params: &ParameterList) -> PResult<()> {
        let offset = params.span.offsets().0;
        match accessor {
            PropertyKind::Get if !params.is_empty() => {
                self.error_at(offset, &messages::GETTER_MUST_NOT_HAVE_PARAMETERS, &[])
            }
            PropertyKind::Set if params.rest.is_some() => {
                self.error_at(offset, &messages::SETTER_PARAMETER_MAY_NOT_BE_REST, &[])
            }
            PropertyKind::Set if params.len() != 1 => {
                self.error_at(offset, &messages::SETTER_MUST_HAVE_ONE_PARAMETER, &[])
            }
            _ => Ok(()),
        }
    }

    /// Parse `( a, b = 1, ...rest )`. The span includes the parentheses.
    pub(crate) fn parse_formal_parameters(&mut self) -> PResult<ParameterList> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenParenToken)?;
        let saved = self.context;
        self.context.insert(ContextFlags::IN_PARAMETERS);
        self.context.remove(ContextFlags::DISALLOW_IN);

        let mut params = Vec::new();
        let mut rest = None;
        while self.token() != SyntaxKind::CloseParenToken {
            if self.token() == SyntaxKind::DotDotDotToken {
                rest = Some(Box::new(self.parse_rest_parameter()?));
                break;
            }
            params.push(self.parse_binding_element()?);
            if self.token() != SyntaxKind::CloseParenToken {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseParenToken)?;
        self.context = saved;

        Ok(ParameterList {
            span: self.finish_span(start),
            params,
            rest,
        })
    }

    fn parse_rest_parameter(&mut self) -> PResult<RestElement> {
        let start = self.token_start();
        self.next_token();
        let argument = self.parse_binding_target()?;
        match self.token() {
            SyntaxKind::CloseParenToken => Ok(RestElement {
                span: self.finish_span(start),
                argument,
            }),
            SyntaxKind::EqualsToken => self.error(&messages::REST_PARAMETER_MAY_NOT_HAVE_DEFAULT, &[]),
            SyntaxKind::CommaToken => self.error(&messages::REST_PARAMETER_MUST_BE_LAST, &[]),
            _ => self.unexpected(),
        }
    }

    // ========================================================================
    // Binding patterns
    // ========================================================================

    pub(crate) fn parse_binding_target(&mut self) -> PResult<Pattern> {
        self.enter_recursion()?;
        let target = match self.token() {
            SyntaxKind::OpenBracketToken => Pattern::Array(self.parse_array_binding_pattern()?),
            SyntaxKind::OpenBraceToken => Pattern::Object(self.parse_object_binding_pattern()?),
            _ => Pattern::Identifier(self.parse_identifier()?),
        };
        self.leave_recursion();
        Ok(target)
    }

    /// A binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self) -> PResult<BindingElement> {
        let start = self.token_start();
        let target = self.parse_binding_target()?;
        let initializer = if self.eat(SyntaxKind::EqualsToken) {
            Some(Box::new(self.allow_in(Self::parse_assignment_expression)?))
        } else {
            None
        };
        Ok(BindingElement {
            span: self.finish_span(start),
            target,
            initializer,
        })
    }

    fn parse_array_binding_pattern(&mut self) -> PResult<ArrayPattern> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        let mut rest = None;
        loop {
            match self.token() {
                SyntaxKind::CloseBracketToken => break,
                SyntaxKind::CommaToken => {
                    self.next_token();
                    elements.push(None);
                }
                SyntaxKind::DotDotDotToken => {
                    let rest_start = self.token_start();
                    self.next_token();
                    let argument = self.parse_binding_target()?;
                    rest = Some(Box::new(RestElement {
                        span: self.finish_span(rest_start),
                        argument,
                    }));
                    if self.token() != SyntaxKind::CloseBracketToken {
                        return self.error(&messages::REST_ELEMENT_MUST_BE_LAST, &[]);
                    }
                    break;
                }
                _ => {
                    elements.push(Some(self.parse_binding_element()?));
                    if self.token() != SyntaxKind::CloseBracketToken {
                        self.expect(SyntaxKind::CommaToken)?;
                    }
                }
            }
        }
        self.expect(SyntaxKind::CloseBracketToken)?;
        Ok(ArrayPattern {
            span: self.finish_span(start),
            elements,
            rest,
        })
    }

    fn parse_object_binding_pattern(&mut self) -> PResult<ObjectPattern> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        let mut rest = None;
        while self.token() != SyntaxKind::CloseBraceToken {
            if self.token() == SyntaxKind::DotDotDotToken {
                let rest_start = self.token_start();
                self.next_token();
                let argument = Pattern::Identifier(self.parse_identifier()?);
                rest = Some(Box::new(RestElement {
                    span: self.finish_span(rest_start),
                    argument,
                }));
                if self.token() != SyntaxKind::CloseBraceToken {
                    return self.error(&messages::REST_ELEMENT_MUST_BE_LAST, &[]);
                }
                break;
            }
            properties.push(self.parse_binding_property()?);
            if self.token() != SyntaxKind::CloseBraceToken {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(ObjectPattern {
            span: self.finish_span(start),
            properties,
            rest,
        })
    }

    fn parse_binding_property(&mut self) -> PResult<PatternProperty> {
        let start = self.token_start();
        let key_kind = self.token();
        let key = self.parse_property_key(false)?;
        if self.eat(SyntaxKind::ColonToken) {
            let value = self.parse_binding_element()?;
            return Ok(PatternProperty {
                span: self.finish_span(start),
                key,
                value,
                shorthand: false,
            });
        }

        let name = self.shorthand_name(key_kind, &key, start)?;
        let initializer = if self.eat(SyntaxKind::EqualsToken) {
            Some(Box::new(self.allow_in(Self::parse_assignment_expression)?))
        } else {
            None
        };
        let span = self.finish_span(start);
        Ok(PatternProperty {
            span,
            key,
            value: BindingElement {
                span,
                target: Pattern::Identifier(name),
                initializer,
            },
            shorthand: true,
        })
    }

    /// The identifier a shorthand property binds, from its already parsed key.
    pub(crate) fn shorthand_name(&mut self, key_kind: SyntaxKind, key: &PropertyKey, start: usize) -> PResult<Identifier> {
        match key {
            PropertyKey::Identifier(id) if key_kind.is_identifier_like() => {
                self.check_identifier(key_kind, start)?;
                Ok(id.clone())
            }
            PropertyKey::Identifier(_) if key_kind == SyntaxKind::EscapedReservedWord => {
                self.error_at(start, &messages::KEYWORD_MUST_NOT_CONTAIN_ESCAPED_CHARACTERS, &[])
            }
            _ => self.unexpected(),
        }
    }

    /// Parse a property name: identifier name, string, number, computed
    /// `[expr]`, or a private name where `allow_private` is set.
    pub(crate) fn parse_property_key(&mut self, allow_private: bool) -> PResult<PropertyKey> {
        match self.token() {
            SyntaxKind::StringLiteral => Ok(PropertyKey::String(self.take_string_literal())),
            SyntaxKind::NumericLiteral => Ok(PropertyKey::Number(self.take_number_literal())),
            SyntaxKind::BigIntLiteral => Ok(PropertyKey::BigInt(self.take_bigint_literal())),
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression = self.allow_in(Self::parse_assignment_expression)?;
                self.expect(SyntaxKind::CloseBracketToken)?;
                Ok(PropertyKey::Computed(Box::new(expression)))
            }
            SyntaxKind::PrivateIdentifier if allow_private => Ok(PropertyKey::Private(self.take_private_identifier())),
            kind if kind.is_identifier_name() => Ok(PropertyKey::Identifier(self.take_identifier())),
            _ => self.unexpected(),
        }
    }

    // ========================================================================
    // Classes
    // ========================================================================

    /// Parse `class [name] [extends expr] { body }`.
    pub(crate) fn parse_class(&mut self, is_declaration: bool) -> PResult<Class> {
        let start = self.token_start();
        self.expect(SyntaxKind::ClassKeyword)?;
        let name = if self.token().is_identifier_like() || self.token() == SyntaxKind::EscapedReservedWord {
            Some(self.parse_identifier()?)
        } else if is_declaration {
            return self.unexpected();
        } else {
            None
        };
        let super_class = if self.eat(SyntaxKind::ExtendsKeyword) {
            Some(Box::new(self.parse_left_hand_side_expression()?))
        } else {
            None
        };
        let body = self.parse_class_body(super_class.is_some())?;
        Ok(Class {
            span: self.finish_span(start),
            name,
            super_class,
            body,
            scope_context: 0,
        })
    }

    fn parse_class_body(&mut self, derived: bool) -> PResult<ClassBody> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let saved = self.context;
        self.context.insert(ContextFlags::IN_CLASS);

        let mut elements = Vec::new();
        let mut has_constructor = false;
        while self.token() != SyntaxKind::CloseBraceToken {
            if self.eat(SyntaxKind::SemicolonToken) {
                continue;
            }
            elements.push(self.parse_class_element(derived, &mut has_constructor)?);
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        self.context = saved;

        Ok(ClassBody {
            span: self.finish_span(start),
            elements,
        })
    }

    /// Whether the current `static`/`async`/`get`/`set` token is a modifier
    /// rather than the member's own name.
    fn is_class_modifier(&mut self) -> bool {
        let is_async = self.token() == SyntaxKind::AsyncKeyword;
        let (next, line_break) = self.peek_token();
        let names_member = matches!(
            next,
            SyntaxKind::OpenParenToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        );
        !names_member && !(is_async && line_break)
    }

    fn parse_class_element(&mut self, derived: bool, has_constructor: &mut bool) -> PResult<ClassElement> {
        let start = self.token_start();
        let mut is_static = false;
        if self.token() == SyntaxKind::StaticKeyword {
            if self.peek_token().0 == SyntaxKind::OpenBraceToken {
                return self.parse_static_block(start).map(ClassElement::StaticBlock);
            }
            if self.is_class_modifier() {
                self.next_token();
                is_static = true;
            }
        }

        let is_async = self.token() == SyntaxKind::AsyncKeyword && self.is_class_modifier();
        if is_async {
            self.next_token();
        }
        let is_generator = self.eat(SyntaxKind::AsteriskToken);
        let mut kind = MethodKind::Method;
        if !is_async
            && !is_generator
            && matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.is_class_modifier()
        {
            kind = if self.token() == SyntaxKind::GetKeyword {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            self.next_token();
        }

        let key_start = self.token_start();
        let key = self.parse_property_key(true)?;
        if matches!(&key, PropertyKey::Private(name) if name.name == "constructor") {
            return self.error_at(key_start, &messages::CLASSES_MAY_NOT_HAVE_PRIVATE_CONSTRUCTOR, &[]);
        }
        let name = key.static_name();
        if is_static && name == Some("prototype") {
            return self.error_at(key_start, &messages::CLASSES_MAY_NOT_HAVE_STATIC_PROTOTYPE, &[]);
        }
        let named_constructor = name == Some("constructor");

        if self.token() == SyntaxKind::OpenParenToken {
            let is_constructor = !is_static && named_constructor;
            if is_constructor {
                let special = match kind {
                    MethodKind::Get => Some("a getter"),
                    MethodKind::Set => Some("a setter"),
                    _ if is_generator => Some("a generator"),
                    _ if is_async => Some("an async method"),
                    _ => None,
                };
                if let Some(special) = special {
                    return self.error_at(key_start, &messages::CLASS_CONSTRUCTOR_MAY_NOT_BE_0, &[special]);
                }
                if *has_constructor {
                    return self.error_at(key_start, &messages::A_CLASS_MAY_ONLY_HAVE_ONE_CONSTRUCTOR, &[]);
                }
                *has_constructor = true;
                kind = MethodKind::Constructor;
            }
            let accessor = match kind {
                MethodKind::Get => PropertyKind::Get,
                MethodKind::Set => PropertyKind::Set,
                _ => PropertyKind::Init,
            };
            let value = self.parse_method_function(is_async, is_generator, accessor, is_constructor && derived)?;
            return Ok(ClassElement::Method(MethodDefinition {
                span: self.finish_span(start),
                key,
                kind,
                is_static,
                value: Box::new(value),
            }));
        }

        if is_async || is_generator || kind != MethodKind::Method {
            return self.unexpected();
        }
        if named_constructor {
            return self.error_at(key_start, &messages::CLASSES_MAY_NOT_HAVE_FIELD_NAMED_CONSTRUCTOR, &[]);
        }
        let value = if self.eat(SyntaxKind::EqualsToken) {
            Some(Box::new(self.parse_field_initializer()?))
        } else {
            None
        };
        self.parse_semicolon()?;
        Ok(ClassElement::Field(FieldDefinition {
            span: self.finish_span(start),
            key,
            is_static,
            value,
        }))
    }

    /// A field initializer behaves like a method body: `super.x` and
    /// `new.target` are legal, `return` is not.
    fn parse_field_initializer(&mut self) -> PResult<Expression> {
        let context = self.function_context(false, false) | ContextFlags::SUPER_PROPERTY;
        let saved_context = std::mem::replace(&mut self.context, context);
        let saved_state = std::mem::take(&mut self.function_state);
        let value = self.parse_assignment_expression()?;
        self.context = saved_context;
        self.function_state = saved_state;
        Ok(value)
    }

    fn parse_static_block(&mut self, start: usize) -> PResult<StaticBlock> {
        self.next_token();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let context = self.function_context(false, false) | ContextFlags::SUPER_PROPERTY | ContextFlags::IN_STATIC_BLOCK;
        let saved_context = std::mem::replace(&mut self.context, context);
        let saved_state = std::mem::take(&mut self.function_state);
        let body = self.parse_statement_list(SyntaxKind::CloseBraceToken)?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        self.context = saved_context;
        self.function_state = saved_state;
        Ok(StaticBlock {
            span: self.finish_span(start),
            body,
            scope_context: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program {
        match Parser::new(source).parse_program() {
            Ok(program) => program,
            Err(errors) => panic!("unexpected errors in {:?}: {}", source, errors),
        }
    }

    fn first_error(source: &str) -> (usize, String) {
        let errors = Parser::new(source).parse_program().expect_err("expected a syntax error");
        let first = errors.first().expect("error list is never empty");
        (first.offset, first.message.clone())
    }

    #[test]
    fn test_empty_program_has_unset_span() {
        let program = parse_ok("  // nothing\n");
        assert!(program.body.is_empty());
        assert!(program.span.is_unset());
    }

    #[test]
    fn test_program_span_covers_statements() {
        let program = parse_ok("  a;\n b  ");
        assert_eq!(program.span.offsets(), (2, 7));
    }

    #[test]
    fn test_automatic_semicolon_insertion() {
        let program = parse_ok("a\nb\n{ c }");
        assert_eq!(program.body.len(), 3);
        assert_eq!(first_error("a b"), (2, "Unexpected identifier".to_string()));
    }

    #[test]
    fn test_statement_span_includes_semicolon() {
        let program = parse_ok("var a = 1;");
        assert_eq!(program.body[0].span().offsets(), (0, 10));
    }

    #[test]
    fn test_labels_and_jumps() {
        parse_ok("outer: for (;;) { inner: while (1) { continue outer; } }");
        parse_ok("a: b: while (1) { continue a; }");
        parse_ok("block: { break block; }");
        assert_eq!(first_error("x: { continue x; }").1, "Illegal continue statement: no surrounding iteration statement");
        assert_eq!(first_error("a: a: ;").1, "Label 'a' has already been declared");
    }

    #[test]
    fn test_function_state_resets_at_boundaries() {
        assert_eq!(first_error("while (1) { function f() { break; } }").1, "Illegal break statement");
        assert_eq!(first_error("class C { static { return; } }").1, "Illegal return statement");
        parse_ok("function f() { return () => { return 1; }; }");
    }

    #[test]
    fn test_for_heads() {
        parse_ok("for (var i = 0, j; i < 1; i++) ;");
        parse_ok("for (const [k, v] of map) ;");
        parse_ok("for (x.y in o) ;");
        parse_ok("for (var legacy = 1 in o) ;");
        assert_eq!(first_error("for (let a = 1 of b) ;").1, "for-of loop variable declaration may not have an initializer.");
        assert_eq!(first_error("for (var a, b in c) ;").1, "Invalid left-hand side in for-in loop: Must have a single binding.");
        assert_eq!(first_error("for (const x; ;) ;").1, "Missing initializer in const declaration");
    }

    #[test]
    fn test_class_member_rules() {
        parse_ok("class A extends B { constructor() { super(); } static x = 1; #p; get v() { return this.#p; } }");
        assert_eq!(first_error("class A { constructor() {} constructor() {} }").1, "A class may only have one constructor");
        assert_eq!(first_error("class A { get constructor() {} }").1, "Class constructor may not be a getter");
        assert_eq!(first_error("class A { static prototype() {} }").1, "Classes may not have a static property named 'prototype'");
        assert_eq!(first_error("class A { constructor = 1 }").1, "Classes may not have a field named 'constructor'");
    }
}
