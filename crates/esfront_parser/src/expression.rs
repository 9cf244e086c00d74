//! Expression parsing.
//!
//! The precedence ladder runs assignment, conditional, binary (precedence
//! climbing), unary, postfix, then left-hand-side expressions with their
//! member/call/template subscripts, and finally primaries.
//!
//! Arrow functions are recognized in primary position. A complete arrow
//! (one not wrapped in parentheses) takes no subscripts or operators.

use esfront_ast::node::*;
use esfront_ast::syntax_kind::SyntaxKind;
use esfront_ast::types::{ContextFlags, TokenFlags};
use esfront_core::text::{idx_of, offset_of, Span};
use esfront_diagnostics::messages;
use esfront_scanner::numeric_value;

use crate::cover::{CoverParenthesized, PatternContext};
use crate::parser::{FunctionState, PResult, Parser};
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{can_start_expression, is_unary_operator};

impl<'a> Parser<'a> {
    // ========================================================================
    // Comma and assignment
    // ========================================================================

    /// Parse a comma expression.
    pub(crate) fn parse_expression(&mut self) -> PResult<Expression> {
        let outer = self.cover_init.take();
        let expression = self.parse_expression_or_cover()?;
        self.check_cover_init()?;
        self.cover_init = outer;
        Ok(expression)
    }

    /// Parse a comma expression whose items may still become patterns.
    pub(crate) fn parse_expression_or_cover(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        let first = self.parse_assignment_expression_or_cover()?;
        if self.token() != SyntaxKind::CommaToken {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(SyntaxKind::CommaToken) {
            expressions.push(self.parse_assignment_expression_or_cover()?);
        }
        Ok(Expression::Sequence(SequenceExpression {
            span: self.finish_span(start),
            expressions,
        }))
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> PResult<Expression> {
        let outer = self.cover_init.take();
        let expression = self.parse_assignment_expression_or_cover()?;
        self.check_cover_init()?;
        self.cover_init = outer;
        Ok(expression)
    }

    /// Reject a `{ name = value }` shorthand that no pattern consumed.
    pub(crate) fn check_cover_init(&mut self) -> PResult<()> {
        match self.cover_init {
            Some(offset) => self.error_at(offset, &messages::INVALID_SHORTHAND_PROPERTY_INITIALIZER, &[]),
            None => Ok(()),
        }
    }

    /// Parse an assignment expression, leaving shorthand initializers
    /// pending in `cover_init` for an enclosing pattern to claim.
    pub(crate) fn parse_assignment_expression_or_cover(&mut self) -> PResult<Expression> {
        self.enter_recursion()?;
        let expression = self.parse_assignment_worker()?;
        self.leave_recursion();
        Ok(expression)
    }

    fn parse_assignment_worker(&mut self) -> PResult<Expression> {
        if self.token() == SyntaxKind::YieldKeyword && self.context.contains(ContextFlags::YIELD) {
            return self.parse_yield_expression();
        }

        let start = self.token_start();
        let outer = self.cover_init.take();
        let left = self.parse_conditional_expression()?;
        let operator = self.token();
        if !operator.is_assignment_operator() || self.is_complete_arrow(&left) {
            self.cover_init = outer.or(self.cover_init);
            return Ok(left);
        }

        let target = if operator == SyntaxKind::EqualsToken {
            // Shorthand initializers inside the target are now defaults.
            self.cover_init = outer;
            self.expression_to_pattern(left, PatternContext::Assignment)?
        } else {
            self.cover_init = outer.or(self.cover_init);
            self.expression_to_simple_target(left)?
        };
        self.next_token();
        let value = self.parse_assignment_expression()?;
        Ok(Expression::Assignment(AssignmentExpression {
            span: self.finish_span(start),
            operator,
            target: Box::new(target),
            value: Box::new(value),
        }))
    }

    fn parse_yield_expression(&mut self) -> PResult<Expression> {
        if self.context.contains(ContextFlags::IN_PARAMETERS) {
            return self.error(&messages::YIELD_IN_FORMAL_PARAMETER, &[]);
        }
        let start = self.token_start();
        self.function_state.suspension.get_or_insert((start, SyntaxKind::YieldKeyword));
        self.next_token();
        let mut delegate = false;
        let mut argument = None;
        if !self.has_line_break() {
            delegate = self.eat(SyntaxKind::AsteriskToken);
            if delegate || can_start_expression(self.token()) {
                argument = Some(Box::new(self.parse_assignment_expression()?));
            }
        }
        Ok(Expression::Yield(YieldExpression {
            span: self.finish_span(start),
            argument,
            delegate,
        }))
    }

    /// Whether `expression` is an arrow function that was not parenthesized.
    fn is_complete_arrow(&self, expression: &Expression) -> bool {
        matches!(expression, Expression::Arrow(arrow) if offset_of(arrow.span.end) == self.prev_token_end)
    }

    // ========================================================================
    // Conditional and binary
    // ========================================================================

    fn parse_conditional_expression(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        let test = self.parse_binary_expression(OperatorPrecedence::Lowest)?;
        if self.token() != SyntaxKind::QuestionToken || self.is_complete_arrow(&test) {
            return Ok(test);
        }
        self.next_token();
        let consequent = self.allow_in(Self::parse_assignment_expression)?;
        self.expect(SyntaxKind::ColonToken)?;
        let alternate = self.parse_assignment_expression()?;
        Ok(Expression::Conditional(ConditionalExpression {
            span: self.finish_span(start),
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    /// Precedence climbing over binary operators binding tighter than
    /// `min_precedence`.
    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> PResult<Expression> {
        let start = self.token_start();
        let mut left = self.parse_unary_expression()?;
        if self.is_complete_arrow(&left) {
            return Ok(left);
        }

        loop {
            let operator = self.token();
            if operator == SyntaxKind::InKeyword && self.context.contains(ContextFlags::DISALLOW_IN) {
                break;
            }
            let precedence = get_binary_operator_precedence(operator);
            if precedence == OperatorPrecedence::Invalid || precedence <= min_precedence {
                break;
            }
            if matches!(left, Expression::PrivateName(_)) && operator != SyntaxKind::InKeyword {
                return self.unexpected();
            }
            // `??` does not mix with `||` or `&&` without parentheses.
            let mixes_nullish = match operator {
                SyntaxKind::BarBarToken | SyntaxKind::AmpersandAmpersandToken => {
                    min_precedence == OperatorPrecedence::NullishCoalescing
                }
                SyntaxKind::QuestionQuestionToken => {
                    is_unparenthesized_logical(&left, start)
                }
                _ => false,
            };
            if mixes_nullish {
                return self.unexpected();
            }

            self.next_token();
            let right_start = self.token_start();
            let right_min = if precedence.is_right_associative() {
                OperatorPrecedence::Multiplicative
            } else {
                precedence
            };
            self.enter_recursion()?;
            let right = self.parse_binary_expression(right_min)?;
            self.leave_recursion();
            if matches!(right, Expression::PrivateName(_)) {
                let text = self.source.get(right_start..self.prev_token_end).unwrap_or("#");
                return self.error_at(right_start, &messages::UNEXPECTED_TOKEN_0, &[text]);
            }
            left = Expression::Binary(BinaryExpression {
                span: self.finish_span(start),
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    // ========================================================================
    // Unary and postfix
    // ========================================================================

    fn parse_unary_expression(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        let operator = self.token();
        if is_unary_operator(operator) {
            self.next_token();
            let argument = self.parse_unary_operand()?;
            self.reject_exponentiation()?;
            return Ok(Expression::Unary(UnaryExpression {
                span: self.finish_span(start),
                operator,
                argument: Box::new(argument),
            }));
        }

        match operator {
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                self.next_token();
                let argument_start = self.token_start();
                let argument = self.parse_unary_operand()?;
                if !argument.is_simple_assignment_target() {
                    return self.error_at(argument_start, &messages::INVALID_LEFT_HAND_SIDE_IN_PREFIX_OPERATION, &[]);
                }
                Ok(Expression::Update(UpdateExpression {
                    span: self.finish_span(start),
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                }))
            }
            SyntaxKind::AwaitKeyword if self.context.contains(ContextFlags::AWAIT) => {
                if self.context.contains(ContextFlags::IN_PARAMETERS) {
                    return self.error(&messages::AWAIT_IN_FORMAL_PARAMETER, &[]);
                }
                self.function_state.suspension.get_or_insert((start, SyntaxKind::AwaitKeyword));
                self.next_token();
                let argument = self.parse_unary_operand()?;
                self.reject_exponentiation()?;
                Ok(Expression::Await(AwaitExpression {
                    span: self.finish_span(start),
                    argument: Box::new(argument),
                }))
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_unary_operand(&mut self) -> PResult<Expression> {
        self.enter_recursion()?;
        let argument = self.parse_unary_expression()?;
        self.leave_recursion();
        Ok(argument)
    }

    /// A unary operand of `**` must be parenthesized.
    fn reject_exponentiation(&mut self) -> PResult<()> {
        if self.token() == SyntaxKind::AsteriskAsteriskToken {
            return self.error(&messages::UNARY_BEFORE_EXPONENTIATION, &[]);
        }
        Ok(())
    }

    fn parse_postfix_expression(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        let expression = self.parse_left_hand_side_expression()?;
        let operator = self.token();
        if !matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            || self.has_line_break()
            || self.is_complete_arrow(&expression)
        {
            return Ok(expression);
        }
        if !expression.is_simple_assignment_target() {
            return self.error_at(start, &messages::INVALID_LEFT_HAND_SIDE_IN_POSTFIX_OPERATION, &[]);
        }
        self.next_token();
        Ok(Expression::Update(UpdateExpression {
            span: self.finish_span(start),
            operator,
            prefix: false,
            argument: Box::new(expression),
        }))
    }

    // ========================================================================
    // Left-hand-side expressions
    // ========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        let outer = self.cover_init.take();
        let expression = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression()?,
            SyntaxKind::SuperKeyword => self.parse_super()?,
            _ => self.parse_primary_expression()?,
        };
        let expression = if self.is_complete_arrow(&expression) {
            expression
        } else {
            self.parse_subscripts(start, expression, false)?
        };
        self.cover_init = outer.or(self.cover_init);
        Ok(expression)
    }

    /// Apply `.x`, `?.x`, `[x]`, `(args)` and tagged templates. Under `new`
    /// (`no_call`), calls and optional links end the callee.
    fn parse_subscripts(&mut self, start: usize, mut expression: Expression, no_call: bool) -> PResult<Expression> {
        let mut in_optional_chain = false;
        loop {
            let kind = self.token();
            let is_template = matches!(kind, SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead);
            let is_subscript = is_template
                || matches!(
                    kind,
                    SyntaxKind::DotToken
                        | SyntaxKind::QuestionDotToken
                        | SyntaxKind::OpenBracketToken
                        | SyntaxKind::OpenParenToken
                );
            if is_subscript && self.cover_init.is_some() {
                self.check_cover_init()?;
            }

            expression = match kind {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let property = self.parse_member_name()?;
                    self.member(start, expression, property, false)
                }
                SyntaxKind::QuestionDotToken => {
                    if no_call {
                        return self.error(&messages::INVALID_OPTIONAL_CHAIN_FROM_NEW, &[]);
                    }
                    self.next_token();
                    in_optional_chain = true;
                    match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments()?;
                            Expression::Call(CallExpression {
                                span: self.finish_span(start),
                                callee: Box::new(expression),
                                arguments,
                                optional: true,
                            })
                        }
                        SyntaxKind::OpenBracketToken => {
                            let property = self.parse_computed_member()?;
                            self.member(start, expression, property, true)
                        }
                        SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                            return self.error(&messages::INVALID_TAGGED_TEMPLATE_ON_OPTIONAL_CHAIN, &[]);
                        }
                        _ => {
                            let property = self.parse_member_name()?;
                            self.member(start, expression, property, true)
                        }
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    let property = self.parse_computed_member()?;
                    self.member(start, expression, property, false)
                }
                SyntaxKind::OpenParenToken if !no_call => {
                    let arguments = self.parse_arguments()?;
                    Expression::Call(CallExpression {
                        span: self.finish_span(start),
                        callee: Box::new(expression),
                        arguments,
                        optional: false,
                    })
                }
                _ if is_template => {
                    if in_optional_chain {
                        return self.error(&messages::INVALID_TAGGED_TEMPLATE_ON_OPTIONAL_CHAIN, &[]);
                    }
                    let quasi = self.parse_template_literal(true)?;
                    Expression::TaggedTemplate(TaggedTemplate {
                        span: self.finish_span(start),
                        tag: Box::new(expression),
                        quasi,
                    })
                }
                _ => break,
            };
        }

        if in_optional_chain {
            expression = Expression::OptionalChain(OptionalChain {
                span: self.finish_span(start),
                expression: Box::new(expression),
            });
        }
        Ok(expression)
    }

    fn member(&self, start: usize, object: Expression, property: MemberProperty, optional: bool) -> Expression {
        Expression::Member(MemberExpression {
            span: self.finish_span(start),
            object: Box::new(object),
            property,
            optional,
        })
    }

    fn parse_computed_member(&mut self) -> PResult<MemberProperty> {
        self.expect(SyntaxKind::OpenBracketToken)?;
        let property = self.allow_in(Self::parse_expression)?;
        self.expect(SyntaxKind::CloseBracketToken)?;
        Ok(MemberProperty::Computed(Box::new(property)))
    }

    /// The name after `.` or `?.`: any identifier name, or a private name
    /// inside a class body.
    fn parse_member_name(&mut self) -> PResult<MemberProperty> {
        match self.token() {
            SyntaxKind::PrivateIdentifier => {
                if !self.context.contains(ContextFlags::IN_CLASS) {
                    let name = self.scanner.token_value().to_string();
                    return self.error(&messages::PRIVATE_NAME_0_OUTSIDE_CLASS, &[&name]);
                }
                Ok(MemberProperty::Private(self.take_private_identifier()))
            }
            kind if kind.is_identifier_name() => Ok(MemberProperty::Identifier(self.take_identifier())),
            _ => self.unexpected(),
        }
    }

    fn parse_arguments(&mut self) -> PResult<Vec<Expression>> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let arguments = self.allow_in(|p| {
            let mut arguments = Vec::new();
            while p.token() != SyntaxKind::CloseParenToken {
                let start = p.token_start();
                if p.eat(SyntaxKind::DotDotDotToken) {
                    let argument = p.parse_assignment_expression()?;
                    arguments.push(Expression::Spread(SpreadElement {
                        span: p.finish_span(start),
                        argument: Box::new(argument),
                    }));
                } else {
                    arguments.push(p.parse_assignment_expression()?);
                }
                if p.token() != SyntaxKind::CloseParenToken {
                    p.expect(SyntaxKind::CommaToken)?;
                }
            }
            Ok(arguments)
        })?;
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(arguments)
    }

    fn parse_new_expression(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        self.next_token();
        if self.token() == SyntaxKind::DotToken {
            let meta = Identifier::new(self.finish_span(start), "new");
            self.next_token();
            if self.token() != SyntaxKind::TargetKeyword {
                return self.unexpected();
            }
            if !self.context.contains(ContextFlags::IN_FUNCTION) {
                return self.error_at(start, &messages::NEW_TARGET_NOT_ALLOWED_HERE, &[]);
            }
            let property = self.take_identifier();
            return Ok(Expression::MetaProperty(MetaProperty {
                span: self.finish_span(start),
                meta,
                property,
            }));
        }

        let callee_start = self.token_start();
        self.enter_recursion()?;
        let callee = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression()?,
            SyntaxKind::SuperKeyword => self.parse_super()?,
            _ => self.parse_primary_expression()?,
        };
        self.leave_recursion();
        let callee = self.parse_subscripts(callee_start, callee, true)?;
        let arguments = if self.token() == SyntaxKind::OpenParenToken {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expression::New(NewExpression {
            span: self.finish_span(start),
            callee: Box::new(callee),
            arguments,
        }))
    }

    /// `super` must be followed by a call or a property access, each legal
    /// only in the matching method context.
    fn parse_super(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        self.next_token();
        let allowed = match self.token() {
            SyntaxKind::OpenParenToken => self.context.contains(ContextFlags::SUPER_CALL),
            SyntaxKind::DotToken | SyntaxKind::OpenBracketToken => self.context.contains(ContextFlags::SUPER_PROPERTY),
            _ => false,
        };
        if !allowed {
            return self.error_at(start, &messages::SUPER_KEYWORD_UNEXPECTED_HERE, &[]);
        }
        Ok(Expression::Super(self.finish_span(start)))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        match self.token() {
            SyntaxKind::ThisKeyword => {
                self.next_token();
                Ok(Expression::This(self.finish_span(start)))
            }
            SyntaxKind::NullKeyword => {
                self.next_token();
                Ok(Expression::Null(self.finish_span(start)))
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.token() == SyntaxKind::TrueKeyword;
                self.next_token();
                Ok(Expression::Boolean(BooleanLiteral {
                    span: self.finish_span(start),
                    value,
                }))
            }
            SyntaxKind::NumericLiteral => Ok(Expression::Number(self.take_number_literal())),
            SyntaxKind::BigIntLiteral => Ok(Expression::BigInt(self.take_bigint_literal())),
            SyntaxKind::StringLiteral => Ok(Expression::String(self.take_string_literal())),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.rescan_slash_token(&mut self.errors);
                Ok(Expression::RegExp(self.take_regex_literal()))
            }
            SyntaxKind::RegularExpressionLiteral => Ok(Expression::RegExp(self.take_regex_literal())),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                Ok(Expression::Template(self.parse_template_literal(false)?))
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_or_arrow(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => {
                let function = self.parse_function(start, false, false)?;
                Ok(Expression::Function(Box::new(function)))
            }
            SyntaxKind::ClassKeyword => Ok(Expression::Class(Box::new(self.parse_class(false)?))),
            SyntaxKind::AsyncKeyword => self.parse_async_primary(),
            SyntaxKind::PrivateIdentifier => self.parse_private_name_in(),
            kind if kind.is_identifier_like() || kind == SyntaxKind::EscapedReservedWord => {
                self.parse_identifier_or_arrow()
            }
            _ => self.unexpected(),
        }
    }

    /// `#x in obj`: a private name is only an operand on the left of `in`.
    fn parse_private_name_in(&mut self) -> PResult<Expression> {
        if !self.context.contains(ContextFlags::IN_CLASS) {
            let name = self.scanner.token_value().to_string();
            return self.error(&messages::PRIVATE_NAME_0_OUTSIDE_CLASS, &[&name]);
        }
        if self.context.contains(ContextFlags::DISALLOW_IN) || self.peek_token().0 != SyntaxKind::InKeyword {
            return self.unexpected();
        }
        Ok(Expression::PrivateName(self.take_private_identifier()))
    }

    fn parse_identifier_or_arrow(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        let id = self.parse_identifier()?;
        if self.token() == SyntaxKind::EqualsGreaterThanToken && !self.has_line_break() {
            let params = single_parameter(id);
            return self.parse_arrow_function(start, params, false);
        }
        Ok(Expression::Identifier(id))
    }

    /// `async function`, `async x => ...`, `async (...) => ...`, a call to a
    /// function named `async`, or the plain identifier.
    fn parse_async_primary(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        let (next, line_break) = self.peek_token();
        if !line_break {
            match next {
                SyntaxKind::FunctionKeyword => {
                    self.next_token();
                    let function = self.parse_function(start, true, false)?;
                    return Ok(Expression::Function(Box::new(function)));
                }
                kind if kind.is_identifier_like() => {
                    self.next_token();
                    // The parameter follows the arrow's own await rules.
                    let saved = self.context;
                    self.context.insert(ContextFlags::AWAIT);
                    let param = self.parse_identifier()?;
                    self.context = saved;
                    if self.token() != SyntaxKind::EqualsGreaterThanToken || self.has_line_break() {
                        return self.unexpected();
                    }
                    return self.parse_arrow_function(start, single_parameter(param), true);
                }
                SyntaxKind::OpenParenToken => return self.parse_async_call_or_arrow(),
                _ => {}
            }
        }
        self.parse_identifier_or_arrow()
    }

    fn parse_async_call_or_arrow(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        let callee = self.take_identifier();
        let outer = self.cover_init.take();
        let cover = self.parse_arrow_cover()?;
        if self.token() == SyntaxKind::EqualsGreaterThanToken && !self.has_line_break() {
            self.cover_init = outer;
            let params = self.cover_to_parameters(cover)?;
            return self.parse_arrow_function(start, params, true);
        }
        self.check_cover_init()?;
        self.cover_init = outer;
        Ok(Expression::Call(CallExpression {
            span: self.finish_span(start),
            callee: Box::new(Expression::Identifier(callee)),
            arguments: cover.items,
            optional: false,
        }))
    }

    fn parse_parenthesized_or_arrow(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        let outer = self.cover_init.take();
        let cover = self.parse_arrow_cover()?;
        if self.token() == SyntaxKind::EqualsGreaterThanToken && !self.has_line_break() {
            self.cover_init = outer;
            let params = self.cover_to_parameters(cover)?;
            return self.parse_arrow_function(start, params, false);
        }
        let expression = self.cover_to_expression(cover)?;
        // A parenthesized literal is never a pattern, so nothing can claim
        // its shorthand initializers.
        self.check_cover_init()?;
        self.cover_init = outer;
        Ok(expression)
    }

    /// Parse `( ... )` that may become arrow parameters. A `yield` or `await`
    /// expression inside it is an error once the `=>` shows up.
    fn parse_arrow_cover(&mut self) -> PResult<CoverParenthesized> {
        let outer = self.function_state.suspension.take();
        let cover = self.parse_cover_parenthesized()?;
        let inner = self.function_state.suspension;
        self.function_state.suspension = outer.or(inner);
        if let Some((offset, keyword)) = inner {
            if self.token() == SyntaxKind::EqualsGreaterThanToken && !self.has_line_break() {
                let message = if keyword == SyntaxKind::YieldKeyword {
                    &messages::YIELD_IN_FORMAL_PARAMETER
                } else {
                    &messages::AWAIT_IN_FORMAL_PARAMETER
                };
                return self.error_at(offset, message, &[]);
            }
        }
        Ok(cover)
    }

    /// Parse `=> body` for parameters that are already known.
    pub(crate) fn parse_arrow_function(&mut self, start: usize, params: ParameterList, is_async: bool) -> PResult<Expression> {
        self.expect(SyntaxKind::EqualsGreaterThanToken)?;
        let mut context = self.context - (ContextFlags::YIELD | ContextFlags::AWAIT | ContextFlags::IN_PARAMETERS);
        context.set(ContextFlags::AWAIT, is_async);
        let saved_context = std::mem::replace(&mut self.context, context);
        let saved_state = std::mem::replace(&mut self.function_state, FunctionState::function_body());

        let body = if self.token() == SyntaxKind::OpenBraceToken {
            self.context.remove(ContextFlags::DISALLOW_IN);
            ArrowBody::Block(self.parse_block()?)
        } else {
            ArrowBody::Expression(Box::new(self.parse_assignment_expression()?))
        };

        self.context = saved_context;
        self.function_state = saved_state;
        Ok(Expression::Arrow(Box::new(ArrowFunction {
            span: self.finish_span(start),
            params,
            body,
            is_async,
            scope_context: 0,
        })))
    }

    fn parse_array_literal(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBracketToken)?;
        let (elements, spread_comma) = self.allow_in(|p| {
            let mut elements = Vec::new();
            let mut spread_comma = None;
            loop {
                match p.token() {
                    SyntaxKind::CloseBracketToken => break,
                    SyntaxKind::CommaToken => {
                        p.next_token();
                        elements.push(None);
                        continue;
                    }
                    SyntaxKind::DotDotDotToken => {
                        let spread_start = p.token_start();
                        p.next_token();
                        let argument = p.parse_assignment_expression_or_cover()?;
                        elements.push(Some(Expression::Spread(SpreadElement {
                            span: p.finish_span(spread_start),
                            argument: Box::new(argument),
                        })));
                        if p.token() == SyntaxKind::CommaToken && p.peek_token().0 == SyntaxKind::CloseBracketToken {
                            spread_comma = Some(p.token_start());
                        }
                    }
                    _ => elements.push(Some(p.parse_assignment_expression_or_cover()?)),
                }
                if p.token() != SyntaxKind::CloseBracketToken {
                    p.expect(SyntaxKind::CommaToken)?;
                }
            }
            Ok((elements, spread_comma))
        })?;
        self.expect(SyntaxKind::CloseBracketToken)?;
        if let Some(comma) = spread_comma {
            self.spread_trailing_commas.insert(start, comma);
        }
        Ok(Expression::Array(ArrayLiteral {
            span: self.finish_span(start),
            elements,
        }))
    }

    fn parse_object_literal(&mut self) -> PResult<Expression> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let properties = self.allow_in(|p| {
            let mut properties = Vec::new();
            while p.token() != SyntaxKind::CloseBraceToken {
                properties.push(p.parse_object_member()?);
                if p.token() != SyntaxKind::CloseBraceToken {
                    p.expect(SyntaxKind::CommaToken)?;
                }
            }
            Ok(properties)
        })?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Expression::Object(ObjectLiteral {
            span: self.finish_span(start),
            properties,
        }))
    }

    /// Whether the current `async`/`get`/`set` token modifies the member
    /// that follows instead of naming it.
    fn is_object_modifier(&mut self) -> bool {
        let is_async = self.token() == SyntaxKind::AsyncKeyword;
        let (next, line_break) = self.peek_token();
        let names_member = matches!(
            next,
            SyntaxKind::OpenParenToken
                | SyntaxKind::CommaToken
                | SyntaxKind::ColonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::EndOfFileToken
        );
        !names_member && !(is_async && line_break)
    }

    fn parse_object_member(&mut self) -> PResult<ObjectMember> {
        let start = self.token_start();
        if self.eat(SyntaxKind::DotDotDotToken) {
            let argument = self.parse_assignment_expression_or_cover()?;
            return Ok(ObjectMember::Spread(SpreadElement {
                span: self.finish_span(start),
                argument: Box::new(argument),
            }));
        }

        let is_async = self.token() == SyntaxKind::AsyncKeyword && self.is_object_modifier();
        if is_async {
            self.next_token();
        }
        let is_generator = self.eat(SyntaxKind::AsteriskToken);
        let mut kind = PropertyKind::Init;
        if !is_async
            && !is_generator
            && matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.is_object_modifier()
        {
            kind = if self.token() == SyntaxKind::GetKeyword {
                PropertyKind::Get
            } else {
                PropertyKind::Set
            };
            self.next_token();
        }

        let key_kind = self.token();
        let key_start = self.token_start();
        let key = self.parse_property_key(false)?;

        if self.token() == SyntaxKind::OpenParenToken {
            let function = self.parse_method_function(is_async, is_generator, kind, false)?;
            return Ok(ObjectMember::Property(Property {
                span: self.finish_span(start),
                key,
                value: Expression::Function(Box::new(function)),
                kind,
                method: kind == PropertyKind::Init,
            }));
        }
        if is_async || is_generator || kind != PropertyKind::Init {
            return self.unexpected();
        }

        if self.eat(SyntaxKind::ColonToken) {
            let value = self.parse_assignment_expression_or_cover()?;
            return Ok(ObjectMember::Property(Property {
                span: self.finish_span(start),
                key,
                value,
                kind,
                method: false,
            }));
        }

        let name = self.shorthand_name(key_kind, &key, key_start)?;
        let initializer = if self.token() == SyntaxKind::EqualsToken {
            let offset = self.token_start();
            self.cover_init.get_or_insert(offset);
            self.next_token();
            Some(Box::new(self.parse_assignment_expression()?))
        } else {
            None
        };
        Ok(ObjectMember::Shorthand(ShorthandProperty {
            span: self.finish_span(start),
            name,
            initializer,
        }))
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Parse a template from its first chunk. Substitutions resume the
    /// template by rescanning their closing `}`.
    pub(crate) fn parse_template_literal(&mut self, tagged: bool) -> PResult<TemplateLiteral> {
        let start = self.token_start();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let element = self.template_element(tagged)?;
            let tail = element.tail;
            quasis.push(element);
            self.next_token();
            if tail {
                break;
            }
            expressions.push(self.allow_in(Self::parse_expression)?);
            if self.token() != SyntaxKind::CloseBraceToken {
                return self.unexpected();
            }
            self.scanner.rescan_template_continuation(&mut self.errors);
        }
        Ok(TemplateLiteral {
            span: self.finish_span(start),
            quasis,
            expressions,
        })
    }

    /// The current template chunk, spanning its text without delimiters.
    fn template_element(&mut self, tagged: bool) -> PResult<TemplateElement> {
        let kind = self.token();
        let flags = self.scanner.token_flags();
        let invalid_escape = flags.contains(TokenFlags::CONTAINS_INVALID_ESCAPE);
        if invalid_escape && !tagged {
            return self.error(&messages::INVALID_ESCAPE_SEQUENCE_IN_TEMPLATE, &[]);
        }
        let tail = matches!(kind, SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateTail);
        let closing = if !tail {
            2
        } else if flags.contains(TokenFlags::UNTERMINATED) {
            0
        } else {
            1
        };
        let start = self.token_start() + 1;
        let end = self.scanner.token_end().saturating_sub(closing).max(start);
        Ok(TemplateElement {
            span: Span::new(idx_of(start), idx_of(end)),
            raw: self.scanner.token_raw().to_string(),
            cooked: (!invalid_escape).then(|| self.scanner.token_value().to_string()),
            tail,
        })
    }

    // ========================================================================
    // Literals
    // ========================================================================

    pub(crate) fn take_string_literal(&mut self) -> StringLiteral {
        let literal = StringLiteral {
            span: self.scanner.token_span(),
            value: self.scanner.token_value().to_string(),
            raw: self.scanner.token_text().to_string(),
        };
        self.next_token();
        literal
    }

    pub(crate) fn take_number_literal(&mut self) -> NumberLiteral {
        let raw = self.scanner.token_text();
        let literal = NumberLiteral {
            span: self.scanner.token_span(),
            value: numeric_value(raw),
            raw: raw.to_string(),
        };
        self.next_token();
        literal
    }

    pub(crate) fn take_bigint_literal(&mut self) -> BigIntLiteral {
        let literal = BigIntLiteral {
            span: self.scanner.token_span(),
            raw: self.scanner.token_text().to_string(),
        };
        self.next_token();
        literal
    }

    pub(crate) fn take_private_identifier(&mut self) -> PrivateIdentifier {
        let name = PrivateIdentifier {
            span: self.scanner.token_span(),
            name: self.scanner.token_value().to_string(),
        };
        self.next_token();
        name
    }

    fn take_regex_literal(&mut self) -> RegExpLiteral {
        let literal = RegExpLiteral {
            span: self.scanner.token_span(),
            pattern: self.scanner.token_value().to_string(),
            flags: self.scanner.token_raw().to_string(),
        };
        self.next_token();
        literal
    }
}

/// `x` in `x => ...` as a parameter list.
fn single_parameter(id: Identifier) -> ParameterList {
    let span = id.span;
    ParameterList {
        span,
        params: vec![BindingElement {
            span,
            target: Pattern::Identifier(id),
            initializer: None,
        }],
        rest: None,
    }
}

/// `a || b` or `a && b` built without parentheses at offset `start`.
fn is_unparenthesized_logical(expression: &Expression, start: usize) -> bool {
    match expression {
        Expression::Binary(binary) => {
            matches!(binary.operator, SyntaxKind::BarBarToken | SyntaxKind::AmpersandAmpersandToken)
                && binary.span.offsets().0 == start
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use esfront_ast::node::*;
    use esfront_ast::syntax_kind::SyntaxKind;

    fn expression(source: &str) -> Expression {
        let program = parse(source).unwrap_or_else(|errors| panic!("{:?}: {}", source, errors));
        match program.body.into_iter().next() {
            Some(Statement::Expression(statement)) => statement.expression,
            other => panic!("expected an expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_exponentiation_is_right_associative() {
        let Expression::Binary(outer) = expression("a ** b ** c") else {
            panic!("expected a binary expression");
        };
        assert_eq!(outer.operator, SyntaxKind::AsteriskAsteriskToken);
        assert!(matches!(*outer.left, Expression::Identifier(_)));
        assert!(matches!(*outer.right, Expression::Binary(_)));
    }

    #[test]
    fn test_parenthesized_arrow_can_be_called() {
        let Expression::Call(call) = expression("(x => x)(1)") else {
            panic!("expected a call");
        };
        assert!(matches!(*call.callee, Expression::Arrow(_)));
    }

    #[test]
    fn test_optional_chain_wraps_whole_access() {
        let Expression::OptionalChain(chain) = expression("a?.b.c(d)") else {
            panic!("expected an optional chain");
        };
        assert_eq!(chain.span.offsets(), (0, 9));
        assert!(matches!(*chain.expression, Expression::Call(_)));
    }

    #[test]
    fn test_regex_in_primary_position() {
        let Expression::Assignment(assignment) = expression("x = a / b / /re/g.source") else {
            panic!("expected an assignment");
        };
        let Expression::Binary(quotient) = *assignment.value else {
            panic!("expected a division");
        };
        let Expression::Member(member) = *quotient.right else {
            panic!("expected a member access on the regex");
        };
        let Expression::RegExp(regex) = *member.object else {
            panic!("expected a regex literal");
        };
        assert_eq!((regex.pattern.as_str(), regex.flags.as_str()), ("re", "g"));
    }

    #[test]
    fn test_template_element_spans() {
        let Expression::Template(template) = expression("`a${b}cd`") else {
            panic!("expected a template");
        };
        assert_eq!(template.quasis[0].span.offsets(), (1, 2));
        assert_eq!(template.quasis[1].span.offsets(), (6, 8));
        assert_eq!(template.span.offsets(), (0, 9));
    }
}
