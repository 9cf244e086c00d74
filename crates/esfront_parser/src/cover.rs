//! Cover grammars.
//!
//! A parenthesized list, array literal or object literal is parsed as an
//! expression first. When an `=>` or `=` follows, it is reinterpreted as
//! arrow parameters or a destructuring pattern.

use esfront_ast::node::*;
use esfront_ast::syntax_kind::SyntaxKind;
use esfront_core::text::Span;
use esfront_diagnostics::messages;

use crate::parser::{PResult, Parser};

/// `( items )` before it is known to be arrow parameters.
#[derive(Debug)]
pub(crate) struct CoverParenthesized {
    pub(crate) span: Span,
    /// Items may include `Spread`.
    pub(crate) items: Vec<Expression>,
    /// Offset of the `)` after a trailing comma.
    pub(crate) trailing_comma: Option<usize>,
}

/// Where a reinterpreted expression lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternContext {
    /// Left of `=`; member targets allowed.
    Assignment,
    /// Left of `in`/`of`, named by its loop keyword.
    ForHead(&'static str),
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_cover_parenthesized(&mut self) -> PResult<CoverParenthesized> {
        let start = self.token_start();
        self.expect(SyntaxKind::OpenParenToken)?;
        let (items, trailing_comma) = self.allow_in(|p| {
            let mut items = Vec::new();
            let mut trailing_comma = None;
            while p.token() != SyntaxKind::CloseParenToken {
                let item_start = p.token_start();
                let item = if p.eat(SyntaxKind::DotDotDotToken) {
                    let argument = p.parse_assignment_expression_or_cover()?;
                    Expression::Spread(SpreadElement {
                        span: p.finish_span(item_start),
                        argument: Box::new(argument),
                    })
                } else {
                    p.parse_assignment_expression_or_cover()?
                };
                items.push(item);
                if p.token() == SyntaxKind::CloseParenToken {
                    break;
                }
                p.expect(SyntaxKind::CommaToken)?;
                if p.token() == SyntaxKind::CloseParenToken {
                    trailing_comma = Some(p.token_start());
                }
            }
            Ok((items, trailing_comma))
        })?;
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(CoverParenthesized {
            span: self.finish_span(start),
            items,
            trailing_comma,
        })
    }

    /// A parenthesized expression: one item, or a sequence of several.
    pub(crate) fn cover_to_expression(&mut self, cover: CoverParenthesized) -> PResult<Expression> {
        if let Some(offset) = cover.trailing_comma {
            return self.error_at(offset, &messages::UNEXPECTED_TOKEN_0, &[")"]);
        }
        if let Some(spread) = cover.items.iter().find(|item| matches!(item, Expression::Spread(_))) {
            let offset = spread.span().offsets().0;
            return self.error_at(offset, &messages::UNEXPECTED_TOKEN_0, &["..."]);
        }

        let mut items = cover.items;
        if items.len() > 1 {
            let span = items[0].span().to(items[items.len() - 1].span());
            return Ok(Expression::Sequence(SequenceExpression { span, expressions: items }));
        }
        match items.pop() {
            Some(expression) => {
                self.parenthesized.insert(expression.span());
                Ok(expression)
            }
            None => {
                let close = cover.span.offsets().1 - 1;
                self.error_at(close, &messages::UNEXPECTED_TOKEN_0, &[")"])
            }
        }
    }

    pub(crate) fn cover_to_parameters(&mut self, cover: CoverParenthesized) -> PResult<ParameterList> {
        let count = cover.items.len();
        let mut params = Vec::with_capacity(count);
        let mut rest = None;
        for (index, item) in cover.items.into_iter().enumerate() {
            match item {
                Expression::Spread(spread) => {
                    let offset = spread.span.offsets().0;
                    if index + 1 != count || cover.trailing_comma.is_some() {
                        return self.error_at(offset, &messages::REST_PARAMETER_MUST_BE_LAST, &[]);
                    }
                    if matches!(*spread.argument, Expression::Assignment(_)) {
                        return self.error_at(offset, &messages::REST_PARAMETER_MAY_NOT_HAVE_DEFAULT, &[]);
                    }
                    let argument = self.to_pattern(*spread.argument, true)?;
                    rest = Some(Box::new(RestElement { span: spread.span, argument }));
                }
                item => params.push(self.expression_to_binding_element(item, true)?),
            }
        }
        Ok(ParameterList { span: cover.span, params, rest })
    }

    /// The left side of a `for-in`/`for-of` head.
    pub(crate) fn expression_to_for_target(&mut self, expression: Expression, loop_name: &'static str) -> PResult<Pattern> {
        self.expression_to_pattern(expression, PatternContext::ForHead(loop_name))
    }

    /// Reinterpret the top of an assignment or loop target.
    ///
    /// A parenthesized identifier or member access stays a valid target; a
    /// parenthesized array or object literal does not.
    pub(crate) fn expression_to_pattern(&mut self, expression: Expression, context: PatternContext) -> PResult<Pattern> {
        let valid = match &expression {
            Expression::Identifier(_) | Expression::Member(_) => true,
            Expression::Array(_) | Expression::Object(_) => !self.is_parenthesized(&expression),
            _ => false,
        };
        if valid {
            return self.to_pattern(expression, false);
        }
        let offset = expression.span().offsets().0;
        match context {
            PatternContext::Assignment => self.error_at(offset, &messages::INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT, &[]),
            PatternContext::ForHead(loop_name) => {
                self.error_at(offset, &messages::INVALID_LEFT_HAND_SIDE_IN_0_LOOP, &[loop_name])
            }
        }
    }

    fn is_parenthesized(&self, expression: &Expression) -> bool {
        self.parenthesized.contains(&expression.span())
    }

    /// Target of a compound assignment: an identifier or member access.
    pub(crate) fn expression_to_simple_target(&mut self, expression: Expression) -> PResult<Pattern> {
        match expression {
            Expression::Identifier(id) => Ok(Pattern::Identifier(id)),
            member @ Expression::Member(_) => Ok(Pattern::Member(Box::new(member))),
            other => {
                let offset = other.span().offsets().0;
                self.error_at(offset, &messages::INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT, &[])
            }
        }
    }

    /// Element of a destructuring pattern, where `target = value` supplies a
    /// default.
    pub(crate) fn expression_to_binding_element(&mut self, expression: Expression, binding: bool) -> PResult<BindingElement> {
        let span = expression.span();
        let parenthesized = self.is_parenthesized(&expression);
        match expression {
            Expression::Assignment(_) if parenthesized => {
                self.error_at(span.offsets().0, &messages::INVALID_DESTRUCTURING_ASSIGNMENT_TARGET, &[])
            }
            Expression::Assignment(assignment) if assignment.operator == SyntaxKind::EqualsToken => {
                let target = *assignment.target;
                if binding {
                    self.check_binding_pattern(&target)?;
                }
                Ok(BindingElement {
                    span,
                    target,
                    initializer: Some(assignment.value),
                })
            }
            other => Ok(BindingElement {
                span,
                target: self.to_pattern(other, binding)?,
                initializer: None,
            }),
        }
    }

    /// Inside a pattern only identifiers and member accesses may be
    /// parenthesized, and binding patterns allow no parentheses at all.
    fn to_pattern(&mut self, expression: Expression, binding: bool) -> PResult<Pattern> {
        if self.is_parenthesized(&expression)
            && (binding || !matches!(expression, Expression::Identifier(_) | Expression::Member(_)))
        {
            let offset = expression.span().offsets().0;
            return self.error_at(offset, &messages::INVALID_DESTRUCTURING_ASSIGNMENT_TARGET, &[]);
        }
        match expression {
            Expression::Identifier(id) => Ok(Pattern::Identifier(id)),
            member @ Expression::Member(_) if !binding => Ok(Pattern::Member(Box::new(member))),
            Expression::Array(array) => self.array_to_pattern(array, binding).map(Pattern::Array),
            Expression::Object(object) => self.object_to_pattern(object, binding).map(Pattern::Object),
            other => {
                let offset = other.span().offsets().0;
                self.error_at(offset, &messages::INVALID_DESTRUCTURING_ASSIGNMENT_TARGET, &[])
            }
        }
    }

    fn array_to_pattern(&mut self, array: ArrayLiteral, binding: bool) -> PResult<ArrayPattern> {
        let count = array.elements.len();
        let mut elements = Vec::with_capacity(count);
        let mut rest = None;
        for (index, element) in array.elements.into_iter().enumerate() {
            match element {
                None => elements.push(None),
                Some(Expression::Spread(spread)) => {
                    if index + 1 != count {
                        let offset = spread.span.offsets().0;
                        return self.error_at(offset, &messages::REST_ELEMENT_MUST_BE_LAST, &[]);
                    }
                    if let Some(&comma) = self.spread_trailing_commas.get(&array.span.offsets().0) {
                        return self.error_at(comma, &messages::REST_ELEMENT_MUST_BE_LAST, &[]);
                    }
                    let argument = self.to_pattern(*spread.argument, binding)?;
                    rest = Some(Box::new(RestElement { span: spread.span, argument }));
                }
                Some(element) => elements.push(Some(self.expression_to_binding_element(element, binding)?)),
            }
        }
        Ok(ArrayPattern {
            span: array.span,
            elements,
            rest,
        })
    }

    fn object_to_pattern(&mut self, object: ObjectLiteral, binding: bool) -> PResult<ObjectPattern> {
        let count = object.properties.len();
        let mut properties = Vec::with_capacity(count);
        let mut rest = None;
        for (index, member) in object.properties.into_iter().enumerate() {
            match member {
                ObjectMember::Property(property) => {
                    if property.method || property.kind != PropertyKind::Init {
                        let offset = property.span.offsets().0;
                        return self.error_at(offset, &messages::INVALID_DESTRUCTURING_ASSIGNMENT_TARGET, &[]);
                    }
                    let value = self.expression_to_binding_element(property.value, binding)?;
                    properties.push(PatternProperty {
                        span: property.span,
                        key: property.key,
                        value,
                        shorthand: false,
                    });
                }
                ObjectMember::Shorthand(shorthand) => {
                    properties.push(PatternProperty {
                        span: shorthand.span,
                        key: PropertyKey::Identifier(shorthand.name.clone()),
                        value: BindingElement {
                            span: shorthand.span,
                            target: Pattern::Identifier(shorthand.name),
                            initializer: shorthand.initializer,
                        },
                        shorthand: true,
                    });
                }
                ObjectMember::Spread(spread) => {
                    let offset = spread.span.offsets().0;
                    if index + 1 != count {
                        return self.error_at(offset, &messages::REST_ELEMENT_MUST_BE_LAST, &[]);
                    }
                    // An object rest takes a plain target, never a nested pattern.
                    if binding && self.is_parenthesized(&spread.argument) {
                        let offset = spread.argument.span().offsets().0;
                        return self.error_at(offset, &messages::INVALID_DESTRUCTURING_ASSIGNMENT_TARGET, &[]);
                    }
                    let argument = match *spread.argument {
                        Expression::Identifier(id) => Pattern::Identifier(id),
                        member @ Expression::Member(_) if !binding => Pattern::Member(Box::new(member)),
                        other => {
                            let offset = other.span().offsets().0;
                            return self.error_at(offset, &messages::INVALID_DESTRUCTURING_ASSIGNMENT_TARGET, &[]);
                        }
                    };
                    rest = Some(Box::new(RestElement { span: spread.span, argument }));
                }
            }
        }
        Ok(ObjectPattern {
            span: object.span,
            properties,
            rest,
        })
    }

    /// Member targets and parentheses are assignment-only; reject them inside
    /// parameters.
    fn check_binding_pattern(&mut self, pattern: &Pattern) -> PResult<()> {
        if self.parenthesized.contains(&pattern.span()) {
            let offset = pattern.span().offsets().0;
            return self.error_at(offset, &messages::INVALID_DESTRUCTURING_ASSIGNMENT_TARGET, &[]);
        }
        match pattern {
            Pattern::Identifier(_) => Ok(()),
            Pattern::Member(member) => {
                let offset = member.span().offsets().0;
                self.error_at(offset, &messages::INVALID_DESTRUCTURING_ASSIGNMENT_TARGET, &[])
            }
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    self.check_binding_pattern(&element.target)?;
                }
                match &array.rest {
                    Some(rest) => self.check_binding_pattern(&rest.argument),
                    None => Ok(()),
                }
            }
            Pattern::Object(object) => {
                for property in &object.properties {
                    self.check_binding_pattern(&property.value.target)?;
                }
                match &object.rest {
                    Some(rest) => self.check_binding_pattern(&rest.argument),
                    None => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    fn first_error(source: &str) -> String {
        match parse(source) {
            Ok(_) => panic!("expected an error for {:?}", source),
            Err(errors) => errors.first().map(|e| e.message.clone()).unwrap_or_default(),
        }
    }

    #[test]
    fn test_destructuring_assignment_accepts_member_targets() {
        assert!(parse("[a.b, {c: d[0]}, ...e.f] = g;").is_ok());
        assert!(parse("({a = 1, b: {c} = {}} = o);").is_ok());
    }

    #[test]
    fn test_arrow_parameters_reject_member_targets() {
        assert_eq!(first_error("([a.b]) => 0"), "Invalid destructuring assignment target");
        assert_eq!(first_error("(a.b = 1) => 0"), "Invalid destructuring assignment target");
    }

    #[test]
    fn test_rest_must_be_last() {
        assert_eq!(first_error("[...a, b] = c"), "Rest element must be last element");
        assert_eq!(first_error("(...a, b) => 0"), "Rest parameter must be last formal parameter");
        assert_eq!(first_error("(...a = 1) => 0"), "Rest parameter may not have a default initializer");
    }

    #[test]
    fn test_shorthand_initializer_outside_pattern() {
        assert_eq!(first_error("({a = 1});"), "Invalid shorthand property initializer");
        assert!(parse("({a = 1}) => a").is_ok());
        assert!(parse("[{a = 1}] = [];").is_ok());
    }

    #[test]
    fn test_parenthesized_literals_are_not_patterns() {
        assert_eq!(first_error("({a}) = 1;"), "Invalid left-hand side in assignment");
        assert_eq!(first_error("([a]) = 1;"), "Invalid left-hand side in assignment");
        assert_eq!(first_error("for (([a]) of b) ;"), "Invalid left-hand side in for-of loop");
        assert_eq!(first_error("[([a])] = 1;"), "Invalid destructuring assignment target");
        assert_eq!(first_error("({ x: ({a}) } = 1);"), "Invalid destructuring assignment target");
        assert_eq!(first_error("[(a = 1)] = b;"), "Invalid destructuring assignment target");
        assert_eq!(first_error("({ a = 1 }) = o;"), "Invalid shorthand property initializer");
    }

    #[test]
    fn test_parenthesized_simple_targets_are_allowed() {
        assert!(parse("(a) = 1; (a.b) = 2; (a) += 3; [(a), (b.c)] = d;").is_ok());
        assert!(parse("({ x: (a), ...(b) } = c); for ((a) of b) ;").is_ok());
        assert!(parse("[(a) = 1] = b; ((a, b)); ([a]);").is_ok());
    }

    #[test]
    fn test_arrow_parameters_reject_parentheses() {
        assert_eq!(first_error("((a)) => 0;"), "Invalid destructuring assignment target");
        assert_eq!(first_error("(a, (b)) => 0;"), "Invalid destructuring assignment target");
        assert_eq!(first_error("([(a)]) => 0;"), "Invalid destructuring assignment target");
        assert_eq!(first_error("((a) = 1) => 0;"), "Invalid destructuring assignment target");
        assert_eq!(first_error("(...(a)) => 0;"), "Invalid destructuring assignment target");
        assert_eq!(first_error("async ((a)) => 0;"), "Invalid destructuring assignment target");
    }

    #[test]
    fn test_rest_element_trailing_comma() {
        assert_eq!(first_error("[...a,] = b;"), "Rest element must be last element");
        assert!(parse("x = [...a,];").is_ok());
        assert!(parse("[...a] = b; [a, ...b] = c;").is_ok());
    }

    #[test]
    fn test_arrow_parameters_reject_yield_and_await() {
        assert_eq!(
            first_error("function* g() { (a = yield) => 0; }"),
            "Yield expression not allowed in formal parameter"
        );
        assert_eq!(
            first_error("async function f() { (a = await x) => 0; }"),
            "Illegal await-expression in formal parameters of async function"
        );
        assert_eq!(
            first_error("async function f() { async (a = await x) => 0; }"),
            "Illegal await-expression in formal parameters of async function"
        );
        // Fine outside arrow parameters, or inside a nested function body.
        assert!(parse("function* g() { (a = yield); (a = function* () { yield 1; }) => 0; }").is_ok());
        assert!(parse("async function f() { (a = await x); await ((b) => b); }").is_ok());
    }

    #[test]
    fn test_parenthesized_cover_misuse() {
        assert_eq!(first_error("();"), "Unexpected token )");
        assert_eq!(first_error("(a, ...b);"), "Unexpected token ...");
    }
}
