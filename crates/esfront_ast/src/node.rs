//! AST node definitions for the ECMAScript front-end.
//!
//! The tree is a set of closed sum types. Every node owns its children
//! (`Box`, `Vec`, `Option`) and carries its own 1-based span. Nodes that
//! introduce a scope, and every identifier, carry a `scope_context` that the
//! resolver stamps; `0` means unannotated.

use crate::syntax_kind::SyntaxKind;
use esfront_core::text::Span;

/// Scope identifier stamped by the resolver. `0` means unannotated.
pub type ScopeContext = u32;

/// Access to the span every node carries.
pub trait HasSpan {
    fn span(&self) -> Span;
}

macro_rules! impl_has_span {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HasSpan for $ty {
                #[inline]
                fn span(&self) -> Span {
                    self.span
                }
            }
        )*
    };
}

// ============================================================================
// Program
// ============================================================================

/// The root of a parsed source text.
///
/// A program with an empty body keeps an unset span.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub span: Span,
    pub body: Vec<Statement>,
}

// ============================================================================
// Identifiers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub span: Span,
    /// The cooked name, with unicode escapes decoded.
    pub name: String,
    pub scope_context: ScopeContext,
}

impl Identifier {
    pub fn new(span: Span, name: impl Into<String>) -> Self {
        Self {
            span,
            name: name.into(),
            scope_context: 0,
        }
    }
}

/// A `#name` in a class body or member access. `name` excludes the hash.
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateIdentifier {
    pub span: Span,
    pub name: String,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    Empty(Span),
    Expression(ExpressionStatement),
    If(IfStatement),
    For(ForStatement),
    ForIn(ForInStatement),
    ForOf(ForOfStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    Switch(SwitchStatement),
    Try(TryStatement),
    Throw(ThrowStatement),
    Return(ReturnStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Labeled(LabeledStatement),
    With(WithStatement),
    Debugger(Span),
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(Box<Function>),
    ClassDeclaration(Box<Class>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub span: Span,
    pub body: Vec<Statement>,
    pub scope_context: ScopeContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub span: Span,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub span: Span,
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
}

/// `for (init; test; update) body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub span: Span,
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
    pub scope_context: ScopeContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    VariableDeclaration(VariableDeclaration),
    Expression(Expression),
}

/// The left side of a `for-in` or `for-of` head.
#[derive(Debug, Clone, PartialEq)]
pub enum ForHead {
    VariableDeclaration(VariableDeclaration),
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    pub span: Span,
    pub left: ForHead,
    pub right: Expression,
    pub body: Box<Statement>,
    pub scope_context: ScopeContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    pub span: Span,
    /// `for await (... of ...)`
    pub is_await: bool,
    pub left: ForHead,
    pub right: Expression,
    pub body: Box<Statement>,
    pub scope_context: ScopeContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub span: Span,
    pub test: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    pub span: Span,
    pub body: Box<Statement>,
    pub test: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub span: Span,
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
    pub scope_context: ScopeContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub span: Span,
    /// `None` for the `default` clause.
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub span: Span,
    pub block: Block,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub span: Span,
    /// `None` for `catch { }` without a binding.
    pub param: Option<Pattern>,
    pub body: Block,
    pub scope_context: ScopeContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub span: Span,
    pub argument: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub span: Span,
    pub argument: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStatement {
    pub span: Span,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStatement {
    pub span: Span,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStatement {
    pub span: Span,
    pub label: Identifier,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithStatement {
    pub span: Span,
    pub object: Expression,
    pub body: Box<Statement>,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }

    /// Whether bindings of this kind are block scoped.
    pub fn is_lexical(self) -> bool {
        !matches!(self, VariableKind::Var)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub span: Span,
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub span: Span,
    pub id: Pattern,
    pub init: Option<Expression>,
}

/// A function declaration, expression or method body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub span: Span,
    pub name: Option<Identifier>,
    pub params: ParameterList,
    pub body: Block,
    pub is_generator: bool,
    pub is_async: bool,
    pub scope_context: ScopeContext,
}

/// Formal parameters: ordered elements plus at most one trailing rest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterList {
    pub span: Span,
    pub params: Vec<BindingElement>,
    pub rest: Option<Box<RestElement>>,
}

impl ParameterList {
    /// Number of formal parameters, counting the rest parameter.
    pub fn len(&self) -> usize {
        self.params.len() + usize::from(self.rest.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub span: Span,
    pub params: ParameterList,
    pub body: ArrowBody,
    pub is_async: bool,
    pub scope_context: ScopeContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expression(Box<Expression>),
    Block(Block),
}

// ============================================================================
// Classes
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub span: Span,
    pub name: Option<Identifier>,
    pub super_class: Option<Box<Expression>>,
    pub body: ClassBody,
    pub scope_context: ScopeContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassBody {
    pub span: Span,
    pub elements: Vec<ClassElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassElement {
    Method(MethodDefinition),
    Field(FieldDefinition),
    StaticBlock(StaticBlock),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

impl MethodKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MethodKind::Constructor => "constructor",
            MethodKind::Method => "method",
            MethodKind::Get => "get",
            MethodKind::Set => "set",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    pub span: Span,
    pub key: PropertyKey,
    pub kind: MethodKind,
    pub is_static: bool,
    pub value: Box<Function>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub span: Span,
    pub key: PropertyKey,
    pub is_static: bool,
    pub value: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticBlock {
    pub span: Span,
    pub body: Vec<Statement>,
    pub scope_context: ScopeContext,
}

/// The key of an object property, class member or pattern property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(Identifier),
    String(StringLiteral),
    Number(NumberLiteral),
    BigInt(BigIntLiteral),
    Private(PrivateIdentifier),
    Computed(Box<Expression>),
}

impl PropertyKey {
    pub fn is_computed(&self) -> bool {
        matches!(self, PropertyKey::Computed(_))
    }

    /// The statically known name of a non-computed identifier or string key.
    pub fn static_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Identifier(id) => Some(&id.name),
            PropertyKey::String(lit) => Some(&lit.value),
            _ => None,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    /// `#x` on the left of `in`.
    PrivateName(PrivateIdentifier),
    Boolean(BooleanLiteral),
    Null(Span),
    Number(NumberLiteral),
    BigInt(BigIntLiteral),
    String(StringLiteral),
    RegExp(RegExpLiteral),
    Template(TemplateLiteral),
    TaggedTemplate(TaggedTemplate),
    Array(ArrayLiteral),
    Object(ObjectLiteral),
    Function(Box<Function>),
    Arrow(Box<ArrowFunction>),
    Class(Box<Class>),
    Unary(UnaryExpression),
    Update(UpdateExpression),
    /// Arithmetic, bitwise, relational, equality and logical operators.
    Binary(BinaryExpression),
    Assignment(AssignmentExpression),
    Conditional(ConditionalExpression),
    Call(CallExpression),
    New(NewExpression),
    Member(MemberExpression),
    OptionalChain(OptionalChain),
    Sequence(SequenceExpression),
    Spread(SpreadElement),
    Yield(YieldExpression),
    Await(AwaitExpression),
    This(Span),
    Super(Span),
    MetaProperty(MetaProperty),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub span: Span,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub span: Span,
    pub value: f64,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BigIntLiteral {
    pub span: Span,
    /// As written, including the `n` suffix.
    pub raw: String,
}

impl BigIntLiteral {
    /// The digits without the suffix or separators.
    pub fn digits(&self) -> String {
        self.raw.trim_end_matches('n').replace('_', "")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub span: Span,
    pub value: String,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegExpLiteral {
    pub span: Span,
    pub pattern: String,
    pub flags: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub span: Span,
    /// Always one more quasi than expressions.
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    pub span: Span,
    pub raw: String,
    /// `None` when the chunk holds an escape that cannot be cooked.
    pub cooked: Option<String>,
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTemplate {
    pub span: Span,
    pub tag: Box<Expression>,
    pub quasi: TemplateLiteral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub span: Span,
    /// Holes are `None`.
    pub elements: Vec<Option<Expression>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    pub span: Span,
    pub properties: Vec<ObjectMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    Property(Property),
    Shorthand(ShorthandProperty),
    Spread(SpreadElement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

impl PropertyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Init => "init",
            PropertyKind::Get => "get",
            PropertyKind::Set => "set",
        }
    }
}

/// `key: value`, or a method / accessor whose value is a function expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub span: Span,
    pub key: PropertyKey,
    pub value: Expression,
    pub kind: PropertyKind,
    pub method: bool,
}

/// `{ name }`. The initializer form `{ name = value }` only survives inside
/// literals that were reinterpreted as patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct ShorthandProperty {
    pub span: Span,
    pub name: Identifier,
    pub initializer: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub span: Span,
    pub operator: SyntaxKind,
    pub argument: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub span: Span,
    pub operator: SyntaxKind,
    pub prefix: bool,
    pub argument: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub span: Span,
    pub operator: SyntaxKind,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub span: Span,
    pub operator: SyntaxKind,
    pub target: Box<Pattern>,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub span: Span,
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub span: Span,
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    /// Whether this link was written `?.(`.
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    pub span: Span,
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub span: Span,
    pub object: Box<Expression>,
    pub property: MemberProperty,
    /// Whether this link was written `?.`.
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    Identifier(Identifier),
    Private(PrivateIdentifier),
    Computed(Box<Expression>),
}

/// Wraps a whole access sequence that contains at least one `?.` link.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalChain {
    pub span: Span,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpression {
    pub span: Span,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadElement {
    pub span: Span,
    pub argument: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpression {
    pub span: Span,
    pub argument: Option<Box<Expression>>,
    pub delegate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpression {
    pub span: Span,
    pub argument: Box<Expression>,
}

/// `new.target`
#[derive(Debug, Clone, PartialEq)]
pub struct MetaProperty {
    pub span: Span,
    pub meta: Identifier,
    pub property: Identifier,
}

// ============================================================================
// Patterns
// ============================================================================

/// A binding or assignment target.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Identifier(Identifier),
    Array(ArrayPattern),
    Object(ObjectPattern),
    /// A member expression target; only produced in assignment positions.
    Member(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    pub span: Span,
    /// Holes are `None`.
    pub elements: Vec<Option<BindingElement>>,
    pub rest: Option<Box<RestElement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub span: Span,
    pub properties: Vec<PatternProperty>,
    pub rest: Option<Box<RestElement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternProperty {
    pub span: Span,
    pub key: PropertyKey,
    pub value: BindingElement,
    /// `{ a }` or `{ a = 1 }`: the key and the bound identifier share a name.
    pub shorthand: bool,
}

/// A target with an optional default value.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingElement {
    pub span: Span,
    pub target: Pattern,
    pub initializer: Option<Box<Expression>>,
}

/// `...target`
#[derive(Debug, Clone, PartialEq)]
pub struct RestElement {
    pub span: Span,
    pub argument: Pattern,
}

// ============================================================================
// Span access
// ============================================================================

impl_has_span!(
    Program,
    Identifier,
    PrivateIdentifier,
    Block,
    ExpressionStatement,
    IfStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    WhileStatement,
    DoWhileStatement,
    SwitchStatement,
    SwitchCase,
    TryStatement,
    CatchClause,
    ThrowStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    LabeledStatement,
    WithStatement,
    VariableDeclaration,
    VariableDeclarator,
    Function,
    ParameterList,
    ArrowFunction,
    Class,
    ClassBody,
    MethodDefinition,
    FieldDefinition,
    StaticBlock,
    BooleanLiteral,
    NumberLiteral,
    BigIntLiteral,
    StringLiteral,
    RegExpLiteral,
    TemplateLiteral,
    TemplateElement,
    TaggedTemplate,
    ArrayLiteral,
    ObjectLiteral,
    Property,
    ShorthandProperty,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    AssignmentExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    OptionalChain,
    SequenceExpression,
    SpreadElement,
    YieldExpression,
    AwaitExpression,
    MetaProperty,
    ArrayPattern,
    ObjectPattern,
    PatternProperty,
    BindingElement,
    RestElement,
);

impl HasSpan for Statement {
    fn span(&self) -> Span {
        match self {
            Statement::Block(n) => n.span,
            Statement::Empty(span) | Statement::Debugger(span) => *span,
            Statement::Expression(n) => n.span,
            Statement::If(n) => n.span,
            Statement::For(n) => n.span,
            Statement::ForIn(n) => n.span,
            Statement::ForOf(n) => n.span,
            Statement::While(n) => n.span,
            Statement::DoWhile(n) => n.span,
            Statement::Switch(n) => n.span,
            Statement::Try(n) => n.span,
            Statement::Throw(n) => n.span,
            Statement::Return(n) => n.span,
            Statement::Break(n) => n.span,
            Statement::Continue(n) => n.span,
            Statement::Labeled(n) => n.span,
            Statement::With(n) => n.span,
            Statement::VariableDeclaration(n) => n.span,
            Statement::FunctionDeclaration(n) => n.span,
            Statement::ClassDeclaration(n) => n.span,
        }
    }
}

impl HasSpan for Expression {
    fn span(&self) -> Span {
        match self {
            Expression::Identifier(n) => n.span,
            Expression::PrivateName(n) => n.span,
            Expression::Boolean(n) => n.span,
            Expression::Null(span) | Expression::This(span) | Expression::Super(span) => *span,
            Expression::Number(n) => n.span,
            Expression::BigInt(n) => n.span,
            Expression::String(n) => n.span,
            Expression::RegExp(n) => n.span,
            Expression::Template(n) => n.span,
            Expression::TaggedTemplate(n) => n.span,
            Expression::Array(n) => n.span,
            Expression::Object(n) => n.span,
            Expression::Function(n) => n.span,
            Expression::Arrow(n) => n.span,
            Expression::Class(n) => n.span,
            Expression::Unary(n) => n.span,
            Expression::Update(n) => n.span,
            Expression::Binary(n) => n.span,
            Expression::Assignment(n) => n.span,
            Expression::Conditional(n) => n.span,
            Expression::Call(n) => n.span,
            Expression::New(n) => n.span,
            Expression::Member(n) => n.span,
            Expression::OptionalChain(n) => n.span,
            Expression::Sequence(n) => n.span,
            Expression::Spread(n) => n.span,
            Expression::Yield(n) => n.span,
            Expression::Await(n) => n.span,
            Expression::MetaProperty(n) => n.span,
        }
    }
}

impl HasSpan for Pattern {
    fn span(&self) -> Span {
        match self {
            Pattern::Identifier(n) => n.span,
            Pattern::Array(n) => n.span,
            Pattern::Object(n) => n.span,
            Pattern::Member(n) => n.span(),
        }
    }
}

impl HasSpan for PropertyKey {
    fn span(&self) -> Span {
        match self {
            PropertyKey::Identifier(n) => n.span,
            PropertyKey::String(n) => n.span,
            PropertyKey::Number(n) => n.span,
            PropertyKey::BigInt(n) => n.span,
            PropertyKey::Private(n) => n.span,
            PropertyKey::Computed(n) => n.span(),
        }
    }
}

impl HasSpan for ObjectMember {
    fn span(&self) -> Span {
        match self {
            ObjectMember::Property(n) => n.span,
            ObjectMember::Shorthand(n) => n.span,
            ObjectMember::Spread(n) => n.span,
        }
    }
}

impl HasSpan for ClassElement {
    fn span(&self) -> Span {
        match self {
            ClassElement::Method(n) => n.span,
            ClassElement::Field(n) => n.span,
            ClassElement::StaticBlock(n) => n.span,
        }
    }
}

impl HasSpan for ForHead {
    fn span(&self) -> Span {
        match self {
            ForHead::VariableDeclaration(n) => n.span,
            ForHead::Pattern(n) => n.span(),
        }
    }
}

impl HasSpan for ForInit {
    fn span(&self) -> Span {
        match self {
            ForInit::VariableDeclaration(n) => n.span,
            ForInit::Expression(n) => n.span(),
        }
    }
}

impl HasSpan for ArrowBody {
    fn span(&self) -> Span {
        match self {
            ArrowBody::Expression(n) => n.span(),
            ArrowBody::Block(n) => n.span,
        }
    }
}

impl HasSpan for MemberProperty {
    fn span(&self) -> Span {
        match self {
            MemberProperty::Identifier(n) => n.span,
            MemberProperty::Private(n) => n.span,
            MemberProperty::Computed(n) => n.span(),
        }
    }
}

// ============================================================================
// Classification helpers
// ============================================================================

impl Expression {
    /// Whether this expression is a valid target for `++`, `--` and compound
    /// assignment: an identifier or a non-optional member access.
    pub fn is_simple_assignment_target(&self) -> bool {
        matches!(self, Expression::Identifier(_) | Expression::Member(_))
    }

    /// Whether this expression is an `OptionalChain` wrapper.
    pub fn is_optional_chain(&self) -> bool {
        matches!(self, Expression::OptionalChain(_))
    }
}

impl Pattern {
    /// Collect every identifier this pattern binds, in source order.
    pub fn bound_names<'p>(&'p self, out: &mut Vec<&'p Identifier>) {
        match self {
            Pattern::Identifier(id) => out.push(id),
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    element.target.bound_names(out);
                }
                if let Some(rest) = &array.rest {
                    rest.argument.bound_names(out);
                }
            }
            Pattern::Object(object) => {
                for property in &object.properties {
                    property.value.target.bound_names(out);
                }
                if let Some(rest) = &object.rest {
                    rest.argument.bound_names(out);
                }
            }
            Pattern::Member(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(start: u32, name: &str) -> Identifier {
        Identifier::new(Span::new(start, start + name.len() as u32), name)
    }

    #[test]
    fn test_bound_names_in_source_order() {
        // [a, , {b: c, ...d}, ...e]
        let pattern = Pattern::Array(ArrayPattern {
            span: Span::new(1, 30),
            elements: vec![
                Some(BindingElement {
                    span: Span::new(2, 3),
                    target: Pattern::Identifier(ident(2, "a")),
                    initializer: None,
                }),
                None,
                Some(BindingElement {
                    span: Span::new(7, 20),
                    target: Pattern::Object(ObjectPattern {
                        span: Span::new(7, 20),
                        properties: vec![PatternProperty {
                            span: Span::new(8, 12),
                            key: PropertyKey::Identifier(ident(8, "b")),
                            value: BindingElement {
                                span: Span::new(11, 12),
                                target: Pattern::Identifier(ident(11, "c")),
                                initializer: None,
                            },
                            shorthand: false,
                        }],
                        rest: Some(Box::new(RestElement {
                            span: Span::new(14, 18),
                            argument: Pattern::Identifier(ident(17, "d")),
                        })),
                    }),
                    initializer: None,
                }),
            ],
            rest: Some(Box::new(RestElement {
                span: Span::new(22, 26),
                argument: Pattern::Identifier(ident(25, "e")),
            })),
        });
        let mut names = Vec::new();
        pattern.bound_names(&mut names);
        let names: Vec<&str> = names.iter().map(|id| id.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "d", "e"]);
    }

    #[test]
    fn test_parameter_list_counts_rest() {
        let mut params = ParameterList::default();
        assert!(params.is_empty());
        params.rest = Some(Box::new(RestElement {
            span: Span::new(1, 5),
            argument: Pattern::Identifier(ident(4, "r")),
        }));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_bigint_digits() {
        let lit = BigIntLiteral {
            span: Span::new(1, 8),
            raw: "1_000n".to_string(),
        };
        assert_eq!(lit.digits(), "1000");
    }
}
