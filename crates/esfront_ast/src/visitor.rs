//! Read-only visitor over the syntax tree.
//!
//! `Visit` has one callback per node variant. Every default implementation
//! calls the matching `walk_*` function, which visits the children in source
//! order. Override a callback to observe a node and call the `walk_*`
//! function from it to keep descending.
//!
//! Identifiers are dispatched by role: references in expression position,
//! binding/assignment targets, labels and property names each get their own
//! callback.

use crate::node::*;
use esfront_core::text::Span;

pub trait Visit {
    fn visit_program(&mut self, node: &Program) {
        walk_program(self, node)
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn visit_statement(&mut self, node: &Statement) {
        walk_statement(self, node)
    }

    fn visit_block(&mut self, node: &Block) {
        walk_block(self, node)
    }

    fn visit_empty_statement(&mut self, _span: Span) {}

    fn visit_debugger_statement(&mut self, _span: Span) {}

    fn visit_expression_statement(&mut self, node: &ExpressionStatement) {
        walk_expression_statement(self, node)
    }

    fn visit_if_statement(&mut self, node: &IfStatement) {
        walk_if_statement(self, node)
    }

    fn visit_for_statement(&mut self, node: &ForStatement) {
        walk_for_statement(self, node)
    }

    fn visit_for_in_statement(&mut self, node: &ForInStatement) {
        walk_for_in_statement(self, node)
    }

    fn visit_for_of_statement(&mut self, node: &ForOfStatement) {
        walk_for_of_statement(self, node)
    }

    fn visit_for_head(&mut self, node: &ForHead) {
        walk_for_head(self, node)
    }

    fn visit_while_statement(&mut self, node: &WhileStatement) {
        walk_while_statement(self, node)
    }

    fn visit_do_while_statement(&mut self, node: &DoWhileStatement) {
        walk_do_while_statement(self, node)
    }

    fn visit_switch_statement(&mut self, node: &SwitchStatement) {
        walk_switch_statement(self, node)
    }

    fn visit_switch_case(&mut self, node: &SwitchCase) {
        walk_switch_case(self, node)
    }

    fn visit_try_statement(&mut self, node: &TryStatement) {
        walk_try_statement(self, node)
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        walk_catch_clause(self, node)
    }

    fn visit_throw_statement(&mut self, node: &ThrowStatement) {
        walk_throw_statement(self, node)
    }

    fn visit_return_statement(&mut self, node: &ReturnStatement) {
        walk_return_statement(self, node)
    }

    fn visit_break_statement(&mut self, node: &BreakStatement) {
        if let Some(label) = &node.label {
            self.visit_label_identifier(label);
        }
    }

    fn visit_continue_statement(&mut self, node: &ContinueStatement) {
        if let Some(label) = &node.label {
            self.visit_label_identifier(label);
        }
    }

    fn visit_labeled_statement(&mut self, node: &LabeledStatement) {
        walk_labeled_statement(self, node)
    }

    fn visit_with_statement(&mut self, node: &WithStatement) {
        walk_with_statement(self, node)
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) {
        walk_variable_declaration(self, node)
    }

    fn visit_variable_declarator(&mut self, node: &VariableDeclarator) {
        walk_variable_declarator(self, node)
    }

    // ------------------------------------------------------------------
    // Functions and classes
    // ------------------------------------------------------------------

    /// Called for declarations, expressions and method values alike.
    fn visit_function(&mut self, node: &Function) {
        walk_function(self, node)
    }

    fn visit_parameter_list(&mut self, node: &ParameterList) {
        walk_parameter_list(self, node)
    }

    fn visit_arrow_function(&mut self, node: &ArrowFunction) {
        walk_arrow_function(self, node)
    }

    fn visit_class(&mut self, node: &Class) {
        walk_class(self, node)
    }

    fn visit_class_body(&mut self, node: &ClassBody) {
        walk_class_body(self, node)
    }

    fn visit_class_element(&mut self, node: &ClassElement) {
        walk_class_element(self, node)
    }

    fn visit_method_definition(&mut self, node: &MethodDefinition) {
        walk_method_definition(self, node)
    }

    fn visit_field_definition(&mut self, node: &FieldDefinition) {
        walk_field_definition(self, node)
    }

    fn visit_static_block(&mut self, node: &StaticBlock) {
        walk_static_block(self, node)
    }

    fn visit_property_key(&mut self, node: &PropertyKey) {
        walk_property_key(self, node)
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn visit_expression(&mut self, node: &Expression) {
        walk_expression(self, node)
    }

    fn visit_boolean_literal(&mut self, _node: &BooleanLiteral) {}

    fn visit_null_literal(&mut self, _span: Span) {}

    fn visit_number_literal(&mut self, _node: &NumberLiteral) {}

    fn visit_bigint_literal(&mut self, _node: &BigIntLiteral) {}

    fn visit_string_literal(&mut self, _node: &StringLiteral) {}

    fn visit_regexp_literal(&mut self, _node: &RegExpLiteral) {}

    fn visit_template_literal(&mut self, node: &TemplateLiteral) {
        walk_template_literal(self, node)
    }

    fn visit_template_element(&mut self, _node: &TemplateElement) {}

    fn visit_tagged_template(&mut self, node: &TaggedTemplate) {
        walk_tagged_template(self, node)
    }

    fn visit_array_literal(&mut self, node: &ArrayLiteral) {
        walk_array_literal(self, node)
    }

    fn visit_object_literal(&mut self, node: &ObjectLiteral) {
        walk_object_literal(self, node)
    }

    fn visit_object_member(&mut self, node: &ObjectMember) {
        walk_object_member(self, node)
    }

    fn visit_property(&mut self, node: &Property) {
        walk_property(self, node)
    }

    fn visit_shorthand_property(&mut self, node: &ShorthandProperty) {
        walk_shorthand_property(self, node)
    }

    fn visit_spread_element(&mut self, node: &SpreadElement) {
        walk_spread_element(self, node)
    }

    fn visit_unary_expression(&mut self, node: &UnaryExpression) {
        walk_unary_expression(self, node)
    }

    fn visit_update_expression(&mut self, node: &UpdateExpression) {
        walk_update_expression(self, node)
    }

    fn visit_binary_expression(&mut self, node: &BinaryExpression) {
        walk_binary_expression(self, node)
    }

    fn visit_assignment_expression(&mut self, node: &AssignmentExpression) {
        walk_assignment_expression(self, node)
    }

    fn visit_conditional_expression(&mut self, node: &ConditionalExpression) {
        walk_conditional_expression(self, node)
    }

    fn visit_call_expression(&mut self, node: &CallExpression) {
        walk_call_expression(self, node)
    }

    fn visit_new_expression(&mut self, node: &NewExpression) {
        walk_new_expression(self, node)
    }

    fn visit_member_expression(&mut self, node: &MemberExpression) {
        walk_member_expression(self, node)
    }

    fn visit_optional_chain(&mut self, node: &OptionalChain) {
        walk_optional_chain(self, node)
    }

    fn visit_sequence_expression(&mut self, node: &SequenceExpression) {
        walk_sequence_expression(self, node)
    }

    fn visit_yield_expression(&mut self, node: &YieldExpression) {
        walk_yield_expression(self, node)
    }

    fn visit_await_expression(&mut self, node: &AwaitExpression) {
        walk_await_expression(self, node)
    }

    fn visit_this_expression(&mut self, _span: Span) {}

    fn visit_super(&mut self, _span: Span) {}

    fn visit_meta_property(&mut self, node: &MetaProperty) {
        self.visit_property_identifier(&node.meta);
        self.visit_property_identifier(&node.property);
    }

    // ------------------------------------------------------------------
    // Patterns
    // ------------------------------------------------------------------

    fn visit_pattern(&mut self, node: &Pattern) {
        walk_pattern(self, node)
    }

    fn visit_array_pattern(&mut self, node: &ArrayPattern) {
        walk_array_pattern(self, node)
    }

    fn visit_object_pattern(&mut self, node: &ObjectPattern) {
        walk_object_pattern(self, node)
    }

    fn visit_pattern_property(&mut self, node: &PatternProperty) {
        walk_pattern_property(self, node)
    }

    fn visit_binding_element(&mut self, node: &BindingElement) {
        walk_binding_element(self, node)
    }

    fn visit_rest_element(&mut self, node: &RestElement) {
        walk_rest_element(self, node)
    }

    // ------------------------------------------------------------------
    // Identifiers
    // ------------------------------------------------------------------

    /// An identifier read or written in expression position.
    fn visit_identifier_reference(&mut self, _node: &Identifier) {}

    /// An identifier that declares a name or is a plain assignment target.
    fn visit_binding_identifier(&mut self, _node: &Identifier) {}

    fn visit_label_identifier(&mut self, _node: &Identifier) {}

    /// A non-computed property name, member name, or `new.target` part.
    fn visit_property_identifier(&mut self, _node: &Identifier) {}

    fn visit_private_identifier(&mut self, _node: &PrivateIdentifier) {}
}

// ============================================================================
// Walk functions
// ============================================================================

pub fn walk_program<V: Visit + ?Sized>(v: &mut V, node: &Program) {
    for stmt in &node.body {
        v.visit_statement(stmt);
    }
}

pub fn walk_statement<V: Visit + ?Sized>(v: &mut V, node: &Statement) {
    match node {
        Statement::Block(n) => v.visit_block(n),
        Statement::Empty(span) => v.visit_empty_statement(*span),
        Statement::Expression(n) => v.visit_expression_statement(n),
        Statement::If(n) => v.visit_if_statement(n),
        Statement::For(n) => v.visit_for_statement(n),
        Statement::ForIn(n) => v.visit_for_in_statement(n),
        Statement::ForOf(n) => v.visit_for_of_statement(n),
        Statement::While(n) => v.visit_while_statement(n),
        Statement::DoWhile(n) => v.visit_do_while_statement(n),
        Statement::Switch(n) => v.visit_switch_statement(n),
        Statement::Try(n) => v.visit_try_statement(n),
        Statement::Throw(n) => v.visit_throw_statement(n),
        Statement::Return(n) => v.visit_return_statement(n),
        Statement::Break(n) => v.visit_break_statement(n),
        Statement::Continue(n) => v.visit_continue_statement(n),
        Statement::Labeled(n) => v.visit_labeled_statement(n),
        Statement::With(n) => v.visit_with_statement(n),
        Statement::Debugger(span) => v.visit_debugger_statement(*span),
        Statement::VariableDeclaration(n) => v.visit_variable_declaration(n),
        Statement::FunctionDeclaration(n) => v.visit_function(n),
        Statement::ClassDeclaration(n) => v.visit_class(n),
    }
}

pub fn walk_block<V: Visit + ?Sized>(v: &mut V, node: &Block) {
    for stmt in &node.body {
        v.visit_statement(stmt);
    }
}

pub fn walk_expression_statement<V: Visit + ?Sized>(v: &mut V, node: &ExpressionStatement) {
    v.visit_expression(&node.expression);
}

pub fn walk_if_statement<V: Visit + ?Sized>(v: &mut V, node: &IfStatement) {
    v.visit_expression(&node.test);
    v.visit_statement(&node.consequent);
    if let Some(alternate) = &node.alternate {
        v.visit_statement(alternate);
    }
}

pub fn walk_for_statement<V: Visit + ?Sized>(v: &mut V, node: &ForStatement) {
    match &node.init {
        Some(ForInit::VariableDeclaration(decl)) => v.visit_variable_declaration(decl),
        Some(ForInit::Expression(expr)) => v.visit_expression(expr),
        None => {}
    }
    if let Some(test) = &node.test {
        v.visit_expression(test);
    }
    if let Some(update) = &node.update {
        v.visit_expression(update);
    }
    v.visit_statement(&node.body);
}

pub fn walk_for_in_statement<V: Visit + ?Sized>(v: &mut V, node: &ForInStatement) {
    v.visit_for_head(&node.left);
    v.visit_expression(&node.right);
    v.visit_statement(&node.body);
}

pub fn walk_for_of_statement<V: Visit + ?Sized>(v: &mut V, node: &ForOfStatement) {
    v.visit_for_head(&node.left);
    v.visit_expression(&node.right);
    v.visit_statement(&node.body);
}

pub fn walk_for_head<V: Visit + ?Sized>(v: &mut V, node: &ForHead) {
    match node {
        ForHead::VariableDeclaration(decl) => v.visit_variable_declaration(decl),
        ForHead::Pattern(pattern) => v.visit_pattern(pattern),
    }
}

pub fn walk_while_statement<V: Visit + ?Sized>(v: &mut V, node: &WhileStatement) {
    v.visit_expression(&node.test);
    v.visit_statement(&node.body);
}

pub fn walk_do_while_statement<V: Visit + ?Sized>(v: &mut V, node: &DoWhileStatement) {
    v.visit_statement(&node.body);
    v.visit_expression(&node.test);
}

pub fn walk_switch_statement<V: Visit + ?Sized>(v: &mut V, node: &SwitchStatement) {
    v.visit_expression(&node.discriminant);
    for case in &node.cases {
        v.visit_switch_case(case);
    }
}

pub fn walk_switch_case<V: Visit + ?Sized>(v: &mut V, node: &SwitchCase) {
    if let Some(test) = &node.test {
        v.visit_expression(test);
    }
    for stmt in &node.consequent {
        v.visit_statement(stmt);
    }
}

pub fn walk_try_statement<V: Visit + ?Sized>(v: &mut V, node: &TryStatement) {
    v.visit_block(&node.block);
    if let Some(handler) = &node.handler {
        v.visit_catch_clause(handler);
    }
    if let Some(finalizer) = &node.finalizer {
        v.visit_block(finalizer);
    }
}

pub fn walk_catch_clause<V: Visit + ?Sized>(v: &mut V, node: &CatchClause) {
    if let Some(param) = &node.param {
        v.visit_pattern(param);
    }
    v.visit_block(&node.body);
}

pub fn walk_throw_statement<V: Visit + ?Sized>(v: &mut V, node: &ThrowStatement) {
    v.visit_expression(&node.argument);
}

pub fn walk_return_statement<V: Visit + ?Sized>(v: &mut V, node: &ReturnStatement) {
    if let Some(argument) = &node.argument {
        v.visit_expression(argument);
    }
}

pub fn walk_labeled_statement<V: Visit + ?Sized>(v: &mut V, node: &LabeledStatement) {
    v.visit_label_identifier(&node.label);
    v.visit_statement(&node.body);
}

pub fn walk_with_statement<V: Visit + ?Sized>(v: &mut V, node: &WithStatement) {
    v.visit_expression(&node.object);
    v.visit_statement(&node.body);
}

pub fn walk_variable_declaration<V: Visit + ?Sized>(v: &mut V, node: &VariableDeclaration) {
    for declarator in &node.declarations {
        v.visit_variable_declarator(declarator);
    }
}

pub fn walk_variable_declarator<V: Visit + ?Sized>(v: &mut V, node: &VariableDeclarator) {
    v.visit_pattern(&node.id);
    if let Some(init) = &node.init {
        v.visit_expression(init);
    }
}

pub fn walk_function<V: Visit + ?Sized>(v: &mut V, node: &Function) {
    if let Some(name) = &node.name {
        v.visit_binding_identifier(name);
    }
    v.visit_parameter_list(&node.params);
    v.visit_block(&node.body);
}

pub fn walk_parameter_list<V: Visit + ?Sized>(v: &mut V, node: &ParameterList) {
    for param in &node.params {
        v.visit_binding_element(param);
    }
    if let Some(rest) = &node.rest {
        v.visit_rest_element(rest);
    }
}

pub fn walk_arrow_function<V: Visit + ?Sized>(v: &mut V, node: &ArrowFunction) {
    v.visit_parameter_list(&node.params);
    match &node.body {
        ArrowBody::Expression(expr) => v.visit_expression(expr),
        ArrowBody::Block(block) => v.visit_block(block),
    }
}

pub fn walk_class<V: Visit + ?Sized>(v: &mut V, node: &Class) {
    if let Some(name) = &node.name {
        v.visit_binding_identifier(name);
    }
    if let Some(super_class) = &node.super_class {
        v.visit_expression(super_class);
    }
    v.visit_class_body(&node.body);
}

pub fn walk_class_body<V: Visit + ?Sized>(v: &mut V, node: &ClassBody) {
    for element in &node.elements {
        v.visit_class_element(element);
    }
}

pub fn walk_class_element<V: Visit + ?Sized>(v: &mut V, node: &ClassElement) {
    match node {
        ClassElement::Method(n) => v.visit_method_definition(n),
        ClassElement::Field(n) => v.visit_field_definition(n),
        ClassElement::StaticBlock(n) => v.visit_static_block(n),
    }
}

pub fn walk_method_definition<V: Visit + ?Sized>(v: &mut V, node: &MethodDefinition) {
    v.visit_property_key(&node.key);
    v.visit_function(&node.value);
}

pub fn walk_field_definition<V: Visit + ?Sized>(v: &mut V, node: &FieldDefinition) {
    v.visit_property_key(&node.key);
    if let Some(value) = &node.value {
        v.visit_expression(value);
    }
}

pub fn walk_static_block<V: Visit + ?Sized>(v: &mut V, node: &StaticBlock) {
    for stmt in &node.body {
        v.visit_statement(stmt);
    }
}

pub fn walk_property_key<V: Visit + ?Sized>(v: &mut V, node: &PropertyKey) {
    match node {
        PropertyKey::Identifier(id) => v.visit_property_identifier(id),
        PropertyKey::String(lit) => v.visit_string_literal(lit),
        PropertyKey::Number(lit) => v.visit_number_literal(lit),
        PropertyKey::BigInt(lit) => v.visit_bigint_literal(lit),
        PropertyKey::Private(id) => v.visit_private_identifier(id),
        PropertyKey::Computed(expr) => v.visit_expression(expr),
    }
}

pub fn walk_expression<V: Visit + ?Sized>(v: &mut V, node: &Expression) {
    match node {
        Expression::Identifier(id) => v.visit_identifier_reference(id),
        Expression::PrivateName(id) => v.visit_private_identifier(id),
        Expression::Boolean(n) => v.visit_boolean_literal(n),
        Expression::Null(span) => v.visit_null_literal(*span),
        Expression::Number(n) => v.visit_number_literal(n),
        Expression::BigInt(n) => v.visit_bigint_literal(n),
        Expression::String(n) => v.visit_string_literal(n),
        Expression::RegExp(n) => v.visit_regexp_literal(n),
        Expression::Template(n) => v.visit_template_literal(n),
        Expression::TaggedTemplate(n) => v.visit_tagged_template(n),
        Expression::Array(n) => v.visit_array_literal(n),
        Expression::Object(n) => v.visit_object_literal(n),
        Expression::Function(n) => v.visit_function(n),
        Expression::Arrow(n) => v.visit_arrow_function(n),
        Expression::Class(n) => v.visit_class(n),
        Expression::Unary(n) => v.visit_unary_expression(n),
        Expression::Update(n) => v.visit_update_expression(n),
        Expression::Binary(n) => v.visit_binary_expression(n),
        Expression::Assignment(n) => v.visit_assignment_expression(n),
        Expression::Conditional(n) => v.visit_conditional_expression(n),
        Expression::Call(n) => v.visit_call_expression(n),
        Expression::New(n) => v.visit_new_expression(n),
        Expression::Member(n) => v.visit_member_expression(n),
        Expression::OptionalChain(n) => v.visit_optional_chain(n),
        Expression::Sequence(n) => v.visit_sequence_expression(n),
        Expression::Spread(n) => v.visit_spread_element(n),
        Expression::Yield(n) => v.visit_yield_expression(n),
        Expression::Await(n) => v.visit_await_expression(n),
        Expression::This(span) => v.visit_this_expression(*span),
        Expression::Super(span) => v.visit_super(*span),
        Expression::MetaProperty(n) => v.visit_meta_property(n),
    }
}

/// Visits quasis and expressions interleaved, in source order.
pub fn walk_template_literal<V: Visit + ?Sized>(v: &mut V, node: &TemplateLiteral) {
    let mut expressions = node.expressions.iter();
    for quasi in &node.quasis {
        v.visit_template_element(quasi);
        if let Some(expr) = expressions.next() {
            v.visit_expression(expr);
        }
    }
}

pub fn walk_tagged_template<V: Visit + ?Sized>(v: &mut V, node: &TaggedTemplate) {
    v.visit_expression(&node.tag);
    v.visit_template_literal(&node.quasi);
}

pub fn walk_array_literal<V: Visit + ?Sized>(v: &mut V, node: &ArrayLiteral) {
    for element in node.elements.iter().flatten() {
        v.visit_expression(element);
    }
}

pub fn walk_object_literal<V: Visit + ?Sized>(v: &mut V, node: &ObjectLiteral) {
    for member in &node.properties {
        v.visit_object_member(member);
    }
}

pub fn walk_object_member<V: Visit + ?Sized>(v: &mut V, node: &ObjectMember) {
    match node {
        ObjectMember::Property(n) => v.visit_property(n),
        ObjectMember::Shorthand(n) => v.visit_shorthand_property(n),
        ObjectMember::Spread(n) => v.visit_spread_element(n),
    }
}

pub fn walk_property<V: Visit + ?Sized>(v: &mut V, node: &Property) {
    v.visit_property_key(&node.key);
    v.visit_expression(&node.value);
}

pub fn walk_shorthand_property<V: Visit + ?Sized>(v: &mut V, node: &ShorthandProperty) {
    v.visit_identifier_reference(&node.name);
    if let Some(initializer) = &node.initializer {
        v.visit_expression(initializer);
    }
}

pub fn walk_spread_element<V: Visit + ?Sized>(v: &mut V, node: &SpreadElement) {
    v.visit_expression(&node.argument);
}

pub fn walk_unary_expression<V: Visit + ?Sized>(v: &mut V, node: &UnaryExpression) {
    v.visit_expression(&node.argument);
}

pub fn walk_update_expression<V: Visit + ?Sized>(v: &mut V, node: &UpdateExpression) {
    v.visit_expression(&node.argument);
}

pub fn walk_binary_expression<V: Visit + ?Sized>(v: &mut V, node: &BinaryExpression) {
    v.visit_expression(&node.left);
    v.visit_expression(&node.right);
}

pub fn walk_assignment_expression<V: Visit + ?Sized>(v: &mut V, node: &AssignmentExpression) {
    v.visit_pattern(&node.target);
    v.visit_expression(&node.value);
}

pub fn walk_conditional_expression<V: Visit + ?Sized>(v: &mut V, node: &ConditionalExpression) {
    v.visit_expression(&node.test);
    v.visit_expression(&node.consequent);
    v.visit_expression(&node.alternate);
}

pub fn walk_call_expression<V: Visit + ?Sized>(v: &mut V, node: &CallExpression) {
    v.visit_expression(&node.callee);
    for argument in &node.arguments {
        v.visit_expression(argument);
    }
}

pub fn walk_new_expression<V: Visit + ?Sized>(v: &mut V, node: &NewExpression) {
    v.visit_expression(&node.callee);
    for argument in &node.arguments {
        v.visit_expression(argument);
    }
}

pub fn walk_member_expression<V: Visit + ?Sized>(v: &mut V, node: &MemberExpression) {
    v.visit_expression(&node.object);
    match &node.property {
        MemberProperty::Identifier(id) => v.visit_property_identifier(id),
        MemberProperty::Private(id) => v.visit_private_identifier(id),
        MemberProperty::Computed(expr) => v.visit_expression(expr),
    }
}

pub fn walk_optional_chain<V: Visit + ?Sized>(v: &mut V, node: &OptionalChain) {
    v.visit_expression(&node.expression);
}

pub fn walk_sequence_expression<V: Visit + ?Sized>(v: &mut V, node: &SequenceExpression) {
    for expr in &node.expressions {
        v.visit_expression(expr);
    }
}

pub fn walk_yield_expression<V: Visit + ?Sized>(v: &mut V, node: &YieldExpression) {
    if let Some(argument) = &node.argument {
        v.visit_expression(argument);
    }
}

pub fn walk_await_expression<V: Visit + ?Sized>(v: &mut V, node: &AwaitExpression) {
    v.visit_expression(&node.argument);
}

pub fn walk_pattern<V: Visit + ?Sized>(v: &mut V, node: &Pattern) {
    match node {
        Pattern::Identifier(id) => v.visit_binding_identifier(id),
        Pattern::Array(n) => v.visit_array_pattern(n),
        Pattern::Object(n) => v.visit_object_pattern(n),
        Pattern::Member(expr) => v.visit_expression(expr),
    }
}

pub fn walk_array_pattern<V: Visit + ?Sized>(v: &mut V, node: &ArrayPattern) {
    for element in node.elements.iter().flatten() {
        v.visit_binding_element(element);
    }
    if let Some(rest) = &node.rest {
        v.visit_rest_element(rest);
    }
}

pub fn walk_object_pattern<V: Visit + ?Sized>(v: &mut V, node: &ObjectPattern) {
    for property in &node.properties {
        v.visit_pattern_property(property);
    }
    if let Some(rest) = &node.rest {
        v.visit_rest_element(rest);
    }
}

/// Shorthand properties skip the key: the bound identifier already names it.
pub fn walk_pattern_property<V: Visit + ?Sized>(v: &mut V, node: &PatternProperty) {
    if !node.shorthand {
        v.visit_property_key(&node.key);
    }
    v.visit_binding_element(&node.value);
}

pub fn walk_binding_element<V: Visit + ?Sized>(v: &mut V, node: &BindingElement) {
    v.visit_pattern(&node.target);
    if let Some(initializer) = &node.initializer {
        v.visit_expression(initializer);
    }
}

pub fn walk_rest_element<V: Visit + ?Sized>(v: &mut V, node: &RestElement) {
    v.visit_pattern(&node.argument);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Names {
        references: Vec<String>,
        bindings: Vec<String>,
        properties: Vec<String>,
    }

    impl Visit for Names {
        fn visit_identifier_reference(&mut self, node: &Identifier) {
            self.references.push(node.name.clone());
        }

        fn visit_binding_identifier(&mut self, node: &Identifier) {
            self.bindings.push(node.name.clone());
        }

        fn visit_property_identifier(&mut self, node: &Identifier) {
            self.properties.push(node.name.clone());
        }
    }

    fn ident(name: &str) -> Identifier {
        Identifier::new(Span::new(1, 2), name)
    }

    #[test]
    fn test_identifier_roles() {
        // let x = a.b;
        let program = Program {
            span: Span::new(1, 13),
            body: vec![Statement::VariableDeclaration(VariableDeclaration {
                span: Span::new(1, 13),
                kind: VariableKind::Let,
                declarations: vec![VariableDeclarator {
                    span: Span::new(5, 12),
                    id: Pattern::Identifier(ident("x")),
                    init: Some(Expression::Member(MemberExpression {
                        span: Span::new(9, 12),
                        object: Box::new(Expression::Identifier(ident("a"))),
                        property: MemberProperty::Identifier(ident("b")),
                        optional: false,
                    })),
                }],
            })],
        };
        let mut names = Names::default();
        names.visit_program(&program);
        assert_eq!(names.bindings, vec!["x"]);
        assert_eq!(names.references, vec!["a"]);
        assert_eq!(names.properties, vec!["b"]);
    }

    #[test]
    fn test_template_walk_interleaves() {
        #[derive(Default)]
        struct Order(Vec<String>);
        impl Visit for Order {
            fn visit_template_element(&mut self, node: &TemplateElement) {
                self.0.push(node.raw.clone());
            }
            fn visit_identifier_reference(&mut self, node: &Identifier) {
                self.0.push(node.name.clone());
            }
        }

        let element = |raw: &str, tail: bool| TemplateElement {
            span: Span::new(1, 2),
            raw: raw.to_string(),
            cooked: Some(raw.to_string()),
            tail,
        };
        let template = TemplateLiteral {
            span: Span::new(1, 20),
            quasis: vec![element("a", false), element("b", false), element("c", true)],
            expressions: vec![Expression::Identifier(ident("x")), Expression::Identifier(ident("y"))],
        };
        let mut order = Order::default();
        order.visit_template_literal(&template);
        assert_eq!(order.0, vec!["a", "x", "b", "y", "c"]);
    }
}
