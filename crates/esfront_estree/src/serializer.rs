//! ESTree serializer.
//!
//! `Serializer` is a `Visit` consumer with a value stack: every callback
//! pushes exactly one JSON node, and composite callbacks pop the values of
//! the children they visit. The helpers `statement`, `expression` and
//! `pattern` wrap that visit-then-pop step.

use esfront_ast::node::*;
use esfront_ast::visitor::{walk_statement, Visit};
use esfront_core::text::Span;
use serde_json::{Map, Value};

type Node = Map<String, Value>;

fn estree_node(kind: &str) -> Node {
    let mut map = Map::new();
    map.insert("type".to_string(), Value::from(kind));
    map
}

fn set(map: &mut Node, key: &str, value: impl Into<Value>) {
    map.insert(key.to_string(), value.into());
}

fn set_position(map: &mut Node, span: Span) {
    let (start, end) = span.offsets();
    set(map, "start", start);
    set(map, "end", end);
}

fn set_scope(map: &mut Node, scope_context: ScopeContext) {
    if scope_context != 0 {
        set(map, "scopeContext", scope_context);
    }
}

/// Integral values in the safe range print without a fraction.
fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= 1e15 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

pub struct Serializer {
    stack: Vec<Value>,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn serialize_program(program: &Program) -> Value {
        let mut serializer = Self::new();
        serializer.visit_program(program);
        serializer.take()
    }

    fn emit(&mut self, map: Node) {
        self.stack.push(Value::Object(map));
    }

    fn take(&mut self) -> Value {
        self.stack.pop().unwrap_or(Value::Null)
    }

    // ========================================================================
    // Child helpers
    // ========================================================================

    fn statement(&mut self, node: &Statement) -> Value {
        self.visit_statement(node);
        self.take()
    }

    fn statements(&mut self, list: &[Statement]) -> Value {
        Value::Array(list.iter().map(|s| self.statement(s)).collect())
    }

    fn expression(&mut self, node: &Expression) -> Value {
        self.visit_expression(node);
        self.take()
    }

    fn optional_expression(&mut self, node: Option<&Expression>) -> Value {
        match node {
            Some(expr) => self.expression(expr),
            None => Value::Null,
        }
    }

    fn expressions(&mut self, list: &[Expression]) -> Value {
        Value::Array(list.iter().map(|e| self.expression(e)).collect())
    }

    fn pattern(&mut self, node: &Pattern) -> Value {
        self.visit_pattern(node);
        self.take()
    }

    fn block(&mut self, node: &Block) -> Value {
        self.visit_block(node);
        self.take()
    }

    fn property_key(&mut self, key: &PropertyKey) -> Value {
        self.visit_property_key(key);
        self.take()
    }

    fn binding_element(&mut self, node: &BindingElement) -> Value {
        self.visit_binding_element(node);
        self.take()
    }

    fn rest_element(&mut self, node: &RestElement) -> Value {
        self.visit_rest_element(node);
        self.take()
    }

    fn identifier(&mut self, id: &Identifier) -> Value {
        let mut map = estree_node("Identifier");
        set(&mut map, "name", id.name.as_str());
        set_scope(&mut map, id.scope_context);
        set_position(&mut map, id.span);
        Value::Object(map)
    }

    fn optional_identifier(&mut self, id: Option<&Identifier>) -> Value {
        match id {
            Some(id) => self.identifier(id),
            None => Value::Null,
        }
    }

    fn parameters(&mut self, params: &ParameterList) -> Value {
        let mut list: Vec<Value> = params.params.iter().map(|p| self.binding_element(p)).collect();
        if let Some(rest) = &params.rest {
            list.push(self.rest_element(rest));
        }
        Value::Array(list)
    }

    fn function(&mut self, func: &Function, kind: &str) -> Value {
        let mut map = estree_node(kind);
        set(&mut map, "id", self.optional_identifier(func.name.as_ref()));
        set(&mut map, "params", self.parameters(&func.params));
        set(&mut map, "body", self.block(&func.body));
        set(&mut map, "generator", func.is_generator);
        set(&mut map, "async", func.is_async);
        set_scope(&mut map, func.scope_context);
        set_position(&mut map, func.span);
        Value::Object(map)
    }

    fn class(&mut self, class: &Class, kind: &str) -> Value {
        let mut map = estree_node(kind);
        set(&mut map, "id", self.optional_identifier(class.name.as_ref()));
        let super_class = self.optional_expression(class.super_class.as_deref());
        set(&mut map, "superClass", super_class);

        let mut body = estree_node("ClassBody");
        let elements = class
            .body
            .elements
            .iter()
            .map(|element| {
                self.visit_class_element(element);
                self.take()
            })
            .collect::<Vec<_>>();
        set(&mut body, "body", elements);
        set_position(&mut body, class.body.span);
        set(&mut map, "body", body);

        set_scope(&mut map, class.scope_context);
        set_position(&mut map, class.span);
        Value::Object(map)
    }

    fn template(&mut self, template: &TemplateLiteral) -> Value {
        self.visit_template_literal(template);
        self.take()
    }
}

impl Visit for Serializer {
    fn visit_program(&mut self, node: &Program) {
        let mut map = estree_node("Program");
        set(&mut map, "body", self.statements(&node.body));
        set(&mut map, "sourceType", "script");
        if !node.body.is_empty() {
            set_position(&mut map, node.span);
        }
        self.emit(map);
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn visit_statement(&mut self, node: &Statement) {
        match node {
            Statement::FunctionDeclaration(func) => {
                let value = self.function(func, "FunctionDeclaration");
                self.stack.push(value);
            }
            Statement::ClassDeclaration(class) => {
                let value = self.class(class, "ClassDeclaration");
                self.stack.push(value);
            }
            _ => walk_statement(self, node),
        }
    }

    fn visit_block(&mut self, node: &Block) {
        let mut map = estree_node("BlockStatement");
        set(&mut map, "body", self.statements(&node.body));
        set_scope(&mut map, node.scope_context);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_empty_statement(&mut self, span: Span) {
        let mut map = estree_node("EmptyStatement");
        set_position(&mut map, span);
        self.emit(map);
    }

    fn visit_debugger_statement(&mut self, span: Span) {
        let mut map = estree_node("DebuggerStatement");
        set_position(&mut map, span);
        self.emit(map);
    }

    fn visit_expression_statement(&mut self, node: &ExpressionStatement) {
        let mut map = estree_node("ExpressionStatement");
        set(&mut map, "expression", self.expression(&node.expression));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_if_statement(&mut self, node: &IfStatement) {
        let mut map = estree_node("IfStatement");
        set(&mut map, "test", self.expression(&node.test));
        set(&mut map, "consequent", self.statement(&node.consequent));
        let alternate = match &node.alternate {
            Some(alternate) => self.statement(alternate),
            None => Value::Null,
        };
        set(&mut map, "alternate", alternate);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_for_statement(&mut self, node: &ForStatement) {
        let mut map = estree_node("ForStatement");
        let init = match &node.init {
            Some(ForInit::VariableDeclaration(decl)) => {
                self.visit_variable_declaration(decl);
                self.take()
            }
            Some(ForInit::Expression(expr)) => self.expression(expr),
            None => Value::Null,
        };
        set(&mut map, "init", init);
        set(&mut map, "test", self.optional_expression(node.test.as_ref()));
        set(&mut map, "update", self.optional_expression(node.update.as_ref()));
        set(&mut map, "body", self.statement(&node.body));
        set_scope(&mut map, node.scope_context);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_for_in_statement(&mut self, node: &ForInStatement) {
        let mut map = estree_node("ForInStatement");
        self.visit_for_head(&node.left);
        set(&mut map, "left", self.take());
        set(&mut map, "right", self.expression(&node.right));
        set(&mut map, "body", self.statement(&node.body));
        set_scope(&mut map, node.scope_context);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_for_of_statement(&mut self, node: &ForOfStatement) {
        let mut map = estree_node("ForOfStatement");
        self.visit_for_head(&node.left);
        set(&mut map, "left", self.take());
        set(&mut map, "right", self.expression(&node.right));
        set(&mut map, "body", self.statement(&node.body));
        set(&mut map, "await", node.is_await);
        set_scope(&mut map, node.scope_context);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_while_statement(&mut self, node: &WhileStatement) {
        let mut map = estree_node("WhileStatement");
        set(&mut map, "test", self.expression(&node.test));
        set(&mut map, "body", self.statement(&node.body));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_do_while_statement(&mut self, node: &DoWhileStatement) {
        let mut map = estree_node("DoWhileStatement");
        set(&mut map, "body", self.statement(&node.body));
        set(&mut map, "test", self.expression(&node.test));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_switch_statement(&mut self, node: &SwitchStatement) {
        let mut map = estree_node("SwitchStatement");
        set(&mut map, "discriminant", self.expression(&node.discriminant));
        let cases = node
            .cases
            .iter()
            .map(|case| {
                self.visit_switch_case(case);
                self.take()
            })
            .collect::<Vec<_>>();
        set(&mut map, "cases", cases);
        set_scope(&mut map, node.scope_context);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_switch_case(&mut self, node: &SwitchCase) {
        let mut map = estree_node("SwitchCase");
        set(&mut map, "test", self.optional_expression(node.test.as_ref()));
        set(&mut map, "consequent", self.statements(&node.consequent));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_try_statement(&mut self, node: &TryStatement) {
        let mut map = estree_node("TryStatement");
        set(&mut map, "block", self.block(&node.block));
        let handler = match &node.handler {
            Some(handler) => {
                self.visit_catch_clause(handler);
                self.take()
            }
            None => Value::Null,
        };
        set(&mut map, "handler", handler);
        let finalizer = match &node.finalizer {
            Some(finalizer) => self.block(finalizer),
            None => Value::Null,
        };
        set(&mut map, "finalizer", finalizer);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        let mut map = estree_node("CatchClause");
        let param = match &node.param {
            Some(param) => self.pattern(param),
            None => Value::Null,
        };
        set(&mut map, "param", param);
        set(&mut map, "body", self.block(&node.body));
        set_scope(&mut map, node.scope_context);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_throw_statement(&mut self, node: &ThrowStatement) {
        let mut map = estree_node("ThrowStatement");
        set(&mut map, "argument", self.expression(&node.argument));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_return_statement(&mut self, node: &ReturnStatement) {
        let mut map = estree_node("ReturnStatement");
        set(&mut map, "argument", self.optional_expression(node.argument.as_ref()));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_break_statement(&mut self, node: &BreakStatement) {
        let mut map = estree_node("BreakStatement");
        set(&mut map, "label", self.optional_identifier(node.label.as_ref()));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_continue_statement(&mut self, node: &ContinueStatement) {
        let mut map = estree_node("ContinueStatement");
        set(&mut map, "label", self.optional_identifier(node.label.as_ref()));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_labeled_statement(&mut self, node: &LabeledStatement) {
        let mut map = estree_node("LabeledStatement");
        set(&mut map, "label", self.identifier(&node.label));
        set(&mut map, "body", self.statement(&node.body));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_with_statement(&mut self, node: &WithStatement) {
        let mut map = estree_node("WithStatement");
        set(&mut map, "object", self.expression(&node.object));
        set(&mut map, "body", self.statement(&node.body));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) {
        let mut map = estree_node("VariableDeclaration");
        let declarations = node
            .declarations
            .iter()
            .map(|declarator| {
                self.visit_variable_declarator(declarator);
                self.take()
            })
            .collect::<Vec<_>>();
        set(&mut map, "declarations", declarations);
        set(&mut map, "kind", node.kind.as_str());
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_variable_declarator(&mut self, node: &VariableDeclarator) {
        let mut map = estree_node("VariableDeclarator");
        set(&mut map, "id", self.pattern(&node.id));
        set(&mut map, "init", self.optional_expression(node.init.as_ref()));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    // ========================================================================
    // Functions and classes
    // ========================================================================

    fn visit_function(&mut self, node: &Function) {
        let value = self.function(node, "FunctionExpression");
        self.stack.push(value);
    }

    fn visit_arrow_function(&mut self, node: &ArrowFunction) {
        let mut map = estree_node("ArrowFunctionExpression");
        set(&mut map, "id", Value::Null);
        set(&mut map, "params", self.parameters(&node.params));
        let (body, expression) = match &node.body {
            ArrowBody::Block(block) => (self.block(block), false),
            ArrowBody::Expression(expr) => (self.expression(expr), true),
        };
        set(&mut map, "body", body);
        set(&mut map, "expression", expression);
        set(&mut map, "generator", false);
        set(&mut map, "async", node.is_async);
        set_scope(&mut map, node.scope_context);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_class(&mut self, node: &Class) {
        let value = self.class(node, "ClassExpression");
        self.stack.push(value);
    }

    fn visit_method_definition(&mut self, node: &MethodDefinition) {
        let mut map = estree_node("MethodDefinition");
        set(&mut map, "key", self.property_key(&node.key));
        set(&mut map, "value", self.function(&node.value, "FunctionExpression"));
        set(&mut map, "kind", node.kind.as_str());
        set(&mut map, "computed", node.key.is_computed());
        set(&mut map, "static", node.is_static);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_field_definition(&mut self, node: &FieldDefinition) {
        let mut map = estree_node("PropertyDefinition");
        set(&mut map, "key", self.property_key(&node.key));
        set(&mut map, "value", self.optional_expression(node.value.as_deref()));
        set(&mut map, "computed", node.key.is_computed());
        set(&mut map, "static", node.is_static);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_static_block(&mut self, node: &StaticBlock) {
        let mut map = estree_node("StaticBlock");
        set(&mut map, "body", self.statements(&node.body));
        set_scope(&mut map, node.scope_context);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn visit_boolean_literal(&mut self, node: &BooleanLiteral) {
        let mut map = estree_node("Literal");
        set(&mut map, "value", node.value);
        set(&mut map, "raw", if node.value { "true" } else { "false" });
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_null_literal(&mut self, span: Span) {
        let mut map = estree_node("Literal");
        set(&mut map, "value", Value::Null);
        set(&mut map, "raw", "null");
        set_position(&mut map, span);
        self.emit(map);
    }

    fn visit_number_literal(&mut self, node: &NumberLiteral) {
        let mut map = estree_node("Literal");
        set(&mut map, "value", number_value(node.value));
        set(&mut map, "raw", node.raw.as_str());
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_bigint_literal(&mut self, node: &BigIntLiteral) {
        let mut map = estree_node("Literal");
        set(&mut map, "value", Value::Null);
        set(&mut map, "raw", node.raw.as_str());
        set(&mut map, "bigint", node.digits());
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_string_literal(&mut self, node: &StringLiteral) {
        let mut map = estree_node("Literal");
        set(&mut map, "value", node.value.as_str());
        set(&mut map, "raw", node.raw.as_str());
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_regexp_literal(&mut self, node: &RegExpLiteral) {
        let mut map = estree_node("Literal");
        set(&mut map, "value", Value::Null);
        set(&mut map, "raw", format!("/{}/{}", node.pattern, node.flags));
        let mut regex = Map::new();
        set(&mut regex, "pattern", node.pattern.as_str());
        set(&mut regex, "flags", node.flags.as_str());
        set(&mut map, "regex", regex);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_template_literal(&mut self, node: &TemplateLiteral) {
        let mut map = estree_node("TemplateLiteral");
        let quasis = node
            .quasis
            .iter()
            .map(|quasi| {
                self.visit_template_element(quasi);
                self.take()
            })
            .collect::<Vec<_>>();
        set(&mut map, "quasis", quasis);
        set(&mut map, "expressions", self.expressions(&node.expressions));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_template_element(&mut self, node: &TemplateElement) {
        let mut map = estree_node("TemplateElement");
        let mut value = Map::new();
        set(&mut value, "raw", node.raw.as_str());
        set(&mut value, "cooked", node.cooked.as_deref().map_or(Value::Null, Value::from));
        set(&mut map, "value", value);
        set(&mut map, "tail", node.tail);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_tagged_template(&mut self, node: &TaggedTemplate) {
        let mut map = estree_node("TaggedTemplateExpression");
        set(&mut map, "tag", self.expression(&node.tag));
        set(&mut map, "quasi", self.template(&node.quasi));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_array_literal(&mut self, node: &ArrayLiteral) {
        let mut map = estree_node("ArrayExpression");
        let elements = node
            .elements
            .iter()
            .map(|element| self.optional_expression(element.as_ref()))
            .collect::<Vec<_>>();
        set(&mut map, "elements", elements);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_object_literal(&mut self, node: &ObjectLiteral) {
        let mut map = estree_node("ObjectExpression");
        let properties = node
            .properties
            .iter()
            .map(|member| {
                self.visit_object_member(member);
                self.take()
            })
            .collect::<Vec<_>>();
        set(&mut map, "properties", properties);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_property(&mut self, node: &Property) {
        let mut map = estree_node("Property");
        set(&mut map, "key", self.property_key(&node.key));
        set(&mut map, "value", self.expression(&node.value));
        set(&mut map, "kind", node.kind.as_str());
        set(&mut map, "computed", node.key.is_computed());
        set(&mut map, "method", node.method);
        set(&mut map, "shorthand", false);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_shorthand_property(&mut self, node: &ShorthandProperty) {
        let mut map = estree_node("Property");
        set(&mut map, "key", self.identifier(&node.name));
        let value = match &node.initializer {
            Some(initializer) => {
                let mut pattern = estree_node("AssignmentPattern");
                set(&mut pattern, "left", self.identifier(&node.name));
                set(&mut pattern, "right", self.expression(initializer));
                set_position(&mut pattern, node.span);
                Value::Object(pattern)
            }
            None => self.identifier(&node.name),
        };
        set(&mut map, "value", value);
        set(&mut map, "kind", "init");
        set(&mut map, "computed", false);
        set(&mut map, "method", false);
        set(&mut map, "shorthand", true);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_spread_element(&mut self, node: &SpreadElement) {
        let mut map = estree_node("SpreadElement");
        set(&mut map, "argument", self.expression(&node.argument));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    // ========================================================================
    // Operators and calls
    // ========================================================================

    fn visit_unary_expression(&mut self, node: &UnaryExpression) {
        let mut map = estree_node("UnaryExpression");
        set(&mut map, "operator", node.operator.operator_text());
        set(&mut map, "prefix", true);
        set(&mut map, "argument", self.expression(&node.argument));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_update_expression(&mut self, node: &UpdateExpression) {
        let mut map = estree_node("UpdateExpression");
        set(&mut map, "operator", node.operator.operator_text());
        set(&mut map, "prefix", node.prefix);
        set(&mut map, "argument", self.expression(&node.argument));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_binary_expression(&mut self, node: &BinaryExpression) {
        let kind = if node.operator.is_logical_operator() {
            "LogicalExpression"
        } else {
            "BinaryExpression"
        };
        let mut map = estree_node(kind);
        set(&mut map, "operator", node.operator.operator_text());
        set(&mut map, "left", self.expression(&node.left));
        set(&mut map, "right", self.expression(&node.right));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_assignment_expression(&mut self, node: &AssignmentExpression) {
        let mut map = estree_node("AssignmentExpression");
        set(&mut map, "operator", node.operator.operator_text());
        set(&mut map, "left", self.pattern(&node.target));
        set(&mut map, "right", self.expression(&node.value));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_conditional_expression(&mut self, node: &ConditionalExpression) {
        let mut map = estree_node("ConditionalExpression");
        set(&mut map, "test", self.expression(&node.test));
        set(&mut map, "consequent", self.expression(&node.consequent));
        set(&mut map, "alternate", self.expression(&node.alternate));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_call_expression(&mut self, node: &CallExpression) {
        let mut map = estree_node("CallExpression");
        set(&mut map, "callee", self.expression(&node.callee));
        set(&mut map, "arguments", self.expressions(&node.arguments));
        set(&mut map, "optional", node.optional);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_new_expression(&mut self, node: &NewExpression) {
        let mut map = estree_node("NewExpression");
        set(&mut map, "callee", self.expression(&node.callee));
        set(&mut map, "arguments", self.expressions(&node.arguments));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_member_expression(&mut self, node: &MemberExpression) {
        let mut map = estree_node("MemberExpression");
        set(&mut map, "object", self.expression(&node.object));
        let (property, computed) = match &node.property {
            MemberProperty::Identifier(id) => (self.identifier(id), false),
            MemberProperty::Private(id) => {
                self.visit_private_identifier(id);
                (self.take(), false)
            }
            MemberProperty::Computed(expr) => (self.expression(expr), true),
        };
        set(&mut map, "property", property);
        set(&mut map, "computed", computed);
        set(&mut map, "optional", node.optional);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_optional_chain(&mut self, node: &OptionalChain) {
        let mut map = estree_node("ChainExpression");
        set(&mut map, "expression", self.expression(&node.expression));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_sequence_expression(&mut self, node: &SequenceExpression) {
        let mut map = estree_node("SequenceExpression");
        set(&mut map, "expressions", self.expressions(&node.expressions));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_yield_expression(&mut self, node: &YieldExpression) {
        let mut map = estree_node("YieldExpression");
        set(&mut map, "argument", self.optional_expression(node.argument.as_deref()));
        set(&mut map, "delegate", node.delegate);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_await_expression(&mut self, node: &AwaitExpression) {
        let mut map = estree_node("AwaitExpression");
        set(&mut map, "argument", self.expression(&node.argument));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_this_expression(&mut self, span: Span) {
        let mut map = estree_node("ThisExpression");
        set_position(&mut map, span);
        self.emit(map);
    }

    fn visit_super(&mut self, span: Span) {
        let mut map = estree_node("Super");
        set_position(&mut map, span);
        self.emit(map);
    }

    fn visit_meta_property(&mut self, node: &MetaProperty) {
        let mut map = estree_node("MetaProperty");
        set(&mut map, "meta", self.identifier(&node.meta));
        set(&mut map, "property", self.identifier(&node.property));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    fn visit_array_pattern(&mut self, node: &ArrayPattern) {
        let mut map = estree_node("ArrayPattern");
        let mut elements = node
            .elements
            .iter()
            .map(|element| match element {
                Some(element) => self.binding_element(element),
                None => Value::Null,
            })
            .collect::<Vec<_>>();
        if let Some(rest) = &node.rest {
            elements.push(self.rest_element(rest));
        }
        set(&mut map, "elements", elements);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_object_pattern(&mut self, node: &ObjectPattern) {
        let mut map = estree_node("ObjectPattern");
        let mut properties = node
            .properties
            .iter()
            .map(|property| {
                self.visit_pattern_property(property);
                self.take()
            })
            .collect::<Vec<_>>();
        if let Some(rest) = &node.rest {
            properties.push(self.rest_element(rest));
        }
        set(&mut map, "properties", properties);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_pattern_property(&mut self, node: &PatternProperty) {
        let mut map = estree_node("Property");
        set(&mut map, "key", self.property_key(&node.key));
        set(&mut map, "value", self.binding_element(&node.value));
        set(&mut map, "kind", "init");
        set(&mut map, "computed", node.key.is_computed());
        set(&mut map, "method", false);
        set(&mut map, "shorthand", node.shorthand);
        set_position(&mut map, node.span);
        self.emit(map);
    }

    fn visit_binding_element(&mut self, node: &BindingElement) {
        let target = self.pattern(&node.target);
        match &node.initializer {
            Some(initializer) => {
                let mut map = estree_node("AssignmentPattern");
                set(&mut map, "left", target);
                set(&mut map, "right", self.expression(initializer));
                set_position(&mut map, node.span);
                self.emit(map);
            }
            None => self.stack.push(target),
        }
    }

    fn visit_rest_element(&mut self, node: &RestElement) {
        let mut map = estree_node("RestElement");
        set(&mut map, "argument", self.pattern(&node.argument));
        set_position(&mut map, node.span);
        self.emit(map);
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn visit_identifier_reference(&mut self, node: &Identifier) {
        let value = self.identifier(node);
        self.stack.push(value);
    }

    fn visit_binding_identifier(&mut self, node: &Identifier) {
        let value = self.identifier(node);
        self.stack.push(value);
    }

    fn visit_label_identifier(&mut self, node: &Identifier) {
        let value = self.identifier(node);
        self.stack.push(value);
    }

    fn visit_property_identifier(&mut self, node: &Identifier) {
        let value = self.identifier(node);
        self.stack.push(value);
    }

    fn visit_private_identifier(&mut self, node: &PrivateIdentifier) {
        let mut map = estree_node("PrivateIdentifier");
        set(&mut map, "name", node.name.as_str());
        set_position(&mut map, node.span);
        self.emit(map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_value() {
        assert_eq!(number_value(42.0), Value::from(42));
        assert_eq!(number_value(3.5), Value::from(3.5));
        assert_eq!(number_value(f64::INFINITY), Value::Null);
        assert_eq!(number_value(1e21), Value::from(1e21));
    }

    #[test]
    fn test_empty_program_omits_positions() {
        let program = Program {
            span: Span::default(),
            body: Vec::new(),
        };
        let value = Serializer::serialize_program(&program);
        assert_eq!(value["type"], "Program");
        assert_eq!(value["body"], Value::Array(Vec::new()));
        assert!(value.get("start").is_none());
        assert!(value.get("end").is_none());
    }

    #[test]
    fn test_identifier_scope_context_only_when_set() {
        let mut serializer = Serializer::new();
        let mut id = Identifier::new(Span::new(1, 4), "abc");
        let plain = serializer.identifier(&id);
        assert!(plain.get("scopeContext").is_none());
        assert_eq!(plain["start"], 0);
        assert_eq!(plain["end"], 3);

        id.scope_context = 3;
        let stamped = serializer.identifier(&id);
        assert_eq!(stamped["scopeContext"], 3);
    }
}
