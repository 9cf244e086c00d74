//! The resolver implementation.
//!
//! Two passes per function-like body, the same shape as a classic binder:
//! - `hoist_*` pre-registers `var` and function declarations in the nearest
//!   var scope without entering nested functions
//! - `declare_lexical` registers the `let`/`const`/`class` names of a
//!   statement list when its scope opens, so a closure resolved before a
//!   later declaration still finds it
//! - `resolve_*` walks the tree in source order, opens scopes and stamps
//!   identifiers

use crate::scope::{BindingKind, Scope, ScopeKind, GLOBAL_SCOPE};
use esfront_ast::node::*;
use esfront_core::text::Idx;
use tracing::{debug, debug_span, trace};

/// Builds the scope table for one program and stamps its nodes.
pub struct Resolver {
    /// All scopes created so far. A scope's id is its index plus one.
    scopes: Vec<Scope>,
    /// Index of the innermost open scope.
    current: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            current: 0,
        }
    }

    /// The scope table, in creation order.
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Look up a scope by the id stamped on a node.
    pub fn scope(&self, id: ScopeContext) -> Option<&Scope> {
        let index = (id as usize).checked_sub(1)?;
        self.scopes.get(index)
    }

    pub fn resolve_program(&mut self, program: &mut Program) {
        let span = debug_span!("resolve", statements = program.body.len());
        let _guard = span.enter();

        self.push_scope(ScopeKind::Global);
        self.hoist_statements(&program.body);
        self.declare_lexical(&program.body);
        for statement in &mut program.body {
            self.resolve_statement(statement);
        }
        self.pop_scope();

        debug!(scopes = self.scopes.len(), "resolution complete");
    }

    // ========================================================================
    // Scope table
    // ========================================================================

    fn push_scope(&mut self, kind: ScopeKind) -> ScopeContext {
        let parent = if self.scopes.is_empty() {
            None
        } else {
            Some(self.current)
        };
        let id = self.scopes.len() as ScopeContext + 1;
        trace!(id, ?kind, parent_id = ?parent.map(|p| p as ScopeContext + 1), "scope");
        self.scopes.push(Scope::new(id, kind, parent));
        self.current = self.scopes.len() - 1;
        id
    }

    fn pop_scope(&mut self) {
        if let Some(parent) = self.scopes.get(self.current).and_then(|s| s.parent) {
            self.current = parent;
        }
    }

    fn declare(&mut self, name: &str, kind: BindingKind, declared_at: Idx) {
        if let Some(scope) = self.scopes.get_mut(self.current) {
            scope.declare(name, kind, declared_at);
        }
    }

    /// Register every name bound by `pattern` in the current scope.
    fn declare_pattern(&mut self, pattern: &Pattern, kind: BindingKind) {
        let mut names = Vec::new();
        pattern.bound_names(&mut names);
        for id in names {
            self.declare(&id.name, kind, id.span.start);
        }
    }

    /// Register a hoisted name in the nearest var scope.
    fn declare_hoisted(&mut self, id: &Identifier, kind: BindingKind) {
        let mut index = self.current;
        while let Some(scope) = self.scopes.get(index) {
            if scope.kind.is_var_scope() {
                break;
            }
            match scope.parent {
                Some(parent) => index = parent,
                None => break,
            }
        }
        if let Some(scope) = self.scopes.get_mut(index) {
            scope.declare(&id.name, kind, id.span.start);
        }
    }

    /// The id of the innermost scope binding `name`, or the global id.
    fn lookup(&self, name: &str) -> ScopeContext {
        let mut index = Some(self.current);
        while let Some(i) = index {
            let Some(scope) = self.scopes.get(i) else {
                break;
            };
            if scope.bindings.contains_key(name) {
                return scope.id;
            }
            index = scope.parent;
        }
        GLOBAL_SCOPE
    }

    fn resolve_identifier(&mut self, id: &mut Identifier) {
        id.scope_context = self.lookup(&id.name);
    }

    // ========================================================================
    // Hoisting
    // ========================================================================

    fn hoist_statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.hoist_statement(statement);
        }
    }

    fn hoist_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VariableDeclaration(decl) => self.hoist_variable_declaration(decl),
            Statement::FunctionDeclaration(func) => {
                if let Some(name) = &func.name {
                    self.declare_hoisted(name, BindingKind::Function);
                }
            }
            Statement::Block(block) => self.hoist_statements(&block.body),
            Statement::If(node) => {
                self.hoist_statement(&node.consequent);
                if let Some(alternate) = &node.alternate {
                    self.hoist_statement(alternate);
                }
            }
            Statement::For(node) => {
                if let Some(ForInit::VariableDeclaration(decl)) = &node.init {
                    self.hoist_variable_declaration(decl);
                }
                self.hoist_statement(&node.body);
            }
            Statement::ForIn(node) => {
                self.hoist_for_head(&node.left);
                self.hoist_statement(&node.body);
            }
            Statement::ForOf(node) => {
                self.hoist_for_head(&node.left);
                self.hoist_statement(&node.body);
            }
            Statement::While(node) => self.hoist_statement(&node.body),
            Statement::DoWhile(node) => self.hoist_statement(&node.body),
            Statement::Switch(node) => {
                for case in &node.cases {
                    self.hoist_statements(&case.consequent);
                }
            }
            Statement::Try(node) => {
                self.hoist_statements(&node.block.body);
                if let Some(handler) = &node.handler {
                    self.hoist_statements(&handler.body.body);
                }
                if let Some(finalizer) = &node.finalizer {
                    self.hoist_statements(&finalizer.body);
                }
            }
            Statement::Labeled(node) => self.hoist_statement(&node.body),
            Statement::With(node) => self.hoist_statement(&node.body),
            Statement::Empty(_)
            | Statement::Expression(_)
            | Statement::Throw(_)
            | Statement::Return(_)
            | Statement::Break(_)
            | Statement::Continue(_)
            | Statement::Debugger(_)
            | Statement::ClassDeclaration(_) => {}
        }
    }

    /// Register the lexical declarations made directly in `statements` in the
    /// current scope. Nested blocks register their own on entry.
    fn declare_lexical(&mut self, statements: &[Statement]) {
        for statement in statements {
            match statement {
                Statement::VariableDeclaration(decl) => {
                    let kind = match decl.kind {
                        VariableKind::Var => continue,
                        VariableKind::Let => BindingKind::Let,
                        VariableKind::Const => BindingKind::Const,
                    };
                    for declarator in &decl.declarations {
                        self.declare_pattern(&declarator.id, kind);
                    }
                }
                Statement::ClassDeclaration(class) => {
                    if let Some(name) = &class.name {
                        self.declare(&name.name, BindingKind::Class, name.span.start);
                    }
                }
                _ => {}
            }
        }
    }

    fn hoist_for_head(&mut self, head: &ForHead) {
        if let ForHead::VariableDeclaration(decl) = head {
            self.hoist_variable_declaration(decl);
        }
    }

    fn hoist_variable_declaration(&mut self, decl: &VariableDeclaration) {
        if decl.kind.is_lexical() {
            return;
        }
        for declarator in &decl.declarations {
            let mut names = Vec::new();
            declarator.id.bound_names(&mut names);
            for id in names {
                self.declare_hoisted(id, BindingKind::Var);
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn resolve_statement(&mut self, statement: &mut Statement) {
        match statement {
            Statement::Block(block) => self.resolve_block(block),
            Statement::Empty(_) | Statement::Debugger(_) => {}
            Statement::Expression(node) => self.resolve_expression(&mut node.expression),
            Statement::If(node) => {
                self.resolve_expression(&mut node.test);
                self.resolve_statement(&mut node.consequent);
                if let Some(alternate) = &mut node.alternate {
                    self.resolve_statement(alternate);
                }
            }
            Statement::For(node) => self.resolve_for(node),
            Statement::ForIn(node) => {
                let scoped = head_is_lexical(&node.left);
                if scoped {
                    node.scope_context = self.push_scope(ScopeKind::Block);
                }
                self.resolve_for_head(&mut node.left);
                self.resolve_expression(&mut node.right);
                self.resolve_statement(&mut node.body);
                if scoped {
                    self.pop_scope();
                }
            }
            Statement::ForOf(node) => {
                let scoped = head_is_lexical(&node.left);
                if scoped {
                    node.scope_context = self.push_scope(ScopeKind::Block);
                }
                self.resolve_for_head(&mut node.left);
                self.resolve_expression(&mut node.right);
                self.resolve_statement(&mut node.body);
                if scoped {
                    self.pop_scope();
                }
            }
            Statement::While(node) => {
                self.resolve_expression(&mut node.test);
                self.resolve_statement(&mut node.body);
            }
            Statement::DoWhile(node) => {
                self.resolve_statement(&mut node.body);
                self.resolve_expression(&mut node.test);
            }
            Statement::Switch(node) => {
                self.resolve_expression(&mut node.discriminant);
                node.scope_context = self.push_scope(ScopeKind::Block);
                for case in &node.cases {
                    self.declare_lexical(&case.consequent);
                }
                for case in &mut node.cases {
                    if let Some(test) = &mut case.test {
                        self.resolve_expression(test);
                    }
                    for statement in &mut case.consequent {
                        self.resolve_statement(statement);
                    }
                }
                self.pop_scope();
            }
            Statement::Try(node) => {
                self.resolve_block(&mut node.block);
                if let Some(handler) = &mut node.handler {
                    self.resolve_catch_clause(handler);
                }
                if let Some(finalizer) = &mut node.finalizer {
                    self.resolve_block(finalizer);
                }
            }
            Statement::Throw(node) => self.resolve_expression(&mut node.argument),
            Statement::Return(node) => {
                if let Some(argument) = &mut node.argument {
                    self.resolve_expression(argument);
                }
            }
            // Labels live in their own namespace.
            Statement::Break(_) | Statement::Continue(_) => {}
            Statement::Labeled(node) => self.resolve_statement(&mut node.body),
            Statement::With(node) => {
                self.resolve_expression(&mut node.object);
                self.resolve_statement(&mut node.body);
            }
            Statement::VariableDeclaration(decl) => self.resolve_variable_declaration(decl),
            Statement::FunctionDeclaration(func) => {
                if let Some(name) = &mut func.name {
                    self.resolve_identifier(name);
                }
                self.resolve_function(func, false);
            }
            Statement::ClassDeclaration(class) => self.resolve_class(class, true),
        }
    }

    fn resolve_block(&mut self, block: &mut Block) {
        block.scope_context = self.push_scope(ScopeKind::Block);
        self.declare_lexical(&block.body);
        for statement in &mut block.body {
            self.resolve_statement(statement);
        }
        self.pop_scope();
    }

    fn resolve_for(&mut self, node: &mut ForStatement) {
        let scoped = matches!(
            &node.init,
            Some(ForInit::VariableDeclaration(decl)) if decl.kind.is_lexical()
        );
        if scoped {
            node.scope_context = self.push_scope(ScopeKind::Block);
        }
        match &mut node.init {
            Some(ForInit::VariableDeclaration(decl)) => self.resolve_variable_declaration(decl),
            Some(ForInit::Expression(expr)) => self.resolve_expression(expr),
            None => {}
        }
        if let Some(test) = &mut node.test {
            self.resolve_expression(test);
        }
        if let Some(update) = &mut node.update {
            self.resolve_expression(update);
        }
        self.resolve_statement(&mut node.body);
        if scoped {
            self.pop_scope();
        }
    }

    fn resolve_for_head(&mut self, head: &mut ForHead) {
        match head {
            ForHead::VariableDeclaration(decl) => self.resolve_variable_declaration(decl),
            ForHead::Pattern(pattern) => self.resolve_pattern(pattern),
        }
    }

    fn resolve_catch_clause(&mut self, clause: &mut CatchClause) {
        clause.scope_context = self.push_scope(ScopeKind::Catch);
        if let Some(param) = &mut clause.param {
            self.declare_pattern(param, BindingKind::CatchParameter);
            self.resolve_pattern(param);
        }
        self.resolve_block(&mut clause.body);
        self.pop_scope();
    }

    fn resolve_variable_declaration(&mut self, decl: &mut VariableDeclaration) {
        let kind = match decl.kind {
            VariableKind::Var => None,
            VariableKind::Let => Some(BindingKind::Let),
            VariableKind::Const => Some(BindingKind::Const),
        };
        for declarator in &mut decl.declarations {
            if let Some(kind) = kind {
                self.declare_pattern(&declarator.id, kind);
            }
            self.resolve_pattern(&mut declarator.id);
            if let Some(init) = &mut declarator.init {
                self.resolve_expression(init);
            }
        }
    }

    // ========================================================================
    // Functions and classes
    // ========================================================================

    /// Open the function's scope, bind its parameters and resolve the body.
    /// `binds_own_name` is set for function expressions, whose name is only
    /// visible inside.
    fn resolve_function(&mut self, func: &mut Function, binds_own_name: bool) {
        func.scope_context = self.push_scope(ScopeKind::Function);
        if binds_own_name {
            if let Some(name) = &mut func.name {
                self.declare(&name.name, BindingKind::Function, name.span.start);
                self.resolve_identifier(name);
            }
        }
        self.resolve_parameters(&mut func.params);
        self.hoist_statements(&func.body.body);
        self.resolve_block(&mut func.body);
        self.pop_scope();
    }

    fn resolve_arrow(&mut self, arrow: &mut ArrowFunction) {
        arrow.scope_context = self.push_scope(ScopeKind::Function);
        self.resolve_parameters(&mut arrow.params);
        match &mut arrow.body {
            ArrowBody::Block(block) => {
                self.hoist_statements(&block.body);
                self.resolve_block(block);
            }
            ArrowBody::Expression(expr) => self.resolve_expression(expr),
        }
        self.pop_scope();
    }

    fn resolve_parameters(&mut self, params: &mut ParameterList) {
        for param in &params.params {
            self.declare_pattern(&param.target, BindingKind::Parameter);
        }
        if let Some(rest) = &params.rest {
            self.declare_pattern(&rest.argument, BindingKind::Parameter);
        }
        for param in &mut params.params {
            self.resolve_binding_element(param);
        }
        if let Some(rest) = &mut params.rest {
            self.resolve_pattern(&mut rest.argument);
        }
    }

    fn resolve_class(&mut self, class: &mut Class, is_declaration: bool) {
        if is_declaration {
            if let Some(name) = &mut class.name {
                self.declare(&name.name, BindingKind::Class, name.span.start);
                self.resolve_identifier(name);
            }
        }

        class.scope_context = self.push_scope(ScopeKind::Class);
        if let Some(name) = &mut class.name {
            self.declare(&name.name, BindingKind::Class, name.span.start);
            if !is_declaration {
                self.resolve_identifier(name);
            }
        }
        if let Some(super_class) = &mut class.super_class {
            self.resolve_expression(super_class);
        }

        for element in &mut class.body.elements {
            match element {
                ClassElement::Method(method) => {
                    self.resolve_property_key(&mut method.key);
                    self.resolve_function(&mut method.value, false);
                }
                ClassElement::Field(field) => {
                    self.resolve_property_key(&mut field.key);
                    if let Some(value) = &mut field.value {
                        self.resolve_expression(value);
                    }
                }
                ClassElement::StaticBlock(block) => {
                    block.scope_context = self.push_scope(ScopeKind::Function);
                    self.hoist_statements(&block.body);
                    self.declare_lexical(&block.body);
                    for statement in &mut block.body {
                        self.resolve_statement(statement);
                    }
                    self.pop_scope();
                }
            }
        }
        self.pop_scope();
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    /// Stamp the identifiers of a binding or assignment pattern. Bindings are
    /// registered before this is called, so both kinds resolve by lookup.
    fn resolve_pattern(&mut self, pattern: &mut Pattern) {
        match pattern {
            Pattern::Identifier(id) => self.resolve_identifier(id),
            Pattern::Array(array) => {
                for element in array.elements.iter_mut().flatten() {
                    self.resolve_binding_element(element);
                }
                if let Some(rest) = &mut array.rest {
                    self.resolve_pattern(&mut rest.argument);
                }
            }
            Pattern::Object(object) => {
                for property in &mut object.properties {
                    self.resolve_property_key(&mut property.key);
                    self.resolve_binding_element(&mut property.value);
                }
                if let Some(rest) = &mut object.rest {
                    self.resolve_pattern(&mut rest.argument);
                }
            }
            Pattern::Member(expr) => self.resolve_expression(expr),
        }
    }

    fn resolve_binding_element(&mut self, element: &mut BindingElement) {
        self.resolve_pattern(&mut element.target);
        if let Some(initializer) = &mut element.initializer {
            self.resolve_expression(initializer);
        }
    }

    fn resolve_property_key(&mut self, key: &mut PropertyKey) {
        if let PropertyKey::Computed(expr) = key {
            self.resolve_expression(expr);
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn resolve_expression(&mut self, expression: &mut Expression) {
        match expression {
            Expression::Identifier(id) => self.resolve_identifier(id),
            Expression::PrivateName(_)
            | Expression::Boolean(_)
            | Expression::Null(_)
            | Expression::Number(_)
            | Expression::BigInt(_)
            | Expression::String(_)
            | Expression::RegExp(_)
            | Expression::This(_)
            | Expression::Super(_)
            | Expression::MetaProperty(_) => {}
            Expression::Template(template) => self.resolve_template(template),
            Expression::TaggedTemplate(tagged) => {
                self.resolve_expression(&mut tagged.tag);
                self.resolve_template(&mut tagged.quasi);
            }
            Expression::Array(array) => {
                for element in array.elements.iter_mut().flatten() {
                    self.resolve_expression(element);
                }
            }
            Expression::Object(object) => {
                for member in &mut object.properties {
                    match member {
                        ObjectMember::Property(property) => {
                            self.resolve_property_key(&mut property.key);
                            self.resolve_expression(&mut property.value);
                        }
                        ObjectMember::Shorthand(shorthand) => {
                            self.resolve_identifier(&mut shorthand.name);
                            if let Some(initializer) = &mut shorthand.initializer {
                                self.resolve_expression(initializer);
                            }
                        }
                        ObjectMember::Spread(spread) => self.resolve_expression(&mut spread.argument),
                    }
                }
            }
            Expression::Function(func) => self.resolve_function(func, true),
            Expression::Arrow(arrow) => self.resolve_arrow(arrow),
            Expression::Class(class) => self.resolve_class(class, false),
            Expression::Unary(node) => self.resolve_expression(&mut node.argument),
            Expression::Update(node) => self.resolve_expression(&mut node.argument),
            Expression::Binary(node) => {
                self.resolve_expression(&mut node.left);
                self.resolve_expression(&mut node.right);
            }
            Expression::Assignment(node) => {
                self.resolve_pattern(&mut node.target);
                self.resolve_expression(&mut node.value);
            }
            Expression::Conditional(node) => {
                self.resolve_expression(&mut node.test);
                self.resolve_expression(&mut node.consequent);
                self.resolve_expression(&mut node.alternate);
            }
            Expression::Call(node) => {
                self.resolve_expression(&mut node.callee);
                for argument in &mut node.arguments {
                    self.resolve_expression(argument);
                }
            }
            Expression::New(node) => {
                self.resolve_expression(&mut node.callee);
                for argument in &mut node.arguments {
                    self.resolve_expression(argument);
                }
            }
            Expression::Member(node) => {
                self.resolve_expression(&mut node.object);
                if let MemberProperty::Computed(property) = &mut node.property {
                    self.resolve_expression(property);
                }
            }
            Expression::OptionalChain(node) => self.resolve_expression(&mut node.expression),
            Expression::Sequence(node) => {
                for expr in &mut node.expressions {
                    self.resolve_expression(expr);
                }
            }
            Expression::Spread(node) => self.resolve_expression(&mut node.argument),
            Expression::Yield(node) => {
                if let Some(argument) = &mut node.argument {
                    self.resolve_expression(argument);
                }
            }
            Expression::Await(node) => self.resolve_expression(&mut node.argument),
        }
    }

    fn resolve_template(&mut self, template: &mut TemplateLiteral) {
        for expr in &mut template.expressions {
            self.resolve_expression(expr);
        }
    }
}

fn head_is_lexical(head: &ForHead) -> bool {
    matches!(head, ForHead::VariableDeclaration(decl) if decl.kind.is_lexical())
}

#[cfg(test)]
mod tests {
    use super::*;
    use esfront_core::text::Span;

    fn ident(start: u32, name: &str) -> Identifier {
        Identifier::new(Span::new(start, start + name.len() as u32), name)
    }

    fn program(body: Vec<Statement>) -> Program {
        Program {
            span: Span::new(1, 100),
            body,
        }
    }

    #[test]
    fn test_unresolved_reference_is_global() {
        let mut program = program(vec![Statement::Expression(ExpressionStatement {
            span: Span::new(1, 5),
            expression: Expression::Identifier(ident(1, "foo")),
        })]);
        let mut resolver = Resolver::new();
        resolver.resolve_program(&mut program);

        let Statement::Expression(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expression::Identifier(id) = &stmt.expression else {
            panic!("expected identifier");
        };
        assert_eq!(id.scope_context, GLOBAL_SCOPE);
        assert_eq!(resolver.scopes().len(), 1);
        assert!(resolver.scope(GLOBAL_SCOPE).is_some_and(|s| s.bindings.is_empty()));
    }

    #[test]
    fn test_var_in_nested_block_hoists_to_global() {
        // { var a; }
        let mut program = program(vec![Statement::Block(Block {
            span: Span::new(1, 10),
            body: vec![Statement::VariableDeclaration(VariableDeclaration {
                span: Span::new(3, 9),
                kind: VariableKind::Var,
                declarations: vec![VariableDeclarator {
                    span: Span::new(7, 8),
                    id: Pattern::Identifier(ident(7, "a")),
                    init: None,
                }],
            })],
            scope_context: 0,
        })]);
        let mut resolver = Resolver::new();
        resolver.resolve_program(&mut program);

        let global = resolver.scope(GLOBAL_SCOPE).expect("global scope");
        assert_eq!(global.get("a").map(|b| b.kind), Some(BindingKind::Var));
        let block = resolver.scope(2).expect("block scope");
        assert_eq!(block.kind, ScopeKind::Block);
        assert_eq!(block.parent, Some(0));
        assert!(block.get("a").is_none());
    }

    #[test]
    fn test_scope_lookup_out_of_range() {
        let resolver = Resolver::new();
        assert!(resolver.scope(0).is_none());
        assert!(resolver.scope(1).is_none());
    }
}
