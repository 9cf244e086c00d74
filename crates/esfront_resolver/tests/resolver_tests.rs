//! Resolver integration tests.
//!
//! Parses real sources, resolves them and checks the scope ids stamped on
//! identifiers and scope-creating nodes.

use esfront_ast::node::*;
use esfront_ast::visitor::{walk_block, Visit};
use esfront_parser::parse;
use esfront_resolver::{resolve, BindingKind, Resolver, ScopeKind, GLOBAL_SCOPE};

/// Collects binding and reference identifiers plus block scope ids.
#[derive(Default)]
struct Stamps {
    identifiers: Vec<(String, ScopeContext)>,
    blocks: Vec<ScopeContext>,
}

impl Visit for Stamps {
    fn visit_identifier_reference(&mut self, node: &Identifier) {
        self.identifiers.push((node.name.clone(), node.scope_context));
    }

    fn visit_binding_identifier(&mut self, node: &Identifier) {
        self.identifiers.push((node.name.clone(), node.scope_context));
    }

    fn visit_block(&mut self, node: &Block) {
        self.blocks.push(node.scope_context);
        walk_block(self, node);
    }
}

fn resolved(source: &str) -> Program {
    let mut program = parse(source).expect("valid program");
    resolve(&mut program);
    program
}

fn stamps(source: &str) -> Stamps {
    let program = resolved(source);
    let mut stamps = Stamps::default();
    stamps.visit_program(&program);
    stamps
}

/// Helper: scope ids of every occurrence of `name`, in source order.
fn ids_of(source: &str, name: &str) -> Vec<ScopeContext> {
    stamps(source)
        .identifiers
        .into_iter()
        .filter(|(n, _)| n == name)
        .map(|(_, id)| id)
        .collect()
}

// ============================================================================
// Shadowing
// ============================================================================

#[test]
fn test_shadowed_lexical_bindings() {
    // 1 global, 2 f, 3 f's body, 4 inner block
    let source = "function f(x){ let x2 = x; { let x2 = 1; return x2; } return x2; }";
    assert_eq!(ids_of(source, "f"), vec![1]);
    assert_eq!(ids_of(source, "x"), vec![2, 2]);
    assert_eq!(ids_of(source, "x2"), vec![3, 4, 4, 3]);
    assert_eq!(stamps(source).blocks, vec![3, 4]);
}

#[test]
fn test_reference_before_lexical_declaration_binds_in_its_block() {
    // The first `a` in the block is in the inner binding's dead zone.
    let source = "let a = 1; { a; let a = 2; a; }";
    assert_eq!(ids_of(source, "a"), vec![1, 2, 2, 2]);
}

#[test]
fn test_closure_sees_later_lexical_declaration() {
    // 1 global, 2 outer, 3 outer's body, 4 inner, 5 inner's body
    let source = "function outer(){ function inner(){ return helper; } const helper = 1; return inner; }";
    assert_eq!(ids_of(source, "helper"), vec![3, 3]);
    assert_eq!(ids_of(source, "inner"), vec![2, 2]);

    // 1 global, 2 block, 3 arrow
    let source = "{ const read = () => later; let later = 2; }";
    assert_eq!(ids_of(source, "later"), vec![2, 2]);

    let source = "function make() { return new Point(); } class Point {}";
    assert_eq!(ids_of(source, "Point"), vec![GLOBAL_SCOPE, GLOBAL_SCOPE]);

    // 1 global, 2 switch, 3 f, 4 f's body
    let source = "switch (k) { case 0: function f() { return late; } case 1: let late; }";
    assert_eq!(ids_of(source, "late"), vec![2, 2]);
}

#[test]
fn test_unresolved_reference_is_global() {
    let source = "function f() { return missing; }";
    assert_eq!(ids_of(source, "missing"), vec![GLOBAL_SCOPE]);
}

// ============================================================================
// Hoisting
// ============================================================================

#[test]
fn test_var_hoists_out_of_blocks() {
    // 1 global, 2 g, 3 g's body, 4 if block
    let source = "function g() { if (a) { var v = 1; } return v; }";
    assert_eq!(ids_of(source, "v"), vec![2, 2]);
    assert_eq!(ids_of(source, "a"), vec![GLOBAL_SCOPE]);
}

#[test]
fn test_var_used_before_declaration() {
    let source = "function g() { v = 2; var v; }";
    assert_eq!(ids_of(source, "v"), vec![2, 2]);
}

#[test]
fn test_function_declaration_in_block_hoists_to_enclosing_function() {
    let source = "inner(); { function inner() {} } inner;";
    assert_eq!(ids_of(source, "inner"), vec![1, 1, 1]);
}

#[test]
fn test_hoisting_does_not_cross_function_boundaries() {
    // 1 global, 2 outer, 3 outer's body, 4 nested, 5 nested's body
    let source = "function outer() { function nested() { var deep; } deep; }";
    assert_eq!(ids_of(source, "deep"), vec![4, GLOBAL_SCOPE]);
}

#[test]
fn test_var_in_for_head_hoists() {
    let source = "function h() { for (var i = 0; i < 1; i++) {} return i; }";
    assert_eq!(ids_of(source, "i"), vec![2, 2, 2, 2]);
}

// ============================================================================
// Functions, parameters and arrows
// ============================================================================

#[test]
fn test_named_function_expression_binds_name_inside() {
    // 1 global, 2 g, 3 g's body
    let source = "var f = function g() { return g; }; g;";
    assert_eq!(ids_of(source, "g"), vec![2, 2, GLOBAL_SCOPE]);
    assert_eq!(ids_of(source, "f"), vec![1]);
}

#[test]
fn test_parameter_default_sees_later_parameter() {
    let source = "(a = b, b) => a + b;";
    assert_eq!(ids_of(source, "a"), vec![2, 2]);
    assert_eq!(ids_of(source, "b"), vec![2, 2, 2]);
}

#[test]
fn test_destructured_and_rest_parameters() {
    let source = "function p({ a, b: [c] }, ...rest) { return a + c + rest; }";
    assert_eq!(ids_of(source, "a"), vec![2, 2]);
    assert_eq!(ids_of(source, "c"), vec![2, 2]);
    assert_eq!(ids_of(source, "rest"), vec![2, 2]);
}

#[test]
fn test_arrow_expression_body_resolves_in_arrow_scope() {
    let source = "const add = x => x + y;";
    assert_eq!(ids_of(source, "x"), vec![2, 2]);
    assert_eq!(ids_of(source, "y"), vec![GLOBAL_SCOPE]);
    assert_eq!(ids_of(source, "add"), vec![1]);
}

#[test]
fn test_arrow_function_scope_context() {
    let program = resolved("let f = () => { let z; };");
    let Statement::VariableDeclaration(decl) = &program.body[0] else {
        panic!("expected declaration");
    };
    let Some(Expression::Arrow(arrow)) = &decl.declarations[0].init else {
        panic!("expected arrow");
    };
    assert_eq!(arrow.scope_context, 2);
    let ArrowBody::Block(body) = &arrow.body else {
        panic!("expected block body");
    };
    assert_eq!(body.scope_context, 3);
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_class_name_bound_in_class_scope() {
    // 1 global, 2 class C, 3 m, 4 m's body
    let source = "class C { m() { return C; } } C;";
    assert_eq!(ids_of(source, "C"), vec![1, 2, 1]);
}

#[test]
fn test_class_expression_name_is_local() {
    let source = "let K = class Inner { m() { return Inner; } }; Inner;";
    assert_eq!(ids_of(source, "Inner"), vec![2, 2, GLOBAL_SCOPE]);
}

#[test]
fn test_static_block_is_a_var_scope() {
    // 1 global, 2 class, 3 static block
    let program = resolved("class S { static { var s; s; } }");
    let Statement::ClassDeclaration(class) = &program.body[0] else {
        panic!("expected class");
    };
    assert_eq!(class.scope_context, 2);
    let ClassElement::StaticBlock(block) = &class.body.elements[0] else {
        panic!("expected static block");
    };
    assert_eq!(block.scope_context, 3);
    assert_eq!(ids_of("class S { static { var s; s; } }", "s"), vec![3, 3]);
}

#[test]
fn test_computed_keys_and_fields() {
    let source = "let k; class A { [k] = k; static f = A; }";
    assert_eq!(ids_of(source, "k"), vec![1, 1, 1]);
    assert_eq!(ids_of(source, "A"), vec![1, 2]);
}

// ============================================================================
// Blocks, loops, switch and catch
// ============================================================================

#[test]
fn test_for_let_head_opens_scope() {
    // 1 global, 2 for head, 3 body block
    let source = "for (let i = 0; i < 3; i++) { i; } i;";
    let program = resolved(source);
    let Statement::For(node) = &program.body[0] else {
        panic!("expected for statement");
    };
    assert_eq!(node.scope_context, 2);
    assert_eq!(ids_of(source, "i"), vec![2, 2, 2, 2, GLOBAL_SCOPE]);
}

#[test]
fn test_for_var_head_leaves_scope_unset() {
    let program = resolved("for (var i in o) ;");
    let Statement::ForIn(node) = &program.body[0] else {
        panic!("expected for-in statement");
    };
    assert_eq!(node.scope_context, 0);
}

#[test]
fn test_for_of_const_head() {
    let source = "for (const [k, v] of entries) { k + v; }";
    assert_eq!(ids_of(source, "k"), vec![2, 2]);
    assert_eq!(ids_of(source, "entries"), vec![GLOBAL_SCOPE]);
}

#[test]
fn test_switch_body_scope() {
    let source = "switch (x) { case 1: let y; y; default: y; }";
    let program = resolved(source);
    let Statement::Switch(node) = &program.body[0] else {
        panic!("expected switch");
    };
    assert_eq!(node.scope_context, 2);
    assert_eq!(ids_of(source, "x"), vec![GLOBAL_SCOPE]);
    assert_eq!(ids_of(source, "y"), vec![2, 2, 2]);
}

#[test]
fn test_catch_parameter() {
    // 1 global, 2 try block, 3 catch clause, 4 catch body
    let source = "try {} catch ({ message }) { message; }";
    let program = resolved(source);
    let Statement::Try(node) = &program.body[0] else {
        panic!("expected try");
    };
    let handler = node.handler.as_ref().expect("catch clause");
    assert_eq!(handler.scope_context, 3);
    assert_eq!(handler.body.scope_context, 4);
    assert_eq!(ids_of(source, "message"), vec![3, 3]);
}

#[test]
fn test_scope_ids_follow_source_order() {
    assert_eq!(stamps("{ { } } { }").blocks, vec![2, 3, 4]);
}

// ============================================================================
// Assignment targets and object literals
// ============================================================================

#[test]
fn test_assignment_pattern_targets_are_references() {
    // 1 global, 2 h, 3 h's body
    let source = "function h() { let a; ({ a, b: [c] } = d); }";
    assert_eq!(ids_of(source, "a"), vec![3, 3]);
    assert_eq!(ids_of(source, "c"), vec![GLOBAL_SCOPE]);
    assert_eq!(ids_of(source, "d"), vec![GLOBAL_SCOPE]);
}

#[test]
fn test_shorthand_property_is_a_reference() {
    let source = "function o(value) { return { value }; }";
    assert_eq!(ids_of(source, "value"), vec![2, 2]);
}

#[test]
fn test_member_names_are_not_stamped() {
    let program = resolved("let obj; obj.prop;");
    let Statement::Expression(stmt) = &program.body[1] else {
        panic!("expected expression statement");
    };
    let Expression::Member(member) = &stmt.expression else {
        panic!("expected member expression");
    };
    let MemberProperty::Identifier(prop) = &member.property else {
        panic!("expected identifier property");
    };
    assert_eq!(prop.scope_context, 0);
}

// ============================================================================
// Scope table
// ============================================================================

#[test]
fn test_scope_table_records_binding_kinds() {
    let mut program =
        parse("var v; let l; const c = 1; function f(p) {} class K {} try {} catch (e) {}")
            .expect("valid program");
    let mut resolver = Resolver::new();
    resolver.resolve_program(&mut program);

    let global = resolver.scope(GLOBAL_SCOPE).expect("global scope");
    assert_eq!(global.kind, ScopeKind::Global);
    assert_eq!(global.parent, None);
    let kind_of = |name: &str| global.get(name).map(|b| b.kind);
    assert_eq!(kind_of("v"), Some(BindingKind::Var));
    assert_eq!(kind_of("l"), Some(BindingKind::Let));
    assert_eq!(kind_of("c"), Some(BindingKind::Const));
    assert_eq!(kind_of("f"), Some(BindingKind::Function));
    assert_eq!(kind_of("K"), Some(BindingKind::Class));

    let function = resolver.scope(2).expect("function scope");
    assert_eq!(function.kind, ScopeKind::Function);
    assert_eq!(function.get("p").map(|b| b.kind), Some(BindingKind::Parameter));

    let catch = resolver
        .scopes()
        .iter()
        .find(|scope| scope.kind == ScopeKind::Catch)
        .expect("catch scope");
    assert_eq!(catch.get("e").map(|b| b.kind), Some(BindingKind::CatchParameter));
}

#[test]
fn test_declared_at_is_identifier_start() {
    let mut program = parse("let first;").expect("valid program");
    let mut resolver = Resolver::new();
    resolver.resolve_program(&mut program);
    let binding = resolver
        .scope(GLOBAL_SCOPE)
        .and_then(|scope| scope.get("first"))
        .copied()
        .expect("binding");
    // Positions are 1-based.
    assert_eq!(binding.declared_at, 5);
}

#[test]
fn test_every_stamp_names_an_enclosing_scope() {
    let source = "function a(b) { { let c = b; return () => c + d; } }";
    let mut program = parse(source).expect("valid program");
    let mut resolver = Resolver::new();
    resolver.resolve_program(&mut program);
    let mut stamps = Stamps::default();
    stamps.visit_program(&program);
    let count = resolver.scopes().len() as ScopeContext;
    for (name, id) in stamps.identifiers {
        assert!((1..=count).contains(&id), "{} stamped with {}", name, id);
    }
}
