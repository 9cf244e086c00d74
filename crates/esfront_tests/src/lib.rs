//! esfront_tests: Conformance fixtures for the parser.
//!
//! Each fixture is a short script that must either parse or be rejected,
//! optionally with a specific first error message. `run_all` parses every
//! fixture on the rayon pool and reports one `Outcome` per fixture, in
//! fixture order.

use esfront_diagnostics::ErrorList;
use rayon::prelude::*;

/// What a fixture expects from the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Accept,
    /// Rejected; when a message is given the first error must carry it.
    Reject(Option<&'static str>),
}

#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub name: &'static str,
    pub category: &'static str,
    pub source: &'static str,
    pub expect: Expect,
}

/// Result of running one fixture.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub fixture: Fixture,
    pub passed: bool,
    /// Why the fixture failed, if it did.
    pub detail: Option<String>,
}

const fn accept(name: &'static str, category: &'static str, source: &'static str) -> Fixture {
    Fixture { name, category, source, expect: Expect::Accept }
}

const fn reject(name: &'static str, category: &'static str, source: &'static str) -> Fixture {
    Fixture { name, category, source, expect: Expect::Reject(None) }
}

const fn reject_with(
    name: &'static str,
    category: &'static str,
    source: &'static str,
    message: &'static str,
) -> Fixture {
    Fixture { name, category, source, expect: Expect::Reject(Some(message)) }
}

// ============================================================================
// Fixtures
// ============================================================================

static FIXTURES: &[Fixture] = &[
    // Declarations
    accept("var_declaration", "declarations", "var x = 42;"),
    accept("let_const", "declarations", "let a = 1, b; const c = a + 1;"),
    accept("function_declaration", "declarations", "function add(a, b) { return a + b; }"),
    accept("generator_declaration", "declarations", "function* g() { yield 1; yield* g(); }"),
    accept("async_function", "declarations", "async function f() { await f(); }"),
    accept("class_declaration", "declarations", "class A extends B { constructor() { super(); } }"),
    accept("let_as_identifier", "declarations", "var let = 1; let;"),
    reject_with("const_without_init", "declarations", "const x;", "Missing initializer in const declaration"),
    reject_with(
        "destructuring_without_init",
        "declarations",
        "var {a};",
        "Missing initializer in destructuring declaration",
    ),
    reject_with("escaped_keyword", "declarations", r"var v\u0061r = 1;", "Keyword must not contain escaped characters"),
    // Statements
    accept("if_else", "statements", "if (a) b(); else { c(); }"),
    accept("loops", "statements", "while (a) break; do a(); while (b) for (;;) {}"),
    accept("for_in_of", "statements", "for (const k in o) {} for (let [a, b] of pairs) {}"),
    accept("for_await", "statements", "async function f() { for await (const x of xs) {} }"),
    accept("labels", "statements", "outer: for (;;) { inner: while (1) { continue outer; } }"),
    accept("switch", "statements", "switch (x) { case 1: break; default: y(); }"),
    accept("try_forms", "statements", "try {} catch {} try {} catch (e) {} finally {}"),
    accept("asi", "statements", "a = 1\nb = 2\nreturn_ = a\n++b"),
    accept("debugger_empty", "statements", "debugger; ; ;"),
    reject_with("try_alone", "statements", "try {}", "Missing catch or finally after try"),
    reject_with("top_level_break", "statements", "break;", "Illegal break statement"),
    reject_with(
        "continue_in_switch",
        "statements",
        "switch (x) { case 1: continue; }",
        "Illegal continue statement: no surrounding iteration statement",
    ),
    reject_with("undefined_label", "statements", "while (1) { break nowhere; }", "Undefined label 'nowhere'"),
    reject_with("top_level_return", "statements", "return 1;", "Illegal return statement"),
    reject_with(
        "two_defaults",
        "statements",
        "switch (x) { default: default: }",
        "More than one default clause in switch statement",
    ),
    reject("throw_newline", "statements", "throw\nerror;"),
    reject_with("declaration_as_loop_body", "statements", "while (x) const z = 0;", "Unexpected token const"),
    // Expressions
    accept("precedence", "expressions", "a + b * c ** d ** e - f % g;"),
    accept("logical_mix_parenthesized", "expressions", "(a && b || c) ?? d;"),
    accept("conditional", "expressions", "a ? b : c ? d : e;"),
    accept("optional_chain", "expressions", "a?.b?.[c]?.(d).e;"),
    accept("new_target", "expressions", "function F() { return new.target; }"),
    accept("regex_vs_division", "expressions", "x = a / b / c; y = /re/g.test(s);"),
    accept("keyword_property_division", "expressions", "a.return / 2; x.default / y / z;"),
    accept("template", "expressions", "`a${b}c${`d${e}`}`; tag`x\\unicode`;"),
    accept("private_in", "expressions", "class A { #x; static has(o) { return #x in o; } }"),
    accept("literals", "expressions", "0x1F; 0o17; 0b11; 1_000; 10n; 017; .5e-3; 'str'; null; true;"),
    reject_with("assign_to_binary", "expressions", "a + b = c", "Invalid left-hand side in assignment"),
    reject_with("assign_to_chain", "expressions", "a?.b = 1", "Invalid left-hand side in assignment"),
    reject_with("prefix_on_call", "expressions", "++a()", "Invalid left-hand side expression in prefix operation"),
    reject_with("postfix_on_literal", "expressions", "1++", "Invalid left-hand side expression in postfix operation"),
    reject("unary_before_exponent", "expressions", "-a ** b;"),
    reject("mixed_coalesce", "expressions", "a && b ?? c;"),
    reject_with("optional_chain_from_new", "expressions", "new a?.b()", "Invalid optional chain from new expression"),
    reject_with("tagged_optional_chain", "expressions", "a?.b`c`", "Invalid tagged template on optional chain"),
    reject_with("untagged_bad_escape", "expressions", r"`\unicode`", "Invalid escape sequence in template"),
    reject_with(
        "private_outside_class",
        "expressions",
        "this.#x",
        "Private field '#x' must be declared in an enclosing class",
    ),
    // Arrows and cover grammar
    accept("arrow_forms", "arrows", "x => x; (a, b) => a + b; () => {}; async (x) => await x;"),
    accept("arrow_patterns", "arrows", "({ a, b: [c] = [] }, ...rest) => a;"),
    accept("destructuring_assignment", "arrows", "({ a: x, b = 2 } = o); [p, , ...q] = r;"),
    accept("parenthesized_sequence", "arrows", "(a, b);"),
    reject_with("trailing_comma_sequence", "arrows", "(a, b,);", "Unexpected token )"),
    reject_with("rest_then_comma", "arrows", "(...a,) => 0", "Rest parameter must be last formal parameter"),
    reject_with("newline_before_arrow", "arrows", "(a)\n=> a", "Unexpected token =>"),
    reject_with("arrow_body_operand", "arrows", "x => {} + 1", "Unexpected token +"),
    reject("shorthand_init_in_object", "arrows", "({ a = 1 });"),
    reject("parenthesized_object_target", "arrows", "({a}) = 1;"),
    reject("parenthesized_arrow_parameter", "arrows", "((a)) => 0;"),
    reject("yield_in_arrow_parameters", "arrows", "function* g() { (a = yield) => 0; }"),
    // Functions and generators
    accept("default_params", "functions", "function f(a = 1, { b } = {}, ...c) {}"),
    accept("yield_as_identifier", "functions", "function f() { var yield = 1; }"),
    accept("await_as_identifier", "functions", "var await = 1;"),
    reject_with("yield_binding_in_generator", "functions", "function* g() { var yield; }", "Unexpected reserved word"),
    reject_with("await_binding_in_async", "functions", "async function f() { var await; }", "Unexpected reserved word"),
    reject_with(
        "yield_in_params",
        "functions",
        "function* g(a = yield) {}",
        "Yield expression not allowed in formal parameter",
    ),
    reject_with("getter_with_param", "functions", "({ get a(x) {} })", "Getter must not have any formal parameters."),
    reject_with("setter_without_param", "functions", "({ set a() {} })", "Setter must have exactly one formal parameter."),
    // Classes
    accept(
        "class_members",
        "classes",
        "class A { static x = 1; #y; get z() { return 1; } set z(v) {} static { A.x++; } *gen() {} async m() {} }",
    ),
    accept("class_expression", "classes", "const C = class Named {};"),
    accept("computed_members", "classes", "class A { [k] = 1; ['m']() {} }"),
    reject("duplicate_constructor", "classes", "class A { constructor() {} constructor() {} }"),
    reject("field_named_constructor", "classes", "class A { constructor = 1; }"),
    reject("static_prototype", "classes", "class A { static prototype() {} }"),
    reject("super_call_outside_constructor", "classes", "class A { m() { super(); } }"),
    // Lexical
    accept("hashbang", "lexical", "#!/usr/bin/env node\nx;"),
    accept("unicode_identifiers", "lexical", "var \\u0061b = 1, ünï = 2;"),
    accept("comments", "lexical", "/* block */ a // line\nb; /* two\nlines */ c;"),
    reject_with("bad_character", "lexical", "a @ b;", "Invalid or unexpected token"),
    reject("unterminated_string", "lexical", "'abc"),
    reject("unterminated_comment", "lexical", "/* never closed"),
    reject("bad_hex_escape", "lexical", r"'\x';"),
    reject("separator_at_end", "lexical", "1_;"),
];

/// Every fixture, in declaration order.
pub fn fixtures() -> &'static [Fixture] {
    FIXTURES
}

/// Check one fixture against the parser.
pub fn run_fixture(fixture: &Fixture) -> Outcome {
    let result = esfront_parser::parse(fixture.source);
    let detail = match (fixture.expect, result) {
        (Expect::Accept, Ok(_)) => None,
        (Expect::Accept, Err(errors)) => Some(describe(&errors)),
        (Expect::Reject(_), Ok(_)) => Some("parsed, expected an error".to_string()),
        (Expect::Reject(None), Err(_)) => None,
        (Expect::Reject(Some(expected)), Err(errors)) => match errors.first() {
            Some(first) if first.message == expected => None,
            _ => Some(format!("expected '{}', got {}", expected, describe(&errors))),
        },
    };
    Outcome { fixture: *fixture, passed: detail.is_none(), detail }
}

/// Run fixtures in parallel; outcomes keep the input order.
pub fn run(fixtures: &[Fixture]) -> Vec<Outcome> {
    fixtures.par_iter().map(run_fixture).collect()
}

pub fn run_all() -> Vec<Outcome> {
    run(fixtures())
}

fn describe(errors: &ErrorList) -> String {
    match errors.first() {
        Some(first) => format!("'{}' ({} errors)", first.message, errors.len()),
        None => "no errors".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_names_are_unique() {
        let mut names: Vec<_> = fixtures().iter().map(|f| f.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[test]
    fn test_run_keeps_order() {
        let outcomes = run(&fixtures()[..5]);
        let names: Vec<_> = outcomes.iter().map(|o| o.fixture.name).collect();
        let expected: Vec<_> = fixtures()[..5].iter().map(|f| f.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_wrong_expectation_is_reported() {
        let fixture = reject("parses_fine", "self", "x;");
        let outcome = run_fixture(&fixture);
        assert!(!outcome.passed);
        assert_eq!(outcome.detail.as_deref(), Some("parsed, expected an error"));
    }
}
