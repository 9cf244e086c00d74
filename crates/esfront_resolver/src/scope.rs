//! Scope table entries for the resolver.

use esfront_ast::node::ScopeContext;
use esfront_core::text::Idx;
use rustc_hash::FxHashMap;

/// Id of the program scope. Unresolved references are stamped with it.
pub const GLOBAL_SCOPE: ScopeContext = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    /// Functions, arrows, methods and class static blocks.
    Function,
    Block,
    Catch,
    Class,
}

impl ScopeKind {
    /// Whether `var` and function declarations hoist to this scope.
    pub fn is_var_scope(self) -> bool {
        matches!(self, ScopeKind::Global | ScopeKind::Function)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Function,
    Parameter,
    Class,
    CatchParameter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub kind: BindingKind,
    /// Start of the identifier that first declared the name.
    pub declared_at: Idx,
}

/// A scope in the resolver's table. Parents are indices into the same table.
#[derive(Debug)]
pub struct Scope {
    pub id: ScopeContext,
    pub kind: ScopeKind,
    /// The enclosing scope (None for the global scope).
    pub parent: Option<usize>,
    pub bindings: FxHashMap<String, Binding>,
}

impl Scope {
    pub fn new(id: ScopeContext, kind: ScopeKind, parent: Option<usize>) -> Self {
        Self {
            id,
            kind,
            parent,
            bindings: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Register `name`. A function declaration replaces an earlier binding of
    /// the same name; any other kind keeps the first one.
    pub fn declare(&mut self, name: &str, kind: BindingKind, declared_at: Idx) {
        let binding = Binding { kind, declared_at };
        match self.bindings.get_mut(name) {
            Some(existing) => {
                if kind == BindingKind::Function && existing.kind != BindingKind::Parameter {
                    *existing = binding;
                }
            }
            None => {
                self.bindings.insert(name.to_string(), binding);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_declaration_wins() {
        let mut scope = Scope::new(GLOBAL_SCOPE, ScopeKind::Global, None);
        scope.declare("a", BindingKind::Var, 1);
        scope.declare("a", BindingKind::Let, 9);
        assert_eq!(
            scope.get("a"),
            Some(&Binding { kind: BindingKind::Var, declared_at: 1 })
        );
    }

    #[test]
    fn test_function_replaces_var_but_not_parameter() {
        let mut scope = Scope::new(2, ScopeKind::Function, Some(0));
        scope.declare("f", BindingKind::Var, 1);
        scope.declare("f", BindingKind::Function, 5);
        assert_eq!(scope.get("f").map(|b| b.kind), Some(BindingKind::Function));

        scope.declare("p", BindingKind::Parameter, 2);
        scope.declare("p", BindingKind::Function, 7);
        assert_eq!(scope.get("p").map(|b| b.kind), Some(BindingKind::Parameter));
    }

    #[test]
    fn test_var_scopes() {
        assert!(ScopeKind::Global.is_var_scope());
        assert!(ScopeKind::Function.is_var_scope());
        assert!(!ScopeKind::Block.is_var_scope());
        assert!(!ScopeKind::Class.is_var_scope());
    }
}
