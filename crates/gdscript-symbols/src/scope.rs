use std::collections::HashMap;

use gdscript_syntax::ElementId;

use crate::symbol::Symbol;

/// Handle into a [`ScopeGraph`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) usize);

/// The kind of lexical boundary a [`Scope`] represents. Lambdas get their
/// own variant because they read (but never write-through) their enclosing
/// scope (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeRole {
    Class,
    Method,
    Lambda,
    Block,
}

/// `(parent_scope?, declarations: map name -> symbol, owner_node)`
/// (spec.md §3).
#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub role: ScopeRole,
    pub owner_node: ElementId,
    declarations: HashMap<String, Symbol>,
}

impl Scope {
    pub fn declarations(&self) -> impl Iterator<Item = &Symbol> {
        self.declarations.values()
    }

    pub fn get_local(&self, name: &str) -> Option<&Symbol> {
        self.declarations.get(name)
    }
}

/// Outcome of [`ScopeGraph::declare`]. Redeclaration is a diagnostic signal
/// for the caller, never a silent replacement (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclareOutcome {
    Declared,
    AlreadyDeclared { existing: Symbol },
}

/// The full scope tree produced by a single pass over a [`gdscript_syntax::Tree`]
/// (spec.md §4.4). Scopes are arena-indexed; `parent` links let `lookup`
/// walk outward without borrowing issues.
#[derive(Debug, Clone, Default)]
pub struct ScopeGraph {
    scopes: Vec<Scope>,
}

impl ScopeGraph {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Creates a new scope and returns its id. `parent: None` makes it a
    /// root (the class scope).
    pub fn create_scope(&mut self, parent: Option<ScopeId>, role: ScopeRole, owner_node: ElementId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope { parent, role, owner_node, declarations: HashMap::new() });
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    /// Declares `symbol` in `scope`. Returns [`DeclareOutcome::AlreadyDeclared`]
    /// without mutating the scope when the name already exists there —
    /// redeclaration is reported by the caller as a diagnostic, never
    /// silently replaced (spec.md §3).
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> DeclareOutcome {
        let entry = &mut self.scopes[scope.0].declarations;
        if let Some(existing) = entry.get(&symbol.name) {
            return DeclareOutcome::AlreadyDeclared { existing: existing.clone() };
        }
        entry.insert(symbol.name.clone(), symbol);
        DeclareOutcome::Declared
    }

    /// Walks `scope` and its ancestors outward, returning the nearest
    /// matching symbol, or `None` if the chain is exhausted without a
    /// local match (the caller falls back to the runtime provider —
    /// spec.md §4.4).
    pub fn lookup(&self, name: &str, scope: ScopeId) -> Option<&Symbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = &self.scopes[id.0];
            if let Some(sym) = s.declarations.get(name) {
                return Some(sym);
            }
            current = s.parent;
        }
        None
    }

    pub fn parent_of(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0].parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_syntax::{NodeKind, TreeBuilder};
    use crate::kind::SymbolKind;

    fn dummy_node() -> ElementId {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::ClassDecl);
        b.finish_node();
        b.finish().root()
    }

    #[test]
    fn lookup_walks_parent_chain() {
        let mut graph = ScopeGraph::new();
        let class_scope = graph.create_scope(None, ScopeRole::Class, dummy_node());
        let method_scope = graph.create_scope(Some(class_scope), ScopeRole::Method, dummy_node());
        let block_scope = graph.create_scope(Some(method_scope), ScopeRole::Block, dummy_node());

        graph.declare(class_scope, Symbol::new("health", SymbolKind::Variable, dummy_node()));
        graph.declare(method_scope, Symbol::new("data", SymbolKind::Parameter, dummy_node()));

        assert!(graph.lookup("health", block_scope).is_some());
        assert!(graph.lookup("data", block_scope).is_some());
        assert!(graph.lookup("missing", block_scope).is_none());
    }

    #[test]
    fn inner_scope_shadows_outer_without_mutating_outer() {
        let mut graph = ScopeGraph::new();
        let class_scope = graph.create_scope(None, ScopeRole::Class, dummy_node());
        let block_scope = graph.create_scope(Some(class_scope), ScopeRole::Block, dummy_node());

        graph.declare(class_scope, Symbol::new("x", SymbolKind::Variable, dummy_node()));
        graph.declare(block_scope, Symbol::new("x", SymbolKind::Iterator, dummy_node()));

        assert_eq!(graph.lookup("x", block_scope).unwrap().kind, SymbolKind::Iterator);
        assert_eq!(graph.scope(class_scope).get_local("x").unwrap().kind, SymbolKind::Variable);
    }

    #[test]
    fn redeclaration_in_same_scope_is_reported_not_replaced() {
        let mut graph = ScopeGraph::new();
        let scope = graph.create_scope(None, ScopeRole::Class, dummy_node());
        assert_eq!(graph.declare(scope, Symbol::new("x", SymbolKind::Variable, dummy_node())), DeclareOutcome::Declared);

        let outcome = graph.declare(scope, Symbol::new("x", SymbolKind::Constant, dummy_node()));
        match outcome {
            DeclareOutcome::AlreadyDeclared { existing } => assert_eq!(existing.kind, SymbolKind::Variable),
            DeclareOutcome::Declared => panic!("expected AlreadyDeclared"),
        }
        // the original declaration is untouched
        assert_eq!(graph.scope(scope).get_local("x").unwrap().kind, SymbolKind::Variable);
    }

    #[test]
    fn sibling_loops_may_reuse_iterator_name() {
        let mut graph = ScopeGraph::new();
        let method_scope = graph.create_scope(None, ScopeRole::Method, dummy_node());
        let loop_a = graph.create_scope(Some(method_scope), ScopeRole::Block, dummy_node());
        let loop_b = graph.create_scope(Some(method_scope), ScopeRole::Block, dummy_node());

        assert_eq!(graph.declare(loop_a, Symbol::new("item", SymbolKind::Iterator, dummy_node())), DeclareOutcome::Declared);
        assert_eq!(graph.declare(loop_b, Symbol::new("item", SymbolKind::Iterator, dummy_node())), DeclareOutcome::Declared);
    }
}
