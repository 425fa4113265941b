//! Symbol taxonomy and lexical scope graph (spec.md §3, §4.4).
//!
//! Built in a single pass over a [`gdscript_syntax::Tree`]; discarded and
//! rebuilt whenever the tree changes (scopes are a derived, not persisted,
//! view).

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
mod kind;
mod scope;
mod symbol;

pub use kind::SymbolKind;
pub use scope::{DeclareOutcome, Scope, ScopeGraph, ScopeId, ScopeRole};
pub use symbol::{Symbol, SymbolAnnotations};
