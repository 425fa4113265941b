//! The fully-reversible syntax tree model and AST validator.
//!
//! Everything downstream (scope graph, type inference, flow analysis,
//! diagnostics) reads this tree; nothing downstream mutates it except
//! through the documented operations here and in `gdscript-incremental`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
mod kind;
mod tree;
mod validator;

pub use kind::NodeKind;
pub use tree::{ElementId, SyntaxError, Tree, TreeBuilder};
pub use validator::{compare_structure, validate, StructuralDifference, ValidationResult};
