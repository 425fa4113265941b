//! Diagnostic engine, suppression directives, and the two report file
//! formats (spec.md §4.8, §6). Rule functions in [`rules`] operate on
//! small decoupled "fact" structs rather than the concrete syntax tree,
//! the same pattern `gdscript-types` and `gdscript-flow` use to stay
//! tree-shape-agnostic.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
mod diagnostic;
mod engine;
pub mod report;
pub mod rules;
mod suppression;

pub use diagnostic::{sort_diagnostics, Diagnostic, DiagnosticLocation, LineColumnStyle};
pub use engine::{DiagnosticEngine, DiagnosticOptions};
pub use suppression::{apply_suppression, SuppressionMap};
