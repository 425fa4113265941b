//! Text spans, text changes, and line-index position tracking.
//!
//! This crate is the bottom of the dependency graph for the script analysis
//! core: the syntax tree, incremental parser, and diagnostics all locate
//! themselves in source text through the types defined here.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
mod change;
mod line_index;
mod span;

pub use change::{ChangeError, TextChange};
pub use line_index::{LineColumn, LineIndex};
pub use span::TextSpan;
