//! Flow-sensitive type narrowing over per-method control flow (spec.md
//! §4.7). Consumes the decoupled [`gdscript_types::Expr`] view plus this
//! crate's own [`Stmt`] view, so it stays agnostic of the concrete syntax
//! tree shape the incremental parser produces.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
mod analyzer;
mod flow_state;
mod narrowing;
mod stmt;

pub use analyzer::{merge_cross_file_profiles, ContainerProfile, FlowAnalyzer, DEFAULT_FIXED_POINT_CAP};
pub use flow_state::{merge_branches, FlowSnapshot, FlowState, TerminationKind};
pub use narrowing::{analyze_guard, apply_narrowings, Guard, NarrowAction, Narrowing};
pub use stmt::{MatchCase, MatchPattern, Stmt};
