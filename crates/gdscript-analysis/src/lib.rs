//! Facade crate wiring the incremental parser (`gdscript-incremental`),
//! flow-sensitive type inference (`gdscript-flow`/`gdscript-types`), and
//! the diagnostic engine (`gdscript-diagnostics`) into one pipeline, plus
//! the cross-cutting `AnalysisConfig` and `CancellationToken` spec.md §5
//! and §7 name. The external parser `P` (spec.md §6) stays a trait object
//! this crate consumes, never implements — the minimal `Parser` used in
//! this crate's own integration tests lives under `tests/`, not here.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
mod cancellation;
mod config;
mod pipeline;

pub use cancellation::{Cancellable, CancellationToken};
pub use config::AnalysisConfig;
pub use pipeline::{analyze_methods, finish_diagnostics, reparse, MethodInput, MethodOutput};
