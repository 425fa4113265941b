//! Runtime-provider trait and default built-in engine tables (spec.md §4.5).
//!
//! This crate is consumed by `gdscript-types` and `gdscript-diagnostics`; it
//! has no dependency on either, since the runtime provider sits below the
//! type inference engine in the dependency order (spec.md §2).

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
mod builtins;
mod provider;
mod signature;

pub use builtins::DefaultRuntimeProvider;
pub use provider::RuntimeProvider;
pub use signature::{
    ConstantKind, GlobalConstantInfo, GlobalFunctionSignature, MemberInfo, MemberKind, ParameterInfo, SignalInfo,
};
