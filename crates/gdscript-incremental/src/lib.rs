//! Tiered-fallback incremental reparse over the fully-reversible syntax
//! tree (spec.md §4.3). A `T0 -> parse_incremental -> T1` step always
//! ends with a tree that satisfies the same round-trip guarantee a fresh
//! full parse would, whether or not the splice tier fired.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
mod config;
mod parser_facade;
mod reparse;
mod result;

pub use config::IncrementalConfig;
pub use parser_facade::{ParseError, ParserFacade};
pub use reparse::{get_changed_ranges, parse_incremental};
pub use result::{ChangedMember, IncrementalKind, IncrementalResult};
