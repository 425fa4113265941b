use thiserror::Error;

use gdscript_syntax::Tree;

/// Failure from the external parser `P` (spec.md §6). This crate never
/// constructs one itself — it only propagates what a [`ParserFacade`]
/// implementation returns, and treats every occurrence as a trigger for
/// the incremental path's fallback-to-full-reparse behaviour rather than
/// as a programmer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error: {0}")]
pub struct ParseError(pub String);

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The external parser surface the incremental reparser calls out to
/// (spec.md §6). Lexing and grammar recognition are outside this core's
/// scope; this crate only depends on this trait's contract.
pub trait ParserFacade: Send + Sync {
    /// Parses a complete source file, top-level entry point.
    fn parse_file(&self, source: &str) -> Result<Tree, ParseError>;

    /// Parses a single expression in isolation — used by test utilities,
    /// not by the incremental reparse path itself.
    fn parse_expression(&self, source: &str) -> Result<Tree, ParseError>;

    /// Parses a single top-level member in isolation, returning a `Tree`
    /// rooted at that member's node. Used by the member-level incremental
    /// reparse path (spec.md §4.3 step 3).
    fn parse_member(&self, source: &str) -> Result<Tree, ParseError>;
}
