//! Token definitions shared by the syntax tree and the parser façade.
//!
//! Tokens are the leaves of the syntax tree (spec.md §3): atomic lexical
//! units carrying their exact source text, a position, and a parent link
//! back into the tree that owns them (tracked by the owner, not stored
//! here — see `gdscript-syntax`).

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
use std::sync::Arc;

use gdscript_span::TextSpan;

/// A single lexical unit produced by the external parser `P` and consumed
/// by the syntax tree.
///
/// The text is kept in an `Arc<str>` so tree cloning (spec.md §4.2) can
/// share token text cheaply while still giving each clone distinct node
/// identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Arc<str>,
    pub span: TextSpan,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Token {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: TokenKind,
        text: impl Into<Arc<str>>,
        span: TextSpan,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self { kind, text: text.into(), span, start_line, start_column, end_line, end_column }
    }

    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::Indentation | TokenKind::Comment
        )
    }
}

/// Lexical classification of a [`Token`].
///
/// This mirrors spec.md §3's token categories. The lexer that produces
/// these values is out of this core's scope (spec.md §1); this crate only
/// names the categories the rest of the pipeline switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    NumberLiteral,
    StringLiteral,
    BooleanLiteral,
    Punctuation,
    Operator,
    Keyword,
    Whitespace,
    Newline,
    Indentation,
    Comment,
    Invalid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivia_classification() {
        let trivia = Token::new(TokenKind::Whitespace, " ", TextSpan::new(0, 1), 0, 0, 0, 1);
        assert!(trivia.is_trivia());

        let ident = Token::new(TokenKind::Identifier, "x", TextSpan::new(0, 1), 0, 0, 0, 1);
        assert!(!ident.is_trivia());
    }

    #[test]
    fn text_sharing_is_cheap_to_clone() {
        let token = Token::new(TokenKind::Identifier, "variable_name", TextSpan::new(0, 13), 0, 0, 0, 13);
        let cloned = token.clone();
        assert!(Arc::ptr_eq(&token.text, &cloned.text));
    }
}
