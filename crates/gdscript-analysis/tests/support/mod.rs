//! Shared test doubles for this crate's integration tests: a minimal
//! [`ParserFacade`] understanding only `var name = value` declarations
//! (modeled on `gdscript-incremental`'s own `LineVarParser` test fixture)
//! and a [`TypeContext`] test double (modeled on `gdscript-flow`'s and
//! `gdscript-types`'s own `TestContext` fixtures). Neither belongs in
//! `src/` — the real parser and scope graph are external collaborators
//! this crate only consumes.

use std::collections::HashMap;

use gdscript_incremental::{ParseError, ParserFacade};
use gdscript_runtime::{DefaultRuntimeProvider, RuntimeProvider};
use gdscript_syntax::{NodeKind, Tree, TreeBuilder};
use gdscript_token::{Token, TokenKind};
use gdscript_types::{Confidence, Expr, IdentifierResolution, MemberResolution, SemanticType, TypeContext};

fn tok(kind: TokenKind, text: &str, start: usize) -> Token {
    let len = text.chars().count();
    Token::new(kind, text, gdscript_span::TextSpan::new(start, len), 0, start as u32, 0, (start + len) as u32)
}

fn var_member(b: &mut TreeBuilder, name: &str, value: &str, start: usize) -> usize {
    let mut pos = start;
    b.start_node(NodeKind::VariableDecl);
    b.token(tok(TokenKind::Keyword, "var", pos));
    pos += 3;
    b.token(tok(TokenKind::Whitespace, " ", pos));
    pos += 1;
    b.token(tok(TokenKind::Identifier, name, pos));
    pos += name.chars().count();
    b.token(tok(TokenKind::Whitespace, " ", pos));
    pos += 1;
    b.token(tok(TokenKind::Operator, "=", pos));
    pos += 1;
    b.token(tok(TokenKind::Whitespace, " ", pos));
    pos += 1;
    b.token(tok(TokenKind::NumberLiteral, value, pos));
    pos += value.chars().count();
    b.token(tok(TokenKind::Newline, "\n", pos));
    pos += 1;
    b.finish_node();
    pos
}

/// Builds a class tree out of `decls`, one `var` member per pair, laid
/// out sequentially starting at offset 0.
pub fn class_tree(decls: &[(&str, &str)]) -> Tree {
    let mut b = TreeBuilder::new();
    b.start_node(NodeKind::ClassDecl);
    let mut pos = 0;
    for (name, value) in decls {
        pos = var_member(&mut b, name, value, pos);
    }
    b.finish_node();
    b.finish()
}

pub fn class_text(decls: &[(&str, &str)]) -> String {
    decls.iter().map(|(n, v)| format!("var {n} = {v}\n")).collect()
}

fn parse_decls(source: &str) -> Option<Vec<(String, String)>> {
    source
        .lines()
        .map(|line| {
            let rest = line.strip_prefix("var ")?;
            let (name, value) = rest.split_once(" = ")?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// A test-only [`ParserFacade`] that only understands single `var name =
/// value` declarations, one per line — just enough surface to drive
/// [`gdscript_analysis::reparse`] without a real grammar.
pub struct LineVarParser;

impl ParserFacade for LineVarParser {
    fn parse_file(&self, source: &str) -> Result<Tree, ParseError> {
        let decls = parse_decls(source).ok_or_else(|| ParseError::new("not var decls"))?;
        let refs: Vec<(&str, &str)> = decls.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();
        Ok(class_tree(&refs))
    }

    fn parse_expression(&self, _source: &str) -> Result<Tree, ParseError> {
        Err(ParseError::new("unsupported"))
    }

    fn parse_member(&self, source: &str) -> Result<Tree, ParseError> {
        let trimmed = source.trim_end_matches('\n');
        let rest = trimmed.strip_prefix("var ").ok_or_else(|| ParseError::new("not a var decl"))?;
        let (name, value) = rest.split_once(" = ").ok_or_else(|| ParseError::new("malformed var decl"))?;
        let mut b = TreeBuilder::new();
        var_member(&mut b, name, value, 0);
        Ok(b.finish())
    }
}

/// A [`TypeContext`] test double carrying a fixed parameter table plus a
/// `"get"` member resolving to `Variant`, the same shape
/// `gdscript-flow/src/analyzer.rs`'s own `TestContext` fixture uses.
pub struct TestTypeContext {
    runtime: DefaultRuntimeProvider,
    params: HashMap<String, SemanticType>,
}

impl TestTypeContext {
    pub fn with_param(name: &str, ty: SemanticType) -> Self {
        let mut params = HashMap::new();
        params.insert(name.to_string(), ty);
        Self { runtime: DefaultRuntimeProvider, params }
    }
}

impl TypeContext for TestTypeContext {
    fn runtime(&self) -> &dyn RuntimeProvider {
        &self.runtime
    }

    fn current_class(&self) -> &str {
        "Test"
    }

    fn resolve_identifier(&self, name: &str) -> IdentifierResolution {
        match self.params.get(name) {
            Some(t) => {
                IdentifierResolution::Symbol { declared_type: Some(t.clone()), inferred_type: None, confidence: Confidence::Certain }
            }
            None => IdentifierResolution::Unresolved,
        }
    }

    fn resolve_member(&self, _base: &SemanticType, member: &str) -> Option<MemberResolution> {
        if member == "get" {
            Some(MemberResolution { member_type: SemanticType::variant() })
        } else {
            None
        }
    }

    fn signal_parameter_types(&self, _name: &str) -> Option<Vec<SemanticType>> {
        None
    }

    fn coroutine_return_type(&self, _callee: &Expr) -> Option<SemanticType> {
        None
    }
}
