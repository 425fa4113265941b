use std::collections::HashSet;

use gdscript_token::TokenKind;

use crate::tree::{ElementId, Tree};

/// Outcome of [`validate`]. Never throws — every invariant violation is
/// collected into `errors` instead (spec.md §4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    fn from_errors(errors: Vec<String>) -> Self {
        Self { is_valid: errors.is_empty(), errors }
    }
}

/// Checks the AST invariants from spec.md §3: a present tree, consistent
/// parent/child links, unique token ownership, and (when `expected_text`
/// is given) exact round-trip text equality.
pub fn validate(tree: Option<&Tree>, expected_text: Option<&str>) -> ValidationResult {
    let Some(tree) = tree else {
        return ValidationResult::from_errors(vec!["null".to_string()]);
    };

    let mut errors = Vec::new();

    // Parent/child consistency: every non-root node's parent's children
    // contain it exactly once.
    for id in tree.all_nodes() {
        if id == tree.root() {
            continue;
        }
        match tree.parent_of(id) {
            None => errors.push(format!("{id:?} is not the root but has no parent")),
            Some(parent) => {
                let occurrences = tree.children_of(parent).iter().filter(|c| **c == id).count();
                if occurrences != 1 {
                    errors.push(format!(
                        "{id:?}'s parent {parent:?} lists it {occurrences} times (expected exactly 1)"
                    ));
                }
            }
        }
    }
    if tree.parent_of(tree.root()).is_some() {
        errors.push("root has a parent".to_string());
    }

    // Token uniqueness: no element id is aliased as a child in more than
    // one place across the tree.
    let mut seen_as_child = HashSet::new();
    for id in tree.all_nodes() {
        for child in tree.children_of(id) {
            if !seen_as_child.insert(*child) {
                errors.push(format!("{child:?} is shared by more than one parent"));
            }
        }
    }

    if let Some(expected) = expected_text {
        let actual = tree.to_string_lossless();
        if actual != expected {
            errors.push(format!("Text mismatch: {}", short_diff(expected, &actual)));
        }
    }

    ValidationResult::from_errors(errors)
}

fn short_diff(expected: &str, actual: &str) -> String {
    let expected_chars: Vec<char> = expected.chars().collect();
    let actual_chars: Vec<char> = actual.chars().collect();
    let mismatch_at = expected_chars
        .iter()
        .zip(actual_chars.iter())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| expected_chars.len().min(actual_chars.len()));

    let window = 10;
    let start = mismatch_at.saturating_sub(window);
    let expected_ctx: String = expected_chars[start..expected_chars.len().min(mismatch_at + window)].iter().collect();
    let actual_ctx: String = actual_chars[start..actual_chars.len().min(mismatch_at + window)].iter().collect();
    format!("at offset {mismatch_at}: expected ...{expected_ctx:?}..., got ...{actual_ctx:?}...")
}

/// A single divergence found by [`compare_structure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralDifference {
    pub index: usize,
    pub left: Option<String>,
    pub right: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StructuralItem {
    Node(&'static str),
    Token(TokenKind, String),
}

impl std::fmt::Display for StructuralItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructuralItem::Node(name) => write!(f, "node:{name}"),
            StructuralItem::Token(kind, text) => write!(f, "token:{kind:?}({text:?})"),
        }
    }
}

fn structural_sequence(tree: &Tree) -> Vec<StructuralItem> {
    let mut items = Vec::new();
    for id in tree.all_nodes() {
        collect_structural_item(tree, id, &mut items);
    }
    items
}

fn collect_structural_item(tree: &Tree, id: ElementId, out: &mut Vec<StructuralItem>) {
    if let Some(kind) = tree.kind_of(id) {
        out.push(StructuralItem::Node(kind_name(kind)));
    }
    for child in tree.children_of(id) {
        if let Some(token) = tree.token_of(*child) {
            if token.is_trivia() && token.kind != TokenKind::Comment {
                continue;
            }
            let text = if token.kind == TokenKind::Comment { token.text.trim().to_string() } else { token.text.to_string() };
            out.push(StructuralItem::Token(token.kind, text));
        }
    }
}

fn kind_name(kind: crate::kind::NodeKind) -> &'static str {
    // A stable name per variant, independent of Debug formatting so that
    // renaming a variant doesn't silently change comparison semantics.
    use crate::kind::NodeKind::*;
    match kind {
        ClassDecl => "ClassDecl",
        VariableDecl => "VariableDecl",
        ConstantDecl => "ConstantDecl",
        SignalDecl => "SignalDecl",
        EnumDecl => "EnumDecl",
        InnerClassDecl => "InnerClassDecl",
        MethodDecl => "MethodDecl",
        PropertyDecl => "PropertyDecl",
        AnnotationBlock => "AnnotationBlock",
        Block => "Block",
        ParameterList => "ParameterList",
        Parameter => "Parameter",
        ArgumentList => "ArgumentList",
        IfStmt => "IfStmt",
        ElifClause => "ElifClause",
        ElseClause => "ElseClause",
        WhileStmt => "WhileStmt",
        ForStmt => "ForStmt",
        MatchStmt => "MatchStmt",
        MatchCase => "MatchCase",
        ReturnStmt => "ReturnStmt",
        BreakStmt => "BreakStmt",
        ContinueStmt => "ContinueStmt",
        AssignmentStmt => "AssignmentStmt",
        ExprStmt => "ExprStmt",
        PassStmt => "PassStmt",
        IdentifierExpr => "IdentifierExpr",
        NumberExpr => "NumberExpr",
        StringExpr => "StringExpr",
        BooleanExpr => "BooleanExpr",
        ArrayExpr => "ArrayExpr",
        DictionaryExpr => "DictionaryExpr",
        IndexerExpr => "IndexerExpr",
        MemberAccessExpr => "MemberAccessExpr",
        CallExpr => "CallExpr",
        UnaryExpr => "UnaryExpr",
        BinaryExpr => "BinaryExpr",
        LambdaExpr => "LambdaExpr",
        TernaryExpr => "TernaryExpr",
        GetNodeExpr => "GetNodeExpr",
        StringNameExpr => "StringNameExpr",
        MatchPatternExpr => "MatchPatternExpr",
        RestExpr => "RestExpr",
        AwaitExpr => "AwaitExpr",
        YieldExpr => "YieldExpr",
        Error => "Error",
    }
}

/// Structurally compares two trees, ignoring token positions and comments'
/// exact leading whitespace: equal iff their node/token type sequences
/// match in order and non-whitespace token `(kind, text)` pairs match.
pub fn compare_structure(a: &Tree, b: &Tree) -> Vec<StructuralDifference> {
    let seq_a = structural_sequence(a);
    let seq_b = structural_sequence(b);
    let len = seq_a.len().max(seq_b.len());
    let mut diffs = Vec::new();
    for index in 0..len {
        let left = seq_a.get(index).map(|i| i.to_string());
        let right = seq_b.get(index).map(|i| i.to_string());
        if left != right {
            diffs.push(StructuralDifference { index, left, right });
        }
    }
    diffs
}
