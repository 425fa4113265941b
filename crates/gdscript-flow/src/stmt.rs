use gdscript_types::Expr;

use crate::narrowing::Guard;

/// The shape of a `match` case's binding pattern (spec.md §4.7): how the
/// case's bound variable's type is derived from the subject's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchPattern {
    /// A plain `case x:` binding — gets the subject's own type.
    Direct,
    /// `case [x]:` style array-destructuring binding — gets the subject
    /// array's element type.
    ArrayElement,
    /// `case {x: v}:` style dictionary-value binding — gets the subject
    /// dictionary's value type.
    DictionaryValue,
    /// `case x when x is T:` (or the pattern-intrinsic type guard form) —
    /// the binding gets `T` directly.
    IsType(gdscript_types::SemanticType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCase {
    pub binding: Option<String>,
    pub pattern: MatchPattern,
    pub body: Vec<Stmt>,
}

/// The statement-level view the flow analyzer walks (spec.md §4.7). Like
/// [`gdscript_types::Expr`], this is a decoupled semantic view a caller
/// constructs by walking the real syntax tree — this crate does not
/// depend on the concrete tree shape the external parser `P` produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `target = value`. `target` is usually an `Identifier`, but may be an
    /// `Indexer`/`MemberAccess` — only the `Identifier` case introduces or
    /// updates tracked flow state; other targets are still walked for
    /// container-usage observations.
    Assignment { target: Expr, value: Expr },
    If { branches: Vec<(Guard, Vec<Stmt>)>, else_branch: Option<Vec<Stmt>> },
    While { cond: Guard, body: Vec<Stmt> },
    For { var: String, collection: Expr, body: Vec<Stmt> },
    Match { subject: Expr, cases: Vec<MatchCase> },
    Return(Option<Expr>),
    Break,
    Continue,
    /// A bare expression statement — most often a call, walked for its
    /// side effects on container-usage observations.
    Expr(Expr),
}
