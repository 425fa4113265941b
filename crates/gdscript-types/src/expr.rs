/// A formal parameter of a [`LambdaInfo`] (spec.md §4.6: "`Ps` uses declared
/// parameter annotations; missing annotations become `Variant`").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprParam {
    pub name: String,
    pub type_annotation: Option<String>,
}

/// The target of an `await` expression (spec.md §4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwaitTarget {
    /// `await some_signal` naming a declared signal on the current class.
    Signal(String),
    /// `await some_coroutine_call(...)` — the callee expression of a call.
    CoroutineCall(Box<Expr>),
    /// The awaited expression could not be classified (e.g. a dynamic
    /// expression, or a null/missing inner expression).
    Unknown,
}

/// Pre-extracted shape of a lambda body used for return-type inference
/// (spec.md §4.6). `return_expressions` are the expressions of every
/// `return e` statement reachable in the lambda's own body (not nested
/// lambdas); `falls_off_end` is true when control can reach the end of the
/// body without an explicit return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaInfo {
    pub parameters: Vec<ExprParam>,
    pub declared_return_type: Option<String>,
    pub return_expressions: Vec<Expr>,
    pub falls_off_end: bool,
}

/// The semantic view of an expression that the type inference engine
/// operates over (spec.md §3's expression node categories). Constructed by
/// whichever caller walks the syntax tree — this crate is agnostic to the
/// exact tree shape the external parser `P` produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    NumberLiteral(String),
    StringLiteral(String),
    BooleanLiteral(bool),
    Identifier(String),
    Array(Vec<Expr>),
    Dictionary(Vec<(Expr, Expr)>),
    Indexer { base: Box<Expr>, key: Box<Expr> },
    MemberAccess { base: Box<Expr>, member: String },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Lambda(Box<LambdaInfo>),
    Await(Box<AwaitTarget>),
    Yield,
    Unary { operand: Box<Expr> },
    Binary { left: Box<Expr>, right: Box<Expr> },
    Ternary { then_branch: Box<Expr>, else_branch: Box<Expr> },
}

impl Expr {
    pub fn number(text: impl Into<String>) -> Self {
        Expr::NumberLiteral(text.into())
    }
    pub fn string(text: impl Into<String>) -> Self {
        Expr::StringLiteral(text.into())
    }
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }
}
