/// The type tag of an interior [`crate::tree::Node`].
///
/// Variants follow spec.md §3's node categories directly: class
/// declaration, member declarations, statements, and expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Class / members
    ClassDecl,
    VariableDecl,
    ConstantDecl,
    SignalDecl,
    EnumDecl,
    InnerClassDecl,
    MethodDecl,
    PropertyDecl,
    AnnotationBlock,

    // Structure
    Block,
    ParameterList,
    Parameter,
    ArgumentList,

    // Statements
    IfStmt,
    ElifClause,
    ElseClause,
    WhileStmt,
    ForStmt,
    MatchStmt,
    MatchCase,
    ReturnStmt,
    BreakStmt,
    ContinueStmt,
    AssignmentStmt,
    ExprStmt,
    PassStmt,

    // Expressions
    IdentifierExpr,
    NumberExpr,
    StringExpr,
    BooleanExpr,
    ArrayExpr,
    DictionaryExpr,
    IndexerExpr,
    MemberAccessExpr,
    CallExpr,
    UnaryExpr,
    BinaryExpr,
    LambdaExpr,
    TernaryExpr,
    GetNodeExpr,
    StringNameExpr,
    MatchPatternExpr,
    RestExpr,
    AwaitExpr,
    YieldExpr,

    /// A node the parser could not classify; carries its raw tokens so the
    /// round-trip invariant still holds even for malformed input.
    Error,
}

impl NodeKind {
    /// Whether this kind is one of the top-level declarations that make up
    /// a class body (spec.md's "member" — variable, constant, method,
    /// signal, enum, inner class, annotation block, property).
    pub const fn is_member(self) -> bool {
        matches!(
            self,
            NodeKind::VariableDecl
                | NodeKind::ConstantDecl
                | NodeKind::SignalDecl
                | NodeKind::EnumDecl
                | NodeKind::InnerClassDecl
                | NodeKind::MethodDecl
                | NodeKind::PropertyDecl
                | NodeKind::AnnotationBlock
        )
    }

    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            NodeKind::IdentifierExpr
                | NodeKind::NumberExpr
                | NodeKind::StringExpr
                | NodeKind::BooleanExpr
                | NodeKind::ArrayExpr
                | NodeKind::DictionaryExpr
                | NodeKind::IndexerExpr
                | NodeKind::MemberAccessExpr
                | NodeKind::CallExpr
                | NodeKind::UnaryExpr
                | NodeKind::BinaryExpr
                | NodeKind::LambdaExpr
                | NodeKind::TernaryExpr
                | NodeKind::GetNodeExpr
                | NodeKind::StringNameExpr
                | NodeKind::MatchPatternExpr
                | NodeKind::RestExpr
                | NodeKind::AwaitExpr
                | NodeKind::YieldExpr
        )
    }

    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::IfStmt
                | NodeKind::WhileStmt
                | NodeKind::ForStmt
                | NodeKind::MatchStmt
                | NodeKind::ReturnStmt
                | NodeKind::BreakStmt
                | NodeKind::ContinueStmt
                | NodeKind::AssignmentStmt
                | NodeKind::ExprStmt
                | NodeKind::PassStmt
        )
    }
}
