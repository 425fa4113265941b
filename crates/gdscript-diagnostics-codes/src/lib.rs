//! Stable diagnostic codes and severity levels for the script analysis core.
//!
//! These codes are the public, versioned identifiers the diagnostic engine
//! (`gdscript-diagnostics`) attaches to each finding. They are stable across
//! releases so callers can match on them (suppression directives reference
//! them by this string form — spec.md §6).
//!
//! # Code ranges
//!
//! | Range  | Category                          |
//! |--------|-----------------------------------|
//! | GD1xxx | Syntax                            |
//! | GD2xxx | Scope                             |
//! | GD3xxx | Types                             |
//! | GD5xxx | Call / control flow                |
//! | GD6xxx | Resources                         |
//! | GD7xxx | Signals / duck typing              |
//! | GD8xxx | Abstract classes                  |

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
use std::fmt;

/// Severity level of a diagnostic (spec.md §4.8: `Error | Warning | Hint`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DiagnosticSeverity {
    Error = 1,
    Warning = 2,
    Hint = 3,
}

impl DiagnosticSeverity {
    /// Numeric value matching the host protocol's severity ordering
    /// (lower is more severe), for callers that bridge to such a protocol.
    pub fn to_protocol_value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// Broad grouping of [`DiagnosticCode`] variants, matching spec.md §4.8's
/// category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticCategory {
    Syntax,
    Scope,
    Types,
    Call,
    ControlFlow,
    Resources,
    Signals,
    DuckTyping,
    Abstract,
}

/// Stable diagnostic codes produced by the diagnostic engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticCode {
    // Syntax (GD1xxx)
    InvalidToken,
    UnmatchedBracket,

    // Scope (GD2xxx)
    UndefinedVariable,
    UndefinedFunction,
    DuplicateDeclaration,
    InvalidKeywordUsage,

    // Types (GD3xxx)
    UnknownType,
    InvalidOperandType,
    MethodNotFound,
    IncompatibleReturnType,
    CannotAssign,

    // Call (GD5xxx)
    WrongArgumentCount,

    // Control flow (GD5xxx)
    BreakOutsideLoop,
    ContinueOutsideLoop,
    ReturnOutsideFunction,
    AwaitOutsideFunction,

    // Resources (GD6xxx)
    ResourceNotFound,
    UnknownBaseType,

    // Signals (GD7xxx)
    EmitUnknownSignal,
    WrongEmitArgCount,
    ConnectArityMismatch,

    // Duck typing (GD7xxx)
    UnguardedPropertyAccess,
    UnguardedMethodCall,

    // Abstract (GD8xxx)
    AbstractMethodHasBody,
    ClassNotAbstract,
    SuperInAbstractMethod,
}

impl DiagnosticCode {
    /// The stable `GDxxxx` string form, also accepted by suppression
    /// directives (spec.md §6).
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::InvalidToken => "GD1001",
            DiagnosticCode::UnmatchedBracket => "GD1002",

            DiagnosticCode::UndefinedVariable => "GD2001",
            DiagnosticCode::UndefinedFunction => "GD2002",
            DiagnosticCode::DuplicateDeclaration => "GD2003",
            DiagnosticCode::InvalidKeywordUsage => "GD2004",

            DiagnosticCode::UnknownType => "GD3001",
            DiagnosticCode::InvalidOperandType => "GD3002",
            DiagnosticCode::MethodNotFound => "GD3003",
            DiagnosticCode::IncompatibleReturnType => "GD3004",
            DiagnosticCode::CannotAssign => "GD3005",

            DiagnosticCode::WrongArgumentCount => "GD5001",

            DiagnosticCode::BreakOutsideLoop => "GD5101",
            DiagnosticCode::ContinueOutsideLoop => "GD5102",
            DiagnosticCode::ReturnOutsideFunction => "GD5103",
            DiagnosticCode::AwaitOutsideFunction => "GD5104",

            DiagnosticCode::ResourceNotFound => "GD6001",
            DiagnosticCode::UnknownBaseType => "GD6002",

            DiagnosticCode::EmitUnknownSignal => "GD7001",
            DiagnosticCode::WrongEmitArgCount => "GD7002",
            DiagnosticCode::ConnectArityMismatch => "GD7003",

            DiagnosticCode::UnguardedPropertyAccess => "GD7101",
            DiagnosticCode::UnguardedMethodCall => "GD7102",

            DiagnosticCode::AbstractMethodHasBody => "GD8001",
            DiagnosticCode::ClassNotAbstract => "GD8002",
            DiagnosticCode::SuperInAbstractMethod => "GD8003",
        }
    }

    /// The default severity for this code (spec.md §4.8's rules section).
    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            DiagnosticCode::InvalidToken
            | DiagnosticCode::UnmatchedBracket
            | DiagnosticCode::UndefinedVariable
            | DiagnosticCode::UndefinedFunction
            | DiagnosticCode::DuplicateDeclaration
            | DiagnosticCode::InvalidKeywordUsage
            | DiagnosticCode::MethodNotFound
            | DiagnosticCode::WrongArgumentCount
            | DiagnosticCode::BreakOutsideLoop
            | DiagnosticCode::ContinueOutsideLoop
            | DiagnosticCode::ReturnOutsideFunction
            | DiagnosticCode::AwaitOutsideFunction
            | DiagnosticCode::EmitUnknownSignal
            | DiagnosticCode::WrongEmitArgCount
            | DiagnosticCode::AbstractMethodHasBody
            | DiagnosticCode::ClassNotAbstract
            | DiagnosticCode::SuperInAbstractMethod => DiagnosticSeverity::Error,

            DiagnosticCode::UnknownType
            | DiagnosticCode::InvalidOperandType
            | DiagnosticCode::IncompatibleReturnType
            | DiagnosticCode::CannotAssign
            | DiagnosticCode::ResourceNotFound
            | DiagnosticCode::UnknownBaseType
            | DiagnosticCode::ConnectArityMismatch => DiagnosticSeverity::Warning,

            DiagnosticCode::UnguardedPropertyAccess | DiagnosticCode::UnguardedMethodCall => {
                DiagnosticSeverity::Hint
            }
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        match self {
            DiagnosticCode::InvalidToken | DiagnosticCode::UnmatchedBracket => DiagnosticCategory::Syntax,

            DiagnosticCode::UndefinedVariable
            | DiagnosticCode::UndefinedFunction
            | DiagnosticCode::DuplicateDeclaration
            | DiagnosticCode::InvalidKeywordUsage => DiagnosticCategory::Scope,

            DiagnosticCode::UnknownType
            | DiagnosticCode::InvalidOperandType
            | DiagnosticCode::MethodNotFound
            | DiagnosticCode::IncompatibleReturnType
            | DiagnosticCode::CannotAssign => DiagnosticCategory::Types,

            DiagnosticCode::WrongArgumentCount => DiagnosticCategory::Call,

            DiagnosticCode::BreakOutsideLoop
            | DiagnosticCode::ContinueOutsideLoop
            | DiagnosticCode::ReturnOutsideFunction
            | DiagnosticCode::AwaitOutsideFunction => DiagnosticCategory::ControlFlow,

            DiagnosticCode::ResourceNotFound | DiagnosticCode::UnknownBaseType => DiagnosticCategory::Resources,

            DiagnosticCode::EmitUnknownSignal
            | DiagnosticCode::WrongEmitArgCount
            | DiagnosticCode::ConnectArityMismatch => DiagnosticCategory::Signals,

            DiagnosticCode::UnguardedPropertyAccess | DiagnosticCode::UnguardedMethodCall => {
                DiagnosticCategory::DuckTyping
            }

            DiagnosticCode::AbstractMethodHasBody
            | DiagnosticCode::ClassNotAbstract
            | DiagnosticCode::SuperInAbstractMethod => DiagnosticCategory::Abstract,
        }
    }

    /// Parses a `GDxxxx` string back into a code. Used by suppression
    /// directive parsing and report-format readers (spec.md §6).
    pub fn parse_code(code: &str) -> Option<DiagnosticCode> {
        match code {
            "GD1001" => Some(DiagnosticCode::InvalidToken),
            "GD1002" => Some(DiagnosticCode::UnmatchedBracket),
            "GD2001" => Some(DiagnosticCode::UndefinedVariable),
            "GD2002" => Some(DiagnosticCode::UndefinedFunction),
            "GD2003" => Some(DiagnosticCode::DuplicateDeclaration),
            "GD2004" => Some(DiagnosticCode::InvalidKeywordUsage),
            "GD3001" => Some(DiagnosticCode::UnknownType),
            "GD3002" => Some(DiagnosticCode::InvalidOperandType),
            "GD3003" => Some(DiagnosticCode::MethodNotFound),
            "GD3004" => Some(DiagnosticCode::IncompatibleReturnType),
            "GD3005" => Some(DiagnosticCode::CannotAssign),
            "GD5001" => Some(DiagnosticCode::WrongArgumentCount),
            "GD5101" => Some(DiagnosticCode::BreakOutsideLoop),
            "GD5102" => Some(DiagnosticCode::ContinueOutsideLoop),
            "GD5103" => Some(DiagnosticCode::ReturnOutsideFunction),
            "GD5104" => Some(DiagnosticCode::AwaitOutsideFunction),
            "GD6001" => Some(DiagnosticCode::ResourceNotFound),
            "GD6002" => Some(DiagnosticCode::UnknownBaseType),
            "GD7001" => Some(DiagnosticCode::EmitUnknownSignal),
            "GD7002" => Some(DiagnosticCode::WrongEmitArgCount),
            "GD7003" => Some(DiagnosticCode::ConnectArityMismatch),
            "GD7101" => Some(DiagnosticCode::UnguardedPropertyAccess),
            "GD7102" => Some(DiagnosticCode::UnguardedMethodCall),
            "GD8001" => Some(DiagnosticCode::AbstractMethodHasBody),
            "GD8002" => Some(DiagnosticCode::ClassNotAbstract),
            "GD8003" => Some(DiagnosticCode::SuperInAbstractMethod),
            _ => None,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_strings_match_their_range() {
        assert_eq!(DiagnosticCode::InvalidToken.as_str(), "GD1001");
        assert_eq!(DiagnosticCode::UndefinedVariable.as_str(), "GD2001");
        assert_eq!(DiagnosticCode::AbstractMethodHasBody.as_str(), "GD8001");
    }

    #[test]
    fn severity_defaults() {
        assert_eq!(DiagnosticCode::UndefinedVariable.severity(), DiagnosticSeverity::Error);
        assert_eq!(DiagnosticCode::IncompatibleReturnType.severity(), DiagnosticSeverity::Warning);
        assert_eq!(DiagnosticCode::UnguardedMethodCall.severity(), DiagnosticSeverity::Hint);
    }

    #[test]
    fn round_trips_through_parse_code() {
        for code in [
            DiagnosticCode::InvalidToken,
            DiagnosticCode::WrongArgumentCount,
            DiagnosticCode::ConnectArityMismatch,
            DiagnosticCode::SuperInAbstractMethod,
        ] {
            assert_eq!(DiagnosticCode::parse_code(code.as_str()), Some(code));
        }
        assert_eq!(DiagnosticCode::parse_code("GD9999"), None);
    }

    #[test]
    fn category_grouping() {
        assert_eq!(DiagnosticCode::InvalidToken.category(), DiagnosticCategory::Syntax);
        assert_eq!(DiagnosticCode::BreakOutsideLoop.category(), DiagnosticCategory::ControlFlow);
        assert_eq!(DiagnosticCode::UnguardedPropertyAccess.category(), DiagnosticCategory::DuckTyping);
    }
}
