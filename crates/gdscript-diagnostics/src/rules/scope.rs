//! Scope and control-flow-placement checks (spec.md §4.8).

use gdscript_diagnostics_codes::DiagnosticCode;
use gdscript_symbols::{DeclareOutcome, Symbol};

use crate::diagnostic::{Diagnostic, DiagnosticLocation};

/// Reports a redeclaration found via [`gdscript_symbols::ScopeGraph::declare`]
/// — the scope graph itself never silently replaces the existing symbol,
/// so this just turns that outcome into a diagnostic.
pub fn check_declare_outcome(name: &str, outcome: &DeclareOutcome, location: DiagnosticLocation) -> Option<Diagnostic> {
    match outcome {
        DeclareOutcome::Declared => None,
        DeclareOutcome::AlreadyDeclared { existing } => {
            let _: &Symbol = existing;
            Some(Diagnostic::at(DiagnosticCode::DuplicateDeclaration, format!("`{name}` is already declared in this scope"), location))
        }
    }
}

pub fn check_undefined_variable(name: &str, resolved: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if resolved {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::UndefinedVariable, format!("undefined variable `{name}`"), location))
}

pub fn check_undefined_function(name: &str, resolved: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if resolved {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::UndefinedFunction, format!("undefined function `{name}`"), location))
}

pub fn check_unknown_type(name: &str, is_known: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if is_known {
        return None;
    }
    // spec.md §4.8: unknown types warn but never block inference — the
    // caller falls back to Variant regardless of this diagnostic firing.
    Some(Diagnostic::at(DiagnosticCode::UnknownType, format!("unknown type `{name}`"), location))
}

pub fn check_break_outside_loop(inside_loop: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if inside_loop {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::BreakOutsideLoop, "break outside of a loop".to_string(), location))
}

pub fn check_continue_outside_loop(inside_loop: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if inside_loop {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::ContinueOutsideLoop, "continue outside of a loop".to_string(), location))
}

pub fn check_return_outside_function(inside_function: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if inside_function {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::ReturnOutsideFunction, "return outside of a function".to_string(), location))
}

pub fn check_await_outside_function(inside_function: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if inside_function {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::AwaitOutsideFunction, "await outside of a function".to_string(), location))
}
