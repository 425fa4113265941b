//! Assignment-compatibility and return-type checks (spec.md §4.8).

use gdscript_diagnostics_codes::DiagnosticCode;
use gdscript_types::SemanticType;

use crate::diagnostic::{Diagnostic, DiagnosticLocation};

/// Warns when `value_type` can't be assigned to a symbol declared
/// `declared_type` — `int -> float` widening, `null -> any reference
/// type`, and anything to `Variant` are all allowed (spec.md §4.8,
/// delegated to [`SemanticType::is_assignable_to`]).
pub fn check_assignment(declared_type: &SemanticType, value_type: &SemanticType, location: DiagnosticLocation) -> Option<Diagnostic> {
    if value_type.is_assignable_to(declared_type) {
        return None;
    }
    Some(Diagnostic::at(
        DiagnosticCode::CannotAssign,
        format!("cannot assign {} to a value declared {}", value_type.display_name(), declared_type.display_name()),
        location,
    ))
}

/// `return` with no value, from a function whose declared return type is
/// not `void` (spec.md §4.8: "emits a warning").
pub fn check_bare_return(declared_return_type: &SemanticType, location: DiagnosticLocation) -> Option<Diagnostic> {
    if matches!(declared_return_type, SemanticType::Primitive(gdscript_types::PrimitiveType::Void)) {
        return None;
    }
    Some(Diagnostic::at(
        DiagnosticCode::IncompatibleReturnType,
        format!("function returns nothing but is declared to return {}", declared_return_type.display_name()),
        location,
    ))
}

/// `return e` where `typeof(e)` isn't assignable to the declared return
/// type — the message references both types by display name (spec.md
/// §4.8). Each `return` statement is checked independently; lambda
/// returns never reach this (spec.md: "do not affect the enclosing
/// function's return check").
pub fn check_return_value(declared_return_type: &SemanticType, value_type: &SemanticType, location: DiagnosticLocation) -> Option<Diagnostic> {
    if value_type.is_assignable_to(declared_return_type) {
        return None;
    }
    Some(Diagnostic::at(
        DiagnosticCode::IncompatibleReturnType,
        format!(
            "returns {} but function is declared to return {}",
            value_type.display_name(),
            declared_return_type.display_name()
        ),
        location,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_span::{LineColumn, TextSpan};

    fn loc() -> DiagnosticLocation {
        DiagnosticLocation {
            span: TextSpan::empty_at(0),
            start: LineColumn { line: 0, column: 0 },
            end: LineColumn { line: 0, column: 0 },
            source_file_id: 0,
        }
    }

    #[test]
    fn int_to_float_widening_is_allowed() {
        assert!(check_assignment(&SemanticType::float(), &SemanticType::int(), loc()).is_none());
    }

    #[test]
    fn incompatible_primitive_assignment_warns() {
        let diag = check_assignment(&SemanticType::int(), &SemanticType::string(), loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::CannotAssign);
    }

    #[test]
    fn null_to_reference_type_is_allowed() {
        assert!(check_assignment(&SemanticType::Named("Node".to_string()), &SemanticType::null(), loc()).is_none());
    }

    #[test]
    fn anything_to_variant_is_allowed() {
        assert!(check_assignment(&SemanticType::variant(), &SemanticType::int(), loc()).is_none());
    }

    #[test]
    fn bare_return_from_non_void_function_warns() {
        let diag = check_bare_return(&SemanticType::int(), loc());
        assert!(diag.is_some());
        assert!(diag.unwrap().message.contains("returns nothing"));
    }

    #[test]
    fn bare_return_from_void_function_is_silent() {
        assert!(check_bare_return(&SemanticType::void(), loc()).is_none());
    }

    #[test]
    fn return_value_mismatch_names_both_types() {
        let diag = check_return_value(&SemanticType::string(), &SemanticType::int(), loc()).unwrap();
        assert!(diag.message.contains("int"));
        assert!(diag.message.contains("String"));
    }
}
