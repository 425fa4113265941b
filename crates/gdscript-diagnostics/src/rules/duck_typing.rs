//! Duck-typing hints (spec.md §4.8). Disabled by default — callers gate
//! these behind `DiagnosticOptions::duck_typing_diagnostics`.

use gdscript_diagnostics_codes::DiagnosticCode;
use gdscript_types::SemanticType;

use crate::diagnostic::{Diagnostic, DiagnosticLocation};

/// A member (property or method) access on a symbol with no usable
/// declared type and no prior `is`/`has_method` guard in the same branch
/// (spec.md §4.8: "not guarded ... emitted only for accesses on symbols
/// with no usable declared type"). `guarded` is the caller's own flow
/// analysis of whether a narrowing guard covers this access.
fn has_no_usable_type(symbol_type: &SemanticType) -> bool {
    matches!(symbol_type, SemanticType::Unknown | SemanticType::Primitive(gdscript_types::PrimitiveType::Variant))
}

pub fn check_unguarded_property_access(symbol_type: &SemanticType, property: &str, guarded: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if guarded || !has_no_usable_type(symbol_type) {
        return None;
    }
    Some(Diagnostic::at(
        DiagnosticCode::UnguardedPropertyAccess,
        format!("accessing `.{property}` on a value with no known type; guard with `is`/`has_method` first"),
        location,
    ))
}

pub fn check_unguarded_method_call(symbol_type: &SemanticType, method: &str, guarded: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if guarded || !has_no_usable_type(symbol_type) {
        return None;
    }
    Some(Diagnostic::at(
        DiagnosticCode::UnguardedMethodCall,
        format!("calling `.{method}()` on a value with no known type; guard with `is`/`has_method` first"),
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
    fn unguarded_access_on_untyped_symbol_warns() {
        let diag = check_unguarded_property_access(&SemanticType::Unknown, "health", false, loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::UnguardedPropertyAccess);
    }

    #[test]
    fn guarded_access_is_silent() {
        assert!(check_unguarded_property_access(&SemanticType::Unknown, "health", true, loc()).is_none());
    }

    #[test]
    fn access_on_declared_type_is_silent() {
        assert!(check_unguarded_method_call(&SemanticType::Named("Node".to_string()), "queue_free", false, loc()).is_none());
    }
}
