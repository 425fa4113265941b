//! `@abstract` annotation checks (spec.md §4.8).

use gdscript_diagnostics_codes::DiagnosticCode;

use crate::diagnostic::{Diagnostic, DiagnosticLocation};

/// A class containing any `@abstract` method must itself be `@abstract`.
pub fn check_class_must_be_abstract(class_has_abstract_method: bool, class_is_abstract: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if !class_has_abstract_method || class_is_abstract {
        return None;
    }
    Some(Diagnostic::at(
        DiagnosticCode::ClassNotAbstract,
        "class declares an @abstract method but is not itself @abstract".to_string(),
        location,
    ))
}

/// An `@abstract` method must have no body.
pub fn check_abstract_method_has_no_body(method_is_abstract: bool, method_has_body: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if !method_is_abstract || !method_has_body {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::AbstractMethodHasBody, "@abstract method must not have a body".to_string(), location))
}

/// `super()` may not appear inside an `@abstract` method.
pub fn check_no_super_in_abstract_method(method_is_abstract: bool, calls_super: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if !method_is_abstract || !calls_super {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::SuperInAbstractMethod, "super() is not allowed inside an @abstract method".to_string(), location))
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
    fn class_with_abstract_method_but_not_abstract_warns() {
        let diag = check_class_must_be_abstract(true, false, loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::ClassNotAbstract);
    }

    #[test]
    fn abstract_class_with_abstract_method_is_fine() {
        assert!(check_class_must_be_abstract(true, true, loc()).is_none());
    }

    #[test]
    fn abstract_method_with_body_warns() {
        let diag = check_abstract_method_has_no_body(true, true, loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::AbstractMethodHasBody);
    }

    #[test]
    fn super_inside_abstract_method_warns() {
        let diag = check_no_super_in_abstract_method(true, true, loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::SuperInAbstractMethod);
    }

    #[test]
    fn super_inside_non_abstract_method_is_fine() {
        assert!(check_no_super_in_abstract_method(false, true, loc()).is_none());
    }
}
