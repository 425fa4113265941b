//! Call-site argument-count checks (spec.md §4.8).

use gdscript_diagnostics_codes::DiagnosticCode;
use gdscript_runtime::GlobalFunctionSignature;

use crate::diagnostic::{Diagnostic, DiagnosticLocation};

/// Checks `name(args...)` against `signature`, returning a diagnostic when
/// the call's argument count doesn't fit. Varargs functions (`str`,
/// `print`, `printerr`, `push_error`, `push_warning`, ...) never produce
/// this diagnostic, matching spec.md §4.8's explicit carve-out — callers
/// don't need to special-case those names themselves as long as the
/// signature they pass in is accurate.
pub fn check_argument_count(
    name: &str,
    arg_count: usize,
    signature: &GlobalFunctionSignature,
    location: DiagnosticLocation,
) -> Option<Diagnostic> {
    if signature.is_varargs {
        return None;
    }
    if arg_count == signature.parameters.len() {
        return None;
    }
    let expected = signature.parameters.len();
    Some(Diagnostic::at(
        DiagnosticCode::WrongArgumentCount,
        format!("{name}() expects {expected} argument(s), got {arg_count}"),
        location,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_runtime::ParameterInfo;
    use gdscript_span::{LineColumn, TextSpan};

    fn loc() -> DiagnosticLocation {
        DiagnosticLocation {
            span: TextSpan::empty_at(0),
            start: LineColumn { line: 0, column: 0 },
            end: LineColumn { line: 0, column: 0 },
            source_file_id: 0,
        }
    }

    fn fixed_arity(n: usize) -> GlobalFunctionSignature {
        GlobalFunctionSignature {
            parameters: (0..n).map(|_| ParameterInfo { name: "p", type_name: "Variant" }).collect(),
            return_type: "void",
            is_varargs: false,
        }
    }

    #[test]
    fn wrong_count_against_fixed_arity_warns() {
        let sig = fixed_arity(2);
        let diag = check_argument_count("is_instance_of", 1, &sig, loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::WrongArgumentCount);
    }

    #[test]
    fn matching_count_is_silent() {
        let sig = fixed_arity(2);
        assert!(check_argument_count("is_instance_of", 2, &sig, loc()).is_none());
    }

    #[test]
    fn varargs_never_flagged_regardless_of_count() {
        let sig = GlobalFunctionSignature { parameters: vec![], return_type: "void", is_varargs: true };
        assert!(check_argument_count("print", 5, &sig, loc()).is_none());
        assert!(check_argument_count("print", 0, &sig, loc()).is_none());
    }
}
