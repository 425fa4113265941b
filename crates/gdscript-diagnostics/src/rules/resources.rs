//! Resource-path checks (spec.md §4.8). Runs only when a project runtime
//! provider is configured and the option is enabled — both preconditions
//! are the caller's responsibility; these functions assume both already
//! hold and a lookup was attempted.

use gdscript_diagnostics_codes::DiagnosticCode;

use crate::diagnostic::{Diagnostic, DiagnosticLocation};

/// `preload`/`load` called with a static string path that the runtime
/// provider could not resolve to a resource.
pub fn check_resource_path(path: &str, resolved: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if resolved {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::ResourceNotFound, format!("resource not found: \"{path}\""), location))
}

/// `extends BaseName` where `BaseName` doesn't resolve to a known engine
/// or project type.
pub fn check_base_type(base_name: &str, is_known: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if is_known {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::UnknownBaseType, format!("unknown base type \"{base_name}\""), location))
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
    fn unresolved_resource_path_warns() {
        let diag = check_resource_path("res://missing.tres", false, loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::ResourceNotFound);
    }

    #[test]
    fn resolved_resource_path_is_silent() {
        assert!(check_resource_path("res://player.tscn", true, loc()).is_none());
    }

    #[test]
    fn unknown_base_type_warns() {
        let diag = check_base_type("Nodde2D", false, loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::UnknownBaseType);
    }
}
