//! Signal emit/connect checks (spec.md §4.8).

use gdscript_diagnostics_codes::DiagnosticCode;
use gdscript_runtime::SignalInfo;

use crate::diagnostic::{Diagnostic, DiagnosticLocation};

/// Checks `emit_signal("name", args...)` against the class's declared
/// signals. A `None` `signal` (dynamic/unresolvable name) skips the check
/// entirely (spec.md §4.8: "dynamic signal names skip the check").
pub fn check_emit(signal_name: &str, arg_count: usize, signal: Option<&SignalInfo>, location: DiagnosticLocation) -> Option<Diagnostic> {
    let signal = signal?;
    if signal.parameters.len() == arg_count {
        return None;
    }
    Some(Diagnostic::at(
        DiagnosticCode::WrongEmitArgCount,
        format!(
            "emit_signal(\"{signal_name}\") expects {} argument(s), got {arg_count}",
            signal.parameters.len()
        ),
        location,
    ))
}

/// Checks `emit_signal("unknown_name", ...)` against the class's declared
/// signal set, independent of argument count.
pub fn check_emit_known(signal_name: &str, signal_exists: bool, location: DiagnosticLocation) -> Option<Diagnostic> {
    if signal_exists {
        return None;
    }
    Some(Diagnostic::at(DiagnosticCode::EmitUnknownSignal, format!("unknown signal \"{signal_name}\""), location))
}

/// Checks `connect("sig", callable)`: warns when the callback's required
/// parameter count exceeds the signal's parameter count (spec.md §4.8).
pub fn check_connect(signal_name: &str, signal: &SignalInfo, callback_required_params: usize, location: DiagnosticLocation) -> Option<Diagnostic> {
    if callback_required_params <= signal.parameters.len() {
        return None;
    }
    Some(Diagnostic::at(
        DiagnosticCode::ConnectArityMismatch,
        format!(
            "callback requires {callback_required_params} argument(s) but signal \"{signal_name}\" only provides {}",
            signal.parameters.len()
        ),
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

    fn signal(params: usize) -> SignalInfo {
        SignalInfo {
            name: "health_changed",
            parameters: (0..params).map(|_| ParameterInfo { name: "p", type_name: "int" }).collect(),
        }
    }

    #[test]
    fn dynamic_signal_name_skips_the_check() {
        assert!(check_emit("health_changed", 3, None, loc()).is_none());
    }

    #[test]
    fn emit_arg_count_mismatch_warns() {
        let diag = check_emit("health_changed", 2, Some(&signal(1)), loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::WrongEmitArgCount);
    }

    #[test]
    fn emit_matching_arg_count_is_silent() {
        assert!(check_emit("health_changed", 1, Some(&signal(1)), loc()).is_none());
    }

    #[test]
    fn unknown_signal_name_warns() {
        let diag = check_emit_known("nonexistent", false, loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::EmitUnknownSignal);
    }

    #[test]
    fn connect_callback_requiring_more_params_than_signal_warns() {
        let diag = check_connect("health_changed", &signal(1), 2, loc());
        assert!(diag.is_some());
        assert_eq!(diag.unwrap().code, DiagnosticCode::ConnectArityMismatch);
    }

    #[test]
    fn connect_callback_requiring_fewer_params_is_fine() {
        assert!(check_connect("health_changed", &signal(2), 1, loc()).is_none());
    }
}
