//! The facade that composes rule output into a final diagnostic list:
//! suppression, then deterministic ordering (spec.md §4.8, §5).

use crate::diagnostic::{sort_diagnostics, Diagnostic, LineColumnStyle};
use crate::suppression::SuppressionMap;

/// Feature toggles spec.md §4.8 and §6 name explicitly. Severity of
/// duck-typing diagnostics is "configurable" per spec.md; this core keeps
/// that binary (on/off) and leaves per-severity overrides to a host layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticOptions {
    pub suppression_directives_enabled: bool,
    pub duck_typing_diagnostics: bool,
    pub resource_path_checking: bool,
    pub line_column_style: LineColumnStyle,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            suppression_directives_enabled: true,
            duck_typing_diagnostics: false,
            resource_path_checking: false,
            line_column_style: LineColumnStyle::OneBased,
        }
    }
}

/// Accumulates diagnostics from every rule pass over one file and produces
/// the final, suppression-applied, deterministically ordered list (spec.md
/// §4.8, §5: "diagnostics are emitted in tree order ... for deterministic
/// output"). A thread-safe aggregator over per-method flow-analysis output
/// would wrap one of these per file (spec.md §5).
#[derive(Debug, Default)]
pub struct DiagnosticEngine {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Applies suppression directives scanned from `source` (or skips
    /// scanning entirely when `options.suppression_directives_enabled` is
    /// false, per spec.md §4.8's "when off ... all diagnostics fire") and
    /// returns the final, sorted diagnostic list.
    pub fn finish(mut self, source: &str, options: &DiagnosticOptions) -> Vec<Diagnostic> {
        let map = if options.suppression_directives_enabled { SuppressionMap::scan(source) } else { SuppressionMap::inactive() };
        self.diagnostics.retain(|d| !map.is_suppressed(d));
        sort_diagnostics(&mut self.diagnostics);
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_diagnostics_codes::DiagnosticCode;
    use gdscript_span::{LineColumn, TextSpan};

    fn diag_at(code: DiagnosticCode, line: u32) -> Diagnostic {
        Diagnostic::new(code, "msg", TextSpan::empty_at(0), LineColumn { line, column: 0 }, LineColumn { line, column: 0 }, 0)
    }

    #[test]
    fn suppressed_diagnostics_are_removed_then_remaining_sorted() {
        let source = "var x = undefined_name # gd:ignore\nvar y = undefined_other\n";
        let mut engine = DiagnosticEngine::new();
        engine.push(diag_at(DiagnosticCode::UndefinedVariable, 1));
        engine.push(diag_at(DiagnosticCode::UndefinedVariable, 0));
        let result = engine.finish(source, &DiagnosticOptions::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].start.line, 1);
    }

    #[test]
    fn disabling_suppression_keeps_every_diagnostic() {
        let source = "var x = undefined_name # gd:ignore\n";
        let mut engine = DiagnosticEngine::new();
        engine.push(diag_at(DiagnosticCode::UndefinedVariable, 0));
        let options = DiagnosticOptions { suppression_directives_enabled: false, ..DiagnosticOptions::default() };
        let result = engine.finish(source, &options);
        assert_eq!(result.len(), 1);
    }
}
