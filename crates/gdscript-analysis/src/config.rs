use gdscript_diagnostics::LineColumnStyle;
use gdscript_incremental::IncrementalConfig;

/// Bundles every tunable this pipeline's stages read (spec.md §3's
/// `IncrementalConfig`, §4.7's fixed-point cap, §4.8's suppression/duck-
/// typing/resource-path toggles, §6's line/column numbering convention)
/// into one facade-level config, the way `perl-parser`'s top-level facade
/// bundles its stage configs behind a single entry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub max_affected_members: usize,
    pub change_size_threshold: f64,
    pub fixed_point_cap: usize,
    pub suppression_directives_enabled: bool,
    pub duck_typing_diagnostics: bool,
    pub resource_path_checking: bool,
    pub line_column_style: LineColumnStyle,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_affected_members: 3,
            change_size_threshold: 0.5,
            fixed_point_cap: 10,
            suppression_directives_enabled: true,
            duck_typing_diagnostics: false,
            resource_path_checking: false,
            line_column_style: LineColumnStyle::OneBased,
        }
    }
}

impl AnalysisConfig {
    /// Tightens every diagnostic-producing toggle: duck-typing hints and
    /// resource-path checks on, suppression directives honored as normal.
    /// Intended for CI / pre-merge gating where false negatives are worse
    /// than false positives.
    pub fn strict() -> Self {
        Self { duck_typing_diagnostics: true, resource_path_checking: true, ..Self::default() }
    }

    /// Loosens the incremental-reparse budgets and drops the optional
    /// diagnostic categories. Intended for interactive editing where
    /// latency matters more than exhaustiveness.
    pub fn permissive() -> Self {
        Self {
            max_affected_members: 8,
            change_size_threshold: 0.8,
            duck_typing_diagnostics: false,
            resource_path_checking: false,
            ..Self::default()
        }
    }

    pub fn incremental_config(&self) -> IncrementalConfig {
        IncrementalConfig { max_affected_members: self.max_affected_members, change_size_threshold: self.change_size_threshold }
    }

    pub fn diagnostic_options(&self) -> gdscript_diagnostics::DiagnosticOptions {
        gdscript_diagnostics::DiagnosticOptions {
            suppression_directives_enabled: self.suppression_directives_enabled,
            duck_typing_diagnostics: self.duck_typing_diagnostics,
            resource_path_checking: self.resource_path_checking,
            line_column_style: self.line_column_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_mandated_values() {
        let config = AnalysisConfig::default();
        assert_eq!(config.max_affected_members, 3);
        assert_eq!(config.change_size_threshold, 0.5);
        assert_eq!(config.fixed_point_cap, 10);
        assert!(config.suppression_directives_enabled);
        assert!(!config.duck_typing_diagnostics);
        assert!(!config.resource_path_checking);
    }

    #[test]
    fn strict_enables_optional_diagnostic_categories() {
        let config = AnalysisConfig::strict();
        assert!(config.duck_typing_diagnostics);
        assert!(config.resource_path_checking);
    }

    #[test]
    fn permissive_widens_incremental_budgets() {
        let config = AnalysisConfig::permissive();
        assert!(config.max_affected_members > AnalysisConfig::default().max_affected_members);
        assert!(config.change_size_threshold > AnalysisConfig::default().change_size_threshold);
    }
}
