//! Wires the incremental parser, per-method flow analysis, and the
//! diagnostic engine into one pipeline, observing a [`CancellationToken`]
//! at the safe points spec.md §5 names: between members during reparse,
//! and between methods during analysis.

use gdscript_diagnostics::{Diagnostic, DiagnosticEngine};
use gdscript_flow::FlowAnalyzer;
use gdscript_incremental::{parse_incremental, IncrementalResult, ParserFacade};
use gdscript_span::TextChange;
use gdscript_syntax::Tree;
use gdscript_types::TypeContext;

use crate::cancellation::{Cancellable, CancellationToken};
use crate::config::AnalysisConfig;

/// Re-parses `previous` against `new_text`/`changes` via the tiered-fallback
/// algorithm (spec.md §4.3), short-circuiting to [`Cancellable::Cancelled`]
/// if `cancellation` was already signalled before the call started. The
/// splice/full-reparse tiers themselves run to completion once entered —
/// spec.md's "between members" checkpoint is honored at the granularity
/// this facade controls, at each call into the pipeline.
pub fn reparse(
    parser: &dyn ParserFacade,
    previous: &Tree,
    new_text: &str,
    changes: &[TextChange],
    config: &AnalysisConfig,
    cancellation: &CancellationToken,
) -> Cancellable<IncrementalResult> {
    if cancellation.is_cancelled() {
        tracing::debug!("reparse cancelled before entering the incremental parser");
        return Cancellable::Cancelled;
    }
    let result = parse_incremental(parser, previous, new_text, changes, &config.incremental_config());
    Cancellable::Completed(result)
}

/// One method's input to [`analyze_methods`]: its name (used to label
/// emitted narrowing facts and diagnostics), the initial flow state
/// seeded with its parameters, and its statement-view body.
pub struct MethodInput<'a> {
    pub name: &'a str,
    pub initial_state: gdscript_flow::FlowState,
    pub body: Vec<gdscript_flow::Stmt>,
}

/// One method's analysis output: the name it was analysed under and the
/// post-analysis [`gdscript_flow::FlowState`].
pub struct MethodOutput<'a> {
    pub name: &'a str,
    pub final_state: gdscript_flow::FlowState,
}

/// Runs [`FlowAnalyzer::analyze_method`] over every method in `methods`,
/// checking `cancellation` between methods (spec.md §5: "between
/// statements in a flow pass" at the per-method granularity; within one
/// method's fixed-point loop the existing hard cap in
/// [`AnalysisConfig::fixed_point_cap`] bounds the work instead). Returns
/// [`Cancellable::Cancelled`] as soon as cancellation is observed, without
/// exposing any partially analysed method.
pub fn analyze_methods<'a>(
    ctx: &dyn TypeContext,
    methods: Vec<MethodInput<'a>>,
    config: &AnalysisConfig,
    source_file_id: u32,
    cancellation: &CancellationToken,
) -> Cancellable<Vec<MethodOutput<'a>>> {
    let mut outputs = Vec::with_capacity(methods.len());
    for method in methods {
        if cancellation.is_cancelled() {
            tracing::debug!(analyzed = outputs.len(), total = outputs.capacity(), "method analysis cancelled mid-batch");
            return Cancellable::Cancelled;
        }
        let mut analyzer = FlowAnalyzer::new(ctx, source_file_id).with_fixed_point_cap(config.fixed_point_cap);
        let final_state = analyzer.analyze_method(method.initial_state, &method.body);
        outputs.push(MethodOutput { name: method.name, final_state });
    }
    Cancellable::Completed(outputs)
}

/// Composes a file's already-collected diagnostics through suppression and
/// deterministic ordering (spec.md §4.8, §5) — the facade-level entry
/// point a caller reaches for once every rule has already pushed its
/// findings into the engine.
pub fn finish_diagnostics(engine: DiagnosticEngine, source: &str, config: &AnalysisConfig) -> Vec<Diagnostic> {
    engine.finish(source, &config.diagnostic_options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdscript_incremental::ParseError;
    use gdscript_syntax::{NodeKind, TreeBuilder};

    struct AlwaysFails;
    impl ParserFacade for AlwaysFails {
        fn parse_file(&self, _source: &str) -> Result<Tree, ParseError> {
            Err(ParseError::new("unused in this test"))
        }
        fn parse_expression(&self, _source: &str) -> Result<Tree, ParseError> {
            Err(ParseError::new("unused in this test"))
        }
        fn parse_member(&self, _source: &str) -> Result<Tree, ParseError> {
            Err(ParseError::new("unused in this test"))
        }
    }

    fn empty_tree() -> Tree {
        let mut b = TreeBuilder::new();
        b.start_node(NodeKind::ClassDecl);
        b.finish_node();
        b.finish()
    }

    #[test]
    fn reparse_short_circuits_when_already_cancelled() {
        let cancellation = CancellationToken::new();
        cancellation.cancel();
        let result = reparse(&AlwaysFails, &empty_tree(), "", &[], &AnalysisConfig::default(), &cancellation);
        assert!(result.is_cancelled());
    }

    #[test]
    fn reparse_with_no_changes_reports_no_change() {
        let cancellation = CancellationToken::new();
        let tree = empty_tree();
        let result = reparse(&AlwaysFails, &tree, "", &[], &AnalysisConfig::default(), &cancellation);
        let outcome = result.into_completed().expect("not cancelled");
        assert_eq!(outcome.kind, gdscript_incremental::IncrementalKind::IsNoChange);
    }
}
