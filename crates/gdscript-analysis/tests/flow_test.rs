//! Integration coverage for [`gdscript_analysis::analyze_methods`]:
//! facade-level wiring (config plumbing, cancellation, multi-method
//! output threading) rather than re-proving `gdscript-flow`'s own
//! narrowing rules, which its inline test suite already covers in depth.

#![allow(clippy::unwrap_used, clippy::expect_used)]
mod support;

use gdscript_analysis::{analyze_methods, AnalysisConfig, CancellationToken, MethodInput};
use gdscript_flow::{FlowState, Guard, Stmt};
use gdscript_types::{Expr, SemanticType};

use support::TestTypeContext;

/// Reproduces spec.md §8 scenario 5 through the facade entry point:
/// `if data is Dictionary: data.get("k")` narrows `data` inside the
/// branch, and the trailing `data = data.get("k")` reassignment clears
/// the narrowing before the branch merges back with the un-narrowed
/// parent state.
fn narrowing_reset_method_body() -> Vec<Stmt> {
    vec![Stmt::If {
        branches: vec![(
            Guard::IsType { var: "data".into(), ty: SemanticType::Named("Dictionary".into()) },
            vec![
                Stmt::Expr(Expr::Call {
                    callee: Box::new(Expr::MemberAccess { base: Box::new(Expr::ident("data")), member: "get".into() }),
                    args: vec![Expr::string("k")],
                }),
                Stmt::Assignment {
                    target: Expr::ident("data"),
                    value: Expr::Call {
                        callee: Box::new(Expr::MemberAccess { base: Box::new(Expr::ident("data")), member: "get".into() }),
                        args: vec![Expr::string("k")],
                    },
                },
            ],
        )],
        else_branch: None,
    }]
}

#[test]
fn analyze_methods_clears_narrowing_reset_on_reassignment() {
    let ctx = TestTypeContext::with_param("data", SemanticType::variant());
    let mut initial_state = FlowState::new();
    initial_state.declare("data", None, Some(SemanticType::variant()));

    let methods = vec![MethodInput { name: "process", initial_state, body: narrowing_reset_method_body() }];
    let cancellation = CancellationToken::new();

    let outputs =
        analyze_methods(&ctx, methods, &AnalysisConfig::default(), 0, &cancellation).into_completed().expect("not cancelled");

    assert_eq!(outputs.len(), 1);
    let method = &outputs[0];
    assert_eq!(method.name, "process");
    assert_eq!(method.final_state.effective_type("data"), Some(SemanticType::variant()));
    assert!(!method.final_state.is_narrowed("data"));
}

#[test]
fn analyze_methods_threads_multiple_methods_independently() {
    let ctx = TestTypeContext::with_param("data", SemanticType::variant());

    let mut first_state = FlowState::new();
    first_state.declare("data", None, Some(SemanticType::variant()));
    let mut second_state = FlowState::new();
    second_state.declare("count", None, Some(SemanticType::int()));

    let methods = vec![
        MethodInput { name: "process", initial_state: first_state, body: narrowing_reset_method_body() },
        MethodInput { name: "tally", initial_state: second_state, body: vec![Stmt::Return(Some(Expr::ident("count")))] },
    ];
    let cancellation = CancellationToken::new();

    let outputs =
        analyze_methods(&ctx, methods, &AnalysisConfig::default(), 0, &cancellation).into_completed().expect("not cancelled");

    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].name, "process");
    assert_eq!(outputs[1].name, "tally");
    assert_eq!(outputs[1].final_state.effective_type("count"), Some(SemanticType::int()));
}

#[test]
fn cancelling_before_analysis_yields_no_methods() {
    let ctx = TestTypeContext::with_param("data", SemanticType::variant());
    let mut initial_state = FlowState::new();
    initial_state.declare("data", None, Some(SemanticType::variant()));

    let methods = vec![MethodInput { name: "process", initial_state, body: narrowing_reset_method_body() }];
    let cancellation = CancellationToken::new();
    cancellation.cancel();

    let result = analyze_methods(&ctx, methods, &AnalysisConfig::default(), 0, &cancellation);
    assert!(result.is_cancelled());
}
