use gdscript_types::SemanticType;

use crate::flow_state::FlowState;

/// A boolean condition shape the narrowing analyser recognises
/// (spec.md §4.7). Anything else collapses to [`Guard::Unknown`], which
/// narrows nothing — the caller still evaluates the condition for its own
/// type, it just gains no refined state from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    IsType { var: String, ty: SemanticType },
    TypeOfEquals { var: String, ty: SemanticType },
    EqualsNull { var: String },
    NotEqualsNull { var: String },
    Truthy { var: String },
    IsValidCall { var: String },
    IsNullCall { var: String },
    InstanceValidCall { var: String },
    LiteralEquals { var: String, literal_type: SemanticType },
    /// `x in collection` — narrows nothing; the container-usage collector
    /// reacts to this shape separately.
    In { var: String, collection: String },
    And(Box<Guard>, Box<Guard>),
    Or(Box<Guard>, Box<Guard>),
    Not(Box<Guard>),
    Unknown,
}

/// One refinement to apply to a single variable, produced by
/// [`analyze_guard`]. Applying a [`NarrowAction::RemoveFromUnion`] needs the
/// variable's current type, so it is resolved against a [`FlowState`] in
/// [`apply_narrowings`] rather than eagerly here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrowAction {
    NarrowTo(SemanticType),
    RemoveFromUnion(SemanticType),
    MarkNonNull,
    MarkPotentiallyNull,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrowing {
    pub var: String,
    pub action: NarrowAction,
}

fn narrowing(var: &str, action: NarrowAction) -> Narrowing {
    Narrowing { var: var.to_string(), action }
}

/// Analyses `guard` under `is_negated` (false = the true branch, true = the
/// else/negated branch) and returns the narrowings implied for that branch
/// (spec.md §4.7). Later entries for the same variable take precedence when
/// applied via [`apply_narrowings`].
pub fn analyze_guard(guard: &Guard, is_negated: bool) -> Vec<Narrowing> {
    match guard {
        Guard::IsType { var, ty } => {
            if !is_negated {
                vec![narrowing(var, NarrowAction::NarrowTo(ty.clone()))]
            } else {
                vec![narrowing(var, NarrowAction::RemoveFromUnion(ty.clone()))]
            }
        }
        Guard::TypeOfEquals { var, ty } => analyze_guard(&Guard::IsType { var: var.clone(), ty: ty.clone() }, is_negated),
        Guard::EqualsNull { var } => {
            if !is_negated {
                vec![narrowing(var, NarrowAction::MarkPotentiallyNull)]
            } else {
                vec![narrowing(var, NarrowAction::MarkNonNull)]
            }
        }
        Guard::NotEqualsNull { var } => analyze_guard(&Guard::EqualsNull { var: var.clone() }, !is_negated),
        Guard::Truthy { var } => {
            if !is_negated {
                vec![narrowing(var, NarrowAction::MarkNonNull)]
            } else {
                vec![narrowing(var, NarrowAction::MarkPotentiallyNull)]
            }
        }
        Guard::IsValidCall { var } => {
            if !is_negated {
                vec![narrowing(var, NarrowAction::MarkNonNull)]
            } else {
                vec![narrowing(var, NarrowAction::MarkPotentiallyNull)]
            }
        }
        Guard::IsNullCall { var } => {
            if !is_negated {
                vec![narrowing(var, NarrowAction::MarkPotentiallyNull)]
            } else {
                vec![narrowing(var, NarrowAction::MarkNonNull)]
            }
        }
        Guard::InstanceValidCall { var } => analyze_guard(&Guard::IsValidCall { var: var.clone() }, is_negated),
        Guard::LiteralEquals { var, literal_type } => {
            if !is_negated {
                vec![narrowing(var, NarrowAction::NarrowTo(literal_type.clone())), narrowing(var, NarrowAction::MarkNonNull)]
            } else {
                Vec::new()
            }
        }
        Guard::In { .. } => Vec::new(),
        Guard::Not(inner) => analyze_guard(inner, !is_negated),
        Guard::And(a, b) => {
            if !is_negated {
                let mut out = analyze_guard(a, false);
                out.extend(analyze_guard(b, false));
                out
            } else {
                // "neither narrowing is safely known" (spec.md §4.7).
                Vec::new()
            }
        }
        Guard::Or(a, b) => {
            if !is_negated {
                let a_true = analyze_guard(a, false);
                let b_true = analyze_guard(b, false);
                a_true.into_iter().filter(|n| b_true.contains(n)).collect()
            } else {
                let mut out = analyze_guard(a, true);
                out.extend(analyze_guard(b, true));
                out
            }
        }
        Guard::Unknown => Vec::new(),
    }
}

/// Applies `narrowings` to `state` in order, so a later entry for the same
/// variable wins. [`NarrowAction::RemoveFromUnion`] is a no-op unless the
/// variable's current effective type is a union containing that member
/// (spec.md §4.7: "otherwise no change").
pub fn apply_narrowings(state: &mut FlowState, narrowings: &[Narrowing]) {
    for n in narrowings {
        match &n.action {
            NarrowAction::NarrowTo(ty) => state.narrow_type(&n.var, ty.clone()),
            NarrowAction::MarkNonNull => state.mark_non_null(&n.var),
            NarrowAction::MarkPotentiallyNull => state.mark_potentially_null(&n.var),
            NarrowAction::RemoveFromUnion(ty) => {
                if let Some(current) = state.effective_type(&n.var) {
                    if let Some(members) = current.union_members() {
                        let remaining: Vec<SemanticType> = members.iter().filter(|m| *m != ty).cloned().collect();
                        if remaining.len() != members.len() {
                            state.narrow_type(&n.var, SemanticType::union(remaining));
                        }
                    }
                }
            }
        }
    }
}
