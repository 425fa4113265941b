use rustc_hash::FxHashMap;

use gdscript_types::SemanticType;

/// Why control left a [`FlowState`] early (spec.md §4.7's `mark_terminated`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationKind {
    Return,
    Break,
    Continue,
}

/// One variable's tracked state within a [`FlowState`]: its declared and
/// currently-narrowed type sets plus nullability flags. `current_type` is
/// always present once declared — it is `declared_type`/`initial_type` at
/// declaration time and is replaced wholesale by `set_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct VarEntry {
    declared_type: Option<SemanticType>,
    current_type: SemanticType,
    narrowed: bool,
    non_null: bool,
    potentially_null: bool,
}

impl VarEntry {
    fn effective_type(&self) -> SemanticType {
        self.current_type.clone()
    }
}

/// Flow-sensitive per-method state: a map from variable name to its
/// currently-known type plus a termination flag (spec.md §4.7). Cloning is
/// `O(n)` in the number of tracked variables — branches snapshot via
/// [`FlowState::create_child`], mirroring the teacher's copy-on-write scope
/// snapshots for branch analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowState {
    vars: FxHashMap<String, VarEntry>,
    terminated: Option<TerminationKind>,
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Introduces `name`. `declared_type` wins over `initial_type` for the
    /// starting current type when both are given, since an explicit
    /// annotation is more authoritative than an initializer's inferred type.
    pub fn declare(&mut self, name: &str, declared_type: Option<SemanticType>, initial_type: Option<SemanticType>) {
        let current_type = declared_type.clone().or(initial_type).unwrap_or_else(SemanticType::variant);
        self.vars.insert(
            name.to_string(),
            VarEntry { declared_type, current_type, narrowed: false, non_null: false, potentially_null: false },
        );
    }

    /// Replaces `name`'s current type and clears any narrowing — a fresh
    /// assignment may not satisfy whatever guard produced the narrowing
    /// (spec.md §4.7).
    pub fn set_type(&mut self, name: &str, ty: SemanticType) {
        if let Some(entry) = self.vars.get_mut(name) {
            entry.current_type = ty;
            entry.narrowed = false;
        } else {
            self.declare(name, None, Some(ty));
        }
    }

    /// Marks `name` as narrowed to `ty`; a subsequent `set_type` resets it.
    pub fn narrow_type(&mut self, name: &str, ty: SemanticType) {
        if let Some(entry) = self.vars.get_mut(name) {
            entry.current_type = ty;
            entry.narrowed = true;
        } else {
            self.declare(name, None, Some(ty));
            if let Some(entry) = self.vars.get_mut(name) {
                entry.narrowed = true;
            }
        }
    }

    pub fn mark_non_null(&mut self, name: &str) {
        if let Some(entry) = self.vars.get_mut(name) {
            entry.non_null = true;
            entry.potentially_null = false;
        }
    }

    pub fn mark_potentially_null(&mut self, name: &str) {
        if let Some(entry) = self.vars.get_mut(name) {
            entry.potentially_null = true;
            entry.non_null = false;
        }
    }

    pub fn is_narrowed(&self, name: &str) -> bool {
        self.vars.get(name).is_some_and(|e| e.narrowed)
    }

    pub fn is_non_null(&self, name: &str) -> bool {
        self.vars.get(name).is_some_and(|e| e.non_null)
    }

    pub fn is_potentially_null(&self, name: &str) -> bool {
        self.vars.get(name).is_some_and(|e| e.potentially_null)
    }

    pub fn effective_type(&self, name: &str) -> Option<SemanticType> {
        self.vars.get(name).map(VarEntry::effective_type)
    }

    pub fn declared_type(&self, name: &str) -> Option<SemanticType> {
        self.vars.get(name).and_then(|e| e.declared_type.clone())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Copy-on-write snapshot usable as a sibling branch (spec.md §4.7).
    /// `Clone` already gives us this; the named method documents intent at
    /// call sites the way the teacher's own branch-forking code does.
    pub fn create_child(&self) -> Self {
        self.clone()
    }

    pub fn mark_terminated(&mut self, kind: TerminationKind) {
        self.terminated = Some(kind);
    }

    pub fn terminated(&self) -> Option<TerminationKind> {
        self.terminated
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.is_some()
    }

    /// `self`'s current type set is contained in `other`'s for every
    /// variable `self` tracks (spec.md §4.7). The empty state is a subset
    /// of any state; a terminated state is only a subset of another
    /// terminated state (with the same kind is not required — only the
    /// flag itself matches itself, per spec.md's wording).
    pub fn is_subset_of(&self, other: &FlowState) -> bool {
        if self.terminated.is_some() != other.terminated.is_some() {
            return false;
        }
        self.vars.iter().all(|(name, entry)| match other.vars.get(name) {
            Some(other_entry) => type_set_subset(&entry.current_type, &other_entry.current_type),
            None => false,
        })
    }

    /// Merges `self` (the accumulator) with `incoming`, widening types via
    /// union and returns whether the accumulator actually changed —
    /// the monotonic join the fixed-point loop iterates against
    /// (spec.md §4.7's `merge_into`).
    pub fn merge_into(&mut self, incoming: &FlowState) -> bool {
        let mut changed = false;
        for (name, incoming_entry) in &incoming.vars {
            match self.vars.get_mut(name) {
                Some(entry) => {
                    let merged = union_types(&entry.current_type, &incoming_entry.current_type);
                    if merged != entry.current_type {
                        entry.current_type = merged;
                        entry.narrowed = entry.narrowed && incoming_entry.narrowed;
                        changed = true;
                    }
                }
                None => {
                    self.vars.insert(name.clone(), incoming_entry.clone());
                    changed = true;
                }
            }
        }
        if !incoming.is_terminated() && self.terminated.is_some() {
            self.terminated = None;
            changed = true;
        }
        changed
    }

    /// A structural snapshot of every tracked type, used to detect
    /// fixed-point convergence without comparing narrowing/null flags
    /// (spec.md §4.7's `get_type_snapshot`/`matches_snapshot`).
    pub fn get_type_snapshot(&self) -> FlowSnapshot {
        let mut entries: Vec<(String, SemanticType)> =
            self.vars.iter().map(|(k, v)| (k.clone(), v.current_type.clone())).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        FlowSnapshot { entries, terminated: self.terminated }
    }

    pub fn matches_snapshot(&self, snapshot: &FlowSnapshot) -> bool {
        self.get_type_snapshot() == *snapshot
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSnapshot {
    entries: Vec<(String, SemanticType)>,
    terminated: Option<TerminationKind>,
}

fn type_set_subset(lhs: &SemanticType, rhs: &SemanticType) -> bool {
    let lhs_members: Vec<&SemanticType> = lhs.union_members().map(|m| m.iter().collect()).unwrap_or_else(|| vec![lhs]);
    let rhs_members: Vec<&SemanticType> = rhs.union_members().map(|m| m.iter().collect()).unwrap_or_else(|| vec![rhs]);
    lhs_members.iter().all(|m| rhs_members.contains(m))
}

fn union_types(a: &SemanticType, b: &SemanticType) -> SemanticType {
    if a == b {
        return a.clone();
    }
    SemanticType::union([a.clone(), b.clone()])
}

/// Merges two branch states against their common `parent` (spec.md §3's
/// merge rules, referenced from §4.7): a variable terminated in one branch
/// but not the other takes the live branch's state; both live branches
/// union their types; both terminated branches keep the termination.
pub fn merge_branches(a: &FlowState, b: &FlowState, parent: &FlowState) -> FlowState {
    match (a.is_terminated(), b.is_terminated()) {
        (true, true) => {
            let mut merged = a.clone();
            merged.terminated = a.terminated.or(b.terminated);
            merged
        }
        (true, false) => b.clone(),
        (false, true) => a.clone(),
        (false, false) => {
            let mut merged = parent.clone();
            merged.merge_into(a);
            merged.merge_into(b);
            merged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_prefers_declared_type_over_initial() {
        let mut state = FlowState::new();
        state.declare("x", Some(SemanticType::float()), Some(SemanticType::int()));
        assert_eq!(state.effective_type("x"), Some(SemanticType::float()));
    }

    #[test]
    fn set_type_clears_narrowing() {
        let mut state = FlowState::new();
        state.declare("x", None, Some(SemanticType::variant()));
        state.narrow_type("x", SemanticType::int());
        assert!(state.is_narrowed("x"));
        state.set_type("x", SemanticType::string());
        assert!(!state.is_narrowed("x"));
        assert_eq!(state.effective_type("x"), Some(SemanticType::string()));
    }

    #[test]
    fn empty_state_is_subset_of_any_state() {
        let empty = FlowState::new();
        let mut other = FlowState::new();
        other.declare("x", None, Some(SemanticType::int()));
        assert!(empty.is_subset_of(&other));
    }

    #[test]
    fn merge_into_unions_divergent_types_and_reports_change() {
        let mut acc = FlowState::new();
        acc.declare("x", None, Some(SemanticType::int()));
        let mut incoming = FlowState::new();
        incoming.declare("x", None, Some(SemanticType::string()));

        let changed = acc.merge_into(&incoming);
        assert!(changed);
        assert!(acc.effective_type("x").unwrap().is_union());

        let changed_again = acc.merge_into(&incoming);
        assert!(!changed_again);
    }

    #[test]
    fn merge_branches_prefers_live_branch_over_terminated() {
        let mut parent = FlowState::new();
        parent.declare("x", None, Some(SemanticType::variant()));

        let mut terminated = parent.create_child();
        terminated.mark_terminated(TerminationKind::Return);

        let mut live = parent.create_child();
        live.set_type("x", SemanticType::int());

        let merged = merge_branches(&terminated, &live, &parent);
        assert!(!merged.is_terminated());
        assert_eq!(merged.effective_type("x"), Some(SemanticType::int()));
    }

    #[test]
    fn snapshot_equality_ignores_narrowing_flag_differences_in_flag_only() {
        let mut a = FlowState::new();
        a.declare("x", None, Some(SemanticType::int()));
        let snapshot = a.get_type_snapshot();
        assert!(a.matches_snapshot(&snapshot));

        a.narrow_type("x", SemanticType::int());
        assert!(a.matches_snapshot(&snapshot));
    }
}
