use gdscript_syntax::{ElementId, Tree};

/// Which tier of the tiered-fallback algorithm produced an
/// [`IncrementalResult`] (spec.md §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementalKind {
    /// The change list was empty; `T0` is returned unchanged.
    IsNoChange,
    /// One or more top-level members were spliced in place.
    IsIncremental,
    /// A fallback tier triggered; the whole file was reparsed by `P`.
    IsFullReparse,
}

/// One top-level member replaced during a member-level incremental
/// reparse (spec.md §4.3 step 5). `index` is the member's 0-based
/// position among `T0`'s top-level members; `old_member` identifies it in
/// `T0`; `new_member` identifies its replacement's root within the
/// returned tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangedMember {
    pub index: usize,
    pub old_member: ElementId,
    pub new_member: ElementId,
}

/// The outcome of [`crate::parse_incremental`].
#[derive(Debug, Clone)]
pub struct IncrementalResult {
    pub tree: Tree,
    pub kind: IncrementalKind,
    pub changed_members: Vec<ChangedMember>,
}
