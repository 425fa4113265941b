/// Tunables for the tiered-fallback incremental reparse algorithm
/// (spec.md §4.3, §5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncrementalConfig {
    /// Above this many affected top-level members, fall back to a full
    /// reparse rather than splicing each one individually.
    pub max_affected_members: usize,
    /// A single change whose `old_length + new_length` exceeds this
    /// fraction of the file's length (in code points) forces a full
    /// reparse.
    pub change_size_threshold: f64,
}

impl Default for IncrementalConfig {
    fn default() -> Self {
        Self { max_affected_members: 3, change_size_threshold: 0.5 }
    }
}
