use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Observed at the safe points spec.md §5 names — between members, between
/// statements in a flow pass, between fixed-point iterations — by every
/// long operation (full parse, incremental parse, per-method analysis,
/// full-project analysis). Cancellation is never an error: the operation
/// returns an explicit cancelled result and leaves all prior state intact
/// (spec.md §5, §7).
///
/// Cheap to clone: every clone shares the same underlying flag, so
/// cancelling one handle cancels every handle derived from it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The outcome of an operation observing a [`CancellationToken`]: either it
/// ran to completion, or it was cancelled mid-flight (spec.md §5, §7).
#[derive(Debug, Clone)]
pub enum Cancellable<T> {
    Completed(T),
    Cancelled,
}

impl<T> Cancellable<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Cancellable::Cancelled)
    }

    pub fn into_completed(self) -> Option<T> {
        match self {
            Cancellable::Completed(value) => Some(value),
            Cancellable::Cancelled => None,
        }
    }
}
