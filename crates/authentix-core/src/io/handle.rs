use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::trace;

/// Counts the temporary handles that reference decoded sources.
///
/// Cloning shares the counters, so one tracker can be handed to every
/// upload widget of a page and queried afterwards.
#[derive(Clone, Debug, Default)]
pub struct HandleTracker {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    live: AtomicUsize,
    next_id: AtomicU64,
}

impl HandleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a handle. It is released when the returned guard drops.
    pub fn acquire(&self) -> SourceHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.live.fetch_add(1, Ordering::AcqRel);
        trace!(id, "Source handle acquired");
        SourceHandle {
            tracker: self.clone(),
            id,
        }
    }

    /// Handles currently held.
    pub fn live(&self) -> usize {
        self.inner.live.load(Ordering::Acquire)
    }

    /// Handles ever acquired through this tracker.
    pub fn acquired(&self) -> u64 {
        self.inner.next_id.load(Ordering::Relaxed)
    }
}

/// Temporary reference to a decoded source image.
#[derive(Debug)]
pub struct SourceHandle {
    tracker: HandleTracker,
    id: u64,
}

impl SourceHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for SourceHandle {
    fn drop(&mut self) {
        self.tracker.inner.live.fetch_sub(1, Ordering::AcqRel);
        trace!(id = self.id, "Source handle released");
    }
}
