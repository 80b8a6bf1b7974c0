// src/vfs/diff.rs

//! Collection of the added/removed paths of a single update.

use std::collections::HashSet;

use tracing::trace;

use crate::snapshot::NodeDiffListener;
use crate::watch::WatchFilter;

/// Added and removed paths produced by exactly one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    pub added: HashSet<String>,
    pub removed: HashSet<String>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Diff sink that keeps only the paths accepted by a watch filter.
///
/// One instance serves one update call; [`finish`](Self::finish) consumes it.
pub struct CollectingDiffListener<'a> {
    watch_filter: &'a dyn WatchFilter,
    diff: SnapshotDiff,
}

impl<'a> CollectingDiffListener<'a> {
    pub fn new(watch_filter: &'a dyn WatchFilter) -> Self {
        Self {
            watch_filter,
            diff: SnapshotDiff::default(),
        }
    }

    pub fn finish(self) -> SnapshotDiff {
        self.diff
    }
}

impl NodeDiffListener for CollectingDiffListener<'_> {
    fn node_added(&mut self, path: &str) {
        if self.watch_filter.is_watched(path) {
            self.diff.added.insert(path.to_string());
        } else {
            trace!(path, "ignoring added path outside watch filter");
        }
    }

    fn node_removed(&mut self, path: &str) {
        if self.watch_filter.is_watched(path) {
            self.diff.removed.insert(path.to_string());
        } else {
            trace!(path, "ignoring removed path outside watch filter");
        }
    }
}
