// src/vfs/runner.rs

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::errors::Result;
use crate::snapshot::{NoopDiffListener, UpdateFunction, UpdateFunctionRunner};
use crate::vfs::diff::CollectingDiffListener;
use crate::vfs::listener::{ErrorHandler, ListenerBinding, SnapshotDiffListener};
use crate::vfs::publisher::publish_snapshot_diff;
use crate::watch::WatchFilter;

/// Update runner that collects and publishes diffs while a listener is armed.
///
/// With no binding, updates run against [`NoopDiffListener`] and nothing is
/// allocated or filtered. With a binding, every update gets a fresh
/// [`CollectingDiffListener`] and its diff is published through the
/// binding's error handler.
///
/// The binding sits behind a mutex only so the runner can be shared; arming,
/// disarming and updating are still expected to be serialized by the caller.
pub struct NotifyingUpdateFunctionRunner<H> {
    watch_filter: Arc<dyn WatchFilter>,
    binding: Mutex<Option<Arc<ListenerBinding<H>>>>,
}

impl<H> fmt::Debug for NotifyingUpdateFunctionRunner<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyingUpdateFunctionRunner")
            .field("armed", &self.is_armed())
            .finish_non_exhaustive()
    }
}

impl<H> NotifyingUpdateFunctionRunner<H> {
    pub fn new(watch_filter: Arc<dyn WatchFilter>) -> Self {
        Self {
            watch_filter,
            binding: Mutex::new(None),
        }
    }

    /// Start reporting diffs to `listener`, replacing any previous binding.
    pub fn arm(
        &self,
        listener: Arc<dyn SnapshotDiffListener>,
        error_handler: Arc<dyn ErrorHandler<H>>,
    ) {
        self.arm_binding(ListenerBinding::new(listener, error_handler));
    }

    /// Like [`arm`](Self::arm), for callers holding optional halves.
    ///
    /// Fails with `VfsError::PartialBinding` and leaves the current binding
    /// alone unless both halves are present.
    pub fn try_arm(
        &self,
        listener: Option<Arc<dyn SnapshotDiffListener>>,
        error_handler: Option<Arc<dyn ErrorHandler<H>>>,
    ) -> Result<()> {
        let binding = ListenerBinding::try_from_parts(listener, error_handler)?;
        self.arm_binding(binding);
        Ok(())
    }

    pub fn arm_binding(&self, binding: ListenerBinding<H>) {
        *self.lock_binding() = Some(Arc::new(binding));
        debug!("snapshot diff listener armed");
    }

    pub fn disarm(&self) {
        if self.lock_binding().take().is_some() {
            debug!("snapshot diff listener disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.lock_binding().is_some()
    }

    /// One consistent read of the binding; the lock is not held afterwards.
    fn current_binding(&self) -> Option<Arc<ListenerBinding<H>>> {
        self.lock_binding().clone()
    }

    fn lock_binding(&self) -> std::sync::MutexGuard<'_, Option<Arc<ListenerBinding<H>>>> {
        self.binding.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<H: 'static> UpdateFunctionRunner<H> for NotifyingUpdateFunctionRunner<H> {
    fn run_update(&self, update: UpdateFunction<'_, H>, root: &H) -> H {
        let Some(binding) = self.current_binding() else {
            return update(root, &mut NoopDiffListener);
        };

        let mut collector = CollectingDiffListener::new(self.watch_filter.as_ref());
        let new_hierarchy = update(root, &mut collector);
        let diff = collector.finish();
        debug!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            "collected snapshot diff"
        );

        publish_snapshot_diff(diff, new_hierarchy, &binding).into_hierarchy()
    }
}
