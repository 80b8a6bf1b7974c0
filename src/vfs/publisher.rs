// src/vfs/publisher.rs

use std::sync::Arc;

use tracing::debug;

use crate::vfs::diff::SnapshotDiff;
use crate::vfs::listener::{ListenerBinding, PublishAction};
use crate::vfs::root::VfsRoot;

/// Wrap `new_hierarchy` in a disarmed root and hand the diff to the binding.
///
/// The root is built before the error handler runs, and is returned whatever
/// the handler or listener do with the publish action. The publish action is
/// never run here; that is the handler's job.
pub fn publish_snapshot_diff<H: 'static>(
    diff: SnapshotDiff,
    new_hierarchy: H,
    binding: &ListenerBinding<H>,
) -> VfsRoot<H> {
    let root = VfsRoot::without_listeners(new_hierarchy);

    let listener = Arc::clone(binding.listener());
    let publish = PublishAction::new(move || {
        debug!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            "publishing snapshot diff"
        );
        listener.changed(&diff.added, &diff.removed)
    });

    binding.error_handler().handle_errors(&root, publish);
    root
}
