// src/vfs/mod.rs

//! Snapshot update coordination with optional diff publishing.
//!
//! This module ties together:
//! - the update runner, which decides per update whether a diff is collected
//!   ([`runner`])
//! - the diff collector, which filters raw path changes through a watch
//!   filter ([`diff`])
//! - the publisher, which swaps in the new root and hands the diff to the
//!   listener inside the error handler's isolation boundary ([`publisher`])
//!
//! [`WatchingVirtualFileSystem`] is the owning façade most embedders want.

pub mod diff;
pub mod listener;
pub mod publisher;
pub mod root;
pub mod runner;

use std::sync::Arc;

pub use diff::{CollectingDiffListener, SnapshotDiff};
pub use listener::{
    ErrorHandler, ListenerBinding, LoggingErrorHandler, PublishAction, SnapshotDiffListener,
};
pub use publisher::publish_snapshot_diff;
pub use root::VfsRoot;
pub use runner::NotifyingUpdateFunctionRunner;

use crate::snapshot::{NodeDiffListener, UpdateFunctionRunner};
use crate::watch::WatchFilter;

/// Owner of the live root and its notifying runner.
///
/// `update` takes `&mut self`, so a single owner gets the required
/// serialization of updates for free. Share it behind a mutex otherwise.
pub struct WatchingVirtualFileSystem<H> {
    runner: Arc<NotifyingUpdateFunctionRunner<H>>,
    root: VfsRoot<H>,
}

impl<H: 'static> WatchingVirtualFileSystem<H> {
    pub fn new(hierarchy: H, watch_filter: Arc<dyn WatchFilter>) -> Self {
        let runner = Arc::new(NotifyingUpdateFunctionRunner::new(watch_filter));
        let shared: Arc<dyn UpdateFunctionRunner<H>> = runner.clone();
        Self {
            root: VfsRoot::new(hierarchy, shared),
            runner,
        }
    }

    pub fn root(&self) -> &VfsRoot<H> {
        &self.root
    }

    pub fn hierarchy(&self) -> &H {
        self.root.hierarchy()
    }

    pub fn update<F>(&mut self, update: F)
    where
        F: FnOnce(&H, &mut dyn NodeDiffListener) -> H,
    {
        self.root.update(update);
    }

    pub fn start_watching(
        &self,
        listener: Arc<dyn SnapshotDiffListener>,
        error_handler: Arc<dyn ErrorHandler<H>>,
    ) {
        self.runner.arm(listener, error_handler);
    }

    pub fn stop_watching(&self) {
        self.runner.disarm();
    }

    pub fn is_watching(&self) -> bool {
        self.runner.is_armed()
    }
}
