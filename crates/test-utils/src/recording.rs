//! Listener and error-handler doubles that record what they saw.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use vfswatch::vfs::{ErrorHandler, PublishAction, SnapshotDiffListener, VfsRoot};

/// One `changed` call as seen by a [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDiff {
    pub added: HashSet<String>,
    pub removed: HashSet<String>,
}

/// Listener that records every diff it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    calls: Arc<Mutex<Vec<RecordedDiff>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedDiff> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl SnapshotDiffListener for RecordingListener {
    fn changed(
        &self,
        added: &HashSet<String>,
        removed: &HashSet<String>,
    ) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(RecordedDiff {
            added: added.clone(),
            removed: removed.clone(),
        });
        Ok(())
    }
}

/// Listener that always returns an error.
#[derive(Debug, Clone, Default)]
pub struct FailingListener;

impl SnapshotDiffListener for FailingListener {
    fn changed(&self, _: &HashSet<String>, _: &HashSet<String>) -> anyhow::Result<()> {
        Err(anyhow!("listener refused the diff"))
    }
}

/// Listener that always panics.
#[derive(Debug, Clone, Default)]
pub struct PanickingListener;

impl SnapshotDiffListener for PanickingListener {
    fn changed(&self, _: &HashSet<String>, _: &HashSet<String>) -> anyhow::Result<()> {
        panic!("listener blew up")
    }
}

/// What a [`RecordingErrorHandler`] does with the publish action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishMode {
    /// Run the action and record its outcome.
    Run,
    /// Drop the action without running it.
    Skip,
}

/// Error handler that records the roots it was given and the outcome of
/// each publish.
pub struct RecordingErrorHandler<H> {
    mode: PublishMode,
    roots: Arc<Mutex<Vec<VfsRoot<H>>>>,
    outcomes: Arc<Mutex<Vec<Result<(), String>>>>,
}

impl<H: Clone> RecordingErrorHandler<H> {
    pub fn new(mode: PublishMode) -> Self {
        Self {
            mode,
            roots: Arc::new(Mutex::new(Vec::new())),
            outcomes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn running() -> Self {
        Self::new(PublishMode::Run)
    }

    pub fn roots(&self) -> Vec<VfsRoot<H>> {
        self.roots.lock().unwrap().clone()
    }

    pub fn outcomes(&self) -> Vec<Result<(), String>> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl<H: Clone + Send> ErrorHandler<H> for RecordingErrorHandler<H> {
    fn handle_errors(&self, current_root: &VfsRoot<H>, publish: PublishAction<'_>) {
        self.roots.lock().unwrap().push(current_root.clone());
        if self.mode == PublishMode::Run {
            let outcome = publish.run().map_err(|e| e.to_string());
            self.outcomes.lock().unwrap().push(outcome);
        }
    }
}
