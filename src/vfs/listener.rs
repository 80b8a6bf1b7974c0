// src/vfs/listener.rs

//! Observer-facing seams: the diff listener, the error handler that fences
//! it off from the update path, and the binding that pairs the two.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{error, warn};

use crate::errors::{Result, VfsError};
use crate::vfs::root::VfsRoot;

/// External observer of published diffs.
pub trait SnapshotDiffListener: Send + Sync {
    /// Called once per publish, with empty sets if nothing watched changed.
    fn changed(
        &self,
        added: &HashSet<String>,
        removed: &HashSet<String>,
    ) -> anyhow::Result<()>;
}

impl<F> SnapshotDiffListener for F
where
    F: Fn(&HashSet<String>, &HashSet<String>) -> anyhow::Result<()> + Send + Sync,
{
    fn changed(
        &self,
        added: &HashSet<String>,
        removed: &HashSet<String>,
    ) -> anyhow::Result<()> {
        self(added, removed)
    }
}

/// Deferred delivery of a diff to its listener.
///
/// Consumed by [`run`](Self::run), so it can be invoked at most once.
pub struct PublishAction<'a> {
    action: Box<dyn FnOnce() -> anyhow::Result<()> + 'a>,
}

impl<'a> PublishAction<'a> {
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<()> + 'a,
    {
        Self {
            action: Box::new(action),
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        (self.action)()
    }
}

impl fmt::Debug for PublishAction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishAction").finish_non_exhaustive()
    }
}

/// Owns the failure policy for publishing a diff.
///
/// Receives the fully-updated root and is expected to run `publish` exactly
/// once, containing whatever it raises.
pub trait ErrorHandler<H>: Send + Sync {
    fn handle_errors(&self, current_root: &VfsRoot<H>, publish: PublishAction<'_>);
}

/// Runs the publish action, logging and counting failures and panics.
#[derive(Debug, Default)]
pub struct LoggingErrorHandler {
    failures: AtomicUsize,
}

impl LoggingErrorHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of publishes that failed or panicked so far.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}

impl<H> ErrorHandler<H> for LoggingErrorHandler {
    fn handle_errors(&self, _current_root: &VfsRoot<H>, publish: PublishAction<'_>) {
        match panic::catch_unwind(AssertUnwindSafe(|| publish.run())) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!(error = %err, "snapshot diff listener failed; keeping updated root");
            }
            Err(payload) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                error!(
                    panic = %panic_message(payload.as_ref()),
                    "snapshot diff listener panicked; keeping updated root"
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// An active listener together with its error handler.
pub struct ListenerBinding<H> {
    listener: Arc<dyn SnapshotDiffListener>,
    error_handler: Arc<dyn ErrorHandler<H>>,
}

impl<H> fmt::Debug for ListenerBinding<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerBinding").finish_non_exhaustive()
    }
}

impl<H> ListenerBinding<H> {
    pub fn new(
        listener: Arc<dyn SnapshotDiffListener>,
        error_handler: Arc<dyn ErrorHandler<H>>,
    ) -> Self {
        Self {
            listener,
            error_handler,
        }
    }

    /// Build a binding from optional halves, rejecting anything incomplete.
    pub fn try_from_parts(
        listener: Option<Arc<dyn SnapshotDiffListener>>,
        error_handler: Option<Arc<dyn ErrorHandler<H>>>,
    ) -> Result<Self> {
        match (listener, error_handler) {
            (Some(listener), Some(error_handler)) => Ok(Self::new(listener, error_handler)),
            (Some(_), None) => Err(VfsError::PartialBinding("error handler")),
            (None, Some(_)) => Err(VfsError::PartialBinding("listener")),
            (None, None) => Err(VfsError::PartialBinding("listener and error handler")),
        }
    }

    pub fn listener(&self) -> &Arc<dyn SnapshotDiffListener> {
        &self.listener
    }

    pub fn error_handler(&self) -> &Arc<dyn ErrorHandler<H>> {
        &self.error_handler
    }
}
