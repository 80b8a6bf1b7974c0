// src/vfs/root.rs

use std::fmt;
use std::sync::Arc;

use crate::snapshot::{NodeDiffListener, UpdateFunctionRunner, WithoutListeners};

/// The currently published state: a hierarchy plus the runner that services
/// further updates against it.
///
/// The root holds the runner, never the other way round, so there is no
/// ownership cycle between the two.
pub struct VfsRoot<H> {
    hierarchy: H,
    runner: Arc<dyn UpdateFunctionRunner<H>>,
}

impl<H: Clone> Clone for VfsRoot<H> {
    fn clone(&self) -> Self {
        Self {
            hierarchy: self.hierarchy.clone(),
            runner: Arc::clone(&self.runner),
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for VfsRoot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VfsRoot")
            .field("hierarchy", &self.hierarchy)
            .finish_non_exhaustive()
    }
}

impl<H: 'static> VfsRoot<H> {
    pub fn new(hierarchy: H, runner: Arc<dyn UpdateFunctionRunner<H>>) -> Self {
        Self { hierarchy, runner }
    }

    /// Root whose updates never collect or publish a diff.
    pub fn without_listeners(hierarchy: H) -> Self {
        Self::new(hierarchy, Arc::new(WithoutListeners))
    }

    pub fn hierarchy(&self) -> &H {
        &self.hierarchy
    }

    pub fn into_hierarchy(self) -> H {
        self.hierarchy
    }

    /// Apply `update` through this root's runner and keep the result.
    pub fn update<F>(&mut self, update: F)
    where
        F: FnOnce(&H, &mut dyn NodeDiffListener) -> H,
    {
        self.hierarchy = self.runner.run_update(Box::new(update), &self.hierarchy);
    }
}
