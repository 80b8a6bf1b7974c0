// src/snapshot/mod.rs

//! Capabilities a snapshot hierarchy exposes to the update machinery.
//!
//! The hierarchy itself is treated as an opaque, copy-on-write value `H`:
//! every update consumes a reference to the old value and produces a new one.
//! While doing so the update function reports each structural change to a
//! [`NodeDiffListener`] handed to it by an [`UpdateFunctionRunner`].
//!
//! [`PathHierarchy`] is a small reference hierarchy for embedders (and
//! tests) that do not bring their own tree.

pub mod hierarchy;

pub use hierarchy::{FileKind, FileSnapshot, PathHierarchy};

/// Sink for structural changes reported by an update function.
pub trait NodeDiffListener {
    fn node_added(&mut self, path: &str);
    fn node_removed(&mut self, path: &str);
}

/// Discarding sink used when nobody is interested in the diff.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiffListener;

impl NodeDiffListener for NoopDiffListener {
    fn node_added(&mut self, _path: &str) {}

    fn node_removed(&mut self, _path: &str) {}
}

/// A single transform of the hierarchy.
///
/// Must report every structural add/remove it performs to the sink, and
/// nothing else.
pub type UpdateFunction<'a, H> = Box<dyn FnOnce(&H, &mut dyn NodeDiffListener) -> H + 'a>;

/// Strategy for running an [`UpdateFunction`] against a hierarchy.
pub trait UpdateFunctionRunner<H>: Send + Sync {
    fn run_update(&self, update: UpdateFunction<'_, H>, root: &H) -> H;
}

/// Runner that never collects a diff.
///
/// Every root produced by a publish carries this runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithoutListeners;

impl<H> UpdateFunctionRunner<H> for WithoutListeners {
    fn run_update(&self, update: UpdateFunction<'_, H>, root: &H) -> H {
        update(root, &mut NoopDiffListener)
    }
}
