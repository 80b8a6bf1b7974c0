// src/watch/mod.rs

//! Watch filters: which path changes are worth reporting.
//!
//! The update machinery only ever sees a [`WatchFilter`]; how it is built is
//! up to the embedder. This module ships the usual building blocks:
//! - [`WatchedHierarchies`]: paths under a set of root directories.
//! - [`GlobWatchFilter`]: include/exclude glob patterns.
//! - [`ConfiguredWatchFilter`]: both of the above, as built from config.
//!
//! Any `Fn(&str) -> bool + Send + Sync` closure is a filter too.

pub mod path_utils;
pub mod patterns;
pub mod roots;

pub use patterns::GlobWatchFilter;
pub use roots::WatchedHierarchies;

/// Pure predicate over a path string.
pub trait WatchFilter: Send + Sync {
    fn is_watched(&self, path: &str) -> bool;
}

impl<F> WatchFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_watched(&self, path: &str) -> bool {
        self(path)
    }
}

/// Filter built from the `[watch]` config section.
///
/// A path must be inside a watched hierarchy *and* pass the globs.
#[derive(Debug, Clone)]
pub struct ConfiguredWatchFilter {
    hierarchies: WatchedHierarchies,
    globs: GlobWatchFilter,
}

impl ConfiguredWatchFilter {
    pub fn new(hierarchies: WatchedHierarchies, globs: GlobWatchFilter) -> Self {
        Self { hierarchies, globs }
    }

    pub fn hierarchies(&self) -> &WatchedHierarchies {
        &self.hierarchies
    }
}

impl WatchFilter for ConfiguredWatchFilter {
    fn is_watched(&self, path: &str) -> bool {
        self.hierarchies.is_watched(path) && self.globs.is_watched(path)
    }
}
