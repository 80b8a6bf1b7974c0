// src/watch/roots.rs

use crate::watch::WatchFilter;
use crate::watch::path_utils::{is_within, normalize_path};

/// The set of hierarchies being watched.
///
/// An empty set watches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchedHierarchies {
    roots: Vec<String>,
}

impl WatchedHierarchies {
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roots: Vec<String> = roots
            .into_iter()
            .map(|r| normalize_path(r.as_ref()))
            .collect();
        roots.sort();
        roots.dedup();
        Self { roots }
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn is_watched_hierarchy(&self, path: &str) -> bool {
        if self.roots.is_empty() {
            return true;
        }
        let path = normalize_path(path);
        self.roots.iter().any(|root| is_within(root, &path))
    }
}

impl WatchFilter for WatchedHierarchies {
    fn is_watched(&self, path: &str) -> bool {
        self.is_watched_hierarchy(path)
    }
}
