// src/snapshot/hierarchy.rs

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;

use blake3::Hasher;

use crate::snapshot::NodeDiffListener;
use crate::watch::path_utils::normalize_path;

/// What kind of file-system entry a snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    RegularFile,
    Directory,
    Missing,
}

/// Snapshot of a single location.
///
/// Regular files carry a `blake3` hash of their contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    kind: FileKind,
    content_hash: Option<String>,
}

impl FileSnapshot {
    pub fn regular_file(contents: &[u8]) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(contents);
        Self {
            kind: FileKind::RegularFile,
            content_hash: Some(hasher.finalize().to_hex().to_string()),
        }
    }

    pub fn directory() -> Self {
        Self {
            kind: FileKind::Directory,
            content_hash: None,
        }
    }

    pub fn missing() -> Self {
        Self {
            kind: FileKind::Missing,
            content_hash: None,
        }
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn content_hash(&self) -> Option<&str> {
        self.content_hash.as_deref()
    }
}

/// Persistent map from normalized absolute path to [`FileSnapshot`].
///
/// Cloning is cheap (one `Arc` bump). Updates never touch a published value;
/// they copy the map, apply the change and return a fresh hierarchy.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PathHierarchy {
    entries: Arc<BTreeMap<String, FileSnapshot>>,
}

impl fmt::Debug for PathHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathHierarchy")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl PathHierarchy {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FileSnapshot> {
        self.entries.get(&normalize_path(path))
    }

    /// All known paths, in lexical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Record `snapshot` at `path`.
    ///
    /// Replacing a different snapshot is reported as a removal followed by an
    /// addition; storing an identical snapshot reports nothing and returns a
    /// hierarchy sharing the same storage.
    pub fn store(
        &self,
        path: &str,
        snapshot: FileSnapshot,
        diff: &mut dyn NodeDiffListener,
    ) -> Self {
        let path = normalize_path(path);

        match self.entries.get(&path) {
            Some(existing) if *existing == snapshot => return self.clone(),
            Some(_) => diff.node_removed(&path),
            None => {}
        }
        diff.node_added(&path);

        let mut entries = (*self.entries).clone();
        entries.insert(path, snapshot);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Forget `path` and everything nested below it, reporting each removal.
    pub fn invalidate(&self, path: &str, diff: &mut dyn NodeDiffListener) -> Self {
        let path = normalize_path(path);
        let child_prefix = if path.ends_with('/') {
            path.clone()
        } else {
            format!("{path}/")
        };

        let mut doomed: Vec<String> = Vec::new();
        if self.entries.contains_key(&path) {
            doomed.push(path.clone());
        }
        doomed.extend(
            self.entries
                .range::<str, _>((Bound::Included(child_prefix.as_str()), Bound::Unbounded))
                .take_while(|(key, _)| key.starts_with(&child_prefix))
                .filter(|(key, _)| **key != path)
                .map(|(key, _)| key.clone()),
        );

        if doomed.is_empty() {
            return self.clone();
        }

        let mut entries = (*self.entries).clone();
        for key in &doomed {
            entries.remove(key);
            diff.node_removed(key);
        }
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Whether two hierarchies share the same underlying storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}
