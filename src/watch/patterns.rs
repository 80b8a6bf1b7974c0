// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::watch::WatchFilter;

/// Compiled include/exclude glob patterns.
///
/// A path is watched when it matches the include set (or the include set is
/// empty) and does not match the exclude set.
///
/// ```toml
/// [watch]
/// include = ["**/*.rs"]
/// exclude = ["**/target/**"]
/// ```
#[derive(Clone)]
pub struct GlobWatchFilter {
    include: Vec<String>,
    exclude: Vec<String>,
    include_set: Option<GlobSet>,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for GlobWatchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobWatchFilter")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .finish_non_exhaustive()
    }
}

impl GlobWatchFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        let include_set = if include.is_empty() {
            None
        } else {
            Some(build_globset(include).context("building include globset")?)
        };

        let exclude_set = if exclude.is_empty() {
            None
        } else {
            Some(build_globset(exclude).context("building exclude globset")?)
        };

        Ok(Self {
            include: include.to_vec(),
            exclude: exclude.to_vec(),
            include_set,
            exclude_set,
        })
    }

    /// Filter that watches every path.
    pub fn match_all() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            include_set: None,
            exclude_set: None,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        if let Some(include) = &self.include_set {
            if !include.is_match(path) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(path) {
                return false;
            }
        }
        true
    }
}

impl WatchFilter for GlobWatchFilter {
    fn is_watched(&self, path: &str) -> bool {
        self.matches(path)
    }
}

/// Build a GlobSet from simple string patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat)
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
