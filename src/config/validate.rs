// src/config/validate.rs

use std::collections::HashSet;

use globset::Glob;

use crate::config::model::{ConfigFile, RawConfigFile, WatchSection};
use crate::errors::{Result, VfsError};
use crate::watch::path_utils::normalize_path;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = VfsError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_watch_section(&raw.watch)?;
        Ok(ConfigFile::new_unchecked(raw.watch, raw.logging))
    }
}

fn validate_watch_section(watch: &WatchSection) -> Result<()> {
    validate_roots(&watch.roots)?;
    validate_globs("include", &watch.include)?;
    validate_globs("exclude", &watch.exclude)?;
    Ok(())
}

fn validate_roots(roots: &[String]) -> Result<()> {
    let mut seen: HashSet<String> = HashSet::new();
    for root in roots {
        if root.trim().is_empty() {
            return Err(VfsError::ConfigError(
                "[watch].roots must not contain empty paths".to_string(),
            ));
        }
        let normalized = normalize_path(root);
        if !seen.insert(normalized.clone()) {
            return Err(VfsError::ConfigError(format!(
                "[watch].roots lists '{}' more than once",
                normalized
            )));
        }
    }
    Ok(())
}

fn validate_globs(field: &str, patterns: &[String]) -> Result<()> {
    for pat in patterns {
        if let Err(err) = Glob::new(pat) {
            return Err(VfsError::ConfigError(format!(
                "[watch].{} has invalid glob '{}': {}",
                field, pat, err
            )));
        }
    }
    Ok(())
}
