// src/config/model.rs

use serde::Deserialize;

use crate::errors::Result;
use crate::types::LogLevel;
use crate::watch::{ConfiguredWatchFilter, GlobWatchFilter, WatchedHierarchies};

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [watch]
/// roots = ["/project"]
/// include = ["**/*.rs"]
/// exclude = ["**/target/**"]
///
/// [logging]
/// level = "debug"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Watched hierarchies. Empty means every path.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Glob include list. Empty means every path.
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    /// Overrides `VFSWATCH_LOG` when set.
    #[serde(default)]
    pub level: Option<LogLevel>,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    watch: WatchSection,
    logging: LoggingSection,
}

impl ConfigFile {
    /// Build without validation; use `TryFrom<RawConfigFile>` instead.
    pub(crate) fn new_unchecked(watch: WatchSection, logging: LoggingSection) -> Self {
        Self { watch, logging }
    }

    pub fn watch_section(&self) -> &WatchSection {
        &self.watch
    }

    pub fn log_level(&self) -> Option<LogLevel> {
        self.logging.level
    }

    /// Compile the `[watch]` section into a filter.
    pub fn build_watch_filter(&self) -> Result<ConfiguredWatchFilter> {
        let hierarchies = WatchedHierarchies::new(&self.watch.roots);
        let globs = GlobWatchFilter::new(&self.watch.include, &self.watch.exclude)?;
        Ok(ConfiguredWatchFilter::new(hierarchies, globs))
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(WatchSection::default(), LoggingSection::default())
    }
}
