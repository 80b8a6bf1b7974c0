#![allow(dead_code)]

use vfswatch::config::{ConfigFile, LoggingSection, RawConfigFile, WatchSection};
use vfswatch::types::LogLevel;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                watch: WatchSection::default(),
                logging: LoggingSection::default(),
            },
        }
    }

    pub fn with_root(mut self, root: &str) -> Self {
        self.config.watch.roots.push(root.to_string());
        self
    }

    pub fn with_include(mut self, pattern: &str) -> Self {
        self.config.watch.include.push(pattern.to_string());
        self
    }

    pub fn with_exclude(mut self, pattern: &str) -> Self {
        self.config.watch.exclude.push(pattern.to_string());
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = Some(level);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
