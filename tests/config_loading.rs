// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;
use vfswatch::config::{default_config_path, load_and_validate, load_from_path};
use vfswatch::errors::VfsError;
use vfswatch::types::LogLevel;
use vfswatch::watch::WatchFilter;
use vfswatch_test_utils::builders::ConfigFileBuilder;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_builds_a_working_filter() {
    let file = write_config(
        r#"
[watch]
roots = ["/project"]
include = ["**/*.rs"]
exclude = ["**/target/**"]

[logging]
level = "debug"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.log_level(), Some(LogLevel::Debug));

    let filter = cfg.build_watch_filter().unwrap();
    assert!(filter.is_watched("/project/src/lib.rs"));
    assert!(!filter.is_watched("/project/target/x.rs"));
    assert!(!filter.is_watched("/tmp/b.rs"));
}

#[test]
fn empty_file_watches_everything() {
    let file = write_config("");

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.log_level(), None);
    assert!(cfg.watch_section().roots.is_empty());

    let filter = cfg.build_watch_filter().unwrap();
    assert!(filter.is_watched("/anything/at/all"));
}

#[test]
fn invalid_glob_returns_config_error() {
    let file = write_config(
        r#"
[watch]
exclude = ["src/[oops"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(VfsError::ConfigError(msg)) => {
            assert!(msg.contains("exclude"));
            assert!(msg.contains("src/[oops"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn duplicate_roots_return_config_error() {
    let file = write_config(
        r#"
[watch]
roots = ["/project", "/project/"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(VfsError::ConfigError(msg)) => assert!(msg.contains("more than once")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_root_returns_config_error() {
    let raw = ConfigFileBuilder::new().with_root("  ").raw();
    let result = vfswatch::config::ConfigFile::try_from(raw);
    assert!(matches!(result, Err(VfsError::ConfigError(_))));
}

#[test]
fn unknown_watch_key_is_a_toml_error() {
    let file = write_config(
        r#"
[watch]
rootz = ["/project"]
"#,
    );

    assert!(matches!(
        load_from_path(file.path()),
        Err(VfsError::TomlError(_))
    ));
}

#[test]
fn bad_log_level_is_a_toml_error() {
    let file = write_config(
        r#"
[logging]
level = "loud"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(VfsError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_and_validate(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(VfsError::IoError(_))));
}

#[test]
fn builder_produces_equivalent_config() {
    let cfg = ConfigFileBuilder::new()
        .with_root("/project")
        .with_include("**/*.rs")
        .with_log_level(LogLevel::Trace)
        .build();

    assert_eq!(cfg.log_level(), Some(LogLevel::Trace));
    let filter = cfg.build_watch_filter().unwrap();
    assert!(filter.is_watched("/project/a.rs"));
    assert!(!filter.is_watched("/project/a.md"));
}

#[test]
fn default_config_path_is_in_working_directory() {
    assert_eq!(default_config_path().to_str(), Some("Vfswatch.toml"));
}
