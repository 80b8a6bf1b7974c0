// tests/logging_level.rs

use vfswatch::logging::resolve_level;
use vfswatch::types::LogLevel;

#[test]
fn explicit_level_wins_over_env() {
    assert_eq!(resolve_level(Some(LogLevel::Warn), Some("trace")), LogLevel::Warn);
}

#[test]
fn env_level_is_parsed_case_insensitively() {
    assert_eq!(resolve_level(None, Some(" DEBUG ")), LogLevel::Debug);
    assert_eq!(resolve_level(None, Some("warning")), LogLevel::Warn);
}

#[test]
fn unknown_or_missing_env_falls_back_to_info() {
    assert_eq!(resolve_level(None, Some("chatty")), LogLevel::Info);
    assert_eq!(resolve_level(None, None), LogLevel::Info);
}

#[test]
fn log_level_from_str_reports_bad_input() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    assert!(err.contains("loud"));
}

#[test]
fn init_logging_installs_the_subscriber_only_once() {
    // Only test in this binary that touches the global subscriber.
    assert!(vfswatch::logging::init_logging(Some(LogLevel::Warn)).is_ok());
    assert!(vfswatch::logging::init_logging(None).is_err());
}
