use crate::logger::{LOG_FILE_NAME, initialize, resolve_level};

use log::LevelFilter;
use tempfile::tempdir;

/// **VALUE**: Verifies the logger creates a missing log directory and its file, and
/// tolerates repeated initialization.
///
/// **WHY THIS MATTERS**: Hosts and tests may both call `initialize`; a second call must not
/// fail start-up because a global logger is already installed.
#[test]
fn given_missing_log_dir_when_initialized_twice_then_file_created_and_second_call_ok() {
    // GIVEN: A log directory that does not exist yet
    let dir = tempdir().unwrap();
    let log_dir = dir.path().join("logs").join("hero-search");

    // WHEN: Initializing twice
    let first = initialize(&log_dir);
    let second = initialize(&log_dir);

    // THEN: Both succeed and the log file exists
    assert!(first.is_ok(), "{first:?}");
    assert!(second.is_ok(), "{second:?}");
    assert!(log_dir.join(LOG_FILE_NAME).exists());
}

#[test]
fn given_level_names_when_resolving_then_case_insensitive_and_trimmed() {
    assert_eq!(resolve_level(Some("trace")), LevelFilter::Trace);
    assert_eq!(resolve_level(Some(" WARN ")), LevelFilter::Warn);
    assert_eq!(resolve_level(Some("off")), LevelFilter::Off);
}

/// **BUG THIS CATCHES**: Would catch a typo in the environment variable disabling logging
/// (or panicking) instead of falling back to the build default.
#[test]
fn given_unset_or_unknown_level_when_resolving_then_build_default_used() {
    let default = resolve_level(None);

    assert!(default == LevelFilter::Debug || default == LevelFilter::Info);
    assert_eq!(resolve_level(Some("")), default);
    assert_eq!(resolve_level(Some("verbose")), default);
}
