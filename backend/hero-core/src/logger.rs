//! Logging setup for hosts embedding the search pipeline.
//!
//! Provides dual output (stdout with colors + `hero-search.log`) with thread-safe
//! initialization. Each pipeline stage logs under its own module target
//! (`hero_core::query`, `hero_core::executor`, ...), so the target is part of
//! every line.

use crate::error::logger::LoggerError;

use common::ErrorLocation;

use std::io::stdout;
use std::path::Path;
use std::str::FromStr;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// Log file name, created inside the directory passed to [`initialize`].
pub const LOG_FILE_NAME: &str = "hero-search.log";

/// Environment variable overriding the log level (`trace` .. `error`, `off`).
pub const LOG_LEVEL_ENV: &str = "HERO_SEARCH_LOG_LEVEL";

/// Warning message when logger is called multiple times.
const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// Default log level for debug builds.
#[cfg(debug_assertions)]
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Default log level for release builds.
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// HTTP stack crates. Their debug output repeats every request URL, API key included.
const HTTP_CRATES: [&str; 3] = ["reqwest", "hyper", "hyper_util"];

/// Initialize the logger at the level named by `HERO_SEARCH_LOG_LEVEL`, or the
/// build default when it is unset or unrecognized.
///
/// This function is safe to call multiple times - subsequent calls will
/// log a warning and return Ok. The actual initialization runs exactly once.
///
/// # Errors
///
/// Returns [`LoggerError`] if the log directory or file cannot be created or
/// another global logger is already installed.
pub fn initialize(log_dir: &Path) -> Result<(), LoggerError> {
    let level = resolve_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    initialize_with_level(log_dir, level)
}

/// [`initialize`] with an explicit level.
///
/// # Errors
///
/// See [`initialize`].
pub fn initialize_with_level(log_dir: &Path, level: LevelFilter) -> Result<(), LoggerError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir, level);
        if result.is_ok() {
            info!(
                "Logger initialized with level {level:?}, writing to {}",
                log_dir.join(LOG_FILE_NAME).display()
            );
        }
    });

    result
}

/// Level named by `value`, falling back to the build default.
pub fn resolve_level(value: Option<&str>) -> LevelFilter {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => LevelFilter::from_str(value).unwrap_or(DEFAULT_LOG_LEVEL),
        None => DEFAULT_LOG_LEVEL,
    }
}

/// Internal logger initialization with dual dispatch.
fn initialize_internal(log_dir: &Path, level: LevelFilter) -> Result<(), LoggerError> {
    std::fs::create_dir_all(log_dir).map_err(|e| LoggerError::LogFile {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::caller(),
    })?;

    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    // HTTP crates never log below warn, whatever the pipeline level
    let base_dispatch = HTTP_CRATES.iter().fold(
        Dispatch::new().level(level),
        |dispatch, target| dispatch.level_for(*target, level.min(LevelFilter::Warn)),
    );

    // Stdout: colored, stage target instead of source position
    let stdout_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level} - {target}] {message}",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                target = record.target(),
                message = message,
            ))
        })
        .chain(stdout());

    let log_file = fern::log_file(&log_file_path).map_err(|e| LoggerError::LogFile {
        message: format!("Failed to create log file {}: {e}", log_file_path.display()),
        location: ErrorLocation::caller(),
    })?;

    // File: plain text, keeps the source position for bug reports
    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level} - {target}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                target = record.target(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(log_file);

    base_dispatch
        .chain(stdout_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| LoggerError::Initialize {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::caller(),
        })?;

    Ok(())
}
