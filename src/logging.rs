//! Process-wide tracing setup writing to a rotating file under `~/.smart_term/logs`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

const LOG_DIR: &str = ".smart_term/logs";
const LOG_PREFIX: &str = "smart_term";
const LOG_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 5;

pub fn log_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOG_DIR))
}

/// Install the global subscriber. Keep the returned guard alive until exit.
///
/// Returns `None` when file logging is unavailable or a subscriber is already
/// installed; the tool keeps working either way.
pub fn init(level: LogLevel) -> Option<WorkerGuard> {
    match log_dir() {
        Some(dir) => init_in(&dir, level),
        None => {
            eprintln!("⚠️  Warning: could not resolve home directory. File logging disabled.");
            None
        }
    }
}

pub fn init_in(dir: &Path, level: LogLevel) -> Option<WorkerGuard> {
    if let Err(err) = fs::create_dir_all(dir) {
        eprintln!(
            "⚠️  Warning: could not create log directory {}: {err}. File logging disabled.",
            dir.display()
        );
        return None;
    }

    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
    {
        Ok(appender) => appender,
        Err(err) => {
            eprintln!("⚠️  Warning: could not open log file in {}: {err}", dir.display());
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()
        .map(|()| guard)
}
