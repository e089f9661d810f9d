//! Logging setup for the application.
//!
//! Installs a global tracing subscriber writing to stdout and to a
//! timestamped per-launch file under the app's log directory. Old launch
//! files are pruned so the directory stays bounded.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Maximum number of launch log files kept on disk.
const MAX_LOG_FILES: usize = 8;
const LOG_FILE_PREFIX: &str = "credscope";
const LOG_FILE_EXT: &str = "log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Could not resolve or create the log directory.
    #[error("Failed to prepare log directory: {0}")]
    LogDir(#[from] app_dirs::AppDirError),
    /// Failed to enumerate or delete old log files.
    #[error("Failed to prune old logs in {path}: {source}")]
    Prune {
        /// Log directory being pruned.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to format the launch timestamp for the log filename.
    #[error("Failed to format log filename time: {0}")]
    FormatTime(#[from] time::error::Format),
    /// Another subscriber was already installed.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing for this process. Safe to call more than once.
///
/// Errors are returned rather than panicking so the UI can start with
/// logging disabled instead of aborting.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir()?;
    prune_old_logs(&log_dir, MAX_LOG_FILES - 1)?;
    let file_name = launch_file_name(now_local_or_utc())?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&log_dir, &file_name));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_timer(display_timer())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(display_timer())
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(
        "Logging initialized; log file at {}",
        log_dir.join(&file_name).display()
    );
    Ok(())
}

fn launch_file_name(now: OffsetDateTime) -> Result<String, time::error::Format> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year][month][day]-[hour][minute][second]");
    Ok(format!(
        "{LOG_FILE_PREFIX}_{}.{LOG_FILE_EXT}",
        now.format(NAME_FORMAT)?
    ))
}

fn display_timer() -> fmt::time::OffsetTime<&'static [FormatItem<'static>]> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT)
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Delete the oldest launch logs so at most `keep` remain.
fn prune_old_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let map_io = |source: std::io::Error| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let mut launches: Vec<(SystemTime, PathBuf)> = fs::read_dir(dir)
        .map_err(map_io)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_launch_log(&entry.path()))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect();
    launches.sort_by_key(|(modified, _)| *modified);

    let excess = launches.len().saturating_sub(keep);
    for (_, path) in launches.into_iter().take(excess) {
        fs::remove_file(path).map_err(map_io)?;
    }
    Ok(())
}

fn is_launch_log(path: &Path) -> bool {
    let named_like_launch = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX));
    let log_ext = path.extension().and_then(|ext| ext.to_str()) == Some(LOG_FILE_EXT);
    named_like_launch && log_ext && path.is_file()
}
