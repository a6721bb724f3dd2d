use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "TASKBOX_LOG";

/// Error type for opening the log file
#[derive(Debug, thiserror::Error)]
#[error("could not open log file {path}: {source}")]
pub struct LoggingError {
    path: PathBuf,
    source: InitError,
}

/// Send tracing output to `path`, appending. The terminal belongs to the
/// editor, so without a log file nothing is installed and events are dropped.
///
/// Keep the returned guard alive for as long as logging should flush.
pub fn init_logging(path: Option<&Path>) -> Result<Option<WorkerGuard>, LoggingError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file_appender = open_log_file(path)?;
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // A global subscriber is already installed; drop the guard so the
        // writer shuts down.
        Err(_) => Ok(None),
    }
}

/// Open `path` for appending without rotation, creating its directory.
fn open_log_file(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "taskbox.log".to_string());
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|source| LoggingError {
            path: path.to_path_buf(),
            source,
        })
}
