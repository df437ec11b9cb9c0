//! Logging setup.
//!
//! Installs a `tracing` subscriber that writes human-readable events to
//! stderr and, optionally, to a log file. Filtering follows `RUST_LOG`
//! and defaults to [`DEFAULT_FILTER`].

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "poitile=info";

/// Errors from installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file's directory could not be created.
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log file could not be opened for appending.
    #[error("Failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    /// The log file path has no file name component.
    #[error("Invalid log file path: {0}")]
    InvalidPath(PathBuf),

    /// A global subscriber is already installed.
    #[error("Failed to install logger: {0}")]
    Init(String),
}

/// Builds the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber.
///
/// When `log_file` is given, events are also appended to that file through
/// a background writer. The returned guard flushes the writer on drop and
/// must be held for the life of the program.
pub fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>, LoggingError> {
    let (file_layer, guard) = match log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    if let Some(path) = log_file {
        tracing::debug!(path = %path.display(), "File logging enabled");
    }

    Ok(guard)
}

fn file_writer(
    path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), LoggingError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(&dir)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_writer_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("logs").join("poitile.log");

        let (_writer, _guard) = file_writer(&path).unwrap();

        assert!(temp.path().join("logs").is_dir());
    }

    #[test]
    fn test_file_writer_reports_unopenable_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("already-a-dir");
        std::fs::create_dir(&path).unwrap();

        let result = file_writer(&path);

        match result {
            Err(LoggingError::OpenFile { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("Expected OpenFile, got {:?}", other),
            Ok(_) => panic!("Expected OpenFile, got a writer"),
        }
    }

    #[test]
    fn test_file_writer_rejects_path_without_name() {
        let result = file_writer(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }
}
