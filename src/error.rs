//! Error type shared by all loaders.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading trajectory datasets.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("missing `{block}` block in {}", .path.display())]
    MissingCalibration { path: PathBuf, block: &'static str },

    #[error("segment length mismatch: requested {expected}, file records {found}")]
    SegmentLengthMismatch { expected: f64, found: f64 },

    #[error("timestamp matcher `{command}` failed: {reason}")]
    Matcher { command: String, reason: String },
}

impl LoadError {
    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        LoadError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;
