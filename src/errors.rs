/*!
 * Error types for the bracks application.
 *
 * Conversion errors are per file: the batch pipeline records them and keeps
 * going. Malformed shorthand is never an error, it passes through unchanged.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while converting bracks sources
#[derive(Error, Debug)]
pub enum BracksError {
    /// The anchor directory segment is not part of the source path
    #[error("path to '{anchor}' directory cannot be null: {path:?}")]
    PathResolution {
        /// Source path that could not be resolved
        path: PathBuf,
        /// Anchor segment that was looked for
        anchor: String,
    },

    /// The source entry yields no readable content
    #[error("input file is null: {path:?}")]
    NullInput {
        path: PathBuf,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bracks source directory does not exist
    #[error("source directory does not exist: {0:?}")]
    SourceDirMissing(PathBuf),

    /// The file system watcher failed
    #[error("watch error: {0}")]
    Watch(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl BracksError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the error is about, when there is one
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PathResolution { path, .. } | Self::NullInput { path } | Self::Io { path, .. } => {
                Some(path)
            }
            Self::SourceDirMissing(path) => Some(path),
            Self::Watch(_) | Self::Config(_) => None,
        }
    }
}

impl From<notify::Error> for BracksError {
    fn from(error: notify::Error) -> Self {
        Self::Watch(error.to_string())
    }
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, BracksError>;
