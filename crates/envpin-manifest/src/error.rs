//! Error types for envpin-manifest

use std::path::PathBuf;

/// Result type for envpin-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur loading or writing a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML manifest at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid manifest at {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Failed to serialize manifest for {path}: {message}")]
    Serialize { path: PathBuf, message: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("Output path {path} is the input manifest; refusing to overwrite it")]
    OutputIsInput { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            path: path.into(),
            message: message.into(),
        }
    }
}
