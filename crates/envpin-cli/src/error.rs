//! Error types for envpin-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end the run with a non-zero exit status
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad cutoff date
    #[error(transparent)]
    Resolver(#[from] envpin_resolver::Error),

    /// Manifest could not be loaded or written
    #[error(transparent)]
    Manifest(#[from] envpin_manifest::Error),

    /// Report could not be rendered as JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },
}
