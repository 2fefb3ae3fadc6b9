//! Package index configuration

use std::path::PathBuf;

/// Executable queried when none is configured.
pub const DEFAULT_EXECUTABLE: &str = "conda";

/// Channel searched when none is configured.
pub const DEFAULT_CHANNEL: &str = "conda-forge";

/// How to reach the package index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Program invoked as `<executable> search <package> --channel <channel> --json`
    pub executable: PathBuf,
    pub channel: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            channel: DEFAULT_CHANNEL.to_string(),
        }
    }
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }
}
