//! Package index backends

use std::io::ErrorKind;
use std::process::Command;

use serde_json::Value;
use tracing::debug;

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::record::{VersionRecord, parse_search_output};

/// A source of published version records.
pub trait PackageIndex {
    fn id(&self) -> &str;

    /// Return every known record for `package`, in index order.
    ///
    /// Each call performs a fresh query.
    fn search(&self, package: &str) -> Result<Vec<VersionRecord>>;
}

/// Index backed by the `conda search` command.
#[derive(Debug, Clone, Default)]
pub struct CondaIndex {
    config: IndexConfig,
}

impl CondaIndex {
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    fn search_args<'a>(&'a self, package: &'a str) -> [&'a str; 5] {
        ["search", package, "--channel", &self.config.channel, "--json"]
    }
}

impl PackageIndex for CondaIndex {
    fn id(&self) -> &str {
        "conda"
    }

    fn search(&self, package: &str) -> Result<Vec<VersionRecord>> {
        let command = self.config.executable.display().to_string();
        let args = self.search_args(package);
        debug!(command = %command, ?args, "Querying package index");

        let output = Command::new(&self.config.executable)
            .args(args)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::CommandNotFound {
                    command: command.clone(),
                },
                _ => Error::QueryFailed {
                    package: package.to_string(),
                    message: format!("failed to run {}: {}", command, e),
                },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::QueryFailed {
                package: package.to_string(),
                message: failure_message(&stdout, &stderr, output.status.code()),
            });
        }

        parse_search_output(package, &stdout)
    }
}

/// Best description of why a search exited unsuccessfully.
///
/// With `--json`, conda reports failures as a JSON object on stdout.
fn failure_message(stdout: &str, stderr: &str, code: Option<i32>) -> String {
    if let Ok(Value::Object(body)) = serde_json::from_str::<Value>(stdout) {
        for key in ["message", "error"] {
            if let Some(Value::String(message)) = body.get(key) {
                return message.trim().to_string();
            }
        }
    }

    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }

    match code {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}
