//! [`TestWorkspace`] scratch directory for manifest scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory with helpers for writing manifests and checking
/// what the updater left behind.
///
/// ```rust,no_run
/// use envpin_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// let manifest = ws.write("environment.yml", "dependencies:\n  - numpy\n");
/// ws.assert_file_missing("environment-updated.yml");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `name`, creating parent directories.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name))
            .unwrap_or_else(|e| panic!("TestWorkspace::read({}): {}", name, e))
    }

    pub fn assert_file_exists(&self, name: &str) {
        assert!(
            self.path(name).is_file(),
            "expected {} to exist in {}",
            name,
            self.root().display()
        );
    }

    pub fn assert_file_missing(&self, name: &str) {
        assert!(
            !self.path(name).exists(),
            "expected {} not to exist in {}",
            name,
            self.root().display()
        );
    }

    /// Install an executable `conda` stand-in answering `search <pkg> ... --json`.
    ///
    /// `responses` maps a package name to the JSON printed on stdout. Any
    /// other package makes the script exit 1 with a conda-style JSON error.
    /// Each invocation's arguments are appended to `conda-calls.log`.
    #[cfg(unix)]
    pub fn install_fake_conda(&self, responses: &[(&str, &str)]) -> PathBuf {
        use std::fmt::Write as _;
        use std::os::unix::fs::PermissionsExt;

        let mut script = String::from("#!/bin/sh\n");
        let log = self.path("conda-calls.log");
        let _ = writeln!(script, "echo \"$@\" >> '{}'", log.display());
        script.push_str("case \"$2\" in\n");
        for (package, json) in responses {
            let _ = write!(
                script,
                "  '{}')\n    cat <<'JSON'\n{}\nJSON\n    ;;\n",
                package, json
            );
        }
        script.push_str(
            "  *)\n    echo '{\"error\": \"PackagesNotFoundError\", \"message\": \"The following packages are not available from current channels\"}'\n    exit 1\n    ;;\nesac\n",
        );

        let path = self.path("bin/conda");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Arguments of every fake conda invocation so far.
    pub fn conda_calls(&self) -> Vec<String> {
        fs::read_to_string(self.path("conda-calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
