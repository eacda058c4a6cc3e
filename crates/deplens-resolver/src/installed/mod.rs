//! Installed-package metadata as an independent second source.
//!
//! Runs `<python> -m pip show <package>` and reads its `Requires:` line, which
//! reflects what the local package manager recorded at install time.

use tokio::process::Command;
use tracing::{debug, warn};

use deplens_core::{DependencySet, DeplensError, Extraction};

const TOOL: &str = "pip show";

/// Queries a local interpreter's package manager
#[derive(Debug, Clone)]
pub struct InstalledPackages {
    python: String,
}

impl Default for InstalledPackages {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl InstalledPackages {
    /// Use `python` as the interpreter executable
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    pub fn python(&self) -> &str {
        &self.python
    }

    /// Direct dependencies the installed copy of `package_name` declares
    pub async fn dependencies(&self, package_name: &str) -> Extraction {
        debug!("Running {} -m pip show {}", self.python, package_name);

        let output = match Command::new(&self.python)
            .args(["-m", "pip", "show", package_name])
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => return failed(format!("could not run {}: {}", self.python, e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return failed(format!(
                "package '{}' is not installed ({})",
                package_name,
                stderr.trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_pip_show(&stdout) {
            Some(dependencies) => Extraction::found(dependencies),
            None => failed(format!("no Requires field in output for '{}'", package_name)),
        }
    }
}

/// Dependencies from the `Requires:` line of `pip show` output.
///
/// `None` when the line is missing; `Some(empty)` when it lists nothing.
pub fn parse_pip_show(output: &str) -> Option<DependencySet> {
    let requires = output
        .lines()
        .find_map(|line| line.strip_prefix("Requires:"))?;

    Some(
        requires
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect(),
    )
}

fn failed(message: String) -> Extraction {
    let error = DeplensError::LocalTool {
        tool: TOOL.to_string(),
        message,
    };
    warn!("{}", error);
    Extraction::failed(error)
}
