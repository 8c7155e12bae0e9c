//! Weik.io CLI wrapper
//!
//! Runs the `weikio` executable with an explicit argument vector (no shell)
//! and returns its stdout. Anything written to stderr counts as failure,
//! matching how the CLI reports errors.

use crate::error::{Result, WeikioError};
use tokio::process::Command;
use tracing::debug;

/// Handle to the Weik.io command-line tool
#[derive(Debug, Clone)]
pub struct WeikioCli {
    program: String,
}

impl WeikioCli {
    /// Wrap the executable at `program` (a path or a name on PATH)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `weikio agents ls`
    pub async fn list_agents(&self) -> Result<String> {
        self.run(&["agents", "ls"]).await
    }

    /// `weikio config apply <filepath>`
    pub async fn apply_config(&self, filepath: &str) -> Result<String> {
        self.run(&["config", "apply", filepath]).await
    }

    /// Run the CLI and capture stdout
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| WeikioError::Cli(format!("failed to run {}: {}", self.program, e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(WeikioError::Cli(stderr.trim().to_string()));
        }

        if !output.status.success() {
            return Err(WeikioError::Cli(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for WeikioCli {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_WEIKIO_BIN)
    }
}
