//! OPA subprocess executor.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use opagate_core::Verdict;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::OpaConfig;
use crate::parser;

/// Errors that can occur while invoking the engine or reading its output.
#[derive(Error, Debug)]
pub enum OpaError {
    #[error("failed to spawn opa process: {0}")]
    SpawnError(#[from] std::io::Error),

    #[error("opa binary not found at: {0}")]
    BinaryNotFound(PathBuf),

    #[error("opa could not evaluate (exit code {exit_code}): {stderr}")]
    EngineFailure { exit_code: i32, stderr: String },

    #[error("failed to parse opa output: {reason}")]
    ParseError { reason: String, raw_output: String },
}

/// Immutable record of one engine invocation.
#[derive(Debug, Clone)]
pub struct OpaOutput {
    /// The classified verdict.
    pub verdict: Verdict,
    /// Engine exit code: 0 means no violations, 2 means violations found.
    pub exit_code: i32,
    /// Captured stdout, kept for diagnostics.
    pub raw_output: String,
    /// Captured stderr, kept for diagnostics.
    pub stderr: String,
}

/// Executor for the OPA CLI.
pub struct OpaExecutor {
    config: OpaConfig,
}

impl OpaExecutor {
    /// Create a new executor with the given configuration.
    pub fn new(config: OpaConfig) -> Self {
        Self { config }
    }

    /// Evaluate `query` against `input` using the configured policy
    /// directory.
    ///
    /// Engine exit codes 0 and 2 are both successful evaluations (2 means
    /// the policy found violations); anything else is an engine-level
    /// failure and is reported with the captured error stream.
    pub async fn evaluate(&self, input: &Path, query: &str) -> Result<OpaOutput, OpaError> {
        let mut cmd = Command::new(&self.config.opa_path);

        cmd.arg("eval")
            .arg("--data")
            .arg(&self.config.policy_dir)
            .arg("--input")
            .arg(input)
            .arg(query)
            .arg("--format")
            .arg("json");

        cmd.current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Spawning opa process: {:?}", cmd);

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OpaError::BinaryNotFound(self.config.opa_path.clone())
            } else {
                OpaError::SpawnError(e)
            }
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let raw_output = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr_output = String::from_utf8_lossy(&output.stderr).to_string();

        if exit_code != 0 && exit_code != 2 {
            return Err(OpaError::EngineFailure {
                exit_code,
                stderr: stderr_output,
            });
        }

        if !stderr_output.is_empty() {
            warn!("opa stderr: {}", stderr_output.trim_end());
        }

        Self::classify(exit_code, raw_output, stderr_output)
    }

    /// Parse captured stdout and classify the violation list.
    fn classify(
        exit_code: i32,
        raw_output: String,
        stderr: String,
    ) -> Result<OpaOutput, OpaError> {
        let violations =
            parser::extract_violations(raw_output.trim()).map_err(|e| OpaError::ParseError {
                reason: e.to_string(),
                raw_output: raw_output.clone(),
            })?;

        Ok(OpaOutput {
            verdict: Verdict::from_violations(violations),
            exit_code,
            raw_output,
            stderr,
        })
    }
}
