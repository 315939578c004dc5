//! OPA CLI integration for the opagate policy gate.
//!
//! This crate spawns `opa eval` against a structured input file, captures
//! both standard streams, classifies the engine's exit code, and parses
//! the evaluation payload into a policy verdict.

mod executor;
mod parser;

pub use executor::{OpaError, OpaExecutor, OpaOutput};
pub use parser::{EvalDocument, Expression, ParseFailure, ResultEntry, extract_violations};

use std::path::PathBuf;

/// Configuration for the OPA executor.
#[derive(Debug, Clone)]
pub struct OpaConfig {
    /// Path to the opa binary; a bare name is resolved via PATH.
    pub opa_path: PathBuf,
    /// Directory of Rego policy files passed via `--data`.
    pub policy_dir: PathBuf,
    /// Working directory for the engine process.
    pub working_dir: PathBuf,
}

impl Default for OpaConfig {
    fn default() -> Self {
        Self {
            opa_path: PathBuf::from("opa"),
            policy_dir: PathBuf::from("policies/rego"),
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl OpaConfig {
    /// Create a new configuration with the specified policy directory.
    pub fn new(policy_dir: PathBuf) -> Self {
        Self {
            policy_dir,
            ..Default::default()
        }
    }

    /// Set the path to the opa binary.
    pub fn with_opa_path(mut self, path: PathBuf) -> Self {
        self.opa_path = path;
        self
    }

    /// Set the policy directory.
    pub fn with_policy_dir(mut self, dir: PathBuf) -> Self {
        self.policy_dir = dir;
        self
    }

    /// Set the working directory for the engine process.
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }
}
