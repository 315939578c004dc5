use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OpagateConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PathsConfig {
    /// Terraform plan exported as JSON, relative to the repo root.
    #[serde(default = "default_plan_path")]
    pub plan: PathBuf,

    /// Directory of Rego policy files.
    #[serde(default = "default_policy_dir")]
    pub policies: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    /// Rule-set entry point evaluated against the plan.
    #[serde(default = "default_query")]
    pub query: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Path to the opa binary; a bare name is resolved via PATH.
    #[serde(default = "default_opa_path")]
    pub opa_path: PathBuf,
}

fn default_plan_path() -> PathBuf {
    PathBuf::from("environments/dev/aws/tfplan.json")
}

fn default_policy_dir() -> PathBuf {
    PathBuf::from("policies/rego")
}

fn default_query() -> String {
    "data.terraform.analysis.deny".to_string()
}

fn default_opa_path() -> PathBuf {
    PathBuf::from("opa")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            plan: default_plan_path(),
            policies: default_policy_dir(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opa_path: default_opa_path(),
        }
    }
}

impl Default for OpagateConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            policy: PolicyConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OpagateConfig {
    /// Merge another config into this one (other takes precedence for
    /// values that differ from the defaults).
    pub fn merge(&mut self, other: &OpagateConfig) {
        if other.paths.plan != default_plan_path() {
            self.paths.plan = other.paths.plan.clone();
        }
        if other.paths.policies != default_policy_dir() {
            self.paths.policies = other.paths.policies.clone();
        }
        if other.policy.query != default_query() {
            self.policy.query = other.policy.query.clone();
        }
        if other.engine.opa_path != default_opa_path() {
            self.engine.opa_path = other.engine.opa_path.clone();
        }
    }

    pub fn generate_default_config() -> String {
        let default_config = Self::default();
        toml::to_string_pretty(&default_config).unwrap_or_else(|_| {
            r#"# Opagate Configuration File

[paths]
plan = "environments/dev/aws/tfplan.json"
policies = "policies/rego"

[policy]
query = "data.terraform.analysis.deny"

[engine]
opa_path = "opa"
"#
            .to_string()
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: OpagateConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the user config file path (~/.config/opagate/config.toml)
    pub fn get_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/opagate/config.toml"))
    }

    /// Get the current directory config file path (./opagate.toml)
    pub fn get_current_config_path() -> PathBuf {
        PathBuf::from("./opagate.toml")
    }

    /// Load and merge configs from all file sources with priority:
    /// 1. User config (~/.config/opagate/config.toml) - lowest (base)
    /// 2. Current directory (./opagate.toml) - highest file priority
    pub fn load_with_merged_configs() -> Self {
        let mut config = Self::default();

        if let Some(user_path) = Self::get_user_config_path() {
            if user_path.exists() {
                if let Ok(user_config) = Self::load_from_file(&user_path) {
                    config.merge(&user_config);
                    tracing::debug!("Loaded user config from: {}", user_path.display());
                }
            }
        }

        let current_path = Self::get_current_config_path();
        if current_path.exists() {
            if let Ok(current_config) = Self::load_from_file(&current_path) {
                config.merge(&current_config);
                tracing::debug!(
                    "Loaded current directory config from: {}",
                    current_path.display()
                );
            }
        }

        config
    }

    /// Apply CLI argument overrides (highest priority).
    pub fn apply_check_args(&mut self, args: &CheckArgs) {
        if let Some(ref plan) = args.plan {
            self.paths.plan = plan.clone();
        }
        if let Some(ref policies) = args.policies {
            self.paths.policies = policies.clone();
        }
        if let Some(ref query) = args.query {
            self.policy.query = query.clone();
        }
        if let Some(ref opa_path) = args.opa_path {
            self.engine.opa_path = opa_path.clone();
        }
    }

    /// Load configuration with full precedence chain:
    /// 1. Default values (lowest)
    /// 2. User config (~/.config/opagate/config.toml)
    /// 3. Current directory (./opagate.toml)
    /// 4. Explicit --config file
    /// 5. CLI arguments (highest)
    pub fn load_with_precedence(config_path: Option<PathBuf>, cli_args: &CheckArgs) -> Result<Self> {
        let mut config = Self::load_with_merged_configs();

        if let Some(path) = config_path {
            let explicit_config = Self::load_from_file(&path)
                .map_err(|e| anyhow!("Failed to load config file {}: {}", path.display(), e))?;
            config.merge(&explicit_config);
        }

        config.apply_check_args(cli_args);
        config.validate()?;

        Ok(config)
    }

    /// Reject unusable values. Deliberately does not require the policy
    /// directory to exist: a bad policy path is the engine's error to
    /// report.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.plan.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "paths.plan",
            });
        }
        if self.paths.policies.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "paths.policies",
            });
        }
        if self.policy.query.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "policy.query",
            });
        }
        if self.engine.opa_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "engine.opa_path",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpagateConfig::default();
        assert_eq!(
            config.paths.plan,
            PathBuf::from("environments/dev/aws/tfplan.json")
        );
        assert_eq!(config.paths.policies, PathBuf::from("policies/rego"));
        assert_eq!(config.policy.query, "data.terraform.analysis.deny");
        assert_eq!(config.engine.opa_path, PathBuf::from("opa"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [paths]
            plan = "stage/tfplan.json"

            [policy]
            query = "data.terraform.stage.deny"
        "#;

        let config: OpagateConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.paths.plan, PathBuf::from("stage/tfplan.json"));
        // Unset sections fall back to defaults
        assert_eq!(config.paths.policies, PathBuf::from("policies/rego"));
        assert_eq!(config.policy.query, "data.terraform.stage.deny");
    }

    #[test]
    fn test_merge_prefers_non_default_values() {
        let mut base = OpagateConfig::default();
        let mut override_config = OpagateConfig::default();
        override_config.paths.plan = PathBuf::from("prod/tfplan.json");

        base.merge(&override_config);
        assert_eq!(base.paths.plan, PathBuf::from("prod/tfplan.json"));
        assert_eq!(base.paths.policies, PathBuf::from("policies/rego"));
    }

    #[test]
    fn test_cli_args_take_precedence() {
        let mut config = OpagateConfig::default();
        config.policy.query = "data.terraform.file.deny".to_string();

        let args = CheckArgs {
            plan: Some(PathBuf::from("cli/tfplan.json")),
            policies: None,
            query: Some("data.terraform.cli.deny".to_string()),
            opa_path: None,
            verbosity: 0,
            debug: false,
            config: None,
        };

        config.apply_check_args(&args);
        assert_eq!(config.paths.plan, PathBuf::from("cli/tfplan.json"));
        assert_eq!(config.policy.query, "data.terraform.cli.deny");
        assert_eq!(config.paths.policies, PathBuf::from("policies/rego"));
    }

    #[test]
    fn test_validate_rejects_empty_query() {
        let mut config = OpagateConfig::default();
        config.policy.query = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyField {
                field: "policy.query"
            })
        ));
    }

    #[test]
    fn test_generated_config_round_trips() {
        let rendered = OpagateConfig::generate_default_config();
        let parsed: OpagateConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, OpagateConfig::default());
    }
}
