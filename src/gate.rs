//! The policy check runner: one plan file, one engine invocation, one
//! verdict.

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use opagate_core::{Verdict, exit};
use opagate_opa::{OpaConfig, OpaError, OpaExecutor};

use crate::cli::ui::StatusPrinter;
use crate::config::OpagateConfig;

/// Everything one gate run can end in, covering the full error taxonomy
/// so callers can branch exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// The violation list was obtained and is empty.
    Compliant,
    /// The evaluation succeeded and the policy rejected the plan.
    Violations(Vec<Value>),
    /// The configured plan file does not exist; the engine was not
    /// invoked.
    MissingPlan(PathBuf),
    /// The engine process could not be launched or communicated with.
    InvocationError(String),
    /// The engine ran but exited outside its {0, 2} success set.
    EngineError { exit_code: i32, stderr: String },
    /// The engine's stdout did not match the expected payload shape.
    ParseError { reason: String, raw_output: String },
}

impl GateOutcome {
    /// Map to the process exit-code contract: 0 only for a clean pass.
    pub fn exit_code(&self) -> i32 {
        match self {
            GateOutcome::Compliant => exit::COMPLIANT,
            _ => exit::BLOCKED,
        }
    }

    /// The primary status line for this outcome.
    pub fn headline(&self) -> String {
        match self {
            GateOutcome::Compliant => "policy check passed; infrastructure is compliant".to_string(),
            GateOutcome::Violations(violations) => format!(
                "policy check failed: {} violation(s) found",
                violations.len()
            ),
            GateOutcome::MissingPlan(path) => format!("plan file not found: {}", path.display()),
            GateOutcome::InvocationError(message) => {
                format!("failed to invoke the policy engine: {}", message)
            }
            GateOutcome::EngineError { exit_code, .. } => {
                format!("policy engine could not evaluate (exit code {})", exit_code)
            }
            GateOutcome::ParseError { reason, .. } => {
                format!("failed to parse policy engine output: {}", reason)
            }
        }
    }
}

/// Run the gate end to end: existence check, engine invocation,
/// classification. Pure with respect to the console; use [`report`] to
/// print the outcome.
pub async fn run_gate(config: &OpagateConfig) -> GateOutcome {
    let plan_path = &config.paths.plan;

    if !plan_path.exists() {
        return GateOutcome::MissingPlan(plan_path.clone());
    }

    let engine = OpaExecutor::new(
        OpaConfig::new(config.paths.policies.clone())
            .with_opa_path(config.engine.opa_path.clone()),
    );

    match engine.evaluate(plan_path, &config.policy.query).await {
        Ok(output) => {
            debug!("opa exited with code {}", output.exit_code);
            match output.verdict {
                Verdict::Compliant => GateOutcome::Compliant,
                Verdict::Violations(violations) => GateOutcome::Violations(violations),
            }
        }
        Err(OpaError::EngineFailure { exit_code, stderr }) => {
            GateOutcome::EngineError { exit_code, stderr }
        }
        Err(OpaError::ParseError { reason, raw_output }) => {
            GateOutcome::ParseError { reason, raw_output }
        }
        Err(err @ (OpaError::SpawnError(_) | OpaError::BinaryNotFound(_))) => {
            GateOutcome::InvocationError(err.to_string())
        }
    }
}

/// Print the outcome: status lines on stderr, inspection payloads
/// (violation list, raw engine output) on stdout.
pub fn report(outcome: &GateOutcome, printer: &StatusPrinter) {
    match outcome {
        GateOutcome::Compliant => {
            printer.success("Passed", &outcome.headline());
        }
        GateOutcome::Violations(violations) => {
            printer.error("Failed", &outcome.headline());
            let rendered = serde_json::to_string_pretty(violations)
                .unwrap_or_else(|_| format!("{:?}", violations));
            println!("{}", rendered);
        }
        GateOutcome::MissingPlan(path) => {
            printer.error("Missing", &outcome.headline());
            printer.dim(&format!(
                "run `terraform plan` and export it with `terraform show -json` to {} first",
                path.display()
            ));
        }
        GateOutcome::InvocationError(_) => {
            printer.error("Error", &outcome.headline());
        }
        GateOutcome::EngineError { stderr, .. } => {
            printer.error("Error", &outcome.headline());
            for line in stderr.lines() {
                printer.dim(line);
            }
        }
        GateOutcome::ParseError { raw_output, .. } => {
            printer.error("Error", &outcome.headline());
            println!("{}", raw_output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_compliant_maps_to_exit_zero() {
        assert_eq!(GateOutcome::Compliant.exit_code(), exit::COMPLIANT);
        assert_eq!(
            GateOutcome::Violations(vec![json!({"msg": "bad rule"})]).exit_code(),
            exit::BLOCKED
        );
        assert_eq!(
            GateOutcome::MissingPlan(PathBuf::from("tfplan.json")).exit_code(),
            exit::BLOCKED
        );
        assert_eq!(
            GateOutcome::InvocationError("boom".to_string()).exit_code(),
            exit::BLOCKED
        );
        assert_eq!(
            GateOutcome::EngineError {
                exit_code: 1,
                stderr: String::new()
            }
            .exit_code(),
            exit::BLOCKED
        );
        assert_eq!(
            GateOutcome::ParseError {
                reason: String::new(),
                raw_output: String::new()
            }
            .exit_code(),
            exit::BLOCKED
        );
    }

    #[test]
    fn test_headlines_name_the_failure() {
        assert!(GateOutcome::Compliant.headline().contains("compliant"));
        assert!(
            GateOutcome::Violations(vec![json!({}), json!({})])
                .headline()
                .contains("2 violation(s)")
        );
        assert!(
            GateOutcome::MissingPlan(PathBuf::from("environments/dev/aws/tfplan.json"))
                .headline()
                .contains("environments/dev/aws/tfplan.json")
        );
        assert!(
            GateOutcome::EngineError {
                exit_code: 3,
                stderr: String::new()
            }
            .headline()
            .contains("exit code 3")
        );
    }
}
