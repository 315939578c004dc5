//! Policy verdict types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a successful policy evaluation.
///
/// Violation records are opaque documents produced by the policy rules;
/// they are carried through for display without being interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    /// The violation list was empty.
    Compliant,
    /// One or more policy rules rejected the input.
    Violations(Vec<Value>),
}

impl Verdict {
    /// Classify a violation list: empty means compliant.
    pub fn from_violations(violations: Vec<Value>) -> Self {
        if violations.is_empty() {
            Verdict::Compliant
        } else {
            Verdict::Violations(violations)
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, Verdict::Compliant)
    }

    pub fn violation_count(&self) -> usize {
        match self {
            Verdict::Compliant => 0,
            Verdict::Violations(violations) => violations.len(),
        }
    }

    /// Render the violation list as indented JSON for human inspection.
    /// Returns `None` for a compliant verdict.
    pub fn to_pretty_json(&self) -> Option<String> {
        match self {
            Verdict::Compliant => None,
            Verdict::Violations(violations) => serde_json::to_string_pretty(violations).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_violations_are_compliant() {
        let verdict = Verdict::from_violations(vec![]);
        assert!(verdict.is_compliant());
        assert_eq!(verdict.violation_count(), 0);
        assert!(verdict.to_pretty_json().is_none());
    }

    #[test]
    fn test_non_empty_violations_block() {
        let verdict = Verdict::from_violations(vec![json!({"msg": "bad rule"})]);
        assert!(!verdict.is_compliant());
        assert_eq!(verdict.violation_count(), 1);

        let rendered = verdict.to_pretty_json().unwrap();
        assert!(rendered.contains("bad rule"));
    }

    #[test]
    fn test_violation_records_pass_through_unexamined() {
        // Rule output shape is up to the policy author; anything survives.
        let verdict = Verdict::from_violations(vec![json!("plain string"), json!(42)]);
        assert_eq!(verdict.violation_count(), 2);
    }
}
