//! Payload parser for `opa eval` structured output.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Shape mismatches while reading the evaluation payload.
///
/// Every variant is terminal; no partial recovery is attempted.
#[derive(Error, Debug)]
pub enum ParseFailure {
    #[error("output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("payload has no result entries")]
    EmptyResult,

    #[error("first result entry has no expressions")]
    EmptyExpressions,

    #[error("expression value is not an array")]
    NotAnArray,
}

/// Top-level document emitted by `opa eval --format json`.
#[derive(Debug, Deserialize)]
pub struct EvalDocument {
    pub result: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ResultEntry {
    pub expressions: Vec<Expression>,
}

/// A single evaluated expression. Only `value` is consumed; the engine
/// also emits `text` and `location`, which are ignored here.
#[derive(Debug, Deserialize)]
pub struct Expression {
    pub value: Value,
}

/// Navigate `result[0].expressions[0].value` and return the violation
/// list. A missing level anywhere, or a value that is not an array, is a
/// parse failure.
pub fn extract_violations(raw: &str) -> Result<Vec<Value>, ParseFailure> {
    let document: EvalDocument = serde_json::from_str(raw)?;

    let entry = document
        .result
        .into_iter()
        .next()
        .ok_or(ParseFailure::EmptyResult)?;
    let expression = entry
        .expressions
        .into_iter()
        .next()
        .ok_or(ParseFailure::EmptyExpressions)?;

    match expression.value {
        Value::Array(violations) => Ok(violations),
        _ => Err(ParseFailure::NotAnArray),
    }
}
