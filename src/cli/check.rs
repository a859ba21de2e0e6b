//! Evaluate a single condition against a JSON scope

use super::CliError;
use crate::{Expr, Struct, Value, convert::struct_from_json, evaluate, parse};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The condition to evaluate
    pub condition: String,
    /// JSON object used as the scope
    pub input: Option<String>,
    /// Environment variables exposed as the `env` struct
    pub env: Option<Struct>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid(Expr),
    /// Condition evaluated to a non-error value
    Success { expr: Expr, value: Value },
}

fn build_scope(options: &CheckOptions) -> Result<Struct, CliError> {
    let mut scope = match &options.input {
        Some(json) if !json.trim().is_empty() => {
            let value: serde_json::Value = serde_json::from_str(json)?;
            struct_from_json(value)?
        }
        _ => Struct::new(),
    };

    if let Some(env) = &options.env {
        scope.insert("env", env.clone());
    }
    Ok(scope)
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = parse(&options.condition).map_err(CliError::Parse)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid(expr));
    }

    let scope = build_scope(options)?;

    match evaluate(&expr, &scope) {
        Value::Error(msg) => Err(CliError::Eval(msg)),
        value => Ok(CheckResult::Success { expr, value }),
    }
}
