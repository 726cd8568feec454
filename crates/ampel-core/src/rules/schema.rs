//! JSON Schema validation for rule files.
//!
//! Rule files are validated against schema/rules.schema.json. This module
//! provides schema loading and validation utilities for hosts that want
//! detailed configuration diagnostics before parsing.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded rule-file schema (loaded at compile time).
const RULES_SCHEMA_JSON: &str = include_str!("../../../../schema/rules.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

/// Get or initialize the compiled schema validator.
fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = match serde_json::from_str(RULES_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        match jsonschema::options().build(&schema_value) {
            Ok(v) => Ok(v),
            Err(e) => Err(format!("Failed to compile schema: {}", e)),
        }
    });

    match result {
        Ok(v) => Ok(v),
        Err(e) => Err(SchemaError::LoadError(e.clone())),
    }
}

/// Validate a rule-file JSON value against the schema.
///
/// Returns Ok(()) if valid, or a list of validation error messages.
pub fn validate_rules_schema(rules_json: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(rules_json)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check if a rule-file JSON value is valid against the schema.
///
/// Returns true if valid, false otherwise. Use `validate_rules_schema` for
/// detailed error messages.
#[allow(dead_code)]
pub fn is_valid_rules(rules_json: &serde_json::Value) -> bool {
    get_validator()
        .map(|v| v.is_valid(rules_json))
        .unwrap_or(false)
}
