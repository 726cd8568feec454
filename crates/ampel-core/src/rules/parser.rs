//! Rule-set parsing from JSON/YAML.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a rule set.
///
/// All of these are configuration errors: they surface before any clause is
/// processed and abort the run.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Failed to read rules file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Rule set validation failed: {0}")]
    ValidationError(String),
}

/// Evaluation strategy for a rule.
///
/// The set is closed: a rule file naming any other type fails to load, so an
/// unknown type is a configuration error rather than a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Fuzzy,
    NumericYears,
    NumericDays,
    NumericAmount,
    NumericPercentage,
    PresenceInverse,
    Format,
    OcrConfidence,
    GrammarCount,
}

impl RuleType {
    /// The type name as it appears in rule files.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Fuzzy => "fuzzy",
            RuleType::NumericYears => "numeric_years",
            RuleType::NumericDays => "numeric_days",
            RuleType::NumericAmount => "numeric_amount",
            RuleType::NumericPercentage => "numeric_percentage",
            RuleType::PresenceInverse => "presence_inverse",
            RuleType::Format => "format",
            RuleType::OcrConfidence => "ocr_confidence",
            RuleType::GrammarCount => "grammar_count",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tiered pattern lists for fuzzy and presence-based rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patterns {
    #[serde(default)]
    pub green: Vec<String>,

    #[serde(default)]
    pub yellow: Vec<String>,

    #[serde(default)]
    pub red: Vec<String>,
}

impl Patterns {
    /// All patterns across tiers, green first, in file order.
    pub fn all(&self) -> Vec<&str> {
        self.green
            .iter()
            .chain(self.yellow.iter())
            .chain(self.red.iter())
            .map(|s| s.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.green.is_empty() && self.yellow.is_empty() && self.red.is_empty()
    }
}

/// Numeric thresholds. Which fields are read depends on the rule type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Fuzzy score at or above which a clause is GREEN.
    #[serde(default)]
    pub green: Option<f64>,

    /// Fuzzy score at or above which a clause is YELLOW.
    #[serde(default)]
    pub yellow: Option<f64>,

    /// Longest acceptable term for `numeric_years`.
    #[serde(default)]
    pub green_max_years: Option<i64>,

    /// Shortest acceptable payment period for `numeric_days`.
    #[serde(default)]
    pub green_min_days: Option<i64>,

    /// Largest acceptable percentage for `numeric_percentage`.
    #[serde(default)]
    pub green_max_percent: Option<i64>,

    /// `numeric_amount`: demand that an amount be present in the clause.
    #[serde(default)]
    pub amount_presence: Option<bool>,
}

/// A single screening rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier within the rule set (e.g., "R1").
    pub id: String,

    /// Display label used in evaluation records.
    pub name: String,

    #[serde(rename = "type")]
    pub rule_type: RuleType,

    #[serde(default)]
    pub patterns: Patterns,

    #[serde(default)]
    pub thresholds: Thresholds,
}

/// An ordered rule set. List order is application priority.
///
/// Rule files are a top-level JSON/YAML array of rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set from already-constructed rules.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let set = Self { rules };
        set.validate()?;
        Ok(set)
    }

    /// Parse a rule set from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let set: RuleSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Parse a rule set from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, RuleError> {
        let set: RuleSet = serde_yaml::from_str(yaml)?;
        set.validate()?;
        Ok(set)
    }

    /// Parse a rule set from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a rule set from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a rule set from a file, dispatching on the extension
    /// (`.yaml`/`.yml` are YAML, everything else is JSON).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_json_file(path),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Structural validation: non-empty ids and names, globally unique ids.
    fn validate(&self) -> Result<(), RuleError> {
        let mut seen = std::collections::HashSet::new();

        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(RuleError::ValidationError(
                    "rule with empty id".to_string(),
                ));
            }
            if rule.name.trim().is_empty() {
                return Err(RuleError::ValidationError(format!(
                    "rule '{}' has an empty name",
                    rule.id
                )));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleError::ValidationError(format!(
                    "Duplicate rule ID: {}",
                    rule.id
                )));
            }
        }

        Ok(())
    }
}
