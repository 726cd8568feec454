//! Result records produced by clause evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Traffic-light verdict for a single rule applied to a single clause.
///
/// `NotApplicable` means the handler could not produce a judgment for this
/// clause (missing configuration, collaborator failure). It must never be
/// conflated with `Red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "GREEN")]
    Green,
    #[serde(rename = "YELLOW")]
    Yellow,
    #[serde(rename = "RED")]
    Red,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Verdict {
    pub fn is_green(&self) -> bool {
        matches!(self, Verdict::Green)
    }

    pub fn is_red(&self) -> bool {
        matches!(self, Verdict::Red)
    }

    /// Whether the handler produced an actual judgment.
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Verdict::NotApplicable)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Green => "GREEN",
            Verdict::Yellow => "YELLOW",
            Verdict::Red => "RED",
            Verdict::NotApplicable => "N/A",
        };
        f.write_str(label)
    }
}

/// Outcome of one rule applied to one clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEvaluation {
    pub rule_id: String,
    pub rule_name: String,
    pub verdict: Verdict,
    /// Human-readable justification: matched pattern and score, offending
    /// value, or the failure that degraded the check to N/A.
    pub evidence: String,
}

/// All rule outcomes for one clause, in rule-set order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseEvaluation {
    /// 1-based position of the clause within the document.
    pub clause_number: usize,
    pub clause_text: String,
    pub evaluations: Vec<RuleEvaluation>,
}

/// A document-level check record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCheck {
    pub check_name: String,
    pub verdict: Verdict,
    pub evidence: String,
}

/// The complete evaluation of one document.
///
/// Created fresh per invocation and never mutated afterward; hosts serialize
/// it as needed (JSON report, spreadsheet rows).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEvaluation {
    pub clause_level: Vec<ClauseEvaluation>,
    pub document_level: Vec<DocumentCheck>,
    pub evaluated_at: DateTime<Utc>,
}
