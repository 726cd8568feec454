//! Cross-clause consistency checking.
//!
//! Independently of rule evaluation, every clause contributes atomic facts
//! (amounts, currencies, contract numbers). After all clauses are evaluated,
//! the aggregated distinct-value sets are inspected once per document: a
//! document that asserts two different totals, currencies or contract
//! numbers across its clauses is flagged RED.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{DocumentCheck, Verdict};

/// Name of the single document-level check record.
pub const CHECK_NAME: &str = "Cross-Clause Consistency";

const CONSISTENT_MSG: &str = "All values are consistent across clauses.";

lazy_static! {
    /// Locale-formatted monetary amounts: digit groups with optional
    /// thousand separators and a decimal part.
    static ref AMOUNT_RE: Regex =
        Regex::new(r"\b\d{1,3}(?:[,.]\d{3})*(?:\.\d+)?\b").unwrap();

    /// Three-letter uppercase currency codes or common currency symbols.
    static ref CURRENCY_RE: Regex = Regex::new(r"\b[A-Z]{3}\b|[$€£¥]").unwrap();

    /// Contract numbers: `PR+` followed by nine digits.
    static ref CONTRACT_NO_RE: Regex = Regex::new(r"\bPR\+\d{9}\b").unwrap();
}

/// Atomic facts extracted from one clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseFacts {
    pub amounts: Vec<String>,
    pub currencies: Vec<String>,
    pub contract_numbers: Vec<String>,
}

/// Extract amount, currency and contract-number tokens from one clause.
///
/// Extraction is independent of rule evaluation; a clause without any fact
/// simply contributes nothing to the document-level aggregation.
pub fn extract_facts(clause_text: &str) -> ClauseFacts {
    ClauseFacts {
        amounts: AMOUNT_RE
            .find_iter(clause_text)
            .map(|m| m.as_str().to_string())
            .collect(),
        currencies: CURRENCY_RE
            .find_iter(clause_text)
            .map(|m| m.as_str().to_string())
            .collect(),
        contract_numbers: CONTRACT_NO_RE
            .find_iter(clause_text)
            .map(|m| m.as_str().to_string())
            .collect(),
    }
}

/// Aggregate per-clause facts and flag any category with more than one
/// distinct value. Sets are sorted so the evidence is stable run to run.
pub fn cross_clause_check(facts: &[ClauseFacts]) -> DocumentCheck {
    let amounts: BTreeSet<&str> = facts
        .iter()
        .flat_map(|f| f.amounts.iter().map(|s| s.as_str()))
        .collect();
    let currencies: BTreeSet<&str> = facts
        .iter()
        .flat_map(|f| f.currencies.iter().map(|s| s.as_str()))
        .collect();
    let contract_numbers: BTreeSet<&str> = facts
        .iter()
        .flat_map(|f| f.contract_numbers.iter().map(|s| s.as_str()))
        .collect();

    let mut issues = Vec::new();
    if amounts.len() > 1 {
        issues.push(format!(
            "Inconsistent amounts found: {:?}",
            amounts.iter().collect::<Vec<_>>()
        ));
    }
    if currencies.len() > 1 {
        issues.push(format!(
            "Inconsistent currencies found: {:?}",
            currencies.iter().collect::<Vec<_>>()
        ));
    }
    if contract_numbers.len() > 1 {
        issues.push(format!(
            "Inconsistent contract numbers found: {:?}",
            contract_numbers.iter().collect::<Vec<_>>()
        ));
    }

    if issues.is_empty() {
        DocumentCheck {
            check_name: CHECK_NAME.to_string(),
            verdict: Verdict::Green,
            evidence: CONSISTENT_MSG.to_string(),
        }
    } else {
        DocumentCheck {
            check_name: CHECK_NAME.to_string(),
            verdict: Verdict::Red,
            evidence: issues.join(" "),
        }
    }
}
