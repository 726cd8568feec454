//! Fuzzy boilerplate matching across all pattern tiers.
//!
//! The single best partial-ratio match out of the green, yellow and red
//! pattern pool decides the verdict against the rule's score thresholds.

use crate::matching;
use crate::rules::Rule;
use crate::types::Verdict;

/// Score at or above which a clause is GREEN when the rule sets no threshold.
pub const DEFAULT_GREEN: f64 = 90.0;

/// Score at or above which a clause is YELLOW when the rule sets no threshold.
pub const DEFAULT_YELLOW: f64 = 75.0;

pub(super) fn check(clause_text: &str, rule: &Rule) -> (Verdict, String) {
    let pool = rule.patterns.all();
    let Some((pattern, score)) = matching::extract_best(clause_text, &pool, true) else {
        return (
            Verdict::NotApplicable,
            "No patterns defined for fuzzy rule.".to_string(),
        );
    };

    let green = rule.thresholds.green.unwrap_or(DEFAULT_GREEN);
    let yellow = rule.thresholds.yellow.unwrap_or(DEFAULT_YELLOW);

    let verdict = if score >= green {
        Verdict::Green
    } else if score >= yellow {
        Verdict::Yellow
    } else {
        Verdict::Red
    };

    (
        verdict,
        format!("Best match: '{pattern}' with score {score:.2}"),
    )
}
