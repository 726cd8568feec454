//! Numeric range and presence checks.
//!
//! All four numeric rule types share integer extraction (plain digit runs);
//! the percentage variant only counts runs immediately followed by `%`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::matching;
use crate::rules::{Rule, RuleType};
use crate::types::Verdict;

/// Guarantee terms above this many years are flagged when the rule sets no
/// threshold of its own.
pub const DEFAULT_MAX_YEARS: i64 = 6;

/// Score a vague payment-term pattern must exceed to earn a YELLOW.
const VAGUE_TERM_CUTOFF: f64 = 80.0;

lazy_static! {
    static ref INT_RE: Regex = Regex::new(r"\d+").unwrap();
    static ref PERCENT_RE: Regex = Regex::new(r"(\d+)\s*%").unwrap();
}

/// Integer tokens in `text`. Runs too long for i64 are skipped.
fn extract_ints(text: &str) -> Vec<i64> {
    INT_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// `%`-suffixed integer tokens in `text`.
fn extract_percentages(text: &str) -> Vec<i64> {
    PERCENT_RE
        .captures_iter(text)
        .filter_map(|c| c[1].parse().ok())
        .collect()
}

pub(super) fn check(clause_text: &str, rule: &Rule) -> (Verdict, String) {
    match rule.rule_type {
        RuleType::NumericAmount => check_amount(clause_text, rule),
        RuleType::NumericYears => check_years(clause_text, rule),
        RuleType::NumericDays => check_days(clause_text, rule),
        RuleType::NumericPercentage => check_percentage(clause_text, rule),
        other => (
            Verdict::NotApplicable,
            format!("Numeric rule type '{other}' logic not implemented."),
        ),
    }
}

fn check_amount(clause_text: &str, rule: &Rule) -> (Verdict, String) {
    if rule.thresholds.amount_presence != Some(true) {
        return (
            Verdict::NotApplicable,
            "Amount presence not demanded by this rule.".to_string(),
        );
    }

    let nums = extract_ints(clause_text);
    if nums.is_empty() {
        (Verdict::Red, "No amount found.".to_string())
    } else {
        (
            Verdict::Green,
            format!("Found potential amount(s): {nums:?}"),
        )
    }
}

fn check_years(clause_text: &str, rule: &Rule) -> (Verdict, String) {
    let nums = extract_ints(clause_text);
    if nums.is_empty() {
        return (Verdict::NotApplicable, "No year value found.".to_string());
    }

    let max_years = rule.thresholds.green_max_years.unwrap_or(DEFAULT_MAX_YEARS);
    if nums.iter().any(|&n| n <= max_years) {
        (Verdict::Green, format!("Found term <= {max_years} years."))
    } else {
        (
            Verdict::Red,
            format!("Found term > {max_years} years: {}", nums[0]),
        )
    }
}

fn check_days(clause_text: &str, rule: &Rule) -> (Verdict, String) {
    let Some(min_days) = rule.thresholds.green_min_days else {
        return (
            Verdict::NotApplicable,
            "No green_min_days threshold configured.".to_string(),
        );
    };

    let nums = extract_ints(clause_text);
    if nums.iter().any(|&n| n >= min_days) {
        return (
            Verdict::Green,
            format!("Payment period of >= {min_days} days found."),
        );
    }

    // Vague wording ("upon request", "in due course") earns a YELLOW before
    // falling through to RED.
    let yellow: Vec<&str> = rule.patterns.yellow.iter().map(|s| s.as_str()).collect();
    if let Some((pattern, score)) = matching::extract_best(clause_text, &yellow, false) {
        if score > VAGUE_TERM_CUTOFF {
            return (Verdict::Yellow, format!("Vague term found: '{pattern}'"));
        }
    }

    (
        Verdict::Red,
        format!("No payment period of at least {min_days} days found."),
    )
}

fn check_percentage(clause_text: &str, rule: &Rule) -> (Verdict, String) {
    let percents = extract_percentages(clause_text);
    if percents.is_empty() {
        return (
            Verdict::NotApplicable,
            "No percentage value found.".to_string(),
        );
    }

    let Some(max_percent) = rule.thresholds.green_max_percent else {
        return (
            Verdict::NotApplicable,
            "No green_max_percent threshold configured.".to_string(),
        );
    };

    if percents.iter().any(|&p| p <= max_percent) {
        (
            Verdict::Green,
            format!("Found percentage <= {max_percent}%."),
        )
    } else {
        (
            Verdict::Red,
            format!("Found percentage > {max_percent}%: {}%", percents[0]),
        )
    }
}
