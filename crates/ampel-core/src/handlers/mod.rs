//! Per-rule-type evaluation handlers.
//!
//! Dispatch is a match over the closed [`RuleType`] enum: every rule yields
//! exactly one verdict/evidence pair per clause, and rule types without
//! clause-level semantics yield N/A rather than failing. Handlers are pure
//! functions of clause text and rule configuration; the grammar handler
//! additionally consults the injected collaborator.

mod fuzzy;
mod grammar_count;
mod numeric;
mod presence;

use crate::grammar::GrammarChecker;
use crate::rules::{Rule, RuleType};
use crate::types::Verdict;

/// Evaluate one rule against one clause.
pub fn evaluate_rule(
    clause_text: &str,
    rule: &Rule,
    grammar: &dyn GrammarChecker,
) -> (Verdict, String) {
    match rule.rule_type {
        RuleType::Fuzzy => fuzzy::check(clause_text, rule),
        RuleType::NumericYears
        | RuleType::NumericDays
        | RuleType::NumericAmount
        | RuleType::NumericPercentage => numeric::check(clause_text, rule),
        RuleType::PresenceInverse => presence::check(clause_text, rule),
        RuleType::GrammarCount => grammar_count::check(clause_text, grammar),
        RuleType::Format | RuleType::OcrConfidence => (
            Verdict::NotApplicable,
            format!(
                "Rule type '{}' is not applicable to a single clause.",
                rule.rule_type
            ),
        ),
    }
}
