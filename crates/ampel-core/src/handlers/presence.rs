//! Inverse presence: forbidden-term detection.
//!
//! The rule lists terms that must NOT appear; a strong match flips the
//! verdict to RED.

use crate::matching;
use crate::rules::Rule;
use crate::types::Verdict;

/// Score a forbidden term must exceed before it counts as present.
const FORBIDDEN_CUTOFF: f64 = 90.0;

pub(super) fn check(clause_text: &str, rule: &Rule) -> (Verdict, String) {
    let red: Vec<&str> = rule.patterns.red.iter().map(|s| s.as_str()).collect();
    let Some((pattern, score)) = matching::extract_best(clause_text, &red, false) else {
        return (
            Verdict::NotApplicable,
            "No red patterns defined for inverse presence rule.".to_string(),
        );
    };

    if score > FORBIDDEN_CUTOFF {
        (Verdict::Red, format!("Found forbidden term: '{pattern}'"))
    } else {
        (Verdict::Green, "No forbidden terms found.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Patterns, RuleType, Thresholds};

    fn presence_rule(red: Vec<&str>) -> Rule {
        Rule {
            id: "P1".to_string(),
            name: "Forbidden terms".to_string(),
            rule_type: RuleType::PresenceInverse,
            patterns: Patterns {
                red: red.into_iter().map(String::from).collect(),
                ..Patterns::default()
            },
            thresholds: Thresholds::default(),
        }
    }

    #[test]
    fn forbidden_term_present_is_red() {
        let rule = presence_rule(vec!["auf erstes Anfordern"]);
        let (verdict, evidence) =
            check("Zahlung auf erstes Anfordern ohne Einwendungen.", &rule);
        assert_eq!(verdict, Verdict::Red);
        assert!(evidence.contains("'auf erstes Anfordern'"));
    }

    #[test]
    fn clean_clause_is_green() {
        let rule = presence_rule(vec!["auf erstes Anfordern"]);
        let (verdict, evidence) = check("Die Lieferung erfolgt innerhalb von zwei Wochen.", &rule);
        assert_eq!(verdict, Verdict::Green);
        assert_eq!(evidence, "No forbidden terms found.");
    }

    #[test]
    fn no_red_patterns_is_na() {
        let rule = presence_rule(vec![]);
        let (verdict, _) = check("any clause", &rule);
        assert_eq!(verdict, Verdict::NotApplicable);
    }
}
