//! Grammar-issue counting via the injected collaborator.

use crate::grammar::GrammarChecker;
use crate::types::Verdict;

/// Issue count above which a clause turns RED; 1 through this value is
/// YELLOW.
const YELLOW_MAX_ISSUES: usize = 5;

pub(super) fn check(clause_text: &str, grammar: &dyn GrammarChecker) -> (Verdict, String) {
    match grammar.check(clause_text) {
        Ok(count) => {
            let verdict = if count == 0 {
                Verdict::Green
            } else if count <= YELLOW_MAX_ISSUES {
                Verdict::Yellow
            } else {
                Verdict::Red
            };
            (verdict, format!("Found {count} grammar errors."))
        }
        Err(e) => (
            Verdict::NotApplicable,
            format!("Grammar check failed: {e}"),
        ),
    }
}
