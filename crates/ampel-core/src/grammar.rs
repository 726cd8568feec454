//! Grammar-check collaborator seam.
//!
//! The `grammar_count` rule type consults an external grammar service. The
//! engine only needs an issue count, so the service sits behind a narrow
//! trait and every failure degrades to an N/A verdict for the affected
//! clause, never aborting the document.

use std::time::Duration;
use thiserror::Error;

/// Errors from a grammar collaborator.
///
/// All variants are handler degradation: the grammar handler turns them into
/// an N/A record with the error text as evidence.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("grammar service unavailable: {0}")]
    Unavailable(String),

    #[error("grammar check timed out after {0:?}")]
    Timeout(Duration),

    #[error("grammar service returned a malformed response: {0}")]
    Protocol(String),
}

/// A source of grammar-issue counts for a span of text.
///
/// Implementations wrap whatever external service the host has configured.
/// The engine treats the collaborator as opaque and possibly stateful; it is
/// queried read-only, once per clause with a `grammar_count` rule.
pub trait GrammarChecker {
    /// Count discrete grammar issues in `text`.
    fn check(&self, text: &str) -> Result<usize, GrammarError>;
}

/// Checker used when no grammar service is configured: every query reports
/// `Unavailable`, which the handler records as N/A.
#[derive(Debug, Default)]
pub struct DisabledGrammarChecker;

impl GrammarChecker for DisabledGrammarChecker {
    fn check(&self, _text: &str) -> Result<usize, GrammarError> {
        Err(GrammarError::Unavailable(
            "no grammar service configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_checker_is_always_unavailable() {
        let err = DisabledGrammarChecker.check("any text").unwrap_err();
        assert!(matches!(err, GrammarError::Unavailable(_)));
        assert!(err.to_string().contains("no grammar service configured"));
    }

    #[test]
    fn timeout_reports_the_duration() {
        let err = GrammarError::Timeout(Duration::from_secs(10));
        assert!(err.to_string().contains("10s"));
    }
}
