//! # ampel-core
//!
//! Deterministic clause screening engine for legal and guarantee documents.
//!
//! A document is split into bounded clauses, every clause is evaluated
//! against every rule of a declarative rule set, and a final document-level
//! pass checks that the clauses agree with each other about amounts,
//! currencies and contract numbers.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same text and rules always produce the same verdicts
//! 2. **Pure**: no I/O in the core; the grammar service is an injected
//!    collaborator
//! 3. **Degradation-local**: a handler that cannot judge yields an N/A record
//!    for that clause only and never aborts the document
//! 4. **Traceable**: every verdict carries evidence text
//!
//! ## Example
//!
//! ```rust,ignore
//! use ampel_core::{evaluate_document, DisabledGrammarChecker, RuleSet};
//!
//! let rules = RuleSet::from_json_file("rules.json")?;
//! let report = evaluate_document(&text, &rules, &DisabledGrammarChecker);
//!
//! for clause in &report.clause_level {
//!     for eval in &clause.evaluations {
//!         println!("clause {} / {}: {}", clause.clause_number, eval.rule_id, eval.verdict);
//!     }
//! }
//! ```

pub mod consistency;
pub mod grammar;
pub mod handlers;
pub mod matching;
pub mod rules;
pub mod splitter;
pub mod types;

// Re-export main types at crate root
pub use grammar::{DisabledGrammarChecker, GrammarChecker, GrammarError};
pub use handlers::evaluate_rule;
pub use rules::{Patterns, Rule, RuleError, RuleSet, RuleType, Thresholds};
pub use splitter::{split_clauses, MAX_WORDS, MIN_WORDS};
pub use types::{
    ClauseEvaluation, DocumentCheck, DocumentEvaluation, RuleEvaluation, Verdict,
};

use chrono::Utc;

/// Evaluate a raw document: split into clauses, evaluate every clause
/// against every rule, then run the cross-clause consistency check.
///
/// This is the main entry point. Rule-set loading belongs to the host (see
/// [`RuleSet`]); a host without a grammar service passes
/// [`DisabledGrammarChecker`].
pub fn evaluate_document(
    text: &str,
    rules: &RuleSet,
    grammar: &dyn GrammarChecker,
) -> DocumentEvaluation {
    let clauses = splitter::split_clauses(text);
    evaluate_clauses(&clauses, rules, grammar)
}

/// Evaluate pre-split clauses.
///
/// Every rule yields exactly one record per clause, in rule-set order;
/// handlers that cannot judge degrade to N/A. The document-level section
/// always holds exactly one record: the cross-clause consistency check.
pub fn evaluate_clauses(
    clauses: &[String],
    rules: &RuleSet,
    grammar: &dyn GrammarChecker,
) -> DocumentEvaluation {
    let mut clause_level = Vec::with_capacity(clauses.len());
    let mut facts = Vec::with_capacity(clauses.len());

    for (index, clause_text) in clauses.iter().enumerate() {
        let evaluations = rules
            .iter()
            .map(|rule| {
                let (verdict, evidence) = handlers::evaluate_rule(clause_text, rule, grammar);
                RuleEvaluation {
                    rule_id: rule.id.clone(),
                    rule_name: rule.name.clone(),
                    verdict,
                    evidence,
                }
            })
            .collect();

        clause_level.push(ClauseEvaluation {
            clause_number: index + 1,
            clause_text: clause_text.clone(),
            evaluations,
        });
        facts.push(consistency::extract_facts(clause_text));
    }

    tracing::debug!(
        clauses = clause_level.len(),
        rules = rules.len(),
        "clause evaluation complete"
    );

    DocumentEvaluation {
        clause_level,
        document_level: vec![consistency::cross_clause_check(&facts)],
        evaluated_at: Utc::now(),
    }
}
