//! Rule-set configuration: parsing, structural validation, schema.

mod parser;
mod schema;

pub use parser::{Patterns, Rule, RuleError, RuleSet, RuleType, Thresholds};
pub use schema::validate_rules_schema;
