//! `ampel` — clause screening for legal and guarantee documents.
//!
//! Thin orchestration around `ampel-core`: read a document, load and
//! validate a rule set, evaluate, write a JSON report. All screening logic
//! lives in the core crate.

mod languagetool;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ampel_core::{
    evaluate_document, rules::validate_rules_schema, DisabledGrammarChecker, DocumentEvaluation,
    GrammarChecker, RuleSet, Verdict,
};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::languagetool::LanguageToolClient;

#[derive(Parser, Debug)]
#[command(
    name = "ampel",
    about = "Screen contract clauses against a declarative rule set",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a document into clauses and evaluate every clause
    Evaluate(EvaluateArgs),
    /// Split a document into clauses and print them
    Split {
        /// Path to the document text file
        file: PathBuf,
    },
    /// Validate a rule file (JSON) against the embedded schema
    ValidateRules {
        /// Path to the rule file
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Path to the document text file
    file: PathBuf,

    /// Path to the rule set (JSON or YAML)
    #[arg(long)]
    rules: PathBuf,

    /// Directory the evaluation report is written to
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Base URL of a LanguageTool server, e.g. http://localhost:8010.
    /// Without it, grammar_count rules report N/A.
    #[arg(long)]
    languagetool_url: Option<String>,

    /// Language code passed to the grammar service
    #[arg(long, default_value = "en-US")]
    language: String,

    /// Per-request grammar check timeout in seconds
    #[arg(long, default_value_t = 10)]
    grammar_timeout: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Evaluate(args) => evaluate(args),
        Command::Split { file } => split(&file),
        Command::ValidateRules { file } => validate_rules(&file),
    }
}

fn evaluate(args: EvaluateArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read document '{}'", args.file.display()))?;
    let rules = RuleSet::from_path(&args.rules)
        .with_context(|| format!("failed to load rules from '{}'", args.rules.display()))?;

    let grammar: Box<dyn GrammarChecker> = match &args.languagetool_url {
        Some(url) => Box::new(
            LanguageToolClient::new(
                url.clone(),
                args.language.clone(),
                Duration::from_secs(args.grammar_timeout),
            )
            .with_context(|| format!("failed to set up grammar client for '{url}'"))?,
        ),
        None => Box::new(DisabledGrammarChecker),
    };

    let report = evaluate_document(&text, &rules, grammar.as_ref());
    info!(
        clauses = report.clause_level.len(),
        rules = rules.len(),
        "evaluation complete"
    );

    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create output directory '{}'", args.output.display()))?;
    let out_path = args.output.join(report_file_name(&args.file));
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&out_path, json)
        .with_context(|| format!("failed to write report to '{}'", out_path.display()))?;

    println!("Evaluation complete. Results saved to '{}'", out_path.display());
    print_summary(&report);
    Ok(())
}

fn split(file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read document '{}'", file.display()))?;

    let clauses = ampel_core::split_clauses(&text);
    for (i, clause) in clauses.iter().enumerate() {
        println!(
            "{}: [{} words] {}",
            i + 1,
            clause.split_whitespace().count(),
            clause
        );
    }
    println!("TOTAL clauses: {}", clauses.len());
    Ok(())
}

fn validate_rules(file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read rule file '{}'", file.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| "rule file is not valid JSON")?;

    if let Err(errors) = validate_rules_schema(&value) {
        for error in &errors {
            eprintln!("schema violation: {error}");
        }
        bail!(
            "rule file '{}' failed schema validation with {} error(s)",
            file.display(),
            errors.len()
        );
    }

    let rules = RuleSet::from_json(&raw)
        .with_context(|| format!("rule file '{}' failed structural validation", file.display()))?;
    println!("OK: {} rules validated", rules.len());
    Ok(())
}

/// `contract.txt` -> `contract_evaluation.json`, matching the report naming
/// downstream tooling expects.
fn report_file_name(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    PathBuf::from(format!("{stem}_evaluation.json"))
}

fn print_summary(report: &DocumentEvaluation) {
    let mut green = 0usize;
    let mut yellow = 0usize;
    let mut red = 0usize;
    let mut na = 0usize;

    let clause_verdicts = report
        .clause_level
        .iter()
        .flat_map(|c| c.evaluations.iter().map(|e| e.verdict));
    let document_verdicts = report.document_level.iter().map(|c| c.verdict);

    for verdict in clause_verdicts.chain(document_verdicts) {
        match verdict {
            Verdict::Green => green += 1,
            Verdict::Yellow => yellow += 1,
            Verdict::Red => red += 1,
            Verdict::NotApplicable => na += 1,
        }
    }

    println!("Verdicts: {green} GREEN, {yellow} YELLOW, {red} RED, {na} N/A");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_file_name_appends_suffix() {
        assert_eq!(
            report_file_name(Path::new("/tmp/docs/contract.txt")),
            PathBuf::from("contract_evaluation.json")
        );
        assert_eq!(
            report_file_name(Path::new("no_extension")),
            PathBuf::from("no_extension_evaluation.json")
        );
    }
}
