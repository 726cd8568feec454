//! Clause splitting for legal and guarantee documents.
//!
//! Turns raw document text (OCR output included: mixed line endings,
//! irregular spacing) into an ordered sequence of clause strings within
//! word-count bounds. Four stages, each feeding the next:
//!
//! | Stage | What it does |
//! |-------|--------------|
//! | Normalize | `\r\n` → `\n`, collapse runs of spaces/tabs, trim |
//! | Marker injection | insert `¶` before every clause-boundary marker |
//! | First-pass split | cut on `¶` or runs of 2+ newlines |
//! | Oversize handling | repack too-long candidates along sentence boundaries |
//!
//! Candidates below [`MIN_WORDS`] after all splitting are discarded, never
//! merged back. The result is a pure function of the input text.

use lazy_static::lazy_static;
use regex::Regex;

/// Maximum words per clause.
pub const MAX_WORDS: usize = 150;

/// Minimum words for a clause to be kept.
pub const MIN_WORDS: usize = 20;

lazy_static! {
    /// Clause-boundary markers: numbered-list heads, section references and
    /// guarantee boilerplate phrases in German and English. Combined into one
    /// case-insensitive alternation so the leftmost match wins and list order
    /// breaks same-position ties.
    static ref MARKER_RE: Regex = {
        const MARKERS: &[&str] = &[
            r"\n\s*\d+\.",                      // numbered list " 1."
            r"§\s*\d+",                         // § 770
            r"Wir verpflichten uns",
            r"Wir verzichten",
            r"Auf die Einreden",
            r"Diese Bürgschaft ist unbefristet",
            r"Diese Bürgschaft erlischt",
            r"Gerichtsstand ist",
            r"unterliegt dem",
            r"Sollte eine Bestimmung",
            r"We undertake to",
            r"We waive",
            r"This guarantee (?:shall|expires)",
        ];
        Regex::new(&format!("(?i)(?:{})", MARKERS.join("|"))).unwrap()
    };

    /// First-pass boundary: the injected delimiter or a hard break (2+
    /// consecutive newlines).
    static ref SPLIT_RE: Regex = Regex::new(r"¶|\n{2,}").unwrap();

    /// Sentence boundary: terminal punctuation followed by whitespace.
    static ref SENTENCE_RE: Regex = Regex::new(r"[.!?]\s+").unwrap();

    /// Runs of horizontal whitespace.
    static ref HSPACE_RE: Regex = Regex::new(r"[ \t]+").unwrap();
}

/// Number of whitespace-separated words in `text`.
fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Standardize line endings and horizontal whitespace.
fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    HSPACE_RE.replace_all(&unified, " ").trim().to_string()
}

/// Insert the delimiter immediately before every clause-boundary marker.
fn inject_delimiters(text: &str) -> String {
    MARKER_RE.replace_all(text, "¶${0}").into_owned()
}

/// Split `block` after `.`, `!` or `?` followed by whitespace.
///
/// The cut lands right after the punctuation character, so the whitespace
/// itself is consumed and each piece comes back trimmed.
fn split_sentences(block: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_RE.find_iter(block) {
        let cut = boundary.start() + 1;
        let sentence = block[start..cut].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = boundary.end();
    }

    let tail = block[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Break an oversized candidate into sentence groups that respect
/// `max_words`, packing greedily: a sentence that would push the current
/// group over the cap closes the group and starts the next one. A single
/// sentence longer than the cap is emitted on its own; the cap is
/// best-effort for pathological input.
fn split_oversize(block: &str, max_words: usize) -> Vec<String> {
    if word_count(block) <= max_words {
        return vec![block.to_string()];
    }

    let mut out = Vec::new();
    let mut buf = String::new();

    for sentence in split_sentences(block) {
        if word_count(&buf) + word_count(sentence) > max_words {
            if !buf.is_empty() {
                out.push(std::mem::take(&mut buf));
            }
            buf.push_str(sentence);
        } else if buf.is_empty() {
            buf.push_str(sentence);
        } else {
            buf.push(' ');
            buf.push_str(sentence);
        }
    }
    if !buf.is_empty() {
        out.push(buf);
    }

    out
}

/// Split `text` into clauses with the default word-count bounds.
///
/// Empty or whitespace-only input yields an empty vector: an explicit no-op
/// outcome, not an error.
pub fn split_clauses(text: &str) -> Vec<String> {
    split_clauses_bounded(text, MIN_WORDS, MAX_WORDS)
}

/// Split with explicit word-count bounds.
pub fn split_clauses_bounded(text: &str, min_words: usize, max_words: usize) -> Vec<String> {
    if text.trim().is_empty() {
        tracing::debug!("document skipped: no text");
        return Vec::new();
    }

    let marked = inject_delimiters(&normalize(text));

    let first_pass: Vec<&str> = SPLIT_RE
        .split(&marked)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();
    tracing::debug!(pieces = first_pass.len(), "first-pass split");

    let mut clauses = Vec::new();
    for piece in first_pass {
        for chunk in split_oversize(piece, max_words) {
            let words = word_count(&chunk);
            if words >= min_words {
                tracing::debug!(clause = clauses.len() + 1, words, "kept clause");
                clauses.push(chunk);
            }
        }
    }

    tracing::debug!(total = clauses.len(), "clause split complete");
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// `count` distinct filler words joined by single spaces.
    fn words(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn empty_input_yields_no_clauses() {
        assert!(split_clauses("").is_empty());
        assert!(split_clauses("   \n\t  \n").is_empty());
    }

    #[test]
    fn short_input_is_discarded() {
        assert!(split_clauses("Too short to keep.").is_empty());
    }

    #[test]
    fn marker_free_document_within_bounds_is_one_clause() {
        let text = words(MAX_WORDS);
        let clauses = split_clauses(&text);
        assert_eq!(clauses, vec![text]);
    }

    #[test]
    fn normalization_collapses_spacing_and_line_endings() {
        let text = format!("{}  \t {}\r\nand more", words(30), words(5));
        let clauses = split_clauses(&text);
        assert_eq!(clauses.len(), 1);
        assert!(!clauses[0].contains("  "));
        assert!(!clauses[0].contains('\r'));
    }

    #[test]
    fn hard_break_splits_paragraphs() {
        let text = format!("{}\n\n{}", words(25), words(25));
        let clauses = split_clauses(&text);
        assert_eq!(clauses.len(), 2);
    }

    #[test]
    fn boilerplate_marker_forces_a_split_mid_paragraph() {
        let lead = words(25);
        let tail = words(24);
        let text = format!("{lead} Wir verpflichten uns {tail}");

        let marked = inject_delimiters(&normalize(&text));
        assert!(marked.contains("¶Wir verpflichten uns"));

        let clauses = split_clauses(&text);
        assert_eq!(clauses.len(), 2);
        assert!(clauses[1].starts_with("Wir verpflichten uns"));
    }

    #[test]
    fn marker_matching_is_case_insensitive() {
        let text = format!("{} WIR VERZICHTEN {}", words(25), words(24));
        assert_eq!(split_clauses(&text).len(), 2);
    }

    #[test]
    fn section_symbol_is_a_marker() {
        let text = format!("{} § 770 Abs. 2 BGB {}", words(25), words(22));
        assert_eq!(split_clauses(&text).len(), 2);
    }

    #[test]
    fn numbered_list_heads_split_on_their_own_lines() {
        let text = format!("{}\n1. {}\n2. {}", words(25), words(25), words(25));
        assert_eq!(split_clauses(&text).len(), 3);
    }

    #[test]
    fn undersized_fragment_after_marker_is_dropped() {
        let text = format!("{} Gerichtsstand ist Berlin.", words(30));
        let clauses = split_clauses(&text);
        assert_eq!(clauses.len(), 1);
        assert!(!clauses[0].contains("Gerichtsstand"));
    }

    #[test]
    fn oversized_candidate_is_repacked_along_sentences() {
        // Four 50-word sentences: 200 words total forces a repack into
        // 150 + 50.
        let sentence = format!("{}.", words(50));
        let text = format!("{s} {s} {s} {s}", s = sentence);

        let clauses = split_clauses(&text);
        assert_eq!(clauses.len(), 2);
        assert_eq!(word_count(&clauses[0]), 150);
        assert_eq!(word_count(&clauses[1]), 50);
    }

    #[test]
    fn single_overlong_sentence_is_emitted_as_is() {
        let long = format!("{} end.", words(MAX_WORDS + 40));
        let clauses = split_clauses(&long);
        assert_eq!(clauses.len(), 1);
        assert!(word_count(&clauses[0]) > MAX_WORDS);
    }

    #[test]
    fn overlong_sentence_does_not_absorb_following_sentences() {
        let long = format!("{}.", words(200));
        let short = format!("{}.", words(40));
        let clauses = split_clauses(&format!("{long} {short}"));
        assert_eq!(clauses.len(), 2);
        assert_eq!(word_count(&clauses[1]), 40);
    }

    #[test]
    fn sentence_splitting_handles_all_terminators() {
        let block = "One piece here. Another piece! A third piece? The tail";
        let sentences = split_sentences(block);
        assert_eq!(
            sentences,
            vec![
                "One piece here.",
                "Another piece!",
                "A third piece?",
                "The tail"
            ]
        );
    }

    #[test]
    fn guarantee_document_end_to_end() {
        let text = "\
Zwischen Ihnen und der Firma wurde am 24.06.2024 ein Vertrag über die \
Lieferung einer Niederspannungsschaltanlage zum Gesamtpreis von 388.269,00 \
geschlossen und der Auftraggeber hat sich verpflichtet eine Anzahlung zu \
leisten für die der Auftragnehmer eine Bürgschaft zu stellen hat. \
Wir verpflichten uns, jeden Betrag bis zur Gesamthöhe von 40.000,00 auf \
schriftliche Anforderung an den Auftraggeber zu zahlen, sofern der \
Auftraggeber uns schriftlich bestätigt, dass der Auftragnehmer seine \
vertraglichen Verpflichtungen nicht erbracht hat.";

        let clauses = split_clauses(text);
        assert_eq!(clauses.len(), 2);
        assert!(clauses[0].starts_with("Zwischen Ihnen"));
        assert!(clauses[1].starts_with("Wir verpflichten uns"));
    }

    proptest! {
        #[test]
        fn splitting_is_idempotent(text in "[a-zA-Z0-9 .,!?\n]{0,500}") {
            prop_assert_eq!(split_clauses(&text), split_clauses(&text));
        }

        #[test]
        fn kept_clauses_meet_the_minimum(text in "[a-zA-Z0-9 .,!?\n§]{0,500}") {
            for clause in split_clauses(&text) {
                prop_assert!(word_count(&clause) >= MIN_WORDS);
            }
        }

        #[test]
        fn only_single_sentences_may_exceed_the_maximum(
            text in "[a-zA-Z0-9 .,!?\n]{0,800}"
        ) {
            for clause in split_clauses(&text) {
                prop_assert!(
                    word_count(&clause) <= MAX_WORDS
                        || split_sentences(&clause).len() == 1
                );
            }
        }
    }
}
