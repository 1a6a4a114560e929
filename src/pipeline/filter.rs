//! Sentence filtering: reject disclaimer boilerplate and collapsed tables.
//!
//! Research-report PDFs end with pages of legal text, and their tables
//! frequently collapse into a single "sentence" of dense numbers. Two
//! independent predicates catch each pattern; a sentence must pass both.
//! Neither predicate runs until a cheap minimum-length check has passed.

use crate::config::BriefingConfig;

/// Disclaimer vocabulary. One incidental hit is tolerated — only clusters of
/// this language mark a sentence as boilerplate.
const DISCLAIMER_KEYWORDS: [&str; 6] = [
    "registered office",
    "compliance officer",
    "sebi registration",
    "all rights reserved",
    "copyright",
    "reproduction",
];

/// True when the sentence reads like legal/disclaimer boilerplate.
///
/// Counts case-insensitive substring occurrences of the disclaimer keywords;
/// `threshold` or more hits rejects the sentence. A single "copyright" inside
/// a quoted clause stays.
pub fn is_boilerplate(sentence: &str, threshold: usize) -> bool {
    let lower = sentence.to_lowercase();
    let hits: usize = DISCLAIMER_KEYWORDS
        .iter()
        .map(|kw| lower.matches(kw).count())
        .sum();
    hits >= threshold
}

/// True when the sentence looks like a table that collapsed into prose.
///
/// Three independent heuristics, any of which rejects:
/// - longer than `max_sentence_chars` characters,
/// - more than `max_digit_chars` digit characters in total,
/// - a run of `numeric_run_len` space-separated purely numeric tokens.
pub fn is_table_garbage(sentence: &str, config: &BriefingConfig) -> bool {
    if sentence.chars().count() > config.max_sentence_chars {
        return true;
    }
    let digits = sentence.chars().filter(|c| c.is_ascii_digit()).count();
    if digits > config.max_digit_chars {
        return true;
    }
    has_numeric_run(sentence, config.numeric_run_len)
}

/// Detects `run_len` consecutive whitespace-separated numeric tokens.
fn has_numeric_run(sentence: &str, run_len: usize) -> bool {
    let mut streak = 0usize;
    for token in sentence.split_whitespace() {
        if is_numeric_token(token) {
            streak += 1;
            if streak >= run_len {
                return true;
            }
        } else {
            streak = 0;
        }
    }
    false
}

/// A purely numeric token: digits with optional decimal point, thousands
/// comma, or sign. "6.5", "1,240", "-12" qualify; "6.5%" does not — a unit
/// suffix means the token carries prose meaning.
fn is_numeric_token(token: &str) -> bool {
    !token.is_empty()
        && token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',' || c == '-')
}

/// The combined per-sentence gate applied before normalization.
///
/// Minimum raw length first (cheap short-circuit), then both predicates.
pub fn keep_sentence(sentence: &str, config: &BriefingConfig) -> bool {
    if sentence.chars().count() < config.min_raw_len {
        return false;
    }
    !is_boilerplate(sentence, config.boilerplate_threshold)
        && !is_table_garbage(sentence, config)
}
