//! Evidence sampling: compress a document into a bounded high-signal excerpt.
//!
//! The external summarizer has an input-size budget; sending it a 60-page
//! report verbatim either fails or dilutes the analysis. The sampler walks
//! the document once, in order, keeping sentences that carry analytical
//! signal — financial vocabulary or numbers with units — until the cap is
//! hit. When a document is too sparse or unusual to yield enough signal, a
//! leading-sentences fallback guarantees the summarizer still receives
//! non-trivial context.
//!
//! Near-duplicate suppression uses a lowercased 120-character prefix key:
//! exact repeats (and boilerplate re-printed on every page) collapse, while
//! sentences that diverge after the prefix are kept. This is intentionally
//! looser than the classifier's exact-match dedup.

use crate::config::BriefingConfig;
use crate::pipeline::segment::{normalize_whitespace, sentences};
use std::collections::HashSet;
use tracing::debug;

/// Financial/analytical vocabulary that marks a sentence as high-signal.
const SIGNAL_KEYWORDS: [&str; 40] = [
    "retail",
    "sip",
    "flows",
    "inflows",
    "outflows",
    "earnings",
    "eps",
    "revenue",
    "margin",
    "guidance",
    "valuation",
    "multiple",
    "target price",
    "execution",
    "risk",
    "outlook",
    "growth",
    "demand",
    "capex",
    "order book",
    "market share",
    "profit",
    "ebitda",
    "liquidity",
    "inflation",
    "upgrade",
    "downgrade",
    "re-rating",
    "volume",
    "pricing",
    "yield",
    "allocation",
    "positioning",
    "sentiment",
    "consensus",
    "estimate",
    "dividend",
    "leverage",
    "balance sheet",
    "cash flow",
];

/// Unit and currency tokens; a digit co-occurring with any of these makes a
/// sentence high-signal even without keyword vocabulary.
const UNIT_TOKENS: [&str; 13] = [
    "%",
    "percent",
    "bps",
    "basis points",
    "₹",
    "rs.",
    "usd",
    "$",
    "crore",
    "lakh",
    "billion",
    "million",
    "trillion",
];

/// The sampler's result: a bullet pack plus how it was obtained.
#[derive(Debug, Clone)]
pub struct EvidencePack {
    /// One kept sentence per line, each prefixed "- ".
    pub bullets: String,
    /// Number of sentences kept.
    pub count: usize,
    /// True when too few high-signal sentences were found and the
    /// leading-sentences fallback was used instead.
    pub used_fallback: bool,
}

/// True when the sentence is worth the summarizer's budget.
fn is_high_signal(sentence: &str, min_len: usize) -> bool {
    if sentence.chars().count() < min_len {
        return false;
    }
    let lower = sentence.to_lowercase();
    if SIGNAL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return true;
    }
    lower.chars().any(|c| c.is_ascii_digit()) && UNIT_TOKENS.iter().any(|u| lower.contains(u))
}

/// Dedup key: the lowercased first 120 characters.
fn prefix_key(sentence: &str) -> String {
    sentence.chars().take(120).collect::<String>().to_lowercase()
}

/// Reduce the full document to a bounded, signal-ranked excerpt.
///
/// Walks sentences in document order, keeping the first `evidence_cap`
/// high-signal non-duplicates. If fewer than `evidence_floor` were kept,
/// the result is discarded in favour of the first `fallback_sentences`
/// sentences with length ≥ `fallback_min_len`.
pub fn sample_evidence(document: &str, config: &BriefingConfig) -> EvidencePack {
    let text = normalize_whitespace(document);

    let mut kept: Vec<&str> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for sentence in sentences(&text) {
        if kept.len() >= config.evidence_cap {
            break;
        }
        if !is_high_signal(sentence, config.evidence_min_len) {
            continue;
        }
        if !seen.insert(prefix_key(sentence)) {
            continue;
        }
        kept.push(sentence);
    }

    let used_fallback = kept.len() < config.evidence_floor;
    if used_fallback {
        debug!(
            kept = kept.len(),
            floor = config.evidence_floor,
            "too few high-signal sentences, using leading-sentences fallback"
        );
        kept = sentences(&text)
            .filter(|s| s.chars().count() >= config.fallback_min_len)
            .take(config.fallback_sentences)
            .collect();
    }

    let count = kept.len();
    let bullets = kept
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    EvidencePack {
        bullets,
        count,
        used_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BriefingConfig {
        BriefingConfig::default()
    }

    fn signal_sentence(i: usize) -> String {
        format!("Earnings momentum in segment {i} supports the valuation case this cycle.")
    }

    fn plain_sentence(i: usize) -> String {
        format!("The committee met again on day {i} and adjourned without further comment.")
    }

    #[test]
    fn keeps_exactly_the_high_signal_sentences_in_order() {
        let mut doc = String::new();
        for i in 0..200 {
            if i % 7 == 0 {
                // 29 signal sentences: just above the floor of 25.
                doc.push_str(&signal_sentence(i));
            } else {
                doc.push_str(&plain_sentence(i));
            }
            doc.push(' ');
        }

        let pack = sample_evidence(&doc, &config());
        assert!(!pack.used_fallback);
        assert_eq!(pack.count, 29);
        let lines: Vec<&str> = pack.bullets.lines().collect();
        assert!(lines.iter().all(|l| l.starts_with("- ")));
        assert!(lines[0].contains("segment 0"));
        assert!(lines[1].contains("segment 7"), "document order preserved");
    }

    #[test]
    fn digits_with_units_count_as_signal() {
        let s = "The benchmark index corrected by 850 points, a 3.2% fall over two sessions.";
        assert!(is_high_signal(s, 40));
    }

    #[test]
    fn short_sentences_are_never_signal() {
        assert!(!is_high_signal("Revenue rose 8%.", 40));
    }

    #[test]
    fn prefix_dedup_collapses_repeats_but_keeps_divergent_suffixes() {
        let repeated = signal_sentence(1);
        let mut divergent = "e".repeat(120);
        divergent.push_str(" earnings outlook differs here entirely.");
        let mut divergent2 = "e".repeat(120);
        divergent2.push_str(" but the margin story is different here.");

        let doc = format!("{repeated} {repeated} {divergent} {divergent2}");
        let pack = sample_evidence(&doc, &config());
        // repeated kept once; the two long sentences share a 120-char prefix
        // so only the first survives. Floor not met → fallback path.
        assert!(pack.used_fallback);

        let no_fallback = BriefingConfig::builder().evidence_floor(0).build().unwrap();
        let pack = sample_evidence(&doc, &no_fallback);
        assert_eq!(pack.count, 2);
    }

    #[test]
    fn sparse_document_falls_back_to_leading_sentences() {
        let mut doc = String::new();
        for i in 0..100 {
            doc.push_str(&plain_sentence(i));
            doc.push(' ');
        }
        let pack = sample_evidence(&doc, &config());
        assert!(pack.used_fallback);
        assert_eq!(pack.count, 80, "fallback takes the first 80 long-enough sentences");
        assert!(pack.bullets.lines().next().unwrap().contains("day 0"));
    }

    #[test]
    fn cap_bounds_the_pack() {
        let mut doc = String::new();
        for i in 0..300 {
            doc.push_str(&signal_sentence(i));
            doc.push(' ');
        }
        let pack = sample_evidence(&doc, &config());
        assert_eq!(pack.count, 140);
        assert!(!pack.used_fallback);
    }
}
