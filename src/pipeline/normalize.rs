//! Sentence normalization: make filtered sentences read well when spoken.
//!
//! Passes run in a fixed order. Citation and long-span removal happens before
//! empty-bracket deletion, so a citation stripped out of a parenthetical
//! leaves no `( )` shell behind; whitespace collapsing follows so the gaps
//! those passes leave are swallowed; the rewrite table runs before
//! capitalization so a sentence that gains an acronym at position zero still
//! gets its first letter fixed.
//!
//! The whole pass is a fixed point: normalizing already-normalized text
//! returns it unchanged. Tests rely on this.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_EMPTY_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\)|\[\s*\]").unwrap());
/// Bracketed spans with more than 100 interior characters are footnote or
/// citation noise, not content.
static RE_LONG_PAREN_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()]{101,}\)").unwrap());
static RE_LONG_SQUARE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\[\]]{101,}\]").unwrap());
/// Numeric bracket citations: `[3]`, `[12, 14-16]`.
static RE_NUMERIC_CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[\d,\s-]+\]").unwrap());
/// Parenthetical author-year citations: `(Smith et al., 2021a)`.
static RE_YEAR_CITATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([\w\s,\.]+\d{4}[a-z]?\)").unwrap());
static RE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Ordered domain-term rewrites. Each entry is applied as a literal substring
/// replace — both as written and with an upper-cased key — not as a
/// word-boundary match, so partial-word collisions are possible and accepted.
const DOMAIN_REWRITES: [(&str, &str); 10] = [
    ("the rbi has", "RBI has"),
    (" rbi ", " RBI "),
    (" gdp ", " GDP "),
    (" cpi ", " CPI "),
    (" fy ", " FY "),
    (" mpc ", " MPC "),
    (" ebitda ", " EBITDA "),
    (" eps ", " EPS "),
    (" ipo ", " IPO "),
    (" sebi ", " SEBI "),
];

/// Spoken-form expansions so abbreviations are narrated, not spelled.
/// Applied as written (the keys are already capitalised forms).
const SPEECH_REWRITES: [(&str, &str); 10] = [
    ("Dr.", "Doctor"),
    ("Mr.", "Mister"),
    ("Mrs.", "Missus"),
    ("Ms.", "Miss"),
    ("Prof.", "Professor"),
    ("etc.", "etcetera"),
    ("e.g.", "for example"),
    ("i.e.", "that is"),
    ("vs.", "versus"),
    ("Fig.", "Figure"),
];

/// Normalize one filtered sentence for classification and speech.
///
/// Passes, in order: delete over-long bracketed spans, numeric/author-year
/// citations, and bare URLs; delete empty bracket pairs (to a fixed point,
/// so shells left by the earlier deletions and nested empties both go);
/// collapse whitespace; apply the domain and speech rewrite tables; trim;
/// capitalize a lowercase first character.
///
/// Length acceptance (20–500 chars by default) is the caller's decision, not
/// this function's.
pub fn normalize(sentence: &str) -> String {
    let s = RE_LONG_PAREN_SPAN.replace_all(sentence, "");
    let s = RE_LONG_SQUARE_SPAN.replace_all(&s, "");
    let s = RE_NUMERIC_CITATION.replace_all(&s, "");
    let s = RE_YEAR_CITATION.replace_all(&s, "");
    let mut s = RE_URL.replace_all(&s, "").to_string();
    loop {
        let next = RE_EMPTY_BRACKETS.replace_all(&s, "").to_string();
        if next == s {
            break;
        }
        s = next;
    }
    let mut s = RE_WHITESPACE.replace_all(&s, " ").to_string();

    for (from, to) in DOMAIN_REWRITES {
        s = s.replace(from, to);
        let upper = from.to_uppercase();
        s = s.replace(&upper, to);
    }
    for (from, to) in SPEECH_REWRITES {
        s = s.replace(from, to);
    }

    capitalize_first(s.trim())
}

/// Upper-case the first character when it is lowercase; everything else is
/// left alone.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            let mut out = String::with_capacity(s.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_brackets_removed() {
        assert_eq!(
            normalize("growth () held steady in the period"),
            "Growth held steady in the period"
        );
    }

    #[test]
    fn long_bracketed_span_removed() {
        let noise = "x".repeat(120);
        let input = format!("inflation eased ({noise}) during the quarter");
        assert_eq!(normalize(&input), "Inflation eased during the quarter");
    }

    #[test]
    fn hundred_char_span_kept() {
        let interior = "y".repeat(100);
        let input = format!("inflation eased ({interior}) during the quarter");
        assert!(normalize(&input).contains(&interior));
    }

    #[test]
    fn citation_inside_parentheses_leaves_no_shell() {
        assert_eq!(
            normalize("Growth recovered ( [12] ) strongly in the quarter under review."),
            "Growth recovered strongly in the quarter under review."
        );
        // Nested empty pairs collapse fully in one call.
        assert_eq!(
            normalize("demand held ( [] ) firm through the half"),
            "Demand held firm through the half"
        );
    }

    #[test]
    fn citations_and_urls_removed() {
        assert_eq!(
            normalize("demand recovered [12, 14] as shown (Rao et al. 2023a) at https://example.com/r.pdf today"),
            "Demand recovered as shown at today"
        );
    }

    #[test]
    fn domain_rewrites_apply_with_uppercase_variant() {
        assert_eq!(
            normalize("the rbi has cut the rate while gdp held firm"),
            "RBI has cut the rate while GDP held firm"
        );
        assert_eq!(
            normalize("THE RBI HAS cut the rate"),
            "RBI has cut the rate"
        );
    }

    #[test]
    fn already_capitalized_source_left_intact() {
        // "The RBI has" matches neither the lowercase nor the upper-cased key.
        assert_eq!(
            normalize("The RBI has maintained the repo rate at 6.5%."),
            "The RBI has maintained the repo rate at 6.5%."
        );
    }

    #[test]
    fn speech_abbreviations_expanded() {
        assert_eq!(
            normalize("Dr. Rao argued, e.g. in the annexure, that demand is firm"),
            "Doctor Rao argued, for example in the annexure, that demand is firm"
        );
    }

    #[test]
    fn first_letter_capitalized() {
        assert_eq!(normalize("margins improved sharply"), "Margins improved sharply");
        assert_eq!(normalize("₹500 crore was deployed"), "₹500 crore was deployed");
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "the rbi has cut rates () while gdp [3] held https://x.y firm",
            "Dr. Rao expects e.g. stronger fy26 earnings  with   gaps",
            "Already clean sentence with RBI and GDP mentioned.",
            "Growth recovered ( [12] ) strongly in the quarter under review.",
            "margins held ( ( [] ) ) up despite input costs",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not a fixed point for {input:?}");
        }
    }
}
