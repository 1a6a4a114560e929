//! Insight classification: ordered pattern rules, first match wins.
//!
//! The rule order *is* the tie-break policy. A sentence saying "the MPC
//! unanimously decided to hold, and the outlook stays benign" belongs to
//! policy_decisions, not market_outlook, purely because the policy rule is
//! tested first. Representing the rules as one ordered `(pattern, category)`
//! table keeps that policy explicit and testable instead of burying it in a
//! conditional chain.
//!
//! Rules test the *raw* lowercased sentence; only the catch-all fallback
//! looks at the cleaned form. Dedup is global and exact: a cleaned sentence
//! already present in any category is rejected outright.

use crate::output::{InsightCategory, InsightSet};
use once_cell::sync::Lazy;
use regex::Regex;

/// The ordered rule table. First match assigns the category.
static RULES: Lazy<Vec<(Regex, InsightCategory)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(
                r"\b(unanimously|decided|maintained|retained|raised|cut|reduced|stance)\b|repo rate|policy rate",
            )
            .unwrap(),
            InsightCategory::PolicyDecisions,
        ),
        (
            Regex::new(
                r"fy\d+|\bforecast|\bproject|\bestimat|expect\w*\b.*\bfy\b|\d+(?:\.\d+)?\s*(?:%|percent)\s*growth|growth of \d+",
            )
            .unwrap(),
            InsightCategory::Forecasts,
        ),
        (
            Regex::new(r"\boutlook\b|\bview\b|going forward|\bahead\b|\bfuture\b|\btrend|\btrajectory\b")
                .unwrap(),
            InsightCategory::MarketOutlook,
        ),
        (
            Regex::new(r"\bkey\b|\bimportant\b|\bsignificant\b|\bmajor\b|\bnotable\b|\bhighlight")
                .unwrap(),
            InsightCategory::ExecutiveSummary,
        ),
        (
            Regex::new(
                r"\blikely\b|\bwill\b|\bbelieves?\b|\bsuggests?\b|\bindicates?\b|\bshows?\b|\breveals?\b",
            )
            .unwrap(),
            InsightCategory::KeyFindings,
        ),
        (
            Regex::new(
                r"\d+(?:\.\d+)?\s*(?:%|percent\b|bps\b|basis points|crore\b|lakh\b|billion\b|million\b|trillion\b)|(?:₹|\$|rs\.|usd)\s*\d",
            )
            .unwrap(),
            InsightCategory::DataPoints,
        ),
        (
            Regex::new(r"\boverall\b|\bsummary\b|\btherefore\b|\bconclud|\bthus\b|\bhence\b|\bconsequently\b")
                .unwrap(),
            InsightCategory::Conclusions,
        ),
    ]
});

/// Generic analytical vocabulary for the key_findings catch-all.
const FALLBACK_TERMS: [&str; 6] = [
    "inflation",
    "growth",
    "economy",
    "market",
    "sector",
    "industry",
];

/// Assign a category, or `None` to discard the sentence.
///
/// `raw` drives the ordered rules (lowercased); `cleaned` drives the
/// catch-all length test and keyword scan, with `catchall_min_len` as the
/// minimum cleaned length for the catch-all to fire.
pub fn classify_sentence(
    raw: &str,
    cleaned: &str,
    catchall_min_len: usize,
) -> Option<InsightCategory> {
    let lower = raw.to_lowercase();
    for (pattern, category) in RULES.iter() {
        if pattern.is_match(&lower) {
            return Some(*category);
        }
    }

    let cleaned_lower = cleaned.to_lowercase();
    if cleaned.chars().count() > catchall_min_len
        && FALLBACK_TERMS.iter().any(|t| cleaned_lower.contains(t))
    {
        return Some(InsightCategory::KeyFindings);
    }

    None
}

/// Accumulates classified sentences for one document run.
///
/// Owns all its state; a fresh classifier is built per document, so nothing
/// here is shared between runs.
#[derive(Debug)]
pub struct InsightClassifier {
    cap: usize,
    catchall_min_len: usize,
    insights: InsightSet,
}

impl InsightClassifier {
    /// `cap` is the per-category maximum applied when the run finishes;
    /// `catchall_min_len` is the key_findings catch-all length threshold.
    pub fn new(cap: usize, catchall_min_len: usize) -> Self {
        Self {
            cap,
            catchall_min_len,
            insights: InsightSet::new(),
        }
    }

    /// Feed one surviving sentence (raw and cleaned forms) in document order.
    ///
    /// Returns the category assigned, or `None` when the sentence was a
    /// global duplicate or matched no rule.
    pub fn observe(&mut self, raw: &str, cleaned: &str) -> Option<InsightCategory> {
        if self.insights.contains(cleaned) {
            return None;
        }
        let category = classify_sentence(raw, cleaned, self.catchall_min_len)?;
        self.insights.bucket_mut(category).push(cleaned.to_string());
        Some(category)
    }

    /// Finish the run: truncate every category to its first `cap` entries
    /// (earliest in document order) and hand back the set.
    pub fn finish(mut self) -> InsightSet {
        for category in InsightCategory::ALL {
            self.insights.bucket_mut(category).truncate(self.cap);
        }
        self.insights
    }
}
