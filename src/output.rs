//! Output types: categorized insights, the LLM briefing schema, and run stats.
//!
//! Everything here is plain serialisable data. [`InsightSet`] is the result of
//! the rule-based classifier; [`MarketBriefing`] is the JSON contract with the
//! external summarizer, written defensively so a sloppy model reply degrades
//! to safe defaults instead of failing the document.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

// ── Insight categories ───────────────────────────────────────────────────

/// The seven fixed semantic buckets a sentence can be sorted into.
///
/// The variant order here is the presentation order (it is also the field
/// order of [`InsightSet`]); the classifier's *rule* order is a separate,
/// deliberate tie-break policy defined in the classifier itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    ExecutiveSummary,
    KeyFindings,
    DataPoints,
    MarketOutlook,
    PolicyDecisions,
    Forecasts,
    Conclusions,
}

impl InsightCategory {
    /// All categories in presentation order.
    pub const ALL: [InsightCategory; 7] = [
        InsightCategory::ExecutiveSummary,
        InsightCategory::KeyFindings,
        InsightCategory::DataPoints,
        InsightCategory::MarketOutlook,
        InsightCategory::PolicyDecisions,
        InsightCategory::Forecasts,
        InsightCategory::Conclusions,
    ];

    /// Snake-case identifier used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::ExecutiveSummary => "executive_summary",
            InsightCategory::KeyFindings => "key_findings",
            InsightCategory::DataPoints => "data_points",
            InsightCategory::MarketOutlook => "market_outlook",
            InsightCategory::PolicyDecisions => "policy_decisions",
            InsightCategory::Forecasts => "forecasts",
            InsightCategory::Conclusions => "conclusions",
        }
    }

    /// Human heading, used when the category is spoken aloud in the script.
    pub fn spoken_label(&self) -> &'static str {
        match self {
            InsightCategory::ExecutiveSummary => "Executive summary",
            InsightCategory::KeyFindings => "Key findings",
            InsightCategory::DataPoints => "Data points",
            InsightCategory::MarketOutlook => "Market outlook",
            InsightCategory::PolicyDecisions => "Policy decisions",
            InsightCategory::Forecasts => "Forecasts",
            InsightCategory::Conclusions => "Conclusions",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cleaned sentences sorted into categories, insertion order = document order.
///
/// Invariant (enforced by the classifier): a given cleaned sentence appears in
/// at most one bucket, and no bucket exceeds the configured cap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightSet {
    pub executive_summary: Vec<String>,
    pub key_findings: Vec<String>,
    pub data_points: Vec<String>,
    pub market_outlook: Vec<String>,
    pub policy_decisions: Vec<String>,
    pub forecasts: Vec<String>,
    pub conclusions: Vec<String>,
}

impl InsightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sentences in one category, document order.
    pub fn bucket(&self, category: InsightCategory) -> &[String] {
        match category {
            InsightCategory::ExecutiveSummary => &self.executive_summary,
            InsightCategory::KeyFindings => &self.key_findings,
            InsightCategory::DataPoints => &self.data_points,
            InsightCategory::MarketOutlook => &self.market_outlook,
            InsightCategory::PolicyDecisions => &self.policy_decisions,
            InsightCategory::Forecasts => &self.forecasts,
            InsightCategory::Conclusions => &self.conclusions,
        }
    }

    pub(crate) fn bucket_mut(&mut self, category: InsightCategory) -> &mut Vec<String> {
        match category {
            InsightCategory::ExecutiveSummary => &mut self.executive_summary,
            InsightCategory::KeyFindings => &mut self.key_findings,
            InsightCategory::DataPoints => &mut self.data_points,
            InsightCategory::MarketOutlook => &mut self.market_outlook,
            InsightCategory::PolicyDecisions => &mut self.policy_decisions,
            InsightCategory::Forecasts => &mut self.forecasts,
            InsightCategory::Conclusions => &mut self.conclusions,
        }
    }

    /// Exact-match membership test across every bucket (the global dedup rule).
    pub fn contains(&self, sentence: &str) -> bool {
        InsightCategory::ALL
            .iter()
            .any(|c| self.bucket(*c).iter().any(|s| s == sentence))
    }

    /// Iterate `(category, sentences)` pairs in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (InsightCategory, &[String])> {
        InsightCategory::ALL.iter().map(move |c| (*c, self.bucket(*c)))
    }

    /// Total sentences across all categories.
    pub fn len(&self) -> usize {
        InsightCategory::ALL.iter().map(|c| self.bucket(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── LLM briefing schema ──────────────────────────────────────────────────

/// Three-level risk grade used throughout the vulnerability assessment.
///
/// Deserialisation is forgiving: any string the model invents that is not
/// recognisably "low" or "high" collapses to `Moderate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RiskLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer).unwrap_or_default();
        Ok(match raw.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "high" => RiskLevel::High,
            _ => RiskLevel::Moderate,
        })
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        })
    }
}

fn default_score() -> u8 {
    5
}

/// Accept any JSON number for the 0–10 score; clamp, and fall back to 5 on
/// anything that is not a number.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer).unwrap_or(serde_json::Value::Null);
    Ok(value
        .as_f64()
        .map(|n| n.round().clamp(0.0, 10.0) as u8)
        .unwrap_or(5))
}

/// The market-vulnerability block of a [`MarketBriefing`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityAssessment {
    pub earnings_risk_level: RiskLevel,
    pub valuation_compression_risk: RiskLevel,
    pub flow_sensitivity_risk: RiskLevel,
    /// Overall 0–10 vulnerability score; 5 when the model omits it.
    #[serde(deserialize_with = "deserialize_score")]
    pub overall_vulnerability_score: u8,
}

impl Default for VulnerabilityAssessment {
    fn default() -> Self {
        Self {
            earnings_risk_level: RiskLevel::Moderate,
            valuation_compression_risk: RiskLevel::Moderate,
            flow_sensitivity_risk: RiskLevel::Moderate,
            overall_vulnerability_score: default_score(),
        }
    }
}

/// Structured analytical briefing returned by the external summarizer.
///
/// Every field carries a serde default: a missing field is never an error,
/// only missing analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketBriefing {
    /// One-paragraph central thesis of the report.
    pub central_thesis: String,
    /// Where consensus estimates or valuations are likely to reset.
    pub estimate_valuation_reset: Vec<String>,
    /// Structural/execution risks, each prefixed "Elevated:"/"Moderate:"/"Contained:".
    pub structural_execution_risk: Vec<String>,
    pub market_vulnerability_assessment: VulnerabilityAssessment,
    /// Recommended positioning, one sentence.
    pub strategic_investment_stance: String,
    /// Narration-ready script for the audio rendering.
    pub audio_script: String,
}

// ── Stats & final output ─────────────────────────────────────────────────

/// Statistics about one briefing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BriefingStats {
    /// Pages the extractor reported.
    pub page_count: usize,
    /// Characters of joined document text.
    pub raw_chars: usize,
    /// Candidate sentences produced by segmentation.
    pub sentences_segmented: usize,
    /// Sentences that survived filtering and normalization.
    pub sentences_kept: usize,
    /// Sentences placed into a category (post-dedup, post-cap).
    pub sentences_classified: usize,
    /// Sentences in the evidence pack.
    pub evidence_sentences: usize,
    /// True when the evidence sampler used the leading-sentences fallback.
    pub used_evidence_fallback: bool,
    /// Characters in the final narration script.
    pub script_chars: usize,
    pub extract_duration_ms: u64,
    pub classify_duration_ms: u64,
    pub llm_duration_ms: u64,
    pub tts_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Everything a briefing run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BriefingOutput {
    /// The narration script that was (or would be) spoken.
    pub script: String,
    /// Rule-classified insight sentences.
    pub insights: InsightSet,
    /// The bullet-formatted evidence pack handed to the summarizer.
    pub evidence: String,
    /// LLM briefing, present only when summarization ran.
    pub briefing: Option<MarketBriefing>,
    /// Path of the rendered audio file, present only when TTS ran.
    pub audio_path: Option<PathBuf>,
    pub stats: BriefingStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insight_set_global_contains() {
        let mut set = InsightSet::new();
        set.bucket_mut(InsightCategory::Forecasts)
            .push("GDP growth of 7% is expected in FY26.".to_string());
        assert!(set.contains("GDP growth of 7% is expected in FY26."));
        assert!(!set.contains("Something else."));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn categories_serialize_snake_case() {
        let json = serde_json::to_string(&InsightCategory::PolicyDecisions).unwrap();
        assert_eq!(json, "\"policy_decisions\"");
    }

    #[test]
    fn briefing_defaults_on_missing_fields() {
        let briefing: MarketBriefing = serde_json::from_str("{}").unwrap();
        assert!(briefing.central_thesis.is_empty());
        assert!(briefing.estimate_valuation_reset.is_empty());
        assert_eq!(
            briefing.market_vulnerability_assessment.earnings_risk_level,
            RiskLevel::Moderate
        );
        assert_eq!(
            briefing
                .market_vulnerability_assessment
                .overall_vulnerability_score,
            5
        );
    }

    #[test]
    fn risk_level_tolerates_model_inventions() {
        let parsed: RiskLevel = serde_json::from_str("\"LOW\"").unwrap();
        assert_eq!(parsed, RiskLevel::Low);
        let parsed: RiskLevel = serde_json::from_str("\"catastrophic\"").unwrap();
        assert_eq!(parsed, RiskLevel::Moderate);
    }

    #[test]
    fn score_clamps_and_defaults() {
        let v: VulnerabilityAssessment =
            serde_json::from_str(r#"{"overall_vulnerability_score": 14}"#).unwrap();
        assert_eq!(v.overall_vulnerability_score, 10);
        let v: VulnerabilityAssessment =
            serde_json::from_str(r#"{"overall_vulnerability_score": "severe"}"#).unwrap();
        assert_eq!(v.overall_vulnerability_score, 5);
    }
}
