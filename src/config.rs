//! Configuration types for PDF-to-briefing conversion.
//!
//! All behaviour is controlled through [`BriefingConfig`], built via its
//! [`BriefingConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across threads, serialise them for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! Historically each TTS backend and each filter threshold lived in its own
//! near-identical pipeline variant. They are all plain data here: one core,
//! many configs.

use crate::error::BriefError;
use serde::{Deserialize, Serialize};

/// Configuration for turning one PDF into a briefing.
///
/// Built via [`BriefingConfig::builder()`] or using
/// [`BriefingConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2brief::BriefingConfig;
///
/// let config = BriefingConfig::builder()
///     .voice("en-US-AriaNeural")
///     .category_cap(10)
///     .summarize(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct BriefingConfig {
    // ── Sentence filter thresholds ───────────────────────────────────────
    /// Minimum raw sentence length before the filter predicates even run. Default: 25.
    ///
    /// Anything shorter is a heading fragment, page number, or stray token —
    /// rejecting on length first avoids paying for the keyword scans.
    pub min_raw_len: usize,

    /// Number of disclaimer-keyword hits that marks a sentence as boilerplate. Default: 2.
    ///
    /// A single incidental "copyright" inside a quoted clause must not discard
    /// an otherwise useful sentence; only clusters of disclaimer language are
    /// legal boilerplate.
    pub boilerplate_threshold: usize,

    /// Maximum raw sentence length before it is treated as a collapsed table. Default: 400.
    pub max_sentence_chars: usize,

    /// Maximum digit characters a sentence may contain. Default: 25.
    ///
    /// PDF table cells frequently collapse into one "sentence" of dense
    /// numbers; real data-bearing prose stays well under this.
    pub max_digit_chars: usize,

    /// Length of a space-separated run of purely numeric tokens that marks a
    /// tabular fragment. Default: 5.
    pub numeric_run_len: usize,

    // ── Normalizer output bounds ─────────────────────────────────────────
    /// Minimum cleaned sentence length to keep. Default: 20.
    pub min_clean_len: usize,

    /// Maximum cleaned sentence length to keep. Default: 500.
    pub max_clean_len: usize,

    // ── Classifier ───────────────────────────────────────────────────────
    /// Maximum sentences retained per insight category (document order). Default: 15.
    pub category_cap: usize,

    /// Minimum cleaned length for the key_findings catch-all rule. Default: 40.
    ///
    /// Sentences that match no ordered rule only reach key_findings when
    /// they carry this much cleaned text plus a generic analytical term.
    pub catchall_min_len: usize,

    // ── Evidence sampler ─────────────────────────────────────────────────
    /// Minimum sentence length for the high-signal test. Default: 40.
    pub evidence_min_len: usize,

    /// Maximum sentences in the evidence pack. Default: 140.
    pub evidence_cap: usize,

    /// If fewer than this many sentences qualify, the fallback kicks in. Default: 25.
    ///
    /// The downstream summarizer must always receive non-trivial context,
    /// even for sparse or unusual documents.
    pub evidence_floor: usize,

    /// Fallback: take the first N sentences of the document. Default: 80.
    pub fallback_sentences: usize,

    /// Fallback: minimum sentence length to include. Default: 30.
    pub fallback_min_len: usize,

    // ── Document bounds ──────────────────────────────────────────────────
    /// Fewer extracted characters than this is "no text found". Default: 10.
    pub min_document_chars: usize,

    /// Maximum characters in the assembled narration script. Default: 50 000.
    ///
    /// Roughly 10–15 pages of speech; anything longer makes the TTS call
    /// time out and produces audio nobody listens to the end of.
    pub max_script_chars: usize,

    // ── LLM summarizer ───────────────────────────────────────────────────
    /// Run the LLM synthesis step (evidence pack → structured briefing). Default: false.
    pub summarize: bool,

    /// OpenAI-compatible chat-completions base URL.
    /// If None, uses `PDF2BRIEF_LLM_ENDPOINT` or `https://api.openai.com/v1`.
    pub llm_endpoint: Option<String>,

    /// Model identifier, e.g. "gpt-4o-mini". If None, uses provider default.
    pub model: Option<String>,

    /// API key. If None, read from `OPENAI_API_KEY`.
    pub api_key: Option<String>,

    /// Sampling temperature for the summarizer. Default: 0.2.
    ///
    /// Low temperature keeps the briefing faithful to the evidence pack;
    /// higher values invent analysis the document never made.
    pub temperature: f32,

    /// Maximum tokens the summarizer may generate. Default: 2048.
    pub max_tokens: usize,

    /// Maximum retry attempts on a transient LLM API failure. Default: 3.
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (exponential backoff). Default: 500.
    ///
    /// Doubles after each attempt: 500 ms → 1 s → 2 s.
    pub retry_backoff_ms: u64,

    /// Per-LLM-call timeout in seconds. Default: 60.
    pub api_timeout_secs: u64,

    /// Custom system prompt. If None, uses the built-in analyst prompt.
    pub system_prompt: Option<String>,

    // ── TTS renderer ─────────────────────────────────────────────────────
    /// Which speech synthesiser to invoke. Default: [`TtsBackend::EdgeTts`].
    pub tts_backend: TtsBackend,

    /// Neural voice name. Default: "en-US-JennyNeural".
    pub voice: String,

    /// Speech rate offset, e.g. "+10%". Default: "+0%".
    pub rate: String,

    /// Volume offset. Default: "+0%".
    pub volume: String,

    /// Pitch offset. Default: "+0Hz".
    pub pitch: String,

    /// Maximum TTS attempts before giving up. Default: 3.
    pub tts_max_retries: u32,

    /// Per-attempt TTS timeout in seconds. Default: 300.
    ///
    /// Edge TTS streams audio for the whole script in one call; five minutes
    /// covers the 50 000-char script cap with margin.
    pub tts_timeout_secs: u64,

    // ── Input ────────────────────────────────────────────────────────────
    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            min_raw_len: 25,
            boilerplate_threshold: 2,
            max_sentence_chars: 400,
            max_digit_chars: 25,
            numeric_run_len: 5,
            min_clean_len: 20,
            max_clean_len: 500,
            category_cap: 15,
            catchall_min_len: 40,
            evidence_min_len: 40,
            evidence_cap: 140,
            evidence_floor: 25,
            fallback_sentences: 80,
            fallback_min_len: 30,
            min_document_chars: 10,
            max_script_chars: 50_000,
            summarize: false,
            llm_endpoint: None,
            model: None,
            api_key: None,
            temperature: 0.2,
            max_tokens: 2048,
            max_retries: 3,
            retry_backoff_ms: 500,
            api_timeout_secs: 60,
            system_prompt: None,
            tts_backend: TtsBackend::default(),
            voice: "en-US-JennyNeural".to_string(),
            rate: "+0%".to_string(),
            volume: "+0%".to_string(),
            pitch: "+0Hz".to_string(),
            tts_max_retries: 3,
            tts_timeout_secs: 300,
            download_timeout_secs: 120,
        }
    }
}

impl BriefingConfig {
    /// Create a new builder for `BriefingConfig`.
    pub fn builder() -> BriefingConfigBuilder {
        BriefingConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`BriefingConfig`].
#[derive(Debug)]
pub struct BriefingConfigBuilder {
    config: BriefingConfig,
}

impl BriefingConfigBuilder {
    pub fn min_raw_len(mut self, n: usize) -> Self {
        self.config.min_raw_len = n;
        self
    }

    pub fn boilerplate_threshold(mut self, n: usize) -> Self {
        self.config.boilerplate_threshold = n.max(1);
        self
    }

    pub fn max_sentence_chars(mut self, n: usize) -> Self {
        self.config.max_sentence_chars = n.max(50);
        self
    }

    pub fn max_digit_chars(mut self, n: usize) -> Self {
        self.config.max_digit_chars = n;
        self
    }

    pub fn numeric_run_len(mut self, n: usize) -> Self {
        self.config.numeric_run_len = n.max(2);
        self
    }

    pub fn min_clean_len(mut self, n: usize) -> Self {
        self.config.min_clean_len = n;
        self
    }

    pub fn max_clean_len(mut self, n: usize) -> Self {
        self.config.max_clean_len = n;
        self
    }

    pub fn category_cap(mut self, n: usize) -> Self {
        self.config.category_cap = n.max(1);
        self
    }

    pub fn catchall_min_len(mut self, n: usize) -> Self {
        self.config.catchall_min_len = n;
        self
    }

    pub fn evidence_min_len(mut self, n: usize) -> Self {
        self.config.evidence_min_len = n;
        self
    }

    pub fn evidence_cap(mut self, n: usize) -> Self {
        self.config.evidence_cap = n.max(1);
        self
    }

    pub fn evidence_floor(mut self, n: usize) -> Self {
        self.config.evidence_floor = n;
        self
    }

    pub fn fallback_sentences(mut self, n: usize) -> Self {
        self.config.fallback_sentences = n.max(1);
        self
    }

    pub fn fallback_min_len(mut self, n: usize) -> Self {
        self.config.fallback_min_len = n;
        self
    }

    pub fn max_script_chars(mut self, n: usize) -> Self {
        self.config.max_script_chars = n.max(100);
        self
    }

    pub fn summarize(mut self, v: bool) -> Self {
        self.config.summarize = v;
        self
    }

    pub fn llm_endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.llm_endpoint = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn tts_backend(mut self, backend: TtsBackend) -> Self {
        self.config.tts_backend = backend;
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.config.voice = voice.into();
        self
    }

    pub fn rate(mut self, rate: impl Into<String>) -> Self {
        self.config.rate = rate.into();
        self
    }

    pub fn volume(mut self, volume: impl Into<String>) -> Self {
        self.config.volume = volume.into();
        self
    }

    pub fn pitch(mut self, pitch: impl Into<String>) -> Self {
        self.config.pitch = pitch.into();
        self
    }

    pub fn tts_max_retries(mut self, n: u32) -> Self {
        self.config.tts_max_retries = n;
        self
    }

    pub fn tts_timeout_secs(mut self, secs: u64) -> Self {
        self.config.tts_timeout_secs = secs;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BriefingConfig, BriefError> {
        let c = &self.config;
        if c.min_clean_len >= c.max_clean_len {
            return Err(BriefError::InvalidConfig(format!(
                "min_clean_len ({}) must be below max_clean_len ({})",
                c.min_clean_len, c.max_clean_len
            )));
        }
        if c.evidence_floor > c.evidence_cap {
            return Err(BriefError::InvalidConfig(format!(
                "evidence_floor ({}) must not exceed evidence_cap ({})",
                c.evidence_floor, c.evidence_cap
            )));
        }
        if c.category_cap == 0 {
            return Err(BriefError::InvalidConfig(
                "category_cap must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which speech synthesiser renders the narration script.
///
/// All backends take a script string and an output path and produce one
/// audio file. They differ only in the subprocess invoked, so switching
/// backends is a config change, not a code branch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TtsBackend {
    /// Microsoft Edge neural voices via the `edge-tts` CLI. (default)
    ///
    /// Best quality, needs network. Honours voice/rate/volume/pitch.
    #[default]
    EdgeTts,
    /// Offline synthesis via `espeak-ng`. Robotic but dependency-free.
    EspeakNg,
    /// macOS built-in `say` command.
    Say,
    /// Any program invoked as `<program> <script-file> <output-file>`.
    Custom(String),
}

impl TtsBackend {
    /// Name of the executable this backend invokes.
    pub fn program(&self) -> &str {
        match self {
            TtsBackend::EdgeTts => "edge-tts",
            TtsBackend::EspeakNg => "espeak-ng",
            TtsBackend::Say => "say",
            TtsBackend::Custom(program) => program,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_match_documented_values() {
        let c = BriefingConfig::default();
        assert_eq!(c.min_raw_len, 25);
        assert_eq!(c.boilerplate_threshold, 2);
        assert_eq!(c.max_sentence_chars, 400);
        assert_eq!(c.max_digit_chars, 25);
        assert_eq!(c.category_cap, 15);
        assert_eq!(c.catchall_min_len, 40);
        assert_eq!(c.evidence_cap, 140);
        assert_eq!(c.evidence_floor, 25);
        assert_eq!(c.max_script_chars, 50_000);
        assert_eq!(c.voice, "en-US-JennyNeural");
    }

    #[test]
    fn builder_clamps_and_validates() {
        let c = BriefingConfig::builder()
            .temperature(9.0)
            .category_cap(0)
            .build()
            .unwrap();
        assert_eq!(c.temperature, 2.0);
        assert_eq!(c.category_cap, 1, "cap setter clamps to 1");

        let err = BriefingConfig::builder()
            .min_clean_len(600)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("min_clean_len"));

        let err = BriefingConfig::builder()
            .evidence_floor(500)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("evidence_floor"));
    }

    #[test]
    fn backend_program_names() {
        assert_eq!(TtsBackend::EdgeTts.program(), "edge-tts");
        assert_eq!(TtsBackend::EspeakNg.program(), "espeak-ng");
        assert_eq!(TtsBackend::Custom("mytts".into()).program(), "mytts");
    }
}
