//! # pdf2brief
//!
//! Turn PDF research documents into narrated audio briefings.
//!
//! The library extracts per-page text, repairs it into running prose,
//! segments and filters sentences, classifies the survivors into seven
//! insight categories, samples a bounded evidence pack, optionally asks an
//! OpenAI-compatible model for a structured market briefing, and renders the
//! resulting script as speech through an external TTS program.
//!
//! ```text
//! PDF ──▶ extract ──▶ join ──▶ segment ──▶ filter ──▶ normalize ──▶ classify
//!                        │                                              │
//!                        └──▶ evidence ──▶ llm (optional)               ▼
//!                                  │                              narration script
//!                                  └──────────────────────────────▶  │
//!                                                                    ▼
//!                                                                tts ──▶ audio
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pdf2brief::{brief, BriefingConfig};
//!
//! # async fn run() -> Result<(), pdf2brief::BriefError> {
//! let config = BriefingConfig::default();
//! let output = brief("report.pdf", &config).await?;
//! println!("{}", output.script);
//! # Ok(())
//! # }
//! ```
//!
//! With audio:
//!
//! ```rust,no_run
//! use pdf2brief::{brief_to_audio, BriefingConfig};
//!
//! # async fn run() -> Result<(), pdf2brief::BriefError> {
//! let config = BriefingConfig::builder()
//!     .voice("en-US-AriaNeural")
//!     .summarize(true)
//!     .build()?;
//! let output = brief_to_audio("https://example.com/report.pdf", "briefing.mp3", &config).await?;
//! println!("audio at {:?}", output.audio_path);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;

pub use config::{BriefingConfig, BriefingConfigBuilder, TtsBackend};
pub use convert::{brief, brief_sync, brief_to_audio};
pub use error::BriefError;
pub use output::{
    BriefingOutput, BriefingStats, InsightCategory, InsightSet, MarketBriefing, RiskLevel,
    VulnerabilityAssessment,
};
