//! The briefing pipeline end to end.
//!
//! [`brief`] runs input resolution, extraction and the whole text pipeline,
//! returning the narration script, insights and evidence. [`brief_to_audio`]
//! additionally renders the script as speech. [`brief_sync`] is a blocking
//! wrapper for callers without a tokio runtime.

use crate::config::BriefingConfig;
use crate::error::BriefError;
use crate::output::{BriefingOutput, BriefingStats, InsightSet};
use crate::pipeline::classify::InsightClassifier;
use crate::pipeline::evidence::sample_evidence;
use crate::pipeline::filter::keep_sentence;
use crate::pipeline::normalize::normalize;
use crate::pipeline::segment::{normalize_whitespace, sentences};
use crate::pipeline::{extract, input, join, llm, tts};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Turn a PDF (local path or HTTP/HTTPS URL) into a briefing.
///
/// Runs the full text pipeline and, when `config.summarize` is set, the LLM
/// synthesis step. No audio is rendered; see [`brief_to_audio`].
pub async fn brief(
    input_str: impl AsRef<str>,
    config: &BriefingConfig,
) -> Result<BriefingOutput, BriefError> {
    let started = Instant::now();
    let input_str = input_str.as_ref();
    if input_str.trim().is_empty() {
        return Err(BriefError::InvalidInput {
            input: input_str.to_string(),
        });
    }

    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;

    let extract_started = Instant::now();
    let pages = extract::extract_pages(resolved.path()).await?;
    let extract_duration_ms = extract_started.elapsed().as_millis() as u64;

    let page_count = pages.len();
    let document = join::join_pages(pages.iter().map(String::as_str));
    let raw_chars = document.chars().count();
    if raw_chars < config.min_document_chars {
        return Err(BriefError::NoTextFound {
            path: resolved.path().to_path_buf(),
            chars: raw_chars,
        });
    }

    let document = normalize_whitespace(&document);

    let classify_started = Instant::now();
    let mut classifier = InsightClassifier::new(config.category_cap, config.catchall_min_len);
    let mut sentences_segmented = 0usize;
    let mut sentences_kept = 0usize;
    for sentence in sentences(&document) {
        sentences_segmented += 1;
        if !keep_sentence(sentence, config) {
            continue;
        }
        let cleaned = normalize(sentence);
        let clean_len = cleaned.chars().count();
        if clean_len < config.min_clean_len || clean_len > config.max_clean_len {
            continue;
        }
        sentences_kept += 1;
        classifier.observe(sentence, &cleaned);
    }
    let insights = classifier.finish();
    let classify_duration_ms = classify_started.elapsed().as_millis() as u64;
    let sentences_classified = insights.len();
    info!(
        "Pipeline: {} segmented, {} kept, {} classified across {} pages",
        sentences_segmented, sentences_kept, sentences_classified, page_count
    );

    let pack = sample_evidence(&document, config);

    let mut script = assemble_script(&insights, &pack.bullets);
    script = truncate_script(script, config.max_script_chars);

    let mut briefing = None;
    let mut llm_duration_ms = 0u64;
    if config.summarize {
        let llm_started = Instant::now();
        let result = llm::summarize(&pack.bullets, config).await?;
        llm_duration_ms = llm_started.elapsed().as_millis() as u64;
        if !result.audio_script.trim().is_empty() {
            script = truncate_script(result.audio_script.clone(), config.max_script_chars);
        }
        briefing = Some(result);
    }

    let stats = BriefingStats {
        page_count,
        raw_chars,
        sentences_segmented,
        sentences_kept,
        sentences_classified,
        evidence_sentences: pack.count,
        used_evidence_fallback: pack.used_fallback,
        script_chars: script.chars().count(),
        extract_duration_ms,
        classify_duration_ms,
        llm_duration_ms,
        tts_duration_ms: 0,
        total_duration_ms: started.elapsed().as_millis() as u64,
    };

    Ok(BriefingOutput {
        script,
        insights,
        evidence: pack.bullets,
        briefing,
        audio_path: None,
        stats,
    })
}

/// Run [`brief`] and render the resulting script as an audio file.
pub async fn brief_to_audio(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &BriefingConfig,
) -> Result<BriefingOutput, BriefError> {
    let started = Instant::now();
    let mut output = brief(input_str, config).await?;

    let tts_started = Instant::now();
    tts::render_speech(&output.script, output_path.as_ref(), config).await?;
    output.stats.tts_duration_ms = tts_started.elapsed().as_millis() as u64;
    output.stats.total_duration_ms = started.elapsed().as_millis() as u64;
    output.audio_path = Some(output_path.as_ref().to_path_buf());

    Ok(output)
}

/// Blocking wrapper around [`brief`] for non-async callers.
pub fn brief_sync(
    input_str: impl AsRef<str>,
    config: &BriefingConfig,
) -> Result<BriefingOutput, BriefError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| BriefError::Internal(format!("Failed to create tokio runtime: {}", e)))?;
    runtime.block_on(brief(input_str, config))
}

/// Build the narration script from the classified insights.
///
/// Categories are spoken in presentation order, each introduced by its label.
/// When nothing classified at all, the evidence pack narrates instead so the
/// listener still hears the document's substance.
fn assemble_script(insights: &InsightSet, evidence_bullets: &str) -> String {
    if insights.is_empty() {
        return evidence_bullets
            .lines()
            .map(|l| l.strip_prefix("- ").unwrap_or(l))
            .collect::<Vec<_>>()
            .join(" ");
    }

    let mut parts: Vec<String> = Vec::new();
    for (category, bucket) in insights.iter() {
        if bucket.is_empty() {
            continue;
        }
        parts.push(format!("{}.", category.spoken_label()));
        parts.push(bucket.join(" "));
    }
    parts.join(" ")
}

/// Cap the script length, marking the cut with an ellipsis.
fn truncate_script(script: String, max_chars: usize) -> String {
    if script.chars().count() <= max_chars {
        return script;
    }
    warn!(
        "Narration script exceeds {} chars, truncating",
        max_chars
    );
    let mut truncated: String = script.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
