//! LLM synthesis: evidence pack in, structured [`MarketBriefing`] out.
//!
//! Talks to any OpenAI-compatible chat-completions endpoint over plain
//! `reqwest`. Transient failures (network, 5xx, timeout) retry with
//! exponential backoff; a reply that parses as JSON but violates the schema
//! is absorbed by the forgiving deserializer; a reply that is not JSON at
//! all fails immediately, because retrying a model that ignores the output
//! contract rarely converges.

use crate::config::BriefingConfig;
use crate::error::BriefError;
use crate::output::MarketBriefing;
use crate::pipeline::segment::sentences;
use crate::prompts::DEFAULT_ANALYST_PROMPT;
use serde::Deserialize;
use tracing::{debug, info, warn};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Index names scrubbed from the briefing text fields.
const INDEX_NAMES: [&str; 2] = ["nifty", "sensex"];

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// Resolve endpoint, key and model from config and environment.
fn resolve_credentials(config: &BriefingConfig) -> Result<(String, Option<String>, String), BriefError> {
    let endpoint = config
        .llm_endpoint
        .clone()
        .or_else(|| std::env::var("PDF2BRIEF_LLM_ENDPOINT").ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let api_key = config
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());

    // Hosted default endpoint needs a key; a local server does not.
    let is_local = endpoint.contains("localhost") || endpoint.contains("127.0.0.1");
    if api_key.is_none() && !is_local {
        return Err(BriefError::SummarizerNotConfigured {
            hint: "Set OPENAI_API_KEY, pass --api-key, or point --endpoint at a local \
                   OpenAI-compatible server."
                .to_string(),
        });
    }

    let model = config
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    Ok((endpoint, api_key, model))
}

/// Synthesize a structured briefing from the evidence bullets.
pub async fn summarize(
    evidence_bullets: &str,
    config: &BriefingConfig,
) -> Result<MarketBriefing, BriefError> {
    let (endpoint, api_key, model) = resolve_credentials(config)?;
    let url = format!("{}/chat/completions", endpoint.trim_end_matches('/'));

    let system_prompt = config
        .system_prompt
        .as_deref()
        .unwrap_or(DEFAULT_ANALYST_PROMPT);

    let body = serde_json::json!({
        "model": model,
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
        "messages": [
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": evidence_bullets },
        ],
    });

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.api_timeout_secs))
        .build()
        .map_err(|e| BriefError::LlmApiError {
            message: e.to_string(),
        })?;

    info!("Requesting briefing from {} (model {})", url, model);

    let mut last_error = String::new();
    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let delay_ms = config.retry_backoff_ms * 2u64.pow(attempt - 1);
            warn!(
                "LLM attempt {}/{} failed ({}), retrying in {} ms",
                attempt, config.max_retries, last_error, delay_ms
            );
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
        }

        let mut request = client.post(&url).json(&body);
        if let Some(key) = &api_key {
            request = request.bearer_auth(key);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                last_error = e.to_string();
                continue;
            }
        };

        let status = response.status();
        if status.is_server_error() || status.as_u16() == 429 {
            last_error = format!("HTTP {}", status);
            continue;
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BriefError::LlmApiError {
                message: format!("HTTP {}: {}", status, detail),
            });
        }

        let parsed: ChatResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                last_error = e.to_string();
                continue;
            }
        };

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or_default();
        debug!("Model replied with {} chars", content.len());

        let briefing = parse_briefing(content)?;
        return Ok(scrub_index_names(briefing));
    }

    Err(BriefError::LlmExhausted {
        retries: config.max_retries,
        detail: last_error,
    })
}

/// Parse the model reply into a briefing, salvaging the brace-delimited
/// substring when the model wrapped the JSON in prose or fences.
fn parse_briefing(content: &str) -> Result<MarketBriefing, BriefError> {
    match serde_json::from_str::<MarketBriefing>(content) {
        Ok(b) => Ok(b),
        Err(first_err) => {
            let start = content.find('{');
            let end = content.rfind('}');
            if let (Some(start), Some(end)) = (start, end) {
                if start < end {
                    if let Ok(b) = serde_json::from_str::<MarketBriefing>(&content[start..=end]) {
                        return Ok(b);
                    }
                }
            }
            Err(BriefError::ModelOutputNotJson {
                detail: first_err.to_string(),
            })
        }
    }
}

fn mentions_index(text: &str) -> bool {
    let lower = text.to_lowercase();
    INDEX_NAMES.iter().any(|n| lower.contains(n))
}

/// Remove text that names a specific market index, field by field.
///
/// Scalar fields that mention an index are blanked; list items are dropped;
/// the audio script keeps only its clean sentences.
fn scrub_index_names(mut briefing: MarketBriefing) -> MarketBriefing {
    if mentions_index(&briefing.central_thesis) {
        briefing.central_thesis.clear();
    }
    if mentions_index(&briefing.strategic_investment_stance) {
        briefing.strategic_investment_stance.clear();
    }
    briefing
        .estimate_valuation_reset
        .retain(|item| !mentions_index(item));
    briefing
        .structural_execution_risk
        .retain(|item| !mentions_index(item));

    if mentions_index(&briefing.audio_script) {
        let script = briefing.audio_script.clone();
        briefing.audio_script = sentences(&script)
            .filter(|s| !mentions_index(s))
            .collect::<Vec<_>>()
            .join(" ");
    }
    briefing
}
