//! CLI binary for pdf2brief.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `BriefingConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2brief::{brief, brief_to_audio, BriefingConfig, TtsBackend};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print the narration script to stdout (no LLM, no audio)
  pdf2brief --text-only report.pdf

  # Render the briefing as audio
  pdf2brief report.pdf -o briefing.mp3

  # LLM-synthesised briefing with audio
  pdf2brief --summarize report.pdf -o briefing.mp3

  # From a URL, different voice, faster speech
  pdf2brief https://example.com/report.pdf -o out.mp3 --voice en-US-AriaNeural --rate +10%

  # Offline synthesis (no network needed for TTS)
  pdf2brief report.pdf -o out.wav --tts-backend espeak-ng

  # Structured JSON output (insights, evidence, stats)
  pdf2brief --json report.pdf > briefing.json

  # Local OpenAI-compatible server, no API key required
  pdf2brief --summarize --endpoint http://localhost:11434/v1 --model llama3.2 report.pdf

TTS BACKENDS:
  Backend     Program      Notes
  ─────────   ──────────   ─────────────────────────────────────────
  edge-tts    edge-tts     Neural voices, needs network (default)
  espeak-ng   espeak-ng    Offline, robotic
  say         say          macOS built-in
  custom      <program>    Invoked as: <program> <script> <output>

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY           API key for the summarizer
  PDF2BRIEF_LLM_ENDPOINT   OpenAI-compatible base URL override
  PDF2BRIEF_MODEL          Override model ID
  PDF2BRIEF_VOICE          Override the TTS voice

SETUP:
  1. Install a TTS backend:  pip install edge-tts   (or: apt install espeak-ng)
  2. Run:                    pdf2brief report.pdf -o briefing.mp3
"#;

/// Turn PDF research documents into narrated audio briefings.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2brief",
    version,
    about = "Turn PDF research documents into narrated audio briefings",
    long_about = "Extract, filter and classify the substance of a PDF document (local file or \
URL), optionally synthesise a structured market briefing through an OpenAI-compatible model, \
and render the result as speech.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: String,

    /// Render the narration as audio to this file.
    #[arg(short, long, env = "PDF2BRIEF_OUTPUT")]
    output: Option<PathBuf>,

    /// Output structured JSON (script, insights, evidence, stats) instead of the script.
    #[arg(long, env = "PDF2BRIEF_JSON")]
    json: bool,

    /// Run the LLM synthesis step on the evidence pack.
    #[arg(short, long, env = "PDF2BRIEF_SUMMARIZE")]
    summarize: bool,

    /// Script only: no LLM synthesis, no audio rendering.
    #[arg(long, env = "PDF2BRIEF_TEXT_ONLY", conflicts_with_all = ["summarize", "output"])]
    text_only: bool,

    /// Summarizer model ID (e.g. gpt-4o-mini).
    #[arg(long, env = "PDF2BRIEF_MODEL")]
    model: Option<String>,

    /// OpenAI-compatible chat-completions base URL.
    #[arg(long, env = "PDF2BRIEF_LLM_ENDPOINT")]
    endpoint: Option<String>,

    /// Summarizer API key (falls back to OPENAI_API_KEY).
    #[arg(long, env = "PDF2BRIEF_API_KEY")]
    api_key: Option<String>,

    /// Path to a text file containing a custom summarizer system prompt.
    #[arg(long, env = "PDF2BRIEF_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// Speech synthesiser to invoke.
    #[arg(long, env = "PDF2BRIEF_TTS_BACKEND", value_enum, default_value = "edge-tts")]
    tts_backend: TtsBackendArg,

    /// Program name for --tts-backend custom.
    #[arg(long, env = "PDF2BRIEF_TTS_PROGRAM")]
    tts_program: Option<String>,

    /// Neural voice name.
    #[arg(long, env = "PDF2BRIEF_VOICE", default_value = "en-US-JennyNeural")]
    voice: String,

    /// Speech rate offset, e.g. +10%.
    #[arg(long, env = "PDF2BRIEF_RATE", default_value = "+0%")]
    rate: String,

    /// Volume offset, e.g. -5%.
    #[arg(long, env = "PDF2BRIEF_VOLUME", default_value = "+0%")]
    volume: String,

    /// Pitch offset, e.g. +2Hz.
    #[arg(long, env = "PDF2BRIEF_PITCH", default_value = "+0Hz")]
    pitch: String,

    /// Retries on summarizer API failure.
    #[arg(long, env = "PDF2BRIEF_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Per-call summarizer timeout in seconds.
    #[arg(long, env = "PDF2BRIEF_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "PDF2BRIEF_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2BRIEF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2BRIEF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum TtsBackendArg {
    EdgeTts,
    EspeakNg,
    Say,
    Custom,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner owns the terminal during a run; library INFO logs only
    // appear in verbose mode.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli).await?;

    let show_spinner = !cli.quiet && !cli.json;
    let spinner = if show_spinner {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Briefing");
        bar.set_message(cli.input.clone());
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    // ── Run the pipeline ─────────────────────────────────────────────────
    let result = match cli.output {
        Some(ref audio_path) => brief_to_audio(&cli.input, audio_path, &config).await,
        None => brief(&cli.input, &config).await,
    };

    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }
    let output = result.context("Briefing failed")?;

    // ── Print results ────────────────────────────────────────────────────
    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if let Some(ref audio_path) = output.audio_path {
        if !cli.quiet {
            eprintln!(
                "{}  {} pages, {} insights, {} chars of narration  →  {}",
                green("✔"),
                output.stats.page_count,
                output.insights.len(),
                output.stats.script_chars,
                bold(&audio_path.display().to_string()),
            );
            eprintln!(
                "   {} extract  /  {} llm  /  {} tts",
                dim(&format!("{}ms", output.stats.extract_duration_ms)),
                dim(&format!("{}ms", output.stats.llm_duration_ms)),
                dim(&format!("{}ms", output.stats.tts_duration_ms)),
            );
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(output.script.as_bytes())
            .context("Failed to write to stdout")?;
        if !output.script.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
        if !cli.quiet {
            eprintln!(
                "{}  {} pages, {} insights, {}ms total",
                green("✔"),
                output.stats.page_count,
                output.insights.len(),
                output.stats.total_duration_ms,
            );
        }
    }

    Ok(())
}

/// Map CLI args to `BriefingConfig`.
async fn build_config(cli: &Cli) -> Result<BriefingConfig> {
    let backend = match cli.tts_backend {
        TtsBackendArg::EdgeTts => TtsBackend::EdgeTts,
        TtsBackendArg::EspeakNg => TtsBackend::EspeakNg,
        TtsBackendArg::Say => TtsBackend::Say,
        TtsBackendArg::Custom => {
            let program = cli
                .tts_program
                .clone()
                .context("--tts-backend custom requires --tts-program")?;
            TtsBackend::Custom(program)
        }
    };

    let mut builder = BriefingConfig::builder()
        .summarize(cli.summarize && !cli.text_only)
        .tts_backend(backend)
        .voice(&cli.voice)
        .rate(&cli.rate)
        .volume(&cli.volume)
        .pitch(&cli.pitch)
        .max_retries(cli.max_retries)
        .api_timeout_secs(cli.api_timeout)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref endpoint) = cli.endpoint {
        builder = builder.llm_endpoint(endpoint);
    }
    if let Some(ref key) = cli.api_key {
        builder = builder.api_key(key);
    }
    if let Some(ref path) = cli.system_prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {:?}", path))?;
        builder = builder.system_prompt(prompt);
    }

    builder.build().context("Invalid configuration")
}
