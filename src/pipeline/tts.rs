//! Speech rendering: narration script in, audio file out.
//!
//! Every backend is an external program invoked per attempt with the script
//! on disk, so a crashed or hung synthesiser never takes the process down.
//! Attempts are spaced with a linear wait (2 s, then 4 s, ...) and each one
//! runs under its own timeout. A missing binary aborts immediately; retrying
//! cannot install software.

use crate::config::{BriefingConfig, TtsBackend};
use crate::error::BriefError;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

/// Render `script` as speech into the audio file at `out`.
pub async fn render_speech(
    script: &str,
    out: &Path,
    config: &BriefingConfig,
) -> Result<(), BriefError> {
    let mut script_file = tempfile::NamedTempFile::new()
        .map_err(|e| BriefError::Internal(format!("Failed to create script file: {}", e)))?;
    script_file
        .write_all(script.as_bytes())
        .map_err(|e| BriefError::Internal(format!("Failed to write script file: {}", e)))?;
    script_file
        .flush()
        .map_err(|e| BriefError::Internal(format!("Failed to flush script file: {}", e)))?;

    let script_path = script_file.path();
    let program = config.tts_backend.program();
    info!(
        "Rendering {} chars of narration with '{}' to {}",
        script.chars().count(),
        program,
        out.display()
    );

    let mut last_error = String::new();
    for attempt in 1..=config.tts_max_retries {
        if attempt > 1 {
            let wait = Duration::from_secs(2 * u64::from(attempt - 1));
            warn!(
                "TTS attempt {}/{} failed ({}), waiting {:?} before retry",
                attempt - 1,
                config.tts_max_retries,
                last_error,
                wait
            );
            tokio::time::sleep(wait).await;
        }

        let mut command = build_command(&config.tts_backend, script_path, out, config);
        let child = match command.spawn() {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BriefError::TtsBackendMissing {
                    program: program.to_string(),
                });
            }
            Err(e) => {
                last_error = e.to_string();
                continue;
            }
        };

        let timeout = Duration::from_secs(config.tts_timeout_secs);
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) if output.status.success() => {
                info!("Audio written to {}", out.display());
                return Ok(());
            }
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                last_error = format!("{}: {}", output.status, stderr.trim());
            }
            Ok(Err(e)) => {
                last_error = e.to_string();
            }
            Err(_) => {
                last_error = format!("timed out after {}s", config.tts_timeout_secs);
            }
        }
    }

    Err(BriefError::TtsFailed {
        attempts: config.tts_max_retries,
        detail: last_error,
    })
}

/// Assemble the per-backend command line.
fn build_command(
    backend: &TtsBackend,
    script: &Path,
    out: &Path,
    config: &BriefingConfig,
) -> Command {
    let mut command = Command::new(backend.program());
    match backend {
        TtsBackend::EdgeTts => {
            command
                .arg("--voice")
                .arg(&config.voice)
                .arg("--rate")
                .arg(&config.rate)
                .arg("--volume")
                .arg(&config.volume)
                .arg("--pitch")
                .arg(&config.pitch)
                .arg("--file")
                .arg(script)
                .arg("--write-media")
                .arg(out);
        }
        TtsBackend::EspeakNg => {
            command.arg("-f").arg(script).arg("-w").arg(out);
        }
        TtsBackend::Say => {
            command.arg("-o").arg(out).arg("-f").arg(script);
        }
        TtsBackend::Custom(_) => {
            command.arg(script).arg(out);
        }
    }
    command.stdout(std::process::Stdio::piped());
    command.stderr(std::process::Stdio::piped());
    command.kill_on_drop(true);
    command
}
