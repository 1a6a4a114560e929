//! Error types for the pdf2brief library.
//!
//! One fatal error enum, [`BriefError`], covers everything that can stop a
//! document from being briefed: bad input, empty extraction, a summarizer
//! that returned garbage, or a narrator that never produced audio.
//!
//! The text pipeline itself (joining, segmentation, filtering, normalization,
//! classification, evidence sampling) is deliberately infallible — a sentence
//! that cannot be cleaned is dropped, never surfaced as an error. Only the
//! edges of the system (file system, network, subprocess) can fail.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2brief library.
#[derive(Debug, Error)]
pub enum BriefError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The PDF could not be parsed for text at all.
    #[error("Text extraction failed for '{path}': {detail}\nScanned or image-only PDFs need OCR, which pdf2brief does not perform.")]
    ExtractionFailed { path: PathBuf, detail: String },

    /// Extraction succeeded but produced fewer than 10 characters of text.
    #[error("No text found in '{path}' ({chars} chars extracted).\nThe document may be scanned images or empty.")]
    NoTextFound { path: PathBuf, chars: usize },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// No summarizer endpoint/key could be resolved.
    #[error("LLM summarizer is not configured.\n{hint}")]
    SummarizerNotConfigured { hint: String },

    /// The LLM API returned a non-retryable error.
    #[error("LLM API error: {message}")]
    LlmApiError { message: String },

    /// The LLM call failed after all retries.
    #[error("LLM call failed after {retries} retries: {detail}")]
    LlmExhausted { retries: u32, detail: String },

    /// The model's reply was not JSON, even after salvaging the
    /// brace-delimited substring.
    #[error("Model output was not valid JSON: {detail}")]
    ModelOutputNotJson { detail: String },

    // ── TTS errors ────────────────────────────────────────────────────────
    /// The speech renderer failed on every attempt.
    #[error("Audio generation failed after {attempts} attempts: {detail}")]
    TtsFailed { attempts: u32, detail: String },

    /// The TTS backend binary is not installed or not on PATH.
    #[error("TTS backend '{program}' not found on PATH.\nInstall it or select another backend with --tts-backend.")]
    TtsBackendMissing { program: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_text_found_display() {
        let e = BriefError::NoTextFound {
            path: PathBuf::from("report.pdf"),
            chars: 4,
        };
        let msg = e.to_string();
        assert!(msg.contains("No text found"), "got: {msg}");
        assert!(msg.contains("4 chars"));
    }

    #[test]
    fn model_output_not_json_display() {
        let e = BriefError::ModelOutputNotJson {
            detail: "expected value at line 1".into(),
        };
        assert!(e.to_string().contains("not valid JSON"));
    }

    #[test]
    fn tts_failed_display() {
        let e = BriefError::TtsFailed {
            attempts: 3,
            detail: "timed out".into(),
        };
        assert!(e.to_string().contains("3 attempts"));
        assert!(e.to_string().contains("timed out"));
    }

    #[test]
    fn not_a_pdf_display() {
        let e = BriefError::NotAPdf {
            path: PathBuf::from("notes.txt"),
            magic: *b"Hell",
        };
        assert!(e.to_string().contains("not a valid PDF"));
    }
}
