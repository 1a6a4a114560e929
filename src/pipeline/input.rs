//! Input resolution: normalise a user-supplied path or URL to a local file.
//!
//! URL inputs download into a `TempDir` so the extractor always works from a
//! file-system path; the directory (and the PDF in it) is removed when
//! `ResolvedPdf` drops, even on panic. The `%PDF` magic bytes are validated
//! up front so callers get a meaningful error rather than a parser failure
//! deep inside extraction.

use crate::error::BriefError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// A PDF resolved to a local path, with downloaded inputs kept alive.
#[derive(Debug)]
pub enum ResolvedPdf {
    /// Input was already a local file.
    Local(PathBuf),
    /// Input was a URL; the `TempDir` owns the downloaded copy.
    Downloaded { path: PathBuf, _temp_dir: TempDir },
}

impl ResolvedPdf {
    /// Path to the PDF regardless of how it was resolved.
    pub fn path(&self) -> &Path {
        match self {
            ResolvedPdf::Local(p) => p,
            ResolvedPdf::Downloaded { path, .. } => path,
        }
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to a local PDF file path.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<ResolvedPdf, BriefError> {
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        resolve_local(input)
    }
}

fn resolve_local(path_str: &str) -> Result<ResolvedPdf, BriefError> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(BriefError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(BriefError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(BriefError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(BriefError::FileNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(ResolvedPdf::Local(path))
}

async fn download_url(url: &str, timeout_secs: u64) -> Result<ResolvedPdf, BriefError> {
    info!("Downloading report from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BriefError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            BriefError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            BriefError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(BriefError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| BriefError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let temp_dir = TempDir::new().map_err(|e| BriefError::Internal(e.to_string()))?;
    let file_path = temp_dir.path().join("report.pdf");

    if bytes.len() >= 4 && &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        return Err(BriefError::NotAPdf {
            path: file_path,
            magic,
        });
    }

    tokio::fs::write(&file_path, &bytes)
        .await
        .map_err(|e| BriefError::Internal(format!("Failed to write temp file: {}", e)))?;

    info!("Downloaded to: {}", file_path.display());

    Ok(ResolvedPdf::Downloaded {
        path: file_path,
        _temp_dir: temp_dir,
    })
}
