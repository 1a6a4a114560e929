//! PDF text extraction: per-page raw text via `pdf-extract`.
//!
//! Extraction is treated as a black box that yields one raw string per page,
//! with no guarantee on paragraph or column ordering — the join stage repairs
//! what it can. Parsing a large PDF is CPU-bound, so the work runs on the
//! blocking thread pool rather than stalling the async workers.

use crate::error::BriefError;
use std::path::Path;
use tracing::{debug, info};

/// Extract per-page raw text from the PDF at `path`.
///
/// Returns one string per page, in page order; empty pages yield empty
/// strings (the join stage drops them).
pub async fn extract_pages(path: &Path) -> Result<Vec<String>, BriefError> {
    let owned = path.to_path_buf();

    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_by_pages(&owned).map_err(|e| BriefError::ExtractionFailed {
            path: owned.clone(),
            detail: format!("{:?}", e),
        })
    })
    .await
    .map_err(|e| BriefError::Internal(format!("Extraction task panicked: {}", e)))??;

    let total_chars: usize = pages.iter().map(|p| p.len()).sum();
    info!(
        "Extracted {} pages, {} chars from {}",
        pages.len(),
        total_chars,
        path.display()
    );
    for (i, page) in pages.iter().enumerate() {
        debug!("page {}: {} chars", i + 1, page.len());
    }

    Ok(pages)
}
