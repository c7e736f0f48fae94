//! services/api/src/adapters/extractor.rs
//!
//! This module contains the PDF text-extraction adapter. It implements the
//! `TextExtractionService` port from the `core` crate on top of the
//! `pdf-extract` crate.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

use newsdesk_core::ports::{PortError, PortResult, TextExtractionService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `TextExtractionService` port using `pdf-extract`.
///
/// Parsing is CPU-bound and synchronous, so every call runs under
/// `spawn_blocking` to keep the request executor free.
#[derive(Clone, Default)]
pub struct PdfExtractAdapter;

impl PdfExtractAdapter {
    pub fn new() -> Self {
        Self
    }
}

async fn run_extraction<T, F>(path: &Path, parse: F) -> PortResult<T>
where
    T: Send + 'static,
    F: FnOnce(PathBuf) -> Result<T, pdf_extract::OutputError> + Send + 'static,
{
    if !path.is_file() {
        return Err(PortError::NotFound(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let owned = path.to_path_buf();
    let result = tokio::task::spawn_blocking(move || parse(owned))
        .await
        .map_err(|e| PortError::Unexpected(format!("Extraction task failed: {}", e)))?;

    result.map_err(|e| {
        PortError::Unexpected(format!(
            "Failed to extract text from PDF {}: {}",
            path.display(),
            e
        ))
    })
}

//=========================================================================================
// `TextExtractionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextExtractionService for PdfExtractAdapter {
    /// Extracts the full plain-text content of the PDF at `path`.
    ///
    /// A successfully parsed but textless PDF (scanned images, for
    /// example) is not an error: it yields an empty string, which callers
    /// surface as a distinct user-visible condition.
    async fn extract(&self, path: &Path) -> PortResult<String> {
        let text = run_extraction(path, |p| pdf_extract::extract_text(&p)).await?;
        if text.trim().is_empty() {
            warn!(path = %path.display(), "No text found in PDF");
        }
        Ok(text)
    }

    /// Extracts the text page by page, preserving page order.
    async fn extract_pages(&self, path: &Path) -> PortResult<Vec<String>> {
        run_extraction(path, |p| pdf_extract::extract_text_by_pages(&p)).await
    }
}
