//! PDF text extraction.

use std::path::Path;

use finsight_core::{FinsightError, Result};
use tracing::{info, warn};

/// Extracts page-ordered text from a PDF file.
///
/// Output is the per-page text joined with newline separators.
pub trait PdfExtractor: Send + Sync {
    /// Extract the text content of the PDF at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FinsightError::NotFound`] if the path does not exist and
    /// [`FinsightError::Extraction`] if the document cannot be parsed.
    fn extract_text(&self, path: &Path) -> Result<String>;
}

/// A [`PdfExtractor`] backed by `lopdf`.
///
/// Pages are visited in page order; pages whose text cannot be decoded are
/// skipped rather than failing the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }
}

impl PdfExtractor for LopdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(FinsightError::NotFound(path.display().to_string()));
        }

        let doc = lopdf::Document::load(path)
            .map_err(|e| FinsightError::Extraction(format!("failed to load PDF: {e}")))?;

        let pages = doc.get_pages();
        let mut page_numbers: Vec<u32> = pages.keys().copied().collect();
        page_numbers.sort_unstable();

        let mut texts = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            match doc.extract_text(&[page_number]) {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        texts.push(text.to_string());
                    }
                }
                Err(e) => {
                    warn!(page = page_number, error = %e, "skipping undecodable page");
                }
            }
        }

        info!(path = %path.display(), page_count = texts.len(), "parsed PDF");
        Ok(texts.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_not_found() {
        let err = LopdfExtractor::new()
            .extract_text(Path::new("/nonexistent/report.pdf"))
            .unwrap_err();

        assert!(matches!(err, FinsightError::NotFound(_)));
        assert_eq!(err.to_string(), "File not found: /nonexistent/report.pdf");
    }
}
