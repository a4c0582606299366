use std::path::{Path, PathBuf};

use lopdf::Document as PdfDocument;
use thiserror::Error;
use tracing::debug;

use crate::document::Document;

/// Outcome of extracting a PDF: the concatenated text plus page statistics.
#[derive(Debug)]
pub struct PdfExtraction {
    pub document: Document,
    /// Total pages in the PDF.
    pub pages: usize,
    /// Pages that yielded no text (scanned images, extraction failures).
    pub empty_pages: usize,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not a valid PDF: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Extract all text from a PDF held in memory.
///
/// Page text is concatenated in page order. A page whose content cannot be
/// decoded contributes nothing and is counted in
/// [`empty_pages`](PdfExtraction::empty_pages); only input that fails to
/// parse as a PDF at all is an error.
pub fn extract(bytes: &[u8]) -> Result<PdfExtraction, ExtractError> {
    let pdf = PdfDocument::load_mem(bytes)?;
    let mut text = String::new();
    let mut pages = 0usize;
    let mut empty_pages = 0usize;
    for (page_number, _page_id) in pdf.get_pages() {
        pages += 1;
        match pdf.extract_text(&[page_number]) {
            Ok(page_text) => {
                if page_text.trim().is_empty() {
                    empty_pages += 1;
                }
                text.push_str(&page_text);
            }
            Err(err) => {
                debug!("page {page_number}: no text extracted: {err}");
                empty_pages += 1;
            }
        }
    }
    Ok(PdfExtraction {
        document: Document::new(text),
        pages,
        empty_pages,
    })
}

/// Read `path` and extract its text. See [`extract`].
pub fn extract_file(path: impl AsRef<Path>) -> Result<PdfExtraction, ExtractError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract(&bytes)
}
