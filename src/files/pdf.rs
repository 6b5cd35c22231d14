use std::fs;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use tracing::{debug, warn};

use super::types::{FileContent, FileKind, FileMetadata, FilePayload, FileReadError};

pub const PAGE_BREAK: &str = "\n\n--- Page Break ---\n\n";

pub(super) fn read(path: &Path) -> Result<FileContent, FileReadError> {
    let shown = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| FileReadError::Io {
        path: shown.clone(),
        source,
    })?;
    let size_bytes = bytes.len() as u64;

    // pdf-extract can panic on malformed fonts, so a panic is just another bad PDF.
    let pages = match catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    })) {
        Ok(Ok(pages)) => pages,
        Ok(Err(err)) => {
            warn!(path = %shown, error = %err, "PDF text extraction failed");
            return Err(FileReadError::InvalidPdf {
                path: shown,
                reason: err.to_string(),
            });
        }
        Err(_) => {
            warn!(path = %shown, "PDF text extraction panicked");
            return Err(FileReadError::InvalidPdf {
                path: shown,
                reason: "the document could not be parsed".to_string(),
            });
        }
    };

    let page_count = pages.len();
    let text = join_pages(pages);

    debug!(path = %shown, page_count, chars = text.len(), "extracted PDF text");

    Ok(FileContent {
        kind: FileKind::Pdf,
        payload: FilePayload::Text(text),
        metadata: FileMetadata::Pdf {
            page_count,
            size_bytes,
        },
        source_path: path.to_path_buf(),
    })
}

/// Join page texts in order, skipping pages that produced no text at all.
pub fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    pages
        .into_iter()
        .filter_map(|page| {
            let trimmed = page.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join(PAGE_BREAK)
}
