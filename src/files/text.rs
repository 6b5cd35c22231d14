use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{FileContent, FileKind, FileMetadata, FilePayload, FileReadError};

pub(super) fn read(path: &Path) -> Result<FileContent, FileReadError> {
    let shown = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| FileReadError::Io {
        path: shown.clone(),
        source,
    })?;
    let size_bytes = bytes.len() as u64;

    let text = String::from_utf8(bytes).map_err(|_| FileReadError::InvalidUtf8 { path: shown })?;

    debug!(path = %path.display(), size_bytes, "read text file");

    Ok(FileContent {
        kind: FileKind::Text,
        payload: FilePayload::Text(text),
        metadata: FileMetadata::Text {
            encoding: "utf-8",
            size_bytes,
        },
        source_path: path.to_path_buf(),
    })
}
