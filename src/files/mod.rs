//! File ingestion: type detection, size limits and kind-specific readers.

mod pdf;
mod raster;
mod text;
mod types;


use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::error::AppError;

#[allow(unused_imports)]
pub use pdf::{PAGE_BREAK, join_pages};
#[allow(unused_imports)]
pub use types::{FileContent, FileKind, FileMetadata, FilePayload, FileReadError};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

const EXTENSION_KINDS: &[(&str, FileKind)] = &[
    (".txt", FileKind::Text),
    (".md", FileKind::Text),
    (".py", FileKind::Text),
    (".js", FileKind::Text),
    (".json", FileKind::Text),
    (".yaml", FileKind::Text),
    (".yml", FileKind::Text),
    (".sh", FileKind::Text),
    (".html", FileKind::Text),
    (".css", FileKind::Text),
    (".xml", FileKind::Text),
    (".csv", FileKind::Text),
    (".log", FileKind::Text),
    (".ini", FileKind::Text),
    (".cfg", FileKind::Text),
    (".conf", FileKind::Text),
    (".rs", FileKind::Text),
    (".go", FileKind::Text),
    (".java", FileKind::Text),
    (".cpp", FileKind::Text),
    (".c", FileKind::Text),
    (".h", FileKind::Text),
    (".ts", FileKind::Text),
    (".tsx", FileKind::Text),
    (".jsx", FileKind::Text),
    (".pdf", FileKind::Pdf),
    (".png", FileKind::Image),
    (".jpg", FileKind::Image),
    (".jpeg", FileKind::Image),
    (".gif", FileKind::Image),
    (".webp", FileKind::Image),
    (".bmp", FileKind::Image),
];

/// Expand a leading `~` component to the user's home directory.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Every recognized extension, sorted and deduplicated.
pub fn supported_extensions() -> Vec<&'static str> {
    EXTENSION_KINDS
        .iter()
        .map(|(ext, _)| *ext)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Lowercased extension with its leading dot, or `None` when the path has none.
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

pub fn detect_kind(path: &Path) -> Result<FileKind, AppError> {
    let extension = dotted_extension(path);
    let kind = extension.as_deref().and_then(|ext| {
        EXTENSION_KINDS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, kind)| *kind)
    });

    kind.ok_or_else(|| AppError::UnsupportedFileType {
        extension: extension.unwrap_or_else(|| "(none)".to_string()),
        supported: supported_extensions().join(", "),
    })
}

/// Read `path` into a provider-ready payload, enforcing the size limit.
pub fn read_file(path: impl AsRef<Path>, max_size_mb: f64) -> Result<FileContent> {
    let path = expand_home(path);

    if !path.is_file() {
        return Err(AppError::FileNotFound(path.display().to_string()).into());
    }

    let size_bytes = fs::metadata(&path)
        .with_context(|| format!("Failed to inspect {}", path.display()))?
        .len();
    if size_bytes as f64 > max_size_mb * BYTES_PER_MB {
        return Err(AppError::FileSizeExceeded {
            size_mb: size_bytes as f64 / BYTES_PER_MB,
            limit_mb: max_size_mb,
        }
        .into());
    }

    let kind = detect_kind(&path)?;
    debug!(path = %path.display(), %kind, size_bytes, "reading attachment");

    let content = match kind {
        FileKind::Text => text::read(&path)?,
        FileKind::Pdf => pdf::read(&path)?,
        FileKind::Image => raster::read(&path)?,
    };

    info!(
        path = %path.display(),
        %kind,
        size_bytes = content.metadata.size_bytes(),
        "attachment ready"
    );
    Ok(content)
}
