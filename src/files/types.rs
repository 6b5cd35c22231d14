use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
    Image,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Text => "text",
            FileKind::Pdf => "pdf",
            FileKind::Image => "image",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-ready file body.
#[derive(Debug, Clone, PartialEq)]
pub enum FilePayload {
    /// UTF-8 text (plain files and extracted PDF text).
    Text(String),
    /// Base64-encoded raw bytes (images).
    Base64(String),
}

impl FilePayload {
    pub fn as_str(&self) -> &str {
        match self {
            FilePayload::Text(text) => text,
            FilePayload::Base64(encoded) => encoded,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileMetadata {
    Text {
        encoding: &'static str,
        size_bytes: u64,
    },
    Pdf {
        page_count: usize,
        size_bytes: u64,
    },
    Image {
        format: String,
        mime_type: &'static str,
        width: u32,
        height: u32,
        color_mode: String,
        size_bytes: u64,
    },
}

impl FileMetadata {
    pub fn size_bytes(&self) -> u64 {
        match self {
            FileMetadata::Text { size_bytes, .. }
            | FileMetadata::Pdf { size_bytes, .. }
            | FileMetadata::Image { size_bytes, .. } => *size_bytes,
        }
    }
}

/// A file read once, immutable, and dropped after the provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct FileContent {
    pub kind: FileKind,
    pub payload: FilePayload,
    pub metadata: FileMetadata,
    pub source_path: PathBuf,
}

impl FileContent {
    pub fn display_path(&self) -> String {
        self.source_path.display().to_string()
    }

    /// MIME type used when the payload is sent as a data URL.
    pub fn mime_type(&self) -> &'static str {
        match &self.metadata {
            FileMetadata::Image { mime_type, .. } => *mime_type,
            FileMetadata::Pdf { .. } => "application/pdf",
            FileMetadata::Text { .. } => "text/plain",
        }
    }
}

/// Reader failures that fall outside the user-facing error taxonomy.
#[derive(Debug, Error)]
pub enum FileReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    InvalidUtf8 { path: String },

    #[error("{path} is not a readable image: {reason}")]
    InvalidImage { path: String, reason: String },

    #[error("Could not extract text from PDF {path}: {reason}")]
    InvalidPdf { path: String, reason: String },
}
