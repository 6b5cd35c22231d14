use std::fs;
use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ColorType, GenericImageView, ImageFormat};
use tracing::debug;

use super::types::{FileContent, FileKind, FileMetadata, FilePayload, FileReadError};

pub(super) fn read(path: &Path) -> Result<FileContent, FileReadError> {
    let shown = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| FileReadError::Io {
        path: shown.clone(),
        source,
    })?;

    let invalid = |reason: String| FileReadError::InvalidImage {
        path: shown.clone(),
        reason,
    };

    let format = image::guess_format(&bytes).map_err(|err| invalid(err.to_string()))?;
    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(|err| invalid(err.to_string()))?;
    let (width, height) = decoded.dimensions();

    let metadata = FileMetadata::Image {
        format: format_label(format),
        mime_type: format.to_mime_type(),
        width,
        height,
        color_mode: color_mode(decoded.color()),
        size_bytes: bytes.len() as u64,
    };

    debug!(path = %shown, width, height, "validated image");

    Ok(FileContent {
        kind: FileKind::Image,
        payload: FilePayload::Base64(STANDARD.encode(&bytes)),
        metadata,
        source_path: path.to_path_buf(),
    })
}

fn format_label(format: ImageFormat) -> String {
    format
        .extensions_str()
        .first()
        .map(|ext| ext.to_uppercase())
        .unwrap_or_else(|| format!("{format:?}").to_uppercase())
}

fn color_mode(color: ColorType) -> String {
    let label = match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "L16",
        ColorType::La16 => "LA16",
        ColorType::Rgb16 => "RGB16",
        ColorType::Rgba16 => "RGBA16",
        ColorType::Rgb32F => "RGB32F",
        ColorType::Rgba32F => "RGBA32F",
        other => return format!("{other:?}"),
    };
    label.to_string()
}
