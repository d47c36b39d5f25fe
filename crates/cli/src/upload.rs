//! Reading a local image into a [`SelectedFile`].

use std::path::Path;

use anyhow::Context;
use enhancer_core::workflow::SelectedFile;
use image::ImageFormat;

/// Media type used when neither the content nor the extension identify
/// an image. The workflow rejects it.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Identify the media type from magic bytes, falling back to the
/// file extension.
pub fn detect_media_type(path: &Path, bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

/// Read `path` from disk as a file selection.
pub fn read_selected_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;

    let media_type = detect_media_type(path, &bytes).to_string();
    tracing::debug!(filename = %filename, media_type = %media_type, bytes = bytes.len(), "Read image file");

    Ok(SelectedFile {
        filename,
        media_type,
        bytes,
    })
}
