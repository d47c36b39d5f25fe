//! Saving the enhanced image to disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use enhancer_core::workflow::EnhancedDownload;

/// Where the enhanced image should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Exact output path.
    File(PathBuf),
    /// Directory; the suggested `enhanced-<filename>` name is used.
    Directory(PathBuf),
}

impl Target {
    pub fn resolve(&self, download: &EnhancedDownload) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Directory(dir) => dir.join(&download.filename),
        }
    }
}

/// Write the image bytes and return the path written.
pub fn save(download: &EnhancedDownload, target: &Target) -> anyhow::Result<PathBuf> {
    let path = target.resolve(download);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    write_bytes(&path, &download.image.bytes)?;

    tracing::info!(
        path = %path.display(),
        media_type = %download.image.media_type,
        bytes = download.image.bytes.len(),
        "Saved enhanced image",
    );
    Ok(path)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
