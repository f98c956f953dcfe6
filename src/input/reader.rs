use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::api::ImageUpload;
use crate::session::MAX_IMAGE_BYTES;

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("heic", "image/heic"),
];

/// Guesses a MIME type from the file extension.
///
/// Unknown extensions map to `application/octet-stream`, which the session
/// rejects as a non-image.
pub fn mime_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .and_then(|ext| {
            IMAGE_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or("application/octet-stream")
}

pub struct ImageReader;

impl ImageReader {
    /// Loads an image file for upload.
    ///
    /// Files over the upload limit are refused before being read.
    pub fn read(path: &Path) -> Result<ImageUpload> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        if !metadata.is_file() {
            bail!("Not a file: {}", path.display());
        }

        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > MAX_IMAGE_BYTES {
            bail!(
                "Image size ({:.1} MB) exceeds maximum allowed size (5 MB).\n\n\
                 Please choose a smaller image.",
                size as f64 / 1024.0 / 1024.0
            );
        }

        let data =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(ImageUpload::new(file_name, mime_type_for(path), data))
    }
}
