//! Loading source images from disk

use std::path::Path;

use anyhow::{anyhow, Context};
use image::{DynamicImage, ImageFormat};
use media_storage::SourceImage;
use tracing::debug;

/// Reads an image file and renders its thumbnail
///
/// The MIME type is taken from the file extension. The thumbnail fits within a
/// `thumbnail_size` square and keeps the aspect ratio; images already that small
/// are used as their own thumbnail.
///
/// # Errors
///
/// Returns an error if the extension is not a known image type or the file
/// cannot be decoded
pub fn load_source_image(path: &Path, thumbnail_size: u32) -> anyhow::Result<SourceImage> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid image path: {}", path.display()))?
        .to_string();

    let mime = ImageFormat::from_path(path)
        .with_context(|| format!("Unknown image type: {}", path.display()))?
        .to_mime_type()
        .to_string();

    let original =
        image::open(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    let thumbnail = render_thumbnail(&original, thumbnail_size);

    debug!(
        "Loaded {} ({}, {}x{}, thumbnail {}x{})",
        name,
        mime,
        original.width(),
        original.height(),
        thumbnail.width(),
        thumbnail.height()
    );

    Ok(SourceImage {
        name,
        mime,
        original,
        thumbnail,
    })
}

fn render_thumbnail(original: &DynamicImage, size: u32) -> DynamicImage {
    if original.width() <= size && original.height() <= size {
        original.clone()
    } else {
        original.thumbnail(size, size)
    }
}
