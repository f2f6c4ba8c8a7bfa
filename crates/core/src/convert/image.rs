//! In-process image re-encoding backend.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::info;

use super::error::ConvertError;
use super::paths::derive_output_path;
use super::targets::ImageTarget;

/// Re-encodes images through the image crate.
///
/// Decoding and encoding are CPU-bound, so the work runs on the blocking
/// pool. The source is deleted only after the output has been written.
#[derive(Debug, Default)]
pub struct ImageBackend;

impl ImageBackend {
    pub fn new() -> Self {
        Self
    }

    pub async fn convert(
        &self,
        source: &Path,
        target: &ImageTarget,
    ) -> Result<PathBuf, ConvertError> {
        let output = derive_output_path(source, target.ext);

        let src = source.to_path_buf();
        let out = output.clone();
        let target = *target;
        tokio::task::spawn_blocking(move || -> Result<(), ConvertError> {
            let decoded = image::open(&src)?;

            let decoded = if target.format.supports_alpha() {
                decoded
            } else {
                DynamicImage::ImageRgb8(decoded.to_rgb8())
            };

            decoded.save_with_format(&out, target.format.to_image_format())?;
            Ok(())
        })
        .await
        .map_err(|e| ConvertError::Io(std::io::Error::other(e)))??;

        tokio::fs::remove_file(source).await?;
        info!(source = %source.display(), output = %output.display(), "image converted");

        Ok(output)
    }
}
