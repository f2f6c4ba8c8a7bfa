//! Conversion dispatch: category closure, target resolution, backend
//! routing.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::detect::detect_source_mime;
use super::document::SofficeBackend;
use super::error::ConvertError;
use super::image::ImageBackend;
use super::media::FfmpegBackend;
use super::mime::{Category, MimeType};
use super::runner::{EngineRunner, ProcessRunner};
use super::targets::{
    resolve_audio_target, resolve_document_target, resolve_image_target, resolve_video_target,
};
use crate::config::EngineConfig;

/// A single conversion request, owned by the dispatch call that made it.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source_path: PathBuf,
    pub source_mime: MimeType,
    pub target_mime: MimeType,
}

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub output_path: PathBuf,
}

/// The orchestration entry point.
///
/// Holds no mutable state; the resolution tables are static data and the
/// backends are stateless, so one dispatcher serves concurrent independent
/// requests. Two concurrent requests for the same source file race on
/// deletion and are not supported.
pub struct Dispatcher {
    image: ImageBackend,
    media: FfmpegBackend,
    document: SofficeBackend,
}

impl Dispatcher {
    /// Creates a dispatcher spawning real engine processes.
    pub fn new(engines: &EngineConfig) -> Self {
        Self::with_runner(engines, Arc::new(ProcessRunner))
    }

    /// Creates a dispatcher with a custom engine runner (tests).
    pub fn with_runner(engines: &EngineConfig, runner: Arc<dyn EngineRunner>) -> Self {
        Self {
            image: ImageBackend::new(),
            media: FfmpegBackend::new(engines.ffmpeg_path.clone(), runner.clone()),
            document: SofficeBackend::new(engines.soffice_path.clone(), runner),
        }
    }

    /// Detects the source MIME type, then dispatches.
    ///
    /// This is the caller-facing entry: classification failure surfaces as
    /// `NotDetected` before any routing happens.
    pub async fn convert_file(
        &self,
        source_path: &Path,
        target_mime: &MimeType,
    ) -> Result<ConversionResult, ConvertError> {
        let source_mime =
            detect_source_mime(source_path)
                .await
                .ok_or_else(|| ConvertError::NotDetected {
                    path: source_path.to_path_buf(),
                })?;

        self.dispatch(ConversionRequest {
            source_path: source_path.to_path_buf(),
            source_mime,
            target_mime: target_mime.clone(),
        })
        .await
    }

    /// Routes a classified request to its backend.
    ///
    /// Image/audio/video requests must stay within their category; document
    /// sources accept any recognized document target regardless of the
    /// source subtype. No retries, no cross-category fallback, no partial
    /// results.
    pub async fn dispatch(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConvertError> {
        let ConversionRequest {
            source_path,
            source_mime,
            target_mime,
        } = request;

        let category = source_mime
            .category()
            .ok_or_else(|| ConvertError::NotDetected {
                path: source_path.clone(),
            })?;

        info!(
            source = %source_path.display(),
            from = %source_mime,
            to = %target_mime,
            %category,
            "dispatching conversion"
        );

        // Category closure for the prefix-based categories
        if category != Category::Document && target_mime.category() != Some(category) {
            return Err(ConvertError::UnsupportedPair {
                from: source_mime,
                to: target_mime,
            });
        }

        let output_path = match category {
            Category::Image => {
                let target = resolve_image_target(&target_mime).ok_or_else(|| {
                    ConvertError::UnsupportedTarget {
                        category,
                        target: target_mime.clone(),
                    }
                })?;
                self.image.convert(&source_path, &target).await?
            }
            Category::Audio => {
                let target = resolve_audio_target(&target_mime).ok_or_else(|| {
                    ConvertError::UnsupportedTarget {
                        category,
                        target: target_mime.clone(),
                    }
                })?;
                self.media.convert_audio(&source_path, &target).await?
            }
            Category::Video => {
                let target = resolve_video_target(&target_mime).ok_or_else(|| {
                    ConvertError::UnsupportedTarget {
                        category,
                        target: target_mime.clone(),
                    }
                })?;
                self.media.convert_video(&source_path, &target).await?
            }
            Category::Document => {
                let target = resolve_document_target(&target_mime).ok_or_else(|| {
                    ConvertError::UnsupportedTarget {
                        category,
                        target: target_mime.clone(),
                    }
                })?;
                self.document.convert(&source_path, &target).await?
            }
        };

        Ok(ConversionResult { output_path })
    }
}
