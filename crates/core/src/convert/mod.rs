//! Conversion dispatch core.
//!
//! Converts a file on local disk from its detected MIME type to a
//! requested target MIME type:
//!
//! - MIME detection and category classification (`detect`, `mime`)
//! - Per-category target resolution tables (`targets`)
//! - Collision-safe output path derivation (`paths`)
//! - Backend invokers: image crate re-encoding, ffmpeg transcoding,
//!   LibreOffice document conversion (`image`, `media`, `document`)
//! - The dispatcher routing requests to backends (`dispatch`)
//!
//! Conversions never cross category boundaries. Every successful
//! conversion writes the output next to the source and deletes the source;
//! failures leave the source untouched.
//!
//! # Example
//!
//! ```ignore
//! use mimeshift_core::{Dispatcher, EngineConfig, MimeType};
//!
//! let dispatcher = Dispatcher::new(&EngineConfig::default());
//! let target = MimeType::parse("image/jpeg")?;
//! let result = dispatcher.convert_file(Path::new("/tmp/photo.png"), &target).await?;
//! println!("written to {}", result.output_path.display());
//! ```

mod detect;
mod dispatch;
mod document;
mod error;
mod image;
mod media;
mod mime;
mod paths;
mod runner;
mod targets;

pub use detect::detect_source_mime;
pub use dispatch::{ConversionRequest, ConversionResult, Dispatcher};
pub use document::SofficeBackend;
pub use error::ConvertError;
pub use image::ImageBackend;
pub use media::FfmpegBackend;
pub use mime::{Category, MimeType, MimeTypeError};
pub use paths::derive_output_path;
pub use runner::{EngineExit, EngineRunner, ProcessRunner};
pub use targets::{
    resolve_audio_target, resolve_document_target, resolve_image_target, resolve_video_target,
    AudioTarget, DocumentTarget, ImageOutputFormat, ImageTarget, VideoTarget,
};
