//! Error types for the conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

use super::mime::{Category, MimeType};

/// Errors that can occur while classifying, routing, or converting a file.
///
/// Every variant renders as human-readable text; the server returns these
/// messages verbatim to the calling agent instead of crashing the serve
/// loop. Engine-missing variants carry install instructions since the agent
/// on the other end can often act on them.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source MIME type could not be determined.
    #[error("Could not detect source MIME type for '{}'. The file must exist, be a regular file, and have a recognized extension.", path.display())]
    NotDetected { path: PathBuf },

    /// Source and target resolve to different categories.
    ///
    /// Fields are named `from`/`to` rather than `source` so thiserror does
    /// not treat the source MIME type as an error cause.
    #[error("Unsupported conversion from '{from}' to '{to}': conversions must stay within the same category (image, audio, video, or document)")]
    UnsupportedPair { from: MimeType, to: MimeType },

    /// Recognized category, but no resolution table entry for the target.
    #[error("Unsupported target {category} MIME type: '{target}'")]
    UnsupportedTarget {
        category: Category,
        target: MimeType,
    },

    /// The ffmpeg binary could not be spawned.
    #[error("FFmpeg is required for audio/video conversion but was not found at '{}'. Install 'ffmpeg' and ensure it is on your PATH. On macOS: brew install ffmpeg; on Ubuntu/Debian: sudo apt-get update && sudo apt-get install -y ffmpeg; on Windows: winget install Gyan.FFmpeg.", path.display())]
    FfmpegNotFound { path: PathBuf },

    /// The LibreOffice soffice binary could not be spawned.
    #[error("LibreOffice is required for document conversion but was not found at '{}'. Install LibreOffice and ensure 'soffice' is on your PATH. On macOS: brew install --cask libreoffice; on Ubuntu/Debian: sudo apt-get update && sudo apt-get install -y libreoffice; on Windows: winget install 'The Document Foundation.LibreOffice'.", path.display())]
    SofficeNotFound { path: PathBuf },

    /// ffmpeg exited non-zero.
    #[error("Transcode failed: ffmpeg exited with code {}.{}", exit_code(.code), stderr_excerpt(.stderr))]
    TranscodeFailed {
        code: Option<i32>,
        stderr: Option<String>,
    },

    /// soffice exited non-zero.
    #[error("Document conversion failed: soffice exited with code {}. Verify that LibreOffice can open the source file, e.g. by running 'soffice --headless --convert-to pdf <file>' manually.{}", exit_code(.code), stderr_excerpt(.stderr))]
    DocumentFailed {
        code: Option<i32>,
        stderr: Option<String>,
    },

    /// The image library could not decode the source or encode the target.
    #[error("Image conversion failed: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Creates a transcode failure from an engine exit.
    pub fn transcode_failed(code: Option<i32>, stderr: String) -> Self {
        Self::TranscodeFailed {
            code,
            stderr: non_empty(stderr),
        }
    }

    /// Creates a document conversion failure from an engine exit.
    pub fn document_failed(code: Option<i32>, stderr: String) -> Self {
        Self::DocumentFailed {
            code,
            stderr: non_empty(stderr),
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn exit_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "unknown (terminated by signal)".to_string(),
    }
}

fn stderr_excerpt(stderr: &Option<String>) -> String {
    match stderr {
        Some(s) => {
            // Keep the tail; ffmpeg puts the actual error last.
            let tail = if s.len() > 500 {
                let mut start = s.len() - 500;
                while !s.is_char_boundary(start) {
                    start += 1;
                }
                format!("...{}", &s[start..])
            } else {
                s.clone()
            };
            format!(" Engine output: {tail}")
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_engine_messages_are_actionable() {
        let err = ConvertError::FfmpegNotFound {
            path: PathBuf::from("ffmpeg"),
        };
        let msg = err.to_string();
        assert!(msg.contains("apt-get install -y ffmpeg"));
        assert!(msg.contains("brew install ffmpeg"));

        let err = ConvertError::SofficeNotFound {
            path: PathBuf::from("soffice"),
        };
        let msg = err.to_string();
        assert!(msg.contains("libreoffice"));
        assert!(msg.contains("PATH"));
    }

    #[test]
    fn test_unsupported_pair_names_both_mime_types() {
        let err = ConvertError::UnsupportedPair {
            from: "image/png".parse().unwrap(),
            to: "audio/mpeg".parse().unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'image/png'"));
        assert!(msg.contains("'audio/mpeg'"));
        // The MIME fields describe the request, not an underlying error.
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_transcode_failed_includes_stderr_tail() {
        let err = ConvertError::transcode_failed(Some(1), "Unknown encoder 'libx999'".to_string());
        let msg = err.to_string();
        assert!(msg.contains("exited with code 1"));
        assert!(msg.contains("Unknown encoder"));
    }

    #[test]
    fn test_transcode_failed_drops_empty_stderr() {
        let err = ConvertError::transcode_failed(Some(1), "   ".to_string());
        assert!(matches!(
            err,
            ConvertError::TranscodeFailed { stderr: None, .. }
        ));
        assert!(!err.to_string().contains("Engine output"));
    }

    #[test]
    fn test_signal_exit_renders() {
        let err = ConvertError::transcode_failed(None, String::new());
        assert!(err.to_string().contains("terminated by signal"));
    }
}
