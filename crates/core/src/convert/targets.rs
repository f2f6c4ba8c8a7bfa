//! Per-category target resolution tables.
//!
//! Each table is a pure function from a target MIME type to the parameters
//! its backend needs: output extension plus either an encoder format name
//! (image), an ffmpeg argument list (audio/video), or a soffice conversion
//! directive (document). The tables are plain static data; absence of an
//! entry means the target is unsupported.

use super::mime::MimeType;

/// Image encoder format families supported by the image backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutputFormat {
    Jpeg,
    Png,
    WebP,
    Avif,
    Tiff,
}

impl ImageOutputFormat {
    /// Maps to the image crate's format tag.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::WebP => image::ImageFormat::WebP,
            Self::Avif => image::ImageFormat::Avif,
            Self::Tiff => image::ImageFormat::Tiff,
        }
    }

    /// Whether the encoder accepts an alpha channel.
    ///
    /// JPEG does not; sources with alpha are flattened to RGB first.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

/// Resolved parameters for an image conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTarget {
    pub format: ImageOutputFormat,
    pub ext: &'static str,
}

/// Resolved parameters for an audio transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioTarget {
    pub ext: &'static str,
    /// Encoder arguments inserted between `-i <source>` and the output
    /// path. Empty means the container default (e.g. WAV → pcm_s16le).
    pub encoder_args: &'static [&'static str],
}

/// Resolved parameters for a video transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoTarget {
    pub ext: &'static str,
    pub encoder_args: &'static [&'static str],
}

/// Resolved parameters for a document conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentTarget {
    pub ext: &'static str,
    /// Directive passed to `soffice --convert-to`.
    pub convert_to: &'static str,
}

/// Resolves a target image MIME type.
///
/// `image/jpg` is not a registered MIME type but appears in the wild; it
/// maps to the jpeg family like `image/jpeg`.
pub fn resolve_image_target(target: &MimeType) -> Option<ImageTarget> {
    let target = match target.as_str() {
        "image/jpeg" | "image/jpg" => ImageTarget {
            format: ImageOutputFormat::Jpeg,
            ext: "jpg",
        },
        "image/png" => ImageTarget {
            format: ImageOutputFormat::Png,
            ext: "png",
        },
        "image/webp" => ImageTarget {
            format: ImageOutputFormat::WebP,
            ext: "webp",
        },
        "image/avif" => ImageTarget {
            format: ImageOutputFormat::Avif,
            ext: "avif",
        },
        "image/tiff" => ImageTarget {
            format: ImageOutputFormat::Tiff,
            ext: "tiff",
        },
        _ => return None,
    };
    Some(target)
}

/// Resolves a target audio MIME type to its ffmpeg encoder preset.
pub fn resolve_audio_target(target: &MimeType) -> Option<AudioTarget> {
    let target = match target.as_str() {
        "audio/mpeg" => AudioTarget {
            ext: "mp3",
            encoder_args: &["-c:a", "libmp3lame", "-b:a", "192k"],
        },
        // Container default: ffmpeg picks pcm_s16le for .wav
        "audio/wav" => AudioTarget {
            ext: "wav",
            encoder_args: &[],
        },
        "audio/ogg" => AudioTarget {
            ext: "ogg",
            encoder_args: &["-c:a", "libvorbis", "-q:a", "5"],
        },
        "audio/webm" => AudioTarget {
            ext: "webm",
            encoder_args: &["-c:a", "libopus", "-b:a", "128k"],
        },
        "audio/flac" => AudioTarget {
            ext: "flac",
            encoder_args: &["-c:a", "flac"],
        },
        "audio/aac" => AudioTarget {
            ext: "aac",
            encoder_args: &["-c:a", "aac", "-b:a", "192k"],
        },
        "audio/mp4" => AudioTarget {
            ext: "m4a",
            encoder_args: &["-c:a", "aac", "-b:a", "192k"],
        },
        _ => return None,
    };
    Some(target)
}

/// Resolves a target video MIME type to its ffmpeg encoder preset.
///
/// mp4/mkv/mov share an H.264 CRF preset with AAC audio; webm uses VP9 in
/// constant-quality mode with Opus; ogg uses Theora/Vorbis quality-factor
/// encoding.
pub fn resolve_video_target(target: &MimeType) -> Option<VideoTarget> {
    const H264_AAC: &[&str] = &[
        "-c:v", "libx264", "-crf", "23", "-preset", "medium", "-c:a", "aac", "-b:a", "192k",
    ];

    let target = match target.as_str() {
        "video/mp4" => VideoTarget {
            ext: "mp4",
            encoder_args: H264_AAC,
        },
        "video/x-matroska" => VideoTarget {
            ext: "mkv",
            encoder_args: H264_AAC,
        },
        "video/quicktime" => VideoTarget {
            ext: "mov",
            encoder_args: H264_AAC,
        },
        "video/webm" => VideoTarget {
            ext: "webm",
            encoder_args: &[
                "-c:v", "libvpx-vp9", "-crf", "32", "-b:v", "0", "-c:a", "libopus",
            ],
        },
        "video/ogg" => VideoTarget {
            ext: "ogv",
            encoder_args: &[
                "-c:v", "libtheora", "-q:v", "7", "-c:a", "libvorbis", "-q:a", "5",
            ],
        },
        _ => return None,
    };
    Some(target)
}

/// Resolves a target document MIME type to its soffice directive.
pub fn resolve_document_target(target: &MimeType) -> Option<DocumentTarget> {
    let target = match target.as_str() {
        "application/pdf" => DocumentTarget {
            ext: "pdf",
            convert_to: "pdf",
        },
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            DocumentTarget {
                ext: "docx",
                convert_to: "docx",
            }
        }
        "application/msword" => DocumentTarget {
            ext: "doc",
            convert_to: "doc",
        },
        "application/vnd.oasis.opendocument.text" => DocumentTarget {
            ext: "odt",
            convert_to: "odt",
        },
        "application/rtf" => DocumentTarget {
            ext: "rtf",
            convert_to: "rtf",
        },
        // Writer's plain-text export filter
        "text/plain" => DocumentTarget {
            ext: "txt",
            convert_to: "txt:Text",
        },
        "text/html" => DocumentTarget {
            ext: "html",
            convert_to: "html",
        },
        _ => return None,
    };
    Some(target)
}
