//! MIME type value model and category classification.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RFC 2045 restricted-token grammar: `type/subtype`, both sides starting
/// with an alphanumeric and at most 127 characters long.
static MIME_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9!#$&^_.+\-]{0,126}/[a-zA-Z0-9][a-zA-Z0-9!#$&^_.+\-]{0,126}$",
    )
    .expect("MIME grammar regex is valid")
});

/// MIME strings that belong to the document category.
///
/// Unlike image/audio/video there is no `document/` prefix, so membership is
/// an explicit allow-list covering what LibreOffice can open.
const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.oasis.opendocument.text",
    "application/rtf",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.oasis.opendocument.spreadsheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.oasis.opendocument.presentation",
    "text/plain",
    "text/html",
    "text/markdown",
    "text/csv",
];

/// A validated `type/subtype` MIME string.
///
/// Immutable once constructed; only compared and inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MimeType(String);

/// Error returned when a string does not match the MIME grammar.
#[derive(Debug, Clone, Error)]
#[error("Invalid MIME type '{0}': expected type/subtype, e.g. application/pdf or image/png")]
pub struct MimeTypeError(pub String);

impl MimeType {
    /// Parses and validates a MIME string against the grammar.
    pub fn parse(value: &str) -> Result<Self, MimeTypeError> {
        if MIME_TYPE_RE.is_match(value) {
            Ok(Self(value.to_ascii_lowercase()))
        } else {
            Err(MimeTypeError(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The supported category this MIME type falls into, if any.
    pub fn category(&self) -> Option<Category> {
        Category::of(self)
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MimeType {
    type Err = MimeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MimeType {
    type Error = MimeTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MimeType> for String {
    fn from(mime: MimeType) -> Self {
        mime.0
    }
}

/// Supported conversion categories.
///
/// Conversions are only routed within a category; the dispatcher never
/// crosses category boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Image,
    Audio,
    Video,
    Document,
}

impl Category {
    /// Classifies a MIME type into a supported category.
    ///
    /// Image/audio/video are recognized by prefix; documents by the
    /// explicit allow-list. Anything else is unsupported.
    pub fn of(mime: &MimeType) -> Option<Self> {
        let s = mime.as_str();
        if s.starts_with("image/") {
            Some(Self::Image)
        } else if s.starts_with("audio/") {
            Some(Self::Audio)
        } else if s.starts_with("video/") {
            Some(Self::Video)
        } else if DOCUMENT_MIME_TYPES.contains(&s) {
            Some(Self::Document)
        } else {
            None
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Document => "document",
        };
        f.write_str(name)
    }
}
