//! Source MIME detection.
//!
//! Detection is purely extension-based: the file's extension is looked up
//! in a static table, with a single read-only stat to confirm the path is
//! a regular file. No magic-byte sniffing. The stat happens once here; the
//! file can still disappear before the backend runs (accepted TOCTOU
//! window).

use std::path::Path;
use tracing::debug;

use super::mime::MimeType;

/// Detects the source MIME type for a path.
///
/// Returns `None` (not an error) when the path does not exist, is not a
/// regular file, has an extension with no known MIME mapping, or maps to a
/// MIME type outside the supported categories.
pub async fn detect_source_mime(path: &Path) -> Option<MimeType> {
    let meta = match tokio::fs::metadata(path).await {
        Ok(meta) => meta,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "source stat failed");
            return None;
        }
    };
    if !meta.is_file() {
        debug!(path = %path.display(), "source is not a regular file");
        return None;
    }

    let guess = mime_guess::from_path(path).first()?;
    let mime = MimeType::parse(guess.essence_str()).ok()?;

    // Only the four supported categories count as detected.
    mime.category().map(|_| mime)
}
