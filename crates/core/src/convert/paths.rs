//! Output path derivation.

use std::path::{Path, PathBuf};

/// Derives the output path for a conversion: same directory, same stem,
/// desired extension.
///
/// If the result would be byte-identical to the source path (the target
/// extension equals the current one), a `-converted` suffix is inserted
/// before the extension so the output never overwrites the input before
/// the input is deleted.
pub fn derive_output_path(source: &Path, desired_ext: &str) -> PathBuf {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let candidate = dir.join(format!("{stem}.{desired_ext}"));
    if candidate == source {
        dir.join(format!("{stem}-converted.{desired_ext}"))
    } else {
        candidate
    }
}
