use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engines: EngineConfig,
}

/// Paths to the external conversion engines.
///
/// Bare binary names are resolved through `PATH` at spawn time; absolute
/// paths pin a specific installation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Path to the ffmpeg binary (audio/video transcoding).
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Path to the LibreOffice soffice binary (document conversion).
    #[serde(default = "default_soffice_path")]
    pub soffice_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            soffice_path: default_soffice_path(),
        }
    }
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_soffice_path() -> PathBuf {
    PathBuf::from("soffice")
}
