//! FFmpeg-backed audio and video transcoding.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::error::ConvertError;
use super::paths::derive_output_path;
use super::runner::EngineRunner;
use super::targets::{AudioTarget, VideoTarget};

/// Transcodes audio and video by spawning ffmpeg.
///
/// The wire contract is `ffmpeg -y -i <source> <encoder args…> <output>`;
/// exit code 0 is success. The source is deleted only after a successful
/// exit, so a failed transcode leaves it intact.
pub struct FfmpegBackend {
    ffmpeg_path: PathBuf,
    runner: Arc<dyn EngineRunner>,
}

impl FfmpegBackend {
    pub fn new(ffmpeg_path: PathBuf, runner: Arc<dyn EngineRunner>) -> Self {
        Self {
            ffmpeg_path,
            runner,
        }
    }

    pub async fn convert_audio(
        &self,
        source: &Path,
        target: &AudioTarget,
    ) -> Result<PathBuf, ConvertError> {
        self.transcode(source, target.encoder_args, target.ext).await
    }

    pub async fn convert_video(
        &self,
        source: &Path,
        target: &VideoTarget,
    ) -> Result<PathBuf, ConvertError> {
        self.transcode(source, target.encoder_args, target.ext).await
    }

    fn build_args(source: &Path, encoder_args: &[&str], output: &Path) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            source.to_string_lossy().into_owned(),
        ];
        args.extend(encoder_args.iter().map(|a| a.to_string()));
        args.push(output.to_string_lossy().into_owned());
        args
    }

    async fn transcode(
        &self,
        source: &Path,
        encoder_args: &[&str],
        ext: &str,
    ) -> Result<PathBuf, ConvertError> {
        let output = derive_output_path(source, ext);
        let args = Self::build_args(source, encoder_args, &output);

        let exit = self
            .runner
            .run(&self.ffmpeg_path, &args)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConvertError::FfmpegNotFound {
                        path: self.ffmpeg_path.clone(),
                    }
                } else {
                    ConvertError::Io(e)
                }
            })?;

        if !exit.success {
            return Err(ConvertError::transcode_failed(exit.code, exit.stderr));
        }

        tokio::fs::remove_file(source).await?;
        info!(source = %source.display(), output = %output.display(), "transcode complete");

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::mime::MimeType;
    use crate::convert::runner::testing::{MissingEngineRunner, MockRunner};
    use crate::convert::targets::{resolve_audio_target, resolve_video_target};
    use std::fs::File;

    fn audio_target(mime: &str) -> AudioTarget {
        resolve_audio_target(&MimeType::parse(mime).unwrap()).unwrap()
    }

    fn video_target(mime: &str) -> VideoTarget {
        resolve_video_target(&MimeType::parse(mime).unwrap()).unwrap()
    }

    #[test]
    fn test_build_args_wire_shape() {
        let args = FfmpegBackend::build_args(
            Path::new("/in/a.flac"),
            &["-c:a", "libmp3lame", "-b:a", "192k"],
            Path::new("/in/a.mp3"),
        );
        assert_eq!(
            args,
            vec!["-y", "-i", "/in/a.flac", "-c:a", "libmp3lame", "-b:a", "192k", "/in/a.mp3"]
        );
    }

    #[test]
    fn test_build_args_no_encoder_args() {
        // WAV: container default, nothing between source and output
        let args = FfmpegBackend::build_args(Path::new("/a.mp3"), &[], Path::new("/a.wav"));
        assert_eq!(args, vec!["-y", "-i", "/a.mp3", "/a.wav"]);
    }

    #[tokio::test]
    async fn test_successful_audio_transcode_deletes_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("track.flac");
        File::create(&source).unwrap();

        let runner = Arc::new(MockRunner::succeeding());
        let backend = FfmpegBackend::new(PathBuf::from("ffmpeg"), runner.clone());

        let output = backend
            .convert_audio(&source, &audio_target("audio/mpeg"))
            .await
            .unwrap();

        assert_eq!(output, dir.path().join("track.mp3"));
        assert!(!source.exists());
        assert_eq!(runner.call_count(), 1);

        let (program, args) = runner.last_call().unwrap();
        assert_eq!(program, PathBuf::from("ffmpeg"));
        assert_eq!(args[0], "-y");
        assert!(args.contains(&"libmp3lame".to_string()));
    }

    #[tokio::test]
    async fn test_failed_transcode_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("clip.avi");
        File::create(&source).unwrap();

        let runner = Arc::new(MockRunner::failing(1, "Invalid data found"));
        let backend = FfmpegBackend::new(PathBuf::from("ffmpeg"), runner);

        let err = backend
            .convert_video(&source, &video_target("video/mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::TranscodeFailed { code: Some(1), .. }));
        assert!(err.to_string().contains("Invalid data found"));
        assert!(source.exists(), "source must survive a failed transcode");
    }

    #[tokio::test]
    async fn test_missing_ffmpeg_is_actionable() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("clip.mkv");
        File::create(&source).unwrap();

        let backend = FfmpegBackend::new(
            PathBuf::from("/opt/ffmpeg/bin/ffmpeg"),
            Arc::new(MissingEngineRunner),
        );

        let err = backend
            .convert_video(&source, &video_target("video/webm"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::FfmpegNotFound { .. }));
        assert!(err.to_string().contains("/opt/ffmpeg/bin/ffmpeg"));
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_video_transcode_output_extension() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("movie.mp4");
        File::create(&source).unwrap();

        let backend = FfmpegBackend::new(
            PathBuf::from("ffmpeg"),
            Arc::new(MockRunner::succeeding()),
        );

        let output = backend
            .convert_video(&source, &video_target("video/x-matroska"))
            .await
            .unwrap();
        assert_eq!(output, dir.path().join("movie.mkv"));
    }
}
