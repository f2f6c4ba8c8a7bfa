//! LibreOffice-backed document conversion.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::ConvertError;
use super::paths::derive_output_path;
use super::runner::EngineRunner;
use super::targets::DocumentTarget;

/// Converts documents by spawning LibreOffice in headless batch mode.
///
/// soffice writes `<stem>.<ext>` into the source's directory following its
/// own naming convention. When that differs from the derived output path
/// (the `-converted` collision case) the engine output is renamed,
/// best-effort: if the rename fails the engine's own path is returned
/// instead. The source is deleted only after a successful conversion.
pub struct SofficeBackend {
    soffice_path: PathBuf,
    runner: Arc<dyn EngineRunner>,
}

impl SofficeBackend {
    pub fn new(soffice_path: PathBuf, runner: Arc<dyn EngineRunner>) -> Self {
        Self {
            soffice_path,
            runner,
        }
    }

    fn build_args(source: &Path, target: &DocumentTarget, out_dir: &Path) -> Vec<String> {
        vec![
            "--headless".to_string(),
            "--convert-to".to_string(),
            target.convert_to.to_string(),
            "--outdir".to_string(),
            out_dir.to_string_lossy().into_owned(),
            source.to_string_lossy().into_owned(),
        ]
    }

    pub async fn convert(
        &self,
        source: &Path,
        target: &DocumentTarget,
    ) -> Result<PathBuf, ConvertError> {
        let out_dir = source.parent().unwrap_or_else(|| Path::new("."));
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Where soffice will write, per its naming convention
        let engine_output = out_dir.join(format!("{stem}.{}", target.ext));
        let desired_output = derive_output_path(source, target.ext);

        let args = Self::build_args(source, target, out_dir);
        let exit = self
            .runner
            .run(&self.soffice_path, &args)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConvertError::SofficeNotFound {
                        path: self.soffice_path.clone(),
                    }
                } else {
                    ConvertError::Io(e)
                }
            })?;

        if !exit.success {
            return Err(ConvertError::document_failed(exit.code, exit.stderr));
        }

        let output = if engine_output == desired_output {
            engine_output
        } else {
            // Best-effort: fall back to the engine's own path if the
            // rename does not go through.
            match tokio::fs::rename(&engine_output, &desired_output).await {
                Ok(()) => desired_output,
                Err(e) => {
                    warn!(
                        from = %engine_output.display(),
                        to = %desired_output.display(),
                        error = %e,
                        "rename of engine output failed, keeping engine path"
                    );
                    engine_output
                }
            }
        };

        // When the rename fell back, the engine output may still sit at the
        // source path; deleting it would delete the converted document.
        if output.as_path() != source {
            match tokio::fs::remove_file(source).await {
                Ok(()) => {}
                // Same-extension conversions: the engine wrote over the source
                // and the rename above already moved it away.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        info!(source = %source.display(), output = %output.display(), "document converted");

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::mime::MimeType;
    use crate::convert::runner::testing::{MissingEngineRunner, MockRunner};
    use crate::convert::targets::resolve_document_target;
    use std::fs::File;

    fn target(mime: &str) -> DocumentTarget {
        resolve_document_target(&MimeType::parse(mime).unwrap()).unwrap()
    }

    #[test]
    fn test_build_args_wire_shape() {
        let args = SofficeBackend::build_args(
            Path::new("/docs/report.docx"),
            &target("application/pdf"),
            Path::new("/docs"),
        );
        assert_eq!(
            args,
            vec![
                "--headless",
                "--convert-to",
                "pdf",
                "--outdir",
                "/docs",
                "/docs/report.docx"
            ]
        );
    }

    #[tokio::test]
    async fn test_docx_to_pdf_deletes_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("report.docx");
        File::create(&source).unwrap();
        // Simulate the engine having produced its output
        let engine_output = dir.path().join("report.pdf");
        File::create(&engine_output).unwrap();

        let runner = Arc::new(MockRunner::succeeding());
        let backend = SofficeBackend::new(PathBuf::from("soffice"), runner.clone());

        let output = backend
            .convert(&source, &target("application/pdf"))
            .await
            .unwrap();

        assert_eq!(output, engine_output);
        assert!(!source.exists());
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_same_extension_renames_engine_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        File::create(&source).unwrap();

        // Engine convention and derived path collide with the source here,
        // so the derived path carries the -converted suffix and the engine
        // output gets renamed onto it.
        let engine_output = dir.path().join("notes.txt");
        std::fs::write(&engine_output, b"converted").unwrap();

        let backend = SofficeBackend::new(
            PathBuf::from("soffice"),
            Arc::new(MockRunner::succeeding()),
        );

        let output = backend.convert(&source, &target("text/plain")).await.unwrap();
        assert_eq!(output, dir.path().join("notes-converted.txt"));
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_rename_failure_falls_back_to_engine_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        std::fs::write(&source, b"converted in place").unwrap();

        // A directory squatting on the derived path makes the rename fail,
        // so the backend must report the engine's own path instead and must
        // not delete the file sitting there.
        std::fs::create_dir(dir.path().join("notes-converted.txt")).unwrap();

        let backend = SofficeBackend::new(
            PathBuf::from("soffice"),
            Arc::new(MockRunner::succeeding()),
        );

        let output = backend.convert(&source, &target("text/plain")).await.unwrap();
        assert_eq!(output, dir.path().join("notes.txt"));
        assert!(output.is_file());
    }

    #[tokio::test]
    async fn test_failed_engine_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.odt");
        File::create(&source).unwrap();

        let backend = SofficeBackend::new(
            PathBuf::from("soffice"),
            Arc::new(MockRunner::failing(77, "source file could not be loaded")),
        );

        let err = backend
            .convert(&source, &target("application/pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::DocumentFailed { code: Some(77), .. }));
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_missing_soffice_is_actionable() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("report.docx");
        File::create(&source).unwrap();

        let backend =
            SofficeBackend::new(PathBuf::from("soffice"), Arc::new(MissingEngineRunner));

        let err = backend
            .convert(&source, &target("application/pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::SofficeNotFound { .. }));
        assert!(err.to_string().contains("LibreOffice"));
        assert!(source.exists());
    }
}
