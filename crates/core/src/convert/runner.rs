//! The external-engine capability boundary.
//!
//! Spawning an engine process is the one unpredictable seam in the
//! pipeline: the binary may not exist, may fail, or may hang. It is kept
//! behind a narrow trait so backends can be exercised in tests without
//! real engines installed.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Outcome of an engine invocation.
#[derive(Debug, Clone)]
pub struct EngineExit {
    pub success: bool,
    pub code: Option<i32>,
    pub stderr: String,
}

/// Runs an external engine to completion.
///
/// Implementations must surface a spawn failure as the `io::Error` it was,
/// so callers can distinguish a missing binary (`ErrorKind::NotFound`)
/// from other failures.
#[async_trait]
pub trait EngineRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<EngineExit>;
}

/// Production runner: spawns the process and waits for exit.
///
/// There is deliberately no timeout; a hung engine blocks its request.
#[derive(Debug, Default)]
pub struct ProcessRunner;

#[async_trait]
impl EngineRunner for ProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<EngineExit> {
        debug!(program = %program.display(), ?args, "spawning engine");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(EngineExit {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
