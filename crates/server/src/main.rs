mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mimeshift_core::{
    load_config, validate_config, Config, Dispatcher, EngineRunner, ProcessRunner,
};

use server::ConverterServer;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging. Stdout carries the MCP transport, so all log
    // output goes to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration; an MCP server is usually launched by an agent
    // with no config file at all, so defaults apply when unset.
    let config = match std::env::var("MIMESHIFT_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => Config::default(),
    };

    validate_config(&config).context("Configuration validation failed")?;

    info!("mimeshift {} starting", VERSION);
    info!("ffmpeg path: {:?}", config.engines.ffmpeg_path);
    info!("soffice path: {:?}", config.engines.soffice_path);

    probe_engines(&config).await;

    let dispatcher = Arc::new(Dispatcher::new(&config.engines));
    let service = ConverterServer::new(dispatcher)
        .serve(stdio())
        .await
        .context("Failed to start MCP server on stdio")?;

    info!("File converter MCP server running on stdio");

    service.waiting().await.context("Server error")?;

    info!("Server shutting down");
    Ok(())
}

/// Checks engine availability at startup, log-only: a missing engine still
/// surfaces per-request with install instructions, but flagging it early
/// saves the agent a failed call.
async fn probe_engines(config: &Config) {
    let runner = ProcessRunner;

    for (name, path, version_arg) in [
        ("ffmpeg", &config.engines.ffmpeg_path, "-version"),
        ("soffice", &config.engines.soffice_path, "--version"),
    ] {
        match runner.run(path, &[version_arg.to_string()]).await {
            Ok(_) => info!("{} available at {:?}", name, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "{} not found at {:?}; conversions needing it will fail until it is installed",
                    name, path
                );
            }
            Err(e) => warn!("could not probe {} at {:?}: {}", name, path, e),
        }
    }
}
