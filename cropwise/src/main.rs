//! cropwise - crop and fertilizer recommendation service
//!
//! Loads the four fitted artifacts at startup (fatal if any is missing or
//! malformed) and serves the JSON API and HTML form on a fixed port.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use cropwise::config::{resolve_model_dir, BIND_ADDR};
use cropwise::{build_router, AppState, ArtifactStore};

#[derive(Debug, Parser)]
#[command(name = "cropwise", version)]
struct Args {
    /// Directory holding the four fitted artifacts
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting cropwise v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let model_dir = resolve_model_dir(args.model_dir.as_deref());
    info!("Model directory: {}", model_dir.display());

    // Artifact loading is fatal on failure: the service cannot serve
    // without all four artifacts, so abort before binding.
    let artifacts = match ArtifactStore::load(&model_dir) {
        Ok(store) => {
            info!("✓ Loaded crop and fertilizer artifacts");
            store
        }
        Err(e) => {
            error!("Failed to load artifacts: {}", e);
            return Err(e).context("artifact loading failed");
        }
    };

    let state = AppState::new(artifacts);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    info!("cropwise listening on http://{}", BIND_ADDR);
    info!("Health check: http://{}/health", BIND_ADDR);

    axum::serve(listener, app).await?;

    Ok(())
}
