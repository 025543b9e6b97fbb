//! census server binary.
//!
//! Reads `census.toml` (or the path given with `--config`) and the environment,
//! connects to MongoDB, and serves the citizen API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use census::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::ServerConfig,
    mongodb::MongoDbStore,
    store::DocumentStore,
};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Citizen records API server")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "census.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let server_cfg = ServerConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {:?} and environment", cli.config))?;

    let backend = MongoDbStore::builder(&server_cfg.mongodb_uri, &server_cfg.database)
        .build()
        .await
        .context("failed to create MongoDB client")?;

    backend.ping().await.context("failed to reach MongoDB")?;
    tracing::info!(database = %server_cfg.database, "connected to MongoDB");

    let app = census::app(Arc::new(DocumentStore::new(backend)));
    let address = server_cfg.address();

    tracing::info!("Listening on http://{address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
