use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemBlobStore;
use tracing::{Level, error, info, warn};

use server::config::AppConfig;
use server::database;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = database::connect(&config.database)
        .await
        .context("Invalid database configuration")?;
    // Keep serving without a database; requests that need it will fail.
    match database::sync_schema(&db).await {
        Ok(()) => info!("Connected to database"),
        Err(e) => error!("Database connection failed: {e}"),
    }

    let blob_store = FilesystemBlobStore::new(
        &config.storage.upload_dir,
        config.storage.max_upload_size,
    )
    .await
    .context("Failed to open upload directory")?;
    info!(root = %blob_store.root().display(), "Upload area ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, db.clone(), Arc::new(blob_store));
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = db.close().await {
        warn!("Failed to close database pool: {e}");
    }
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}
