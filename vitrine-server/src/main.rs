//! Vitrine gallery server binary.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_core::blob::S3BlobStore;
use vitrine_core::store::PostgresDatabase;
use vitrine_core::GalleryService;
use vitrine_server::{AppState, Config, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // Override via RUST_LOG.
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let database = PostgresDatabase::connect(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to postgres")?;
    database
        .initialize_schema()
        .await
        .context("failed to run migrations")?;
    info!("database ready");

    let blobs = S3BlobStore::connect(
        &config.blob_bucket,
        config.blob_endpoint_url.as_deref(),
        &config.blob_public_base_url,
    )
    .await;
    info!(bucket = %config.blob_bucket, "blob store ready");

    let gallery = GalleryService::new(
        Arc::new(database.album_store()),
        Arc::new(database.photo_store()),
        Arc::new(blobs),
    );

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let state = AppState::new(gallery, config);
    let router = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install ctrl-c handler");
        return;
    }
    info!("shutdown signal received");
}
