//! reelroom-api - HTTP API server for reelroom

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelroom_api::{app, AppState};
use reelroom_blob::{HmacUrlSigner, ObjectGateway, DEFAULT_CACHE_CAPACITY};
use reelroom_db::{create_pool, run_migrations, Database};
use reelroom_inference::HttpChatBackend;
use reelroom_ingest::PgIngestQueue;

/// Server configuration resolved from the environment.
struct ApiConfig {
    bind: SocketAddr,
    database_url: String,
    blob_base_url: String,
    blob_bucket: String,
    blob_signing_secret: String,
    url_cache_capacity: usize,
}

impl ApiConfig {
    fn from_env() -> anyhow::Result<Self> {
        let bind = std::env::var("REELROOM_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()?;
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let blob_base_url = std::env::var("BLOB_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:9000".to_string());
        let blob_bucket =
            std::env::var("BLOB_BUCKET").unwrap_or_else(|_| "reelroom".to_string());
        let blob_signing_secret = std::env::var("BLOB_SIGNING_SECRET")
            .map_err(|_| anyhow::anyhow!("BLOB_SIGNING_SECRET must be set"))?;
        let url_cache_capacity = std::env::var("URL_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_CAPACITY);
        Ok(Self {
            bind,
            database_url,
            blob_base_url,
            blob_bucket,
            blob_signing_secret,
            url_cache_capacity,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reelroom_api=debug,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;
    let db = Database::postgres(pool.clone());

    let signer = Arc::new(HmacUrlSigner::new(
        config.blob_base_url.clone(),
        config.blob_bucket.clone(),
        config.blob_signing_secret.as_bytes(),
    ));
    let gateway = Arc::new(ObjectGateway::with_capacity(
        signer,
        config.url_cache_capacity,
    ));

    let ingest = Arc::new(PgIngestQueue::new(pool));
    let chat = Arc::new(HttpChatBackend::from_env());

    let state = AppState::new(db, gateway, ingest, chat);

    info!(
        bind = %config.bind,
        blob_base_url = %config.blob_base_url,
        url_cache_capacity = config.url_cache_capacity,
        "Starting reelroom-api"
    );

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received, draining");
    tokio::time::sleep(Duration::from_millis(100)).await;
}
