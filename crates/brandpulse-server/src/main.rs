mod api;
mod middleware;

use std::sync::Arc;

use brandpulse_core::MentionStore;
use brandpulse_db::{PgMentionStore, PoolConfig};
use brandpulse_sentiment::{build_classifier, build_source_client, IngestionPipeline};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = brandpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        news_backend = %config.news_backend,
        sentiment_backend = %config.sentiment_backend,
        table = %config.mentions_table,
        "starting brandpulse-server"
    );
    if config.news_backend == brandpulse_core::NewsBackend::GNews && config.news_api_key.is_none()
    {
        tracing::error!("NEWS_API_KEY not set; fetch-and-store will find no articles");
    }

    let pool_config = PoolConfig::from_app_config(&config);
    let pool = brandpulse_db::connect_pool(
        &config.database_url,
        config.database_name.as_deref(),
        pool_config,
    )
    .await?;
    brandpulse_db::run_migrations(&pool).await?;

    let pg_store = PgMentionStore::new(pool, &config.mentions_table)?;
    pg_store.ensure_table().await?;
    let store: Arc<dyn MentionStore> = Arc::new(pg_store);

    let source = build_source_client(&config)?;
    let classifier = build_classifier(&config)?;
    let pipeline = Arc::new(IngestionPipeline::new(
        source,
        classifier,
        Arc::clone(&store),
    ));

    let app = build_app(AppState { pipeline, store }, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
