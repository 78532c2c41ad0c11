mod api;
mod middleware;

use std::sync::Arc;

use relax_catalog::CatalogClient;
use relax_core::{AppConfig, Environment};
use relax_search::{Aggregator, AggregatorConfig, CatalogApi, PoolConfig, WorkerPool};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = relax_core::load_app_config()?;
    init_tracing(&config)?;

    let client = CatalogClient::with_base_url(
        &config.catalog_base_url,
        &config.catalog_api_key,
        &config.catalog_api_version,
        config.catalog_request_timeout_secs,
        &config.catalog_user_agent,
    )?;
    let catalog: Arc<dyn CatalogApi> = Arc::new(client);
    let pool = Arc::new(WorkerPool::new(PoolConfig::from_app_config(&config)));
    let aggregator = Aggregator::new(catalog, pool, AggregatorConfig::from_app_config(&config));

    if config.locations.is_empty() {
        tracing::warn!("RELAX_LOCATIONS is empty; every search will return []");
    }
    tracing::info!(?config, "starting relax-server");

    let app = build_app(AppState {
        aggregator: Arc::new(aggregator),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    if matches!(config.env, Environment::Production) {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
