use std::sync::Arc;

use anyhow::Context;
use relax_catalog::CatalogClient;
use relax_core::AppConfig;
use relax_search::{
    Aggregator, AggregatorConfig, CatalogApi, LocationResult, PoolConfig, SearchTerm, WorkerPool,
};

pub(crate) async fn run_search(config: &AppConfig, term: &str, compact: bool) -> anyhow::Result<()> {
    let term = SearchTerm::parse(term).context("search term must not be empty")?;

    let client = CatalogClient::with_base_url(
        &config.catalog_base_url,
        &config.catalog_api_key,
        &config.catalog_api_version,
        config.catalog_request_timeout_secs,
        &config.catalog_user_agent,
    )?;
    let catalog: Arc<dyn CatalogApi> = Arc::new(client);
    let pool = Arc::new(WorkerPool::new(PoolConfig::from_app_config(config)));
    let aggregator = Aggregator::new(catalog, pool, AggregatorConfig::from_app_config(config));

    if aggregator.locations().is_empty() {
        tracing::warn!("RELAX_LOCATIONS is empty; nothing to search");
    }

    let results = aggregator.search_term(&term).await;
    println!("{}", render(&results, compact)?);
    Ok(())
}

pub(crate) fn render(results: &[LocationResult], compact: bool) -> anyhow::Result<String> {
    if compact {
        let lines = results
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    } else {
        Ok(serde_json::to_string_pretty(results)?)
    }
}
