use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use departure_board::bart::FeedClient;
use departure_board::config::AppConfig;
use departure_board::stations::{CacheConfig, CachedStationCatalog, StationCatalog};
use departure_board::transport::{MockTransport, ReqwestTransport, SharedTransport};
use departure_board::web::{AppState, create_router};

/// How often to refresh the station catalog (24 hours).
const CATALOG_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;

    let transport: SharedTransport = match &config.mock_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving canned BART responses");
            Arc::new(MockTransport::from_dir(dir)?)
        }
        None => Arc::new(ReqwestTransport::new(config.bart.timeout_secs)?),
    };

    let catalog = Arc::new(CachedStationCatalog::new(
        StationCatalog::new(transport.clone(), config.bart.clone()),
        &CacheConfig {
            ttl: config.service.catalog_ttl,
        },
    ));

    // Warm the catalog; the service retries on first request if this fails
    match catalog.refresh().await {
        Ok(count) => info!(count, "loaded station catalog"),
        Err(e) => warn!(error = %e, "could not load station catalog at startup"),
    }

    let catalog_refresh = catalog.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CATALOG_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match catalog_refresh.refresh().await {
                Ok(count) => info!(count, "refreshed station catalog"),
                Err(e) => error!(error = %e, "failed to refresh station catalog"),
            }
        }
    });

    let state = AppState::new(
        catalog,
        FeedClient::new(transport, config.bart.clone()),
        config.service.clone(),
    );
    let app = create_router(state);

    let addr = config.listen_addr;
    info!("BART departure board listening on http://{addr}");
    info!("  GET /health                     - Health check");
    info!("  GET /api/nearest?lat=..&lon=..  - Nearest station snapshot");
    info!("  GET /api/stations               - Station catalog");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
