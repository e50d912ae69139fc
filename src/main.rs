//! fuelhub-api server entry point.
//!
//! Starts the Axum HTTP server after connecting to PostgreSQL and
//! applying pending migrations.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use fuelhub_api::api;
use fuelhub_api::app_state::AppState;
use fuelhub_api::config::AppConfig;
use fuelhub_api::persistence::PgStore;
use fuelhub_api::service::{CatalogService, OrderService, PricingService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting fuelhub-api");

    // Connect to PostgreSQL and apply migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database ready");

    // Build persistence and service layers
    let store = PgStore::new(pool);
    let app_state = AppState {
        catalog: Arc::new(CatalogService::new(store.clone())),
        pricing: Arc::new(PricingService::new(
            store.clone(),
            config.monthly_interest_rate,
        )),
        orders: Arc::new(OrderService::new(store)),
        deviation_threshold_pct: config.deviation_threshold_pct,
    };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
