//! Machine Fleet Dashboard Server
//!
//! Serves a synthetic machine-monitoring dataset and the analytics a
//! dashboard renders from it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  MACHINE FLEET DASHBOARD                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────┐ │
//! │  │  API      │  │  Filter      │  │  Aggregates          │ │
//! │  │  Gateway  │─▶│  Predicate   │─▶│  (means, histogram,  │ │
//! │  │  (Axum)   │  │              │  │   correlation, ...)  │ │
//! │  └─────┬─────┘  └──────────────┘  └──────────────────────┘ │
//! │        ▼                                                    │
//! │  ┌─────────────────────┐                                    │
//! │  │ Seeded Dataset      │  (in memory, regenerated on demand)│
//! │  └─────────────────────┘                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod data;
mod models;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::RwLock;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::data::{generate, GeneratorConfig};
use crate::models::Dataset;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "machine_dashboard=debug,tower_http=debug".into());
    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        "Machine Dashboard starting ({} environment)...",
        if config.is_production() { "production" } else { "development" }
    );

    // Build application state
    let state = AppState::new(config.clone());
    tracing::info!(
        "Dataset ready: {} records, seed {}, starting {}",
        state.dataset().await.len(),
        config.dataset_seed,
        config.dataset_start_date
    );

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<RwLock<Arc<Dataset>>>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let dataset = generate(&GeneratorConfig::from_config(&config));
        Self {
            dataset: Arc::new(RwLock::new(Arc::new(dataset))),
            config,
        }
    }

    /// Current dataset. Callers keep computing on it even if it is replaced.
    pub async fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&*self.dataset.read().await)
    }

    /// Swap in a freshly generated dataset
    pub async fn replace_dataset(&self, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);
        *self.dataset.write().await = Arc::clone(&dataset);
        dataset
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let dataset_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/dataset", get(handlers::dataset::get))
        .route("/api/v1/dataset/regenerate", post(handlers::dataset::regenerate))
        .route("/api/v1/filters", get(handlers::dataset::filter_options))
        .route("/api/v1/records", get(handlers::dataset::records));

    let analytics_routes = Router::new()
        .route("/api/v1/dashboard", get(handlers::analytics::dashboard))
        .route("/api/v1/overview", get(handlers::analytics::overview))
        .route("/api/v1/analytics/sensor-means", get(handlers::analytics::sensor_means))
        .route("/api/v1/analytics/status-distribution", get(handlers::analytics::status_distribution))
        .route("/api/v1/analytics/maintenance", get(handlers::analytics::maintenance))
        .route("/api/v1/analytics/sensor1-histogram", get(handlers::analytics::sensor1_histogram))
        .route("/api/v1/analytics/operating-time", get(handlers::analytics::operating_time))
        .route("/api/v1/analytics/sensor-scatter", get(handlers::analytics::sensor_scatter))
        .route("/api/v1/analytics/correlation", get(handlers::analytics::correlation))
        .route("/api/v1/analytics/trend", get(handlers::analytics::trend));

    let export_routes = Router::new()
        .route("/api/v1/export", get(handlers::export::download));

    // Combine all routes
    Router::new()
        .merge(dataset_routes)
        .merge(analytics_routes)
        .merge(export_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
