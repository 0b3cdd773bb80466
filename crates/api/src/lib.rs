//! # ClinicSync API
//!
//! The API crate provides the web server for the ClinicSync clinic backend. It exposes the
//! doctor-availability sync endpoint and read access to the stored availability.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Persistence and the schedule feed are reached
//! through the `AvailabilityStore` and `FeedSource` traits from `clinicsync-core`.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use clinicsync_core::{
    feed::{FeedSource, FileFeedSource},
    store::AvailabilityStore,
};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Where unified availability is persisted
    pub store: Arc<dyn AvailabilityStore>,
    /// Where the doctor schedule feed is read from on every sync
    pub feed: Arc<dyn FeedSource>,
}

impl ApiState {
    pub fn new(store: Arc<dyn AvailabilityStore>, feed: Arc<dyn FeedSource>) -> Self {
        Self { store, feed }
    }
}

/// Builds the application router with all routes attached to `state`
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Availability endpoints
        .merge(routes::availability::routes())
        // Attach shared state to all routes
        .with_state(state)
        // Log every request
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and availability store
///
/// This function initializes logging, reads the feed location from `config`, configures
/// routes and middleware, and serves until the listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use clinicsync_api::{config::ApiConfig, start_server};
/// use clinicsync_db::MemoryAvailabilityStore;
///
/// let config = ApiConfig::from_env()?;
/// start_server(config, Arc::new(MemoryAvailabilityStore::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(
    config: config::ApiConfig,
    store: Arc<dyn AvailabilityStore>,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let feed = Arc::new(FileFeedSource::new(config.feed_path.clone()));
    info!("Reading doctor schedules from {}", feed.describe());
    let state = Arc::new(ApiState::new(store, feed));

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin {:?}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
