//! # petstore-rest - Pet Store RESTful API
//!
//! This crate provides the HTTP layer of the pet store: CRUD and list
//! operations over the `Pet` resource, hypermedia link enrichment, an
//! OpenAPI description, CORS, and structured logging.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use petstore_rest::{ServerConfig, create_app};
//! use petstore_persistence::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("pets.db")?;
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list | GET | `/pets` |
//! | create | POST | `/pets` |
//! | read | GET | `/pets/{id}` |
//! | update | PUT | `/pets/{id}` |
//! | delete | DELETE | `/pets/{id}` |
//! | health | GET | `/health` |
//! | openapi | GET | `/openapi.json` |
//!
//! List queries take `offset`, `limit`, `filters[field]=value`, and
//! `sort[field]=asc|desc` parameters; filterable fields are `name` and
//! `tag`, sortable fields `name`, `tag`, and `createdAt`.
//!
//! ## Error Handling
//!
//! All errors render as `{"error": {"code", "message", "fields"?}}`:
//!
//! | HTTP Status | Code | Description |
//! |-------------|------|-------------|
//! | 400 | invalid | Malformed request / validation failure |
//! | 404 | not-found | Pet does not exist |
//! | 500 | internal | Storage or link-generation failure |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and the JSON error envelope
//! - [`config`] - Server configuration
//! - [`state`] - Application state (resolvers, configuration)
//! - [`resolver`] - List and single-item resolution pipelines
//! - [`links`] - Hypermedia link enrichment
//! - [`extractors`] - Axum extractors for list query parameters
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod links;
pub mod resolver;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::RestError;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use petstore_persistence::StorageAdapter;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function; for more control, use
/// [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: StorageAdapter + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use petstore_rest::{ServerConfig, create_app_with_config};
/// use petstore_persistence::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: StorageAdapter + 'static,
{
    info!(backend = storage.backend_name(), "Creating REST API server");

    let state = AppState::new(Arc::new(storage), config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            config.request_timeout,
        )));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "petstore_rest={level},petstore_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
