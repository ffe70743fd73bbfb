//! Route configuration.
//!
//! Registered paths must stay in step with
//! [`RoutePaths::pet_defaults`](crate::links::RoutePaths::pet_defaults),
//! which generates the hrefs that appear in `_links`.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use petstore_persistence::StorageAdapter;

use crate::handlers;
use crate::state::AppState;

/// Creates all pet store REST API routes.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI document
/// - `GET /pets` - List with pagination, filtering, and sorting
/// - `POST /pets` - Create
/// - `GET /pets/{id}` - Read
/// - `PUT /pets/{id}` - Replace
/// - `DELETE /pets/{id}` - Delete
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: StorageAdapter + 'static,
{
    Router::new()
        // System-level routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/openapi.json", get(handlers::openapi_handler::<S>))
        // Collection routes
        .route("/pets", get(handlers::list_handler::<S>))
        .route("/pets", post(handlers::create_handler::<S>))
        // Item routes
        .route("/pets/{id}", get(handlers::read_handler::<S>))
        .route("/pets/{id}", put(handlers::update_handler::<S>))
        .route("/pets/{id}", delete(handlers::delete_handler::<S>))
        .with_state(state)
}
