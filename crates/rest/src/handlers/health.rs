//! Health check endpoint handler.
//!
//! Provides a simple health check endpoint for monitoring and load balancers.

use axum::{Json, extract::State};
use petstore_persistence::StorageAdapter;
use tracing::debug;

use crate::error::RestError;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - Server is healthy
pub async fn health_handler<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<serde_json::Value>, RestError>
where
    S: StorageAdapter + 'static,
{
    debug!("Processing health check request");

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "backend": state.pets().backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
