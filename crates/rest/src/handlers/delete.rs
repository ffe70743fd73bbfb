//! Delete handler: `DELETE /pets/{id}`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use petstore_persistence::StorageAdapter;
use tracing::debug;

use crate::error::RestError;
use crate::state::AppState;

/// Handler for deleting a pet and its vaccinations.
///
/// # HTTP Request
///
/// `DELETE /pets/{id}`
///
/// # Response
///
/// - `204 No Content` - Deleted
/// - `404 Not Found` - No pet with that id
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, RestError>
where
    S: StorageAdapter + 'static,
{
    debug!(id = %id, "Processing delete request");

    state.pets().remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
