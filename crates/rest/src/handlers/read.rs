//! Read handler: `GET /pets/{id}`.

use axum::{
    Json,
    extract::{Path, State},
};
use petstore_persistence::StorageAdapter;
use tracing::debug;

use crate::error::RestError;
use crate::links::EnrichedPet;
use crate::state::AppState;

/// Handler for reading a single pet.
///
/// # HTTP Request
///
/// `GET /pets/{id}`
///
/// # Response
///
/// - `200 OK` - The pet with its `_links`
/// - `404 Not Found` - No pet with that id
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<EnrichedPet>, RestError>
where
    S: StorageAdapter + 'static,
{
    debug!(id = %id, "Processing read request");

    match state.pets().find(&id).await? {
        Some(pet) => Ok(Json(pet)),
        None => Err(RestError::NotFound { id }),
    }
}
