//! Update handler: `PUT /pets/{id}`.

use axum::{
    Json,
    extract::{Path, State},
};
use petstore_model::PetInput;
use petstore_persistence::StorageAdapter;
use tracing::debug;

use crate::error::RestError;
use crate::links::EnrichedPet;
use crate::state::AppState;

/// Handler for replacing a pet's full state.
///
/// PUT never creates: the target must exist. Vaccinations are replaced
/// wholesale with the set in the body.
///
/// # HTTP Request
///
/// `PUT /pets/{id}`
///
/// # Response
///
/// - `200 OK` - The stored pet with `updatedAt` stamped
/// - `400 Bad Request` - Validation failure, naming each bad field
/// - `404 Not Found` - No pet with that id
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(input): Json<PetInput>,
) -> Result<Json<EnrichedPet>, RestError>
where
    S: StorageAdapter + 'static,
{
    debug!(id = %id, "Processing update request");

    let pet = state.pets().update(&id, input).await?;
    Ok(Json(pet))
}
