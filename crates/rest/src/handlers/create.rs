//! Create handler: `POST /pets`.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use petstore_model::PetInput;
use petstore_persistence::StorageAdapter;
use tracing::debug;

use crate::error::RestError;
use crate::state::AppState;

/// Handler for creating a pet.
///
/// The id, `createdAt`, and `updatedAt` fields are server-assigned;
/// the body carries only the desired state.
///
/// # HTTP Request
///
/// `POST /pets`
///
/// # Response
///
/// - `201 Created` - The stored pet with its `_links`, plus a
///   `Location` header pointing at the new resource
/// - `400 Bad Request` - Validation failure, naming each bad field
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    Json(input): Json<PetInput>,
) -> Result<Response, RestError>
where
    S: StorageAdapter + 'static,
{
    debug!(name = %input.name, "Processing create request");

    let pet = state.pets().create(input).await?;
    let location = format!("{}/pets/{}", state.base_url(), pet.pet.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(pet),
    )
        .into_response())
}
