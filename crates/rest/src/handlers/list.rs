//! List handler: `GET /pets`.

use axum::{Json, extract::State};
use petstore_persistence::StorageAdapter;
use tracing::debug;

use crate::error::RestError;
use crate::extractors::ListParams;
use crate::links::EnrichedList;
use crate::state::AppState;

/// Handler for listing pets.
///
/// # HTTP Request
///
/// `GET /pets?offset=0&limit=20&filters[tag]=dog&sort[name]=asc`
///
/// # Response
///
/// - `200 OK` - The resolved page, echoing the query parameters
///   alongside `count`, `items`, and collection `_links`
/// - `400 Bad Request` - Malformed parameters or unknown filter/sort
///   fields, naming each offending key
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    ListParams(query): ListParams,
) -> Result<Json<EnrichedList>, RestError>
where
    S: StorageAdapter + 'static,
{
    debug!(
        offset = query.offset,
        limit = query.limit,
        filters = query.filters.len(),
        sort_keys = query.sort.len(),
        "Processing list request"
    );

    let page = state.lists().resolve(query).await?;
    Ok(Json(page))
}
