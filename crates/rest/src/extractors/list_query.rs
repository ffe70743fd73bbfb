//! List query extractor.
//!
//! Parses `offset`, `limit`, `filters[field]`, and `sort[field]` from
//! the query string into a [`ListQuery`], applying the configured
//! default and maximum page sizes.
//!
//! Bracketed keys arrive in request order, which matters for multi-key
//! sorts, so parsing goes through `form_urlencoded` rather than a
//! derived `Deserialize` into a map.

use axum::{extract::FromRequestParts, http::request::Parts};
use petstore_model::{ListQuery, SortDirection, SortSpec};
use petstore_persistence::StorageAdapter;

use crate::error::RestError;
use crate::state::AppState;

/// Axum extractor for list query parameters.
///
/// # Example
///
/// ```rust,ignore
/// use petstore_rest::extractors::ListParams;
///
/// async fn list_handler(ListParams(query): ListParams) {
///     let offset = query.offset;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ListParams(pub ListQuery);

/// Splits `filters[name]` into `("filters", "name")`.
fn bracketed<'a>(key: &'a str) -> Option<(&'a str, &'a str)> {
    let open = key.find('[')?;
    if !key.ends_with(']') {
        return None;
    }
    let field = &key[open + 1..key.len() - 1];
    if field.is_empty() {
        return None;
    }
    Some((&key[..open], field))
}

fn parse_u64(key: &str, value: &str) -> Result<u64, RestError> {
    value.parse().map_err(|_| RestError::BadRequest {
        message: format!("Parameter '{}' must be a non-negative integer, got '{}'", key, value),
    })
}

impl<S> FromRequestParts<AppState<S>> for ListParams
where
    S: StorageAdapter + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let mut query = ListQuery {
            limit: state.default_page_size(),
            ..ListQuery::default()
        };
        let mut sort = SortSpec::new();

        let raw = parts.uri.query().unwrap_or("");
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "offset" => query.offset = parse_u64("offset", &value)?,
                "limit" => {
                    // Oversized limits are clamped, not rejected.
                    query.limit = parse_u64("limit", &value)?.min(state.max_page_size());
                }
                other => match bracketed(other) {
                    Some(("filters", field)) => {
                        query.filters.insert(field.to_string(), value.to_string());
                    }
                    Some(("sort", field)) => {
                        let direction =
                            SortDirection::parse(&value).ok_or_else(|| RestError::BadRequest {
                                message: format!(
                                    "Sort direction for '{}' must be 'asc' or 'desc', got '{}'",
                                    field, value
                                ),
                            })?;
                        sort.push(field, direction);
                    }
                    // Unrelated parameters are ignored.
                    _ => {}
                },
            }
        }

        query.sort = sort;
        Ok(ListParams(query))
    }
}
