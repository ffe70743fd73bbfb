//! Axum extractors for pet store request data.
//!
//! - [`ListParams`] - Extract and validate list query parameters

mod list_query;

pub use list_query::ListParams;
