//! # petstore-model - Shared domain types
//!
//! The vocabulary shared by the persistence and REST crates: the [`Pet`]
//! aggregate, the typed [`PetInput`] request body with field-level
//! validation, and the list/query types ([`ListQuery`], [`ListPage`],
//! [`SortSpec`]) that carry pagination, filtering, and sorting through the
//! system.
//!
//! Nothing in this crate performs I/O; every type here is a plain value
//! passed by ownership between layers.

#![warn(missing_docs)]

pub mod list;
pub mod pet;
pub mod validation;

pub use list::{ListPage, ListQuery, SortDirection, SortSpec};
pub use pet::{Pet, PetInput, Vaccination};
pub use validation::{FieldError, validate_list_query};
