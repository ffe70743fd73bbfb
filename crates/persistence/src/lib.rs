//! # petstore-persistence - Storage layer for the pet store API
//!
//! This crate owns the persisted representation of the [`Pet`] aggregate.
//! It exposes a single capability interface, [`StorageAdapter`], and one
//! implementation per backing store; the rest of the system depends only on
//! the trait.
//!
//! ## Contract
//!
//! - `resolve_list` materializes a filtered, sorted, paginated page plus a
//!   total count over the filtered set, echoing the query back unchanged.
//! - `find_by_id` signals absence with `None`, never an error.
//! - `persist` is a full-state upsert: insert when the id is unknown,
//!   otherwise replace the scalar fields and the entire child vaccination
//!   set inside one transaction.
//! - `remove` deletes the aggregate and all child rows together.
//!
//! ## Backends
//!
//! - [`backends::sqlite::SqliteBackend`] - relational storage with a
//!   `vaccinations` child table, pooled connections, and WAL for file
//!   databases.
//!
//! [`Pet`]: petstore_model::Pet
//! [`StorageAdapter`]: crate::adapter::StorageAdapter

#![warn(missing_docs)]

pub mod adapter;
pub mod backends;
pub mod error;

pub use adapter::StorageAdapter;
pub use backends::sqlite::{SqliteBackend, SqliteConfig};
pub use error::{BackendError, ResourceError, StorageError, StorageResult, ValidationError};
