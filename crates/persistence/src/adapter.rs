//! The storage adapter trait implemented by every backend.

use async_trait::async_trait;
use petstore_model::{ListPage, ListQuery, Pet};

use crate::error::StorageResult;

/// The single seam between the HTTP layer and a concrete database.
///
/// Implementations are shared behind `Arc` across request handlers, so
/// every method takes `&self` and the trait requires `Send + Sync`.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// A short identifier for the backend, used in logs and errors.
    fn backend_name(&self) -> &'static str;

    /// Resolve a page of pets along with the total count of matches.
    ///
    /// The count reflects the filter set only and is independent of
    /// `offset`/`limit`. The returned page echoes the query verbatim.
    async fn resolve_list(&self, query: ListQuery) -> StorageResult<ListPage<Pet>>;

    /// Look up a single pet by id. Absence is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Pet>>;

    /// Insert or replace a pet, returning the stored representation.
    ///
    /// A pet with an empty id is assigned a fresh one. On insert the
    /// backend stamps `created_at`; on replace it preserves the original
    /// `created_at` and stamps `updated_at`. Vaccinations are replaced
    /// wholesale in the same transaction.
    async fn persist(&self, pet: Pet) -> StorageResult<Pet>;

    /// Delete a pet and its vaccinations.
    async fn remove(&self, pet: &Pet) -> StorageResult<()>;
}
