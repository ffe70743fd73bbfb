//! Resolution pipelines over the storage adapter.
//!
//! Handlers stay thin: a [`ListResolver`] turns a validated query into an
//! enriched page, and a [`PetResolver`] covers the single-item
//! operations. Both validate at the boundary, delegate persistence to
//! the [`StorageAdapter`], and decorate results with hypermedia links.

use std::sync::Arc;

use petstore_model::{ListQuery, Pet, PetInput, validate_list_query};
use petstore_persistence::StorageAdapter;
use tracing::debug;

use crate::error::RestError;
use crate::links::{EnrichedList, EnrichedPet, LinkSpec, RoutePaths, enrich_list, enrich_pet};

/// Resolves list queries into enriched pages.
pub struct ListResolver<S> {
    storage: Arc<S>,
    paths: Arc<RoutePaths>,
    spec: Arc<LinkSpec>,
}

impl<S> Clone for ListResolver<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            paths: Arc::clone(&self.paths),
            spec: Arc::clone(&self.spec),
        }
    }
}

impl<S: StorageAdapter> ListResolver<S> {
    /// Creates a resolver over the given storage and link configuration.
    pub fn new(storage: Arc<S>, paths: Arc<RoutePaths>, spec: Arc<LinkSpec>) -> Self {
        Self {
            storage,
            paths,
            spec,
        }
    }

    /// Validates the query against the pet allow-lists, resolves the
    /// page from storage, and enriches items and envelope with links.
    pub async fn resolve(&self, query: ListQuery) -> Result<EnrichedList, RestError> {
        if let Err(errors) =
            validate_list_query(&query, Pet::FILTERABLE_FIELDS, Pet::SORTABLE_FIELDS)
        {
            return Err(RestError::Validation { errors });
        }

        let page = self.storage.resolve_list(query).await?;
        debug!(
            count = page.count,
            returned = page.len(),
            "resolved list page"
        );
        Ok(enrich_list(page, &self.spec, self.paths.as_ref())?)
    }
}

/// Resolves single-item operations: find, create, update, remove.
pub struct PetResolver<S> {
    storage: Arc<S>,
    paths: Arc<RoutePaths>,
    spec: Arc<LinkSpec>,
}

impl<S> Clone for PetResolver<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            paths: Arc::clone(&self.paths),
            spec: Arc::clone(&self.spec),
        }
    }
}

impl<S: StorageAdapter> PetResolver<S> {
    /// Creates a resolver over the given storage and link configuration.
    pub fn new(storage: Arc<S>, paths: Arc<RoutePaths>, spec: Arc<LinkSpec>) -> Self {
        Self {
            storage,
            paths,
            spec,
        }
    }

    /// The backend name, for health reporting.
    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }

    /// Looks up a pet by id; absence is `None`.
    pub async fn find(&self, id: &str) -> Result<Option<EnrichedPet>, RestError> {
        match self.storage.find_by_id(id).await? {
            Some(pet) => Ok(Some(enrich_pet(pet, &self.spec, self.paths.as_ref())?)),
            None => Ok(None),
        }
    }

    /// Validates the input and inserts a new pet with a fresh id.
    pub async fn create(&self, input: PetInput) -> Result<EnrichedPet, RestError> {
        if let Err(errors) = input.validate() {
            return Err(RestError::Validation { errors });
        }

        let pet = self.storage.persist(input.into_pet(String::new())).await?;
        debug!(id = %pet.id, "created pet");
        Ok(enrich_pet(pet, &self.spec, self.paths.as_ref())?)
    }

    /// Replaces an existing pet's full state.
    ///
    /// The target must already exist; updating an absent id is a 404,
    /// never an implicit create.
    ///
    /// The existence check and the persist run as separate storage
    /// transactions. A remove that lands between them re-inserts the
    /// aggregate with a fresh `createdAt`; concurrent writers get
    /// last-write-wins, with no optimistic locking at this layer.
    pub async fn update(&self, id: &str, input: PetInput) -> Result<EnrichedPet, RestError> {
        if let Err(errors) = input.validate() {
            return Err(RestError::Validation { errors });
        }

        if self.storage.find_by_id(id).await?.is_none() {
            return Err(RestError::NotFound { id: id.to_string() });
        }

        let pet = self.storage.persist(input.into_pet(id)).await?;
        debug!(id = %pet.id, "updated pet");
        Ok(enrich_pet(pet, &self.spec, self.paths.as_ref())?)
    }

    /// Deletes an existing pet. Removing an absent id is a 404.
    pub async fn remove(&self, id: &str) -> Result<(), RestError> {
        let pet = self
            .storage
            .find_by_id(id)
            .await?
            .ok_or_else(|| RestError::NotFound { id: id.to_string() })?;

        self.storage.remove(&pet).await?;
        debug!(id = %id, "removed pet");
        Ok(())
    }
}
