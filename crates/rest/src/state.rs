//! Application state for the pet store REST API.
//!
//! This module defines the shared application state that is available to
//! all request handlers: the resolvers over the storage backend, the
//! route table used for link generation, and server configuration.

use std::sync::Arc;

use petstore_persistence::StorageAdapter;

use crate::config::ServerConfig;
use crate::links::{LinkSpec, RoutePaths};
use crate::resolver::{ListResolver, PetResolver};

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`StorageAdapter`])
pub struct AppState<S> {
    /// Collection resolution pipeline.
    lists: ListResolver<S>,

    /// Single-item pipeline (find, create, update, remove).
    pets: PetResolver<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is behind Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            lists: self.lists.clone(),
            pets: self.pets.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: StorageAdapter> AppState<S> {
    /// Creates a new AppState over the given storage and configuration,
    /// using the default pet route table and link spec.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        let paths = Arc::new(RoutePaths::pet_defaults());
        let link_spec = Arc::new(LinkSpec::pet_defaults());
        Self {
            lists: ListResolver::new(
                Arc::clone(&storage),
                Arc::clone(&paths),
                Arc::clone(&link_spec),
            ),
            pets: PetResolver::new(storage, paths, link_spec),
            config: Arc::new(config),
        }
    }

    /// Returns the list resolution pipeline.
    pub fn lists(&self) -> &ListResolver<S> {
        &self.lists
    }

    /// Returns the single-item pipeline.
    pub fn pets(&self) -> &PetResolver<S> {
        &self.pets
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the default page size for list results.
    pub fn default_page_size(&self) -> u64 {
        self.config.default_page_size
    }

    /// Returns the maximum page size for list results.
    pub fn max_page_size(&self) -> u64 {
        self.config.max_page_size
    }
}
