//! HTTP request handlers for the pet store API.
//!
//! - [`list`] - List pets with pagination, filtering, and sorting
//! - [`read`] - Read a pet by ID
//! - [`create`] - Create a new pet
//! - [`update`] - Replace an existing pet
//! - [`delete`] - Delete a pet
//! - [`health`] - Health check endpoint
//! - [`openapi`] - OpenAPI document endpoint

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod openapi;
pub mod read;
pub mod update;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use health::health_handler;
pub use list::list_handler;
pub use openapi::openapi_handler;
pub use read::read_handler;
pub use update::update_handler;
