//! SQLite storage backend.
//!
//! Pets live in a `pets` table with a child `vaccinations` table,
//! replaced wholesale on every write. Connections come from an r2d2
//! pool; file-backed databases run in WAL mode.

mod backend;
mod query;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteConfig};
