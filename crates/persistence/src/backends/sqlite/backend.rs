//! SQLite backend construction and connection pooling.

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::{BackendError, StorageResult};

use super::schema;

const BACKEND_NAME: &str = "sqlite";

/// Configuration for the SQLite backend.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to the database file, or `None` for an in-memory database.
    pub path: Option<PathBuf>,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// How long to wait for a free connection before giving up.
    pub connection_timeout: Duration,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 8,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

/// SQLite-backed storage adapter.
pub struct SqliteBackend {
    pub(super) pool: Pool<SqliteConnectionManager>,
}

impl SqliteBackend {
    /// Create an in-memory backend, used mainly by tests.
    pub fn in_memory() -> StorageResult<Self> {
        Self::with_config(SqliteConfig::default())
    }

    /// Open (or create) a file-backed database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::with_config(SqliteConfig {
            path: Some(path.as_ref().to_path_buf()),
            ..SqliteConfig::default()
        })
    }

    /// Build a backend from explicit configuration.
    pub fn with_config(config: SqliteConfig) -> StorageResult<Self> {
        // An in-memory database is private to its connection, so the
        // pool must hold exactly one connection to see a single store.
        let (manager, max_size) = match &config.path {
            Some(path) => {
                let manager = SqliteConnectionManager::file(path).with_init(|conn| {
                    conn.pragma_update(None, "journal_mode", "WAL")?;
                    conn.pragma_update(None, "synchronous", "NORMAL")?;
                    conn.pragma_update(None, "foreign_keys", "ON")?;
                    conn.pragma_update(None, "busy_timeout", 5000)?;
                    Ok(())
                });
                (manager, config.max_connections)
            }
            None => {
                let manager = SqliteConnectionManager::memory()
                    .with_init(|conn| conn.pragma_update(None, "foreign_keys", "ON"));
                (manager, 1)
            }
        };

        let pool = Pool::builder()
            .max_size(max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| BackendError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: e.to_string(),
            })?;

        let backend = Self { pool };
        let conn = backend.connection()?;
        schema::init_schema(&conn)?;
        Ok(backend)
    }

    /// Check out a connection from the pool.
    pub(super) fn connection(
        &self,
    ) -> StorageResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|_| {
            BackendError::PoolExhausted {
                backend_name: BACKEND_NAME.to_string(),
            }
            .into()
        })
    }

    pub(super) fn name(&self) -> &'static str {
        BACKEND_NAME
    }
}
