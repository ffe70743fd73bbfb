//! SQLite schema definition.

use rusqlite::Connection;

use crate::error::StorageResult;

/// Create tables and indexes if they do not exist yet.
pub(super) fn init_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS pets (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            tag         TEXT,
            created_at  TEXT NOT NULL,
            updated_at  TEXT
        );

        CREATE TABLE IF NOT EXISTS vaccinations (
            pet_id  TEXT NOT NULL REFERENCES pets(id) ON DELETE CASCADE,
            name    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pets_name ON pets(name);
        CREATE INDEX IF NOT EXISTS idx_pets_tag ON pets(tag);
        CREATE INDEX IF NOT EXISTS idx_pets_created_at ON pets(created_at);
        CREATE INDEX IF NOT EXISTS idx_vaccinations_pet_id ON vaccinations(pet_id);
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }
}
