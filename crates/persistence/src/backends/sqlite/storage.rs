//! `StorageAdapter` implementation for the SQLite backend.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use petstore_model::{ListPage, ListQuery, Pet, Vaccination};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use uuid::Uuid;

use crate::adapter::StorageAdapter;
use crate::error::{BackendError, StorageResult};

use super::backend::SqliteBackend;
use super::query::{build_order_by, build_where};

const PET_COLUMNS: &str = "id, name, tag, created_at, updated_at";

/// Timestamps are stored as fixed-width RFC 3339 strings so that
/// lexicographic ORDER BY matches chronological order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            BackendError::Serialization {
                message: format!("invalid stored timestamp '{raw}': {e}"),
            }
            .into()
        })
}

/// A row from the `pets` table before vaccinations are attached.
struct PetRow {
    id: String,
    name: String,
    tag: Option<String>,
    created_at: String,
    updated_at: Option<String>,
}

impl PetRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            tag: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    fn into_pet(self, vaccinations: Vec<Vaccination>) -> StorageResult<Pet> {
        Ok(Pet {
            id: self.id,
            name: self.name,
            tag: self.tag,
            vaccinations,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: self
                .updated_at
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
        })
    }
}

fn load_vaccinations(conn: &Connection, pet_id: &str) -> StorageResult<Vec<Vaccination>> {
    let mut stmt =
        conn.prepare("SELECT name FROM vaccinations WHERE pet_id = ?1 ORDER BY rowid")?;
    let names = stmt
        .query_map(params![pet_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names.into_iter().map(Vaccination::new).collect())
}

fn find_row(conn: &Connection, id: &str) -> StorageResult<Option<PetRow>> {
    let row = conn
        .query_row(
            &format!("SELECT {PET_COLUMNS} FROM pets WHERE id = ?1"),
            params![id],
            PetRow::from_row,
        )
        .optional()?;
    Ok(row)
}

#[async_trait]
impl StorageAdapter for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        self.name()
    }

    async fn resolve_list(&self, query: ListQuery) -> StorageResult<ListPage<Pet>> {
        let where_clause = build_where(&query)?;
        let order_by = build_order_by(&query)?;
        let conn = self.connection()?;

        let count: u64 = {
            let sql = format!("SELECT COUNT(*) FROM pets{}", where_clause.sql);
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row(rusqlite::params_from_iter(&where_clause.params), |row| {
                row.get::<_, i64>(0)
            })? as u64
        };

        let rows = {
            let sql = format!(
                "SELECT {PET_COLUMNS} FROM pets{}{} LIMIT ?{} OFFSET ?{}",
                where_clause.sql,
                order_by,
                where_clause.params.len() + 1,
                where_clause.params.len() + 2,
            );
            let mut stmt = conn.prepare(&sql)?;
            let mut bound: Vec<rusqlite::types::Value> = where_clause
                .params
                .iter()
                .map(|p| rusqlite::types::Value::Text(p.clone()))
                .collect();
            // A wrapped-to-negative LIMIT means unlimited and a negative
            // OFFSET means 0 in SQLite, so saturate instead of casting.
            bound.push(rusqlite::types::Value::Integer(
                i64::try_from(query.limit).unwrap_or(i64::MAX),
            ));
            bound.push(rusqlite::types::Value::Integer(
                i64::try_from(query.offset).unwrap_or(i64::MAX),
            ));
            stmt.query_map(rusqlite::params_from_iter(bound), PetRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let vaccinations = load_vaccinations(&conn, &row.id)?;
            items.push(row.into_pet(vaccinations)?);
        }

        tracing::debug!(
            count,
            returned = items.len(),
            offset = query.offset,
            limit = query.limit,
            "resolved pet list"
        );
        Ok(ListPage::resolved(query, items, count))
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Pet>> {
        let conn = self.connection()?;
        match find_row(&conn, id)? {
            Some(row) => {
                let vaccinations = load_vaccinations(&conn, id)?;
                Ok(Some(row.into_pet(vaccinations)?))
            }
            None => Ok(None),
        }
    }

    async fn persist(&self, mut pet: Pet) -> StorageResult<Pet> {
        if pet.id.is_empty() {
            pet.id = Uuid::new_v4().to_string();
        }

        let mut conn = self.connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing_created_at: Option<String> = tx
            .query_row(
                "SELECT created_at FROM pets WHERE id = ?1",
                params![pet.id],
                |row| row.get(0),
            )
            .optional()?;

        // Truncated to the stored precision so the returned aggregate
        // compares equal to a re-read.
        let now = Utc::now().trunc_subsecs(6);
        match existing_created_at {
            Some(raw) => {
                pet.created_at = parse_timestamp(&raw)?;
                pet.updated_at = Some(now);
                tx.execute(
                    "UPDATE pets SET name = ?2, tag = ?3, updated_at = ?4 WHERE id = ?1",
                    params![pet.id, pet.name, pet.tag, format_timestamp(&now)],
                )?;
            }
            None => {
                pet.created_at = now;
                pet.updated_at = None;
                tx.execute(
                    "INSERT INTO pets (id, name, tag, created_at, updated_at) \
                     VALUES (?1, ?2, ?3, ?4, NULL)",
                    params![pet.id, pet.name, pet.tag, format_timestamp(&now)],
                )?;
            }
        }

        // Vaccinations are replaced wholesale on every write.
        tx.execute("DELETE FROM vaccinations WHERE pet_id = ?1", params![pet.id])?;
        for vaccination in &pet.vaccinations {
            tx.execute(
                "INSERT INTO vaccinations (pet_id, name) VALUES (?1, ?2)",
                params![pet.id, vaccination.name],
            )?;
        }

        tx.commit()?;
        tracing::debug!(id = %pet.id, "persisted pet");
        Ok(pet)
    }

    async fn remove(&self, pet: &Pet) -> StorageResult<()> {
        let mut conn = self.connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM vaccinations WHERE pet_id = ?1", params![pet.id])?;
        tx.execute("DELETE FROM pets WHERE id = ?1", params![pet.id])?;
        tx.commit()?;
        tracing::debug!(id = %pet.id, "removed pet");
        Ok(())
    }
}
