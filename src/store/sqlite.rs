//! SQLite-backed key-value store.

use derive_new::new;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use super::{KeyValueStore, StoreError, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Insertable row for upserting a value.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::kv_entries)]
struct NewKvEntry {
    name: String,
    value: String,
}

/// Key-value store persisted to a SQLite file.
///
/// Every call opens its own connection, so a store handle is cheap to
/// clone and holds no open file between calls.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and applies
    /// pending migrations.
    ///
    /// `":memory:"` is not useful here since each call gets a fresh
    /// connection; use [`MemoryStore`](super::MemoryStore) instead.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path))]
    pub fn open(db_path: impl Into<String>) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.into(),
        };
        info!(path = %store.db_path, "Opening SQLite store");

        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migration failed: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");

        Ok(store)
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;
        let value = schema::kv_entries::table
            .find(key)
            .select(schema::kv_entries::value)
            .first::<String>(&mut conn)
            .optional()?;
        debug!(found = value.is_some(), "Looked up key");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        diesel::replace_into(schema::kv_entries::table)
            .values(&NewKvEntry::new(key.to_string(), value.to_string()))
            .execute(&mut conn)?;
        debug!("Stored value");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::kv_entries::table.find(key)).execute(&mut conn)?;
        debug!(removed, "Removed key");
        Ok(())
    }
}
