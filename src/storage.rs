use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// The slot holding the serialized task list.
pub const TODOS_KEY: &str = "todos";

/// A one-table key-value store backed by SQLite, standing in for the
/// browser's localStorage.
pub struct Storage {
    db: Connection,
}

impl Storage {
    /// Open the journal database at the given path, creating the slot
    /// table if it does not exist yet.
    pub fn open(path: &Path) -> Result<Storage> {
        let db = Connection::open(path)
            .with_context(|| format!("Failed to open journal at {}.", path.display()))?;
        Storage::init(db)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Storage> {
        let db = Connection::open_in_memory().context("Failed to open in-memory journal.")?;
        Storage::init(db)
    }

    fn init(db: Connection) -> Result<Storage> {
        db.execute(
            "CREATE TABLE if not exists slot (
                      key             TEXT PRIMARY KEY,
                      value           TEXT NOT NULL
                      )",
            [],
        )
        .context("Failed to create slot table.")?;
        Ok(Storage { db })
    }

    /// Return the value stored under a key, if any.
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .query_row(
                "SELECT value FROM slot WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .context("Failed to read slot from database.")?;
        Ok(value)
    }

    /// Replace the value stored under a key.
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .execute(
                "INSERT OR REPLACE INTO slot (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .context("Failed to write slot to database.")?;
        Ok(())
    }
}
