//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::{Connection, params};
use tracing::{debug, info};
use crate::Result;
use crate::record::{LocationRecord, NewRecord};
use super::{schema, RecordStore};

const SELECT_COLUMNS: &str =
    "SELECT id, label, note, latitude, longitude, date, time, captured_at FROM locations";

/// SQLite-backed storage for location records
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;
        let store = Self { conn, path: Some(path.to_path_buf()) };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn, path: None };
        store.initialize()?;
        Ok(store)
    }

    /// Create the schema if it does not exist yet. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Backing file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Count all records
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a LocationRecord
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<LocationRecord> {
        Ok(LocationRecord {
            id: row.get(0)?,
            label: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            note: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            latitude: row.get(3)?,
            longitude: row.get(4)?,
            date: row.get(5)?,
            time: row.get(6)?,
            captured_at: row.get(7)?,
        })
    }
}

impl RecordStore for SqliteStore {
    fn insert(&self, record: &NewRecord) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            r#"
            INSERT INTO locations (label, note, latitude, longitude, date, time, captured_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.label,
                record.note,
                record.latitude,
                record.longitude,
                record.date,
                record.time,
                record.captured_at,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        debug!(id, label = %record.label, "Inserted location");
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<LocationRecord>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn delete_by_id(&self, id: i64) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM locations WHERE id = ?1", [id])?;
        debug!(id, removed, "Deleted location");
        Ok(removed > 0)
    }

    fn delete_all(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM locations", [])?;
        debug!(removed, "Cleared locations");
        Ok(removed)
    }
}
