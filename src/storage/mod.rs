//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - locations(id, label, note, latitude, longitude, date, time, captured_at)

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::record::{LocationRecord, NewRecord};
use crate::Result;

/// The four operations the recorder needs from a store.
///
/// Every call is applied in full or not at all.
pub trait RecordStore {
    /// Persist a new record and return its freshly assigned id
    fn insert(&self, record: &NewRecord) -> Result<i64>;

    /// All records, in insertion order
    fn list_all(&self) -> Result<Vec<LocationRecord>>;

    /// Remove one record. Returns `false` if no record had that id.
    fn delete_by_id(&self, id: i64) -> Result<bool>;

    /// Remove every record and return how many were removed
    fn delete_all(&self) -> Result<usize>;
}
