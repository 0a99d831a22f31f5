//! Recorder - the non-visual state behind the location list
//!
//! Holds the last listed snapshot, the user-facing error message, a pending
//! capture waiting for its label and note, and a pending confirmation for
//! destructive operations. The snapshot is never authoritative: it is replaced
//! on every successful refresh and kept as is when a refresh fails.

use crate::format::DisplayFormat;
use crate::location::{LocationProvider, PermissionService, Position};
use crate::record::{LocationRecord, NewRecord};
use crate::storage::RecordStore;
use crate::{Error, Result};
use tracing::{debug, error, info, warn};

pub const PERMISSION_DENIED_MESSAGE: &str = "Location access denied, a new location cannot be saved.";
pub const LOCATION_FAILED_MESSAGE: &str = "Fetching the location failed.";
pub const INVALID_LOCATION_MESSAGE: &str = "The location is not a valid position.";

/// Result of a confirmed delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deleted {
    pub confirmation: Confirmation,
    /// Rows the store actually removed
    pub removed: usize,
}

impl Deleted {
    /// One-line report of what the delete did
    pub fn summary(&self) -> String {
        match (self.confirmation, self.removed) {
            (Confirmation::DeleteOne(id), 0) => format!("No location #{}", id),
            (Confirmation::DeleteOne(id), _) => format!("Deleted #{}", id),
            (Confirmation::DeleteAll, 0) => "No saved locations".to_string(),
            (Confirmation::DeleteAll, 1) => "Deleted 1 location".to_string(),
            (Confirmation::DeleteAll, n) => format!("Deleted {} locations", n),
        }
    }
}

/// A destructive operation waiting for the user's OK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    DeleteOne(i64),
    DeleteAll,
}

impl Confirmation {
    /// Question shown to the user
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::DeleteOne(_) => "Are you sure you want to delete the location?",
            Confirmation::DeleteAll => "Are you sure you want to delete all data?",
        }
    }
}

pub struct Recorder<S: RecordStore> {
    store: S,
    format: DisplayFormat,
    records: Vec<LocationRecord>,
    error_message: Option<String>,
    capture: Option<Position>,
    pending: Option<Confirmation>,
}

impl<S: RecordStore> Recorder<S> {
    pub fn new(store: S, format: DisplayFormat) -> Self {
        Self {
            store,
            format,
            records: Vec::new(),
            error_message: None,
            capture: None,
            pending: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Last successfully listed records
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn pending(&self) -> Option<Confirmation> {
        self.pending
    }

    pub fn pending_capture(&self) -> Option<&Position> {
        self.capture.as_ref()
    }

    /// Reload the snapshot from the store
    pub fn refresh(&mut self) -> Result<()> {
        match self.store.list_all() {
            Ok(records) => {
                debug!(count = records.len(), "Refreshed locations");
                self.records = records;
                Ok(())
            }
            Err(e) => {
                error!("Failed to list locations: {}", e);
                Err(e)
            }
        }
    }

    // ========== Add flow ==========

    /// Ask for permission and read the current position.
    ///
    /// While an error message is showing, adding stays blocked until
    /// [`Recorder::clear_error`] is called.
    pub fn begin_capture(
        &mut self,
        permission: &dyn PermissionService,
        provider: &dyn LocationProvider,
    ) -> Result<Position> {
        if let Some(message) = &self.error_message {
            return Err(Error::Blocked(message.clone()));
        }

        if !permission.request_foreground_access().is_granted() {
            warn!("Foreground location access denied");
            self.error_message = Some(PERMISSION_DENIED_MESSAGE.to_string());
            return Err(Error::PermissionDenied);
        }

        match provider.current_position() {
            Ok(position) => {
                debug!(latitude = position.latitude, longitude = position.longitude, "Position read");
                self.capture = Some(position);
                Ok(position)
            }
            Err(e) => {
                warn!("Failed to read position: {}", e);
                let message = match e {
                    Error::InvalidCoordinates { .. } => INVALID_LOCATION_MESSAGE,
                    _ => LOCATION_FAILED_MESSAGE,
                };
                self.error_message = Some(message.to_string());
                Err(e)
            }
        }
    }

    /// Store the pending capture under the given label and note.
    ///
    /// Once the insert succeeds the id is returned even if the refresh after
    /// it fails; the snapshot is then stale until the next refresh.
    pub fn save_capture(&mut self, label: &str, note: &str) -> Result<i64> {
        let position = self.capture.take().ok_or(Error::NoPendingCapture)?;
        let (date, time) = self.format.stamp(position.timestamp)?;

        let record = NewRecord::new(label, note)
            .with_coordinates(position.latitude, position.longitude)
            .with_stamp(date, time)
            .with_captured_at(position.timestamp.unix_timestamp());

        let id = match self.store.insert(&record) {
            Ok(id) => id,
            Err(e) => {
                error!("Failed to save location: {}", e);
                return Err(e);
            }
        };
        info!(id, label, "Saved location");

        let _ = self.refresh();
        Ok(id)
    }

    pub fn cancel_capture(&mut self) {
        self.capture = None;
    }

    // ========== Delete flow ==========

    pub fn request_delete(&mut self, id: i64) -> Confirmation {
        let confirmation = Confirmation::DeleteOne(id);
        self.pending = Some(confirmation);
        confirmation
    }

    pub fn request_clear(&mut self) -> Confirmation {
        self.pending = Some(Confirmation::DeleteAll);
        Confirmation::DeleteAll
    }

    /// Run the pending confirmation and refresh.
    ///
    /// A refresh failure after a successful delete is logged, not returned.
    pub fn confirm(&mut self) -> Result<Deleted> {
        let confirmation = self.pending.take().ok_or(Error::NothingToConfirm)?;

        let outcome = match confirmation {
            Confirmation::DeleteOne(id) => self.store.delete_by_id(id).map(|removed| {
                if !removed {
                    debug!(id, "No location with that id");
                }
                usize::from(removed)
            }),
            Confirmation::DeleteAll => self.store.delete_all().inspect(|removed| {
                info!(removed, "Cleared all locations");
            }),
        };
        let removed = match outcome {
            Ok(removed) => removed,
            Err(e) => {
                error!("Failed to delete: {}", e);
                return Err(e);
            }
        };

        let _ = self.refresh();
        Ok(Deleted { confirmation, removed })
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{FixedLocation, Permission, StaticPermission};
    use crate::storage::SqliteStore;
    use std::cell::Cell;

    /// Wraps a real store and fails on demand
    struct FlakyStore {
        inner: SqliteStore,
        fail: Cell<bool>,
        fail_list: Cell<bool>,
    }

    impl FlakyStore {
        fn new() -> Self {
            Self {
                inner: SqliteStore::open_in_memory().unwrap(),
                fail: Cell::new(false),
                fail_list: Cell::new(false),
            }
        }

        fn check(&self) -> Result<()> {
            if self.fail.get() {
                Err(Error::Io(std::io::Error::other("storage unavailable")))
            } else {
                Ok(())
            }
        }
    }

    impl RecordStore for FlakyStore {
        fn insert(&self, record: &NewRecord) -> Result<i64> {
            self.check()?;
            self.inner.insert(record)
        }

        fn list_all(&self) -> Result<Vec<LocationRecord>> {
            self.check()?;
            if self.fail_list.get() {
                return Err(Error::Io(std::io::Error::other("read failed")));
            }
            self.inner.list_all()
        }

        fn delete_by_id(&self, id: i64) -> Result<bool> {
            self.check()?;
            self.inner.delete_by_id(id)
        }

        fn delete_all(&self) -> Result<usize> {
            self.check()?;
            self.inner.delete_all()
        }
    }

    fn utc() -> DisplayFormat {
        DisplayFormat { utc_offset: Some(0), ..Default::default() }
    }

    fn granted() -> StaticPermission {
        StaticPermission(Permission::Granted)
    }

    #[test]
    fn test_add_flow() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());

        let position = recorder
            .begin_capture(&granted(), &FixedLocation::new(60.17, 24.94))
            .unwrap();
        assert_eq!(recorder.pending_capture(), Some(&position));

        let id = recorder.save_capture("Home", "front door").unwrap();

        assert!(recorder.pending_capture().is_none());
        let records = recorder.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].coordinates(), Some((60.17, 24.94)));
        assert_eq!(records[0].captured_at, Some(position.timestamp.unix_timestamp()));
        assert!(records[0].date.is_some());
    }

    #[test]
    fn test_save_without_capture() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());
        assert!(matches!(recorder.save_capture("x", "y"), Err(Error::NoPendingCapture)));
    }

    #[test]
    fn test_cancel_capture_discards_position() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());
        recorder.begin_capture(&granted(), &FixedLocation::new(1.0, 2.0)).unwrap();
        recorder.cancel_capture();
        assert!(matches!(recorder.save_capture("x", "y"), Err(Error::NoPendingCapture)));
    }

    #[test]
    fn test_permission_denied_blocks_adding() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());
        let provider = FixedLocation::new(1.0, 2.0);

        let err = recorder
            .begin_capture(&StaticPermission(Permission::Denied), &provider)
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied));
        assert_eq!(recorder.error_message(), Some(PERMISSION_DENIED_MESSAGE));

        let err = recorder.begin_capture(&granted(), &provider).unwrap_err();
        assert!(matches!(err, Error::Blocked(_)));

        recorder.clear_error();
        assert!(recorder.begin_capture(&granted(), &provider).is_ok());
    }

    #[test]
    fn test_location_failure_sets_message() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());
        let err = recorder
            .begin_capture(&granted(), &FixedLocation::unavailable())
            .unwrap_err();
        assert!(matches!(err, Error::LocationUnavailable(_)));
        assert_eq!(recorder.error_message(), Some(LOCATION_FAILED_MESSAGE));
        assert!(recorder.pending_capture().is_none());
    }

    #[test]
    fn test_refresh_failure_keeps_snapshot() {
        let mut recorder = Recorder::new(FlakyStore::new(), utc());
        recorder.begin_capture(&granted(), &FixedLocation::new(1.0, 2.0)).unwrap();
        recorder.save_capture("kept", "").unwrap();

        recorder.store().fail.set(true);
        assert!(recorder.refresh().is_err());
        assert_eq!(recorder.records().len(), 1);
        assert_eq!(recorder.records()[0].label, "kept");
    }

    #[test]
    fn test_failed_save_leaves_state_unchanged() {
        let mut recorder = Recorder::new(FlakyStore::new(), utc());
        recorder.begin_capture(&granted(), &FixedLocation::new(1.0, 2.0)).unwrap();
        recorder.save_capture("first", "").unwrap();

        recorder.begin_capture(&granted(), &FixedLocation::new(3.0, 4.0)).unwrap();
        recorder.store().fail.set(true);
        assert!(recorder.save_capture("second", "").is_err());
        assert_eq!(recorder.records().len(), 1);

        recorder.store().fail.set(false);
        recorder.refresh().unwrap();
        assert_eq!(recorder.records().len(), 1);
        assert_eq!(recorder.records()[0].label, "first");
    }

    #[test]
    fn test_confirm_delete_one() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());
        recorder.begin_capture(&granted(), &FixedLocation::new(1.0, 2.0)).unwrap();
        let id = recorder.save_capture("a", "").unwrap();

        assert_eq!(recorder.request_delete(id), Confirmation::DeleteOne(id));
        let deleted = recorder.confirm().unwrap();
        assert_eq!(deleted.confirmation, Confirmation::DeleteOne(id));
        assert_eq!(deleted.removed, 1);
        assert!(recorder.records().is_empty());
        assert!(recorder.pending().is_none());
    }

    #[test]
    fn test_cancel_keeps_records() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());
        recorder.begin_capture(&granted(), &FixedLocation::new(1.0, 2.0)).unwrap();
        recorder.save_capture("a", "").unwrap();

        recorder.request_clear();
        recorder.cancel();
        assert!(matches!(recorder.confirm(), Err(Error::NothingToConfirm)));
        assert_eq!(recorder.store().list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_confirm_clear() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());
        for label in ["a", "b", "c"] {
            recorder.begin_capture(&granted(), &FixedLocation::new(1.0, 2.0)).unwrap();
            recorder.save_capture(label, "").unwrap();
        }

        recorder.request_clear();
        assert_eq!(recorder.confirm().unwrap().removed, 3);
        assert!(recorder.records().is_empty());
    }

    #[test]
    fn test_confirm_delete_missing_id_succeeds() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());
        recorder.request_delete(42);
        let deleted = recorder.confirm().unwrap();
        assert_eq!(deleted.confirmation, Confirmation::DeleteOne(42));
        assert_eq!(deleted.removed, 0);
    }

    #[test]
    fn test_deleted_summary() {
        let missing = Deleted { confirmation: Confirmation::DeleteOne(999), removed: 0 };
        assert_eq!(missing.summary(), "No location #999");
        let one = Deleted { confirmation: Confirmation::DeleteOne(3), removed: 1 };
        assert_eq!(one.summary(), "Deleted #3");
        let all = Deleted { confirmation: Confirmation::DeleteAll, removed: 4 };
        assert_eq!(all.summary(), "Deleted 4 locations");
    }

    #[test]
    fn test_removed_count_ignores_stale_snapshot() {
        let mut recorder = Recorder::new(FlakyStore::new(), utc());
        for label in ["a", "b"] {
            recorder.store().inner.insert(&NewRecord::new(label, "")).unwrap();
        }
        assert!(recorder.records().is_empty());

        recorder.request_clear();
        assert_eq!(recorder.confirm().unwrap().removed, 2);
    }

    #[test]
    fn test_save_succeeds_when_refresh_fails() {
        let mut recorder = Recorder::new(FlakyStore::new(), utc());
        recorder.begin_capture(&granted(), &FixedLocation::new(1.0, 2.0)).unwrap();
        recorder.store().fail_list.set(true);

        let id = recorder.save_capture("saved", "").unwrap();
        assert!(recorder.records().is_empty());

        recorder.store().fail_list.set(false);
        recorder.refresh().unwrap();
        assert_eq!(recorder.records().len(), 1);
        assert_eq!(recorder.records()[0].id, id);
    }

    #[test]
    fn test_confirm_succeeds_when_refresh_fails() {
        let mut recorder = Recorder::new(FlakyStore::new(), utc());
        recorder.begin_capture(&granted(), &FixedLocation::new(1.0, 2.0)).unwrap();
        recorder.save_capture("a", "").unwrap();
        recorder.store().fail_list.set(true);

        recorder.request_clear();
        let deleted = recorder.confirm().unwrap();
        assert_eq!(deleted.removed, 1);
        assert_eq!(recorder.records().len(), 1);
        assert_eq!(recorder.store().inner.count().unwrap(), 0);
    }

    #[test]
    fn test_invalid_position_has_own_message() {
        let mut recorder = Recorder::new(SqliteStore::open_in_memory().unwrap(), utc());
        let err = recorder
            .begin_capture(&granted(), &FixedLocation::new(91.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinates { .. }));
        assert_eq!(recorder.error_message(), Some(INVALID_LOCATION_MESSAGE));
    }
}
