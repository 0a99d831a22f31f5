//! # Locmemo - Location Memo
//!
//! Record where you are, with a label and a note, and keep it locally.
//!
//! Locmemo provides:
//! - A SQLite-backed store of location records (insert, list, delete, clear)
//! - Permission and position collaborators behind small traits
//! - A recorder controller that drives the add and delete flows
//! - Locale-style date/time stamping of captures

pub mod record;
pub mod storage;
pub mod location;
pub mod format;
pub mod app;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use record::{LocationRecord, NewRecord};
pub use storage::{RecordStore, SqliteStore};
pub use location::{FixedLocation, LocationProvider, Permission, PermissionService, Position, StaticPermission};
pub use format::DisplayFormat;
pub use app::{Confirmation, Deleted, Recorder};

/// Result type alias for Locmemo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Locmemo operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Location access denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Format error: {0}")]
    Format(String),

    #[error("No location captured")]
    NoPendingCapture,

    #[error("Nothing to confirm")]
    NothingToConfirm,

    #[error("Adding is blocked: {0}")]
    Blocked(String),
}
