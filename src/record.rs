//! Location record types
//!
//! A record is written once and never updated: it is either listed or deleted.

use serde::{Deserialize, Serialize};

/// A stored location entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Store-assigned identifier, never reused
    pub id: i64,
    /// User-entered identifier for the place
    pub label: String,
    /// Free text, may span multiple lines
    pub note: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Capture date in display format
    pub date: Option<String>,
    /// Capture time in display format
    pub time: Option<String>,
    /// Capture instant as Unix seconds (UTC)
    pub captured_at: Option<i64>,
}

impl LocationRecord {
    /// Coordinates as a pair, if both are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// The "GPS: lat, lon" line shown under a record
    pub fn gps_line(&self) -> String {
        match self.coordinates() {
            Some((lat, lon)) => format!("GPS: {}, {}", lat, lon),
            None => "GPS: -".to_string(),
        }
    }

    /// The "Time: date at time" line shown under a record
    pub fn time_line(&self) -> String {
        format!(
            "Time: {} at {}",
            self.date.as_deref().unwrap_or("-"),
            self.time.as_deref().unwrap_or("-")
        )
    }
}

/// Inputs for a new record. The id is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub label: String,
    pub note: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub captured_at: Option<i64>,
}

impl NewRecord {
    /// Create a record with label and note only
    pub fn new(label: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            note: note.into(),
            ..Default::default()
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_stamp(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self.time = Some(time.into());
        self
    }

    pub fn with_captured_at(mut self, unix_seconds: i64) -> Self {
        self.captured_at = Some(unix_seconds);
        self
    }
}
