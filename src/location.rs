//! Device location collaborators
//!
//! The recorder never talks to hardware directly. It asks a
//! [`PermissionService`] for foreground access and a [`LocationProvider`] for
//! the current position. The implementations here serve the CLI and tests; a
//! device backend plugs in behind the same traits.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Answer to a foreground location access request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Granted,
    Denied,
}

impl Permission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Permission::Granted)
    }
}

/// A single position reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// When the reading was taken
    pub timestamp: OffsetDateTime,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, timestamp: OffsetDateTime) -> Result<Self> {
        let position = Self { latitude, longitude, timestamp };
        position.validate()?;
        Ok(position)
    }

    /// Latitude in [-90, 90], longitude in [-180, 180], both finite
    pub fn validate(&self) -> Result<()> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(Error::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

pub trait PermissionService {
    fn request_foreground_access(&self) -> Permission;
}

pub trait LocationProvider {
    fn current_position(&self) -> Result<Position>;
}

/// A permission answer fixed up front (config file or CLI flag)
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission(pub Permission);

impl PermissionService for StaticPermission {
    fn request_foreground_access(&self) -> Permission {
        self.0
    }
}

/// Reports a configured coordinate pair, stamped with the time of the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    coordinates: Option<(f64, f64)>,
}

impl FixedLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { coordinates: Some((latitude, longitude)) }
    }

    /// A provider with nothing configured; every read fails
    pub fn unavailable() -> Self {
        Self { coordinates: None }
    }
}

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<Position> {
        let (latitude, longitude) = self
            .coordinates
            .ok_or_else(|| Error::LocationUnavailable("no position configured".to_string()))?;
        Position::new(latitude, longitude, OffsetDateTime::now_utc())
    }
}
