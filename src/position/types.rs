//! Position value types.
//!
//! This module defines the two shapes a device position takes on its way
//! through the crate:
//!
//! - [`RawPosition`] - what the platform source delivers, including opaque
//!   non-data members
//! - [`GeoPosition`] - the minimal, serializable projection kept by this core
//!
//! Field names serialize in camelCase to match the platform position shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coordinate fields of a normalized position.
///
/// Latitude and longitude are always present; everything else is reported
/// only when the device provides it. Absent fields stay `None` - they are
/// never defaulted to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCoordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Altitude above the reference ellipsoid, in meters.
    pub altitude: Option<f64>,
    /// Accuracy of the altitude value, in meters.
    pub altitude_accuracy: Option<f64>,
    /// Direction of travel in degrees clockwise from true north.
    pub heading: Option<f64>,
    /// Ground speed in meters per second.
    pub speed: Option<f64>,
    /// Accuracy of latitude/longitude, in meters.
    pub accuracy: Option<f64>,
}

impl GeoCoordinates {
    /// Create coordinates with only latitude and longitude set.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Default::default()
        }
    }
}

/// A normalized device position.
///
/// Immutable once constructed; produced only by [`normalize`] from a
/// [`RawPosition`]. Carries no identity beyond value equality.
///
/// [`normalize`]: super::normalize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Coordinate data.
    pub coords: GeoCoordinates,
    /// Acquisition time on the source clock, in milliseconds.
    pub timestamp: i64,
}

impl GeoPosition {
    /// Create a position from coordinates and a source timestamp.
    pub fn new(coords: GeoCoordinates, timestamp: i64) -> Self {
        Self { coords, timestamp }
    }
}

/// A raw position record as delivered by the platform source.
///
/// The platform position object behaves like an opaque object with accessor
/// methods and internal members; [`extra`] stands in for everything that is
/// not documented coordinate data. Normalization drops it entirely.
///
/// [`extra`]: RawPosition::extra
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosition {
    /// Coordinate data, as reported by the device.
    pub coords: GeoCoordinates,
    /// Acquisition time on the source clock, in milliseconds.
    pub timestamp: i64,
    /// Non-data members of the platform record (provider internals,
    /// vendor extensions). Never inspected by this crate.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawPosition {
    /// Create a raw record carrying only documented fields.
    pub fn new(coords: GeoCoordinates, timestamp: i64) -> Self {
        Self {
            coords,
            timestamp,
            extra: Map::new(),
        }
    }

    /// Attach an opaque platform member, returning the record for chaining.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Rebuilds the raw shape from an already-normalized position.
///
/// The result carries no extra members, so normalizing it again yields the
/// input position unchanged.
impl From<GeoPosition> for RawPosition {
    fn from(position: GeoPosition) -> Self {
        Self::new(position.coords, position.timestamp)
    }
}
