//! Position normalization.
//!
//! The platform position record carries accessor internals and vendor
//! extensions that must not leak into shared application state. [`normalize`]
//! projects a raw record down to exactly the documented coordinate fields and
//! timestamp.

use super::types::{GeoCoordinates, GeoPosition, RawPosition};

/// Project a raw platform position to its normalized shape.
///
/// Pure function with no failure mode. Optional fields the device did not
/// report pass through as `None`; they are never defaulted to zero. Any
/// non-data members of the raw record are dropped.
pub fn normalize(raw: &RawPosition) -> GeoPosition {
    let coords = &raw.coords;
    GeoPosition {
        coords: GeoCoordinates {
            latitude: coords.latitude,
            longitude: coords.longitude,
            altitude: coords.altitude,
            altitude_accuracy: coords.altitude_accuracy,
            heading: coords.heading,
            speed: coords.speed,
            accuracy: coords.accuracy,
        },
        timestamp: raw.timestamp,
    }
}
