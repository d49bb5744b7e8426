//! Distances used by the engine.
//!
//! Two different metrics are in play: great-circle distance between GPS
//! fixes decides whether the traveller is on site, while straight-line
//! floor-plan distance between an amenity and the gate drives proximity
//! scoring.

use geo::{Coord, Distance, Euclidean, Haversine, Point};

use crate::RequestValidationError;

/// A WGS84 position reported by a device.
///
/// # Examples
/// ```
/// use waypoint_core::LatLng;
///
/// let changi = LatLng::new(1.3644, 103.9915);
/// let nearby = LatLng::new(1.3650, 103.9920);
/// assert!(changi.haversine_distance_m(nearby) < 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Construct a position from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in metres.
    #[must_use]
    pub fn haversine_distance_m(self, other: Self) -> f64 {
        Haversine.distance(Point::from(self), Point::from(other))
    }

    /// Check that both components are finite and within WGS84 bounds.
    ///
    /// # Errors
    /// Returns [`RequestValidationError::InvalidCoordinates`] naming `field`.
    pub fn validate(self, field: &'static str) -> Result<(), RequestValidationError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(RequestValidationError::InvalidCoordinates { field })
        }
    }
}

impl From<LatLng> for Point<f64> {
    fn from(value: LatLng) -> Self {
        // geo follows the x = longitude, y = latitude convention.
        Self::new(value.lng, value.lat)
    }
}

/// Straight-line distance between two floor-plan positions.
///
/// Returns `fallback` when either position is unknown.
#[must_use]
pub fn planar_distance(a: Option<Coord<f64>>, b: Option<Coord<f64>>, fallback: f64) -> f64 {
    match (a, b) {
        (Some(from), Some(to)) => Euclidean.distance(Point::from(from), Point::from(to)),
        _ => fallback,
    }
}
