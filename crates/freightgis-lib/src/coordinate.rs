//! Geographic coordinate value type.

use std::fmt;

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A validated WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidCoordinate {
            latitude,
            longitude,
            reason: reason.to_string(),
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("latitude and longitude must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Re-check the invariants of a coordinate that may have been built
    /// through struct literal syntax or deserialization.
    pub fn validate(&self) -> Result<()> {
        Self::new(self.latitude, self.longitude).map(|_| ())
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = Error;

    /// Interprets the pair as `[latitude, longitude]`.
    fn try_from(value: [f64; 2]) -> Result<Self> {
        Self::new(value[0], value[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.latitude, value.longitude]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}
