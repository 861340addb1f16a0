//! Geodesic distance and travel-time helpers.
//!
//! Distances are measured on the WGS84 ellipsoid using the `geo` crate's
//! [`Geodesic`] implementation (Karney's algorithm). Everything is reported in
//! kilometres internally; [`DistanceUnit`] converts at the edges.

use std::fmt;
use std::str::FromStr;

use geo::{Distance, Geodesic};
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};

/// Kilometres in one international mile.
pub const KM_PER_MILE: f64 = 1.609_344;

/// Average road speed assumed for travel-time estimates.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 80.0;

/// Length unit accepted by the distance operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "miles")]
    Miles,
}

impl DistanceUnit {
    /// Convert a kilometre value into this unit.
    pub fn from_km(self, km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => km,
            DistanceUnit::Miles => km / KM_PER_MILE,
        }
    }

    /// Convert a value expressed in this unit into kilometres.
    pub fn to_km(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => value,
            DistanceUnit::Miles => value * KM_PER_MILE,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "miles",
        };
        f.write_str(value)
    }
}

impl FromStr for DistanceUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Ok(DistanceUnit::Kilometers)
            }
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            other => Err(Error::invalid_argument(
                "unit",
                format!("unknown unit '{}'. Valid: km, miles", other),
            )),
        }
    }
}

/// Surface distance between two coordinates.
///
/// The route orderer and route-length helpers are generic over this trait so
/// that tests can swap in a metric with hand-computable distances.
pub trait DistanceMetric: Send + Sync {
    /// Distance between `a` and `b` in kilometres.
    fn distance_km(&self, a: &Coordinate, b: &Coordinate) -> f64;
}

/// Ellipsoidal (WGS84) geodesic distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicMetric;

impl DistanceMetric for GeodesicMetric {
    fn distance_km(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        Geodesic.distance(a.to_point(), b.to_point()) / 1000.0
    }
}

/// Geodesic distance between two points expressed in `unit`.
pub fn calculate_distance(
    origin: Coordinate,
    destination: Coordinate,
    unit: DistanceUnit,
) -> Result<f64> {
    calculate_distance_with(&GeodesicMetric, origin, destination, unit)
}

/// Distance between two points using an explicit metric.
pub fn calculate_distance_with<M: DistanceMetric + ?Sized>(
    metric: &M,
    origin: Coordinate,
    destination: Coordinate,
    unit: DistanceUnit,
) -> Result<f64> {
    origin.validate()?;
    destination.validate()?;

    let km = metric.distance_km(&origin, &destination);
    if !km.is_finite() {
        return Err(Error::Calculation(format!(
            "distance between {} and {} is not finite",
            origin, destination
        )));
    }
    Ok(unit.from_km(km))
}

/// Total length of a path visiting `waypoints` in the given order.
///
/// Returns `0.0` for fewer than two waypoints.
pub fn calculate_route_distance(waypoints: &[Coordinate], unit: DistanceUnit) -> Result<f64> {
    calculate_route_distance_with(&GeodesicMetric, waypoints, unit)
}

/// Route length using an explicit metric.
pub fn calculate_route_distance_with<M: DistanceMetric + ?Sized>(
    metric: &M,
    waypoints: &[Coordinate],
    unit: DistanceUnit,
) -> Result<f64> {
    waypoints
        .windows(2)
        .map(|pair| calculate_distance_with(metric, pair[0], pair[1], unit))
        .sum()
}

/// Estimated driving time for a distance at a constant average speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelTime {
    pub hours: f64,
    pub minutes: f64,
}

/// Estimate travel time for `distance_km` at `average_speed_kmh`.
///
/// # Examples
/// ```
/// use freightgis_lib::estimate_travel_time;
///
/// let time = estimate_travel_time(800.0, 80.0).unwrap();
/// assert_eq!(time.hours, 10.0);
/// assert_eq!(time.minutes, 600.0);
/// ```
pub fn estimate_travel_time(distance_km: f64, average_speed_kmh: f64) -> Result<TravelTime> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(Error::invalid_argument(
            "distance_km",
            format!("must be finite and non-negative, got {}", distance_km),
        ));
    }
    if !average_speed_kmh.is_finite() || average_speed_kmh <= 0.0 {
        return Err(Error::invalid_argument(
            "average_speed_kmh",
            format!("must be finite and positive, got {}", average_speed_kmh),
        ));
    }

    let hours = distance_km / average_speed_kmh;
    Ok(TravelTime {
        hours,
        minutes: hours * 60.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_parses_aliases() {
        assert_eq!("KM".parse::<DistanceUnit>().unwrap(), DistanceUnit::Kilometers);
        assert_eq!("mi".parse::<DistanceUnit>().unwrap(), DistanceUnit::Miles);
        assert!("furlongs".parse::<DistanceUnit>().is_err());
    }

    #[test]
    fn unit_conversion_round_trips_a_mile() {
        assert!((DistanceUnit::Miles.to_km(1.0) - KM_PER_MILE).abs() < 1e-12);
        assert!((DistanceUnit::Miles.from_km(KM_PER_MILE) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn travel_time_rejects_zero_speed() {
        assert!(estimate_travel_time(100.0, 0.0).is_err());
        assert!(estimate_travel_time(-1.0, 80.0).is_err());
    }

    #[test]
    fn route_distance_of_single_point_is_zero() {
        let p = Coordinate::new(1.0, 1.0).unwrap();
        assert_eq!(
            calculate_route_distance(&[p], DistanceUnit::Kilometers).unwrap(),
            0.0
        );
        assert_eq!(
            calculate_route_distance(&[], DistanceUnit::Kilometers).unwrap(),
            0.0
        );
    }
}
