//! Named origin-to-destination freight planning.
//!
//! The planner pins the origin first and the destination last, orders the
//! intermediate stops greedily by proximity, and attaches travel-time and fuel
//! estimates for the whole path.

use serde::Serialize;
use tracing::{info, warn};

use crate::coordinate::Coordinate;
use crate::distance::{
    calculate_route_distance, estimate_travel_time, DistanceUnit, GeodesicMetric,
    DEFAULT_AVERAGE_SPEED_KMH,
};
use crate::error::Result;
use crate::fuel::{estimate_fuel_cost, FuelPricing};
use crate::gazetteer::Gazetteer;
use crate::rounding::round2;
use crate::route::nearest_neighbor_order;

/// Tunables for [`plan_freight_route`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreightOptions {
    pub pricing: FuelPricing,
    pub average_speed_kmh: f64,
}

impl Default for FreightOptions {
    fn default() -> Self {
        Self {
            pricing: FuelPricing::default(),
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }
}

/// A planned freight route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreightRoute {
    pub origin: String,
    pub destination: String,
    /// Every stop in visiting order, origin and destination included.
    pub stops: Vec<String>,
    /// Intermediate names that could not be resolved and were left out.
    pub skipped_waypoints: Vec<String>,
    pub total_distance_km: f64,
    pub travel_hours: f64,
    pub estimated_cost: f64,
}

/// Plan a route from `origin` to `destination` through `waypoints`.
///
/// Origin and destination must resolve; unknown intermediate names are
/// skipped and reported in [`FreightRoute::skipped_waypoints`].
///
/// Only the intermediates are reordered. The destination is always the last
/// stop even when it lies closer to the origin than some waypoint, and
/// [`FreightRoute::stops`] lists names in visiting order, not input order.
pub fn plan_freight_route(
    gazetteer: &Gazetteer,
    origin: &str,
    destination: &str,
    waypoints: &[String],
    options: &FreightOptions,
) -> Result<FreightRoute> {
    info!("Planning freight route from {} to {}", origin, destination);

    let origin_coord = gazetteer.require(origin)?;
    let destination_coord = gazetteer.require(destination)?;

    // Index 0 is the origin; the intermediates follow in input order.
    let mut names = vec![origin.trim().to_string()];
    let mut coords = vec![origin_coord];
    let mut skipped_waypoints = Vec::new();
    for waypoint in waypoints {
        match gazetteer.resolve(waypoint) {
            Some(coordinate) => {
                names.push(waypoint.trim().to_string());
                coords.push(coordinate);
            }
            None => {
                warn!("Skipping unknown waypoint '{}'", waypoint);
                skipped_waypoints.push(waypoint.clone());
            }
        }
    }

    let order = nearest_neighbor_order(&GeodesicMetric, &coords, 0)?;

    let mut stops: Vec<String> = order.iter().map(|&idx| names[idx].clone()).collect();
    let mut path: Vec<Coordinate> = order.iter().map(|&idx| coords[idx]).collect();
    stops.push(destination.trim().to_string());
    path.push(destination_coord);

    let total_distance_km = calculate_route_distance(&path, DistanceUnit::Kilometers)?;
    let travel = estimate_travel_time(total_distance_km, options.average_speed_kmh)?;
    let estimated_cost = estimate_fuel_cost(total_distance_km, &options.pricing)?;

    Ok(FreightRoute {
        origin: origin.trim().to_string(),
        destination: destination.trim().to_string(),
        stops,
        skipped_waypoints,
        total_distance_km: round2(total_distance_km),
        travel_hours: round2(travel.hours),
        estimated_cost: round2(estimated_cost),
    })
}
