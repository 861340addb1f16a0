//! Freightgis library entry points.
//!
//! This crate exposes the geographic calculations behind the freightgis
//! server and CLI: geodesic distance, greedy waypoint ordering, fuel cost
//! estimation, a place-name gazetteer, and a free-text query dispatcher that
//! routes requests to those calculations. Front ends (CLI, MCP server) should
//! depend on the functions exported here instead of reimplementing behaviour.

pub mod coordinate;
pub mod distance;
pub mod error;
pub mod freight;
pub mod fuel;
pub mod gazetteer;
pub mod query;
pub mod rounding;
pub mod route;

pub use coordinate::Coordinate;
pub use distance::{
    calculate_distance, calculate_distance_with, calculate_route_distance,
    calculate_route_distance_with, estimate_travel_time, DistanceMetric, DistanceUnit,
    GeodesicMetric, TravelTime, DEFAULT_AVERAGE_SPEED_KMH, KM_PER_MILE,
};
pub use error::{Error, ErrorKind, Result};
pub use freight::{plan_freight_route, FreightOptions, FreightRoute};
pub use fuel::{
    estimate_fuel_cost, liters_needed, FuelPricing, DEFAULT_FUEL_EFFICIENCY_KM_PER_LITER,
    DEFAULT_FUEL_PRICE_PER_LITER,
};
pub use gazetteer::{normalize_name, Gazetteer, GazetteerEntry};
pub use query::{
    CostAnswer, DistanceAnswer, QueryDispatcher, QueryKind, QueryResponse, QueryResult,
    RouteAnswer, EXAMPLE_QUERIES, UNRECOGNIZED_MESSAGE,
};
pub use rounding::round2;
pub use route::{nearest_neighbor_order, optimize_waypoints, optimize_waypoints_with};
