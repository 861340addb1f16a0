//! Type definitions for MCP tool inputs and outputs
//!
//! Inputs derive `JsonSchema` so `tools/list` can advertise them; outputs are
//! serialized into the text content of a tool result.

use freightgis_lib::{DEFAULT_FUEL_EFFICIENCY_KM_PER_LITER, DEFAULT_FUEL_PRICE_PER_LITER};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// TOOL INPUTS
// ============================================================================

/// Input for the calculate_distance tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CalculateDistanceInput {
    /// Starting point as [latitude, longitude]
    pub origin: [f64; 2],

    /// End point as [latitude, longitude]
    pub destination: [f64; 2],

    /// Result unit: "km" or "miles" (default: "km")
    #[serde(default)]
    pub unit: Option<String>,
}

/// Input for the optimize_route tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OptimizeRouteInput {
    /// Waypoints as [latitude, longitude] pairs
    pub waypoints: Vec<[f64; 2]>,

    /// Index of the waypoint to start from (default: 0)
    #[serde(default)]
    pub start_index: usize,
}

/// Input for the estimate_fuel_cost tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EstimateFuelCostInput {
    /// Distance to cover in kilometres
    pub distance_km: f64,

    /// Fuel price per liter (default: 1.5)
    #[serde(default = "default_fuel_price")]
    pub fuel_price_per_liter: f64,

    /// Vehicle efficiency in km per liter (default: 8.0)
    #[serde(default = "default_fuel_efficiency")]
    pub fuel_efficiency: f64,
}

fn default_fuel_price() -> f64 {
    DEFAULT_FUEL_PRICE_PER_LITER
}

fn default_fuel_efficiency() -> f64 {
    DEFAULT_FUEL_EFFICIENCY_KM_PER_LITER
}

/// Input for the process_query tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProcessQueryInput {
    /// Free-text question about distance, route optimization, or fuel cost
    pub query: String,
}

/// Input for the plan_freight_route tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlanFreightRouteInput {
    /// Origin location name (e.g. "New York")
    pub origin: String,

    /// Destination location name (e.g. "Los Angeles")
    pub destination: String,

    /// Intermediate stop names; unknown names are skipped
    #[serde(default)]
    pub waypoints: Vec<String>,
}

// ============================================================================
// TOOL OUTPUTS
// ============================================================================

/// Output from the calculate_distance tool
#[derive(Debug, Clone, Serialize)]
pub struct CalculateDistanceOutput {
    pub origin: [f64; 2],
    pub destination: [f64; 2],
    pub distance: f64,
    pub unit: String,
    /// Driving time at the default average speed
    pub travel_hours: f64,
    pub summary: String,
}

/// Output from the optimize_route tool
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeRouteOutput {
    /// Waypoints in visiting order
    pub optimized_waypoints: Vec<[f64; 2]>,
    /// Visiting order as indices into the input
    pub order: Vec<usize>,
    pub total_distance_km: f64,
    pub summary: String,
}

/// Output from the estimate_fuel_cost tool
#[derive(Debug, Clone, Serialize)]
pub struct EstimateFuelCostOutput {
    pub distance_km: f64,
    pub fuel_price_per_liter: f64,
    pub fuel_efficiency_km_per_liter: f64,
    pub liters_needed: f64,
    pub estimated_cost: f64,
    pub summary: String,
}
