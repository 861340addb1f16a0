//! MCP tool implementations for freight calculations
//!
//! This module defines the five tools exposed by the MCP server:
//! - calculate_distance: Geodesic distance between two coordinates
//! - optimize_route: Greedy nearest-neighbour ordering of waypoints
//! - estimate_fuel_cost: Fuel cost for a distance
//! - process_query: Free-text query dispatch
//! - plan_freight_route: Named origin-to-destination route with estimates

use freightgis_lib::{
    calculate_distance, calculate_route_distance, estimate_fuel_cost, estimate_travel_time,
    liters_needed, nearest_neighbor_order, plan_freight_route, round2, Coordinate,
    DistanceUnit, FreightOptions, FreightRoute, FuelPricing, GeodesicMetric, QueryResponse,
    DEFAULT_AVERAGE_SPEED_KMH,
};
use schemars::{schema_for, JsonSchema};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::server::McpServerState;
use crate::types::*;
use crate::Error;

/// A tool as advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn definition<T: JsonSchema>(name: &'static str, description: &'static str) -> ToolDefinition {
    ToolDefinition {
        name,
        description,
        input_schema: serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null),
    }
}

/// Every tool this server exposes, in a stable order
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        definition::<CalculateDistanceInput>(
            CalculateDistanceTool::NAME,
            "Calculate the geodesic distance between two [latitude, longitude] points",
        ),
        definition::<OptimizeRouteInput>(
            OptimizeRouteTool::NAME,
            "Order waypoints by greedy nearest-neighbour, starting from start_index",
        ),
        definition::<EstimateFuelCostInput>(
            EstimateFuelCostTool::NAME,
            "Estimate fuel cost for a distance given price per liter and efficiency",
        ),
        definition::<ProcessQueryInput>(
            ProcessQueryTool::NAME,
            "Answer a natural-language question about distance, routes, or fuel cost",
        ),
        definition::<PlanFreightRouteInput>(
            PlanFreightRouteTool::NAME,
            "Plan a freight route between named locations with travel time and fuel cost",
        ),
    ]
}

fn coordinate(param: &str, pair: [f64; 2]) -> crate::Result<Coordinate> {
    Coordinate::try_from(pair).map_err(|e| Error::invalid_param(param, e.to_string()))
}

/// Distance tool handler
pub struct CalculateDistanceTool;

impl CalculateDistanceTool {
    pub const NAME: &'static str = "calculate_distance";

    pub fn execute(input: CalculateDistanceInput) -> crate::Result<CalculateDistanceOutput> {
        let unit = Self::validate_input(&input)?;
        let origin = coordinate("origin", input.origin)?;
        let destination = coordinate("destination", input.destination)?;
        debug!("Distance: {} → {} ({})", origin, destination, unit);

        let distance = calculate_distance(origin, destination, unit)?;
        let travel = estimate_travel_time(unit.to_km(distance), DEFAULT_AVERAGE_SPEED_KMH)?;

        Ok(CalculateDistanceOutput {
            origin: input.origin,
            destination: input.destination,
            distance: round2(distance),
            unit: unit.to_string(),
            travel_hours: round2(travel.hours),
            summary: format!(
                "Distance: {:.2} {}, Travel time: {:.2} hours",
                distance, unit, travel.hours
            ),
        })
    }

    fn validate_input(input: &CalculateDistanceInput) -> crate::Result<DistanceUnit> {
        match input.unit.as_deref() {
            None => Ok(DistanceUnit::Kilometers),
            Some(unit) => unit.parse().map_err(|_| {
                Error::invalid_param(
                    "unit",
                    format!("Unknown unit '{}'. Valid: km, miles", unit),
                )
            }),
        }
    }
}

/// Route ordering tool handler
pub struct OptimizeRouteTool;

impl OptimizeRouteTool {
    pub const NAME: &'static str = "optimize_route";

    pub fn execute(input: OptimizeRouteInput) -> crate::Result<OptimizeRouteOutput> {
        let waypoints = input
            .waypoints
            .iter()
            .enumerate()
            .map(|(idx, pair)| coordinate(&format!("waypoints[{}]", idx), *pair))
            .collect::<crate::Result<Vec<_>>>()?;
        info!(
            "Optimizing {} waypoints from index {}",
            waypoints.len(),
            input.start_index
        );

        let order = nearest_neighbor_order(&GeodesicMetric, &waypoints, input.start_index)?;
        let ordered: Vec<Coordinate> = order.iter().map(|&idx| waypoints[idx]).collect();
        let total = calculate_route_distance(&ordered, DistanceUnit::Kilometers)?;

        Ok(OptimizeRouteOutput {
            optimized_waypoints: ordered.into_iter().map(<[f64; 2]>::from).collect(),
            order,
            total_distance_km: round2(total),
            summary: format!("Optimized route distance: {:.2} km", total),
        })
    }
}

/// Fuel cost tool handler
pub struct EstimateFuelCostTool;

impl EstimateFuelCostTool {
    pub const NAME: &'static str = "estimate_fuel_cost";

    pub fn execute(input: EstimateFuelCostInput) -> crate::Result<EstimateFuelCostOutput> {
        let pricing = FuelPricing::new(input.fuel_price_per_liter, input.fuel_efficiency)?;
        let liters = liters_needed(input.distance_km, &pricing)?;
        let cost = estimate_fuel_cost(input.distance_km, &pricing)?;

        Ok(EstimateFuelCostOutput {
            distance_km: input.distance_km,
            fuel_price_per_liter: pricing.price_per_liter,
            fuel_efficiency_km_per_liter: pricing.efficiency_km_per_liter,
            liters_needed: round2(liters),
            estimated_cost: round2(cost),
            summary: format!("Estimated fuel cost: ${:.2}", cost),
        })
    }
}

/// Free-text query tool handler
///
/// Always succeeds once the input validates; unrecognised and failed queries
/// come back as the matching envelope status.
pub struct ProcessQueryTool;

impl ProcessQueryTool {
    pub const NAME: &'static str = "process_query";

    pub fn execute(state: &McpServerState, input: ProcessQueryInput) -> crate::Result<QueryResponse> {
        if input.query.trim().is_empty() {
            return Err(Error::invalid_param("query", "Cannot be empty"));
        }
        Ok(state.dispatcher.process(&input.query))
    }
}

/// Freight route tool handler
pub struct PlanFreightRouteTool;

impl PlanFreightRouteTool {
    pub const NAME: &'static str = "plan_freight_route";

    pub fn execute(
        state: &McpServerState,
        input: PlanFreightRouteInput,
    ) -> crate::Result<FreightRoute> {
        Self::validate_input(&input)?;
        let route = plan_freight_route(
            &state.gazetteer,
            &input.origin,
            &input.destination,
            &input.waypoints,
            &FreightOptions::default(),
        )?;
        Ok(route)
    }

    fn validate_input(input: &PlanFreightRouteInput) -> crate::Result<()> {
        if input.origin.trim().is_empty() {
            return Err(Error::invalid_param("origin", "Cannot be empty"));
        }
        if input.destination.trim().is_empty() {
            return Err(Error::invalid_param("destination", "Cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_cover_five_tools() {
        let names: Vec<_> = tool_definitions().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "calculate_distance",
                "optimize_route",
                "estimate_fuel_cost",
                "process_query",
                "plan_freight_route"
            ]
        );
        for tool in tool_definitions() {
            assert!(tool.input_schema.is_object(), "{} has a schema", tool.name);
        }
    }

    #[test]
    fn test_distance_in_miles() {
        let output = CalculateDistanceTool::execute(CalculateDistanceInput {
            origin: [40.7128, -74.0060],
            destination: [34.0522, -118.2437],
            unit: Some("miles".to_string()),
        })
        .unwrap();
        assert_eq!(output.unit, "miles");
        assert!((2440.0..2460.0).contains(&output.distance));
        assert!(output.travel_hours > 49.0);
    }

    #[test]
    fn test_distance_rejects_unknown_unit() {
        let err = CalculateDistanceTool::execute(CalculateDistanceInput {
            origin: [0.0, 0.0],
            destination: [1.0, 1.0],
            unit: Some("parsecs".to_string()),
        })
        .unwrap_err();
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_distance_rejects_out_of_range_coordinate() {
        let err = CalculateDistanceTool::execute(CalculateDistanceInput {
            origin: [100.0, 0.0],
            destination: [1.0, 1.0],
            unit: None,
        })
        .unwrap_err();
        assert_eq!(err.context.unwrap()["parameter"], "origin");
    }

    #[test]
    fn test_optimize_route_reports_order() {
        let output = OptimizeRouteTool::execute(OptimizeRouteInput {
            waypoints: vec![
                [40.7128, -74.0060],
                [34.0522, -118.2437],
                [39.7392, -104.9903],
            ],
            start_index: 0,
        })
        .unwrap();
        assert_eq!(output.order, vec![0, 2, 1]);
        assert_eq!(output.optimized_waypoints[1], [39.7392, -104.9903]);
    }

    #[test]
    fn test_optimize_route_empty_and_bad_start() {
        let empty = OptimizeRouteTool::execute(OptimizeRouteInput {
            waypoints: vec![],
            start_index: 0,
        })
        .unwrap();
        assert!(empty.optimized_waypoints.is_empty());
        assert_eq!(empty.total_distance_km, 0.0);

        let err = OptimizeRouteTool::execute(OptimizeRouteInput {
            waypoints: vec![[0.0, 0.0]],
            start_index: 3,
        })
        .unwrap_err();
        assert_eq!(err.context.unwrap()["parameter"], "start_index");
    }

    #[test]
    fn test_fuel_cost_defaults() {
        let output = EstimateFuelCostTool::execute(EstimateFuelCostInput {
            distance_km: 800.0,
            fuel_price_per_liter: 1.5,
            fuel_efficiency: 8.0,
        })
        .unwrap();
        assert_eq!(output.liters_needed, 100.0);
        assert_eq!(output.estimated_cost, 150.0);
    }

    #[test]
    fn test_fuel_cost_rejects_zero_efficiency() {
        let err = EstimateFuelCostTool::execute(EstimateFuelCostInput {
            distance_km: 800.0,
            fuel_price_per_liter: 1.5,
            fuel_efficiency: 0.0,
        })
        .unwrap_err();
        assert_eq!(err.context.unwrap()["parameter"], "fuel_efficiency");
    }

    #[test]
    fn test_process_query_validation_empty() {
        let state = McpServerState::with_builtin();
        let result = ProcessQueryTool::execute(
            &state,
            ProcessQueryInput {
                query: "   ".to_string(),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_freight_route_unknown_origin() {
        let state = McpServerState::with_builtin();
        let err = PlanFreightRouteTool::execute(
            &state,
            PlanFreightRouteInput {
                origin: "Denvr".to_string(),
                destination: "Miami".to_string(),
                waypoints: vec![],
            },
        )
        .unwrap_err();
        assert_eq!(err.code, 404);
        assert_eq!(err.context.unwrap()["suggestions"][0], "Denver");
    }
}
