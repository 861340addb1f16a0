//! Free-text query classification and dispatch.
//!
//! This module provides:
//! - [`QueryPattern`] - one recognisable family of phrasings
//! - [`QueryDispatcher`] - evaluates patterns in a fixed order and runs the
//!   matching calculation
//! - [`QueryResponse`] - the uniform envelope returned for every query
//!
//! # Evaluation order
//!
//! Patterns are tried distance → route → cost, and the first one that both
//! matches and resolves its locations wins. The families overlap (a route
//! query can mention "500 km"), so the order is part of the observable
//! behaviour. Text nothing claims becomes [`QueryResponse::Unrecognized`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use freightgis_lib::{Gazetteer, QueryDispatcher};
//!
//! let dispatcher = QueryDispatcher::new(Arc::new(Gazetteer::builtin()));
//! let response = dispatcher.process("fuel cost for 500 km at $2 per liter");
//! assert_eq!(response.status(), "success");
//! ```

mod patterns;

pub use patterns::{CostPattern, DistancePattern, ParsedQuery, QueryPattern, RoutePattern};

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::distance::{
    calculate_distance, calculate_route_distance, estimate_travel_time, DistanceUnit,
    DEFAULT_AVERAGE_SPEED_KMH,
};
use crate::error::{Error, Result};
use crate::fuel::{estimate_fuel_cost, FuelPricing};
use crate::gazetteer::Gazetteer;
use crate::rounding::round2;
use crate::route::optimize_waypoints;

/// Guidance returned with every unrecognised query.
pub const UNRECOGNIZED_MESSAGE: &str =
    "I couldn't understand this query. Try asking about distance, route optimization, or fuel costs.";

/// Sample queries that classify successfully against the built-in gazetteer.
pub const EXAMPLE_QUERIES: [&str; 3] = [
    "How far is it from New York to Los Angeles?",
    "Optimize a route with stops in NYC, Denver, and LA",
    "What's the fuel cost for 500 km at $2 per liter?",
];

/// Query categories, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Distance,
    Route,
    Cost,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            QueryKind::Distance => "distance",
            QueryKind::Route => "route",
            QueryKind::Cost => "cost",
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceAnswer {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub travel_hours: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteAnswer {
    /// Stop names in the order the user wrote them, not the visiting order.
    pub stops: Vec<String>,
    pub total_distance_km: f64,
    pub estimated_cost: f64,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostAnswer {
    pub distance_km: f64,
    pub fuel_price_per_liter: f64,
    pub fuel_efficiency_km_per_liter: f64,
    pub estimated_cost: f64,
    pub explanation: String,
}

/// Payload of a successful query, tagged with its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "result", rename_all = "lowercase")]
pub enum QueryResult {
    Distance(DistanceAnswer),
    Route(RouteAnswer),
    Cost(CostAnswer),
}

impl QueryResult {
    pub fn kind(&self) -> QueryKind {
        match self {
            QueryResult::Distance(_) => QueryKind::Distance,
            QueryResult::Route(_) => QueryKind::Route,
            QueryResult::Cost(_) => QueryKind::Cost,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            QueryResult::Distance(answer) => &answer.explanation,
            QueryResult::Route(answer) => &answer.explanation,
            QueryResult::Cost(answer) => &answer.explanation,
        }
    }
}

/// Envelope returned for every processed query.
///
/// Serializes with a `status` discriminator of `success`, `unrecognized`, or
/// `error`; the query text is always echoed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryResponse {
    Success {
        query: String,
        #[serde(flatten)]
        result: QueryResult,
    },
    Unrecognized {
        query: String,
        message: String,
        examples: Vec<String>,
    },
    Error {
        query: String,
        error: String,
    },
}

impl QueryResponse {
    fn unrecognized(query: &str) -> Self {
        QueryResponse::Unrecognized {
            query: query.to_string(),
            message: UNRECOGNIZED_MESSAGE.to_string(),
            examples: EXAMPLE_QUERIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The serialized `status` value.
    pub fn status(&self) -> &'static str {
        match self {
            QueryResponse::Success { .. } => "success",
            QueryResponse::Unrecognized { .. } => "unrecognized",
            QueryResponse::Error { .. } => "error",
        }
    }

    /// The category of a successful response.
    pub fn kind(&self) -> Option<QueryKind> {
        match self {
            QueryResponse::Success { result, .. } => Some(result.kind()),
            _ => None,
        }
    }

    /// The echoed query text.
    pub fn query(&self) -> &str {
        match self {
            QueryResponse::Success { query, .. }
            | QueryResponse::Unrecognized { query, .. }
            | QueryResponse::Error { query, .. } => query,
        }
    }
}

/// Plain digits or comma-grouped thousands, with an optional fraction.
static NUMBER_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$").expect("number literal pattern is valid")
});

fn parse_number(parameter: &str, literal: &str) -> Result<f64> {
    if !NUMBER_LITERAL.is_match(literal) {
        return Err(Error::invalid_argument(
            parameter,
            format!("'{}' is not a well-formed number", literal),
        ));
    }
    let cleaned = literal.replace(',', "");
    let value: f64 = cleaned.parse().map_err(|_| {
        Error::invalid_argument(parameter, format!("'{}' is not a number", literal))
    })?;
    if !value.is_finite() {
        return Err(Error::invalid_argument(
            parameter,
            format!("'{}' is out of range", literal),
        ));
    }
    Ok(value)
}

/// Classifies free text and runs the matching calculation.
pub struct QueryDispatcher {
    gazetteer: Arc<Gazetteer>,
    patterns: Vec<Box<dyn QueryPattern>>,
    pricing: FuelPricing,
    average_speed_kmh: f64,
}

impl QueryDispatcher {
    /// Dispatcher with the standard distance → route → cost patterns and
    /// default pricing and speed.
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self {
            gazetteer,
            patterns: vec![
                Box::new(DistancePattern),
                Box::new(RoutePattern),
                Box::new(CostPattern),
            ],
            pricing: FuelPricing::default(),
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }

    /// Override the pricing used for route costs and as cost-query fallbacks.
    pub fn with_pricing(mut self, pricing: FuelPricing) -> Self {
        self.pricing = pricing;
        self
    }

    /// Override the speed used for distance-query travel times.
    pub fn with_average_speed(mut self, average_speed_kmh: f64) -> Self {
        self.average_speed_kmh = average_speed_kmh;
        self
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Categories in the order they are tried.
    pub fn evaluation_order(&self) -> Vec<QueryKind> {
        self.patterns.iter().map(|p| p.kind()).collect()
    }

    /// Classify and answer `query`. Never fails: calculation errors are
    /// returned as [`QueryResponse::Error`].
    pub fn process(&self, query: &str) -> QueryResponse {
        info!("Processing query: {}", query);

        let Some(parsed) = self.classify(query) else {
            debug!("query did not match any pattern");
            return QueryResponse::unrecognized(query);
        };

        let kind = parsed.kind();
        match self.evaluate(parsed) {
            Ok(result) => QueryResponse::Success {
                query: query.to_string(),
                result,
            },
            Err(err) => {
                warn!("Error answering {} query: {}", kind, err);
                QueryResponse::Error {
                    query: query.to_string(),
                    error: err.to_string(),
                }
            }
        }
    }

    /// Run the patterns in order and return the first extraction.
    pub fn classify(&self, query: &str) -> Option<ParsedQuery> {
        self.patterns.iter().find_map(|pattern| {
            let parsed = pattern.extract(query, &self.gazetteer);
            if parsed.is_some() {
                debug!(kind = %pattern.kind(), "query classified");
            }
            parsed
        })
    }

    fn evaluate(&self, parsed: ParsedQuery) -> Result<QueryResult> {
        match parsed {
            ParsedQuery::Distance {
                from,
                to,
                origin,
                destination,
            } => {
                let distance = calculate_distance(origin, destination, DistanceUnit::Kilometers)?;
                let travel = estimate_travel_time(distance, self.average_speed_kmh)?;
                let explanation = format!(
                    "The distance from {} to {} is {:.2} km, which takes approximately {:.1} hours at {} km/h.",
                    from, to, distance, travel.hours, self.average_speed_kmh
                );
                Ok(QueryResult::Distance(DistanceAnswer {
                    from,
                    to,
                    distance_km: round2(distance),
                    travel_hours: round2(travel.hours),
                    explanation,
                }))
            }
            ParsedQuery::Route { stops, waypoints } => {
                let ordered = optimize_waypoints(&waypoints, 0)?;
                let total = calculate_route_distance(&ordered, DistanceUnit::Kilometers)?;
                let cost = estimate_fuel_cost(total, &self.pricing)?;
                let explanation = format!(
                    "Optimized route through {} is {:.2} km with estimated fuel cost of ${:.2}.",
                    stops.join(", "),
                    total,
                    cost
                );
                Ok(QueryResult::Route(RouteAnswer {
                    stops,
                    total_distance_km: round2(total),
                    estimated_cost: round2(cost),
                    explanation,
                }))
            }
            ParsedQuery::Cost {
                distance,
                distance_unit,
                price_per_liter,
                efficiency_km_per_liter,
            } => {
                let distance_km = distance_unit.to_km(parse_number("distance", &distance)?);
                let price = match price_per_liter {
                    Some(literal) => parse_number("fuel_price_per_liter", &literal)?,
                    None => self.pricing.price_per_liter,
                };
                let efficiency = match efficiency_km_per_liter {
                    Some(literal) => parse_number("fuel_efficiency", &literal)?,
                    None => self.pricing.efficiency_km_per_liter,
                };

                let pricing = FuelPricing::new(price, efficiency)?;
                let cost = estimate_fuel_cost(distance_km, &pricing)?;
                let explanation = format!(
                    "For a {} km route at ${}/L with {} km/L efficiency, fuel cost is ${:.2}.",
                    distance_km, price, efficiency, cost
                );
                Ok(QueryResult::Cost(CostAnswer {
                    distance_km,
                    fuel_price_per_liter: price,
                    fuel_efficiency_km_per_liter: efficiency,
                    estimated_cost: round2(cost),
                    explanation,
                }))
            }
        }
    }
}
