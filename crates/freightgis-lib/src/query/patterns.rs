//! Pattern strategies used by the query dispatcher.
//!
//! Each [`QueryPattern`] recognises one family of phrasings and extracts the
//! parameters it needs. A pattern that matches the text but cannot resolve a
//! referenced place returns `None`, exactly like a pattern that did not match
//! at all, so the dispatcher moves on to the next family.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::distance::DistanceUnit;
use crate::gazetteer::Gazetteer;

use super::QueryKind;

static DISTANCE_FROM_TO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:distance|how\s+far|calculate\s+(?:the\s+)?distance).*?\bfrom\s+(.+?)\s+to\s+(.+?)\s*(?:\?|$)",
    )
    .expect("distance from/to pattern is valid")
});

static DISTANCE_BETWEEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:distance|far).*?\bbetween\s+(.+?)\s+and\s+(.+?)\s*(?:\?|$)")
        .expect("distance between pattern is valid")
});

static ROUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:optimi[sz]e|best|plan)\s+(?:a\s+|the\s+)?route.*?\b(?:stops|visiting|through)\s+(?:(?:in|at)\s+)?(.+?)\s*(?:\?|$)",
    )
    .expect("route pattern is valid")
});

static STOP_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*,\s*(?:and\s+)?|\s+and\s+").expect("stop separator pattern is valid")
});

/// A numeric literal: starts and ends on a digit, with any run of digits,
/// commas and dots between. Malformed literals are captured whole so the
/// dispatcher can reject them instead of reading a fragment.
const NUMBER: &str = r"\d(?:[\d,.]*\d)?";

static COST_DISTANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)({NUMBER})\s*(km|kilomet(?:er|re)s?|miles?|mi)\b"
    ))
    .expect("cost distance pattern is valid")
});

static COST_PRICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\$?\s*({NUMBER})\s*(?:/\s*|per\s+)?(?:liters?|litres?|l)\b"
    ))
    .expect("cost price pattern is valid")
});

static COST_EFFICIENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)({NUMBER})\s*(?:km|kilomet(?:er|re)s?)\s*(?:/|per)\s*(?:liters?|litres?|l)\b|efficiency\s+of\s+({NUMBER})"
    ))
    .expect("cost efficiency pattern is valid")
});

/// Parameters extracted from a recognised query, before any calculation runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedQuery {
    Distance {
        from: String,
        to: String,
        origin: Coordinate,
        destination: Coordinate,
    },
    Route {
        /// Stop names as written, in input order.
        stops: Vec<String>,
        waypoints: Vec<Coordinate>,
    },
    /// Numeric values stay as literals; they are parsed when the query is
    /// evaluated so a malformed number surfaces as an error, not a miss.
    Cost {
        distance: String,
        distance_unit: DistanceUnit,
        price_per_liter: Option<String>,
        efficiency_km_per_liter: Option<String>,
    },
}

impl ParsedQuery {
    pub fn kind(&self) -> QueryKind {
        match self {
            ParsedQuery::Distance { .. } => QueryKind::Distance,
            ParsedQuery::Route { .. } => QueryKind::Route,
            ParsedQuery::Cost { .. } => QueryKind::Cost,
        }
    }
}

/// One family of recognised phrasings.
pub trait QueryPattern: Send + Sync {
    /// The category this pattern classifies into.
    fn kind(&self) -> QueryKind;

    /// Try to classify `query` and extract its parameters.
    fn extract(&self, query: &str, gazetteer: &Gazetteer) -> Option<ParsedQuery>;
}

fn group(captures: &Captures<'_>, idx: usize) -> Option<String> {
    captures
        .get(idx)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// A captured place name or list, without trailing sentence punctuation.
fn name_group(captures: &Captures<'_>, idx: usize) -> Option<String> {
    group(captures, idx)
        .map(|s| s.trim_end_matches(['.', '!', '?']).trim_end().to_string())
        .filter(|s| !s.is_empty())
}

/// A captured number, widened to the left over any digits or dots glued to
/// it so that "2.5.3" is reported as written rather than as "5.3".
fn number_group(query: &str, captures: &Captures<'_>, idx: usize) -> Option<String> {
    let m = captures.get(idx)?;
    let start = query[..m.start()]
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .last()
        .map_or(m.start(), |(i, _)| i);
    Some(query[start..m.end()].to_string())
}

/// "distance from A to B", "how far is it from A to B?", "distance between A and B".
#[derive(Debug, Clone, Default)]
pub struct DistancePattern;

impl QueryPattern for DistancePattern {
    fn kind(&self) -> QueryKind {
        QueryKind::Distance
    }

    fn extract(&self, query: &str, gazetteer: &Gazetteer) -> Option<ParsedQuery> {
        for regex in [&*DISTANCE_FROM_TO, &*DISTANCE_BETWEEN] {
            let Some(captures) = regex.captures(query) else {
                continue;
            };
            let (Some(from), Some(to)) = (name_group(&captures, 1), name_group(&captures, 2))
            else {
                continue;
            };

            match (gazetteer.resolve(&from), gazetteer.resolve(&to)) {
                (Some(origin), Some(destination)) => {
                    return Some(ParsedQuery::Distance {
                        from,
                        to,
                        origin,
                        destination,
                    });
                }
                _ => debug!(%from, %to, "distance phrasing matched but a location is unknown"),
            }
        }
        None
    }
}

/// "optimize a route with stops in A, B, and C" and similar.
#[derive(Debug, Clone, Default)]
pub struct RoutePattern;

impl QueryPattern for RoutePattern {
    fn kind(&self) -> QueryKind {
        QueryKind::Route
    }

    fn extract(&self, query: &str, gazetteer: &Gazetteer) -> Option<ParsedQuery> {
        let captures = ROUTE.captures(query)?;
        let list = name_group(&captures, 1)?;

        let stops: Vec<String> = STOP_SEPARATOR
            .split(&list)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if stops.len() < 2 {
            debug!(%list, "route phrasing matched with fewer than two stops");
            return None;
        }

        let mut waypoints = Vec::with_capacity(stops.len());
        for stop in &stops {
            match gazetteer.resolve(stop) {
                Some(coordinate) => waypoints.push(coordinate),
                None => {
                    debug!(%stop, "route phrasing matched but a stop is unknown");
                    return None;
                }
            }
        }

        Some(ParsedQuery::Route { stops, waypoints })
    }
}

/// "fuel cost for 500 km at $2 per liter with 10 km/L".
#[derive(Debug, Clone, Default)]
pub struct CostPattern;

impl CostPattern {
    /// First `<number> <length unit>` that is not itself a rate such as "km/L".
    fn distance_literal(query: &str) -> Option<(String, DistanceUnit)> {
        COST_DISTANCE.captures_iter(query).find_map(|captures| {
            let whole = captures.get(0)?;
            let rest = query[whole.end()..].trim_start().to_ascii_lowercase();
            if rest.starts_with('/') || rest.starts_with("per ") {
                return None;
            }
            let unit = captures.get(2)?.as_str().parse().ok()?;
            Some((number_group(query, &captures, 1)?, unit))
        })
    }
}

impl QueryPattern for CostPattern {
    fn kind(&self) -> QueryKind {
        QueryKind::Cost
    }

    fn extract(&self, query: &str, _gazetteer: &Gazetteer) -> Option<ParsedQuery> {
        let (distance, distance_unit) = Self::distance_literal(query)?;

        let price_per_liter = COST_PRICE
            .captures(query)
            .and_then(|captures| number_group(query, &captures, 1));
        let efficiency_km_per_liter = COST_EFFICIENCY
            .captures(query)
            .and_then(|captures| {
                number_group(query, &captures, 1).or_else(|| number_group(query, &captures, 2))
            });

        Some(ParsedQuery::Cost {
            distance,
            distance_unit,
            price_per_liter,
            efficiency_km_per_liter,
        })
    }
}
