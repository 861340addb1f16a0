//! Output formatting for CLI results.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use freightgis_lib::{FreightRoute, Gazetteer, QueryResponse};
use serde::Serialize;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    stdout.flush()
}

/// Text rendering of a query envelope.
pub fn format_query_response(response: &QueryResponse) -> String {
    match response {
        QueryResponse::Success { result, .. } => result.explanation().to_string(),
        QueryResponse::Unrecognized {
            message, examples, ..
        } => {
            let mut out = format!("{}\nExamples:", message);
            for example in examples {
                let _ = write!(out, "\n  - {}", example);
            }
            out
        }
        QueryResponse::Error { error, .. } => format!("Error: {}", error),
    }
}

/// Text rendering of a planned freight route.
pub fn format_freight_route(route: &FreightRoute) -> String {
    let mut out = format!("Route: {}", route.stops.join(" -> "));
    let _ = write!(out, "\nTotal distance: {:.2} km", route.total_distance_km);
    let _ = write!(out, "\nTravel time: {:.1} hours", route.travel_hours);
    let _ = write!(out, "\nEstimated fuel cost: ${:.2}", route.estimated_cost);
    if !route.skipped_waypoints.is_empty() {
        let _ = write!(
            out,
            "\nSkipped unknown waypoints: {}",
            route.skipped_waypoints.join(", ")
        );
    }
    out
}

/// One line per gazetteer entry: name, aliases, coordinate.
pub fn format_locations(gazetteer: &Gazetteer) -> String {
    gazetteer
        .entries()
        .iter()
        .map(|entry| {
            let name = if entry.aliases.is_empty() {
                entry.name.clone()
            } else {
                format!("{} ({})", entry.name, entry.aliases.join(", "))
            };
            format!("{:<24} {}", name, entry.coordinate)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
