mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use freightgis_cli::output::OutputFormat;
use freightgis_lib::{
    Gazetteer, DEFAULT_FUEL_EFFICIENCY_KM_PER_LITER, DEFAULT_FUEL_PRICE_PER_LITER,
};
use freightgis_mcp::resolve_gazetteer_source;

#[derive(Parser, Debug)]
#[command(author, version, about = "Geodesic distance, route ordering, and fuel cost tools")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Gazetteer JSON file (overrides FREIGHTGIS_GAZETTEER and the data dir).
    #[arg(long, global = true)]
    pub gazetteer: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

impl GlobalOptions {
    pub fn load_gazetteer(&self) -> Result<Gazetteer> {
        let source = resolve_gazetteer_source(self.gazetteer.as_deref());
        source
            .load()
            .with_context(|| format!("failed to load gazetteer from {}", source))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Geodesic distance between two locations (names or "lat,lon").
    Distance {
        #[arg(long = "from", allow_hyphen_values = true)]
        from: String,
        #[arg(long = "to", allow_hyphen_values = true)]
        to: String,
        /// Result unit: km or miles.
        #[arg(long, default_value = "km")]
        unit: String,
    },
    /// Order stops by greedy nearest neighbour.
    Route {
        /// A stop (name or "lat,lon"); repeat for each stop.
        #[arg(long = "stop", allow_hyphen_values = true)]
        stops: Vec<String>,
        /// Index of the stop to start from.
        #[arg(long, default_value_t = 0)]
        start_index: usize,
    },
    /// Fuel cost for a distance.
    Cost {
        #[arg(long)]
        distance_km: f64,
        /// Fuel price per liter.
        #[arg(long, default_value_t = DEFAULT_FUEL_PRICE_PER_LITER)]
        price: f64,
        /// Vehicle efficiency in km per liter.
        #[arg(long, default_value_t = DEFAULT_FUEL_EFFICIENCY_KM_PER_LITER)]
        efficiency: f64,
    },
    /// Answer a natural-language question.
    Query {
        text: String,
    },
    /// Plan a freight route between named locations.
    Freight {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Intermediate stop name; repeat for each stop.
        #[arg(long = "via")]
        via: Vec<String>,
    },
    /// List the locations in the active gazetteer.
    Locations,
    /// Run the MCP server over stdio.
    Mcp {
        /// Log level filter (overrides RUST_LOG).
        #[arg(long)]
        log_level: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let global = &cli.global;

    // The MCP server installs its own stderr-only subscriber.
    if !matches!(cli.command, Command::Mcp { .. }) {
        init_tracing();
    }

    match &cli.command {
        Command::Distance { from, to, unit } => {
            commands::calc::handle_distance(global, from, to, unit)
        }
        Command::Route { stops, start_index } => {
            commands::calc::handle_route(global, stops, *start_index)
        }
        Command::Cost {
            distance_km,
            price,
            efficiency,
        } => commands::calc::handle_cost(global, *distance_km, *price, *efficiency),
        Command::Query { text } => commands::query::handle_query(global, text),
        Command::Freight { from, to, via } => {
            commands::freight::handle_freight(global, from, to, via)
        }
        Command::Locations => commands::locations::handle_locations(global),
        Command::Mcp { log_level } => {
            commands::mcp::run_mcp_server(global, log_level.as_deref()).await
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
