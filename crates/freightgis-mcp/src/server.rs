//! MCP server lifecycle and state management
//!
//! This module contains the server state shared by every request handler:
//! the gazetteer, the query dispatcher built on it, and metadata reported by
//! the `freightgis://server/info` resource.

use std::sync::Arc;

use freightgis_lib::{
    Gazetteer, QueryDispatcher, DEFAULT_AVERAGE_SPEED_KMH, DEFAULT_FUEL_EFFICIENCY_KM_PER_LITER,
    DEFAULT_FUEL_PRICE_PER_LITER,
};
use serde::Serialize;
use tracing::info;

use crate::config::GazetteerSource;

/// Main server state holding all runtime resources
///
/// Everything here is immutable after construction, so handlers only need a
/// shared reference.
pub struct McpServerState {
    /// Gazetteer used for every name lookup
    pub gazetteer: Arc<Gazetteer>,

    /// Query dispatcher sharing the same gazetteer
    pub dispatcher: QueryDispatcher,

    /// Human-readable description of where the gazetteer came from
    pub gazetteer_source: String,

    /// Server initialization timestamp for metadata
    pub initialized_at: chrono::DateTime<chrono::Utc>,
}

/// Metadata for the `freightgis://server/info` resource
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub gazetteer_source: String,
    pub location_count: usize,
    pub default_fuel_price_per_liter: f64,
    pub default_fuel_efficiency_km_per_liter: f64,
    pub default_average_speed_kmh: f64,
    pub started_at: String,
}

/// Descriptor for MCP resources exposed by the server
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

impl McpServerState {
    /// Create server state around an already-loaded gazetteer
    pub fn new(gazetteer: Gazetteer, gazetteer_source: impl Into<String>) -> Self {
        let gazetteer = Arc::new(gazetteer);
        Self {
            dispatcher: QueryDispatcher::new(Arc::clone(&gazetteer)),
            gazetteer,
            gazetteer_source: gazetteer_source.into(),
            initialized_at: chrono::Utc::now(),
        }
    }

    /// Server state backed by the built-in gazetteer
    pub fn with_builtin() -> Self {
        Self::new(Gazetteer::builtin(), GazetteerSource::Builtin.to_string())
    }

    /// Load the gazetteer from `source` and build the state around it
    pub fn from_source(source: &GazetteerSource) -> crate::Result<Self> {
        info!("Loading gazetteer from {}", source);
        let gazetteer = source.load()?;
        Ok(Self::new(gazetteer, source.to_string()))
    }

    /// Initialize the server and prepare for tool requests
    pub async fn initialize(&self) -> crate::Result<()> {
        info!(
            "MCP Server initialized with {} locations ({})",
            self.gazetteer.len(),
            self.gazetteer_source
        );
        Ok(())
    }

    /// Get server metadata for the `freightgis://server/info` resource
    pub fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: crate::SERVER_NAME,
            version: env!("CARGO_PKG_VERSION"),
            gazetteer_source: self.gazetteer_source.clone(),
            location_count: self.gazetteer.len(),
            default_fuel_price_per_liter: DEFAULT_FUEL_PRICE_PER_LITER,
            default_fuel_efficiency_km_per_liter: DEFAULT_FUEL_EFFICIENCY_KM_PER_LITER,
            default_average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            started_at: self.initialized_at.to_rfc3339(),
        }
    }

    /// List MCP resources exposed by this server
    pub fn resources(&self) -> Vec<ResourceDescriptor> {
        vec![
            ResourceDescriptor {
                uri: crate::resources::GAZETTEER_URI,
                name: "Gazetteer",
                description: "Known locations with aliases and coordinates",
                mime_type: "application/json",
            },
            ResourceDescriptor {
                uri: crate::resources::EXAMPLE_QUERIES_URI,
                name: "Example Queries",
                description: "Sample natural-language queries and the category evaluation order",
                mime_type: "application/json",
            },
            ResourceDescriptor {
                uri: crate::resources::SERVER_INFO_URI,
                name: "Server Info",
                description: "Server version, gazetteer source, and default calculation constants",
                mime_type: "application/json",
            },
        ]
    }
}

impl Default for McpServerState {
    fn default() -> Self {
        Self::with_builtin()
    }
}
