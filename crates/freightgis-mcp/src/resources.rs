//! MCP resource implementations
//!
//! This module defines the three resources exposed by the MCP server:
//! - freightgis://gazetteer: Known locations with aliases and coordinates
//! - freightgis://queries/examples: Sample queries and evaluation order
//! - freightgis://server/info: Server metadata and default constants

use freightgis_lib::{EXAMPLE_QUERIES, UNRECOGNIZED_MESSAGE};
use serde::Serialize;
use serde_json::json;

use crate::server::McpServerState;
use crate::{Error, Result};

pub const GAZETTEER_URI: &str = "freightgis://gazetteer";
pub const EXAMPLE_QUERIES_URI: &str = "freightgis://queries/examples";
pub const SERVER_INFO_URI: &str = "freightgis://server/info";

/// Gazetteer resource
pub struct GazetteerResource;

impl GazetteerResource {
    pub fn read(state: &McpServerState) -> Result<String> {
        #[derive(Serialize)]
        struct Location<'a> {
            name: &'a str,
            aliases: &'a [String],
            latitude: f64,
            longitude: f64,
        }

        let locations: Vec<Location<'_>> = state
            .gazetteer
            .entries()
            .iter()
            .map(|entry| Location {
                name: &entry.name,
                aliases: &entry.aliases,
                latitude: entry.coordinate.latitude,
                longitude: entry.coordinate.longitude,
            })
            .collect();

        let payload = json!({
            "source": state.gazetteer_source,
            "count": locations.len(),
            "locations": locations,
        });
        serde_json::to_string(&payload).map_err(|e| Error::internal(e.to_string()))
    }
}

/// Example queries resource
pub struct ExampleQueriesResource;

impl ExampleQueriesResource {
    pub fn read(state: &McpServerState) -> Result<String> {
        let payload = json!({
            "examples": EXAMPLE_QUERIES,
            "evaluation_order": state.dispatcher.evaluation_order(),
            "unrecognized_message": UNRECOGNIZED_MESSAGE,
        });
        serde_json::to_string(&payload).map_err(|e| Error::internal(e.to_string()))
    }
}

/// Server info resource
pub struct ServerInfoResource;

impl ServerInfoResource {
    pub fn read(state: &McpServerState) -> Result<String> {
        serde_json::to_string(&state.server_info()).map_err(|e| Error::internal(e.to_string()))
    }
}

/// Read a resource by URI, `None` if the URI is not served here
pub fn read_resource(state: &McpServerState, uri: &str) -> Option<Result<String>> {
    match uri {
        GAZETTEER_URI => Some(GazetteerResource::read(state)),
        EXAMPLE_QUERIES_URI => Some(ExampleQueriesResource::read(state)),
        SERVER_INFO_URI => Some(ServerInfoResource::read(state)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_gazetteer_lists_aliases() {
        let state = McpServerState::with_builtin();
        let json: Value = serde_json::from_str(&GazetteerResource::read(&state).unwrap()).unwrap();
        let locations = json["locations"].as_array().unwrap();
        let nyc = locations
            .iter()
            .find(|l| l["name"] == "New York")
            .expect("New York listed");
        assert_eq!(nyc["aliases"][0], "NYC");
        assert_eq!(json["count"], locations.len());
    }

    #[test]
    fn test_examples_include_order() {
        let state = McpServerState::with_builtin();
        let json: Value =
            serde_json::from_str(&ExampleQueriesResource::read(&state).unwrap()).unwrap();
        assert_eq!(json["examples"].as_array().unwrap().len(), 3);
        assert_eq!(json["evaluation_order"][0], "distance");
        assert_eq!(json["evaluation_order"][2], "cost");
    }

    #[test]
    fn test_unknown_uri() {
        let state = McpServerState::with_builtin();
        assert!(read_resource(&state, "freightgis://nope").is_none());
        assert!(read_resource(&state, SERVER_INFO_URI).is_some());
    }
}
