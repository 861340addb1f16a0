//! MCP (Model Context Protocol) server for freightgis
//!
//! This crate provides a stdio-based MCP server that exposes the freightgis
//! distance, route-ordering, fuel-cost, and query calculations to AI
//! assistants via the Model Context Protocol.
//!
//! # Architecture
//!
//! - `server`: Server state (gazetteer, dispatcher, metadata)
//! - `tools`: Tool implementations and their schemas
//! - `resources`: Resource implementations (gazetteer, example queries, server info)
//! - `protocol`: JSON-RPC 2.0 method dispatch
//! - `transport`: Newline-delimited stdio transport and the server loop
//! - `config`: Gazetteer source resolution
//! - `error`: Error types and RFC 9457 problem details
//!
//! # Transport
//!
//! The server speaks newline-delimited JSON-RPC 2.0 over stdio, one message
//! per line. Logs go to stderr so stdout carries only protocol frames.

pub mod config;
pub mod error;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{resolve_gazetteer_source, GazetteerSource};
pub use error::{Error, Result};
pub use server::McpServerState;
pub use transport::{configure_tracing, run_server_loop, MessageTransport, StdioTransport};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "freightgis";
