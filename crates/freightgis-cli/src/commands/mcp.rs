use anyhow::{Context, Result};
use freightgis_mcp::{
    configure_tracing, resolve_gazetteer_source, run_server_loop, McpServerState, StdioTransport,
};

use crate::GlobalOptions;

/// Public entrypoint orchestrating the MCP server lifecycle
pub async fn run_mcp_server(global: &GlobalOptions, log_level: Option<&str>) -> Result<()> {
    // 1. Configure tracing (stderr only)
    configure_tracing(log_level)?;

    // 2. Resolve the gazetteer and build server state
    let source = resolve_gazetteer_source(global.gazetteer.as_deref());
    tracing::info!("Using gazetteer source {}", source);
    let server = McpServerState::from_source(&source)
        .context("Failed to initialize MCP server state from gazetteer")?;

    // 3. Create transport and run server loop
    let mut transport = StdioTransport::stdio();
    run_server_loop(&mut transport, &server).await
}
