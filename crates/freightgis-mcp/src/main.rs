use anyhow::{Context, Result};
use freightgis_mcp::{
    configure_tracing, resolve_gazetteer_source, run_server_loop, McpServerState, StdioTransport,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging MUST go to stderr; stdout carries the protocol.
    configure_tracing(None)?;

    let source = resolve_gazetteer_source(None);
    let server = McpServerState::from_source(&source)
        .with_context(|| format!("failed to load gazetteer from {}", source))?;

    let mut transport = StdioTransport::stdio();
    run_server_loop(&mut transport, &server).await
}
