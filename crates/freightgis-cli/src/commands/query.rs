//! Free-text query subcommand. Always prints the envelope and succeeds.

use std::sync::Arc;

use anyhow::{Context, Result};

use freightgis_cli::output::{format_query_response, render_json, OutputFormat};
use freightgis_lib::QueryDispatcher;

use crate::GlobalOptions;

pub fn handle_query(global: &GlobalOptions, text: &str) -> Result<()> {
    let gazetteer = global.load_gazetteer()?;
    let dispatcher = QueryDispatcher::new(Arc::new(gazetteer));
    let response = dispatcher.process(text);

    match global.format {
        OutputFormat::Json => render_json(&response).context("failed to write JSON output")?,
        OutputFormat::Text => println!("{}", format_query_response(&response)),
    }
    Ok(())
}
