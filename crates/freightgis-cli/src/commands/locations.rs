use anyhow::{Context, Result};

use freightgis_cli::output::{format_locations, render_json, OutputFormat};

use crate::GlobalOptions;

pub fn handle_locations(global: &GlobalOptions) -> Result<()> {
    let gazetteer = global.load_gazetteer()?;
    match global.format {
        OutputFormat::Json => {
            render_json(&gazetteer.entries()).context("failed to write JSON output")?
        }
        OutputFormat::Text => println!("{}", format_locations(&gazetteer)),
    }
    Ok(())
}
