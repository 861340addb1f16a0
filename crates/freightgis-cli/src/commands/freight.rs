use anyhow::{Context, Result};

use freightgis_cli::output::{format_freight_route, render_json, OutputFormat};
use freightgis_lib::{plan_freight_route, FreightOptions};

use crate::GlobalOptions;

pub fn handle_freight(global: &GlobalOptions, from: &str, to: &str, via: &[String]) -> Result<()> {
    let gazetteer = global.load_gazetteer()?;
    let route = plan_freight_route(&gazetteer, from, to, via, &FreightOptions::default())?;

    match global.format {
        OutputFormat::Json => render_json(&route).context("failed to write JSON output")?,
        OutputFormat::Text => println!("{}", format_freight_route(&route)),
    }
    Ok(())
}
