//! Handlers for the direct calculation subcommands: distance, route, cost.

use anyhow::{Context, Result};
use serde::Serialize;

use freightgis_cli::location::{parse_location, ResolvedLocation};
use freightgis_cli::output::{render_json, OutputFormat};
use freightgis_lib::{
    calculate_distance, calculate_route_distance, estimate_fuel_cost, estimate_travel_time,
    liters_needed, nearest_neighbor_order, DistanceUnit, FuelPricing, GeodesicMetric,
    DEFAULT_AVERAGE_SPEED_KMH,
};

use crate::GlobalOptions;

#[derive(Debug, Serialize)]
struct DistanceReport {
    from: ResolvedLocation,
    to: ResolvedLocation,
    distance: f64,
    unit: DistanceUnit,
    travel_hours: f64,
}

pub fn handle_distance(global: &GlobalOptions, from: &str, to: &str, unit: &str) -> Result<()> {
    let gazetteer = global.load_gazetteer()?;
    let unit: DistanceUnit = unit.parse()?;
    let from = parse_location(&gazetteer, from)?;
    let to = parse_location(&gazetteer, to)?;

    let distance = calculate_distance(from.coordinate, to.coordinate, unit)?;
    let travel = estimate_travel_time(unit.to_km(distance), DEFAULT_AVERAGE_SPEED_KMH)?;

    match global.format {
        OutputFormat::Json => render_json(&DistanceReport {
            from,
            to,
            distance,
            unit,
            travel_hours: travel.hours,
        })
        .context("failed to write JSON output")?,
        OutputFormat::Text => {
            println!(
                "Distance from {} to {}: {:.2} {}",
                from.label, to.label, distance, unit
            );
            println!(
                "Estimated travel time: {:.1} hours at {} km/h",
                travel.hours, DEFAULT_AVERAGE_SPEED_KMH
            );
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct RouteReport {
    stops: Vec<ResolvedLocation>,
    order: Vec<usize>,
    total_distance_km: f64,
    estimated_cost: f64,
}

pub fn handle_route(global: &GlobalOptions, stops: &[String], start_index: usize) -> Result<()> {
    let gazetteer = global.load_gazetteer()?;
    let locations = stops
        .iter()
        .map(|stop| parse_location(&gazetteer, stop))
        .collect::<freightgis_lib::Result<Vec<_>>>()?;
    let coordinates: Vec<_> = locations.iter().map(|loc| loc.coordinate).collect();

    let order = nearest_neighbor_order(&GeodesicMetric, &coordinates, start_index)?;
    let ordered: Vec<ResolvedLocation> = order.iter().map(|&idx| locations[idx].clone()).collect();
    let path: Vec<_> = ordered.iter().map(|loc| loc.coordinate).collect();
    let total = calculate_route_distance(&path, DistanceUnit::Kilometers)?;
    let cost = estimate_fuel_cost(total, &FuelPricing::default())?;

    match global.format {
        OutputFormat::Json => render_json(&RouteReport {
            stops: ordered,
            order,
            total_distance_km: total,
            estimated_cost: cost,
        })
        .context("failed to write JSON output")?,
        OutputFormat::Text => {
            println!("Optimized route ({} stops):", ordered.len());
            for (position, stop) in ordered.iter().enumerate() {
                println!(" {:>2}. {} {}", position + 1, stop.label, stop.coordinate);
            }
            println!("Total distance: {:.2} km", total);
            println!("Estimated fuel cost: ${:.2}", cost);
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct CostReport {
    distance_km: f64,
    fuel_price_per_liter: f64,
    fuel_efficiency_km_per_liter: f64,
    liters_needed: f64,
    estimated_cost: f64,
}

pub fn handle_cost(
    global: &GlobalOptions,
    distance_km: f64,
    price: f64,
    efficiency: f64,
) -> Result<()> {
    let pricing = FuelPricing::new(price, efficiency)?;
    let liters = liters_needed(distance_km, &pricing)?;
    let cost = estimate_fuel_cost(distance_km, &pricing)?;

    match global.format {
        OutputFormat::Json => render_json(&CostReport {
            distance_km,
            fuel_price_per_liter: pricing.price_per_liter,
            fuel_efficiency_km_per_liter: pricing.efficiency_km_per_liter,
            liters_needed: liters,
            estimated_cost: cost,
        })
        .context("failed to write JSON output")?,
        OutputFormat::Text => {
            println!("Fuel needed: {:.2} L", liters);
            println!("Estimated fuel cost: ${:.2}", cost);
        }
    }
    Ok(())
}
