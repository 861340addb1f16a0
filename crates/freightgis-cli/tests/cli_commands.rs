//! Integration tests for the `freightgis` subcommands.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("freightgis");
    cmd.env_remove("FREIGHTGIS_GAZETTEER").env("RUST_LOG", "error");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command runs");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn distance_between_named_cities() {
    cli()
        .args(["distance", "--from", "NYC", "--to", "LA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance from NYC to LA: 39"))
        .stdout(predicate::str::contains("at 80 km/h"));
}

#[test]
fn distance_accepts_literal_coordinates_in_miles() {
    let json = json_stdout(cli().args([
        "--format",
        "json",
        "distance",
        "--from",
        "40.7128,-74.0060",
        "--to",
        "34.0522,-118.2437",
        "--unit",
        "miles",
    ]));
    assert_eq!(json["unit"], "miles");
    let miles = json["distance"].as_f64().unwrap();
    assert!((2440.0..2460.0).contains(&miles), "got {miles}");
}

#[test]
fn unknown_location_fails_with_suggestion() {
    cli()
        .args(["distance", "--from", "Denvr", "--to", "LA"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("'Denver'"));
}

#[test]
fn route_orders_stops_greedily() {
    let json = json_stdout(cli().args([
        "--format", "json", "route", "--stop", "NYC", "--stop", "LA", "--stop", "Denver",
    ]));
    assert_eq!(json["order"], serde_json::json!([0, 2, 1]));
    let total = json["total_distance_km"].as_f64().unwrap();
    let cost = json["estimated_cost"].as_f64().unwrap();
    assert!((cost - total / 8.0 * 1.5).abs() < 1e-6);
}

#[test]
fn route_rejects_bad_start_index() {
    cli()
        .args(["route", "--stop", "NYC", "--start-index", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start index 3 is out of range"));
}

#[test]
fn cost_with_explicit_price() {
    cli()
        .args(["cost", "--distance-km", "500", "--price", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated fuel cost: $125.00"));
}

#[test]
fn cost_rejects_zero_efficiency() {
    cli()
        .args(["cost", "--distance-km", "500", "--efficiency", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fuel_efficiency"));
}

#[test]
fn query_unrecognized_still_succeeds() {
    cli()
        .args(["query", "what's the weather today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("I couldn't understand this query."))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn query_json_envelope() {
    let json = json_stdout(cli().args([
        "--format",
        "json",
        "query",
        "fuel cost for 500 km at $2 per liter",
    ]));
    assert_eq!(json["status"], "success");
    assert_eq!(json["type"], "cost");
    assert_eq!(json["result"]["estimated_cost"], 125.0);
}

#[test]
fn freight_reports_skipped_waypoints() {
    cli()
        .args([
            "freight", "--from", "New York", "--to", "Los Angeles", "--via", "Denver", "--via",
            "Gotham",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route: New York -> Denver -> Los Angeles",
        ))
        .stdout(predicate::str::contains("Skipped unknown waypoints: Gotham"));
}

#[test]
fn locations_from_custom_gazetteer_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("gazetteer.json");
    fs::write(
        &path,
        r#"[{"name": "Depot", "aliases": ["D1"], "latitude": 1.0, "longitude": 2.0}]"#,
    )
    .expect("write gazetteer");

    cli()
        .arg("--gazetteer")
        .arg(&path)
        .arg("locations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Depot (D1)"))
        .stdout(predicate::str::contains("New York").not());
}

#[test]
fn gazetteer_env_var_is_honoured() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("places.json");
    fs::write(
        &path,
        r#"[{"name": "Depot", "latitude": 0.0, "longitude": 0.0},
            {"name": "Yard", "latitude": 0.0, "longitude": 1.0}]"#,
    )
    .expect("write gazetteer");

    cli()
        .env("FREIGHTGIS_GAZETTEER", &path)
        .args(["distance", "--from", "Depot", "--to", "Yard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance from Depot to Yard: 111"));
}

#[test]
fn missing_gazetteer_file_is_an_error() {
    cli()
        .args(["--gazetteer", "/nonexistent/gazetteer.json", "locations"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load gazetteer"));
}
