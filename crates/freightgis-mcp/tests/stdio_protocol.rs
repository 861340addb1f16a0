//! End-to-end tests for the MCP server binary over stdio.
//!
//! Each test feeds a batch of newline-delimited requests, lets the server hit
//! EOF, and inspects the responses it wrote to stdout.

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn run_session(requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|r| format!("{}\n", r)).collect();
    let output = cargo_bin_cmd!("freightgis-mcp")
        .env("RUST_LOG", "info")
        .env_remove("FREIGHTGIS_GAZETTEER")
        .write_stdin(input)
        .output()
        .expect("server runs");
    assert!(output.status.success(), "server exited with {:?}", output.status);

    String::from_utf8(output.stdout)
        .expect("utf-8 stdout")
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout carries only JSON"))
        .collect()
}

fn tool_call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

fn tool_payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content");
    serde_json::from_str(text).expect("tool text is JSON")
}

#[test]
fn test_initialize_protocol() {
    let responses = run_session(&[json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {}
    })]);

    let response = &responses[0];
    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(response["result"]["serverInfo"]["name"], "freightgis");
    assert!(response["result"]["capabilities"]["tools"].is_object());
    assert!(response["result"]["capabilities"]["resources"].is_object());
}

#[test]
fn test_logs_go_to_stderr_only() {
    cargo_bin_cmd!("freightgis-mcp")
        .env("RUST_LOG", "info")
        .env_remove("FREIGHTGIS_GAZETTEER")
        .write_stdin("{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("MCP server initialized"))
        .stdout(predicate::str::contains("MCP server initialized").not());
}

#[test]
fn test_tools_list() {
    let responses = run_session(&[json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/list",
        "params": {}
    })]);

    let tools = responses[0]["result"]["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 5);

    let tool_names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert!(tool_names.contains(&"calculate_distance"));
    assert!(tool_names.contains(&"optimize_route"));
    assert!(tool_names.contains(&"estimate_fuel_cost"));
    assert!(tool_names.contains(&"process_query"));
    assert!(tool_names.contains(&"plan_freight_route"));

    for tool in tools {
        assert!(tool["inputSchema"].is_object());
    }
}

#[test]
fn test_resources_list() {
    let responses = run_session(&[json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "resources/list",
        "params": {}
    })]);

    let resources = responses[0]["result"]["resources"]
        .as_array()
        .expect("resources array");
    let uris: Vec<_> = resources.iter().map(|r| r["uri"].as_str().unwrap()).collect();
    assert_eq!(
        uris,
        vec![
            "freightgis://gazetteer",
            "freightgis://queries/examples",
            "freightgis://server/info"
        ]
    );
}

#[test]
fn test_distance_tool_new_york_to_los_angeles() {
    let responses = run_session(&[tool_call(
        4,
        "calculate_distance",
        json!({"origin": [40.7128, -74.0060], "destination": [34.0522, -118.2437]}),
    )]);

    assert_eq!(responses[0]["result"]["isError"], false);
    let payload = tool_payload(&responses[0]);
    let distance = payload["distance"].as_f64().unwrap();
    assert!((3930.0..3950.0).contains(&distance), "got {distance}");
    assert_eq!(payload["unit"], "km");
}

#[test]
fn test_process_query_route_example() {
    let responses = run_session(&[tool_call(
        5,
        "process_query",
        json!({"query": "Optimize a route with stops in NYC, Denver, and LA"}),
    )]);

    let envelope = tool_payload(&responses[0]);
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["type"], "route");
    assert_eq!(envelope["result"]["stops"], json!(["NYC", "Denver", "LA"]));
}

#[test]
fn test_error_codes() {
    let responses = run_session(&[
        json!({"jsonrpc": "2.0", "id": 6, "method": "does/not/exist"}),
        json!({"jsonrpc": "1.0", "method": "notifications/initialized"}),
        tool_call(7, "unknown_tool", json!({})),
        tool_call(8, "estimate_fuel_cost", json!({"distance_km": "far"})),
        json!({"jsonrpc": "1.0", "id": 9, "method": "ping"}),
    ]);

    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["error"]["code"], -32601);
    assert_eq!(responses[1]["error"]["code"], -32601);
    assert!(responses[1]["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Unknown tool"));
    assert_eq!(responses[2]["error"]["code"], -32602);
    assert_eq!(responses[3]["error"]["code"], -32600);
}

#[test]
fn test_gazetteer_from_environment() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[{{"name": "Depot", "latitude": 10.0, "longitude": 10.0}},
            {{"name": "Yard", "latitude": 10.0, "longitude": 11.0}}]"#
    )
    .expect("write gazetteer");

    let request = tool_call(
        10,
        "plan_freight_route",
        json!({"origin": "Depot", "destination": "Yard"}),
    );
    let output = cargo_bin_cmd!("freightgis-mcp")
        .env("FREIGHTGIS_GAZETTEER", file.path())
        .write_stdin(format!("{}\n", request))
        .output()
        .expect("server runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let response: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    let route = tool_payload(&response);
    assert_eq!(route["stops"], json!(["Depot", "Yard"]));
    assert!(route["total_distance_km"].as_f64().unwrap() > 100.0);
}
