//! JSON-RPC 2.0 request handling for the MCP methods this server supports.
//!
//! [`handle_message`] is transport-agnostic: it takes one decoded message and
//! returns the response to send, or `None` for notifications.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::resources::read_resource;
use crate::server::McpServerState;
use crate::tools::{
    tool_definitions, CalculateDistanceTool, EstimateFuelCostTool, OptimizeRouteTool,
    PlanFreightRouteTool, ProcessQueryTool,
};

/// MCP protocol revision implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// A JSON-RPC error object.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Build a success response.
pub fn success_response(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "result": result})
}

/// Build an error response.
pub fn error_response(id: Value, error: RpcError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {"code": error.code, "message": error.message}
    })
}

/// Response for a line that is not valid JSON.
pub fn parse_error_response(detail: &str) -> Value {
    error_response(
        Value::Null,
        RpcError::new(PARSE_ERROR, format!("Parse error: {}", detail)),
    )
}

/// Handle one decoded JSON-RPC message.
pub fn handle_message(server: &McpServerState, message: Value) -> Option<Value> {
    let Some(object) = message.as_object() else {
        return Some(error_response(
            Value::Null,
            RpcError::new(INVALID_REQUEST, "Invalid request: expected a JSON object"),
        ));
    };

    // Notifications are never answered, even when malformed.
    let Some(response_id) = object.get("id").cloned() else {
        let method = object.get("method").and_then(Value::as_str).unwrap_or("<none>");
        debug!("Notification received: {}", method);
        return None;
    };

    if object.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return Some(error_response(
            response_id,
            RpcError::new(INVALID_REQUEST, "Invalid request: jsonrpc must be \"2.0\""),
        ));
    }

    let Some(method) = object.get("method").and_then(Value::as_str) else {
        return Some(error_response(
            response_id,
            RpcError::new(INVALID_REQUEST, "Invalid request: missing method"),
        ));
    };

    let params = object.get("params").cloned().unwrap_or(Value::Null);

    debug!("Request received: {}", method);
    let outcome = dispatch(server, method, params);
    Some(match outcome {
        Ok(result) => success_response(response_id, result),
        Err(error) => {
            warn!("Request {} failed: {}", method, error.message);
            error_response(response_id, error)
        }
    })
}

fn dispatch(server: &McpServerState, method: &str, params: Value) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {"name": crate::SERVER_NAME, "version": env!("CARGO_PKG_VERSION")},
            "capabilities": {"tools": {}, "resources": {}, "prompts": {}}
        })),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": tool_definitions() })),
        "tools/call" => call_tool(server, params),
        "resources/list" => Ok(json!({ "resources": server.resources() })),
        "resources/read" => read(server, params),
        "prompts/list" => Ok(json!({ "prompts": [] })),
        other => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("Unknown method: {}", other),
        )),
    }
}

fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, RpcError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments)
        .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid arguments: {}", e)))
}

fn tool_result<T: Serialize>(outcome: crate::Result<T>) -> Value {
    let (body, is_error) = match outcome {
        Ok(output) => (serde_json::to_string_pretty(&output).map_err(|e| e.to_string()), false),
        Err(err) => (serde_json::to_string_pretty(&err).map_err(|e| e.to_string()), true),
    };
    let (text, is_error) = match body {
        Ok(text) => (text, is_error),
        Err(reason) => (format!("Error: {}", reason), true),
    };
    json!({
        "content": [{"type": "text", "text": text}],
        "isError": is_error
    })
}

fn call_tool(server: &McpServerState, params: Value) -> Result<Value, RpcError> {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::new(INVALID_PARAMS, "Invalid params: missing tool name"))?;
    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

    tracing::info!("Calling tool {}", name);
    let result = match name {
        CalculateDistanceTool::NAME => {
            tool_result(CalculateDistanceTool::execute(parse_arguments(arguments)?))
        }
        OptimizeRouteTool::NAME => tool_result(OptimizeRouteTool::execute(parse_arguments(arguments)?)),
        EstimateFuelCostTool::NAME => {
            tool_result(EstimateFuelCostTool::execute(parse_arguments(arguments)?))
        }
        ProcessQueryTool::NAME => {
            tool_result(ProcessQueryTool::execute(server, parse_arguments(arguments)?))
        }
        PlanFreightRouteTool::NAME => {
            tool_result(PlanFreightRouteTool::execute(server, parse_arguments(arguments)?))
        }
        other => {
            return Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Unknown tool: {}", other),
            ))
        }
    };
    Ok(result)
}

fn read(server: &McpServerState, params: Value) -> Result<Value, RpcError> {
    let uri = params
        .get("uri")
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::new(INVALID_PARAMS, "Invalid params: missing uri"))?;

    match read_resource(server, uri) {
        Some(Ok(text)) => Ok(json!({
            "contents": [{"uri": uri, "mimeType": "application/json", "text": text}]
        })),
        Some(Err(err)) => Err(RpcError::new(INTERNAL_ERROR, err.message)),
        None => Err(RpcError::new(
            INVALID_PARAMS,
            format!("Unknown resource: {}", uri),
        )),
    }
}
