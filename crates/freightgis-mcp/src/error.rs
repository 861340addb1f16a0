//! Problem bodies returned inside failed tool results.
//!
//! The shape follows RFC 9457: a numeric status, a human message, a problem
//! type URI and optional structured context. Every library error maps onto
//! one of the three problem types below.

use freightgis_lib::ErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

const PROBLEM_BASE: &str = "https://freightgis.local/errors/";

/// A tool failure in RFC 9457 problem-details form.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[error("{message}")]
pub struct Error {
    /// Status in HTTP terms: 400, 404 or 500.
    pub code: i32,
    pub message: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    /// Parameter name, reason, suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl Error {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            problem_type: None,
            context: None,
        }
    }

    /// Set the problem type. A bare slug is expanded under the freightgis
    /// problem namespace; anything containing `/` is kept as given.
    pub fn with_type(mut self, problem: impl Into<String>) -> Self {
        let problem = problem.into();
        self.problem_type = Some(if problem.contains('/') {
            problem
        } else {
            format!("{}{}", PROBLEM_BASE, problem)
        });
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// 404 for a name missing from the gazetteer.
    pub fn location_not_found(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        let name = name.into();
        Self::new(404, format!("Location '{}' not found", name))
            .with_type("location-not-found")
            .with_context(json!({ "location": name, "suggestions": suggestions }))
    }

    /// 400 for a caller-fixable argument.
    pub fn invalid_param(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        let parameter = parameter.into();
        Self::new(400, format!("Invalid parameter: {}", parameter))
            .with_type("invalid-parameter")
            .with_context(json!({ "parameter": parameter, "reason": reason.into() }))
    }

    /// 500 for anything the caller cannot fix.
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(500, format!("Calculation failed: {}", reason.into())).with_type("internal-error")
    }
}

impl From<freightgis_lib::Error> for Error {
    fn from(err: freightgis_lib::Error) -> Self {
        use freightgis_lib::Error as LibError;

        match (err.kind(), err) {
            (_, LibError::InvalidArgument { parameter, reason }) => {
                Self::invalid_param(parameter, reason)
            }
            (_, LibError::StartIndexOutOfRange { index, len }) => Self::invalid_param(
                "start_index",
                format!("{} is out of range for {} waypoints", index, len),
            ),
            (_, LibError::UnknownLocation { name, suggestions }) => {
                Self::location_not_found(name, suggestions)
            }
            (ErrorKind::InvalidArgument, other) => Self::invalid_param("coordinate", other.to_string()),
            (ErrorKind::UnresolvedLocation, other) => Self::location_not_found(other.to_string(), vec![]),
            (ErrorKind::Internal, other) => Self::internal(other.to_string()),
        }
    }
}
