use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the freightgis library.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of library errors.
///
/// Callers that render errors for a client (the MCP server, the CLI) use this
/// to pick a status without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied a value it can fix (bad coordinate, index, number).
    InvalidArgument,
    /// A location name was not present in the gazetteer.
    UnresolvedLocation,
    /// Anything else: I/O, malformed gazetteer files, non-finite results.
    Internal,
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a latitude/longitude pair is non-finite or out of range.
    #[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: String,
    },

    /// Raised when a scalar argument fails validation.
    #[error("invalid argument {parameter}: {reason}")]
    InvalidArgument { parameter: String, reason: String },

    /// Raised when a route start index does not point into the waypoint list.
    #[error("start index {index} is out of range for {len} waypoints")]
    StartIndexOutOfRange { index: usize, len: usize },

    /// Raised when a location name could not be found in the gazetteer.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a gazetteer name or alias collides with an existing key.
    #[error("duplicate location name encountered: {name}")]
    DuplicateLocation { name: String },

    /// Raised when a gazetteer file cannot be parsed or validated.
    #[error("failed to load gazetteer from {path}: {message}")]
    GazetteerLoad { path: PathBuf, message: String },

    /// Raised when a distance or cost computation produced a non-finite value.
    #[error("calculation failed: {0}")]
    Calculation(String),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCoordinate { .. }
            | Error::InvalidArgument { .. }
            | Error::StartIndexOutOfRange { .. } => ErrorKind::InvalidArgument,
            Error::UnknownLocation { .. } => ErrorKind::UnresolvedLocation,
            Error::DuplicateLocation { .. }
            | Error::GazetteerLoad { .. }
            | Error::Calculation(_)
            | Error::Io(_)
            | Error::Json(_) => ErrorKind::Internal,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_lists_single_suggestion() {
        let err = Error::UnknownLocation {
            name: "Denvr".to_string(),
            suggestions: vec!["Denver".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown location: Denvr. Did you mean 'Denver'?"
        );
        assert_eq!(err.kind(), ErrorKind::UnresolvedLocation);
    }

    #[test]
    fn unknown_location_lists_multiple_suggestions() {
        let err = Error::UnknownLocation {
            name: "San".to_string(),
            suggestions: vec!["San Diego".to_string(), "San Antonio".to_string()],
        };
        assert!(err
            .to_string()
            .ends_with("Did you mean one of: 'San Diego', 'San Antonio'?"));
    }

    #[test]
    fn unknown_location_without_suggestions_is_bare() {
        let err = Error::UnknownLocation {
            name: "Atlantis".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "unknown location: Atlantis");
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            Error::StartIndexOutOfRange { index: 3, len: 2 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::invalid_argument("efficiency", "must be positive").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::Calculation("NaN".into()).kind(),
            ErrorKind::Internal
        );
    }
}
