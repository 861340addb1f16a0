//! Command-line location arguments.
//!
//! A location is either a gazetteer name ("Denver", "NYC") or a literal
//! `lat,lon` pair ("39.74,-104.99").

use freightgis_lib::{Coordinate, Gazetteer, Result};
use serde::Serialize;

/// A location argument resolved to a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    /// The argument as the user wrote it.
    pub label: String,
    pub coordinate: Coordinate,
}

fn parse_pair(input: &str) -> Option<(f64, f64)> {
    let (lat, lon) = input.split_once(',')?;
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

/// Resolve a name or `lat,lon` pair.
pub fn parse_location(gazetteer: &Gazetteer, input: &str) -> Result<ResolvedLocation> {
    let coordinate = match parse_pair(input) {
        Some((lat, lon)) => Coordinate::new(lat, lon)?,
        None => gazetteer.require(input)?,
    };
    Ok(ResolvedLocation {
        label: input.trim().to_string(),
        coordinate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literal_pair() {
        let loc = parse_location(&Gazetteer::new(), "39.74, -104.99").unwrap();
        assert_eq!(loc.coordinate, Coordinate::new(39.74, -104.99).unwrap());
        assert_eq!(loc.label, "39.74, -104.99");
    }

    #[test]
    fn resolves_names_and_aliases() {
        let gazetteer = Gazetteer::builtin();
        let nyc = parse_location(&gazetteer, "NYC").unwrap();
        assert_eq!(nyc.coordinate, gazetteer.resolve("New York").unwrap());
    }

    #[test]
    fn rejects_out_of_range_pair() {
        assert!(parse_location(&Gazetteer::builtin(), "91,0").is_err());
    }

    #[test]
    fn unknown_name_has_suggestions() {
        let err = parse_location(&Gazetteer::builtin(), "Phoenx").unwrap_err();
        assert!(err.to_string().contains("Phoenix"));
    }
}
