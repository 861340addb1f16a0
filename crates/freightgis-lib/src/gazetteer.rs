//! Name-to-coordinate lookup table.
//!
//! A [`Gazetteer`] maps case-insensitive place names and their aliases to a
//! single [`Coordinate`]. It is built once and then only read, so one instance
//! can be shared between threads behind an `Arc` without locking. Nothing in
//! the library reaches for a global table: callers pass the gazetteer they
//! want, which keeps tests and per-tenant tables independent.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Fixed freight gazetteer: (name, aliases, latitude, longitude).
const BUILTIN_LOCATIONS: &[(&str, &[&str], f64, f64)] = &[
    ("New York", &["NYC"], 40.7128, -74.0060),
    ("Los Angeles", &["LA"], 34.0522, -118.2437),
    ("Denver", &[], 39.7392, -104.9903),
    ("San Francisco", &["SF"], 37.7749, -122.4194),
    ("Chicago", &[], 41.8781, -87.6298),
    ("Houston", &[], 29.7604, -95.3698),
    ("Phoenix", &[], 33.4484, -112.0742),
    ("Philadelphia", &[], 39.9526, -75.1652),
    ("San Antonio", &[], 29.4241, -98.4936),
    ("San Diego", &[], 32.7157, -117.1611),
    ("Dallas", &[], 32.7767, -96.7970),
    ("Seattle", &[], 47.6062, -122.3321),
    ("Atlanta", &[], 33.7490, -84.3880),
    ("Boston", &[], 42.3601, -71.0589),
    ("Miami", &[], 25.7617, -80.1918),
    ("Las Vegas", &[], 36.1699, -115.1398),
];

/// One named place and the aliases that resolve to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub coordinate: Coordinate,
}

impl GazetteerEntry {
    pub fn new(name: impl Into<String>, aliases: Vec<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            aliases,
            coordinate,
        }
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// On-disk record format for gazetteer files.
#[derive(Debug, Deserialize)]
struct GazetteerRecord {
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
    latitude: f64,
    longitude: f64,
}

/// Immutable place-name lookup table.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
    index: HashMap<String, usize>,
}

/// Canonical lookup key: trimmed, lower-cased, trailing sentence punctuation
/// dropped, internal whitespace collapsed.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .trim_end_matches(['.', '!', '?'])
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Gazetteer {
    /// Create an empty gazetteer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of major US freight hubs.
    pub fn builtin() -> Self {
        let mut gazetteer = Self::new();
        for (name, aliases, latitude, longitude) in BUILTIN_LOCATIONS {
            let entry = GazetteerEntry::new(
                *name,
                aliases.iter().map(|alias| alias.to_string()).collect(),
                Coordinate {
                    latitude: *latitude,
                    longitude: *longitude,
                },
            );
            gazetteer.entries.push(entry);
            let idx = gazetteer.entries.len() - 1;
            for key in gazetteer.entries[idx].keys() {
                gazetteer.index.insert(normalize_name(key), idx);
            }
        }
        gazetteer
    }

    /// Add an entry. Fails if its name or any alias is already taken.
    pub fn insert(&mut self, entry: GazetteerEntry) -> Result<()> {
        entry.coordinate.validate()?;

        let mut keys = Vec::new();
        for key in entry.keys() {
            let normalized = normalize_name(key);
            if normalized.is_empty() {
                return Err(Error::invalid_argument(
                    "name",
                    "location names and aliases must not be blank",
                ));
            }
            if self.index.contains_key(&normalized) || keys.contains(&normalized) {
                return Err(Error::DuplicateLocation {
                    name: key.to_string(),
                });
            }
            keys.push(normalized);
        }

        let idx = self.entries.len();
        self.entries.push(entry);
        for key in keys {
            self.index.insert(key, idx);
        }
        Ok(())
    }

    /// Parse a JSON array of `{ name, aliases?, latitude, longitude }` records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<GazetteerRecord> = serde_json::from_str(json)?;
        let mut gazetteer = Self::new();
        for record in records {
            let coordinate = Coordinate::new(record.latitude, record.longitude)?;
            gazetteer.insert(GazetteerEntry::new(record.name, record.aliases, coordinate))?;
        }
        Ok(gazetteer)
    }

    /// Load a gazetteer file, see [`Gazetteer::from_json_str`] for the format.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let load_error = |message: String| Error::GazetteerLoad {
            path: path.to_path_buf(),
            message,
        };

        let contents = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let gazetteer = Self::from_json_str(&contents).map_err(|e| load_error(e.to_string()))?;
        info!(
            "Loaded {} gazetteer entries from {}",
            gazetteer.len(),
            path.display()
        );
        Ok(gazetteer)
    }

    /// Look up the entry whose name or alias matches `name`.
    pub fn lookup(&self, name: &str) -> Option<&GazetteerEntry> {
        self.index
            .get(&normalize_name(name))
            .map(|&idx| &self.entries[idx])
    }

    /// Resolve `name` to its coordinate.
    pub fn resolve(&self, name: &str) -> Option<Coordinate> {
        self.lookup(name).map(|entry| entry.coordinate)
    }

    /// Resolve `name`, producing an [`Error::UnknownLocation`] with
    /// suggestions when it is missing.
    pub fn require(&self, name: &str) -> Result<Coordinate> {
        self.resolve(name).ok_or_else(|| Error::UnknownLocation {
            name: name.trim().to_string(),
            suggestions: self.suggestions(name, 3),
        })
    }

    /// Entry names similar to `name`, best match first.
    pub fn suggestions(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = normalize_name(name);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = entry
                    .keys()
                    .map(|key| strsim::jaro_winkler(&needle, &normalize_name(key)))
                    .fold(0.0_f64, f64::max);
                (score >= SUGGESTION_THRESHOLD).then_some((score, entry.name.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
