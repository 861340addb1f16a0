//! Gazetteer source resolution shared by the MCP server and the CLI.
//!
//! Order (highest to lowest priority):
//! 1. An explicit path (the `--gazetteer` flag)
//! 2. `FREIGHTGIS_GAZETTEER` environment variable
//! 3. XDG data home (e.g., `~/.local/share/freightgis/gazetteer.json`) if present
//! 4. The built-in gazetteer

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use freightgis_lib::Gazetteer;
use tracing::info;

/// Environment variable naming a gazetteer JSON file.
pub const GAZETTEER_ENV: &str = "FREIGHTGIS_GAZETTEER";

/// File name looked up under the XDG data directory.
pub const GAZETTEER_FILE_NAME: &str = "gazetteer.json";

/// Where the active gazetteer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GazetteerSource {
    Flag(PathBuf),
    Env(PathBuf),
    DataDir(PathBuf),
    Builtin,
}

impl GazetteerSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            GazetteerSource::Flag(path)
            | GazetteerSource::Env(path)
            | GazetteerSource::DataDir(path) => Some(path),
            GazetteerSource::Builtin => None,
        }
    }

    /// Load the gazetteer this source points at.
    pub fn load(&self) -> freightgis_lib::Result<Gazetteer> {
        match self.path() {
            Some(path) => Gazetteer::from_json_path(path),
            None => {
                info!("Using built-in gazetteer");
                Ok(Gazetteer::builtin())
            }
        }
    }
}

impl fmt::Display for GazetteerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GazetteerSource::Flag(path) => write!(f, "{} (--gazetteer)", path.display()),
            GazetteerSource::Env(path) => write!(f, "{} ({})", path.display(), GAZETTEER_ENV),
            GazetteerSource::DataDir(path) => write!(f, "{}", path.display()),
            GazetteerSource::Builtin => f.write_str("builtin"),
        }
    }
}

/// Default location of a user gazetteer under the XDG data directory.
pub fn data_dir_gazetteer() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "freightgis")
        .map(|dirs| dirs.data_dir().join(GAZETTEER_FILE_NAME))
}

/// Resolve the gazetteer source from the flag, the environment, and the data dir.
pub fn resolve_gazetteer_source(explicit: Option<&Path>) -> GazetteerSource {
    resolve_from(
        explicit,
        std::env::var_os(GAZETTEER_ENV),
        data_dir_gazetteer(),
    )
}

/// Pure resolution step; the data-dir candidate is only used if it exists.
pub fn resolve_from(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    data_dir_candidate: Option<PathBuf>,
) -> GazetteerSource {
    if let Some(path) = explicit {
        return GazetteerSource::Flag(path.to_path_buf());
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return GazetteerSource::Env(PathBuf::from(value));
    }

    match data_dir_candidate {
        Some(path) if path.is_file() => GazetteerSource::DataDir(path),
        _ => GazetteerSource::Builtin,
    }
}
