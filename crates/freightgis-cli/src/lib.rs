//! freightgis CLI library.
//!
//! Location parsing and output formatting shared by the `freightgis`
//! subcommands.

pub mod location;
pub mod output;
