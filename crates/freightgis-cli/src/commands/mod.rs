// One module per CLI subcommand; main.rs parses arguments and dispatches here.

pub mod calc;
pub mod freight;
pub mod locations;
pub mod mcp;
pub mod query;
