//! Shared configuration groups
//!
//! Each group is a clap [`Args`](clap::Args) struct flattened into the
//! command-line parsers of the `tally` CLI and the dashboard server. Every
//! option also reads an environment variable, and `.env` is loaded before
//! parsing.

pub mod analysis;
pub mod db;
pub mod logging;
pub mod output;

pub use analysis::AnalysisConfig;
pub use db::DatabaseConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use output::OutputConfig;
