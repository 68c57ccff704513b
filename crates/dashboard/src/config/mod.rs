//! Dashboard configuration module

use clap::Parser;
use tally_app::config::{AnalysisConfig, DatabaseConfig, LoggingConfig};

use crate::config::server::ServerRuntimeConfig;

pub(crate) mod server;

/// Tally dashboard server configuration
#[derive(Debug, Parser)]
#[command(name = "tally-dashboard", about = "Interactive sales dashboard", long_about = None)]
pub struct DashboardConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Sales store settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Aggregation settings.
    #[command(flatten)]
    pub analysis: AnalysisConfig,
}

impl DashboardConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
