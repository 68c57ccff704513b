//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://sales.db", global = true)]
    pub database_url: String,
}
