use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tally_app::{
    charts::ChartOutcome,
    config::{AnalysisConfig, DatabaseConfig, LoggingConfig, OutputConfig},
    database::{self, Db},
    domain::sales::SalesServiceError,
    observability,
};

mod analyze;
mod charts;
mod init;
mod run;

#[derive(Debug, Parser)]
#[command(name = "tally", about = "Sales analytics over a SQLite store", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    analysis: AnalysisConfig,

    #[command(flatten)]
    output: OutputConfig,

    #[command(flatten)]
    logging: LoggingConfig,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the store and fill it with freshly generated sample data
    Init(init::SeedArgs),

    /// Seed the store if it is empty, then print the report and write the charts
    Run(init::SeedArgs),

    /// Print the analysis report
    Analyze,

    /// Write the charts
    Charts,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_logging(&self.logging).map_err(|error| error.to_string())?;

        match self.command {
            Commands::Init(args) => init::run(args, &self.database).await,
            Commands::Run(args) => run::run(args, &self.database, &self.analysis, &self.output).await,
            Commands::Analyze => analyze::run(&self.database, &self.analysis).await,
            Commands::Charts => charts::run(&self.database, &self.analysis, &self.output).await,
        }
    }
}

/// Open the store named by `database`.
///
/// Only initialization may create a missing database file; the read-only
/// commands fail instead.
async fn open_store(database: &DatabaseConfig, create_if_missing: bool) -> Result<Db, String> {
    let pool = database::connect(&database.database_url, create_if_missing)
        .await
        .map_err(|error| {
            format!(
                "failed to open {}: {}",
                database.database_url,
                SalesServiceError::from(error)
            )
        })?;

    Ok(Db::new(pool))
}

fn print_written(outcomes: &[ChartOutcome]) -> io::Result<()> {
    let mut out = io::stdout().lock();

    writeln!(out, "Generated files:")?;

    for path in outcomes.iter().filter_map(ChartOutcome::path) {
        writeln!(out, "  {}", path.display())?;
    }

    Ok(())
}
