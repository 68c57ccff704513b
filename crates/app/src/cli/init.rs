use std::io::{self, Write};

use clap::Args;
use tally::{money::format_amount, prelude::*};
use tally_app::{
    config::DatabaseConfig,
    domain::sales::{SalesService, SqliteSalesService},
    pipeline::{self, SeedOptions},
};

/// Rows shown after seeding.
const SAMPLE_ROWS: u32 = 5;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// Number of sample records to generate
    #[arg(long, default_value_t = tally::generator::DEFAULT_COUNT)]
    count: usize,

    /// Seed for reproducible sample data
    #[arg(long)]
    seed: Option<u64>,
}

impl From<SeedArgs> for SeedOptions {
    fn from(args: SeedArgs) -> Self {
        Self {
            count: args.count,
            seed: args.seed,
        }
    }
}

pub(crate) async fn run(args: SeedArgs, database: &DatabaseConfig) -> Result<(), String> {
    let db = super::open_store(database, true).await?;
    let sales = SqliteSalesService::new(db.clone());

    let result = populate(&sales, args.into()).await;

    db.close().await;

    result
}

async fn populate(sales: &dyn SalesService, options: SeedOptions) -> Result<(), String> {
    pipeline::initialize_store(sales, options)
        .await
        .map_err(|error| format!("failed to initialize sales store: {error}"))?;

    let sample = sales
        .sample(SAMPLE_ROWS)
        .await
        .map_err(|error| format!("failed to read sample records: {error}"))?;

    let total = sales
        .count()
        .await
        .map_err(|error| format!("failed to count records: {error}"))?;

    print_sample(io::stdout().lock(), &sample, total)
        .map_err(|error| format!("failed to write output: {error}"))
}

fn print_sample(mut out: impl Write, sample: &[SalesRecord], total: u64) -> io::Result<()> {
    writeln!(out, "Sample records:")?;
    writeln!(
        out,
        "{:>6}  {:<10}  {:<20}  {:>8}  {:>12}",
        "id", "sale_date", "product", "quantity", "price"
    )?;

    for record in sample {
        writeln!(
            out,
            "{:>6}  {:<10}  {:<20}  {:>8}  {:>12}",
            record.id().to_string(),
            record.sale_date().to_string(),
            record.product(),
            record.quantity(),
            format_amount(record.price(), DEFAULT_CURRENCY),
        )?;
    }

    writeln!(out, "Total records: {total}")
}
