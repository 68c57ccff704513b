use std::io;

use tally::prelude::DEFAULT_CURRENCY;
use tally_app::{
    config::{AnalysisConfig, DatabaseConfig, OutputConfig},
    domain::sales::SqliteSalesService,
    pipeline::{self, StageLog},
};

use super::init::SeedArgs;

pub(crate) async fn run(
    args: SeedArgs,
    database: &DatabaseConfig,
    analysis: &AnalysisConfig,
    output: &OutputConfig,
) -> Result<(), String> {
    let db = super::open_store(database, true).await?;
    let sales = SqliteSalesService::new(db.clone());
    let mut stages = StageLog::new();

    stages.record(
        "initialization",
        pipeline::ensure_populated(&sales, args.into()).await,
    );

    match stages.record("analysis", pipeline::load_metrics(&sales, analysis.top).await) {
        Some(bundle) => {
            stages.record(
                "analysis",
                pipeline::write_report(&bundle, DEFAULT_CURRENCY, io::stdout().lock()),
            );

            let written = stages.record(
                "visualization",
                pipeline::write_charts(&bundle, &output.output_dir, DEFAULT_CURRENCY),
            );

            if let Some(outcomes) = written {
                stages.record("visualization", super::print_written(&outcomes));
            }
        }
        None => stages.skip("visualization", "analysis"),
    }

    db.close().await;

    stages.finish()
}
