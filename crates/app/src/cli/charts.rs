use tally::prelude::DEFAULT_CURRENCY;
use tally_app::{
    config::{AnalysisConfig, DatabaseConfig, OutputConfig},
    domain::sales::SqliteSalesService,
    pipeline,
};

pub(crate) async fn run(
    database: &DatabaseConfig,
    analysis: &AnalysisConfig,
    output: &OutputConfig,
) -> Result<(), String> {
    let db = super::open_store(database, false).await?;
    let sales = SqliteSalesService::new(db.clone());

    let result = match pipeline::load_metrics(&sales, analysis.top).await {
        Ok(bundle) => pipeline::write_charts(&bundle, &output.output_dir, DEFAULT_CURRENCY),
        Err(error) => Err(error),
    };

    db.close().await;

    let outcomes = result.map_err(|error| format!("visualization failed: {error}"))?;

    super::print_written(&outcomes).map_err(|error| format!("failed to write output: {error}"))
}
