use std::io;

use tally::prelude::DEFAULT_CURRENCY;
use tally_app::{
    config::{AnalysisConfig, DatabaseConfig},
    domain::sales::SqliteSalesService,
    pipeline,
};

pub(crate) async fn run(database: &DatabaseConfig, analysis: &AnalysisConfig) -> Result<(), String> {
    let db = super::open_store(database, false).await?;
    let sales = SqliteSalesService::new(db.clone());

    let result = match pipeline::load_metrics(&sales, analysis.top).await {
        Ok(bundle) => pipeline::write_report(&bundle, DEFAULT_CURRENCY, io::stdout().lock()),
        Err(error) => Err(error),
    };

    db.close().await;

    result.map_err(|error| format!("analysis failed: {error}"))
}
