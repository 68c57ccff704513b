//! Pipeline stages
//!
//! The CLI commands are compositions of these stages. Each stage returns a
//! [`PipelineError`] on failure; [`StageLog`] records failures so a command
//! can keep going and still exit unsuccessfully at the end.

use std::{fmt::Display, io, path::Path};

use rand::{SeedableRng, rngs::StdRng};
use rusty_money::iso::Currency;
use tally::prelude::*;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    charts::{self, ChartOutcome},
    domain::sales::{SalesService, SalesServiceError},
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Sales(#[from] SalesServiceError),

    #[error("invalid generator settings: {0}")]
    Generator(#[from] GeneratorError),

    #[error("invalid analysis settings: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("failed to write report: {0}")]
    Report(#[from] ReportError),

    #[error("{failed} of {total} charts could not be written")]
    Charts { failed: usize, total: usize },
}

/// How sample data is generated.
#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    /// Number of records to generate
    pub count: usize,

    /// RNG seed; entropy when absent
    pub seed: Option<u64>,
}

/// Create the schema, discard existing records and insert freshly generated ones.
///
/// The generator settings are validated before the store is touched.
///
/// # Errors
///
/// Returns [`PipelineError::Generator`] for invalid settings and
/// [`PipelineError::Sales`] if the store rejects the operation.
pub async fn initialize_store(
    sales: &dyn SalesService,
    options: SeedOptions,
) -> Result<u64, PipelineError> {
    let config = GeneratorConfig::default().with_count(options.count);

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let records = generate(&config, &mut rng)?;

    sales.ensure_schema().await?;
    sales.reset().await?;

    let inserted = sales.seed(&records).await?;

    info!(inserted, "sales store initialized");

    Ok(inserted)
}

/// Initialize the store only if it holds no records.
///
/// Returns the number of records inserted, zero if the store was left alone.
///
/// # Errors
///
/// Returns a [`PipelineError`] if the store cannot be read or seeded.
pub async fn ensure_populated(
    sales: &dyn SalesService,
    options: SeedOptions,
) -> Result<u64, PipelineError> {
    sales.ensure_schema().await?;

    let existing = sales.count().await?;

    if existing > 0 {
        info!(existing, "sales store already populated");

        return Ok(0);
    }

    initialize_store(sales, options).await
}

/// Load every record and compute the metrics bundle.
///
/// # Errors
///
/// Returns [`PipelineError::Sales`] if the data is unavailable and
/// [`PipelineError::Analysis`] if `top_n` is zero.
pub async fn load_metrics(
    sales: &dyn SalesService,
    top_n: usize,
) -> Result<MetricsBundle, PipelineError> {
    let records = sales.load(&SalesFilter::all()).await?;

    info!(records = records.len(), "loaded sales records");

    Ok(MetricsBundle::compute(&records, top_n)?)
}

/// Write the text report for `bundle`.
///
/// # Errors
///
/// Returns [`PipelineError::Report`] if the sink fails.
pub fn write_report(
    bundle: &MetricsBundle,
    currency: &'static Currency,
    out: impl io::Write,
) -> Result<(), PipelineError> {
    Report::new(bundle, currency).write_to(out)?;

    Ok(())
}

/// Write every chart into `dir`.
///
/// # Errors
///
/// Returns [`PipelineError::Charts`] if any chart could not be written;
/// the other charts are still written.
pub fn write_charts(
    bundle: &MetricsBundle,
    dir: &Path,
    currency: &'static Currency,
) -> Result<Vec<ChartOutcome>, PipelineError> {
    let outcomes = charts::render_all(bundle, dir, currency);
    let failed = outcomes.iter().filter(|outcome| outcome.is_failure()).count();

    if failed > 0 {
        return Err(PipelineError::Charts {
            failed,
            total: outcomes.len(),
        });
    }

    Ok(outcomes)
}

/// Failures collected across the stages of one command.
#[derive(Debug, Default)]
pub struct StageLog {
    failures: Vec<(&'static str, String)>,
}

impl StageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of `stage`, returning its value if it succeeded.
    pub fn record<T, E: Display>(&mut self, stage: &'static str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                error!(stage, "stage failed: {error}");

                self.failures.push((stage, error.to_string()));

                None
            }
        }
    }

    /// Record that `stage` could not run because an earlier stage failed.
    pub fn skip(&mut self, stage: &'static str, because: &'static str) {
        error!(stage, "stage skipped after {because} failed");

        self.failures
            .push((stage, format!("skipped because {because} failed")));
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Summarize the failures as the command's error.
    ///
    /// # Errors
    ///
    /// Returns one line per failed stage if any stage failed.
    pub fn finish(self) -> Result<(), String> {
        if self.failures.is_empty() {
            return Ok(());
        }

        Err(self
            .failures
            .into_iter()
            .map(|(stage, error)| format!("{stage} failed: {error}"))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
