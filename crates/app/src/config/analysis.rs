//! Analysis Config

use clap::Args;
use tally::prelude::DEFAULT_TOP_N;

/// Aggregation settings.
#[derive(Debug, Clone, Args)]
pub struct AnalysisConfig {
    /// Number of products in the top-products ranking
    #[arg(long, env = "TALLY_TOP_N", default_value_t = DEFAULT_TOP_N, global = true)]
    pub top: usize,
}
