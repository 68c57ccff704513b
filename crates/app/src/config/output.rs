//! Output Config

use std::path::PathBuf;

use clap::Args;

/// Where generated files are written.
#[derive(Debug, Clone, Args)]
pub struct OutputConfig {
    /// Directory for chart files
    #[arg(long, env = "TALLY_OUTPUT_DIR", default_value = ".", global = true)]
    pub output_dir: PathBuf,
}
