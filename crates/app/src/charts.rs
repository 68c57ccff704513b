//! Chart files
//!
//! Builds each chart from a bundle and writes it as `<dir>/<name>.svg`. A
//! chart with no data is skipped with a warning; a chart that cannot be
//! written is reported in its outcome. Neither stops the remaining charts.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rusty_money::iso::Currency;
use tally::{charts, prelude::*};
use tracing::{error, info, warn};

/// What happened to one chart.
#[derive(Debug)]
pub enum ChartOutcome {
    /// The chart was written to `path`.
    Rendered {
        /// Chart that was written
        kind: ChartKind,

        /// File it was written to
        path: PathBuf,
    },

    /// The chart had no data to plot.
    Skipped(ChartKind),

    /// The chart could not be written.
    Failed(ChartError),
}

impl ChartOutcome {
    /// Whether the chart failed to be written.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Path of the written file, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Rendered { path, .. } => Some(path),
            Self::Skipped(_) | Self::Failed(_) => None,
        }
    }
}

/// Write every chart for `bundle` into `dir`, creating it if needed.
pub fn render_all(
    bundle: &MetricsBundle,
    dir: &Path,
    currency: &'static Currency,
) -> Vec<ChartOutcome> {
    let created = fs::create_dir_all(dir);

    charts::render_all(bundle, currency)
        .into_iter()
        .map(|(kind, chart)| {
            let outcome = match (&created, chart) {
                (_, Err(ChartError::RenderSkipped(kind))) => ChartOutcome::Skipped(kind),
                (_, Err(error)) => ChartOutcome::Failed(error),
                (Err(source), Ok(_)) => ChartOutcome::Failed(ChartError::Io {
                    kind,
                    source: io::Error::new(source.kind(), source.to_string()),
                }),
                (Ok(()), Ok(svg)) => write_chart(kind, &svg, dir),
            };

            log_outcome(&outcome);

            outcome
        })
        .collect()
}

fn write_chart(kind: ChartKind, svg: &Svg, dir: &Path) -> ChartOutcome {
    let path = dir.join(kind.file_name());

    match fs::write(&path, svg.to_string()) {
        Ok(()) => ChartOutcome::Rendered { kind, path },
        Err(source) => ChartOutcome::Failed(ChartError::Io { kind, source }),
    }
}

fn log_outcome(outcome: &ChartOutcome) {
    match outcome {
        ChartOutcome::Rendered { kind, path } => {
            info!(chart = %kind, path = %path.display(), "chart written");
        }
        ChartOutcome::Skipped(kind) => {
            warn!(chart = %kind, "chart skipped: no data to plot");
        }
        ChartOutcome::Failed(error) => {
            error!("{error}");
        }
    }
}
