//! Chart Renderer
//!
//! Builds standalone SVG documents from a [`MetricsBundle`]. Each chart is
//! independent: a chart whose input series is empty is skipped with
//! [`ChartError::RenderSkipped`] and the others still render.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io,
};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::analysis::MetricsBundle;

mod axis;
pub mod comparison;
pub mod distribution;
pub mod products;
pub mod svg;
pub mod trend;

use svg::Svg;

/// Number of products plotted on the quantity versus revenue chart.
pub const COMPARISON_PRODUCTS: usize = 15;

/// The charts produced for every analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Monthly revenue line with its average
    MonthlyRevenueTrend,

    /// Horizontal bars of the top-N products by revenue
    TopProducts,

    /// Histogram and box plot of transaction values
    SalesDistribution,

    /// Quantity bars against a revenue line per product
    QuantityVsRevenue,
}

impl ChartKind {
    /// Every chart, in rendering order.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::MonthlyRevenueTrend,
        ChartKind::TopProducts,
        ChartKind::SalesDistribution,
        ChartKind::QuantityVsRevenue,
    ];

    /// File name without extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::MonthlyRevenueTrend => "monthly_revenue_trend",
            ChartKind::TopProducts => "top_products",
            ChartKind::SalesDistribution => "sales_distribution",
            ChartKind::QuantityVsRevenue => "quantity_vs_revenue",
        }
    }

    /// File name with the `.svg` extension.
    pub fn file_name(self) -> String {
        format!("{}.svg", self.file_stem())
    }

    /// Human readable description.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::MonthlyRevenueTrend => "Monthly Revenue Trend",
            ChartKind::TopProducts => "Top Products by Revenue",
            ChartKind::SalesDistribution => "Sales Value Distribution",
            ChartKind::QuantityVsRevenue => "Quantity Sold vs Revenue by Product",
        }
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.file_stem())
    }
}

/// Errors from building or writing a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The chart's input series is empty.
    #[error("{0} chart skipped: no data to plot")]
    RenderSkipped(ChartKind),

    /// The rendered chart could not be written.
    #[error("failed to write {kind} chart")]
    Io {
        /// Chart being written
        kind: ChartKind,

        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Build one chart from a bundle.
///
/// # Errors
///
/// Returns [`ChartError::RenderSkipped`] if the chart's input series is empty.
pub fn render(
    kind: ChartKind,
    bundle: &MetricsBundle,
    currency: &'static Currency,
) -> Result<Svg, ChartError> {
    match kind {
        ChartKind::MonthlyRevenueTrend => trend::monthly_revenue_trend(&bundle.monthly_trend, currency),
        ChartKind::TopProducts => products::top_products(&bundle.top_products, currency),
        ChartKind::SalesDistribution => distribution::sales_distribution(&bundle.sale_values, currency),
        ChartKind::QuantityVsRevenue => {
            let shown = bundle.product_rankings.len().min(COMPARISON_PRODUCTS);
            let rankings = bundle.product_rankings.get(..shown).unwrap_or_default();

            comparison::quantity_vs_revenue(rankings, currency)
        }
    }
}

/// Build every chart, keeping each result separate.
pub fn render_all(
    bundle: &MetricsBundle,
    currency: &'static Currency,
) -> Vec<(ChartKind, Result<Svg, ChartError>)> {
    ChartKind::ALL
        .into_iter()
        .map(|kind| (kind, render(kind, bundle, currency)))
        .collect()
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::records::{NewSalesRecord, RecordId, SalesRecord};

    use super::*;

    #[test]
    fn empty_bundle_skips_every_chart() -> TestResult {
        let bundle = MetricsBundle::compute(&[], 10)?;

        for (kind, result) in render_all(&bundle, iso::USD) {
            assert!(
                matches!(result, Err(ChartError::RenderSkipped(skipped)) if skipped == kind),
                "{kind} should be skipped"
            );
        }

        Ok(())
    }

    #[test]
    fn single_record_renders_every_chart() -> TestResult {
        let record = SalesRecord::from_parts(
            RecordId::new(1),
            NewSalesRecord::new("Laptop", 1, Decimal::from(999), date(2024, 5, 1))?,
            Timestamp::UNIX_EPOCH,
        );

        let bundle = MetricsBundle::compute(&[record], 10)?;

        for (kind, result) in render_all(&bundle, iso::USD) {
            let svg = result?;

            assert_eq!(svg.title(), kind.label());
            assert!(svg.to_string().contains("</svg>"));
        }

        Ok(())
    }

    #[test]
    fn file_names_match_artifacts() {
        let names: Vec<String> = ChartKind::ALL.into_iter().map(ChartKind::file_name).collect();

        assert_eq!(
            names,
            [
                "monthly_revenue_trend.svg",
                "top_products.svg",
                "sales_distribution.svg",
                "quantity_vs_revenue.svg",
            ]
        );
    }
}
