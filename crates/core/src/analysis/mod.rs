//! Aggregation Engine
//!
//! Pure functions from a record slice to business metrics. Amounts are summed
//! exactly and left unrounded; presentation layers round for display.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::records::SalesRecord;

pub mod monthly;
pub mod overall;
pub mod products;

use monthly::{MonthlyRevenueStats, MonthlySummary, monthly_trend};
use overall::OverallStats;
use products::{ProductSummary, product_rankings};

/// Number of products in the top-products ranking when not configured.
pub const DEFAULT_TOP_N: usize = 10;

/// Errors from metric computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// A caller-supplied parameter is out of range.
    #[error("invalid analysis configuration: {0}")]
    InvalidConfiguration(String),
}

/// Every metric derived from one record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsBundle {
    /// Whole-set statistics
    pub overall: OverallStats,

    /// The top-N products in ranking order
    pub top_products: Vec<ProductSummary>,

    /// Every product in ranking order
    pub product_rankings: Vec<ProductSummary>,

    /// Chronological monthly aggregates
    pub monthly_trend: Vec<MonthlySummary>,

    /// Statistics over monthly revenue
    pub monthly_stats: MonthlyRevenueStats,

    /// Per-transaction revenue in record order
    pub sale_values: Vec<Decimal>,
}

impl MetricsBundle {
    /// Compute every metric for `records`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfiguration`] if `top_n` is zero.
    pub fn compute(records: &[SalesRecord], top_n: usize) -> Result<Self, AnalysisError> {
        if top_n == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "top product count must be positive".to_string(),
            ));
        }

        let product_rankings = product_rankings(records);
        let top_products = product_rankings.iter().take(top_n).cloned().collect();
        let monthly_trend = monthly_trend(records);
        let monthly_stats = MonthlyRevenueStats::from_trend(&monthly_trend);

        Ok(Self {
            overall: OverallStats::from_records(records),
            top_products,
            product_rankings,
            monthly_trend,
            monthly_stats,
            sale_values: records.iter().map(SalesRecord::revenue).collect(),
        })
    }

    /// Returns true if the bundle was computed from an empty record set.
    pub fn is_empty(&self) -> bool {
        self.overall.total_transactions == 0
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use testresult::TestResult;

    use crate::records::{MAX_PRICE, NewSalesRecord, RecordId};

    use super::*;

    #[test]
    fn compute_rejects_zero_top_n() {
        assert!(matches!(
            MetricsBundle::compute(&[], 0),
            Err(AnalysisError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn empty_bundle_is_empty() -> TestResult {
        let bundle = MetricsBundle::compute(&[], DEFAULT_TOP_N)?;

        assert!(bundle.is_empty());
        assert!(bundle.monthly_trend.is_empty());
        assert!(bundle.sale_values.is_empty());
        assert_eq!(bundle.overall, OverallStats::default());

        Ok(())
    }

    #[test]
    fn top_products_is_prefix_of_rankings() -> TestResult {
        let records = (1..=5)
            .map(|i| {
                Ok(SalesRecord::from_parts(
                    RecordId::new(i),
                    NewSalesRecord::new(format!("P{i}"), 1, Decimal::from(i), date(2024, 1, 1))?,
                    Timestamp::UNIX_EPOCH,
                ))
            })
            .collect::<TestResult<Vec<_>>>()?;

        let bundle = MetricsBundle::compute(&records, 3)?;

        assert_eq!(bundle.product_rankings.len(), 5);
        assert_eq!(bundle.top_products.as_slice(), bundle.product_rankings.get(..3).ok_or("short")?);

        Ok(())
    }

    #[test]
    fn compute_handles_records_at_the_price_and_quantity_limits() -> TestResult {
        let records = [
            SalesRecord::from_parts(
                RecordId::new(1),
                NewSalesRecord::new("Server", u32::MAX, MAX_PRICE, date(2024, 1, 1))?,
                Timestamp::UNIX_EPOCH,
            ),
            SalesRecord::from_parts(
                RecordId::new(2),
                NewSalesRecord::new("Cable", 1, Decimal::new(1, 2), date(2024, 2, 1))?,
                Timestamp::UNIX_EPOCH,
            ),
        ];

        let bundle = MetricsBundle::compute(&records, DEFAULT_TOP_N)?;
        let largest = Decimal::from(u32::MAX) * MAX_PRICE;

        assert_eq!(bundle.overall.total_revenue, largest + Decimal::new(1, 2));
        assert_eq!(bundle.overall.max_sale_value, largest);
        assert!(bundle.overall.std_dev_sale_value > Decimal::ZERO);
        assert!(bundle.monthly_stats.std_dev > Decimal::ZERO);

        Ok(())
    }
}
