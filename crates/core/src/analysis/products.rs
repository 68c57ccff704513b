//! Product rankings

use std::cmp::Ordering;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{analysis::AnalysisError, records::SalesRecord};

/// Aggregate performance of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    /// Product name
    pub product: String,

    /// Total revenue
    pub revenue: Decimal,

    /// Units sold
    pub quantity: u64,

    /// Number of transactions
    pub transactions: usize,

    /// Mean unit price across transactions
    pub average_price: Decimal,

    /// Mean revenue per transaction
    pub average_revenue_per_sale: Decimal,
}

impl ProductSummary {
    /// Ranking order: revenue descending, then quantity descending, then name ascending.
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        other
            .revenue
            .cmp(&self.revenue)
            .then_with(|| other.quantity.cmp(&self.quantity))
            .then_with(|| self.product.cmp(&other.product))
    }
}

#[derive(Default)]
struct Totals {
    revenue: Decimal,
    quantity: u64,
    transactions: usize,
    price_sum: Decimal,
}

/// Every product in the set, in ranking order.
pub fn product_rankings(records: &[SalesRecord]) -> Vec<ProductSummary> {
    let mut totals: FxHashMap<&str, Totals> = FxHashMap::default();

    for record in records {
        let entry = totals.entry(record.product()).or_default();

        entry.revenue += record.revenue();
        entry.quantity += u64::from(record.quantity());
        entry.transactions += 1;
        entry.price_sum += record.price();
    }

    let mut rankings: Vec<ProductSummary> = totals
        .into_iter()
        .map(|(product, totals)| {
            // Every group holds at least one transaction.
            let count = Decimal::from(totals.transactions.max(1));

            ProductSummary {
                product: product.to_string(),
                revenue: totals.revenue,
                quantity: totals.quantity,
                transactions: totals.transactions,
                average_price: totals.price_sum / count,
                average_revenue_per_sale: totals.revenue / count,
            }
        })
        .collect();

    rankings.sort_by(ProductSummary::ranking_cmp);

    rankings
}

/// The `n` highest-revenue products, in ranking order.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfiguration`] if `n` is zero.
pub fn top_products(records: &[SalesRecord], n: usize) -> Result<Vec<ProductSummary>, AnalysisError> {
    if n == 0 {
        return Err(AnalysisError::InvalidConfiguration(
            "top product count must be positive".to_string(),
        ));
    }

    let mut rankings = product_rankings(records);
    rankings.truncate(n);

    Ok(rankings)
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use testresult::TestResult;

    use crate::records::{NewSalesRecord, RecordId};

    use super::*;

    fn record(id: i64, product: &str, quantity: u32, price: i64) -> TestResult<SalesRecord> {
        Ok(SalesRecord::from_parts(
            RecordId::new(id),
            NewSalesRecord::new(product, quantity, Decimal::from(price), date(2024, 1, 1))?,
            Timestamp::UNIX_EPOCH,
        ))
    }

    #[test]
    fn rankings_sort_by_revenue_then_quantity_then_name() -> TestResult {
        let records = [
            record(1, "Cable", 10, 1)?,
            record(2, "Mouse", 1, 10)?,
            record(3, "Adapter", 1, 10)?,
            record(4, "Laptop", 1, 900)?,
        ];

        let names: Vec<String> = product_rankings(&records)
            .into_iter()
            .map(|summary| summary.product)
            .collect();

        assert_eq!(names, ["Laptop", "Cable", "Adapter", "Mouse"]);

        Ok(())
    }

    #[test]
    fn summaries_aggregate_each_product() -> TestResult {
        let records = [
            record(1, "Mouse", 2, 10)?,
            record(2, "Mouse", 1, 20)?,
        ];

        let rankings = product_rankings(&records);
        let mouse = rankings.first().ok_or("missing summary")?;

        assert_eq!(mouse.revenue, Decimal::from(40));
        assert_eq!(mouse.quantity, 3);
        assert_eq!(mouse.transactions, 2);
        assert_eq!(mouse.average_price, Decimal::from(15));
        assert_eq!(mouse.average_revenue_per_sale, Decimal::from(20));

        Ok(())
    }

    #[test]
    fn top_products_truncates_ranking() -> TestResult {
        let records = [
            record(1, "A", 1, 30)?,
            record(2, "B", 1, 20)?,
            record(3, "C", 1, 10)?,
        ];

        let top = top_products(&records, 2)?;

        assert_eq!(top.len(), 2);
        assert_eq!(top.last().map(|s| s.product.as_str()), Some("B"));

        Ok(())
    }

    #[test]
    fn top_products_rejects_zero() {
        assert!(matches!(
            top_products(&[], 0),
            Err(AnalysisError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn empty_set_has_no_rankings() -> TestResult {
        assert!(top_products(&[], 10)?.is_empty());

        Ok(())
    }
}
