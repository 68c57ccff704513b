//! Overall statistics

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::{records::SalesRecord, stats};

/// Whole-set statistics over per-transaction revenue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverallStats {
    /// Sum of all transaction revenue
    pub total_revenue: Decimal,

    /// Mean transaction revenue
    pub average_sale_value: Decimal,

    /// Median transaction revenue
    pub median_sale_value: Decimal,

    /// Population standard deviation of transaction revenue
    pub std_dev_sale_value: Decimal,

    /// Smallest transaction revenue
    pub min_sale_value: Decimal,

    /// Largest transaction revenue
    pub max_sale_value: Decimal,

    /// Units sold across all transactions
    pub total_items_sold: u64,

    /// Number of transactions
    pub total_transactions: usize,

    /// Mean units per transaction
    pub average_quantity_per_sale: Decimal,

    /// Mean unit price
    pub average_price: Decimal,

    /// Number of distinct products sold
    pub distinct_products: usize,
}

impl OverallStats {
    /// Compute statistics for a record set. Every field is zero for an empty set.
    pub fn from_records(records: &[SalesRecord]) -> Self {
        let revenue: Vec<Decimal> = records.iter().map(SalesRecord::revenue).collect();
        let quantities: Vec<Decimal> = records
            .iter()
            .map(|record| Decimal::from(record.quantity()))
            .collect();
        let prices: Vec<Decimal> = records.iter().map(SalesRecord::price).collect();

        let distinct_products = records
            .iter()
            .map(SalesRecord::product)
            .collect::<FxHashSet<_>>()
            .len();

        Self {
            total_revenue: stats::sum(&revenue),
            average_sale_value: stats::mean(&revenue),
            median_sale_value: stats::median(&revenue),
            std_dev_sale_value: stats::std_dev(&revenue),
            min_sale_value: stats::min(&revenue),
            max_sale_value: stats::max(&revenue),
            total_items_sold: records.iter().map(|record| u64::from(record.quantity())).sum(),
            total_transactions: records.len(),
            average_quantity_per_sale: stats::mean(&quantities),
            average_price: stats::mean(&prices),
            distinct_products,
        }
    }
}
