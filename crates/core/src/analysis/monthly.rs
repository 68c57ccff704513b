//! Monthly trend

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::{records::SalesRecord, stats};

/// Calendar month key, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i16,
    month: i8,
}

impl YearMonth {
    /// The month containing `date`.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year
    pub fn year(self) -> i16 {
        self.year
    }

    /// Month of the year, 1 to 12
    pub fn month(self) -> i8 {
        self.month
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Aggregates for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    /// Month key
    pub month: YearMonth,

    /// Total revenue
    pub revenue: Decimal,

    /// Units sold
    pub quantity: u64,

    /// Number of transactions
    pub transactions: usize,

    /// Mean revenue per transaction
    pub average_sale_value: Decimal,
}

/// One entry per month present in the records, in chronological order.
pub fn monthly_trend(records: &[SalesRecord]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<YearMonth, (Decimal, u64, usize)> = BTreeMap::new();

    for record in records {
        let (revenue, quantity, transactions) =
            months.entry(YearMonth::of(record.sale_date())).or_default();

        *revenue += record.revenue();
        *quantity += u64::from(record.quantity());
        *transactions += 1;
    }

    months
        .into_iter()
        .map(|(month, (revenue, quantity, transactions))| MonthlySummary {
            month,
            revenue,
            quantity,
            transactions,
            average_sale_value: revenue / Decimal::from(transactions.max(1)),
        })
        .collect()
}

/// Statistics over the per-month revenue series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenueStats {
    /// Mean monthly revenue
    pub mean: Decimal,

    /// Median monthly revenue
    pub median: Decimal,

    /// Population standard deviation of monthly revenue
    pub std_dev: Decimal,

    /// Highest monthly revenue
    pub best: Decimal,

    /// Lowest monthly revenue
    pub worst: Decimal,

    /// Month with the highest revenue, the earliest on ties
    pub best_month: Option<YearMonth>,

    /// Month with the lowest revenue, the earliest on ties
    pub worst_month: Option<YearMonth>,
}

impl MonthlyRevenueStats {
    /// Summarise a monthly trend.
    pub fn from_trend(trend: &[MonthlySummary]) -> Self {
        let revenue: Vec<Decimal> = trend.iter().map(|month| month.revenue).collect();

        let best_month = trend
            .iter()
            .rev()
            .max_by(|a, b| a.revenue.cmp(&b.revenue))
            .map(|month| month.month);

        let worst_month = trend
            .iter()
            .min_by(|a, b| a.revenue.cmp(&b.revenue))
            .map(|month| month.month);

        Self {
            mean: stats::mean(&revenue),
            median: stats::median(&revenue),
            std_dev: stats::std_dev(&revenue),
            best: stats::max(&revenue),
            worst: stats::min(&revenue),
            best_month,
            worst_month,
        }
    }
}
