//! Dashboard View
//!
//! The interactive dashboard is a pure function of the filtered record set:
//! the HTTP layer parses a [`DashboardQuery`], loads the matching records and
//! hands them to [`DashboardView::build`]. Nothing here performs I/O.

use jiff::civil::Date;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    analysis::{AnalysisError, MetricsBundle},
    charts::{self, ChartKind},
    filter::{FilterError, SalesFilter},
    money::{format_amount, round_for_display},
    records::SalesRecord,
    report::group_digits,
};

/// Errors turning a request into a dashboard view.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A date parameter is not a valid `YYYY-MM-DD` date.
    #[error("{field} must be a date in YYYY-MM-DD format, got {value:?}")]
    InvalidDate {
        /// Parameter name
        field: &'static str,

        /// Rejected value
        value: String,

        /// Parse failure
        #[source]
        source: jiff::Error,
    },

    /// The parameters do not form a valid filter.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The metrics could not be computed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Raw filter parameters as they arrive in a request's query string.
///
/// Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// Inclusive start date, `YYYY-MM-DD`
    pub from: Option<String>,

    /// Inclusive end date, `YYYY-MM-DD`
    pub to: Option<String>,

    /// Selected products; none selected means all products
    #[serde(default)]
    pub products: Vec<String>,
}

impl DashboardQuery {
    /// Parse the parameters into a [`SalesFilter`].
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidDate`] for a malformed date and
    /// [`DashboardError::Filter`] if the range is inverted.
    pub fn to_filter(&self) -> Result<SalesFilter, DashboardError> {
        let from = parse_date("from", self.from.as_deref())?;
        let to = parse_date("to", self.to.as_deref())?;

        Ok(SalesFilter::new(from, to, &self.products)?)
    }
}

fn parse_date(field: &'static str, value: Option<&str>) -> Result<Option<Date>, DashboardError> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    value
        .parse::<Date>()
        .map(Some)
        .map_err(|source| DashboardError::InvalidDate {
            field,
            value: value.to_string(),
            source,
        })
}

/// What the store holds overall, independent of the current filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreCatalog {
    /// Every distinct product, sorted by name
    pub products: Vec<String>,

    /// Earliest sale date in the store
    pub first_date: Option<Date>,

    /// Latest sale date in the store
    pub last_date: Option<Date>,
}

/// Headline figures shown as cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpis {
    /// Total revenue
    pub total_revenue: String,

    /// Number of transactions
    pub transactions: String,

    /// Units sold
    pub items_sold: String,

    /// Distinct products sold
    pub distinct_products: String,

    /// Mean transaction value
    pub average_sale: String,

    /// Standard deviation of transaction value
    pub std_dev_sale: String,

    /// Largest transaction value
    pub max_sale: String,

    /// Smallest transaction value
    pub min_sale: String,
}

/// One row of the product performance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    /// Product name
    pub product: String,

    /// Total revenue
    pub revenue: String,

    /// Mean revenue per transaction
    pub average_revenue_per_sale: String,

    /// Units sold
    pub quantity: String,

    /// Mean unit price
    pub average_price: String,

    /// Number of transactions
    pub transactions: String,
}

/// One row of the monthly breakdown table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRow {
    /// Month, `YYYY-MM`
    pub month: String,

    /// Total revenue
    pub revenue: String,

    /// Mean transaction value
    pub average_sale_value: String,

    /// Units sold
    pub quantity: String,

    /// Number of transactions
    pub transactions: String,
}

/// One row of the raw data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    /// Record identifier
    pub id: i64,

    /// Sale date, `YYYY-MM-DD`
    pub sale_date: String,

    /// Product name
    pub product: String,

    /// Units sold
    pub quantity: u32,

    /// Unit price
    pub price: String,

    /// Transaction revenue
    pub revenue: String,
}

/// A chart slot; `svg` is `None` when the chart was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPanel {
    /// Chart file stem, used as an element id
    pub id: &'static str,

    /// Chart heading
    pub title: &'static str,

    /// Inline SVG markup
    pub svg: Option<String>,
}

/// Echo of the active filter for re-populating the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterView {
    /// Inclusive start date
    pub from: Option<String>,

    /// Inclusive end date
    pub to: Option<String>,

    /// Selected products
    pub products: Vec<String>,
}

impl From<&SalesFilter> for FilterView {
    fn from(filter: &SalesFilter) -> Self {
        Self {
            from: filter.from().map(|date| date.to_string()),
            to: filter.to().map(|date| date.to_string()),
            products: filter.products().iter().cloned().collect(),
        }
    }
}

/// Everything the dashboard page shows for one filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Active filter
    pub filter: FilterView,

    /// Store-wide product list and date bounds
    pub catalog: StoreCatalog,

    /// Headline cards
    pub kpis: Kpis,

    /// Metrics for the filtered set
    pub metrics: MetricsBundle,

    /// Product performance table in ranking order
    pub products: Vec<ProductRow>,

    /// Monthly breakdown table in chronological order
    pub monthly: Vec<MonthRow>,

    /// Filtered records, newest first
    pub records: Vec<RecordRow>,

    /// Chart panels in display order
    pub charts: Vec<ChartPanel>,

    /// True when no record matched the filter
    pub is_empty: bool,
}

impl DashboardView {
    /// Build the view for records that already satisfy `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Analysis`] if `top_n` is zero.
    pub fn build(
        records: &[SalesRecord],
        filter: &SalesFilter,
        catalog: StoreCatalog,
        top_n: usize,
        currency: &'static Currency,
    ) -> Result<Self, DashboardError> {
        let metrics = MetricsBundle::compute(records, top_n)?;
        let amount = |value| format_amount(value, currency);

        let overall = &metrics.overall;
        let kpis = Kpis {
            total_revenue: amount(overall.total_revenue),
            transactions: group_digits(count(overall.total_transactions)),
            items_sold: group_digits(overall.total_items_sold),
            distinct_products: group_digits(count(overall.distinct_products)),
            average_sale: amount(overall.average_sale_value),
            std_dev_sale: amount(overall.std_dev_sale_value),
            max_sale: amount(overall.max_sale_value),
            min_sale: amount(overall.min_sale_value),
        };

        let products = metrics
            .product_rankings
            .iter()
            .map(|product| ProductRow {
                product: product.product.clone(),
                revenue: amount(product.revenue),
                average_revenue_per_sale: amount(product.average_revenue_per_sale),
                quantity: group_digits(product.quantity),
                average_price: amount(product.average_price),
                transactions: group_digits(count(product.transactions)),
            })
            .collect();

        let monthly = metrics
            .monthly_trend
            .iter()
            .map(|month| MonthRow {
                month: month.month.to_string(),
                revenue: amount(month.revenue),
                average_sale_value: amount(month.average_sale_value),
                quantity: group_digits(month.quantity),
                transactions: group_digits(count(month.transactions)),
            })
            .collect();

        let mut newest_first: Vec<&SalesRecord> = records.iter().collect();
        newest_first.sort_by(|a, b| {
            b.sale_date()
                .cmp(&a.sale_date())
                .then_with(|| b.id().cmp(&a.id()))
        });

        let records = newest_first
            .into_iter()
            .map(|record| RecordRow {
                id: record.id().get(),
                sale_date: record.sale_date().to_string(),
                product: record.product().to_string(),
                quantity: record.quantity(),
                price: round_for_display(record.price()).to_string(),
                revenue: round_for_display(record.revenue()).to_string(),
            })
            .collect();

        let charts = charts::render_all(&metrics, currency)
            .into_iter()
            .map(|(kind, result)| ChartPanel {
                id: kind.file_stem(),
                title: chart_title(kind),
                svg: result.ok().map(|svg| svg.to_string()),
            })
            .collect();

        Ok(Self {
            filter: FilterView::from(filter),
            catalog,
            kpis,
            is_empty: metrics.is_empty(),
            metrics,
            products,
            monthly,
            records,
            charts,
        })
    }
}

fn chart_title(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::MonthlyRevenueTrend => "Monthly Revenue Trend",
        ChartKind::TopProducts => "Top Products by Revenue",
        ChartKind::SalesDistribution => "Sales Value Distribution",
        ChartKind::QuantityVsRevenue => "Quantity vs Revenue Analysis",
    }
}

fn count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
