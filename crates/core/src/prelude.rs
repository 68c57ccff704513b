//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    analysis::{
        AnalysisError, DEFAULT_TOP_N, MetricsBundle,
        monthly::{MonthlyRevenueStats, MonthlySummary, YearMonth, monthly_trend},
        overall::OverallStats,
        products::{ProductSummary, product_rankings, top_products},
    },
    charts::{ChartError, ChartKind, svg::Svg},
    dashboard::{DashboardError, DashboardQuery, DashboardView, StoreCatalog},
    export::{ExportError, read_records, write_records},
    filter::{FilterError, SalesFilter},
    generator::{CatalogProduct, GeneratorConfig, GeneratorError, default_catalog, generate},
    money::DEFAULT_CURRENCY,
    records::{NewSalesRecord, RecordError, RecordId, SalesRecord},
    report::{Report, ReportError},
};
