//! Report

use std::io;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    analysis::{MetricsBundle, monthly::YearMonth},
    money::{format_amount, round_for_display},
};

const RULE_WIDTH: usize = 80;

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output sink rejected a write.
    #[error("failed to write report")]
    Io(#[from] io::Error),
}

/// Console summary of a [`MetricsBundle`].
#[derive(Debug)]
pub struct Report<'a> {
    bundle: &'a MetricsBundle,
    currency: &'static Currency,
    generated_at: Timestamp,
}

impl<'a> Report<'a> {
    /// Create a report stamped with the current time.
    pub fn new(bundle: &'a MetricsBundle, currency: &'static Currency) -> Self {
        Self {
            bundle,
            currency,
            generated_at: Timestamp::now(),
        }
    }

    /// Replace the generation timestamp.
    #[must_use]
    pub fn generated_at(mut self, generated_at: Timestamp) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Report lines in display order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let rule = "=".repeat(RULE_WIDTH);

        lines.push(rule.clone());
        lines.push("SALES DATA ANALYSIS REPORT".to_string());
        lines.push(rule.clone());
        lines.push(format!(
            "Generated: {}",
            self.generated_at.strftime("%Y-%m-%d %H:%M:%S UTC")
        ));

        push_block(&mut lines, "OVERALL STATISTICS", &self.overall_table());

        let title = format!(
            "TOP {} BEST-SELLING PRODUCTS (BY REVENUE)",
            self.bundle.top_products.len()
        );
        push_block(&mut lines, &title, &self.products_table());
        push_block(&mut lines, "MONTHLY SALES TRENDS", &self.monthly_table());
        push_block(&mut lines, "MONTHLY REVENUE STATISTICS", &self.monthly_stats_table());

        lines.push(String::new());
        lines.push(rule);

        lines
    }

    /// Write the report to `out`, one line at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the sink fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }

        out.flush()?;

        Ok(())
    }

    fn amount(&self, amount: Decimal) -> String {
        format_amount(amount, self.currency)
    }

    fn overall_table(&self) -> String {
        let overall = &self.bundle.overall;
        let mut builder = Builder::default();

        builder.push_record(["Metric", "Value"]);
        builder.push_record(["Total Revenue".to_string(), self.amount(overall.total_revenue)]);
        builder.push_record([
            "Average Sale Value".to_string(),
            self.amount(overall.average_sale_value),
        ]);
        builder.push_record([
            "Median Sale Value".to_string(),
            self.amount(overall.median_sale_value),
        ]);
        builder.push_record([
            "Std Dev Sale Value".to_string(),
            self.amount(overall.std_dev_sale_value),
        ]);
        builder.push_record(["Min Sale Value".to_string(), self.amount(overall.min_sale_value)]);
        builder.push_record(["Max Sale Value".to_string(), self.amount(overall.max_sale_value)]);
        builder.push_record([
            "Total Items Sold".to_string(),
            group_digits(overall.total_items_sold),
        ]);
        builder.push_record([
            "Total Transactions".to_string(),
            group_digits(count(overall.total_transactions)),
        ]);
        builder.push_record([
            "Avg Quantity per Sale".to_string(),
            round_for_display(overall.average_quantity_per_sale).to_string(),
        ]);
        builder.push_record(["Average Price".to_string(), self.amount(overall.average_price)]);
        builder.push_record([
            "Distinct Products".to_string(),
            group_digits(count(overall.distinct_products)),
        ]);

        render(builder)
    }

    fn products_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Product", "Revenue", "Qty Sold", "Sales", "Avg Price"]);

        if self.bundle.top_products.is_empty() {
            builder.push_record(["no data", "", "", "", ""]);
        }

        for product in &self.bundle.top_products {
            builder.push_record([
                product.product.clone(),
                self.amount(product.revenue),
                group_digits(product.quantity),
                group_digits(count(product.transactions)),
                self.amount(product.average_price),
            ]);
        }

        render(builder)
    }

    fn monthly_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Month", "Revenue", "Quantity", "Sales"]);

        if self.bundle.monthly_trend.is_empty() {
            builder.push_record(["no data", "", "", ""]);
        }

        for month in &self.bundle.monthly_trend {
            builder.push_record([
                month.month.to_string(),
                self.amount(month.revenue),
                group_digits(month.quantity),
                group_digits(count(month.transactions)),
            ]);
        }

        render(builder)
    }

    fn monthly_stats_table(&self) -> String {
        let stats = &self.bundle.monthly_stats;
        let mut builder = Builder::default();

        builder.push_record(["Metric", "Value"]);
        builder.push_record(["Average Monthly Revenue".to_string(), self.amount(stats.mean)]);
        builder.push_record(["Median Monthly Revenue".to_string(), self.amount(stats.median)]);
        builder.push_record(["Std Dev Monthly Revenue".to_string(), self.amount(stats.std_dev)]);
        builder.push_record([
            format!("Best Month Revenue{}", month_suffix(stats.best_month)),
            self.amount(stats.best),
        ]);
        builder.push_record([
            format!("Worst Month Revenue{}", month_suffix(stats.worst_month)),
            self.amount(stats.worst),
        ]);

        render(builder)
    }
}

fn push_block(lines: &mut Vec<String>, title: &str, table: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.extend(table.lines().map(str::to_string));
}

/// Every column after the first holds numbers and is right-aligned.
fn render(builder: Builder) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..), Alignment::right());

    table.to_string()
}

fn month_suffix(month: Option<YearMonth>) -> String {
    month.map_or_else(String::new, |month| format!(" ({month})"))
}

fn count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Formats an integer with comma thousands separators.
pub(crate) fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(ch);
    }

    grouped
}
