//! CSV Export
//!
//! Record exports use the store's column names so that an exported file can
//! be read back into the same rows.

use std::io;

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    analysis::{monthly::MonthlySummary, products::ProductSummary},
    money::round_for_display,
    records::{NewSalesRecord, RecordId, SalesRecord},
};

/// Errors reading or writing CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Malformed CSV or a serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The underlying sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A row parsed but violates the record invariants.
    #[error("invalid row on line {line}: {reason}")]
    InvalidRow {
        /// One-based line number, counting the header
        line: usize,

        /// What was wrong with the row
        reason: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    id: i64,
    product: String,
    quantity: i64,
    price: String,
    sale_date: String,
    created_at: String,
}

impl From<&SalesRecord> for CsvRecord {
    fn from(record: &SalesRecord) -> Self {
        Self {
            id: record.id().get(),
            product: record.product().to_string(),
            quantity: i64::from(record.quantity()),
            price: round_for_display(record.price()).to_string(),
            sale_date: record.sale_date().to_string(),
            created_at: record.created_at().to_string(),
        }
    }
}

impl CsvRecord {
    fn into_record(self) -> Result<SalesRecord, String> {
        let quantity = u32::try_from(self.quantity)
            .map_err(|_err| format!("quantity {} is out of range", self.quantity))?;

        let price = self
            .price
            .parse::<Decimal>()
            .map_err(|err| format!("price {:?}: {err}", self.price))?;

        let sale_date = self
            .sale_date
            .parse::<Date>()
            .map_err(|err| format!("sale_date {:?}: {err}", self.sale_date))?;

        let created_at = self
            .created_at
            .parse::<Timestamp>()
            .map_err(|err| format!("created_at {:?}: {err}", self.created_at))?;

        let record = NewSalesRecord::new(&self.product, quantity, price, sale_date)
            .map_err(|err| err.to_string())?;

        Ok(SalesRecord::from_parts(RecordId::new(self.id), record, created_at))
    }
}

/// Write records as CSV with the header `id,product,quantity,price,sale_date,created_at`.
///
/// # Errors
///
/// Returns an [`ExportError`] if serialization or the sink fails.
pub fn write_records(writer: impl io::Write, records: &[SalesRecord]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    if records.is_empty() {
        wtr.write_record(["id", "product", "quantity", "price", "sale_date", "created_at"])?;
    }

    for record in records {
        wtr.serialize(CsvRecord::from(record))?;
    }

    wtr.flush()?;

    Ok(())
}

/// Read records previously written by [`write_records`].
///
/// # Errors
///
/// Returns [`ExportError::Csv`] for malformed CSV and [`ExportError::InvalidRow`]
/// for a row that does not satisfy the record invariants.
pub fn read_records(reader: impl io::Read) -> Result<Vec<SalesRecord>, ExportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (idx, row) in rdr.deserialize::<CsvRecord>().enumerate() {
        let line = idx + 2;

        let record = row?
            .into_record()
            .map_err(|reason| ExportError::InvalidRow { line, reason })?;

        records.push(record);
    }

    Ok(records)
}

#[derive(Debug, Serialize)]
struct ProductReportRow<'a> {
    product: &'a str,
    total_revenue: Decimal,
    avg_revenue_per_sale: Decimal,
    total_quantity: u64,
    avg_price: Decimal,
    num_sales: usize,
}

/// Write the product performance table.
///
/// # Errors
///
/// Returns an [`ExportError`] if serialization or the sink fails.
pub fn write_product_report(
    writer: impl io::Write,
    products: &[ProductSummary],
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    if products.is_empty() {
        wtr.write_record([
            "product",
            "total_revenue",
            "avg_revenue_per_sale",
            "total_quantity",
            "avg_price",
            "num_sales",
        ])?;
    }

    for product in products {
        wtr.serialize(ProductReportRow {
            product: &product.product,
            total_revenue: round_for_display(product.revenue),
            avg_revenue_per_sale: round_for_display(product.average_revenue_per_sale),
            total_quantity: product.quantity,
            avg_price: round_for_display(product.average_price),
            num_sales: product.transactions,
        })?;
    }

    wtr.flush()?;

    Ok(())
}

#[derive(Debug, Serialize)]
struct MonthlyReportRow {
    month: String,
    total_revenue: Decimal,
    avg_sale_value: Decimal,
    total_quantity: u64,
    num_transactions: usize,
}

/// Write the monthly breakdown table.
///
/// # Errors
///
/// Returns an [`ExportError`] if serialization or the sink fails.
pub fn write_monthly_report(
    writer: impl io::Write,
    months: &[MonthlySummary],
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    if months.is_empty() {
        wtr.write_record([
            "month",
            "total_revenue",
            "avg_sale_value",
            "total_quantity",
            "num_transactions",
        ])?;
    }

    for month in months {
        wtr.serialize(MonthlyReportRow {
            month: month.month.to_string(),
            total_revenue: round_for_display(month.revenue),
            avg_sale_value: round_for_display(month.average_sale_value),
            total_quantity: month.quantity,
            num_transactions: month.transactions,
        })?;
    }

    wtr.flush()?;

    Ok(())
}

/// Download file name such as `sales_data_20240105.csv`.
pub fn export_file_name(prefix: &str, date: Date) -> String {
    format!("{prefix}_{}.csv", date.strftime("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::analysis::MetricsBundle;

    use super::*;

    fn record(id: i64, product: &str, quantity: u32, cents: i64) -> TestResult<SalesRecord> {
        Ok(SalesRecord::from_parts(
            RecordId::new(id),
            NewSalesRecord::new(product, quantity, Decimal::new(cents, 2), date(2024, 3, 9))?,
            "2024-03-09T10:15:00Z".parse()?,
        ))
    }

    #[test]
    fn writes_header_and_store_columns() -> TestResult {
        let mut out = Vec::new();

        write_records(&mut out, &[record(7, "USB Cable, 2m", 3, 550)?])?;

        let csv = String::from_utf8(out)?;
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("id,product,quantity,price,sale_date,created_at"));
        assert_eq!(
            lines.next(),
            Some(r#"7,"USB Cable, 2m",3,5.50,2024-03-09,2024-03-09T10:15:00Z"#)
        );

        Ok(())
    }

    #[test]
    fn empty_export_still_has_header() -> TestResult {
        let mut out = Vec::new();

        write_records(&mut out, &[])?;

        assert_eq!(
            String::from_utf8(out)?.trim_end(),
            "id,product,quantity,price,sale_date,created_at"
        );

        Ok(())
    }

    #[test]
    fn read_rejects_invariant_violations_with_line_number() {
        let csv = "id,product,quantity,price,sale_date,created_at\n\
                   1,Mouse,1,9.99,2024-01-01,2024-01-01T00:00:00Z\n\
                   2,Mouse,0,9.99,2024-01-01,2024-01-01T00:00:00Z\n";

        assert!(matches!(
            read_records(csv.as_bytes()),
            Err(ExportError::InvalidRow { line: 3, .. })
        ));
    }

    #[test]
    fn read_rejects_bad_dates() {
        let csv = "id,product,quantity,price,sale_date,created_at\n\
                   1,Mouse,1,9.99,01/01/2024,2024-01-01T00:00:00Z\n";

        assert!(matches!(
            read_records(csv.as_bytes()),
            Err(ExportError::InvalidRow { line: 2, .. })
        ));
    }

    #[test]
    fn product_and_monthly_reports_round_amounts() -> TestResult {
        let records = [record(1, "Mouse", 3, 333)?, record(2, "Mouse", 1, 100)?];
        let bundle = MetricsBundle::compute(&records, 10)?;

        let mut products = Vec::new();
        write_product_report(&mut products, &bundle.product_rankings)?;

        let mut months = Vec::new();
        write_monthly_report(&mut months, &bundle.monthly_trend)?;

        assert_eq!(
            String::from_utf8(products)?.lines().nth(1),
            Some("Mouse,10.99,5.50,4,2.17,2")
        );
        assert_eq!(
            String::from_utf8(months)?.lines().nth(1),
            Some("2024-03,10.99,5.50,4,2")
        );

        Ok(())
    }

    #[test]
    fn file_name_has_compact_date() {
        assert_eq!(export_file_name("sales_data", date(2024, 1, 5)), "sales_data_20240105.csv");
    }
}
