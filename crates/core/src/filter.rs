//! Sales Filters

use std::collections::BTreeSet;

use jiff::civil::Date;
use serde::Serialize;
use thiserror::Error;

use crate::records::SalesRecord;

/// Errors building a filter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The start of the date range is after its end.
    #[error("date range starts on {from} but ends on {to}")]
    InvertedRange {
        /// Requested start date
        from: Date,
        /// Requested end date
        to: Date,
    },
}

/// Date range and product selection applied to the record set.
///
/// Both ends of the date range are inclusive. An empty product selection
/// matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesFilter {
    from: Option<Date>,
    to: Option<Date>,
    products: BTreeSet<String>,
}

impl SalesFilter {
    /// A filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter. Product names are trimmed and blank names are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvertedRange`] if `from` is after `to`.
    pub fn new<I, S>(from: Option<Date>, to: Option<Date>, products: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(FilterError::InvertedRange { from, to });
        }

        let products = products
            .into_iter()
            .map(|product| product.as_ref().trim().to_string())
            .filter(|product| !product.is_empty())
            .collect();

        Ok(Self { from, to, products })
    }

    /// Inclusive start of the date range
    pub fn from(&self) -> Option<Date> {
        self.from
    }

    /// Inclusive end of the date range
    pub fn to(&self) -> Option<Date> {
        self.to
    }

    /// Selected products; empty means all products.
    pub fn products(&self) -> &BTreeSet<String> {
        &self.products
    }

    /// Returns true if the filter places no constraint on the record set.
    pub fn is_unfiltered(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.products.is_empty()
    }

    /// Returns true if the record satisfies the filter.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        let date = record.sale_date();

        self.from.is_none_or(|from| date >= from)
            && self.to.is_none_or(|to| date <= to)
            && (self.products.is_empty() || self.products.contains(record.product()))
    }

    /// Returns the records that satisfy the filter, preserving their order.
    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}
