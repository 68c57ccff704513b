//! Sales Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_LEN: usize = 100;

/// Decimal places a unit price may carry.
pub const PRICE_DECIMALS: u32 = 2;

/// Highest accepted unit price.
///
/// Keeps `quantity × price` and the aggregate sums well inside [`Decimal`] range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Errors raised when a record would violate the sales invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Product name is empty or whitespace.
    #[error("product name cannot be empty")]
    EmptyProduct,

    /// Product name is longer than [`MAX_PRODUCT_LEN`] characters.
    #[error("product name is {0} characters, maximum is {MAX_PRODUCT_LEN}")]
    ProductTooLong(usize),

    /// Quantity is zero.
    #[error("quantity must be positive")]
    NonPositiveQuantity,

    /// Unit price is zero or negative.
    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    /// Unit price has sub-cent digits.
    #[error("price {0} has more than {PRICE_DECIMALS} decimal places")]
    SubCentPrice(Decimal),

    /// Unit price is above [`MAX_PRICE`].
    #[error("price {0} exceeds the maximum of {MAX_PRICE}")]
    PriceTooLarge(Decimal),
}

/// Store-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// A validated sale that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSalesRecord {
    product: String,
    quantity: u32,
    price: Decimal,
    sale_date: Date,
}

impl NewSalesRecord {
    /// Create a new record, trimming the product name.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the product name is empty or too long, if the
    /// quantity or price is not positive, or if the price is above [`MAX_PRICE`] or
    /// has more than two decimal places.
    pub fn new(
        product: impl AsRef<str>,
        quantity: u32,
        price: Decimal,
        sale_date: Date,
    ) -> Result<Self, RecordError> {
        let product = validate_product(product.as_ref())?;

        if quantity == 0 {
            return Err(RecordError::NonPositiveQuantity);
        }

        validate_price(price)?;

        Ok(Self {
            product,
            quantity,
            price,
            sale_date,
        })
    }

    /// Product name
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Units sold
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Calendar date of the sale
    pub fn sale_date(&self) -> Date {
        self.sale_date
    }
}

/// One stored sales transaction.
///
/// Records are immutable once created; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesRecord {
    id: RecordId,
    product: String,
    quantity: u32,
    price: Decimal,
    sale_date: Date,
    created_at: Timestamp,
}

impl SalesRecord {
    /// Combine a validated record with its store-assigned identity.
    pub fn from_parts(id: RecordId, record: NewSalesRecord, created_at: Timestamp) -> Self {
        Self {
            id,
            product: record.product,
            quantity: record.quantity,
            price: record.price,
            sale_date: record.sale_date,
            created_at,
        }
    }

    /// Store-assigned identifier
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Product name
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Units sold
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Calendar date of the sale
    pub fn sale_date(&self) -> Date {
        self.sale_date
    }

    /// Ingestion timestamp
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Revenue of this transaction: quantity × unit price.
    pub fn revenue(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

/// Check a unit price against the positivity, precision and range invariants.
///
/// # Errors
///
/// Returns the [`RecordError`] for the first invariant the price breaks.
pub fn validate_price(price: Decimal) -> Result<(), RecordError> {
    if price <= Decimal::ZERO {
        return Err(RecordError::NonPositivePrice(price));
    }

    if price.normalize().scale() > PRICE_DECIMALS {
        return Err(RecordError::SubCentPrice(price));
    }

    if price > MAX_PRICE {
        return Err(RecordError::PriceTooLarge(price));
    }

    Ok(())
}

fn validate_product(product: &str) -> Result<String, RecordError> {
    let trimmed = product.trim();

    if trimmed.is_empty() {
        return Err(RecordError::EmptyProduct);
    }

    let len = trimmed.chars().count();

    if len > MAX_PRODUCT_LEN {
        return Err(RecordError::ProductTooLong(len));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_trims_product_name() -> TestResult {
        let record = NewSalesRecord::new("  Laptop ", 1, Decimal::new(99999, 2), date(2024, 1, 5))?;

        assert_eq!(record.product(), "Laptop");

        Ok(())
    }

    #[test]
    fn new_rejects_blank_product() {
        let result = NewSalesRecord::new("   ", 1, Decimal::new(100, 2), date(2024, 1, 5));

        assert_eq!(result, Err(RecordError::EmptyProduct));
    }

    #[test]
    fn new_rejects_long_product() {
        let name = "x".repeat(MAX_PRODUCT_LEN + 1);
        let result = NewSalesRecord::new(&name, 1, Decimal::new(100, 2), date(2024, 1, 5));

        assert_eq!(result, Err(RecordError::ProductTooLong(MAX_PRODUCT_LEN + 1)));
    }

    #[test]
    fn new_rejects_zero_quantity() {
        let result = NewSalesRecord::new("Mouse", 0, Decimal::new(100, 2), date(2024, 1, 5));

        assert_eq!(result, Err(RecordError::NonPositiveQuantity));
    }

    #[test]
    fn new_rejects_non_positive_price() {
        let zero = NewSalesRecord::new("Mouse", 1, Decimal::ZERO, date(2024, 1, 5));
        let negative = NewSalesRecord::new("Mouse", 1, Decimal::new(-250, 2), date(2024, 1, 5));

        assert_eq!(zero, Err(RecordError::NonPositivePrice(Decimal::ZERO)));
        assert_eq!(negative, Err(RecordError::NonPositivePrice(Decimal::new(-250, 2))));
    }

    #[test]
    fn new_rejects_sub_cent_price() {
        let result = NewSalesRecord::new("Mouse", 1, Decimal::new(10_005, 3), date(2024, 1, 5));

        assert_eq!(result, Err(RecordError::SubCentPrice(Decimal::new(10_005, 3))));
    }

    #[test]
    fn new_accepts_trailing_zero_digits() -> TestResult {
        let record = NewSalesRecord::new("Mouse", 1, Decimal::new(10_500, 3), date(2024, 1, 5))?;

        assert_eq!(record.price(), Decimal::new(1_050, 2));

        Ok(())
    }

    #[test]
    fn new_rejects_price_above_maximum() {
        let too_large = MAX_PRICE + Decimal::new(1, 2);

        assert_eq!(
            NewSalesRecord::new("Mouse", 2, too_large, date(2024, 1, 5)),
            Err(RecordError::PriceTooLarge(too_large))
        );
        assert_eq!(
            NewSalesRecord::new("Mouse", 2, Decimal::MAX, date(2024, 1, 5)),
            Err(RecordError::PriceTooLarge(Decimal::MAX))
        );
    }

    #[test]
    fn revenue_at_the_limits_does_not_overflow() -> TestResult {
        let record = SalesRecord::from_parts(
            RecordId::new(1),
            NewSalesRecord::new("Server", u32::MAX, MAX_PRICE, date(2024, 1, 5))?,
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(record.revenue(), Decimal::from(u32::MAX) * MAX_PRICE);

        Ok(())
    }

    #[test]
    fn revenue_is_quantity_times_price() -> TestResult {
        let record = SalesRecord::from_parts(
            RecordId::new(1),
            NewSalesRecord::new("Keyboard", 3, Decimal::new(4550, 2), date(2024, 3, 1))?,
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(record.revenue(), Decimal::new(13650, 2));

        Ok(())
    }
}
