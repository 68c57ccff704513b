//! Sample Data Generator
//!
//! Produces synthetic sales from a product catalog. The caller supplies the
//! random number generator so that seeded runs are reproducible.

use std::ops::RangeInclusive;

use jiff::{Span, Zoned, civil::Date};
use rand::{Rng, seq::SliceRandom};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    money::{from_minor_units, to_minor_units},
    records::{MAX_PRODUCT_LEN, NewSalesRecord, RecordError, validate_price},
};

/// Number of records seeded when no count is given.
pub const DEFAULT_COUNT: usize = 500;

/// Length of the default sale date window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Widest accepted sale date window, in days.
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// Errors from the sample generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The configuration cannot produce valid records.
    #[error("invalid generator configuration: {0}")]
    InvalidConfiguration(String),

    /// The date window reaches outside the supported calendar.
    #[error("sale date window is out of range")]
    DateOutOfRange(#[source] jiff::Error),

    /// A generated record failed validation.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// A product the generator can sell, with its unit price band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    /// Product name
    pub name: String,

    /// Lowest unit price
    pub min_price: Decimal,

    /// Highest unit price
    pub max_price: Decimal,
}

impl CatalogProduct {
    /// Create a catalog entry with whole-unit price bounds.
    pub fn new(name: impl Into<String>, min_price: i64, max_price: i64) -> Self {
        Self {
            name: name.into(),
            min_price: Decimal::from(min_price),
            max_price: Decimal::from(max_price),
        }
    }
}

/// Generator parameters.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of records to produce
    pub count: usize,

    /// Products to choose from
    pub catalog: Vec<CatalogProduct>,

    /// Quantity range per sale
    pub quantity: RangeInclusive<u32>,

    /// Number of days before `end_date` a sale may fall on
    pub window_days: u32,

    /// Last possible sale date
    pub end_date: Date,
}

impl GeneratorConfig {
    /// Default configuration ending on the given date.
    pub fn ending_on(end_date: Date) -> Self {
        Self {
            count: DEFAULT_COUNT,
            catalog: default_catalog(),
            quantity: 1..=10,
            window_days: DEFAULT_WINDOW_DAYS,
            end_date,
        }
    }

    /// Replace the record count.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if self.count == 0 {
            return Err(invalid("record count must be positive"));
        }

        if self.catalog.is_empty() {
            return Err(invalid("catalog is empty"));
        }

        if *self.quantity.start() == 0 || self.quantity.is_empty() {
            return Err(invalid("quantity range must be non-empty and start above zero"));
        }

        if self.window_days > MAX_WINDOW_DAYS {
            return Err(invalid(format!(
                "date window of {} days exceeds {MAX_WINDOW_DAYS}",
                self.window_days
            )));
        }

        for product in &self.catalog {
            let name = product.name.trim();

            if name.is_empty() {
                return Err(invalid("catalog entry has an empty name"));
            }

            if name.chars().count() > MAX_PRODUCT_LEN {
                return Err(invalid(format!(
                    "catalog name {name:?} is longer than {MAX_PRODUCT_LEN} characters"
                )));
            }

            for bound in [product.min_price, product.max_price] {
                validate_price(bound).map_err(|error| invalid(format!("{name}: {error}")))?;
            }

            if product.min_price > product.max_price {
                return Err(invalid(format!(
                    "price range {}..={} for {name} is inverted",
                    product.min_price, product.max_price
                )));
            }
        }

        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::ending_on(Zoned::now().date())
    }
}

/// The fifteen computer-hardware products used by the demo store.
pub fn default_catalog() -> Vec<CatalogProduct> {
    [
        ("Laptop", 800, 1200),
        ("Mouse", 15, 50),
        ("Keyboard", 30, 100),
        ("Monitor", 150, 400),
        ("Headphones", 25, 150),
        ("Webcam", 40, 120),
        ("USB Cable", 5, 20),
        ("External HDD", 60, 150),
        ("SSD Drive", 80, 250),
        ("Graphics Card", 300, 800),
        ("RAM Module", 50, 200),
        ("Power Supply", 60, 150),
        ("Cooling Fan", 15, 50),
        ("Motherboard", 120, 350),
        ("Processor", 200, 600),
    ]
    .into_iter()
    .map(|(name, min, max)| CatalogProduct::new(name, min, max))
    .collect()
}

/// Generate `config.count` records.
///
/// # Errors
///
/// Returns [`GeneratorError::InvalidConfiguration`] if the configuration cannot
/// produce valid records, or [`GeneratorError::DateOutOfRange`] if the window
/// starts before the earliest supported date.
pub fn generate<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<NewSalesRecord>, GeneratorError> {
    config.validate()?;

    let start_date = config
        .end_date
        .checked_sub(Span::new().days(i64::from(config.window_days)))
        .map_err(GeneratorError::DateOutOfRange)?;

    let mut records = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let product = config
            .catalog
            .choose(rng)
            .ok_or_else(|| invalid("catalog is empty"))?;

        let quantity = rng.gen_range(config.quantity.clone());
        let price = random_price(product, rng)?;

        let days_after_start = rng.gen_range(0..=config.window_days);
        let sale_date = start_date
            .checked_add(Span::new().days(i64::from(days_after_start)))
            .map_err(GeneratorError::DateOutOfRange)?;

        records.push(NewSalesRecord::new(&product.name, quantity, price, sale_date)?);
    }

    Ok(records)
}

fn random_price<R: Rng>(
    product: &CatalogProduct,
    rng: &mut R,
) -> Result<Decimal, GeneratorError> {
    let (Some(min), Some(max)) = (
        to_minor_units(product.min_price),
        to_minor_units(product.max_price),
    ) else {
        return Err(invalid(format!("price range for {} is too large", product.name)));
    };

    Ok(from_minor_units(rng.gen_range(min..=max)))
}

fn invalid(reason: impl Into<String>) -> GeneratorError {
    GeneratorError::InvalidConfiguration(reason.into())
}
