//! Descriptive statistics over decimal series.
//!
//! Standard deviation is the population variant (divides by `n`). Every
//! function is total: empty input yields zero, and a series with fewer than
//! two points has a standard deviation of exactly zero.

use rust_decimal::{Decimal, MathematicalOps, prelude::ToPrimitive};
use serde::Serialize;

/// Sum of the series.
pub fn sum(values: &[Decimal]) -> Decimal {
    values.iter().copied().sum()
}

/// Arithmetic mean, zero for an empty series.
pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }

    sum(values) / Decimal::from(values.len())
}

/// Median, zero for an empty series. Even-length series average the two middle values.
pub fn median(values: &[Decimal]) -> Decimal {
    quantile(&sorted(values), Decimal::new(5, 1))
}

/// Population standard deviation, zero when there are fewer than two points.
///
/// Falls back to deviations scaled by their largest magnitude when the squares
/// would overflow [`Decimal`].
pub fn std_dev(values: &[Decimal]) -> Decimal {
    if values.len() < 2 {
        return Decimal::ZERO;
    }

    let mean = mean(values);
    let deviations: Vec<Decimal> = values.iter().map(|value| *value - mean).collect();
    let count = Decimal::from(values.len());

    if let Some(squared) = sum_of_squares(&deviations) {
        return (squared / count).sqrt().unwrap_or(Decimal::ZERO);
    }

    let largest = deviations
        .iter()
        .map(Decimal::abs)
        .max()
        .unwrap_or(Decimal::ZERO);

    if largest.is_zero() {
        return Decimal::ZERO;
    }

    let unit: Vec<Decimal> = deviations.iter().map(|deviation| *deviation / largest).collect();

    sum_of_squares(&unit)
        .and_then(|squared| (squared / count).sqrt())
        .map_or(Decimal::ZERO, |root| root * largest)
}

fn sum_of_squares(values: &[Decimal]) -> Option<Decimal> {
    values.iter().try_fold(Decimal::ZERO, |total, value| {
        value
            .checked_mul(*value)
            .and_then(|square| total.checked_add(square))
    })
}

/// Smallest value, zero for an empty series.
pub fn min(values: &[Decimal]) -> Decimal {
    values.iter().copied().min().unwrap_or(Decimal::ZERO)
}

/// Largest value, zero for an empty series.
pub fn max(values: &[Decimal]) -> Decimal {
    values.iter().copied().max().unwrap_or(Decimal::ZERO)
}

/// Returns a sorted copy of the series.
pub fn sorted(values: &[Decimal]) -> Vec<Decimal> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted
}

/// Quantile of an already sorted series using linear interpolation between closest ranks.
///
/// `p` is clamped to `[0, 1]`. Returns zero for an empty series.
pub fn quantile(sorted: &[Decimal], p: Decimal) -> Decimal {
    let Some(last_idx) = sorted.len().checked_sub(1) else {
        return Decimal::ZERO;
    };

    let p = p.clamp(Decimal::ZERO, Decimal::ONE);
    let position = p * Decimal::from(last_idx);
    let lower = position.floor();
    let fraction = position - lower;
    let lower_idx = lower.to_usize().unwrap_or(0).min(last_idx);

    let lower_value = sorted.get(lower_idx).copied().unwrap_or(Decimal::ZERO);
    let upper_value = sorted.get(lower_idx + 1).copied().unwrap_or(lower_value);

    lower_value + (upper_value - lower_value) * fraction
}

/// Five-number summary with Tukey whiskers, used for box plots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxSummary {
    /// Smallest value
    pub min: Decimal,

    /// First quartile
    pub q1: Decimal,

    /// Median
    pub median: Decimal,

    /// Third quartile
    pub q3: Decimal,

    /// Largest value
    pub max: Decimal,

    /// Smallest value within 1.5 × IQR below the first quartile
    pub lower_whisker: Decimal,

    /// Largest value within 1.5 × IQR above the third quartile
    pub upper_whisker: Decimal,

    /// Values beyond the whiskers
    pub outliers: Vec<Decimal>,
}

impl BoxSummary {
    /// Summarise a series, returning `None` when it is empty.
    pub fn from_values(values: &[Decimal]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let sorted = sorted(values);
        let q1 = quantile(&sorted, Decimal::new(25, 2));
        let median = quantile(&sorted, Decimal::new(5, 1));
        let q3 = quantile(&sorted, Decimal::new(75, 2));
        let reach = (q3 - q1) * Decimal::new(15, 1);
        let low_fence = q1 - reach;
        let high_fence = q3 + reach;

        let (inside, outliers): (Vec<Decimal>, Vec<Decimal>) = sorted
            .iter()
            .partition(|v| **v >= low_fence && **v <= high_fence);

        Some(Self {
            min: min(&sorted),
            q1,
            median,
            q3,
            max: max(&sorted),
            lower_whisker: inside.first().copied().unwrap_or(q1),
            upper_whisker: inside.last().copied().unwrap_or(q3),
            outliers,
        })
    }
}
