//! Sales value distribution chart

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::Currency;

use crate::{
    money::{format_amount, to_f64},
    stats::{self, BoxSummary},
};

use super::{
    ChartError, ChartKind,
    axis::{self, Frame, as_f64},
    svg::{Anchor, Stroke, Svg, TextStyle},
};

/// Largest number of histogram bins.
pub const MAX_BINS: usize = 50;

const BARS: &str = "#F18F01";
const MEAN: &str = "#C73E1D";
const MEDIAN: &str = "#6A994E";
const BOX: &str = "#A7C957";

/// Equal-width frequency counts over a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Lower edge of the first bin
    pub start: Decimal,

    /// Width of every bin
    pub bin_width: Decimal,

    /// Number of values in each bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into at most `max_bins` bins, and never more bins than values.
    ///
    /// Returns `None` for an empty series. A series with no spread yields a
    /// single bin.
    pub fn from_values(values: &[Decimal], max_bins: usize) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let start = stats::min(values);
        let end = stats::max(values);
        let bins = if start == end {
            1
        } else {
            values.len().clamp(1, max_bins.max(1))
        };

        let bin_width = (end - start) / Decimal::from(bins);
        let last_bin = bins - 1;
        let mut counts = vec![0; bins];

        for value in values {
            let idx = if bin_width.is_zero() {
                0
            } else {
                ((*value - start) / bin_width)
                    .floor()
                    .to_usize()
                    .unwrap_or(last_bin)
                    .min(last_bin)
            };

            if let Some(count) = counts.get_mut(idx) {
                *count += 1;
            }
        }

        Some(Self {
            start,
            bin_width,
            counts,
        })
    }

    /// Upper edge of the last bin.
    pub fn end(&self) -> Decimal {
        self.start + self.bin_width * Decimal::from(self.counts.len())
    }
}

/// Histogram of transaction values with mean and median markers, beside a box plot.
///
/// # Errors
///
/// Returns [`ChartError::RenderSkipped`] if there are no transactions.
pub fn sales_distribution(
    values: &[Decimal],
    currency: &'static Currency,
) -> Result<Svg, ChartError> {
    let kind = ChartKind::SalesDistribution;

    let (Some(histogram), Some(summary)) = (
        Histogram::from_values(values, MAX_BINS),
        BoxSummary::from_values(values),
    ) else {
        return Err(ChartError::RenderSkipped(kind));
    };

    let mut svg = Svg::new(axis::WIDTH, axis::HEIGHT, kind.label());

    draw_histogram(&mut svg, &histogram, values, currency);
    draw_box_plot(&mut svg, &summary, currency);

    Ok(svg)
}

fn draw_histogram(svg: &mut Svg, histogram: &Histogram, values: &[Decimal], currency: &'static Currency) {
    let frame = Frame::within(svg, 80.0, 70.0, 420.0, 70.0);

    let start = to_f64(histogram.start);
    let mut end = to_f64(histogram.end());

    if end <= start {
        end = start + 1.0;
    }

    let highest = histogram.counts.iter().copied().max().unwrap_or(0);
    let max = axis::nice_ceiling(as_f64(highest));

    svg.text(
        (frame.left + frame.width / 2.0, 50.0),
        "Sales Value Distribution",
        TextStyle::new(16.0, Anchor::Middle).bold(),
    );
    axis::y_axis_left(svg, &frame, max, axis::compact_count);
    axis::x_axis(svg, &frame);
    axis::y_caption(svg, 24.0, &frame, "Frequency");
    svg.text(
        (frame.left + frame.width / 2.0, svg.height() - 12.0),
        format!("Sale Value ({})", currency.symbol),
        TextStyle::new(13.0, Anchor::Middle).bold(),
    );

    let bin_px = frame.width / as_f64(histogram.counts.len());

    for (idx, count) in histogram.counts.iter().enumerate() {
        let x = frame.left + bin_px * as_f64(idx);
        let y = frame.y_for(as_f64(*count), max);

        svg.rect_styled(
            (x, y),
            (bin_px, frame.bottom() - y),
            BARS,
            0.7,
            Some(Stroke::solid("#000000", 0.5)),
        );
    }

    for (label, value) in [(0, start), (1, end)] {
        let anchor = if label == 0 { Anchor::Start } else { Anchor::End };

        svg.text(
            (frame.x_for(value, start, end), frame.bottom() + 16.0),
            axis::compact_amount(value, currency),
            TextStyle::new(11.0, anchor),
        );
    }

    let mean = stats::mean(values);
    let median = stats::median(values);

    for (name, value, color, offset) in [("Mean", mean, MEAN, 0.0), ("Median", median, MEDIAN, 16.0)] {
        let x = frame.x_for(to_f64(value), start, end);

        svg.line((x, frame.top), (x, frame.bottom()), Stroke::dashed(color, 2.0));
        svg.text(
            (frame.right() - 4.0, frame.top + 14.0 + offset),
            format!("{name}: {}", format_amount(value, currency)),
            TextStyle::new(12.0, Anchor::End).filled(color),
        );
    }
}

fn draw_box_plot(svg: &mut Svg, summary: &BoxSummary, currency: &'static Currency) {
    let frame = Frame::within(svg, 680.0, 70.0, 40.0, 70.0);
    let max = axis::nice_ceiling(to_f64(summary.max));
    let center = frame.left + frame.width / 2.0;
    let half = frame.width / 4.0;

    svg.text(
        (center, 50.0),
        "Sales Value Box Plot",
        TextStyle::new(16.0, Anchor::Middle).bold(),
    );
    axis::y_axis_left(svg, &frame, max, |v| axis::compact_amount(v, currency));
    axis::x_axis(svg, &frame);

    let y = |value: Decimal| frame.y_for(to_f64(value), max);

    let whisker = Stroke::solid("#000000", 1.5);

    svg.line((center, y(summary.upper_whisker)), (center, y(summary.q3)), whisker);
    svg.line((center, y(summary.q1)), (center, y(summary.lower_whisker)), whisker);

    for cap in [summary.upper_whisker, summary.lower_whisker] {
        svg.line((center - half / 2.0, y(cap)), (center + half / 2.0, y(cap)), whisker);
    }

    svg.rect_styled(
        (center - half, y(summary.q3)),
        (half * 2.0, y(summary.q1) - y(summary.q3)),
        BOX,
        0.7,
        Some(whisker),
    );
    svg.line(
        (center - half, y(summary.median)),
        (center + half, y(summary.median)),
        Stroke::solid(MEDIAN, 2.5),
    );

    for outlier in &summary.outliers {
        svg.circle((center, y(*outlier)), 3.0, MEAN);
    }
}
