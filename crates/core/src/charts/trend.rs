//! Monthly revenue trend chart

use rusty_money::iso::Currency;

use crate::{
    analysis::monthly::MonthlySummary,
    money::{format_amount, to_f64},
    stats,
};

use super::{
    ChartError, ChartKind,
    axis::{self, Frame},
    svg::{Anchor, Stroke, Svg, TextStyle},
};

const LINE: &str = "#2E86AB";
const AVERAGE: &str = "#A23B72";

/// Line and area chart of monthly revenue with a dashed average line.
///
/// # Errors
///
/// Returns [`ChartError::RenderSkipped`] if the trend has no months.
pub fn monthly_revenue_trend(
    trend: &[MonthlySummary],
    currency: &'static Currency,
) -> Result<Svg, ChartError> {
    if trend.is_empty() {
        return Err(ChartError::RenderSkipped(ChartKind::MonthlyRevenueTrend));
    }

    let kind = ChartKind::MonthlyRevenueTrend;
    let mut svg = Svg::new(axis::WIDTH, axis::HEIGHT, kind.label());
    let frame = Frame::within(&svg, 90.0, 60.0, 40.0, 100.0);

    let revenue: Vec<_> = trend.iter().map(|month| month.revenue).collect();
    let average = stats::mean(&revenue);
    let max = axis::nice_ceiling(to_f64(stats::max(&revenue)));

    axis::title(&mut svg, kind.label());
    axis::y_axis_left(&mut svg, &frame, max, |v| axis::compact_amount(v, currency));
    axis::x_axis(&mut svg, &frame);
    axis::x_caption(&mut svg, &frame, "Month");
    axis::y_caption(&mut svg, 24.0, &frame, &format!("Revenue ({})", currency.symbol));

    let points: Vec<(f64, f64)> = trend
        .iter()
        .enumerate()
        .map(|(idx, month)| {
            (
                frame.slot_center(idx, trend.len()),
                frame.y_for(to_f64(month.revenue), max),
            )
        })
        .collect();

    let mut area = Vec::with_capacity(points.len() + 2);

    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        area.push((first.0, frame.bottom()));
        area.extend(points.iter().copied());
        area.push((last.0, frame.bottom()));
    }

    svg.polygon(area, LINE, 0.3);
    svg.polyline(points.clone(), Stroke::solid(LINE, 2.0));

    for (point, month) in points.iter().zip(trend) {
        svg.circle(*point, 5.0, LINE);
        svg.text(
            (point.0, frame.bottom() + 16.0),
            month.month.to_string(),
            TextStyle::new(11.0, Anchor::End).rotated(-45.0),
        );
    }

    let average_y = frame.y_for(to_f64(average), max);

    svg.line(
        (frame.left, average_y),
        (frame.right(), average_y),
        Stroke::dashed(AVERAGE, 2.0),
    );
    svg.text(
        (frame.right() - 4.0, average_y - 6.0),
        format!("Average: {}", format_amount(average, currency)),
        TextStyle::new(12.0, Anchor::End).filled(AVERAGE),
    );

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        analysis::monthly::monthly_trend,
        records::{NewSalesRecord, RecordId, SalesRecord},
    };

    use super::*;

    #[test]
    fn empty_trend_is_skipped() {
        assert!(matches!(
            monthly_revenue_trend(&[], iso::USD),
            Err(ChartError::RenderSkipped(ChartKind::MonthlyRevenueTrend))
        ));
    }

    #[test]
    fn months_are_labelled_in_order() -> TestResult {
        let records = [date(2024, 2, 3), date(2024, 1, 9)]
            .into_iter()
            .zip(1..)
            .map(|(sale_date, id)| {
                Ok(SalesRecord::from_parts(
                    RecordId::new(id),
                    NewSalesRecord::new("Mouse", 1, Decimal::from(20), sale_date)?,
                    Timestamp::UNIX_EPOCH,
                ))
            })
            .collect::<TestResult<Vec<_>>>()?;

        let output = monthly_revenue_trend(&monthly_trend(&records), iso::USD)?.to_string();

        let january = output.find("2024-01").ok_or("missing January label")?;
        let february = output.find("2024-02").ok_or("missing February label")?;

        assert!(january < february);
        assert!(output.contains("Average: $20.00"));

        Ok(())
    }
}
