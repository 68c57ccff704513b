//! Top products chart

use rusty_money::iso::Currency;

use crate::{
    analysis::products::ProductSummary,
    money::{format_amount, to_f64},
    stats,
};

use super::{
    ChartError, ChartKind,
    axis::{self, Frame, as_f64},
    svg::{Anchor, Stroke, Svg, TextStyle},
};

/// Viridis samples from dark to light.
const PALETTE: [&str; 10] = [
    "#31688e", "#2b758e", "#26828e", "#21918c", "#1f9e89", "#25ab82", "#35b779", "#4ec36b",
    "#6ccd5a", "#90d743",
];

/// Horizontal bars in ranking order, highest revenue on top, with value labels.
///
/// # Errors
///
/// Returns [`ChartError::RenderSkipped`] if there are no products.
pub fn top_products(
    products: &[ProductSummary],
    currency: &'static Currency,
) -> Result<Svg, ChartError> {
    if products.is_empty() {
        return Err(ChartError::RenderSkipped(ChartKind::TopProducts));
    }

    let kind = ChartKind::TopProducts;
    let mut svg = Svg::new(axis::WIDTH, axis::HEIGHT, kind.label());
    let frame = Frame::within(&svg, 160.0, 60.0, 130.0, 60.0);

    let revenue: Vec<_> = products.iter().map(|p| p.revenue).collect();
    let max = axis::nice_ceiling(to_f64(stats::max(&revenue)));

    axis::title(&mut svg, &format!("Top {} Products by Revenue", products.len()));
    axis::x_caption(&mut svg, &frame, &format!("Revenue ({})", currency.symbol));

    for tick in 0..=5 {
        let value = max * as_f64(tick) / 5.0;
        let x = frame.x_for(value, 0.0, max);

        svg.line((x, frame.top), (x, frame.bottom()), Stroke::dashed(axis::GRID, 1.0));
        svg.text(
            (x, frame.bottom() + 16.0),
            axis::compact_amount(value, currency),
            TextStyle::new(11.0, Anchor::Middle),
        );
    }

    let slot = frame.height / as_f64(products.len());
    let bar_height = (slot * 0.7).min(40.0);

    for (idx, product) in products.iter().enumerate() {
        let center = frame.top + slot * (as_f64(idx) + 0.5);
        let width = frame.x_for(to_f64(product.revenue), 0.0, max) - frame.left;
        let color = PALETTE
            .get(idx * PALETTE.len() / products.len().max(1))
            .copied()
            .unwrap_or("#31688e");

        svg.rect(frame.left, center - bar_height / 2.0, width, bar_height, color);
        svg.text(
            (frame.left - 8.0, center + 4.0),
            product.product.as_str(),
            TextStyle::new(12.0, Anchor::End),
        );
        svg.text(
            (frame.left + width + 6.0, center + 4.0),
            format_amount(product.revenue, currency),
            TextStyle::new(11.0, Anchor::Start).bold(),
        );
    }

    svg.line(
        (frame.left, frame.top),
        (frame.left, frame.bottom()),
        Stroke::solid(axis::AXIS, 1.0),
    );

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn summary(product: &str, revenue: i64) -> ProductSummary {
        ProductSummary {
            product: product.to_string(),
            revenue: Decimal::from(revenue),
            quantity: 1,
            transactions: 1,
            average_price: Decimal::from(revenue),
            average_revenue_per_sale: Decimal::from(revenue),
        }
    }

    #[test]
    fn empty_ranking_is_skipped() {
        assert!(matches!(
            top_products(&[], iso::USD),
            Err(ChartError::RenderSkipped(ChartKind::TopProducts))
        ));
    }

    #[test]
    fn bars_follow_ranking_order_with_labels() -> TestResult {
        let products = [summary("Laptop", 5_000), summary("Mouse & Pad", 120)];

        let output = top_products(&products, iso::USD)?.to_string();

        let laptop = output.find(">Laptop<").ok_or("missing Laptop label")?;
        let mouse = output.find(">Mouse &amp; Pad<").ok_or("missing escaped label")?;

        assert!(laptop < mouse);
        assert!(output.contains("$5,000.00"));
        assert!(output.contains("Top 2 Products by Revenue"));

        Ok(())
    }
}
