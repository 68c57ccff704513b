//! Quantity versus revenue chart

use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{analysis::products::ProductSummary, money::to_f64};

use super::{
    ChartError, ChartKind,
    axis::{self, Frame, as_f64},
    svg::{Anchor, Stroke, Svg, TextStyle},
};

const QUANTITY: &str = "#4ECDC4";
const REVENUE: &str = "#FF6B6B";

/// Quantity bars on the left axis and a revenue line on the right axis, per product.
///
/// Products are plotted in the order given, which is the ranking order.
///
/// # Errors
///
/// Returns [`ChartError::RenderSkipped`] if there are no products.
pub fn quantity_vs_revenue(
    products: &[ProductSummary],
    currency: &'static Currency,
) -> Result<Svg, ChartError> {
    if products.is_empty() {
        return Err(ChartError::RenderSkipped(ChartKind::QuantityVsRevenue));
    }

    let kind = ChartKind::QuantityVsRevenue;
    let mut svg = Svg::new(axis::WIDTH, axis::HEIGHT, kind.label());
    let frame = Frame::within(&svg, 90.0, 60.0, 90.0, 130.0);

    let max_quantity = products.iter().map(|p| p.quantity).max().unwrap_or(0);
    let max_revenue = products.iter().map(|p| p.revenue).max().unwrap_or(Decimal::ZERO);

    let quantity_axis = axis::nice_ceiling(to_f64(Decimal::from(max_quantity)));
    let revenue_axis = axis::nice_ceiling(to_f64(max_revenue));

    axis::title(&mut svg, kind.label());
    axis::y_axis_left(&mut svg, &frame, quantity_axis, axis::compact_count);
    axis::y_axis_right(&mut svg, &frame, revenue_axis, REVENUE, |v| {
        axis::compact_amount(v, currency)
    });
    axis::x_axis(&mut svg, &frame);
    axis::y_caption(&mut svg, 24.0, &frame, "Quantity Sold");
    let right_caption = svg.width() - 16.0;
    axis::y_caption(
        &mut svg,
        right_caption,
        &frame,
        &format!("Revenue ({})", currency.symbol),
    );

    let slot = frame.width / as_f64(products.len());
    let bar_width = slot * 0.4;

    let mut revenue_points = Vec::with_capacity(products.len());

    for (idx, product) in products.iter().enumerate() {
        let center = frame.slot_center(idx, products.len());
        let top = frame.y_for(to_f64(Decimal::from(product.quantity)), quantity_axis);

        svg.rect_styled(
            (center - bar_width, top),
            (bar_width, frame.bottom() - top),
            QUANTITY,
            0.8,
            None,
        );
        svg.text(
            (center, frame.bottom() + 14.0),
            product.product.as_str(),
            TextStyle::new(11.0, Anchor::End).rotated(-45.0),
        );

        revenue_points.push((center, frame.y_for(to_f64(product.revenue), revenue_axis)));
    }

    svg.polyline(revenue_points.clone(), Stroke::solid(REVENUE, 2.0));

    for point in revenue_points {
        svg.circle(point, 5.0, REVENUE);
    }

    legend(&mut svg, &frame);

    Ok(svg)
}

fn legend(svg: &mut Svg, frame: &Frame) {
    let x = frame.right() - 150.0;
    let y = frame.top + 10.0;

    svg.rect(x, y, 14.0, 10.0, QUANTITY);
    svg.text((x + 20.0, y + 9.0), "Quantity Sold", TextStyle::new(12.0, Anchor::Start));
    svg.line((x, y + 25.0), (x + 14.0, y + 25.0), Stroke::solid(REVENUE, 2.0));
    svg.text((x + 20.0, y + 29.0), "Revenue", TextStyle::new(12.0, Anchor::Start));
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn summary(product: &str, quantity: u64, revenue: i64) -> ProductSummary {
        ProductSummary {
            product: product.to_string(),
            revenue: Decimal::from(revenue),
            quantity,
            transactions: 1,
            average_price: Decimal::ONE,
            average_revenue_per_sale: Decimal::from(revenue),
        }
    }

    #[test]
    fn empty_ranking_is_skipped() {
        assert!(matches!(
            quantity_vs_revenue(&[], iso::USD),
            Err(ChartError::RenderSkipped(ChartKind::QuantityVsRevenue))
        ));
    }

    #[test]
    fn plots_products_in_given_order() -> TestResult {
        let products = [summary("Laptop", 3, 3_000), summary("Cable", 40, 200)];

        let output = quantity_vs_revenue(&products, iso::USD)?.to_string();

        let laptop = output.find(">Laptop<").ok_or("missing Laptop")?;
        let cable = output.find(">Cable<").ok_or("missing Cable")?;

        assert!(laptop < cable);
        assert!(output.contains("<polyline"));
        assert!(output.contains("Quantity Sold"));

        Ok(())
    }
}
