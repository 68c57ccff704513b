//! Plot area geometry and axes shared by the chart builders.

use rusty_money::iso::Currency;

use super::svg::{Anchor, Stroke, Svg, TextStyle};

pub(crate) const WIDTH: f64 = 1000.0;
pub(crate) const HEIGHT: f64 = 560.0;

pub(crate) const GRID: &str = "#e5e5e5";
pub(crate) const AXIS: &str = "#555555";

const TICKS: usize = 5;

/// Inner plotting rectangle of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Plot area inside the given margins of a document.
    pub fn within(svg: &Svg, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            width: (svg.width() - left - right).max(1.0),
            height: (svg.height() - top - bottom).max(1.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical position of `value` on an axis spanning `0..=max`.
    pub fn y_for(&self, value: f64, max: f64) -> f64 {
        self.bottom() - fraction(value, max) * self.height
    }

    /// Horizontal position of `value` on an axis spanning `min..=max`.
    pub fn x_for(&self, value: f64, min: f64, max: f64) -> f64 {
        self.left + fraction(value - min, max - min) * self.width
    }

    /// Centre of slot `idx` when the width is divided into `slots` equal parts.
    pub fn slot_center(&self, idx: usize, slots: usize) -> f64 {
        let slot = self.width / as_f64(slots.max(1));
        self.left + slot * (as_f64(idx) + 0.5)
    }
}

fn fraction(value: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return 0.0;
    }

    (value / span).clamp(0.0, 1.0)
}

/// Converts a count to `f64` for geometry.
pub(crate) fn as_f64(value: usize) -> f64 {
    u32::try_from(value).map_or(f64::from(u32::MAX), f64::from)
}

/// Smallest "nice" number (1, 2, 2.5 or 5 times a power of ten) at or above `value`.
pub(crate) fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }

    let magnitude = 10_f64.powf(value.log10().floor());

    [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

/// Chart title centred above the plot area.
pub(crate) fn title(svg: &mut Svg, text: &str) {
    let x = svg.width() / 2.0;
    svg.text((x, 32.0), text, TextStyle::new(20.0, Anchor::Middle).bold());
}

/// Horizontal gridlines with value labels along the left edge.
pub(crate) fn y_axis_left(svg: &mut Svg, frame: &Frame, max: f64, label: impl Fn(f64) -> String) {
    for tick in 0..=TICKS {
        let value = max * as_f64(tick) / as_f64(TICKS);
        let y = frame.y_for(value, max);

        svg.line((frame.left, y), (frame.right(), y), Stroke::solid(GRID, 1.0));
        svg.text(
            (frame.left - 8.0, y + 4.0),
            label(value),
            TextStyle::new(11.0, Anchor::End),
        );
    }

    svg.line(
        (frame.left, frame.top),
        (frame.left, frame.bottom()),
        Stroke::solid(AXIS, 1.0),
    );
}

/// Value labels along the right edge, without gridlines.
pub(crate) fn y_axis_right(
    svg: &mut Svg,
    frame: &Frame,
    max: f64,
    color: &'static str,
    label: impl Fn(f64) -> String,
) {
    for tick in 0..=TICKS {
        let value = max * as_f64(tick) / as_f64(TICKS);
        let y = frame.y_for(value, max);

        svg.text(
            (frame.right() + 8.0, y + 4.0),
            label(value),
            TextStyle::new(11.0, Anchor::Start).filled(color),
        );
    }

    svg.line(
        (frame.right(), frame.top),
        (frame.right(), frame.bottom()),
        Stroke::solid(color, 1.0),
    );
}

/// Bottom axis line.
pub(crate) fn x_axis(svg: &mut Svg, frame: &Frame) {
    svg.line(
        (frame.left, frame.bottom()),
        (frame.right(), frame.bottom()),
        Stroke::solid(AXIS, 1.0),
    );
}

/// Axis caption below the plot area.
pub(crate) fn x_caption(svg: &mut Svg, frame: &Frame, text: &str) {
    svg.text(
        (frame.left + frame.width / 2.0, svg.height() - 12.0),
        text,
        TextStyle::new(13.0, Anchor::Middle).bold(),
    );
}

/// Rotated axis caption beside the plot area.
pub(crate) fn y_caption(svg: &mut Svg, x: f64, frame: &Frame, text: &str) {
    svg.text(
        (x, frame.top + frame.height / 2.0),
        text,
        TextStyle::new(13.0, Anchor::Middle).bold().rotated(-90.0),
    );
}

/// Short monetary label for axis ticks, e.g. `$1.2k` or `$350`.
pub(crate) fn compact_amount(value: f64, currency: &Currency) -> String {
    let symbol = currency.symbol;
    let abs = value.abs();

    if abs >= 1_000_000.0 {
        format!("{symbol}{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{symbol}{:.1}k", value / 1_000.0)
    } else {
        format!("{symbol}{value:.0}")
    }
}

/// Short count label for axis ticks.
pub(crate) fn compact_count(value: f64) -> String {
    if value.abs() >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn nice_ceiling_rounds_up_to_readable_steps() {
        assert!(close(nice_ceiling(0.0), 1.0));
        assert!(close(nice_ceiling(7.0), 10.0));
        assert!(close(nice_ceiling(130.0), 200.0));
        assert!(close(nice_ceiling(2_100.0), 2_500.0));
        assert!(close(nice_ceiling(4_000.0), 5_000.0));
    }

    #[test]
    fn frame_maps_values_into_plot_area() {
        let svg = Svg::new(200.0, 100.0, "t");
        let frame = Frame::within(&svg, 10.0, 10.0, 10.0, 10.0);

        assert!(close(frame.y_for(0.0, 50.0), 90.0));
        assert!(close(frame.y_for(50.0, 50.0), 10.0));
        assert!(close(frame.x_for(5.0, 0.0, 10.0), 100.0));
        assert!(close(frame.slot_center(0, 2), 55.0));
    }

    #[test]
    fn compact_labels() {
        assert_eq!(compact_amount(1_240.0, iso::USD), "$1.2k");
        assert_eq!(compact_amount(350.0, iso::USD), "$350");
        assert_eq!(compact_count(12.0), "12");
    }
}
