//! SVG documents

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Text starts at the anchor point
    Start,

    /// Text is centred on the anchor point
    Middle,

    /// Text ends at the anchor point
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Text placement and styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f64,

    /// Horizontal anchoring
    pub anchor: Anchor,

    /// Bold weight
    pub bold: bool,

    /// Rotation in degrees around the anchor point
    pub rotate: Option<f64>,

    /// Fill colour
    pub fill: &'static str,
}

impl TextStyle {
    /// Regular dark text at the given size and anchor.
    pub const fn new(size: f64, anchor: Anchor) -> Self {
        Self {
            size,
            anchor,
            bold: false,
            rotate: None,
            fill: "#333333",
        }
    }

    /// Bold variant.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Rotated variant.
    #[must_use]
    pub const fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Variant with a different fill colour.
    #[must_use]
    pub const fn filled(mut self, fill: &'static str) -> Self {
        self.fill = fill;
        self
    }
}

/// Stroke styling for lines and outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke colour
    pub color: &'static str,

    /// Stroke width in pixels
    pub width: f64,

    /// Dashed rather than solid
    pub dashed: bool,
}

impl Stroke {
    /// Solid stroke.
    pub const fn solid(color: &'static str, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    /// Dashed stroke.
    pub const fn dashed(color: &'static str, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: true,
        }
    }
}

impl Display for Stroke {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, r#"stroke="{}" stroke-width="{:.1}""#, self.color, self.width)?;

        if self.dashed {
            f.write_str(r#" stroke-dasharray="6 4""#)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Element {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: &'static str,
        opacity: f64,
        stroke: Option<Stroke>,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: &'static str,
        opacity: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: &'static str,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
    },
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
                opacity,
                stroke,
            } => {
                write!(
                    f,
                    r#"<rect x="{x:.1}" y="{y:.1}" width="{width:.1}" height="{height:.1}" fill="{fill}" fill-opacity="{opacity:.2}""#
                )?;

                if let Some(stroke) = stroke {
                    write!(f, " {stroke}")?;
                }

                f.write_str("/>")
            }
            Element::Line { from, to, stroke } => write!(
                f,
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" {stroke}/>"#,
                from.0, from.1, to.0, to.1
            ),
            Element::Polyline { points, stroke } => {
                write!(f, r#"<polyline fill="none" {stroke} points=""#)?;
                write_points(f, points)?;
                f.write_str(r#""/>"#)
            }
            Element::Polygon {
                points,
                fill,
                opacity,
            } => {
                write!(f, r#"<polygon fill="{fill}" fill-opacity="{opacity:.2}" points=""#)?;
                write_points(f, points)?;
                f.write_str(r#""/>"#)
            }
            Element::Circle { cx, cy, r, fill } => {
                write!(f, r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{fill}"/>"#)
            }
            Element::Text {
                x,
                y,
                content,
                style,
            } => {
                write!(
                    f,
                    r#"<text x="{x:.1}" y="{y:.1}" font-size="{:.1}" text-anchor="{}" fill="{}""#,
                    style.size,
                    style.anchor.as_str(),
                    style.fill
                )?;

                if style.bold {
                    f.write_str(r#" font-weight="bold""#)?;
                }

                if let Some(degrees) = style.rotate {
                    write!(f, r#" transform="rotate({degrees:.1} {x:.1} {y:.1})""#)?;
                }

                write!(f, ">{}</text>", escape(content))
            }
        }
    }
}

fn write_points(f: &mut Formatter<'_>, points: &[(f64, f64)]) -> FmtResult {
    for (idx, (x, y)) in points.iter().enumerate() {
        if idx > 0 {
            f.write_str(" ")?;
        }

        write!(f, "{x:.1},{y:.1}")?;
    }

    Ok(())
}

/// Escapes text for use in XML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

/// A standalone SVG document built from simple shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Svg {
    width: f64,
    height: f64,
    title: String,
    elements: Vec<Element>,
}

impl Svg {
    /// Create an empty document with a white background.
    pub fn new(width: f64, height: f64, title: impl Into<String>) -> Self {
        let mut svg = Self {
            width,
            height,
            title: title.into(),
            elements: Vec::new(),
        };

        svg.rect(0.0, 0.0, width, height, "#ffffff");

        svg
    }

    /// Document width in pixels
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Document height in pixels
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Accessible title of the document
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of shapes in the document, including the background.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the document holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Filled rectangle.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &'static str) -> &mut Self {
        self.push(Element::Rect {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            fill,
            opacity: 1.0,
            stroke: None,
        })
    }

    /// Rectangle with fill opacity and an optional outline.
    pub fn rect_styled(
        &mut self,
        (x, y): (f64, f64),
        (width, height): (f64, f64),
        fill: &'static str,
        opacity: f64,
        stroke: Option<Stroke>,
    ) -> &mut Self {
        self.push(Element::Rect {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
            fill,
            opacity,
            stroke,
        })
    }

    /// Straight line segment.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) -> &mut Self {
        self.push(Element::Line { from, to, stroke })
    }

    /// Open line through the given points.
    pub fn polyline(&mut self, points: Vec<(f64, f64)>, stroke: Stroke) -> &mut Self {
        self.push(Element::Polyline { points, stroke })
    }

    /// Filled closed shape.
    pub fn polygon(&mut self, points: Vec<(f64, f64)>, fill: &'static str, opacity: f64) -> &mut Self {
        self.push(Element::Polygon {
            points,
            fill,
            opacity,
        })
    }

    /// Filled circle.
    pub fn circle(&mut self, (cx, cy): (f64, f64), r: f64, fill: &'static str) -> &mut Self {
        self.push(Element::Circle { cx, cy, r, fill })
    }

    /// Text label. Content is escaped on output.
    pub fn text(&mut self, (x, y): (f64, f64), content: impl Into<String>, style: TextStyle) -> &mut Self {
        self.push(Element::Text {
            x,
            y,
            content: content.into(),
            style,
        })
    }

    fn push(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }
}

impl Display for Svg {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="Helvetica, Arial, sans-serif" role="img">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(f, "<title>{}</title>", escape(&self.title))?;

        for element in &self.elements {
            writeln!(f, "{element}")?;
        }

        f.write_str("</svg>\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_replaces_markup_characters() {
        assert_eq!(escape(r#"A&B <"x"> 'y'"#), "A&amp;B &lt;&quot;x&quot;&gt; &apos;y&apos;");
    }

    #[test]
    fn document_has_root_title_and_background() {
        let svg = Svg::new(200.0, 100.0, "Sales & Co");
        let output = svg.to_string();

        assert!(output.starts_with("<svg "));
        assert!(output.contains(r#"viewBox="0 0 200 100""#));
        assert!(output.contains("<title>Sales &amp; Co</title>"));
        assert!(output.trim_end().ends_with("</svg>"));
        assert_eq!(svg.len(), 1);
    }

    #[test]
    fn text_content_is_escaped() {
        let mut svg = Svg::new(100.0, 100.0, "t");
        svg.text((10.0, 20.0), "<Laptop>", TextStyle::new(12.0, Anchor::Start));

        let output = svg.to_string();

        assert!(output.contains("&lt;Laptop&gt;</text>"));
        assert!(!output.contains("<Laptop>"));
    }

    #[test]
    fn dashed_stroke_sets_dasharray() {
        let mut svg = Svg::new(100.0, 100.0, "t");
        svg.line((0.0, 0.0), (10.0, 10.0), Stroke::dashed("#000000", 1.0));

        assert!(svg.to_string().contains("stroke-dasharray"));
    }

    #[test]
    fn rotated_text_has_transform() {
        let mut svg = Svg::new(100.0, 100.0, "t");
        svg.text(
            (5.0, 5.0),
            "label",
            TextStyle::new(10.0, Anchor::End).rotated(-45.0),
        );

        assert!(svg.to_string().contains(r#"transform="rotate(-45.0 5.0 5.0)""#));
    }
}
