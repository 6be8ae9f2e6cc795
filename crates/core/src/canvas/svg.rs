use crate::{
    canvas::Canvas,
    util::{
        range::NumRange,
        unit::{Color3, Point2},
    },
};
use svg::{
    node::{
        element::{Line, Polygon},
        Comment,
    },
    Document, Node,
};

/// A canvas that builds an SVG document. Each filled polygon becomes a
/// `<polygon>`, and each line drawn outside of a fill becomes a `<line>`.
/// Both are stroked with the current color, the same as a pen plotter would.
///
/// SVG's y axis points down, so y is flipped on the way in. The view box is
/// set to the bounds of everything drawn when the canvas is finished.
#[derive(Debug)]
pub struct SvgCanvas {
    document: Document,
    stroke_width: f64,
    pen: Point2,
    color: Color3,
    fill: Option<Vec<Point2>>,
    /// Bounds of everything drawn so far, in SVG space
    bounds: Option<(NumRange<f64>, NumRange<f64>)>,
}

impl SvgCanvas {
    pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

    pub fn new() -> Self {
        Self::with_stroke_width(Self::DEFAULT_STROKE_WIDTH)
    }

    pub fn with_stroke_width(stroke_width: f64) -> Self {
        Self {
            // No anti-aliasing, we want hard edges between the wedges
            document: Document::new().set("shape-rendering", "crispEdges"),
            stroke_width,
            pen: Point2::ORIGIN,
            color: Color3::new_int(0, 0, 0),
            fill: None,
            bounds: None,
        }
    }

    /// Add a comment to the document. Handy for embedding the parameters that
    /// produced the drawing.
    pub fn add_comment(&mut self, text: impl Into<String>) {
        self.document.append(Comment::new(text));
    }

    /// Get the finished document
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Convert a point from tiling space (y up) to SVG space (y down), and
    /// grow the drawing bounds to include it
    fn to_svg_space(&mut self, point: Point2) -> (f64, f64) {
        // Subtract rather than negate, so 0 doesn't become -0 in the output
        let (x, y) = (point.x, 0.0 - point.y);
        self.bounds = Some(match self.bounds {
            None => (NumRange::single(x), NumRange::single(y)),
            Some((x_range, y_range)) => (x_range.include(x), y_range.include(y)),
        });
        (x, y)
    }
}

impl Default for SvgCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for SvgCanvas {
    fn move_to(&mut self, point: Point2) {
        self.pen = point;
        if let Some(points) = &mut self.fill {
            points.push(point);
        }
    }

    fn line_to(&mut self, point: Point2) {
        let start = self.pen;
        self.pen = point;
        if let Some(points) = &mut self.fill {
            // The polygon's outline gets stroked when the fill is closed
            points.push(point);
        } else if start != point {
            let (x1, y1) = self.to_svg_space(start);
            let (x2, y2) = self.to_svg_space(point);
            self.document.append(
                Line::new()
                    .set("x1", x1)
                    .set("y1", y1)
                    .set("x2", x2)
                    .set("y2", y2)
                    .set("stroke", self.color.to_html())
                    .set("stroke-width", self.stroke_width),
            );
        }
    }

    fn set_color(&mut self, color: Color3) {
        self.color = color;
    }

    fn begin_fill(&mut self) {
        self.fill = Some(vec![self.pen]);
    }

    fn end_fill(&mut self) {
        if let Some(points) = self.fill.take() {
            let points: Vec<(f64, f64)> = points
                .into_iter()
                .map(|point| self.to_svg_space(point))
                .collect();
            let color = self.color.to_html();
            self.document.append(
                Polygon::new()
                    .set("points", points)
                    .set("fill", color.clone())
                    .set("stroke", color)
                    .set("stroke-width", self.stroke_width),
            );
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        // Pad by the stroke width so outlines on the edge aren't cut off
        let pad = self.stroke_width;
        let (x_range, y_range) = self.bounds.unwrap_or((
            NumRange::single(0.0),
            NumRange::single(0.0),
        ));
        self.document.assign(
            "viewBox",
            (
                // Top-left corner
                x_range.min - pad,
                y_range.min - pad,
                // Width and height
                x_range.span() + pad * 2.0,
                y_range.span() + pad * 2.0,
            ),
        );
        Ok(())
    }
}
