//! The tiling engine. Hexagons are laid out in rows, like bricks: every
//! other row is shifted right by half a hexagon (plus a gap), and each row
//! sits half a hexagon height above the previous one. The gaps left in one
//! row are filled by the hexagons of the rows above and below it.

use crate::{
    canvas::Canvas,
    config::TilingConfig,
    geometry::{
        deform::Sphere,
        hexagon::{Hexagon, WedgeColors},
    },
    timed,
    util::unit::Point2,
};
use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A rectangle on the tiling plane, defined by two opposite corners.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_region"))]
pub struct Region {
    pub lower_left: Point2,
    pub upper_right: Point2,
}

impl Region {
    pub const fn new(lower_left: Point2, upper_right: Point2) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    /// Is this region empty (or inverted)? Nothing is ever drawn in an empty
    /// region.
    pub fn is_empty(&self) -> bool {
        // Written so that NaN coordinates also count as empty
        !(self.upper_right.x > self.lower_left.x
            && self.upper_right.y > self.lower_left.y)
    }

    /// Distance between the two corners
    pub fn diagonal(&self) -> f64 {
        self.lower_left.distance_to(self.upper_right)
    }

    /// Number of hexagons drawn in each row. This is derived from the
    /// region's diagonal rather than its width, and it's the same for every
    /// row. Zero for an empty region or a non-positive edge length.
    pub fn hexagons_per_row(&self, edge_length: f64) -> usize {
        if self.is_empty() || !(edge_length > 0.0) {
            return 0;
        }
        let per_row = ((self.diagonal() / 2.0).floor() / (edge_length * 2.0))
            .floor();
        if per_row.is_finite() {
            per_row as usize
        } else {
            0
        }
    }
}

impl Default for Region {
    /// A 600x600 square centered on the origin
    fn default() -> Self {
        Self::new(Point2::new(-300.0, -300.0), Point2::new(300.0, 300.0))
    }
}

fn validate_region(region: &Region) -> Result<(), ValidationError> {
    if region.is_empty() {
        let mut error = ValidationError::new("empty_region");
        error.message = Some(
            "upper right corner must be above and to the right of the lower \
            left corner"
                .into(),
        );
        Err(error)
    } else {
        Ok(())
    }
}

/// Vertical distance between two consecutive rows: the distance from the
/// center of a hexagon to the middle of its top edge.
pub fn row_height(edge_length: f64) -> f64 {
    (edge_length.powi(2) - (edge_length / 2.0).powi(2)).sqrt()
}

/// Tracks where the next row of hexagons starts. Rows alternate between
/// being shifted right (after an even row) and not (after an odd row), and
/// each kind of row keeps its own multiplier for its height, so that
/// together they step up by one [row_height] per row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowOffsets {
    parity: u32,
    even_multiplier: f64,
    odd_multiplier: f64,
}

impl RowOffsets {
    pub const fn new() -> Self {
        Self {
            parity: 0,
            even_multiplier: 1.0,
            odd_multiplier: 2.0,
        }
    }

    /// Call once a row is complete. Returns the origin of the next row.
    pub fn advance(&mut self, lower_left: Point2, edge_length: f64) -> Point2 {
        let row_height = row_height(edge_length);
        let origin = if self.parity % 2 == 0 {
            let origin = Point2::new(
                lower_left.x + edge_length * 1.5,
                lower_left.y + row_height * self.even_multiplier,
            );
            self.even_multiplier += 2.0;
            origin
        } else {
            let origin = Point2::new(
                lower_left.x,
                lower_left.y + row_height * self.odd_multiplier,
            );
            self.odd_multiplier += 2.0;
            origin
        };
        self.parity += 1;
        origin
    }
}

impl Default for RowOffsets {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the origin (center) of every hexagon in a tiling, row by
/// row from the bottom, left to right within a row.
#[derive(Clone, Debug)]
pub struct HexagonOrigins {
    region: Region,
    edge_length: f64,
    hexagons_per_row: usize,
    row_origin: Point2,
    column: usize,
    offsets: RowOffsets,
}

impl HexagonOrigins {
    pub fn new(region: Region, edge_length: f64) -> Self {
        Self {
            region,
            edge_length,
            hexagons_per_row: region.hexagons_per_row(edge_length),
            row_origin: region.lower_left,
            column: 0,
            offsets: RowOffsets::new(),
        }
    }
}

impl Iterator for HexagonOrigins {
    type Item = Point2;

    fn next(&mut self) -> Option<Self::Item> {
        // Rows with no hexagons would never draw anything, so skip them all
        if self.hexagons_per_row == 0
            || self.row_origin.y >= self.region.upper_right.y
        {
            return None;
        }

        let origin = Point2::new(
            self.row_origin.x + self.column as f64 * self.edge_length * 3.0,
            self.row_origin.y,
        );
        self.column += 1;
        if self.column == self.hexagons_per_row {
            self.column = 0;
            self.row_origin = self
                .offsets
                .advance(self.region.lower_left, self.edge_length);
        }
        Some(origin)
    }
}

/// Draw a full tiling onto a canvas: every hexagon in the region, in three
/// colors, deformed by the sphere. Returns the number of hexagons drawn.
///
/// The canvas is **not** finished afterwards, so more can be drawn on it.
pub fn tile(
    region: Region,
    edge_length: f64,
    colors: WedgeColors,
    sphere: Sphere,
    canvas: &mut impl Canvas,
) -> usize {
    let mut drawn = 0;
    for origin in HexagonOrigins::new(region, edge_length) {
        Hexagon::new(origin.to_point3(), edge_length, colors)
            .draw(&sphere, canvas);
        drawn += 1;
    }
    drawn
}

/// A tiler draws the tiling described by a particular [TilingConfig]. The
/// config is validated once up front, and can't be changed after that.
/// Tilers are cheap to create, so if you need a different config, just
/// create a new one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tiler {
    config: TilingConfig,
}

impl Tiler {
    /// Initialize a new tiler with the given config. Returns an error if the
    /// config is invalid.
    pub fn new(config: TilingConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid tiling config")?;
        Ok(Self { config })
    }

    /// Get a reference to the config that this tiler uses
    pub fn config(&self) -> &TilingConfig {
        &self.config
    }

    pub fn hexagons_per_row(&self) -> usize {
        self.config
            .region
            .hexagons_per_row(self.config.edge_length)
    }

    /// Get the origin of every hexagon in the tiling, before deformation
    pub fn hexagon_origins(&self) -> HexagonOrigins {
        HexagonOrigins::new(self.config.region, self.config.edge_length)
    }

    /// Get every hexagon in the tiling, before deformation
    pub fn hexagons(&self) -> impl Iterator<Item = Hexagon> + '_ {
        self.hexagon_origins().map(move |origin| {
            Hexagon::new(
                origin.to_point3(),
                self.config.edge_length,
                self.config.colors,
            )
        })
    }

    /// Draw the tiling onto a canvas. Returns the number of hexagons drawn.
    /// The canvas is not finished afterwards.
    pub fn tile(&self, canvas: &mut impl Canvas) -> usize {
        let config = &self.config;
        debug!(
            "Tiling {:?} with {} hexagons per row",
            config.region,
            self.hexagons_per_row()
        );
        match config.sphere.emerged_radius() {
            Some(radius) => debug!(
                "Sphere emerges around {} with radius {}",
                config.sphere.center.xy(),
                radius
            ),
            None => debug!("Sphere doesn't reach the plane, tiling is flat"),
        }

        let drawn = timed!(
            "Tiling",
            tile(
                config.region,
                config.edge_length,
                config.colors,
                config.sphere,
                canvas,
            )
        );
        info!("Drew {} hexagons", drawn);
        drawn
    }

    /// Render the tiling as an SVG. Returns the SVG in a string.
    #[cfg(feature = "svg")]
    pub fn render_as_svg(&self) -> anyhow::Result<String> {
        use crate::canvas::svg::SvgCanvas;

        let mut canvas = SvgCanvas::new();
        canvas.add_comment(format!("\n{:#?}\n", self.config));
        self.tile(&mut canvas);
        canvas.finish().context("error finishing SVG")?;
        Ok(canvas.into_document().to_string())
    }

    /// Render the tiling as a JSON list of draw commands, which can be
    /// replayed onto any [Canvas] later. See
    /// [DrawCommand](crate::DrawCommand) for the format of each command.
    #[cfg(feature = "json")]
    pub fn render_as_json(&self) -> anyhow::Result<String> {
        use crate::canvas::RecordingCanvas;

        let mut canvas = RecordingCanvas::new();
        self.tile(&mut canvas);
        canvas.finish()?;
        canvas.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn square(min: f64, max: f64) -> Region {
        Region::new(Point2::new(min, min), Point2::new(max, max))
    }

    #[test]
    fn test_hexagons_per_row() {
        assert_eq!(square(-300.0, 300.0).hexagons_per_row(30.0), 7);
        assert_eq!(square(0.0, 100.0).hexagons_per_row(10.0), 3);
        assert_eq!(square(0.0, 100.0).hexagons_per_row(100.0), 0);
        // Empty, inverted, and degenerate
        assert_eq!(square(0.0, 0.0).hexagons_per_row(1.0), 0);
        assert_eq!(square(100.0, 0.0).hexagons_per_row(1.0), 0);
        assert_eq!(square(0.0, 100.0).hexagons_per_row(0.0), 0);
        assert_eq!(square(0.0, 100.0).hexagons_per_row(-5.0), 0);
        assert_eq!(square(0.0, 100.0).hexagons_per_row(f64::NAN), 0);
    }

    #[test]
    fn test_at_least_one_per_row() {
        for edge_length in 1..=50 {
            let edge_length = edge_length as f64;
            let region = square(-2.0 * edge_length, 2.0 * edge_length);
            assert!(region.hexagons_per_row(edge_length) >= 1);
            assert!(HexagonOrigins::new(region, edge_length).count() >= 1);
        }
    }

    #[test]
    fn test_row_offsets() {
        let lower_left = Point2::new(-10.0, 5.0);
        let height = row_height(2.0);
        assert_approx_eq!(height, 3f64.sqrt());

        let mut offsets = RowOffsets::new();
        for row in 1..=6 {
            let origin = offsets.advance(lower_left, 2.0);
            // Shifted after even rows only
            let x = if row % 2 == 1 { -7.0 } else { -10.0 };
            assert_approx_eq!(origin.x, x);
            assert_approx_eq!(origin.y, 5.0 + height * row as f64);
        }
    }

    #[test]
    fn test_origins() {
        let region = square(-300.0, 300.0);
        let origins: Vec<Point2> = HexagonOrigins::new(region, 30.0).collect();
        // 7 per row, and rows every ~25.98 up to 300 gives 24 rows
        assert_eq!(origins.len(), 7 * 24);

        // First row starts in the corner, spaced 3 edges apart
        for (i, origin) in origins[..7].iter().enumerate() {
            assert_approx_eq!(origin.x, -300.0 + 90.0 * i as f64);
            assert_approx_eq!(origin.y, -300.0);
        }
        // Second row is shifted over by 1.5 edges
        assert_approx_eq!(origins[7].x, -255.0);
        assert_approx_eq!(origins[7].y, -300.0 + row_height(30.0));
        // Third row is back against the left edge
        assert_approx_eq!(origins[14].x, -300.0);

        // Rows never climb back down, and never leave the region
        for pair in origins.windows(2) {
            assert!(pair[1].y >= pair[0].y);
        }
        assert!(origins.iter().all(|origin| origin.y < 300.0));
    }

    #[test]
    fn test_empty_region() {
        let sphere = TilingConfig::default().sphere;
        let colors = TilingConfig::default().colors;
        let mut canvas = crate::RecordingCanvas::new();
        for region in &[square(0.0, 0.0), square(10.0, -10.0)] {
            assert_eq!(tile(*region, 5.0, colors, sphere, &mut canvas), 0);
        }
        // Wide enough but not tall enough
        let region = Region::new(Point2::new(0.0, 0.0), Point2::new(500.0, 0.0));
        assert_eq!(tile(region, 5.0, colors, sphere, &mut canvas), 0);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_tiler_hexagons() {
        let tiler = Tiler::new(TilingConfig::default()).unwrap();
        assert_eq!(tiler.hexagons_per_row(), 7);
        let hexagons: Vec<Hexagon> = tiler.hexagons().collect();
        assert_eq!(hexagons.len(), 168);
        assert!(hexagons
            .iter()
            .all(|hexagon| hexagon.edge_length == 30.0
                && hexagon.origin.z == 0.0
                && hexagon.colors == tiler.config().colors));
    }

    #[test]
    fn test_invalid_region() {
        let config = TilingConfig {
            region: square(10.0, -10.0),
            ..Default::default()
        };
        let err = Tiler::new(config).unwrap_err();
        assert_eq!(err.to_string(), "invalid tiling config");
        assert!(err.downcast_ref::<validator::ValidationErrors>().is_some());
    }
}
