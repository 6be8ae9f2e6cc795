//! Vasarely draws op-art tilings: a rectangle filled with hexagons, each
//! split into three colored wedges so that the whole thing reads as a field
//! of cubes. The tiling can be warped by a sphere pushing up through the
//! plane, which makes the cubes bulge out around it.
//!
//! This crate contains the geometry and the tiling engine. Drawing is done
//! through the [Canvas] trait, so the same tiling can be rendered to any
//! backend. An SVG backend is included behind the `svg` feature.
//!
//! ```
//! use vasarely::{RecordingCanvas, Tiler, TilingConfig};
//!
//! let tiler = Tiler::new(TilingConfig::default()).unwrap();
//! let mut canvas = RecordingCanvas::new();
//! let drawn = tiler.tile(&mut canvas);
//! assert_eq!(canvas.filled_polygons().len(), drawn * 3);
//! ```
//!
//! See [TilingConfig] for details on how the tiling can be customized.

mod canvas;
mod config;
mod geometry;
mod tiling;
mod util;

#[cfg(feature = "svg")]
pub use crate::canvas::svg::SvgCanvas;
pub use crate::{
    canvas::{Canvas, DrawCommand, RecordingCanvas},
    config::TilingConfig,
    geometry::{
        deform::{deform, Sphere},
        hexagon::{Hexagon, Wedge, WedgeColors},
    },
    tiling::{row_height, tile, HexagonOrigins, Region, RowOffsets, Tiler},
    util::{
        range::NumRange,
        unit::{Color3, PaletteColor, Point2, Point3},
    },
};
