//! Drawing backends. The tiling engine never draws anything itself, it only
//! drives a [Canvas], which decides what the drawing actually turns into.

#[cfg(feature = "svg")]
pub mod svg;

use crate::util::unit::{Color3, Point2};
use serde::{Deserialize, Serialize};

/// A 2D vector drawing surface, driven like a pen plotter. The pen has a
/// current position and a current color. Moving the pen with
/// [Canvas::line_to] draws a line, [Canvas::move_to] jumps without drawing.
///
/// Every position visited between [Canvas::begin_fill] and
/// [Canvas::end_fill] (starting with the pen's position at `begin_fill`)
/// makes up a polygon, which gets filled with the current color.
///
/// A canvas is exclusively owned by whoever is drawing on it, and the drawer
/// always finishes a shape before starting the next one.
pub trait Canvas {
    /// Lift the pen and move it to a point, without drawing anything
    fn move_to(&mut self, point: Point2);

    /// Move the pen to a point, drawing a straight line along the way
    fn line_to(&mut self, point: Point2);

    /// Set the color used for subsequent lines and fills
    fn set_color(&mut self, color: Color3);

    /// Start recording a polygon to be filled
    fn begin_fill(&mut self);

    /// Fill the polygon recorded since the last [Canvas::begin_fill]
    fn end_fill(&mut self);

    /// Flush any pending output. Nothing will be drawn after this.
    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A single call made on a [Canvas]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    MoveTo { point: Point2 },
    LineTo { point: Point2 },
    SetColor { color: Color3 },
    BeginFill,
    EndFill,
    Finish,
}

/// A canvas that doesn't draw anything, it just remembers every call made
/// on it, in order. Useful for inspecting a drawing, or for handing it off
/// to a renderer that lives somewhere else.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made on this canvas so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Replay the recorded calls onto another canvas
    pub fn replay(&self, canvas: &mut impl Canvas) -> anyhow::Result<()> {
        for command in &self.commands {
            match *command {
                DrawCommand::MoveTo { point } => canvas.move_to(point),
                DrawCommand::LineTo { point } => canvas.line_to(point),
                DrawCommand::SetColor { color } => canvas.set_color(color),
                DrawCommand::BeginFill => canvas.begin_fill(),
                DrawCommand::EndFill => canvas.end_fill(),
                DrawCommand::Finish => canvas.finish()?,
            }
        }
        Ok(())
    }

    /// Reconstruct every filled polygon from the recorded calls, along with
    /// its fill color. A fill that was never ended is dropped.
    pub fn filled_polygons(&self) -> Vec<(Color3, Vec<Point2>)> {
        let mut polygons = Vec::new();
        let mut pen = Point2::ORIGIN;
        let mut color = Color3::new_int(0, 0, 0);
        let mut fill: Option<Vec<Point2>> = None;

        for command in &self.commands {
            match *command {
                DrawCommand::MoveTo { point } | DrawCommand::LineTo { point } => {
                    pen = point;
                    if let Some(points) = &mut fill {
                        points.push(point);
                    }
                }
                DrawCommand::SetColor { color: new_color } => color = new_color,
                DrawCommand::BeginFill => fill = Some(vec![pen]),
                DrawCommand::EndFill => {
                    if let Some(points) = fill.take() {
                        polygons.push((color, points));
                    }
                }
                DrawCommand::Finish => {}
            }
        }

        polygons
    }

    /// Serialize the recorded calls as JSON
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        use anyhow::Context;
        serde_json::to_string_pretty(self)
            .context("error serializing draw commands")
    }
}

impl Canvas for RecordingCanvas {
    fn move_to(&mut self, point: Point2) {
        self.commands.push(DrawCommand::MoveTo { point });
    }

    fn line_to(&mut self, point: Point2) {
        self.commands.push(DrawCommand::LineTo { point });
    }

    fn set_color(&mut self, color: Color3) {
        self.commands.push(DrawCommand::SetColor { color });
    }

    fn begin_fill(&mut self) {
        self.commands.push(DrawCommand::BeginFill);
    }

    fn end_fill(&mut self) {
        self.commands.push(DrawCommand::EndFill);
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.commands.push(DrawCommand::Finish);
        Ok(())
    }
}
