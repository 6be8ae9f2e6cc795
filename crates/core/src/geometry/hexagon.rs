use crate::{
    canvas::Canvas,
    geometry::deform::Sphere,
    util::unit::{Color3, Point3},
};
use std::f64::consts::PI;

/// One color per wedge of a [Hexagon], in the order the wedges are drawn
pub type WedgeColors = [Color3; 3];

/// A regular hexagon, split into three equal wedges that each get their own
/// color. Each wedge is a rhombus made of the hexagon's center and three
/// consecutive vertices, so the three of them together read as a cube.
///
/// The origin is the center of the hexagon, and the shared corner of all
/// three wedges. Vertices are `edge_length` away from it, starting at angle 0
/// (directly to the right), which gives a flat-topped hexagon.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hexagon {
    pub origin: Point3,
    pub edge_length: f64,
    pub colors: WedgeColors,
}

/// One third of a [Hexagon].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Wedge {
    pub color: Color3,
    /// Angle of the wedge's first vertex around the origin, in radians
    pub start_angle: f64,
    /// The hexagon origin, followed by the wedge's three outer vertices in
    /// counter-clockwise order
    pub points: [Point3; 1 + Hexagon::EDGES_PER_WEDGE],
}

impl Hexagon {
    pub const WEDGES: usize = 3;
    /// Number of outer edges traced for each wedge (every wedge also has two
    /// edges back to the origin, which we get for free when filling)
    pub const EDGES_PER_WEDGE: usize = 3;
    /// Angle between two adjacent vertices
    const VERTEX_ANGLE: f64 = PI / 3.0;
    /// Angle covered by a single wedge
    const WEDGE_ANGLE: f64 = Self::VERTEX_ANGLE * 2.0;

    pub const fn new(
        origin: Point3,
        edge_length: f64,
        colors: WedgeColors,
    ) -> Self {
        Self {
            origin,
            edge_length,
            colors,
        }
    }

    /// Get the vertex at the given angle around the origin. Only multiples of
    /// 60° land on actual vertices.
    pub fn vertex(&self, angle: f64) -> Point3 {
        Point3::new(
            self.origin.x + self.edge_length * angle.cos(),
            self.origin.y + self.edge_length * angle.sin(),
            self.origin.z,
        )
    }

    /// Get the three wedges of this hexagon, undeformed. Wedge `i` starts at
    /// `i * 120°`, so together they cover the full 360°.
    pub fn wedges(&self) -> [Wedge; Self::WEDGES] {
        [0, 1, 2].map(|i| {
            let start_angle = i as f64 * Self::WEDGE_ANGLE;
            let vertex = |k: usize| {
                self.vertex(start_angle + k as f64 * Self::VERTEX_ANGLE)
            };
            Wedge {
                color: self.colors[i],
                start_angle,
                points: [self.origin, vertex(0), vertex(1), vertex(2)],
            }
        })
    }

    /// Draw this hexagon onto a canvas, with every point deformed by the
    /// given sphere first. The pen is lifted to the origin, then each wedge is
    /// traced from the origin and filled.
    pub fn draw(&self, sphere: &Sphere, canvas: &mut impl Canvas) {
        canvas.move_to(sphere.deform(self.origin).xy());
        for wedge in &self.wedges() {
            let wedge = wedge.deform(sphere);
            let [origin, vertices @ ..] = wedge.points;
            canvas.line_to(origin.xy());
            canvas.set_color(wedge.color);
            canvas.begin_fill();
            for vertex in &vertices {
                canvas.line_to(vertex.xy());
            }
            canvas.end_fill();
        }
    }
}

impl Wedge {
    /// Deform every point of this wedge over a sphere
    pub fn deform(&self, sphere: &Sphere) -> Self {
        Self {
            points: self.points.map(|point| sphere.deform(point)),
            ..*self
        }
    }
}
