use crate::util::{range::NumRange, unit::Point3};
use log::warn;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A sphere that pushes through the tiling plane (`z = 0`) from below (or
/// from above, in which case everything is mirrored). Points of the plane
/// that fall inside the footprint of the part of the sphere that pokes
/// through, the **emerged cap**, get wrapped over the cap. Everything else is
/// left where it is.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Sphere {
    pub center: Point3,
    #[validate(range(min = 1.0))]
    pub radius: f64,
}

impl Sphere {
    /// Domain of `asin`/`acos`. Arguments are clamped into this before use.
    const UNIT_RANGE: NumRange<f64> = NumRange::new(-1.0, 1.0);
    /// How far outside [Self::UNIT_RANGE] an argument can be before we
    /// consider it more than rounding error, and complain about it
    const DOMAIN_TOLERANCE: f64 = 1e-9;

    pub const fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Does this sphere actually cross the tiling plane? If not, deformation
    /// is the identity.
    pub fn intersects_plane(&self) -> bool {
        self.radius.powi(2) > self.center.z.powi(2)
    }

    /// Radius of the circle where the sphere crosses the tiling plane, i.e.
    /// the radius of the emerged cap's footprint. `None` if the sphere
    /// doesn't reach the plane.
    pub fn emerged_radius(&self) -> Option<f64> {
        if self.intersects_plane() {
            Some((self.radius.powi(2) - self.center.z.powi(2)).sqrt())
        } else {
            None
        }
    }

    /// Deform a point of the tiling plane over this sphere.
    ///
    /// Within the cap's footprint, the distance `r` from the sphere's
    /// vertical axis is remapped non-linearly (the direction from the axis is
    /// preserved), and the point is raised onto the cap. A point on the axis
    /// keeps its x/y and only gets raised. Outside the footprint, the point
    /// is returned as-is.
    ///
    /// Never fails. The arguments to `acos`/`asin` are clamped into
    /// `[-1, 1]`, so finite input always gives finite output.
    pub fn deform(&self, point: Point3) -> Point3 {
        let emerged_radius = match self.emerged_radius() {
            Some(emerged_radius) => emerged_radius,
            None => return point,
        };

        // The math below assumes the center is at or below the plane. For a
        // center above the plane, reflect it and then reflect the output
        // height back at the end
        let mirrored = self.center.z > 0.0;
        let zc = -self.center.z.abs();
        let radius = self.radius;

        // Horizontal offset from the sphere's vertical axis
        let offset =
            Vector2::new(point.x - self.center.x, point.y - self.center.y);
        let r = offset.norm();

        // Angle (from the axis, at the center) that spans the emerged cap
        let cap_angle = Self::unit_domain(-zc / radius, "acos").acos();
        let r_prime = radius * (cap_angle * r / emerged_radius).sin();

        let mut deformed = point;
        if r > 0.0 && r <= emerged_radius {
            let scaled = offset * (r_prime / r);
            deformed.x = self.center.x + scaled.x;
            deformed.y = self.center.y + scaled.y;
        }
        if r <= emerged_radius {
            let beta = Self::unit_domain(r_prime / radius, "asin").asin();
            let z = zc + radius * beta.cos();
            deformed.z = if mirrored { -z } else { z };
        }
        deformed
    }

    /// Clamp an argument for an inverse trig function into its domain. For a
    /// sphere that crosses the plane, both arguments are mathematically
    /// within `[-1, 1]`, so this only ever absorbs rounding error. The warning
    /// fires only for spheres that skipped validation.
    fn unit_domain(value: f64, function: &str) -> f64 {
        let clamped = Self::UNIT_RANGE.clamp(value);
        if (clamped - value).abs() > Self::DOMAIN_TOLERANCE {
            warn!(
                "{} argument {} is outside {}, clamped to {}",
                function,
                value,
                Self::UNIT_RANGE,
                clamped
            );
        }
        clamped
    }
}

impl Default for Sphere {
    /// Mostly below the plane, just off the origin
    fn default() -> Self {
        Self::new(Point3::new(-50.0, -50.0, -30.0), 230.0)
    }
}

/// Deform a point of the tiling plane over a sphere. See [Sphere::deform].
pub fn deform(point: Point3, sphere: Sphere) -> Point3 {
    sphere.deform(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Rotation2;
    use std::f64::consts::PI;

    fn assert_point_approx_eq(actual: Point3, expected: Point3) {
        assert!(
            (actual - expected).xy().distance_to(Default::default()) < 1e-6
                && (actual.z - expected.z).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_identity_when_sphere_misses_plane() {
        let spheres = [
            Sphere::new(Point3::new(0.0, 0.0, -10.0), 10.0),
            Sphere::new(Point3::new(0.0, 0.0, 10.0), 10.0),
            Sphere::new(Point3::new(5.0, -5.0, -100.0), 20.0),
            Sphere::new(Point3::new(0.0, 0.0, 0.0), 0.0),
        ];
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
            Point3::new(-250.0, 17.5, 0.0),
        ];
        for sphere in &spheres {
            assert_eq!(sphere.emerged_radius(), None);
            for point in &points {
                assert_eq!(sphere.deform(*point), *point);
            }
        }
    }

    #[test]
    fn test_point_on_axis() {
        // Only the height changes, by exactly the height of the cap
        let sphere = Sphere::new(Point3::new(-50.0, -50.0, -30.0), 230.0);
        let deformed = deform(Point3::new(-50.0, -50.0, 0.0), sphere);
        assert_eq!(deformed.xy(), Point3::new(-50.0, -50.0, 0.0).xy());
        assert_approx_eq!(deformed.z, 200.0);
    }

    #[test]
    fn test_mirrored_sphere() {
        let below = Sphere::new(Point3::new(10.0, 20.0, -30.0), 100.0);
        let above = Sphere::new(Point3::new(10.0, 20.0, 30.0), 100.0);
        for point in &[
            Point3::new(10.0, 20.0, 0.0),
            Point3::new(40.0, 0.0, 0.0),
            Point3::new(-50.0, 60.0, 0.0),
        ] {
            let a = below.deform(*point);
            let b = above.deform(*point);
            assert_point_approx_eq(b, Point3::new(a.x, a.y, -a.z));
        }
    }

    #[test]
    fn test_outside_footprint() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -60.0), 100.0);
        assert_approx_eq!(sphere.emerged_radius().unwrap(), 80.0);
        let point = Point3::new(80.0, 0.1, 0.0);
        assert_eq!(sphere.deform(point), point);
    }

    #[test]
    fn test_rotational_symmetry() {
        let sphere = Sphere::new(Point3::ORIGIN, 150.0);
        for &(x, y) in &[(10.0, 0.0), (37.0, -12.0), (-90.0, 100.0)] {
            let point = nalgebra::Point2::new(x, y);
            let deformed = sphere.deform(Point3::new(x, y, 0.0));
            for &theta in &[PI / 7.0, PI / 3.0, 1.5, PI, 5.0] {
                let rotation = Rotation2::new(theta);
                let rotated: crate::Point2 = (rotation * point).into();
                let rotate_then_deform = sphere.deform(rotated.to_point3());

                let deformed_xy: nalgebra::Point2<f64> = deformed.xy().into();
                let deform_then_rotate: crate::Point2 =
                    (rotation * deformed_xy).into();
                assert_point_approx_eq(
                    rotate_then_deform,
                    Point3::new(
                        deform_then_rotate.x,
                        deform_then_rotate.y,
                        deformed.z,
                    ),
                );
            }
        }
    }

    #[test]
    fn test_boundary_continuity() {
        // With the center on the plane, the cap is a full hemisphere. At the
        // edge of the footprint, r' reaches the radius and z drops to the
        // center's height
        let sphere = Sphere::new(Point3::ORIGIN, 100.0);
        let edge = sphere.emerged_radius().unwrap() - 1e-9;
        let deformed = sphere.deform(Point3::new(edge, 0.0, 0.0));
        assert_approx_eq!(deformed.x, 100.0, 1e-6);
        assert_approx_eq!(deformed.y, 0.0, 1e-6);
        assert_approx_eq!(deformed.z, 0.0, 1e-3);

        // With a partially emerged sphere, the cap meets the plane at the
        // edge of the footprint, so points there barely move
        let sphere = Sphere::new(Point3::new(5.0, 5.0, -60.0), 100.0);
        let edge = sphere.emerged_radius().unwrap() - 1e-9;
        let point = Point3::new(5.0, 5.0 + edge, 0.0);
        let deformed = sphere.deform(point);
        assert_approx_eq!(deformed.x, point.x, 1e-6);
        assert_approx_eq!(deformed.y, point.y, 1e-6);
        assert_approx_eq!(deformed.z, 0.0, 1e-3);
    }

    #[test]
    fn test_never_nan() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -99.999_999), 100.0);
        for i in 0..100 {
            let r = i as f64 * 0.001;
            let deformed = sphere.deform(Point3::new(r, 0.0, 0.0));
            assert!(!deformed.x.is_nan() && !deformed.z.is_nan());
        }
    }

    #[test]
    fn test_unit_domain() {
        assert_eq!(Sphere::unit_domain(0.25, "asin"), 0.25);
        assert_eq!(Sphere::unit_domain(-1.0, "acos"), -1.0);
        // Rounding error just past the edge
        assert_eq!(Sphere::unit_domain(1.0 + 1e-15, "asin"), 1.0);
        assert_eq!(Sphere::unit_domain(-1.0 - 1e-15, "acos"), -1.0);
        // Way out of range still gives something acos/asin can take
        assert_eq!(Sphere::unit_domain(7.5, "acos"), 1.0);
        assert_eq!(Sphere::unit_domain(-3.0, "asin"), -1.0);
        assert!(!Sphere::unit_domain(1.5, "asin").asin().is_nan());
    }
}
