use crate::{
    geometry::{deform::Sphere, hexagon::WedgeColors},
    tiling::Region,
    util::{range::NumRange, unit::Color3},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines a tiling. Two tilings rendered with the same
/// config will always be identical.
///
/// Every field has a default, nested ones included, so a config file only
/// needs to list the fields it wants to change. The defaults draw a 600x600
/// square of cubes, bulging out around a sphere slightly left of and below
/// the middle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TilingConfig {
    /// The rectangle to fill with hexagons
    #[validate]
    pub region: Region,

    /// Length of one edge of a hexagon, which is also the distance from the
    /// center of a hexagon to any of its vertices. Must be in
    /// [Self::EDGE_LENGTH_RANGE].
    #[validate(range(min = 1.0, max = 10000.0))]
    pub edge_length: f64,

    /// Color of each of the 3 wedges of a hexagon, in counter-clockwise
    /// order starting with the wedge on the upper right. Each color can be an
    /// HTML color code (`#rrggbb`) or the name of a
    /// [PaletteColor](crate::PaletteColor).
    pub colors: WedgeColors,

    /// The sphere that deforms the tiling. A sphere that doesn't cross the
    /// plane `z = 0` leaves the tiling flat.
    #[validate]
    pub sphere: Sphere,
}

impl TilingConfig {
    /// Allowed values for [Self::edge_length]. Keep in sync with the
    /// `validate` attribute on the field.
    pub const EDGE_LENGTH_RANGE: NumRange<f64> = NumRange::new(1.0, 10000.0);
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            region: Region::default(),
            edge_length: 30.0,
            colors: [
                Color3::new_int(0x22, 0x25, 0x27),
                Color3::new_int(0xe2, 0xd5, 0x0b),
                Color3::new_int(0x09, 0x6a, 0xb5),
            ],
            sphere: Sphere::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::unit::{Point2, Point3};

    #[test]
    fn test_default_is_valid() {
        TilingConfig::default().validate().unwrap();
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TilingConfig = serde_json::from_str(
            r##"{
                "edge_length": 12,
                "colors": ["navy", "#ffffff", "gold"],
                "sphere": {"center": {"x": 0, "y": 0}, "radius": 100}
            }"##,
        )
        .unwrap();
        assert_eq!(config.edge_length, 12.0);
        assert_eq!(config.colors[1], Color3::new_int(255, 255, 255));
        // z defaults to the plane
        assert_eq!(config.sphere, Sphere::new(Point3::ORIGIN, 100.0));
        assert_eq!(config.region, TilingConfig::default().region);
    }

    #[test]
    fn test_deserialize_bad_color() {
        let err = serde_json::from_str::<TilingConfig>(
            r#"{"colors": ["navy", "white", "mauve"]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown color \"mauve\""), "{}", err);
    }

    #[test]
    fn test_edge_length_range_matches_validation() {
        let range = TilingConfig::EDGE_LENGTH_RANGE;
        for &(edge_length, valid) in &[
            (range.min, true),
            (range.max, true),
            (range.min - 0.5, false),
            (range.max + 1.0, false),
        ] {
            let config = TilingConfig {
                edge_length,
                ..Default::default()
            };
            assert_eq!(range.contains(edge_length), valid);
            assert_eq!(config.validate().is_ok(), valid, "{}", edge_length);
        }
    }

    #[test]
    fn test_deserialize_partial_nested() {
        // Only one corner, and only one coordinate of it
        let config: TilingConfig = serde_json::from_str(
            r#"{
                "region": {"upper_right": {"x": 200}},
                "sphere": {"radius": 50}
            }"#,
        )
        .unwrap();
        let default = TilingConfig::default();
        assert_eq!(config.region.lower_left, default.region.lower_left);
        assert_eq!(config.region.upper_right, Point2::new(200.0, 0.0));
        assert_eq!(config.sphere.center, default.sphere.center);
        assert_eq!(config.sphere.radius, 50.0);
        config.validate().unwrap();
    }
}
