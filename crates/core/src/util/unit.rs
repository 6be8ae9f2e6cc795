use crate::util::range::NumRange;
use anyhow::{anyhow, Context};
use derive_more::{
    Add, AddAssign, Display, Div, DivAssign, From, Into, Mul, MulAssign, Neg,
    Sub, SubAssign, Sum,
};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, str::FromStr};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A point on the tiling plane, or on a canvas. This is the only kind of
/// coordinate that ever reaches a [Canvas](crate::Canvas).
///
/// ## 2D Coordinates
///
/// Coordinates follow the usual math convention: right is positive x, **up**
/// is positive y. Canvases that render to a screen (e.g. SVG, where down is
/// positive y) are responsible for flipping the y axis.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.x", "self.y")]
#[serde(default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Lift this point into 3D space, onto the plane `z = 0`
    pub const fn to_point3(self) -> Point3 {
        Point3::new(self.x, self.y, 0.0)
    }

    /// Straight-line distance between two points
    pub fn distance_to(self, other: Point2) -> f64 {
        nalgebra::distance(
            &nalgebra::Point2::from(self),
            &nalgebra::Point2::from(other),
        )
    }
}

impl From<nalgebra::Point2<f64>> for Point2 {
    fn from(other: nalgebra::Point2<f64>) -> Self {
        Self {
            x: other.x,
            y: other.y,
        }
    }
}

impl From<Point2> for nalgebra::Point2<f64> {
    fn from(other: Point2) -> Self {
        Self::new(other.x, other.y)
    }
}

/// A point in 3D space. Tiling happens on the plane `z = 0`, so every point
/// has `z = 0` until it is deformed. After deformation, z is the height of
/// the point on the emerging sphere.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.x", "self.y", "self.z")]
#[serde(default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Drop the z component
    pub const fn xy(self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

impl From<nalgebra::Point3<f64>> for Point3 {
    fn from(other: nalgebra::Point3<f64>) -> Self {
        Self::new(other.x, other.y, other.z)
    }
}

impl From<Point2> for Point3 {
    fn from(other: Point2) -> Self {
        other.to_point3()
    }
}

/// An RGB color. Values are stored as floats between 0 and 1 (inclusive).
/// This uses f32 because the extra precision from f64 is pointless.
///
/// Colors are (de)serialized as strings. Deserialization accepts either an
/// HTML color code (`#rrggbb`) or the name of a [PaletteColor].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color3 {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color3 {
    /// The valid range of values for each component in RGB
    const COMPONENT_RANGE: NumRange<f32> = NumRange::new(0.0, 1.0);

    /// Create a new RGB color. Return an error if any of the components are
    /// out of the range [0.0, 1.0].
    pub fn new(red: f32, green: f32, blue: f32) -> anyhow::Result<Self> {
        fn check_component(
            component_name: &str,
            value: f32,
        ) -> anyhow::Result<f32> {
            Color3::COMPONENT_RANGE
                .ensure_contains(value)
                .with_context(|| {
                    format!("invalid color component {}", component_name)
                })?;
            Ok(value)
        }

        Ok(Self {
            red: check_component("red", red)?,
            green: check_component("green", green)?,
            blue: check_component("blue", blue)?,
        })
    }

    /// Create a new RGB color from integer components in the [0,255] range.
    pub const fn new_int(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    /// Parse an HTML color code: `#rrggbb`
    pub fn from_html(code: &str) -> anyhow::Result<Self> {
        let hex = code
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| {
                anyhow!("expected color code of the form #rrggbb, got {:?}", code)
            })?;
        let component = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| {
                format!("invalid hex digits in color code {:?}", code)
            })
        };
        Ok(Self::new_int(component(0)?, component(2)?, component(4)?))
    }

    /// Convert this number to a set of 3 bytes: `(red, green, blue)`
    pub fn to_ints(self) -> (u8, u8, u8) {
        (
            (self.red * 255.0).round() as u8,
            (self.green * 255.0).round() as u8,
            (self.blue * 255.0).round() as u8,
        )
    }

    /// Convert this color to an HTML color code: `#rrggbb`
    pub fn to_html(self) -> String {
        let (r, g, b) = self.to_ints();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Color3 {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::from_html(s)
        } else {
            let palette_color = s.parse::<PaletteColor>().map_err(|_| {
                anyhow!(
                    "unknown color {:?}, expected #rrggbb or one of: {}",
                    s,
                    PaletteColor::names().collect::<Vec<_>>().join(", ")
                )
            })?;
            Ok(palette_color.color())
        }
    }
}

impl TryFrom<String> for Color3 {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color3> for String {
    fn from(color: Color3) -> Self {
        color.to_html()
    }
}

/// The fixed set of named colors that can be used in place of a color code.
/// RGB values are the X11 definitions of each name.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    EnumIter,
    EnumString,
    IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum PaletteColor {
    Black,
    White,
    #[strum(to_string = "grey", serialize = "gray")]
    Grey,
    Red,
    Orange,
    Green,
    Blue,
    Navy,
    Yellow,
    Gold,
    Tan,
    Brown,
    Sienna,
    Wheat,
    Cyan,
    Pink,
    Salmon,
    Violet,
    Purple,
}

impl PaletteColor {
    /// The canonical name of this color
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Names of every color in the palette, in palette order
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::iter().map(Self::name)
    }

    pub fn color(self) -> Color3 {
        match self {
            Self::Black => Color3::new_int(0, 0, 0),
            Self::White => Color3::new_int(255, 255, 255),
            Self::Grey => Color3::new_int(190, 190, 190),
            Self::Red => Color3::new_int(255, 0, 0),
            Self::Orange => Color3::new_int(255, 165, 0),
            Self::Green => Color3::new_int(0, 255, 0),
            Self::Blue => Color3::new_int(0, 0, 255),
            Self::Navy => Color3::new_int(0, 0, 128),
            Self::Yellow => Color3::new_int(255, 255, 0),
            Self::Gold => Color3::new_int(255, 215, 0),
            Self::Tan => Color3::new_int(210, 180, 140),
            Self::Brown => Color3::new_int(165, 42, 42),
            Self::Sienna => Color3::new_int(160, 82, 45),
            Self::Wheat => Color3::new_int(245, 222, 179),
            Self::Cyan => Color3::new_int(0, 255, 255),
            Self::Pink => Color3::new_int(255, 192, 203),
            Self::Salmon => Color3::new_int(250, 128, 114),
            Self::Violet => Color3::new_int(238, 130, 238),
            Self::Purple => Color3::new_int(160, 32, 240),
        }
    }
}
