//! Color picker model: gradient interpolation and complementary pairs.
//!
//! # Invariants
//! - Colors always format as lowercase `#rrggbb`.
//! - `secondary` is the per-channel complement of `primary`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// CSS property receiving the foreground color.
pub const PRIMARY_COLOR_PROPERTY: &str = "--primary-color";
/// CSS property receiving the background color.
pub const SECONDARY_COLOR_PROPERTY: &str = "--secondary-color";

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn complement(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Linear interpolation toward `other`, rounding each channel.
    pub fn lerp(self, other: Rgb, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Hex color parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl Display for ColorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid `#rrggbb` color: `{}`", self.0)
    }
}

impl Error for ColorParseError {}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(value.to_string());
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Foreground/background pair written to the page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub primary: Rgb,
    pub secondary: Rgb,
}

impl ColorPair {
    /// Pair derived from one picked color and its complement.
    pub fn from_primary(primary: Rgb) -> Self {
        Self {
            primary,
            secondary: primary.complement(),
        }
    }

    /// Black text on white.
    pub fn light() -> Self {
        Self {
            primary: Rgb::BLACK,
            secondary: Rgb::WHITE,
        }
    }

    /// White text on black.
    pub fn dark() -> Self {
        Self {
            primary: Rgb::WHITE,
            secondary: Rgb::BLACK,
        }
    }

    pub fn css_properties(&self) -> [(&'static str, String); 2] {
        [
            (PRIMARY_COLOR_PROPERTY, self.primary.to_string()),
            (SECONDARY_COLOR_PROPERTY, self.secondary.to_string()),
        ]
    }
}

/// Ordered color stops spread evenly across the picker strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Gradient {
    stops: Vec<Rgb>,
}

impl Gradient {
    /// Returns `None` when `stops` is empty.
    pub fn new(stops: Vec<Rgb>) -> Option<Self> {
        if stops.is_empty() {
            None
        } else {
            Some(Self { stops })
        }
    }

    /// Seven-stop rainbow used by the default theme strip.
    pub fn rainbow() -> Self {
        Self {
            stops: vec![
                Rgb::new(0xff, 0x00, 0x00),
                Rgb::new(0xff, 0x7f, 0x00),
                Rgb::new(0xff, 0xff, 0x00),
                Rgb::new(0x00, 0xff, 0x00),
                Rgb::new(0x00, 0x00, 0xff),
                Rgb::new(0x4b, 0x00, 0x82),
                Rgb::new(0x94, 0x00, 0xd3),
            ],
        }
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Color at `ratio` along the strip; `ratio` is clamped to `[0, 1]`.
    pub fn color_at(&self, ratio: f64) -> Rgb {
        let last = self.stops.len() - 1;
        if last == 0 {
            return self.stops[0];
        }
        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        let scaled = ratio * last as f64;
        let index = (scaled.floor() as usize).min(last);
        let next = (index + 1).min(last);
        self.stops[index].lerp(self.stops[next], scaled - index as f64)
    }

    /// Color pair for a pointer at `x` over a strip `width` pixels wide.
    pub fn pick(&self, x: f64, width: f64) -> ColorPair {
        let ratio = if width > 0.0 { x / width } else { 0.0 };
        ColorPair::from_primary(self.color_at(ratio))
    }
}

impl TryFrom<Vec<Rgb>> for Gradient {
    type Error = &'static str;

    fn try_from(stops: Vec<Rgb>) -> Result<Self, Self::Error> {
        Self::new(stops).ok_or("gradient needs at least one color stop")
    }
}

impl From<Gradient> for Vec<Rgb> {
    fn from(value: Gradient) -> Self {
        value.stops
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::rainbow()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorPair, Gradient, Rgb};

    #[test]
    fn endpoints_hit_first_and_last_stop() {
        let gradient = Gradient::rainbow();
        assert_eq!(gradient.color_at(0.0).to_string(), "#ff0000");
        assert_eq!(gradient.color_at(1.0).to_string(), "#9400d3");
        assert_eq!(gradient.color_at(7.5).to_string(), "#9400d3");
        assert_eq!(gradient.color_at(-1.0).to_string(), "#ff0000");
    }

    #[test]
    fn midpoint_of_segment_interpolates_and_rounds() {
        let gradient = Gradient::new(vec![Rgb::BLACK, Rgb::WHITE]).expect("stops");
        assert_eq!(gradient.color_at(0.5).to_string(), "#808080");
    }

    #[test]
    fn pick_derives_complement() {
        let pair = Gradient::rainbow().pick(0.0, 300.0);
        assert_eq!(pair.primary.to_string(), "#ff0000");
        assert_eq!(pair.secondary.to_string(), "#00ffff");
    }

    #[test]
    fn zero_width_strip_picks_first_stop() {
        let pair = Gradient::rainbow().pick(50.0, 0.0);
        assert_eq!(pair.primary, Rgb::new(0xff, 0, 0));
    }

    #[test]
    fn presets_are_inverse_of_each_other() {
        assert_eq!(ColorPair::light().primary, ColorPair::dark().secondary);
        assert_eq!(ColorPair::light().secondary, ColorPair::dark().primary);
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#4B0082".parse::<Rgb>().unwrap(), Rgb::new(0x4b, 0, 0x82));
        assert!("4b0082".parse::<Rgb>().is_err());
        assert!("#4b00".parse::<Rgb>().is_err());
    }
}
