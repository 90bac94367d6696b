//! Temperature to color mapping.
//!
//! Colors come from the 11-class RdYlBu diverging scheme, interpolated with a
//! uniform cubic B-spline per RGB channel. The scale is reversed so that the
//! cold end of the domain is blue and the hot end is red.

use crate::scale::LinearScale;
use serde::{Deserialize, Serialize};
use std::fmt;
use tmx_utils::numbers::round_half_up;

/// Fixed temperature domain in Celsius, independent of the data loaded.
pub const TEMPERATURE_DOMAIN: (f64, f64) = (0.0, 40.0);

/// RdYlBu anchors, red first.
const RD_YL_BU: [Rgb; 11] = [
    Rgb::new(0xa5, 0x00, 0x26),
    Rgb::new(0xd7, 0x30, 0x27),
    Rgb::new(0xf4, 0x6d, 0x43),
    Rgb::new(0xfd, 0xae, 0x61),
    Rgb::new(0xfe, 0xe0, 0x90),
    Rgb::new(0xff, 0xff, 0xbf),
    Rgb::new(0xe0, 0xf3, 0xf8),
    Rgb::new(0xab, 0xd9, 0xe9),
    Rgb::new(0x74, 0xad, 0xd1),
    Rgb::new(0x45, 0x75, 0xb4),
    Rgb::new(0x31, 0x36, 0x95),
];

/// An opaque sRGB color, written as `#rrggbb`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Largest per-channel difference from `other`.
    pub fn distance(&self, other: &Rgb) -> u8 {
        [
            self.r.abs_diff(other.r),
            self.g.abs_diff(other.g),
            self.b.abs_diff(other.b),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value).ok_or_else(|| format!("invalid color `{value}`, expected #rrggbb"))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Maps temperatures in [`TEMPERATURE_DOMAIN`] onto the cold-to-hot palette.
/// Inputs outside the domain take the color of the nearest end.
///
/// Both cell fills and the legend gradient sample this one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    position: LinearScale,
}

impl ColorScale {
    pub fn new(domain: (f64, f64)) -> Self {
        // hot end first: position 0 is red, 1 is blue
        ColorScale {
            position: LinearScale::new((domain.1, domain.0), (0.0, 1.0)).clamped(),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        let (hot, cold) = self.position.domain();
        (cold, hot)
    }

    /// Position along the palette, 0 = hottest, 1 = coldest.
    pub fn palette_position(&self, temperature: f64) -> f64 {
        self.position.apply(temperature)
    }

    pub fn color_for(&self, temperature: f64) -> Rgb {
        interpolate_rd_yl_bu(self.palette_position(temperature))
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        ColorScale::new(TEMPERATURE_DOMAIN)
    }
}

/// Sample the RdYlBu scheme at `t` in [0, 1] (0 = red, 1 = blue).
pub fn interpolate_rd_yl_bu(t: f64) -> Rgb {
    let channel = |pick: fn(&Rgb) -> u8| {
        let values: [f64; 11] = RD_YL_BU.map(|c| f64::from(pick(&c)));
        let v = basis_spline(&values, t);
        round_half_up(v).clamp(0.0, 255.0) as u8
    };
    Rgb::new(
        channel(|c: &Rgb| c.r),
        channel(|c: &Rgb| c.g),
        channel(|c: &Rgb| c.b),
    )
}

/// Uniform cubic B-spline through `values`, with the end segments extended
/// linearly so that t = 0 and t = 1 hit the first and last values exactly.
fn basis_spline(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (t, i) = if t <= 0.0 {
        (0.0, 0)
    } else if t >= 1.0 {
        (1.0, n - 1)
    } else {
        (t, (t * n as f64).floor() as usize)
    };
    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };
    basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3)
}

fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

#[cfg(test)]
mod tests {
    use super::{interpolate_rd_yl_bu, ColorScale, Rgb};

    #[test]
    fn test_endpoints() {
        let scale = ColorScale::default();
        assert_eq!(scale.color_for(0.0), Rgb::new(0x31, 0x36, 0x95));
        assert_eq!(scale.color_for(40.0), Rgb::new(0xa5, 0x00, 0x26));
        assert_eq!(scale.color_for(20.0), Rgb::new(250, 248, 193));
    }

    #[test]
    fn test_clamped_outside_domain() {
        let scale = ColorScale::default();
        assert_eq!(scale.color_for(-5.0), scale.color_for(0.0));
        assert_eq!(scale.color_for(45.0), scale.color_for(40.0));
        assert_eq!(scale.palette_position(-5.0), 1.0);
        assert_eq!(scale.palette_position(45.0), 0.0);
    }

    #[test]
    fn test_mid_temperature_between_ends() {
        let scale = ColorScale::default();
        let warmth = |c: Rgb| i32::from(c.r) - i32::from(c.b);
        let cold = warmth(scale.color_for(0.0));
        let mid = warmth(scale.color_for(20.0));
        let hot = warmth(scale.color_for(40.0));
        assert!(cold < mid && mid < hot);

        let position = |t: f64| scale.palette_position(t);
        assert!(position(0.0) > position(20.0) && position(20.0) > position(40.0));
    }

    #[test]
    fn test_palette_position_monotonic() {
        let scale = ColorScale::default();
        let positions: Vec<f64> = (0..=40).map(|t| scale.palette_position(f64::from(t))).collect();
        assert!(positions.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_interpolation_passes_known_samples() {
        assert_eq!(interpolate_rd_yl_bu(0.75), Rgb::new(144, 194, 221));
        assert_eq!(interpolate_rd_yl_bu(0.25), Rgb::new(248, 141, 82));
    }

    #[test]
    fn test_hex_round_trip() {
        let color = Rgb::new(0xf3, 0xf4, 0xf6);
        assert_eq!(color.to_string(), "#f3f4f6");
        assert_eq!(Rgb::from_hex("#f3f4f6"), Some(color));
        assert_eq!(Rgb::from_hex("16a34a"), Some(Rgb::new(0x16, 0xa3, 0x4a)));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#zz0000"), None);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(6, 182, 212)).unwrap();
        assert_eq!(json, "\"#06b6d4\"");
        let parsed: Rgb = serde_json::from_str("\"#06b6d4\"").unwrap();
        assert_eq!(parsed, Rgb::new(6, 182, 212));
        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }
}
