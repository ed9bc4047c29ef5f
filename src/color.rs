use anyhow::{bail, Context, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque RGB color, written as `#rrggbb` in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            bail!("color must look like #rrggbb, got {:?}", hex);
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .with_context(|| format!("invalid hex digits in color {:?}", hex))
        };

        Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Color of row `y` in a vertical gradient of `height` rows.
    ///
    /// Each channel is `start + (end - start) * y / height`, truncated, so row 0
    /// is exactly `start` and the last row lands just short of `end`.
    pub fn gradient_row(start: Color, end: Color, y: u32, height: u32) -> Color {
        if height == 0 {
            return start;
        }
        // Integer math keeps exact multiples exact; the result is never
        // negative, so flooring matches truncation
        let (y, h) = (y as i64, height as i64);
        let lerp = |a: u8, b: u8| {
            let (a, b) = (a as i64, b as i64);
            (a * h + (b - a) * y).div_euclid(h) as u8
        };
        Color::new(lerp(start.r, end.r), lerp(start.g, end.g), lerp(start.b, end.b))
    }

    /// Source-over compositing of `self` at `opacity` onto an opaque pixel
    pub fn over(self, dst: Color, opacity: f32) -> Color {
        let a = opacity.clamp(0.0, 1.0);
        if a >= 1.0 {
            return self;
        }
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
        Color::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    pub fn from_rgb(px: Rgb<u8>) -> Self {
        let Rgb([r, g, b]) = px;
        Color::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_palette_colors() {
        assert_eq!(Color::from_hex("#6366f1").unwrap(), Color::new(0x63, 0x66, 0xf1));
        assert_eq!(Color::from_hex("ffffff").unwrap(), Color::new(255, 255, 255));
        assert_eq!(Color::from_hex("#9E9E9E").unwrap(), Color::new(0x9e, 0x9e, 0x9e));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#é12345").is_err());
    }

    #[test]
    fn test_display_round_trips_through_hex() {
        let color = Color::new(0x4f, 0x46, 0xe5);
        assert_eq!(color.to_string(), "#4f46e5");
        assert_eq!(Color::from_hex(&color.to_string()).unwrap(), color);
    }

    #[test]
    fn test_gradient_first_row_is_start() {
        let start = Color::new(79, 70, 229);
        let end = Color::new(129, 140, 248);
        assert_eq!(Color::gradient_row(start, end, 0, 192), start);
    }

    #[test]
    fn test_gradient_exact_multiples_stay_exact() {
        // 0 + 75 * 84 / 100 = 63 exactly
        let c = Color::gradient_row(Color::new(0, 0, 0), Color::new(75, 75, 75), 84, 100);
        assert_eq!(c, Color::new(63, 63, 63));
    }

    #[test]
    fn test_gradient_matches_integer_formula_everywhere() {
        for size in [100u32, 192, 300, 512] {
            for (a, b) in [(0u8, 75u8), (100, 0), (79, 129), (229, 248), (255, 1)] {
                for y in 0..size {
                    // Multiply before dividing, then truncate the whole value
                    let delta = (b as f64 - a as f64) * y as f64;
                    let expected = (a as f64 + delta / size as f64) as u8;
                    let c = Color::gradient_row(Color::new(a, a, a), Color::new(b, b, b), y, size);
                    assert_eq!(c.r, expected, "{}->{} at row {} of {}", a, b, y, size);
                }
            }
        }
    }

    #[test]
    fn test_gradient_truncates() {
        // 0 + 255 * 1 / 2 = 127.5 -> 127
        let c = Color::gradient_row(Color::new(0, 0, 0), Color::new(255, 255, 255), 1, 2);
        assert_eq!(c, Color::new(127, 127, 127));

        // Descending channels truncate too: 200 - 100 * 1 / 3 = 166.67 -> 166
        let c = Color::gradient_row(Color::new(200, 200, 200), Color::new(100, 100, 100), 1, 3);
        assert_eq!(c, Color::new(166, 166, 166));
    }

    #[test]
    fn test_over_full_and_zero_opacity() {
        let white = Color::new(255, 255, 255);
        let bg = Color::new(99, 102, 241);
        assert_eq!(white.over(bg, 1.0), white);
        assert_eq!(white.over(bg, 0.0), bg);
    }

    #[test]
    fn test_over_half_opacity() {
        let c = Color::new(255, 255, 255).over(Color::new(1, 1, 1), 0.5);
        assert_eq!(c, Color::new(128, 128, 128));
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let screen = Color::new(224, 224, 224);
        let yaml = serde_yaml::to_string(&screen).unwrap();
        assert!(yaml.contains("#e0e0e0"));
        assert_eq!(serde_yaml::from_str::<Color>(&yaml).unwrap(), screen);

        let parsed: Color = serde_yaml::from_str("\"#6366f1\"").unwrap();
        assert_eq!(parsed, Color::new(0x63, 0x66, 0xf1));
        assert!(serde_yaml::from_str::<Color>("\"purple\"").is_err());
    }
}
