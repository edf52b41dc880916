use serde::Serialize;
use thiserror::Error;

/// Error returned by [`Color::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color literal must be #rrggbb or #rrggbbaa, got {0} digits")]
    Length(usize),
    #[error("invalid hex digit in color literal {0:?}")]
    Digit(String),
}

/// Straight-alpha sRGB color with channels in `[0, 1]`.
///
/// The layout output records what a backend should apply to an image or text
/// component; blending policy (premultiplication, linearization) belongs to
/// the backend that materializes the node.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates a color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Same color with the alpha channel replaced.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`. The leading `#` is optional and six
    /// digits imply an opaque color.
    pub fn from_hex(src: &str) -> Result<Self, ColorParseError> {
        let hex = src.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit(src.to_string()));
        }
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::Length(hex.len()));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ColorParseError::Digit(src.to_string()))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// `#rrggbbaa`, rounded to the nearest byte.
    pub fn to_hex(self) -> String {
        let b = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", b(self.r), b(self.g), b(self.b), b(self.a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_is_opaque() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn eight_digit_carries_alpha() {
        let c = Color::from_hex("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn hash_is_optional() {
        assert_eq!(Color::from_hex("ffffff").unwrap(), Color::WHITE);
    }

    #[test]
    fn hex_round_trips_through_bytes() {
        assert_eq!(Color::from_hex("#1a2b3c4d").unwrap().to_hex(), "#1a2b3c4d");
    }

    #[test]
    fn bad_length() {
        assert_eq!(Color::from_hex("#fff"), Err(ColorParseError::Length(3)));
    }

    #[test]
    fn bad_digit() {
        assert!(matches!(Color::from_hex("#gg0000"), Err(ColorParseError::Digit(_))));
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Color::WHITE.with_alpha(1.5).a, 1.0);
        assert_eq!(Color::WHITE.with_alpha(0.25).a, 0.25);
    }
}
