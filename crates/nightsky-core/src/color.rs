//! RGBA colors in CSS notation.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not `rgba(..)`, `rgb(..)` or `#rrggbb`.
    #[error("unrecognized color format: {0:?}")]
    UnknownFormat(String),
    /// A component could not be parsed as a number.
    #[error("invalid color component: {0:?}")]
    BadComponent(String),
    /// A component parsed but lies outside its allowed range.
    #[error("color component out of range: {0:?}")]
    OutOfRange(String),
}

/// A color with 8-bit channels and a floating point alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 1.0);

    /// Create a color. Alpha is not clamped here; use [`Rgba::with_alpha`]
    /// when the value comes from an animation.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha channel substituted, clamped to `[0, 1]`.
    ///
    /// NaN is treated as fully transparent.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self { a, ..self }
    }

    /// Composite this color over an opaque background.
    ///
    /// Terminals have no alpha channel, so translucent particles are
    /// flattened against the sky color before being handed to ratatui.
    pub fn blend_over(self, background: Rgba) -> Color {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        Color::Rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorError::BadComponent(s.to_string()));
        }

        let (body, has_alpha) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(ColorError::UnknownFormat(s.to_string()));
        };

        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ColorError::UnknownFormat(s.to_string()))?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();

        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorError::UnknownFormat(s.to_string()));
        }

        let channel = |part: &str| -> Result<u8, ColorError> {
            let value: i64 = part
                .parse()
                .map_err(|_| ColorError::BadComponent(part.to_string()))?;
            u8::try_from(value).map_err(|_| ColorError::OutOfRange(part.to_string()))
        };

        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;
        let a = if has_alpha {
            let a: f32 = parts[3]
                .parse()
                .map_err(|_| ColorError::BadComponent(parts[3].to_string()))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(ColorError::OutOfRange(parts[3].to_string()));
            }
            a
        } else {
            1.0
        };

        Ok(Rgba::new(r, g, b, a))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok().map(|v| v * 17);

    match hex.len() {
        6 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, 1.0)),
        3 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, 1.0)),
        _ => None,
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgba() {
        let c: Rgba = "rgba(34, 211, 238, 0.6)".parse().unwrap();
        assert_eq!(c, Rgba::new(34, 211, 238, 0.6));
    }

    #[test]
    fn test_parse_rgb_and_hex() {
        assert_eq!("rgb(1,2,3)".parse::<Rgba>().unwrap(), Rgba::new(1, 2, 3, 1.0));
        assert_eq!(
            "#05060F".parse::<Rgba>().unwrap(),
            Rgba::new(5, 6, 15, 1.0)
        );
        assert_eq!("#fff".parse::<Rgba>().unwrap(), Rgba::new(255, 255, 255, 1.0));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "hsl(1, 2%, 3%)".parse::<Rgba>(),
            Err(ColorError::UnknownFormat(_))
        ));
        assert!(matches!(
            "rgba(300, 0, 0, 1)".parse::<Rgba>(),
            Err(ColorError::OutOfRange(_))
        ));
        assert!(matches!(
            "rgba(0, 0, 0, 1.5)".parse::<Rgba>(),
            Err(ColorError::OutOfRange(_))
        ));
        assert!(matches!(
            "rgba(a, 0, 0, 1)".parse::<Rgba>(),
            Err(ColorError::BadComponent(_))
        ));
        assert!(matches!(
            "rgba(0, 0, 0)".parse::<Rgba>(),
            Err(ColorError::UnknownFormat(_))
        ));
        assert!("#12345".parse::<Rgba>().is_err());
        assert!(matches!(
            "#+1+2+3".parse::<Rgba>(),
            Err(ColorError::BadComponent(_))
        ));
        assert!("#+ff".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_with_alpha_clamps() {
        let c = Rgba::new(255, 255, 255, 0.8);
        assert_eq!(c.with_alpha(0.25).a, 0.25);
        assert_eq!(c.with_alpha(1.7).a, 1.0);
        assert_eq!(c.with_alpha(-0.3).a, 0.0);
        assert_eq!(c.with_alpha(f32::NAN).a, 0.0);
    }

    #[test]
    fn test_display_matches_css() {
        assert_eq!(
            Rgba::new(255, 255, 255, 0.5).to_string(),
            "rgba(255, 255, 255, 0.5)"
        );
    }

    #[test]
    fn test_blend_over() {
        let white = Rgba::new(255, 255, 255, 0.5);
        assert_eq!(white.blend_over(Rgba::BLACK), Color::Rgb(128, 128, 128));
        assert_eq!(
            white.with_alpha(0.0).blend_over(Rgba::new(10, 20, 30, 1.0)),
            Color::Rgb(10, 20, 30)
        );
    }
}
