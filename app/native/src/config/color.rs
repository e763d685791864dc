//! Color values used in the configuration.

use serde::Serialize;

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 is opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black, the default overlay background.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Creates an opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }

    /// Formats the color as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    #[must_use]
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Rgba {
    fn default() -> Self { Self::BLACK }
}

/// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
///
/// # Errors
///
/// Returns a message describing why the string is not a valid hex color.
pub fn parse_hex_color(value: &str) -> Result<Rgba, String> {
    let hex = value.trim().trim_start_matches('#');

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color `{value}`: non-hex characters"));
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|e| format!("invalid hex color `{value}`: {e}"));

    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..=i].repeat(2));
            Ok(Rgba::opaque(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Ok(Rgba::opaque(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        8 => Ok(Rgba {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
            a: channel(&hex[6..8])?,
        }),
        len => Err(format!("invalid hex color `{value}`: expected 3, 6 or 8 digits, got {len}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digits() {
        assert_eq!(parse_hex_color("#1E1E2E"), Ok(Rgba::opaque(0x1E, 0x1E, 0x2E)));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(parse_hex_color("#fff"), Ok(Rgba::opaque(255, 255, 255)));
        assert_eq!(parse_hex_color("000"), Ok(Rgba::BLACK));
    }

    #[test]
    fn test_parse_with_alpha() {
        let color = parse_hex_color("#00000080").unwrap();
        assert_eq!(color.a, 0x80);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_to_hex_round_trips_opaque_and_translucent() {
        assert_eq!(Rgba::opaque(255, 0, 16).to_hex(), "#FF0010");
        let translucent = Rgba { r: 0, g: 0, b: 0, a: 0x80 };
        assert_eq!(translucent.to_hex(), "#00000080");
    }
}
