use std::fmt;

/// RGB color, as stored in `a:srgbClr/@val`.
///
/// ```rust
/// use slidecascade::common::RGBColor;
///
/// let accent = RGBColor::from_hex("4472C4").unwrap();
/// assert_eq!(accent, RGBColor::new(0x44, 0x72, 0xC4));
/// assert_eq!(accent.to_string(), "#4472C4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGBColor {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RRGGBB`, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `RRGGBB` in upper case, without `#`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(RGBColor::from_hex("#ff8000"), Some(RGBColor::new(255, 128, 0)));
        assert_eq!(RGBColor::from_hex("FF80"), None);
        assert_eq!(RGBColor::from_hex("GG0000"), None);
        assert_eq!(RGBColor::from_hex("ÿÿÿ"), None);
    }
}
