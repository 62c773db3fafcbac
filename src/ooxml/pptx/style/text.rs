//! Value types of text properties.
use std::fmt;

use phf::phf_map;

use crate::common::RGBColor;
use crate::ooxml::oxml::XmlElement;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlignment {
    /// Parse an `ST_TextAlignType` token.
    ///
    /// Distributed and low-justified text count as justified.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "l" => Some(TextAlignment::Left),
            "ctr" => Some(TextAlignment::Center),
            "r" => Some(TextAlignment::Right),
            "just" | "justLow" | "dist" | "thaiDist" => Some(TextAlignment::Justify),
            _ => None,
        }
    }
}

/// Paragraph indent level, 1 to 9.
///
/// Stored as zero-based `a:pPr/@lvl`; list styles name the levels
/// `a:lvl1pPr` to `a:lvl9pPr`.
///
/// ```rust
/// use slidecascade::ooxml::pptx::style::IndentLevel;
///
/// let level = IndentLevel::from_stored(1);
/// assert_eq!(level.get(), 2);
/// assert_eq!(level.list_style_name(), "lvl2pPr");
/// assert!(IndentLevel::new(10).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndentLevel(u8);

const LEVEL_NAMES: [&str; 9] = [
    "lvl1pPr", "lvl2pPr", "lvl3pPr", "lvl4pPr", "lvl5pPr", "lvl6pPr", "lvl7pPr", "lvl8pPr", "lvl9pPr",
];

impl IndentLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// From the zero-based stored value; out-of-range values clamp to level 9.
    pub fn from_stored(lvl: u8) -> Self {
        Self(lvl.saturating_add(1).min(Self::MAX))
    }

    #[inline]
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Local name of this level's element in a list style.
    pub fn list_style_name(&self) -> &'static str {
        LEVEL_NAMES[usize::from(self.0 - 1)]
    }
}

impl Default for IndentLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for IndentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A text fill color as written in a `a:solidFill`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontColor {
    /// `a:srgbClr`, or `a:sysClr` with its last computed value
    Rgb(RGBColor),
    /// `a:schemeClr`, a name resolved through the color map and theme
    Scheme(String),
    /// `a:prstClr`
    Preset(String),
}

static PRESET_COLORS: phf::Map<&'static str, RGBColor> = phf_map! {
    "black" => RGBColor::new(0x00, 0x00, 0x00),
    "white" => RGBColor::new(0xFF, 0xFF, 0xFF),
    "red" => RGBColor::new(0xFF, 0x00, 0x00),
    "green" => RGBColor::new(0x00, 0x80, 0x00),
    "lime" => RGBColor::new(0x00, 0xFF, 0x00),
    "blue" => RGBColor::new(0x00, 0x00, 0xFF),
    "yellow" => RGBColor::new(0xFF, 0xFF, 0x00),
    "cyan" => RGBColor::new(0x00, 0xFF, 0xFF),
    "magenta" => RGBColor::new(0xFF, 0x00, 0xFF),
    "gray" => RGBColor::new(0x80, 0x80, 0x80),
    "silver" => RGBColor::new(0xC0, 0xC0, 0xC0),
    "maroon" => RGBColor::new(0x80, 0x00, 0x00),
    "navy" => RGBColor::new(0x00, 0x00, 0x80),
    "olive" => RGBColor::new(0x80, 0x80, 0x00),
    "purple" => RGBColor::new(0x80, 0x00, 0x80),
    "teal" => RGBColor::new(0x00, 0x80, 0x80),
    "orange" => RGBColor::new(0xFF, 0xA5, 0x00),
};

impl FontColor {
    /// Color of a `a:solidFill` element.
    pub fn from_fill(fill: &XmlElement) -> Option<Self> {
        fill.children().find_map(|color| match color.local_name() {
            "srgbClr" => color.attr("val").and_then(RGBColor::from_hex).map(FontColor::Rgb),
            "sysClr" => color.attr("lastClr").and_then(RGBColor::from_hex).map(FontColor::Rgb),
            "schemeClr" => color.attr("val").map(|v| FontColor::Scheme(v.to_string())),
            "prstClr" => color.attr("val").map(|v| FontColor::Preset(v.to_string())),
            _ => None,
        })
    }

    /// RGB value of a preset color name, for the common names.
    pub fn preset_rgb(name: &str) -> Option<RGBColor> {
        PRESET_COLORS.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_tokens() {
        assert_eq!(TextAlignment::from_token("ctr"), Some(TextAlignment::Center));
        assert_eq!(TextAlignment::from_token("dist"), Some(TextAlignment::Justify));
        assert_eq!(TextAlignment::from_token("justLow"), Some(TextAlignment::Justify));
        assert_eq!(TextAlignment::from_token("center"), None);
        assert_eq!(TextAlignment::default(), TextAlignment::Left);
    }

    #[test]
    fn test_indent_level_bounds() {
        assert!(IndentLevel::new(0).is_none());
        assert_eq!(IndentLevel::new(9).map(|l| l.list_style_name()), Some("lvl9pPr"));
        assert_eq!(IndentLevel::from_stored(0), IndentLevel::default());
        assert_eq!(IndentLevel::from_stored(200).get(), 9);
    }

    #[test]
    fn test_fill_colors() {
        let fill = |xml: &str| FontColor::from_fill(&XmlElement::parse(xml.as_bytes()).unwrap());
        assert_eq!(
            fill(r#"<a:solidFill><a:srgbClr val="FF0000"><a:alpha val="50000"/></a:srgbClr></a:solidFill>"#),
            Some(FontColor::Rgb(RGBColor::new(0xFF, 0, 0)))
        );
        assert_eq!(
            fill(r#"<a:solidFill><a:schemeClr val="accent1"/></a:solidFill>"#),
            Some(FontColor::Scheme("accent1".to_string()))
        );
        assert_eq!(
            fill(r#"<a:solidFill><a:prstClr val="black"/></a:solidFill>"#),
            Some(FontColor::Preset("black".to_string()))
        );
        assert_eq!(fill(r#"<a:solidFill/>"#), None);
        assert_eq!(FontColor::preset_rgb("navy"), Some(RGBColor::new(0, 0, 0x80)));
        assert_eq!(FontColor::preset_rgb("unknownColor"), None);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_stored_level_is_one_based(lvl in 0u8..9) {
                let level = IndentLevel::from_stored(lvl);
                prop_assert_eq!(level.get(), lvl + 1);
                prop_assert_eq!(level.list_style_name(), format!("lvl{}pPr", lvl + 1));
            }
        }
    }
}
