//! Themes and color maps.
//!
//! A scheme color written in a text style (`a:schemeClr val="tx1"`) names a
//! slot of the master's color map, which in turn names a color of the
//! theme's color scheme.

use crate::common::RGBColor;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::Part;
use crate::ooxml::oxml::XmlElement;

/// Theme part (`/ppt/theme/themeN.xml`).
#[derive(Clone, Copy)]
pub struct Theme<'a> {
    root: &'a XmlElement,
}

impl<'a> Theme<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        let root = part.element().ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("{} is not an XML theme part", part.partname()))
        })?;
        Ok(Self { root })
    }

    pub fn new(root: &'a XmlElement) -> Self {
        Self { root }
    }

    /// Theme name, empty when absent.
    pub fn name(&self) -> &'a str {
        self.root.attr("name").unwrap_or("")
    }

    /// Color of a scheme slot (`dk1`, `lt1`, `accent1`, ...).
    ///
    /// System colors resolve to their last computed value (`@lastClr`).
    pub fn scheme_color(&self, slot: &str) -> Option<RGBColor> {
        let color = self.root.path(&["themeElements", "clrScheme", slot])?;
        color.children().find_map(|c| match c.local_name() {
            "srgbClr" => c.attr("val").and_then(RGBColor::from_hex),
            "sysClr" => c.attr("lastClr").and_then(RGBColor::from_hex),
            _ => None,
        })
    }

    /// Resolve a scheme color name through a color map.
    pub fn resolve_color(&self, color_map: &ColorMap<'_>, name: &str) -> Option<RGBColor> {
        self.scheme_color(color_map.map(name))
    }

    fn latin(&self, font: &str) -> Option<&'a str> {
        self.root
            .path(&["themeElements", "fontScheme", font, "latin"])
            .and_then(|latin| latin.attr("typeface"))
    }

    /// Latin typeface of the heading font.
    pub fn major_latin(&self) -> Option<&'a str> {
        self.latin("majorFont")
    }

    /// Latin typeface of the body font.
    pub fn minor_latin(&self) -> Option<&'a str> {
        self.latin("minorFont")
    }

    /// Resolve `+mj-lt` / `+mn-lt` references; other typefaces are returned as is.
    pub fn resolve_typeface(&self, typeface: &'a str) -> Option<&'a str> {
        match typeface {
            "+mj-lt" => self.major_latin(),
            "+mn-lt" => self.minor_latin(),
            other => Some(other),
        }
    }
}

/// A master's `p:clrMap`.
#[derive(Debug, Clone, Copy)]
pub struct ColorMap<'a> {
    element: Option<&'a XmlElement>,
}

impl<'a> ColorMap<'a> {
    pub fn new(element: Option<&'a XmlElement>) -> Self {
        Self { element }
    }

    /// Theme slot for a scheme color name.
    ///
    /// Without a map the usual mapping applies (`bg1` → `lt1`, `tx1` → `dk1`,
    /// `bg2` → `lt2`, `tx2` → `dk2`). Names the map does not mention, such as
    /// `accent1`, already are slots.
    pub fn map<'n>(&self, name: &'n str) -> &'n str
    where
        'a: 'n,
    {
        if let Some(slot) = self.element.and_then(|e| e.attr(name)) {
            return slot;
        }
        match name {
            "bg1" => "lt1",
            "tx1" => "dk1",
            "bg2" => "lt2",
            "tx2" => "dk2",
            other => other,
        }
    }
}
