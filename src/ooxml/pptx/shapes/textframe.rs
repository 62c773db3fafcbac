//! Text frames, paragraphs and portions (runs).

use crate::common::RGBColor;
use crate::ooxml::error::Result;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::shapes::base::Shape;
use crate::ooxml::pptx::style::{self, FontColor, IndentLevel, TextAlignment};

/// A text frame (`p:txBody`) containing paragraphs.
///
/// # Examples
///
/// ```rust,no_run
/// use slidecascade::ooxml::pptx::Package;
///
/// let pkg = Package::open("presentation.pptx")?;
/// let pres = pkg.presentation()?;
/// for slide in pres.slides()? {
///     for shape in slide.shapes() {
///         let Some(frame) = shape.text_frame() else { continue };
///         for para in frame.paragraphs() {
///             println!("{:?} {}", para.alignment()?, para.text());
///         }
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct TextFrame<'a> {
    shape: Shape<'a>,
    element: &'a XmlElement,
}

impl<'a> TextFrame<'a> {
    pub(crate) fn new(shape: Shape<'a>, element: &'a XmlElement) -> Self {
        Self { shape, element }
    }

    #[inline]
    pub fn shape(&self) -> &Shape<'a> {
        &self.shape
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    pub fn paragraphs(&self) -> Vec<Paragraph<'a>> {
        let shape = self.shape;
        self.element
            .children_named("p")
            .map(|element| Paragraph { shape, element })
            .collect()
    }

    /// All text, paragraphs separated by newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A paragraph (`a:p`).
#[derive(Clone, Copy)]
pub struct Paragraph<'a> {
    shape: Shape<'a>,
    element: &'a XmlElement,
}

impl<'a> Paragraph<'a> {
    #[inline]
    pub fn shape(&self) -> &Shape<'a> {
        &self.shape
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// `a:pPr`, if present.
    pub fn properties(&self) -> Option<&'a XmlElement> {
        self.element.child("pPr")
    }

    /// End-of-paragraph run properties, used when there are no runs.
    pub fn end_properties(&self) -> Option<&'a XmlElement> {
        self.element.child("endParaRPr")
    }

    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in self.element.children() {
            match child.local_name() {
                "r" | "fld" => {
                    if let Some(t) = child.child("t") {
                        text.push_str(&t.text());
                    }
                },
                // Soft line break
                "br" => text.push('\u{000B}'),
                _ => {},
            }
        }
        text
    }

    /// Indent level from `a:pPr/@lvl`; level 1 when absent.
    pub fn indent_level(&self) -> IndentLevel {
        self.properties()
            .and_then(|p| p.attr("lvl"))
            .and_then(|lvl| atoi_simd::parse::<u8, false, false>(lvl.as_bytes()).ok())
            .map(IndentLevel::from_stored)
            .unwrap_or_default()
    }

    /// Text runs and fields.
    pub fn portions(&self) -> Vec<Portion<'a>> {
        let paragraph = *self;
        self.element
            .children()
            .filter(|e| e.is("r") || e.is("fld"))
            .map(|element| Portion { paragraph, element })
            .collect()
    }

    /// Effective alignment, Left when nothing in the cascade sets one.
    pub fn alignment(&self) -> Result<TextAlignment> {
        style::resolve_alignment(self)
    }

    /// Effective size in points of the first portion, or of the paragraph
    /// end mark when the paragraph has no runs.
    pub fn font_size(&self) -> Result<Option<f64>> {
        let portions = self.portions();
        style::resolve_font_size(self, portions.first(), self.indent_level())
    }

    /// Effective left margin in EMU.
    pub fn left_margin(&self) -> Result<Option<i64>> {
        style::resolve_left_margin(self)
    }
}

/// A text run (`a:r`) or field (`a:fld`) of a paragraph.
#[derive(Clone, Copy)]
pub struct Portion<'a> {
    paragraph: Paragraph<'a>,
    element: &'a XmlElement,
}

impl<'a> Portion<'a> {
    #[inline]
    pub fn paragraph(&self) -> &Paragraph<'a> {
        &self.paragraph
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// `a:rPr`, if present.
    pub fn properties(&self) -> Option<&'a XmlElement> {
        self.element.child("rPr")
    }

    pub fn text(&self) -> String {
        self.element.child("t").map(XmlElement::text).unwrap_or_default()
    }

    /// Effective size in points.
    pub fn font_size(&self) -> Result<Option<f64>> {
        style::resolve_font_size(&self.paragraph, Some(self), self.paragraph.indent_level())
    }

    /// Effective fill color as written in the cascade.
    pub fn font_color(&self) -> Result<Option<FontColor>> {
        style::resolve_font_color(self)
    }

    /// Effective fill color with scheme colors resolved through the theme.
    pub fn rgb_color(&self) -> Result<Option<RGBColor>> {
        style::resolve_rgb_color(self)
    }

    pub fn is_bold(&self) -> Result<bool> {
        style::resolve_bold(self)
    }

    /// Effective latin typeface, theme font references resolved.
    pub fn latin_font(&self) -> Result<Option<String>> {
        style::resolve_latin_font(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::testing::PptxFixture;

    #[test]
    fn test_paragraphs_and_portions() {
        let body = r#"<a:p><a:pPr lvl="2"/><a:r><a:t>Bold</a:t></a:r><a:r><a:t> text</a:t></a:r><a:br/><a:fld id="{1}" type="slidenum"><a:t>3</a:t></a:fld></a:p>
                      <a:p><a:endParaRPr lang="en-US"/></a:p>"#;
        let package = PptxFixture::new()
            .slide_shapes(&PptxFixture::shape(2, "Box", None, body))
            .open();
        let presentation = package.presentation().unwrap();
        let slide = presentation.slides().unwrap().remove(0);
        let frame = slide.shapes()[0].text_frame().unwrap();

        let paragraphs = frame.paragraphs();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text(), "Bold text\u{000B}3");
        assert_eq!(paragraphs[0].indent_level().get(), 3);
        assert_eq!(paragraphs[1].indent_level().get(), 1);
        assert!(paragraphs[1].end_properties().is_some());

        let portions = paragraphs[0].portions();
        assert_eq!(portions.len(), 3);
        assert_eq!(portions[1].text(), " text");
        assert_eq!(portions[2].text(), "3");
        assert!(paragraphs[1].portions().is_empty());

        assert_eq!(frame.text(), "Bold text\u{000B}3\n");
    }
}
