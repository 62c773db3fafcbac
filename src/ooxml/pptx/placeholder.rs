//! Placeholder descriptors and template lookup.
//!
//! A placeholder on a slide names the template it inherits from only through
//! its `p:ph` element: a type token, an index, or both. The descriptor is
//! decided once from that element and then compared against the placeholders
//! of the layout and master.
use phf::phf_map;

use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::shapes::Shape;

/// `ST_PlaceholderType` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderType {
    Title,
    CenteredTitle,
    SubTitle,
    Body,
    Object,
    Chart,
    Table,
    ClipArt,
    Diagram,
    Media,
    Picture,
    SlideImage,
    SlideNumber,
    Date,
    Footer,
    Header,
}

static PLACEHOLDER_TYPES: phf::Map<&'static str, PlaceholderType> = phf_map! {
    "title" => PlaceholderType::Title,
    "ctrTitle" => PlaceholderType::CenteredTitle,
    "subTitle" => PlaceholderType::SubTitle,
    "body" => PlaceholderType::Body,
    "obj" => PlaceholderType::Object,
    "chart" => PlaceholderType::Chart,
    "tbl" => PlaceholderType::Table,
    "clipArt" => PlaceholderType::ClipArt,
    "dgm" => PlaceholderType::Diagram,
    "media" => PlaceholderType::Media,
    "pic" => PlaceholderType::Picture,
    "sldImg" => PlaceholderType::SlideImage,
    "sldNum" => PlaceholderType::SlideNumber,
    "dt" => PlaceholderType::Date,
    "ftr" => PlaceholderType::Footer,
    "hdr" => PlaceholderType::Header,
};

impl PlaceholderType {
    pub fn from_token(token: &str) -> Option<Self> {
        PLACEHOLDER_TYPES.get(token).copied()
    }

    pub fn token(&self) -> &'static str {
        match self {
            PlaceholderType::Title => "title",
            PlaceholderType::CenteredTitle => "ctrTitle",
            PlaceholderType::SubTitle => "subTitle",
            PlaceholderType::Body => "body",
            PlaceholderType::Object => "obj",
            PlaceholderType::Chart => "chart",
            PlaceholderType::Table => "tbl",
            PlaceholderType::ClipArt => "clipArt",
            PlaceholderType::Diagram => "dgm",
            PlaceholderType::Media => "media",
            PlaceholderType::Picture => "pic",
            PlaceholderType::SlideImage => "sldImg",
            PlaceholderType::SlideNumber => "sldNum",
            PlaceholderType::Date => "dt",
            PlaceholderType::Footer => "ftr",
            PlaceholderType::Header => "hdr",
        }
    }
}

/// How a placeholder finds its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderCategory {
    /// `title` and `ctrTitle`
    Title,
    /// `body`
    Body,
    /// Any other explicit type
    Other,
    /// No type token; matched by index alone
    Custom(u32),
}

/// Which of the master's text styles (`p:txStyles`) applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MasterStyle {
    Title,
    Body,
    Other,
}

impl MasterStyle {
    /// Local name of the style element inside `p:txStyles`.
    pub fn element_name(&self) -> &'static str {
        match self {
            MasterStyle::Title => "titleStyle",
            MasterStyle::Body => "bodyStyle",
            MasterStyle::Other => "otherStyle",
        }
    }
}

/// Identity of a placeholder, decided once from its `p:ph` element.
///
/// Equality is the template-matching rule: titles and centered titles are
/// the same placeholder, a body matches a body, any other typed placeholder
/// matches the same type, and untyped placeholders match on index only.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderDescriptor {
    pub category: PlaceholderCategory,
    pub explicit_type: Option<PlaceholderType>,
    pub index: Option<u32>,
}

impl PlaceholderDescriptor {
    pub fn from_ph(ph: &XmlElement) -> Self {
        let index = ph
            .attr("idx")
            .and_then(|idx| atoi_simd::parse::<u32, false, false>(idx.as_bytes()).ok());
        let Some(token) = ph.attr("type") else {
            return Self::custom(index.unwrap_or(0));
        };
        let explicit_type = PlaceholderType::from_token(token);
        let category = match explicit_type {
            Some(PlaceholderType::Title | PlaceholderType::CenteredTitle) => PlaceholderCategory::Title,
            Some(PlaceholderType::Body) => PlaceholderCategory::Body,
            _ => PlaceholderCategory::Other,
        };
        Self {
            category,
            explicit_type,
            index,
        }
    }

    pub fn of_type(explicit_type: PlaceholderType) -> Self {
        let category = match explicit_type {
            PlaceholderType::Title | PlaceholderType::CenteredTitle => PlaceholderCategory::Title,
            PlaceholderType::Body => PlaceholderCategory::Body,
            _ => PlaceholderCategory::Other,
        };
        Self {
            category,
            explicit_type: Some(explicit_type),
            index: None,
        }
    }

    pub fn custom(index: u32) -> Self {
        Self {
            category: PlaceholderCategory::Custom(index),
            explicit_type: None,
            index: Some(index),
        }
    }

    /// Same-placeholder test used for template lookup.
    pub fn matches(&self, other: &PlaceholderDescriptor) -> bool {
        match (self.category, other.category) {
            (PlaceholderCategory::Custom(a), PlaceholderCategory::Custom(b)) => a == b,
            (PlaceholderCategory::Title, PlaceholderCategory::Title) => true,
            (PlaceholderCategory::Body, PlaceholderCategory::Body) => true,
            (PlaceholderCategory::Other, PlaceholderCategory::Other) => {
                self.explicit_type == other.explicit_type
            }
            _ => false,
        }
    }

    pub fn master_style(&self) -> MasterStyle {
        match (self.category, self.explicit_type) {
            (PlaceholderCategory::Title, _) => MasterStyle::Title,
            (PlaceholderCategory::Body | PlaceholderCategory::Custom(_), _) => MasterStyle::Body,
            (_, Some(PlaceholderType::SubTitle | PlaceholderType::Object)) => MasterStyle::Body,
            _ => MasterStyle::Other,
        }
    }
}

impl PartialEq for PlaceholderDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for PlaceholderDescriptor {}

/// First placeholder among `candidates` that is the same placeholder as
/// `descriptor`. Non-placeholder shapes are skipped.
pub fn find_template<'a, I>(descriptor: &PlaceholderDescriptor, candidates: I) -> Option<Shape<'a>>
where
    I: IntoIterator<Item = Shape<'a>>,
{
    candidates
        .into_iter()
        .find(|shape| shape.placeholder().is_some_and(|d| d.matches(descriptor)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::testing::PptxFixture;

    fn ph(xml: &str) -> PlaceholderDescriptor {
        PlaceholderDescriptor::from_ph(&XmlElement::parse(xml.as_bytes()).unwrap())
    }

    #[test]
    fn test_category_derivation() {
        assert_eq!(ph(r#"<p:ph type="title"/>"#).category, PlaceholderCategory::Title);
        assert_eq!(ph(r#"<p:ph type="ctrTitle"/>"#).category, PlaceholderCategory::Title);
        assert_eq!(ph(r#"<p:ph type="body" idx="1"/>"#).category, PlaceholderCategory::Body);
        assert_eq!(ph(r#"<p:ph type="dt" sz="half" idx="10"/>"#).category, PlaceholderCategory::Other);
        assert_eq!(ph(r#"<p:ph idx="13"/>"#).category, PlaceholderCategory::Custom(13));
        assert_eq!(ph(r#"<p:ph/>"#).category, PlaceholderCategory::Custom(0));
        assert_eq!(ph(r#"<p:ph type="subTitle" idx="1"/>"#).explicit_type, Some(PlaceholderType::SubTitle));
    }

    #[test]
    fn test_title_and_centered_title_are_equal() {
        let title = PlaceholderDescriptor::of_type(PlaceholderType::Title);
        let centered = PlaceholderDescriptor::of_type(PlaceholderType::CenteredTitle);
        assert_eq!(title, centered);
        assert_eq!(centered, title);
    }

    #[test]
    fn test_custom_placeholders_match_on_index() {
        assert_eq!(PlaceholderDescriptor::custom(3), PlaceholderDescriptor::custom(3));
        assert_ne!(PlaceholderDescriptor::custom(3), PlaceholderDescriptor::custom(4));
    }

    #[test]
    fn test_title_never_matches_custom() {
        let title = PlaceholderDescriptor::of_type(PlaceholderType::Title);
        for idx in [0, 1, 13] {
            assert_ne!(title, PlaceholderDescriptor::custom(idx));
            assert_ne!(PlaceholderDescriptor::custom(idx), title);
        }
    }

    #[test]
    fn test_other_types_must_agree() {
        assert_eq!(ph(r#"<p:ph type="ftr" idx="11"/>"#), ph(r#"<p:ph type="ftr" idx="3"/>"#));
        assert_ne!(ph(r#"<p:ph type="ftr"/>"#), ph(r#"<p:ph type="dt"/>"#));
        assert_ne!(ph(r#"<p:ph type="body"/>"#), ph(r#"<p:ph type="subTitle"/>"#));
    }

    #[test]
    fn test_master_style_selection() {
        assert_eq!(ph(r#"<p:ph type="ctrTitle"/>"#).master_style(), MasterStyle::Title);
        assert_eq!(ph(r#"<p:ph type="body"/>"#).master_style(), MasterStyle::Body);
        assert_eq!(ph(r#"<p:ph idx="2"/>"#).master_style(), MasterStyle::Body);
        assert_eq!(ph(r#"<p:ph type="subTitle"/>"#).master_style(), MasterStyle::Body);
        assert_eq!(ph(r#"<p:ph type="sldNum"/>"#).master_style(), MasterStyle::Other);
    }

    #[test]
    fn test_find_template_in_layout() {
        let package = PptxFixture::new()
            .layout_shapes(&[
                PptxFixture::shape(1, "Logo", None, ""),
                PptxFixture::shape(2, "Title 1", Some(r#"<p:ph type="title"/>"#), ""),
                PptxFixture::shape(3, "Content 2", Some(r#"<p:ph idx="1"/>"#), ""),
                PptxFixture::shape(4, "Footer 3", Some(r#"<p:ph type="ftr" idx="11"/>"#), ""),
            ]
            .concat())
            .open();
        let presentation = package.presentation().unwrap();
        let layout = presentation.slides().unwrap()[0].layout().unwrap().unwrap();

        let find = |d: PlaceholderDescriptor| find_template(&d, layout.shapes()).map(|s| s.name());
        assert_eq!(find(PlaceholderDescriptor::of_type(PlaceholderType::CenteredTitle)), Some("Title 1"));
        assert_eq!(find(PlaceholderDescriptor::custom(1)), Some("Content 2"));
        assert_eq!(find(PlaceholderDescriptor::of_type(PlaceholderType::Footer)), Some("Footer 3"));
        assert_eq!(find(PlaceholderDescriptor::custom(7)), None);
        assert_eq!(find(PlaceholderDescriptor::of_type(PlaceholderType::Body)), None);
    }
}
