//! Shapes of a shape tree.

use crate::ooxml::charts::{Chart, ChartDataBinder};
use crate::ooxml::error::Result;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::placeholder::PlaceholderDescriptor;
use crate::ooxml::pptx::shapes::textframe::TextFrame;
use crate::ooxml::pptx::shapes::tree::ShapeTree;
use crate::ooxml::pptx::style::TemplateChain;

/// Shape type enumeration.
///
/// Indicates what kind of shape this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// A text shape (p:sp)
    Shape,
    /// A picture shape (p:pic)
    Picture,
    /// A graphic frame containing a table or chart (p:graphicFrame)
    GraphicFrame,
    /// A group shape (p:grpSp)
    GroupShape,
    /// A connector shape (p:cxnSp)
    Connector,
}

impl ShapeType {
    pub(crate) fn from_element(element: &XmlElement) -> Option<Self> {
        match element.local_name() {
            "sp" => Some(ShapeType::Shape),
            "pic" => Some(ShapeType::Picture),
            "graphicFrame" => Some(ShapeType::GraphicFrame),
            "grpSp" => Some(ShapeType::GroupShape),
            "cxnSp" => Some(ShapeType::Connector),
            _ => None,
        }
    }
}

/// A shape on a slide, layout or master.
///
/// Shapes are cheap borrowed views over the part's element tree. Every
/// effective value is computed on access.
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
///         println!("{} ({:?})", shape.name(), shape.placeholder());
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct Shape<'a> {
    tree: ShapeTree<'a>,
    element: &'a XmlElement,
}

impl<'a> Shape<'a> {
    pub(crate) fn new(tree: ShapeTree<'a>, element: &'a XmlElement) -> Self {
        Self { tree, element }
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// The slide, layout or master this shape belongs to.
    #[inline]
    pub fn tree(&self) -> &ShapeTree<'a> {
        &self.tree
    }

    pub fn shape_type(&self) -> ShapeType {
        ShapeType::from_element(self.element).unwrap_or(ShapeType::Shape)
    }

    /// `p:nvSpPr`, `p:nvPicPr`, ... whichever the shape kind carries.
    fn non_visual(&self) -> Option<&'a XmlElement> {
        self.element.children().find(|e| e.local_name().starts_with("nv"))
    }

    fn c_nv_pr(&self) -> Option<&'a XmlElement> {
        self.non_visual().and_then(|nv| nv.child("cNvPr"))
    }

    pub fn id(&self) -> Option<u32> {
        self.c_nv_pr()
            .and_then(|c| c.attr("id"))
            .and_then(|id| atoi_simd::parse::<u32, false, false>(id.as_bytes()).ok())
    }

    /// Shape name from `cNvPr/@name`, empty when absent.
    pub fn name(&self) -> &'a str {
        self.c_nv_pr().and_then(|c| c.attr("name")).unwrap_or("")
    }

    /// Placeholder identity, if the shape is a placeholder.
    pub fn placeholder(&self) -> Option<PlaceholderDescriptor> {
        self.non_visual()
            .and_then(|nv| nv.path(&["nvPr", "ph"]))
            .map(PlaceholderDescriptor::from_ph)
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder().is_some()
    }

    pub fn text_frame(&self) -> Option<TextFrame<'a>> {
        self.element
            .child("txBody")
            .map(|body| TextFrame::new(*self, body))
    }

    /// The shape's own per-level defaults, `p:txBody/a:lstStyle`.
    pub fn list_style(&self) -> Option<&'a XmlElement> {
        self.element.path(&["txBody", "lstStyle"])
    }

    /// Members of a group shape; empty for every other kind.
    pub fn group_shapes(&self) -> Vec<Shape<'a>> {
        if self.shape_type() != ShapeType::GroupShape {
            return Vec::new();
        }
        let tree = self.tree;
        self.element
            .children()
            .filter(|e| ShapeType::from_element(e).is_some())
            .map(|element| Shape::new(tree, element))
            .collect()
    }

    /// The chart of a chart graphic frame.
    ///
    /// Returns `Ok(None)` when the shape does not hold a chart, and an error
    /// when it does but the chart part cannot be found.
    pub fn chart(&self) -> Result<Option<Chart<'a>>> {
        if self.shape_type() != ShapeType::GraphicFrame {
            return Ok(None);
        }
        let Some(r_id) = self
            .element
            .path(&["graphic", "graphicData", "chart"])
            .and_then(|chart| chart.attr("r:id"))
        else {
            return Ok(None);
        };

        let package = self.tree.package();
        let part = package.opc().related_part(self.tree.part(), r_id)?;
        let binder = ChartDataBinder::new(
            package.opc(),
            part,
            package.workbook_cache(),
            package.chart_options(),
        );
        Chart::new(part, binder).map(Some)
    }

    /// Inheritance chain of this shape as the parts stand now.
    pub fn template_chain(&self) -> Result<TemplateChain<'a>> {
        TemplateChain::build(*self)
    }

    /// All text of the shape, paragraphs separated by newlines.
    pub fn text(&self) -> String {
        self.text_frame().map(|tf| tf.text()).unwrap_or_default()
    }
}
