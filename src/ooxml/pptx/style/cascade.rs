//! The inheritance chain a shape's text properties are looked up along.
use log::trace;

use crate::ooxml::error::Result;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::placeholder::{MasterStyle, find_template};
use crate::ooxml::pptx::shapes::{Shape, ShapeTree, TreeKind};
use crate::ooxml::pptx::style::text::IndentLevel;

/// Where in the chain a value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// `a:lstStyle` of the shape itself
    ShapeListStyle,
    /// `a:lstStyle` of the matching layout placeholder
    LayoutTemplate,
    /// `a:lstStyle` of the matching master placeholder
    MasterTemplate,
    /// Title, body or other style of the master's `p:txStyles`
    MasterTextStyle,
}

/// Templates of one shape, found afresh from the current part contents.
///
/// A chain is built per resolution and never cached, so edits to a layout
/// or master are seen by the next lookup.
#[derive(Clone, Copy)]
pub struct TemplateChain<'a> {
    shape: Shape<'a>,
    layout_template: Option<Shape<'a>>,
    master_template: Option<Shape<'a>>,
    master: Option<ShapeTree<'a>>,
    master_style: MasterStyle,
}

impl<'a> TemplateChain<'a> {
    pub fn build(shape: Shape<'a>) -> Result<Self> {
        let tree = *shape.tree();
        let (layout, master) = match tree.kind() {
            TreeKind::Slide => {
                let layout = tree.layout()?;
                let master = match layout {
                    Some(layout) => layout.master()?,
                    None => None,
                };
                (layout, master)
            },
            TreeKind::Layout => (None, tree.master()?),
            TreeKind::Master => (None, Some(tree)),
        };

        let descriptor = shape.placeholder();
        let master_style = descriptor.map_or(MasterStyle::Other, |d| d.master_style());

        let mut layout_template = None;
        let mut master_template = None;
        if let Some(descriptor) = descriptor {
            layout_template = layout.and_then(|l| find_template(&descriptor, l.shapes()));
            if tree.kind() != TreeKind::Master {
                master_template = master.and_then(|m| find_template(&descriptor, m.shapes()));
            }
        }

        Ok(Self {
            shape,
            layout_template,
            master_template,
            master,
            master_style,
        })
    }

    #[inline]
    pub fn shape(&self) -> &Shape<'a> {
        &self.shape
    }

    #[inline]
    pub fn layout_template(&self) -> Option<&Shape<'a>> {
        self.layout_template.as_ref()
    }

    #[inline]
    pub fn master_template(&self) -> Option<&Shape<'a>> {
        self.master_template.as_ref()
    }

    #[inline]
    pub fn master(&self) -> Option<&ShapeTree<'a>> {
        self.master.as_ref()
    }

    #[inline]
    pub fn master_style(&self) -> MasterStyle {
        self.master_style
    }

    /// The level-keyed styles of each tier, in lookup order.
    pub fn list_styles(&self) -> [(Tier, Option<&'a XmlElement>); 4] {
        let text_style = self
            .master
            .and_then(|m| m.text_styles())
            .and_then(|styles| styles.child(self.master_style.element_name()));
        [
            (Tier::ShapeListStyle, self.shape.list_style()),
            (Tier::LayoutTemplate, self.layout_template.and_then(|t| t.list_style())),
            (Tier::MasterTemplate, self.master_template.and_then(|t| t.list_style())),
            (Tier::MasterTextStyle, text_style),
        ]
    }

    /// First value along the chain: `local` when set, otherwise what `read`
    /// finds in the `a:lvl{n}pPr` element of the first tier that defines it.
    ///
    /// A level element that lacks the property is a miss for that tier; the
    /// lookup moves on to the next tier, never to another level.
    pub fn resolve<T, F>(&self, level: IndentLevel, local: Option<T>, read: F) -> Option<T>
    where
        F: Fn(&'a XmlElement) -> Option<T>,
    {
        if local.is_some() {
            return local;
        }
        let name = level.list_style_name();
        self.list_styles().into_iter().find_map(|(tier, style)| {
            let value = read(style?.child(name)?)?;
            trace!("{} level {} resolved by {:?}", self.shape.name(), level, tier);
            Some(value)
        })
    }

    /// Which tier would answer `read`, for diagnostics.
    pub fn resolving_tier<T, F>(&self, level: IndentLevel, read: F) -> Option<Tier>
    where
        F: Fn(&'a XmlElement) -> Option<T>,
    {
        let name = level.list_style_name();
        self.list_styles()
            .into_iter()
            .find(|(_, style)| style.and_then(|s| s.child(name)).and_then(&read).is_some())
            .map(|(tier, _)| tier)
    }
}
