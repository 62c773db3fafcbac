//! Shape trees of slides, slide layouts and slide masters.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::Part;
use crate::ooxml::opc::constants::content_type as CT;
use crate::ooxml::opc::constants::relationship_type as RT;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::package::Package;
use crate::ooxml::pptx::shapes::base::{Shape, ShapeType};
use crate::ooxml::pptx::theme::{ColorMap, Theme};

/// Which kind of part a shape tree belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    Slide,
    Layout,
    Master,
}

impl TreeKind {
    fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            CT::PML_SLIDE => Some(TreeKind::Slide),
            CT::PML_SLIDE_LAYOUT => Some(TreeKind::Layout),
            CT::PML_SLIDE_MASTER => Some(TreeKind::Master),
            _ => None,
        }
    }
}

/// The `p:cSld` content of a slide, layout or master part.
///
/// A tree is a borrowed view: it holds no state of its own, so navigating
/// to the layout or master always reads the parts as they are now.
#[derive(Clone, Copy)]
pub struct ShapeTree<'a> {
    package: &'a Package,
    part: &'a dyn Part,
    root: &'a XmlElement,
    kind: TreeKind,
}

impl<'a> ShapeTree<'a> {
    /// View a slide, layout or master part, telling them apart by content type.
    pub fn from_part(package: &'a Package, part: &'a dyn Part) -> Result<Self> {
        let kind = TreeKind::from_content_type(part.content_type()).ok_or_else(|| {
            OoxmlError::InvalidContentType {
                expected: "slide, slide layout or slide master".to_string(),
                got: part.content_type().to_string(),
            }
        })?;
        let root = part.element().ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("{} is not an XML part", part.partname()))
        })?;
        Ok(Self {
            package,
            part,
            root,
            kind,
        })
    }

    #[inline]
    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    #[inline]
    pub fn package(&self) -> &'a Package {
        self.package
    }

    #[inline]
    pub fn root(&self) -> &'a XmlElement {
        self.root
    }

    /// `p:cSld/@name`, empty when absent.
    pub fn name(&self) -> &'a str {
        self.root
            .child("cSld")
            .and_then(|c_sld| c_sld.attr("name"))
            .unwrap_or("")
    }

    /// Top-level shapes of `p:spTree` in document order.
    pub fn shapes(&self) -> Vec<Shape<'a>> {
        let tree = *self;
        self.root
            .path(&["cSld", "spTree"])
            .into_iter()
            .flat_map(|sp_tree| sp_tree.children())
            .filter(|e| ShapeType::from_element(e).is_some())
            .map(|element| Shape::new(tree, element))
            .collect()
    }

    fn related(&self, reltype: &str, expected: TreeKind) -> Result<Option<ShapeTree<'a>>> {
        let Some(part) = self.package.opc().related_part_by_reltype(self.part, reltype)? else {
            return Ok(None);
        };
        let tree = ShapeTree::from_part(self.package, part)?;
        if tree.kind != expected {
            return Err(OoxmlError::InvalidRelationship(format!(
                "{} points at {} which is not a {:?}",
                self.part.partname(),
                part.partname(),
                expected
            )));
        }
        Ok(Some(tree))
    }

    /// The layout a slide is based on. Layouts and masters have none.
    pub fn layout(&self) -> Result<Option<ShapeTree<'a>>> {
        match self.kind {
            TreeKind::Slide => self.related(RT::SLIDE_LAYOUT, TreeKind::Layout),
            TreeKind::Layout | TreeKind::Master => Ok(None),
        }
    }

    /// The master a slide or layout descends from. A master is its own master.
    pub fn master(&self) -> Result<Option<ShapeTree<'a>>> {
        match self.kind {
            TreeKind::Slide => match self.layout()? {
                Some(layout) => layout.master(),
                None => Ok(None),
            },
            TreeKind::Layout => self.related(RT::SLIDE_MASTER, TreeKind::Master),
            TreeKind::Master => Ok(Some(*self)),
        }
    }

    /// `p:txStyles` of a master.
    pub fn text_styles(&self) -> Option<&'a XmlElement> {
        match self.kind {
            TreeKind::Master => self.root.child("txStyles"),
            _ => None,
        }
    }

    /// `p:clrMap` of a master. Slides and layouts only carry overrides.
    pub fn color_map(&self) -> ColorMap<'a> {
        match self.kind {
            TreeKind::Master => ColorMap::new(self.root.child("clrMap")),
            _ => ColorMap::new(None),
        }
    }

    /// Theme related to a master.
    pub fn theme(&self) -> Result<Option<Theme<'a>>> {
        if self.kind != TreeKind::Master {
            return Ok(None);
        }
        match self.package.opc().related_part_by_reltype(self.part, RT::THEME)? {
            Some(part) => Theme::from_part(part).map(Some),
            None => Ok(None),
        }
    }
}
