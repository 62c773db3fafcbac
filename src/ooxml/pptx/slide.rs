//! Slide-related objects, including Slide, SlideLayout, and SlideMaster.

use crate::ooxml::error::Result;
use crate::ooxml::opc::Part;
use crate::ooxml::opc::constants::relationship_type as RT;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::shapes::{Shape, ShapeTree, TreeKind};
use crate::ooxml::pptx::theme::{ColorMap, Theme};

fn tree_text(tree: &ShapeTree<'_>) -> String {
    tree.shapes()
        .iter()
        .map(Shape::text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// A slide in a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use slidecascade::ooxml::pptx::Package;
///
/// let pkg = Package::open("presentation.pptx")?;
/// let pres = pkg.presentation()?;
///
/// for slide in pres.slides()?.iter() {
///     println!("Slide name: {}", slide.name());
///     println!("Text content: {}", slide.text());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct Slide<'a> {
    tree: ShapeTree<'a>,
}

impl<'a> Slide<'a> {
    pub(crate) fn new(tree: ShapeTree<'a>) -> Self {
        Self { tree }
    }

    #[inline]
    pub fn tree(&self) -> &ShapeTree<'a> {
        &self.tree
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.tree.part()
    }

    /// Slide name from `p:cSld/@name`.
    pub fn name(&self) -> &'a str {
        self.tree.name()
    }

    pub fn shapes(&self) -> Vec<Shape<'a>> {
        self.tree.shapes()
    }

    /// Text of every shape on the slide, one shape per line.
    pub fn text(&self) -> String {
        tree_text(&self.tree)
    }

    /// The layout this slide is based on.
    pub fn layout(&self) -> Result<Option<SlideLayout<'a>>> {
        Ok(self.tree.layout()?.map(|tree| SlideLayout { tree }))
    }
}

/// A slide layout.
#[derive(Clone, Copy)]
pub struct SlideLayout<'a> {
    tree: ShapeTree<'a>,
}

impl<'a> SlideLayout<'a> {
    #[inline]
    pub fn tree(&self) -> &ShapeTree<'a> {
        &self.tree
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.tree.part()
    }

    pub fn name(&self) -> &'a str {
        self.tree.name()
    }

    pub fn shapes(&self) -> Vec<Shape<'a>> {
        self.tree.shapes()
    }

    pub fn master(&self) -> Result<Option<SlideMaster<'a>>> {
        Ok(self.tree.master()?.map(|tree| SlideMaster { tree }))
    }
}

/// A slide master.
#[derive(Clone, Copy)]
pub struct SlideMaster<'a> {
    tree: ShapeTree<'a>,
}

impl<'a> SlideMaster<'a> {
    pub(crate) fn new(tree: ShapeTree<'a>) -> Self {
        Self { tree }
    }

    #[inline]
    pub fn tree(&self) -> &ShapeTree<'a> {
        &self.tree
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.tree.part()
    }

    pub fn name(&self) -> &'a str {
        self.tree.name()
    }

    pub fn shapes(&self) -> Vec<Shape<'a>> {
        self.tree.shapes()
    }

    /// Layouts of this master in relationship order.
    pub fn layouts(&self) -> Result<Vec<SlideLayout<'a>>> {
        let package = self.tree.package();
        let mut layouts = Vec::new();
        for rel in self.part().rels().all_with_reltype(RT::SLIDE_LAYOUT) {
            let part = package.opc().related_part(self.part(), rel.r_id())?;
            let tree = ShapeTree::from_part(package, part)?;
            if tree.kind() == TreeKind::Layout {
                layouts.push(SlideLayout { tree });
            }
        }
        Ok(layouts)
    }

    /// `p:txStyles`: title, body and other text styles.
    pub fn text_styles(&self) -> Option<&'a XmlElement> {
        self.tree.text_styles()
    }

    pub fn color_map(&self) -> ColorMap<'a> {
        self.tree.color_map()
    }

    pub fn theme(&self) -> Result<Option<Theme<'a>>> {
        self.tree.theme()
    }
}

#[cfg(test)]
mod tests {
    use crate::ooxml::testing::PptxFixture;

    #[test]
    fn test_slide_layout_master() {
        let package = PptxFixture::new()
            .slide_shapes(
                &[
                    PptxFixture::shape(2, "Title 1", Some(r#"<p:ph type="title"/>"#), "<a:p><a:r><a:t>Agenda</a:t></a:r></a:p>"),
                    PptxFixture::shape(3, "Empty", None, ""),
                    PptxFixture::shape(4, "Body", None, "<a:p><a:r><a:t>Item</a:t></a:r></a:p>"),
                ]
                .concat(),
            )
            .open();
        let presentation = package.presentation().unwrap();
        let slide = presentation.slides().unwrap().remove(0);
        assert_eq!(slide.name(), "");
        assert_eq!(slide.text(), "Agenda\nItem");

        let layout = slide.layout().unwrap().unwrap();
        assert_eq!(layout.name(), "Title and Content");
        let master = layout.master().unwrap().unwrap();
        assert_eq!(master.layouts().unwrap().len(), 1);
        assert!(master.text_styles().is_some());
        assert_eq!(master.theme().unwrap().unwrap().name(), "Office Theme");
        assert_eq!(master.color_map().map("tx1"), "dk1");
    }
}
