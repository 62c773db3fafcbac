//! Main presentation object - the high-level API for working with presentations.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::Part;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::package::Package;
use crate::ooxml::pptx::shapes::{ShapeTree, TreeKind};
use crate::ooxml::pptx::slide::{Slide, SlideMaster};

/// A PowerPoint presentation.
///
/// Not intended to be constructed directly. Use `Package::presentation()` to
/// access a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use slidecascade::ooxml::pptx::Package;
///
/// let pkg = Package::open("presentation.pptx")?;
/// let pres = pkg.presentation()?;
///
/// if let Some((width, height)) = pres.slide_size() {
///     println!("Slide size: {}x{} EMUs", width, height);
/// }
///
/// for slide in pres.slides()? {
///     println!("Slide: {}", slide.text());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct Presentation<'a> {
    package: &'a Package,
    part: &'a dyn Part,
    root: &'a XmlElement,
}

impl<'a> Presentation<'a> {
    pub(crate) fn new(package: &'a Package) -> Result<Self> {
        let part = package.opc().main_document_part()?;
        let root = part.element().ok_or_else(|| {
            OoxmlError::InvalidFormat(format!("{} is not an XML part", part.partname()))
        })?;
        Ok(Self { package, part, root })
    }

    #[inline]
    pub fn package(&self) -> &'a Package {
        self.package
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    fn id_list(&self, list: &str, entry: &'static str) -> impl Iterator<Item = &'a XmlElement> {
        self.root
            .child(list)
            .into_iter()
            .flat_map(move |ids| ids.children_named(entry))
    }

    /// Resolve the `r:id` of each entry of an id list to a shape tree.
    fn trees(&self, list: &str, entry: &'static str, kind: TreeKind) -> Result<Vec<ShapeTree<'a>>> {
        let mut trees = Vec::new();
        for id in self.id_list(list, entry) {
            let Some(r_id) = id.attr("r:id") else {
                continue;
            };
            let part = self.package.opc().related_part(self.part, r_id)?;
            let tree = ShapeTree::from_part(self.package, part)?;
            if tree.kind() != kind {
                return Err(OoxmlError::InvalidRelationship(format!(
                    "{} in {} points at {}",
                    r_id,
                    list,
                    part.partname()
                )));
            }
            trees.push(tree);
        }
        Ok(trees)
    }

    /// Number of entries of `p:sldIdLst`.
    pub fn slide_count(&self) -> usize {
        self.id_list("sldIdLst", "sldId").count()
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> Result<Vec<Slide<'a>>> {
        Ok(self
            .trees("sldIdLst", "sldId", TreeKind::Slide)?
            .into_iter()
            .map(Slide::new)
            .collect())
    }

    pub fn slide(&self, index: usize) -> Result<Option<Slide<'a>>> {
        let Some(id) = self.id_list("sldIdLst", "sldId").nth(index) else {
            return Ok(None);
        };
        let Some(r_id) = id.attr("r:id") else {
            return Ok(None);
        };
        let part = self.package.opc().related_part(self.part, r_id)?;
        Ok(Some(Slide::new(ShapeTree::from_part(self.package, part)?)))
    }

    pub fn slide_masters(&self) -> Result<Vec<SlideMaster<'a>>> {
        Ok(self
            .trees("sldMasterIdLst", "sldMasterId", TreeKind::Master)?
            .into_iter()
            .map(SlideMaster::new)
            .collect())
    }

    /// Slide width and height in EMU, from `p:sldSz`.
    pub fn slide_size(&self) -> Option<(i64, i64)> {
        let size = self.root.child("sldSz")?;
        let dim = |name: &str| {
            size.attr(name)
                .and_then(|v| atoi_simd::parse::<i64, false, false>(v.as_bytes()).ok())
        };
        Some((dim("cx")?, dim("cy")?))
    }
}
