//! Package implementation for PowerPoint presentations.

use std::io::{Read, Seek};
use std::path::Path;

use crate::ooxml::charts::{ChartDataOptions, WorkbookCache};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::{OpcPackage, PackURI};
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::presentation::Presentation;

/// A PowerPoint (.pptx) package.
///
/// The package owns the parts of the presentation, the cache of workbooks
/// embedded behind its charts and the options used to read chart data. All
/// object-model views (`Presentation`, `Slide`, `Shape`, ...) borrow it.
///
/// The workbook cache lives and dies with the package and is not thread-safe;
/// a package is used from one thread at a time.
///
/// # Examples
///
/// ```rust,no_run
/// use slidecascade::ooxml::pptx::Package;
///
/// let pkg = Package::open("presentation.pptx")?;
/// let pres = pkg.presentation()?;
/// println!("Presentation has {} slides", pres.slide_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    opc: OpcPackage,
    workbooks: WorkbookCache,
    chart_options: ChartDataOptions,
}

impl Package {
    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .pptx package from a reader.
    ///
    /// ```rust,no_run
    /// use slidecascade::ooxml::pptx::Package;
    /// use std::io::Cursor;
    ///
    /// let data = std::fs::read("presentation.pptx")?;
    /// let pkg = Package::from_reader(Cursor::new(data))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(bytes)?)
    }

    /// Wrap an opened OPC package, checking that it holds a presentation.
    pub fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        // Regular and macro-enabled presentations
        let content_type = main_part.content_type();
        if content_type != ct::PML_PRESENTATION_MAIN && content_type != ct::PML_PRES_MACRO_MAIN {
            return Err(OoxmlError::InvalidContentType {
                expected: format!("{} or {}", ct::PML_PRESENTATION_MAIN, ct::PML_PRES_MACRO_MAIN),
                got: content_type.to_string(),
            });
        }

        Ok(Self {
            opc,
            workbooks: WorkbookCache::new(),
            chart_options: ChartDataOptions::default(),
        })
    }

    pub fn with_chart_options(mut self, options: ChartDataOptions) -> Self {
        self.chart_options = options;
        self
    }

    #[inline]
    pub fn chart_options(&self) -> &ChartDataOptions {
        &self.chart_options
    }

    /// Get the main presentation.
    pub fn presentation(&self) -> Result<Presentation<'_>> {
        Presentation::new(self)
    }

    #[inline]
    pub fn opc(&self) -> &OpcPackage {
        &self.opc
    }

    /// Mutable access to the parts.
    ///
    /// Views borrow the package immutably, so edits happen between reads and
    /// every later read observes them.
    #[inline]
    pub fn opc_mut(&mut self) -> &mut OpcPackage {
        &mut self.opc
    }

    #[inline]
    pub fn workbook_cache(&self) -> &WorkbookCache {
        &self.workbooks
    }

    /// Mutable root element of an XML part, e.g. `/ppt/slideLayouts/slideLayout1.xml`.
    pub fn part_element_mut(&mut self, partname: &str) -> Result<&mut XmlElement> {
        let partname = PackURI::new(partname)?;
        Ok(self.opc.part_element_mut(&partname)?)
    }
}
