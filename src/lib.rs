//! SlideCascade - text style inheritance and chart data binding for `.pptx` files
//!
//! A PowerPoint paragraph rarely carries its own formatting. Alignment, size,
//! color and font are inherited from the slide's layout, the layout's master
//! and the master's text styles. This crate resolves those effective values
//! and reads chart series data from the cached values in the chart part or,
//! failing that, from the workbook embedded next to it.
//!
//! # Example: resolving paragraph formatting
//!
//! ```rust,no_run
//! use slidecascade::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("deck.pptx")?;
//! let pres = pkg.presentation()?;
//!
//! for slide in pres.slides()? {
//!     for shape in slide.shapes() {
//!         let Some(frame) = shape.text_frame() else { continue };
//!         for para in frame.paragraphs() {
//!             println!("{:?} {:?} {}", para.alignment()?, para.font_size()?, para.text());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example: reading chart series
//!
//! ```rust,no_run
//! use slidecascade::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("deck.pptx")?;
//! let pres = pkg.presentation()?;
//!
//! for slide in pres.slides()? {
//!     for shape in slide.shapes() {
//!         if let Some(chart) = shape.chart()? {
//!             for series in chart.series() {
//!                 println!("{:?}: {:?}", series.name()?, series.values()?);
//!             }
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Small value types shared across the format modules
pub mod common;

/// OOXML (Office Open XML) packages, PresentationML style resolution and
/// DrawingML chart data
pub mod ooxml;
