//! Office Open XML (OOXML) presentation packages.
//!
//! The module is organized into layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships)
//! 2. **XML Layer** (`oxml`): owned, editable element trees of XML parts
//! 3. **Presentations** (`pptx`): slides, shapes and text, with effective
//!    text properties resolved through layouts and masters
//! 4. **Charts** (`charts`): chart series bound to their cached values or to
//!    the workbook embedded next to the chart
//!
//! # Example
//!
//! ```rust,no_run
//! use slidecascade::ooxml::pptx::Package;
//!
//! let pkg = Package::open("presentation.pptx")?;
//! let pres = pkg.presentation()?;
//! println!("Presentation has {} slides", pres.slide_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod charts;
pub mod error;
pub mod opc;
pub mod oxml;
pub mod pptx;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
