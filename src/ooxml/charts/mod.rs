//! Chart data binding.
//!
//! Chart series in a presentation reference their data twice: as a cache of
//! the values last computed by the authoring application, and as a cell-range
//! formula into a workbook embedded next to the chart. This module reads
//! both.
//!
//! - [`formula`]: cell-range formulas to ordered cell addresses
//! - [`workbook`]: the embedded spreadsheet, as sheet name to cell text
//! - [`workbook_cache`]: each embedded workbook opened once per presentation
//! - [`binder`]: cache-first resolution of numeric and text references
//! - [`chart`]: charts, their type, title and series
//!
//! # Example
//!
//! ```rust,no_run
//! use slidecascade::ooxml::pptx::Package;
//!
//! let pkg = Package::open("deck.pptx")?;
//! let pres = pkg.presentation()?;
//! for slide in pres.slides()? {
//!     for shape in slide.shapes() {
//!         if let Some(chart) = shape.chart()? {
//!             for series in chart.series() {
//!                 println!("{:?}: {:?}", series.name()?, series.values()?);
//!             }
//!         }
//!     }
//! }
//! # Ok::<(), slidecascade::ooxml::OoxmlError>(())
//! ```
pub mod binder;
pub mod chart;
pub mod formula;
pub mod workbook;
pub mod workbook_cache;

pub use binder::{CachedPoint, ChartDataBinder, ChartDataOptions, ValueSource};
pub use chart::{Chart, ChartSeries, ChartType};
pub use formula::{CellAddress, ParsedFormula, parse_cell_range, parse_formula};
pub use workbook::{EmbeddedWorkbook, Worksheet};
pub use workbook_cache::WorkbookCache;
