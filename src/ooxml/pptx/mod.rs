//! PowerPoint (.pptx) presentation support.
//!
//! - `Package`: the .pptx package, its embedded-workbook cache and chart options
//! - `Presentation`: slides and masters in presentation order
//! - `Slide`, `SlideLayout`, `SlideMaster`: shape trees linked by relationships
//! - `Shape` → `TextFrame` → `Paragraph` → `Portion`: text with effective
//!   properties resolved through [`style`]
//! - [`placeholder`]: which layout and master placeholder a shape inherits from
//!
//! # Example
//!
//! ```rust,no_run
//! use slidecascade::ooxml::pptx::Package;
//!
//! let package = Package::open("presentation.pptx")?;
//! let pres = package.presentation()?;
//!
//! for slide in pres.slides()? {
//!     for shape in slide.shapes() {
//!         let Some(frame) = shape.text_frame() else { continue };
//!         for para in frame.paragraphs() {
//!             println!("{:?} {:?} {}", para.alignment()?, para.font_size()?, para.text());
//!         }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod package;
pub mod placeholder;
pub mod presentation;
pub mod shapes;
pub mod slide;
pub mod style;
pub mod theme;

pub use package::Package;
pub use placeholder::{MasterStyle, PlaceholderCategory, PlaceholderDescriptor, PlaceholderType, find_template};
pub use presentation::Presentation;
pub use shapes::{Paragraph, Portion, Shape, ShapeTree, ShapeType, TextFrame, TreeKind};
pub use slide::{Slide, SlideLayout, SlideMaster};
pub use style::{FontColor, IndentLevel, TemplateChain, TextAlignment, Tier};
pub use theme::{ColorMap, Theme};
