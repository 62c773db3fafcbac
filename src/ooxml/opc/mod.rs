//! Open Packaging Convention (OPC) implementation.
//!
//! Reads the zip container of an Office Open XML package, maps content types
//! and walks the relationship graph into an in-memory set of parts.
//!
//! ```no_run
//! use slidecascade::ooxml::opc::OpcPackage;
//!
//! let package = OpcPackage::open("deck.pptx")?;
//! let main = package.main_document_part()?;
//! println!("{}", main.content_type());
//! # Ok::<(), slidecascade::ooxml::opc::OpcError>(())
//! ```
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod rel;

pub use error::{OpcError, Result};
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, PartFactory, XmlPart};
pub use rel::{Relationship, Relationships};
