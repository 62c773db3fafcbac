//! Shape types for PowerPoint presentations.

pub mod base;
pub mod textframe;
pub mod tree;

pub use base::{Shape, ShapeType};
pub use textframe::{Paragraph, Portion, TextFrame};
pub use tree::{ShapeTree, TreeKind};
