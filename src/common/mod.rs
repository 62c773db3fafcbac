//! Small value types shared across the crate.
pub mod color;
pub mod unit;

pub use color::RGBColor;
