//! XML element tree shared by every part of a package.

pub mod element;

pub use element::{Descendants, XmlElement, XmlNode};
