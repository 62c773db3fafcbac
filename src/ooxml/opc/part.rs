use std::borrow::Cow;

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::oxml::XmlElement;

/// A part in an OPC package: a partname, a content type, a payload and the
/// relationships that lead out of it.
pub trait Part {
    fn partname(&self) -> &PackURI;

    fn content_type(&self) -> &str;

    /// Serialized payload. XML parts are written from their (possibly edited)
    /// element tree.
    fn blob(&self) -> Cow<'_, [u8]>;

    fn rels(&self) -> &Relationships;

    fn rels_mut(&mut self) -> &mut Relationships;

    /// Parsed root element, for XML parts.
    fn element(&self) -> Option<&XmlElement> {
        None
    }

    fn element_mut(&mut self) -> Option<&mut XmlElement> {
        None
    }

    /// Target reference of one of this part's relationships.
    fn target_ref(&self, r_id: &str) -> Result<&str> {
        self.rels()
            .get(r_id)
            .map(|rel| rel.target_ref())
            .ok_or_else(|| OpcError::RelationshipNotFound(format!("{} in {}", r_id, self.partname())))
    }
}

/// Opaque binary part, e.g. an embedded workbook or an image.
#[derive(Debug)]
pub struct BlobPart {
    partname: PackURI,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl BlobPart {
    pub fn new(partname: PackURI, content_type: String, blob: Vec<u8>, rels: Relationships) -> Self {
        Self {
            partname,
            content_type,
            blob,
            rels,
        }
    }
}

impl Part for BlobPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.blob)
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// XML part held as a parsed, mutable element tree.
#[derive(Debug)]
pub struct XmlPart {
    partname: PackURI,
    content_type: String,
    element: XmlElement,
    rels: Relationships,
}

impl XmlPart {
    pub fn new(partname: PackURI, content_type: String, element: XmlElement, rels: Relationships) -> Self {
        Self {
            partname,
            content_type,
            element,
            rels,
        }
    }

    /// Parse raw part bytes into an XmlPart.
    pub fn load(partname: PackURI, content_type: String, xml: &[u8], rels: Relationships) -> Result<Self> {
        let element = XmlElement::parse(xml)
            .map_err(|e| OpcError::XmlError(format!("{}: {}", partname, e)))?;
        Ok(Self::new(partname, content_type, element, rels))
    }
}

impl Part for XmlPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.element.to_xml().into_bytes())
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    fn element(&self) -> Option<&XmlElement> {
        Some(&self.element)
    }

    fn element_mut(&mut self) -> Option<&mut XmlElement> {
        Some(&mut self.element)
    }
}

/// Chooses the part implementation from the content type.
pub struct PartFactory;

impl PartFactory {
    pub fn load(
        partname: PackURI,
        content_type: String,
        blob: Vec<u8>,
        rels: Relationships,
    ) -> Result<Box<dyn Part>> {
        if content_type.ends_with("+xml") || content_type.ends_with("/xml") {
            Ok(Box::new(XmlPart::load(partname, content_type, &blob, rels)?))
        } else {
            Ok(Box::new(BlobPart::new(partname, content_type, blob, rels)))
        }
    }
}
