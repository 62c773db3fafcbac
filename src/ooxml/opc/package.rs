//! The in-memory OPC package.
//!
//! An `OpcPackage` owns every part reachable from the package relationships.
//! Presentation packages and the workbooks embedded in their charts are both
//! opened through it.
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::oxml::XmlElement;

pub struct OpcPackage {
    rels: Relationships,
    parts: HashMap<PackURI, Box<dyn Part>>,
}

impl OpcPackage {
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI),
            parts: HashMap::new(),
        }
    }

    /// Open a package file (.pptx, .xlsx, ...).
    ///
    /// ```no_run
    /// use slidecascade::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("deck.pptx").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::unmarshal(PhysPkgReader::open(path)?.read_all()?)
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::unmarshal(PhysPkgReader::new(reader)?.read_all()?)
    }

    /// Open a package held in memory, such as the blob of an embedded part.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(std::io::Cursor::new(bytes))
    }

    fn unmarshal(members: HashMap<String, Vec<u8>>) -> Result<Self> {
        let reader = PackageReader::from_members(members)?;
        let parts = reader
            .parts
            .into_iter()
            .map(|part| (part.partname().clone(), part))
            .collect();
        Ok(Self {
            rels: reader.pkg_rels,
            parts,
        })
    }

    /// Target of the package-level `officeDocument` relationship.
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        self.part_by_reltype(relationship_type::OFFICE_DOCUMENT)
    }

    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname)
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        self.parts
            .get_mut(partname)
            .map(|b| &mut **b as &mut dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Parsed root element of an XML part.
    pub fn part_element(&self, partname: &PackURI) -> Result<&XmlElement> {
        self.get_part(partname)?
            .element()
            .ok_or_else(|| OpcError::XmlError(format!("{} is not an XML part", partname)))
    }

    pub fn part_element_mut(&mut self, partname: &PackURI) -> Result<&mut XmlElement> {
        self.get_part_mut(partname)?
            .element_mut()
            .ok_or_else(|| OpcError::XmlError(format!("{} is not an XML part", partname)))
    }

    /// The single package-level relationship of a type.
    pub fn part_by_reltype(&self, reltype: &str) -> Result<&dyn Part> {
        let rel = self.rels.part_with_reltype(reltype)?;
        self.get_part(&rel.target_partname()?)
    }

    /// Part that `source` points at through `r_id`.
    pub fn related_part(&self, source: &dyn Part, r_id: &str) -> Result<&dyn Part> {
        let rel = source.rels().get(r_id).ok_or_else(|| {
            OpcError::RelationshipNotFound(format!("{} in {}", r_id, source.partname()))
        })?;
        self.get_part(&rel.target_partname()?)
    }

    /// Part behind the first relationship of `reltype` from `source`, if any.
    pub fn related_part_by_reltype(&self, source: &dyn Part, reltype: &str) -> Result<Option<&dyn Part>> {
        match source.rels().first_with_reltype(reltype) {
            Some(rel) => self.get_part(&rel.target_partname()?).map(Some),
            None => Ok(None),
        }
    }

    pub fn add_part(&mut self, part: Box<dyn Part>) {
        self.parts.insert(part.partname().clone(), part);
    }

    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname)
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
