//! Relationships between the parts of an OPC package.
//!
//! Relationships are kept in the order they appear in their `.rels` part, so
//! "the first relationship of a type" is well defined.
use smallvec::SmallVec;

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;

/// One relationship from a source part to a target part or external URL.
#[derive(Debug, Clone)]
pub struct Relationship {
    r_id: String,
    reltype: String,
    target_ref: String,
    /// Directory of the source part, for resolving relative targets
    base_uri: String,
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: impl Into<String>,
        reltype: impl Into<String>,
        target_ref: impl Into<String>,
        base_uri: impl Into<String>,
        is_external: bool,
    ) -> Self {
        Self {
            r_id: r_id.into(),
            reltype: reltype.into(),
            target_ref: target_ref.into(),
            base_uri: base_uri.into(),
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Absolute part name of the target. External targets have none.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} targets external resource '{}'",
                self.r_id, self.target_ref
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref)
    }
}

/// The relationships of a single source part.
#[derive(Debug, Clone)]
pub struct Relationships {
    base_uri: String,
    rels: SmallVec<[Relationship; 8]>,
}

impl Relationships {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: SmallVec::new(),
        }
    }

    /// Append a relationship; an existing one with the same rId is replaced.
    pub fn add_relationship(
        &mut self,
        reltype: &str,
        target_ref: &str,
        r_id: &str,
        is_external: bool,
    ) -> &Relationship {
        let rel = Relationship::new(r_id, reltype, target_ref, self.base_uri.as_str(), is_external);
        let idx = match self.rels.iter().position(|r| r.r_id == r_id) {
            Some(idx) => {
                self.rels[idx] = rel;
                idx
            }
            None => {
                self.rels.push(rel);
                self.rels.len() - 1
            }
        };
        &self.rels[idx]
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// First relationship of the given type, in document order.
    pub fn first_with_reltype(&self, reltype: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.reltype == reltype)
    }

    pub fn all_with_reltype<'a, 'b>(&'a self, reltype: &'b str) -> impl Iterator<Item = &'a Relationship> {
        self.rels.iter().filter(move |rel| rel.reltype == reltype)
    }

    /// The single relationship of a type; zero or several is an error.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.all_with_reltype(reltype);
        match (matching.next(), matching.next()) {
            (Some(rel), None) => Ok(rel),
            (None, _) => Err(OpcError::RelationshipNotFound(format!(
                "no relationship of type '{}'",
                reltype
            ))),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}
