//! Turns the decompressed members of a package into parts.
//!
//! Parts are discovered by walking the relationship graph from the package
//! relationships, so members that nothing references are never loaded.
use std::collections::{HashMap, HashSet};

use log::debug;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::rel::Relationships;

/// Content type lookup built from `[Content_Types].xml`.
pub(crate) struct ContentTypeMap {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    pub(crate) fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        };
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(ref e) | Event::Start(ref e)
                    if matches!(e.local_name().as_ref(), b"Default" | b"Override") =>
                {
                    let is_default = e.local_name().as_ref() == b"Default";
                    let key_attr: &[u8] = if is_default { b"Extension" } else { b"PartName" };
                    let mut key = None;
                    let mut content_type = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.as_ref() == key_attr {
                            key = Some(attr.unescape_value()?.into_owned());
                        } else if attr.key.as_ref() == b"ContentType" {
                            content_type = Some(attr.unescape_value()?.into_owned());
                        }
                    }
                    if let (Some(key), Some(ct)) = (key, content_type) {
                        if is_default {
                            map.defaults.insert(key.to_ascii_lowercase(), ct);
                        } else {
                            map.overrides.insert(key.to_ascii_lowercase(), ct);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(map)
    }

    /// Override by partname first, then default by extension.
    pub(crate) fn get(&self, partname: &PackURI) -> Result<&str> {
        if let Some(ct) = self.overrides.get(&partname.as_str().to_ascii_lowercase()) {
            return Ok(ct);
        }
        self.defaults
            .get(&partname.ext().to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(partname.to_string()))
    }
}

/// Parse a `.rels` part belonging to a source whose directory is `base_uri`.
pub(crate) fn parse_rels_xml(rels_xml: &[u8], base_uri: &str) -> Result<Relationships> {
    let mut rels = Relationships::new(base_uri);
    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) if e.local_name().as_ref() == b"Relationship" => {
                let mut r_id = None;
                let mut reltype = None;
                let mut target = None;
                let mut external = false;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.as_ref() {
                        b"Id" => r_id = Some(attr.unescape_value()?.into_owned()),
                        b"Type" => reltype = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        b"TargetMode" => external = attr.unescape_value()? == target_mode::EXTERNAL,
                        _ => {}
                    }
                }
                match (r_id, reltype, target) {
                    (Some(r_id), Some(reltype), Some(target)) => {
                        rels.add_relationship(&reltype, &target, &r_id, external);
                    }
                    _ => {
                        return Err(OpcError::InvalidRelationship(format!(
                            "incomplete <Relationship> under {}",
                            base_uri
                        )));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(rels)
}

/// Package relationships plus every part reachable from them.
pub struct PackageReader {
    pub(crate) pkg_rels: Relationships,
    pub(crate) parts: Vec<Box<dyn Part>>,
}

impl PackageReader {
    pub fn from_members(mut members: HashMap<String, Vec<u8>>) -> Result<Self> {
        let content_types_xml = members
            .get(CONTENT_TYPES_URI.trim_start_matches('/'))
            .ok_or_else(|| OpcError::PartNotFound("[Content_Types].xml".to_string()))?;
        let content_types = ContentTypeMap::from_xml(content_types_xml)?;

        let package_uri = PackURI::package();
        let pkg_rels = load_rels(&members, &package_uri)?;

        let mut parts: Vec<Box<dyn Part>> = Vec::new();
        let mut visited: HashSet<PackURI> = HashSet::new();
        let mut pending: Vec<PackURI> = internal_targets(&pkg_rels)?;
        pending.reverse();

        while let Some(partname) = pending.pop() {
            if !visited.insert(partname.clone()) {
                continue;
            }
            let Some(blob) = members.remove(partname.membername()) else {
                debug!("relationship target {} is missing from the package", partname);
                continue;
            };
            let rels = load_rels(&members, &partname)?;
            let mut next = internal_targets(&rels)?;
            next.reverse();
            pending.extend(next);

            let content_type = content_types.get(&partname)?.to_string();
            parts.push(PartFactory::load(partname, content_type, blob, rels)?);
        }

        Ok(Self { pkg_rels, parts })
    }
}

fn load_rels(members: &HashMap<String, Vec<u8>>, source: &PackURI) -> Result<Relationships> {
    let rels_uri = source.rels_uri()?;
    match members.get(rels_uri.membername()) {
        Some(xml) => parse_rels_xml(xml, source.base_uri()),
        None => Ok(Relationships::new(source.base_uri())),
    }
}

fn internal_targets(rels: &Relationships) -> Result<Vec<PackURI>> {
    rels.iter()
        .filter(|rel| !rel.is_external())
        .map(|rel| rel.target_partname())
        .collect()
}
