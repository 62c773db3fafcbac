//! An owned, mutable XML element tree.
//!
//! Parts are parsed once into this tree. Lookups match on local names so
//! callers can write `child("spTree")` without caring which prefix a producer
//! bound to the PresentationML namespace; attributes are looked up by their
//! qualified name (`r:id`) because unprefixed and prefixed attributes are
//! distinct in OOXML.
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

use crate::ooxml::opc::error::{OpcError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    name: String,
    attributes: SmallVec<[(String, String); 4]>,
    children: Vec<XmlNode>,
}

#[inline]
fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a complete document and return its root element.
    pub fn parse(xml: &[u8]) -> Result<XmlElement> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => stack.push(Self::from_start(&e)?),
                Event::Empty(e) => {
                    let element = Self::from_start(&e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| OpcError::XmlError("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.append_text(std::str::from_utf8(e.as_ref())?);
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.append_text(std::str::from_utf8(e.as_ref())?);
                    }
                }
                Event::GeneralRef(e) => {
                    let resolved = match e.resolve_char_ref()? {
                        Some(ch) => ch.to_string(),
                        None => match std::str::from_utf8(e.as_ref())? {
                            "amp" => "&".to_string(),
                            "lt" => "<".to_string(),
                            "gt" => ">".to_string(),
                            "quot" => "\"".to_string(),
                            "apos" => "'".to_string(),
                            other => {
                                return Err(OpcError::XmlError(format!(
                                    "unknown entity reference &{};",
                                    other
                                )));
                            }
                        },
                    };
                    if let Some(parent) = stack.last_mut() {
                        parent.append_text(&resolved);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(OpcError::XmlError(format!(
                "unclosed element <{}>",
                stack[stack.len() - 1].name
            )));
        }
        root.ok_or_else(|| OpcError::XmlError("document has no root element".to_string()))
    }

    fn from_start(e: &BytesStart<'_>) -> Result<XmlElement> {
        let mut element = XmlElement::new(std::str::from_utf8(e.name().as_ref())?);
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn append_text(&mut self, text: &str) {
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Qualified name, e.g. `p:sp`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its namespace prefix, e.g. `sp`.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    #[inline]
    pub fn is(&self, local: &str) -> bool {
        self.local_name() == local
    }

    /// Attribute value by qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(pos).1)
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push_child(child);
        self
    }

    pub fn nodes(&self) -> &[XmlNode] {
        &self.children
    }

    /// Direct child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    pub fn children_named<'s>(&'s self, local: &'s str) -> impl Iterator<Item = &'s XmlElement> {
        self.children().filter(move |e| e.is(local))
    }

    /// First direct child with the given local name.
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.children().find(|e| e.is(local))
    }

    /// Follow a chain of direct children, `path(&["txBody", "lstStyle"])`.
    pub fn path(&self, locals: &[&str]) -> Option<&XmlElement> {
        locals.iter().try_fold(self, |element, local| element.child(local))
    }

    /// All descendant elements, depth-first in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack: Vec<&XmlElement> = self.children().collect();
        stack.reverse();
        Descendants { stack }
    }

    pub fn find_descendant(&self, local: &str) -> Option<&XmlElement> {
        self.descendants().find(|e| e.is(local))
    }

    /// Concatenated text of this element and all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }

    pub fn child_mut(&mut self, local: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find_map(|node| match node {
            XmlNode::Element(e) if e.is(local) => Some(e),
            _ => None,
        })
    }

    pub fn path_mut(&mut self, locals: &[&str]) -> Option<&mut XmlElement> {
        let mut element = self;
        for local in locals {
            element = element.child_mut(local)?;
        }
        Some(element)
    }

    /// Depth-first search for the first descendant with the given local name.
    pub fn find_descendant_mut(&mut self, local: &str) -> Option<&mut XmlElement> {
        for node in &mut self.children {
            if let XmlNode::Element(e) = node {
                if e.is(local) {
                    return Some(e);
                }
                if let Some(found) = e.find_descendant_mut(local) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Existing child with the local name of `name`, or a new one appended.
    pub fn get_or_add_child(&mut self, name: &str) -> &mut XmlElement {
        let local = local_part(name);
        let idx = match self
            .children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.is(local)))
        {
            Some(idx) => idx,
            None => {
                self.children.push(XmlNode::Element(XmlElement::new(name)));
                self.children.len() - 1
            }
        };
        match &mut self.children[idx] {
            XmlNode::Element(e) => e,
            XmlNode::Text(_) => unreachable!("position only matches elements"),
        }
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Remove every direct child with the given local name; returns how many.
    pub fn remove_children_named(&mut self, local: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, XmlNode::Element(e) if e.is(local)));
        before - self.children.len()
    }

    /// Replace all content with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Serialize as a standalone XML document.
    pub fn to_xml(&self) -> String {
        let mut out =
            String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(&escape(text.as_str())),
                XmlNode::Element(e) => e.write_into(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(OpcError::XmlError(format!(
                "second root element <{}>",
                element.name
            )));
        }
    }
    Ok(())
}

pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let mark = self.stack.len();
        self.stack.extend(next.children());
        self.stack[mark..].reverse();
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<p:sp xmlns:p="urn:p" xmlns:a="urn:a">
  <p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
  <p:txBody><a:p><a:r><a:t>Fish &amp; Chips &#x263A;</a:t></a:r><a:r><a:t> more</a:t></a:r></a:p></p:txBody>
</p:sp>"#;

    #[test]
    fn test_parse_and_navigate() {
        let sp = XmlElement::parse(SHAPE.as_bytes()).unwrap();
        assert_eq!(sp.name(), "p:sp");
        assert!(sp.is("sp"));
        let ph = sp.path(&["nvSpPr", "nvPr", "ph"]).unwrap();
        assert_eq!(ph.attr("type"), Some("title"));
        assert_eq!(sp.path(&["nvSpPr", "cNvPr"]).unwrap().attr("id"), Some("2"));
        assert!(sp.path(&["nvSpPr", "missing"]).is_none());
    }

    #[test]
    fn test_text_resolves_entities_and_keeps_spaces() {
        let sp = XmlElement::parse(SHAPE.as_bytes()).unwrap();
        let p = sp.find_descendant("p").unwrap();
        assert_eq!(p.text(), "Fish & Chips \u{263A} more");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let sp = XmlElement::parse(SHAPE.as_bytes()).unwrap();
        let names: Vec<&str> = sp.descendants().map(|e| e.local_name()).take(5).collect();
        assert_eq!(names, ["nvSpPr", "cNvPr", "nvPr", "ph", "txBody"]);
        assert_eq!(sp.descendants().filter(|e| e.is("t")).count(), 2);
    }

    #[test]
    fn test_mutation_and_serialization() {
        let mut sp = XmlElement::parse(SHAPE.as_bytes()).unwrap();
        let ppr = sp
            .path_mut(&["txBody", "p"])
            .unwrap()
            .get_or_add_child("a:pPr");
        ppr.set_attr("algn", "ctr");
        assert_eq!(sp.path(&["txBody", "p", "pPr"]).unwrap().attr("algn"), Some("ctr"));

        let xml = sp.to_xml();
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(xml.contains("Fish &amp; Chips"));

        let reparsed = XmlElement::parse(xml.as_bytes()).unwrap();
        assert_eq!(reparsed.path(&["txBody", "p", "pPr"]).unwrap().attr("algn"), Some("ctr"));

        let removed = sp.path_mut(&["txBody", "p"]).unwrap().remove_children_named("r");
        assert_eq!(removed, 2);
    }

    #[test]
    fn test_rejects_truncated_documents() {
        assert!(XmlElement::parse(b"<a><b></b>").is_err());
        assert!(XmlElement::parse(b"").is_err());
    }
}
