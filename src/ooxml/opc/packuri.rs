//! Part names inside an OPC package.
//!
//! A PackURI is the absolute, slash-rooted name of one part (for example
//! `/ppt/slides/slide1.xml`). It doubles as the stable identity of a part for
//! the lifetime of an opened package, which is what the embedded workbook
//! cache keys on.

use std::fmt;

use super::error::{OpcError, Result};

/// The package pseudo-partname
pub const PACKAGE_URI: &str = "/";

/// Zip member holding the content type map
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a PackURI from an absolute part name.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(OpcError::InvalidPackUri(format!(
                "PackURI must begin with slash, got '{}'",
                uri
            )));
        }
        Ok(PackURI { uri })
    }

    /// The package pseudo-part `/`, source of the package-level relationships.
    pub fn package() -> Self {
        PackURI {
            uri: PACKAGE_URI.to_string(),
        }
    }

    /// Resolve a relationship target against the directory of its source part.
    ///
    /// `"../slideLayouts/slideLayout1.xml"` relative to `/ppt/slides` becomes
    /// `/ppt/slideLayouts/slideLayout1.xml`. Targets that are already absolute
    /// are only normalized.
    pub fn from_rel_ref(base_uri: &str, target_ref: &str) -> Result<Self> {
        let joined = if target_ref.starts_with('/') {
            target_ref.to_string()
        } else if base_uri.ends_with('/') {
            format!("{}{}", base_uri, target_ref)
        } else {
            format!("{}/{}", base_uri, target_ref)
        };
        Self::new(normalize(&joined))
    }

    /// Directory portion: `/ppt/slides` for `/ppt/slides/slide1.xml`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Last path segment: `slide1.xml`.
    pub fn filename(&self) -> &str {
        self.uri.rsplit('/').next().unwrap_or("")
    }

    /// Extension without the leading period.
    pub fn ext(&self) -> &str {
        self.filename()
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("")
    }

    /// Zip member name: the URI without its leading slash.
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Part name of the relationships part belonging to this part.
    ///
    /// `/ppt/slides/slide1.xml` → `/ppt/slides/_rels/slide1.xml.rels`,
    /// `/` → `/_rels/.rels`.
    pub fn rels_uri(&self) -> Result<PackURI> {
        let base = self.base_uri();
        let rels = if base == "/" {
            format!("/_rels/{}.rels", self.filename())
        } else {
            format!("{}/_rels/{}.rels", base, self.filename())
        };
        PackURI::new(rels)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

/// Collapse `.` and `..` segments of a slash-rooted path.
fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    let mut out = String::with_capacity(path.len());
    for segment in &segments {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

impl fmt::Display for PackURI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}
