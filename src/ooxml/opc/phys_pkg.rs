//! Physical access to the zip container of an OPC package.
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::ooxml::opc::error::{OpcError, Result};

/// Upper bound on the buffer reserved up front for one member. The size
/// declared in the zip header is not trusted beyond it.
const MAX_PREALLOCATED_MEMBER: u64 = 1 << 20;

/// Reads the members of a package's zip archive.
pub struct PhysPkgReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl PhysPkgReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl PhysPkgReader<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> PhysPkgReader<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Decompress every file member, keyed by member name.
    pub fn read_all(mut self) -> Result<HashMap<String, Vec<u8>>> {
        let mut members = HashMap::with_capacity(self.archive.len());
        for i in 0..self.archive.len() {
            let mut file = self.archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let mut blob = Vec::with_capacity(file.size().min(MAX_PREALLOCATED_MEMBER) as usize);
            file.read_to_end(&mut blob)?;
            members.insert(file.name().to_string(), blob);
        }
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn archive(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in members {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    /// Overwrite the uncompressed size in every local and central header.
    fn declare_size(bytes: &mut [u8], size: u32) {
        let mut i = 0;
        while i + 4 <= bytes.len() {
            let offset = match bytes[i..i + 4] {
                [0x50, 0x4b, 0x03, 0x04] => Some(22),
                [0x50, 0x4b, 0x01, 0x02] => Some(24),
                _ => None,
            };
            if let Some(offset) = offset {
                bytes[i + offset..i + offset + 4].copy_from_slice(&size.to_le_bytes());
            }
            i += 1;
        }
    }

    #[test]
    fn test_read_all() {
        let bytes = archive(&[("[Content_Types].xml", b"<Types/>"), ("ppt/a.xml", b"<a/>")]);
        let reader = PhysPkgReader::from_bytes(bytes).unwrap();
        assert_eq!(reader.len(), 2);
        let members = reader.read_all().unwrap();
        assert_eq!(members["ppt/a.xml"], b"<a/>");
    }

    #[test]
    fn test_declared_size_is_not_trusted() {
        let mut bytes = archive(&[("ppt/a.xml", b"<a/>")]);
        declare_size(&mut bytes, 0xFFFF_FFF0);
        // Either the member reads back or the archive is rejected; the
        // declared size is never reserved.
        if let Ok(reader) = PhysPkgReader::from_bytes(bytes) {
            if let Ok(members) = reader.read_all() {
                assert_eq!(members["ppt/a.xml"], b"<a/>");
            }
        }
    }

    #[test]
    fn test_not_a_zip() {
        assert!(PhysPkgReader::from_bytes(b"not a zip".to_vec()).is_err());
    }
}
