//! ODP zip container.
//!
//! Parts are kept in archive order as raw bytes. When the package is written back, the
//! `mimetype` part comes first and is stored uncompressed so that tools sniffing the first
//! bytes of the file recognise the document type; every other part is deflated.

use crate::error::{OdfError, OdfResult};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const MIMETYPE_PART: &str = "mimetype";
pub const CONTENT_PART: &str = "content.xml";
pub const STYLES_PART: &str = "styles.xml";
pub const MANIFEST_PART: &str = "META-INF/manifest.xml";

/// An opened OpenDocument package.
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<(String, Vec<u8>)>,
}

impl Package {
    /// Empty package, mostly useful to assemble templates in tests.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(path: impl AsRef<Path>) -> OdfResult<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> OdfResult<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            parts.push((file.name().to_string(), data));
        }
        Ok(Self { parts })
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Contents of a part that must exist and be UTF-8 text.
    pub fn text_part(&self, name: &str) -> OdfResult<&str> {
        let data = self
            .part(name)
            .ok_or_else(|| OdfError::MissingPart(name.to_string()))?;
        std::str::from_utf8(data).map_err(|_| OdfError::Encoding(name.to_string()))
    }

    /// Replace a part, or append it when the package does not have it yet.
    pub fn set_part(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        let name = name.into();
        let data = data.into();
        match self.parts.iter_mut().find(|(part, _)| *part == name) {
            Some((_, existing)) => *existing = data,
            None => self.parts.push((name, data)),
        }
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    pub fn to_bytes(&self) -> OdfResult<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        if let Some(mimetype) = self.part(MIMETYPE_PART) {
            writer.start_file(MIMETYPE_PART, file_options(CompressionMethod::Stored))?;
            writer.write_all(mimetype)?;
        }
        for (name, data) in self.parts.iter().filter(|(name, _)| name != MIMETYPE_PART) {
            writer.start_file(name.as_str(), file_options(CompressionMethod::Deflated))?;
            writer.write_all(data)?;
        }

        Ok(writer.finish()?.into_inner())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> OdfResult<()> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

fn file_options(method: CompressionMethod) -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(method)
}
