/*!
 * Output writers for a scanned digest
 *
 * All writers render the complete document in memory; `write_digest` then
 * writes it to the configured output file in one step.
 */

mod structured;
mod xml;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use strum::Display;

use crate::config::Config;
use crate::error::{DigestError, Result};
use crate::types::{Digest, DigestEntry, FileType, FolderRecord};

pub use structured::{JsonWriter, YamlWriter};
pub use xml::XmlWriter;

/// Document format, chosen by output file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OutputFormat {
    /// Tree markup (`.xml`)
    #[strum(serialize = "XML")]
    Xml,
    /// Object notation (`.json`)
    #[strum(serialize = "JSON")]
    Json,
    /// Mapping notation (`.yaml`, `.yml`)
    #[strum(serialize = "YAML")]
    Yaml,
}

impl OutputFormat {
    /// Pick the format from a file path's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = crate::classifier::extension_of(path);
        match ext.as_str() {
            ".xml" => Ok(Self::Xml),
            ".json" => Ok(Self::Json),
            ".yaml" | ".yml" => Ok(Self::Yaml),
            _ => Err(DigestError::UnsupportedFormat(ext)),
        }
    }
}

/// Render the digest in the configured format
pub fn render(config: &Config, digest: &Digest) -> Result<String> {
    match config.output_format()? {
        OutputFormat::Xml => XmlWriter::new(config.clone()).render(digest),
        OutputFormat::Json => JsonWriter::new(config.clone()).render(digest),
        OutputFormat::Yaml => YamlWriter::new(config.clone()).render(digest),
    }
}

/// Render and write the digest, returning the size of the written file
pub fn write_digest(config: &Config, digest: &Digest) -> Result<u64> {
    let content = render(config, digest)?;
    fs::write(&config.output_file, content)?;
    Ok(fs::metadata(&config.output_file)?.len())
}

/// Serde view shared by the JSON and YAML writers
#[derive(Serialize)]
struct Document<'a> {
    repository: RepositoryView<'a>,
}

#[derive(Serialize)]
struct RepositoryView<'a> {
    name: &'a str,
    folders: FoldersView<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a BTreeMap<FileType, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extension_stats: Option<&'a BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    directory_structure: Option<Vec<&'a str>>,
}

/// Folders keyed by path, in traversal order
struct FoldersView<'a>(&'a [FolderRecord]);

impl Serialize for FoldersView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for folder in self.0 {
            map.serialize_entry(&folder.path, &FolderView::new(&folder.files))?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct FolderView<'a> {
    files: Vec<FileView<'a>>,
}

impl<'a> FolderView<'a> {
    fn new(files: &'a [DigestEntry]) -> Self {
        Self {
            files: files.iter().map(FileView::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct FileView<'a> {
    path: &'a str,
    #[serde(rename = "type")]
    file_type: FileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> From<&'a DigestEntry> for FileView<'a> {
    fn from(entry: &'a DigestEntry) -> Self {
        Self {
            path: &entry.path,
            file_type: entry.file_type,
            code: entry.content.as_deref(),
            error: entry.error.as_deref(),
        }
    }
}

impl<'a> Document<'a> {
    fn new(digest: &'a Digest, config: &Config) -> Self {
        Self {
            repository: RepositoryView {
                name: digest.name(),
                folders: FoldersView(digest.folders()),
                summary: config.include_summary.then(|| digest.type_counts()),
                extension_stats: config
                    .include_summary
                    .then(|| digest.extension_counts()),
                directory_structure: config.include_structure.then(|| digest.sorted_paths()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.xml")).unwrap(), OutputFormat::Xml);
        assert_eq!(OutputFormat::from_path(Path::new("a.JSON")).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("a.yml")).unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_path(Path::new("a.yaml")).unwrap(), OutputFormat::Yaml);
        assert!(matches!(
            OutputFormat::from_path(Path::new("a.txt")),
            Err(DigestError::UnsupportedFormat(ext)) if ext == ".txt"
        ));
        assert!(OutputFormat::from_path(Path::new("digest")).is_err());
    }
}
