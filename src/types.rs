/*!
 * Core types and data structures for the CodeDigest application
 */

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use strum::{AsRefStr, Display};

/// Semantic category of a file, decided from its extension
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    AsRefStr,
    Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Readable source or prose; content is embedded
    Text,
    /// Image formats
    Picture,
    /// Audio formats
    Audio,
    /// Video formats
    Video,
    /// Zip, tar and gzip archives
    Archive,
    /// Anything not recognized
    Other,
}

impl FileType {
    /// Lowercase name used in every output format
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

/// One included file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    /// Slash-separated path relative to the scan root
    pub path: String,
    /// Classified type
    pub file_type: FileType,
    /// Full file content (text files whose read succeeded)
    pub content: Option<String>,
    /// Read failure message (text files whose read failed)
    pub error: Option<String>,
}

impl DigestEntry {
    /// Entry without content, used for every non-text type
    pub fn new(path: impl Into<String>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            file_type,
            content: None,
            error: None,
        }
    }
}

/// Included files of one visited directory, in encounter order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRecord {
    /// Relative directory path; `.` for the root
    pub path: String,
    /// Files in the order the walk produced them
    pub files: Vec<DigestEntry>,
}

/// Complete result of one traversal
#[derive(Debug, Clone, Default)]
pub struct Digest {
    name: String,
    folders: Vec<FolderRecord>,
    folder_index: HashMap<String, usize>,
    type_counts: BTreeMap<FileType, usize>,
    extension_counts: BTreeMap<String, usize>,
    paths: Vec<String>,
}

impl Digest {
    /// Create an empty digest for the repository with the given display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Register a visited directory. Returns false if it was already known.
    pub fn add_folder(&mut self, path: &str) -> bool {
        if self.folder_index.contains_key(path) {
            return false;
        }
        self.folder_index
            .insert(path.to_string(), self.folders.len());
        self.folders.push(FolderRecord {
            path: path.to_string(),
            files: Vec::new(),
        });
        self.paths.push(format!("{}/", path));
        true
    }

    /// Record an included file under `folder`, updating the path list and
    /// both counters. The folder is registered first if needed.
    pub fn add_entry(&mut self, folder: &str, extension: &str, entry: DigestEntry) {
        self.add_folder(folder);
        self.paths.push(entry.path.clone());
        *self.type_counts.entry(entry.file_type).or_insert(0) += 1;
        *self
            .extension_counts
            .entry(extension.to_string())
            .or_insert(0) += 1;

        let idx = self.folder_index[folder];
        self.folders[idx].files.push(entry);
    }

    /// Repository display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Folders in traversal order
    pub fn folders(&self) -> &[FolderRecord] {
        &self.folders
    }

    /// Look up a folder by relative path
    pub fn folder(&self, path: &str) -> Option<&FolderRecord> {
        self.folder_index.get(path).map(|&i| &self.folders[i])
    }

    /// Iterate over every included file
    pub fn entries(&self) -> impl Iterator<Item = &DigestEntry> {
        self.folders.iter().flat_map(|f| f.files.iter())
    }

    /// Number of included files
    pub fn entry_count(&self) -> usize {
        self.folders.iter().map(|f| f.files.len()).sum()
    }

    /// Counts per file type; types never seen have no key
    pub fn type_counts(&self) -> &BTreeMap<FileType, usize> {
        &self.type_counts
    }

    /// Counts per lowercased extension, sorted by extension
    pub fn extension_counts(&self) -> &BTreeMap<String, usize> {
        &self.extension_counts
    }

    /// Visited paths in collection order (directories end with `/`)
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Visited paths sorted lexicographically, as listed in the structure block
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.paths.iter().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}
