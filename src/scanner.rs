/*!
 * Directory walking, filtering and aggregation
 */

use std::fs;
use std::path::{Component, Path};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::classifier::classify;
use crate::config::Config;
use crate::error::Result;
use crate::types::{Digest, DigestEntry, FileType};

/// Relative path of the scan root
pub const ROOT_PATH: &str = ".";

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress bar, ticked once per visited file
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Walk the target directory once and build the digest
    pub fn scan(&self) -> Result<Digest> {
        let abs_path = fs::canonicalize(&self.config.target_dir)?;
        // Name from the path as given, so a symlinked root keeps its own name
        let repo_name = std::path::absolute(&self.config.target_dir)?
            .file_name()
            .or_else(|| abs_path.file_name())
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let mut digest = Digest::new(repo_name);

        // Excluded directories are pruned before descending
        let walker = WalkDir::new(&abs_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !self.is_excluded_entry(&abs_path, e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let rel_path = relative_path(&abs_path, entry.path());

            if entry.file_type().is_dir() {
                // Only directories that can be listed are recorded
                match fs::read_dir(entry.path()) {
                    Ok(_) => {
                        digest.add_folder(&rel_path);
                    }
                    Err(e) => warn!("Skipping unreadable directory {}: {}", rel_path, e),
                }
                continue;
            }

            // Symlinked directories are listed by the walk but never entered
            if entry.path_is_symlink() && entry.path().is_dir() {
                debug!("Skipping symlinked directory: {}", rel_path);
                continue;
            }

            let folder = entry
                .path()
                .parent()
                .map(|p| relative_path(&abs_path, p))
                .unwrap_or_else(|| ROOT_PATH.to_string());

            self.process_file(entry.path(), rel_path, &folder, &mut digest);
        }

        info!(
            "Scanned {} folders, included {} files",
            digest.folders().len(),
            digest.entry_count()
        );

        Ok(digest)
    }

    /// Classify, filter and record a single file
    fn process_file(&self, abs_path: &Path, rel_path: String, folder: &str, digest: &mut Digest) {
        self.progress.inc(1);
        self.progress.set_message(rel_path.clone());

        let (file_type, ext) = classify(abs_path, &self.config.include_extensions);

        let Some(file_type) = file_type else {
            debug!("Extension not included: {}", rel_path);
            return;
        };
        if self.config.skip_other && file_type == FileType::Other {
            debug!("Skipping other file: {}", rel_path);
            return;
        }
        if self.config.only_text && file_type != FileType::Text {
            debug!("Skipping non-text file: {}", rel_path);
            return;
        }

        let mut entry = DigestEntry::new(rel_path, file_type);
        if file_type == FileType::Text {
            match fs::read_to_string(abs_path) {
                Ok(content) => entry.content = Some(content),
                Err(e) => {
                    warn!("Cannot read {}: {}", entry.path, e);
                    entry.error = Some(format!("Cannot read: {}", e));
                }
            }
        }

        digest.add_entry(folder, &ext, entry);
    }

    /// Whether a walk entry is a directory that must not be visited
    fn is_excluded_entry(&self, root: &Path, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let excluded = self.is_excluded_dir(rel);
        if excluded {
            debug!("Excluding directory: {}", rel.display());
        }
        excluded
    }

    /// Check if any component of a relative directory path is an excluded name
    pub fn is_excluded_dir(&self, rel_path: &Path) -> bool {
        rel_path.components().any(|c| match c {
            Component::Normal(name) => self
                .config
                .exclude_dirs
                .contains(&*name.to_string_lossy()),
            _ => false,
        })
    }
}

/// Slash-separated path of `path` relative to `root`; `.` for the root itself
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ROOT_PATH.to_string()
    } else {
        parts.join("/")
    }
}
