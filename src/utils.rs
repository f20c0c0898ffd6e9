/*!
 * Utility functions for CodeDigest
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;

/// Extensions kept when `--include-ext` is not given
pub static DEFAULT_INCLUDE_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![".py", ".md", ".yaml", ".yml", ".sh", ".csv", ".txt", ".log"]
});

/// Directory names skipped when `--exclude-dir` is not given
pub static DEFAULT_EXCLUDE_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".git",
        "__pycache__",
        ".venv",
        "node_modules",
        ".idea",
        "docs",
        "outputs",
    ]
});

/// Use `values` as a set, or `defaults` when nothing was given
pub fn set_or_default(values: Option<Vec<String>>, defaults: &[&str]) -> HashSet<String> {
    match values {
        Some(values) if !values.is_empty() => values.into_iter().collect(),
        _ => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

/// Insert `_<YYYYMMDDHHMM>` between the file stem and its extension
pub fn timestamped_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let stamp = now.format("%Y%m%d%H%M").to_string();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, stamp),
    };
    path.with_file_name(name)
}

/// Size in megabytes with two decimals
pub fn format_megabytes(size: u64) -> String {
    format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
}

/// Sorted copy of a string set, for stable display
pub fn sorted(set: &HashSet<String>) -> Vec<&str> {
    let mut items: Vec<&str> = set.iter().map(String::as_str).collect();
    items.sort_unstable();
    items
}
