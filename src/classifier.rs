/*!
 * File type classification by extension and guessed MIME type
 */

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::types::FileType;

/// Extensions always treated as text, regardless of MIME guesses
pub static KNOWN_TEXT_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        ".py", ".md", ".yaml", ".yml", ".sh", ".csv", ".txt", ".log", ".tex", ".bib",
    ]
    .into_iter()
    .collect()
});

const ARCHIVE_EXTENSIONS: [&str; 3] = [".zip", ".tar", ".gz"];

/// Lowercased extension including the leading dot, or an empty string.
///
/// Dotfiles such as `.bashrc` have no extension; `archive.tar.gz` yields `.gz`.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Classify a file. Returns `None` for the type when a non-empty extension
/// whitelist is given and the file's extension is not on it.
pub fn classify(path: &Path, include_extensions: &HashSet<String>) -> (Option<FileType>, String) {
    let ext = extension_of(path);

    if !include_extensions.is_empty() && !include_extensions.contains(&ext) {
        return (None, ext);
    }

    if KNOWN_TEXT_EXTENSIONS.contains(ext.as_str()) {
        return (Some(FileType::Text), ext);
    }

    let file_type = match mime_guess::from_path(path).first() {
        Some(mime) => match mime.type_().as_str() {
            "image" => FileType::Picture,
            "audio" => FileType::Audio,
            "video" => FileType::Video,
            _ if mime.essence_str() == "application/zip"
                || ARCHIVE_EXTENSIONS.contains(&ext.as_str()) =>
            {
                FileType::Archive
            }
            _ => FileType::Other,
        },
        None => FileType::Other,
    };

    (Some(file_type), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_filter() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("src/main.PY")), ".py");
        assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new(".bashrc")), "");
        assert_eq!(extension_of(Path::new("Makefile")), "");
    }

    #[test]
    fn test_known_text_wins() {
        assert_eq!(
            classify(Path::new("notes.tex"), &no_filter()),
            (Some(FileType::Text), ".tex".to_string())
        );
        assert_eq!(
            classify(Path::new("README.MD"), &no_filter()).0,
            Some(FileType::Text)
        );
    }

    #[test]
    fn test_mime_based_types() {
        assert_eq!(classify(Path::new("a.png"), &no_filter()).0, Some(FileType::Picture));
        assert_eq!(classify(Path::new("a.mp3"), &no_filter()).0, Some(FileType::Audio));
        assert_eq!(classify(Path::new("a.mp4"), &no_filter()).0, Some(FileType::Video));
        assert_eq!(classify(Path::new("a.zip"), &no_filter()).0, Some(FileType::Archive));
        assert_eq!(classify(Path::new("a.tar"), &no_filter()).0, Some(FileType::Archive));
    }

    #[test]
    fn test_unknown_is_other() {
        assert_eq!(
            classify(Path::new("data.xyz"), &no_filter()),
            (Some(FileType::Other), ".xyz".to_string())
        );
        assert_eq!(classify(Path::new("LICENSE"), &no_filter()).0, Some(FileType::Other));
    }

    #[test]
    fn test_whitelist_excludes() {
        let include: HashSet<String> = [".md".to_string()].into_iter().collect();
        assert_eq!(
            classify(Path::new("a.py"), &include),
            (None, ".py".to_string())
        );
        assert_eq!(classify(Path::new("b.md"), &include).0, Some(FileType::Text));
        // Whitelisting does not change classification
        let include: HashSet<String> = [".png".to_string()].into_iter().collect();
        assert_eq!(classify(Path::new("b.png"), &include).0, Some(FileType::Picture));
    }
}
