/*!
 * Console reporting for CodeDigest
 *
 * Prints the configuration echo before scanning and the file statistics
 * after the output has been written, either as a box-drawing tree or as a
 * table rendered with the tabled library.
 */

use std::path::Path;

use clap::ValueEnum;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::config::Config;
use crate::types::Digest;
use crate::utils::{format_megabytes, sorted};

/// How statistics are rendered on the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportStyle {
    /// Nested tree (default)
    #[default]
    Tree,
    /// Rounded table
    Table,
}

/// Report generator for a finished digest
pub struct Reporter {
    style: ReportStyle,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn branch(index: usize, len: usize) -> &'static str {
    if index + 1 < len {
        "├──"
    } else {
        "└──"
    }
}

impl Reporter {
    /// Create a new reporter
    pub fn new(style: ReportStyle) -> Self {
        Self { style }
    }

    /// Echo of the resolved configuration
    pub fn configuration(&self, config: &Config) -> String {
        let format = config
            .output_format()
            .map(|f| f.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let rows = [
            ("Input path", config.target_dir.display().to_string()),
            ("Output file", config.output_file.display().to_string()),
            ("Output format", format),
            ("Timestamp appended", yes_no(config.timestamp).to_string()),
            ("Include only text", yes_no(config.only_text).to_string()),
            ("Skip 'other' files", yes_no(config.skip_other).to_string()),
            ("Include summary block", yes_no(config.include_summary).to_string()),
            ("Include structure", yes_no(config.include_structure).to_string()),
            (
                "Included extensions",
                format!("{:?}", sorted(&config.include_extensions)),
            ),
            (
                "Excluded directories",
                format!("{:?}", sorted(&config.exclude_dirs)),
            ),
        ];

        let mut out = String::from("[+] Configuration Summary\n");
        for (i, (key, value)) in rows.iter().enumerate() {
            out.push_str(&format!(
                "    {} {:<21}: {}\n",
                branch(i, rows.len()),
                key,
                value
            ));
        }
        out
    }

    /// Counts by type and by extension
    pub fn statistics(&self, digest: &Digest) -> String {
        match self.style {
            ReportStyle::Tree => self.statistics_tree(digest),
            ReportStyle::Table => self.statistics_table(digest),
        }
    }

    fn statistics_tree(&self, digest: &Digest) -> String {
        let mut types: Vec<(&str, usize)> = digest
            .type_counts()
            .iter()
            .map(|(t, n)| (t.as_str(), *n))
            .collect();
        types.sort_unstable();

        let mut out = String::from("[+] File Statistics\n    ├── By Type:\n");
        for (i, (name, count)) in types.iter().enumerate() {
            out.push_str(&format!(
                "    │    {} {:<10}: {}\n",
                branch(i, types.len()),
                name,
                count
            ));
        }

        let extensions = digest.extension_counts();
        if !extensions.is_empty() {
            out.push_str("    └── By Extension:\n");
            for (i, (ext, count)) in extensions.iter().enumerate() {
                out.push_str(&format!(
                    "         {} {:<7}: {}\n",
                    branch(i, extensions.len()),
                    ext,
                    count
                ));
            }
        }
        out
    }

    fn statistics_table(&self, digest: &Digest) -> String {
        #[derive(Tabled)]
        struct StatRow {
            #[tabled(rename = "Group")]
            group: &'static str,

            #[tabled(rename = "Key")]
            key: String,

            #[tabled(rename = "Files")]
            count: usize,
        }

        let mut rows: Vec<StatRow> = digest
            .type_counts()
            .iter()
            .map(|(t, n)| StatRow {
                group: "type",
                key: t.to_string(),
                count: *n,
            })
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        rows.extend(digest.extension_counts().iter().map(|(ext, n)| StatRow {
            group: "extension",
            key: ext.clone(),
            count: *n,
        }));

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        format!("[+] File Statistics\n{}\n", table)
    }

    /// Final confirmation line
    pub fn created(&self, output_file: &Path, size: u64) -> String {
        format!(
            "[+] File created successfully: {} ({})",
            output_file.display(),
            format_megabytes(size)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DigestEntry, FileType};

    fn sample_digest() -> Digest {
        let mut digest = Digest::new("repo");
        digest.add_folder(".");
        digest.add_entry(".", ".py", DigestEntry::new("a.py", FileType::Text));
        digest.add_entry(".", ".png", DigestEntry::new("b.png", FileType::Picture));
        digest.add_entry(".", ".md", DigestEntry::new("c.md", FileType::Text));
        digest
    }

    #[test]
    fn test_tree_statistics() {
        let report = Reporter::new(ReportStyle::Tree).statistics(&sample_digest());
        assert!(report.contains("By Type:"));
        assert!(report.contains("├── picture   : 1"));
        assert!(report.contains("└── text      : 2"));
        assert!(report.contains("└── .py    : 1"));
        assert!(report.contains("├── .md    : 1\n"));
        assert!(report.ends_with("└── .py    : 1\n"));
        assert_eq!(report.lines().count(), 8);
    }

    #[test]
    fn test_table_statistics() {
        let report = Reporter::new(ReportStyle::Table).statistics(&sample_digest());
        assert!(report.contains("extension"));
        assert!(report.contains(".png"));
        assert!(report.contains("picture"));
    }

    #[test]
    fn test_configuration_echo() {
        let config = Config::new("repo", "digest.yml");
        let echo = Reporter::new(ReportStyle::Tree).configuration(&config);
        assert!(echo.contains("Output format        : YAML"));
        assert!(echo.contains("└── Excluded directories"));
        assert!(echo.contains("\".git\""));
    }

    #[test]
    fn test_created_line() {
        let line = Reporter::new(ReportStyle::Tree).created(Path::new("d.json"), 2 * 1024 * 1024);
        assert_eq!(line, "[+] File created successfully: d.json (2.00 MB)");
    }
}
