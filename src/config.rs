/*!
 * Configuration handling for CodeDigest
 */

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::Local;
use clap::Parser;

use crate::error::Result;
use crate::report::ReportStyle;
use crate::utils::{set_or_default, timestamped_path, DEFAULT_EXCLUDE_DIRS, DEFAULT_INCLUDE_EXTENSIONS};
use crate::writer::OutputFormat;
use crate::{bail, ensure};

/// Command-line arguments for CodeDigest
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codedigest",
    version = env!("CARGO_PKG_VERSION"),
    about = "Aggregate a repository into XML, JSON, or YAML",
    long_about = "Recursively scans a repository and exports its structure and text contents into a single AI-friendly file. The output format is chosen from the output file extension (.xml, .json, .yaml/.yml)."
)]
pub struct Args {
    /// Repository root path
    #[clap(long)]
    pub path: PathBuf,

    /// Output file (.xml, .json, .yaml, .yml)
    #[clap(long)]
    pub output: PathBuf,

    /// Append a timestamp to the output filename
    #[clap(long)]
    pub timestamp: bool,

    /// Skip files of type "other"
    #[clap(long)]
    pub skip_other: bool,

    /// Include only text files
    #[clap(long)]
    pub only_text: bool,

    /// Extensions to include (replaces the default whitelist)
    #[clap(long, num_args = 0.., value_name = "EXT")]
    pub include_ext: Option<Vec<String>>,

    /// Directory names to exclude (replaces the default list)
    #[clap(long, num_args = 0.., value_name = "NAME")]
    pub exclude_dir: Option<Vec<String>>,

    /// Disable the summary block
    #[clap(long)]
    pub no_summary: bool,

    /// Disable the directory structure block
    #[clap(long)]
    pub no_structure: bool,

    /// How to print file statistics on the console
    #[clap(long, value_enum, default_value_t = ReportStyle::default())]
    pub report: ReportStyle,

    /// Do not print the configuration echo and statistics
    #[clap(long, short)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[clap(long, short)]
    pub verbose: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub target_dir: PathBuf,

    /// Final output path (timestamp already applied)
    pub output_file: PathBuf,

    /// Whether a timestamp was inserted into the output name
    pub timestamp: bool,

    /// Extension whitelist; empty means every extension passes
    pub include_extensions: HashSet<String>,

    /// Directory names never descended into
    pub exclude_dirs: HashSet<String>,

    /// Drop files classified as other
    pub skip_other: bool,

    /// Keep only files classified as text
    pub only_text: bool,

    /// Emit the summary block
    pub include_summary: bool,

    /// Emit the directory structure block
    pub include_structure: bool,

    /// Console statistics rendering
    pub report_style: ReportStyle,

    /// Suppress console reporting
    pub quiet: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let output_file = if args.timestamp {
            timestamped_path(&args.output, Local::now())
        } else {
            args.output
        };

        Self {
            target_dir: args.path,
            output_file,
            timestamp: args.timestamp,
            include_extensions: set_or_default(args.include_ext, &DEFAULT_INCLUDE_EXTENSIONS),
            exclude_dirs: set_or_default(args.exclude_dir, &DEFAULT_EXCLUDE_DIRS),
            skip_other: args.skip_other,
            only_text: args.only_text,
            include_summary: !args.no_summary,
            include_structure: !args.no_structure,
            report_style: args.report,
            quiet: args.quiet,
        }
    }

    /// Configuration with the default filters for the given paths
    pub fn new(target_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output_file: output_file.into(),
            timestamp: false,
            include_extensions: set_or_default(None, &DEFAULT_INCLUDE_EXTENSIONS),
            exclude_dirs: set_or_default(None, &DEFAULT_EXCLUDE_DIRS),
            skip_other: false,
            only_text: false,
            include_summary: true,
            include_structure: true,
            report_style: ReportStyle::default(),
            quiet: false,
        }
    }

    /// Output format selected by the output file extension
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_path(&self.output_file)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.output_file.file_name().is_some(),
            Config,
            "Output path has no file name: {}",
            self.output_file.display()
        );

        // Format errors come before any filesystem check
        self.output_format()?;

        ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!(
                    PathNotFound,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DigestError;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["codedigest"];
        argv.extend_from_slice(args);
        Config::from_args(Args::parse_from(argv))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--path", ".", "--output", "d.json"]);
        assert!(config.include_extensions.contains(".py"));
        assert!(!config.include_extensions.contains(".tex"));
        assert!(config.exclude_dirs.contains(".git"));
        assert!(config.include_summary && config.include_structure);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_lists_override_defaults() {
        let config = parse(&[
            "--path", ".", "--output", "d.yml", "--include-ext", ".tex", ".bib",
            "--exclude-dir", "target",
        ]);
        assert_eq!(config.include_extensions.len(), 2);
        assert!(config.include_extensions.contains(".bib"));
        assert_eq!(config.exclude_dirs.len(), 1);
        assert!(!config.exclude_dirs.contains(".git"));
    }

    #[test]
    fn test_empty_list_falls_back() {
        let config = parse(&["--path", ".", "--output", "d.xml", "--include-ext"]);
        assert!(config.include_extensions.contains(".md"));
    }

    #[test]
    fn test_timestamp_keeps_extension() {
        let config = parse(&["--path", ".", "--output", "digest.xml", "--timestamp"]);
        let name = config.output_file.to_string_lossy().to_string();
        assert!(name.starts_with("digest_"));
        assert!(name.ends_with(".xml"));
        assert_eq!(name.len(), "digest_.xml".len() + 12);
    }

    #[test]
    fn test_validate_rejects_format_first() {
        let config = Config::new("/definitely/missing", "out.txt");
        assert!(matches!(
            config.validate(),
            Err(DigestError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_validate_missing_dir() {
        let config = Config::new("/definitely/missing", "out.json");
        assert!(matches!(config.validate(), Err(DigestError::PathNotFound(_))));
    }
}
