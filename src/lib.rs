/*!
 * CodeDigest - Aggregate a repository into a single AI-friendly document
 *
 * This library walks a directory tree, classifies every file, embeds the
 * contents of text files, and serializes the result as XML, JSON, or YAML.
 */

pub mod classifier;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use classifier::{classify, extension_of};
pub use config::Config;
pub use error::{DigestError, Result};
pub use report::{ReportStyle, Reporter};
pub use scanner::Scanner;
pub use types::{Digest, DigestEntry, FileType, FolderRecord};
pub use writer::{JsonWriter, OutputFormat, XmlWriter, YamlWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
