/*!
 * JSON and YAML writers
 */

use crate::config::Config;
use crate::error::Result;
use crate::types::Digest;

use super::Document;

/// Object-notation writer
pub struct JsonWriter {
    config: Config,
}

impl JsonWriter {
    /// Create a new JSON writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render the digest as two-space indented JSON
    pub fn render(&self, digest: &Digest) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&Document::new(digest, &self.config))?;
        json.push('\n');
        Ok(json)
    }
}

/// Mapping-notation writer
pub struct YamlWriter {
    config: Config,
}

impl YamlWriter {
    /// Create a new YAML writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render the digest as block-style YAML
    pub fn render(&self, digest: &Digest) -> Result<String> {
        Ok(serde_yaml::to_string(&Document::new(digest, &self.config))?)
    }
}
