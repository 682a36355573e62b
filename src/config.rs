//! Extractor configuration.
//!
//! Every field has a default, so a configuration file only needs the values
//! it changes:
//!
//! ```toml
//! separator = "; "
//! max_entry_size = 1048576
//!
//! [[schema.entries]]
//! entry = "meta.xml"
//! text = [{ prefix = "dc:title", key = "title" }]
//! attributes = [
//!     { prefix = "meta:document-statistic", attribute = "meta:page-count", key = "pages" },
//! ]
//! ```
//!
//! Supplying `schema.entries` replaces the OpenDocument schema entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metadata::MetadataSchema;
use crate::xml::{CollectOptions, ParseOptions};
use crate::zip::DEFAULT_ENTRY_SIZE_LIMIT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Appended after every collected text fragment or attribute value.
    pub separator: String,
    /// Largest uncompressed entry, in bytes, that will be extracted.
    pub max_entry_size: u64,
    /// Keep whitespace-only text nodes when parsing entries.
    pub keep_whitespace_text: bool,
    pub schema: MetadataSchema,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            separator: CollectOptions::default().separator,
            max_entry_size: DEFAULT_ENTRY_SIZE_LIMIT,
            keep_whitespace_text: false,
            schema: MetadataSchema::default(),
        }
    }
}

impl ExtractorConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the TOML is invalid or the result fails
    /// [`validate`](Self::validate).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { message } => Error::config(format!("{}: {message}", path.display())),
            other => other,
        })
    }

    /// Reject configurations that could never produce metadata.
    pub fn validate(&self) -> Result<()> {
        if self.max_entry_size == 0 {
            return Err(Error::config("max_entry_size must be greater than zero"));
        }
        for rules in &self.schema.entries {
            if rules.entry.is_empty() {
                return Err(Error::config("schema entry name must not be empty"));
            }
            if rules.keys().any(str::is_empty) {
                return Err(Error::config(format!(
                    "schema rules for {} contain an empty key",
                    rules.entry
                )));
            }
        }
        Ok(())
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions::with_separator(self.separator.clone())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            keep_whitespace_text: self.keep_whitespace_text,
        }
    }
}
