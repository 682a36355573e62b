//! Document metadata extraction.
//!
//! [`MetadataExtractor`] opens a document container, pulls each entry named
//! by its [`MetadataSchema`] out of it, parses the XML and runs the entry's
//! rules through the collectors in [`crate::xml`]. Failures never escape: an
//! entry that cannot be extracted or parsed contributes no keys, and the
//! remaining entries are still processed.

mod map;
mod schema;

pub use map::MetadataMap;
pub use schema::{AttributeRule, EntryRules, META_ENTRY, MetadataSchema, STYLES_ENTRY, TextRule};

use std::path::Path;

use crate::config::ExtractorConfig;
use crate::error::{Error, Result};
use crate::io::ReadAt;
use crate::xml::{XmlNode, collect_attribute, collect_text, parse_xml};
use crate::zip::{DEFAULT_BUFFER_CAPACITY, ZipArchive};

#[derive(Debug, Clone, Default)]
pub struct MetadataExtractor {
    config: ExtractorConfig,
}

impl MetadataExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extractor using the given schema and default settings otherwise.
    pub fn with_schema(schema: MetadataSchema) -> Self {
        Self::new(ExtractorConfig {
            schema,
            ..ExtractorConfig::default()
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract metadata from the document at `path`.
    ///
    /// Never fails: an unreadable archive yields an empty map, and each entry
    /// that fails contributes nothing.
    pub fn extract(&self, path: impl AsRef<Path>) -> MetadataMap {
        let path = path.as_ref();
        match ZipArchive::open(path) {
            Ok(archive) => self.extract_from_archive(&archive),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping unreadable document");
                MetadataMap::new()
            }
        }
    }

    /// Extract metadata from an already opened archive.
    pub fn extract_from_archive<R: ReadAt>(&self, archive: &ZipArchive<R>) -> MetadataMap {
        let mut map = MetadataMap::new();

        for rules in &self.config.schema.entries {
            match self.load_entry(archive, &rules.entry) {
                Ok(tree) => self.apply_rules(rules, &tree, &mut map),
                Err(error @ Error::EntryNotFound { .. }) => {
                    tracing::debug!(entry = %rules.entry, %error, "entry absent, skipping");
                }
                Err(error) => {
                    tracing::warn!(entry = %rules.entry, %error, "entry unusable, skipping");
                }
            }
        }

        map
    }

    /// Run one entry's rules over its parsed tree, merging into `map`.
    ///
    /// Rules sharing a key append to the same value; keys that collect
    /// nothing are left out.
    pub fn apply_rules(&self, rules: &EntryRules, tree: &XmlNode, map: &mut MetadataMap) {
        let options = self.config.collect_options();

        for rule in &rules.text {
            let mut value = String::new();
            collect_text(&rule.prefix, tree, &mut value, &options);
            if !value.is_empty() {
                map.append(&rule.key, &value);
            }
        }

        for rule in &rules.attributes {
            let mut value = String::new();
            collect_attribute(&rule.prefix, &rule.attribute, tree, &mut value, &options.separator);
            if !value.is_empty() {
                map.append(&rule.key, &value);
            }
        }
    }

    fn load_entry<R: ReadAt>(&self, archive: &ZipArchive<R>, entry: &str) -> Result<XmlNode> {
        let mut bytes = Vec::with_capacity(DEFAULT_BUFFER_CAPACITY);
        archive.read_entry(entry, &mut bytes)?;
        parse_xml(entry, &bytes, &self.config.parse_options())
    }
}

/// Extract metadata from the OpenDocument container at `archive_path` with
/// the default configuration.
pub fn extract_document_metadata(archive_path: impl AsRef<Path>) -> MetadataMap {
    MetadataExtractor::default().extract(archive_path)
}
