use serde::{Deserialize, Serialize};

/// Archive member holding document-level metadata.
pub const META_ENTRY: &str = "meta.xml";

/// Archive member holding styles, including page headers and footers.
pub const STYLES_ENTRY: &str = "styles.xml";

/// Collect the text under elements starting with `prefix` into `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRule {
    pub prefix: String,
    pub key: String,
}

/// Collect `attribute` from elements starting with `prefix` into `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRule {
    pub prefix: String,
    pub attribute: String,
    pub key: String,
}

/// The rules applied to one archive entry, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRules {
    pub entry: String,
    #[serde(default)]
    pub text: Vec<TextRule>,
    #[serde(default)]
    pub attributes: Vec<AttributeRule>,
}

impl EntryRules {
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            text: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn text(mut self, prefix: impl Into<String>, key: impl Into<String>) -> Self {
        self.text.push(TextRule {
            prefix: prefix.into(),
            key: key.into(),
        });
        self
    }

    pub fn attribute(
        mut self,
        prefix: impl Into<String>,
        attribute: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        self.attributes.push(AttributeRule {
            prefix: prefix.into(),
            attribute: attribute.into(),
            key: key.into(),
        });
        self
    }

    /// Every metadata key this entry can produce.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.text
            .iter()
            .map(|r| r.key.as_str())
            .chain(self.attributes.iter().map(|r| r.key.as_str()))
    }
}

/// Which elements of which entries feed which metadata keys.
///
/// [`MetadataSchema::default`] is the OpenDocument mapping over `meta.xml`
/// and `styles.xml`. Rules sharing a key accumulate into one value in rule
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSchema {
    pub entries: Vec<EntryRules>,
}

impl MetadataSchema {
    pub fn new(entries: Vec<EntryRules>) -> Self {
        Self { entries }
    }

    pub fn opendocument() -> Self {
        let statistic = "meta:document-statistic";
        let meta = EntryRules::new(META_ENTRY)
            .text("dc:title", "title")
            .text("dc:subject", "subject")
            .text("dc:description", "description")
            .text("meta:keyword", "keywords")
            .text("dc:creator", "author")
            .text("meta:initial-creator", "initial_author")
            .text("dc:language", "language")
            .text("meta:generator", "generator")
            .text("meta:creation-date", "creation_date")
            .text("dc:date", "modification_date")
            .text("meta:editing-cycles", "editing_cycles")
            .text("meta:editing-duration", "editing_duration")
            .text("meta:user-defined", "user_defined")
            .attribute("meta:user-defined", "meta:name", "user_defined_names")
            .attribute(statistic, "meta:page-count", "page_count")
            .attribute(statistic, "meta:word-count", "word_count")
            .attribute(statistic, "meta:character-count", "character_count")
            .attribute(statistic, "meta:paragraph-count", "paragraph_count")
            .attribute(statistic, "meta:table-count", "table_count")
            .attribute(statistic, "meta:image-count", "image_count")
            .attribute(statistic, "meta:object-count", "object_count");

        // Prefix matching also picks up the -left and -first variants
        let styles = EntryRules::new(STYLES_ENTRY)
            .text("style:header", "header")
            .text("style:footer", "footer");

        Self::new(vec![meta, styles])
    }
}

impl Default for MetadataSchema {
    fn default() -> Self {
        Self::opendocument()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_covers_both_entries() {
        let schema = MetadataSchema::default();
        let entries: Vec<_> = schema.entries.iter().map(|e| e.entry.as_str()).collect();
        assert_eq!(entries, vec![META_ENTRY, STYLES_ENTRY]);

        let meta_keys: Vec<_> = schema.entries[0].keys().collect();
        assert!(meta_keys.contains(&"title"));
        assert!(meta_keys.contains(&"author"));
        assert!(meta_keys.contains(&"page_count"));

        let styles_keys: Vec<_> = schema.entries[1].keys().collect();
        assert_eq!(styles_keys, vec!["header", "footer"]);
    }

    #[test]
    fn test_entry_rules_builder_keeps_order() {
        let rules = EntryRules::new("meta.xml")
            .text("dc:creator", "author")
            .text("meta:initial-creator", "author")
            .attribute("meta:document-statistic", "meta:word-count", "words");
        assert_eq!(rules.text.len(), 2);
        assert_eq!(rules.text[1].prefix, "meta:initial-creator");
        assert_eq!(rules.keys().collect::<Vec<_>>(), vec!["author", "author", "words"]);
    }
}
