use crate::error::{Error, Result};

/// Deepest element nesting accepted when building a tree.
pub const MAX_DEPTH: usize = 1024;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A node of an owned XML tree.
///
/// Character data is stored as [`XmlNode::Text`] children so that mixed
/// content keeps its document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its qualified name (`prefix:local` as written in the
/// document), attributes in document order and owned children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<XmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(XmlNode::Text(text.into()))
    }

    /// Value of the first attribute with exactly this qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<XmlElement> for XmlNode {
    fn from(element: XmlElement) -> Self {
        XmlNode::Element(element)
    }
}

impl XmlNode {
    pub fn text(text: impl Into<String>) -> Self {
        XmlNode::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }

    /// Tag name for elements, `None` for text.
    pub fn name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.as_str())
    }
}

/// Options controlling how an XML payload becomes an [`XmlNode`] tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep text nodes consisting only of whitespace (indentation between
    /// elements). Off by default.
    pub keep_whitespace_text: bool,
}

/// Parse the bytes of archive entry `entry` into an owned tree rooted at the
/// document element.
///
/// The payload must be UTF-8; a leading byte-order mark is ignored.
/// Comments and processing instructions are dropped.
///
/// # Errors
///
/// Returns [`Error::Parse`] for invalid UTF-8, malformed XML, or nesting
/// deeper than [`MAX_DEPTH`].
pub fn parse_xml(entry: &str, bytes: &[u8], options: &ParseOptions) -> Result<XmlNode> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::parse(entry, format!("invalid UTF-8: {e}")))?;

    // OpenOffice.org 1.x members declare an external DTD that is never fetched
    let parsing = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(text, parsing)
        .map_err(|e| Error::parse(entry, e.to_string()))?;

    let root = convert_element(document.root_element(), options, 0)
        .map_err(|message| Error::parse(entry, message))?;
    Ok(XmlNode::Element(root))
}

fn convert_element(
    node: roxmltree::Node<'_, '_>,
    options: &ParseOptions,
    depth: usize,
) -> std::result::Result<XmlElement, String> {
    if depth >= MAX_DEPTH {
        return Err(format!("element nesting exceeds {MAX_DEPTH} levels"));
    }

    let attributes = node
        .attributes()
        .map(|attr| {
            let written = node.document().input_text().get(attr.range_qname());
            let name = written
                .and_then(|written| as_written(written, attr.name()))
                .unwrap_or_else(|| qualified_name(node, attr.namespace(), attr.name()));
            (name, attr.value().to_string())
        })
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(XmlNode::Element(convert_element(child, options, depth + 1)?));
        } else if child.is_text() {
            let text = child.text().unwrap_or_default();
            if options.keep_whitespace_text || !text.trim().is_empty() {
                children.push(XmlNode::Text(text.to_string()));
            }
        }
    }

    Ok(XmlElement {
        name: element_name(node),
        attributes,
        children,
    })
}

/// The tag name exactly as written in the element's start tag.
fn element_name(node: roxmltree::Node<'_, '_>) -> String {
    let tag = node.tag_name();
    node.document()
        .input_text()
        .get(node.range().start + 1..)
        .and_then(|source| {
            source
                .split(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
                .next()
        })
        .and_then(|written| as_written(written, tag.name()))
        .unwrap_or_else(|| qualified_name(node, tag.namespace(), tag.name()))
}

/// Accept `written` as a source name only if it ends in `local`.
///
/// Nodes produced by entity expansion point outside the input text, so their
/// spans cannot be trusted.
fn as_written(written: &str, local: &str) -> Option<String> {
    let local_matches = match written.split_once(':') {
        Some((_, written_local)) => written_local == local,
        None => written == local,
    };
    local_matches.then(|| written.to_string())
}

/// Rebuild `prefix:local` from a resolved name, using the prefix in scope at
/// `node`. Names in the default namespace stay unprefixed.
fn qualified_name(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}
