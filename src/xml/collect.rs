//! Prefix-driven text and attribute collection over an [`XmlNode`] tree.
//!
//! Both walks are pre-order. An element *matches* when its qualified name
//! starts with the caller's prefix, so `style:header` also selects
//! `style:header-left`, and an empty prefix selects every element.
//!
//! - Text collection absorbs: once an element matches, every text node below
//!   it is emitted, whatever the names of the elements in between.
//! - Attribute collection does not: each element contributes its own
//!   attribute value only if it matches itself.
//!
//! The walks are exposed as iterators ([`text_fragments`],
//! [`attribute_values`]); [`collect_text`] and [`collect_attribute`] append
//! their output to a string, each value followed by the separator.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use super::node::XmlNode;

/// Separator and absorption mode for one [`collect_text`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectOptions {
    /// Appended after every collected fragment, including the last.
    pub separator: String,
    /// Start the walk already absorbing, so all text under the root is
    /// collected regardless of the prefix.
    pub absorb_subtree: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            absorb_subtree: false,
        }
    }
}

impl CollectOptions {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }
}

/// Text fragments selected by a prefix, in document order.
///
/// Created by [`text_fragments`].
#[derive(Debug)]
pub struct TextFragments<'a> {
    prefix: &'a str,
    /// Pending nodes with the absorption state they are visited in.
    stack: Vec<(&'a XmlNode, bool)>,
}

impl<'a> Iterator for TextFragments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some((node, absorbing)) = self.stack.pop() {
            match node {
                XmlNode::Text(text) if absorbing => return Some(text.as_str()),
                XmlNode::Text(_) => {}
                XmlNode::Element(element) => {
                    let absorbing = absorbing || element.name.starts_with(self.prefix);
                    self.stack
                        .extend(element.children.iter().rev().map(|child| (child, absorbing)));
                }
            }
        }
        None
    }
}

impl FusedIterator for TextFragments<'_> {}

/// Walk `node` and yield the text of every text node inside an element whose
/// name starts with `prefix`.
///
/// With `absorb_subtree` set, absorption is active from the start and all
/// text under `node` is yielded.
pub fn text_fragments<'a>(prefix: &'a str, node: &'a XmlNode, absorb_subtree: bool) -> TextFragments<'a> {
    TextFragments {
        prefix,
        stack: vec![(node, absorb_subtree)],
    }
}

/// Attribute values of elements matched by a prefix, in document order.
///
/// Created by [`attribute_values`].
#[derive(Debug)]
pub struct AttributeValues<'a> {
    prefix: &'a str,
    attribute_name: &'a str,
    stack: Vec<&'a XmlNode>,
}

impl<'a> Iterator for AttributeValues<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(node) = self.stack.pop() {
            let XmlNode::Element(element) = node else {
                continue;
            };
            self.stack.extend(element.children.iter().rev());

            if element.name.starts_with(self.prefix)
                && let Some(value) = element.attribute(self.attribute_name)
            {
                return Some(value);
            }
        }
        None
    }
}

impl FusedIterator for AttributeValues<'_> {}

/// Walk `node` and yield the value of `attribute_name` on every element
/// whose name starts with `prefix`. Matching elements lacking the attribute
/// are skipped.
pub fn attribute_values<'a>(
    prefix: &'a str,
    attribute_name: &'a str,
    node: &'a XmlNode,
) -> AttributeValues<'a> {
    AttributeValues {
        prefix,
        attribute_name,
        stack: vec![node],
    }
}

/// Append every fragment of [`text_fragments`] to `output`, each followed by
/// `options.separator`. Existing content of `output` is kept.
pub fn collect_text(prefix: &str, node: &XmlNode, output: &mut String, options: &CollectOptions) {
    for fragment in text_fragments(prefix, node, options.absorb_subtree) {
        output.push_str(fragment);
        output.push_str(&options.separator);
    }
}

/// Append every value of [`attribute_values`] to `output`, each followed by
/// `separator`. Existing content of `output` is kept.
pub fn collect_attribute(
    prefix: &str,
    attribute_name: &str,
    node: &XmlNode,
    output: &mut String,
    separator: &str,
) {
    for value in attribute_values(prefix, attribute_name, node) {
        output.push_str(value);
        output.push_str(separator);
    }
}
