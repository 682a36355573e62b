//! Owned XML trees and the prefix-matching collectors that walk them.

mod collect;
mod node;

pub use collect::{
    AttributeValues, CollectOptions, TextFragments, attribute_values, collect_attribute,
    collect_text, text_fragments,
};
pub use node::{MAX_DEPTH, ParseOptions, XmlElement, XmlNode, parse_xml};
