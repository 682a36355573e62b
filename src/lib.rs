//! # odmeta
//!
//! Extract searchable text and metadata from zip-based office documents.
//!
//! An OpenDocument file is a ZIP archive of XML members. This library pulls
//! individual members out of the archive, parses them into an owned tree and
//! walks that tree collecting text and attribute values under elements whose
//! names start with a given prefix. The results are gathered into a flat
//! [`MetadataMap`] for a search indexer.
//!
//! ## Features
//!
//! - Single-entry extraction from local ZIP files, including ZIP64 archives
//! - STORED and DEFLATE members with CRC-32 verification
//! - Prefix-matching text and attribute collection, exposed as iterators
//! - A configurable prefix-to-key schema with an OpenDocument default
//!
//! ## Example
//!
//! ```no_run
//! use odmeta::{extract_document_metadata, extract_to_vec};
//!
//! // Everything the default schema finds in meta.xml and styles.xml
//! let metadata = extract_document_metadata("report.odt");
//! if let Some(title) = metadata.get("title") {
//!     println!("title: {title}");
//! }
//!
//! // Or pull a single member out as bytes
//! let content = extract_to_vec("report.odt", "content.xml")?;
//! println!("{} bytes", content.len());
//! # Ok::<(), odmeta::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod metadata;
pub mod xml;
pub mod zip;

pub use config::ExtractorConfig;
pub use error::{Error, Result};
pub use io::{LocalFileReader, ReadAt};
pub use metadata::{MetadataExtractor, MetadataMap, MetadataSchema, extract_document_metadata};
pub use xml::{CollectOptions, XmlElement, XmlNode, collect_attribute, collect_text};
pub use crate::zip::{ZipArchive, ZipError, ZipFileEntry, extract, extract_to_vec};
