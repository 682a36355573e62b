//! ZIP archive parsing and single-entry extraction.
//!
//! Office containers (OpenDocument, OOXML) are plain ZIP archives whose
//! members are XML documents. This module reads just enough of the format to
//! pull one named member out as bytes.
//!
//! ## Architecture
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`extractor`]: The archive handle and the [`extract`] entry points
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! The EOCD is read first (from the end of the file), then the Central
//! Directory; only the requested member's data is ever decompressed.
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 extensions for files > 4GB
//! - STORED (no compression) and DEFLATE methods
//! - CRC-32 verification of extracted data
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods

mod error;
mod extractor;
mod parser;
mod structures;

pub use error::ZipError;
pub use extractor::{
    DEFAULT_BUFFER_CAPACITY, DEFAULT_ENTRY_SIZE_LIMIT, ZipArchive, extract, extract_to_vec,
};
pub use parser::ZipParser;
pub use structures::*;
