use flate2::Crc;
use flate2::read::DeflateDecoder;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::io::{LocalFileReader, ReadAt};

use super::ZipError;
use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// Initial capacity of a freshly allocated entry buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 32 * 1024;

/// Default upper bound on the uncompressed size of a single entry (64 MiB).
pub const DEFAULT_ENTRY_SIZE_LIMIT: u64 = 64 * 1024 * 1024;

/// An opened ZIP container with its central directory already parsed.
pub struct ZipArchive<R: ReadAt> {
    parser: ZipParser<R>,
    entries: Vec<ZipFileEntry>,
    size_limit: u64,
}

impl ZipArchive<LocalFileReader> {
    /// Open the archive at `path` and read its central directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArchiveOpen`] if the file is missing, unreadable or
    /// not a ZIP archive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let archive_open = |source: ZipError| Error::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        };

        let reader = LocalFileReader::new(path).map_err(|e| archive_open(e.into()))?;
        let archive = Self::new(reader).map_err(archive_open)?;

        tracing::debug!(
            path = %path.display(),
            entries = archive.entries.len(),
            "opened archive"
        );
        Ok(archive)
    }
}

impl<R: ReadAt> ZipArchive<R> {
    pub fn new(reader: R) -> std::result::Result<Self, ZipError> {
        let parser = ZipParser::new(reader);
        let entries = parser.list_files()?;
        Ok(Self {
            parser,
            entries,
            size_limit: DEFAULT_ENTRY_SIZE_LIMIT,
        })
    }

    /// Cap the uncompressed size of any entry this archive will extract.
    pub fn with_size_limit(mut self, limit: u64) -> Self {
        self.size_limit = limit;
        self
    }

    pub fn entries(&self) -> &[ZipFileEntry] {
        &self.entries
    }

    /// Look up a file entry by exact, case-sensitive name.
    pub fn find(&self, name: &str) -> Option<&ZipFileEntry> {
        self.entries
            .iter()
            .find(|e| !e.is_directory && e.file_name == name)
    }

    /// Append the uncompressed content of entry `name` to `output`.
    ///
    /// `output` is only touched once the entry has been fully decoded and
    /// verified; on error it is left exactly as it was.
    pub fn read_entry(&self, name: &str, output: &mut Vec<u8>) -> Result<()> {
        let entry = self.find(name).ok_or_else(|| Error::EntryNotFound {
            entry: name.to_string(),
        })?;

        let data = self
            .extract_to_memory(entry)
            .map_err(|source| Error::Extraction {
                entry: name.to_string(),
                source,
            })?;

        tracing::trace!(entry = name, bytes = data.len(), "extracted entry");
        output.extend_from_slice(&data);
        Ok(())
    }

    /// Decode one entry into a new buffer, verifying its size and CRC-32.
    pub fn extract_to_memory(&self, entry: &ZipFileEntry) -> std::result::Result<Vec<u8>, ZipError> {
        if entry.is_encrypted() {
            return Err(ZipError::Encrypted);
        }
        if entry.uncompressed_size > self.size_limit {
            return Err(ZipError::TooLarge {
                size: entry.uncompressed_size,
                limit: self.size_limit,
            });
        }

        let data_offset = self.parser.get_data_offset(entry)?;
        match data_offset.checked_add(entry.compressed_size) {
            Some(end) if end <= self.parser.size() => {}
            _ => return Err(ZipError::Truncated),
        }

        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser.reader().read_exact_at(data_offset, &mut raw)?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => {
                let mut out = Vec::with_capacity(entry.uncompressed_size as usize);
                // One byte past the declared size is enough to detect overruns
                DeflateDecoder::new(raw.as_slice())
                    .take(entry.uncompressed_size.saturating_add(1))
                    .read_to_end(&mut out)
                    .map_err(ZipError::Decompress)?;
                out
            }
            CompressionMethod::Unknown(method) => {
                return Err(ZipError::UnsupportedCompression(method));
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            return Err(ZipError::SizeMismatch {
                expected: entry.uncompressed_size,
                actual: data.len() as u64,
            });
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            return Err(ZipError::ChecksumMismatch {
                expected: entry.crc32,
                actual: crc.sum(),
            });
        }

        Ok(data)
    }
}

/// Extract entry `entry_name` of the archive at `archive_path`, appending its
/// bytes to `output`.
///
/// Opens the archive, extracts a single entry and closes it again. On any
/// failure `output` is left unmodified.
///
/// # Errors
///
/// - [`Error::ArchiveOpen`] if the archive cannot be opened or is not a zip
/// - [`Error::EntryNotFound`] if no file entry has exactly this name
/// - [`Error::Extraction`] if the entry data is corrupt or unsupported
pub fn extract(archive_path: impl AsRef<Path>, entry_name: &str, output: &mut Vec<u8>) -> Result<()> {
    ZipArchive::open(archive_path)?.read_entry(entry_name, output)
}

/// Like [`extract`], returning the entry in a freshly allocated buffer.
pub fn extract_to_vec(archive_path: impl AsRef<Path>, entry_name: &str) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(DEFAULT_BUFFER_CAPACITY);
    extract(archive_path, entry_name, &mut output)?;
    Ok(output)
}
