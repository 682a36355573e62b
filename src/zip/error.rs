use std::io;

use thiserror::Error;

/// Low-level failure while decoding a zip container or one of its entries.
#[derive(Debug, Error)]
pub enum ZipError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("not a valid ZIP file")]
    NotAZip,

    #[error("invalid {0}")]
    InvalidRecord(&'static str),

    #[error("unsupported compression method: {0}")]
    UnsupportedCompression(u16),

    #[error("encrypted entries are not supported")]
    Encrypted,

    #[error("entry is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("entry data is truncated")]
    Truncated,

    #[error("corrupt deflate stream: {0}")]
    Decompress(#[source] io::Error),

    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("CRC-32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}
