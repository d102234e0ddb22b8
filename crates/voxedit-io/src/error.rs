use std::io;

use thiserror::Error;

/// Problems decoding one blob.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlobError {
    /// Wrong magic or an unsupported version. Callers fall back to defaults.
    #[error("bad signature: expected {expected:#010x}, found {found:#010x}")]
    BadSignature { expected: u32, found: u32 },

    /// Payload shorter or longer than its header implies.
    #[error("corrupt length: expected {expected} bytes, found {actual}")]
    CorruptLength { expected: usize, actual: usize },

    /// Header dimensions that cannot describe a volume (negative or overflowing).
    #[error("invalid volume dimensions {size:?}")]
    BadDimensions { size: [i32; 3] },

    /// Origin places cells where neighbour coordinates would overflow `i32`.
    #[error("volume origin {origin:?} out of range for size {size:?}")]
    BadOrigin { origin: [i32; 3], size: [i32; 3] },
}

impl BlobError {
    /// Corruption is fatal to a load; a bad signature is not.
    #[inline]
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, BlobError::BadSignature { .. })
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Neither a container nor a raw volume blob.
    #[error("unrecognized file format ({0})")]
    UnrecognizedFormat(BlobError),

    #[error("corrupt container header: {0}")]
    CorruptHeader(String),

    /// The volume payload is damaged; nothing is loaded.
    #[error("corrupt volume data: {0}")]
    Volume(BlobError),
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Encoded data does not fit the 32-bit offsets of the format.
    #[error("document too large to encode ({0} bytes)")]
    TooLarge(usize),
}

/// Something noteworthy about one container block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockIssue {
    /// Entry has size 0; defaults were used.
    #[error("absent, defaults used")]
    Absent,
    #[error("bad signature {found:#010x} (expected {expected:#010x}), defaults used")]
    BadSignature { expected: u32, found: u32 },
    /// Damaged sibling block (light or render config); defaults were used.
    #[error("{0}, defaults used")]
    Corrupt(BlobError),
    #[error("offset {offset} size {size} outside file of {file_len} bytes, defaults used")]
    BoundsViolation {
        offset: i32,
        size: i32,
        file_len: usize,
    },
    /// Block decoded, but the end marker after it was wrong.
    #[error("missing end marker")]
    MissingEndMarker,
}
