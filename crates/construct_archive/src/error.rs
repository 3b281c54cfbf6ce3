//! # Archive Error Types
//!
//! All errors that can occur while writing a container.

use construct_format::ResourceId;
use thiserror::Error;

/// Errors that can occur in the chunk container.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The destination could not be written.
    #[error("archive i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// A resource identifier was emitted twice.
    #[error("resource {0} emitted twice")]
    DuplicateResource(ResourceId),

    /// A chunk does not fit the 24-bit length fields of the directory.
    #[error("chunk {id} is {length} bytes, maximum is {max}")]
    ChunkTooLarge {
        /// The offending chunk.
        id: ResourceId,
        /// Its length in bytes.
        length: usize,
        /// Largest representable length.
        max: usize,
    },

    /// The file grew past the 32-bit directory offset.
    #[error("archive is {size} bytes, directory offsets are limited to {max}")]
    FileTooLarge {
        /// Position the directory would start at.
        size: u64,
        /// Largest representable offset.
        max: u64,
    },

    /// The directory cannot hold more chunks.
    #[error("directory full: at most {0} chunks")]
    TooManyChunks(usize),

    /// The container was already finalized.
    #[error("archive already finished")]
    AlreadyFinished,

    /// A compressed chunk could not be unpacked.
    #[error("corrupt compressed chunk: {0}")]
    CorruptChunk(String),
}

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
