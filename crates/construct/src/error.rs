//! # Generator Error Types
//!
//! All errors that can occur while generating an archive.

use construct_archive::ArchiveError;
use construct_format::FormatError;
use thiserror::Error;

/// Errors that can occur while generating an archive.
#[derive(Error, Debug)]
pub enum ConstructError {
    /// Invalid record or table parameters.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The chunk container failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The level's identifier block does not fit the identifier space.
    #[error("level {0} does not fit the resource identifier space")]
    LevelOutOfRange(u16),

    /// Two layout entries share an offset.
    #[error("layout offset {0} used twice")]
    DuplicateLayoutOffset(u16),

    /// A layout offset lies outside the level's identifier block.
    #[error("layout offset {offset} outside the level block of {stride} identifiers")]
    LayoutOffsetOutOfRange {
        /// The offending offset.
        offset: u16,
        /// Size of a level block.
        stride: u16,
    },

    /// The archive name cannot be stored.
    #[error("invalid archive name: {0:?}")]
    InvalidArchiveName(String),

    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for generator operations.
pub type ConstructResult<T> = Result<T, ConstructError>;
