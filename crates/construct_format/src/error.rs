//! # Format Error Types
//!
//! All errors that can occur while building or coding records.

use thiserror::Error;

/// Errors that can occur in the format layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A table was requested with zero entries.
    #[error("table must hold at least one entry")]
    EmptyTable,

    /// A table has more entries than a 16-bit index can address.
    #[error("table of {count} entries exceeds the addressable maximum of {max}")]
    TableTooLarge {
        /// Requested entry count.
        count: usize,
        /// Largest supported entry count.
        max: usize,
    },

    /// A class entry is narrower than the mandatory object prefix.
    #[error("entry width {width} is smaller than the {prefix}-byte object prefix")]
    EntryWidthTooSmall {
        /// Declared entry width in bytes.
        width: usize,
        /// Width of the mandatory prefix.
        prefix: usize,
    },

    /// Object class index outside the known catalogue.
    #[error("unknown object class: {0}")]
    UnknownObjectClass(u8),

    /// Decoder ran past the end of its input.
    #[error("unexpected end of data: need {needed} bytes at offset {offset}, have {available}")]
    UnexpectedEnd {
        /// Position of the failed read.
        offset: usize,
        /// Bytes requested.
        needed: usize,
        /// Bytes remaining.
        available: usize,
    },

    /// Tile type byte outside the known terrain kinds.
    #[error("invalid tile type: {0:#04x}")]
    InvalidTileType(u8),
}

/// Result type for format operations.
pub type FormatResult<T> = Result<T, FormatError>;
