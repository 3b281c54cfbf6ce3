//! # Resources and Chunks
//!
//! Every unit of an archive is a chunk addressed by a 16-bit resource
//! identifier.
//!
//! ## Identifier Space
//!
//! ```text
//! 0x0FA0          archive name
//! 0x0FA1          game state
//! 4000 + 100 * L  base of level L; level resources are base + offset
//! ```

use std::fmt;

/// Identifier of the archive name chunk.
pub const ARCHIVE_NAME_ID: ResourceId = ResourceId(0x0FA0);

/// Identifier of the game state chunk.
pub const GAME_STATE_ID: ResourceId = ResourceId(0x0FA1);

/// First identifier of the level blocks.
pub const LEVEL_BASE: u16 = 4000;

/// Identifiers reserved per level.
pub const LEVEL_STRIDE: u16 = 100;

/// Key of one chunk in the archive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u16);

impl ResourceId {
    /// Creates a new identifier.
    #[inline]
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Base identifier of the given level, or None if the level's block
    /// does not fit the identifier space.
    #[must_use]
    pub fn level_base(level: u16) -> Option<Self> {
        let base = level.checked_mul(LEVEL_STRIDE)?.checked_add(LEVEL_BASE)?;
        // The whole block must be addressable, not just its base.
        base.checked_add(LEVEL_STRIDE - 1)?;
        Some(Self(base))
    }

    /// Identifier `offset` entries after this one.
    #[must_use]
    pub fn offset(self, offset: u16) -> Option<Self> {
        self.0.checked_add(offset).map(Self)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#06x})", self.0, self.0)
    }
}

impl From<u16> for ResourceId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Storage type of a chunk.
///
/// Bit 0 flags the chunk as compressed. The generator only sets the flag;
/// the container performs the compression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChunkType {
    /// Stored as-is.
    #[default]
    Basic = 0x00,
    /// Stored compressed.
    BasicCompressed = 0x01,
}

impl ChunkType {
    /// Flag bit marking a compressed chunk.
    pub const COMPRESSION_FLAG: u8 = 0x01;

    /// Returns the compressed variant of this type.
    #[inline]
    #[must_use]
    pub const fn with_compression(self) -> Self {
        match self {
            Self::Basic | Self::BasicCompressed => Self::BasicCompressed,
        }
    }

    /// Returns true if the container must compress this chunk.
    #[inline]
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        (self as u8) & Self::COMPRESSION_FLAG != 0
    }

    /// Converts from u8.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Basic),
            0x01 => Some(Self::BasicCompressed),
            _ => None,
        }
    }
}

/// Kind of payload a chunk holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ContentType {
    /// Color palette.
    Palette = 0x00,
    /// Text strings.
    Text = 0x01,
    /// Bitmap images.
    Bitmap = 0x02,
    /// Font data.
    Font = 0x03,
    /// Video clip.
    Animation = 0x04,
    /// Audio samples.
    Sound = 0x07,
    /// 3D geometry.
    Geometry = 0x0F,
    /// Movie data.
    Movie = 0x11,
    /// Level and game state data.
    #[default]
    Map = 0x30,
}

/// One named, typed unit of archive payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chunk {
    /// Storage type.
    pub chunk_type: ChunkType,
    /// Payload kind.
    pub content_type: ContentType,
    /// Raw blocks of the chunk.
    pub blocks: Vec<Vec<u8>>,
}

impl Chunk {
    /// Creates a chunk holding a single block.
    #[must_use]
    pub fn single(chunk_type: ChunkType, content_type: ContentType, data: Vec<u8>) -> Self {
        Self {
            chunk_type,
            content_type,
            blocks: vec![data],
        }
    }

    /// Total length of all blocks in bytes.
    #[must_use]
    pub fn data_len(&self) -> usize {
        self.blocks.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_base() {
        assert_eq!(ResourceId::level_base(0), Some(ResourceId(4000)));
        assert_eq!(ResourceId::level_base(1), Some(ResourceId(4100)));
        assert_eq!(ResourceId::level_base(15), Some(ResourceId(5500)));
    }

    #[test]
    fn test_level_base_out_of_range() {
        // 4000 + 100 * 615 = 65500, block end 65599 overflows.
        assert_eq!(ResourceId::level_base(614), Some(ResourceId(65400)));
        assert!(ResourceId::level_base(615).is_none());
        assert!(ResourceId::level_base(u16::MAX).is_none());
    }

    #[test]
    fn test_chunk_type_compression() {
        assert!(!ChunkType::Basic.is_compressed());
        assert!(ChunkType::Basic.with_compression().is_compressed());
        assert_eq!(ChunkType::from_u8(1), Some(ChunkType::BasicCompressed));
        assert_eq!(ChunkType::from_u8(2), None);
    }

    #[test]
    fn test_chunk_data_len() {
        let chunk = Chunk {
            chunk_type: ChunkType::Basic,
            content_type: ContentType::Map,
            blocks: vec![vec![0; 3], vec![1; 5]],
        };
        assert_eq!(chunk.data_len(), 8);
    }
}
