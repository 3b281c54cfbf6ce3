//! Basic level information record.

use bytemuck::Zeroable;

use crate::encoding::{Encode, PositionalDecoder, PositionalEncoder, Record};
use crate::error::FormatResult;

/// Size of the level information record in bytes.
pub const LEVEL_INFORMATION_SIZE: usize = 0x3A;

/// Basic properties of a level: map dimensions and the realm it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroable)]
pub struct LevelInformation {
    /// Map width in tiles.
    pub x_size: u32,
    /// Map height in tiles.
    pub y_size: u32,
    /// log2 of the map width.
    pub x_shift: u32,
    /// log2 of the map height.
    pub y_shift: u32,
    /// Runtime pointer slot, always zero on disk.
    pub unknown_0010: [u8; 4],
    /// Nonzero for cyberspace levels.
    pub cyberspace: u8,
    /// Unknown.
    pub unknown_0015: [u8; 9],
    /// Unknown.
    pub unknown_001e: [u8; 0x1C],
}

impl LevelInformation {
    /// Map width of a freshly constructed level.
    pub const DEFAULT_SIZE: u32 = 64;
    /// log2 of `DEFAULT_SIZE`.
    pub const DEFAULT_SHIFT: u32 = 6;
}

impl Default for LevelInformation {
    fn default() -> Self {
        Self {
            x_size: Self::DEFAULT_SIZE,
            y_size: Self::DEFAULT_SIZE,
            x_shift: Self::DEFAULT_SHIFT,
            y_shift: Self::DEFAULT_SHIFT,
            ..Zeroable::zeroed()
        }
    }
}

impl Encode for LevelInformation {
    fn encoded_len(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self, encoder: &mut PositionalEncoder) {
        encoder.write_u32(self.x_size);
        encoder.write_u32(self.y_size);
        encoder.write_u32(self.x_shift);
        encoder.write_u32(self.y_shift);
        encoder.write_pod(&self.unknown_0010);
        encoder.write_u8(self.cyberspace);
        encoder.write_pod(&self.unknown_0015);
        encoder.write_pod(&self.unknown_001e);
    }
}

impl Record for LevelInformation {
    const SIZE: usize = LEVEL_INFORMATION_SIZE;

    fn decode(decoder: &mut PositionalDecoder<'_>) -> FormatResult<Self> {
        Ok(Self {
            x_size: decoder.read_u32()?,
            y_size: decoder.read_u32()?,
            x_shift: decoder.read_u32()?,
            y_shift: decoder.read_u32()?,
            unknown_0010: decoder.read_pod()?,
            cyberspace: decoder.read_u8()?,
            unknown_0015: decoder.read_pod()?,
            unknown_001e: decoder.read_pod()?,
        })
    }
}
