//! # Tile Map Entries
//!
//! One entry per map cell. A level map is a 64x64 row-major grid of these.

use crate::encoding::{Encode, PositionalDecoder, PositionalEncoder, Record};
use crate::error::{FormatError, FormatResult};

/// Size of a tile map entry in bytes.
pub const TILE_MAP_ENTRY_SIZE: usize = 16;

/// Terrain kind of a map cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileType {
    /// Impassable wall.
    #[default]
    Solid = 0x00,
    /// Flat walkable floor.
    Open = 0x01,
    /// Diagonal wall, open towards south-east.
    DiagonalOpenSouthEast = 0x02,
    /// Diagonal wall, open towards south-west.
    DiagonalOpenSouthWest = 0x03,
    /// Diagonal wall, open towards north-west.
    DiagonalOpenNorthWest = 0x04,
    /// Diagonal wall, open towards north-east.
    DiagonalOpenNorthEast = 0x05,
    /// Slope rising to the north.
    SlopeSouthToNorth = 0x06,
    /// Slope rising to the east.
    SlopeWestToEast = 0x07,
    /// Slope rising to the south.
    SlopeNorthToSouth = 0x08,
    /// Slope rising to the west.
    SlopeEastToWest = 0x09,
    /// Valley, low corner south-east.
    ValleySouthEastToNorthWest = 0x0A,
    /// Valley, low corner south-west.
    ValleySouthWestToNorthEast = 0x0B,
    /// Valley, low corner north-west.
    ValleyNorthWestToSouthEast = 0x0C,
    /// Valley, low corner north-east.
    ValleyNorthEastToSouthWest = 0x0D,
    /// Ridge, high corner north-west.
    RidgeNorthWestToSouthEast = 0x0E,
    /// Ridge, high corner north-east.
    RidgeNorthEastToSouthWest = 0x0F,
    /// Ridge, high corner south-east.
    RidgeSouthEastToNorthWest = 0x10,
    /// Ridge, high corner south-west.
    RidgeSouthWestToNorthEast = 0x11,
}

impl TileType {
    /// Converts from u8.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0x00 => Self::Solid,
            0x01 => Self::Open,
            0x02 => Self::DiagonalOpenSouthEast,
            0x03 => Self::DiagonalOpenSouthWest,
            0x04 => Self::DiagonalOpenNorthWest,
            0x05 => Self::DiagonalOpenNorthEast,
            0x06 => Self::SlopeSouthToNorth,
            0x07 => Self::SlopeWestToEast,
            0x08 => Self::SlopeNorthToSouth,
            0x09 => Self::SlopeEastToWest,
            0x0A => Self::ValleySouthEastToNorthWest,
            0x0B => Self::ValleySouthWestToNorthEast,
            0x0C => Self::ValleyNorthWestToSouthEast,
            0x0D => Self::ValleyNorthEastToSouthWest,
            0x0E => Self::RidgeNorthWestToSouthEast,
            0x0F => Self::RidgeNorthEastToSouthWest,
            0x10 => Self::RidgeSouthEastToNorthWest,
            0x11 => Self::RidgeSouthWestToNorthEast,
            _ => return None,
        })
    }
}

/// A single map cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileMapEntry {
    /// Terrain kind.
    pub tile_type: TileType,
    /// Floor height and orientation bits.
    pub floor: u8,
    /// Ceiling height and orientation bits.
    pub ceiling: u8,
    /// Height of the slope, if any.
    pub slope_height: u8,
    /// Head of the cell's object cross-reference chain.
    pub first_object_index: u16,
    /// Packed wall/ceiling/floor texture ids.
    pub textures: u16,
    /// Flag bits (music, lighting, visibility).
    pub flags: u32,
    /// Runtime state.
    pub unknown_state: [u8; 4],
}

impl TileMapEntry {
    /// Creates a zeroed entry of the given terrain kind.
    #[must_use]
    pub fn with_type(tile_type: TileType) -> Self {
        Self {
            tile_type,
            ..Self::default()
        }
    }
}

impl Encode for TileMapEntry {
    fn encoded_len(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self, encoder: &mut PositionalEncoder) {
        encoder.write_u8(self.tile_type as u8);
        encoder.write_u8(self.floor);
        encoder.write_u8(self.ceiling);
        encoder.write_u8(self.slope_height);
        encoder.write_u16(self.first_object_index);
        encoder.write_u16(self.textures);
        encoder.write_u32(self.flags);
        encoder.write_pod(&self.unknown_state);
    }
}

impl Record for TileMapEntry {
    const SIZE: usize = TILE_MAP_ENTRY_SIZE;

    fn decode(decoder: &mut PositionalDecoder<'_>) -> FormatResult<Self> {
        let raw_type = decoder.read_u8()?;
        let tile_type = TileType::from_u8(raw_type).ok_or(FormatError::InvalidTileType(raw_type))?;

        Ok(Self {
            tile_type,
            floor: decoder.read_u8()?,
            ceiling: decoder.read_u8()?,
            slope_height: decoder.read_u8()?,
            first_object_index: decoder.read_u16()?,
            textures: decoder.read_u16()?,
            flags: decoder.read_u32()?,
            unknown_state: decoder.read_pod()?,
        })
    }
}
