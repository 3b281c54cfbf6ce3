//! # Level Object Records
//!
//! A level keeps its objects in three kinds of tables:
//!
//! - the **master table**: one `LevelObjectEntry` per object slot
//! - the **cross-reference table**: links objects to the tiles they touch
//! - fifteen **class tables**: class-specific data behind a common prefix
//!
//! All of them are fixed-capacity pools; unused slots are chained into a
//! free list through their link fields.

use bytemuck::Zeroable;

use crate::encoding::{Encode, PositionalDecoder, PositionalEncoder, Record};
use crate::error::{FormatError, FormatResult};
use crate::table::FreeListEntry;

/// Size of a master object entry in bytes.
pub const LEVEL_OBJECT_ENTRY_SIZE: usize = 27;

/// Size of a cross-reference entry in bytes.
pub const LEVEL_OBJECT_CROSS_REFERENCE_SIZE: usize = 10;

/// Size of the prefix shared by all class entries.
pub const LEVEL_OBJECT_PREFIX_SIZE: usize = 6;

/// Master table entry describing one object instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable)]
pub struct LevelObjectEntry {
    /// Nonzero if the slot is allocated.
    pub in_use: u8,
    /// Object class.
    pub class: u8,
    /// Subclass within the class.
    pub subclass: u8,
    /// Index into the class table.
    pub class_table_index: u16,
    /// Head of the object's cross-reference chain.
    pub cross_reference_table_index: u16,
    /// Next slot in the list.
    pub next: u16,
    /// Previous slot in the list.
    pub previous: u16,
    /// Fine X position.
    pub x: u16,
    /// Fine Y position.
    pub y: u16,
    /// Height.
    pub z: u8,
    /// Rotation around the three axes.
    pub rotation: [u8; 3],
    /// Index of the AI state, if any.
    pub ai_index: u8,
    /// Object type within the subclass.
    pub object_type: u8,
    /// Remaining hit points.
    pub hit_points: u16,
    /// Class-dependent state.
    pub extra: [u8; 4],
}

impl Encode for LevelObjectEntry {
    fn encoded_len(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self, encoder: &mut PositionalEncoder) {
        encoder.write_u8(self.in_use);
        encoder.write_u8(self.class);
        encoder.write_u8(self.subclass);
        encoder.write_u16(self.class_table_index);
        encoder.write_u16(self.cross_reference_table_index);
        encoder.write_u16(self.next);
        encoder.write_u16(self.previous);
        encoder.write_u16(self.x);
        encoder.write_u16(self.y);
        encoder.write_u8(self.z);
        encoder.write_pod(&self.rotation);
        encoder.write_u8(self.ai_index);
        encoder.write_u8(self.object_type);
        encoder.write_u16(self.hit_points);
        encoder.write_pod(&self.extra);
    }
}

impl Record for LevelObjectEntry {
    const SIZE: usize = LEVEL_OBJECT_ENTRY_SIZE;

    fn decode(decoder: &mut PositionalDecoder<'_>) -> FormatResult<Self> {
        Ok(Self {
            in_use: decoder.read_u8()?,
            class: decoder.read_u8()?,
            subclass: decoder.read_u8()?,
            class_table_index: decoder.read_u16()?,
            cross_reference_table_index: decoder.read_u16()?,
            next: decoder.read_u16()?,
            previous: decoder.read_u16()?,
            x: decoder.read_u16()?,
            y: decoder.read_u16()?,
            z: decoder.read_u8()?,
            rotation: decoder.read_pod()?,
            ai_index: decoder.read_u8()?,
            object_type: decoder.read_u8()?,
            hit_points: decoder.read_u16()?,
            extra: decoder.read_pod()?,
        })
    }
}

impl FreeListEntry for LevelObjectEntry {
    fn link(&mut self, next: u16, previous: u16) {
        self.next = next;
        self.previous = previous;
    }

    fn next_index(&self) -> u16 {
        self.next
    }

    fn previous_index(&self) -> Option<u16> {
        Some(self.previous)
    }
}

/// Cross-reference entry linking an object to a tile.
///
/// Entries are chained forward only, both per object and per tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable)]
pub struct LevelObjectCrossReference {
    /// Tile column.
    pub tile_x: u16,
    /// Tile row.
    pub tile_y: u16,
    /// Master table slot of the object.
    pub level_object_table_index: u16,
    /// Next entry of the same object (free list link when unused).
    pub next_object_index: u16,
    /// Next entry on the same tile.
    pub next_tile_index: u16,
}

impl Encode for LevelObjectCrossReference {
    fn encoded_len(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self, encoder: &mut PositionalEncoder) {
        encoder.write_u16(self.tile_x);
        encoder.write_u16(self.tile_y);
        encoder.write_u16(self.level_object_table_index);
        encoder.write_u16(self.next_object_index);
        encoder.write_u16(self.next_tile_index);
    }
}

impl Record for LevelObjectCrossReference {
    const SIZE: usize = LEVEL_OBJECT_CROSS_REFERENCE_SIZE;

    fn decode(decoder: &mut PositionalDecoder<'_>) -> FormatResult<Self> {
        Ok(Self {
            tile_x: decoder.read_u16()?,
            tile_y: decoder.read_u16()?,
            level_object_table_index: decoder.read_u16()?,
            next_object_index: decoder.read_u16()?,
            next_tile_index: decoder.read_u16()?,
        })
    }
}

impl FreeListEntry for LevelObjectCrossReference {
    fn link(&mut self, next: u16, _previous: u16) {
        self.next_object_index = next;
    }

    fn next_index(&self) -> u16 {
        self.next_object_index
    }

    fn previous_index(&self) -> Option<u16> {
        None
    }
}

/// Prefix common to every class table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroable)]
pub struct LevelObjectPrefix {
    /// Next slot in the list.
    pub next: u16,
    /// Previous slot in the list.
    pub previous: u16,
    /// Master table slot owning this entry.
    pub level_object_table_index: u16,
}

impl Encode for LevelObjectPrefix {
    fn encoded_len(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self, encoder: &mut PositionalEncoder) {
        encoder.write_u16(self.next);
        encoder.write_u16(self.previous);
        encoder.write_u16(self.level_object_table_index);
    }
}

impl Record for LevelObjectPrefix {
    const SIZE: usize = LEVEL_OBJECT_PREFIX_SIZE;

    fn decode(decoder: &mut PositionalDecoder<'_>) -> FormatResult<Self> {
        Ok(Self {
            next: decoder.read_u16()?,
            previous: decoder.read_u16()?,
            level_object_table_index: decoder.read_u16()?,
        })
    }
}

/// Class table entry: the common prefix followed by a class-specific payload.
///
/// The payload width is fixed per class; fresh entries carry zeros.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassObjectEntry {
    /// Common prefix.
    pub prefix: LevelObjectPrefix,
    /// Class-specific data.
    pub payload: Box<[u8]>,
}

impl ClassObjectEntry {
    /// Creates a zeroed entry of the given total width.
    ///
    /// # Errors
    ///
    /// Returns `EntryWidthTooSmall` if `width` cannot hold the prefix.
    pub fn zeroed(width: usize) -> FormatResult<Self> {
        let payload_len = width
            .checked_sub(LEVEL_OBJECT_PREFIX_SIZE)
            .ok_or(FormatError::EntryWidthTooSmall {
                width,
                prefix: LEVEL_OBJECT_PREFIX_SIZE,
            })?;

        Ok(Self {
            prefix: LevelObjectPrefix::default(),
            payload: vec![0; payload_len].into_boxed_slice(),
        })
    }

    /// Total width of the entry in bytes.
    #[must_use]
    pub fn width(&self) -> usize {
        LEVEL_OBJECT_PREFIX_SIZE + self.payload.len()
    }
}

impl Encode for ClassObjectEntry {
    fn encoded_len(&self) -> usize {
        self.width()
    }

    fn encode(&self, encoder: &mut PositionalEncoder) {
        encoder.code(&self.prefix);
        encoder.write_bytes(&self.payload);
    }
}

impl FreeListEntry for ClassObjectEntry {
    fn link(&mut self, next: u16, previous: u16) {
        self.prefix.next = next;
        self.prefix.previous = previous;
    }

    fn next_index(&self) -> u16 {
        self.prefix.next
    }

    fn previous_index(&self) -> Option<u16> {
        Some(self.prefix.previous)
    }
}
