//! # Level Layout
//!
//! The fixed list of chunks every level consists of, keyed by offset from
//! the level's base identifier. The assembler walks this table in order;
//! nothing about a level's contents lives outside it.
//!
//! ## Offsets
//!
//! ```text
//! +2 .. +9    markers, level information, tile map, object tables
//! +10 .. +39  per class: table at +10+c, template at +25+c
//! +40 .. +53  fixed-size tail blocks (+52, +53 on CD only)
//! ```

use std::collections::HashSet;

use construct_format::resource::LEVEL_STRIDE;
use construct_format::{check_capacity, ObjectClass, OBJECT_CLASSES};
use serde::Deserialize;

use crate::error::{ConstructError, ConstructResult};

/// Entries in the master object table.
pub const MASTER_OBJECT_COUNT: usize = 872;

/// Entries in the cross-reference table.
pub const CROSS_REFERENCE_COUNT: usize = 1600;

/// Texture id slots in the texture list chunk.
pub const LEVEL_TEXTURE_SLOTS: usize = 54;

/// First class table offset.
pub const CLASS_TABLE_OFFSET: u16 = 10;

/// First class template offset.
pub const CLASS_TEMPLATE_OFFSET: u16 = 25;

/// Release edition of the archive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    /// Full release, with every tail block.
    #[default]
    Cd,
    /// Floppy release, without the CD-only tail blocks.
    Floppy,
}

impl Edition {
    /// Returns true if the entry belongs to this edition.
    #[must_use]
    pub const fn includes(self, entry: &LayoutEntry) -> bool {
        match self {
            Self::Cd => true,
            Self::Floppy => !entry.cd_only,
        }
    }
}

/// Fixed content of a static chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticContent {
    /// Literal bytes.
    Bytes(&'static [u8]),
    /// A block of zeros.
    Zeroed(usize),
    /// The texture list: one slot marked used, the rest empty.
    Textures,
}

impl StaticContent {
    /// Materializes the block.
    #[must_use]
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            Self::Bytes(bytes) => bytes.to_vec(),
            Self::Zeroed(length) => vec![0; length],
            Self::Textures => {
                let mut textures = vec![0; LEVEL_TEXTURE_SLOTS * 2];
                textures[0] = 1;
                textures
            }
        }
    }

    /// Length of the block in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.len(),
            Self::Zeroed(length) => length,
            Self::Textures => LEVEL_TEXTURE_SLOTS * 2,
        }
    }

    /// Returns true if the block has no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// What a layout entry emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkKind {
    /// A static byte block.
    Static(StaticContent),
    /// Default level information, compressed.
    LevelInformation,
    /// The 64x64 tile map, compressed.
    TileMap,
    /// The master object free list, compressed.
    MasterObjects(usize),
    /// The cross-reference free list, compressed.
    CrossReferences(usize),
    /// The free list of one object class.
    ClassObjects(ObjectClass),
    /// The single-entry template of one object class.
    ClassTemplate(ObjectClass),
}

/// One chunk of a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutEntry {
    /// Offset from the level's base identifier.
    pub offset: u16,
    /// Short name, for logs.
    pub name: &'static str,
    /// Content of the chunk.
    pub kind: ChunkKind,
    /// Only emitted for the CD edition.
    pub cd_only: bool,
}

impl LayoutEntry {
    const fn new(offset: u16, name: &'static str, kind: ChunkKind) -> Self {
        Self {
            offset,
            name,
            kind,
            cd_only: false,
        }
    }

    const fn zeroed(offset: u16, name: &'static str, length: usize) -> Self {
        Self::new(offset, name, ChunkKind::Static(StaticContent::Zeroed(length)))
    }

    const fn cd_only(mut self) -> Self {
        self.cd_only = true;
        self
    }

    const fn class(index: usize) -> [Self; 2] {
        let class = OBJECT_CLASSES[index];
        // Class ids are below OBJECT_CLASS_COUNT.
        #[allow(clippy::cast_possible_truncation)]
        let id = class.id as u16;
        [
            Self::new(CLASS_TABLE_OFFSET + id, class.name, ChunkKind::ClassObjects(class)),
            Self::new(CLASS_TEMPLATE_OFFSET + id, class.name, ChunkKind::ClassTemplate(class)),
        ]
    }
}

/// Number of entries in [`LEVEL_LAYOUT`].
pub const LEVEL_LAYOUT_LEN: usize = 52;

/// The chunks of one level, in emission order.
pub const LEVEL_LAYOUT: [LayoutEntry; LEVEL_LAYOUT_LEN] = {
    const C0: [LayoutEntry; 2] = LayoutEntry::class(0);
    const C1: [LayoutEntry; 2] = LayoutEntry::class(1);
    const C2: [LayoutEntry; 2] = LayoutEntry::class(2);
    const C3: [LayoutEntry; 2] = LayoutEntry::class(3);
    const C4: [LayoutEntry; 2] = LayoutEntry::class(4);
    const C5: [LayoutEntry; 2] = LayoutEntry::class(5);
    const C6: [LayoutEntry; 2] = LayoutEntry::class(6);
    const C7: [LayoutEntry; 2] = LayoutEntry::class(7);
    const C8: [LayoutEntry; 2] = LayoutEntry::class(8);
    const C9: [LayoutEntry; 2] = LayoutEntry::class(9);
    const C10: [LayoutEntry; 2] = LayoutEntry::class(10);
    const C11: [LayoutEntry; 2] = LayoutEntry::class(11);
    const C12: [LayoutEntry; 2] = LayoutEntry::class(12);
    const C13: [LayoutEntry; 2] = LayoutEntry::class(13);
    const C14: [LayoutEntry; 2] = LayoutEntry::class(14);
    [
        LayoutEntry::new(2, "engine marker", ChunkKind::Static(StaticContent::Bytes(&[0x0B, 0, 0, 0]))),
        LayoutEntry::new(3, "format marker", ChunkKind::Static(StaticContent::Bytes(&[0x1B, 0, 0, 0]))),
        LayoutEntry::new(4, "level information", ChunkKind::LevelInformation),
        LayoutEntry::new(5, "tile map", ChunkKind::TileMap),
        LayoutEntry::zeroed(6, "schedules", 8),
        LayoutEntry::new(7, "textures", ChunkKind::Static(StaticContent::Textures)),
        LayoutEntry::new(8, "master objects", ChunkKind::MasterObjects(MASTER_OBJECT_COUNT)),
        LayoutEntry::new(9, "cross references", ChunkKind::CrossReferences(CROSS_REFERENCE_COUNT)),
        C0[0], C0[1],
        C1[0], C1[1],
        C2[0], C2[1],
        C3[0], C3[1],
        C4[0], C4[1],
        C5[0], C5[1],
        C6[0], C6[1],
        C7[0], C7[1],
        C8[0], C8[1],
        C9[0], C9[1],
        C10[0], C10[1],
        C11[0], C11[1],
        C12[0], C12[1],
        C13[0], C13[1],
        C14[0], C14[1],
        LayoutEntry::new(40, "version marker", ChunkKind::Static(StaticContent::Bytes(&[0x0D, 0, 0, 0]))),
        LayoutEntry::new(41, "flags", ChunkKind::Static(StaticContent::Bytes(&[0]))),
        LayoutEntry::zeroed(42, "surveillance", 0x1C),
        LayoutEntry::zeroed(43, "texture animations", 0x10),
        LayoutEntry::zeroed(44, "light animations", 0x10),
        LayoutEntry::zeroed(45, "parameters", 0x5E),
        LayoutEntry::zeroed(46, "map notes", 0x800),
        LayoutEntry::zeroed(47, "map notes size", 4),
        LayoutEntry::zeroed(48, "palette cycles", 0x30),
        LayoutEntry::zeroed(49, "map text", 0x1C0),
        LayoutEntry::zeroed(50, "map text size", 2),
        LayoutEntry::zeroed(51, "loop configuration", 0x3C0),
        LayoutEntry::zeroed(52, "cd parameters", 2).cd_only(),
        LayoutEntry::zeroed(53, "cd map notes", 0x40).cd_only(),
    ]
};

/// Checks a layout before anything is emitted.
///
/// # Errors
///
/// Returns `DuplicateLayoutOffset` or `LayoutOffsetOutOfRange` for a broken
/// offset, and `Format` for an inconsistent class or table.
pub fn validate_layout(layout: &[LayoutEntry]) -> ConstructResult<()> {
    let mut offsets = HashSet::with_capacity(layout.len());
    for entry in layout {
        if entry.offset >= LEVEL_STRIDE {
            return Err(ConstructError::LayoutOffsetOutOfRange {
                offset: entry.offset,
                stride: LEVEL_STRIDE,
            });
        }
        if !offsets.insert(entry.offset) {
            return Err(ConstructError::DuplicateLayoutOffset(entry.offset));
        }
        match entry.kind {
            ChunkKind::ClassObjects(class) | ChunkKind::ClassTemplate(class) => class.validate()?,
            ChunkKind::MasterObjects(count) | ChunkKind::CrossReferences(count) => {
                check_capacity(count)?;
            }
            ChunkKind::Static(_) | ChunkKind::LevelInformation | ChunkKind::TileMap => {}
        }
    }
    Ok(())
}
