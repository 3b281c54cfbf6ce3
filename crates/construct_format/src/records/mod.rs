//! # Record Shapes
//!
//! Fixed-layout records making up a level. Every record encodes to a
//! constant number of bytes; the layouts are format constants.

mod level_info;
mod level_object;
mod tile;

pub use level_info::{LevelInformation, LEVEL_INFORMATION_SIZE};
pub use level_object::{
    ClassObjectEntry, LevelObjectCrossReference, LevelObjectEntry, LevelObjectPrefix,
    LEVEL_OBJECT_CROSS_REFERENCE_SIZE, LEVEL_OBJECT_ENTRY_SIZE, LEVEL_OBJECT_PREFIX_SIZE,
};
pub use tile::{TileMapEntry, TileType, TILE_MAP_ENTRY_SIZE};
