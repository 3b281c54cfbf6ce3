//! # Construct Format
//!
//! Record layouts, record tables and positional encoding for the archive
//! files Construct generates.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: encoding a value always produces the same bytes
//! 2. **Fixed layouts**: every record shape has a constant, declared width
//! 3. **Fail fast**: inconsistent table parameters are rejected before any
//!    bytes exist
//!
//! ## Core Components
//!
//! - `ResourceId`, `ChunkType`, `Chunk`: addressing and tagging archive units
//! - `LevelInformation`, `TileMapEntry`, `LevelObjectEntry`, ...: record shapes
//! - `Table`: fixed-capacity free lists and tile grids
//! - `ObjectClass`: the fifteen object class tables
//! - `PositionalEncoder`: little-endian field encoder
//!
//! ## Example
//!
//! ```rust
//! use construct_format::{encode_to_vec, LevelObjectEntry, Table};
//!
//! let masters = Table::free_list(872, LevelObjectEntry::default).unwrap();
//! assert_eq!(masters.entries()[871].next, 0);
//! assert_eq!(encode_to_vec(&masters).len(), 872 * 27);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod classes;
pub mod encoding;
pub mod error;
pub mod records;
pub mod resource;
pub mod table;

pub use classes::{ObjectClass, OBJECT_CLASSES, OBJECT_CLASS_COUNT};
pub use encoding::{encode_to_vec, Encode, PositionalDecoder, PositionalEncoder, Record};
pub use error::{FormatError, FormatResult};
pub use records::{
    ClassObjectEntry, LevelInformation, LevelObjectCrossReference, LevelObjectEntry,
    LevelObjectPrefix, TileMapEntry, TileType,
};
pub use resource::{Chunk, ChunkType, ContentType, ResourceId, ARCHIVE_NAME_ID, GAME_STATE_ID};
pub use table::{
    check_capacity, Direction, FreeListEntry, Table, MAP_HEIGHT, MAP_WIDTH, MAX_TABLE_ENTRIES,
};
