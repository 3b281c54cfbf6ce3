//! # Chunk Emitters
//!
//! The two ways a chunk reaches the container:
//!
//! - **static**: an already-sized byte block, stored verbatim
//! - **encoded**: a record or record table run through the positional
//!   encoder into one contiguous block
//!
//! Emitters never compress; they only set the flag the container acts on.

use construct_archive::ChunkConsumer;
use construct_format::{
    encode_to_vec, Chunk, ChunkType, ClassObjectEntry, ContentType, Encode, LevelInformation,
    LevelObjectCrossReference, LevelObjectEntry, PositionalEncoder, ResourceId, Table,
    TileMapEntry,
};

use crate::error::ConstructResult;

/// Every value shape the typed emitter can encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkValue {
    /// Basic level information.
    LevelInformation(LevelInformation),
    /// The level's tile grid.
    TileMap(Table<TileMapEntry>),
    /// The master object table.
    MasterObjects(Table<LevelObjectEntry>),
    /// The cross-reference table.
    CrossReferences(Table<LevelObjectCrossReference>),
    /// One object class table.
    ClassObjects(Table<ClassObjectEntry>),
}

impl Encode for ChunkValue {
    fn encoded_len(&self) -> usize {
        match self {
            Self::LevelInformation(info) => info.encoded_len(),
            Self::TileMap(table) => table.encoded_len(),
            Self::MasterObjects(table) => table.encoded_len(),
            Self::CrossReferences(table) => table.encoded_len(),
            Self::ClassObjects(table) => table.encoded_len(),
        }
    }

    fn encode(&self, encoder: &mut PositionalEncoder) {
        match self {
            Self::LevelInformation(info) => info.encode(encoder),
            Self::TileMap(table) => table.encode(encoder),
            Self::MasterObjects(table) => table.encode(encoder),
            Self::CrossReferences(table) => table.encode(encoder),
            Self::ClassObjects(table) => table.encode(encoder),
        }
    }
}

/// Stores `bytes` unchanged as a single-block basic map chunk.
///
/// Returns the number of bytes emitted.
///
/// # Errors
///
/// Propagates container failures.
pub fn emit_static<C: ChunkConsumer + ?Sized>(
    consumer: &mut C,
    id: ResourceId,
    bytes: Vec<u8>,
) -> ConstructResult<usize> {
    emit_static_as(consumer, id, ContentType::Map, bytes)
}

/// Stores `bytes` unchanged as a single-block basic chunk of the given
/// content type.
///
/// # Errors
///
/// Propagates container failures.
pub fn emit_static_as<C: ChunkConsumer + ?Sized>(
    consumer: &mut C,
    id: ResourceId,
    content_type: ContentType,
    bytes: Vec<u8>,
) -> ConstructResult<usize> {
    let length = bytes.len();
    consumer.consume(id, Chunk::single(ChunkType::Basic, content_type, bytes))?;
    Ok(length)
}

/// Encodes `value` into one block and stores it with the given chunk type.
///
/// Returns the number of bytes emitted (before compression).
///
/// # Errors
///
/// Propagates container failures.
pub fn emit_encoded<C: ChunkConsumer + ?Sized>(
    consumer: &mut C,
    id: ResourceId,
    chunk_type: ChunkType,
    value: &ChunkValue,
) -> ConstructResult<usize> {
    let bytes = encode_to_vec(value);
    let length = bytes.len();
    consumer.consume(id, Chunk::single(chunk_type, ContentType::Map, bytes))?;
    Ok(length)
}
