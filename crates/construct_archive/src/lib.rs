//! # Construct Archive
//!
//! The chunk container Construct emits into.
//!
//! ## Core Components
//!
//! - `ChunkConsumer`: the emit/finish boundary
//! - `ResourceFileWriter`: resource file on any `Write + Seek` sink
//! - `RecordingConsumer`: in-memory consumer for inspection
//!
//! ## Guarantees
//!
//! 1. **Uniqueness**: a resource identifier is accepted at most once
//! 2. **Single finalization**: `finish` runs once; a dropped writer
//!    finalizes itself
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use construct_archive::{ChunkConsumer, ResourceFileWriter};
//! use construct_format::{Chunk, ChunkType, ContentType, ResourceId};
//!
//! let mut writer = ResourceFileWriter::new(Cursor::new(Vec::new())).unwrap();
//! writer
//!     .consume(ResourceId(4102), Chunk::single(ChunkType::Basic, ContentType::Map, vec![0x0B, 0, 0, 0]))
//!     .unwrap();
//! let file = writer.into_inner().unwrap().into_inner();
//! assert_eq!(&file[..16], b"LG Res File v2\r\n");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod compression;
pub mod consumer;
pub mod error;
pub mod writer;

pub use compression::{compress_chunk, decompress_chunk};
pub use consumer::{ChunkConsumer, RecordingConsumer};
pub use error::{ArchiveError, ArchiveResult};
pub use writer::{DirectoryEntry, ResourceFileWriter, DIRECTORY_ENTRY_SIZE, RESOURCE_FILE_SIGNATURE};
