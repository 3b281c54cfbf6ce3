//! # Resource File Writer
//!
//! Streams chunks into a resource file and writes the directory on finish.
//!
//! ## Format
//!
//! ```text
//! [0x00..0x7C: signature "LG Res File v2\r\n", 0x1A, zero padding]
//! [0x7C: u32 directory offset]
//! [0x80: chunk data, each chunk padded to a 4-byte boundary]
//!
//! Directory:
//! [2 bytes: chunk count]
//! [4 bytes: offset of first chunk]
//! per chunk, 10 bytes:
//! [2 bytes: resource id]
//! [3 bytes: unpacked length] [1 byte: chunk type]
//! [3 bytes: packed length]   [1 byte: content type]
//! ```
//!
//! All values are little-endian. Chunk offsets are implied by the order of
//! the directory entries.
//!
//! Chunks flagged as compressed are stored as LZ4 blocks with a prepended
//! size, not with the LZW scheme other readers of this container expect.
//! Only readers using [`decompress_chunk`](crate::decompress_chunk) can
//! unpack them; uncompressed chunks are readable by any of them.

use std::collections::HashSet;
use std::io::{Seek, SeekFrom, Write};

use construct_format::{Chunk, ChunkType, ContentType, ResourceId};

use crate::compression::compress_chunk;
use crate::consumer::ChunkConsumer;
use crate::error::{ArchiveError, ArchiveResult};

/// Signature at the start of every resource file.
pub const RESOURCE_FILE_SIGNATURE: &[u8] = b"LG Res File v2\r\n";

/// Marks the end of the header comment.
pub const COMMENT_TERMINATOR: u8 = 0x1A;

/// Position of the directory offset field.
pub const DIRECTORY_OFFSET_POSITION: u64 = 0x7C;

/// Position of the first chunk.
pub const FIRST_CHUNK_OFFSET: u32 = 0x80;

/// Chunk data alignment.
pub const CHUNK_ALIGNMENT: u64 = 4;

/// Largest length the 24-bit directory fields can hold.
pub const MAX_CHUNK_LENGTH: usize = 0x00FF_FFFF;

/// Largest number of directory entries.
pub const MAX_CHUNK_COUNT: usize = u16::MAX as usize;

/// Size of one directory entry in bytes.
pub const DIRECTORY_ENTRY_SIZE: usize = 10;

/// Directory record of one stored chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Resource identifier.
    pub id: ResourceId,
    /// Length before compression.
    pub unpacked_length: u32,
    /// Storage type.
    pub chunk_type: ChunkType,
    /// Length as stored.
    pub packed_length: u32,
    /// Payload kind.
    pub content_type: ContentType,
}

impl DirectoryEntry {
    /// Serializes the entry to its 10-byte directory form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; DIRECTORY_ENTRY_SIZE] {
        let mut buf = [0u8; DIRECTORY_ENTRY_SIZE];
        buf[0..2].copy_from_slice(&self.id.value().to_le_bytes());
        buf[2..6].copy_from_slice(
            &(self.unpacked_length | (u32::from(self.chunk_type as u8) << 24)).to_le_bytes(),
        );
        buf[6..10].copy_from_slice(
            &(self.packed_length | (u32::from(self.content_type as u8) << 24)).to_le_bytes(),
        );
        buf
    }
}

/// Writer producing a resource file on any seekable sink.
///
/// The writer is finalized exactly once: explicitly through
/// [`ChunkConsumer::finish`], or on drop if it was never finished.
pub struct ResourceFileWriter<W: Write + Seek> {
    /// Destination; taken out by `into_inner`.
    sink: Option<W>,
    /// Stored chunks in data order.
    directory: Vec<DirectoryEntry>,
    /// Identifiers accepted so far.
    seen: HashSet<ResourceId>,
    /// Current write offset.
    position: u64,
    /// Whether the directory has been written.
    finished: bool,
}

impl<W: Write + Seek> ResourceFileWriter<W> {
    /// Creates a writer and emits the file header.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the header cannot be written.
    pub fn new(mut sink: W) -> ArchiveResult<Self> {
        let mut header = [0u8; FIRST_CHUNK_OFFSET as usize];
        header[..RESOURCE_FILE_SIGNATURE.len()].copy_from_slice(RESOURCE_FILE_SIGNATURE);
        header[RESOURCE_FILE_SIGNATURE.len()] = COMMENT_TERMINATOR;
        // Directory offset at 0x7C stays zero until finish.
        sink.write_all(&header)?;

        Ok(Self {
            sink: Some(sink),
            directory: Vec::new(),
            seen: HashSet::new(),
            position: u64::from(FIRST_CHUNK_OFFSET),
            finished: false,
        })
    }

    /// Returns the number of chunks stored so far.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.directory.len()
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.position
    }

    /// Returns the directory entries in data order.
    #[must_use]
    pub fn directory(&self) -> &[DirectoryEntry] {
        &self.directory
    }

    /// Finishes the file if needed and returns the sink.
    ///
    /// # Errors
    ///
    /// Returns the error of the final `finish`, if one was required.
    pub fn into_inner(mut self) -> ArchiveResult<W> {
        if !self.finished {
            self.finish()?;
        }
        self.sink.take().ok_or(ArchiveError::AlreadyFinished)
    }

    fn sink(&mut self) -> ArchiveResult<&mut W> {
        self.sink.as_mut().ok_or(ArchiveError::AlreadyFinished)
    }

    fn write(&mut self, bytes: &[u8]) -> ArchiveResult<()> {
        self.sink()?.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    fn pad_to_alignment(&mut self) -> ArchiveResult<()> {
        let padding = (CHUNK_ALIGNMENT - self.position % CHUNK_ALIGNMENT) % CHUNK_ALIGNMENT;
        if padding > 0 {
            self.write(&[0u8; CHUNK_ALIGNMENT as usize][..padding as usize])?;
        }
        Ok(())
    }

    fn check_length(id: ResourceId, length: usize) -> ArchiveResult<u32> {
        if length > MAX_CHUNK_LENGTH {
            return Err(ArchiveError::ChunkTooLarge {
                id,
                length,
                max: MAX_CHUNK_LENGTH,
            });
        }
        // Bounded by MAX_CHUNK_LENGTH above.
        Ok(u32::try_from(length).unwrap_or(u32::MAX))
    }
}

impl<W: Write + Seek> ChunkConsumer for ResourceFileWriter<W> {
    fn consume(&mut self, id: ResourceId, chunk: Chunk) -> ArchiveResult<()> {
        if self.finished {
            return Err(ArchiveError::AlreadyFinished);
        }
        if self.seen.contains(&id) {
            return Err(ArchiveError::DuplicateResource(id));
        }
        if self.directory.len() >= MAX_CHUNK_COUNT {
            return Err(ArchiveError::TooManyChunks(MAX_CHUNK_COUNT));
        }

        let data: Vec<u8> = chunk.blocks.concat();
        let unpacked_length = Self::check_length(id, data.len())?;
        let stored = if chunk.chunk_type.is_compressed() {
            compress_chunk(&data)
        } else {
            data
        };
        let packed_length = Self::check_length(id, stored.len())?;

        self.write(&stored)?;
        self.pad_to_alignment()?;

        tracing::debug!(
            "Stored chunk {}: {} bytes ({} packed, {:?})",
            id,
            unpacked_length,
            packed_length,
            chunk.chunk_type
        );

        self.seen.insert(id);
        self.directory.push(DirectoryEntry {
            id,
            unpacked_length,
            chunk_type: chunk.chunk_type,
            packed_length,
            content_type: chunk.content_type,
        });

        Ok(())
    }

    fn finish(&mut self) -> ArchiveResult<()> {
        if self.finished {
            return Err(ArchiveError::AlreadyFinished);
        }
        // Mark first: a failed finish is not retried from drop.
        self.finished = true;

        let directory_offset = directory_offset(self.position)?;
        // Entry count was capped in consume.
        let count = u16::try_from(self.directory.len()).unwrap_or(u16::MAX);

        let mut buf = Vec::with_capacity(6 + self.directory.len() * DIRECTORY_ENTRY_SIZE);
        buf.extend_from_slice(&count.to_le_bytes());
        buf.extend_from_slice(&FIRST_CHUNK_OFFSET.to_le_bytes());
        for entry in &self.directory {
            buf.extend_from_slice(&entry.to_bytes());
        }
        let end = self.position + buf.len() as u64;

        let sink = self.sink()?;
        sink.write_all(&buf)?;
        sink.seek(SeekFrom::Start(DIRECTORY_OFFSET_POSITION))?;
        sink.write_all(&directory_offset.to_le_bytes())?;
        sink.seek(SeekFrom::Start(end))?;
        sink.flush()?;
        self.position = end;

        tracing::info!(
            "Archive finished: {} chunks, {} bytes",
            self.directory.len(),
            self.position
        );

        Ok(())
    }
}

impl<W: Write + Seek> Drop for ResourceFileWriter<W> {
    fn drop(&mut self) {
        // If never finished, write the directory of what was stored
        if !self.finished && self.sink.is_some() {
            tracing::warn!("Archive dropped unfinished, finalizing {} chunks", self.directory.len());
            if let Err(e) = self.finish() {
                tracing::error!("Failed to finalize dropped archive: {}", e);
            }
        }
    }
}

/// Offset the directory is written at, as stored in the header.
fn directory_offset(position: u64) -> ArchiveResult<u32> {
    u32::try_from(position).map_err(|_| ArchiveError::FileTooLarge {
        size: position,
        max: u64::from(u32::MAX),
    })
}
