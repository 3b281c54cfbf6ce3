//! Compression of chunks flagged `BasicCompressed`.
//!
//! Chunks are stored as LZ4 blocks with the unpacked size prepended.

use lz4_flex::{compress_prepend_size, decompress_size_prepended};

use crate::error::{ArchiveError, ArchiveResult};

/// Compresses chunk data for storage.
#[must_use]
pub fn compress_chunk(data: &[u8]) -> Vec<u8> {
    compress_prepend_size(data)
}

/// Restores chunk data written by [`compress_chunk`].
///
/// # Errors
///
/// Returns `CorruptChunk` if the data is not a valid compressed block.
pub fn decompress_chunk(packed: &[u8]) -> ArchiveResult<Vec<u8>> {
    decompress_size_prepended(packed).map_err(|e| ArchiveError::CorruptChunk(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_blocks_shrink() {
        let data = vec![0u8; 872 * 27];
        let packed = compress_chunk(&data);

        assert!(packed.len() < data.len() / 10);
        assert_eq!(decompress_chunk(&packed).unwrap(), data);
    }

    #[test]
    fn test_corrupt_chunk() {
        assert!(matches!(
            // Claims 16 bytes, token announces 5 literals, only one follows.
            decompress_chunk(&[0x10, 0, 0, 0, 0x50, b'a']),
            Err(ArchiveError::CorruptChunk(_))
        ));
    }
}
