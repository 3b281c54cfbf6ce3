//! # Chunk Consumers
//!
//! The boundary the generator emits into. A consumer accepts each resource
//! identifier at most once and is finalized exactly once.

use std::collections::HashSet;

use construct_format::{Chunk, ResourceId};

use crate::error::{ArchiveError, ArchiveResult};

/// Destination for generated chunks.
pub trait ChunkConsumer {
    /// Accepts one chunk under the given identifier.
    ///
    /// # Errors
    ///
    /// Fails on a repeated identifier, after `finish`, or when the underlying
    /// destination fails.
    fn consume(&mut self, id: ResourceId, chunk: Chunk) -> ArchiveResult<()>;

    /// Finalizes the container. No chunk may follow.
    ///
    /// # Errors
    ///
    /// Fails when called twice or when the destination cannot be flushed.
    fn finish(&mut self) -> ArchiveResult<()>;
}

/// Consumer keeping every chunk in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingConsumer {
    chunks: Vec<(ResourceId, Chunk)>,
    seen: HashSet<ResourceId>,
    finished: bool,
}

impl RecordingConsumer {
    /// Creates an empty consumer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all chunks in emission order.
    #[must_use]
    pub fn chunks(&self) -> &[(ResourceId, Chunk)] {
        &self.chunks
    }

    /// Returns the identifiers in emission order.
    pub fn ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.chunks.iter().map(|(id, _)| *id)
    }

    /// Gets the chunk stored under `id`.
    #[must_use]
    pub fn get(&self, id: ResourceId) -> Option<&Chunk> {
        self.chunks.iter().find(|(k, _)| *k == id).map(|(_, c)| c)
    }

    /// Returns true once `finish` has been called.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

impl ChunkConsumer for RecordingConsumer {
    fn consume(&mut self, id: ResourceId, chunk: Chunk) -> ArchiveResult<()> {
        if self.finished {
            return Err(ArchiveError::AlreadyFinished);
        }
        if !self.seen.insert(id) {
            return Err(ArchiveError::DuplicateResource(id));
        }
        self.chunks.push((id, chunk));
        Ok(())
    }

    fn finish(&mut self) -> ArchiveResult<()> {
        if self.finished {
            return Err(ArchiveError::AlreadyFinished);
        }
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use construct_format::{ChunkType, ContentType};

    fn chunk(data: &[u8]) -> Chunk {
        Chunk::single(ChunkType::Basic, ContentType::Map, data.to_vec())
    }

    #[test]
    fn test_recording_order() {
        let mut consumer = RecordingConsumer::new();
        consumer.consume(ResourceId(7), chunk(&[1])).unwrap();
        consumer.consume(ResourceId(3), chunk(&[2])).unwrap();

        assert_eq!(consumer.ids().collect::<Vec<_>>(), vec![ResourceId(7), ResourceId(3)]);
        assert_eq!(consumer.get(ResourceId(3)).unwrap().blocks, vec![vec![2]]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut consumer = RecordingConsumer::new();
        consumer.consume(ResourceId(7), chunk(&[1])).unwrap();

        let err = consumer.consume(ResourceId(7), chunk(&[2])).unwrap_err();
        assert!(matches!(err, ArchiveError::DuplicateResource(ResourceId(7))));
        assert_eq!(consumer.chunks().len(), 1);
    }

    #[test]
    fn test_finish_once() {
        let mut consumer = RecordingConsumer::new();
        consumer.finish().unwrap();

        assert!(consumer.is_finished());
        assert!(matches!(consumer.finish(), Err(ArchiveError::AlreadyFinished)));
        assert!(matches!(
            consumer.consume(ResourceId(1), chunk(&[])),
            Err(ArchiveError::AlreadyFinished)
        ));
    }
}
