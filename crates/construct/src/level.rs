//! # Level Assembler
//!
//! Turns a layout into chunks under one level's identifier block.

use construct_archive::ChunkConsumer;
use construct_format::{
    ChunkType, LevelInformation, LevelObjectCrossReference, LevelObjectEntry, ResourceId, Table,
    TileMapEntry,
};

use crate::emit::{emit_encoded, emit_static, ChunkValue};
use crate::error::{ConstructError, ConstructResult};
use crate::layout::{validate_layout, ChunkKind, Edition, LayoutEntry, LEVEL_LAYOUT};

/// What one assembled level produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelSummary {
    /// Base identifier of the level.
    pub base: ResourceId,
    /// Chunks emitted.
    pub chunks: usize,
    /// Payload bytes emitted, before compression.
    pub bytes: usize,
}

/// Emits every chunk of the given level.
///
/// # Errors
///
/// Returns `LevelOutOfRange` if the level's block does not fit the
/// identifier space, and propagates table and container failures.
pub fn assemble_level<C: ChunkConsumer + ?Sized>(
    consumer: &mut C,
    level: u16,
    edition: Edition,
) -> ConstructResult<LevelSummary> {
    assemble_layout(consumer, level, &LEVEL_LAYOUT, edition)
}

/// Emits the chunks of an arbitrary layout for the given level.
///
/// The layout is validated before the first chunk is emitted.
///
/// # Errors
///
/// See [`assemble_level`] and [`validate_layout`].
pub fn assemble_layout<C: ChunkConsumer + ?Sized>(
    consumer: &mut C,
    level: u16,
    layout: &[LayoutEntry],
    edition: Edition,
) -> ConstructResult<LevelSummary> {
    let base = ResourceId::level_base(level).ok_or(ConstructError::LevelOutOfRange(level))?;
    validate_layout(layout)?;

    let mut summary = LevelSummary {
        base,
        ..LevelSummary::default()
    };

    for entry in layout.iter().filter(|entry| edition.includes(entry)) {
        let id = base
            .offset(entry.offset)
            .ok_or(ConstructError::LevelOutOfRange(level))?;
        let written = emit_entry(consumer, id, entry)?;
        tracing::debug!("Level {} chunk {} ({}): {} bytes", level, id, entry.name, written);

        summary.chunks += 1;
        summary.bytes += written;
    }

    tracing::info!(
        "Assembled level {} at {}: {} chunks, {} bytes",
        level,
        base,
        summary.chunks,
        summary.bytes
    );

    Ok(summary)
}

fn emit_entry<C: ChunkConsumer + ?Sized>(
    consumer: &mut C,
    id: ResourceId,
    entry: &LayoutEntry,
) -> ConstructResult<usize> {
    let compressed = ChunkType::Basic.with_compression();
    match entry.kind {
        ChunkKind::Static(content) => emit_static(consumer, id, content.to_bytes()),
        ChunkKind::LevelInformation => emit_encoded(
            consumer,
            id,
            compressed,
            &ChunkValue::LevelInformation(LevelInformation::default()),
        ),
        ChunkKind::TileMap => emit_encoded(
            consumer,
            id,
            compressed,
            &ChunkValue::TileMap(Table::<TileMapEntry>::level_map()?),
        ),
        ChunkKind::MasterObjects(count) => emit_encoded(
            consumer,
            id,
            compressed,
            &ChunkValue::MasterObjects(Table::free_list(count, LevelObjectEntry::default)?),
        ),
        ChunkKind::CrossReferences(count) => emit_encoded(
            consumer,
            id,
            compressed,
            &ChunkValue::CrossReferences(Table::free_list(
                count,
                LevelObjectCrossReference::default,
            )?),
        ),
        ChunkKind::ClassObjects(class) => emit_encoded(
            consumer,
            id,
            ChunkType::Basic,
            &ChunkValue::ClassObjects(class.build_table()?),
        ),
        ChunkKind::ClassTemplate(class) => emit_static(consumer, id, class.template_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{StaticContent, LEVEL_LAYOUT_LEN};
    use construct_archive::RecordingConsumer;
    use construct_format::{FormatError, ObjectClass, OBJECT_CLASSES};

    #[test]
    fn test_level_one_block() {
        let mut consumer = RecordingConsumer::new();
        let summary = assemble_level(&mut consumer, 1, Edition::Cd).unwrap();

        assert_eq!(summary.base, ResourceId(4100));
        assert_eq!(summary.chunks, LEVEL_LAYOUT_LEN);
        let ids: Vec<u16> = consumer.ids().map(ResourceId::value).collect();
        assert_eq!(ids.first(), Some(&4102));
        assert_eq!(ids.last(), Some(&4153));
        assert!(ids.iter().all(|id| (4102..=4153).contains(id)));
    }

    #[test]
    fn test_compression_flags() {
        let mut consumer = RecordingConsumer::new();
        assemble_level(&mut consumer, 0, Edition::Cd).unwrap();

        for (id, chunk) in consumer.chunks() {
            let offset = id.value() - 4000;
            assert_eq!(
                chunk.chunk_type.is_compressed(),
                (4..=9).contains(&offset) && offset != 6 && offset != 7,
                "offset {offset}"
            );
        }
    }

    #[test]
    fn test_class_chunk_sizes() {
        let mut consumer = RecordingConsumer::new();
        assemble_level(&mut consumer, 2, Edition::Cd).unwrap();

        for class in &OBJECT_CLASSES {
            let id = u16::from(class.id);
            let table = consumer.get(ResourceId(4210 + id)).unwrap();
            let template = consumer.get(ResourceId(4225 + id)).unwrap();
            assert_eq!(table.data_len(), class.table_size(), "{}", class.name);
            assert_eq!(template.data_len(), class.entry_width, "{}", class.name);
        }
    }

    #[test]
    fn test_floppy_level() {
        let mut consumer = RecordingConsumer::new();
        let summary = assemble_level(&mut consumer, 1, Edition::Floppy).unwrap();

        assert_eq!(summary.chunks, LEVEL_LAYOUT_LEN - 2);
        assert!(consumer.get(ResourceId(4152)).is_none());
        assert!(consumer.get(ResourceId(4153)).is_none());
    }

    #[test]
    fn test_level_out_of_range() {
        let mut consumer = RecordingConsumer::new();
        assert!(matches!(
            assemble_level(&mut consumer, 615, Edition::Cd),
            Err(ConstructError::LevelOutOfRange(615))
        ));
        assert!(assemble_level(&mut consumer, 614, Edition::Cd).is_ok());
    }

    #[test]
    fn test_invalid_layout_emits_nothing() {
        let layout = [
            LayoutEntry {
                offset: 2,
                name: "marker",
                kind: ChunkKind::Static(StaticContent::Bytes(&[1])),
                cd_only: false,
            },
            LayoutEntry {
                offset: 10,
                name: "broken",
                kind: ChunkKind::ClassObjects(ObjectClass::new(0, "broken", 2, 4)),
                cd_only: false,
            },
        ];
        let mut consumer = RecordingConsumer::new();

        assert!(assemble_layout(&mut consumer, 1, &layout, Edition::Cd).is_err());
        assert!(consumer.chunks().is_empty());
    }

    #[test]
    fn test_oversized_table_emits_nothing() {
        let layout = [
            LayoutEntry {
                offset: 2,
                name: "marker",
                kind: ChunkKind::Static(StaticContent::Bytes(&[0x0B, 0, 0, 0])),
                cd_only: false,
            },
            LayoutEntry {
                offset: 8,
                name: "masters",
                kind: ChunkKind::MasterObjects(70_000),
                cd_only: false,
            },
        ];
        let mut consumer = RecordingConsumer::new();

        let err = assemble_layout(&mut consumer, 1, &layout, Edition::Cd).unwrap_err();
        assert!(matches!(
            err,
            ConstructError::Format(FormatError::TableTooLarge { count: 70_000, .. })
        ));
        assert!(consumer.chunks().is_empty());
    }

    #[test]
    fn test_two_levels_are_disjoint() {
        let mut consumer = RecordingConsumer::new();
        assemble_level(&mut consumer, 1, Edition::Cd).unwrap();
        assemble_level(&mut consumer, 2, Edition::Cd).unwrap();
        assert_eq!(consumer.chunks().len(), 2 * LEVEL_LAYOUT_LEN);

        // Same level twice collides in the container.
        assert!(assemble_level(&mut consumer, 1, Edition::Cd).is_err());
    }
}
