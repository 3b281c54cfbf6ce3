//! Integration tests for archive generation.
//!
//! Archives are written through the real resource file writer and read back
//! with a minimal directory parser.

use std::collections::HashSet;
use std::io::Cursor;

use construct::{
    write_archive, write_archive_to, ArchivePlan, ConstructError, Edition, CROSS_REFERENCE_COUNT,
    GAME_STATE_SIZE, MASTER_OBJECT_COUNT,
};
use construct_archive::{decompress_chunk, DIRECTORY_ENTRY_SIZE, RESOURCE_FILE_SIGNATURE};
use construct_format::{
    ChunkType, ContentType, Direction, LevelInformation, LevelObjectCrossReference,
    LevelObjectEntry, LevelObjectPrefix, PositionalDecoder, Record, Table, TileMapEntry, TileType,
    MAP_HEIGHT, MAP_WIDTH, OBJECT_CLASSES,
};

/// One chunk read back from a resource file.
struct StoredChunk {
    id: u16,
    chunk_type: ChunkType,
    content_type: u8,
    data: Vec<u8>,
}

fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

fn u24_at(data: &[u8], offset: usize) -> usize {
    usize::from(data[offset]) | usize::from(data[offset + 1]) << 8 | usize::from(data[offset + 2]) << 16
}

fn read_archive(file: &[u8]) -> Vec<StoredChunk> {
    assert_eq!(&file[..RESOURCE_FILE_SIGNATURE.len()], RESOURCE_FILE_SIGNATURE);

    let directory = u32_at(file, 0x7C) as usize;
    let count = usize::from(u16_at(file, directory));
    let mut position = u32_at(file, directory + 2) as usize;

    let mut chunks = Vec::with_capacity(count);
    for index in 0..count {
        let entry = directory + 6 + index * DIRECTORY_ENTRY_SIZE;
        let unpacked = u24_at(file, entry + 2);
        let chunk_type = ChunkType::from_u8(file[entry + 5]).unwrap();
        let packed = u24_at(file, entry + 6);
        let stored = &file[position..position + packed];

        let data = if chunk_type.is_compressed() {
            decompress_chunk(stored).unwrap()
        } else {
            stored.to_vec()
        };
        assert_eq!(data.len(), unpacked);

        chunks.push(StoredChunk {
            id: u16_at(file, entry),
            chunk_type,
            content_type: file[entry + 9],
            data,
        });
        position = (position + packed + 3) & !3;
    }
    chunks
}

fn chunk(chunks: &[StoredChunk], id: u16) -> &StoredChunk {
    chunks.iter().find(|c| c.id == id).unwrap_or_else(|| panic!("chunk {id} missing"))
}

fn decode_all<R: Record>(data: &[u8]) -> Vec<R> {
    let mut decoder = PositionalDecoder::new(data);
    let mut records = Vec::new();
    while decoder.remaining() > 0 {
        records.push(decoder.decode::<R>().unwrap());
    }
    records
}

fn archive_bytes(plan: &ArchivePlan) -> Vec<u8> {
    let (cursor, _) = write_archive_to(Cursor::new(Vec::new()), plan).unwrap();
    cursor.into_inner()
}

#[test]
fn test_minimal_archive() {
    let chunks = read_archive(&archive_bytes(&ArchivePlan::default()));

    let name = chunk(&chunks, 0x0FA0);
    assert_eq!(name.data, b"Starting Game\0");
    assert_eq!(name.content_type, ContentType::Text as u8);

    let state = chunk(&chunks, 0x0FA1);
    assert_eq!(state.data, vec![0; GAME_STATE_SIZE]);
    assert_eq!(state.chunk_type, ChunkType::Basic);

    let level: Vec<u16> = chunks.iter().map(|c| c.id).filter(|&id| id >= 4000).collect();
    assert_eq!(level, (4102..=4153).collect::<Vec<u16>>());

    assert_eq!(chunk(&chunks, 4102).data, [0x0B, 0, 0, 0]);
    assert_eq!(chunk(&chunks, 4103).data, [0x1B, 0, 0, 0]);
    assert_eq!(chunk(&chunks, 4140).data, [0x0D, 0, 0, 0]);
}

#[test]
fn test_level_information_decodes() {
    let chunks = read_archive(&archive_bytes(&ArchivePlan::default()));
    let info = chunk(&chunks, 4104);

    assert!(info.chunk_type.is_compressed());
    let decoded = decode_all::<LevelInformation>(&info.data);
    assert_eq!(decoded, vec![LevelInformation::default()]);
    assert_eq!(decoded[0].x_size, 64);
    assert_eq!(decoded[0].y_shift, 6);
}

#[test]
fn test_tile_map_border() {
    let chunks = read_archive(&archive_bytes(&ArchivePlan::default()));
    let map = chunk(&chunks, 4105);

    assert!(map.chunk_type.is_compressed());
    let tiles = decode_all::<TileMapEntry>(&map.data);
    assert_eq!(tiles.len(), MAP_WIDTH * MAP_HEIGHT);

    for y in 0..MAP_HEIGHT {
        for x in 0..MAP_WIDTH {
            let border = x == 0 || y == 0 || x == MAP_WIDTH - 1 || y == MAP_HEIGHT - 1;
            let expected = if border { TileType::Solid } else { TileType::Open };
            assert_eq!(tiles[y * MAP_WIDTH + x].tile_type, expected, "tile ({x}, {y})");
        }
    }
}

#[test]
fn test_master_table_free_list() {
    let chunks = read_archive(&archive_bytes(&ArchivePlan::default()));
    let master = decode_all::<LevelObjectEntry>(&chunk(&chunks, 4108).data);

    assert_eq!(master.len(), MASTER_OBJECT_COUNT);
    assert_eq!(master[0].previous, 871);
    assert_eq!(master[0].next, 1);
    assert_eq!(master[871].next, 0);

    // Following next from 0 visits every slot once.
    let mut visited = HashSet::new();
    let mut index = 0usize;
    loop {
        assert!(visited.insert(index), "slot {index} visited twice");
        index = usize::from(master[index].next);
        if index == 0 {
            break;
        }
    }
    assert_eq!(visited.len(), MASTER_OBJECT_COUNT);
    assert!(master.iter().all(|e| e.in_use == 0));
}

#[test]
fn test_cross_reference_free_list() {
    let chunks = read_archive(&archive_bytes(&ArchivePlan::default()));
    let refs = decode_all::<LevelObjectCrossReference>(&chunk(&chunks, 4109).data);

    assert_eq!(refs.len(), CROSS_REFERENCE_COUNT);
    assert_eq!(refs[1599].next_object_index, 0);
    for (index, entry) in refs.iter().enumerate() {
        assert_eq!(usize::from(entry.next_object_index), (index + 1) % CROSS_REFERENCE_COUNT);
        assert_eq!(entry.tile_x, 0);
        assert_eq!(entry.next_tile_index, 0);
    }
}

#[test]
fn test_class_tables() {
    let chunks = read_archive(&archive_bytes(&ArchivePlan::default()));

    for class in &OBJECT_CLASSES {
        let id = u16::from(class.id);
        let table = chunk(&chunks, 4110 + id);
        let template = chunk(&chunks, 4125 + id);

        assert_eq!(table.chunk_type, ChunkType::Basic);
        assert_eq!(table.data.len(), class.entry_width * class.entry_count, "{}", class.name);
        assert_eq!(template.data, vec![0; class.entry_width], "{}", class.name);

        let count = class.entry_count;
        for (index, entry) in table.data.chunks(class.entry_width).enumerate() {
            let prefix = decode_all::<LevelObjectPrefix>(&entry[..6]);
            assert_eq!(usize::from(prefix[0].next), (index + 1) % count, "{}[{index}]", class.name);
            assert_eq!(usize::from(prefix[0].previous), (index + count - 1) % count);
            assert_eq!(prefix[0].level_object_table_index, 0);
            assert!(entry[6..].iter().all(|&b| b == 0));
        }
    }
}

#[test]
fn test_single_slot_table_links_to_itself() {
    let table = Table::free_list(1, LevelObjectEntry::default).unwrap();
    let entry = table.get(0).unwrap();
    assert_eq!((entry.next, entry.previous), (0, 0));

    let walk: Vec<usize> = table.walk(0, Direction::Forward).collect();
    assert_eq!(walk, vec![0]);
}

#[test]
fn test_identifiers_unique() {
    let chunks = read_archive(&archive_bytes(&ArchivePlan::default()));
    let ids: HashSet<u16> = chunks.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), chunks.len());
}

#[test]
fn test_deterministic() {
    let plan = ArchivePlan {
        archive_name: "Citadel".to_string(),
        level: 3,
        edition: Edition::Cd,
        ..ArchivePlan::default()
    };
    assert_eq!(archive_bytes(&plan), archive_bytes(&plan));
}

#[test]
fn test_floppy_edition() {
    let plan = ArchivePlan {
        edition: Edition::Floppy,
        ..ArchivePlan::default()
    };
    let chunks = read_archive(&archive_bytes(&plan));

    assert!(chunks.iter().all(|c| c.id != 4152 && c.id != 4153));
    assert_eq!(chunk(&chunks, 4151).data.len(), 0x3C0);
}

#[test]
fn test_other_level_block() {
    let plan = ArchivePlan {
        level: 5,
        ..ArchivePlan::default()
    };
    let chunks = read_archive(&archive_bytes(&plan));

    let level: Vec<u16> = chunks.iter().map(|c| c.id).filter(|&id| id >= 4000).collect();
    assert_eq!(level.first(), Some(&4502));
    assert_eq!(level.last(), Some(&4553));
}

#[test]
fn test_invalid_level_rejected() {
    let plan = ArchivePlan {
        level: 615,
        ..ArchivePlan::default()
    };
    let mut buffer = Vec::new();
    let err = write_archive_to(Cursor::new(&mut buffer), &plan).unwrap_err();
    assert!(matches!(err, ConstructError::LevelOutOfRange(615)));
    assert!(buffer.is_empty());
}

#[test]
fn test_invalid_plan_keeps_existing_file() {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("test_construct_keep_{id}.dat"));
    std::fs::write(&path, b"previous archive").unwrap();

    let bad_level = ArchivePlan {
        level: 615,
        ..ArchivePlan::default()
    };
    assert!(matches!(
        write_archive(&path, &bad_level),
        Err(ConstructError::LevelOutOfRange(615))
    ));

    let bad_name = ArchivePlan {
        archive_name: "bad\0name".to_string(),
        ..ArchivePlan::default()
    };
    assert!(matches!(
        write_archive(&path, &bad_name),
        Err(ConstructError::InvalidArchiveName(_))
    ));

    assert_eq!(std::fs::read(&path).unwrap(), b"previous archive");
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_write_file() {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("test_construct_{id}.dat"));

    let summary = write_archive(&path, &ArchivePlan::default()).unwrap();
    let file = std::fs::read(&path).unwrap();

    assert_eq!(summary.file_size, file.len() as u64);
    assert_eq!(summary.chunk_count, 2 + 52);
    assert_eq!(summary.level.chunks, 52);
    assert_eq!(read_archive(&file).len(), summary.chunk_count);

    std::fs::remove_file(&path).ok();
}
