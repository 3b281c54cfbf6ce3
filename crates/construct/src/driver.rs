//! # Archive Driver
//!
//! Produces a complete starting archive: the archive name, the game state
//! and one assembled level, written into a resource file that is finalized
//! exactly once whatever happens during generation.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use construct_archive::{ChunkConsumer, ResourceFileWriter};
use construct_format::{ContentType, ResourceId, ARCHIVE_NAME_ID, GAME_STATE_ID};

use crate::emit::{emit_static, emit_static_as};
use crate::error::{ConstructError, ConstructResult};
use crate::layout::{validate_layout, Edition, LEVEL_LAYOUT};
use crate::level::{assemble_level, LevelSummary};

/// Size of the initial game state block.
pub const GAME_STATE_SIZE: usize = 0x054D;

/// Archive name used when none is configured.
pub const DEFAULT_ARCHIVE_NAME: &str = "Starting Game";

/// File written when none is configured.
pub const DEFAULT_ARCHIVE_FILE: &str = "archive.dat";

/// Tool title, logged when an archive is written.
pub const TITLE: &str = concat!("InkyBlackness Construct v.", env!("CARGO_PKG_VERSION"));

/// What to generate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchivePlan {
    /// Title of the generating tool.
    pub title: String,
    /// Name stored in the archive.
    pub archive_name: String,
    /// Level to assemble.
    pub level: u16,
    /// Release edition.
    pub edition: Edition,
}

impl Default for ArchivePlan {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            level: 1,
            edition: Edition::default(),
        }
    }
}

impl ArchivePlan {
    /// Checks everything generation depends on, before any byte is written.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArchiveName`, `LevelOutOfRange`, or the layout error.
    pub fn validate(&self) -> ConstructResult<()> {
        check_archive_name(&self.archive_name)?;
        ResourceId::level_base(self.level).ok_or(ConstructError::LevelOutOfRange(self.level))?;
        validate_layout(&LEVEL_LAYOUT)
    }
}

/// What a finished archive contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// The assembled level.
    pub level: LevelSummary,
    /// Chunks in the file.
    pub chunk_count: usize,
    /// Size of the file in bytes.
    pub file_size: u64,
}

/// Emits the archive name as a NUL-terminated text chunk.
///
/// # Errors
///
/// Returns `InvalidArchiveName` if the name contains a NUL byte.
pub fn emit_archive_name<C: ChunkConsumer + ?Sized>(
    consumer: &mut C,
    name: &str,
) -> ConstructResult<usize> {
    check_archive_name(name)?;
    let mut bytes = Vec::with_capacity(name.len() + 1);
    bytes.extend_from_slice(name.as_bytes());
    bytes.push(0);
    emit_static_as(consumer, ARCHIVE_NAME_ID, ContentType::Text, bytes)
}

fn check_archive_name(name: &str) -> ConstructResult<()> {
    if name.contains('\0') {
        return Err(ConstructError::InvalidArchiveName(name.to_string()));
    }
    Ok(())
}

/// Emits the all-zero initial game state.
///
/// # Errors
///
/// Propagates container failures.
pub fn emit_game_state<C: ChunkConsumer + ?Sized>(consumer: &mut C) -> ConstructResult<usize> {
    emit_static(consumer, GAME_STATE_ID, vec![0; GAME_STATE_SIZE])
}

/// Emits every chunk of the plan. Does not finish the consumer.
///
/// An invalid plan is rejected before the first chunk.
///
/// # Errors
///
/// Stops at the first failure.
pub fn generate<C: ChunkConsumer + ?Sized>(
    consumer: &mut C,
    plan: &ArchivePlan,
) -> ConstructResult<LevelSummary> {
    plan.validate()?;
    emit_archive_name(consumer, &plan.archive_name)?;
    emit_game_state(consumer)?;
    assemble_level(consumer, plan.level, plan.edition)
}

/// Generates the plan into `sink` and finishes the file.
///
/// An invalid plan is rejected before anything reaches `sink`. Once writing
/// has started, the file is finished even when generation fails; the
/// generation error is reported in that case.
///
/// # Errors
///
/// Returns the plan error, the generation error, or else the finalization
/// error.
pub fn write_archive_to<W: Write + Seek>(
    sink: W,
    plan: &ArchivePlan,
) -> ConstructResult<(W, ArchiveSummary)> {
    plan.validate()?;
    let mut writer = ResourceFileWriter::new(sink)?;

    let generated = generate(&mut writer, plan);
    let finished = writer.finish();
    let level = generated?;
    finished?;

    let summary = ArchiveSummary {
        level,
        chunk_count: writer.chunk_count(),
        file_size: writer.bytes_written(),
    };
    Ok((writer.into_inner()?, summary))
}

/// Generates the plan into the file at `path`, replacing it.
///
/// An existing file is left untouched when the plan is invalid.
///
/// # Errors
///
/// See [`write_archive_to`]; also fails if the file cannot be created.
pub fn write_archive(path: impl AsRef<Path>, plan: &ArchivePlan) -> ConstructResult<ArchiveSummary> {
    let path = path.as_ref();
    tracing::info!("{}", plan.title);
    plan.validate()?;
    tracing::info!("Writing archive {:?} to {}", plan.archive_name, path.display());

    let file = File::create(path).map_err(construct_archive::ArchiveError::from)?;
    let (mut sink, summary) = write_archive_to(BufWriter::new(file), plan)?;
    sink.flush().map_err(construct_archive::ArchiveError::from)?;

    tracing::info!(
        "Archive {} complete: {} chunks, {} bytes",
        path.display(),
        summary.chunk_count,
        summary.file_size
    );
    Ok(summary)
}
