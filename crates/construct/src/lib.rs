//! # Construct
//!
//! Generates the initial archive file of a new game: the archive name,
//! the initial game state and every chunk of one level, all empty.
//!
//! ## Pipeline
//!
//! ```text
//! ArchivePlan -> generate -> [emit_static | emit_encoded] -> ChunkConsumer
//!                   |
//!                   +-> assemble_level (LEVEL_LAYOUT, 4000 + 100 * level)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use construct::{generate, ArchivePlan};
//! use construct_archive::RecordingConsumer;
//!
//! let mut consumer = RecordingConsumer::new();
//! let level = generate(&mut consumer, &ArchivePlan::default()).unwrap();
//! assert_eq!(level.base.value(), 4100);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod driver;
pub mod emit;
pub mod error;
pub mod layout;
pub mod level;

pub use config::ConstructConfig;
pub use driver::{
    emit_archive_name, emit_game_state, generate, write_archive, write_archive_to, ArchivePlan,
    ArchiveSummary, DEFAULT_ARCHIVE_FILE, DEFAULT_ARCHIVE_NAME, GAME_STATE_SIZE, TITLE,
};
pub use emit::{emit_encoded, emit_static, emit_static_as, ChunkValue};
pub use error::{ConstructError, ConstructResult};
pub use layout::{
    validate_layout, ChunkKind, Edition, LayoutEntry, StaticContent, CROSS_REFERENCE_COUNT,
    LEVEL_LAYOUT, MASTER_OBJECT_COUNT,
};
pub use level::{assemble_layout, assemble_level, LevelSummary};
