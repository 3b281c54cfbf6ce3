//! # Record Tables
//!
//! Fixed-capacity, homogeneous record sequences indexed `0..N`.
//!
//! ## Flavors
//!
//! - **Free-list tables**: every slot is linked into one circular
//!   doubly-linked list. A fresh table is an all-free pool the game engine
//!   allocates from.
//! - **Tile grids**: a row-major map whose border cells are solid walls.
//!
//! ```text
//! free list, N = 4:   next:      0 -> 1 -> 2 -> 3 -> 0
//!                     previous:  0 -> 3 -> 2 -> 1 -> 0
//! ```

use crate::encoding::{Encode, PositionalEncoder};
use crate::error::{FormatError, FormatResult};
use crate::records::{TileMapEntry, TileType};

/// Largest table a 16-bit link index can address.
pub const MAX_TABLE_ENTRIES: usize = u16::MAX as usize + 1;

/// Width of a level map in tiles.
pub const MAP_WIDTH: usize = 64;

/// Height of a level map in tiles.
pub const MAP_HEIGHT: usize = 64;

/// A record carrying free-list links.
pub trait FreeListEntry {
    /// Stores the links of this slot.
    ///
    /// Records that only chain forward ignore `previous`.
    fn link(&mut self, next: u16, previous: u16);

    /// Index of the following slot.
    fn next_index(&self) -> u16;

    /// Index of the preceding slot, if the record links backwards.
    fn previous_index(&self) -> Option<u16>;
}

/// Direction to follow a free list in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Follow `next` links.
    Forward,
    /// Follow `previous` links.
    Backward,
}

/// Fixed-length ordered sequence of records.
///
/// Records are owned by the table for the lifetime of one chunk's
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table<R> {
    entries: Box<[R]>,
}

impl<R> Table<R> {
    /// Creates a table of `count` records, each produced by `factory(index)`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTable` for `count == 0` and `TableTooLarge` when the
    /// table cannot be addressed with 16-bit indices.
    pub fn from_fn(count: usize, factory: impl FnMut(usize) -> R) -> FormatResult<Self> {
        check_capacity(count)?;

        Ok(Self {
            entries: (0..count).map(factory).collect(),
        })
    }

    /// Returns the number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table holds no records.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a record by index.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.entries.get(index)
    }

    /// Returns all records in index order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[R] {
        &self.entries
    }

    /// Iterates over all records in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.entries.iter()
    }
}

impl<R: FreeListEntry> Table<R> {
    /// Creates an all-free pool of `count` records.
    ///
    /// Each record is built by `factory` and then linked:
    /// `next = (i + 1) mod count`, `previous = (count + i - 1) mod count`.
    /// A single-record table links to itself.
    ///
    /// # Errors
    ///
    /// Same as [`Table::from_fn`].
    pub fn free_list(count: usize, mut factory: impl FnMut() -> R) -> FormatResult<Self> {
        let mut table = Self::from_fn(count, |_| factory())?;

        for (index, entry) in table.entries.iter_mut().enumerate() {
            let (next, previous) = free_list_links(index, count);
            entry.link(next, previous);
        }

        Ok(table)
    }

    /// Walks the list from `start`, yielding each visited slot once.
    ///
    /// The walk stops when the chain returns to `start`, after `len()` slots,
    /// or when a record has no link in the requested direction.
    #[must_use]
    pub fn walk(&self, start: usize, direction: Direction) -> FreeListWalk<'_, R> {
        FreeListWalk {
            table: self,
            start,
            current: (start < self.len()).then_some(start),
            remaining: self.len(),
            direction,
        }
    }
}

impl Table<TileMapEntry> {
    /// Creates a `width` x `height` row-major tile grid.
    ///
    /// Every cell is built by `factory`; afterwards the terrain of each border
    /// cell is forced to `Solid`. No other field is touched by the border pass.
    ///
    /// # Errors
    ///
    /// Same as [`Table::from_fn`] for `width * height` cells.
    pub fn tile_grid(
        width: usize,
        height: usize,
        mut factory: impl FnMut() -> TileMapEntry,
    ) -> FormatResult<Self> {
        let count = width.checked_mul(height).ok_or(FormatError::TableTooLarge {
            count: usize::MAX,
            max: MAX_TABLE_ENTRIES,
        })?;
        let mut table = Self::from_fn(count, |_| factory())?;

        for (index, entry) in table.entries.iter_mut().enumerate() {
            if is_border_cell(index, width, height) {
                entry.tile_type = TileType::Solid;
            }
        }

        Ok(table)
    }

    /// Creates the standard 64x64 level map: open floor walled in by solid
    /// border cells.
    ///
    /// # Errors
    ///
    /// Never fails for the standard dimensions; the result type mirrors
    /// [`Table::tile_grid`].
    pub fn level_map() -> FormatResult<Self> {
        Self::tile_grid(MAP_WIDTH, MAP_HEIGHT, || TileMapEntry::with_type(TileType::Open))
    }
}

impl<R: Encode> Encode for Table<R> {
    fn encoded_len(&self) -> usize {
        self.entries.iter().map(Encode::encoded_len).sum()
    }

    fn encode(&self, encoder: &mut PositionalEncoder) {
        for entry in self.entries.iter() {
            entry.encode(encoder);
        }
    }
}

/// Iterator over the slots of a free list.
pub struct FreeListWalk<'a, R> {
    table: &'a Table<R>,
    start: usize,
    current: Option<usize>,
    remaining: usize,
    direction: Direction,
}

impl<R: FreeListEntry> Iterator for FreeListWalk<'_, R> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.current?;
        let entry = self.table.get(index)?;
        self.remaining -= 1;

        let following = match self.direction {
            Direction::Forward => Some(usize::from(entry.next_index())),
            Direction::Backward => entry.previous_index().map(usize::from),
        };
        self.current = following.filter(|&next| next != self.start);

        Some(index)
    }
}

/// Returns true if the cell lies in the first or last row or column.
#[inline]
#[must_use]
pub fn is_border_cell(index: usize, width: usize, height: usize) -> bool {
    let row = index / width;
    let column = index % width;
    row == 0 || row + 1 == height || column == 0 || column + 1 == width
}

/// Checks that a table of `count` records can be built and addressed.
///
/// # Errors
///
/// Returns `EmptyTable` for zero and `TableTooLarge` above
/// [`MAX_TABLE_ENTRIES`].
pub fn check_capacity(count: usize) -> FormatResult<()> {
    if count == 0 {
        return Err(FormatError::EmptyTable);
    }
    if count > MAX_TABLE_ENTRIES {
        return Err(FormatError::TableTooLarge {
            count,
            max: MAX_TABLE_ENTRIES,
        });
    }
    Ok(())
}

/// Links of slot `index` in a circular list of `count` slots.
#[allow(clippy::cast_possible_truncation)] // count <= MAX_TABLE_ENTRIES
fn free_list_links(index: usize, count: usize) -> (u16, u16) {
    let next = (index + 1) % count;
    let previous = (count + index - 1) % count;
    (next as u16, previous as u16)
}
