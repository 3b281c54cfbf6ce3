//! # Object Classes
//!
//! The fifteen fixed categories of in-level entities. Each class owns one
//! table of `entry_count` entries, `entry_width` bytes each. The (width,
//! count) pairs are format constants.

use crate::error::{FormatError, FormatResult};
use crate::records::{ClassObjectEntry, LEVEL_OBJECT_PREFIX_SIZE};
use crate::table::{check_capacity, Table};

/// Width of a weapon entry in bytes.
pub const LEVEL_WEAPON_ENTRY_SIZE: usize = 8;

/// Width of a scenery entry in bytes.
pub const LEVEL_SCENERY_ENTRY_SIZE: usize = 16;

/// Width of an item entry in bytes.
pub const LEVEL_ITEM_ENTRY_SIZE: usize = 16;

/// Number of object classes.
pub const OBJECT_CLASS_COUNT: usize = 15;

/// Static parameters of one object class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectClass {
    /// Class index.
    pub id: u8,
    /// Human-readable name.
    pub name: &'static str,
    /// Width of one table entry in bytes, prefix included.
    pub entry_width: usize,
    /// Number of entries in the class table.
    pub entry_count: usize,
}

/// All object classes, indexed by class id.
pub const OBJECT_CLASSES: [ObjectClass; OBJECT_CLASS_COUNT] = [
    ObjectClass::new(0, "weapons", LEVEL_WEAPON_ENTRY_SIZE, 16),
    ObjectClass::new(1, "ammunition", 6, 32),
    ObjectClass::new(2, "projectiles", 0x28, 32),
    ObjectClass::new(3, "explosives", 12, 32),
    ObjectClass::new(4, "patches", 6, 32),
    ObjectClass::new(5, "hardware", 7, 8),
    ObjectClass::new(6, "software", 9, 16),
    ObjectClass::new(7, "scenery", LEVEL_SCENERY_ENTRY_SIZE, 176),
    ObjectClass::new(8, "items", LEVEL_ITEM_ENTRY_SIZE, 128),
    ObjectClass::new(9, "panels", 0x1E, 64),
    ObjectClass::new(10, "barriers", 14, 64),
    ObjectClass::new(11, "animations", 10, 32),
    ObjectClass::new(12, "markers", 0x1C, 160),
    ObjectClass::new(13, "containers", 21, 64),
    ObjectClass::new(14, "critters", 0x2E, 64),
];

impl ObjectClass {
    /// Creates a class description.
    #[must_use]
    pub const fn new(id: u8, name: &'static str, entry_width: usize, entry_count: usize) -> Self {
        Self {
            id,
            name,
            entry_width,
            entry_count,
        }
    }

    /// Looks up a class by id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownObjectClass` for ids outside the catalogue.
    pub fn by_id(id: u8) -> FormatResult<&'static Self> {
        OBJECT_CLASSES
            .get(usize::from(id))
            .ok_or(FormatError::UnknownObjectClass(id))
    }

    /// Checks that the class parameters describe a buildable table.
    ///
    /// # Errors
    ///
    /// Returns `EntryWidthTooSmall`, `EmptyTable` or `TableTooLarge` for
    /// inconsistent parameters.
    pub fn validate(&self) -> FormatResult<()> {
        if self.entry_width < LEVEL_OBJECT_PREFIX_SIZE {
            return Err(FormatError::EntryWidthTooSmall {
                width: self.entry_width,
                prefix: LEVEL_OBJECT_PREFIX_SIZE,
            });
        }
        check_capacity(self.entry_count)
    }

    /// Total size of the class table in bytes.
    #[must_use]
    pub const fn table_size(&self) -> usize {
        self.entry_width * self.entry_count
    }

    /// Builds the all-free class table.
    ///
    /// # Errors
    ///
    /// Fails if the class parameters are inconsistent.
    pub fn build_table(&self) -> FormatResult<Table<ClassObjectEntry>> {
        self.validate()?;
        let template = ClassObjectEntry::zeroed(self.entry_width)?;
        Table::free_list(self.entry_count, || template.clone())
    }

    /// Bytes of the single-entry template chunk of this class.
    #[must_use]
    pub fn template_bytes(&self) -> Vec<u8> {
        vec![0; self.entry_width]
    }
}
