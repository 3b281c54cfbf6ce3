//! Generator configuration, loaded once from a TOML file.
//!
//! ```toml
//! file = "archive.dat"
//! archive_name = "Starting Game"
//! level = 1
//! edition = "cd"
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::driver::{ArchivePlan, DEFAULT_ARCHIVE_FILE, DEFAULT_ARCHIVE_NAME};
use crate::error::{ConstructError, ConstructResult};
use crate::layout::Edition;

/// Generator settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstructConfig {
    /// Target file.
    pub file: PathBuf,
    /// Name stored in the archive.
    pub archive_name: String,
    /// Level to assemble.
    pub level: u16,
    /// Release edition.
    pub edition: Edition,
}

impl Default for ConstructConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_ARCHIVE_FILE),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            level: 1,
            edition: Edition::default(),
        }
    }
}

impl ConstructConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Config` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> ConstructResult<Self> {
        toml::from_str(text).map_err(|e| ConstructError::Config(e.to_string()))
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_toml(path: impl AsRef<Path>) -> ConstructResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConstructError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// The generation plan these settings describe.
    #[must_use]
    pub fn plan(&self) -> ArchivePlan {
        ArchivePlan {
            archive_name: self.archive_name.clone(),
            level: self.level,
            edition: self.edition,
            ..ArchivePlan::default()
        }
    }
}
