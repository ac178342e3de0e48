//! Durable load/save of cassettes

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Result, VcrError};

use super::{validate_cassette_name, Cassette, CASSETTE_EXTENSION};

/// Store for cassette files, one JSON file per scenario name
#[derive(Debug, Clone)]
pub struct CassetteStore {
    cassette_dir: PathBuf,
}

impl CassetteStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is created on first save, not here.
    #[must_use]
    pub fn new(cassette_dir: PathBuf) -> Self {
        Self { cassette_dir }
    }

    /// Resolve the file path for a cassette name
    ///
    /// # Errors
    ///
    /// Returns error if the name is invalid
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_cassette_name(name)?;
        Ok(self
            .cassette_dir
            .join(format!("{name}.{CASSETTE_EXTENSION}")))
    }

    /// Whether a cassette file exists for the given name
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.exists())
    }

    /// Load a cassette from disk
    ///
    /// # Errors
    ///
    /// Returns [`VcrError::CorruptCassette`] if the file exists but cannot
    /// be parsed, or [`VcrError::Io`] if it cannot be read
    pub fn load(&self, name: &str) -> Result<Cassette> {
        let path = self.path_for(name)?;
        let raw = fs::read_to_string(&path)?;

        let cassette: Cassette =
            serde_json::from_str(&raw).map_err(|e| VcrError::CorruptCassette {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            "Loaded cassette '{}': {} entries ({})",
            name,
            cassette.len(),
            path.display()
        );

        Ok(cassette)
    }

    /// Save a cassette to disk, overwriting any existing file
    ///
    /// Missing parent directories are created first. The file is written to
    /// a temporary sibling and renamed into place, so an interrupted save
    /// leaves either the previous file or the complete new one.
    ///
    /// # Errors
    ///
    /// Returns [`VcrError::Io`] if the directory or file cannot be written
    pub fn save(&self, cassette: &Cassette, name: &str) -> Result<()> {
        let path = self.path_for(name)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let serialized = serde_json::to_string_pretty(cassette)
            .map_err(|e| VcrError::Other(format!("Failed to serialize cassette: {e}")))?;

        let tmp_path = temp_path(&path);
        fs::write(&tmp_path, serialized)?;
        fs::rename(&tmp_path, &path)?;

        debug!(
            "Saved cassette '{}': {} entries ({})",
            name,
            cassette.len(),
            path.display()
        );

        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut os_string = path.as_os_str().to_os_string();
    os_string.push(".tmp");
    PathBuf::from(os_string)
}
