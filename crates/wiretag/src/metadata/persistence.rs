// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fs;
use std::path::{Path, PathBuf};

use super::TypeMetaData;
use crate::error::PersistenceError;

// ---------------------------------------------------------------------------
// FilePersistence
// ---------------------------------------------------------------------------

/// JSON file persistence for [`TypeMetaData`].
///
/// The whole store lives in a single pretty-printed file; key ordering is
/// stable, so saved files diff cleanly between discovery runs.
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    /// Create a `FilePersistence` writing to `path`.
    ///
    /// The parent directory is created if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(FilePersistence { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store to disk, replacing any previous file.
    pub fn save(&self, metadata: &TypeMetaData) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(metadata).map_err(|source| {
            PersistenceError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::debug!(
            "[FilePersistence] saved {} type entries to {}",
            metadata.type_count(),
            self.path.display()
        );
        Ok(())
    }

    /// Load the store; a missing file yields an empty store.
    pub fn load(&self) -> Result<TypeMetaData, PersistenceError> {
        if !self.path.exists() {
            return Ok(TypeMetaData::new());
        }

        let json = fs::read_to_string(&self.path).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| PersistenceError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
