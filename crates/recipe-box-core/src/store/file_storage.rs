//! File-backed key/value store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary file that is
//! synced and then renamed over the target, so a crash mid-write never leaves
//! a truncated collection behind.

use crate::{CoreResult, RecipeError, store::KeyValueStore};

use std::{
    fs,
    io::{ErrorKind, Write},
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Key/value store persisting one JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStorage {
    #[track_caller]
    #[instrument(skip(self))]
    fn load(&self, key: &str) -> CoreResult<Option<String>> {
        let path = self.slot_path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(path = ?path, bytes = contents.len(), "Slot loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(RecipeError::Storage {
                key: key.to_string(),
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    #[track_caller]
    #[instrument(skip(self, value))]
    fn save(&mut self, key: &str, value: &str) -> CoreResult<()> {
        let caller = Location::caller();
        let storage_error = |source| RecipeError::Storage {
            key: key.to_string(),
            source,
            location: ErrorLocation::from(caller),
        };

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(storage_error)?;
            debug!(dir = ?self.dir, "Created storage directory");
        }

        let path = self.slot_path(key);
        let temp_path = path.with_extension("json.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(storage_error)?;
        temp_file
            .write_all(value.as_bytes())
            .map_err(storage_error)?;
        temp_file.sync_all().map_err(storage_error)?;
        fs::rename(&temp_path, &path).map_err(storage_error)?;

        debug!(path = ?path, bytes = value.len(), "Slot saved (atomic write)");

        Ok(())
    }
}
