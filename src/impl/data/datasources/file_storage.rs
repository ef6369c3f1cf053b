use std::{
    fs, io,
    path::{Path, PathBuf},
};

use fractic_server_error::ServerError;
use tracing::warn;

use crate::errors::StorageWriteFailed;

use super::key_value_storage::KeyValueStorage;

/// Durable storage keeping each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "unreadable storage document; treating as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ServerError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageWriteFailed::with_debug(key, &e))?;
        // Write-then-rename so readers never observe a half-written document.
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| StorageWriteFailed::with_debug(key, &e))?;
        fs::rename(&tmp, self.path_for(key)).map_err(|e| StorageWriteFailed::with_debug(key, &e))
    }

    fn remove(&self, key: &str) -> Result<(), ServerError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageWriteFailed::with_debug(key, &e)),
        }
    }
}
