use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{data_dir, BlobStore};
use crate::error::StorageError;

/// Blob store keeping each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the default data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Store rooted at `dir`, which must already exist.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable blob, treating as missing");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        // Replace atomically via rename.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|source| StorageError::WriteFailed {
                key: key.to_string(),
                path,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::at(temp_dir.path());
        assert!(store.get("daka-projects").is_none());
    }

    #[test]
    fn set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::at(temp_dir.path());

        store.set("daka-projects", "[]").unwrap();
        assert_eq!(store.get("daka-projects").as_deref(), Some("[]"));
        assert!(temp_dir.path().join("daka-projects.json").exists());
        assert!(!temp_dir.path().join("daka-projects.json.tmp").exists());

        store.set("daka-projects", "[1]").unwrap();
        assert_eq!(store.get("daka-projects").as_deref(), Some("[1]"));
    }

    #[test]
    fn set_into_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::at(temp_dir.path().join("nope"));
        let result = store.set("daka-checkins", "{}");
        assert!(matches!(result, Err(StorageError::WriteFailed { .. })));
    }
}
