//! Persistence for projects and check-ins.
//!
//! State lives in a [`BlobStore`]: a flat key/value store of JSON text.
//! [`FileStore`] keeps one file per key in the data directory and
//! [`MemoryStore`] backs tests. The typed load/save helpers are in
//! [`gateway`].

mod file;
pub mod gateway;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Blob key holding the project list.
pub const PROJECTS_KEY: &str = "daka-projects";
/// Blob key holding the check-in partition.
pub const CHECKINS_KEY: &str = "daka-checkins";
/// Blob key holding the id of the selected project.
pub const ACTIVE_PROJECT_KEY: &str = "daka-active-project";

/// Flat key/value store of serialized blobs.
pub trait BlobStore {
    /// Read the blob under `key`. Missing or unreadable blobs are `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the blob under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Returns the directory Daka keeps its state in.
///
/// `DAKA_DATA_DIR` wins when set. Otherwise `~/.config/daka`, or
/// `~/.config/daka-dev` with `DAKA_ENV=dev`. The directory is created if
/// missing.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("DAKA_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAKA_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("daka-dev")
            } else {
                base_dir.join("daka")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
