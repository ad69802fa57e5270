//! Typed, best-effort load/save of the stored aggregates.
//!
//! Loading never fails: a missing or malformed blob logs a warning and
//! reads as "no data". Saving writes the value verbatim as JSON.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::{BlobStore, ACTIVE_PROJECT_KEY, CHECKINS_KEY, PROJECTS_KEY};
use crate::checkin::CheckinPartition;
use crate::error::StorageError;
use crate::registry::Project;

fn load_json<T: DeserializeOwned>(store: &impl BlobStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "malformed blob, ignoring");
            None
        }
    }
}

fn save_json<T: Serialize + ?Sized>(
    store: &mut impl BlobStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|source| StorageError::EncodeFailed {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Stored projects, or an empty list when missing or malformed.
pub fn load_projects(store: &impl BlobStore) -> Vec<Project> {
    load_json(store, PROJECTS_KEY).unwrap_or_default()
}

pub fn save_projects(store: &mut impl BlobStore, projects: &[Project]) -> Result<(), StorageError> {
    save_json(store, PROJECTS_KEY, projects)
}

/// Stored check-ins, or an empty partition when missing or malformed.
///
/// A malformed entry for one project drops only that project.
pub fn load_checkins(store: &impl BlobStore) -> CheckinPartition {
    let raw: Option<BTreeMap<String, serde_json::Value>> = load_json(store, CHECKINS_KEY);
    raw.map(CheckinPartition::from_raw).unwrap_or_default()
}

pub fn save_checkins(
    store: &mut impl BlobStore,
    checkins: &CheckinPartition,
) -> Result<(), StorageError> {
    save_json(store, CHECKINS_KEY, checkins)
}

/// The last selected project id, if one was stored.
pub fn load_active_id(store: &impl BlobStore) -> Option<String> {
    load_json(store, ACTIVE_PROJECT_KEY)
}

pub fn save_active_id(store: &mut impl BlobStore, active_id: &str) -> Result<(), StorageError> {
    save_json(store, ACTIVE_PROJECT_KEY, active_id)
}
