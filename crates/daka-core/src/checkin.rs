//! Per-project check-in sets.
//!
//! A [`CheckinPartition`] maps a project id to the set of days checked in
//! for it. Presence is the only state: a day is checked when its key is in
//! the set. Mutations return a new partition and leave the receiver as it
//! was; untouched project sets are shared between the two.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::calendar::DayKey;

/// Aggregates shown for the active project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinStats {
    pub total: usize,
    pub most_recent: Option<DayKey>,
    pub streak: u32,
}

/// Check-ins for every project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckinPartition {
    projects: BTreeMap<String, Arc<BTreeSet<DayKey>>>,
}

impl CheckinPartition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `key` for `project_id`: remove it if present, insert otherwise.
    ///
    /// A project whose set becomes empty is dropped from the map, so removing
    /// the last day and never having checked in look the same.
    pub fn toggle(&self, project_id: &str, key: DayKey) -> CheckinPartition {
        let mut next = self.clone();
        let days = next.projects.entry(project_id.to_string()).or_default();
        let days = Arc::make_mut(days);
        if !days.remove(&key) {
            days.insert(key);
        }
        if days.is_empty() {
            next.projects.remove(project_id);
        }
        next
    }

    pub fn is_checked(&self, project_id: &str, key: DayKey) -> bool {
        self.projects
            .get(project_id)
            .is_some_and(|days| days.contains(&key))
    }

    pub fn total_count(&self, project_id: &str) -> usize {
        self.projects.get(project_id).map_or(0, |days| days.len())
    }

    /// Latest checked day, or `None` when the project has no check-ins.
    pub fn most_recent(&self, project_id: &str) -> Option<DayKey> {
        self.projects
            .get(project_id)
            .and_then(|days| days.last().copied())
    }

    /// Consecutive checked days counting back from `today` (inclusive).
    ///
    /// Zero when `today` itself is unchecked.
    pub fn current_streak(&self, project_id: &str, today: NaiveDate) -> u32 {
        let Some(days) = self.projects.get(project_id) else {
            return 0;
        };

        let mut streak = 0;
        let mut cursor = Some(DayKey::from(today));
        while let Some(key) = cursor {
            if !days.contains(&key) {
                break;
            }
            streak += 1;
            cursor = key.pred();
        }
        streak
    }

    pub fn stats(&self, project_id: &str, today: NaiveDate) -> CheckinStats {
        CheckinStats {
            total: self.total_count(project_id),
            most_recent: self.most_recent(project_id),
            streak: self.current_streak(project_id, today),
        }
    }

    /// Checked days for a project, oldest first.
    pub fn dates<'a>(&'a self, project_id: &str) -> impl Iterator<Item = DayKey> + 'a {
        self.projects
            .get(project_id)
            .into_iter()
            .flat_map(|days| days.iter().copied())
    }

    /// Ids of every project that has at least one check-in.
    #[cfg(test)]
    pub(crate) fn project_ids(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Rebuild a partition from its stored shape.
    ///
    /// Any value counts as present, including `false`; only the key matters.
    /// Keys that are not valid `YYYY-MM-DD` days are skipped, as are project
    /// entries that are not objects.
    pub fn from_raw(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut projects = BTreeMap::new();
        for (project_id, entries) in raw {
            let serde_json::Value::Object(entries) = entries else {
                warn!(project = %project_id, "skipping stored check-ins that are not an object");
                continue;
            };
            let mut days = BTreeSet::new();
            for key in entries.keys() {
                match key.parse::<DayKey>() {
                    Ok(day) => {
                        days.insert(day);
                    }
                    Err(err) => warn!(project = %project_id, %err, "skipping stored check-in"),
                }
            }
            if !days.is_empty() {
                projects.insert(project_id, Arc::new(days));
            }
        }
        Self { projects }
    }
}

impl Serialize for CheckinPartition {
    /// `{ "<project id>": { "YYYY-MM-DD": true, ... }, ... }`
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Days<'a>(&'a BTreeSet<DayKey>);

        impl Serialize for Days<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for day in self.0 {
                    map.serialize_entry(day, &true)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(self.projects.len()))?;
        for (project_id, days) in &self.projects {
            map.serialize_entry(project_id, &Days(days))?;
        }
        map.end()
    }
}
