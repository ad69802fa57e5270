//! Application state shared with the interaction shell.
//!
//! [`App`] is built once from a [`BlobStore`] and owns the project registry
//! and the check-in partition. Every accepted mutation replaces the affected
//! value and then runs the commit hook, which saves it before returning.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::calendar::{build_week_grid, DayKey, WeekGrid};
use crate::checkin::{CheckinPartition, CheckinStats};
use crate::error::StorageError;
use crate::registry::{Project, ProjectRegistry};
use crate::storage::{gateway, BlobStore};

/// What a toggle request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Checked,
    Unchecked,
    /// The day is after today; nothing changed.
    RejectedFuture,
}

/// Which aggregate a commit persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Projects,
    Selection,
    Checkins,
}

pub struct App<S: BlobStore> {
    store: S,
    registry: ProjectRegistry,
    checkins: CheckinPartition,
}

impl<S: BlobStore> App<S> {
    /// Load state from `store` and restore the registry invariants.
    ///
    /// When reconciliation changed the stored projects or selection (first
    /// run, corrupt data, a stale active id), the repaired values are
    /// written back.
    ///
    /// # Errors
    /// Returns an error only if writing the repaired values fails.
    pub fn load(store: S) -> Result<Self, StorageError> {
        let stored_projects = gateway::load_projects(&store);
        let stored_active = gateway::load_active_id(&store);
        let checkins = gateway::load_checkins(&store);

        let registry =
            ProjectRegistry::reconcile(stored_projects.clone(), stored_active.as_deref());

        let mut app = Self {
            store,
            registry,
            checkins,
        };
        if app.registry.projects() != stored_projects.as_slice() {
            app.commit(Change::Projects)?;
        }
        if stored_active.as_deref() != Some(app.registry.active_id()) {
            app.commit(Change::Selection)?;
        }
        Ok(app)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    pub fn checkins(&self) -> &CheckinPartition {
        &self.checkins
    }

    pub fn projects(&self) -> &[Project] {
        self.registry.projects()
    }

    pub fn active_project(&self) -> &Project {
        self.registry.active()
    }

    /// Switch the visible project. Unknown ids change nothing.
    ///
    /// # Errors
    /// Returns an error if saving the selection fails.
    pub fn select_project(&mut self, project_id: &str) -> Result<bool, StorageError> {
        let next = self.registry.select_active(project_id);
        if next == self.registry {
            return Ok(next.active_id() == project_id);
        }
        self.registry = next;
        self.commit(Change::Selection)?;
        Ok(true)
    }

    /// Add a project and make it active. Blank names change nothing.
    ///
    /// # Errors
    /// Returns an error if saving fails.
    pub fn add_project(&mut self, name: &str) -> Result<Option<Project>, StorageError> {
        let (next, created) = self.registry.add_project(name);
        if created.is_some() {
            self.registry = next;
            self.commit(Change::Projects)?;
            self.commit(Change::Selection)?;
        }
        Ok(created)
    }

    pub fn week_grid(&self, today: NaiveDate, total_days: i64) -> WeekGrid {
        build_week_grid(today, total_days)
    }

    pub fn is_checked(&self, date: NaiveDate) -> bool {
        self.checkins
            .is_checked(self.registry.active_id(), DayKey::from(date))
    }

    /// Toggle `date` for the active project. Days after `today` are refused.
    ///
    /// # Errors
    /// Returns an error if saving fails.
    pub fn toggle_day(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<ToggleOutcome, StorageError> {
        if date > today {
            debug!(%date, %today, "refusing to toggle a future day");
            return Ok(ToggleOutcome::RejectedFuture);
        }

        let key = DayKey::from(date);
        let active_id = self.registry.active_id();
        self.checkins = self.checkins.toggle(active_id, key);
        let outcome = if self.checkins.is_checked(active_id, key) {
            ToggleOutcome::Checked
        } else {
            ToggleOutcome::Unchecked
        };
        self.commit(Change::Checkins)?;
        Ok(outcome)
    }

    /// Total, most recent day and streak for the active project.
    pub fn stats(&self, today: NaiveDate) -> CheckinStats {
        self.checkins.stats(self.registry.active_id(), today)
    }

    fn commit(&mut self, change: Change) -> Result<(), StorageError> {
        debug!(?change, "committing");
        match change {
            Change::Projects => gateway::save_projects(&mut self.store, self.registry.projects()),
            Change::Selection => {
                gateway::save_active_id(&mut self.store, self.registry.active_id())
            }
            Change::Checkins => gateway::save_checkins(&mut self.store, &self.checkins),
        }
    }
}

/// Label for a day's state, as shown next to the date.
pub fn status_label(checked: bool) -> &'static str {
    if checked {
        "已打卡"
    } else {
        "未打卡"
    }
}

/// Select-then-confirm wrapper around [`App::toggle_day`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckinDialog {
    selected: Option<NaiveDate>,
    open: bool,
}

impl CheckinDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `date` and open the dialog.
    pub fn open(&mut self, date: NaiveDate) {
        self.selected = Some(date);
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected_key(&self) -> Option<DayKey> {
        self.selected.map(DayKey::from)
    }

    /// Current state of the selected day for the active project.
    pub fn status<S: BlobStore>(&self, app: &App<S>) -> Option<&'static str> {
        self.selected.map(|date| status_label(app.is_checked(date)))
    }

    /// Close without changing anything.
    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Toggle the selected day and close. `None` when nothing was selected.
    ///
    /// # Errors
    /// Returns an error if saving fails; the dialog still closes.
    pub fn confirm<S: BlobStore>(
        &mut self,
        app: &mut App<S>,
        today: NaiveDate,
    ) -> Result<Option<ToggleOutcome>, StorageError> {
        let Some(date) = self.selected else {
            return Ok(None);
        };
        self.open = false;
        app.toggle_day(date, today).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, ACTIVE_PROJECT_KEY, CHECKINS_KEY, PROJECTS_KEY};

    fn date(s: &str) -> NaiveDate {
        s.parse::<DayKey>().unwrap().date()
    }

    #[test]
    fn first_load_writes_default_project() {
        let app = App::load(MemoryStore::new()).unwrap();
        assert_eq!(app.active_project(), &Project::default_project());
        assert_eq!(
            app.store().get(PROJECTS_KEY).as_deref(),
            Some(r#"[{"id":"default","name":"健身"}]"#)
        );
        assert_eq!(app.store().get(ACTIVE_PROJECT_KEY).as_deref(), Some("\"default\""));
        assert!(app.store().get(CHECKINS_KEY).is_none());
    }

    #[test]
    fn toggle_commits_checkins() {
        let mut app = App::load(MemoryStore::new()).unwrap();
        let today = date("2024-06-10");

        assert_eq!(app.toggle_day(today, today).unwrap(), ToggleOutcome::Checked);
        assert_eq!(
            app.store().get(CHECKINS_KEY).as_deref(),
            Some(r#"{"default":{"2024-06-10":true}}"#)
        );

        assert_eq!(app.toggle_day(today, today).unwrap(), ToggleOutcome::Unchecked);
        assert_eq!(app.store().get(CHECKINS_KEY).as_deref(), Some("{}"));
    }

    #[test]
    fn future_days_are_refused() {
        let mut app = App::load(MemoryStore::new()).unwrap();
        let outcome = app
            .toggle_day(date("2024-06-11"), date("2024-06-10"))
            .unwrap();
        assert_eq!(outcome, ToggleOutcome::RejectedFuture);
        assert!(app.checkins().is_empty());
        assert!(app.store().get(CHECKINS_KEY).is_none());
    }

    #[test]
    fn add_and_select_switch_partitions() {
        let mut app = App::load(MemoryStore::new()).unwrap();
        let today = date("2024-06-10");
        app.toggle_day(today, today).unwrap();

        let reading = app.add_project("读书").unwrap().unwrap();
        assert_eq!(app.active_project(), &reading);
        assert!(!app.is_checked(today));

        assert!(app.select_project("default").unwrap());
        assert!(app.is_checked(today));
        assert!(!app.select_project("missing").unwrap());
        assert_eq!(app.active_project().id, "default");
    }

    #[test]
    fn blank_project_name_writes_nothing() {
        let mut app = App::load(MemoryStore::new()).unwrap();
        let before = app.store().get(PROJECTS_KEY);
        assert!(app.add_project("  ").unwrap().is_none());
        assert_eq!(app.store().get(PROJECTS_KEY), before);
        assert_eq!(app.projects().len(), 1);
    }

    #[test]
    fn dialog_confirm_toggles_selected_day() {
        let mut app = App::load(MemoryStore::new()).unwrap();
        let today = date("2024-06-10");
        let mut dialog = CheckinDialog::new();

        assert_eq!(dialog.confirm(&mut app, today).unwrap(), None);

        dialog.open(today);
        assert!(dialog.is_open());
        assert_eq!(dialog.selected_key().unwrap().to_string(), "2024-06-10");
        assert_eq!(dialog.status(&app), Some("未打卡"));

        let outcome = dialog.confirm(&mut app, today).unwrap();
        assert_eq!(outcome, Some(ToggleOutcome::Checked));
        assert!(!dialog.is_open());
        assert_eq!(dialog.status(&app), Some("已打卡"));
    }

    #[test]
    fn dialog_cancel_changes_nothing() {
        let mut app = App::load(MemoryStore::new()).unwrap();
        let mut dialog = CheckinDialog::new();
        dialog.open(date("2024-06-01"));
        dialog.cancel();

        assert!(!dialog.is_open());
        assert!(app.checkins().is_empty());
        assert!(!app.is_checked(date("2024-06-01")));
        assert_eq!(
            app.toggle_day(date("2024-06-01"), date("2024-06-10")).unwrap(),
            ToggleOutcome::Checked
        );
    }
}
