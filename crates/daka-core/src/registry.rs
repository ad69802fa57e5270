//! Ordered project list with exactly one active project.
//!
//! A [`ProjectRegistry`] is never empty and its active id always names a
//! member. Both hold by construction: every registry comes out of
//! [`ProjectRegistry::reconcile`] or an operation on an existing registry.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_PROJECT_ID: &str = "default";
pub const DEFAULT_PROJECT_NAME: &str = "健身";

/// A habit being tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl Project {
    pub fn default_project() -> Self {
        Self {
            id: DEFAULT_PROJECT_ID.to_string(),
            name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
    active_id: String,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::reconcile(Vec::new(), None)
    }
}

impl ProjectRegistry {
    /// Restore the registry invariants over raw (e.g. freshly loaded) parts.
    ///
    /// An empty list becomes the single default project. Repeated ids keep
    /// their first occurrence. An active id that names no member falls back
    /// to the first project.
    pub fn reconcile(projects: Vec<Project>, active_id: Option<&str>) -> Self {
        let mut unique: Vec<Project> = Vec::with_capacity(projects.len());
        for project in projects {
            if unique.iter().any(|p| p.id == project.id) {
                debug!(id = %project.id, "dropping duplicate project id");
                continue;
            }
            unique.push(project);
        }

        if unique.is_empty() {
            debug!("no projects, reinstating default project");
            let default = Project::default_project();
            return Self {
                active_id: default.id.clone(),
                projects: vec![default],
            };
        }

        let active_id = match active_id {
            Some(id) if unique.iter().any(|p| p.id == id) => id.to_string(),
            _ => unique[0].id.clone(),
        };

        Self {
            projects: unique,
            active_id,
        }
    }

    /// Create a project named `name` (trimmed), put it first and activate it.
    ///
    /// A blank name leaves the registry unchanged and yields no project.
    pub fn add_project(&self, name: &str) -> (ProjectRegistry, Option<Project>) {
        let name = name.trim();
        if name.is_empty() {
            return (self.clone(), None);
        }

        let project = Project {
            id: self.fresh_id(),
            name: name.to_string(),
        };

        let mut projects = Vec::with_capacity(self.projects.len() + 1);
        projects.push(project.clone());
        projects.extend(self.projects.iter().cloned());

        let next = Self {
            active_id: project.id.clone(),
            projects,
        };
        (next, Some(project))
    }

    /// Make `project_id` active if it is a member; otherwise no change.
    pub fn select_active(&self, project_id: &str) -> ProjectRegistry {
        if !self.contains(project_id) {
            return self.clone();
        }
        Self {
            projects: self.projects.clone(),
            active_id: project_id.to_string(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn active(&self) -> &Project {
        // active_id is always a member and projects is never empty.
        self.get(&self.active_id).unwrap_or(&self.projects[0])
    }

    pub fn get(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub fn contains(&self, project_id: &str) -> bool {
        self.get(project_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
